//! Repository module - data access layer.

mod message_repository;
mod photo_repository;

pub use message_repository::MessageRepository;
pub use photo_repository::PhotoRepository;
