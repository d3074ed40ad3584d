//! Photo action.
//!
//! Downloads the uploaded image, stores it, queues it for printing and
//! tells the user their serial.

use tracing::{info, warn};

use super::Outcome;
use crate::bot::ports::Services;
use crate::i18n::get_text;

/// Accept the image in `message_id` from `user_id` for printing.
///
/// Any failure before the serial is issued aborts silently for the user;
/// only the log records it.
pub async fn submit(
    services: &Services,
    locale: &str,
    user_id: &str,
    reply_token: &str,
    message_id: &str,
) -> anyhow::Result<Outcome> {
    let bytes = services.messenger.download_content(message_id).await?;
    let path = services.images.save_image(message_id, &bytes).await?;
    let sender_name = services.messenger.display_name(user_id).await?;
    let record = services.prints.enqueue(&sender_name, &path).await?;

    info!(
        "Queued photo {} from {} ({}) as #{}",
        path.display(),
        sender_name,
        user_id,
        record.serial
    );

    let reply = get_text(locale, "photo.received").replace("{serial}", &record.serial);
    if let Err(e) = services.messenger.reply(reply_token, &reply).await {
        warn!("Failed to send serial {} to {}: {}", record.serial, user_id, e);
    }

    Ok(Outcome::PhotoAccepted {
        serial: record.serial,
    })
}
