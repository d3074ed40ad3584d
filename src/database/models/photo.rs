//! Print queue models.

use std::path::Path;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A photo queued for printing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoRecord {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Serial shown to the guest and printed on the photo
    pub serial: String,

    /// Display name of the uploader
    pub sender_name: String,

    /// Where the image was stored on disk
    pub file_path: String,

    /// Set once the print station has picked the photo up
    #[serde(default)]
    pub printed: bool,

    /// Unix timestamp (seconds)
    pub created_at: i64,
}

impl PhotoRecord {
    /// Create a record for the `seq`-th photo of the event.
    pub fn new(seq: i64, sender_name: &str, path: &Path) -> Self {
        Self {
            id: None,
            serial: Self::format_serial(seq),
            sender_name: sender_name.to_string(),
            file_path: path.to_string_lossy().into_owned(),
            printed: false,
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Zero-padded to four digits; longer sequences keep all digits.
    pub fn format_serial(seq: i64) -> String {
        format!("{:04}", seq)
    }
}

/// Sequence document backing serial allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoCounter {
    #[serde(rename = "_id")]
    pub id: String,

    pub seq: i64,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_serial_is_zero_padded() {
        assert_eq!(PhotoRecord::format_serial(1), "0001");
        assert_eq!(PhotoRecord::format_serial(42), "0042");
        assert_eq!(PhotoRecord::format_serial(12345), "12345");
    }

    #[test]
    fn test_new_record_is_unprinted() {
        let record = PhotoRecord::new(7, "Alice", &PathBuf::from("images/123.jpg"));

        assert_eq!(record.serial, "0007");
        assert_eq!(record.sender_name, "Alice");
        assert_eq!(record.file_path, "images/123.jpg");
        assert!(!record.printed);
        assert!(record.id.is_none());
    }
}
