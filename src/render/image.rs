// file: src/render/image.rs
// description: image reference extraction from row cells
// reference: Google Drive share link formats

use super::patterns::{DRIVE_FILE_PATH, DRIVE_ID_PARAM};
use serde::{Deserialize, Serialize};
use std::fmt;

const DRIVE_VIEW_URL: &str = "https://drive.google.com/uc?export=view&id=";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageRef {
    /// File hosted on Google Drive, addressed by its file id
    Drive { file_id: String },
    /// Any other http(s) URL
    Url { url: String },
    /// Local path or opaque name, passed through untouched
    Other { reference: String },
}

impl ImageRef {
    /// Reads an image cell; blank cells have no image.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let drive_id = DRIVE_FILE_PATH
            .captures(raw)
            .or_else(|| DRIVE_ID_PARAM.captures(raw))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        if let Some(file_id) = drive_id {
            return Some(Self::Drive { file_id });
        }

        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Some(Self::Url {
                url: raw.to_string(),
            })
        } else {
            Some(Self::Other {
                reference: raw.to_string(),
            })
        }
    }

    /// Address an image viewer can fetch directly.
    pub fn direct_url(&self) -> String {
        match self {
            Self::Drive { file_id } => format!("{}{}", DRIVE_VIEW_URL, file_id),
            Self::Url { url } => url.clone(),
            Self::Other { reference } => reference.clone(),
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.direct_url())
    }
}
