// file: src/render/patterns.rs
// description: compiled regex patterns for answer post-processing
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Links embedded in answers
    pub static ref MARKDOWN_LINK: Regex = Regex::new(
        r"!?\[([^\]]*)\]\((?:[^()\s]+|\([^()\s]*\))*\)"
    ).expect("MARKDOWN_LINK regex is valid");

    pub static ref BARE_URL: Regex = Regex::new(
        r"(?i)\b(?:https?://|www\.)[^\s<>()\[\]]+"
    ).expect("BARE_URL regex is valid");

    pub static ref SPACE_BEFORE_PUNCT: Regex = Regex::new(
        r"\s+([.,;:!?])"
    ).expect("SPACE_BEFORE_PUNCT regex is valid");

    pub static ref MULTI_SPACE: Regex = Regex::new(
        r"[ \t]{2,}"
    ).expect("MULTI_SPACE regex is valid");

    // Google Drive file references
    pub static ref DRIVE_FILE_PATH: Regex = Regex::new(
        r"(?i)^https?://(?:drive|docs)\.google\.com/(?:.*/)?(?:file/)?d/([A-Za-z0-9_-]{10,})"
    ).expect("DRIVE_FILE_PATH regex is valid");

    pub static ref DRIVE_ID_PARAM: Regex = Regex::new(
        r"(?i)^https?://(?:drive|docs)\.google\.com/.*[?&]id=([A-Za-z0-9_-]{10,})"
    ).expect("DRIVE_ID_PARAM regex is valid");
}
