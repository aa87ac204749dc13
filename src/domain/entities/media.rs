use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classifies an upload from its file name and declared MIME type.
    ///
    /// Extension wins; the declared type is only consulted when the name
    /// carries no recognizable extension. `None` means the upload is not
    /// in the allow-list and must be rejected.
    pub fn classify(file_name: &str, declared_type: Option<&str>) -> Option<MediaKind> {
        if let Some(ext) = extension_of(file_name) {
            if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
                return Some(MediaKind::Video);
            }
            if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
                return Some(MediaKind::Image);
            }
            return None;
        }

        match declared_type {
            Some(mime) if mime.eq_ignore_ascii_case("image/jpeg")
                || mime.eq_ignore_ascii_case("image/png")
                || mime.eq_ignore_ascii_case("image/gif") => Some(MediaKind::Image),
            Some(mime) if mime.eq_ignore_ascii_case("video/mp4")
                || mime.eq_ignore_ascii_case("video/quicktime")
                || mime.eq_ignore_ascii_case("video/x-msvideo")
                || mime.eq_ignore_ascii_case("video/webm") => Some(MediaKind::Video),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

pub fn extension_of(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MediaItem {
    pub id: Uuid,
    pub product_id: Uuid,
    #[serde(rename = "type")]
    pub media_type: String,
    pub url: String,
    pub order_index: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaItemInsert {
    pub media_type: MediaKind,
    pub url: String,
    pub order_index: i32,
}

/// One gallery entry as the API returns it.
#[derive(Debug, Serialize)]
pub struct GalleryEntry {
    #[serde(rename = "type")]
    pub media_type: String,
    pub url: String,
    pub order_index: i32,
}

impl From<MediaItem> for GalleryEntry {
    fn from(item: MediaItem) -> Self {
        GalleryEntry {
            media_type: item.media_type,
            url: item.url,
            order_index: item.order_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_extensions_classify_as_video() {
        for name in ["clip.mp4", "clip.MOV", "clip.avi", "clip.webm"] {
            assert_eq!(MediaKind::classify(name, None), Some(MediaKind::Video), "{name}");
        }
    }

    #[test]
    fn image_extensions_classify_as_image() {
        for name in ["photo.jpg", "photo.JPEG", "photo.png", "photo.gif"] {
            assert_eq!(MediaKind::classify(name, None), Some(MediaKind::Image), "{name}");
        }
    }

    #[test]
    fn disallowed_extensions_are_rejected() {
        assert_eq!(MediaKind::classify("script.exe", None), None);
        assert_eq!(MediaKind::classify("doc.pdf", Some("application/pdf")), None);
        // Extension wins over a plausible declared type.
        assert_eq!(MediaKind::classify("payload.exe", Some("image/png")), None);
    }

    #[test]
    fn declared_type_is_a_fallback_without_extension() {
        assert_eq!(MediaKind::classify("upload", Some("image/png")), Some(MediaKind::Image));
        assert_eq!(MediaKind::classify("upload", Some("video/mp4")), Some(MediaKind::Video));
        assert_eq!(MediaKind::classify("upload", None), None);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MediaKind::Image).unwrap(), "\"image\"");
        assert_eq!(serde_json::to_string(&MediaKind::Video).unwrap(), "\"video\"");
    }
}
