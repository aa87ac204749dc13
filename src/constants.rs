use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Per-file upload cap (100 MiB).
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Maximum number of gallery files accepted per product.
pub const MAX_GALLERY_FILES: usize = 10;

pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpeg", "jpg", "png", "gif"];
pub const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "mov", "avi", "webm"];

pub const DEFAULT_CATEGORY: &str = "meus_produtos";
