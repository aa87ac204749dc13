use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::constants::DEFAULT_CATEGORY;
use crate::entities::media::GalleryEntry;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub banner_url: Option<String>,
    pub main_video_url: Option<String>,
    pub access_url: Option<String>,
    pub buy_url: Option<String>,
    pub price: Option<f64>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProductInsert {
    pub name: String,
    pub description: Option<String>,
    pub banner_url: Option<String>,
    pub main_video_url: Option<String>,
    pub access_url: Option<String>,
    pub buy_url: Option<String>,
    pub price: Option<f64>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field changes for an update. `None` on the media URLs means "keep
/// whatever is stored"; a replacement upload sets them to `Some`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: Option<String>,
    pub banner_url: Option<String>,
    pub main_video_url: Option<String>,
    pub access_url: Option<String>,
    pub buy_url: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    #[serde(flatten)]
    pub product: Product,
    pub gallery: Vec<GalleryEntry>,
}

// ───── Input & Validation ───────────────────────────────────────────

#[derive(Debug, Default, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(
        required(message = "The 'name' field is required"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,

    pub description: Option<String>,
    pub access_url: Option<String>,
    pub buy_url: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("Name cannot be empty".into());
        return Err(err);
    }
    Ok(())
}

impl NewProduct {
    pub fn prepare_for_insert(
        &self,
        banner_url: Option<String>,
        main_video_url: Option<String>,
    ) -> ProductInsert {
        let now = Utc::now();
        ProductInsert {
            // Callers validate first, so name is present here.
            name: self.name.clone().unwrap_or_default(),
            description: self.description.clone(),
            banner_url,
            main_video_url,
            access_url: self.access_url.clone(),
            buy_url: self.buy_url.clone(),
            price: self.price,
            category: self
                .category
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn prepare_for_update(
        &self,
        banner_url: Option<String>,
        main_video_url: Option<String>,
    ) -> ProductUpdate {
        ProductUpdate {
            name: self.name.clone().unwrap_or_default(),
            description: self.description.clone(),
            banner_url,
            main_video_url,
            access_url: self.access_url.clone(),
            buy_url: self.buy_url.clone(),
            price: self.price,
            category: self.category.clone().filter(|c| !c.trim().is_empty()),
        }
    }
}

// ───── Multipart Upload Form ────────────────────────────────────────

#[derive(Debug, MultipartForm)]
pub struct ProductUpload {
    pub name: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub access_url: Option<Text<String>>,
    pub buy_url: Option<Text<String>>,
    pub price: Option<Text<f64>>,
    pub category: Option<Text<String>>,

    #[multipart(limit = "100MiB")]
    pub banner: Option<TempFile>,

    #[multipart(rename = "main_video", limit = "100MiB")]
    pub main_video: Option<TempFile>,

    #[multipart(rename = "gallery", limit = "100MiB")]
    pub gallery: Vec<TempFile>,
}

impl ProductUpload {
    pub fn fields(&self) -> NewProduct {
        NewProduct {
            name: self.name.as_ref().map(|t| t.0.clone()),
            description: self.description.as_ref().map(|t| t.0.clone()),
            access_url: self.access_url.as_ref().map(|t| t.0.clone()),
            buy_url: self.buy_url.as_ref().map(|t| t.0.clone()),
            price: self.price.as_ref().map(|t| t.0),
            category: self.category.as_ref().map(|t| t.0.clone()),
        }
    }
}
