use std::collections::HashMap;

use uuid::Uuid;
use validator::Validate;

use crate::constants::{MAX_GALLERY_FILES, MAX_UPLOAD_BYTES};
use crate::entities::media::{GalleryEntry, MediaItemInsert, MediaKind};
use crate::entities::product::{NewProduct, ProductResponse};
use crate::errors::AppError;
use crate::infrastructure::storage::{MediaStore, StagedFile};
use crate::interfaces::repositories::product::ProductRepository;

/// Files accompanying a create/update request, already staged to disk.
#[derive(Debug, Default)]
pub struct UploadBatch {
    pub banner: Option<StagedFile>,
    pub main_video: Option<StagedFile>,
    pub gallery: Vec<StagedFile>,
}

pub struct CatalogHandler<R, S>
where
    R: ProductRepository,
    S: MediaStore,
{
    pub product_repo: R,
    pub media_store: S,
}

impl<R, S> CatalogHandler<R, S>
where
    R: ProductRepository,
    S: MediaStore,
{
    pub fn new(product_repo: R, media_store: S) -> Self {
        CatalogHandler { product_repo, media_store }
    }

    pub async fn list_products(&self) -> Result<Vec<ProductResponse>, AppError> {
        let products = self.product_repo.get_all_products().await?;
        let ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();

        let mut galleries: HashMap<Uuid, Vec<GalleryEntry>> = HashMap::new();
        for item in self.product_repo.get_galleries(&ids).await? {
            galleries.entry(item.product_id).or_default().push(item.into());
        }

        Ok(products
            .into_iter()
            .map(|product| {
                let gallery = galleries.remove(&product.id).unwrap_or_default();
                ProductResponse { product, gallery }
            })
            .collect())
    }

    pub async fn get_product(&self, id: &Uuid) -> Result<ProductResponse, AppError> {
        let product = self.product_repo.get_product_by_id(id).await?;
        let gallery = self
            .product_repo
            .get_gallery(id)
            .await?
            .into_iter()
            .map(GalleryEntry::from)
            .collect();

        Ok(ProductResponse { product, gallery })
    }

    /// Validates, persists the uploads, then inserts the product with its
    /// gallery in one transaction. Nothing reaches the database if any
    /// upload is rejected.
    pub async fn create_product(
        &self,
        input: NewProduct,
        uploads: UploadBatch,
    ) -> Result<Uuid, AppError> {
        input.validate()?;
        check_batch(&uploads)?;

        let banner_url = self.store_optional(uploads.banner.as_ref()).await?;
        let main_video_url = self.store_optional(uploads.main_video.as_ref()).await?;
        let media = self.store_gallery(&uploads.gallery).await?;

        let insert = input.prepare_for_insert(banner_url, main_video_url);
        self.product_repo.create_product(&insert, &media).await
    }

    /// Partial update: stored banner/video URLs survive unless a
    /// replacement file came with the request, and the gallery is replaced
    /// wholesale only when new gallery files are present.
    pub async fn update_product(
        &self,
        id: &Uuid,
        input: NewProduct,
        uploads: UploadBatch,
    ) -> Result<(), AppError> {
        input.validate()?;
        check_batch(&uploads)?;

        // Reject unknown ids before any file lands on disk.
        self.product_repo.get_product_by_id(id).await?;

        let banner_url = self.store_optional(uploads.banner.as_ref()).await?;
        let main_video_url = self.store_optional(uploads.main_video.as_ref()).await?;

        let replacement = if uploads.gallery.is_empty() {
            None
        } else {
            Some(self.store_gallery(&uploads.gallery).await?)
        };

        let changes = input.prepare_for_update(banner_url, main_video_url);
        self.product_repo
            .update_product(id, &changes, replacement)
            .await
    }

    pub async fn delete_product(&self, id: &Uuid) -> Result<(), AppError> {
        self.product_repo.delete_product(id).await
    }

    async fn store_optional(
        &self,
        staged: Option<&StagedFile>,
    ) -> Result<Option<String>, AppError> {
        match staged {
            Some(file) => Ok(Some(self.media_store.store(file).await?.url)),
            None => Ok(None),
        }
    }

    async fn store_gallery(
        &self,
        gallery: &[StagedFile],
    ) -> Result<Vec<MediaItemInsert>, AppError> {
        let mut media = Vec::with_capacity(gallery.len());
        for (position, staged) in gallery.iter().enumerate() {
            let kind = classify_or_reject(staged)?;
            let stored = self.media_store.store(staged).await?;
            media.push(MediaItemInsert {
                media_type: kind,
                url: stored.url,
                order_index: position as i32,
            });
        }
        Ok(media)
    }
}

/// Allow-list and size screening for the whole batch, before anything is
/// persisted anywhere.
fn check_batch(uploads: &UploadBatch) -> Result<(), AppError> {
    if uploads.gallery.len() > MAX_GALLERY_FILES {
        return Err(AppError::UploadRejected(format!(
            "At most {} gallery files are allowed",
            MAX_GALLERY_FILES
        )));
    }

    for staged in uploads
        .banner
        .iter()
        .chain(uploads.main_video.iter())
        .chain(uploads.gallery.iter())
    {
        classify_or_reject(staged)?;
        if staged.size > MAX_UPLOAD_BYTES {
            return Err(AppError::FileTooLarge(format!(
                "'{}' exceeds the 100 MiB limit",
                staged.file_name
            )));
        }
    }

    Ok(())
}

fn classify_or_reject(staged: &StagedFile) -> Result<MediaKind, AppError> {
    MediaKind::classify(&staged.file_name, staged.content_type.as_deref()).ok_or_else(|| {
        AppError::UploadRejected(format!("File type not allowed: {}", staged.file_name))
    })
}
