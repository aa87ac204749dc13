
use mockall::mock;
use test_fixtures::*;
use uuid::Uuid;

use vip_catalog_backend::constants::MAX_UPLOAD_BYTES;
use vip_catalog_backend::entities::media::{MediaItem, MediaItemInsert, MediaKind};
use vip_catalog_backend::entities::product::{NewProduct, Product, ProductInsert, ProductUpdate};
use vip_catalog_backend::errors::AppError;
use vip_catalog_backend::repositories::product::ProductRepository;
use vip_catalog_backend::storage::{MediaStore, StagedFile, StoredMedia};
use vip_catalog_backend::use_cases::catalog::{CatalogHandler, UploadBatch};

mock! {
    pub ProductRepo {}

    #[async_trait::async_trait]
    impl ProductRepository for ProductRepo {
        async fn create_product(
            &self,
            product: &ProductInsert,
            media: &[MediaItemInsert],
        ) -> Result<Uuid, AppError>;
        async fn get_product_by_id(&self, id: &Uuid) -> Result<Product, AppError>;
        async fn get_all_products(&self) -> Result<Vec<Product>, AppError>;
        async fn get_gallery(&self, product_id: &Uuid) -> Result<Vec<MediaItem>, AppError>;
        async fn get_galleries(&self, product_ids: &[Uuid]) -> Result<Vec<MediaItem>, AppError>;
        async fn update_product(
            &self,
            id: &Uuid,
            changes: &ProductUpdate,
            replacement_gallery: Option<Vec<MediaItemInsert>>,
        ) -> Result<(), AppError>;
        async fn delete_product(&self, id: &Uuid) -> Result<(), AppError>;
        async fn check_connection(&self) -> Result<(), AppError>;
    }
}

mock! {
    pub Store {}

    #[async_trait::async_trait]
    impl MediaStore for Store {
        async fn store(&self, staged: &StagedFile) -> Result<StoredMedia, AppError>;
    }
}

/// Store mock that echoes the original file name into the URL, so
/// assertions can follow which upload produced which row.
fn passthrough_store(times: usize) -> MockStore {
    let mut store = MockStore::new();
    store.expect_store().times(times).returning(|staged| {
        Ok(StoredMedia {
            file_name: staged.file_name.clone(),
            url: format!("/uploads/{}", staged.file_name),
        })
    });
    store
}

// ───── create ───────────────────────────────────────────────────────

#[actix_rt::test]
async fn create_without_name_is_rejected_before_any_side_effect() {
    let mut repo = MockProductRepo::new();
    repo.expect_create_product().never();
    let mut store = MockStore::new();
    store.expect_store().never();

    let handler = CatalogHandler::new(repo, store);

    let result = handler
        .create_product(NewProduct::default(), UploadBatch::default())
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[actix_rt::test]
async fn create_orders_gallery_by_upload_position() {
    let expected_id = Uuid::new_v4();

    let mut repo = MockProductRepo::new();
    repo.expect_create_product()
        .withf(|product, media| {
            product.name == "Test"
                && product.price == Some(9.99)
                && media.len() == 2
                && media[0].media_type == MediaKind::Image
                && media[0].order_index == 0
                && media[1].media_type == MediaKind::Video
                && media[1].order_index == 1
        })
        .returning(move |_, _| Ok(expected_id));

    let handler = CatalogHandler::new(repo, passthrough_store(2));

    let input = NewProduct {
        name: Some("Test".into()),
        price: Some(9.99),
        ..Default::default()
    };
    let uploads = UploadBatch {
        gallery: vec![staged("photo.jpg", 1024), staged("clip.mp4", 2048)],
        ..Default::default()
    };

    let id = handler.create_product(input, uploads).await.unwrap();
    assert_eq!(id, expected_id);
}

#[actix_rt::test]
async fn create_stores_banner_and_main_video_urls() {
    let mut repo = MockProductRepo::new();
    repo.expect_create_product()
        .withf(|product, media| {
            product.banner_url.as_deref() == Some("/uploads/banner.png")
                && product.main_video_url.as_deref() == Some("/uploads/teaser.mp4")
                && media.is_empty()
        })
        .returning(|_, _| Ok(Uuid::new_v4()));

    let handler = CatalogHandler::new(repo, passthrough_store(2));

    let uploads = UploadBatch {
        banner: Some(staged("banner.png", 512)),
        main_video: Some(staged("teaser.mp4", 4096)),
        ..Default::default()
    };

    handler
        .create_product(named_product("Test"), uploads)
        .await
        .unwrap();
}

#[actix_rt::test]
async fn create_rejects_disallowed_file_types() {
    let mut repo = MockProductRepo::new();
    repo.expect_create_product().never();
    let mut store = MockStore::new();
    store.expect_store().never();

    let handler = CatalogHandler::new(repo, store);

    let uploads = UploadBatch {
        gallery: vec![staged("malware.exe", 64)],
        ..Default::default()
    };

    let result = handler.create_product(named_product("Test"), uploads).await;
    assert!(matches!(result, Err(AppError::UploadRejected(_))));
}

#[actix_rt::test]
async fn create_rejects_more_than_ten_gallery_files() {
    let mut repo = MockProductRepo::new();
    repo.expect_create_product().never();
    let mut store = MockStore::new();
    store.expect_store().never();

    let handler = CatalogHandler::new(repo, store);

    let uploads = UploadBatch {
        gallery: (0..11).map(|i| staged(&format!("p{i}.jpg"), 64)).collect(),
        ..Default::default()
    };

    let result = handler.create_product(named_product("Test"), uploads).await;
    assert!(matches!(result, Err(AppError::UploadRejected(_))));
}

#[actix_rt::test]
async fn oversize_upload_is_file_too_large_never_internal() {
    let mut repo = MockProductRepo::new();
    repo.expect_create_product().never();
    let mut store = MockStore::new();
    store.expect_store().never();

    let handler = CatalogHandler::new(repo, store);

    let uploads = UploadBatch {
        gallery: vec![staged("huge.mp4", MAX_UPLOAD_BYTES + 1)],
        ..Default::default()
    };

    let result = handler.create_product(named_product("Test"), uploads).await;
    assert!(matches!(result, Err(AppError::FileTooLarge(_))));
}

// ───── update ───────────────────────────────────────────────────────

#[actix_rt::test]
async fn update_without_uploads_preserves_media_and_gallery() {
    let existing = sample_product("Existing");
    let id = existing.id;

    let mut repo = MockProductRepo::new();
    repo.expect_get_product_by_id()
        .returning(move |_| Ok(existing.clone()));
    repo.expect_update_product()
        .withf(move |update_id, changes, replacement| {
            *update_id == id
                && changes.banner_url.is_none()
                && changes.main_video_url.is_none()
                && replacement.is_none()
        })
        .returning(|_, _, _| Ok(()));

    let mut store = MockStore::new();
    store.expect_store().never();

    let handler = CatalogHandler::new(repo, store);
    handler
        .update_product(&id, named_product("Renamed"), UploadBatch::default())
        .await
        .unwrap();
}

#[actix_rt::test]
async fn update_with_gallery_files_replaces_the_whole_gallery() {
    let existing = sample_product("Existing");
    let id = existing.id;

    let mut repo = MockProductRepo::new();
    repo.expect_get_product_by_id()
        .returning(move |_| Ok(existing.clone()));
    repo.expect_update_product()
        .withf(|_, _, replacement| {
            replacement.as_ref().map(|g| g.len()) == Some(2)
        })
        .returning(|_, _, _| Ok(()));

    let handler = CatalogHandler::new(repo, passthrough_store(2));

    let uploads = UploadBatch {
        gallery: vec![staged("a.png", 10), staged("b.webm", 20)],
        ..Default::default()
    };
    handler
        .update_product(&id, named_product("Renamed"), uploads)
        .await
        .unwrap();
}

#[actix_rt::test]
async fn update_unknown_product_fails_before_storing_files() {
    let mut repo = MockProductRepo::new();
    repo.expect_get_product_by_id()
        .returning(|_| Err(AppError::NotFound("Product not found".into())));
    repo.expect_update_product().never();

    let mut store = MockStore::new();
    store.expect_store().never();

    let handler = CatalogHandler::new(repo, store);

    let uploads = UploadBatch {
        banner: Some(staged("banner.png", 10)),
        ..Default::default()
    };
    let result = handler
        .update_product(&Uuid::new_v4(), named_product("Renamed"), uploads)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

// ───── read & delete ────────────────────────────────────────────────

#[actix_rt::test]
async fn get_product_attaches_the_ordered_gallery() {
    let product = sample_product("With gallery");
    let id = product.id;

    let mut repo = MockProductRepo::new();
    repo.expect_get_product_by_id()
        .returning(move |_| Ok(product.clone()));
    repo.expect_get_gallery()
        .returning(move |_| Ok(vec![media_item(id, "image", 0), media_item(id, "video", 1)]));

    let handler = CatalogHandler::new(repo, MockStore::new());

    let response = handler.get_product(&id).await.unwrap();
    assert_eq!(response.gallery.len(), 2);
    assert_eq!(response.gallery[0].media_type, "image");
    assert_eq!(response.gallery[0].order_index, 0);
    assert_eq!(response.gallery[1].media_type, "video");
    assert_eq!(response.gallery[1].order_index, 1);
}

#[actix_rt::test]
async fn list_products_groups_galleries_per_product() {
    let first = sample_product("First");
    let second = sample_product("Second");
    let first_id = first.id;

    let mut repo = MockProductRepo::new();
    let listed = vec![first.clone(), second.clone()];
    repo.expect_get_all_products()
        .returning(move || Ok(listed.clone()));
    repo.expect_get_galleries()
        .returning(move |_| Ok(vec![media_item(first_id, "image", 0)]));

    let handler = CatalogHandler::new(repo, MockStore::new());

    let products = handler.list_products().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].gallery.len(), 1);
    assert!(products[1].gallery.is_empty());
}

#[actix_rt::test]
async fn delete_propagates_not_found() {
    let mut repo = MockProductRepo::new();
    repo.expect_delete_product()
        .returning(|_| Err(AppError::NotFound("Product not found".into())));

    let handler = CatalogHandler::new(repo, MockStore::new());

    let result = handler.delete_product(&Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}
