//! Listing service: search, detail, and ownership-scoped mutations.

use std::sync::Arc;

use bytes::Bytes;
use futures::future::try_join_all;
use tracing::info;
use uuid::Uuid;

use estately_core::config::media::MediaConfig;
use estately_core::error::{AppError, FieldError};
use estately_core::result::AppResult;
use estately_core::traits::ImageStore;
use estately_core::types::pagination::{PageRequest, PageResponse};
use estately_database::repositories::{ListingStore, UserStore};
use estately_entity::listing::filter::{ListingFilter, ListingSort};
use estately_entity::listing::{Listing, ListingWithSeller};
use estately_storage::resource_id_from_url;

use crate::context::RequestContext;

use super::validate::ListingDraft;

/// A single image file extracted from a multipart upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-supplied file name, used only for its extension.
    pub filename: String,
    /// Raw file bytes.
    pub data: Bytes,
}

/// Handles listing search and CRUD.
#[derive(Debug, Clone)]
pub struct ListingService {
    /// Listing store.
    listings: Arc<dyn ListingStore>,
    /// User store, for the posted-by role snapshot.
    users: Arc<dyn UserStore>,
    /// Image store for uploads and deletes.
    store: Arc<dyn ImageStore>,
    /// Media configuration.
    media: MediaConfig,
}

impl ListingService {
    /// Creates a new listing service.
    pub fn new(
        listings: Arc<dyn ListingStore>,
        users: Arc<dyn UserStore>,
        store: Arc<dyn ImageStore>,
        media: MediaConfig,
    ) -> Self {
        Self {
            listings,
            users,
            store,
            media,
        }
    }

    /// Search published listings. Open to unauthenticated callers.
    pub async fn search(
        &self,
        filter: &ListingFilter,
        sort: &ListingSort,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Listing>> {
        self.listings.search(filter, sort, page).await
    }

    /// Fetch a single listing with its seller's contact details.
    pub async fn get(&self, id: Uuid) -> AppResult<ListingWithSeller> {
        self.listings
            .find_with_seller(id)
            .await?
            .ok_or_else(|| AppError::not_found("Listing not found"))
    }

    /// List the caller's own listings, newest first.
    pub async fn mine(&self, ctx: &RequestContext) -> AppResult<Vec<Listing>> {
        self.listings.find_by_seller(ctx.user_id).await
    }

    /// Create a listing with its images.
    ///
    /// Images are uploaded concurrently; the stored URL order matches the
    /// order the files appeared in the request. The seller's current role
    /// is snapshotted onto the listing as `posted_by`.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        draft: ListingDraft,
        images: Vec<ImageUpload>,
    ) -> AppResult<Listing> {
        if images.len() > self.media.max_images_per_listing {
            return Err(AppError::validation_fields(vec![FieldError::new(
                "images",
                format!(
                    "At most {} images are allowed",
                    self.media.max_images_per_listing
                ),
            )]));
        }

        let valid = draft.validate()?;

        let seller = self
            .users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account no longer exists"))?;

        let uploads = images.into_iter().map(|image| {
            let store = Arc::clone(&self.store);
            async move { store.upload(&image.filename, image.data).await }
        });
        let image_urls = try_join_all(uploads).await?;

        let listing = self
            .listings
            .create(&valid.into_create(image_urls, seller.id, seller.role))
            .await?;

        info!(
            user_id = %ctx.user_id,
            listing_id = %listing.id,
            images = listing.images.len(),
            "Listing created"
        );

        Ok(listing)
    }

    /// Update a listing's fields. Only the owner may update; stored images
    /// are left untouched.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        draft: ListingDraft,
    ) -> AppResult<Listing> {
        let existing = self
            .listings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Listing not found"))?;

        if existing.seller_id != ctx.user_id {
            return Err(AppError::forbidden("You do not own this listing"));
        }

        let valid = draft.validate()?;
        let listing = self.listings.update(id, &valid.into_update()).await?;

        info!(user_id = %ctx.user_id, listing_id = %id, "Listing updated");
        Ok(listing)
    }

    /// Delete a listing and its stored images. Only the owner may delete.
    ///
    /// Images are removed from storage before the row is deleted, so a
    /// storage fault leaves the listing (and its URLs) intact for a retry.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let existing = self
            .listings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Listing not found"))?;

        if existing.seller_id != ctx.user_id {
            return Err(AppError::forbidden("You do not own this listing"));
        }

        let resource_ids: Vec<String> = existing
            .images
            .iter()
            .filter_map(|url| resource_id_from_url(url))
            .collect();
        self.store.delete_many(&resource_ids).await?;

        self.listings.delete(id).await?;

        info!(
            user_id = %ctx.user_id,
            listing_id = %id,
            images = resource_ids.len(),
            "Listing deleted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use estately_core::error::ErrorKind;
    use estately_entity::listing::category::{ListingIntent, PriceUnit, PropertyType};
    use estately_entity::listing::model::{CreateListing, UpdateListing};
    use estately_entity::user::model::CreateUser;
    use estately_entity::user::{User, UserRole};

    /// In-memory listing store holding at most one row. Mutations append
    /// to a shared log so tests can assert call ordering.
    #[derive(Debug)]
    struct MemoryListings {
        row: Option<Listing>,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl ListingStore for MemoryListings {
        async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<Listing>> {
            Ok(self.row.clone())
        }

        async fn find_with_seller(&self, _id: Uuid) -> AppResult<Option<ListingWithSeller>> {
            Ok(None)
        }

        async fn find_by_seller(&self, _seller_id: Uuid) -> AppResult<Vec<Listing>> {
            Ok(self.row.clone().into_iter().collect())
        }

        async fn search(
            &self,
            _filter: &ListingFilter,
            _sort: &ListingSort,
            page: &PageRequest,
        ) -> AppResult<PageResponse<Listing>> {
            Ok(PageResponse::new(Vec::new(), page, 0))
        }

        async fn create(&self, data: &CreateListing) -> AppResult<Listing> {
            self.log.lock().unwrap().push("row-insert");
            let mut listing = sample_listing(data.seller_id);
            listing.images = data.images.clone();
            listing.posted_by = data.posted_by;
            Ok(listing)
        }

        async fn update(&self, _id: Uuid, data: &UpdateListing) -> AppResult<Listing> {
            let mut listing = self.row.clone().expect("row present");
            listing.title = data.title.clone();
            Ok(listing)
        }

        async fn delete(&self, _id: Uuid) -> AppResult<bool> {
            self.log.lock().unwrap().push("row-delete");
            Ok(true)
        }

        async fn delete_by_seller(&self, _seller_id: Uuid) -> AppResult<u64> {
            Ok(0)
        }
    }

    #[derive(Debug)]
    struct MemoryUsers {
        user: Option<User>,
    }

    #[async_trait]
    impl UserStore for MemoryUsers {
        async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<User>> {
            Ok(self.user.clone())
        }

        async fn find_by_email(&self, _email: &str) -> AppResult<Option<User>> {
            Ok(self.user.clone())
        }

        async fn create(&self, _data: &CreateUser) -> AppResult<User> {
            unimplemented!()
        }

        async fn delete(&self, _user_id: Uuid) -> AppResult<bool> {
            Ok(self.user.is_some())
        }
    }

    /// Image store that derives URLs from filenames and logs deletes.
    #[derive(Debug)]
    struct MemoryImages {
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl ImageStore for MemoryImages {
        fn provider_type(&self) -> &str {
            "memory"
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(true)
        }

        async fn upload(&self, filename: &str, _data: Bytes) -> AppResult<String> {
            Ok(format!("http://img.test/media/listings/{filename}"))
        }

        async fn delete_many(&self, _resource_ids: &[String]) -> AppResult<()> {
            self.log.lock().unwrap().push("image-delete");
            Ok(())
        }
    }

    fn sample_listing(seller_id: Uuid) -> Listing {
        Listing {
            id: Uuid::new_v4(),
            title: "3BHK with garden".to_string(),
            description: None,
            listing_type: ListingIntent::Sale,
            price_amount: 6_000_000.0,
            price_unit: PriceUnit::Total,
            district: "Thrissur".to_string(),
            city: "Thrissur".to_string(),
            locality: None,
            google_maps_link: None,
            size_sqft: Some(1600.0),
            property_type: PropertyType::House,
            features: Vec::new(),
            images: vec![
                "http://img.test/media/listings/a.jpg".to_string(),
                "http://img.test/media/listings/b.jpg".to_string(),
            ],
            seller_id,
            posted_by: UserRole::Owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_user(id: Uuid) -> User {
        User {
            id,
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: UserRole::Agent,
            phone_number: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn valid_draft() -> ListingDraft {
        ListingDraft {
            title: Some("3BHK with garden".to_string()),
            price_amount: Some("6000000".to_string()),
            district: Some("Thrissur".to_string()),
            city: Some("Thrissur".to_string()),
            property_type: Some("house".to_string()),
            ..Default::default()
        }
    }

    fn ctx(user_id: Uuid) -> RequestContext {
        RequestContext::new(user_id, UserRole::Owner)
    }

    fn service(
        row: Option<Listing>,
        user: Option<User>,
        log: &Arc<Mutex<Vec<&'static str>>>,
    ) -> ListingService {
        ListingService::new(
            Arc::new(MemoryListings {
                row,
                log: Arc::clone(log),
            }),
            Arc::new(MemoryUsers { user }),
            Arc::new(MemoryImages {
                log: Arc::clone(log),
            }),
            MediaConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_update_of_missing_listing_is_not_found() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let svc = service(None, None, &log);

        let err = svc
            .update(&ctx(Uuid::new_v4()), Uuid::new_v4(), valid_draft())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_by_non_owner_is_forbidden() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let owner = Uuid::new_v4();
        let listing = sample_listing(owner);
        let id = listing.id;
        let svc = service(Some(listing), None, &log);

        let err = svc
            .update(&ctx(Uuid::new_v4()), id, valid_draft())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        // The owner gets through.
        svc.update(&ctx(owner), id, valid_draft()).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_by_non_owner_is_forbidden() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let listing = sample_listing(Uuid::new_v4());
        let id = listing.id;
        let svc = service(Some(listing), None, &log);

        let err = svc.delete(&ctx(Uuid::new_v4()), id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
        // Nothing was deleted anywhere.
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_images_before_the_row() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let owner = Uuid::new_v4();
        let listing = sample_listing(owner);
        let id = listing.id;
        let svc = service(Some(listing), None, &log);

        svc.delete(&ctx(owner), id).await.unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["image-delete", "row-delete"]);
    }

    #[tokio::test]
    async fn test_create_when_account_deleted_is_not_found() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let svc = service(None, None, &log);

        let err = svc
            .create(&ctx(Uuid::new_v4()), valid_draft(), Vec::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        // No row was inserted.
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_preserves_image_order_and_snapshots_role() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let seller = Uuid::new_v4();
        let svc = service(None, Some(sample_user(seller)), &log);

        let images = vec![
            ImageUpload {
                filename: "first.jpg".to_string(),
                data: Bytes::from_static(b"1"),
            },
            ImageUpload {
                filename: "second.jpg".to_string(),
                data: Bytes::from_static(b"2"),
            },
            ImageUpload {
                filename: "third.jpg".to_string(),
                data: Bytes::from_static(b"3"),
            },
        ];
        let listing = svc.create(&ctx(seller), valid_draft(), images).await.unwrap();

        assert_eq!(
            listing.images,
            vec![
                "http://img.test/media/listings/first.jpg".to_string(),
                "http://img.test/media/listings/second.jpg".to_string(),
                "http://img.test/media/listings/third.jpg".to_string(),
            ]
        );
        assert_eq!(listing.posted_by, UserRole::Agent);
    }

    #[tokio::test]
    async fn test_create_rejects_too_many_images() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let seller = Uuid::new_v4();
        let svc = service(None, Some(sample_user(seller)), &log);

        let images = (0..7)
            .map(|i| ImageUpload {
                filename: format!("{i}.jpg"),
                data: Bytes::from_static(b"x"),
            })
            .collect();
        let err = svc
            .create(&ctx(seller), valid_draft(), images)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.fields[0].field, "images");
    }
}
