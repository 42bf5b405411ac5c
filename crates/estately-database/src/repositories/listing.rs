//! Listing repository implementation.
//!
//! The search path builds its SQL dynamically with [`sqlx::QueryBuilder`].
//! Both the COUNT query and the page SELECT go through the same
//! [`push_filter`] function, so the reported total always agrees with the
//! rows being paged.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use estately_core::error::{AppError, ErrorKind};
use estately_core::result::AppResult;
use estately_core::types::pagination::{PageRequest, PageResponse};
use estately_entity::listing::filter::{ListingFilter, ListingSort};
use estately_entity::listing::model::{CreateListing, UpdateListing};
use estately_entity::listing::{Listing, ListingWithSeller};

/// Store of property listings.
///
/// Implemented by [`ListingRepository`] against PostgreSQL; the service
/// layer only depends on this trait.
#[async_trait]
pub trait ListingStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a listing by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Listing>>;

    /// Find a listing joined with its seller's public contact details.
    async fn find_with_seller(&self, id: Uuid) -> AppResult<Option<ListingWithSeller>>;

    /// List every listing owned by the given seller, newest first.
    async fn find_by_seller(&self, seller_id: Uuid) -> AppResult<Vec<Listing>>;

    /// Search listings with the given filter, sort, and page.
    async fn search(
        &self,
        filter: &ListingFilter,
        sort: &ListingSort,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Listing>>;

    /// Create a new listing.
    async fn create(&self, data: &CreateListing) -> AppResult<Listing>;

    /// Replace a listing's mutable fields.
    async fn update(&self, id: Uuid, data: &UpdateListing) -> AppResult<Listing>;

    /// Delete a listing by ID. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Delete every listing owned by the given seller. Returns the number
    /// of rows removed.
    async fn delete_by_seller(&self, seller_id: Uuid) -> AppResult<u64>;
}

/// Repository for listing CRUD and search operations.
#[derive(Debug, Clone)]
pub struct ListingRepository {
    pool: PgPool,
}

/// Append the filter's predicates to a query that already ends in a
/// `WHERE` clause. Every value goes through a bind parameter; only
/// whitelisted column names ever reach the SQL text.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ListingFilter) {
    if let Some(keyword) = &filter.keyword {
        let pattern = format!("%{keyword}%");
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR city ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(property_type) = filter.property_type {
        qb.push(" AND property_type = ").push_bind(property_type);
    }
    if let Some(listing_type) = filter.listing_type {
        qb.push(" AND listing_type = ").push_bind(listing_type);
    }
    if let Some(district) = &filter.district {
        qb.push(" AND district ILIKE ")
            .push_bind(format!("%{district}%"));
    }
    if let Some(city) = &filter.city {
        qb.push(" AND city ILIKE ").push_bind(format!("%{city}%"));
    }
    if let Some(locality) = &filter.locality {
        qb.push(" AND locality ILIKE ")
            .push_bind(format!("%{locality}%"));
    }
    if let Some(posted_by) = filter.posted_by {
        qb.push(" AND posted_by = ").push_bind(posted_by);
    }
    if let Some(min_price) = filter.min_price {
        qb.push(" AND price_amount >= ").push_bind(min_price);
    }
    if let Some(max_price) = filter.max_price {
        qb.push(" AND price_amount <= ").push_bind(max_price);
    }
}

impl ListingRepository {
    /// Create a new listing repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingStore for ListingRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Listing>> {
        sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find listing by id", e)
            })
    }

    async fn find_with_seller(&self, id: Uuid) -> AppResult<Option<ListingWithSeller>> {
        sqlx::query_as::<_, ListingWithSeller>(
            "SELECT l.*, u.name AS seller_name, u.email AS seller_email, \
                    u.phone_number AS seller_phone \
             FROM listings l JOIN users u ON u.id = l.seller_id \
             WHERE l.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find listing with seller", e)
        })
    }

    async fn find_by_seller(&self, seller_id: Uuid) -> AppResult<Vec<Listing>> {
        sqlx::query_as::<_, Listing>(
            "SELECT * FROM listings WHERE seller_id = $1 ORDER BY created_at DESC",
        )
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list seller's listings", e)
        })
    }

    async fn search(
        &self,
        filter: &ListingFilter,
        sort: &ListingSort,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Listing>> {
        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM listings WHERE 1=1");
        push_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count listings", e)
            })?;

        let mut qb = QueryBuilder::new("SELECT * FROM listings WHERE 1=1");
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY ")
            .push(sort.field.column())
            .push(" ")
            .push(sort.direction.as_sql())
            .push(" LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let listings = qb
            .build_query_as::<Listing>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search listings", e)
            })?;

        Ok(PageResponse::new(listings, page, total as u64))
    }

    async fn create(&self, data: &CreateListing) -> AppResult<Listing> {
        sqlx::query_as::<_, Listing>(
            "INSERT INTO listings \
             (title, description, listing_type, price_amount, price_unit, \
              district, city, locality, google_maps_link, size_sqft, \
              property_type, features, images, seller_id, posted_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.listing_type)
        .bind(data.price_amount)
        .bind(data.price_unit)
        .bind(&data.district)
        .bind(&data.city)
        .bind(&data.locality)
        .bind(&data.google_maps_link)
        .bind(data.size_sqft)
        .bind(data.property_type)
        .bind(&data.features)
        .bind(&data.images)
        .bind(data.seller_id)
        .bind(data.posted_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create listing", e))
    }

    // Images, the seller, and the posted-by snapshot are never touched here.
    async fn update(&self, id: Uuid, data: &UpdateListing) -> AppResult<Listing> {
        sqlx::query_as::<_, Listing>(
            "UPDATE listings SET title = $2, description = $3, listing_type = $4, \
                                 price_amount = $5, price_unit = $6, district = $7, \
                                 city = $8, locality = $9, google_maps_link = $10, \
                                 size_sqft = $11, property_type = $12, features = $13, \
                                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.listing_type)
        .bind(data.price_amount)
        .bind(data.price_unit)
        .bind(&data.district)
        .bind(&data.city)
        .bind(&data.locality)
        .bind(&data.google_maps_link)
        .bind(data.size_sqft)
        .bind(data.property_type)
        .bind(&data.features)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update listing", e))?
        .ok_or_else(|| AppError::not_found(format!("Listing {id} not found")))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete listing", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_seller(&self, seller_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM listings WHERE seller_id = $1")
            .bind(seller_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete seller's listings", e)
            })?;

        Ok(result.rows_affected())
    }
}
