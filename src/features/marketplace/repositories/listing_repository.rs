use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::marketplace::models::{Listing, ListingCategory, NewListing};

const LISTING_COLUMNS: &str =
    "id, category, title, description, rate, location, photos, created_by, created_at, updated_at";

/// Storage access for marketplace listings
#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn insert(&self, created_by: Uuid, listing: &NewListing) -> Result<Listing>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>>;

    /// Newest first; `None` lists every category
    async fn list(&self, category: Option<ListingCategory>, limit: i64) -> Result<Vec<Listing>>;
}

/// Postgres-backed listing repository
pub struct PgListingRepository {
    pool: PgPool,
}

impl PgListingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    async fn insert(&self, created_by: Uuid, listing: &NewListing) -> Result<Listing> {
        let sql = format!(
            r#"
            INSERT INTO marketplace_listings
                (id, category, title, description, rate, location, photos, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            LISTING_COLUMNS
        );

        sqlx::query_as::<_, Listing>(&sql)
            .bind(Uuid::now_v7())
            .bind(listing.category)
            .bind(&listing.title)
            .bind(&listing.description)
            .bind(&listing.rate)
            .bind(&listing.location)
            .bind(&listing.photos)
            .bind(created_by)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create marketplace listing: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>> {
        let sql = format!(
            "SELECT {} FROM marketplace_listings WHERE id = $1",
            LISTING_COLUMNS
        );
        sqlx::query_as::<_, Listing>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get marketplace listing {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn list(&self, category: Option<ListingCategory>, limit: i64) -> Result<Vec<Listing>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM marketplace_listings
            WHERE ($1::listing_category IS NULL OR category = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
            LISTING_COLUMNS
        );

        sqlx::query_as::<_, Listing>(&sql)
            .bind(category)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list marketplace listings: {:?}", e);
                AppError::Database(e)
            })
    }
}
