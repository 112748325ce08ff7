use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{swallow_backend_error, AppError, Result};
use crate::features::auth::session::Session;
use crate::features::marketplace::dtos::{CreateListingDto, ListingResponseDto};
use crate::features::marketplace::models::{ListingCategory, NewListing};
use crate::features::marketplace::repositories::ListingRepository;
use crate::modules::invalidation::ViewInvalidator;
use crate::shared::constants::{LISTING_LIMIT, MARKETPLACE_VIEW};

/// Service for gear, location and service listings
pub struct ListingService {
    listings: Arc<dyn ListingRepository>,
    invalidator: Arc<ViewInvalidator>,
}

impl ListingService {
    pub fn new(listings: Arc<dyn ListingRepository>, invalidator: Arc<ViewInvalidator>) -> Self {
        Self {
            listings,
            invalidator,
        }
    }

    /// Newest listings, optionally in one category. Backend failures give an
    /// empty list.
    pub async fn list_listings(
        &self,
        category: Option<ListingCategory>,
    ) -> Result<Vec<ListingResponseDto>> {
        let listings = swallow_backend_error(
            self.listings.list(category, LISTING_LIMIT).await,
            "Failed to load marketplace listings",
        )?;

        Ok(listings.into_iter().map(Into::into).collect())
    }

    pub async fn get_listing(&self, id: Uuid) -> Result<ListingResponseDto> {
        swallow_backend_error(
            self.listings.find_by_id(id).await,
            "Failed to load marketplace listing",
        )?
        .map(Into::into)
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))
    }

    pub async fn create_listing(
        &self,
        session: &Session,
        dto: CreateListingDto,
    ) -> Result<ListingResponseDto> {
        let user = session.require_user()?;
        let listing = sanitize_new_listing(dto)?;

        let listing = self.listings.insert(user.user_id, &listing).await?;
        tracing::info!(
            "Listing {} ({}) created by {}",
            listing.id,
            listing.category,
            user.user_id
        );

        self.invalidator.invalidate_all(MARKETPLACE_VIEW);

        Ok(listing.into())
    }
}

fn sanitize_new_listing(dto: CreateListingDto) -> Result<NewListing> {
    if dto.title.trim().is_empty() {
        return Err(AppError::Validation("Listing title is required".to_string()));
    }
    if dto.description.trim().is_empty() {
        return Err(AppError::Validation(
            "Listing description is required".to_string(),
        ));
    }
    if dto.rate.trim().is_empty() {
        return Err(AppError::Validation("Rate is required".to_string()));
    }
    if dto.location.trim().is_empty() {
        return Err(AppError::Validation("Location is required".to_string()));
    }
    let Some(category) = dto.category else {
        return Err(AppError::Validation("Category is required".to_string()));
    };

    let photos = dto
        .photos
        .unwrap_or_default()
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    Ok(NewListing {
        category,
        title: dto.title.trim().to_string(),
        description: dto.description.trim().to_string(),
        rate: dto.rate.trim().to_string(),
        location: dto.location.trim().to_string(),
        photos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::AuthenticatedUser;
    use crate::shared::test_helpers::{seed_profile, InMemoryStore};
    use chrono::{Duration, Utc};

    fn dto(category: Option<ListingCategory>, title: &str, rate: &str) -> CreateListingDto {
        CreateListingDto {
            category,
            title: title.to_string(),
            description: "Well kept, pickup only".to_string(),
            rate: rate.to_string(),
            location: "Atlanta, GA".to_string(),
            photos: None,
        }
    }

    fn service(store: &Arc<InMemoryStore>) -> ListingService {
        ListingService::new(store.clone(), Arc::new(ViewInvalidator::default()))
    }

    #[test]
    fn test_sanitize_rejects_missing_fields_in_order() {
        let err = sanitize_new_listing(dto(None, " ", "")).unwrap_err();
        assert_eq!(err.user_message(), "Listing title is required");

        let err = sanitize_new_listing(dto(None, "ARRI SkyPanel", "")).unwrap_err();
        assert_eq!(err.user_message(), "Rate is required");

        let err = sanitize_new_listing(dto(None, "ARRI SkyPanel", "$120/day")).unwrap_err();
        assert_eq!(err.user_message(), "Category is required");
    }

    #[test]
    fn test_sanitize_trims_and_drops_blank_photos() {
        let mut input = dto(Some(ListingCategory::Gear), " ARRI SkyPanel ", " $120/day ");
        input.photos = Some(vec![
            " https://cdn.example.com/a.jpg ".to_string(),
            "".to_string(),
        ]);

        let listing = sanitize_new_listing(input).unwrap();
        assert_eq!(listing.title, "ARRI SkyPanel");
        assert_eq!(listing.rate, "$120/day");
        assert_eq!(listing.photos, vec!["https://cdn.example.com/a.jpg".to_string()]);

        let listing =
            sanitize_new_listing(dto(Some(ListingCategory::Gear), "Dolly", "$80")).unwrap();
        assert!(listing.photos.is_empty());
    }

    #[tokio::test]
    async fn test_create_listing_invalidates_marketplace() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        let invalidator = Arc::new(ViewInvalidator::default());
        let mut rx = invalidator.subscribe();
        let service = ListingService::new(store.clone(), invalidator.clone());

        let listing = service
            .create_listing(
                &Session::from(AuthenticatedUser::new(me)),
                dto(Some(ListingCategory::Location), "Warehouse loft", "$900/day"),
            )
            .await
            .unwrap();
        assert_eq!(listing.category, ListingCategory::Location);
        assert_eq!(listing.created_by, me);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.path, MARKETPLACE_VIEW);
        assert!(event.everyone);
    }

    #[tokio::test]
    async fn test_create_listing_requires_session() {
        let store = Arc::new(InMemoryStore::default());
        let err = service(&store)
            .create_listing(
                &Session::anonymous(),
                dto(Some(ListingCategory::Gear), "Dolly", "$80"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_list_listings_by_category_newest_first() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        let now = Utc::now();
        store.push_listing(me, ListingCategory::Gear, "Old dolly", now - Duration::hours(1));
        store.push_listing(me, ListingCategory::Gear, "New slider", now);
        store.push_listing(me, ListingCategory::Service, "Colorist", now);
        let service = service(&store);

        let gear = service.list_listings(Some(ListingCategory::Gear)).await.unwrap();
        let titles: Vec<&str> = gear.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["New slider", "Old dolly"]);

        let all = service.list_listings(None).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_reads_degrade_when_backend_unavailable() {
        let store = Arc::new(InMemoryStore::default());
        let me = seed_profile(&store, "Ana Ruiz", "ana_r");
        let listing = store.push_listing(me, ListingCategory::Gear, "Dolly", Utc::now());
        store.set_unavailable(true);
        let service = service(&store);

        assert!(service.list_listings(None).await.unwrap().is_empty());

        let err = service.get_listing(listing.id).await.unwrap_err();
        assert_eq!(err.user_message(), "Listing not found");
    }
}
