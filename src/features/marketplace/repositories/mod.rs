mod listing_repository;

pub use listing_repository::{ListingRepository, PgListingRepository};
