mod listing;

pub use listing::{Listing, ListingCategory, NewListing};
