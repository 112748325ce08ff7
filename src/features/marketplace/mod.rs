//! Marketplace of gear, locations and services offered by crew members.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/marketplace?category=` | No | Newest listings; `all` or no category lists everything |
//! | POST | `/api/marketplace` | Yes | Create a listing |
//! | GET | `/api/marketplace/{id}` | No | One listing |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{ListingRepository, PgListingRepository};
pub use services::ListingService;
