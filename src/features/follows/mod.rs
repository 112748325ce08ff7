//! Follow relationships between profiles.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/follows/{user_id}` | Yes | Follow a user |
//! | DELETE | `/api/follows/{user_id}` | Yes | Unfollow a user |
//! | GET | `/api/follows/{user_id}` | Optional | Whether the caller follows the user |
//! | GET | `/api/follows/{user_id}/counts` | No | Followers / following totals |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{FollowRepository, PgFollowRepository};
pub use services::FollowService;
