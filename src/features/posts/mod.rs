//! Profile posts and the followers feed.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/posts` | Yes | Publish a post |
//! | GET | `/api/posts/user/{user_id}` | No | Latest posts by one author |
//! | GET | `/api/feed` | Optional | Latest posts by followed users |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgPostRepository, PostRepository};
pub use services::PostService;
