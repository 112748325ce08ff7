//! Film-industry profiles.
//!
//! Profiles are keyed by the auth provider's user id and carry the display
//! data (name, handle) every other feature resolves authors and
//! counterparts through.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/profiles` | No | Search profiles |
//! | GET | `/api/profiles/me` | Optional | Current user and profile |
//! | PUT | `/api/profiles/me` | Yes | Update own profile |
//! | PUT | `/api/profiles/me/top-films` | Yes | Replace top films |
//! | GET | `/api/profiles/handle-availability` | Yes | Check a handle |
//! | GET | `/api/profiles/id/{user_id}` | No | Public profile by id |
//! | GET | `/api/profiles/{handle}` | No | Public profile by handle |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgProfileRepository, ProfileRepository};
pub use services::ProfileService;
