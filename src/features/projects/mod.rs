//! Project postings: productions advertising crew openings.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/projects` | No | Newest postings, with optional filters |
//! | POST | `/api/projects` | Yes | Post a project |
//! | GET | `/api/projects/{id}` | No | One posting |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{PgProjectRepository, ProjectRepository};
pub use services::ProjectService;
