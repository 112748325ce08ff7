//! Direct messages between profiles.
//!
//! Messages are immutable and only ever inserted. The inbox is not stored:
//! every read regroups the caller's messages into one thread per
//! counterpart (see [`services::aggregate_threads`]).
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/messages/threads` | Optional | Thread summaries, most recent first |
//! | GET | `/api/messages/threads/{user_id}` | Yes | Counterpart and full history |
//! | POST | `/api/messages` | Yes | Send a message |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::{MessageRepository, PgMessageRepository};
pub use services::MessageService;
