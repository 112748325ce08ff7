//! Server-sent view invalidations.
//!
//! Clients keep one stream open and refetch a view when an event naming it
//! arrives. Only events whose audience includes the caller are delivered.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/events` | Yes | SSE stream of `invalidate` events |

pub mod handlers;
pub mod routes;
