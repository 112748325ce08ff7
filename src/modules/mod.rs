//! Modules layer - Infrastructure components shared across features
//!
//! Contains in-process plumbing such as the view invalidation broadcaster.

pub mod invalidation;
