mod post_repository;

pub use post_repository::{PgPostRepository, PostRepository};
