mod profile_repository;

pub use profile_repository::{PgProfileRepository, ProfileFilter, ProfileRepository};
