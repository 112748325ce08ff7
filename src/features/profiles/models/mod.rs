mod profile;

pub use profile::{Profile, ProfileSummary, ProfileUpdate, TopFilm};
