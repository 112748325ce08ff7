mod follow;

pub use follow::{Follow, FollowCounts};
