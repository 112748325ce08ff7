pub mod follow_dto;

pub use follow_dto::{FollowCountsDto, FollowResultDto, FollowStatusDto};
