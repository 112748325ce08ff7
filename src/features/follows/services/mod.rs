mod follow_service;

pub use follow_service::FollowService;
