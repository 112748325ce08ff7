pub mod auth;
pub mod events;
pub mod follows;
pub mod marketplace;
pub mod messages;
pub mod posts;
pub mod profiles;
pub mod projects;
