mod message_service;
mod send_validator;
mod thread_aggregator;

pub use message_service::MessageService;
pub use send_validator::validate_message_body;
pub use thread_aggregator::aggregate_threads;
