pub mod follow_handler;
