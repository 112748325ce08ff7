pub mod events_handler;
