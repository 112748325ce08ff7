pub mod listing_handler;
