pub mod post_handler;
