// Presentation layer - HTTP routes, handlers and push channels
pub mod app_state;
pub mod error;
pub mod handlers;
pub mod push;
pub mod router;
