// Infrastructure layer - Configuration and transport adapters
pub mod config;
pub mod push_stream;
