// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod proxy;
pub mod upstream;
