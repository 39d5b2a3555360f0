// Application layer - Use cases over the telemetry source
pub mod dashboard_service;
pub mod data_access;
pub mod poller;
pub mod store;
pub mod telemetry_source;
