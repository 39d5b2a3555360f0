// Domain layer - Core data model, no I/O
pub mod diagnostics;
pub mod history;
pub mod position;
pub mod sensors;
pub mod trips;
