pub mod analyze;
pub mod dashboard;
pub mod settings;
