pub mod analyze;
pub mod sweep;
