pub mod generator;

pub use generator::{day_report, list_report, status_report};
