//! Heliplan CLI - loads planning scenarios and renders fuel plan reports.

pub mod config;
pub mod report;
pub mod scenario;

pub use config::Config;
pub use report::{render_text_report, JsonReport};
pub use scenario::Scenario;
