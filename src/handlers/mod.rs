mod generate;
mod health;
mod metrics;
mod ui;

pub use generate::generate_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use ui::{home_handler, ui_handler};
