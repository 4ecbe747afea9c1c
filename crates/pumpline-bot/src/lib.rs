//! Application wiring for the pumpline binary.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;

pub use app::{launch_token, run_pipeline, Application};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use logging::init_logging;
