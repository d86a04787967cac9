pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use errors::{SparrowError, SparrowResult, UserNotice, ValidationError};
pub use state::DriverSession;
