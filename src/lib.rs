pub mod catalog;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod observability;
pub mod store;

pub use config::Config;
pub use error::AppError;
