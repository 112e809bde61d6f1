pub mod config;
pub mod error;
pub mod types;

pub use config::{SiteConfig, load_site_config};
pub use error::{Error, Result};
pub use types::*;
