pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use config::{BriefingConfig, ServerConfig};

pub use config::{BotConfig, BotSettings};
pub use core::{BriefingService, MentionHandler, SignatureVerifier, TimezoneState};
pub use utils::error::{BotError, Result};
pub use web::{build_router, AppState};
