pub mod briefing;
pub mod mention;
pub mod signature;
pub mod timezone;

pub use crate::domain::model::{Headline, SlackEvent, WeatherReport};
pub use crate::domain::ports::{ChatClient, ConfigProvider, NewsSource, WeatherSource};
pub use crate::utils::error::Result;
pub use briefing::BriefingService;
pub use mention::MentionHandler;
pub use signature::SignatureVerifier;
pub use timezone::TimezoneState;
