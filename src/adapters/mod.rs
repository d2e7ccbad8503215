// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod open_meteo;
pub mod rss;
pub mod slack;

pub use open_meteo::OpenMeteoClient;
pub use rss::RssFeedClient;
pub use slack::SlackWebClient;
