use crate::config::toml_config::NewsSection;
use crate::domain::model::Headline;
use crate::domain::ports::NewsSource;
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use std::time::Duration;

pub struct RssFeedClient {
    client: Client,
    feed_url: String,
    timeout: Duration,
}

impl RssFeedClient {
    pub fn new(feed_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            feed_url: feed_url.into(),
            timeout,
        }
    }

    pub fn from_settings(news: &NewsSection) -> Self {
        Self::new(news.feed_url.clone(), Duration::from_secs(news.timeout_seconds))
    }
}

#[async_trait]
impl NewsSource for RssFeedClient {
    async fn headlines(&self, limit: usize) -> Result<Vec<Headline>> {
        tracing::debug!("Fetching feed {}", self.feed_url);

        let response = self
            .client
            .get(&self.feed_url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::UpstreamStatusError {
                url: self.feed_url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_headlines(&body, limit)
    }
}

#[derive(Default)]
struct ItemBuilder {
    title: String,
    link: String,
}

/// Element path relative to the document root: `channel/item/<field>`.
fn item_field(path: &[String]) -> Option<&str> {
    match path {
        [_, channel, item, field] if channel == "channel" && item == "item" => Some(field.as_str()),
        _ => None,
    }
}

fn is_item(path: &[String]) -> bool {
    matches!(path, [_, channel, item] if channel == "channel" && item == "item")
}

/// Pulls `title`/`link` pairs out of an RSS 2.0 document in document order.
/// Items missing either field are skipped.
pub fn parse_headlines(xml: &str, limit: usize) -> Result<Vec<Headline>> {
    let mut headlines = Vec::new();
    if limit == 0 {
        return Ok(headlines);
    }

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut current: Option<ItemBuilder> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                if is_item(&path) {
                    current = Some(ItemBuilder::default());
                }
            }
            Event::End(_) => {
                if is_item(&path) {
                    if let Some(item) = current.take() {
                        let title = item.title.trim();
                        let link = item.link.trim();
                        if title.is_empty() || link.is_empty() {
                            tracing::debug!("Skipping feed item without title or link");
                        } else {
                            headlines.push(Headline {
                                title: title.to_string(),
                                link: link.to_string(),
                            });
                            if headlines.len() >= limit {
                                break;
                            }
                        }
                    }
                }
                path.pop();
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                append_field(&path, current.as_mut(), &text);
            }
            Event::CData(e) => {
                let raw = e.into_inner();
                append_field(&path, current.as_mut(), &String::from_utf8_lossy(&raw));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(headlines)
}

fn append_field(path: &[String], item: Option<&mut ItemBuilder>, text: &str) {
    let Some(item) = item else {
        return;
    };
    match item_field(path) {
        Some("title") => item.title.push_str(text),
        Some("link") => item.link.push_str(text),
        _ => {}
    }
}
