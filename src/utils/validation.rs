use crate::utils::error::{BotError, Result};
use chrono_tz::Tz;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BotError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(BotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Resolves an IANA zone name, ignoring case ("america/chicago" is accepted).
pub fn parse_timezone(name: &str) -> Result<Tz> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BotError::UnknownTimezone {
            name: name.to_string(),
        });
    }
    Tz::from_str_insensitive(trimmed).map_err(|_| BotError::UnknownTimezone {
        name: trimmed.to_string(),
    })
}

pub fn validate_timezone(field_name: &str, name: &str) -> Result<()> {
    parse_timezone(name)
        .map(|_| ())
        .map_err(|_| BotError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Unknown IANA timezone, use a name like 'America/New_York'".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("slack_api_url", "https://slack.com/api").is_ok());
        assert!(validate_url("slack_api_url", "http://localhost:9000").is_ok());
        assert!(validate_url("slack_api_url", "").is_err());
        assert!(validate_url("slack_api_url", "invalid-url").is_err());
        assert!(validate_url("slack_api_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("worker_threads", 8, 1).is_ok());
        assert!(validate_positive_number("worker_threads", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("weather.latitude", 42.0451, -90.0, 90.0).is_ok());
        assert!(validate_range("weather.latitude", 91.0, -90.0, 90.0).is_err());
        assert!(validate_range("news.limit", 0usize, 1, 50).is_err());
    }

    #[test]
    fn test_parse_timezone_is_case_insensitive() {
        assert_eq!(parse_timezone("America/Chicago").unwrap(), chrono_tz::America::Chicago);
        assert_eq!(parse_timezone("america/new_york").unwrap(), chrono_tz::America::New_York);
        assert_eq!(parse_timezone("  europe/paris ").unwrap(), chrono_tz::Europe::Paris);
        assert!(parse_timezone("mars/olympus").is_err());
        assert!(parse_timezone("").is_err());
    }

    #[test]
    fn test_validate_timezone() {
        assert!(validate_timezone("timezone", "UTC").is_ok());
        assert!(validate_timezone("timezone", "Nowhere/Else").is_err());
    }
}
