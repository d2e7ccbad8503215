use crate::domain::model::WeatherReport;
use crate::domain::ports::{NewsSource, WeatherSource};
use chrono::NaiveDate;
use std::sync::Arc;

pub const NO_WEATHER_ADVICE: &str = "Could not fetch weather data, so wear whatever you feel like!";
pub const WEATHER_UNAVAILABLE: &str = "Weather data unavailable.";
pub const NEWS_UNAVAILABLE: &str = "Could not fetch news at this time.";

/// Precipitation probability (percent) above which an umbrella is advised.
const UMBRELLA_PRECIP_THRESHOLD: f64 = 40.0;

/// Temperatures are printed with at least one decimal (`12.0`, `3.5`).
pub fn format_temperature(value: f64) -> String {
    format!("{:?}", value)
}

pub fn clothing_recommendation(weather: Option<&WeatherReport>) -> String {
    let Some(weather) = weather else {
        return NO_WEATHER_ADVICE.to_string();
    };

    let temp = weather.max_temp;
    let mut recommendation = vec![if temp < 0.0 {
        "It's freezing! Wear a heavy winter coat, scarf, gloves, and a hat."
    } else if temp < 10.0 {
        "It's cold. Wear a warm coat and maybe a scarf."
    } else if temp < 20.0 {
        "It's chilly. A jacket or a sweater should be good."
    } else if temp < 25.0 {
        "It's pleasant. A light jacket or long sleeves."
    } else {
        "It's warm! T-shirt and shorts weather."
    }];

    let precip = weather.precip_prob.unwrap_or(0.0);
    if weather.is_raining() || precip > UMBRELLA_PRECIP_THRESHOLD {
        recommendation.push("Don't forget an umbrella ☂️, it might rain.");
    } else if weather.is_snowing() {
        recommendation.push("It might snow ❄️, wear waterproof shoes.");
    }

    recommendation.join(" ")
}

pub fn weather_line(weather: Option<&WeatherReport>) -> String {
    match weather {
        Some(w) => format!(
            "🌡️ *Current:* {}°C | *High:* {}°C | *Low:* {}°C",
            w.current_temp
                .map(format_temperature)
                .unwrap_or_else(|| "n/a".to_string()),
            format_temperature(w.max_temp),
            format_temperature(w.min_temp)
        ),
        None => WEATHER_UNAVAILABLE.to_string(),
    }
}

/// Assembles the morning message from the weather and news sources. A
/// failing source degrades its section and never fails the briefing.
pub struct BriefingService {
    weather: Arc<dyn WeatherSource>,
    news: Arc<dyn NewsSource>,
    location: String,
    news_limit: usize,
}

impl BriefingService {
    pub fn new(
        weather: Arc<dyn WeatherSource>,
        news: Arc<dyn NewsSource>,
        location: impl Into<String>,
        news_limit: usize,
    ) -> Self {
        Self {
            weather,
            news,
            location: location.into(),
            news_limit,
        }
    }

    pub async fn generate(&self, today: NaiveDate) -> String {
        let (weather, news) = tokio::join!(
            self.weather.current_weather(),
            self.news.headlines(self.news_limit)
        );

        let weather = match weather {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!("Error fetching weather: {}", e);
                None
            }
        };

        let news_lines = match news {
            Ok(headlines) => headlines.iter().map(|h| h.to_slack()).collect::<Vec<_>>(),
            Err(e) => {
                tracing::warn!("Error fetching news: {}", e);
                vec![NEWS_UNAVAILABLE.to_string()]
            }
        };

        format!(
            "☀️ *Good Morning! Daily Briefing for {}*\n\n\
             *Weather in {}:*\n{}\n\n\
             *Dressing Recommendation:*\n👗 {}\n\n\
             *Major News:*\n{}",
            today.format("%A, %B %d, %Y"),
            self.location,
            weather_line(weather.as_ref()),
            clothing_recommendation(weather.as_ref()),
            news_lines.join("\n")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Headline;
    use crate::utils::error::{BotError, Result};
    use async_trait::async_trait;

    fn weather(max_temp: f64, code: u16, precip: Option<f64>) -> WeatherReport {
        WeatherReport {
            current_temp: Some(max_temp - 2.0),
            max_temp,
            min_temp: max_temp - 8.0,
            precip_prob: precip,
            weather_code: code,
        }
    }

    #[test]
    fn test_no_weather() {
        assert_eq!(clothing_recommendation(None), NO_WEATHER_ADVICE);
    }

    #[test]
    fn test_temperature_bands() {
        let cases = [
            (-5.0, "It's freezing!"),
            (0.0, "It's cold."),
            (9.9, "It's cold."),
            (10.0, "It's chilly."),
            (19.9, "It's chilly."),
            (20.0, "It's pleasant."),
            (24.9, "It's pleasant."),
            (25.0, "It's warm!"),
        ];
        for (temp, expected) in cases {
            let advice = clothing_recommendation(Some(&weather(temp, 0, Some(0.0))));
            assert!(advice.starts_with(expected), "{} -> {}", temp, advice);
        }
    }

    #[test]
    fn test_rain_code_adds_umbrella() {
        let advice = clothing_recommendation(Some(&weather(15.0, 63, Some(10.0))));
        assert_eq!(
            advice,
            "It's chilly. A jacket or a sweater should be good. Don't forget an umbrella ☂️, it might rain."
        );
    }

    #[test]
    fn test_high_precip_probability_adds_umbrella() {
        let advice = clothing_recommendation(Some(&weather(22.0, 1, Some(41.0))));
        assert!(advice.ends_with("it might rain."));

        let dry = clothing_recommendation(Some(&weather(22.0, 1, Some(40.0))));
        assert_eq!(dry, "It's pleasant. A light jacket or long sleeves.");
    }

    #[test]
    fn test_snow_only_when_not_raining() {
        let snow = clothing_recommendation(Some(&weather(-3.0, 73, Some(20.0))));
        assert!(snow.ends_with("It might snow ❄️, wear waterproof shoes."));

        let snow_and_wet = clothing_recommendation(Some(&weather(-3.0, 73, Some(90.0))));
        assert!(snow_and_wet.ends_with("it might rain."));
    }

    #[test]
    fn test_format_temperature() {
        assert_eq!(format_temperature(12.0), "12.0");
        assert_eq!(format_temperature(3.5), "3.5");
        assert_eq!(format_temperature(-0.4), "-0.4");
    }

    struct FixedWeather(Option<WeatherReport>);

    #[async_trait]
    impl WeatherSource for FixedWeather {
        async fn current_weather(&self) -> Result<WeatherReport> {
            self.0.clone().ok_or_else(|| BotError::PayloadError {
                message: "no forecast".to_string(),
            })
        }
    }

    struct FixedNews(Option<Vec<Headline>>);

    #[async_trait]
    impl NewsSource for FixedNews {
        async fn headlines(&self, limit: usize) -> Result<Vec<Headline>> {
            match &self.0 {
                Some(items) => Ok(items.iter().take(limit).cloned().collect()),
                None => Err(BotError::UpstreamStatusError {
                    url: "http://feeds.example/rss.xml".to_string(),
                    status: 502,
                }),
            }
        }
    }

    fn july_fourth() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()
    }

    #[tokio::test]
    async fn test_generate_full_briefing() {
        let report = WeatherReport {
            current_temp: Some(21.0),
            max_temp: 27.5,
            min_temp: 18.0,
            precip_prob: Some(10.0),
            weather_code: 1,
        };
        let headlines = vec![
            Headline {
                title: "First".to_string(),
                link: "https://n.example/1".to_string(),
            },
            Headline {
                title: "Second".to_string(),
                link: "https://n.example/2".to_string(),
            },
        ];
        let service = BriefingService::new(
            Arc::new(FixedWeather(Some(report))),
            Arc::new(FixedNews(Some(headlines))),
            "Evanston",
            5,
        );

        let message = service.generate(july_fourth()).await;

        assert_eq!(
            message,
            "☀️ *Good Morning! Daily Briefing for Thursday, July 04, 2024*\n\n\
             *Weather in Evanston:*\n🌡️ *Current:* 21.0°C | *High:* 27.5°C | *Low:* 18.0°C\n\n\
             *Dressing Recommendation:*\n👗 It's warm! T-shirt and shorts weather.\n\n\
             *Major News:*\n• <https://n.example/1|First>\n• <https://n.example/2|Second>"
        );
    }

    #[tokio::test]
    async fn test_generate_degrades_when_sources_fail() {
        let service = BriefingService::new(
            Arc::new(FixedWeather(None)),
            Arc::new(FixedNews(None)),
            "Evanston",
            5,
        );

        let message = service.generate(july_fourth()).await;

        assert!(message.contains("*Weather in Evanston:*\nWeather data unavailable."));
        assert!(message.contains(&format!("👗 {}", NO_WEATHER_ADVICE)));
        assert!(message.ends_with("*Major News:*\nCould not fetch news at this time."));
    }

    #[tokio::test]
    async fn test_missing_current_temperature() {
        let report = WeatherReport {
            current_temp: None,
            max_temp: 5.0,
            min_temp: -1.0,
            precip_prob: None,
            weather_code: 0,
        };
        let service = BriefingService::new(
            Arc::new(FixedWeather(Some(report))),
            Arc::new(FixedNews(Some(vec![]))),
            "Evanston",
            5,
        );

        let message = service.generate(july_fourth()).await;
        assert!(message.contains("*Current:* n/a°C | *High:* 5.0°C | *Low:* -1.0°C"));
    }
}
