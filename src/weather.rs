// SPDX-License-Identifier: MPL-2.0
//! Weather forecast records and their generation.

use crate::config::{FORECAST_DAYS, MAX_TEMPERATURE_C, MIN_TEMPERATURE_C};
use crate::i18n::{ResourceLocalizer, ResourceScope};
use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

/// Resource scope holding the weather summaries.
pub const WEATHER_SCOPE: &str = "weather";

/// Summary keys, coldest first.
pub const SUMMARY_KEYS: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

pub fn weather_scope() -> ResourceScope {
    ResourceScope::local(WEATHER_SCOPE)
}

/// One day of the forecast, as served by `GET /weatherforecast`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    pub date: NaiveDate,
    pub temperature_c: i32,
    pub temperature_f: i32,
    pub summary: Option<String>,
}

impl WeatherForecast {
    pub fn new(date: NaiveDate, temperature_c: i32, summary: Option<String>) -> Self {
        Self {
            date,
            temperature_c,
            temperature_f: to_fahrenheit(temperature_c),
            summary,
        }
    }
}

/// Approximate Celsius to Fahrenheit conversion, truncated toward zero.
pub fn to_fahrenheit(temperature_c: i32) -> i32 {
    32 + (f64::from(temperature_c) / 0.5556) as i32
}

/// Builds the forecast for the days following `today`, with summaries
/// localized to `locale`.
pub fn generate<R: Rng>(
    localizer: &ResourceLocalizer,
    locale: &LanguageIdentifier,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<WeatherForecast> {
    let summaries: Vec<String> = SUMMARY_KEYS
        .iter()
        .map(|key| localizer.localize(key, locale))
        .collect();

    (1..=FORECAST_DAYS)
        .map(|offset| {
            let date = today + Days::new(offset);
            let temperature_c = rng.random_range(MIN_TEMPERATURE_C..MAX_TEMPERATURE_C);
            let summary = summaries[rng.random_range(0..summaries.len())].clone();
            WeatherForecast::new(date, temperature_c, Some(summary))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocalizationConfig;
    use crate::i18n::ResourceCatalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn localizer() -> ResourceLocalizer {
        let catalog = ResourceCatalog::embedded(&LocalizationConfig::default())
            .expect("embedded resources should load");
        ResourceLocalizer::new(Arc::new(catalog), weather_scope())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
    }

    #[test]
    fn fahrenheit_truncates_toward_zero() {
        assert_eq!(to_fahrenheit(0), 32);
        assert_eq!(to_fahrenheit(100), 211);
        assert_eq!(to_fahrenheit(-20), -3);
        assert_eq!(to_fahrenheit(-1), 31);
    }

    #[test]
    fn generate_returns_five_consecutive_days() {
        let mut rng = StdRng::seed_from_u64(7);
        let forecasts = generate(&localizer(), &"en-US".parse().unwrap(), today(), &mut rng);

        assert_eq!(forecasts.len(), 5);
        for (offset, forecast) in forecasts.iter().enumerate() {
            assert_eq!(forecast.date, today() + Days::new(offset as u64 + 1));
            assert!((MIN_TEMPERATURE_C..MAX_TEMPERATURE_C).contains(&forecast.temperature_c));
            assert_eq!(forecast.temperature_f, to_fahrenheit(forecast.temperature_c));
        }
    }

    #[test]
    fn generate_localizes_summaries() {
        let mut rng = StdRng::seed_from_u64(11);
        let forecasts = generate(&localizer(), &"hu".parse().unwrap(), today(), &mut rng);

        for forecast in forecasts {
            let summary = forecast.summary.expect("summary should be set");
            assert!(!SUMMARY_KEYS.contains(&summary.as_str()), "{summary} is English");
        }
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let forecast = WeatherForecast::new(today(), 10, Some("Mild".to_string()));
        let json = serde_json::to_value(&forecast).expect("serialize");

        assert_eq!(json["date"], "2026-10-19");
        assert_eq!(json["temperatureC"], 10);
        assert_eq!(json["temperatureF"], 49);
        assert_eq!(json["summary"], "Mild");
    }
}
