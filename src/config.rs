use crate::domain::entities::{parse_threshold, MILLIS_PER_DAY, MILLIS_PER_HOUR};
use crate::domain::errors::ValidationError;
use crate::domain::services::business_hours_validator;
use chrono::Datelike;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub default_calendar_name: String,
    /// Milliseconds from midnight.
    pub default_business_start: u64,
    pub default_business_end: u64,
    pub holiday_years: Vec<i32>,
    pub default_threshold_ms: u64,
    pub service_name: String,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_calendar_name: "Default".to_string(),
            default_business_start: 8 * MILLIS_PER_HOUR,
            default_business_end: 18 * MILLIS_PER_HOUR,
            holiday_years: vec![chrono::Utc::now().year()],
            default_threshold_ms: 0,
            service_name: "sla-engine".to_string(),
            log_filter: "sla_engine=info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup, falling back to
    /// [`Config::default`] for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let default_calendar_name = lookup("SLA_DEFAULT_CALENDAR_NAME")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.default_calendar_name);

        let default_business_start = match lookup("SLA_DEFAULT_BUSINESS_START") {
            Some(value) => parse_time_of_day(&value)?,
            None => defaults.default_business_start,
        };

        let default_business_end = match lookup("SLA_DEFAULT_BUSINESS_END") {
            Some(value) => parse_time_of_day(&value)?,
            None => defaults.default_business_end,
        };

        business_hours_validator::validate_bounds(default_business_start, default_business_end)
            .map_err(ConfigError::InvalidBusinessHours)?;

        let holiday_years = match lookup("SLA_HOLIDAY_YEARS") {
            Some(value) => parse_years(&value)?,
            None => defaults.holiday_years,
        };

        let default_threshold_ms = match lookup("SLA_DEFAULT_THRESHOLD") {
            Some(value) => parse_threshold(&value).map_err(ConfigError::InvalidThreshold)?,
            None => defaults.default_threshold_ms,
        };

        let service_name = lookup("SERVICE_NAME").unwrap_or(defaults.service_name);

        let log_filter = lookup("LOG_FILTER").unwrap_or(defaults.log_filter);

        Ok(Config {
            default_calendar_name,
            default_business_start,
            default_business_end,
            holiday_years,
            default_threshold_ms,
            service_name,
            log_filter,
        })
    }
}

/// Parse "HH:MM" into milliseconds from midnight. "24:00" is midnight at the
/// end of the day.
fn parse_time_of_day(value: &str) -> Result<u64, ConfigError> {
    let invalid = || ConfigError::InvalidTimeOfDay(value.to_string());
    let (hours, minutes) = value.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u64 = hours.parse().map_err(|_| invalid())?;
    let minutes: u64 = minutes.parse().map_err(|_| invalid())?;
    if hours > 24 || minutes >= 60 {
        return Err(invalid());
    }
    let millis = hours * MILLIS_PER_HOUR + minutes * 60 * 1000;
    if millis > MILLIS_PER_DAY {
        return Err(invalid());
    }
    Ok(millis)
}

fn parse_years(value: &str) -> Result<Vec<i32>, ConfigError> {
    let mut years = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>()
                .map_err(|_| ConfigError::InvalidHolidayYears(value.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    years.sort_unstable();
    years.dedup();
    Ok(years)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid time of day (expected HH:MM): {0}")]
    InvalidTimeOfDay(String),

    #[error("Invalid default business hours: {0}")]
    InvalidBusinessHours(ValidationError),

    #[error("Invalid SLA_HOLIDAY_YEARS: {0}")]
    InvalidHolidayYears(String),

    #[error("Invalid SLA_DEFAULT_THRESHOLD: {0}")]
    InvalidThreshold(ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.default_calendar_name, "Default");
        assert_eq!(config.default_business_start, 8 * MILLIS_PER_HOUR);
        assert_eq!(config.default_business_end, 18 * MILLIS_PER_HOUR);
        assert_eq!(config.default_threshold_ms, 0);
        assert_eq!(config.holiday_years.len(), 1);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SLA_DEFAULT_CALENDAR_NAME", "France"),
            ("SLA_DEFAULT_BUSINESS_START", "09:30"),
            ("SLA_DEFAULT_BUSINESS_END", "24:00"),
            ("SLA_HOLIDAY_YEARS", "2027, 2026,2027"),
            ("SLA_DEFAULT_THRESHOLD", "10h"),
        ]))
        .unwrap();
        assert_eq!(config.default_calendar_name, "France");
        assert_eq!(config.default_business_start, 9 * MILLIS_PER_HOUR + 30 * 60 * 1000);
        assert_eq!(config.default_business_end, MILLIS_PER_DAY);
        assert_eq!(config.holiday_years, vec![2026, 2027]);
        assert_eq!(config.default_threshold_ms, 36_000_000);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("SLA_DEFAULT_BUSINESS_START", "8h")])),
            Err(ConfigError::InvalidTimeOfDay(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("SLA_DEFAULT_BUSINESS_START", "10000000000000:00")])),
            Err(ConfigError::InvalidTimeOfDay(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("SLA_DEFAULT_BUSINESS_END", "24:30")])),
            Err(ConfigError::InvalidTimeOfDay(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("SLA_DEFAULT_BUSINESS_START", "19:00")])),
            Err(ConfigError::InvalidBusinessHours(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("SLA_HOLIDAY_YEARS", "next")])),
            Err(ConfigError::InvalidHolidayYears(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("SLA_DEFAULT_THRESHOLD", "soon")])),
            Err(ConfigError::InvalidThreshold(_))
        ));
    }
}
