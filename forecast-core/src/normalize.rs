//! Turns a raw forecast payload into a [`ForecastSnapshot`].
//!
//! Every field lookup degrades to an absent reading. The only hard failure is
//! a payload without daily dates, since there is nothing to chart.

use serde_json::Value;

use crate::{error::ForecastError, model::ForecastSnapshot};

pub fn normalize(raw: &Value) -> Result<ForecastSnapshot, ForecastError> {
    let daily = raw.get("daily");

    let labels: Vec<String> = daily
        .and_then(|d| d.get("time"))
        .and_then(Value::as_array)
        .map(|times| times.iter().map(label_text).collect())
        .unwrap_or_default();

    if labels.is_empty() {
        return Err(ForecastError::MalformedPayload(
            "daily time series is missing or empty".to_string(),
        ));
    }

    let days = labels.len();
    let current = Current::read(raw);

    Ok(ForecastSnapshot {
        current_temperature_celsius: current.temperature,
        current_wind_kmh: current.wind,
        current_precipitation_mm: current
            .time
            .and_then(|time| hourly_precipitation_at(raw, time)),
        daily_labels: labels,
        daily_high_celsius: series(daily, "temperature_2m_max", days),
        daily_low_celsius: series(daily, "temperature_2m_min", days),
        daily_precipitation_mm: series(daily, "precipitation_sum", days),
    })
}

struct Current<'a> {
    temperature: Option<f64>,
    wind: Option<f64>,
    time: Option<&'a str>,
}

impl<'a> Current<'a> {
    /// Reads `current_weather` (legacy shape) or `current` (variables shape).
    fn read(raw: &'a Value) -> Self {
        if let Some(block) = raw.get("current_weather") {
            return Self {
                temperature: number(block, "temperature"),
                wind: number(block, "windspeed"),
                time: block.get("time").and_then(Value::as_str),
            };
        }

        match raw.get("current") {
            Some(block) => Self {
                temperature: number(block, "temperature_2m").or_else(|| number(block, "temperature")),
                wind: number(block, "wind_speed_10m").or_else(|| number(block, "windspeed")),
                time: block.get("time").and_then(Value::as_str),
            },
            None => Self { temperature: None, wind: None, time: None },
        }
    }
}

fn number(block: &Value, key: &str) -> Option<f64> {
    block.get(key).and_then(Value::as_f64)
}

fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn hourly_precipitation_at(raw: &Value, time: &str) -> Option<f64> {
    let hourly = raw.get("hourly")?;
    let idx = hourly
        .get("time")?
        .as_array()?
        .iter()
        .position(|t| t.as_str() == Some(time))?;

    hourly.get("precipitation")?.as_array()?.get(idx)?.as_f64()
}

/// Daily series aligned to `days`: padded with absent readings or truncated.
fn series(daily: Option<&Value>, key: &str, days: usize) -> Vec<Option<f64>> {
    let source = daily
        .and_then(|d| d.get(key))
        .and_then(Value::as_array);

    match source {
        Some(values) => (0..days)
            .map(|i| values.get(i).and_then(Value::as_f64))
            .collect(),
        None => {
            tracing::debug!("Forecast payload has no daily '{key}' series");
            vec![None; days]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_payload() -> Value {
        json!({
            "current_weather": { "temperature": 21.4, "windspeed": 11.0, "time": "2024-05-01T12:00" },
            "hourly": {
                "time": ["2024-05-01T11:00", "2024-05-01T12:00", "2024-05-01T13:00"],
                "precipitation": [0.0, 0.4, 1.2]
            },
            "daily": {
                "time": ["2024-05-01", "2024-05-02", "2024-05-03"],
                "temperature_2m_max": [22.0, 24.5, 19.0],
                "temperature_2m_min": [12.0, 13.5, 11.0],
                "precipitation_sum": [0.4, 0.0, 6.2]
            }
        })
    }

    #[test]
    fn reads_current_and_daily_blocks() {
        let snap = normalize(&full_payload()).expect("payload is complete");

        assert_eq!(snap.current_temperature_celsius, Some(21.4));
        assert_eq!(snap.current_wind_kmh, Some(11.0));
        assert_eq!(snap.current_precipitation_mm, Some(0.4));
        assert_eq!(snap.days(), 3);
        assert_eq!(snap.daily_high_celsius, vec![Some(22.0), Some(24.5), Some(19.0)]);
        assert_eq!(snap.daily_precipitation_mm[1], Some(0.0));
    }

    #[test]
    fn missing_current_block_yields_absent_readings() {
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove("current_weather");

        let snap = normalize(&payload).expect("daily data is still present");

        assert_eq!(snap.current_temperature_celsius, None);
        assert_eq!(snap.current_wind_kmh, None);
        assert_eq!(snap.current_precipitation_mm, None);
        assert_eq!(snap.days(), 3);
    }

    #[test]
    fn unmatched_timestamp_means_no_precipitation_now() {
        let mut payload = full_payload();
        payload["current_weather"]["time"] = json!("2024-05-01T23:00");

        let snap = normalize(&payload).unwrap();
        assert_eq!(snap.current_precipitation_mm, None);
        assert_eq!(snap.current_temperature_celsius, Some(21.4));
    }

    #[test]
    fn empty_daily_time_is_malformed() {
        let payload = json!({ "daily": { "time": [], "temperature_2m_max": [] } });
        let err = normalize(&payload).unwrap_err();
        assert!(matches!(err, ForecastError::MalformedPayload(_)));
    }

    #[test]
    fn missing_daily_block_is_malformed() {
        let err = normalize(&json!({ "current_weather": { "temperature": 3.0 } })).unwrap_err();
        assert!(matches!(err, ForecastError::MalformedPayload(_)));
    }

    #[test]
    fn missing_series_become_absent_of_same_length() {
        let payload = json!({
            "daily": {
                "time": ["2024-05-01", "2024-05-02"],
                "temperature_2m_max": [10.0, null]
            }
        });

        let snap = normalize(&payload).unwrap();
        assert_eq!(snap.daily_high_celsius, vec![Some(10.0), None]);
        assert_eq!(snap.daily_low_celsius, vec![None, None]);
        assert_eq!(snap.daily_precipitation_mm, vec![None, None]);
    }

    #[test]
    fn mismatched_series_lengths_are_aligned_to_labels() {
        let payload = json!({
            "daily": {
                "time": ["a", "b", "c"],
                "temperature_2m_max": [1.0],
                "temperature_2m_min": [0.0, 0.5, 1.0, 1.5, 2.0],
                "precipitation_sum": "not a list"
            }
        });

        let snap = normalize(&payload).unwrap();
        assert_eq!(snap.daily_high_celsius, vec![Some(1.0), None, None]);
        assert_eq!(snap.daily_low_celsius.len(), 3);
        assert_eq!(snap.daily_precipitation_mm, vec![None, None, None]);
    }

    #[test]
    fn reads_variables_shaped_current_block() {
        let payload = json!({
            "current": { "temperature_2m": -3.5, "wind_speed_10m": 20.0, "time": "t1" },
            "hourly": { "time": ["t0", "t1"], "precipitation": [0.0, null] },
            "daily": { "time": ["2024-01-01"] }
        });

        let snap = normalize(&payload).unwrap();
        assert_eq!(snap.current_temperature_celsius, Some(-3.5));
        assert_eq!(snap.current_wind_kmh, Some(20.0));
        // null reading is absent, not zero
        assert_eq!(snap.current_precipitation_mm, None);
    }
}
