use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} / {:.2}", self.latitude, self.longitude)
    }
}

/// A place returned by the place search, as selected for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub common_name: String,
    pub capital: Option<String>,
    pub population: Option<u64>,
    pub region: Option<String>,
    pub flag_image_url: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl Place {
    /// A place that only carries a name; everything else unknown.
    pub fn named(common_name: impl Into<String>) -> Self {
        Self {
            common_name: common_name.into(),
            capital: None,
            population: None,
            region: None,
            flag_image_url: None,
            coordinates: None,
        }
    }
}

/// Normalized current + daily readings for one location.
///
/// `None` always means "no reading", never zero. The four `daily_*` vectors
/// have the same length and index `i` is the same day in each of them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastSnapshot {
    pub current_temperature_celsius: Option<f64>,
    pub current_wind_kmh: Option<f64>,
    pub current_precipitation_mm: Option<f64>,
    /// ISO dates (`YYYY-MM-DD`) as delivered by the forecast API.
    pub daily_labels: Vec<String>,
    pub daily_high_celsius: Vec<Option<f64>>,
    pub daily_low_celsius: Vec<Option<f64>>,
    pub daily_precipitation_mm: Vec<Option<f64>>,
}

impl ForecastSnapshot {
    pub fn days(&self) -> usize {
        self.daily_labels.len()
    }
}
