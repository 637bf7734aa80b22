//! Display state owned by the orchestrator, plus the text derived from it.

use crate::{
    chart::DrawCommand,
    model::{Coordinates, ForecastSnapshot, Place},
    units::{TemperatureUnit, to_display_unit},
};

/// Placeholder shown for any value we don't have.
pub const ABSENT: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    ResolvingPlace,
    FetchingWeather,
    Ready,
    Failed,
}

/// Per-area status marker (place panel vs weather panel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Blank,
    Loading,
    Locating,
    Ok,
    Error,
    NoCoordinates,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Blank => ABSENT,
            Status::Loading => "Loading…",
            Status::Locating => "locating…",
            Status::Ok => "✓",
            Status::Error => "Error",
            Status::NoCoordinates => "No coordinates",
        }
    }
}

/// Current readings converted to the display unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CurrentConditions {
    pub unit: TemperatureUnit,
    pub temperature: Option<f64>,
    pub wind_kmh: Option<f64>,
    pub precipitation_mm: Option<f64>,
}

impl CurrentConditions {
    pub fn from_snapshot(snapshot: &ForecastSnapshot, unit: TemperatureUnit) -> Self {
        Self {
            unit,
            temperature: snapshot
                .current_temperature_celsius
                .map(|c| to_display_unit(c, unit)),
            wind_kmh: snapshot.current_wind_kmh,
            precipitation_mm: snapshot.current_precipitation_mm,
        }
    }

    pub fn temperature_text(&self) -> String {
        self.temperature
            .map(|t| format!("{t:.1} {}", self.unit.symbol()))
            .unwrap_or_else(|| ABSENT.to_string())
    }

    pub fn wind_text(&self) -> String {
        self.wind_kmh
            .map(|w| format!("{w:.0} km/h"))
            .unwrap_or_else(|| ABSENT.to_string())
    }

    pub fn precipitation_text(&self) -> String {
        self.precipitation_mm
            .map(|p| format!("{p:.1} mm"))
            .unwrap_or_else(|| ABSENT.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    pub selected_place: Option<Place>,
    pub active_coordinates: Option<Coordinates>,
    pub last_forecast: Option<ForecastSnapshot>,
    pub unit_preference: TemperatureUnit,
    pub place_status: Status,
    pub weather_status: Status,
    pub conditions: Option<CurrentConditions>,
    pub chart: Vec<DrawCommand>,
}

impl DisplayState {
    pub fn with_unit(unit: TemperatureUnit) -> Self {
        Self { unit_preference: unit, ..Default::default() }
    }

    /// Heading for the place panel.
    pub fn headline(&self) -> String {
        match (&self.selected_place, self.active_coordinates) {
            (Some(place), _) => place.common_name.clone(),
            (None, Some(_)) => "Your location".to_string(),
            (None, None) => ABSENT.to_string(),
        }
    }

    /// "capital • population • region" for the selected place.
    pub fn place_subtitle(&self) -> String {
        match &self.selected_place {
            Some(place) => format!(
                "{} • {} • {}",
                place.capital.as_deref().unwrap_or(ABSENT),
                place.population.map(group_thousands).as_deref().unwrap_or(ABSENT),
                place.region.as_deref().unwrap_or(ABSENT),
            ),
            None => self.coordinates_text(),
        }
    }

    pub fn coordinates_text(&self) -> String {
        self.active_coordinates
            .map(|c| c.to_string())
            .unwrap_or_else(|| ABSENT.to_string())
    }

    pub(crate) fn clear_forecast(&mut self) {
        self.last_forecast = None;
        self.conditions = None;
        self.chart.clear();
    }
}

/// `1428627663` → `"1,428,627,663"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
