//! Core library for the `forecast` widget.
//!
//! This crate defines:
//! - Place resolution and forecast normalization
//! - Unit conversion, axis scales and the chart renderer
//! - The search orchestrator that ties them to the outside collaborators
//! - Configuration and key-value persistence
//!
//! It is used by `forecast-cli`, but any front end that can replay draw
//! commands can drive it.

pub mod chart;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod orchestrator;
pub mod provider;
pub mod recent;
pub mod resolve;
pub mod scale;
pub mod state;
pub mod store;
pub mod units;

pub use chart::{DrawCommand, Locale, Surface, SvgSurface, render, render_with_locale};
pub use config::{ChartSize, Config, Endpoints};
pub use error::ForecastError;
pub use model::{Coordinates, ForecastSnapshot, Place};
pub use normalize::normalize;
pub use orchestrator::{Alerts, SearchOrchestrator};
pub use provider::{Collaborators, LocationProvider, LocationRequest, PlaceSearch, WeatherSource};
pub use recent::RecentQueries;
pub use resolve::resolve;
pub use state::{CurrentConditions, DisplayState, Phase, Status};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use units::{TemperatureUnit, to_display_unit};
