//! Query → place → forecast → chart pipeline.
//!
//! The orchestrator is single-threaded: its state sits in `Cell`/`RefCell`
//! and is never borrowed across an `.await`. Every request takes a fresh
//! sequence number, and a completion that is no longer the latest request is
//! dropped so a slow response can't overwrite newer state.

use std::cell::{Cell, Ref, RefCell};

use crate::{
    chart::{Locale, render_with_locale, system_locale},
    config::ChartSize,
    error::ForecastError,
    model::Coordinates,
    normalize::normalize,
    provider::{Collaborators, LocationRequest},
    recent::{RECENT_KEY, RecentQueries},
    resolve::resolve,
    state::{CurrentConditions, DisplayState, Phase, Status},
    store::KeyValueStore,
    units::TemperatureUnit,
};

pub const UNIT_KEY: &str = "unit";
pub const PLACE_NOT_FOUND: &str = "Country not found. Try a different name.";
pub const LOCATION_FAILED: &str = "Could not get your location";

/// User-facing notifications (the widget's alert box).
pub trait Alerts {
    fn alert(&self, message: &str);
}

impl<F: Fn(&str)> Alerts for F {
    fn alert(&self, message: &str) {
        self(message)
    }
}

pub struct SearchOrchestrator {
    collaborators: Collaborators,
    store: Box<dyn KeyValueStore>,
    alerts: Box<dyn Alerts>,
    chart_size: ChartSize,
    locale: Locale,
    location_request: LocationRequest,
    sequence: Cell<u64>,
    phase: Cell<Phase>,
    display: RefCell<DisplayState>,
    recent: RefCell<RecentQueries>,
}

impl std::fmt::Debug for SearchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchOrchestrator")
            .field("collaborators", &self.collaborators)
            .field("sequence", &self.sequence.get())
            .field("phase", &self.phase.get())
            .finish_non_exhaustive()
    }
}

impl SearchOrchestrator {
    /// Build an orchestrator, restoring unit preference and recent searches from `store`.
    pub fn new(
        collaborators: Collaborators,
        store: Box<dyn KeyValueStore>,
        alerts: Box<dyn Alerts>,
        chart_size: ChartSize,
    ) -> Self {
        let unit = store
            .get(UNIT_KEY)
            .and_then(|u| TemperatureUnit::try_from(u.as_str()).ok())
            .unwrap_or_default();
        let recent = RecentQueries::load(store.as_ref());

        Self {
            collaborators,
            store,
            alerts,
            chart_size,
            locale: system_locale(),
            location_request: LocationRequest::default(),
            sequence: Cell::new(0),
            phase: Cell::new(Phase::Idle),
            display: RefCell::new(DisplayState::with_unit(unit)),
            recent: RefCell::new(recent),
        }
    }

    pub fn with_location_request(mut self, request: LocationRequest) -> Self {
        self.location_request = request;
        self
    }

    /// Locale for weekday labels; defaults to the system locale.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn display(&self) -> Ref<'_, DisplayState> {
        self.display.borrow()
    }

    pub fn recent(&self) -> Vec<String> {
        self.recent.borrow().items().to_vec()
    }

    /// What to search on startup: the latest recent search, else `fallback`.
    pub fn initial_query(&self, fallback: &str) -> String {
        self.recent
            .borrow()
            .first()
            .map_or_else(|| fallback.to_string(), str::to_string)
    }

    pub fn clear_recent(&self) {
        self.recent.borrow_mut().clear();
        if let Err(e) = self.store.remove(RECENT_KEY) {
            tracing::warn!("Failed to clear recent searches: {e:#}");
        }
    }

    fn begin(&self) -> u64 {
        let next = self.sequence.get() + 1;
        self.sequence.set(next);
        next
    }

    fn is_current(&self, seq: u64) -> bool {
        self.sequence.get() == seq
    }

    fn set_phase(&self, phase: Phase) {
        tracing::debug!("phase {:?} -> {:?}", self.phase.get(), phase);
        self.phase.set(phase);
    }

    /// Resolve `text` to a place and, when it has coordinates, fetch its forecast.
    pub async fn submit_query(&self, text: &str) {
        let query = text.trim();
        if query.is_empty() {
            tracing::debug!("{}", ForecastError::EmptyQuery);
            return;
        }

        let seq = self.begin();
        self.set_phase(Phase::ResolvingPlace);
        {
            let mut display = self.display.borrow_mut();
            display.place_status = Status::Loading;
            display.weather_status = Status::Blank;
        }

        let resolved = match self.collaborators.places.search(query).await {
            Ok(candidates) => resolve(query, &candidates),
            Err(e) => Err(ForecastError::NetworkFailure(e)),
        };

        if !self.is_current(seq) {
            tracing::debug!(seq, "Dropping superseded place lookup for '{query}'");
            return;
        }

        let place = match resolved {
            Ok(place) => place,
            Err(err) => {
                tracing::warn!("Place lookup for '{query}' failed: {err}");
                self.display.borrow_mut().place_status = Status::Error;
                self.set_phase(Phase::Failed);
                self.alerts.alert(PLACE_NOT_FOUND);
                return;
            }
        };

        let name = place.common_name.clone();
        let coordinates = place.coordinates;
        {
            let mut display = self.display.borrow_mut();
            display.selected_place = Some(place);
            display.active_coordinates = coordinates;
            display.place_status = Status::Ok;
        }

        match coordinates {
            Some(at) => {
                self.remember(&name);
                self.fetch_weather(seq, at).await;
            }
            None => {
                tracing::info!("'{name}' has no coordinates; skipping forecast");
                let mut display = self.display.borrow_mut();
                display.weather_status = Status::NoCoordinates;
                display.clear_forecast();
                drop(display);
                self.set_phase(Phase::Ready);
            }
        }
    }

    /// Fetch the forecast for the device's position, bypassing place search.
    pub async fn use_current_location(&self) {
        let seq = self.begin();
        self.set_phase(Phase::FetchingWeather);
        self.display.borrow_mut().weather_status = Status::Locating;

        let request = self.location_request;
        let located = match tokio::time::timeout(
            request.timeout,
            self.collaborators.locator.locate(&request),
        )
        .await
        {
            Ok(Ok(at)) => Ok(at),
            Ok(Err(e)) => Err(ForecastError::LocationUnavailable(format!("{e:#}"))),
            Err(_) => Err(ForecastError::LocationUnavailable(format!(
                "timed out after {:?}",
                request.timeout
            ))),
        };

        if !self.is_current(seq) {
            tracing::debug!(seq, "Dropping superseded location fix");
            return;
        }

        match located {
            Ok(at) => {
                {
                    let mut display = self.display.borrow_mut();
                    display.selected_place = None;
                    display.active_coordinates = Some(at);
                    display.place_status = Status::Blank;
                }
                self.fetch_weather(seq, at).await;
            }
            Err(err) => {
                tracing::warn!("{err}");
                self.display.borrow_mut().weather_status = Status::Error;
                self.set_phase(Phase::Failed);
                self.alerts.alert(LOCATION_FAILED);
            }
        }
    }

    async fn fetch_weather(&self, seq: u64, at: Coordinates) {
        self.set_phase(Phase::FetchingWeather);
        self.display.borrow_mut().weather_status = Status::Loading;

        let outcome = match self.collaborators.weather.forecast(at).await {
            Ok(payload) => normalize(&payload),
            Err(e) => Err(ForecastError::NetworkFailure(e)),
        };

        if !self.is_current(seq) {
            tracing::debug!(seq, "Dropping superseded forecast for {at}");
            return;
        }

        let mut display = self.display.borrow_mut();
        match outcome {
            Ok(snapshot) => {
                tracing::debug!("Forecast for {at} covers {} days", snapshot.days());
                display.last_forecast = Some(snapshot);
                redraw(&mut display, self.chart_size, self.locale);
                display.weather_status = Status::Ok;
                drop(display);
                self.set_phase(Phase::Ready);
            }
            Err(err) => {
                tracing::warn!("Forecast for {at} failed: {err}");
                display.clear_forecast();
                display.weather_status = Status::Error;
                drop(display);
                self.set_phase(Phase::Failed);
            }
        }
    }

    /// Switch the display unit; an existing forecast is redrawn without refetching.
    pub fn toggle_unit(&self, unit: TemperatureUnit) {
        if let Err(e) = self.store.set(UNIT_KEY, unit.as_str()) {
            tracing::warn!("Failed to persist unit preference: {e:#}");
        }

        let mut display = self.display.borrow_mut();
        display.unit_preference = unit;
        if display.active_coordinates.is_some() && display.last_forecast.is_some() {
            redraw(&mut display, self.chart_size, self.locale);
        }
    }

    fn remember(&self, name: &str) {
        let mut recent = self.recent.borrow_mut();
        recent.push(name);
        if let Err(e) = recent.save(self.store.as_ref()) {
            tracing::warn!("Failed to persist recent searches: {e:#}");
        }
    }
}

/// Re-derive conditions and chart from the stored forecast in the current unit.
fn redraw(display: &mut DisplayState, size: ChartSize, locale: Locale) {
    let Some(snapshot) = display.last_forecast.as_ref() else {
        return;
    };

    let unit = display.unit_preference;
    let conditions = CurrentConditions::from_snapshot(snapshot, unit);
    let chart = render_with_locale(snapshot, unit, size.width, size.height, locale);

    display.conditions = Some(conditions);
    display.chart = chart;
}
