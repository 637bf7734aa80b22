//! Forecast chart as a declarative list of draw commands.
//!
//! [`render`] never touches a real surface. Callers replay the commands onto
//! whatever they draw with; see [`Surface`] and [`svg::SvgSurface`].

use chrono::NaiveDate;
pub use chrono::Locale;

use crate::{
    model::ForecastSnapshot,
    scale::{LinearScale, linear_scale, zero_based_scale},
    units::{TemperatureUnit, to_display_unit},
};

pub mod svg;

pub use svg::SvgSurface;

/// Padding around the temperature domain, in display units.
pub const TEMPERATURE_PADDING: f64 = 2.0;
pub const TICK_COUNT: usize = 5;
pub const MARKER_RADIUS: f64 = 3.5;
/// Bars take `plot_width / (days * BAR_SPACING_DIVISOR)`.
const BAR_SPACING_DIVISOR: f64 = 1.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Weekday,
    Tick,
    Legend,
}

/// One drawing primitive. Commands are emitted back-to-front.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Dashed vertical line through one day.
    Gridline { x: f64, top: f64, bottom: f64 },
    /// Precipitation bar; `y` is the top edge.
    Bar { x: f64, y: f64, width: f64, height: f64 },
    LineSegment { series: Series, from: Point, to: Point },
    Marker { series: Series, center: Point, radius: f64 },
    Label { kind: LabelKind, text: String, at: Point, align: TextAlign },
}

/// Drawing target that can replay rendered commands.
pub trait Surface {
    fn draw(&mut self, command: &DrawCommand);

    fn replay(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            self.draw(command);
        }
    }
}

/// Plot area inside the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub pad_left: f64,
    pub pad_right: f64,
    pub pad_top: f64,
    pub pad_bottom: f64,
}

impl ChartLayout {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pad_left: 44.0,
            pad_right: 20.0,
            pad_top: 20.0,
            pad_bottom: 34.0,
        }
    }

    pub fn plot_width(&self) -> f64 {
        (self.width - self.pad_left - self.pad_right).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.pad_top - self.pad_bottom).max(0.0)
    }

    pub fn top(&self) -> f64 {
        self.pad_top
    }

    pub fn bottom(&self) -> f64 {
        self.pad_top + self.plot_height()
    }

    /// Horizontal position of day `index` out of `days`.
    pub fn day_x(&self, index: usize, days: usize) -> f64 {
        let gaps = days.saturating_sub(1).max(1) as f64;
        self.pad_left + index as f64 * (self.plot_width() / gaps)
    }
}

/// Short weekday name for an ISO date, or the label itself if it isn't one.
pub fn weekday_label(date: &str, locale: Locale) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().format_localized("%a", locale).to_string())
        .unwrap_or_else(|| date.to_string())
}

/// Parse a POSIX or BCP 47 style tag such as `fr_FR.UTF-8` or `de-DE`.
pub fn locale_from_tag(tag: &str) -> Option<Locale> {
    let base = tag.split(['.', '@']).next()?.trim().replace('-', "_");
    if base.is_empty() {
        return None;
    }
    Locale::try_from(base.as_str()).ok()
}

/// Locale for date labels, taken from `LC_ALL`, `LC_TIME` or `LANG`.
///
/// Falls back to `en_US` when none is set or the value is unknown (`C`, `POSIX`).
pub fn system_locale() -> Locale {
    ["LC_ALL", "LC_TIME", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.trim().is_empty())
        .and_then(|value| locale_from_tag(&value))
        .unwrap_or(Locale::en_US)
}

/// [`render_with_locale`] using the [`system_locale`].
pub fn render(
    snapshot: &ForecastSnapshot,
    unit: TemperatureUnit,
    surface_width: f64,
    surface_height: f64,
) -> Vec<DrawCommand> {
    render_with_locale(snapshot, unit, surface_width, surface_height, system_locale())
}

pub fn render_with_locale(
    snapshot: &ForecastSnapshot,
    unit: TemperatureUnit,
    surface_width: f64,
    surface_height: f64,
    locale: Locale,
) -> Vec<DrawCommand> {
    let days = snapshot.days();
    if days == 0 {
        return Vec::new();
    }

    let layout = ChartLayout::new(surface_width, surface_height);
    let highs = convert(&snapshot.daily_high_celsius, unit, days);
    let lows = convert(&snapshot.daily_low_celsius, unit, days);
    let precipitation: Vec<Option<f64>> = (0..days)
        .map(|i| snapshot.daily_precipitation_mm.get(i).copied().flatten())
        .collect();

    let temps: Vec<Option<f64>> = highs.iter().chain(lows.iter()).copied().collect();
    let temp_scale = linear_scale(&temps, layout.bottom(), layout.top(), TEMPERATURE_PADDING);
    let precip_scale = zero_based_scale(&precipitation, layout.bottom(), layout.top());

    let mut out = Vec::new();

    for i in 0..days {
        out.push(DrawCommand::Gridline {
            x: layout.day_x(i, days),
            top: layout.top(),
            bottom: layout.bottom(),
        });
    }

    let bar_width = layout.plot_width() / (days as f64 * BAR_SPACING_DIVISOR);
    for (i, value) in precipitation.iter().enumerate() {
        let Some(v) = value else { continue };
        let y = precip_scale.map(*v);
        out.push(DrawCommand::Bar {
            x: layout.day_x(i, days) - bar_width / 2.0,
            y,
            width: bar_width,
            height: layout.bottom() - y,
        });
    }

    // high goes last so it sits on top of low
    push_series(&mut out, Series::Low, &lows, &layout, &temp_scale);
    push_series(&mut out, Series::High, &highs, &layout, &temp_scale);

    for (i, date) in snapshot.daily_labels.iter().enumerate() {
        out.push(DrawCommand::Label {
            kind: LabelKind::Weekday,
            text: weekday_label(date, locale),
            at: Point::new(layout.day_x(i, days), layout.height - 10.0),
            align: TextAlign::Center,
        });
    }

    for v in temp_scale.ticks(TICK_COUNT) {
        out.push(DrawCommand::Label {
            kind: LabelKind::Tick,
            text: format!("{v:.0}°"),
            at: Point::new(layout.pad_left - 8.0, temp_scale.map(v) + 4.0),
            align: TextAlign::Right,
        });
    }

    for (text, offset) in [("High", 8.0), ("Low", 60.0), ("Precip", 108.0)] {
        out.push(DrawCommand::Label {
            kind: LabelKind::Legend,
            text: text.to_string(),
            at: Point::new(layout.pad_left + offset, layout.top() + 14.0),
            align: TextAlign::Left,
        });
    }

    out
}

fn convert(celsius: &[Option<f64>], unit: TemperatureUnit, days: usize) -> Vec<Option<f64>> {
    (0..days)
        .map(|i| celsius.get(i).copied().flatten().map(|c| to_display_unit(c, unit)))
        .collect()
}

/// Segments only join consecutive present points; absent days leave a gap.
fn push_series(
    out: &mut Vec<DrawCommand>,
    series: Series,
    values: &[Option<f64>],
    layout: &ChartLayout,
    scale: &LinearScale,
) {
    let days = values.len();
    let points: Vec<Option<Point>> = values
        .iter()
        .enumerate()
        .map(|(i, v)| v.map(|v| Point::new(layout.day_x(i, days), scale.map(v))))
        .collect();

    for pair in points.windows(2) {
        if let [Some(from), Some(to)] = pair {
            out.push(DrawCommand::LineSegment { series, from: *from, to: *to });
        }
    }

    for center in points.into_iter().flatten() {
        out.push(DrawCommand::Marker { series, center, radius: MARKER_RADIUS });
    }
}
