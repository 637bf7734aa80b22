use forecast_core::{
    ChartSize, DisplayState, DrawCommand, Locale, Surface, SvgSurface,
    chart::weekday_label,
    state::ABSENT,
    to_display_unit,
};

pub fn print_display(display: &DisplayState, locale: Locale) {
    println!("{}", display.headline());
    println!("  {}", display.place_subtitle());
    if let Some(flag) = display.selected_place.as_ref().and_then(|p| p.flag_image_url.as_deref()) {
        println!("  flag: {flag}");
    }
    println!("  lat/lon: {}", display.coordinates_text());
    println!(
        "  place: {}   weather: {}",
        display.place_status.label(),
        display.weather_status.label()
    );

    if let Some(now) = display.conditions {
        println!(
            "  now: {}   wind {}   rain {}",
            now.temperature_text(),
            now.wind_text(),
            now.precipitation_text()
        );
    }

    let Some(forecast) = &display.last_forecast else {
        return;
    };

    let unit = display.unit_preference;
    let temp = |v: Option<f64>| {
        v.map(|c| format!("{:>5.1}", to_display_unit(c, unit)))
            .unwrap_or_else(|| format!("{ABSENT:>5}"))
    };

    println!();
    println!("  {:<4} {:>5} {:>5} {:>7}", "day", "high", "low", "precip");
    for (i, date) in forecast.daily_labels.iter().enumerate() {
        let precip = forecast
            .daily_precipitation_mm
            .get(i)
            .copied()
            .flatten()
            .map(|p| format!("{p:>4.1} mm"))
            .unwrap_or_else(|| format!("{ABSENT:>7}"));

        println!(
            "  {:<4} {} {} {}",
            weekday_label(date, locale),
            temp(forecast.daily_high_celsius.get(i).copied().flatten()),
            temp(forecast.daily_low_celsius.get(i).copied().flatten()),
            precip
        );
    }
    println!("  (temperatures in {unit})");
}

pub fn print_recent(recent: &[String]) {
    if recent.is_empty() {
        println!("(nothing yet)");
        return;
    }
    for (i, name) in recent.iter().enumerate() {
        println!("{}. {name}", i + 1);
    }
}

pub fn chart_svg(chart: &[DrawCommand], size: ChartSize) -> String {
    let mut surface = SvgSurface::new(size.width, size.height);
    surface.replay(chart);
    surface.finish()
}
