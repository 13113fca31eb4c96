use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use travel_core::{
    Attraction, DestinationCard, MapView, PresentationSink, StatusKind, WeatherCard,
    display::format_distance,
};

/// Renders dashboard sections as plain text.
///
/// Write failures are logged and otherwise ignored; a broken pipe should not
/// abort a search that already finished.
pub struct TerminalSink<W: Write + Send> {
    out: Mutex<W>,
}

impl TerminalSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn emit(&self, text: &str) {
        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            tracing::warn!(error = %err, "failed to write to terminal");
        }
    }
}

fn status_label(kind: StatusKind) -> &'static str {
    match kind {
        StatusKind::Idle => "",
        StatusKind::Loading => "[..] ",
        StatusKind::Success => "[ok] ",
        StatusKind::Error => "[error] ",
    }
}

fn destination_text(card: &DestinationCard) -> String {
    let mut text = format!("\n== {} ==\n", card.title);
    if !card.region.is_empty() {
        text.push_str(&format!("{}\n", card.region));
    }
    text.push_str(&format!("Coordinates: {}\n", card.coordinates));
    if let Some(population) = &card.population {
        text.push_str(&format!("Population:  {population}\n"));
    }
    text.push_str(&format!("Timezone:    {}\n", card.timezone));
    text
}

fn weather_text(card: &WeatherCard) -> String {
    format!(
        "\nWeather ({}, {}): {}\n  Temperature: {} °C / {} °F\n  Feels like:  {} °C / {} °F\n  Humidity:    {}\n  Wind:        {}\n",
        card.weekday,
        if card.is_day { "day" } else { "night" },
        card.condition,
        card.temperature_c,
        card.temperature_f,
        card.feels_like_c,
        card.feels_like_f,
        card.humidity,
        card.wind,
    )
}

fn attractions_text(attractions: &[Attraction]) -> String {
    if attractions.is_empty() {
        return "\nNo attractions found nearby.\n".to_string();
    }

    let mut text = String::from("\nAttractions:\n");
    for (i, attraction) in attractions.iter().enumerate() {
        text.push_str(&format!(
            "{:>2}. {} ({})\n    {}\n    {}\n",
            i + 1,
            attraction.title,
            format_distance(attraction.distance_m),
            attraction.summary,
            attraction.url,
        ));
    }
    text
}

fn map_text(map: &MapView) -> String {
    format!("\nMap: {}\nEmbed: {}\n", map.link_url, map.embed_url)
}

impl<W: Write + Send> PresentationSink for TerminalSink<W> {
    fn set_status(&self, message: &str, kind: StatusKind) {
        if message.is_empty() {
            return;
        }
        self.emit(&format!("{}{message}\n", status_label(kind)));
    }

    /// A terminal cannot erase earlier output, so a new attempt starts a
    /// fresh block instead.
    fn clear_results(&self) {
        self.emit("\n");
    }

    fn render_destination(&self, card: &DestinationCard) {
        self.emit(&destination_text(card));
    }

    fn render_weather(&self, card: &WeatherCard) {
        self.emit(&weather_text(card));
    }

    fn render_attractions(&self, attractions: &[Attraction]) {
        self.emit(&attractions_text(attractions));
    }

    fn render_map(&self, map: &MapView) {
        self.emit(&map_text(map));
    }
}
