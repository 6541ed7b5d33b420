//! Background artwork for the weather screen.

const DEFAULT_BACKGROUND: &str = "assets/clear.png";

const BACKGROUNDS: &[(&str, &str)] = &[
    ("clear", "assets/clear.png"),
    ("hail", "assets/hail.png"),
    ("heavy cloud", "assets/heavy-cloud.png"),
    ("cloudy", "assets/heavy-cloud.png"),
    ("fog", "assets/heavy-cloud.png"),
    ("light cloud", "assets/light-cloud.png"),
    ("partly cloudy", "assets/light-cloud.png"),
    ("heavy rain", "assets/heavy-rain.png"),
    ("light rain", "assets/light-rain.png"),
    ("rain", "assets/light-rain.png"),
    ("drizzle", "assets/light-rain.png"),
    ("showers", "assets/showers.png"),
    ("sleet", "assets/sleet.png"),
    ("snow", "assets/snow.png"),
    ("thunder", "assets/thunder.png"),
    ("thunderstorm", "assets/thunder.png"),
];

/// Asset path for a condition text. Unknown or empty text gets the clear sky.
pub fn background_for(weather: &str) -> &'static str {
    let key = weather.trim().to_lowercase();
    BACKGROUNDS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, asset)| *asset)
        .unwrap_or(DEFAULT_BACKGROUND)
}
