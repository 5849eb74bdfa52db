//! HTML views for the web front end.

use crate::domain::entities::ComposedWeather;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>GeoWeather App</title>
</head>
<body>
    <h1>Welcome to the GeoWeather App</h1>
    <form action="/weather" method="POST">
        <button type="submit">Get My Weather</button>
    </form>
</body>
</html>
"#;

pub fn render_index() -> &'static str {
    INDEX_HTML
}

/// Render a successful run.
pub fn render_weather(composed: &ComposedWeather) -> String {
    let description = composed
        .weather
        .description
        .as_deref()
        .map(|d| format!("    <p>Current weather: {}</p>\n", escape_html(d)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Weather Result</title>
</head>
<body>
    <h1>Weather for {place}</h1>
{description}    <p>Temperature: {temperature}°C</p>
    <a href="/">Back to home</a>
</body>
</html>
"#,
        place = escape_html(&composed.location.display_name()),
        description = description,
        temperature = composed.weather.temperature_celsius,
    )
}

/// Escape text for interpolation into HTML element content or attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
