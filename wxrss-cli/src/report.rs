use wxrss_core::{FeedStatus, WeatherRecord};

/// Renders the plain-text weather report for one location.
pub fn render(location: &str, records: &[WeatherRecord], status: FeedStatus) -> String {
    let mut report = vec![format!("BBC Weather for location '{location}':\n")];

    match status {
        FeedStatus::Unavailable => report.push("[Feed not available]\n".to_string()),
        FeedStatus::ParseError => report.push("[Feed could not be parsed]\n".to_string()),
        _ if records.is_empty() => report.push("[Summary not available]\n".to_string()),
        _ => {
            for record in records {
                report.push(render_record(record));
            }
        }
    }

    report.concat()
}

fn render_record(record: &WeatherRecord) -> String {
    let mut lines = Vec::new();

    match (&record.day, &record.summary) {
        (Some(day), Some(summary)) => lines.push(format!("\n{day}: {summary}\n")),
        _ => lines.push(format!("\n{}\n", record.title)),
    }

    let fields = [
        ("Temperature", &record.temp_now),
        ("Maximum Temperature", &record.temp_max),
        ("Minimum Temperature", &record.temp_min),
        ("Wind Direction", &record.wind_direction),
        ("Wind Speed", &record.wind_speed),
        ("Humidity", &record.humidity),
        ("Pressure", &record.pressure_level),
        ("Pressure Change", &record.pressure_change),
        ("Visibility", &record.visibility),
        ("UV Risk", &record.uv_risk),
        ("Pollution", &record.pollution_level),
        ("Sunrise", &record.sunrise),
        ("Sunset", &record.sunset),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            lines.push(format!("  {label}: {value}\n"));
        }
    }

    if !record.pub_date.is_empty() {
        lines.push(format!("  Published: {}\n", record.pub_date));
    }

    lines.concat()
}
