//! Two-phase extraction of weather records from raw feed bytes.
//!
//! Phase one parses the document as XML and walks `item` elements in
//! document order. Phase two applies best-effort text grammars to each
//! item's `title` and `description`: the outer structure of the feed is
//! well-formed XML, but the weather data itself lives in free-form prose
//! with an informally consistent sub-grammar. A field that cannot be
//! matched is left unset; it is never an error.

use std::collections::HashMap;

use regex::Regex;
use roxmltree::{Document, Node};
use tracing::debug;

use crate::model::{FeedStatus, WeatherRecord};

/// Schema fields a description label can map to.
///
/// `Pressure` is special: its clause carries up to two values, the level
/// and an optional change indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Humidity,
    Pollution,
    Pressure,
    Sunrise,
    Sunset,
    TempNow,
    TempMax,
    TempMin,
    UvRisk,
    Visibility,
    WindDirection,
    WindSpeed,
}

/// The label vocabulary of the BBC weather feeds.
///
/// Other feed dialects are a different table, not a different extractor;
/// see [`Extractor::with_labels`].
pub fn default_labels() -> HashMap<String, Field> {
    HashMap::from([
        ("Humidity".to_string(), Field::Humidity),
        ("Pollution".to_string(), Field::Pollution),
        ("Pressure".to_string(), Field::Pressure),
        ("Sunrise".to_string(), Field::Sunrise),
        ("Sunset".to_string(), Field::Sunset),
        ("Temperature".to_string(), Field::TempNow),
        ("Maximum Temperature".to_string(), Field::TempMax),
        ("Minimum Temperature".to_string(), Field::TempMin),
        ("UV Risk".to_string(), Field::UvRisk),
        ("Visibility".to_string(), Field::Visibility),
        ("Wind Direction".to_string(), Field::WindDirection),
        ("Wind Speed".to_string(), Field::WindSpeed),
    ])
}

/// Turns raw feed bytes into an ordered sequence of [`WeatherRecord`]s.
///
/// Holds no state across invocations: parsing the same bytes twice yields
/// identical records.
#[derive(Debug)]
pub struct Extractor {
    title_re: Regex,
    labels: HashMap<String, Field>,
}

impl Extractor {
    pub fn new() -> Self {
        Self::with_labels(default_labels())
    }

    /// An extractor for a feed dialect with a different label vocabulary.
    pub fn with_labels(labels: HashMap<String, Field>) -> Self {
        Self {
            title_re: Regex::new(r"^([A-Z][a-z]*): (.*)$").unwrap(),
            labels,
        }
    }

    /// Extracts records from raw feed bytes, or reports why it could not.
    ///
    /// - Absent content yields `([], Unavailable)`.
    /// - Content that is not well-formed XML (including invalid UTF-8)
    ///   yields `([], ParseError)`.
    /// - Otherwise one record per `item` element in document order and
    ///   status `Ok`, even when zero items are present or no field matched.
    pub fn extract(&self, raw: Option<&[u8]>) -> (Vec<WeatherRecord>, FeedStatus) {
        let Some(raw) = raw else {
            return (Vec::new(), FeedStatus::Unavailable);
        };
        let Ok(text) = std::str::from_utf8(raw) else {
            return (Vec::new(), FeedStatus::ParseError);
        };
        let doc = match Document::parse(text) {
            Ok(doc) => doc,
            Err(err) => {
                debug!("structural parse failed: {err}");
                return (Vec::new(), FeedStatus::ParseError);
            }
        };

        let records: Vec<WeatherRecord> = doc
            .descendants()
            .filter(|node| node.has_tag_name("item"))
            .map(|item| self.record_from_item(&item))
            .collect();

        debug!("extracted {} records", records.len());
        (records, FeedStatus::Ok)
    }

    fn record_from_item(&self, item: &Node<'_, '_>) -> WeatherRecord {
        // The feed's payload is ASCII; stray non-ASCII characters in title
        // and description are dropped. pubDate is kept verbatim.
        let title = ascii_only(&child_text(item, "title"));
        let description = ascii_only(&child_text(item, "description"));
        let pub_date = child_text(item, "pubDate");

        let (day, summary) = self.parse_title(&title);
        let mut record = WeatherRecord {
            day,
            summary,
            ..WeatherRecord::default()
        };
        self.apply_description(&description, &mut record);

        record.title = title;
        record.description = description;
        record.pub_date = pub_date;
        record
    }

    /// Splits a title of the form `"Tuesday: Sunny, Maximum Temperature: ..."`
    /// into a day and a summary.
    ///
    /// The summary runs from the first `": "` up to the comma that opens the
    /// next labelled clause; a trailing bare colon is stripped. A title that
    /// does not start with a capitalized day word followed by `": "` leaves
    /// both fields unset.
    pub fn parse_title(&self, title: &str) -> (Option<String>, Option<String>) {
        let Some(caps) = self.title_re.captures(title) else {
            return (None, None);
        };
        let day = caps[1].to_string();
        let rest = &caps[2];

        let end = match rest.find(": ") {
            Some(colon) => rest[..colon].rfind(',').unwrap_or(0),
            None => rest.len(),
        };
        let summary = rest[..end]
            .trim_end()
            .trim_end_matches(':')
            .trim_end()
            .to_string();

        (Some(day), Some(summary))
    }

    /// Applies the description grammar: comma-separated `Label: value[, value]`
    /// clauses. A segment without `": "` continues the previous clause's
    /// value list. Unknown labels are ignored and a repeated label
    /// overwrites the earlier match.
    pub fn apply_description(&self, description: &str, record: &mut WeatherRecord) {
        let mut clauses: Vec<(&str, Vec<&str>)> = Vec::new();
        for segment in description.split(", ") {
            match segment.split_once(": ") {
                Some((label, value)) => clauses.push((label, vec![value])),
                None => {
                    if let Some((_, values)) = clauses.last_mut() {
                        values.push(segment);
                    }
                }
            }
        }

        for (label, values) in clauses {
            let Some(field) = self.labels.get(label) else {
                continue;
            };
            let first = values.first().copied().unwrap_or_default().to_string();
            match field {
                Field::Humidity => record.humidity = Some(first),
                Field::Pollution => record.pollution_level = Some(first),
                Field::Pressure => {
                    record.pressure_level = Some(first);
                    if let Some(second) = values.get(1) {
                        record.pressure_change = Some((*second).to_string());
                    }
                }
                Field::Sunrise => record.sunrise = Some(first),
                Field::Sunset => record.sunset = Some(first),
                Field::TempNow => record.temp_now = Some(first),
                Field::TempMax => record.temp_max = Some(first),
                Field::TempMin => record.temp_min = Some(first),
                Field::UvRisk => record.uv_risk = Some(first),
                Field::Visibility => record.visibility = Some(first),
                Field::WindDirection => record.wind_direction = Some(first),
                Field::WindSpeed => record.wind_speed = Some(first),
            }
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Concatenates the text-node content of an item's immediate child elements
/// named `name`, separated by single spaces.
fn child_text(item: &Node<'_, '_>, name: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for child in item
        .children()
        .filter(|c| c.is_element() && c.has_tag_name(name))
    {
        for node in child.descendants().filter(|n| n.is_text()) {
            if let Some(text) = node.text() {
                parts.push(text);
            }
        }
    }
    parts.join(" ")
}

fn ascii_only(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}
