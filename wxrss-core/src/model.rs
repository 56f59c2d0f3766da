use serde::Serialize;

/// One forecast or observation entry extracted from a feed item.
///
/// Raw fields (`title`, `description`, `pub_date`) hold the item text as it
/// appeared in the feed. Every derived field is either unset (the label was
/// not found in the source text) or holds the literal substring matched from
/// it. No unit conversion or type coercion is performed; an unset field is
/// distinct from an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeatherRecord {
    pub title: String,
    pub description: String,
    pub pub_date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pollution_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure_change: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_max: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_now: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv_risk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<String>,
}

/// Coarse outcome of feed retrieval and extraction, distinct from per-field
/// absence (a missing label never changes the status).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeedStatus {
    /// No raw content has been loaded or fetched yet.
    #[default]
    Unavailable,
    /// Raw content was fetched from the network but not yet extracted.
    Fetched,
    /// Raw content was present but not well-formed XML.
    ParseError,
    /// The most recent extraction completed without structural failure.
    Ok,
}

impl FeedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedStatus::Unavailable => "feed not available",
            FeedStatus::Fetched => "feed fetched",
            FeedStatus::ParseError => "feed could not be parsed",
            FeedStatus::Ok => "ok",
        }
    }
}

impl std::fmt::Display for FeedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
