use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::summary::summarize;
use crate::feed::Article;

/// The record written for the newsletter page. Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Newsletter {
    #[serde(default)]
    pub source: String,
    /// RFC 3339 UTC timestamp with a `Z` suffix
    #[serde(default)]
    pub generated_at: String,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub generated_date: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl Newsletter {
    /// Assemble the record for `articles`, stamped with `now`
    pub fn build(source: &str, articles: Vec<Article>, now: DateTime<Utc>) -> Self {
        Self {
            source: source.to_string(),
            generated_at: format_timestamp(now),
            generated_date: now.format("%Y-%m-%d").to_string(),
            summary: summarize(&articles),
            articles,
        }
    }
}

/// Microsecond precision, with the fraction omitted when it is zero
fn format_timestamp(now: DateTime<Utc>) -> String {
    let precision = if now.timestamp_subsec_micros() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    now.to_rfc3339_opts(precision, true)
}
