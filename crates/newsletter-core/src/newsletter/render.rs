use std::fmt::Write;

use super::payload::Newsletter;

const DEFAULT_DATE: &str = "Today";
const DEFAULT_SUMMARY: &str = "Latest PaymentsDive headlines.";
const DEFAULT_DESCRIPTION: &str = "No summary available.";

pub const UNAVAILABLE_DATE: &str = "Unavailable";
pub const UNAVAILABLE_SUMMARY: &str = "Could not load today's recap.";

/// Plain-text rendering of a stored newsletter, with the same fallbacks the page uses
pub fn render_text(newsletter: &Newsletter) -> String {
    let mut out = String::new();

    let date = non_empty(&newsletter.generated_date).unwrap_or(DEFAULT_DATE);
    let summary = non_empty(&newsletter.summary).unwrap_or(DEFAULT_SUMMARY);

    let _ = writeln!(out, "{}", date);
    let _ = writeln!(out, "{}", summary);

    for article in &newsletter.articles {
        let description = non_empty(&article.description).unwrap_or(DEFAULT_DESCRIPTION);
        let _ = writeln!(out);
        let _ = writeln!(out, "  {}", article.title);
        let _ = writeln!(out, "    {}", article.link);
        let _ = writeln!(out, "    {}", description);
    }

    out
}

/// Text shown when the newsletter file cannot be loaded
pub fn render_unavailable() -> String {
    format!("{}\n{}\n", UNAVAILABLE_DATE, UNAVAILABLE_SUMMARY)
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
