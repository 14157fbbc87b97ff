use crate::feed::Article;

pub const EMPTY_SUMMARY: &str = "No new articles found today.";
pub const FALLBACK_THEME: &str = "payments industry updates";

/// Themes in priority order with the lowercase keywords that trigger them.
/// Matching is by substring, so "ai" also hits words like "retail".
const THEMES: &[(&str, &[&str])] = &[
    ("fraud/security", &["fraud", "scam", "security", "breach"]),
    ("regulation", &["regulation", "cfpb", "fed", "law", "compliance"]),
    (
        "product + fintech innovation",
        &["ai", "fintech", "wallet", "real-time", "instant"],
    ),
];

const MAX_THEMES: usize = 2;

/// Theme labels whose keywords appear in the articles, in priority order.
/// Falls back to the generic theme when nothing matches.
pub fn detect_themes(articles: &[Article]) -> Vec<&'static str> {
    let joined = articles
        .iter()
        .map(Article::searchable_text)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut themes: Vec<&'static str> = THEMES
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| joined.contains(k)))
        .map(|(label, _)| *label)
        .collect();

    if themes.is_empty() {
        themes.push(FALLBACK_THEME);
    }
    themes
}

/// One-sentence recap of the day's articles
pub fn summarize(articles: &[Article]) -> String {
    if articles.is_empty() {
        return EMPTY_SUMMARY.to_string();
    }

    let themes = detect_themes(articles);
    let focus = themes
        .iter()
        .take(MAX_THEMES)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Today's PaymentsDive recap: {} new stories, with focus on {}.",
        articles.len(),
        focus
    )
}
