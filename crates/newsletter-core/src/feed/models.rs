use serde::{Deserialize, Serialize};

/// A cleaned feed entry as it appears in the newsletter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    /// Raw `pubDate` text, not normalized
    #[serde(default)]
    pub published: String,
}

/// Raw text of one `<item>`, before cleaning
#[derive(Debug, Clone, Default)]
pub struct RawItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub pub_date: Option<String>,
}

impl Article {
    /// Title and description joined by a space, used for keyword matching
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}
