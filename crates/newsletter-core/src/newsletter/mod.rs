mod payload;
mod render;
mod summary;
mod writer;

pub use payload::Newsletter;
pub use render::{render_text, render_unavailable};
pub use summary::{detect_themes, summarize, EMPTY_SUMMARY, FALLBACK_THEME};
pub use writer::{read_newsletter, write_newsletter};
