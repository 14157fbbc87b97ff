//! One newsletter run: fetch, parse, summarize, write.
//!
//! Nothing touches the output file until the feed has been fetched and parsed,
//! so a failed run leaves any previous newsletter in place.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::config::AppConfig;
use crate::feed::{parse_feed, FeedSource};
use crate::newsletter::{write_newsletter, Newsletter};
use crate::Result;

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub path: PathBuf,
    pub article_count: usize,
    pub summary: String,
}

/// Run the pipeline against `source`, stamping the record with the current time
pub async fn generate(config: &AppConfig, source: &dyn FeedSource) -> Result<GenerateReport> {
    generate_at(config, source, Utc::now()).await
}

pub async fn generate_at(
    config: &AppConfig,
    source: &dyn FeedSource,
    now: DateTime<Utc>,
) -> Result<GenerateReport> {
    let content = source.fetch(&config.feed.url).await?;
    let articles = parse_feed(&content, config.feed.max_items)?;

    let newsletter = Newsletter::build(&config.feed.url, articles, now);
    let path = config.output_path().to_path_buf();
    write_newsletter(&path, &newsletter)?;

    Ok(GenerateReport {
        path,
        article_count: newsletter.articles.len(),
        summary: newsletter.summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newsletter::read_newsletter;
    use crate::{Error, ErrorKind};
    use bytes::Bytes;
    use chrono::TimeZone;

    enum StubFeed {
        Body(String),
        Status(u16),
    }

    #[async_trait::async_trait]
    impl FeedSource for StubFeed {
        async fn fetch(&self, url: &str) -> Result<Bytes> {
            match self {
                StubFeed::Body(body) => Ok(Bytes::from(body.clone())),
                StubFeed::Status(code) => Err(Error::HttpStatus {
                    status: reqwest::StatusCode::from_u16(*code).unwrap(),
                    url: url.to_string(),
                }),
            }
        }
    }

    fn feed_with(items: &[(&str, &str)]) -> String {
        let items: String = items
            .iter()
            .enumerate()
            .map(|(i, (title, description))| {
                format!(
                    "<item><title>{}</title><link>https://www.paymentsdive.com/news/story-{}/</link>\
                     <description>{}</description><pubDate>Mon, 19 Oct 2026 08:00:00 -0400</pubDate></item>",
                    title, i, description
                )
            })
            .collect();
        format!(
            "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>Payments Dive</title>{}</channel></rss>",
            items
        )
    }

    fn config_in(dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.output.path = dir.join("data").join("paymentsdive-newsletter.json");
        config
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_three_items_one_fraud() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let source = StubFeed::Body(feed_with(&[
            ("Check fraud climbs at community banks", "Losses rose"),
            ("Visa reports quarterly volume", "Cross-border spend up"),
            ("Mastercard names new CEO", "Leadership change"),
        ]));

        let report = generate_at(&config, &source, now()).await.unwrap();
        assert_eq!(report.article_count, 3);
        assert_eq!(report.path, config.output.path);

        let written = read_newsletter(&config.output.path).unwrap();
        assert_eq!(written.articles.len(), 3);
        assert_eq!(
            written.summary,
            "Today's PaymentsDive recap: 3 new stories, with focus on fraud/security."
        );
        assert_eq!(written.source, "https://www.paymentsdive.com/feeds/news/");
        assert_eq!(written.generated_at, "2026-10-19T12:00:00Z");
        assert_eq!(written.generated_date, "2026-10-19");
        assert_eq!(written.articles[1].title, "Visa reports quarterly volume");
        assert_eq!(written.articles[1].published, "Mon, 19 Oct 2026 08:00:00 -0400");
    }

    #[tokio::test]
    async fn test_ten_items_keeps_first_eight() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let titles: Vec<String> = (1..=10).map(|n| format!("Story {}", n)).collect();
        let items: Vec<(&str, &str)> = titles.iter().map(|t| (t.as_str(), "")).collect();

        let report = generate_at(&config, &StubFeed::Body(feed_with(&items)), now())
            .await
            .unwrap();
        assert_eq!(report.article_count, 8);

        let written = read_newsletter(&config.output.path).unwrap();
        let got: Vec<&str> = written.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(got, titles[..8].iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_http_error_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let err = generate_at(&config, &StubFeed::Status(500), now())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::HttpStatus);
        assert!(!config.output.path.exists());
        assert!(!config.output.path.parent().unwrap().exists());
    }

    #[tokio::test]
    async fn test_failures_keep_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let first = StubFeed::Body(feed_with(&[("Story", "")]));
        generate_at(&config, &first, now()).await.unwrap();
        let before = std::fs::read_to_string(&config.output.path).unwrap();

        let err = generate_at(&config, &StubFeed::Status(503), now())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::HttpStatus);

        let malformed = StubFeed::Body("<rss><channel><item>".to_string());
        let err = generate_at(&config, &malformed, now()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);

        assert_eq!(std::fs::read_to_string(&config.output.path).unwrap(), before);
    }

    #[tokio::test]
    async fn test_empty_feed_writes_placeholder_summary() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let report = generate_at(&config, &StubFeed::Body(feed_with(&[])), now())
            .await
            .unwrap();
        assert_eq!(report.article_count, 0);
        assert_eq!(report.summary, "No new articles found today.");
    }

    #[tokio::test]
    async fn test_respects_configured_item_cap() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.feed.max_items = 2;

        let source = StubFeed::Body(feed_with(&[("One", ""), ("Two", ""), ("Three", "")]));
        let report = generate_at(&config, &source, now()).await.unwrap();
        assert_eq!(report.article_count, 2);
    }
}
