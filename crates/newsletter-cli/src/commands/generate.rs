use anyhow::Result;

use newsletter_core::{feed::FeedFetcher, generate, AppConfig};

pub async fn run(config: &AppConfig) -> Result<()> {
    let fetcher = FeedFetcher::new(config)?;

    let report = generate(config, &fetcher).await?;

    println!(
        "Wrote {} with {} articles",
        report.path.display(),
        report.article_count
    );

    Ok(())
}
