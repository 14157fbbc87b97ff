use anyhow::Result;

use newsletter_core::{
    newsletter::{read_newsletter, render_text, render_unavailable},
    AppConfig,
};

pub fn run(config: &AppConfig) -> Result<()> {
    let path = config.output_path();

    match read_newsletter(path) {
        Ok(newsletter) => {
            print!("{}", render_text(&newsletter));
            Ok(())
        }
        Err(e) => {
            print!("{}", render_unavailable());
            Err(anyhow::Error::new(e).context(format!("Cannot load {}", path.display())))
        }
    }
}
