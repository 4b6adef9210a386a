//! Create a starter site next to the config file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::config_root;

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing folio...");

    let pages_dir = config_root(config_path).join("pages");

    if !pages_dir.exists() {
        fs::create_dir_all(&pages_dir).context("Failed to create pages directory")?;
    }

    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    } else {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
    }

    let index_path = pages_dir.join("index.html");
    if !index_path.exists() || yes {
        fs::write(&index_path, DEFAULT_INDEX).context("Failed to write pages/index.html")?;
        tracing::info!("Created {}", index_path.display());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'folio build' to render the site.");

    Ok(())
}

pub(crate) const DEFAULT_CONFIG: &str = r#"# Folio configuration

[site]
author = "Your Name"

[site.social]
twitter = "your-handle"
gitHub = "your-handle"
linkedIn = "your-handle"

[avatar]
# Pre-sized 50x50 profile picture
src = "/static/profile-pic.png"
width = 50
height = 50

[analytics]
enabled = true
endpoint = "https://counter.dev/track"
user = "your-counter-id"
utcoffset = "1"

[document]
head = ["<title>My Blog</title>"]
pre_body = []
post_body = []

[document.html_attributes]
lang = "en"

[document.body_attributes]

[build]
pages = "pages"
output = "dist"
# top | bottom | none
profile_card = "bottom"
"#;

const DEFAULT_INDEX: &str = r#"<main>
  <h1>Hello, world</h1>
  <p>This is the first page of your blog.</p>
</main>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_config_and_index() {
        let temp = tempfile::tempdir().unwrap();
        let config = temp.path().join("site.toml");

        run(&config, false).await.unwrap();

        assert_eq!(fs::read_to_string(&config).unwrap(), DEFAULT_CONFIG);
        assert!(temp.path().join("pages").join("index.html").exists());
    }

    #[tokio::test]
    async fn keeps_existing_files_without_yes() {
        let temp = tempfile::tempdir().unwrap();
        let config = temp.path().join("site.toml");
        fs::write(&config, "[site]\nauthor = \"Kept\"\n").unwrap();

        run(&config, false).await.unwrap();
        assert!(fs::read_to_string(&config).unwrap().contains("Kept"));

        run(&config, true).await.unwrap();
        assert_eq!(fs::read_to_string(&config).unwrap(), DEFAULT_CONFIG);
    }
}
