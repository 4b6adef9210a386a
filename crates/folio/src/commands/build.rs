//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use folio_static::StaticBuilder;

use crate::config::{config_root, load_config};

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Building static site...");

    let config = load_config(config_path)?.into_build_config(config_root(config_path), output);

    let result = StaticBuilder::new(config).build().await?;

    tracing::info!("Built {} pages in {}ms", result.pages, result.duration_ms);

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::commands::init;

    #[tokio::test]
    async fn builds_initialized_site() {
        let temp = tempfile::tempdir().unwrap();
        let config = temp.path().join("site.toml");

        init::run(&config, false).await.unwrap();
        run(&config, None).await.unwrap();

        let html = fs::read_to_string(temp.path().join("dist").join("index.html")).unwrap();
        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("id=\"___gatsby\""));
        assert!(html.contains("profile-card"));
    }

    #[tokio::test]
    async fn output_flag_overrides_config() {
        let temp = tempfile::tempdir().unwrap();
        let config = temp.path().join("site.toml");
        let out = temp.path().join("public");

        init::run(&config, false).await.unwrap();
        run(&config, Some(out.clone())).await.unwrap();

        assert!(out.join("index.html").exists());
        assert!(!temp.path().join("dist").exists());
    }
}
