//! Preview server command.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::Router;
use tower_http::services::ServeDir;

use crate::config::{config_root, load_config};

/// Run the serve command.
pub async fn run(config_path: &Path, port: u16, dir: Option<PathBuf>) -> Result<()> {
    let dir = resolve_dir(config_path, dir)?;

    if !dir.exists() {
        anyhow::bail!(
            "Directory not found: {}. Run 'folio build' first.",
            dir.display()
        );
    }

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    tracing::info!("Serving {} at http://{}", dir.display(), addr);

    let app = Router::new().fallback_service(ServeDir::new(&dir));

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Best effort, the server runs either way
    let url = format!("http://{}", addr);
    if let Err(e) = open::that(&url) {
        tracing::debug!("Could not open browser: {}", e);
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// The directory to serve: `dir` if given, else the configured build output.
fn resolve_dir(config_path: &Path, dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir),
        None => Ok(load_config(config_path)?
            .into_build_config(config_root(config_path), None)
            .output_dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::commands::{build, init};

    #[tokio::test]
    async fn serves_what_build_wrote() {
        let temp = tempfile::tempdir().unwrap();
        let site = temp.path().join("site");
        let config = site.join("site.toml");
        std::fs::create_dir_all(&site).unwrap();

        init::run(&config, false).await.unwrap();
        build::run(&config, None).await.unwrap();

        let dir = resolve_dir(&config, None).unwrap();

        assert_eq!(dir, site.join("dist"));
        assert!(dir.join("index.html").exists());
    }

    #[test]
    fn explicit_dir_wins() {
        let temp = tempfile::tempdir().unwrap();
        let config = temp.path().join("site.toml");

        let dir = resolve_dir(&config, Some(PathBuf::from("public"))).unwrap();

        assert_eq!(dir, PathBuf::from("public"));
    }

    #[tokio::test]
    async fn refuses_missing_directory() {
        let temp = tempfile::tempdir().unwrap();
        let config = temp.path().join("site.toml");

        let err = run(&config, 0, None).await.unwrap_err();

        assert!(err.to_string().contains("Run 'folio build' first"));
    }
}
