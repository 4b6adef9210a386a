//! Site configuration file (site.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use folio_components::{Analytics, Attributes, AvatarAsset, SiteMetadata, TrustedHtml};
use folio_static::{BuildConfig, CardPlacement};
use serde::Deserialize;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteMetadata,
    #[serde(default)]
    pub avatar: AvatarAsset,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(flatten)]
    pub settings: Analytics,
}

#[derive(Debug, Deserialize, Default)]
pub struct DocumentConfig {
    #[serde(default)]
    pub html_attributes: Attributes,
    #[serde(default)]
    pub body_attributes: Attributes,
    #[serde(default)]
    pub head: Vec<TrustedHtml>,
    #[serde(default)]
    pub pre_body: Vec<TrustedHtml>,
    #[serde(default)]
    pub post_body: Vec<TrustedHtml>,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_pages")]
    pub pages: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default)]
    pub profile_card: CardPlacement,
}

fn default_true() -> bool {
    true
}
fn default_pages() -> String {
    "pages".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            settings: Analytics::default(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            pages: default_pages(),
            output: default_output(),
            profile_card: CardPlacement::default(),
        }
    }
}

impl ConfigFile {
    /// Turn the file into a builder config.
    ///
    /// Relative paths are resolved against `root`, the directory holding the
    /// config file. An explicit `output` is used as given.
    pub fn into_build_config(self, root: &Path, output: Option<PathBuf>) -> BuildConfig {
        BuildConfig {
            pages_dir: root.join(&self.build.pages),
            output_dir: output.unwrap_or_else(|| root.join(&self.build.output)),
            metadata: self.site,
            avatar: self.avatar,
            analytics: self
                .analytics
                .enabled
                .then_some(self.analytics.settings),
            html_attributes: self.document.html_attributes,
            body_attributes: self.document.body_attributes,
            head_components: self.document.head,
            pre_body_components: self.document.pre_body,
            post_body_components: self.document.post_body,
            profile_card: self.build.profile_card,
        }
    }
}

/// Directory that relative paths in the config file are resolved against.
pub fn config_root(config_path: &Path) -> &Path {
    config_path.parent().unwrap_or(Path::new(""))
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = parse_config(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    tracing::warn!("{} not found, using defaults", path.display());
    Ok(ConfigFile::default())
}

fn parse_config(content: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(content)?)
}
