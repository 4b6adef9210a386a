//! Static page builder.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::Deserialize;
use walkdir::WalkDir;

use folio_components::{
    Analytics, Attributes, AvatarAsset, DocumentProps, DocumentShell, ProfileCard, SiteMetadata,
    TemplateEngine, TrustedHtml,
};

/// Where the profile card goes in each page body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardPlacement {
    /// Before the page content
    Top,
    /// After the page content
    #[default]
    Bottom,
    /// Not rendered
    None,
}

/// Configuration for building the site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory of pre-rendered page bodies
    pub pages_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Author and social handles
    pub metadata: SiteMetadata,

    /// Profile picture
    pub avatar: AvatarAsset,

    /// Tracking script settings, `None` to omit the script
    pub analytics: Option<Analytics>,

    /// Attributes of every `<html>` element
    pub html_attributes: Attributes,

    /// Attributes of every `<body>` element
    pub body_attributes: Attributes,

    /// Fragments appended to every `<head>`
    pub head_components: Vec<TrustedHtml>,

    /// Fragments placed before every page container
    pub pre_body_components: Vec<TrustedHtml>,

    /// Fragments placed after every page container
    pub post_body_components: Vec<TrustedHtml>,

    /// Profile card position
    pub profile_card: CardPlacement,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            pages_dir: PathBuf::from("pages"),
            output_dir: PathBuf::from("dist"),
            metadata: SiteMetadata::default(),
            avatar: AvatarAsset::default(),
            analytics: Some(Analytics::default()),
            html_attributes: Attributes::default(),
            body_attributes: Attributes::default(),
            head_components: vec![],
            pre_body_components: vec![],
            post_body_components: vec![],
            profile_card: CardPlacement::default(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read pages: {0}")]
    ReadError(String),

    #[error("Failed to render {path}: {message}")]
    RenderError { path: String, message: String },

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A page to be built.
#[derive(Debug)]
struct PageInfo {
    /// Relative path from the pages dir
    relative_path: PathBuf,

    /// Output path
    output_path: PathBuf,

    /// Pre-rendered content
    body: TrustedHtml,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    shell: DocumentShell,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        let shell = DocumentShell::new(config.analytics.clone());

        Self {
            config,
            shell,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let pages = self.discover_pages()?;
        tracing::info!(
            "Found {} pages in {}",
            pages.len(),
            self.config.pages_dir.display()
        );

        // The card depends only on site data, so render it once
        let card = match self.config.profile_card {
            CardPlacement::None => None,
            _ => Some(
                ProfileCard::new(&self.config.metadata, &self.config.avatar)
                    .render(&self.templates)
                    .map_err(|e| BuildError::RenderError {
                        path: "profile card".to_string(),
                        message: e.to_string(),
                    })?,
            ),
        };

        let results: Vec<Result<(), BuildError>> = pages
            .par_iter()
            .map(|page| self.build_page(page, card.as_ref()))
            .collect();

        for result in results {
            result?;
        }

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: pages.len(),
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Discover all HTML fragments in the pages directory, sorted by path.
    fn discover_pages(&self) -> Result<Vec<PageInfo>, BuildError> {
        let mut pages = Vec::new();

        if !self.config.pages_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Pages directory not found: {}",
                self.config.pages_dir.display()
            )));
        }

        for entry in WalkDir::new(&self.config.pages_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
        {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "html" && ext != "htm" {
                tracing::warn!("Skipping non-HTML file {}", path.display());
                continue;
            }

            let content = fs::read_to_string(path)
                .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

            let relative_path = path
                .strip_prefix(&self.config.pages_dir)
                .unwrap_or(path)
                .to_path_buf();

            let output_path = output_path(&self.config.output_dir, &relative_path);

            pages.push(PageInfo {
                relative_path,
                output_path,
                body: TrustedHtml::new(content),
            });
        }

        pages.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        check_output_collisions(&pages)?;

        Ok(pages)
    }

    /// Build a single page.
    fn build_page(&self, page: &PageInfo, card: Option<&TrustedHtml>) -> Result<(), BuildError> {
        let props = DocumentProps {
            html_attributes: self.config.html_attributes.clone(),
            head_components: self.config.head_components.clone(),
            body_attributes: self.config.body_attributes.clone(),
            pre_body_components: self.config.pre_body_components.clone(),
            body: compose_body(&page.body, card, self.config.profile_card),
            post_body_components: self.config.post_body_components.clone(),
        };

        let html = self
            .shell
            .render(&self.templates, &props)
            .map_err(|e| BuildError::RenderError {
                path: page.relative_path.display().to_string(),
                message: e.to_string(),
            })?;

        if let Some(parent) = page.output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(&page.output_path, html).map_err(|e| BuildError::WriteError(e.to_string()))?;

        tracing::debug!(
            "Wrote {} -> {}",
            page.relative_path.display(),
            page.output_path.display()
        );

        Ok(())
    }
}

/// Map a page fragment to its output file.
///
/// `index.html` keeps its directory; any other page gets a directory of its
/// own so URLs end in `/`.
fn output_path(output_dir: &Path, relative: &Path) -> PathBuf {
    let stem = relative
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("index");
    let parent = relative.parent().unwrap_or(Path::new(""));

    if stem == "index" {
        // pages/index.html -> dist/index.html
        output_dir.join(parent).join("index.html")
    } else {
        // pages/post.html -> dist/post/index.html
        output_dir.join(parent).join(stem).join("index.html")
    }
}

/// Fail if two pages would be written to the same file.
fn check_output_collisions(pages: &[PageInfo]) -> Result<(), BuildError> {
    let mut seen: HashMap<&Path, &Path> = HashMap::new();

    for page in pages {
        if let Some(first) = seen.insert(&page.output_path, &page.relative_path) {
            return Err(BuildError::ReadError(format!(
                "{} and {} both render to {}",
                first.display(),
                page.relative_path.display(),
                page.output_path.display()
            )));
        }
    }

    Ok(())
}

/// Place the profile card around the page content.
fn compose_body(
    content: &TrustedHtml,
    card: Option<&TrustedHtml>,
    placement: CardPlacement,
) -> TrustedHtml {
    match (card, placement) {
        (Some(card), CardPlacement::Top) => TrustedHtml::join([card, content]),
        (Some(card), CardPlacement::Bottom) => TrustedHtml::join([content, card]),
        _ => content.clone(),
    }
}
