//! The HTML document shell wrapped around every page.

use minijinja::{context, Value};
use serde::{Deserialize, Serialize};

use crate::html::{Attributes, TrustedHtml};
use crate::templates::{RenderError, TemplateEngine, DOCUMENT};

/// Per-page inputs to the document shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentProps {
    /// Attributes of the `<html>` element
    pub html_attributes: Attributes,

    /// Fragments appended to `<head>`, in order
    pub head_components: Vec<TrustedHtml>,

    /// Attributes of the `<body>` element
    pub body_attributes: Attributes,

    /// Fragments placed before the page container, in order
    pub pre_body_components: Vec<TrustedHtml>,

    /// Pre-rendered page content
    pub body: TrustedHtml,

    /// Fragments placed after the page container, in order
    pub post_body_components: Vec<TrustedHtml>,
}

impl DocumentProps {
    /// Props carrying only a page body.
    pub fn with_body(body: TrustedHtml) -> Self {
        Self {
            body,
            ..Default::default()
        }
    }
}

/// Visit counter settings for the inline tracking script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Analytics {
    /// Tracking endpoint, without query string
    pub endpoint: String,

    /// Account identifier sent as `user`
    pub user: String,

    /// Value sent as `utcoffset`
    pub utcoffset: String,
}

impl Default for Analytics {
    fn default() -> Self {
        Self {
            endpoint: "https://counter.dev/track".to_string(),
            user: "elleFlorio".to_string(),
            utcoffset: "1".to_string(),
        }
    }
}

impl Analytics {
    fn to_value(&self) -> Value {
        context! {
            url => format!("{}?", self.endpoint),
            user => &self.user,
            utcoffset => &self.utcoffset,
        }
    }
}

/// Renders the outer `<html>` document.
///
/// The `<head>` always starts with the charset, compatibility and viewport
/// meta tags, followed by the tracking script when analytics are configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentShell {
    analytics: Option<Analytics>,
}

impl DocumentShell {
    pub fn new(analytics: Option<Analytics>) -> Self {
        Self { analytics }
    }

    /// A shell that emits no tracking script.
    pub fn without_analytics() -> Self {
        Self { analytics: None }
    }

    /// Render a complete document for one page.
    pub fn render(
        &self,
        engine: &TemplateEngine,
        props: &DocumentProps,
    ) -> Result<String, RenderError> {
        for attrs in [&props.html_attributes, &props.body_attributes] {
            if let Some(name) = attrs.invalid_name() {
                return Err(RenderError::InvalidAttributeName(name.to_string()));
            }
        }

        let ctx = context! {
            html_attributes => props.html_attributes.to_value(),
            head_components => fragments(&props.head_components),
            body_attributes => props.body_attributes.to_value(),
            pre_body_components => fragments(&props.pre_body_components),
            body => props.body.to_value(),
            post_body_components => fragments(&props.post_body_components),
            analytics => self.analytics.as_ref().map(Analytics::to_value),
        };

        engine.render(DOCUMENT, ctx)
    }
}

impl Default for DocumentShell {
    fn default() -> Self {
        Self::new(Some(Analytics::default()))
    }
}

fn fragments(parts: &[TrustedHtml]) -> Value {
    Value::from(parts.iter().map(TrustedHtml::to_value).collect::<Vec<_>>())
}
