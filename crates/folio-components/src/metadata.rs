//! Site metadata and avatar descriptors consumed by the profile card.
//!
//! Both are resolved by the caller before rendering. Every field has a
//! default, so a partially filled config still renders.

use serde::{Deserialize, Serialize};

use crate::style::AVATAR_SIZE;

const TWITTER_URL: &str = "https://twitter.com/";
const GITHUB_URL: &str = "https://github.com/";
const LINKEDIN_URL: &str = "https://www.linkedin.com/in/";

/// Site-wide metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMetadata {
    /// Author display name, also used as the avatar alt text
    pub author: String,

    /// Social handles
    pub social: Social,
}

/// Social network handles, without any URL prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Social {
    pub twitter: String,
    pub git_hub: String,
    pub linked_in: String,
}

/// A rendered social link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialLink {
    /// Anchor text
    pub label: &'static str,
    /// Link target
    pub href: String,
}

impl Social {
    /// Twitter, GitHub and LinkedIn links, in that order.
    ///
    /// Handles are interpolated as-is; an empty handle yields the bare prefix.
    pub fn links(&self) -> [SocialLink; 3] {
        [
            SocialLink {
                label: "Twitter",
                href: format!("{TWITTER_URL}{}", self.twitter),
            },
            SocialLink {
                label: "GitHub",
                href: format!("{GITHUB_URL}{}", self.git_hub),
            },
            SocialLink {
                label: "LinkedIn",
                href: format!("{LINKEDIN_URL}{}", self.linked_in),
            },
        ]
    }
}

/// A pre-processed, fixed-size image produced by an external image pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AvatarAsset {
    /// Image URL
    pub src: String,

    /// Responsive source set (e.g. `"/a.png 1x,\n/a@2x.png 2x"`)
    pub src_set: Option<String>,

    /// Inline low-resolution placeholder (a `data:` URI) shown until `src` loads
    pub base64: Option<String>,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

impl AvatarAsset {
    /// A 50x50 avatar served from `src`.
    pub fn fixed(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Default::default()
        }
    }

    pub fn with_src_set(mut self, src_set: impl Into<String>) -> Self {
        self.src_set = Some(src_set.into());
        self
    }

    pub fn with_placeholder(mut self, base64: impl Into<String>) -> Self {
        self.base64 = Some(base64.into());
        self
    }
}

impl Default for AvatarAsset {
    fn default() -> Self {
        Self {
            src: String::new(),
            src_set: None,
            base64: None,
            width: AVATAR_SIZE,
            height: AVATAR_SIZE,
        }
    }
}
