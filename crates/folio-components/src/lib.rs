//! Presentational components for the blog.
//!
//! Two independent, stateless renderers share one template engine:
//! [`ProfileCard`] renders the author's biography block and
//! [`DocumentShell`] wraps a pre-rendered page body in the outer HTML document.

pub mod document;
pub mod html;
pub mod metadata;
pub mod profile_card;
pub mod style;
pub mod templates;

pub use document::{Analytics, DocumentProps, DocumentShell};
pub use html::{Attributes, TrustedHtml};
pub use metadata::{AvatarAsset, SiteMetadata, Social, SocialLink};
pub use profile_card::ProfileCard;
pub use templates::{RenderError, TemplateEngine};
