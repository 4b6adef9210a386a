//! Static page assembly for the blog.
//!
//! Wraps pre-rendered page bodies in the document shell, adding the profile
//! card, and writes one HTML file per page.

pub mod builder;

pub use builder::{BuildConfig, BuildError, BuildResult, CardPlacement, StaticBuilder};
