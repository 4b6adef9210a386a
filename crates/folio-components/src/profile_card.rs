//! Author biography card.

use minijinja::{context, Value};

use crate::html::TrustedHtml;
use crate::metadata::{AvatarAsset, SiteMetadata};
use crate::style::{rhythm, AVATAR_MARGIN_RIGHT, CARD_MARGIN_BOTTOM};
use crate::templates::{RenderError, TemplateEngine, PROFILE_CARD};

/// Biography shown after the author's name.
pub const BIO: &str = "Computer Science PhD, passionate about Distributed Systems. \
Functional Programming Enthusiast. Krav Maga black belt.";

/// Avatar, biography and social links in a single row.
#[derive(Debug, Clone, Copy)]
pub struct ProfileCard<'a> {
    metadata: &'a SiteMetadata,
    avatar: &'a AvatarAsset,
}

impl<'a> ProfileCard<'a> {
    pub fn new(metadata: &'a SiteMetadata, avatar: &'a AvatarAsset) -> Self {
        Self { metadata, avatar }
    }

    /// Render the card. The result contains only escaped text, so it can be
    /// embedded into a page body as-is.
    pub fn render(&self, engine: &TemplateEngine) -> Result<TrustedHtml, RenderError> {
        let ctx = context! {
            author => &self.metadata.author,
            bio => BIO,
            avatar => Value::from_serialize(self.avatar),
            links => Value::from_serialize(self.metadata.social.links()),
            style => context! {
                card_margin_bottom => rhythm(CARD_MARGIN_BOTTOM),
                avatar_margin_right => rhythm(AVATAR_MARGIN_RIGHT),
            },
        };

        engine.render(PROFILE_CARD, ctx).map(TrustedHtml::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Social;

    fn metadata() -> SiteMetadata {
        SiteMetadata {
            author: "Elle".to_string(),
            social: Social {
                twitter: "elle_tw".to_string(),
                git_hub: "elle-gh".to_string(),
                linked_in: "elle-li".to_string(),
            },
        }
    }

    fn render(meta: &SiteMetadata, avatar: &AvatarAsset) -> String {
        ProfileCard::new(meta, avatar)
            .render(&TemplateEngine::new())
            .unwrap()
            .into_string()
    }

    #[test]
    fn renders_social_links_in_order() {
        let html = render(&metadata(), &AvatarAsset::fixed("/me.png"));

        let twitter = html
            .find(r#"<a href="https://twitter.com/elle_tw">Twitter</a>"#)
            .unwrap();
        let github = html
            .find(r#"<a href="https://github.com/elle-gh">GitHub</a>"#)
            .unwrap();
        let linkedin = html
            .find(r#"<a href="https://www.linkedin.com/in/elle-li">LinkedIn</a>"#)
            .unwrap();

        assert!(twitter < github && github < linkedin);
        assert!(html.contains("Twitter</a> | <a"));
        assert!(html.contains("GitHub</a> | <a"));
    }

    #[test]
    fn alt_text_is_author() {
        let html = render(&metadata(), &AvatarAsset::fixed("/me.png"));

        assert!(html.contains(r#"alt="Elle""#));
        assert!(html.contains("Powered by <strong>Elle</strong>."));
    }

    #[test]
    fn image_precedes_text_and_links() {
        let html = render(&metadata(), &AvatarAsset::fixed("/me.png"));

        let img = html.find("<img").unwrap();
        let text = html.find("Powered by").unwrap();
        let links = html.find("<a href").unwrap();

        assert!(img < text && text < links);
    }

    #[test]
    fn avatar_is_fixed_and_round() {
        let html = render(&metadata(), &AvatarAsset::fixed("/me.png"));

        assert!(html.contains(r#"src="/me.png""#));
        assert!(html.contains(r#"width="50" height="50""#));
        assert!(html.contains("min-width: 50px"));
        assert!(html.contains("border-radius: 100%"));
        assert!(html.contains("border-radius: 50%"));
        assert!(html.contains("margin-right: 0.875rem"));
        assert!(html.contains("display: flex; margin-bottom: 4.375rem"));
        assert!(!html.contains("srcset"));
    }

    #[test]
    fn includes_source_set_when_present() {
        let avatar = AvatarAsset::fixed("/me.png").with_src_set("/me.png 1x,\n/me@2x.png 2x");

        let html = render(&metadata(), &avatar);

        assert!(html.contains("srcset=\"/me.png 1x,\n/me@2x.png 2x\""));
    }

    #[test]
    fn renders_placeholder_before_image() {
        let avatar = AvatarAsset::fixed("/me.png").with_placeholder("data:image/png;base64,AAAA");

        let html = render(&metadata(), &avatar);

        let placeholder = html
            .find(r#"<img aria-hidden="true" src="data:image/png;base64,AAAA" alt="""#)
            .unwrap();
        let image = html.find(r#"<img src="/me.png""#).unwrap();
        assert!(placeholder < image);
        assert_eq!(html.matches("<img").count(), 2);
    }

    #[test]
    fn omits_placeholder_when_absent() {
        let html = render(&metadata(), &AvatarAsset::fixed("/me.png"));

        assert_eq!(html.matches("<img").count(), 1);
        assert!(!html.contains("aria-hidden"));
    }

    #[test]
    fn includes_fixed_biography() {
        let html = render(&metadata(), &AvatarAsset::default());

        assert!(html.contains(BIO));
    }

    #[test]
    fn missing_metadata_degrades() {
        let html = render(&SiteMetadata::default(), &AvatarAsset::default());

        assert!(html.contains(r#"alt="""#));
        assert!(html.contains(r#"href="https://twitter.com/""#));
        assert!(html.contains(r#"href="https://github.com/""#));
        assert!(html.contains(r#"href="https://www.linkedin.com/in/""#));
    }

    #[test]
    fn escapes_author_text() {
        let meta = SiteMetadata {
            author: "<Ada & Bob>".to_string(),
            ..Default::default()
        };

        let html = render(&meta, &AvatarAsset::default());

        assert!(html.contains(r#"alt="&lt;Ada &amp; Bob&gt;""#));
        assert!(!html.contains("<Ada"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let engine = TemplateEngine::new();
        let meta = metadata();
        let avatar = AvatarAsset::fixed("/me.png");
        let card = ProfileCard::new(&meta, &avatar);

        assert_eq!(card.render(&engine).unwrap(), card.render(&engine).unwrap());
    }
}
