//! Template engine holding the component templates.

use minijinja::{Environment, Error, Output, State, Value};

use crate::html::write_escaped;

/// Name of the profile card template.
pub const PROFILE_CARD: &str = "profile_card.html";

/// Name of the document shell template.
pub const DOCUMENT: &str = "document.html";

/// Errors that can occur while rendering a component.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to render template: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Invalid attribute name: {0:?}")]
    InvalidAttributeName(String),
}

/// Template engine using minijinja.
///
/// Holds no per-render state; one engine can serve any number of renders,
/// including from several threads at once.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the component templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.set_formatter(escape_formatter);

        env.add_template(PROFILE_CARD, PROFILE_CARD_TEMPLATE)
            .expect("Failed to add profile card template");

        env.add_template(DOCUMENT, DOCUMENT_TEMPLATE)
            .expect("Failed to add document template");

        Self { env }
    }

    /// Render the named template with `context`.
    pub fn render(&self, template: &str, context: Value) -> Result<String, RenderError> {
        let tmpl = self.env.get_template(template)?;
        Ok(tmpl.render(context)?)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Escapes everything except safe strings.
///
/// minijinja's built-in HTML escaping also rewrites `/`, which would leave
/// `&#x2f;` in every URL.
fn escape_formatter(out: &mut Output<'_>, _state: &State<'_, '_>, value: &Value) -> Result<(), Error> {
    if value.is_undefined() || value.is_none() {
        return Ok(());
    }

    if value.is_safe() {
        write!(out, "{value}")?;
    } else if let Some(text) = value.as_str() {
        write_escaped(out, text)?;
    } else {
        write_escaped(out, &value.to_string())?;
    }

    Ok(())
}

const PROFILE_CARD_TEMPLATE: &str = r##"<div class="profile-card" style="display: flex; margin-bottom: {{ style.card_margin_bottom }}">
  <div class="profile-avatar" style="position: relative; overflow: hidden; display: inline-block; width: {{ avatar.width }}px; height: {{ avatar.height }}px; margin-right: {{ style.avatar_margin_right }}; margin-bottom: 0; min-width: {{ avatar.width }}px; border-radius: 100%">
    {%- if avatar.base64 %}
    <img aria-hidden="true" src="{{ avatar.base64 }}" alt="" style="position: absolute; top: 0; left: 0; width: 100%; height: 100%; object-fit: cover; object-position: center; opacity: 1; transition-delay: 500ms; border-radius: 50%">
    {%- endif %}
    <img src="{{ avatar.src }}"{% if avatar.srcSet %} srcset="{{ avatar.srcSet }}"{% endif %} width="{{ avatar.width }}" height="{{ avatar.height }}" alt="{{ author }}" style="position: absolute; top: 0; left: 0; width: 100%; height: 100%; object-fit: cover; object-position: center; border-radius: 50%">
  </div>
  <div class="profile-text">
    <p>Powered by <strong>{{ author }}</strong>. {{ bio }}</p>
    <p class="profile-links">
      {%- for link in links %}{% if not loop.first %} |{% endif %} <a href="{{ link.href }}">{{ link.label }}</a>{% endfor %}
    </p>
  </div>
</div>"##;

const DOCUMENT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html{% for name, value in html_attributes %} {{ name }}="{{ value }}"{% endfor %}>
<head>
<meta charset="utf-8">
<meta http-equiv="x-ua-compatible" content="ie=edge">
<meta name="viewport" content="width=device-width, initial-scale=1, shrink-to-fit=no">
{%- if analytics %}
<script>if(!sessionStorage.getItem("_swa")&&document.referrer.indexOf(location.protocol+"//"+location.host)!== 0){fetch({{ analytics.url|tojson }}+new URLSearchParams({referrer:document.referrer,screen:screen.width+"x"+screen.height,user:{{ analytics.user|tojson }},utcoffset:{{ analytics.utcoffset|tojson }}}))};sessionStorage.setItem("_swa","1");</script>
{%- endif %}
{%- for component in head_components %}
{{ component }}
{%- endfor %}
</head>
<body{% for name, value in body_attributes %} {{ name }}="{{ value }}"{% endfor %}>
{%- for component in pre_body_components %}
{{ component }}
{%- endfor %}
<div id="___gatsby">{{ body }}</div>
{%- for component in post_body_components %}
{{ component }}
{%- endfor %}
</body>
</html>"##;

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;
    use pretty_assertions::assert_eq;

    fn render_str(source: &str, ctx: Value) -> String {
        let mut env = Environment::new();
        env.set_formatter(escape_formatter);
        env.render_str(source, ctx).unwrap()
    }

    #[test]
    fn escapes_plain_strings() {
        let html = render_str("<b>{{ x }}</b>", context! { x => "<i>&</i>" });

        assert_eq!(html, "<b>&lt;i&gt;&amp;&lt;/i&gt;</b>");
    }

    #[test]
    fn passes_safe_strings_through() {
        let html = render_str(
            "<b>{{ x }}</b>",
            context! { x => Value::from_safe_string("<i>ok</i>".to_string()) },
        );

        assert_eq!(html, "<b><i>ok</i></b>");
    }

    #[test]
    fn renders_none_as_empty() {
        let html = render_str("[{{ x }}][{{ missing }}]", context! { x => () });

        assert_eq!(html, "[][]");
    }

    #[test]
    fn keeps_slashes_in_urls() {
        let html = render_str(
            r#"<a href="{{ url }}">"#,
            context! { url => "https://twitter.com/someone" },
        );

        assert_eq!(html, r#"<a href="https://twitter.com/someone">"#);
    }

    #[test]
    fn unknown_template_is_an_error() {
        let engine = TemplateEngine::new();

        let result = engine.render("nope.html", context! {});

        assert!(matches!(result, Err(RenderError::Template(_))));
    }
}
