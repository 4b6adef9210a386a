//! Markup primitives shared by the components.

use std::fmt;

use minijinja::Value;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Markup the caller vouches for.
///
/// Templates never escape a `TrustedHtml` value. Wrapping a string in this
/// type is the one place where escaping is skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    /// Mark `html` as safe to insert without escaping.
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Join fragments in order, separated by a newline.
    pub fn join<'a>(parts: impl IntoIterator<Item = &'a TrustedHtml>) -> Self {
        let parts: Vec<&str> = parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .map(TrustedHtml::as_str)
            .collect();
        Self(parts.join("\n"))
    }

    /// Template value that bypasses escaping.
    pub(crate) fn to_value(&self) -> Value {
        Value::from_safe_string(self.0.clone())
    }
}

impl fmt::Display for TrustedHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attribute names with a documented meaning on `<html>` and `<body>`.
///
/// Any other name is passed through untouched.
pub mod attr {
    pub const LANG: &str = "lang";
    pub const DIR: &str = "dir";
    pub const CLASS: &str = "class";
    pub const ID: &str = "id";
    pub const STYLE: &str = "style";
}

/// An ordered set of element attributes.
///
/// Entries keep insertion order. Inserting a name that is already present
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Builder form of [`Attributes::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn lang(self, lang: impl Into<String>) -> Self {
        self.with(attr::LANG, lang)
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.with(attr::CLASS, class)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first name that cannot appear in an HTML start tag, if any.
    pub fn invalid_name(&self) -> Option<&str> {
        self.entries
            .iter()
            .map(|(n, _)| n.as_str())
            .find(|n| !is_valid_attribute_name(n))
    }

    pub(crate) fn to_value(&self) -> Value {
        Value::from_serialize(&self.entries)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = Attributes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Attributes, A::Error> {
                let mut attrs = Attributes::new();
                while let Some((name, value)) = access.next_entry::<String, String>()? {
                    attrs.insert(name, value);
                }
                Ok(attrs)
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}

/// HTML attribute name syntax: non-empty, no whitespace, quotes, `>`, `/`,
/// `=` or control characters.
pub fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace()
                || c.is_control()
                || matches!(c, '"' | '\'' | '>' | '/' | '=' | '<')
        })
}

/// Write `text` with the five HTML-significant characters escaped.
pub fn write_escaped<W: fmt::Write>(out: &mut W, text: &str) -> fmt::Result {
    let mut last = 0;
    for (i, b) in text.bytes().enumerate() {
        let replacement = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        out.write_str(&text[last..i])?;
        out.write_str(replacement)?;
        last = i + 1;
    }
    out.write_str(&text[last..])
}
