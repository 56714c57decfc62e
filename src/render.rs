//! Display rendering for reasons
//!
//! Every reason renders as its short type name followed by the labelled
//! pieces of information it carries:
//!
//! ```text
//! Error with Message='disk full', Metadata='[path, /tmp]'
//! ```
//!
//! Labels whose value renders empty are omitted, and several reasons are
//! joined with `"; "`. Rendering is only ever used for diagnostics
//! (`Display`, panic messages), never to decide control flow.
//!
//! # Examples
//!
//! ```
//! use causeway::render::ReasonFormatter;
//!
//! let text = ReasonFormatter::new("Error")
//!     .info("Message", "disk full")
//!     .info("Metadata", "")
//!     .build();
//!
//! assert_eq!(text, "Error with Message='disk full'");
//! ```

use std::fmt;

use crate::reason::Metadata;

/// Builder for the `TypeName with Label='value', ...` display form.
#[derive(Debug, Clone)]
pub struct ReasonFormatter {
    type_name: String,
    infos: Vec<String>,
}

impl ReasonFormatter {
    /// Start rendering a reason of the given type.
    pub fn new(type_name: impl Into<String>) -> Self {
        ReasonFormatter {
            type_name: type_name.into(),
            infos: Vec::new(),
        }
    }

    /// Add a labelled value. Skipped when the value renders empty.
    pub fn info(mut self, label: &str, value: impl fmt::Display) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.infos.push(format!("{}='{}'", label, value));
        }
        self
    }

    /// Produce the final string.
    pub fn build(self) -> String {
        if self.infos.is_empty() {
            self.type_name
        } else {
            format!("{} with {}", self.type_name, self.infos.join(", "))
        }
    }
}

/// Join already-displayable reasons with `"; "`.
///
/// # Examples
///
/// ```
/// use causeway::render::join_reasons;
///
/// assert_eq!(join_reasons(["a", "b"]), "a; b");
/// assert_eq!(join_reasons(Vec::<String>::new()), "");
/// ```
pub fn join_reasons<I>(reasons: I) -> String
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    reasons
        .into_iter()
        .map(|reason| reason.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Render a metadata map as `[key, value]` pairs joined with `"; "`.
pub fn render_metadata(metadata: &Metadata) -> String {
    metadata
        .iter()
        .map(|(key, value)| format!("[{}, {}]", key, value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Strip module paths and generic arguments from a `std::any::type_name`.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let base = match full.find('<') {
        Some(idx) => &full[..idx],
        None => full,
    };
    match base.rfind("::") {
        Some(idx) => &base[idx + 2..],
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reason::MetadataValue;

    #[test]
    fn test_type_name_only_when_no_infos() {
        assert_eq!(ReasonFormatter::new("Success").build(), "Success");
    }

    #[test]
    fn test_empty_values_are_omitted() {
        let text = ReasonFormatter::new("Error")
            .info("Message", "")
            .info("Metadata", "[a, 1]")
            .build();
        assert_eq!(text, "Error with Metadata='[a, 1]'");
    }

    #[test]
    fn test_infos_joined_with_comma() {
        let text = ReasonFormatter::new("Error")
            .info("Message", "boom")
            .info("Reasons", "Error with Message='inner'")
            .build();
        assert_eq!(
            text,
            "Error with Message='boom', Reasons='Error with Message='inner''"
        );
    }

    #[test]
    fn test_render_metadata_sorted_pairs() {
        let mut metadata = Metadata::new();
        metadata.insert("b".to_string(), MetadataValue::from(2));
        metadata.insert("a".to_string(), MetadataValue::from("x"));
        assert_eq!(render_metadata(&metadata), "[a, x]; [b, 2]");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("causeway::reason::Error"), "Error");
        assert_eq!(short_type_name("a::Wrapper<b::Inner>"), "Wrapper");
        assert_eq!(short_type_name("Plain"), "Plain");
    }
}
