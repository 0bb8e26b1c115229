//! Codecs translating between YAML bytes and the ordered tree.
//!
//! The merge walk only sees [`Mapping`] values. Everything about how text is
//! parsed and how scalars are quoted on output lives behind [`Codec`], so the
//! encoding policy can be swapped or pinned in tests without touching the
//! walk. [`SaphyrCodec`] decodes with `serde-saphyr` and writes through a
//! block emitter whose quoting is checked against that same decoder.

mod emit;
mod saphyr;

pub use saphyr::SaphyrCodec;

use crate::error::{DecodeError, EncodeError};
use crate::options::BlendOptions;
use crate::value::{Mapping, Scalar, Value};

/// Canonical encoding policy used by [`crate::Blender`].
pub trait Codec {
    /// Decode a document whose top level must be a mapping.
    ///
    /// Blank documents decode to an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when the bytes are not UTF-8, the document
    /// does not parse, or its top level is not a mapping.
    fn decode(&self, input: &[u8], options: &BlendOptions) -> Result<Mapping, DecodeError>;

    /// Encode a mapping, preserving its entry order.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] when the tree cannot be serialised.
    fn encode(&self, mapping: &Mapping) -> Result<Vec<u8>, EncodeError>;
}

impl<C: Codec + ?Sized> Codec for &C {
    fn decode(&self, input: &[u8], options: &BlendOptions) -> Result<Mapping, DecodeError> {
        (**self).decode(input, options)
    }

    fn encode(&self, mapping: &Mapping) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(mapping)
    }
}

/// Interpret a decoded value as a document root.
///
/// `null` roots become an empty mapping; scalars and sequences are rejected.
///
/// # Errors
///
/// Returns [`DecodeError::NotAMapping`] for non-mapping roots.
pub fn document_root(value: Value) -> Result<Mapping, DecodeError> {
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Scalar(Scalar::Null) => Ok(Mapping::new()),
        other => Err(DecodeError::NotAMapping {
            found: other.kind(),
        }),
    }
}

/// Whether `text` holds no YAML content at all.
///
/// Comments, blank lines, and document markers (with or without a trailing
/// comment) do not count as content.
#[must_use]
pub fn is_blank_document(text: &str) -> bool {
    text.lines().all(|line| {
        let content = without_comment(line.trim_end());
        content.trim_start().is_empty() || content == "---" || content == "..."
    })
}

/// Strip a `#` comment that starts the line or follows whitespace.
fn without_comment(line: &str) -> &str {
    line.char_indices()
        .find(|&(at, ch)| {
            ch == '#'
                && line
                    .get(..at)
                    .is_some_and(|head| head.is_empty() || head.ends_with(char::is_whitespace))
        })
        .and_then(|(at, _)| line.get(..at))
        .map_or(line, str::trim_end)
}

#[cfg(test)]
mod tests {
    use super::{document_root, is_blank_document};
    use crate::error::DecodeError;
    use crate::value::{Mapping, Scalar, Value, ValueKind};
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("\n\n")]
    #[case("# only a comment\n")]
    #[case("---\n# header\n...\n")]
    #[case("--- # header\n")]
    #[case("  # indented\n...\t# end\n")]
    fn blank_documents_are_detected(#[case] text: &str) {
        assert!(is_blank_document(text));
    }

    #[rstest]
    #[case("a: 1")]
    #[case("# comment\nkey: value\n")]
    #[case("--- []")]
    #[case("--- value # trailing\n")]
    #[case("  ---\n")]
    fn documents_with_content_are_not_blank(#[case] text: &str) {
        assert!(!is_blank_document(text));
    }

    #[rstest]
    fn null_root_is_an_empty_mapping() {
        let root = document_root(Value::Scalar(Scalar::Null)).expect("null root");
        assert_eq!(root, Mapping::new());
    }

    #[rstest]
    #[case(Value::from("text"), ValueKind::String)]
    #[case(Value::Sequence(vec![Value::from(1_i64)]), ValueKind::Sequence)]
    #[case(Value::from(true), ValueKind::Bool)]
    fn non_mapping_roots_are_rejected(#[case] value: Value, #[case] kind: ValueKind) {
        let err = document_root(value).expect_err("expected rejection");
        assert!(matches!(err, DecodeError::NotAMapping { found } if found == kind));
    }
}
