//! Default codec backed by `serde-saphyr`.

use serde_saphyr::{DuplicateKeyPolicy, Options};

use super::emit::Emitter;
use super::{Codec, document_root, is_blank_document};
use crate::error::{DecodeError, EncodeError};
use crate::options::{BlendOptions, DuplicateKeys};
use crate::value::{Mapping, Scalar, Value};

/// Reads YAML with `serde-saphyr` and writes block-style YAML.
///
/// A string is written plain only when `serde-saphyr` reads that plain text
/// back as the same string, so values such as `"6443"`, `"yes"`, `"0600"`, or
/// `"1e3"` keep their quotes. Everything else is written plain.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaphyrCodec;

impl SaphyrCodec {
    /// Translate blend options into parser options.
    fn parser_options(options: &BlendOptions) -> Options {
        Options {
            strict_booleans: options.strict_booleans,
            duplicate_keys: match options.duplicate_keys {
                DuplicateKeys::Reject => DuplicateKeyPolicy::Error,
                // The ordered tree keeps every pair the parser hands over, so
                // skipping the duplicate check preserves all entries.
                DuplicateKeys::Tolerate => DuplicateKeyPolicy::LastWins,
            },
            ..Options::default()
        }
    }

    /// Whether `text`, written unquoted, decodes back to the same string.
    fn reads_back_as_string(text: &str) -> bool {
        matches!(
            serde_saphyr::from_str::<Value>(text),
            Ok(Value::Scalar(Scalar::String(parsed))) if parsed == text
        )
    }
}

impl Codec for SaphyrCodec {
    fn decode(&self, input: &[u8], options: &BlendOptions) -> Result<Mapping, DecodeError> {
        let text = std::str::from_utf8(input)?;
        if is_blank_document(text) {
            return Ok(Mapping::new());
        }
        let value: Value =
            serde_saphyr::from_str_with_options(text, Self::parser_options(options))
                .map_err(|err| DecodeError::syntax(err.to_string()))?;
        document_root(value)
    }

    fn encode(&self, mapping: &Mapping) -> Result<Vec<u8>, EncodeError> {
        Emitter::new(Self::reads_back_as_string)
            .document(mapping)
            .map(String::into_bytes)
    }
}
