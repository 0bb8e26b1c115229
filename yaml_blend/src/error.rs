//! Error types produced while blending documents.

use thiserror::Error;

use std::error::Error as StdError;
use std::fmt;

use crate::value::ValueKind;

/// Which input document an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    /// The template being overridden.
    Base,
    /// The document whose values take precedence.
    Override,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Base => "base",
            Self::Override => "override",
        })
    }
}

/// The step of a blend that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Decoding the base document.
    DecodeBase,
    /// Decoding the override document.
    DecodeOverride,
    /// Encoding the merged result.
    EncodeResult,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DecodeBase => "decode-base",
            Self::DecodeOverride => "decode-override",
            Self::EncodeResult => "encode-result",
        })
    }
}

/// Errors returned by [`crate::blend`] and [`crate::Blender::blend`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BlendError {
    /// One of the input documents could not be decoded.
    #[error("failed to decode {document} document: {source}")]
    Decode {
        /// Document that failed to decode.
        document: Document,
        /// Underlying codec failure.
        #[source]
        source: DecodeError,
    },

    /// The merged tree could not be encoded.
    #[error("failed to encode merged document: {0}")]
    Encode(#[from] EncodeError),
}

impl BlendError {
    /// Reports the phase that failed.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self {
            Self::Decode {
                document: Document::Base,
                ..
            } => Phase::DecodeBase,
            Self::Decode {
                document: Document::Override,
                ..
            } => Phase::DecodeOverride,
            Self::Encode(_) => Phase::EncodeResult,
        }
    }

    pub(crate) const fn decode(document: Document, source: DecodeError) -> Self {
        Self::Decode { document, source }
    }
}

/// Failures raised while turning bytes into a [`crate::Mapping`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The input bytes are not UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The codec rejected the document.
    #[error("{0}")]
    Syntax(#[source] Box<dyn StdError + Send + Sync>),

    /// The document parsed but its top level is not a mapping.
    #[error("top-level value must be a mapping, found {found}")]
    NotAMapping {
        /// Kind of value found at the top level.
        found: ValueKind,
    },
}

impl DecodeError {
    /// Wraps a codec diagnostic as [`DecodeError::Syntax`].
    pub fn syntax(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Syntax(err.into())
    }
}

/// The codec could not serialise the merged tree.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct EncodeError {
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl EncodeError {
    /// Wraps a codec diagnostic.
    pub fn new(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self { source: err.into() }
    }
}

/// Error returned when parsing a [`crate::DuplicateKeys`] policy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown duplicate key policy '{value}'; expected 'reject' or 'tolerate'")]
pub struct ParseDuplicateKeysError {
    /// The rejected input.
    pub value: String,
}
