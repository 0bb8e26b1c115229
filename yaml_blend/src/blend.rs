//! Decode, merge, and re-encode a base document with its override.

use crate::codec::{Codec, SaphyrCodec};
use crate::error::{BlendError, Document};
use crate::merge::merge_mapping;
use crate::options::BlendOptions;
use crate::value::Mapping;

/// Blend `overrides` onto `base` using default options and [`SaphyrCodec`].
///
/// Keys present only in `overrides` are ignored; the result has exactly the
/// keys of `base`, in the same order.
///
/// # Examples
///
/// ```rust
/// let base = b"server:\n  host: localhost\n  port: \"80\"\nname: demo\n";
/// let overrides = b"server:\n  port: \"8080\"\nextra: ignored\n";
/// let merged = yaml_blend::blend(base, overrides)?;
/// let text = String::from_utf8(merged)?;
/// assert!(text.contains("8080"));
/// assert!(!text.contains("extra"));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns a [`BlendError`] naming the failing phase when either document
/// cannot be decoded or the result cannot be encoded.
pub fn blend(base: &[u8], overrides: &[u8]) -> Result<Vec<u8>, BlendError> {
    Blender::new(BlendOptions::default()).blend(base, overrides)
}

/// Reusable blend pipeline with fixed options and codec.
///
/// A `Blender` holds no per-call state, so one instance can serve any number
/// of calls, including concurrent ones when the codec is `Sync`.
#[derive(Debug, Clone, Default)]
pub struct Blender<C = SaphyrCodec> {
    options: BlendOptions,
    codec: C,
}

impl Blender {
    /// Create a blender using [`SaphyrCodec`].
    #[must_use]
    pub const fn new(options: BlendOptions) -> Self {
        Self {
            options,
            codec: SaphyrCodec,
        }
    }
}

impl<C: Codec> Blender<C> {
    /// Create a blender with a custom codec.
    #[must_use]
    pub const fn with_codec(options: BlendOptions, codec: C) -> Self {
        Self { options, codec }
    }

    /// Options applied when decoding.
    #[must_use]
    pub const fn options(&self) -> &BlendOptions {
        &self.options
    }

    /// Decode one input document.
    ///
    /// # Errors
    ///
    /// Returns [`BlendError::Decode`] tagged with `document`.
    pub fn decode(&self, document: Document, input: &[u8]) -> Result<Mapping, BlendError> {
        tracing::debug!(%document, bytes = input.len(), "decoding document");
        self.codec
            .decode(input, &self.options)
            .map_err(|source| BlendError::decode(document, source))
    }

    /// Blend `overrides` onto `base`.
    ///
    /// # Errors
    ///
    /// Returns a [`BlendError`] when either document fails to decode or the
    /// merged tree fails to encode. No partial output is produced.
    pub fn blend(&self, base: &[u8], overrides: &[u8]) -> Result<Vec<u8>, BlendError> {
        let mut tree = self.decode(Document::Base, base)?;
        let overlay = self.decode(Document::Override, overrides)?;
        tracing::debug!(
            base_entries = tree.len(),
            override_entries = overlay.len(),
            "merging override into base"
        );
        merge_mapping(&mut tree, overlay);
        let encoded = self.codec.encode(&tree)?;
        tracing::debug!(bytes = encoded.len(), "encoded merged document");
        Ok(encoded)
    }
}
