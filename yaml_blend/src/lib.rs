//! Order-preserving structural merge of YAML documents.
//!
//! `yaml_blend` layers an override document onto a base template. Values in
//! the override replace values in the base wherever their key paths coincide,
//! nested mappings are merged recursively, and everything else in the base
//! (key order, untouched entries, sequences) is carried through unchanged.
//! Keys that exist only in the override are ignored: an override can tune the
//! settings a template declares but cannot introduce new ones.
//!
//! ```rust
//! let base = b"pack:\n  podCIDR: 192.168.0.0/16\n  debug: false\n";
//! let overrides = b"pack:\n  debug: true\n";
//! let merged = yaml_blend::blend(base, overrides)?;
//! assert!(String::from_utf8(merged)?.contains("debug: true"));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Parsing and serialisation are delegated to a [`Codec`]; the default
//! [`SaphyrCodec`] parses with `serde-saphyr` and writes block YAML, quoting
//! only strings that would not read back unchanged.

mod blend;
pub mod codec;
mod error;
mod merge;
mod options;
mod value;

pub use blend::{Blender, blend};
pub use codec::{Codec, SaphyrCodec};
pub use error::{BlendError, DecodeError, Document, EncodeError, ParseDuplicateKeysError, Phase};
pub use merge::{merge_mapping, merged, resolve_entry};
pub use options::{BlendOptions, DuplicateKeys};
pub use value::{Mapping, Scalar, Value, ValueKind};
