//! Block-style writer for the ordered tree.
//!
//! Mappings nest by two spaces. Sequence items sit at the same column as the
//! key that owns them, and a mapping inside a sequence item starts on the
//! dash line. Strings stay plain when their plain form reads back as the same
//! string; otherwise they are double quoted, or single quoted when they
//! contain `"` or `\` and nothing that needs an escape.

use crate::error::EncodeError;
use crate::value::{Mapping, Scalar, Value};

const INDENT: usize = 2;

/// Characters that cannot open a plain scalar.
const INDICATORS: &[char] = &[
    '#', ',', '[', ']', '{', '}', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`',
];

/// Writes a [`Mapping`] as a block YAML document.
///
/// `reads_back_as_string` decides whether a string may be written plain: it
/// receives the candidate text and must return `true` only when the decoder
/// resolves that text, unquoted, to the identical string.
pub(super) struct Emitter<F> {
    out: String,
    reads_back_as_string: F,
}

impl<F: Fn(&str) -> bool> Emitter<F> {
    pub(super) const fn new(reads_back_as_string: F) -> Self {
        Self {
            out: String::new(),
            reads_back_as_string,
        }
    }

    /// Consume the emitter and return the document text.
    pub(super) fn document(mut self, mapping: &Mapping) -> Result<String, EncodeError> {
        if mapping.is_empty() {
            self.out.push_str("{}\n");
        } else {
            self.mapping(mapping, 0, false)?;
        }
        Ok(self.out)
    }

    fn mapping(
        &mut self,
        mapping: &Mapping,
        indent: usize,
        first_on_dash_line: bool,
    ) -> Result<(), EncodeError> {
        for (position, (key, value)) in mapping.iter().enumerate() {
            if position > 0 || !first_on_dash_line {
                self.pad(indent);
            }
            self.key(key)?;
            self.out.push(':');
            self.entry_value(value, indent)?;
        }
        Ok(())
    }

    fn entry_value(&mut self, value: &Value, indent: usize) -> Result<(), EncodeError> {
        match value {
            Value::Scalar(scalar) => {
                self.out.push(' ');
                self.scalar(scalar);
                self.out.push('\n');
            }
            Value::Mapping(nested) if nested.is_empty() => self.out.push_str(" {}\n"),
            Value::Mapping(nested) => {
                self.out.push('\n');
                self.mapping(nested, indent + INDENT, false)?;
            }
            Value::Sequence(items) if items.is_empty() => self.out.push_str(" []\n"),
            Value::Sequence(items) => {
                self.out.push('\n');
                self.sequence(items, indent)?;
            }
        }
        Ok(())
    }

    fn sequence(&mut self, items: &[Value], indent: usize) -> Result<(), EncodeError> {
        for item in items {
            self.pad(indent);
            self.out.push('-');
            match item {
                Value::Scalar(scalar) => {
                    self.out.push(' ');
                    self.scalar(scalar);
                    self.out.push('\n');
                }
                Value::Mapping(nested) if nested.is_empty() => self.out.push_str(" {}\n"),
                Value::Mapping(nested) => {
                    self.out.push(' ');
                    self.mapping(nested, indent + INDENT, true)?;
                }
                Value::Sequence(inner) if inner.is_empty() => self.out.push_str(" []\n"),
                Value::Sequence(inner) => {
                    self.out.push('\n');
                    self.sequence(inner, indent + INDENT)?;
                }
            }
        }
        Ok(())
    }

    fn key(&mut self, key: &Value) -> Result<(), EncodeError> {
        match key {
            Value::Scalar(scalar) => {
                self.scalar(scalar);
                Ok(())
            }
            other => Err(EncodeError::new(format!(
                "{} keys cannot be written in block style",
                other.kind()
            ))),
        }
    }

    fn scalar(&mut self, scalar: &Scalar) {
        match scalar {
            Scalar::Null => self.out.push_str("null"),
            Scalar::Bool(flag) => self.out.push_str(if *flag { "true" } else { "false" }),
            Scalar::Int(number) => self.out.push_str(&number.to_string()),
            Scalar::UInt(number) => self.out.push_str(&number.to_string()),
            Scalar::Float(number) => self.float(*number),
            Scalar::String(text) => self.string(text),
        }
    }

    fn float(&mut self, number: f64) {
        if number.is_nan() {
            self.out.push_str(".nan");
        } else if number.is_infinite() {
            self.out
                .push_str(if number.is_sign_negative() { "-.inf" } else { ".inf" });
        } else {
            // `Debug` keeps a fractional part or exponent, so `1.0` stays a float.
            self.out.push_str(&format!("{number:?}"));
        }
    }

    fn string(&mut self, text: &str) {
        if is_plain_safe(text) && (self.reads_back_as_string)(text) {
            self.out.push_str(text);
        } else if text.contains(['"', '\\']) && text.chars().all(is_printable) {
            self.single_quoted(text);
        } else {
            self.double_quoted(text);
        }
    }

    fn single_quoted(&mut self, text: &str) {
        self.out.push('\'');
        self.out.push_str(&text.replace('\'', "''"));
        self.out.push('\'');
    }

    fn double_quoted(&mut self, text: &str) {
        self.out.push('"');
        for ch in text.chars() {
            match ch {
                '"' => self.out.push_str("\\\""),
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\t' => self.out.push_str("\\t"),
                '\r' => self.out.push_str("\\r"),
                '\0' => self.out.push_str("\\0"),
                printable if is_printable(printable) => self.out.push(printable),
                escaped => self.out.push_str(&format!("\\u{:04X}", u32::from(escaped))),
            }
        }
        self.out.push('"');
    }

    fn pad(&mut self, indent: usize) {
        self.out.extend(std::iter::repeat_n(' ', indent));
    }
}

fn is_printable(ch: char) -> bool {
    !ch.is_control() && !matches!(ch, '\u{FEFF}' | '\u{2028}' | '\u{2029}')
}

/// Lexical check that `text` can appear unquoted as a block-context key or
/// value without changing the document structure.
fn is_plain_safe(text: &str) -> bool {
    let mut chars = text.chars();
    let (Some(first), last) = (chars.next(), text.chars().next_back()) else {
        return false;
    };
    let second = chars.next();
    if first.is_whitespace() || last.is_some_and(char::is_whitespace) {
        return false;
    }
    if INDICATORS.contains(&first) || text.starts_with("---") || text.starts_with("...") {
        return false;
    }
    if matches!(first, '-' | '?' | ':') && second.is_none_or(char::is_whitespace) {
        return false;
    }
    text.chars().all(is_printable)
        && !text.contains(": ")
        && !text.contains(" #")
        && !text.ends_with(':')
}
