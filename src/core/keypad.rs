//! Numeric keypad buffer.
//!
//! The buffer holds the raw text being typed. Callers write the parsed value
//! back into the focused set after every edit, so an unparsable buffer clears
//! the field rather than leaving a stale value behind.

use super::phase::InputField;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a key press is ignored.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum KeypadError {
    #[error("Keypad input received while no field is being edited")]
    NotEditing,

    #[error("Key '{0}' is not a digit or decimal point")]
    InvalidKey(char),

    #[error("Decimal point is not allowed for reps")]
    DecimalNotAllowed,

    #[error("Buffer already contains a decimal point")]
    DuplicateDecimal,
}

/// Editable text for the focused field. `None` means nothing typed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeypadBuffer {
    text: Option<String>,
}

impl KeypadBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer, e.g. with a set's existing value.
    pub fn seed(&mut self, text: Option<String>) {
        self.text = text.filter(|t| !t.is_empty());
    }

    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none()
    }

    /// Append one key for `field`.
    ///
    /// An empty buffer or a lone `"0"` is replaced by the key instead of
    /// extended.
    pub fn append(&mut self, key: char, field: InputField) -> Result<(), KeypadError> {
        match key {
            '0'..='9' => {}
            '.' if field == InputField::Reps => return Err(KeypadError::DecimalNotAllowed),
            '.' if self.as_str().is_some_and(|t| t.contains('.')) => {
                return Err(KeypadError::DuplicateDecimal)
            }
            '.' => {}
            other => return Err(KeypadError::InvalidKey(other)),
        }

        match self.text.as_mut() {
            Some(text) if text != "0" => text.push(key),
            _ => self.text = Some(key.to_string()),
        }
        Ok(())
    }

    /// Drop the last character; a single remaining character clears the
    /// buffer entirely.
    pub fn backspace(&mut self) {
        match self.text.as_mut() {
            Some(text) if text.chars().count() > 1 => {
                text.pop();
            }
            _ => self.text = None,
        }
    }

    /// Buffer parsed as a weight.
    pub fn weight(&self) -> Option<f32> {
        self.as_str().and_then(|t| t.parse().ok())
    }

    /// Buffer parsed as a rep count.
    pub fn reps(&self) -> Option<u32> {
        self.as_str().and_then(|t| t.parse().ok())
    }
}
