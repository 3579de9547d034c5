//! Key events and the text form used by key scripts.

use crate::foundation::error::{SketchError, SketchResult};

/// Letter key identifiers. Only letters are bound by the bundled scenes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    A,
    B,
    E,
    F,
    Q,
    S,
    W,
    /// Any other letter, lower-cased.
    Other(char),
}

impl KeyCode {
    pub fn from_char(c: char) -> Option<Self> {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        Some(match c.to_ascii_lowercase() {
            'a' => Self::A,
            'b' => Self::B,
            'e' => Self::E,
            'f' => Self::F,
            'q' => Self::Q,
            's' => Self::S,
            'w' => Self::W,
            other => Self::Other(other),
        })
    }
}

/// A key-down event with the shift modifier state at the time of the press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: KeyCode) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: KeyCode) -> Self {
        Self { key, shift: true }
    }

    /// Parse one script token: `q` (plain), `Q` (shift held) or `shift+q`.
    pub fn parse(token: &str) -> SketchResult<Self> {
        let t = token.trim();
        let (forced_shift, rest) = match t.split_once('+') {
            Some((m, k)) if m.eq_ignore_ascii_case("shift") => (true, k),
            Some(_) => {
                return Err(SketchError::validation(format!(
                    "unknown modifier in key token '{t}'"
                )));
            }
            None => (false, t),
        };

        let mut chars = rest.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(SketchError::validation(format!(
                "key token '{t}' must name a single letter"
            )));
        };
        let key = KeyCode::from_char(c).ok_or_else(|| {
            SketchError::validation(format!("key token '{t}' is not a letter"))
        })?;
        Ok(Self {
            key,
            shift: forced_shift || c.is_ascii_uppercase(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/keys.rs"]
mod tests;
