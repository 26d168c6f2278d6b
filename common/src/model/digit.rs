use serde::{Deserialize, Serialize};

/// Character class accepted by one digit-block cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharType {
    Digit,
    Letter,
    Any,
}

impl CharType {
    /// Whether `ch` may be typed into a cell of this class.
    pub fn accepts(self, ch: char) -> bool {
        match self {
            CharType::Digit => ch.is_ascii_digit(),
            CharType::Letter => ch.is_ascii_alphabetic(),
            CharType::Any => !ch.is_control(),
        }
    }
}

/// One run of a parsed digit format such as `"XX-X-XXX"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DigitSegment {
    /// `length` consecutive input cells of one class.
    Input {
        #[serde(rename = "charType")]
        char_type: CharType,
        length: usize,
    },
    /// Literal text inserted verbatim on encode and stripped on decode.
    Separator { text: String },
}

impl DigitSegment {
    pub fn is_input(&self) -> bool {
        matches!(self, DigitSegment::Input { .. })
    }

    /// Number of characters this segment occupies in an encoded value.
    pub fn length(&self) -> usize {
        match self {
            DigitSegment::Input { length, .. } => *length,
            DigitSegment::Separator { text } => text.chars().count(),
        }
    }
}
