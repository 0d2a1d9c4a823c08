//! Print line items: the Text/Bitmap union queued for a print job.
//!
//! Items are appended to the queue owned by the driver and drained by
//! it during a print job (or dropped by `cleanCache`). Integer wire
//! encodings arrive from the command channel and are mapped here.

use image::DynamicImage;

use crate::error::{BridgeError, BridgeResult};

/// Horizontal placement of a line on the ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    Left,
    #[default]
    Center,
    Right,
}

impl Position {
    /// Map the channel's integer encoding (0 left, 1 center, 2 right).
    pub fn from_wire(value: i64) -> BridgeResult<Self> {
        match value {
            0 => Ok(Self::Left),
            1 => Ok(Self::Center),
            2 => Ok(Self::Right),
            other => Err(BridgeError::InvalidArgument {
                name: "position",
                message: format!("unknown position {}", other),
            }),
        }
    }
}

/// Character size of a text line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSize {
    Small,
    #[default]
    Normal,
    Large,
}

impl FontSize {
    /// Map the channel's integer encoding (0 small, 1 normal, 2 large).
    pub fn from_wire(value: i64) -> BridgeResult<Self> {
        match value {
            0 => Ok(Self::Small),
            1 => Ok(Self::Normal),
            2 => Ok(Self::Large),
            other => Err(BridgeError::InvalidArgument {
                name: "size",
                message: format!("unknown font size {}", other),
            }),
        }
    }
}

/// A styled text line queued for printing.
///
/// Defaults match the channel contract: centered, normal size, no
/// styling flags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextLine {
    pub content: String,
    pub position: Position,
    pub size: FontSize,
    pub bold: bool,
    pub italic: bool,
    pub invert: bool,
}

impl TextLine {
    /// A plain line with the given content and default styling.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}

/// One queued unit of output awaiting the next print job.
#[derive(Debug, Clone)]
pub enum PrintLine {
    /// A styled text line.
    Text(TextLine),
    /// A decoded bitmap.
    Bitmap {
        image: DynamicImage,
        position: Position,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wire_mapping() {
        assert_eq!(Position::from_wire(0).unwrap(), Position::Left);
        assert_eq!(Position::from_wire(1).unwrap(), Position::Center);
        assert_eq!(Position::from_wire(2).unwrap(), Position::Right);
    }

    #[test]
    fn test_position_rejects_unknown() {
        let err = Position::from_wire(7).unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_font_size_wire_mapping() {
        assert_eq!(FontSize::from_wire(0).unwrap(), FontSize::Small);
        assert_eq!(FontSize::from_wire(1).unwrap(), FontSize::Normal);
        assert_eq!(FontSize::from_wire(2).unwrap(), FontSize::Large);
        assert!(FontSize::from_wire(-1).is_err());
    }

    #[test]
    fn test_text_line_defaults() {
        let line = TextLine::new("hola");
        assert_eq!(line.content, "hola");
        assert_eq!(line.position, Position::Center);
        assert_eq!(line.size, FontSize::Normal);
        assert!(!line.bold);
        assert!(!line.italic);
        assert!(!line.invert);
    }
}
