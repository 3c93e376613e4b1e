use crate::core::geo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Raw input the viewer reacts to. Positions are screen pixels relative to the
/// drawing surface's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Scroll wheel step; positive zooms in
    Wheel { delta: f64, position: Point },
    /// Pointer motion since the previous move event
    PointerMove {
        position: Point,
        delta: Point,
        buttons: PointerButtons,
    },
    /// Drawing surface resized
    Resize { size: Size },
}

/// Which pointer buttons are held during a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerButtons {
    pub primary: bool,
    pub secondary: bool,
    pub middle: bool,
}

impl PointerButtons {
    pub const NONE: PointerButtons = PointerButtons {
        primary: false,
        secondary: false,
        middle: false,
    };

    pub const PRIMARY: PointerButtons = PointerButtons {
        primary: true,
        secondary: false,
        middle: false,
    };

    /// Decodes a DOM `MouseEvent.buttons` bitmask
    pub fn from_bits(bits: u16) -> Self {
        Self {
            primary: bits & 1 != 0,
            secondary: bits & 2 != 0,
            middle: bits & 4 != 0,
        }
    }
}

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

impl EventHandled {
    pub fn is_handled(self) -> bool {
        self == EventHandled::Handled
    }
}
