//! Input entities: required parts and available stock pieces.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a part.
pub type PartId = String;

/// Identifier of a stock piece.
pub type StockId = String;

/// A required cut of a given length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Part {
    /// Unique identifier, stable for the part's lifetime.
    pub id: PartId,

    /// Length in millimeters.
    pub length: f64,

    /// Short human-readable label.
    pub name: String,
}

impl Part {
    /// Creates a new part. The name defaults to the ID.
    pub fn new(id: impl Into<PartId>, length: f64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            length,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A piece of raw material that parts are cut from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StockPiece {
    /// Unique identifier.
    pub id: StockId,

    /// Length in millimeters.
    pub length: f64,

    /// Whether the piece was added through the default-length shortcut.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_default: bool,
}

impl StockPiece {
    /// Creates a custom-length stock piece.
    pub fn new(id: impl Into<StockId>, length: f64) -> Self {
        Self {
            id: id.into(),
            length,
            is_default: false,
        }
    }

    /// Creates a stock piece flagged as default-length.
    pub fn default_length(id: impl Into<StockId>, length: f64) -> Self {
        Self {
            is_default: true,
            ..Self::new(id, length)
        }
    }
}
