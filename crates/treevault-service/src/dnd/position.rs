//! Where a dragged node lands relative to the row under the pointer.

use std::fmt;
use std::str::FromStr;

use treevault_core::error::AppError;
use treevault_entity::NodeKind;

/// Where a dragged node lands relative to the hovered one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropPosition {
    /// Sibling directly above the target.
    Before,
    /// Sibling directly below the target.
    After,
    /// Last child of the target folder.
    Into,
}

impl DropPosition {
    /// Classify a pointer at `offset_y` inside an element of `height`.
    ///
    /// The top and bottom quarters always reorder. The middle half drops
    /// into folders; for files it splits at the midpoint.
    pub fn from_pointer(offset_y: f64, height: f64, target_kind: NodeKind) -> Self {
        if offset_y < height * 0.25 {
            Self::Before
        } else if offset_y > height * 0.75 {
            Self::After
        } else if target_kind == NodeKind::Folder {
            Self::Into
        } else if offset_y < height * 0.5 {
            Self::Before
        } else {
            Self::After
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::Into => "into",
        }
    }
}

impl fmt::Display for DropPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DropPosition {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "before" => Ok(Self::Before),
            "after" => Ok(Self::After),
            "into" => Ok(Self::Into),
            other => Err(AppError::validation(format!(
                "Unknown drop position '{other}', expected before, after or into"
            ))),
        }
    }
}
