use serde::{Deserialize, Serialize};

/// 1-based tab position as used by the public API.
///
/// Zero and missing values mean the first tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(u32);

impl Position {
    pub const FIRST: Position = Position(1);

    pub fn from_one_based(value: u32) -> Self {
        Position(value.max(1))
    }

    pub fn from_index(index: usize) -> Self {
        Position(index as u32 + 1)
    }

    /// Optional position coming from an API call without an argument.
    pub fn or_first(value: Option<u32>) -> Self {
        value.map(Self::from_one_based).unwrap_or(Self::FIRST)
    }

    pub fn get(self) -> u32 {
        self.0.max(1)
    }

    /// 0-based index used internally.
    pub fn index(self) -> usize {
        self.get() as usize - 1
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::FIRST
    }
}

impl From<u32> for Position {
    fn from(value: u32) -> Self {
        Self::from_one_based(value)
    }
}
