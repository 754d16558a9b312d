use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::error::ModelError;

/// One of the two comparison sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Left,
    Right,
}

impl Slot {
    /// Both slots, left first. Per-render checks run in this order.
    pub const ALL: [Slot; 2] = [Slot::Left, Slot::Right];

    /// Returns the opposite side.
    pub fn other(self) -> Slot {
        match self {
            Slot::Left => Slot::Right,
            Slot::Right => Slot::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Left => "left",
            Slot::Right => "right",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" | "1" => Ok(Slot::Left),
            "right" | "r" | "2" => Ok(Slot::Right),
            _ => Err(ModelError::UnknownSlot(s.to_string())),
        }
    }
}

/// A value kept for each slot, addressable by [`Slot`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerSlot<T> {
    pub left: T,
    pub right: T,
}

impl<T> PerSlot<T> {
    pub fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    pub fn get(&self, slot: Slot) -> &T {
        match slot {
            Slot::Left => &self.left,
            Slot::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, slot: Slot) -> &mut T {
        match slot {
            Slot::Left => &mut self.left,
            Slot::Right => &mut self.right,
        }
    }

    /// Iterates `(slot, value)` pairs, left first.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &T)> {
        Slot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Slot, &T) -> U) -> PerSlot<U> {
        PerSlot {
            left: f(Slot::Left, &self.left),
            right: f(Slot::Right, &self.right),
        }
    }
}

impl<T> Index<Slot> for PerSlot<T> {
    type Output = T;

    fn index(&self, slot: Slot) -> &T {
        self.get(slot)
    }
}

impl<T> IndexMut<Slot> for PerSlot<T> {
    fn index_mut(&mut self, slot: Slot) -> &mut T {
        self.get_mut(slot)
    }
}
