//! Stored parameters of the flying-star chart.
//!
//! Only the inputs live here. Deriving the chart numbers from them is done
//! by an external collaborator that reads these values without mutating them.

use serde::{Deserialize, Serialize};

/// Star numbers run 1..=9.
pub const MIN_STAR: u8 = 1;
pub const MAX_STAR: u8 = 9;

fn clamp_star(star: u8) -> u8 {
    star.clamp(MIN_STAR, MAX_STAR)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlackStars {
    pub start: u8,
}

impl Default for BlackStars {
    fn default() -> Self {
        Self { start: 5 }
    }
}

/// A star sequence that can fly forward or reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectedStars {
    pub start: u8,
    pub reversed: bool,
}

impl Default for DirectedStars {
    fn default() -> Self {
        Self {
            start: 5,
            reversed: false,
        }
    }
}

/// Annual (purple) stars. `offset` shifts the preview by whole years
/// relative to `calculated_at` and is never meant to outlive a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurpleStars {
    pub start: u8,
    /// Year the annual star was computed for.
    #[serde(alias = "calculatedAt")]
    pub calculated_at: Option<i32>,
    pub offset: i32,
}

impl Default for PurpleStars {
    fn default() -> Self {
        Self {
            start: 5,
            calculated_at: None,
            offset: 0,
        }
    }
}

impl PurpleStars {
    /// The year currently previewed.
    pub fn preview_year(&self) -> Option<i32> {
        self.calculated_at.map(|year| year + self.offset)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FengShuiParams {
    pub blacks: BlackStars,
    pub reds: DirectedStars,
    pub blues: DirectedStars,
    pub purples: PurpleStars,
}

impl FengShuiParams {
    /// Clamp every star number into 1..=9.
    pub fn normalized(mut self) -> Self {
        self.blacks.start = clamp_star(self.blacks.start);
        self.reds.start = clamp_star(self.reds.start);
        self.blues.start = clamp_star(self.blues.start);
        self.purples.start = clamp_star(self.purples.start);
        self
    }
}
