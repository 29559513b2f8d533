//! Four-piece heart puzzle that fills in as quest stages complete.
//!
//! The page injects a `questProgress` snapshot; [`HeartPuzzle`] turns it into a
//! filled-piece count, the optional highlight of the newest piece, and (once all
//! four are in) the schedule for the unlock overlay.

use std::fmt;

use serde::Deserialize;

mod dom;
pub mod geometry;
pub mod overlay;

pub use dom::{mount, update_progress};
pub use overlay::{OverlayEffect, OverlayState, OverlayStep, UnlockOverlay};

pub const PIECE_COUNT: usize = 4;

pub const HIGHLIGHT_DELAY_MS: u32 = 300;
pub const FILL_ANIMATION_MS: u32 = 1200;
pub const UNLOCK_AFTER_INIT_MS: u32 = 800;
pub const UNLOCK_AFTER_UPDATE_MS: u32 = 1500;

pub fn progress_label(filled: usize) -> String {
    format!("{filled}/{PIECE_COUNT} pieces")
}

/// Server-rendered quest state. Keys missing from the page object read as `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestProgress {
    pub journey_started: bool,
    pub bitwise_puzzle_completed: bool,
    pub base64_puzzle_completed: bool,
    pub ascii_puzzle_completed: bool,
    pub api_puzzle_completed: bool,
}

impl QuestProgress {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn stages(&self) -> [bool; PIECE_COUNT] {
        [
            self.bitwise_puzzle_completed,
            self.base64_puzzle_completed,
            self.ascii_puzzle_completed,
            self.api_puzzle_completed,
        ]
    }

    pub fn completed_count(&self) -> usize {
        self.stages().iter().filter(|done| **done).count()
    }

    pub fn all_completed(&self) -> bool {
        self.stages().iter().all(|done| *done)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PuzzleError {
    CountOutOfRange(u32),
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::CountOutOfRange(n) => {
                write!(f, "heart progress {n} is outside 0..={PIECE_COUNT}")
            }
        }
    }
}

impl std::error::Error for PuzzleError {}

/// What the page should do right after building the puzzle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleInit {
    pub filled: usize,
    pub markup: String,
    /// Newest filled piece to flash, only while the heart is incomplete.
    pub highlight: Option<usize>,
    pub unlock_after_ms: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Piece to animate from unfilled to filled.
    pub fill_piece: Option<usize>,
    pub label: String,
    pub unlock_after_ms: Option<u32>,
}

#[derive(Debug, Default)]
pub struct HeartPuzzle {
    filled: [bool; PIECE_COUNT],
}

impl HeartPuzzle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_filled(&self, idx: usize) -> bool {
        self.filled.get(idx).copied().unwrap_or(false)
    }

    pub fn initialize(&mut self, progress: &QuestProgress) -> PuzzleInit {
        let filled = progress.completed_count();
        for (i, slot) in self.filled.iter_mut().enumerate() {
            *slot = i < filled;
        }
        let highlight = (filled > 0 && filled < PIECE_COUNT).then(|| filled - 1);
        PuzzleInit {
            filled,
            markup: geometry::puzzle_markup(filled),
            highlight,
            unlock_after_ms: unlock_delay(filled, UNLOCK_AFTER_INIT_MS),
        }
    }

    /// Progress changed without a reload.
    pub fn update_progress(&mut self, count: u32) -> Result<ProgressUpdate, PuzzleError> {
        if count as usize > PIECE_COUNT {
            return Err(PuzzleError::CountOutOfRange(count));
        }
        let count = count as usize;
        let fill_piece = match count {
            0 => None,
            n if !self.filled[n - 1] => {
                self.filled[n - 1] = true;
                Some(n - 1)
            }
            _ => None,
        };
        Ok(ProgressUpdate {
            fill_piece,
            label: progress_label(count),
            unlock_after_ms: unlock_delay(count, UNLOCK_AFTER_UPDATE_MS),
        })
    }
}

// Every report of a full heart schedules the overlay; the page builds it once.
fn unlock_delay(count: usize, delay_ms: u32) -> Option<u32> {
    (count == PIECE_COUNT).then_some(delay_ms)
}
