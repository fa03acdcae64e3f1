//! Run score

use serde::{Deserialize, Serialize};

use super::state::GameEvent;

/// Goals passed this run. Every change is mirrored to the score label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTracker {
    points: u32,
}

impl ScoreTracker {
    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn increment(&mut self, events: &mut Vec<GameEvent>) {
        self.points += 1;
        events.push(GameEvent::ScoreChanged(self.points));
    }

    /// Only called while building a new run
    pub fn reset(&mut self, events: &mut Vec<GameEvent>) {
        self.points = 0;
        events.push(GameEvent::ScoreChanged(0));
    }
}
