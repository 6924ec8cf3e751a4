//! Finish order of a race
//!
//! Filled by the simulation step as balls cross the bottom of the world.

use serde::{Deserialize, Serialize};

use crate::sim::Ball;

/// A single finisher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishEntry {
    /// Ball number
    pub number: u32,
    /// Frame on which the ball crossed the finish
    pub tick: u64,
}

/// Finishers in the order they crossed the line
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Standings {
    entries: Vec<FinishEntry>,
}

impl Standings {
    /// Create an empty finish log
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a finisher. Returns the place achieved (1-indexed), or None if
    /// the ball was already recorded.
    pub fn record(&mut self, number: u32, tick: u64) -> Option<usize> {
        if self.rank_of(number).is_some() {
            return None;
        }
        self.entries.push(FinishEntry { number, tick });
        Some(self.entries.len())
    }

    /// Number of the first finisher
    pub fn winner(&self) -> Option<u32> {
        self.entries.first().map(|e| e.number)
    }

    /// Place of a ball (1-indexed), if it has finished
    pub fn rank_of(&self, number: u32) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.number == number)
            .map(|i| i + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[FinishEntry] {
        &self.entries
    }

    /// Ball numbers ordered for a live leaderboard: finishers by place, then
    /// everyone else by how far down the course they are.
    pub fn provisional(&self, balls: &[Ball]) -> Vec<u32> {
        let mut order: Vec<u32> = self.entries.iter().map(|e| e.number).collect();

        let mut racing: Vec<&Ball> = balls
            .iter()
            .filter(|b| self.rank_of(b.number).is_none())
            .collect();
        racing.sort_by(|a, b| b.pos.y.total_cmp(&a.pos.y));

        order.extend(racing.into_iter().map(|b| b.number));
        order
    }
}
