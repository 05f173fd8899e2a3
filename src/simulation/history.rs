//! Bounded record of finished generations.

use std::collections::VecDeque;

use super::agent::Agent;

/// Outcome of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSummary {
    /// Generation number (starting at 1).
    pub generation: u32,
    /// Highest score reached.
    pub best_score: u32,
    /// Mean score over the population.
    pub mean_score: f32,
    /// Ticks the generation lasted.
    pub ticks: u64,
}

impl GenerationSummary {
    /// Summarises a finished pool of agents.
    pub fn from_pool(generation: u32, ticks: u64, pool: &[Agent]) -> Self {
        let best_score = pool.iter().map(|a| a.score).max().unwrap_or(0);
        let mean_score = if pool.is_empty() {
            0.0
        } else {
            pool.iter().map(|a| a.score as f32).sum::<f32>() / pool.len() as f32
        };

        Self {
            generation,
            best_score,
            mean_score,
            ticks,
        }
    }
}

/// Most recent generation summaries, oldest first.
#[derive(Debug, Clone)]
pub struct GenerationHistory {
    summaries: VecDeque<GenerationSummary>,
    max_len: usize,
}

impl GenerationHistory {
    /// Creates an empty history keeping at most `max_len` entries.
    pub fn new(max_len: usize) -> Self {
        Self {
            summaries: VecDeque::with_capacity(max_len),
            max_len,
        }
    }

    /// Appends a summary, dropping the oldest ones beyond capacity.
    pub fn record(&mut self, summary: GenerationSummary) {
        self.summaries.push_back(summary);

        while self.summaries.len() > self.max_len {
            self.summaries.pop_front();
        }
    }

    /// All kept summaries, oldest first.
    pub fn summaries(&self) -> &VecDeque<GenerationSummary> {
        &self.summaries
    }

    /// The latest summary.
    pub fn last(&self) -> Option<&GenerationSummary> {
        self.summaries.back()
    }

    /// Highest score over the kept summaries.
    pub fn best_ever(&self) -> u32 {
        self.summaries.iter().map(|s| s.best_score).max().unwrap_or(0)
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        self.summaries.clear();
    }
}
