use crate::RuleSelection;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RUN_SEED: u64 = 0xC0FFEE;

/// Everything a [`crate::Run`] needs, passed in explicitly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunConfig {
    /// Iterations to prepare; each yields one game per selected rule-set.
    pub count: usize,
    pub selection: RuleSelection,
    /// Deal paired Normal/Reverse games from identical shuffles. Only used with `Both`.
    pub same_deck: bool,
    pub seed: u64,
}

impl RunConfig {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    pub fn with_selection(mut self, selection: RuleSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_same_deck(mut self, same_deck: bool) -> Self {
        self.same_deck = same_deck;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn pairs_decks(&self) -> bool {
        self.same_deck && self.selection == RuleSelection::Both
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            count: 1,
            selection: RuleSelection::Both,
            same_deck: false,
            seed: DEFAULT_RUN_SEED,
        }
    }
}
