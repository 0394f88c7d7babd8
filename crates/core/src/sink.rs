use crate::{Fingerprint, MatchKind, RuleSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// One completed game, as handed to persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutcomeRecord {
    pub rule_set: RuleSet,
    pub win: bool,
    pub cards_left: usize,
    pub four_match_count: u32,
    pub two_match_count: u32,
    #[serde(default)]
    pub first_match_kind: Option<MatchKind>,
    /// 0 when the game had no match at all.
    pub first_match_position: usize,
    pub fingerprint: Fingerprint,
    pub run_id: Uuid,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SinkError {
    #[error("outcome store unavailable: {0}")]
    Unavailable(String),
    #[error("outcome write failed: {0}")]
    Write(String),
}

/// Receives each outcome as soon as its game finishes.
pub trait OutcomeSink {
    fn record(&mut self, outcome: &OutcomeRecord) -> Result<(), SinkError>;

    /// Called once after the last game of a run.
    fn commit(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Keeps outcomes in memory; also serves as the sink for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<OutcomeRecord>,
    pub commits: usize,
}

impl OutcomeSink for MemorySink {
    fn record(&mut self, outcome: &OutcomeRecord) -> Result<(), SinkError> {
        self.records.push(outcome.clone());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SinkError> {
        self.commits += 1;
        Ok(())
    }
}
