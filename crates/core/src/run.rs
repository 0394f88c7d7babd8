use crate::{
    Deck, Game, GameError, OutcomeSink, RngState, RunConfig, RunStats, SinkError,
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("game count must be positive")]
    InvalidGameCount,
    #[error("stats need every game played ({played} of {total})")]
    Incomplete { played: usize, total: usize },
    #[error("game error: {0}")]
    Game(#[from] GameError),
}

/// Synchronous progress hooks, called between games.
pub trait RunObserver {
    fn on_prepared(&mut self, _iteration: usize, _total: usize) {}

    fn on_played(&mut self, _game: usize, _total: usize) {}
}

#[derive(Debug, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkFailure {
    /// Index of the game whose record failed; `None` for the final commit.
    pub game: Option<usize>,
    pub error: SinkError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub played: usize,
    pub sink_failures: Vec<SinkFailure>,
}

impl RunReport {
    pub fn persisted_cleanly(&self) -> bool {
        self.sink_failures.is_empty()
    }
}

#[derive(Debug)]
pub struct Run {
    config: RunConfig,
    id: Uuid,
    rng: RngState,
    games: Vec<Game>,
}

impl Run {
    pub fn new(config: RunConfig) -> Result<Self, RunError> {
        if config.count == 0 {
            return Err(RunError::InvalidGameCount);
        }
        let mut rng = RngState::from_seed(config.seed);
        let id = rng.next_uuid();
        Ok(Self {
            config,
            id,
            rng,
            games: Vec::new(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Builds one game per selected rule-set for each iteration. Runs once.
    pub fn prepare(&mut self, observer: &mut dyn RunObserver) {
        if !self.games.is_empty() {
            return;
        }
        let rule_sets = self.config.selection.rule_sets();
        let paired = self.config.pairs_decks();
        self.games.reserve(self.config.count * rule_sets.len());

        for iteration in 0..self.config.count {
            let shared = paired.then(|| Deck::shuffled(&mut self.rng));
            for &rule_set in rule_sets {
                let deck = match &shared {
                    Some(deck) => deck.clone(),
                    None => Deck::shuffled(&mut self.rng),
                };
                self.games.push(Game::from_full_deck(rule_set, self.id, deck));
            }
            observer.on_prepared(iteration + 1, self.config.count);
        }
        tracing::info!(
            run = %self.id,
            games = self.games.len(),
            rules = self.config.selection.label(),
            same_deck = paired,
            "run prepared"
        );
    }

    /// Plays every game in order, forwarding each outcome to `sink` as it lands.
    ///
    /// Sink failures are logged and returned in the report; they never stop the run.
    pub fn start(
        &mut self,
        mut sink: Option<&mut dyn OutcomeSink>,
        observer: &mut dyn RunObserver,
    ) -> Result<RunReport, RunError> {
        if self.games.is_empty() {
            self.prepare(observer);
        }
        let total = self.games.len();
        let mut report = RunReport::default();

        for (index, game) in self.games.iter_mut().enumerate() {
            game.play()?;
            report.played += 1;
            if let (Some(sink), Some(outcome)) = (sink.as_deref_mut(), game.outcome()) {
                if let Err(error) = sink.record(&outcome) {
                    tracing::warn!(game = index, %error, "outcome not persisted");
                    report.sink_failures.push(SinkFailure {
                        game: Some(index),
                        error,
                    });
                }
            }
            observer.on_played(index + 1, total);
        }

        if let Some(sink) = sink {
            if let Err(error) = sink.commit() {
                tracing::warn!(%error, "outcome commit failed");
                report.sink_failures.push(SinkFailure { game: None, error });
            }
        }
        tracing::info!(run = %self.id, played = report.played, "run complete");
        Ok(report)
    }

    /// Aggregates over the played games. Pure: repeated calls agree.
    pub fn stats(&self) -> Result<RunStats, RunError> {
        let records: Vec<_> = self.games.iter().filter_map(Game::outcome).collect();
        if records.len() != self.games.len() {
            return Err(RunError::Incomplete {
                played: records.len(),
                total: self.games.len(),
            });
        }
        Ok(RunStats::from_records(self.config.selection, &records))
    }
}
