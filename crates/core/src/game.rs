use crate::{
    Card, Deck, DeckError, Fingerprint, GameEvent, MatchKind, MatchSize, OutcomeRecord, RngState,
    RuleSet, DECK_SIZE,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Cards spanned by the lookback: the current card and the check card three below it.
pub const MATCH_SPAN: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("game has already been played")]
    AlreadyPlayed,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Undetermined,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FirstMatch {
    /// Hand length when the match was detected, before any discard.
    pub position: usize,
    pub kind: MatchKind,
}

#[derive(Debug, Clone)]
pub struct Game {
    rule_set: RuleSet,
    run_id: Uuid,
    deck: Deck,
    hand: Vec<Card>,
    status: GameStatus,
    cards_left: usize,
    first_match: Option<FirstMatch>,
    two_matches: u32,
    four_matches: u32,
    cards_discarded: u32,
    fingerprint: Fingerprint,
}

impl Game {
    /// Starts a game on `deck`, which must still hold all 52 cards.
    pub fn new(rule_set: RuleSet, run_id: Uuid, deck: Deck) -> Result<Self, DeckError> {
        if deck.len() != DECK_SIZE {
            return Err(DeckError::WrongSize(deck.len()));
        }
        Ok(Self::from_full_deck(rule_set, run_id, deck))
    }

    /// Callers guarantee a freshly built 52-card deck.
    pub(crate) fn from_full_deck(rule_set: RuleSet, run_id: Uuid, deck: Deck) -> Self {
        let cards_left = deck.len();
        Self {
            rule_set,
            run_id,
            deck,
            hand: Vec::with_capacity(cards_left),
            status: GameStatus::Undetermined,
            cards_left,
            first_match: None,
            two_matches: 0,
            four_matches: 0,
            cards_discarded: 0,
            fingerprint: Fingerprint::default(),
        }
    }

    pub fn shuffled(rule_set: RuleSet, run_id: Uuid, rng: &mut RngState) -> Self {
        Self::from_full_deck(rule_set, run_id, Deck::shuffled(rng))
    }

    /// Deals the whole deck through the draw/match/discard loop.
    ///
    /// A game plays once; a second call returns [`GameError::AlreadyPlayed`]
    /// and leaves the recorded outcome untouched.
    pub fn play(&mut self) -> Result<GameStatus, GameError> {
        if self.status != GameStatus::Undetermined {
            return Err(GameError::AlreadyPlayed);
        }
        let four_kind = self.rule_set.four_card_kind();
        let two_kind = self.rule_set.two_card_kind();
        let mut draw_needed = true;

        while !self.deck.is_empty() {
            if draw_needed {
                let Some(card) = self.deck.deal() else {
                    break;
                };
                self.hand.push(card);
                self.record(GameEvent::Drew { card });
            } else {
                draw_needed = true;
            }

            if self.hand.len() < MATCH_SPAN {
                continue;
            }

            let last = self.hand.len() - 1;
            let current = self.hand[last];
            let check = self.hand[last - 3];
            tracing::trace!(%current, %check, "checking");

            // Both tests read the same pair, taken before either discard.
            let four = four_kind.matches(&current, &check);
            let two = two_kind.matches(&current, &check);

            if four {
                self.register_match(MatchSize::Four, four_kind, current, check);
                self.hand.drain(last - 3..=last);
                draw_needed = true;
            }
            if two {
                self.register_match(MatchSize::Two, two_kind, current, check);
                // Stale tail index: after a four-card discard nothing is left there.
                if self.hand.len() > last {
                    self.hand.drain(last - 2..last);
                }
                draw_needed = false;
            }
        }

        self.cards_left = self.hand.len();
        self.status = if self.hand.is_empty() {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
        tracing::debug!(
            rules = %self.rule_set,
            status = ?self.status,
            cards_left = self.cards_left,
            fingerprint = %self.fingerprint,
            "game finished"
        );
        Ok(self.status)
    }

    fn register_match(&mut self, size: MatchSize, kind: MatchKind, current: Card, check: Card) {
        let hand_len = self.hand.len();
        if self.first_match.is_none() {
            self.first_match = Some(FirstMatch {
                position: hand_len,
                kind,
            });
        }
        match size {
            MatchSize::Two => self.two_matches += 1,
            MatchSize::Four => self.four_matches += 1,
        }
        self.cards_discarded += size.discarded() as u32;
        self.record(GameEvent::Matched {
            size,
            kind,
            current,
            check,
            hand_len,
        });
    }

    fn record(&mut self, event: GameEvent) {
        match &event {
            GameEvent::Drew { card } => {
                tracing::debug!(%card, hand = self.hand.len(), "draw");
            }
            GameEvent::Matched {
                size,
                kind,
                current,
                check,
                hand_len,
            } => {
                tracing::debug!(?size, ?kind, %current, %check, hand = hand_len, "match");
            }
        }
        self.fingerprint.push(&event);
    }

    pub fn rule_set(&self) -> RuleSet {
        self.rule_set
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_played(&self) -> bool {
        self.status != GameStatus::Undetermined
    }

    /// `None` until the game has been played.
    pub fn win(&self) -> Option<bool> {
        match self.status {
            GameStatus::Undetermined => None,
            GameStatus::Won => Some(true),
            GameStatus::Lost => Some(false),
        }
    }

    pub fn cards_left(&self) -> usize {
        self.cards_left
    }

    pub fn first_match(&self) -> Option<FirstMatch> {
        self.first_match
    }

    pub fn two_match_count(&self) -> u32 {
        self.two_matches
    }

    pub fn four_match_count(&self) -> u32 {
        self.four_matches
    }

    pub fn cards_discarded(&self) -> u32 {
        self.cards_discarded
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// The flat record handed to persistence, once the game is played.
    pub fn outcome(&self) -> Option<OutcomeRecord> {
        let win = self.win()?;
        Some(OutcomeRecord {
            rule_set: self.rule_set,
            win,
            cards_left: self.cards_left,
            four_match_count: self.four_matches,
            two_match_count: self.two_matches,
            first_match_kind: self.first_match.map(|first| first.kind),
            first_match_position: self.first_match.map_or(0, |first| first.position),
            fingerprint: self.fingerprint.clone(),
            run_id: self.run_id,
        })
    }
}
