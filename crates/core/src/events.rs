use crate::{Card, MatchKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DRAW_SYMBOL: char = '.';

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchSize {
    Two,
    Four,
}

impl MatchSize {
    pub fn discarded(self) -> usize {
        match self {
            MatchSize::Two => 2,
            MatchSize::Four => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameEvent {
    Drew {
        card: Card,
    },
    Matched {
        size: MatchSize,
        kind: MatchKind,
        current: Card,
        check: Card,
        hand_len: usize,
    },
}

impl GameEvent {
    pub fn symbol(&self) -> char {
        match self {
            GameEvent::Drew { .. } => DRAW_SYMBOL,
            GameEvent::Matched { kind, .. } => kind.symbol(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid fingerprint symbol {symbol:?} at {index}")]
pub struct FingerprintError {
    pub symbol: char,
    pub index: usize,
}

/// Ordered trace of a game: `.` per draw, then `R` or `S` per match by kind.
///
/// The symbol records the kind of a match, never its size, so `R` can be a
/// four-card match under Normal rules or a two-card match under Reverse rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn push(&mut self, event: &GameEvent) {
        self.0.push(event.symbol());
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn draws(&self) -> usize {
        self.0.chars().filter(|&c| c == DRAW_SYMBOL).count()
    }

    pub fn matches(&self) -> usize {
        self.len() - self.draws()
    }

    pub fn match_kinds(&self) -> impl Iterator<Item = MatchKind> + '_ {
        self.0.chars().filter_map(MatchKind::from_symbol)
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for (index, symbol) in s.chars().enumerate() {
            if symbol != DRAW_SYMBOL && MatchKind::from_symbol(symbol).is_none() {
                return Err(FingerprintError { symbol, index });
            }
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = FingerprintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Fingerprint> for String {
    fn from(value: Fingerprint) -> Self {
        value.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rank, Suit};

    #[test]
    fn push_records_symbols_in_order() {
        let card = Card::new(Rank::Five, Suit::Clubs);
        let mut print = Fingerprint::default();
        print.push(&GameEvent::Drew { card });
        print.push(&GameEvent::Matched {
            size: MatchSize::Two,
            kind: MatchKind::Rank,
            current: card,
            check: card,
            hand_len: 4,
        });
        print.push(&GameEvent::Drew { card });
        assert_eq!(print.as_str(), ".R.");
        assert_eq!(print.draws(), 2);
        assert_eq!(print.matches(), 1);
    }

    #[test]
    fn parse_rejects_unknown_symbols() {
        assert!("..R.S".parse::<Fingerprint>().is_ok());
        assert_eq!(
            "..X".parse::<Fingerprint>(),
            Err(FingerprintError {
                symbol: 'X',
                index: 2
            })
        );
    }

    #[test]
    fn serde_goes_through_validation() {
        let print: Fingerprint = serde_json::from_str("\"..S\"").expect("valid");
        assert_eq!(print.match_kinds().collect::<Vec<_>>(), vec![MatchKind::Suit]);
        assert!(serde_json::from_str::<Fingerprint>("\"..s\"").is_err());
    }
}
