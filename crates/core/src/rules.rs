use crate::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute compared by a match test. Also the fingerprint symbol of the match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatchKind {
    #[serde(rename = "R")]
    Rank,
    #[serde(rename = "S")]
    Suit,
}

impl MatchKind {
    pub fn matches(self, current: &Card, check: &Card) -> bool {
        match self {
            MatchKind::Rank => current.same_rank(check),
            MatchKind::Suit => current.same_suit(check),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            MatchKind::Rank => 'R',
            MatchKind::Suit => 'S',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'R' => Some(MatchKind::Rank),
            'S' => Some(MatchKind::Suit),
            _ => None,
        }
    }

    pub fn other(self) -> Self {
        match self {
            MatchKind::Rank => MatchKind::Suit,
            MatchKind::Suit => MatchKind::Rank,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleSet {
    Normal,
    Reverse,
}

impl RuleSet {
    pub const ALL: [RuleSet; 2] = [RuleSet::Normal, RuleSet::Reverse];

    /// Attribute whose match discards all four cards.
    pub fn four_card_kind(self) -> MatchKind {
        match self {
            RuleSet::Normal => MatchKind::Rank,
            RuleSet::Reverse => MatchKind::Suit,
        }
    }

    /// Attribute whose match discards the two cards between current and check.
    pub fn two_card_kind(self) -> MatchKind {
        self.four_card_kind().other()
    }

    pub fn label(self) -> &'static str {
        match self {
            RuleSet::Normal => "Normal",
            RuleSet::Reverse => "Reverse",
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum RuleSelection {
    Normal,
    Reverse,
    #[default]
    Both,
}

impl RuleSelection {
    pub fn from_flags(normal: bool, reverse: bool) -> Self {
        match (normal, reverse) {
            (true, false) => RuleSelection::Normal,
            (false, true) => RuleSelection::Reverse,
            _ => RuleSelection::Both,
        }
    }

    pub fn rule_sets(self) -> &'static [RuleSet] {
        match self {
            RuleSelection::Normal => &[RuleSet::Normal],
            RuleSelection::Reverse => &[RuleSet::Reverse],
            RuleSelection::Both => &RuleSet::ALL,
        }
    }

    pub fn includes(self, rule_set: RuleSet) -> bool {
        self.rule_sets().contains(&rule_set)
    }

    pub fn label(self) -> &'static str {
        match self {
            RuleSelection::Normal => "Normal",
            RuleSelection::Reverse => "Reverse",
            RuleSelection::Both => "Both",
        }
    }
}
