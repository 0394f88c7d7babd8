use crate::{MatchKind, OutcomeRecord, RuleSelection, RuleSet};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("win rate undefined: no {rule_set} games")]
    DivisionUndefined { rule_set: RuleSet },
}

pub fn win_rate(rule_set: RuleSet, wins: usize, games: usize) -> Result<f64, StatsError> {
    if games == 0 {
        return Err(StatsError::DivisionUndefined { rule_set });
    }
    Ok(wins as f64 / games as f64)
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct FirstMatchKinds {
    pub rank: usize,
    pub suit: usize,
    pub none: usize,
}

/// Aggregates for one rule-set.
///
/// Min and max cards left range over every game, wins included. The average
/// covers losses only and is 0 when there were none.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RuleStats {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    /// Fraction of games won; `None` when there were no games.
    pub win_pct: Option<f64>,
    pub max_cards_left: usize,
    pub min_cards_left: usize,
    pub avg_cards_left: usize,
    pub cards_left_histogram: BTreeMap<usize, usize>,
    pub wins_by_first_match: BTreeMap<usize, usize>,
    pub first_match_kinds: FirstMatchKinds,
}

impl RuleStats {
    fn collect<'a>(rule_set: RuleSet, records: impl Iterator<Item = &'a OutcomeRecord>) -> Self {
        let mut stats = RuleStats::default();
        let mut loss_cards = 0usize;
        let mut min_cards: Option<usize> = None;

        for record in records.filter(|record| record.rule_set == rule_set) {
            stats.games += 1;
            if record.win {
                stats.wins += 1;
                *stats
                    .wins_by_first_match
                    .entry(record.first_match_position)
                    .or_default() += 1;
            } else {
                stats.losses += 1;
                loss_cards += record.cards_left;
            }
            stats.max_cards_left = stats.max_cards_left.max(record.cards_left);
            min_cards = Some(min_cards.map_or(record.cards_left, |min| min.min(record.cards_left)));
            *stats.cards_left_histogram.entry(record.cards_left).or_default() += 1;
            match record.first_match_kind {
                Some(MatchKind::Rank) => stats.first_match_kinds.rank += 1,
                Some(MatchKind::Suit) => stats.first_match_kinds.suit += 1,
                None => stats.first_match_kinds.none += 1,
            }
        }

        stats.min_cards_left = min_cards.unwrap_or(0);
        if stats.losses > 0 {
            stats.avg_cards_left = (loss_cards as f64 / stats.losses as f64).round() as usize;
        }
        stats.win_pct = match win_rate(rule_set, stats.wins, stats.games) {
            Ok(rate) => Some(rate),
            Err(err) => {
                tracing::debug!(%err, "win percentage not applicable");
                None
            }
        };
        stats
    }

    /// Win percentage with two decimals, or `n/a` without games.
    pub fn win_pct_label(&self) -> String {
        match self.win_pct {
            Some(rate) => format!("{:.2}%", rate * 100.0),
            None => "n/a".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunStats {
    pub rules: RuleSelection,
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub normal: RuleStats,
    pub reverse: RuleStats,
}

impl RunStats {
    pub fn from_records<'a, I>(rules: RuleSelection, records: I) -> Self
    where
        I: IntoIterator<Item = &'a OutcomeRecord>,
        I::IntoIter: Clone,
    {
        let records = records.into_iter();
        let normal = RuleStats::collect(RuleSet::Normal, records.clone());
        let reverse = RuleStats::collect(RuleSet::Reverse, records);
        Self {
            rules,
            games: normal.games + reverse.games,
            wins: normal.wins + reverse.wins,
            losses: normal.losses + reverse.losses,
            normal,
            reverse,
        }
    }

    pub fn for_rule_set(&self, rule_set: RuleSet) -> &RuleStats {
        match rule_set {
            RuleSet::Normal => &self.normal,
            RuleSet::Reverse => &self.reverse,
        }
    }
}
