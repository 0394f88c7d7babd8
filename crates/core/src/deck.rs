use crate::{Card, Rank, RngState, Suit};
use std::collections::HashSet;
use thiserror::Error;

pub const DECK_SIZE: usize = 52;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("deck must hold 52 cards, got {0}")]
    WrongSize(usize),
    #[error("duplicate card {0} in deck")]
    Duplicate(Card),
}

/// Ordered cards still to be dealt. The top of the deck is the end of `draw`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    draw: Vec<Card>,
}

impl Deck {
    pub fn standard52() -> Self {
        let mut draw = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                draw.push(Card::new(rank, suit));
            }
        }
        Self { draw }
    }

    pub fn shuffled(rng: &mut RngState) -> Self {
        let mut deck = Self::standard52();
        deck.shuffle(rng);
        deck
    }

    /// Builds a deck from cards listed in deal order: `cards[0]` is dealt first.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.len() != DECK_SIZE {
            return Err(DeckError::WrongSize(cards.len()));
        }
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        for card in &cards {
            if !seen.insert(*card) {
                return Err(DeckError::Duplicate(*card));
            }
        }
        let mut draw = cards;
        draw.reverse();
        Ok(Self { draw })
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.draw);
    }

    /// Removes and returns the top card.
    pub fn deal(&mut self) -> Option<Card> {
        self.draw.pop()
    }

    pub fn len(&self) -> usize {
        self.draw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty()
    }

    /// Remaining cards in deal order.
    pub fn deal_order(&self) -> impl Iterator<Item = &Card> + '_ {
        self.draw.iter().rev()
    }
}
