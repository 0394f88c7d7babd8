use onehand_core::{
    Card, Deck, DeckError, Game, GameStatus, MatchKind, Rank, RngState, RuleSet, Suit, DECK_SIZE,
};
use uuid::Uuid;

/// Deal order where no card shares rank or suit with the card three before it.
fn no_match_order() -> Vec<Card> {
    (0..DECK_SIZE)
        .map(|i| {
            let suit = Suit::ALL[i % 4];
            let rank = Rank::ALL[(i / 4 + 2 * (i % 4)) % 13];
            Card::new(rank, suit)
        })
        .collect()
}

/// `prefix` first, then every other card in a fixed order.
fn deck_starting_with(prefix: &[Card]) -> Deck {
    let mut cards = prefix.to_vec();
    cards.extend(no_match_order().into_iter().filter(|card| !prefix.contains(card)));
    Deck::from_cards(cards).expect("valid deck")
}

fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

fn played(rule_set: RuleSet, deck: Deck) -> Game {
    let mut game = Game::new(rule_set, Uuid::nil(), deck).expect("full deck");
    game.play().expect("play");
    game
}

#[test]
fn deck_without_matches_only_draws() {
    for rule_set in RuleSet::ALL {
        let deck = Deck::from_cards(no_match_order()).expect("deck");
        let game = played(rule_set, deck);
        assert_eq!(game.fingerprint().as_str(), ".".repeat(DECK_SIZE));
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.win(), Some(false));
        assert_eq!(game.cards_left(), DECK_SIZE);
        assert_eq!(game.first_match(), None);
        let record = game.outcome().expect("record");
        assert_eq!(record.first_match_position, 0);
        assert_eq!(record.first_match_kind, None);
    }
}

#[test]
fn partly_dealt_decks_cannot_start_a_game() {
    let mut deck = Deck::standard52();
    for _ in 0..45 {
        deck.deal();
    }
    assert_eq!(
        Game::new(RuleSet::Normal, Uuid::nil(), deck.clone()).err(),
        Some(DeckError::WrongSize(7))
    );

    while deck.deal().is_some() {}
    assert_eq!(
        Game::new(RuleSet::Reverse, Uuid::nil(), deck).err(),
        Some(DeckError::WrongSize(0))
    );
}

#[test]
fn normal_rank_match_discards_four() {
    let prefix = [
        card(Rank::Ace, Suit::Spades),
        card(Rank::Two, Suit::Hearts),
        card(Rank::Three, Suit::Clubs),
        card(Rank::Ace, Suit::Diamonds),
    ];
    let game = played(RuleSet::Normal, deck_starting_with(&prefix));
    assert!(game.fingerprint().as_str().starts_with("....R."));
    let first = game.first_match().expect("matched");
    assert_eq!(first.position, 4);
    assert_eq!(first.kind, MatchKind::Rank);
    assert!(game.four_match_count() >= 1);
}

#[test]
fn normal_suit_match_discards_middle_two() {
    let prefix = [
        card(Rank::Ace, Suit::Spades),
        card(Rank::Two, Suit::Hearts),
        card(Rank::Three, Suit::Clubs),
        card(Rank::Four, Suit::Spades),
    ];
    let game = played(RuleSet::Normal, deck_starting_with(&prefix));
    assert!(game.fingerprint().as_str().starts_with("....S."));
    assert_eq!(game.first_match().map(|first| first.kind), Some(MatchKind::Suit));
    assert!(game.two_match_count() >= 1);
}

#[test]
fn reverse_swaps_the_compared_attributes() {
    let suit_prefix = [
        card(Rank::Ace, Suit::Spades),
        card(Rank::Two, Suit::Hearts),
        card(Rank::Three, Suit::Clubs),
        card(Rank::Four, Suit::Spades),
    ];
    let game = played(RuleSet::Reverse, deck_starting_with(&suit_prefix));
    assert!(game.fingerprint().as_str().starts_with("....S."));
    assert_eq!(game.hand().len(), game.cards_left());
    assert!(game.four_match_count() >= 1);

    let rank_prefix = [
        card(Rank::Ace, Suit::Spades),
        card(Rank::Two, Suit::Hearts),
        card(Rank::Three, Suit::Clubs),
        card(Rank::Ace, Suit::Diamonds),
    ];
    let game = played(RuleSet::Reverse, deck_starting_with(&rank_prefix));
    assert!(game.fingerprint().as_str().starts_with("....R."));
    assert!(game.two_match_count() >= 1);
}

#[test]
fn two_card_match_rechecks_without_drawing() {
    // KS matches 5S on suit; after 7D and 9H go, KS sits three above KH.
    let prefix = [
        card(Rank::King, Suit::Hearts),
        card(Rank::Two, Suit::Clubs),
        card(Rank::Five, Suit::Spades),
        card(Rank::Seven, Suit::Diamonds),
        card(Rank::Nine, Suit::Hearts),
        card(Rank::King, Suit::Spades),
    ];
    let game = played(RuleSet::Normal, deck_starting_with(&prefix));
    assert!(game.fingerprint().as_str().starts_with("......SR."));
    let first = game.first_match().expect("matched");
    assert_eq!(first.position, 6);
    assert_eq!(first.kind, MatchKind::Suit);
}

#[test]
fn final_two_card_match_ends_the_game_without_a_recheck() {
    // 3S is the last card dealt; it suit-matches KS, and once 2H and 4C go
    // it sits three above 3C without being compared again.
    let mut cards = no_match_order();
    cards.swap(8, 51);
    let game = played(RuleSet::Normal, Deck::from_cards(cards).expect("deck"));

    let print = game.fingerprint().as_str();
    assert_eq!(print, "............S..R......................................S");
    assert!(print.ends_with(".S"));
    assert_eq!(game.fingerprint().draws(), DECK_SIZE);
    assert_eq!(game.cards_left(), 44);
    assert_eq!(game.status(), GameStatus::Lost);

    let hand = game.hand();
    assert_eq!(hand.len(), 44);
    assert_eq!(hand[hand.len() - 1], card(Rank::Three, Suit::Spades));
    assert_eq!(hand[hand.len() - 4], card(Rank::Three, Suit::Clubs));
    assert!(hand[hand.len() - 1].same_rank(&hand[hand.len() - 4]));
}

#[test]
fn invariants_hold_across_seeds() {
    let mut rng = RngState::from_seed(2024);
    for _ in 0..300 {
        for rule_set in RuleSet::ALL {
            let game = played(rule_set, Deck::shuffled(&mut rng));
            let print = game.fingerprint();
            let discarded = game.cards_discarded() as usize;

            assert_eq!(game.win(), Some(game.cards_left() == 0));
            assert_eq!(
                game.four_match_count() * 4 + game.two_match_count() * 2,
                game.cards_discarded()
            );
            assert_eq!(discarded % 2, 0);
            assert!(discarded <= DECK_SIZE);
            assert_eq!(game.cards_left() + discarded, DECK_SIZE);
            assert_eq!(print.draws(), DECK_SIZE);
            assert_eq!(
                print.matches(),
                (game.four_match_count() + game.two_match_count()) as usize
            );
            assert!(print.as_str().chars().all(|c| matches!(c, '.' | 'R' | 'S')));

            let record = game.outcome().expect("record");
            let matched = game.four_match_count() + game.two_match_count() > 0;
            assert_eq!(record.first_match_position == 0, !matched);
            assert_eq!(record.first_match_kind.is_some(), matched);
            assert_eq!(
                record.first_match_kind,
                print.match_kinds().next()
            );
        }
    }
}
