//! Card representation for poker.
//!
//! This module provides fundamental card types used throughout the equity engine:
//! - `Card`: A single playing card with rank and suit
//! - `HoleCards`: A player's two private cards
//! - `Board`: Community cards (0-5 cards)
//! - `BurnedCards`: Face-down cards discarded before each street (0-3 cards)
//! - `Deck`: An owned, shuffled sequence of cards with dealing functionality

use rand::seq::SliceRandom;
use rand::Rng;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Rank of a card (0-12: 2-A).
pub const RANK_2: u8 = 0;
pub const RANK_3: u8 = 1;
pub const RANK_4: u8 = 2;
pub const RANK_5: u8 = 3;
pub const RANK_6: u8 = 4;
pub const RANK_7: u8 = 5;
pub const RANK_8: u8 = 6;
pub const RANK_9: u8 = 7;
pub const RANK_T: u8 = 8;
pub const RANK_J: u8 = 9;
pub const RANK_Q: u8 = 10;
pub const RANK_K: u8 = 11;
pub const RANK_A: u8 = 12;

/// Suit of a card (0-3).
pub const SUIT_CLUBS: u8 = 0;
pub const SUIT_DIAMONDS: u8 = 1;
pub const SUIT_HEARTS: u8 = 2;
pub const SUIT_SPADES: u8 = 3;

/// Number of distinct ranks.
pub const NUM_RANKS: u8 = 13;
/// Number of distinct suits.
pub const NUM_SUITS: u8 = 4;
/// Size of the standard deck.
pub const DECK_SIZE: usize = 52;
/// Maximum number of community cards.
pub const MAX_BOARD_CARDS: usize = 5;
/// Maximum number of burned cards in a hand (one per street).
pub const MAX_BURNED_CARDS: usize = 3;

/// Compact rank characters used for parsing and `Debug`.
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Compact suit characters used for parsing and `Debug`.
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// Human readable rank labels.
const RANK_LABELS: [&str; 13] = ["2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K", "A"];

/// Suit glyphs for display.
const SUIT_GLYPHS: [char; 4] = ['♣', '♦', '♥', '♠'];

/// The canonical 52-card deck, suit-major and rank-minor.
static UNSHUFFLED_DECK: [Card; DECK_SIZE] = build_unshuffled_deck();

const fn build_unshuffled_deck() -> [Card; DECK_SIZE] {
    let mut cards = [Card { id: 0 }; DECK_SIZE];
    let mut suit = 0;
    while suit < NUM_SUITS {
        let mut rank = 0;
        while rank < NUM_RANKS {
            cards[(suit * NUM_RANKS + rank) as usize] = Card::new(rank, suit);
            rank += 1;
        }
        suit += 1;
    }
    cards
}

/// The canonical 52-card sequence (clubs 2..A, diamonds 2..A, hearts, spades).
pub fn unshuffled_deck() -> &'static [Card; DECK_SIZE] {
    &UNSHUFFLED_DECK
}

/// A single playing card.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    /// Card index 0-51: rank * 4 + suit
    id: u8,
}

impl Card {
    /// Create a new card from rank (0-12) and suit (0-3).
    #[inline]
    pub const fn new(rank: u8, suit: u8) -> Self {
        debug_assert!(rank < NUM_RANKS, "rank must be 0-12");
        debug_assert!(suit < NUM_SUITS, "suit must be 0-3");
        Self { id: rank * 4 + suit }
    }

    /// Get the card's ID (0-51).
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Get the card's rank (0-12: 2-A).
    #[inline]
    pub fn rank(&self) -> u8 {
        self.id / 4
    }

    /// Get the card's suit (0-3).
    #[inline]
    pub fn suit(&self) -> u8 {
        self.id % 4
    }

    /// Human readable rank, "2".."10", "J", "Q", "K", "A".
    pub fn rank_label(&self) -> &'static str {
        RANK_LABELS[self.rank() as usize]
    }

    /// Suit glyph.
    pub fn suit_glyph(&self) -> char {
        SUIT_GLYPHS[self.suit() as usize]
    }

    /// Compact two character form, e.g. "Td".
    pub fn compact(&self) -> String {
        format!("{}{}", RANK_CHARS[self.rank() as usize], SUIT_CHARS[self.suit() as usize])
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_label(), self.suit_glyph())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.compact())
    }
}

/// Error returned when card text cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCardError {
    /// Unrecognised rank text.
    InvalidRank(String),
    /// Unrecognised suit text.
    InvalidSuit(String),
    /// Wrong number of cards in a group (hole cards, board).
    WrongCount { expected: &'static str, actual: usize },
}

impl fmt::Display for ParseCardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRank(s) => write!(f, "invalid card rank in {:?}", s),
            Self::InvalidSuit(s) => write!(f, "invalid card suit in {:?}", s),
            Self::WrongCount { expected, actual } => {
                write!(f, "expected {} cards, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for ParseCardError {}

fn parse_rank(s: &str) -> Option<u8> {
    if s == "10" {
        return Some(RANK_T);
    }
    let mut chars = s.chars();
    let c = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() {
        return None;
    }
    RANK_CHARS.iter().position(|&r| r == c).map(|r| r as u8)
}

fn parse_suit(c: char) -> Option<u8> {
    SUIT_CHARS
        .iter()
        .position(|&s| s == c.to_ascii_lowercase())
        .or_else(|| SUIT_GLYPHS.iter().position(|&g| g == c))
        .map(|s| s as u8)
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parse a card from text like "As", "Td", "10h" or "K♠".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let suit_char = s
            .chars()
            .last()
            .ok_or_else(|| ParseCardError::InvalidRank(s.to_string()))?;
        let rank_text = &s[..s.len() - suit_char.len_utf8()];
        let rank = parse_rank(rank_text).ok_or_else(|| ParseCardError::InvalidRank(s.to_string()))?;
        let suit = parse_suit(suit_char).ok_or_else(|| ParseCardError::InvalidSuit(s.to_string()))?;
        Ok(Self::new(rank, suit))
    }
}

/// Split concatenated card text ("AhKs", "10h 9c", "A♠K♦") into cards.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, ParseCardError> {
    let mut cards = Vec::new();
    let mut token = String::new();
    for c in s.chars().filter(|c| !c.is_whitespace() && *c != ',') {
        token.push(c);
        if parse_suit(c).is_some() && token.chars().count() >= 2 {
            cards.push(token.parse()?);
            token.clear();
        }
    }
    if !token.is_empty() {
        return Err(ParseCardError::InvalidSuit(token));
    }
    Ok(cards)
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.compact())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// A player's two hole cards, kept in dealing order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HoleCards {
    /// First card dealt.
    pub card1: Card,
    /// Second card dealt.
    pub card2: Card,
}

impl HoleCards {
    /// Create hole cards.
    pub fn new(card1: Card, card2: Card) -> Self {
        Self { card1, card2 }
    }

    /// Get both cards as an array.
    pub fn cards(&self) -> [Card; 2] {
        [self.card1, self.card2]
    }

    /// Check if a card is one of these hole cards.
    pub fn contains(&self, card: Card) -> bool {
        self.card1 == card || self.card2 == card
    }
}

impl FromStr for HoleCards {
    type Err = ParseCardError;

    /// Parse hole cards from text like "AhKs" or "Ah Ks".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_cards(s)?.as_slice() {
            &[c1, c2] => Ok(Self::new(c1, c2)),
            other => Err(ParseCardError::WrongCount {
                expected: "2",
                actual: other.len(),
            }),
        }
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.card1, self.card2)
    }
}

impl fmt::Debug for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.card1, self.card2)
    }
}

/// Community cards on the board.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(MAX_BOARD_CARDS),
        }
    }

    /// Create a board from cards.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        debug_assert!(cards.len() <= MAX_BOARD_CARDS);
        Self { cards }
    }

    /// Get the number of cards on the board.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if board is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get the cards on the board.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The five board cards, if the river has been dealt.
    pub fn complete(&self) -> Option<&[Card; MAX_BOARD_CARDS]> {
        self.cards.as_slice().try_into().ok()
    }

    /// Add a card to the board.
    pub fn add(&mut self, card: Card) {
        debug_assert!(self.cards.len() < MAX_BOARD_CARDS);
        self.cards.push(card);
    }

    /// Check if the board contains a specific card.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// The street this board corresponds to, `None` for 1, 2 or more than 5 cards.
    pub fn street(&self) -> Option<Street> {
        match self.cards.len() {
            0 => Some(Street::Preflop),
            3 => Some(Street::Flop),
            4 => Some(Street::Turn),
            5 => Some(Street::River),
            _ => None,
        }
    }
}

impl FromStr for Board {
    type Err = ParseCardError;

    /// Parse a board from text like "AhKsQd".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s)?;
        if cards.len() > MAX_BOARD_CARDS {
            return Err(ParseCardError::WrongCount {
                expected: "at most 5",
                actual: cards.len(),
            });
        }
        Ok(Self::from_cards(cards))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for card in &self.cards {
            write!(f, "{:?}", card)?;
        }
        write!(f, "]")
    }
}

/// Cards burned face down before each street.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BurnedCards {
    cards: Vec<Card>,
}

impl BurnedCards {
    /// Create an empty burn pile.
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(MAX_BURNED_CARDS),
        }
    }

    /// Number of burned cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if nothing has been burned.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get the burned cards.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn push(&mut self, card: Card) {
        debug_assert!(self.cards.len() < MAX_BURNED_CARDS);
        self.cards.push(card);
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
    }
}

impl fmt::Debug for BurnedCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Burned({})", self.cards.len())
    }
}

/// Street in a poker hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Street {
    /// Hole cards dealt, no board.
    Preflop,
    /// Three board cards.
    Flop,
    /// Four board cards.
    Turn,
    /// All five board cards.
    River,
}

impl Street {
    /// Get the next street.
    pub fn next(&self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    /// Number of board cards for this street.
    pub fn num_board_cards(&self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    /// Number of cards burned by the time this street is showing.
    pub fn num_burned_cards(&self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 1,
            Street::Turn => 2,
            Street::River => 3,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "Preflop"),
            Street::Flop => write!(f, "Flop"),
            Street::Turn => write!(f, "Turn"),
            Street::River => write!(f, "River"),
        }
    }
}

/// An owned deck of cards. Cards are dealt from the end.
#[derive(Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create a new deck in canonical order.
    pub fn new() -> Self {
        Self {
            cards: UNSHUFFLED_DECK.to_vec(),
        }
    }

    /// Create a uniformly shuffled full deck.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    /// Create a deck from an explicit card sequence; the last card is dealt first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Create a canonical-order deck with specific cards removed.
    pub fn without(dead_cards: &[Card]) -> Self {
        Self {
            cards: UNSHUFFLED_DECK
                .iter()
                .filter(|c| !dead_cards.contains(c))
                .copied()
                .collect(),
        }
    }

    /// Replace the deck's contents with `cards`, reusing the allocation.
    pub fn reset_to(&mut self, cards: &[Card]) {
        self.cards.clear();
        self.cards.extend_from_slice(cards);
    }

    /// Shuffle the remaining cards in the deck.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Deal the next card from the deck.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Deal one card face down onto the burn pile.
    pub fn burn(&mut self, burned: &mut BurnedCards) -> Option<Card> {
        let card = self.deal()?;
        burned.push(card);
        Some(card)
    }

    /// Get the number of remaining cards.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Get remaining cards as a slice.
    pub fn remaining_cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.remaining())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_card_creation() {
        let ace_spades = Card::new(RANK_A, SUIT_SPADES);
        assert_eq!(ace_spades.rank(), RANK_A);
        assert_eq!(ace_spades.suit(), SUIT_SPADES);
        assert_eq!(ace_spades.to_string(), "A♠");
        assert_eq!(format!("{:?}", ace_spades), "As");

        let ten_hearts = Card::new(RANK_T, SUIT_HEARTS);
        assert_eq!(ten_hearts.to_string(), "10♥");
        assert_eq!(ten_hearts.compact(), "Th");
    }

    #[test]
    fn test_card_parsing() {
        assert_eq!("As".parse::<Card>().unwrap(), Card::new(RANK_A, SUIT_SPADES));
        assert_eq!("kh".parse::<Card>().unwrap(), Card::new(RANK_K, SUIT_HEARTS));
        assert_eq!("10d".parse::<Card>().unwrap(), Card::new(RANK_T, SUIT_DIAMONDS));
        assert_eq!("Td".parse::<Card>().unwrap(), Card::new(RANK_T, SUIT_DIAMONDS));
        assert_eq!("2♣".parse::<Card>().unwrap(), Card::new(RANK_2, SUIT_CLUBS));
        assert!(matches!("Xs".parse::<Card>(), Err(ParseCardError::InvalidRank(_))));
        assert!(matches!("Ax".parse::<Card>(), Err(ParseCardError::InvalidSuit(_))));
        assert!("A".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
    }

    #[test]
    fn test_display_roundtrips_through_parser() {
        for &card in unshuffled_deck() {
            assert_eq!(card.to_string().parse::<Card>().unwrap(), card);
        }
    }

    #[test]
    fn test_hole_cards() {
        let hc: HoleCards = "7h As".parse().unwrap();
        assert_eq!(hc.card1, Card::new(RANK_7, SUIT_HEARTS));
        assert_eq!(hc.card2, Card::new(RANK_A, SUIT_SPADES));
        assert!(hc.contains(Card::new(RANK_A, SUIT_SPADES)));
        assert!("AhKsQd".parse::<HoleCards>().is_err());
    }

    #[test]
    fn test_board() {
        let mut board = Board::new();
        assert_eq!(board.len(), 0);
        assert_eq!(board.street(), Some(Street::Preflop));
        assert!(board.complete().is_none());

        board = "AhKsQd".parse().unwrap();
        assert_eq!(board.len(), 3);
        assert_eq!(board.street(), Some(Street::Flop));

        board.add("Jc".parse().unwrap());
        assert_eq!(board.street(), Some(Street::Turn));

        board.add("10c".parse().unwrap());
        assert_eq!(board.street(), Some(Street::River));
        assert!(board.complete().is_some());

        assert_eq!(Board::from_cards(parse_cards("AhKs").unwrap()).street(), None);
        assert!("AhKsQdJcTc9c".parse::<Board>().is_err());
    }

    #[test]
    fn test_unshuffled_deck_order() {
        let deck = unshuffled_deck();
        assert_eq!(deck[0], Card::new(RANK_2, SUIT_CLUBS));
        assert_eq!(deck[12], Card::new(RANK_A, SUIT_CLUBS));
        assert_eq!(deck[13], Card::new(RANK_2, SUIT_DIAMONDS));
        assert_eq!(deck[51], Card::new(RANK_A, SUIT_SPADES));

        let unique: FxHashSet<Card> = deck.iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn test_deck() {
        let mut deck = Deck::new();
        assert_eq!(deck.remaining(), 52);

        let card = deck.deal().unwrap();
        assert_eq!(card, Card::new(RANK_A, SUIT_SPADES));
        assert_eq!(deck.remaining(), 51);

        let mut burned = BurnedCards::new();
        let burnt = deck.burn(&mut burned).unwrap();
        assert_eq!(burned.cards(), &[burnt]);

        while deck.deal().is_some() {}
        assert_eq!(deck.remaining(), 0);
        assert!(deck.deal().is_none());
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let deck = Deck::shuffled(&mut rng);
        assert_eq!(deck.remaining(), DECK_SIZE);
        assert_ne!(deck, Deck::new());

        let unique: FxHashSet<Card> = deck.remaining_cards().iter().copied().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn test_shuffle_is_roughly_uniform() {
        // Position of the ace of spades after shuffling should be spread evenly.
        let mut rng = StdRng::seed_from_u64(11);
        let mut counts = [0u32; DECK_SIZE];
        let trials = 52_000;
        let target = Card::new(RANK_A, SUIT_SPADES);
        for _ in 0..trials {
            let deck = Deck::shuffled(&mut rng);
            let pos = deck.remaining_cards().iter().position(|&c| c == target).unwrap();
            counts[pos] += 1;
        }
        for &count in &counts {
            assert!((700..1300).contains(&count), "position count {} far from 1000", count);
        }
    }

    #[test]
    fn test_deck_without() {
        let dead = parse_cards("AsAh").unwrap();
        let deck = Deck::without(&dead);
        assert_eq!(deck.remaining(), 50);
        assert!(!deck.remaining_cards().contains(&dead[0]));
    }

    #[test]
    fn test_card_serde() {
        let hc: HoleCards = "AsTd".parse().unwrap();
        let json = serde_json::to_string(&hc).unwrap();
        assert_eq!(json, r#"{"card1":"As","card2":"Td"}"#);
        let back: HoleCards = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hc);
    }

    #[test]
    fn test_street_progression() {
        assert_eq!(Street::Preflop.next(), Some(Street::Flop));
        assert_eq!(Street::Flop.next(), Some(Street::Turn));
        assert_eq!(Street::Turn.next(), Some(Street::River));
        assert_eq!(Street::River.next(), None);
        assert_eq!(Street::Turn.num_burned_cards(), 2);
    }
}
