//! Authoritative state of a single hand.
//!
//! A `Game` owns the deck, the players' hole cards, the board and the burn pile.
//! At every point the four together hold each card of the canonical deck
//! exactly once; `Game::check_accounting` verifies this.

use log::debug;
use rand::Rng;
use rustc_hash::FxHashSet;
use std::fmt;

use crate::cards::card::{
    Board, BurnedCards, Card, Deck, HoleCards, Street, DECK_SIZE, MAX_BOARD_CARDS,
    MAX_BURNED_CARDS,
};

/// Minimum number of players at the table.
pub const MIN_PLAYERS: usize = 2;

/// Maximum number of players: 22 * 2 hole cards + 5 board + 3 burned = 52.
pub const MAX_PLAYERS: usize = 22;

/// Errors raised while setting up or dealing a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Player count outside 2-22.
    InvalidPlayerCount(usize),
    /// Board size that no street produces (1, 2 or more than 5).
    InvalidBoardSize(usize),
    /// The same card appears twice among the known cards.
    DuplicateCard(Card),
    /// Known and unseen cards do not add up to one full deck.
    IncompleteDeck(usize),
    /// The deck ran out; this is an internal consistency failure.
    DeckExhausted,
    /// Community cards requested before hole cards were dealt.
    HoleCardsNotDealt,
    /// Hole cards were already dealt.
    HoleCardsAlreadyDealt,
    /// A street was requested out of sequence.
    OutOfOrder { requested: Street, board_cards: usize },
    /// The river has been dealt.
    HandComplete,
    /// Too few unseen cards to complete the board.
    InsufficientUnseenCards { needed: usize, available: usize },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPlayerCount(n) => write!(
                f,
                "Invalid player count: {} (must be {}-{})",
                n, MIN_PLAYERS, MAX_PLAYERS
            ),
            Self::InvalidBoardSize(n) => write!(f, "Invalid board size: {} cards", n),
            Self::DuplicateCard(card) => write!(f, "Card {} appears more than once", card),
            Self::IncompleteDeck(n) => {
                write!(f, "Card accounting broken: {} distinct cards instead of {}", n, DECK_SIZE)
            }
            Self::DeckExhausted => write!(f, "Deck exhausted while dealing"),
            Self::HoleCardsNotDealt => write!(f, "Hole cards have not been dealt"),
            Self::HoleCardsAlreadyDealt => write!(f, "Hole cards have already been dealt"),
            Self::OutOfOrder { requested, board_cards } => write!(
                f,
                "Cannot deal the {} with {} board cards showing",
                requested, board_cards
            ),
            Self::HandComplete => write!(f, "All community cards have been dealt"),
            Self::InsufficientUnseenCards { needed, available } => write!(
                f,
                "Need {} unseen cards to complete the board, only {} available",
                needed, available
            ),
        }
    }
}

impl std::error::Error for GameError {}

fn check_player_count(n: usize) -> Result<(), GameError> {
    if (MIN_PLAYERS..=MAX_PLAYERS).contains(&n) {
        Ok(())
    } else {
        Err(GameError::InvalidPlayerCount(n))
    }
}

/// Check that `cards` holds every card of the canonical deck exactly once.
fn check_full_deck<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Result<(), GameError> {
    let mut seen = FxHashSet::default();
    for &card in cards {
        if !seen.insert(card) {
            return Err(GameError::DuplicateCard(card));
        }
    }
    if seen.len() != DECK_SIZE {
        return Err(GameError::IncompleteDeck(seen.len()));
    }
    Ok(())
}

/// A seat at the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Seat index, starting at 0.
    pub seat: usize,
    hole_cards: Option<HoleCards>,
    equity: Option<f64>,
}

impl Player {
    fn new(seat: usize) -> Self {
        Self {
            seat,
            hole_cards: None,
            equity: None,
        }
    }

    /// Hole cards, once dealt.
    pub fn hole_cards(&self) -> Option<&HoleCards> {
        self.hole_cards.as_ref()
    }

    /// Last equity estimate recorded for this player.
    pub fn equity(&self) -> Option<f64> {
        self.equity
    }
}

/// The information the equity simulator needs about a hand in progress.
///
/// `unseen` holds the remaining deck plus the burned cards: burned cards are
/// face down, so an observer cannot tell them apart from the deck.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSnapshot {
    /// Hole cards per player, in seat order.
    pub hole_cards: Vec<HoleCards>,
    /// Community cards showing.
    pub board: Board,
    /// Cards whose position is unknown to an observer.
    pub unseen: Vec<Card>,
    /// Number of cards burned so far in the real hand.
    pub burned_count: usize,
}

impl TableSnapshot {
    /// Number of board cards plus burns still to be dealt.
    pub fn cards_to_come(&self) -> usize {
        match self.board.len() {
            0 => 8,
            3 => 4,
            4 => 2,
            _ => 0,
        }
    }

    /// Street the board is on.
    pub fn street(&self) -> Option<Street> {
        self.board.street()
    }

    /// Validate player count, board size and card accounting.
    pub fn validate(&self) -> Result<(), GameError> {
        check_player_count(self.hole_cards.len())?;
        if self.board.street().is_none() {
            return Err(GameError::InvalidBoardSize(self.board.len()));
        }
        check_full_deck(
            self.hole_cards
                .iter()
                .flat_map(|h| [&h.card1, &h.card2])
                .chain(self.board.cards())
                .chain(&self.unseen),
        )?;
        let needed = self.burned_count + self.cards_to_come();
        if self.burned_count > MAX_BURNED_CARDS || needed > self.unseen.len() {
            return Err(GameError::InsufficientUnseenCards {
                needed,
                available: self.unseen.len(),
            });
        }
        Ok(())
    }
}

/// A single hand of Texas Hold'em.
#[derive(Debug, Clone)]
pub struct Game {
    deck: Deck,
    players: Vec<Player>,
    board: Board,
    burned: BurnedCards,
}

impl Game {
    /// Start a hand with a freshly shuffled deck.
    pub fn new<R: Rng + ?Sized>(num_players: usize, rng: &mut R) -> Result<Self, GameError> {
        Self::with_deck(num_players, Deck::shuffled(rng))
    }

    /// Start a hand with an explicit deck order; the last card is dealt first.
    pub fn with_deck(num_players: usize, deck: Deck) -> Result<Self, GameError> {
        check_player_count(num_players)?;
        check_full_deck(deck.remaining_cards())?;
        Ok(Self {
            deck,
            players: (0..num_players).map(Player::new).collect(),
            board: Board::new(),
            burned: BurnedCards::new(),
        })
    }

    /// Rebuild a hand in progress from the cards an observer can see.
    ///
    /// The cards a real deal would have burned are taken face down from the
    /// shuffled remainder, keeping the accounting identical to a live hand.
    pub fn from_known<R: Rng + ?Sized>(
        hole_cards: Vec<HoleCards>,
        board: Board,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        check_player_count(hole_cards.len())?;
        let street = board
            .street()
            .ok_or(GameError::InvalidBoardSize(board.len()))?;

        let known: Vec<Card> = hole_cards
            .iter()
            .flat_map(|h| h.cards())
            .chain(board.cards().iter().copied())
            .collect();
        let mut seen = FxHashSet::default();
        if let Some(&dup) = known.iter().find(|&&c| !seen.insert(c)) {
            return Err(GameError::DuplicateCard(dup));
        }

        let mut deck = Deck::without(&known);
        deck.shuffle(rng);
        let mut burned = BurnedCards::new();
        for _ in 0..street.num_burned_cards() {
            deck.burn(&mut burned).ok_or(GameError::DeckExhausted)?;
        }

        let players = hole_cards
            .into_iter()
            .enumerate()
            .map(|(seat, hole)| Player {
                seat,
                hole_cards: Some(hole),
                equity: None,
            })
            .collect();

        let game = Self {
            deck,
            players,
            board,
            burned,
        };
        debug!(
            "rebuilt {} player hand on the {} with {} cards in the deck",
            game.players.len(),
            street,
            game.deck.remaining()
        );
        Ok(game)
    }

    /// Players in seat order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of players.
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Community cards.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Burned cards.
    pub fn burned(&self) -> &BurnedCards {
        &self.burned
    }

    /// Remaining deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Whether hole cards have been dealt.
    pub fn hole_cards_dealt(&self) -> bool {
        self.players.iter().all(|p| p.hole_cards.is_some())
    }

    /// Current street, `None` before hole cards are dealt.
    pub fn street(&self) -> Option<Street> {
        if self.hole_cards_dealt() {
            self.board.street()
        } else {
            None
        }
    }

    fn draw(&mut self) -> Result<Card, GameError> {
        self.deck.deal().ok_or(GameError::DeckExhausted)
    }

    /// Deal two hole cards to every player, one card per player per round.
    pub fn deal_hole_cards(&mut self) -> Result<(), GameError> {
        if self.players.iter().any(|p| p.hole_cards.is_some()) {
            return Err(GameError::HoleCardsAlreadyDealt);
        }
        let mut first = Vec::with_capacity(self.players.len());
        for _ in 0..self.players.len() {
            first.push(self.draw()?);
        }
        for (seat, card1) in first.into_iter().enumerate() {
            let card2 = self.draw()?;
            self.players[seat].hole_cards = Some(HoleCards::new(card1, card2));
        }
        debug!("dealt hole cards to {} players", self.players.len());
        Ok(())
    }

    fn deal_street(&mut self, street: Street) -> Result<(), GameError> {
        if !self.hole_cards_dealt() {
            return Err(GameError::HoleCardsNotDealt);
        }
        let before = street.num_board_cards() - if street == Street::Flop { 3 } else { 1 };
        if self.board.len() != before {
            return Err(GameError::OutOfOrder {
                requested: street,
                board_cards: self.board.len(),
            });
        }
        self.deck
            .burn(&mut self.burned)
            .ok_or(GameError::DeckExhausted)?;
        while self.board.len() < street.num_board_cards() {
            let card = self.draw()?;
            self.board.add(card);
        }
        debug!("dealt the {}: {:?}", street, self.board);
        Ok(())
    }

    /// Burn one card and deal three community cards.
    pub fn deal_flop(&mut self) -> Result<(), GameError> {
        self.deal_street(Street::Flop)
    }

    /// Burn one card and deal the fourth community card.
    pub fn deal_turn(&mut self) -> Result<(), GameError> {
        self.deal_street(Street::Turn)
    }

    /// Burn one card and deal the fifth community card.
    pub fn deal_river(&mut self) -> Result<(), GameError> {
        self.deal_street(Street::River)
    }

    /// Deal whatever comes next and return the street now showing.
    pub fn advance(&mut self) -> Result<Street, GameError> {
        match self.street() {
            None => self.deal_hole_cards().map(|_| Street::Preflop),
            Some(street) => {
                let next = street.next().ok_or(GameError::HandComplete)?;
                self.deal_street(next).map(|_| next)
            }
        }
    }

    /// Verify that deck, hole cards, board and burn pile hold each card exactly once.
    pub fn check_accounting(&self) -> Result<(), GameError> {
        debug_assert!(self.board.len() <= MAX_BOARD_CARDS);
        check_full_deck(
            self.deck
                .remaining_cards()
                .iter()
                .chain(
                    self.players
                        .iter()
                        .filter_map(|p| p.hole_cards.as_ref())
                        .flat_map(|h| [&h.card1, &h.card2]),
                )
                .chain(self.board.cards())
                .chain(self.burned.cards()),
        )
    }

    /// Copy out what the equity simulator needs. The game itself is untouched.
    pub fn snapshot(&self) -> Result<TableSnapshot, GameError> {
        let hole_cards = self
            .players
            .iter()
            .map(|p| p.hole_cards.ok_or(GameError::HoleCardsNotDealt))
            .collect::<Result<Vec<_>, _>>()?;
        let unseen = self
            .deck
            .remaining_cards()
            .iter()
            .chain(self.burned.cards())
            .copied()
            .collect();
        Ok(TableSnapshot {
            hole_cards,
            board: self.board.clone(),
            unseen,
            burned_count: self.burned.len(),
        })
    }

    /// Record per-seat equities produced by the simulator.
    pub fn set_equities(&mut self, equities: &[f64]) {
        debug_assert_eq!(equities.len(), self.players.len());
        for (player, &equity) in self.players.iter_mut().zip(equities) {
            player.equity = Some(equity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, unshuffled_deck};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_player_count_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Game::new(1, &mut rng).unwrap_err(), GameError::InvalidPlayerCount(1));
        assert_eq!(Game::new(23, &mut rng).unwrap_err(), GameError::InvalidPlayerCount(23));
        assert_eq!(Game::new(0, &mut rng).unwrap_err(), GameError::InvalidPlayerCount(0));
        assert!(Game::new(2, &mut rng).is_ok());
        assert!(Game::new(22, &mut rng).is_ok());
    }

    #[test]
    fn test_accounting_holds_through_every_street() {
        for num_players in [2, 6, 9, 22] {
            let mut rng = StdRng::seed_from_u64(num_players as u64);
            let mut game = Game::new(num_players, &mut rng).unwrap();
            game.check_accounting().unwrap();

            for street in [Street::Preflop, Street::Flop, Street::Turn, Street::River] {
                assert_eq!(game.advance().unwrap(), street);
                game.check_accounting().unwrap();
                assert_eq!(game.board().len(), street.num_board_cards());
                assert_eq!(game.burned().len(), street.num_burned_cards());
            }
            assert_eq!(game.advance().unwrap_err(), GameError::HandComplete);
            assert_eq!(game.deck().remaining(), DECK_SIZE - 2 * num_players - 8);
        }
    }

    #[test]
    fn test_full_table_uses_every_card() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut game = Game::new(MAX_PLAYERS, &mut rng).unwrap();
        while game.advance().is_ok() {}
        assert_eq!(game.deck().remaining(), 0);
        game.check_accounting().unwrap();
    }

    #[test]
    fn test_round_robin_dealing() {
        // Cards come off the end, so the deal order is the reversed canonical deck.
        let mut game = Game::with_deck(3, Deck::new()).unwrap();
        game.deal_hole_cards().unwrap();
        let deck = unshuffled_deck();
        let holes: Vec<HoleCards> = game
            .players()
            .iter()
            .map(|p| *p.hole_cards().unwrap())
            .collect();
        assert_eq!(holes[0], HoleCards::new(deck[51], deck[48]));
        assert_eq!(holes[1], HoleCards::new(deck[50], deck[47]));
        assert_eq!(holes[2], HoleCards::new(deck[49], deck[46]));

        game.deal_flop().unwrap();
        assert_eq!(game.burned().cards(), &[deck[45]]);
        assert_eq!(game.board().cards(), &[deck[44], deck[43], deck[42]]);
    }

    #[test]
    fn test_out_of_order_dealing() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = Game::new(4, &mut rng).unwrap();
        assert_eq!(game.deal_flop().unwrap_err(), GameError::HoleCardsNotDealt);
        game.deal_hole_cards().unwrap();
        assert_eq!(game.deal_hole_cards().unwrap_err(), GameError::HoleCardsAlreadyDealt);
        assert_eq!(
            game.deal_turn().unwrap_err(),
            GameError::OutOfOrder { requested: Street::Turn, board_cards: 0 }
        );
        game.deal_flop().unwrap();
        assert!(game.deal_flop().is_err());
        game.deal_turn().unwrap();
        game.deal_river().unwrap();
        game.check_accounting().unwrap();
    }

    #[test]
    fn test_with_deck_rejects_bad_decks() {
        let mut cards = unshuffled_deck().to_vec();
        cards[0] = cards[1];
        assert_eq!(
            Game::with_deck(2, Deck::from_cards(cards)).unwrap_err(),
            GameError::DuplicateCard(unshuffled_deck()[1])
        );
        let short = Deck::from_cards(unshuffled_deck()[..51].to_vec());
        assert_eq!(Game::with_deck(2, short).unwrap_err(), GameError::IncompleteDeck(51));
    }

    #[test]
    fn test_from_known() {
        let mut rng = StdRng::seed_from_u64(5);
        let holes = vec!["AsAd".parse().unwrap(), "KhKc".parse().unwrap()];
        let game = Game::from_known(holes, "2c 7d 9h Js".parse().unwrap(), &mut rng).unwrap();
        assert_eq!(game.street(), Some(Street::Turn));
        assert_eq!(game.burned().len(), 2);
        assert_eq!(game.deck().remaining(), 52 - 4 - 4 - 2);
        game.check_accounting().unwrap();
    }

    #[test]
    fn test_from_known_rejects_duplicates_and_bad_boards() {
        let mut rng = StdRng::seed_from_u64(5);
        let holes = vec!["AsAd".parse().unwrap(), "AsKc".parse().unwrap()];
        assert_eq!(
            Game::from_known(holes, Board::new(), &mut rng).unwrap_err(),
            GameError::DuplicateCard("As".parse().unwrap())
        );

        let holes = vec!["AsAd".parse().unwrap(), "KsKc".parse().unwrap()];
        let board = Board::from_cards(parse_cards("2c 3c").unwrap());
        assert_eq!(
            Game::from_known(holes, board, &mut rng).unwrap_err(),
            GameError::InvalidBoardSize(2)
        );

        let single = vec!["AsAd".parse().unwrap()];
        assert_eq!(
            Game::from_known(single, Board::new(), &mut rng).unwrap_err(),
            GameError::InvalidPlayerCount(1)
        );
    }

    #[test]
    fn test_snapshot_pools_deck_and_burned() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut game = Game::new(5, &mut rng).unwrap();
        assert_eq!(game.snapshot().unwrap_err(), GameError::HoleCardsNotDealt);

        game.advance().unwrap();
        game.advance().unwrap();
        let snapshot = game.snapshot().unwrap();
        assert_eq!(snapshot.burned_count, 1);
        assert_eq!(snapshot.unseen.len(), game.deck().remaining() + 1);
        assert!(snapshot.unseen.contains(&game.burned().cards()[0]));
        snapshot.validate().unwrap();
    }

    #[test]
    fn test_snapshot_validation() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut game = Game::new(3, &mut rng).unwrap();
        game.advance().unwrap();
        let good = game.snapshot().unwrap();

        let mut missing = good.clone();
        missing.unseen.pop();
        assert!(matches!(missing.validate(), Err(GameError::IncompleteDeck(_))));

        let mut over_burned = good.clone();
        over_burned.burned_count = 4;
        assert!(matches!(
            over_burned.validate(),
            Err(GameError::InsufficientUnseenCards { .. })
        ));
    }

    #[test]
    fn test_set_equities() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut game = Game::new(2, &mut rng).unwrap();
        game.advance().unwrap();
        game.set_equities(&[0.25, 0.75]);
        assert_eq!(game.players()[1].equity(), Some(0.75));
    }
}
