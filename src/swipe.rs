//! "Chef's Choice" elimination game.
//!
//! Cards are dealt in pairs: the card at an even index sits on the left,
//! the one after it on the right. Dragging a card past the threshold
//! towards its own edge throws it out. The last card standing wins.

use log::debug;
use serde::Serialize;

use crate::collection::format_difficulty;
use crate::model::Recipe;

/// Drag distance, in pixels, a card must travel to be thrown out.
pub const SWIPE_THRESHOLD: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwipeCard {
    pub id: String,
    pub title: String,
    /// Short caption such as `30 min · Medium`
    pub meta: String,
    pub image_url: Option<String>,
}

impl From<&Recipe> for SwipeCard {
    fn from(recipe: &Recipe) -> Self {
        SwipeCard {
            id: recipe.id_segment().unwrap_or_else(|| recipe.name.clone()),
            title: recipe.name.clone(),
            meta: format!(
                "{} min · {}",
                recipe.total_minutes(),
                format_difficulty(recipe.difficulty.as_deref())
            ),
            image_url: recipe.image_url.clone(),
        }
    }
}

/// What a drag did to the game.
#[derive(Debug, Clone, PartialEq)]
pub enum SwipeOutcome {
    /// Not far enough, wrong side, unknown card or game already decided
    Ignored,
    /// The card left the deck; the game goes on
    Eliminated,
    /// The card left the deck and a single card remains
    Winner(SwipeCard),
}

#[derive(Debug, Clone)]
pub struct SwipeGame {
    deck: Vec<SwipeCard>,
    cards: Vec<SwipeCard>,
    winner: Option<SwipeCard>,
}

impl SwipeGame {
    /// Start a game. A one-card deck is decided from the outset.
    pub fn new(cards: Vec<SwipeCard>) -> Self {
        let winner = single(&cards);
        Self {
            deck: cards.clone(),
            cards,
            winner,
        }
    }

    /// Deal one card per recipe. Recipes without an id get a positional id
    /// (`0:Toast`) so same-named cards stay distinct.
    pub fn from_recipes(recipes: &[Recipe]) -> Self {
        let cards = recipes
            .iter()
            .enumerate()
            .map(|(index, recipe)| {
                let mut card = SwipeCard::from(recipe);
                if recipe.id_segment().is_none() {
                    card.id = format!("{index}:{}", recipe.name);
                }
                card
            })
            .collect();
        Self::new(cards)
    }

    /// Cards still in play, in layout order.
    pub fn cards(&self) -> &[SwipeCard] {
        &self.cards
    }

    pub fn winner(&self) -> Option<&SwipeCard> {
        self.winner.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// Side of the board a card is currently drawn on.
    pub fn side_of(&self, id: &str) -> Option<Side> {
        self.position(id).map(side_at)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }

    /// Handle the end of a drag of card `id`, drawn on `side`, that moved
    /// `offset_x` pixels horizontally.
    pub fn swipe(&mut self, id: &str, side: Side, offset_x: f64) -> SwipeOutcome {
        if self.winner.is_some() {
            return SwipeOutcome::Ignored;
        }
        let Some(index) = self.position(id).filter(|&index| side_at(index) == side) else {
            return SwipeOutcome::Ignored;
        };
        let past_threshold = match side {
            Side::Left => offset_x <= -SWIPE_THRESHOLD,
            Side::Right => offset_x >= SWIPE_THRESHOLD,
        };
        if !past_threshold {
            return SwipeOutcome::Ignored;
        }

        self.cards.remove(index);
        debug!("card {} eliminated, {} left", id, self.cards.len());

        match single(&self.cards) {
            Some(winner) => {
                self.winner = Some(winner.clone());
                SwipeOutcome::Winner(winner)
            }
            None => SwipeOutcome::Eliminated,
        }
    }

    /// Put every card back and clear the winner.
    pub fn reset(&mut self) {
        self.cards = self.deck.clone();
        self.winner = single(&self.cards);
    }
}

fn side_at(index: usize) -> Side {
    if index % 2 == 0 {
        Side::Left
    } else {
        Side::Right
    }
}

fn single(cards: &[SwipeCard]) -> Option<SwipeCard> {
    match cards {
        [only] => Some(only.clone()),
        _ => None,
    }
}
