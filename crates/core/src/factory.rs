//! Piece factory - decides which piece spawns next
//!
//! Three policies are available, chosen explicitly through [`Randomizer`]:
//!
//! - **Uniform** (default): every draw picks one of the seven kinds with equal
//!   probability.
//! - **SevenBag**: the seven kinds are shuffled into a bag and dealt until the
//!   bag is empty, then a new bag is shuffled.
//! - **Cycle**: a fixed order repeated forever (O, I, J, L, S, Z, T unless a
//!   custom order is supplied). Fully deterministic, no RNG involved.
//!
//! The factory always holds one drawn-ahead kind so the next piece can be
//! previewed.

use std::mem;

use arrayvec::ArrayVec;

use crate::error::ConfigError;
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::types::PieceKind;

/// Default order for [`Randomizer::Cycle`].
pub const CYCLE_ORDER: [PieceKind; 7] = [
    PieceKind::O,
    PieceKind::I,
    PieceKind::J,
    PieceKind::L,
    PieceKind::S,
    PieceKind::Z,
    PieceKind::T,
];

/// Piece selection policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Randomizer {
    #[default]
    Uniform,
    SevenBag,
    Cycle,
}

impl Randomizer {
    /// Parse from a config string: `uniform`, `bag` / `7bag`, `cycle`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" | "random" => Some(Randomizer::Uniform),
            "bag" | "7bag" | "sevenbag" => Some(Randomizer::SevenBag),
            "cycle" => Some(Randomizer::Cycle),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Randomizer::Uniform => "uniform",
            Randomizer::SevenBag => "bag",
            Randomizer::Cycle => "cycle",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PieceFactory {
    randomizer: Randomizer,
    rng: SimpleRng,
    /// Kinds left in the current bag (dealt from the end)
    bag: ArrayVec<PieceKind, 7>,
    /// Order used by the cycle policy
    order: Vec<PieceKind>,
    cursor: usize,
    upcoming: PieceKind,
}

impl PieceFactory {
    pub fn new(randomizer: Randomizer, seed: u32) -> Self {
        let mut factory = Self {
            randomizer,
            rng: SimpleRng::new(seed),
            bag: ArrayVec::new(),
            order: CYCLE_ORDER.to_vec(),
            cursor: 0,
            upcoming: PieceKind::I,
        };
        factory.upcoming = factory.draw();
        factory
    }

    /// Cycle through a fixed, caller-supplied order.
    pub fn with_order(order: Vec<PieceKind>) -> Result<Self, ConfigError> {
        if order.is_empty() {
            return Err(ConfigError::EmptyPieceOrder);
        }
        let mut factory = Self::new(Randomizer::Cycle, 1);
        factory.order = order;
        factory.cursor = 0;
        factory.upcoming = factory.draw();
        Ok(factory)
    }

    pub fn randomizer(&self) -> Randomizer {
        self.randomizer
    }

    fn draw(&mut self) -> PieceKind {
        match self.randomizer {
            Randomizer::Uniform => PieceKind::ALL[self.rng.below(PieceKind::ALL.len() as u32) as usize],
            Randomizer::SevenBag => {
                if self.bag.is_empty() {
                    self.bag.extend(PieceKind::ALL);
                    self.rng.shuffle(&mut self.bag);
                }
                self.bag.pop().unwrap_or(PieceKind::I)
            }
            Randomizer::Cycle => {
                let kind = self.order[self.cursor % self.order.len()];
                self.cursor = (self.cursor + 1) % self.order.len();
                kind
            }
        }
    }

    /// Kind that the next call to [`PieceFactory::next`] will spawn.
    pub fn peek(&self) -> PieceKind {
        self.upcoming
    }

    /// Take the next kind and draw a new upcoming one.
    pub fn next_kind(&mut self) -> PieceKind {
        let drawn = self.draw();
        mem::replace(&mut self.upcoming, drawn)
    }

    /// Next piece at its spawn anchor for a grid of the given width.
    pub fn next(&mut self, grid_width: u8) -> Piece {
        Piece::spawn(self.next_kind(), grid_width)
    }

    /// Start a fresh sequence for a new game.
    ///
    /// The bag is discarded and the cycle rewound. The RNG is reseeded from its
    /// own stream, so a restarted game deals a different random sequence while
    /// staying reproducible from the original seed.
    pub fn reset(&mut self) {
        self.rng = SimpleRng::new(self.rng.next_u32());
        self.bag.clear();
        self.cursor = 0;
        self.upcoming = self.draw();
    }
}
