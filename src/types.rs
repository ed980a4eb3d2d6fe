use serde::{Deserialize, Serialize};

/// One of the two players. Dark discs are drawn as black, light discs as white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Dark,
    Light,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Dark => Side::Light,
            Side::Light => Side::Dark,
        }
    }

    /// Cell code used by the UI: 1=dark, 2=light.
    pub fn code(self) -> u8 {
        match self {
            Side::Dark => 1,
            Side::Light => 2,
        }
    }
}

/// Contents of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Empty,
    Occupied(Side),
}

impl Cell {
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Occupied(side) => side.code(),
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

/// Disc counts, always derived from a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    pub light: u8,
    pub dark: u8,
}

impl Score {
    pub fn of(&self, side: Side) -> u8 {
        match side {
            Side::Dark => self.dark,
            Side::Light => self.light,
        }
    }

    pub fn total(&self) -> u8 {
        self.light + self.dark
    }

    /// `None` on equal counts.
    pub fn leader(&self) -> Option<Side> {
        use std::cmp::Ordering;

        match self.dark.cmp(&self.light) {
            Ordering::Greater => Some(Side::Dark),
            Ordering::Less => Some(Side::Light),
            Ordering::Equal => None,
        }
    }
}

/// Turn state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "side", rename_all = "snake_case")]
pub enum Phase {
    Turn(Side),
    GameOver,
}

impl Phase {
    pub fn side_to_move(self) -> Option<Side> {
        match self {
            Phase::Turn(side) => Some(side),
            Phase::GameOver => None,
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub size: u8,
    /// Row-major cell codes: 0=empty, 1=dark, 2=light.
    pub board: Vec<u8>,
    pub current_player: Option<Side>,
    pub human_side: Side,
    pub dark_count: u8,
    pub light_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the side that just moved gets to move again because
    ///   the opponent had to pass, or when the opening side had to pass.
    /// - `false` after a normal hand-over.
    pub is_pass: bool,
    /// Discs flipped by the last move; empty after restart.
    pub flipped: Vec<Position>,
    pub last_move: Option<Position>,
    /// Legal moves of the side to move; empty once the game is over.
    pub legal_moves: Vec<Position>,
    pub opponent_pending: bool,
    pub hints_visible: bool,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// `None` for a draw.
    pub winner: Option<Side>,
    pub dark_count: u8,
    pub light_count: u8,
}
