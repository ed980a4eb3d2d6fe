use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::GameConfig;
pub use error::EngineError;
pub use game::GameInstance;
pub use types::{Cell, GameResult, GameState, Phase, Position, Score, Side};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
