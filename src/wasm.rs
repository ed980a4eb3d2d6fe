//! Browser bindings. A single game lives behind a global lock; the UI
//! drives it through these functions and renders the returned state.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::GameInstance;

static GAME: Lazy<Mutex<Option<GameInstance>>> = Lazy::new(|| Mutex::new(None));

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

fn with_game<T>(f: impl FnOnce(&mut GameInstance) -> Result<T, JsValue>) -> Result<T, JsValue> {
    let mut guard = GAME.lock().map_err(to_js_error)?;
    let game = guard
        .as_mut()
        .ok_or_else(|| JsValue::from_str("game not initialized"))?;
    f(game)
}

/// Starts a new game. `config` may be `undefined` or a partial object.
#[wasm_bindgen]
pub fn new_game(config: JsValue) -> Result<JsValue, JsValue> {
    let config: GameConfig = if config.is_undefined() || config.is_null() {
        GameConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config).map_err(to_js_error)?
    };

    let game = GameInstance::with_random_opponent(config).map_err(to_js_error)?;
    let state = to_js(&game.to_game_state())?;

    let mut guard = GAME.lock().map_err(to_js_error)?;
    *guard = Some(game);
    Ok(state)
}

#[wasm_bindgen]
pub fn get_state() -> Result<JsValue, JsValue> {
    with_game(|game| to_js(&game.to_game_state()))
}

#[wasm_bindgen]
pub fn get_legal_moves() -> Result<JsValue, JsValue> {
    with_game(|game| to_js(&game.legal_moves()))
}

/// Human move. Rejected clicks return an error and change nothing.
#[wasm_bindgen]
pub fn place(row: u8, col: u8) -> Result<JsValue, JsValue> {
    with_game(|game| {
        game.place(row, col).map_err(to_js_error)?;
        to_js(&game.to_game_state())
    })
}

/// Call periodically; plays the computer move once its delay is over.
/// Returns `true` when a move was played.
#[wasm_bindgen]
pub fn tick() -> Result<bool, JsValue> {
    with_game(|game| game.tick().map_err(to_js_error))
}

#[wasm_bindgen]
pub fn ai_move() -> Result<JsValue, JsValue> {
    with_game(|game| {
        game.do_ai_move().map_err(to_js_error)?;
        to_js(&game.to_game_state())
    })
}

#[wasm_bindgen]
pub fn toggle_hints() -> Result<bool, JsValue> {
    with_game(|game| Ok(game.toggle_hints()))
}

#[wasm_bindgen]
pub fn restart() -> Result<JsValue, JsValue> {
    with_game(|game| {
        game.restart().map_err(to_js_error)?;
        to_js(&game.to_game_state())
    })
}

#[wasm_bindgen]
pub fn get_result() -> Result<JsValue, JsValue> {
    with_game(|game| to_js(&game.to_game_result()))
}
