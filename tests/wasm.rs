#![cfg(target_arch = "wasm32")]

use js_sys::{Object, Reflect};
use othello_engine::wasm;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn field(value: &JsValue, name: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(name)).unwrap()
}

#[wasm_bindgen_test]
fn new_game_defaults_to_six_by_six() {
    let state = wasm::new_game(JsValue::UNDEFINED).unwrap();

    assert_eq!(field(&state, "size").as_f64(), Some(6.0));
    assert_eq!(field(&state, "dark_count").as_f64(), Some(2.0));
    assert_eq!(field(&state, "is_game_over").as_bool(), Some(false));
    assert!(othello_engine::wasm_ready());
}

#[wasm_bindgen_test]
fn partial_config_selects_board_size() {
    let config = Object::new();
    Reflect::set(&config, &"board_size".into(), &JsValue::from_f64(8.0)).unwrap();

    let state = wasm::new_game(config.into()).unwrap();

    assert_eq!(field(&state, "size").as_f64(), Some(8.0));
}

#[wasm_bindgen_test]
fn illegal_click_is_rejected() {
    wasm::new_game(JsValue::UNDEFINED).unwrap();

    let err = wasm::place(0, 0).unwrap_err();

    assert_eq!(err.as_string().as_deref(), Some("illegal move at (0, 0)"));
}

#[wasm_bindgen_test]
fn human_move_then_ai_reply() {
    wasm::new_game(JsValue::UNDEFINED).unwrap();

    let state = wasm::place(1, 2).unwrap();
    assert_eq!(field(&state, "opponent_pending").as_bool(), Some(true));

    let state = wasm::ai_move().unwrap();
    assert!(field(&state, "last_move").is_object());
    assert_eq!(wasm::toggle_hints().unwrap(), true);
}
