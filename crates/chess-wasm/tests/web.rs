//! Browser tests, run with `wasm-pack test --headless --firefox crates/chess-wasm`.

#![cfg(target_arch = "wasm32")]

use chess_wasm::ChessTable;
use serde_json::{json, Value};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn to_json(value: JsValue) -> Value {
    serde_wasm_bindgen::from_value(value).unwrap()
}

#[wasm_bindgen_test]
fn click_returns_plain_objects() {
    let table = ChessTable::new();
    let selected = to_json(table.click_square("e2").unwrap());
    assert_eq!(
        selected,
        json!({ "type": "selected", "square": "e2", "targets": ["e3", "e4"] })
    );

    let moved = to_json(table.click_square("e4").unwrap());
    assert_eq!(moved["type"], "moved");
    assert_eq!(moved["gameOver"], false);
    assert_eq!(table.side_to_move(), "black");
}

#[wasm_bindgen_test]
fn board_lists_every_piece() {
    let table = ChessTable::new();
    let board = to_json(table.board().unwrap());
    assert_eq!(board.as_array().map(|a| a.len()), Some(32));
}

#[wasm_bindgen_test]
fn bad_fen_is_an_error() {
    assert!(ChessTable::from_fen("not a fen").is_err());
}
