#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use chromarow_web::BlockPuzzle;
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;
use web_sys::{MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

/// Mounts an empty board element and builds a puzzle on it.
fn puzzle(id: &str) -> BlockPuzzle {
    let document = gloo::utils::document();
    let element = document.create_element("div").unwrap();
    element.set_id(id);
    document.body().unwrap().append_child(&element).unwrap();
    BlockPuzzle::new(id, None).unwrap_or_else(|_| panic!("failed to build puzzle on #{id}"))
}

/// A primary-button mouse event at viewport position `(x, y)`.
fn mouse(kind: &str, x: f64, y: f64) -> MouseEvent {
    let init = MouseEventInit::new();
    init.set_buttons(1);
    init.set_client_x(x as i32);
    init.set_client_y(y as i32);
    MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap()
}

fn snapshot(puzzle: &BlockPuzzle) -> String {
    puzzle
        .snapshot()
        .unwrap_or_else(|_| panic!("snapshot failed"))
}

#[wasm_bindgen_test]
fn start_game_fills_the_tray() {
    let puzzle = puzzle("board-start");

    puzzle.start_game();
    let snapshot = snapshot(&puzzle);

    assert!(snapshot.contains("\"started\":true"));
    assert!(snapshot.contains("\"game_over\":false"));
    assert!(!snapshot.contains("\"tray\":[]"));
}

#[wasm_bindgen_test]
fn reset_returns_to_the_start_screen() {
    let puzzle = puzzle("board-reset");

    puzzle.start_game();
    puzzle.reset_game();

    let snapshot = snapshot(&puzzle);
    assert!(snapshot.contains("\"started\":false"));
    assert!(snapshot.contains("\"tray\":[]"));
}

#[wasm_bindgen_test]
fn unknown_board_element_is_an_error() {
    assert!(BlockPuzzle::new("no-such-board", None).is_err());
}

#[wasm_bindgen_test]
fn layout_must_have_a_positive_pitch() {
    let puzzle = puzzle("board-layout");

    assert!(puzzle.set_layout(32.0, 4.0, 8.0).is_ok());
    assert!(puzzle.set_layout(0.0, 0.0, 8.0).is_err());
}

#[wasm_bindgen_test]
async fn placement_runs_through_the_deferred_timers() {
    let received = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = received.clone();
    let on_notify = Closure::<dyn FnMut(String)>::new(move |json| sink.borrow_mut().push(json));

    let document = gloo::utils::document();
    let element = document.create_element("div").unwrap();
    element.set_id("board-timers");
    document.body().unwrap().append_child(&element).unwrap();
    let puzzle = BlockPuzzle::new(
        "board-timers",
        Some(on_notify.as_ref().unchecked_ref::<js_sys::Function>().clone()),
    )
    .unwrap_or_else(|_| panic!("failed to build puzzle"));
    puzzle.start_game();

    let state: serde_json::Value = serde_json::from_str(&snapshot(&puzzle)).unwrap();
    let id = state["tray"][0]["id"].as_u64().unwrap() as u32;

    // Center of cell (0, 0) with the default 16px padding and 40px cells.
    let rect = element.get_bounding_client_rect();
    let (x, y) = (rect.left() + 36.0, rect.top() + 36.0);
    assert!(puzzle.pointer_down(id, &mouse("pointerdown", x, y)));
    puzzle.pointer_move(&mouse("pointermove", x, y));
    assert!(puzzle.pointer_up(&mouse("pointerup", x, y)));

    // Past both the row check and a compaction deadline.
    TimeoutFuture::new(700).await;

    let state: serde_json::Value = serde_json::from_str(&snapshot(&puzzle)).unwrap();
    assert_ne!(state["grid"][0][0], "Empty");
    assert_eq!(state["started"], true);
    assert_eq!(state["tray"].as_array().map(Vec::len), Some(3));
    assert!(received.borrow().iter().any(|json| json.contains("PiecePlaced")));

    puzzle.reset_game();
    TimeoutFuture::new(200).await;
    assert!(snapshot(&puzzle).contains("\"started\":false"));
}
