use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chromarow_core::{Drag, DropOutcome, LayoutGeometry, Notification, PieceId, Point, PuzzleEngine};
use core::time::Duration;
use gloo::timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event};
use web_time::Instant;

use crate::input;
use crate::utils::{element_origin, js_random_seed, location_hash};
use crate::Args;

struct Inner {
    engine: PuzzleEngine,
    started_at: Instant,
    grid_element: Element,
    on_notify: Option<js_sys::Function>,
    timer: Option<Timeout>,
}

impl Inner {
    fn now(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Catches up on deferred tasks and re-reads where the board sits on screen.
    fn sync(&mut self) {
        let now = self.now();
        self.engine.advance_to(now);

        let origin = element_origin(&self.grid_element);
        let geometry = self.engine.geometry().with_origin(origin);
        if let Err(err) = self.engine.set_geometry(geometry) {
            log::warn!("ignoring board position {:?}: {}", origin, err);
        }
    }
}

/// Block puzzle handle for a JavaScript UI.
///
/// The UI forwards pointer events and renders from [`BlockPuzzle::snapshot`];
/// feedback events arrive as JSON strings through the `on_notify` callback.
#[wasm_bindgen]
pub struct BlockPuzzle {
    inner: Rc<RefCell<Inner>>,
}

#[wasm_bindgen]
impl BlockPuzzle {
    #[wasm_bindgen(constructor)]
    pub fn new(
        grid_element_id: &str,
        on_notify: Option<js_sys::Function>,
    ) -> Result<BlockPuzzle, JsError> {
        let grid_element = gloo::utils::document()
            .get_element_by_id(grid_element_id)
            .ok_or_else(|| JsError::new(&format!("no element with id \"{grid_element_id}\"")))?;

        let args = Args::from_hash(&location_hash())?;
        let config = args.engine_config(js_random_seed);
        log::debug!("engine config: {:?}", config);

        let inner = Inner {
            engine: PuzzleEngine::new(config),
            started_at: Instant::now(),
            grid_element,
            on_notify,
            timer: None,
        };
        Ok(Self {
            inner: Rc::new(RefCell::new(inner)),
        })
    }

    #[wasm_bindgen(js_name = startGame)]
    pub fn start_game(&self) {
        self.update(|engine| engine.start_game());
    }

    #[wasm_bindgen(js_name = resetGame)]
    pub fn reset_game(&self) {
        self.update(|engine| engine.reset_game());
    }

    /// Starts dragging tray piece `piece_id`; attach this to the piece element.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, piece_id: u32, event: &Event) -> bool {
        if !input::is_drag_press(event) {
            return false;
        }
        let Some(at) = input::event_point(event) else {
            return false;
        };
        let origin = input::target_origin(event).unwrap_or(at);

        let started = self.update(|engine| engine.pointer_down(PieceId(piece_id), at, origin));
        if started {
            event.prevent_default();
            event.stop_propagation();
        }
        started
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, event: &Event) {
        let Some(at) = input::event_point(event) else {
            return;
        };
        let dragging = self.update(|engine| {
            engine.pointer_move(at);
            engine.drag().is_dragging()
        });
        if dragging {
            event.prevent_default();
        }
    }

    /// Drops the dragged piece. Returns whether it was placed.
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self, event: &Event) -> bool {
        let Some(at) = input::event_point(event) else {
            // Still end the drag so it can never get stuck.
            let last = self.inner.borrow().engine.drag().drag().map(Drag::pointer);
            return last.is_some_and(|at| self.release(at));
        };
        self.release(at)
    }

    /// Overrides the cell size, gap, and padding used for hit-testing.
    #[wasm_bindgen(js_name = setLayout)]
    pub fn set_layout(&self, cell_size: f64, gap: f64, padding: f64) -> Result<(), JsError> {
        let mut inner = self.inner.borrow_mut();
        let origin = element_origin(&inner.grid_element);
        let geometry = LayoutGeometry::new(origin, cell_size, gap, padding)?;
        inner.engine.set_geometry(geometry)?;
        Ok(())
    }

    /// Current game state as JSON.
    pub fn snapshot(&self) -> Result<String, JsError> {
        let snapshot = self.inner.borrow().engine.snapshot();
        Ok(serde_json::to_string(&snapshot)?)
    }

    /// Whether `row`/`col` lies under the preview of the dragged piece.
    #[wasm_bindgen(js_name = isPreviewCell)]
    pub fn is_preview_cell(&self, row: u8, col: u8) -> bool {
        let inner = self.inner.borrow();
        inner
            .engine
            .drag()
            .drag()
            .is_some_and(|drag| drag.is_preview_cell((row, col)))
    }
}

impl BlockPuzzle {
    fn release(&self, at: Point) -> bool {
        let outcome = self.update(|engine| engine.pointer_up(at));
        log::debug!("drop outcome: {:?}", outcome);
        matches!(outcome, DropOutcome::Placed { .. })
    }

    /// Runs `f` against the engine after syncing it, then reports and re-arms the timer.
    fn update<R>(&self, f: impl FnOnce(&mut PuzzleEngine) -> R) -> R {
        let result = {
            let mut inner = self.inner.borrow_mut();
            inner.sync();
            f(&mut inner.engine)
        };
        after_update(&self.inner);
        result
    }
}

fn after_update(inner: &Rc<RefCell<Inner>>) {
    let (notifications, on_notify) = {
        let mut guard = inner.borrow_mut();
        let notifications = guard.engine.take_notifications();
        (notifications, guard.on_notify.clone())
    };
    if let Some(on_notify) = on_notify {
        dispatch(&on_notify, &notifications);
    }
    rearm(inner);
}

/// Hands notifications to the UI. Runs with no borrow held, so the callback may call back in.
fn dispatch(on_notify: &js_sys::Function, notifications: &[Notification]) {
    for notification in notifications {
        let json = match serde_json::to_string(notification) {
            Ok(json) => json,
            Err(err) => {
                log::error!("failed to encode {:?}: {}", notification, err);
                continue;
            }
        };
        if let Err(err) = on_notify.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
            log::error!("notification callback failed: {:?}", err);
        }
    }
}

/// Schedules a browser timeout for the engine's next deferred task.
fn rearm(inner: &Rc<RefCell<Inner>>) {
    let delay = {
        let mut guard = inner.borrow_mut();
        guard.timer = None;
        let now = guard.now();
        guard
            .engine
            .next_deadline()
            .map(|due| due.saturating_sub(now))
    };
    let Some(delay) = delay else {
        return;
    };

    let weak: Weak<RefCell<Inner>> = Rc::downgrade(inner);
    let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
    let timeout = Timeout::new(millis, move || {
        if let Some(inner) = weak.upgrade() {
            inner.borrow_mut().sync();
            after_update(&inner);
        }
    });
    inner.borrow_mut().timer = Some(timeout);
}
