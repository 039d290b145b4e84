use bitflags::bitflags;
use chromarow_core::Point;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent, TouchEvent};

use crate::utils::element_origin;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq)]
    pub(crate) struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

/// Pointer location of a mouse, pointer, or touch event in viewport coordinates.
pub(crate) fn event_point(event: &Event) -> Option<Point> {
    if let Some(touch_event) = event.dyn_ref::<TouchEvent>() {
        // A lifted finger is only listed in `changedTouches`.
        let touch = touch_event
            .touches()
            .get(0)
            .or_else(|| touch_event.changed_touches().get(0))?;
        return Some(Point::new(touch.client_x().into(), touch.client_y().into()));
    }

    // Pointer events are mouse events too.
    let mouse_event = event.dyn_ref::<MouseEvent>()?;
    Some(Point::new(
        mouse_event.client_x().into(),
        mouse_event.client_y().into(),
    ))
}

/// Whether a press should pick a piece up: any touch, or the primary mouse button.
pub(crate) fn is_drag_press(event: &Event) -> bool {
    if event.dyn_ref::<TouchEvent>().is_some() {
        return true;
    }
    event
        .dyn_ref::<MouseEvent>()
        .is_some_and(|mouse_event| is_primary_press(mouse_event.buttons()))
}

pub(crate) fn is_primary_press(buttons: u16) -> bool {
    MouseButtons::from_bits_truncate(buttons).contains(MouseButtons::LEFT)
}

/// Top-left corner of the element the handler was attached to.
pub(crate) fn target_origin(event: &Event) -> Option<Point> {
    let target = event.current_target()?;
    let element = target.dyn_ref::<Element>()?;
    Some(element_origin(element))
}
