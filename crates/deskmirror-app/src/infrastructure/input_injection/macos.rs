//! macOS pointer injection via Core Graphics events.
//!
//! Builds `CGEvent`s and posts them to the HID event tap.  Wheel deltas
//! arrive in the ±120-per-notch convention and are converted to line
//! scroll units before posting.

use deskmirror_core::{Point, PointerButton, WHEEL_NOTCH};

use crate::application::forward_input::{InjectionError, PlatformPointerInjector};

use core_graphics::event::{
    CGEvent, CGEventTapLocation, CGEventType, CGMouseButton, ScrollEventUnit,
};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use core_graphics::geometry::CGPoint;

/// macOS Core Graphics implementation of [`PlatformPointerInjector`].
pub struct MacosPointerInjector;

impl MacosPointerInjector {
    /// Creates a new `MacosPointerInjector`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for MacosPointerInjector {
    fn default() -> Self {
        Self::new()
    }
}

fn event_source() -> Result<CGEventSource, InjectionError> {
    CGEventSource::new(CGEventSourceStateID::HIDSystemState)
        .map_err(|_| InjectionError::Platform("CGEventSource creation failed".to_string()))
}

fn cg_point(position: Point) -> CGPoint {
    CGPoint::new(position.x as f64, position.y as f64)
}

impl PlatformPointerInjector for MacosPointerInjector {
    fn inject_move(&self, position: Point) -> Result<(), InjectionError> {
        let event = CGEvent::new_mouse_event(
            event_source()?,
            CGEventType::MouseMoved,
            cg_point(position),
            CGMouseButton::Left,
        )
        .map_err(|_| InjectionError::Platform("mouse move event creation failed".to_string()))?;
        event.post(CGEventTapLocation::HID);
        Ok(())
    }

    fn inject_button(
        &self,
        button: PointerButton,
        pressed: bool,
        position: Point,
    ) -> Result<(), InjectionError> {
        let (event_type, cg_button) = match (button, pressed) {
            (PointerButton::Primary, true) => (CGEventType::LeftMouseDown, CGMouseButton::Left),
            (PointerButton::Primary, false) => (CGEventType::LeftMouseUp, CGMouseButton::Left),
            (PointerButton::Secondary, true) => (CGEventType::RightMouseDown, CGMouseButton::Right),
            (PointerButton::Secondary, false) => (CGEventType::RightMouseUp, CGMouseButton::Right),
            (PointerButton::Middle, true) => (CGEventType::OtherMouseDown, CGMouseButton::Center),
            (PointerButton::Middle, false) => (CGEventType::OtherMouseUp, CGMouseButton::Center),
            // The use case drops Other before injection.
            (PointerButton::Other, _) => return Ok(()),
        };

        let event = CGEvent::new_mouse_event(event_source()?, event_type, cg_point(position), cg_button)
            .map_err(|_| InjectionError::Platform("mouse button event creation failed".to_string()))?;
        event.post(CGEventTapLocation::HID);
        Ok(())
    }

    fn inject_wheel(&self, delta: i32, _position: Point) -> Result<(), InjectionError> {
        let lines = delta / WHEEL_NOTCH;
        let lines = if lines == 0 { delta.signum() } else { lines };

        let event = CGEvent::new_scroll_event(event_source()?, ScrollEventUnit::LINE, 1, lines, 0, 0)
            .map_err(|_| InjectionError::Platform("scroll event creation failed".to_string()))?;
        event.post(CGEventTapLocation::HID);
        Ok(())
    }
}
