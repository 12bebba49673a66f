//! Mock pointer injector for unit testing.
//!
//! The real injectors make OS calls that move the cursor and press buttons
//! on the machine running the tests.  The mock records every call in a
//! `Mutex<Vec<...>>` instead, so assertions can inspect exactly what was
//! injected and in what order.
//!
//! Set `should_fail = true` to make every method return a `Platform`
//! error; this exercises the error-swallowing paths in the use case.

use std::sync::Mutex;

use deskmirror_core::{Point, PointerButton};

use crate::application::forward_input::{InjectionError, PlatformPointerInjector};

/// A mock injector that records all calls without touching the OS.
#[derive(Default)]
pub struct MockPointerInjector {
    /// Records each absolute position passed to `inject_move`.
    pub moves: Mutex<Vec<Point>>,
    /// Records (button, pressed, position) tuples from `inject_button`.
    pub buttons: Mutex<Vec<(PointerButton, bool, Point)>>,
    /// Records (delta, position) pairs from `inject_wheel`.
    pub wheels: Mutex<Vec<(i32, Point)>>,
    /// When `true`, every method fails with an `InjectionError::Platform`.
    pub should_fail: bool,
}

impl MockPointerInjector {
    /// Creates a new mock with empty records and `should_fail = false`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlatformPointerInjector for MockPointerInjector {
    /// Records the move, or fails if `should_fail` is set.
    fn inject_move(&self, position: Point) -> Result<(), InjectionError> {
        if self.should_fail {
            return Err(InjectionError::Platform("mock failure".into()));
        }
        self.moves.lock().unwrap().push(position);
        Ok(())
    }

    /// Records the button event, or fails if `should_fail` is set.
    fn inject_button(
        &self,
        button: PointerButton,
        pressed: bool,
        position: Point,
    ) -> Result<(), InjectionError> {
        if self.should_fail {
            return Err(InjectionError::Platform("mock failure".into()));
        }
        self.buttons.lock().unwrap().push((button, pressed, position));
        Ok(())
    }

    /// Records the wheel delta, or fails if `should_fail` is set.
    fn inject_wheel(&self, delta: i32, position: Point) -> Result<(), InjectionError> {
        if self.should_fail {
            return Err(InjectionError::Platform("mock failure".into()));
        }
        self.wheels.lock().unwrap().push((delta, position));
        Ok(())
    }
}
