//! Linux pointer injection via the XTest extension.
//!
//! Uses `XTestFakeMotionEvent` and `XTestFakeButtonEvent` to synthesize
//! pointer input in the X11 session.
//!
//! # What is XTest? (for beginners)
//!
//! XTest is an X11 protocol extension that lets a process synthesize input
//! events as if the user had physically moved the mouse.  The events are
//! delivered exactly like real input — the receiving application cannot
//! tell them apart from hardware events.
//!
//! # Wheel turns via button events
//!
//! X11 has no dedicated scroll API.  Wheel turns are button press+release
//! pairs: button 4 scrolls up, button 5 scrolls down.  Deltas arrive in
//! the ±120-per-notch convention, so the delta is divided by 120 to get
//! the number of click pairs to send (at least one for any non-zero
//! delta).
//!
//! # Connection handling
//!
//! Each call opens and closes its own display connection, keeping the
//! injector free of raw pointers so it stays `Send + Sync`.  Injection
//! happens at most a few times per operator gesture; connection setup is
//! negligible at that rate.

use deskmirror_core::{Point, PointerButton, WHEEL_NOTCH};

use crate::application::forward_input::{InjectionError, PlatformPointerInjector};

/// `CurrentTime` (0): let the server timestamp the synthetic event.
const CURRENT_TIME: u64 = 0;

/// Screen number `-1`: deliver motion on whichever screen holds the pointer.
const SCREEN_DEFAULT: i32 = -1;

/// X11 button numbering for the buttons the app forwards.
const X_BUTTON_LEFT: u32 = 1;
const X_BUTTON_MIDDLE: u32 = 2;
const X_BUTTON_RIGHT: u32 = 3;
const X_BUTTON_SCROLL_UP: u32 = 4;
const X_BUTTON_SCROLL_DOWN: u32 = 5;

/// Linux XTest implementation of [`PlatformPointerInjector`].
pub struct LinuxXTestInjector;

impl LinuxXTestInjector {
    /// Creates a new `LinuxXTestInjector`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LinuxXTestInjector {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `f` against a freshly opened X display, flushing before close.
fn with_display<F>(f: F) -> Result<(), InjectionError>
where
    F: FnOnce(*mut x11::xlib::Display),
{
    use x11::xlib;

    // SAFETY: null display name means "use $DISPLAY"; closed below.
    let display = unsafe { xlib::XOpenDisplay(std::ptr::null()) };
    if display.is_null() {
        return Err(InjectionError::Platform("XOpenDisplay failed".to_string()));
    }

    f(display);

    // SAFETY: `display` is valid; flush pushes the queued fake events to
    // the server before the connection goes away.
    unsafe {
        xlib::XFlush(display);
        xlib::XCloseDisplay(display);
    }
    Ok(())
}

fn x_button(button: PointerButton) -> u32 {
    match button {
        PointerButton::Primary => X_BUTTON_LEFT,
        PointerButton::Middle => X_BUTTON_MIDDLE,
        PointerButton::Secondary => X_BUTTON_RIGHT,
        // The use case drops Other before injection; mapping it to the
        // left button keeps this function total.
        PointerButton::Other => X_BUTTON_LEFT,
    }
}

impl PlatformPointerInjector for LinuxXTestInjector {
    fn inject_move(&self, position: Point) -> Result<(), InjectionError> {
        with_display(|display| {
            // SAFETY: `display` is a valid connection owned by with_display.
            unsafe {
                x11::xtest::XTestFakeMotionEvent(
                    display,
                    SCREEN_DEFAULT,
                    position.x,
                    position.y,
                    CURRENT_TIME,
                );
            }
        })
    }

    fn inject_button(
        &self,
        button: PointerButton,
        pressed: bool,
        _position: Point,
    ) -> Result<(), InjectionError> {
        let xbutton = x_button(button);
        with_display(|display| {
            // SAFETY: `display` is a valid connection owned by with_display.
            unsafe {
                x11::xtest::XTestFakeButtonEvent(display, xbutton, pressed as i32, CURRENT_TIME);
            }
        })
    }

    fn inject_wheel(&self, delta: i32, _position: Point) -> Result<(), InjectionError> {
        if delta == 0 {
            return Ok(());
        }
        let xbutton = if delta > 0 {
            X_BUTTON_SCROLL_UP
        } else {
            X_BUTTON_SCROLL_DOWN
        };
        let clicks = (delta.unsigned_abs() / WHEEL_NOTCH as u32).max(1);

        with_display(|display| {
            for _ in 0..clicks {
                // SAFETY: `display` is a valid connection owned by with_display.
                unsafe {
                    x11::xtest::XTestFakeButtonEvent(display, xbutton, 1, CURRENT_TIME);
                    x11::xtest::XTestFakeButtonEvent(display, xbutton, 0, CURRENT_TIME);
                }
            }
        })
    }
}
