//! Windows pointer injection via `SetCursorPos` and `SendInput`.
//!
//! Cursor motion uses `SetCursorPos`, which takes absolute virtual-desktop
//! coordinates directly.  Button and wheel events use `SendInput` with
//! `MOUSEINPUT` records; the wheel delta already uses Windows'
//! `WHEEL_DELTA` (±120 per notch) convention, so it passes through as-is.

use deskmirror_core::{Point, PointerButton};

use crate::application::forward_input::{InjectionError, PlatformPointerInjector};

use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_MOUSE, MOUSEEVENTF_LEFTDOWN, MOUSEEVENTF_LEFTUP,
    MOUSEEVENTF_MIDDLEDOWN, MOUSEEVENTF_MIDDLEUP, MOUSEEVENTF_RIGHTDOWN, MOUSEEVENTF_RIGHTUP,
    MOUSEEVENTF_WHEEL, MOUSEINPUT, MOUSE_EVENT_FLAGS,
};
use windows::Win32::UI::WindowsAndMessaging::SetCursorPos;

/// Windows implementation of [`PlatformPointerInjector`].
pub struct WindowsPointerInjector;

impl WindowsPointerInjector {
    /// Creates a new `WindowsPointerInjector`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsPointerInjector {
    fn default() -> Self {
        Self::new()
    }
}

/// Sends one mouse input record, mapping a zero-events-sent result to an error.
fn send_mouse_input(flags: MOUSE_EVENT_FLAGS, mouse_data: u32) -> Result<(), InjectionError> {
    let input = INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx: 0,
                dy: 0,
                mouseData: mouse_data,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };

    // SAFETY: the INPUT array lives on the stack for the duration of the call.
    let sent = unsafe { SendInput(&[input], std::mem::size_of::<INPUT>() as i32) };
    if sent == 0 {
        return Err(InjectionError::Platform("SendInput injected no events".to_string()));
    }
    Ok(())
}

impl PlatformPointerInjector for WindowsPointerInjector {
    fn inject_move(&self, position: Point) -> Result<(), InjectionError> {
        // SAFETY: SetCursorPos takes plain coordinates and has no pointer
        // arguments.
        unsafe {
            SetCursorPos(position.x, position.y)
                .map_err(|e| InjectionError::Platform(format!("SetCursorPos failed: {e}")))
        }
    }

    fn inject_button(
        &self,
        button: PointerButton,
        pressed: bool,
        _position: Point,
    ) -> Result<(), InjectionError> {
        let flags = match (button, pressed) {
            (PointerButton::Primary, true) => MOUSEEVENTF_LEFTDOWN,
            (PointerButton::Primary, false) => MOUSEEVENTF_LEFTUP,
            (PointerButton::Secondary, true) => MOUSEEVENTF_RIGHTDOWN,
            (PointerButton::Secondary, false) => MOUSEEVENTF_RIGHTUP,
            (PointerButton::Middle, true) => MOUSEEVENTF_MIDDLEDOWN,
            (PointerButton::Middle, false) => MOUSEEVENTF_MIDDLEUP,
            // The use case drops Other before injection.
            (PointerButton::Other, _) => return Ok(()),
        };
        send_mouse_input(flags, 0)
    }

    fn inject_wheel(&self, delta: i32, _position: Point) -> Result<(), InjectionError> {
        send_mouse_input(MOUSEEVENTF_WHEEL, delta as u32)
    }
}
