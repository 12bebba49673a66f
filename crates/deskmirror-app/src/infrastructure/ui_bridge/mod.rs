//! UI command bridge: exposes application-layer operations to a frontend shell.
//!
//! All frontend-facing command functions live here and delegate to the shared
//! [`AppState`].  The presentation layer (the windowing shell rendering the
//! preview) is the only consumer of this module; it must NOT be imported by
//! the application or domain layers.
//!
//! # Data Transfer Objects (DTOs)
//!
//! The Rust backend uses internal types (e.g., `DisplayHandle`, `Rect`) that
//! a frontend should not depend on directly.  DTOs are simple structs that:
//!
//! - Contain only plainly serialisable fields (`String`, `i32`, `u32`, etc.)
//! - Are defined using `#[derive(Serialize, Deserialize)]` so any shell can
//!   convert them to/from JSON.
//!
//! # `CommandResult<T>` wrapper
//!
//! All commands return `CommandResult<T>` rather than `Result<T, E>`.  This
//! ensures every command response has the same shape:
//! `{ success: bool, data: T | null, error: string | null }`, so a frontend
//! can always safely check `result.success` first.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use deskmirror_core::{DisplayHandle, Point, PointerButton, PointerGesture, Size};

use crate::application::capture_session::{CaptureScheduler, FrameSource};
use crate::application::forward_input::InputInjector;
use crate::application::preview::PreviewSurface;
use crate::infrastructure::display_registry::DisplayRegistry;
use crate::infrastructure::storage::config::AppConfig;

// ── Shared application state ──────────────────────────────────────────────────

/// Application state shared between the runtime loop and UI commands.
///
/// All mutable fields are `Mutex<...>` (async Tokio mutex) because commands
/// run in an async Tokio context and the capture loop holds the same state
/// concurrently.  `tokio::sync::Mutex` suspends the async task while waiting
/// instead of blocking the OS thread.
pub struct AppState {
    /// Drives bind / start / stop / tick for the capture session.
    pub scheduler: Mutex<CaptureScheduler>,
    /// The preview model: latest frame, coordinate mapper, cursor overlay.
    pub preview: Mutex<PreviewSurface>,
    /// Translates surface-space pointer intents into OS input events.
    pub injector: Mutex<InputInjector>,
    /// Read-only view of the attached displays.
    pub registry: DisplayRegistry,
    /// The in-memory configuration; persisted separately via the storage layer.
    pub config: Mutex<AppConfig>,
    /// Process start instant; all scheduler timestamps are measured from it.
    epoch: Instant,
}

impl AppState {
    /// Assembles the shared state from already-constructed use cases.
    pub fn new(
        source: FrameSource,
        injector: InputInjector,
        registry: DisplayRegistry,
        config: AppConfig,
    ) -> Arc<Self> {
        let surface = Size::new(config.preview.surface_width, config.preview.surface_height);
        Arc::new(Self {
            scheduler: Mutex::new(CaptureScheduler::new(source, config.capture.target_fps)),
            preview: Mutex::new(PreviewSurface::new(surface)),
            injector: Mutex::new(injector),
            registry,
            config: Mutex::new(config),
            epoch: Instant::now(),
        })
    }

    /// Milliseconds elapsed since the state was created.
    pub fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}

// ── Data Transfer Objects (presentation layer) ────────────────────────────────

/// DTO describing one attached display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayDto {
    pub index: i32,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Human-readable label, e.g. `"Display 1 - 1920x1080 at 1920,0"`.
    pub label: String,
}

impl From<&DisplayHandle> for DisplayDto {
    fn from(d: &DisplayHandle) -> Self {
        Self {
            index: d.index,
            x: d.geometry.x,
            y: d.geometry.y,
            width: d.geometry.width,
            height: d.geometry.height,
            label: d.to_string(),
        }
    }
}

/// DTO snapshotting the capture pipeline for a status bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureStatusDto {
    pub running: bool,
    pub target_fps: u32,
    pub current_fps: u32,
    /// Label of the bound display, if any.
    pub display: Option<String>,
    pub frame_width: u32,
    pub frame_height: u32,
}

/// DTO for a pointer gesture arriving from the frontend in surface pixels.
///
/// `kind` is one of `"move"`, `"press"`, `"release"`, `"wheel"`; `button`
/// is one of `"primary"`, `"secondary"`, `"middle"` (anything else maps to
/// `Other`, which the pipeline drops); `delta` carries wheel rotation in
/// ±120-per-notch units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureDto {
    pub kind: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub button: Option<String>,
    #[serde(default)]
    pub delta: Option<i32>,
}

/// Unified response wrapper used by UI commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Returns all attached displays for the selection dropdown.
pub async fn get_displays(state: Arc<AppState>) -> CommandResult<Vec<DisplayDto>> {
    match state.registry.list_displays() {
        Ok(displays) => CommandResult::ok(displays.iter().map(DisplayDto::from).collect()),
        Err(e) => CommandResult::err(format!("display enumeration failed: {e}")),
    }
}

/// Returns a snapshot of the capture pipeline state.
pub async fn get_status(state: Arc<AppState>) -> CommandResult<CaptureStatusDto> {
    let scheduler = state.scheduler.lock().await;
    let preview = state.preview.lock().await;

    let frame_size = preview.mapper().frame_size();
    CommandResult::ok(CaptureStatusDto {
        running: scheduler.is_running(),
        target_fps: scheduler.target_fps(),
        current_fps: scheduler.current_fps(),
        display: scheduler.bound_display().map(|d| d.to_string()),
        frame_width: frame_size.width,
        frame_height: frame_size.height,
    })
}

/// Binds the capture pipeline (and input forwarding) to `index`.
///
/// A running capture of a different display is stopped first; binding to
/// a nonexistent index fails and leaves any previous binding in place.
pub async fn select_display(state: Arc<AppState>, index: i32) -> CommandResult<DisplayDto> {
    let mut scheduler = state.scheduler.lock().await;
    if !scheduler.bind(index) {
        return CommandResult::err(format!("no display at index {index}"));
    }

    // bind() returned true, so a display handle is guaranteed present.
    let Some(display) = scheduler.bound_display() else {
        return CommandResult::err("binding lost after selection".to_string());
    };

    let mut injector = state.injector.lock().await;
    injector.bind(&display);

    let mut config = state.config.lock().await;
    config.capture.display_index = index;

    CommandResult::ok(DisplayDto::from(&display))
}

/// Applies a new target frame rate, returning the clamped value in effect.
pub async fn set_target_fps(state: Arc<AppState>, requested: u32) -> CommandResult<u32> {
    let mut scheduler = state.scheduler.lock().await;
    scheduler.set_target_fps(requested, state.now_ms());
    let effective = scheduler.target_fps();

    let mut config = state.config.lock().await;
    config.capture.target_fps = effective;

    CommandResult::ok(effective)
}

/// Starts the capture loop; a no-op if already running or unbound.
pub async fn start_capture(state: Arc<AppState>) -> CommandResult<bool> {
    let mut scheduler = state.scheduler.lock().await;
    if scheduler.bound_display().is_none() {
        return CommandResult::err("no display selected".to_string());
    }
    scheduler.start(state.now_ms());
    CommandResult::ok(scheduler.is_running())
}

/// Stops the capture loop; idempotent.
pub async fn stop_capture(state: Arc<AppState>) -> CommandResult<()> {
    let mut scheduler = state.scheduler.lock().await;
    scheduler.stop();
    CommandResult::ok(())
}

/// Resizes the preview surface, recomputing the letterbox mapping.
pub async fn resize_preview(state: Arc<AppState>, width: u32, height: u32) -> CommandResult<()> {
    let mut preview = state.preview.lock().await;
    preview.set_surface_size(Size::new(width, height));
    CommandResult::ok(())
}

/// Forwards a pointer gesture from the preview surface to the mirrored
/// display, returning the number of input events injected.
///
/// Gestures arriving while no frame has been shown yet are dropped.
pub async fn forward_gesture(state: Arc<AppState>, dto: GestureDto) -> CommandResult<usize> {
    let gesture = match parse_gesture(&dto) {
        Ok(g) => g,
        Err(e) => return CommandResult::err(e),
    };

    let intents = {
        let preview = state.preview.lock().await;
        preview.handle_gesture(gesture)
    };

    let injected = intents.len();
    let mut injector = state.injector.lock().await;
    for intent in intents {
        injector.handle(intent);
    }
    CommandResult::ok(injected)
}

fn parse_gesture(dto: &GestureDto) -> Result<PointerGesture, String> {
    let position = Point::new(dto.x, dto.y);
    match dto.kind.as_str() {
        "move" => Ok(PointerGesture::Move { position }),
        "press" => Ok(PointerGesture::Press {
            position,
            button: parse_button(dto.button.as_deref()),
        }),
        "release" => Ok(PointerGesture::Release {
            position,
            button: parse_button(dto.button.as_deref()),
        }),
        "wheel" => Ok(PointerGesture::Wheel {
            position,
            delta: dto.delta.ok_or_else(|| "wheel gesture requires delta".to_string())?,
        }),
        other => Err(format!("unknown gesture kind: {other}")),
    }
}

fn parse_button(name: Option<&str>) -> PointerButton {
    match name {
        Some("primary") => PointerButton::Primary,
        Some("secondary") => PointerButton::Secondary,
        Some("middle") => PointerButton::Middle,
        _ => PointerButton::Other,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::forward_input::PlatformPointerInjector;
    use crate::infrastructure::display_registry::MockDisplayEnumerator;
    use crate::infrastructure::frame_grab::MockFrameGrabber;
    use crate::infrastructure::input_injection::mock::MockPointerInjector;
    use deskmirror_core::Frame;

    /// Builds a test AppState over mock display/grabber/injector adapters.
    fn make_state() -> (Arc<AppState>, Arc<MockPointerInjector>) {
        let registry = DisplayRegistry::new(Arc::new(MockDisplayEnumerator::dual_1080p()));
        let source = FrameSource::new(Arc::new(MockFrameGrabber::new()), registry.clone());
        let mock_injector = Arc::new(MockPointerInjector::new());
        let injector =
            InputInjector::new(mock_injector.clone() as Arc<dyn PlatformPointerInjector>);
        let state = AppState::new(source, injector, registry, AppConfig::default());
        (state, mock_injector)
    }

    #[tokio::test]
    async fn test_get_displays_returns_both_mock_displays() {
        // Arrange
        let (state, _) = make_state();

        // Act
        let result = get_displays(state).await;

        // Assert
        assert!(result.success);
        let displays = result.data.unwrap();
        assert_eq!(displays.len(), 2);
        assert_eq!(displays[1].x, 1920);
        assert!(displays[1].label.contains("Display 2"));
    }

    #[tokio::test]
    async fn test_get_status_before_binding_reports_stopped_and_no_display() {
        // Arrange
        let (state, _) = make_state();

        // Act
        let result = get_status(state).await;

        // Assert
        assert!(result.success);
        let status = result.data.unwrap();
        assert!(!status.running);
        assert_eq!(status.current_fps, 0);
        assert!(status.display.is_none());
    }

    #[tokio::test]
    async fn test_select_display_out_of_range_fails() {
        // Arrange
        let (state, _) = make_state();

        // Act
        let result = select_display(state, 7).await;

        // Assert
        assert!(!result.success);
        assert!(result.error.unwrap().contains("index 7"));
    }

    #[tokio::test]
    async fn test_select_display_binds_and_updates_config() {
        // Arrange
        let (state, _) = make_state();

        // Act
        let result = select_display(state.clone(), 1).await;

        // Assert
        assert!(result.success);
        assert_eq!(result.data.unwrap().index, 1);
        assert_eq!(state.config.lock().await.capture.display_index, 1);
    }

    #[tokio::test]
    async fn test_set_target_fps_returns_clamped_value() {
        // Arrange
        let (state, _) = make_state();

        // Act
        let result = set_target_fps(state.clone(), 500).await;

        // Assert
        assert_eq!(result.data.unwrap(), 60);
        assert_eq!(state.config.lock().await.capture.target_fps, 60);
    }

    #[tokio::test]
    async fn test_start_capture_without_selection_fails() {
        // Arrange
        let (state, _) = make_state();

        // Act
        let result = start_capture(state).await;

        // Assert
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_start_and_stop_capture_round_trip() {
        // Arrange
        let (state, _) = make_state();
        assert!(select_display(state.clone(), 0).await.success);

        // Act
        let started = start_capture(state.clone()).await;
        let status_running = get_status(state.clone()).await.data.unwrap();
        let stopped = stop_capture(state.clone()).await;
        let status_stopped = get_status(state).await.data.unwrap();

        // Assert
        assert_eq!(started.data, Some(true));
        assert!(status_running.running);
        assert!(stopped.success);
        assert!(!status_stopped.running);
    }

    #[tokio::test]
    async fn test_forward_gesture_before_first_frame_injects_nothing() {
        // Arrange
        let (state, mock) = make_state();
        let dto = GestureDto {
            kind: "move".to_string(),
            x: 100,
            y: 100,
            button: None,
            delta: None,
        };

        // Act
        let result = forward_gesture(state, dto).await;

        // Assert
        assert_eq!(result.data, Some(0));
        assert!(mock.moves.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_forward_press_after_frame_injects_move_then_button() {
        // Arrange: bind display 0 and show one frame so the preview is active
        let (state, mock) = make_state();
        assert!(select_display(state.clone(), 0).await.success);
        state
            .preview
            .lock()
            .await
            .on_frame(Frame::new(Size::new(1920, 1080), vec![0u8; 1920 * 1080 * 4]));

        let dto = GestureDto {
            kind: "press".to_string(),
            x: 400,
            y: 300,
            button: Some("primary".to_string()),
            delta: None,
        };

        // Act
        let result = forward_gesture(state, dto).await;

        // Assert: a press becomes a positioning move plus the button press
        assert_eq!(result.data, Some(2));
        assert_eq!(mock.moves.lock().unwrap().len(), 1);
        let buttons = mock.buttons.lock().unwrap();
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].0, PointerButton::Primary);
        assert!(buttons[0].1);
    }

    #[tokio::test]
    async fn test_forward_gesture_rejects_unknown_kind() {
        // Arrange
        let (state, _) = make_state();
        let dto = GestureDto {
            kind: "hover".to_string(),
            x: 0,
            y: 0,
            button: None,
            delta: None,
        };

        // Act
        let result = forward_gesture(state, dto).await;

        // Assert
        assert!(!result.success);
        assert!(result.error.unwrap().contains("hover"));
    }

    #[tokio::test]
    async fn test_resize_preview_updates_mapper_surface() {
        // Arrange
        let (state, _) = make_state();
        state
            .preview
            .lock()
            .await
            .on_frame(Frame::new(Size::new(1920, 1080), vec![0u8; 1920 * 1080 * 4]));

        // Act
        let result = resize_preview(state.clone(), 960, 540).await;

        // Assert: aspect-matching surface maps the frame edge-to-edge
        assert!(result.success);
        let preview = state.preview.lock().await;
        assert_eq!(preview.mapper().scaled_size(), Size::new(960, 540));
    }

    #[test]
    fn test_command_result_ok_sets_success_true() {
        let r: CommandResult<i32> = CommandResult::ok(42);
        assert!(r.success);
        assert_eq!(r.data.unwrap(), 42);
        assert!(r.error.is_none());
    }

    #[test]
    fn test_command_result_err_sets_success_false() {
        let r: CommandResult<i32> = CommandResult::err("something went wrong");
        assert!(!r.success);
        assert!(r.data.is_none());
        assert_eq!(r.error.unwrap(), "something went wrong");
    }
}
