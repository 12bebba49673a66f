//! Deskmirror application entry point.
//!
//! Wires together the display registry, frame source, capture scheduler,
//! input injector, and preview surface, then runs the Tokio async event loop.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()            -- TOML settings (fps, display, surface)
//!  └─ AppState::new()          -- shared state for the UI bridge
//!  └─ event loop
//!       ├─ capture tick        -> CaptureScheduler::tick_at
//!       ├─ cursor poll tick    -> PreviewSurface::poll_remote_cursor
//!       └─ CaptureEvent        -> PreviewSurface::on_frame / FPS readout
//! ```
//!
//! # Event loop (for beginners)
//!
//! The `tokio::select!` loop is the heart of the app.  Three things can
//! wake it:
//!
//! - the capture interval fires – grab and publish one frame;
//! - the 50ms cursor interval fires – refresh the overlay marker from the
//!   real cursor's global position;
//! - a published [`CaptureEvent`] arrives – hand the frame to the preview
//!   model (which a rendering shell reads via the UI bridge).

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use deskmirror_app::application::capture_session::{CaptureEvent, FrameSource};
use deskmirror_app::application::forward_input::InputInjector;
use deskmirror_app::application::preview::CURSOR_POLL_INTERVAL;
use deskmirror_app::infrastructure::{
    display_registry::{DisplayRegistry, NativeDisplayEnumerator},
    frame_grab::NativeFrameGrabber,
    input_injection::NativePointerInjector,
    pointer::NativePointerLocator,
    storage::config::{load_config, save_config},
    ui_bridge::AppState,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Settings come first so the log level can honour the config file;
    // RUST_LOG still wins when set.
    let config = load_config().unwrap_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.general.log_level.clone())),
        )
        .init();

    info!("Deskmirror starting");

    // ── Platform adapters ─────────────────────────────────────────────────────
    let registry = DisplayRegistry::new(Arc::new(NativeDisplayEnumerator::new()));
    let source = FrameSource::new(Arc::new(NativeFrameGrabber::new()), registry.clone());
    let injector = InputInjector::new(Arc::new(NativePointerInjector::new()));
    let locator = NativePointerLocator::new();

    let state = AppState::new(source, injector, registry, config.clone());
    let mut events = state.scheduler.lock().await.subscribe();

    // ── Initial display binding ───────────────────────────────────────────────
    // The configured display may be gone (laptop undocked); fall back to the
    // primary display rather than starting unbound.
    {
        let mut scheduler = state.scheduler.lock().await;
        let index = config.capture.display_index;
        if !scheduler.bind(index) {
            warn!("display {index} unavailable; falling back to display 0");
            scheduler.bind(0);
        }
        if let Some(bound) = scheduler.bound_display() {
            state.injector.lock().await.bind(&bound);
            info!("mirroring {bound}");
        }
        scheduler.start(state.now_ms());
    }

    // ── Shutdown flag + Ctrl-C handler ────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            running_clone.store(false, Ordering::Relaxed);
        }
    });

    // ── Main event loop ───────────────────────────────────────────────────────
    let mut current_interval = state.scheduler.lock().await.interval();
    let mut capture_tick = tokio::time::interval(current_interval);
    let mut cursor_tick = tokio::time::interval(CURSOR_POLL_INTERVAL);

    info!("Deskmirror ready");

    while running.load(Ordering::Relaxed) {
        tokio::select! {
            _ = capture_tick.tick() => {
                let mut scheduler = state.scheduler.lock().await;
                scheduler.tick_at(state.now_ms());

                // A settings change may have altered the target rate.
                let wanted = scheduler.interval();
                if wanted != current_interval {
                    debug!("capture interval changed to {wanted:?}");
                    current_interval = wanted;
                    capture_tick = tokio::time::interval(wanted);
                }
            }

            _ = cursor_tick.tick() => {
                let geometry = state
                    .scheduler
                    .lock()
                    .await
                    .bound_display()
                    .map(|d| d.geometry);
                if let Some(geometry) = geometry {
                    state
                        .preview
                        .lock()
                        .await
                        .poll_remote_cursor(&locator, &geometry);
                }
            }

            event = events.recv() => match event {
                Some(CaptureEvent::Frame(frame)) => {
                    state.preview.lock().await.on_frame(frame);
                }
                Some(CaptureEvent::FpsUpdated(fps)) => {
                    debug!("capture rate now {fps} fps");
                }
                None => break,
            }
        }
    }

    // ── Shutdown ──────────────────────────────────────────────────────────────
    state.scheduler.lock().await.stop();
    if let Err(e) = save_config(&*state.config.lock().await) {
        warn!("could not persist settings: {e}");
    }

    info!("Deskmirror stopped");
    Ok(())
}
