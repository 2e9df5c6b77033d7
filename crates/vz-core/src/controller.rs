//! The per-element zoom/pan controller.
//!
//! One controller owns the zoom level and pointer state for a single
//! root/inner element pair, consumes raw key/wheel/pointer events, and on
//! each frame of the host's animation loop writes a scale transform and a
//! bounded transform-origin through the [`ZoomSurface`] seam. The surface
//! trait is the only contact point with the actual visual host, which keeps
//! the whole state machine natively testable.

use crate::chord::KeyChord;
use crate::config::ZoomConfig;
use crate::router::ShortcutRouter;
use crate::smooth::{PointSmoother, SmoothingBuffer};

/// The root element's bounding box in page coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// The visual host a controller drives.
///
/// Implementations are cheap handles (a DOM element reference in the wasm
/// bridge, a recording stub in tests); the controller clones them into its
/// shortcut-edge callbacks. Writes touch only transform properties — never
/// layout-affecting ones.
pub trait ZoomSurface: Clone {
    /// Current bounding box of the root element.
    fn bounding_rect(&self) -> SurfaceRect;

    /// Write the scale transform on the inner element.
    fn set_scale(&self, scale: f64);

    /// Write the transform-origin on the inner element.
    fn set_transform_origin(&self, x: f64, y: f64);

    /// Toggle the cosmetic "shortcut engaged" marker on the root element.
    fn set_shortcut_active(&self, active: bool);

    /// Capture the pointer to the root so move events keep flowing while
    /// the cursor is dragged outside its bounds.
    fn capture_pointer(&self, pointer_id: i32);
}

/// Zoom/pan state machine for one element pair.
///
/// Lifecycle: constructed (frame loop enabled) → [`destroy`](Self::destroy)
/// (loop disabled, router torn down). The loop itself never stops on its
/// own; frames where the shortcut is not held simply skip visual writes.
pub struct ZoomPanController<S: ZoomSurface> {
    surface: S,
    config: ZoomConfig,
    shortcut: KeyChord,
    router: ShortcutRouter,

    /// Raw zoom level, clamped to `[min_zoom, max_zoom]` on every mutation.
    level: f64,
    /// Latest raw pointer sample in page coordinates. None until the first
    /// pointer move arrives.
    raw_pointer: Option<(f64, f64)>,
    pointer_smoother: PointSmoother,
    zoom_smoother: SmoothingBuffer,

    /// Whether the last panned frame saw the (unclamped) pointer inside the
    /// root's bounds.
    pointer_over_root: bool,
    /// Cancellation flag for the cooperative frame loop. Checked at the top
    /// of every frame; cleared only by `destroy`.
    loop_enabled: bool,
}

impl<S: ZoomSurface + 'static> ZoomPanController<S> {
    /// Build a controller from a surface and a validated configuration.
    ///
    /// Parses the shortcut chord once and registers the activate/deactivate
    /// pair that toggles the surface's visual marker — those fire exactly on
    /// edges, never per frame.
    pub fn new(surface: S, config: ZoomConfig) -> Result<Self, String> {
        config.validate()?;
        let shortcut = KeyChord::parse(&config.shortcut)?;

        let mut router = ShortcutRouter::new();
        let on_surface = surface.clone();
        let off_surface = surface.clone();
        router.subscribe(
            &[config.shortcut.as_str()],
            move || on_surface.set_shortcut_active(true),
            Some(Box::new(move || off_surface.set_shortcut_active(false))),
        )?;

        log::debug!(
            "zoom controller created (shortcut {:?}, zoom [{}, {}], smoothing {})",
            config.shortcut,
            config.min_zoom,
            config.max_zoom,
            config.smoothing
        );

        Ok(Self {
            level: config.min_zoom,
            pointer_smoother: PointSmoother::new(config.smoothing),
            zoom_smoother: SmoothingBuffer::new(config.smoothing),
            surface,
            shortcut,
            router,
            config,
            raw_pointer: None,
            pointer_over_root: false,
            loop_enabled: true,
        })
    }

    // ─── Inbound events ──────────────────────────────────────────────────

    pub fn key_down(&mut self, key: &str) {
        self.router.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.router.key_up(key);
    }

    /// Window lost input focus: every held key is forgotten.
    pub fn blur(&mut self) {
        self.router.blur();
    }

    /// Wheel input over the root. Accumulates into the raw zoom level and
    /// clamps, regardless of shortcut state; the visual write happens on the
    /// next frame and *is* gated on the shortcut.
    pub fn wheel(&mut self, delta_y: f64) {
        self.level += delta_y / 125.0 * -self.config.zoom_speed;
        self.level = self.level.clamp(self.config.min_zoom, self.config.max_zoom);
        log::trace!("wheel delta {delta_y} -> level {}", self.level);
    }

    /// Latest pointer position in page coordinates.
    pub fn pointer_move(&mut self, page_x: f64, page_y: f64) {
        self.raw_pointer = Some((page_x, page_y));
    }

    /// Pointer entered the root: capture it iff the shortcut is held, so
    /// move events keep arriving mid-gesture.
    pub fn pointer_enter(&mut self, pointer_id: i32) {
        if self.loop_enabled && self.shortcut_held() {
            self.surface.capture_pointer(pointer_id);
        }
    }

    // ─── Frame step ──────────────────────────────────────────────────────

    /// One tick of the cooperative animation loop.
    ///
    /// The host scheduler calls this on every display refresh while
    /// [`loop_enabled`](Self::loop_enabled) holds. A frame with the shortcut
    /// up makes no visual writes but does not stop the loop.
    pub fn frame(&mut self) {
        if !self.loop_enabled || !self.shortcut_held() {
            return;
        }

        let zoom = if self.config.smoothing != 1 {
            self.zoom_smoother.push(self.level)
        } else {
            self.level
        };
        let pointer = match self.raw_pointer {
            Some((x, y)) if self.config.smoothing != 1 => Some(self.pointer_smoother.push(x, y)),
            other => other,
        };

        // Stale-frame guard: never write scale once the shortcut drops.
        if self.shortcut_held() {
            self.surface.set_scale(zoom);
        }

        // Nothing to pan at 1:1 scale; and no origin without a pointer.
        if self.level > self.config.min_zoom
            && let Some((px, py)) = pointer
        {
            let rect = self.surface.bounding_rect();
            let x = px - rect.left;
            let y = py - rect.top;
            self.pointer_over_root =
                x >= 0.0 && x <= rect.width && y >= 0.0 && y <= rect.height;
            self.surface
                .set_transform_origin(x.clamp(0.0, rect.width), y.clamp(0.0, rect.height));
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Level check used by the frame step and the bridge.
    pub fn shortcut_held(&self) -> bool {
        self.router.is_held(&self.shortcut)
    }

    /// Current raw zoom level (already clamped).
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Whether the last panned frame saw the pointer inside the root.
    pub fn pointer_over_root(&self) -> bool {
        self.pointer_over_root
    }

    /// True until [`destroy`](Self::destroy); the host scheduler checks this
    /// before re-scheduling each frame.
    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Stop the frame loop and tear down the shortcut machinery.
    ///
    /// Idempotent: a second call finds the loop already disabled and does
    /// nothing. The bridge additionally detaches every DOM listener and
    /// releases the ownership claim, so stray events after destruction are
    /// structurally impossible rather than flag-checked.
    pub fn destroy(&mut self) {
        if !self.loop_enabled {
            return;
        }
        self.loop_enabled = false;
        self.router.teardown();
        self.surface.set_shortcut_active(false);
        log::debug!("zoom controller destroyed");
    }
}
