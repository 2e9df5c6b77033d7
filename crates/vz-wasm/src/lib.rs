//! WASM bridge for VZ — binds the zoom/pan core to DOM elements.
//!
//! Compiled via `wasm-pack build --target web`. The external attachment
//! layer (content script watching the page with a MutationObserver) finds
//! root/inner element pairs and constructs one [`Zoomer`] per pair; it must
//! check [`has_controller`] first and call [`Zoomer::destroy`] exactly once
//! when the root leaves the page.

mod dom;

pub use dom::ACTIVE_CLASS;

use dom::{DomSurface, ListenerSet};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use vz_core::{ControllerRegistry, ZoomConfig, ZoomPanController};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, KeyboardEvent, PointerEvent, WheelEvent};

/// Attribute linking a claimed root back to its registry key.
const ROOT_ID_ATTR: &str = "data-vz-controller";

thread_local! {
    /// Ownership side-table: which roots currently carry a controller.
    static REGISTRY: RefCell<ControllerRegistry<u64, ()>> =
        RefCell::new(ControllerRegistry::new());
}

fn next_root_id() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

type SharedController = Rc<RefCell<ZoomPanController<DomSurface>>>;

/// True if this root already carries a live controller. The attachment
/// layer must check this before constructing a second [`Zoomer`].
#[wasm_bindgen]
pub fn has_controller(root: &HtmlElement) -> bool {
    root.get_attribute(ROOT_ID_ATTR)
        .and_then(|id| id.parse::<u64>().ok())
        .is_some_and(|id| REGISTRY.with(|r| r.borrow().is_claimed(&id)))
}

/// Parse an optional JSON settings string into a validated config.
/// A missing or empty string means "all defaults"; a partial object merges
/// over the defaults, and unknown keys are ignored.
fn parse_settings(json: Option<&str>) -> Result<ZoomConfig, String> {
    let config: ZoomConfig = match json {
        Some(s) if !s.trim().is_empty() => {
            serde_json::from_str(s).map_err(|e| format!("bad settings JSON: {e}"))?
        }
        _ => ZoomConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// One zoom/pan controller attached to a root/inner element pair.
///
/// Construction failures (missing element, occupied root, bad settings)
/// log an error and yield an inert instance — the hosting page must never
/// crash over a zoomer.
#[wasm_bindgen]
pub struct Zoomer {
    inner: Option<ZoomerInner>,
}

struct ZoomerInner {
    controller: SharedController,
    listeners: ListenerSet,
    root: HtmlElement,
    root_id: u64,
}

#[wasm_bindgen]
impl Zoomer {
    #[wasm_bindgen(constructor)]
    pub fn new(
        root: Option<HtmlElement>,
        inner: Option<HtmlElement>,
        settings_json: Option<String>,
    ) -> Zoomer {
        console_error_panic_hook_setup();

        let (Some(root), Some(inner)) = (root, inner) else {
            log::error!("Zoomer: missing root or inner element");
            return Zoomer { inner: None };
        };
        if has_controller(&root) {
            log::warn!("Zoomer: root already has a controller");
            return Zoomer { inner: None };
        }
        let Some(window) = web_sys::window() else {
            log::error!("Zoomer: no window");
            return Zoomer { inner: None };
        };
        let Some(document) = window.document() else {
            log::error!("Zoomer: no document");
            return Zoomer { inner: None };
        };

        let config = match parse_settings(settings_json.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Zoomer: {e}");
                return Zoomer { inner: None };
            }
        };

        let surface = DomSurface::new(root.clone(), inner);
        let controller: SharedController = match ZoomPanController::new(surface, config) {
            Ok(controller) => Rc::new(RefCell::new(controller)),
            Err(e) => {
                log::error!("Zoomer: {e}");
                return Zoomer { inner: None };
            }
        };

        let root_id = next_root_id();
        REGISTRY.with(|r| r.borrow_mut().claim(root_id, ()));
        let _ = root.set_attribute(ROOT_ID_ATTR, &root_id.to_string());

        let mut listeners = ListenerSet::new();
        {
            let c = controller.clone();
            listeners.add(&document, "keydown", move |e| {
                let e: KeyboardEvent = e.unchecked_into();
                c.borrow_mut().key_down(&e.key());
            });
        }
        {
            let c = controller.clone();
            listeners.add(&document, "keyup", move |e| {
                let e: KeyboardEvent = e.unchecked_into();
                c.borrow_mut().key_up(&e.key());
            });
        }
        {
            // Keys released while the window is unfocused never send keyup.
            let c = controller.clone();
            listeners.add(&window, "blur", move |_| {
                c.borrow_mut().blur();
            });
        }
        {
            let c = controller.clone();
            listeners.add(&root, "wheel", move |e| {
                let e: WheelEvent = e.unchecked_into();
                e.prevent_default();
                c.borrow_mut().wheel(e.delta_y());
            });
        }
        {
            let c = controller.clone();
            listeners.add(&window, "pointermove", move |e| {
                let e: PointerEvent = e.unchecked_into();
                c.borrow_mut()
                    .pointer_move(f64::from(e.client_x()), f64::from(e.client_y()));
            });
        }
        {
            let c = controller.clone();
            listeners.add(&root, "pointerenter", move |e| {
                let e: PointerEvent = e.unchecked_into();
                c.borrow_mut().pointer_enter(e.pointer_id());
            });
        }

        start_frame_loop(window, controller.clone());
        log::debug!("Zoomer attached to root {root_id}");

        Zoomer {
            inner: Some(ZoomerInner {
                controller,
                listeners,
                root,
                root_id,
            }),
        }
    }

    /// Whether construction succeeded and listeners are attached.
    pub fn is_attached(&self) -> bool {
        self.inner.is_some()
    }

    /// Current zoom level, if attached.
    pub fn zoom_level(&self) -> Option<f64> {
        self.inner
            .as_ref()
            .map(|inner| inner.controller.borrow().level())
    }

    /// Detach from the page: remove every listener, stop the frame loop,
    /// and release the root's ownership claim. Called exactly once by the
    /// attachment layer when the root is removed; extra calls are no-ops.
    pub fn destroy(&mut self) {
        let Some(mut inner) = self.inner.take() else {
            return;
        };
        inner.listeners.remove_all();
        inner.controller.borrow_mut().destroy();
        REGISTRY.with(|r| {
            r.borrow_mut().release(&inner.root_id);
        });
        let _ = inner.root.remove_attribute(ROOT_ID_ATTR);
        log::debug!("Zoomer detached from root {}", inner.root_id);
    }
}

/// Cooperative frame loop: run one controller step per display refresh and
/// re-schedule while the controller's loop flag holds. Once `destroy`
/// clears the flag the callback simply stops re-scheduling; the frame count
/// drops to zero within one frame.
fn start_frame_loop(window: web_sys::Window, controller: SharedController) {
    let holder: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let holder_inner = holder.clone();
    let win = window.clone();

    *holder.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let enabled = {
            let mut c = controller.borrow_mut();
            c.frame();
            c.loop_enabled()
        };
        if enabled {
            if let Some(callback) = holder_inner.borrow().as_ref() {
                let _ = win.request_animation_frame(callback.as_ref().unchecked_ref());
            }
        } else {
            // Break the holder cycle so the closure and its controller Rc
            // are released. The closure glue refcounts invocations, so the
            // drop requested here is deferred until this call returns.
            holder_inner.borrow_mut().take();
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = holder.borrow().as_ref() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("VZ WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn settings_default_when_absent() {
        assert_eq!(parse_settings(None).unwrap(), ZoomConfig::default());
        assert_eq!(parse_settings(Some("")).unwrap(), ZoomConfig::default());
        assert_eq!(parse_settings(Some("   ")).unwrap(), ZoomConfig::default());
    }

    #[test]
    fn settings_merge_over_defaults() {
        let config = parse_settings(Some(r#"{"maxZoom": 4, "shortcut": "ctrl+shift"}"#)).unwrap();
        assert_eq!(config.max_zoom, 4.0);
        assert_eq!(config.shortcut, "ctrl+shift");
        assert_eq!(config.zoom_speed, 0.1);
    }

    #[test]
    fn settings_reject_garbage() {
        assert!(parse_settings(Some("not json")).is_err());
        assert!(parse_settings(Some(r#"{"smoothing": 0}"#)).is_err());
        assert!(parse_settings(Some(r#"{"minZoom": 9, "maxZoom": 2}"#)).is_err());
    }
}
