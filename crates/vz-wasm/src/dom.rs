//! DOM plumbing: the surface implementation and event listener bookkeeping.

use vz_core::{SurfaceRect, ZoomSurface};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{EventTarget, HtmlElement};

/// CSS class toggled on the root while the shortcut chord is held.
pub const ACTIVE_CLASS: &str = "vz-active";

/// The root/inner element pair a controller draws onto.
///
/// Writes only transform properties on the inner element and the marker
/// class on the root — never layout-affecting styles.
#[derive(Clone)]
pub struct DomSurface {
    root: HtmlElement,
    inner: HtmlElement,
}

impl DomSurface {
    pub fn new(root: HtmlElement, inner: HtmlElement) -> Self {
        Self { root, inner }
    }
}

impl ZoomSurface for DomSurface {
    fn bounding_rect(&self) -> SurfaceRect {
        let rect = self.root.get_bounding_client_rect();
        SurfaceRect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }
    }

    fn set_scale(&self, scale: f64) {
        let _ = self
            .inner
            .style()
            .set_property("transform", &format!("scale({scale})"));
    }

    fn set_transform_origin(&self, x: f64, y: f64) {
        let _ = self
            .inner
            .style()
            .set_property("transform-origin", &format!("{x}px {y}px"));
    }

    fn set_shortcut_active(&self, active: bool) {
        let classes = self.root.class_list();
        let result = if active {
            classes.add_1(ACTIVE_CLASS)
        } else {
            classes.remove_1(ACTIVE_CLASS)
        };
        if let Err(e) = result {
            log::warn!("marker class toggle failed: {e:?}");
        }
    }

    fn capture_pointer(&self, pointer_id: i32) {
        let _ = self.root.set_pointer_capture(pointer_id);
    }
}

/// Records every attached listener so teardown can detach all of them.
///
/// Dropping the set detaches anything still registered, so a destroyed
/// zoomer can never receive another event.
#[derive(Default)]
pub struct ListenerSet {
    listeners: Vec<(EventTarget, &'static str, Closure<dyn FnMut(web_sys::Event)>)>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
        if let Err(e) =
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to attach {event} listener: {e:?}");
        }
        self.listeners.push((target.clone(), event, closure));
    }

    pub fn remove_all(&mut self) {
        for (target, event, closure) in self.listeners.drain(..) {
            let _ = target
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.remove_all();
    }
}
