// src/web.rs
// Browser bindings: canvas 2D context, requestAnimationFrame, IntersectionObserver,
// visibilitychange and a debounced window resize.
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use anyhow::anyhow;
use bevy_color::Srgba;
use glam::Vec2;
use once_cell::unsync::OnceCell;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::app_state::{FieldStats, State};
use crate::color::to_css_rgba;
use crate::config::FieldConfig;
use crate::host::{DrawSurface, FrameScheduler, FrameToken};
use crate::ui_events::FieldCommand;
use crate::viewport::Viewport;

type WebState = State<CanvasSurface, AnimationFrameScheduler>;

thread_local! {
    static MOUNTED_FIELD: OnceCell<MountedField> = const { OnceCell::new() };
}

pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    fn circle(&self, center: Vec2, radius: f32) -> bool {
        self.context.begin_path();
        match self.context.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        ) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Canvas arc failed: {:?}", e);
                false
            }
        }
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.context.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Srgba, width: f32) {
        self.context.begin_path();
        self.context.move_to(from.x as f64, from.y as f64);
        self.context.line_to(to.x as f64, to.y as f64);
        self.context.set_stroke_style_str(&to_css_rgba(color));
        self.context.set_line_width(width as f64);
        self.context.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Srgba) {
        if self.circle(center, radius) {
            self.context.set_fill_style_str(&to_css_rgba(color));
            self.context.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Srgba, width: f32) {
        if self.circle(center, radius) {
            self.context.set_stroke_style_str(&to_css_rgba(color));
            self.context.set_line_width(width as f64);
            self.context.stroke();
        }
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct AnimationFrameScheduler {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) -> Option<FrameToken> {
        let callback = self.callback.borrow();
        let closure = callback.as_ref()?;
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(handle) => Some(FrameToken(handle)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if let Err(e) = self.window.cancel_animation_frame(token.0) {
            log::error!("cancelAnimationFrame failed: {:?}", e);
        }
    }
}

/// Restarts a timer on every trigger; the action runs once the triggers stop
/// for `delay_ms`.
struct Debouncer {
    window: Window,
    delay_ms: i32,
    pending: Cell<Option<i32>>,
    action: Closure<dyn FnMut()>,
}

impl Debouncer {
    fn trigger(&self) {
        if let Some(handle) = self.pending.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.action.as_ref().unchecked_ref(),
                self.delay_ms,
            ) {
            Ok(handle) => self.pending.set(Some(handle)),
            Err(e) => log::warn!("Failed to schedule resize handling: {:?}", e),
        }
    }
}

/// Keeps the state and every JS closure alive for the life of the page.
struct MountedField {
    state: Rc<RefCell<WebState>>,
    _frame_callback: FrameCallback,
    _observer: IntersectionObserver,
    _on_intersect: Closure<dyn FnMut(js_sys::Array)>,
    _on_visibility: Closure<dyn FnMut()>,
    _on_resize: Closure<dyn FnMut()>,
    _resize_debouncer: Rc<Debouncer>,
}

fn window_size(window: &Window) -> (f32, f32) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width as f32, height as f32)
}

fn fit_canvas(canvas: &HtmlCanvasElement, window: &Window) -> (f32, f32) {
    let (width, height) = window_size(window);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    (width, height)
}

/// Mounts the field on `canvas_id`. Returns `Ok(false)` when there is nothing
/// to draw on, which is not an error.
pub fn mount(canvas_id: &str, config: FieldConfig) -> anyhow::Result<bool> {
    if MOUNTED_FIELD.with(|slot| slot.get().is_some()) {
        log::warn!("Particle field already mounted; ignoring mount on '{}'.", canvas_id);
        return Ok(true);
    }

    let window = web_sys::window().ok_or_else(|| anyhow!("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow!("window has no document"))?;

    let Some(element) = document.get_element_by_id(canvas_id) else {
        log::debug!("No element '{}'; particle field disabled.", canvas_id);
        return Ok(false);
    };
    let Ok(canvas) = element.dyn_into::<HtmlCanvasElement>() else {
        log::debug!("Element '{}' is not a canvas; particle field disabled.", canvas_id);
        return Ok(false);
    };
    let context = match canvas.get_context("2d") {
        Ok(Some(context)) => context,
        _ => {
            log::debug!("No 2D context on '{}'; particle field disabled.", canvas_id);
            return Ok(false);
        }
    };
    let context: CanvasRenderingContext2d = context
        .dyn_into()
        .map_err(|_| anyhow!("2d context has an unexpected type"))?;

    let (width, height) = fit_canvas(&canvas, &window);
    let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
    let visibility_threshold = config.visibility_threshold;
    let resize_debounce_ms = config.resize_debounce_ms;

    let state = Rc::new(RefCell::new(State::new(
        CanvasSurface { context },
        AnimationFrameScheduler {
            window: window.clone(),
            callback: frame_callback.clone(),
        },
        Viewport::new(width, height),
        config,
    )));

    let weak: Weak<RefCell<WebState>> = Rc::downgrade(&state);
    *frame_callback.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
        if let Some(state) = weak.upgrade() {
            state.borrow_mut().on_animation_frame();
        }
    }));

    if document.hidden() {
        state
            .borrow_mut()
            .process_command(FieldCommand::DocumentVisibilityChanged { hidden: true });
    }

    let weak = Rc::downgrade(&state);
    let on_intersect = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
        let Some(state) = weak.upgrade() else { return };
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            state
                .borrow_mut()
                .process_command(FieldCommand::IntersectionChanged {
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                });
        }
    });
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(visibility_threshold));
    let observer =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)
            .map_err(|e| anyhow!("IntersectionObserver unavailable: {:?}", e))?;
    observer.observe(&canvas);

    let weak = Rc::downgrade(&state);
    let visibility_document = document.clone();
    let on_visibility = Closure::<dyn FnMut()>::new(move || {
        if let Some(state) = weak.upgrade() {
            state
                .borrow_mut()
                .process_command(FieldCommand::DocumentVisibilityChanged {
                    hidden: visibility_document.hidden(),
                });
        }
    });
    document
        .add_event_listener_with_callback("visibilitychange", on_visibility.as_ref().unchecked_ref())
        .map_err(|e| anyhow!("failed to listen for visibilitychange: {:?}", e))?;

    let weak = Rc::downgrade(&state);
    let resize_window = window.clone();
    let resize_debouncer = Rc::new(Debouncer {
        window: window.clone(),
        delay_ms: resize_debounce_ms as i32,
        pending: Cell::new(None),
        action: Closure::new(move || {
            let Some(state) = weak.upgrade() else { return };
            let (width, height) = fit_canvas(&canvas, &resize_window);
            state
                .borrow_mut()
                .process_command(FieldCommand::Resized { width, height });
        }),
    });
    let debouncer = resize_debouncer.clone();
    let on_resize = Closure::<dyn FnMut()>::new(move || debouncer.trigger());
    window
        .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
        .map_err(|e| anyhow!("failed to listen for resize: {:?}", e))?;

    let mounted = MountedField {
        state,
        _frame_callback: frame_callback,
        _observer: observer,
        _on_intersect: on_intersect,
        _on_visibility: on_visibility,
        _on_resize: on_resize,
        _resize_debouncer: resize_debouncer,
    };
    MOUNTED_FIELD.with(|slot| {
        if slot.set(mounted).is_err() {
            log::warn!("MOUNTED_FIELD was already set. This should only happen once.");
        }
    });
    log::info!("Particle field mounted on '{}'.", canvas_id);
    Ok(true)
}

pub fn stats() -> Option<FieldStats> {
    MOUNTED_FIELD.with(|slot| slot.get().map(|mounted| mounted.state.borrow().stats()))
}
