#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent};

use crate::display::DisplaySurface;
use crate::render::{CameraParams, CanvasRenderer};
use crate::{Game, WorldLayout};

#[wasm_bindgen(start)]
pub fn bootstrap() {
    console_error_panic_hook::set_once();
}

/// Browser entry point. Construct it, then call `start()` from the page's
/// start button.
#[wasm_bindgen]
pub struct WebGame {
    inner: Rc<RefCell<WebState>>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, info_id: &str, banner_id: &str) -> Result<WebGame, JsValue> {
        let state = WebState::new(canvas_id, info_id, banner_id).map_err(|err| {
            log_error(&format!("game cannot start: {err}"));
            JsValue::from_str(&err.to_string())
        })?;
        Ok(Self {
            inner: Rc::new(RefCell::new(state)),
        })
    }

    /// Shows the panels, starts ticking and begins listening for keys.
    pub fn start(&self) -> Result<(), JsValue> {
        if !self.inner.borrow_mut().game.start() {
            return Ok(());
        }
        self.inner.borrow_mut().display.set_visible(true);
        attach_keyboard(Rc::clone(&self.inner))
            .and_then(|()| schedule_animation_loop(Rc::clone(&self.inner)))
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }
}

struct WebState {
    game: Game,
    renderer: CanvasRenderer,
    display: DomDisplay,
    keydown: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

impl WebState {
    fn new(canvas_id: &str, info_id: &str, banner_id: &str) -> Result<Self> {
        let document = document()?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| anyhow!("canvas element #{canvas_id} not found"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| anyhow!("#{canvas_id} is not a canvas"))?;
        let display = DomDisplay {
            info: html_element(&document, info_id)?,
            banner: html_element(&document, banner_id)?,
        };
        display.set_visible(false);

        let layout = WorldLayout::default_layout();
        let renderer = CanvasRenderer::new(canvas, layout.settings.boundary)?;
        let game = Game::new(layout)?;
        Ok(Self {
            game,
            renderer,
            display,
            keydown: None,
        })
    }

    fn frame(&mut self, timestamp_ms: f64) {
        self.game.tick(timestamp_ms.max(0.0) as u64, &mut self.display);
        let state = self.game.state();
        let camera = CameraParams::from_rig(&state.camera, self.renderer.aspect());
        if let Err(err) = self.renderer.render(state.world.all(), &camera) {
            log_error(&format!("render failed: {err:?}"));
        }
    }
}

/// Info panel and message banner elements.
struct DomDisplay {
    info: HtmlElement,
    banner: HtmlElement,
}

impl DomDisplay {
    fn set_visible(&self, visible: bool) {
        show(&self.info, visible);
        if !visible {
            show(&self.banner, false);
        }
    }
}

impl DisplaySurface for DomDisplay {
    fn set_info(&mut self, text: &str) {
        if self.info.text_content().as_deref() != Some(text) {
            self.info.set_text_content(Some(text));
        }
    }

    fn show_banner(&mut self, text: &str) {
        self.banner.set_text_content(Some(text));
        show(&self.banner, true);
    }

    fn hide_banner(&mut self) {
        self.banner.set_text_content(None);
        show(&self.banner, false);
    }
}

fn show(element: &HtmlElement, visible: bool) {
    let value = if visible { "block" } else { "none" };
    if let Err(err) = element.style().set_property("display", value) {
        log_error(&format!("failed to toggle element: {err:?}"));
    }
}

fn attach_keyboard(app: Rc<RefCell<WebState>>) -> Result<()> {
    let document = document()?;
    let handler = Rc::clone(&app);
    let closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if handler.borrow_mut().game.handle_key(&event.key()) {
            event.prevent_default();
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    let callback: &Function = closure.as_ref().unchecked_ref();
    document
        .add_event_listener_with_callback("keydown", callback)
        .map_err(|err| anyhow!("failed to listen for keys: {err:?}"))?;
    app.borrow_mut().keydown = Some(closure);
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn schedule_animation_loop(app: Rc<RefCell<WebState>>) -> Result<()> {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let next = Rc::clone(&callback);

    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        app.borrow_mut().frame(timestamp);
        if let Some(closure) = next.borrow().as_ref() {
            if let Err(err) = request_animation_frame(closure) {
                log_error(&err.to_string());
            }
        }
    }) as Box<dyn FnMut(f64)>));

    let first = callback.borrow();
    let closure = first
        .as_ref()
        .ok_or_else(|| anyhow!("animation callback missing"))?;
    request_animation_frame(closure)
}

fn request_animation_frame(closure: &Closure<dyn FnMut(f64)>) -> Result<()> {
    let window = window().ok_or_else(|| anyhow!("window not available"))?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref::<Function>())
        .map_err(|err| anyhow!("requestAnimationFrame failed: {err:?}"))?;
    Ok(())
}

fn document() -> Result<Document> {
    window()
        .ok_or_else(|| anyhow!("window not available"))?
        .document()
        .ok_or_else(|| anyhow!("document not available"))
}

fn html_element(document: &Document, id: &str) -> Result<HtmlElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("element #{id} not found"))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| anyhow!("#{id} is not an HTML element"))
}

fn log_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}
