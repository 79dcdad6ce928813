//! Browser bindings (`web` feature).
//!
//! [`WebCanvas`] draws through a DOM `CanvasRenderingContext2d`,
//! [`WebHost`] resolves element ids on the current document and
//! [`WebViewer`] exposes the [`Viewer`] surface to JavaScript.

use std::f64::consts::TAU;

use glam::Vec2;
use rustc_hash::FxHashMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast as _;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::canvas::{Canvas2d, CanvasHost, Fill, Rgba};
use crate::color::ColorMapping;
use crate::error::ProtviewError;
use crate::input::InputEvent;
use crate::options::{Options, Style, VisualizationOptions};
use crate::renderer::FlatReport;
use crate::viewer::{Host, Viewer};

fn set_style(ctx: &CanvasRenderingContext2d, key: &str, value: &JsValue) {
    let _ = js_sys::Reflect::set(ctx.as_ref(), &JsValue::from_str(key), value);
}

fn to_js(e: &ProtviewError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// [`Canvas2d`] over a DOM canvas element.
#[derive(Debug, Clone)]
pub struct WebCanvas {
    element: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebCanvas {
    /// Look up canvas `id` and its 2D context.
    #[must_use]
    pub fn from_id(document: &Document, id: &str) -> Option<Self> {
        let element = document
            .get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let ctx = element
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { element, ctx })
    }

    /// Match the backing store to the element's laid-out size.
    pub fn fit_to_client(&self) {
        let (w, h) = (self.element.client_width(), self.element.client_height());
        if w > 0 && h > 0 {
            self.element.set_width(w as u32);
            self.element.set_height(h as u32);
        }
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            f64::from(center.x),
            f64::from(center.y),
            f64::from(radius.max(0.0)),
            0.0,
            TAU,
        );
    }
}

impl Canvas2d for WebCanvas {
    fn size(&self) -> (f32, f32) {
        (self.element.width() as f32, self.element.height() as f32)
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        set_style(&self.ctx, "fillStyle", &JsValue::from_str(&color.css()));
        self.ctx.fill_rect(
            f64::from(origin.x),
            f64::from(origin.y),
            f64::from(size.x),
            f64::from(size.y),
        );
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        set_style(&self.ctx, "strokeStyle", &JsValue::from_str(&color.css()));
        self.ctx.set_line_width(f64::from(width));
        self.ctx.begin_path();
        self.ctx.move_to(f64::from(from.x), f64::from(from.y));
        self.ctx.line_to(f64::from(to.x), f64::from(to.y));
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Fill) {
        match fill {
            Fill::Solid(color) => {
                set_style(&self.ctx, "fillStyle", &JsValue::from_str(&color.css()));
            }
            Fill::Radial(g) => {
                let Ok(gradient) = self.ctx.create_radial_gradient(
                    f64::from(g.focus.x),
                    f64::from(g.focus.y),
                    0.0,
                    f64::from(g.center.x),
                    f64::from(g.center.y),
                    f64::from(g.radius),
                ) else {
                    return;
                };
                let _ = gradient.add_color_stop(0.0, &g.inner.css());
                let _ = gradient.add_color_stop(1.0, &g.outer.css());
                set_style(&self.ctx, "fillStyle", gradient.as_ref());
            }
        }
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    fn stroke_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        width: f32,
        color: Rgba,
    ) {
        set_style(&self.ctx, "strokeStyle", &JsValue::from_str(&color.css()));
        self.ctx.set_line_width(f64::from(width));
        self.circle_path(center, radius);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, at: Vec2, font: &str, color: Rgba) {
        set_style(&self.ctx, "fillStyle", &JsValue::from_str(&color.css()));
        self.ctx.set_font(font);
        let _ = self
            .ctx
            .fill_text(text, f64::from(at.x), f64::from(at.y));
    }
}

/// [`Host`] over the current document. Canvases are cached by id.
#[derive(Debug, Clone)]
pub struct WebHost {
    document: Document,
    canvases: FxHashMap<String, WebCanvas>,
}

impl WebHost {
    /// Host for `window.document`.
    #[must_use]
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self {
            document,
            canvases: FxHashMap::default(),
        })
    }
}

impl CanvasHost for WebHost {
    fn canvas(&mut self, id: &str) -> Option<&mut dyn Canvas2d> {
        if !self.canvases.contains_key(id) {
            let canvas = WebCanvas::from_id(&self.document, id)?;
            let _ = self.canvases.insert(id.to_owned(), canvas);
        }
        let canvas = self.canvases.get_mut(id)?;
        canvas.fit_to_client();
        let canvas: &mut dyn Canvas2d = canvas;
        Some(canvas)
    }
}

impl Host for WebHost {
    fn container_size(&self, id: &str) -> Option<(f32, f32)> {
        let element = self.document.get_element_by_id(id)?;
        Some((element.client_width() as f32, element.client_height() as f32))
    }
}

/// Install the panic hook and route `log` to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn check_report(report: &FlatReport) -> Result<(), JsValue> {
    for view in [&report.top, &report.side] {
        if let Err(e) = view {
            return Err(to_js(e));
        }
    }
    Ok(())
}

/// [`Viewer`] bound to the page's document.
#[wasm_bindgen]
#[derive(Debug)]
pub struct WebViewer {
    viewer: Viewer,
    host: WebHost,
}

impl WebViewer {
    fn parse_options(&self, json: &str) -> Result<VisualizationOptions, JsValue> {
        if json.trim().is_empty() {
            return Ok(self.viewer.options().visualization.clone());
        }
        serde_json::from_str(json)
            .map_err(|e| to_js(&ProtviewError::OptionsParse(e.to_string())))
    }

    fn apply(&mut self, options: VisualizationOptions) -> Result<(), JsValue> {
        let report = self
            .viewer
            .set_options(&mut self.host, options)
            .map_err(|e| to_js(&e))?;
        report.as_ref().map_or(Ok(()), check_report)
    }
}

#[wasm_bindgen]
impl WebViewer {
    /// Viewer with default options.
    ///
    /// # Errors
    ///
    /// Fails outside a browser window.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebViewer, JsValue> {
        let host = WebHost::from_window()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self {
            viewer: Viewer::new(Options::default()),
            host,
        })
    }

    /// Draw the top and side views of `text`. `options` is a JSON object
    /// (empty string keeps the current options).
    ///
    /// # Errors
    ///
    /// Invalid options or a missing canvas.
    #[wasm_bindgen(js_name = render2D)]
    pub fn render_2d(
        &mut self,
        text: &str,
        top_id: &str,
        side_id: &str,
        options: &str,
    ) -> Result<(), JsValue> {
        let options = self.parse_options(options)?;
        let report = self
            .viewer
            .render_2d(&mut self.host, text, top_id, side_id, &options)
            .map_err(|e| to_js(&e))?;
        check_report(&report)
    }

    /// Build the 3D scene of `text` for container `container_id`.
    ///
    /// # Errors
    ///
    /// Invalid options or a missing container.
    #[wasm_bindgen(js_name = load3D)]
    pub fn load_3d(
        &mut self,
        text: &str,
        container_id: &str,
        options: &str,
    ) -> Result<(), JsValue> {
        let options = self.parse_options(options)?;
        let _ = self
            .viewer
            .load_3d(&mut self.host, text, container_id, &options)
            .map_err(|e| to_js(&e))?;
        Ok(())
    }

    /// Restyle from a JSON options object.
    ///
    /// # Errors
    ///
    /// Malformed or invalid options.
    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&mut self, options: &str) -> Result<(), JsValue> {
        let options = self.parse_options(options)?;
        self.apply(options)
    }

    /// Restyle by style name as shown in a dropdown.
    ///
    /// # Errors
    ///
    /// Unknown style name.
    #[wasm_bindgen(js_name = setStyle)]
    pub fn set_style(&mut self, style: &str) -> Result<(), JsValue> {
        let style: Style = style.parse().map_err(|e| to_js(&e))?;
        let options = VisualizationOptions {
            style,
            ..self.viewer.options().visualization.clone()
        };
        self.apply(options)
    }

    /// Recolor by color mode name as shown in a dropdown.
    ///
    /// # Errors
    ///
    /// Unknown color mode.
    #[wasm_bindgen(js_name = setColorMapping)]
    pub fn set_color_mapping(&mut self, mapping: &str) -> Result<(), JsValue> {
        let color_mapping: ColorMapping =
            mapping.parse().map_err(|e| to_js(&e))?;
        let options = VisualizationOptions {
            color_mapping,
            ..self.viewer.options().visualization.clone()
        };
        self.apply(options)
    }

    /// Show or hide 3D atom labels.
    #[wasm_bindgen(js_name = toggleLabels)]
    pub fn toggle_labels(&mut self, show: bool) {
        self.viewer.toggle_labels(show);
    }

    /// Re-layout after a window resize.
    pub fn resize(&mut self) {
        let _ = self.viewer.resize(&mut self.host);
    }

    /// Run per-frame tasks; `true` when the 3D view should be redrawn.
    pub fn frame(&mut self) -> bool {
        self.viewer.frame()
    }

    /// Cursor moved within the 3D container.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.viewer.handle_input(InputEvent::CursorMoved { x, y });
    }

    /// DOM `mousedown` / `mouseup` with `MouseEvent.button`.
    #[wasm_bindgen(js_name = pointerButton)]
    pub fn pointer_button(&mut self, button: i16, pressed: bool) {
        self.viewer
            .handle_input(InputEvent::dom_button(button, pressed));
    }

    /// DOM `wheel` with `WheelEvent.deltaY` and `deltaMode`.
    pub fn wheel(&mut self, delta_y: f32, delta_mode: u32) {
        self.viewer
            .handle_input(InputEvent::dom_wheel(delta_y, delta_mode));
    }

    /// Shift key state.
    #[wasm_bindgen(js_name = setShift)]
    pub fn set_shift(&mut self, shift: bool) {
        self.viewer
            .handle_input(InputEvent::ModifiersChanged { shift });
    }

    /// Text for the hover panel.
    #[wasm_bindgen(js_name = hoverText)]
    pub fn hover_text(&self) -> String {
        self.viewer.hover_text()
    }

    /// Statistics of the loaded molecule.
    #[wasm_bindgen(js_name = infoText)]
    pub fn info_text(&self) -> String {
        self.viewer.info().summary()
    }

    /// JSON detail of the selected atom, `null` when nothing is selected.
    #[wasm_bindgen(js_name = selectedJson)]
    pub fn selected_json(&self) -> String {
        let detail = self.viewer.scene().and_then(|s| s.selected_detail());
        serde_json::to_string(&detail).unwrap_or_else(|_| "null".to_owned())
    }

    /// JSON scene graph for a host renderer. Marks it consumed.
    ///
    /// # Errors
    ///
    /// Nothing is loaded, or serialization failed.
    #[wasm_bindgen(js_name = sceneJson)]
    pub fn scene_json(&mut self) -> Result<String, JsValue> {
        let scene = self
            .viewer
            .scene_mut()
            .ok_or_else(|| JsValue::from_str("no 3D scene loaded"))?;
        let json = serde_json::to_string(scene.graph())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        scene.mark_rendered();
        Ok(json)
    }
}
