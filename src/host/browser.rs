//! DOM-backed chart host.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, MouseEvent, Window};

use crate::charts::Chart;
use crate::error::{js_error, DashboardError, Result};
use crate::matrix::MatrixSpec;
use crate::registry::{create_controller, DatasetController};
use crate::render::render_matrix;
use crate::types::ChartConfig;

use super::{ChartHost, MountOutcome};

#[wasm_bindgen]
extern "C" {
    /// The page's charting library constructor.
    #[wasm_bindgen(js_name = Chart)]
    type ChartJs;

    #[wasm_bindgen(constructor, js_class = "Chart", catch)]
    fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> std::result::Result<ChartJs, JsValue>;

    #[wasm_bindgen(static_method_of = ChartJs, js_class = "Chart", js_name = getChart, catch)]
    fn get_chart(canvas: &HtmlCanvasElement) -> std::result::Result<Option<ChartJs>, JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &ChartJs);
}

fn to_js(config: &ChartConfig) -> Result<JsValue> {
    config
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| DashboardError::Render(format!("chart config: {e}")))
}

/// Canvas, context and controller of one matrix chart.
struct MatrixState {
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    controller: Box<dyn DatasetController>,
    spec: MatrixSpec,
}

impl MatrixState {
    /// Size the backing store to the CSS box and redraw.
    ///
    /// The cast is safe because both factors are non-negative and far below
    /// `u32::MAX` for any on-screen canvas.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn redraw(&mut self) -> Result<()> {
        let width = f64::from(self.canvas.client_width().max(0));
        let height = f64::from(self.canvas.client_height().max(0));
        let dpr = self.window.device_pixel_ratio().max(1.0);

        self.canvas.set_width((width * dpr).round() as u32);
        self.canvas.set_height((height * dpr).round() as u32);
        self.ctx
            .set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
            .map_err(|e| DashboardError::Render(js_error(&e)))?;

        render_matrix(
            &mut self.ctx,
            self.controller.as_mut(),
            &self.spec,
            width,
            height,
        )?;
        Ok(())
    }

    fn hover(&self, x: f64, y: f64) {
        let text = self.controller.tooltip_at(x, y).unwrap_or_default();
        self.canvas.set_title(&text);
    }
}

/// A live matrix chart: redraws on window resize, titles the canvas with
/// the hovered cell's tooltip. Listeners go away with the view.
struct MatrixView {
    state: Rc<RefCell<MatrixState>>,
    on_resize: Closure<dyn FnMut()>,
    on_move: Closure<dyn FnMut(MouseEvent)>,
}

impl MatrixView {
    fn open(window: &Window, canvas: HtmlCanvasElement, chart: &Chart) -> Result<Self> {
        let spec = chart
            .as_matrix()
            .ok_or_else(|| DashboardError::Render("not a matrix chart".to_string()))?
            .clone();
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| DashboardError::Render(js_error(&e)))?
            .ok_or_else(|| DashboardError::Render("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| DashboardError::Render("not a 2d context".to_string()))?;

        let mut state = MatrixState {
            window: window.clone(),
            canvas: canvas.clone(),
            ctx,
            controller: create_controller(chart)?,
            spec,
        };
        state.redraw()?;
        let state = Rc::new(RefCell::new(state));

        let on_resize = {
            let state = Rc::clone(&state);
            Closure::wrap(Box::new(move || {
                if let Ok(mut s) = state.try_borrow_mut() {
                    if let Err(e) = s.redraw() {
                        log::error!("matrix: redraw failed: {e}");
                    }
                }
            }) as Box<dyn FnMut()>)
        };
        window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(|e| DashboardError::Render(js_error(&e)))?;

        let on_move = {
            let state = Rc::clone(&state);
            let target = canvas.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let rect = target.get_bounding_client_rect();
                let x = f64::from(event.client_x()) - rect.left();
                let y = f64::from(event.client_y()) - rect.top();
                if let Ok(s) = state.try_borrow() {
                    s.hover(x, y);
                }
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        canvas
            .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())
            .map_err(|e| DashboardError::Render(js_error(&e)))?;

        Ok(Self {
            state,
            on_resize,
            on_move,
        })
    }
}

impl Drop for MatrixView {
    fn drop(&mut self) {
        let Ok(state) = self.state.try_borrow() else {
            return;
        };
        let _ = state
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
        let _ = state
            .canvas
            .remove_event_listener_with_callback("mousemove", self.on_move.as_ref().unchecked_ref());
    }
}

enum Mounted {
    Native(ChartJs),
    Matrix(MatrixView),
}

impl Mounted {
    fn destroy(self) {
        match self {
            Self::Native(chart) => chart.destroy(),
            Self::Matrix(view) => drop(view),
        }
    }
}

/// Host bound to the current document.
pub struct BrowserHost {
    window: Window,
    document: Document,
    mounted: HashMap<String, Mounted>,
}

impl BrowserHost {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        Ok(Self {
            window,
            document,
            mounted: HashMap::new(),
        })
    }

    fn element(&self, id: &str) -> Result<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| DashboardError::MissingTarget(id.to_string()))
    }

    fn canvas(&self, id: &str) -> Result<HtmlCanvasElement> {
        self.element(id)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| DashboardError::MissingTarget(format!("{id} (not a canvas)")))
    }
}

impl ChartHost for BrowserHost {
    fn has_target(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn mount(&mut self, id: &str, chart: Chart) -> Result<MountOutcome> {
        let canvas = self.canvas(id)?;

        let mut outcome = MountOutcome::Created;
        if let Some(previous) = self.mounted.remove(id) {
            previous.destroy();
            outcome = MountOutcome::Replaced;
        } else if let Ok(Some(foreign)) = ChartJs::get_chart(&canvas) {
            foreign.destroy();
            outcome = MountOutcome::Replaced;
        }

        let mounted = match &chart {
            Chart::Native(config) => {
                let js = to_js(config)?;
                let instance = ChartJs::new(&canvas, &js).map_err(|e| {
                    DashboardError::Render(format!("{}: {}", id, js_error(&e)))
                })?;
                Mounted::Native(instance)
            }
            Chart::Matrix(_) => Mounted::Matrix(MatrixView::open(&self.window, canvas, &chart)?),
        };
        self.mounted.insert(id.to_string(), mounted);
        log::debug!("host: mounted {} chart on '{id}'", chart.kind());
        Ok(outcome)
    }

    fn show_message(&mut self, id: &str, html: &str) -> Result<()> {
        self.element(id)?.set_inner_html(html);
        Ok(())
    }

    fn append_canvas(&mut self, container_id: &str, canvas_id: &str) -> Result<()> {
        let container = self.element(container_id)?;
        let canvas = self
            .document
            .create_element("canvas")
            .map_err(|e| DashboardError::Render(js_error(&e)))?;
        canvas.set_id(canvas_id);
        container
            .append_child(&canvas)
            .map_err(|e| DashboardError::Render(js_error(&e)))?;
        Ok(())
    }
}
