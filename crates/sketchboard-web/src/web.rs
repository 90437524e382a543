//! WebAssembly entry point and the browser-facing sketchboard object.

use crate::shortcuts::{Command, ShortcutRegistry};
use kurbo::{BezPath, PathEl, Point, Vec2};
use sketchboard_core::{Canvas, Cursor, EditorConfig, PointerEvent, PointerPhase, ToolKind};
use sketchboard_render::{DrawCommand, RenderStyle, SceneSurface, SketchOptions, css_color};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

fn js_error(message: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&message.to_string())
}

/// Install the panic hook and console logger.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).map_err(js_error)?;
    log::info!("Starting sketchboard (WASM)");
    Ok(())
}

/// A drawing surface bound to a `<canvas>` element.
#[wasm_bindgen]
pub struct SketchBoard {
    canvas: Canvas<SceneSurface>,
    element: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

#[wasm_bindgen]
impl SketchBoard {
    /// Bind to the canvas element with the given id.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<SketchBoard, JsValue> {
        Self::build(canvas_id, EditorConfig::default())
    }

    /// Bind to a canvas with an editor configuration given as JSON.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(canvas_id: &str, config_json: &str) -> Result<SketchBoard, JsValue> {
        let config = EditorConfig::from_json(config_json).map_err(js_error)?;
        Self::build(canvas_id, config)
    }

    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&mut self, name: &str) -> Result<(), JsValue> {
        let tool: ToolKind = name.parse().map_err(js_error)?;
        self.canvas.set_tool(tool);
        self.paint();
        self.set_cursor(self.canvas.cursor());
        Ok(())
    }

    pub fn tool(&self) -> String {
        self.canvas.tool().name().to_string()
    }

    /// `button` is the DOM `MouseEvent.button` value.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, client_x: f64, client_y: f64, button: i16) {
        self.dispatch(PointerPhase::Down, client_x, client_y, button);
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) {
        self.dispatch(PointerPhase::Move, client_x, client_y, 0);
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, client_x: f64, client_y: f64, button: i16) {
        self.dispatch(PointerPhase::Up, client_x, client_y, button);
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self, client_x: f64, client_y: f64) {
        self.dispatch(PointerPhase::Leave, client_x, client_y, 0);
    }

    /// Handle a key press. Returns true if it was consumed.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str, ctrl: bool, shift: bool, meta: bool) -> bool {
        let Some(command) = ShortcutRegistry::resolve(key, ctrl || meta, shift) else {
            return false;
        };
        match command {
            Command::Undo => {
                self.undo();
            }
            Command::Redo => {
                self.redo();
            }
            Command::Tool(tool) => {
                if let Err(err) = self.set_tool(tool.name()) {
                    log::warn!("Shortcut failed: {err:?}");
                }
            }
        }
        true
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.canvas.undo();
        if changed {
            self.paint();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.canvas.redo();
        if changed {
            self.paint();
        }
        changed
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.canvas.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.canvas.can_redo()
    }

    #[wasm_bindgen(js_name = shapeCount)]
    pub fn shape_count(&self) -> usize {
        self.canvas.shapes().len()
    }

    /// Current shapes as a JSON array of `{ id, kind, x1, y1, x2, y2 }`.
    #[wasm_bindgen(js_name = shapesJson)]
    pub fn shapes_json(&self) -> Result<String, JsValue> {
        self.canvas.shapes().to_json().map_err(js_error)
    }
}

impl SketchBoard {
    fn build(canvas_id: &str, config: EditorConfig) -> Result<SketchBoard, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| js_error("No document available"))?;
        let element = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| js_error(format!("No element with id '{canvas_id}'")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_error(format!("Element '{canvas_id}' is not a canvas")))?;
        let context = element
            .get_context("2d")?
            .ok_or_else(|| js_error("2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| js_error("Unexpected context type"))?;

        // Match the bitmap to the displayed size so client coordinates map 1:1.
        if let (Ok(width), Ok(height)) = (
            u32::try_from(element.client_width()),
            u32::try_from(element.client_height()),
        ) {
            if width > 0 && height > 0 {
                element.set_width(width);
                element.set_height(height);
            }
        }

        let mut surface = SceneSurface::new(SketchOptions::default(), RenderStyle::default());
        surface.attach();
        let mut canvas = Canvas::with_config(surface, config);
        canvas.redraw();

        log::info!("Sketchboard bound to #{canvas_id} ({}x{})", element.width(), element.height());
        ShortcutRegistry::log_all();

        let board = SketchBoard {
            canvas,
            element,
            context,
        };
        board.paint();
        Ok(board)
    }

    /// The canvas offset is read on every event; the page may have scrolled.
    fn canvas_offset(&self) -> Vec2 {
        let rect = self.element.get_bounding_client_rect();
        Vec2::new(rect.left(), rect.top())
    }

    fn dispatch(&mut self, phase: PointerPhase, client_x: f64, client_y: f64, button: i16) {
        let event = PointerEvent::from_dom(phase, Point::new(client_x, client_y), self.canvas_offset(), button);
        let response = self.canvas.dispatch(event);
        if response.redraw {
            self.paint();
        }
        self.set_cursor(response.cursor);
    }

    fn set_cursor(&self, cursor: Cursor) {
        if let Err(err) = self.element.style().set_property("cursor", cursor.css_name()) {
            log::warn!("Failed to set cursor: {err:?}");
        }
    }

    /// Replay the retained scene onto the 2D context.
    fn paint(&self) {
        let style = *self.canvas.surface().style();
        let ctx = &self.context;
        let width = f64::from(self.element.width());
        let height = f64::from(self.element.height());

        for command in self.canvas.surface().scene().commands() {
            match command {
                DrawCommand::Clear => {
                    ctx.clear_rect(0.0, 0.0, width, height);
                    ctx.set_fill_style_str(&css_color(style.background));
                    ctx.fill_rect(0.0, 0.0, width, height);
                }
                DrawCommand::Stroke(path) => {
                    trace_path(ctx, path);
                    ctx.set_stroke_style_str(&css_color(style.stroke_color));
                    ctx.set_line_width(style.stroke_width);
                    ctx.stroke();
                }
                DrawCommand::Highlight(highlight) => {
                    trace_path(ctx, &highlight.outline);
                    ctx.set_stroke_style_str(&css_color(style.highlight_color));
                    ctx.set_line_width(style.highlight_width);
                    ctx.stroke();

                    let half = style.node_size / 2.0;
                    ctx.set_fill_style_str(&css_color(style.node_fill));
                    for node in &highlight.nodes {
                        let (x, y) = (node.position.x - half, node.position.y - half);
                        ctx.fill_rect(x, y, style.node_size, style.node_size);
                        ctx.stroke_rect(x, y, style.node_size, style.node_size);
                    }
                }
            }
        }
    }
}

fn trace_path(ctx: &CanvasRenderingContext2d, path: &BezPath) {
    ctx.begin_path();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
            PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
            PathEl::QuadTo(c, p) => ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
            PathEl::CurveTo(c1, c2, p) => ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathEl::ClosePath => ctx.close_path(),
        }
    }
}
