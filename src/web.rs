//! Browser front-end: draws straight onto an HTML canvas
//!
//! ```js
//! import init, { WebViewer } from "./pkg/spritemap.js";
//! await init();
//! const viewer = new WebViewer("map");
//! viewer.load("maps/main.json");
//! window.addEventListener("resize", () => viewer.fit_to_container());
//! canvas.addEventListener("wheel", (e) => viewer.on_wheel(e.deltaY, e.offsetX, e.offsetY));
//! canvas.addEventListener("pointermove", (e) =>
//!     viewer.on_pointer_move(e.offsetX, e.offsetY, e.movementX, e.movementY, e.buttons));
//! const tick = () => { viewer.frame(); requestAnimationFrame(tick); };
//! requestAnimationFrame(tick);
//! ```

use crate::{
    core::{
        config::ViewerConfig,
        geo::{Point, Size},
        viewer::Viewer,
    },
    data::{loader::MapLoader, source::HttpSource},
    input::{InputEvent, PointerButtons},
    layers::{
        image::{ImageId, ImageStore},
        SpriteImage,
    },
    prelude::HashMap,
    rendering::canvas::{Canvas, Color},
    MapError, Result,
};
use wasm_bindgen::{prelude::*, Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

const OVERLAY_FONT: &str = "12px monospace";

fn js_error(context: &str, value: JsValue) -> MapError {
    MapError::Render(format!("{context}: {value:?}"))
}

fn to_js(error: MapError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn document() -> Result<web_sys::Document> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| MapError::Render("no document available".to_string()))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| js_error("get_context", e))?
        .ok_or_else(|| MapError::Render("canvas has no 2d context".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|e| js_error("dyn_into", e.into()))
}

/// [`Canvas`] over a `CanvasRenderingContext2d`.
///
/// Sprite bitmaps live on offscreen canvases, built once per map generation.
pub struct WebCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    bitmaps: HashMap<ImageId, HtmlCanvasElement>,
    generation: u64,
}

impl WebCanvas {
    pub fn from_element_id(id: &str) -> Result<Self> {
        let canvas = document()?
            .get_element_by_id(id)
            .ok_or_else(|| MapError::Render(format!("no element with id '{id}'")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| MapError::Render(format!("element '{id}' is not a canvas")))?;
        Self::new(canvas)
    }

    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = context_2d(&canvas)?;
        Ok(Self {
            canvas,
            ctx,
            bitmaps: HashMap::default(),
            generation: 0,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Matches the drawing buffer to the element's laid-out size and returns
    /// the new surface size. A collapsed element keeps the current buffer.
    pub fn fit_to_container(&mut self) -> Size {
        if let Some((width, height)) =
            container_size(self.canvas.client_width(), self.canvas.client_height())
        {
            if width != self.canvas.width() || height != self.canvas.height() {
                self.resize(width, height);
            }
        }
        self.size()
    }

    /// Rebuilds the offscreen bitmaps when a different map is shown
    pub fn sync_images(&mut self, images: Option<&ImageStore>, generation: u64) -> Result<()> {
        if self.generation == generation {
            return Ok(());
        }
        self.bitmaps.clear();
        self.generation = generation;

        let Some(images) = images else {
            return Ok(());
        };
        let document = document()?;
        for index in 0..images.len() {
            let id = ImageId(index);
            let Some(decoded) = images.get(id) else {
                continue;
            };
            let bitmap = document
                .create_element("canvas")
                .map_err(|e| js_error("create_element", e))?
                .dyn_into::<HtmlCanvasElement>()
                .map_err(|_| MapError::Render("created element is not a canvas".to_string()))?;
            bitmap.set_width(decoded.width);
            bitmap.set_height(decoded.height);

            let data = ImageData::new_with_u8_clamped_array_and_sh(
                Clamped(decoded.pixels.as_slice()),
                decoded.width,
                decoded.height,
            )
            .map_err(|e| js_error("ImageData", e))?;
            context_2d(&bitmap)?
                .put_image_data(&data, 0.0, 0.0)
                .map_err(|e| js_error("put_image_data", e))?;
            self.bitmaps.insert(id, bitmap);
        }
        log::debug!("prepared {} sprite bitmaps", self.bitmaps.len());
        Ok(())
    }
}

impl Canvas for WebCanvas {
    fn size(&self) -> Size {
        Size::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn reset_transform(&mut self) -> Result<()> {
        self.ctx
            .reset_transform()
            .map_err(|e| js_error("reset_transform", e))
    }

    fn scale(&mut self, factor: f64) -> Result<()> {
        self.ctx
            .scale(factor, factor)
            .map_err(|e| js_error("scale", e))
    }

    fn translate(&mut self, offset: Point) -> Result<()> {
        self.ctx
            .translate(offset.x, offset.y)
            .map_err(|e| js_error("translate", e))
    }

    fn set_image_smoothing(&mut self, enabled: bool) {
        self.ctx.set_image_smoothing_enabled(enabled);
    }

    fn fill_rect(&mut self, origin: Point, size: Size, color: Color) -> Result<()> {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(origin.x, origin.y, size.width, size.height);
        Ok(())
    }

    fn stroke_rect(
        &mut self,
        origin: Point,
        size: Size,
        line_width: f64,
        color: Color,
    ) -> Result<()> {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(line_width);
        self.ctx
            .stroke_rect(origin.x, origin.y, size.width, size.height);
        Ok(())
    }

    fn draw_image(&mut self, image: &SpriteImage, position: Point) -> Result<()> {
        let Some(bitmap) = self.bitmaps.get(&image.id) else {
            return Ok(());
        };
        self.ctx
            .draw_image_with_html_canvas_element(bitmap, position.x, position.y)
            .map_err(|e| js_error("draw_image", e))
    }

    fn fill_text(&mut self, text: &str, position: Point, color: Color) -> Result<()> {
        self.ctx.set_font(OVERLAY_FONT);
        self.ctx.set_text_baseline("top");
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_text(text, position.x, position.y)
            .map_err(|e| js_error("fill_text", e))
    }
}

/// Forwards `log` records to the browser console
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            _ => web_sys::console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    if log::set_logger(&CONSOLE_LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

/// Resolves `url` against the page address so relative map paths work
fn absolute_url(url: &str) -> Result<String> {
    let base = web_sys::window()
        .ok_or_else(|| MapError::Load("no window available".to_string()))?
        .location()
        .href()
        .map_err(|e| MapError::Load(format!("page location: {e:?}")))?;
    web_sys::Url::new_with_base(url, &base)
        .map(|resolved| resolved.href())
        .map_err(|e| MapError::Load(format!("bad map url '{url}': {e:?}")))
}

/// Buffer size for an element laid out at `client_width` x `client_height`
/// CSS pixels; `None` while the element is collapsed or hidden
fn container_size(client_width: i32, client_height: i32) -> Option<(u32, u32)> {
    if client_width <= 0 || client_height <= 0 {
        return None;
    }
    Some((client_width as u32, client_height as u32))
}

/// Converts a DOM `WheelEvent.deltaY` into a zoom step; scrolling up zooms in
fn wheel_step(delta_y: f64) -> f64 {
    if delta_y == 0.0 || delta_y.is_nan() {
        0.0
    } else {
        -delta_y.signum()
    }
}

/// A viewer bound to one `<canvas>` element
#[wasm_bindgen]
pub struct WebViewer {
    viewer: Viewer,
    canvas: WebCanvas,
}

impl WebViewer {
    fn build(canvas_id: &str, config: ViewerConfig) -> Result<WebViewer> {
        let mut canvas = WebCanvas::from_element_id(canvas_id)?;
        let mut viewer = Viewer::new(config);
        viewer.handle_input(&InputEvent::Resize {
            size: canvas.fit_to_container(),
        });
        Ok(WebViewer { viewer, canvas })
    }
}

#[wasm_bindgen]
impl WebViewer {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> std::result::Result<WebViewer, JsValue> {
        Self::build(canvas_id, ViewerConfig::default()).map_err(to_js)
    }

    /// Like the constructor, with a JSON viewer configuration
    pub fn with_config(
        canvas_id: &str,
        config_json: &str,
    ) -> std::result::Result<WebViewer, JsValue> {
        let config = ViewerConfig::from_json_str(config_json).map_err(to_js)?;
        Self::build(canvas_id, config).map_err(to_js)
    }

    /// Starts loading a map document; the configured source when `url` is empty
    pub fn load(&mut self, url: &str) -> std::result::Result<(), JsValue> {
        let location = if url.is_empty() {
            self.viewer.config().map_source.clone()
        } else {
            url.to_string()
        };
        let resolved = absolute_url(&location).map_err(to_js)?;
        let pending = MapLoader::spawn_local(Box::new(HttpSource::new(resolved)));
        self.viewer.begin_load(pending);
        Ok(())
    }

    pub fn on_wheel(&mut self, delta_y: f64, x: f64, y: f64) -> bool {
        self.viewer
            .handle_input(&InputEvent::Wheel {
                delta: wheel_step(delta_y),
                position: Point::new(x, y),
            })
            .is_handled()
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64, dx: f64, dy: f64, buttons: u16) -> bool {
        self.viewer
            .handle_input(&InputEvent::PointerMove {
                position: Point::new(x, y),
                delta: Point::new(dx, dy),
                buttons: PointerButtons::from_bits(buttons),
            })
            .is_handled()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.resize(width, height);
        self.viewer.handle_input(&InputEvent::Resize {
            size: Size::new(width as f64, height as f64),
        });
    }

    /// Re-reads the element's laid-out size; call from a window resize listener
    pub fn fit_to_container(&mut self) {
        let size = self.canvas.fit_to_container();
        self.viewer.handle_input(&InputEvent::Resize { size });
    }

    /// Draws one frame. Returns whether another frame should be scheduled.
    pub fn frame(&mut self) -> std::result::Result<bool, JsValue> {
        self.viewer.poll_load();
        let images = self.viewer.map().map(|map| map.images());
        self.canvas
            .sync_images(images, self.viewer.generation())
            .map_err(to_js)?;
        self.viewer.render(&mut self.canvas).map_err(to_js)?;
        Ok(self.viewer.needs_redraw())
    }

    /// Layer ids, topmost drawn layer first
    pub fn layer_ids(&self) -> js_sys::Array {
        self.viewer
            .map()
            .map(|map| {
                map.layers()
                    .list_order()
                    .map(|layer| JsValue::from_str(&layer.id))
                    .collect()
            })
            .unwrap_or_else(js_sys::Array::new)
    }

    pub fn layer_name(&self, layer_id: &str) -> Option<String> {
        self.viewer
            .map()?
            .layers()
            .get_layer(layer_id)
            .map(|layer| layer.label().to_string())
    }

    pub fn is_layer_visible(&self, layer_id: &str) -> bool {
        self.viewer
            .map()
            .is_some_and(|map| map.layers().is_visible(layer_id))
    }

    pub fn set_layer_visible(
        &mut self,
        layer_id: &str,
        visible: bool,
    ) -> std::result::Result<bool, JsValue> {
        self.viewer.set_layer_visible(layer_id, visible).map_err(to_js)
    }

    /// "absent", "loading", "ready" or "failed"
    pub fn state(&self) -> String {
        self.viewer.map_state().label().to_string()
    }
}
