use crate::{
    core::{
        geo::{Point, Size},
        viewer::Viewer,
    },
    input::{InputEvent, PointerButtons},
    rendering::context::{DrawCommand, RenderContext},
    ui::textures::TextureCache,
};
use egui::{
    Align2, Color32, CursorIcon, FontId, PointerButton, Pos2, Rect, Response, Sense, Stroke, Ui,
    Vec2,
};

/// Font used by the debug overlay
const OVERLAY_FONT_SIZE: f32 = 12.0;

/// Immediate-mode map panel.
///
/// Keep one `MapView` per viewer across frames; it holds the uploaded sprite
/// textures and the command buffer frames are recorded into.
///
/// ```rust,ignore
/// egui::CentralPanel::default().show(ctx, |ui| {
///     self.map_view.show(ui, &mut self.viewer);
/// });
/// ```
pub struct MapView {
    textures: TextureCache,
    context: RenderContext,
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}

impl MapView {
    pub fn new() -> Self {
        Self {
            textures: TextureCache::new(),
            context: RenderContext::new(Size::ZERO),
        }
    }

    /// Fills the available space with the map, feeding pointer input to the
    /// viewer and drawing its current frame
    pub fn show(&mut self, ui: &mut Ui, viewer: &mut Viewer) -> Response {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

        let surface = to_size(rect.size());
        viewer.handle_input(&InputEvent::Resize { size: surface });
        viewer.poll_load();

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                if let Some(pointer) = response.hover_pos() {
                    viewer.handle_input(&InputEvent::Wheel {
                        delta: scroll as f64,
                        position: to_local(pointer, rect),
                    });
                }
            }
        }

        if response.dragged_by(PointerButton::Primary) {
            let delta = response.drag_delta();
            let position = response
                .interact_pointer_pos()
                .map(|p| to_local(p, rect))
                .unwrap_or(Point::ZERO);
            viewer.handle_input(&InputEvent::PointerMove {
                position,
                delta: Point::new(delta.x as f64, delta.y as f64),
                buttons: PointerButtons::PRIMARY,
            });
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        }

        self.context.resize(surface);
        self.context.begin_frame();
        if let Err(e) = viewer.render(&mut self.context) {
            log::warn!("frame skipped: {e}");
        }
        self.paint(ui, rect, viewer);

        if viewer.needs_redraw() {
            ui.ctx().request_repaint();
        }
        response
    }

    /// Replays the recorded frame onto the egui painter
    fn paint(&mut self, ui: &Ui, rect: Rect, viewer: &Viewer) {
        self.textures.sync_generation(viewer.generation());
        let painter = ui.painter_at(rect);
        let images = viewer.map().map(|map| map.images());

        for command in self.context.take_drawing_queue() {
            match command {
                DrawCommand::FillRect {
                    origin,
                    size,
                    color,
                } => {
                    painter.rect_filled(screen_rect(rect.min, origin, size), 0.0, color);
                }
                DrawCommand::Image {
                    image,
                    origin,
                    size,
                    smoothing,
                } => {
                    let Some(images) = images else { continue };
                    if let Some(texture) =
                        self.textures.texture_for(ui.ctx(), images, image.id, smoothing)
                    {
                        painter.image(
                            texture,
                            screen_rect(rect.min, origin, size),
                            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                            Color32::WHITE,
                        );
                    }
                }
                DrawCommand::StrokeRect {
                    origin,
                    size,
                    line_width,
                    color,
                } => {
                    painter.rect_stroke(
                        screen_rect(rect.min, origin, size),
                        0.0,
                        Stroke::new(line_width as f32, color),
                    );
                }
                DrawCommand::Text {
                    text,
                    position,
                    color,
                } => {
                    painter.text(
                        to_pos(rect.min, position),
                        Align2::LEFT_TOP,
                        text,
                        FontId::monospace(OVERLAY_FONT_SIZE),
                        Color32::from(color),
                    );
                }
            }
        }
    }
}

fn to_size(size: Vec2) -> Size {
    Size::new(size.x as f64, size.y as f64)
}

/// Pointer position relative to the panel's top-left corner
fn to_local(pointer: Pos2, rect: Rect) -> Point {
    let local = pointer - rect.min;
    Point::new(local.x as f64, local.y as f64)
}

fn to_pos(panel_min: Pos2, point: Point) -> Pos2 {
    panel_min + Vec2::new(point.x as f32, point.y as f32)
}

fn screen_rect(panel_min: Pos2, origin: Point, size: Size) -> Rect {
    Rect::from_min_size(
        to_pos(panel_min, origin),
        Vec2::new(size.width as f32, size.height as f32),
    )
}
