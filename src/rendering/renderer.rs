use crate::{
    core::{
        config::ViewerConfig,
        constants::{OVERLAY_LINE_HEIGHT, OVERLAY_ORIGIN},
        geo::Point,
        map::{MapState, SpriteMap},
        viewport::ViewTransform,
    },
    layers::object::{MapObject, Sprite},
    rendering::canvas::{Canvas, Color},
    Result,
};

/// Per-frame drawing switches
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub background: Color,
    pub overlay: bool,
    pub outlines: bool,
    pub overlay_color: Color,
    pub outline_color: Color,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background: Color::CORNFLOWER_BLUE,
            overlay: true,
            outlines: false,
            overlay_color: Color::YELLOW,
            outline_color: Color::LIME,
        }
    }
}

impl From<&ViewerConfig> for RenderOptions {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            background: config.background,
            overlay: config.debug.overlay,
            outlines: config.debug.outlines,
            ..Self::default()
        }
    }
}

/// What one frame drew
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub shadows: usize,
    pub images: usize,
}

/// Draws one frame.
///
/// Background first, then every visible layer's shadows, then every visible
/// layer's images, both passes in document layer order, then the overlay in
/// screen space. Anything other than a ready map draws an empty scene.
pub fn render_frame(
    canvas: &mut dyn Canvas,
    view: &ViewTransform,
    state: &MapState,
    options: &RenderOptions,
    fps: Option<f64>,
) -> Result<FrameStats> {
    canvas.reset_transform()?;
    let surface = canvas.size();
    canvas.fill_rect(Point::ZERO, surface, options.background)?;

    canvas.scale(view.scale())?;
    canvas.translate(view.translation())?;

    let mut stats = FrameStats::default();
    if let Some(map) = state.map() {
        canvas.set_image_smoothing(false);

        for shade in visible_sprites(map, |object| object.shade.as_ref()) {
            canvas.draw_image(&shade.image, shade.position)?;
            stats.shadows += 1;
        }

        let outline_width = 1.0 / view.scale();
        for sprite in visible_sprites(map, |object| object.image.as_ref()) {
            canvas.draw_image(&sprite.image, sprite.position)?;
            if options.outlines {
                canvas.stroke_rect(
                    sprite.position,
                    sprite.image.size(),
                    outline_width,
                    options.outline_color,
                )?;
            }
            stats.images += 1;
        }
    }

    canvas.reset_transform()?;
    if options.overlay {
        draw_overlay(canvas, view, state, options, fps)?;
    }
    Ok(stats)
}

/// One visual per object on visible layers, layer by layer in draw order
fn visible_sprites<'a, F>(map: &'a SpriteMap, visual: F) -> impl Iterator<Item = &'a Sprite> + 'a
where
    F: Fn(&'a MapObject) -> Option<&'a Sprite> + Copy + 'a,
{
    map.layers()
        .layers()
        .filter(|layer| layer.visible)
        .flat_map(move |layer| map.objects_on(&layer.id).filter_map(visual))
}

fn overlay_lines(view: &ViewTransform, state: &MapState, fps: Option<f64>) -> Vec<String> {
    let mut lines = Vec::with_capacity(5);
    match state.map() {
        Some(map) => {
            lines.push(format!("Objects: {}", map.objects().len()));
            lines.push(format!(
                "Layers: {}/{} visible",
                map.layers().visible_count(),
                map.layers().len()
            ));
        }
        None => {
            lines.push("Objects: None".to_string());
            lines.push(format!("Map: {}", state.label()));
        }
    }
    lines.push(format!(
        "Scale: {:.3} (scroll {})",
        view.scale(),
        view.scroll_accumulator()
    ));
    let translation = view.translation();
    lines.push(format!(
        "Translate: {:.1}, {:.1}",
        translation.x, translation.y
    ));
    if let Some(fps) = fps {
        lines.push(format!("FPS: {fps:.0}"));
    }
    lines
}

fn draw_overlay(
    canvas: &mut dyn Canvas,
    view: &ViewTransform,
    state: &MapState,
    options: &RenderOptions,
    fps: Option<f64>,
) -> Result<()> {
    let (x, y) = OVERLAY_ORIGIN;
    for (i, line) in overlay_lines(view, state, fps).iter().enumerate() {
        let position = Point::new(x, y + i as f64 * OVERLAY_LINE_HEIGHT);
        canvas.fill_text(line, position, options.overlay_color)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{bounds::Bounds, geo::Size},
        layers::{base::Layer, image::ImageId, image::SpriteImage},
        rendering::context::{DrawCommand, RenderContext},
    };

    fn image(id: usize) -> SpriteImage {
        SpriteImage {
            id: ImageId(id),
            width: 16,
            height: 16,
        }
    }

    fn sample_map() -> SpriteMap {
        let mut map = SpriteMap::new(Bounds::from_coords(0.0, 0.0, 64.0, 64.0));
        map.add_layer(Layer::new("ground", "Ground")).unwrap();
        map.add_layer(Layer::new("trees", "Trees")).unwrap();
        map.add_object(
            MapObject::new("trees")
                .with_image(image(0), Point::new(8.0, 8.0))
                .with_shade(image(1), Point::new(10.0, 12.0)),
        );
        map.add_object(MapObject::new("ground").with_image(image(2), Point::new(0.0, 0.0)));
        map
    }

    fn drawn_images(ctx: &RenderContext) -> Vec<usize> {
        ctx.get_drawing_queue()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Image { image, .. } => Some(image.id.0),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_shadows_then_images_in_layer_order() {
        let state = MapState::Ready(Box::new(sample_map()));
        let mut ctx = RenderContext::new(Size::new(200.0, 100.0));

        let stats = render_frame(
            &mut ctx,
            &ViewTransform::new(),
            &state,
            &RenderOptions::default(),
            None,
        )
        .unwrap();

        assert_eq!(stats, FrameStats { shadows: 1, images: 2 });
        // the ground layer comes first even though its object is listed last
        assert_eq!(drawn_images(&ctx), [1, 2, 0]);
        assert!(matches!(
            ctx.get_drawing_queue()[0],
            DrawCommand::FillRect { color: Color::CORNFLOWER_BLUE, .. }
        ));
    }

    #[test]
    fn test_images_drawn_crisp_and_transformed() {
        let state = MapState::Ready(Box::new(sample_map()));
        let mut view = ViewTransform::new();
        view.set_scroll_accumulator(5.0);
        view.set_translation(Point::new(-8.0, 0.0));
        let mut ctx = RenderContext::new(Size::new(200.0, 100.0));

        render_frame(&mut ctx, &view, &state, &RenderOptions::default(), None).unwrap();

        let tree = ctx
            .get_drawing_queue()
            .iter()
            .find_map(|cmd| match cmd {
                DrawCommand::Image {
                    image,
                    origin,
                    size,
                    smoothing,
                } if image.id == ImageId(0) => Some((*origin, *size, *smoothing)),
                _ => None,
            })
            .unwrap();
        assert_eq!(tree, (Point::new(0.0, 16.0), Size::new(32.0, 32.0), false));
    }

    #[test]
    fn test_outlines_are_one_screen_pixel() {
        let state = MapState::Ready(Box::new(sample_map()));
        let mut view = ViewTransform::new();
        view.set_scroll_accumulator(-5.0);
        let options = RenderOptions {
            outlines: true,
            ..RenderOptions::default()
        };
        let mut ctx = RenderContext::new(Size::new(200.0, 100.0));

        render_frame(&mut ctx, &view, &state, &options, None).unwrap();

        let widths: Vec<f64> = ctx
            .get_drawing_queue()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::StrokeRect { line_width, .. } => Some(*line_width),
                _ => None,
            })
            .collect();
        assert_eq!(widths.len(), 2);
        assert!(widths.iter().all(|w| (w - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_hidden_layer_draws_nothing() {
        let mut map = sample_map();
        map.layers_mut().set_visible("trees", false).unwrap();
        let state = MapState::Ready(Box::new(map));
        let mut ctx = RenderContext::new(Size::new(200.0, 100.0));

        let stats = render_frame(
            &mut ctx,
            &ViewTransform::new(),
            &state,
            &RenderOptions::default(),
            None,
        )
        .unwrap();

        assert_eq!(stats, FrameStats { shadows: 0, images: 1 });
        assert_eq!(drawn_images(&ctx), [2]);
    }

    #[test]
    fn test_empty_scene_when_not_ready() {
        for state in [
            MapState::Absent,
            MapState::Loading,
            MapState::Failed("boom".to_string()),
        ] {
            let mut ctx = RenderContext::new(Size::new(200.0, 100.0));
            let stats = render_frame(
                &mut ctx,
                &ViewTransform::new(),
                &state,
                &RenderOptions::default(),
                None,
            )
            .unwrap();

            assert_eq!(stats, FrameStats::default());
            assert!(drawn_images(&ctx).is_empty());
            assert!(ctx.get_drawing_queue().iter().any(|cmd| matches!(
                cmd,
                DrawCommand::Text { text, .. } if text == "Objects: None"
            )));
        }
    }

    #[test]
    fn test_overlay_is_screen_fixed() {
        let state = MapState::Ready(Box::new(sample_map()));
        let mut view = ViewTransform::new();
        view.set_scroll_accumulator(10.0);
        view.set_translation(Point::new(123.0, -45.0));
        let mut ctx = RenderContext::new(Size::new(200.0, 100.0));

        render_frame(&mut ctx, &view, &state, &RenderOptions::default(), Some(60.0)).unwrap();

        let texts: Vec<(String, Point)> = ctx
            .get_drawing_queue()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, position, .. } => Some((text.clone(), *position)),
                _ => None,
            })
            .collect();
        assert_eq!(texts[0], ("Objects: 2".to_string(), Point::new(10.0, 10.0)));
        assert_eq!(texts[1].0, "Layers: 2/2 visible");
        assert_eq!(texts[2].0, "Scale: 3.000 (scroll 10)");
        assert_eq!(texts[3].0, "Translate: 123.0, -45.0");
        assert_eq!(texts[4].0, "FPS: 60");
    }

    #[test]
    fn test_overlay_can_be_disabled() {
        let mut ctx = RenderContext::new(Size::new(200.0, 100.0));
        let options = RenderOptions {
            overlay: false,
            ..RenderOptions::default()
        };
        render_frame(&mut ctx, &ViewTransform::new(), &MapState::Absent, &options, None).unwrap();
        assert_eq!(ctx.get_drawing_queue().len(), 1);
    }
}
