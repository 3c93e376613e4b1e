#[cfg(test)]
mod viewer_integration_tests {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use image::{ImageOutputFormat, Rgba, RgbaImage};
    use spritemap::{
        input::PointerButtons, rendering::renderer::FrameStats, DrawCommand, InputEvent, MapState,
        Point, RenderContext, Size, SpriteMap, Viewer, ViewerConfig,
    };
    use std::io::Cursor;

    fn png_base64(width: u32, height: u32) -> String {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        STANDARD.encode(bytes)
    }

    /// Trees are declared before the ground object they stand on, but the
    /// ground layer comes first
    fn town_document() -> String {
        format!(
            r#"{{
                "dimensions": {{ "width": 64, "height": 32 }},
                "layers": [
                    {{ "id": "ground", "name": "Ground", "visible": true }},
                    {{ "id": "trees", "name": "Trees", "visible": true }}
                ],
                "objects": [
                    {{ "layer": "trees", "image": "{tree}", "pos": {{ "x": 8, "y": 8 }},
                       "shade": "{shade}", "shade_pos": {{ "x": 10, "y": 12 }} }},
                    {{ "layer": "ground", "image": "data:image/png;base64,{ground}",
                       "pos": {{ "x": 0, "y": 0 }} }}
                ]
            }}"#,
            tree = png_base64(8, 16),
            shade = png_base64(8, 4),
            ground = png_base64(64, 32),
        )
    }

    fn loaded_viewer(config: ViewerConfig) -> Viewer {
        let map = SpriteMap::from_json(town_document().as_bytes()).unwrap();
        let mut viewer = Viewer::new(config);
        viewer.handle_input(&InputEvent::Resize {
            size: Size::new(640.0, 480.0),
        });
        viewer.finish_load(Ok(map));
        viewer
    }

    fn drawn_sizes(ctx: &RenderContext) -> Vec<(f64, f64)> {
        ctx.get_drawing_queue()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Image { image, .. } => {
                    Some((image.width as f64, image.height as f64))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_document_renders_shadows_then_layers_in_order() {
        let config = ViewerConfig {
            fit_on_load: false,
            ..ViewerConfig::default()
        };
        let mut viewer = loaded_viewer(config);
        let mut ctx = RenderContext::new(viewer.surface());

        let stats = viewer.render(&mut ctx).unwrap();

        assert_eq!(stats, FrameStats { shadows: 1, images: 2 });
        // shade, then ground, then the tree on top
        assert_eq!(drawn_sizes(&ctx), [(8.0, 4.0), (64.0, 32.0), (8.0, 16.0)]);
    }

    #[test]
    fn test_hidden_layer_applies_from_next_frame() {
        let mut viewer = loaded_viewer(ViewerConfig::default());
        let mut ctx = RenderContext::new(viewer.surface());
        viewer.render(&mut ctx).unwrap();
        assert_eq!(drawn_sizes(&ctx).len(), 3);
        let view = viewer.view().clone();

        assert!(viewer.set_layer_visible("trees", false).unwrap());
        assert_eq!(viewer.view(), &view);
        ctx.begin_frame();
        let stats = viewer.render(&mut ctx).unwrap();

        assert_eq!(stats, FrameStats { shadows: 0, images: 1 });
        assert_eq!(drawn_sizes(&ctx), [(64.0, 32.0)]);
    }

    #[test]
    fn test_fit_on_load_centers_extent() {
        let viewer = loaded_viewer(ViewerConfig::default());
        let view = viewer.view();

        // 640x480 over 64x32 wants scale 10: 45 ticks
        assert_eq!(view.scroll_accumulator(), 45.0);
        assert!((view.scale() - 10.0).abs() < 1e-9);
        let center = view.screen_to_world(&Point::new(320.0, 240.0));
        assert!((center.x - 32.0).abs() < 1e-9);
        assert!((center.y - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_keeps_cursor_anchored() {
        let mut viewer = loaded_viewer(ViewerConfig::default());
        let cursor = Point::new(123.0, 77.0);
        let anchor = viewer.view().screen_to_world(&cursor);

        for delta in [-1.0, -1.0, -3.0, 0.5, 1.0, 1.0, 1.0] {
            viewer.handle_input(&InputEvent::Wheel {
                delta,
                position: cursor,
            });
            let now = viewer.view().screen_to_world(&cursor);
            assert!((now.x - anchor.x).abs() < 1e-9);
            assert!((now.y - anchor.y).abs() < 1e-9);
        }
        // each event is one whole tick whatever its magnitude
        assert_eq!(viewer.view().scroll_accumulator(), 45.0 - 3.0 + 4.0);
    }

    #[test]
    fn test_drag_pans_by_screen_pixels() {
        let mut viewer = loaded_viewer(ViewerConfig::default());
        let before = viewer.view().world_to_screen(&Point::new(32.0, 16.0));

        viewer.handle_input(&InputEvent::PointerMove {
            position: Point::new(300.0, 200.0),
            delta: Point::new(25.0, -10.0),
            buttons: PointerButtons::PRIMARY,
        });
        viewer.handle_input(&InputEvent::PointerMove {
            position: Point::new(325.0, 190.0),
            delta: Point::new(40.0, 40.0),
            buttons: PointerButtons::NONE,
        });

        let after = viewer.view().world_to_screen(&Point::new(32.0, 16.0));
        assert!((after.x - before.x - 25.0).abs() < 1e-9);
        assert!((after.y - before.y + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_document_leaves_empty_scene() {
        let mut viewer = Viewer::default();
        viewer.finish_load(SpriteMap::from_json(b"{ \"layers\": 3 }"));
        assert!(matches!(viewer.map_state(), MapState::Failed(_)));

        let mut ctx = RenderContext::new(Size::new(100.0, 100.0));
        let stats = viewer.render(&mut ctx).unwrap();
        assert_eq!(stats, FrameStats::default());
        assert!(drawn_sizes(&ctx).is_empty());
        assert!(ctx.get_drawing_queue().iter().any(|cmd| matches!(
            cmd,
            DrawCommand::Text { text, .. } if text == "Map: failed"
        )));
    }
}
