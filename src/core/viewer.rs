use crate::{
    core::{
        config::{RedrawPolicy, ViewerConfig},
        geo::Size,
        map::{MapState, SpriteMap},
        viewport::ViewTransform,
    },
    data::loader::PendingLoad,
    input::{EventHandled, InputEvent, InputHandler},
    rendering::{render_frame, Canvas, FrameClock, FrameStats, RenderOptions},
    MapError, Result,
};

/// Owns everything one map view needs between frames: the map's load state,
/// the view transform, the surface size and the frame clock.
///
/// Front-ends feed it [`InputEvent`]s, poll it once per frame and hand it a
/// [`Canvas`] to draw on.
#[derive(Debug)]
pub struct Viewer {
    view: ViewTransform,
    state: MapState,
    config: ViewerConfig,
    options: RenderOptions,
    surface: Size,
    input: InputHandler,
    frames: FrameClock,
    pending: Option<PendingLoad>,
    /// Bumped whenever a new map replaces the old one
    generation: u64,
    /// Set when a map arrived before the surface had a usable size
    fit_pending: bool,
    dirty: bool,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            view: ViewTransform::new(),
            state: MapState::Absent,
            options: RenderOptions::from(&config),
            input: InputHandler::new(config.interaction.clone()),
            config,
            surface: Size::ZERO,
            frames: FrameClock::new(),
            pending: None,
            generation: 0,
            fit_pending: false,
            dirty: true,
        }
    }

    /// Starts showing the empty scene until `pending` completes.
    ///
    /// A load already in flight is abandoned.
    pub fn begin_load(&mut self, pending: PendingLoad) {
        if let Some(previous) = self.pending.replace(pending) {
            log::debug!("abandoning load from {}", previous.description());
        }
        self.state = MapState::Loading;
        self.dirty = true;
    }

    /// Loads the configured map source on `runtime`
    #[cfg(all(feature = "tokio-runtime", not(target_arch = "wasm32")))]
    pub fn request_load(&mut self, runtime: &tokio::runtime::Handle) {
        let source = crate::data::source::source_for(&self.config.map_source);
        self.begin_load(crate::data::loader::MapLoader::spawn(source, runtime));
    }

    /// Picks up a finished background load. Returns true when the state changed.
    pub fn poll_load(&mut self) -> bool {
        let Some(outcome) = self.pending.as_ref().and_then(PendingLoad::try_take) else {
            return false;
        };
        self.pending = None;
        self.finish_load(outcome);
        true
    }

    /// Installs a load result: a map becomes the scene, an error leaves it empty
    pub fn finish_load(&mut self, outcome: Result<SpriteMap>) {
        match outcome {
            Ok(map) => {
                log::info!(
                    "map ready: {} layers, {} objects",
                    map.layers().len(),
                    map.objects().len()
                );
                self.fit_pending = self.config.fit_on_load;
                self.state = MapState::Ready(Box::new(map));
                self.generation += 1;
                self.apply_pending_fit();
            }
            Err(e) => {
                log::error!("failed to load map: {e}");
                self.state = MapState::Failed(e.to_string());
            }
        }
        self.dirty = true;
    }

    fn apply_pending_fit(&mut self) {
        if !self.fit_pending {
            return;
        }
        let Some(map) = self.state.map() else {
            return;
        };
        if self.view.fit(map.extent(), self.surface) {
            log::debug!(
                "fitted map to {}x{} at scale {:.3}",
                self.surface.width,
                self.surface.height,
                self.view.scale()
            );
            self.fit_pending = false;
        }
    }

    /// Applies one input event to the view
    pub fn handle_input(&mut self, event: &InputEvent) -> EventHandled {
        let handled = self.input.handle(event, &mut self.view, &mut self.surface);
        if handled.is_handled() {
            if matches!(event, InputEvent::Resize { .. }) {
                self.apply_pending_fit();
            }
            self.dirty = true;
        }
        handled
    }

    /// Shows or hides a layer; takes effect on the next frame.
    ///
    /// Returns whether visibility changed.
    pub fn set_layer_visible(&mut self, layer_id: &str, visible: bool) -> Result<bool> {
        let map = self
            .state
            .map_mut()
            .ok_or_else(|| MapError::Layer(format!("no map loaded for layer '{layer_id}'")))?;
        let changed = map.layers_mut().set_visible(layer_id, visible)?;
        if changed {
            log::debug!("layer '{layer_id}' visible: {visible}");
            self.dirty = true;
        }
        Ok(changed)
    }

    /// Zooms and centers the loaded map to the current surface
    pub fn fit_to_view(&mut self) -> bool {
        let fitted = match self.state.map() {
            Some(map) => self.view.fit(map.extent(), self.surface),
            None => false,
        };
        self.dirty |= fitted;
        fitted
    }

    /// Draws one frame onto `canvas`
    pub fn render(&mut self, canvas: &mut dyn Canvas) -> Result<FrameStats> {
        self.frames.tick();
        let stats = render_frame(
            canvas,
            &self.view,
            &self.state,
            &self.options,
            self.frames.fps(),
        )?;
        self.dirty = false;
        Ok(stats)
    }

    /// Whether the front-end should schedule another frame
    pub fn needs_redraw(&self) -> bool {
        match self.config.redraw {
            RedrawPolicy::Continuous => true,
            RedrawPolicy::OnChange => self.dirty || self.pending.is_some(),
        }
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn map_state(&self) -> &MapState {
        &self.state
    }

    pub fn map(&self) -> Option<&SpriteMap> {
        self.state.map()
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn surface(&self) -> Size {
        self.surface
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Changes whenever a different map is installed; caches keyed on image
    /// ids must be dropped when it does
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn frame_count(&self) -> u64 {
        self.frames.frame_count()
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{bounds::Bounds, geo::Point},
        layers::Layer,
        rendering::RenderContext,
    };

    fn two_layer_map() -> SpriteMap {
        let mut map = SpriteMap::new(Bounds::from_coords(0.0, 0.0, 200.0, 100.0));
        map.add_layer(Layer::new("ground", "Ground")).unwrap();
        map.add_layer(Layer::new("roofs", "Roofs")).unwrap();
        map
    }

    fn resize(viewer: &mut Viewer, width: f64, height: f64) {
        viewer.handle_input(&InputEvent::Resize {
            size: Size::new(width, height),
        });
    }

    #[test]
    fn test_load_fits_to_surface() {
        let mut viewer = Viewer::default();
        resize(&mut viewer, 400.0, 200.0);
        viewer.finish_load(Ok(two_layer_map()));

        assert!(viewer.map_state().is_ready());
        assert_eq!(viewer.generation(), 1);
        assert_eq!(viewer.view().scroll_accumulator(), 5.0);
        let center = viewer.view().screen_to_world(&Point::new(200.0, 100.0));
        assert!((center.x - 100.0).abs() < 1e-9);
        assert!((center.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_waits_for_surface() {
        let mut viewer = Viewer::default();
        viewer.finish_load(Ok(two_layer_map()));
        assert_eq!(viewer.view(), &ViewTransform::new());

        resize(&mut viewer, 400.0, 200.0);
        assert_eq!(viewer.view().scroll_accumulator(), 5.0);

        // later resizes leave the user's view alone
        resize(&mut viewer, 800.0, 400.0);
        assert_eq!(viewer.view().scroll_accumulator(), 5.0);
    }

    #[test]
    fn test_failed_load_draws_empty_scene() {
        let mut viewer = Viewer::default();
        resize(&mut viewer, 100.0, 100.0);
        viewer.finish_load(Err(MapError::Load("gone".to_string())));

        assert!(matches!(viewer.map_state(), MapState::Failed(_)));
        let mut ctx = RenderContext::new(viewer.surface());
        let stats = viewer.render(&mut ctx).unwrap();
        assert_eq!(stats, FrameStats::default());
    }

    #[test]
    fn test_poll_load_installs_result_once() {
        let mut viewer = Viewer::default();
        let (sender, pending) = PendingLoad::channel("test");
        viewer.begin_load(pending);
        assert!(viewer.map_state().is_loading());
        assert!(!viewer.poll_load());

        sender.send(Ok(two_layer_map())).unwrap();
        assert!(viewer.poll_load());
        assert!(viewer.map_state().is_ready());
        assert!(!viewer.is_loading());
        assert!(!viewer.poll_load());
    }

    #[test]
    fn test_layer_visibility_requires_map() {
        let mut viewer = Viewer::default();
        assert!(viewer.set_layer_visible("ground", false).is_err());

        viewer.finish_load(Ok(two_layer_map()));
        assert!(viewer.set_layer_visible("ground", false).unwrap());
        assert!(!viewer.set_layer_visible("ground", false).unwrap());
        assert!(viewer.set_layer_visible("nowhere", true).is_err());
        assert!(!viewer.map().unwrap().layers().is_visible("ground"));
    }

    #[test]
    fn test_on_change_redraw_policy() {
        let config = ViewerConfig {
            redraw: RedrawPolicy::OnChange,
            ..ViewerConfig::default()
        };
        let mut viewer = Viewer::new(config);
        let mut ctx = RenderContext::new(Size::new(10.0, 10.0));
        assert!(viewer.needs_redraw());

        viewer.render(&mut ctx).unwrap();
        assert!(!viewer.needs_redraw());

        viewer.handle_input(&InputEvent::Wheel {
            delta: 1.0,
            position: Point::ZERO,
        });
        assert!(viewer.needs_redraw());
        assert_eq!(viewer.frame_count(), 1);
    }

    #[test]
    fn test_continuous_policy_always_redraws() {
        let mut viewer = Viewer::default();
        let mut ctx = RenderContext::new(Size::new(10.0, 10.0));
        viewer.render(&mut ctx).unwrap();
        assert!(viewer.needs_redraw());
    }
}
