use crate::{
    core::{config::InteractionConfig, geo::Size, viewport::ViewTransform},
    input::events::{EventHandled, InputEvent},
};

/// Applies input events to the view transform and the surface size
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    options: InteractionConfig,
}

impl InputHandler {
    pub fn new(options: InteractionConfig) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &InteractionConfig {
        &self.options
    }

    pub fn handle(
        &self,
        event: &InputEvent,
        view: &mut ViewTransform,
        surface: &mut Size,
    ) -> EventHandled {
        match event {
            InputEvent::Wheel { delta, position } => {
                if self.options.scroll_wheel_zoom && view.zoom_at(*delta, position) {
                    log::trace!(
                        "zoom step {delta:+} -> scale {:.3} (scroll {})",
                        view.scale(),
                        view.scroll_accumulator()
                    );
                    EventHandled::Handled
                } else {
                    EventHandled::NotHandled
                }
            }
            InputEvent::PointerMove { delta, buttons, .. } => {
                let moved = delta.x != 0.0 || delta.y != 0.0;
                if self.options.dragging && buttons.primary && moved {
                    view.pan(delta);
                    EventHandled::Handled
                } else {
                    EventHandled::NotHandled
                }
            }
            InputEvent::Resize { size } => {
                if *size == *surface {
                    return EventHandled::NotHandled;
                }
                log::debug!("surface resized to {}x{}", size.width, size.height);
                *surface = *size;
                EventHandled::Handled
            }
        }
    }
}
