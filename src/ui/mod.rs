//! egui front-end: the map panel, the layer list and sprite textures

pub mod layer_list;
pub mod textures;
pub mod widget;

pub use layer_list::layer_list;
pub use textures::TextureCache;
pub use widget::MapView;

use crate::core::viewer::Viewer;

pub trait UiViewerExt {
    /// Shows `viewer` through `view`, filling the available space
    fn sprite_map(&mut self, view: &mut MapView, viewer: &mut Viewer) -> egui::Response;

    /// Layer visibility checkboxes; true when a layer was toggled
    fn layer_list(&mut self, viewer: &mut Viewer) -> bool;
}

impl UiViewerExt for egui::Ui {
    fn sprite_map(&mut self, view: &mut MapView, viewer: &mut Viewer) -> egui::Response {
        view.show(self, viewer)
    }

    fn layer_list(&mut self, viewer: &mut Viewer) -> bool {
        layer_list::layer_list(self, viewer)
    }
}
