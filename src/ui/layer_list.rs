use crate::core::viewer::Viewer;
use egui::Ui;

/// One checkbox per layer, topmost drawn layer first.
///
/// Toggling a box changes visibility for the next frame. Returns true when a
/// layer was toggled.
pub fn layer_list(ui: &mut Ui, viewer: &mut Viewer) -> bool {
    let Some(map) = viewer.map() else {
        ui.weak(viewer.map_state().label());
        return false;
    };

    let entries: Vec<(String, String, bool)> = map
        .layers()
        .list_order()
        .map(|layer| (layer.id.clone(), layer.label().to_string(), layer.visible))
        .collect();

    let mut toggled = false;
    for (id, label, mut visible) in entries {
        if ui.checkbox(&mut visible, label).changed() {
            match viewer.set_layer_visible(&id, visible) {
                Ok(changed) => toggled |= changed,
                Err(e) => log::warn!("could not toggle layer '{id}': {e}"),
            }
        }
    }
    toggled
}
