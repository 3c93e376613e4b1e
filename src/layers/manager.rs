use crate::{layers::base::Layer, prelude::HashMap, MapError, Result};

/// Ordered layer list with lookup by id.
///
/// Document order is the draw order. The layer panel walks the list in
/// reverse so that the top-most layer is listed first.
#[derive(Debug, Default)]
pub struct LayerManager {
    /// Layers in draw order
    layers: Vec<Layer>,
    /// Position of each layer id in `layers`
    index: HashMap<String, usize>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer on top of the existing ones
    pub fn add_layer(&mut self, layer: Layer) -> Result<()> {
        if self.index.contains_key(&layer.id) {
            return Err(MapError::Layer(format!("duplicate layer id '{}'", layer.id)));
        }
        self.index.insert(layer.id.clone(), self.layers.len());
        self.layers.push(layer);
        Ok(())
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&Layer> {
        self.index.get(layer_id).map(|&i| &self.layers[i])
    }

    pub fn contains(&self, layer_id: &str) -> bool {
        self.index.contains_key(layer_id)
    }

    /// Unknown ids count as hidden
    pub fn is_visible(&self, layer_id: &str) -> bool {
        self.get_layer(layer_id).map_or(false, Layer::is_visible)
    }

    /// Sets a layer's visibility, returning whether the flag changed
    pub fn set_visible(&mut self, layer_id: &str, visible: bool) -> Result<bool> {
        let &i = self
            .index
            .get(layer_id)
            .ok_or_else(|| MapError::Layer(format!("unknown layer '{layer_id}'")))?;
        let layer = &mut self.layers[i];
        let changed = layer.visible != visible;
        layer.set_visible(visible);
        Ok(changed)
    }

    /// All layers in draw order
    pub fn layers(&self) -> impl DoubleEndedIterator<Item = &Layer> + ExactSizeIterator {
        self.layers.iter()
    }

    /// Layers in the order the visibility list shows them (top-most first)
    pub fn list_order(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().rev()
    }

    pub fn visible_count(&self) -> usize {
        self.layers.iter().filter(|l| l.visible).count()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> LayerManager {
        let mut manager = LayerManager::new();
        manager.add_layer(Layer::new("ground", "Ground")).unwrap();
        manager.add_layer(Layer::new("walls", "Walls")).unwrap();
        manager
            .add_layer(Layer::new("roofs", "Roofs").with_visibility(false))
            .unwrap();
        manager
    }

    #[test]
    fn test_document_and_list_order() {
        let manager = manager();
        let drawn: Vec<_> = manager.layers().map(|l| l.id.as_str()).collect();
        let listed: Vec<_> = manager.list_order().map(|l| l.id.as_str()).collect();

        assert_eq!(drawn, ["ground", "walls", "roofs"]);
        assert_eq!(listed, ["roofs", "walls", "ground"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut manager = manager();
        assert!(matches!(
            manager.add_layer(Layer::new("walls", "Again")),
            Err(MapError::Layer(_))
        ));
        assert_eq!(manager.len(), 3);
    }

    #[test]
    fn test_visibility_changes() {
        let mut manager = manager();
        assert_eq!(manager.visible_count(), 2);

        assert!(manager.set_visible("roofs", true).unwrap());
        assert!(!manager.set_visible("roofs", true).unwrap());
        assert!(manager.set_visible("walls", false).unwrap());
        assert!(!manager.is_visible("walls"));
        assert_eq!(manager.visible_count(), 2);

        assert!(manager.set_visible("missing", true).is_err());
        assert!(!manager.is_visible("missing"));
    }
}
