use crate::{
    core::{bounds::Bounds, constants::DEFAULT_LAYER_ID, geo::Point},
    data::{decode::decode_base64_image, document::MapDocument},
    layers::{ImageStore, Layer, LayerManager, MapObject, Sprite},
    prelude::{HashMap, HashSet},
    Result,
};

/// A fully decoded map: layers, objects and the bitmaps they draw
#[derive(Debug, Default)]
pub struct SpriteMap {
    /// Declared extent, or the union of all sprites when none was declared
    extent: Bounds,
    layers: LayerManager,
    /// Objects in document order
    objects: Vec<MapObject>,
    /// Object indices per layer id, in document order
    by_layer: HashMap<String, Vec<usize>>,
    images: ImageStore,
}

impl SpriteMap {
    pub fn new(extent: Bounds) -> Self {
        Self {
            extent,
            ..Self::default()
        }
    }

    /// Parses and decodes a JSON map document
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Self::from_document(MapDocument::from_slice(bytes)?)
    }

    /// Builds the map model, decoding every base64 image.
    ///
    /// Missing or undecodable visuals are logged and skipped; objects naming
    /// an unknown layer are kept but never drawn. Objects without a layer go
    /// to the default layer, which is appended on top when not declared.
    pub fn from_document(document: MapDocument) -> Result<Self> {
        let mut map = SpriteMap::default();

        if document.layers.is_empty() {
            map.add_layer(Layer::new(DEFAULT_LAYER_ID, "Default"))?;
        }
        for layer in document.layers {
            if map.layers.contains(&layer.id) {
                log::warn!("skipping duplicate layer '{}'", layer.id);
                continue;
            }
            map.add_layer(layer)?;
        }

        let mut unknown_layers = HashSet::default();
        for (index, record) in document.objects.iter().enumerate() {
            let layer = match &record.layer {
                Some(layer) => layer.clone(),
                None => {
                    if !map.layers.contains(DEFAULT_LAYER_ID) {
                        map.add_layer(Layer::new(DEFAULT_LAYER_ID, "Default"))?;
                    }
                    DEFAULT_LAYER_ID.to_string()
                }
            };
            if !map.layers.contains(&layer) && unknown_layers.insert(layer.clone()) {
                log::warn!("object {index} references unknown layer '{layer}'");
            }

            let mut object = MapObject::new(layer);
            object.image = map.place_visual(index, "image", record.image.as_deref(), record.pos);
            object.shade = map.place_visual(
                index,
                "shade",
                record.shade.as_deref(),
                record.shade_position(),
            );
            map.add_object(object);
        }

        map.extent = match &document.dimensions {
            Some(dimensions) => dimensions.bounds(),
            None => map.content_bounds(),
        };

        log::debug!(
            "decoded map: {} layers, {} objects, {} images",
            map.layers.len(),
            map.objects.len(),
            map.images.len()
        );
        Ok(map)
    }

    fn place_visual(
        &mut self,
        index: usize,
        kind: &str,
        encoded: Option<&str>,
        position: Option<Point>,
    ) -> Option<Sprite> {
        let encoded = encoded?;
        let Some(position) = position else {
            log::debug!("object {index} has a {kind} but no position");
            return None;
        };
        match decode_base64_image(encoded) {
            Ok(decoded) => Some(Sprite::new(self.images.insert(decoded), position)),
            Err(e) => {
                log::warn!("object {index}: dropping undecodable {kind}: {e}");
                None
            }
        }
    }

    pub fn add_layer(&mut self, layer: Layer) -> Result<()> {
        self.by_layer.entry(layer.id.clone()).or_default();
        self.layers.add_layer(layer)
    }

    pub fn add_object(&mut self, object: MapObject) {
        self.by_layer
            .entry(object.layer.clone())
            .or_default()
            .push(self.objects.len());
        self.objects.push(object);
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerManager {
        &mut self.layers
    }

    /// All objects in document order
    pub fn objects(&self) -> &[MapObject] {
        &self.objects
    }

    /// Objects on one layer, in document order
    pub fn objects_on<'a>(&'a self, layer_id: &str) -> impl Iterator<Item = &'a MapObject> + 'a {
        self.by_layer
            .get(layer_id)
            .into_iter()
            .flatten()
            .map(move |&i| &self.objects[i])
    }

    pub fn extent(&self) -> &Bounds {
        &self.extent
    }

    /// Union of every object's visuals, or an empty extent at the origin
    pub fn content_bounds(&self) -> Bounds {
        let bounds = self
            .objects
            .iter()
            .filter_map(MapObject::bounds)
            .fold(Bounds::empty(), |acc, b| acc.extend_with(&b));
        if bounds.is_valid() {
            bounds
        } else {
            Bounds::new(Point::ZERO, Point::ZERO)
        }
    }
}

/// Load state of the map a viewer shows
#[derive(Debug, Default)]
pub enum MapState {
    /// Nothing requested yet
    #[default]
    Absent,
    /// A load is in flight; frames draw an empty scene meanwhile
    Loading,
    Ready(Box<SpriteMap>),
    /// The last load failed; frames draw an empty scene
    Failed(String),
}

impl MapState {
    pub fn map(&self) -> Option<&SpriteMap> {
        match self {
            MapState::Ready(map) => Some(map.as_ref()),
            _ => None,
        }
    }

    pub fn map_mut(&mut self) -> Option<&mut SpriteMap> {
        match self {
            MapState::Ready(map) => Some(map.as_mut()),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, MapState::Ready(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, MapState::Loading)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MapState::Absent => "absent",
            MapState::Loading => "loading",
            MapState::Ready(_) => "ready",
            MapState::Failed(_) => "failed",
        }
    }
}
