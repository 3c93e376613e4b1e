use crate::{
    core::map::SpriteMap,
    data::{document::MapDocument, source::MapSource},
    MapError, Result,
};
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};

/// Fetches, parses and decodes a map on the current task
pub async fn load_map(source: &dyn MapSource) -> Result<SpriteMap> {
    let bytes = source.fetch().await?;
    log::debug!("fetched {} bytes from {}", bytes.len(), source.describe());
    SpriteMap::from_document(MapDocument::from_slice(&bytes)?)
}

/// A load running in the background; polled once per frame
#[derive(Debug)]
pub struct PendingLoad {
    description: String,
    receiver: Receiver<Result<SpriteMap>>,
}

impl PendingLoad {
    /// Creates a pending load and the sender that completes it
    pub fn channel(description: impl Into<String>) -> (Sender<Result<SpriteMap>>, PendingLoad) {
        let (sender, receiver) = bounded(1);
        (
            sender,
            PendingLoad {
                description: description.into(),
                receiver,
            },
        )
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the outcome once the load has finished.
    ///
    /// A loader that went away without reporting counts as a failure.
    pub fn try_take(&self) -> Option<Result<SpriteMap>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(MapError::Load(format!(
                "loader for {} stopped without a result",
                self.description
            )))),
        }
    }
}

/// Starts map loads off the UI thread
pub struct MapLoader;

impl MapLoader {
    /// Runs the load on a tokio runtime; decoding happens on the blocking pool
    #[cfg(all(feature = "tokio-runtime", not(target_arch = "wasm32")))]
    pub fn spawn(source: Box<dyn MapSource>, runtime: &tokio::runtime::Handle) -> PendingLoad {
        let (sender, pending) = PendingLoad::channel(source.describe());
        log::info!("loading map from {}", pending.description());

        runtime.spawn(async move {
            let result = async {
                let bytes = source.fetch().await?;
                log::debug!("fetched {} bytes from {}", bytes.len(), source.describe());
                let document = MapDocument::from_slice(&bytes)?;
                tokio::task::spawn_blocking(move || SpriteMap::from_document(document))
                    .await
                    .map_err(|e| MapError::Load(format!("decode task failed: {e}")))?
            }
            .await;
            let _ = sender.send(result);
        });
        pending
    }

    /// Runs the load as a local future on the browser's event loop
    #[cfg(feature = "wasm")]
    pub fn spawn_local(source: Box<dyn MapSource>) -> PendingLoad {
        let (sender, pending) = PendingLoad::channel(source.describe());
        log::info!("loading map from {}", pending.description());

        wasm_bindgen_futures::spawn_local(async move {
            let result = load_map(source.as_ref()).await;
            let _ = sender.send(result);
        });
        pending
    }
}
