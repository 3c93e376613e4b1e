//! Where map documents come from
//!
//! [`source_for`] picks HTTP for `http://` and `https://` locations and the
//! local filesystem for everything else.

use crate::Result;
use async_trait::async_trait;

/// `Send + Sync` on native targets, nothing on wasm where futures stay local
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSync: Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + Sync> MaybeSync for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSync {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSync for T {}

/// Supplies the raw bytes of a map document
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait MapSource: MaybeSync {
    /// Human-readable location, for logs
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Vec<u8>>;
}

/// Picks a source for a path or URL
pub fn source_for(location: &str) -> Box<dyn MapSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        return Box::new(HttpSource::new(location));
    }

    #[cfg(all(feature = "tokio-runtime", not(target_arch = "wasm32")))]
    {
        Box::new(FileSource::new(location))
    }
    #[cfg(not(all(feature = "tokio-runtime", not(target_arch = "wasm32"))))]
    {
        Box::new(HttpSource::new(location))
    }
}

#[cfg(not(target_arch = "wasm32"))]
static HTTP_CLIENT: once_cell::sync::Lazy<reqwest::Client> = once_cell::sync::Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("spritemap/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
});

#[cfg(not(target_arch = "wasm32"))]
fn http_client() -> reqwest::Client {
    HTTP_CLIENT.clone()
}

#[cfg(target_arch = "wasm32")]
fn http_client() -> reqwest::Client {
    reqwest::Client::new()
}

/// Fetches the document with a GET request
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: http_client(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl MapSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Reads the document from the local filesystem
#[cfg(all(feature = "tokio-runtime", not(target_arch = "wasm32")))]
#[derive(Debug, Clone)]
pub struct FileSource {
    path: std::path::PathBuf,
}

#[cfg(all(feature = "tokio-runtime", not(target_arch = "wasm32")))]
impl FileSource {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(all(feature = "tokio-runtime", not(target_arch = "wasm32")))]
#[async_trait]
impl MapSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(&self.path).await?)
    }
}

/// A document already in memory, e.g. embedded with `include_bytes!`
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl MapSource for MemorySource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}
