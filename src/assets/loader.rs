use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use crate::assets::decode::{DEFAULT_MAX_DECODED_PIXELS, LoadedImage, decode_image};
use crate::assets::source::{ImageSource, ResolvedUri, classify_uri};
use crate::foundation::error::{ChromaError, ChromaResult};

/// Boxed future used at object-safe seams.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Asynchronous, single-shot image decoding.
///
/// Each call resolves exactly once, to a decoded image or a [`ChromaError::Decode`]. Loads are
/// never retried or cached, and callers must not assume completion order across calls.
pub trait ImageLoader {
    /// Resolve and decode `source`.
    fn load(&self, source: &ImageSource) -> impl Future<Output = ChromaResult<LoadedImage>>;
}

impl<L: ImageLoader + ?Sized> ImageLoader for &L {
    fn load(&self, source: &ImageSource) -> impl Future<Output = ChromaResult<LoadedImage>> {
        (**self).load(source)
    }
}

/// Response body of a remote fetch.
#[derive(Clone, Debug)]
pub struct Fetched {
    pub bytes: Vec<u8>,
    /// Whether the remote origin granted cross-origin read access.
    pub cors_approved: bool,
}

/// Optional network capability; without one, remote sources fail to load.
pub trait Fetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ChromaResult<Fetched>>;
}

/// Options for [`SourceLoader`].
#[derive(Clone, Debug)]
pub struct LoaderOpts {
    /// Base directory for relative filesystem paths.
    pub assets_root: PathBuf,
    /// Decoded images above this pixel count fail to load.
    pub max_decoded_pixels: u64,
}

impl Default for LoaderOpts {
    fn default() -> Self {
        Self {
            assets_root: PathBuf::from("."),
            max_decoded_pixels: DEFAULT_MAX_DECODED_PIXELS,
        }
    }
}

impl LoaderOpts {
    /// Defaults, with `CHROMAFILL_MAX_IMAGE_PIXELS` applied when set to a positive integer.
    pub fn from_env() -> Self {
        let mut opts = Self::default();
        if let Some(n) = std::env::var("CHROMAFILL_MAX_IMAGE_PIXELS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&n| n > 0)
        {
            opts.max_decoded_pixels = n;
        }
        opts
    }

    pub fn with_assets_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.assets_root = root.into();
        self
    }

    pub fn with_max_decoded_pixels(mut self, max: u64) -> Self {
        self.max_decoded_pixels = max;
        self
    }
}

/// Default loader: in-memory bytes, `data:` URIs, local files, and remote URLs through an
/// injected [`Fetcher`].
#[derive(Clone, Default)]
pub struct SourceLoader {
    opts: LoaderOpts,
    fetcher: Option<Arc<dyn Fetcher>>,
}

impl SourceLoader {
    pub fn new(opts: LoaderOpts) -> Self {
        Self {
            opts,
            fetcher: None,
        }
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn opts(&self) -> &LoaderOpts {
        &self.opts
    }

    fn resolve_path(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.opts.assets_root.join(p)
        }
    }

    fn decode(&self, bytes: &[u8]) -> ChromaResult<LoadedImage> {
        decode_image(bytes, self.opts.max_decoded_pixels)
    }
}

impl ImageLoader for SourceLoader {
    async fn load(&self, source: &ImageSource) -> ChromaResult<LoadedImage> {
        let uri = match source {
            ImageSource::Bytes(b) => return self.decode(b),
            ImageSource::Uri(u) => u,
        };

        match classify_uri(uri)? {
            ResolvedUri::Data { mime, payload } => {
                if !mime.starts_with("image/") {
                    tracing::debug!(%mime, "data uri is not image/*, sniffing content");
                }
                self.decode(&payload)
            }
            ResolvedUri::File(p) => {
                let path = self.resolve_path(&p);
                let bytes = std::fs::read(&path).map_err(|e| {
                    ChromaError::decode(format!("failed to read '{}': {e}", path.display()))
                })?;
                self.decode(&bytes)
            }
            ResolvedUri::Remote(url) => {
                let fetcher = self.fetcher.as_ref().ok_or_else(|| {
                    ChromaError::decode(format!("no fetcher configured for remote source {url}"))
                })?;
                let fetched = fetcher.fetch(&url).await?;
                let img = self.decode(&fetched.bytes)?;
                Ok(if fetched.cors_approved {
                    img
                } else {
                    img.tainted()
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
