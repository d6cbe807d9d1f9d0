use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use data_url::DataUrl;
use percent_encoding::{NON_ALPHANUMERIC, percent_encode};
use url::Url;

use crate::foundation::error::{ChromaError, ChromaResult};

/// Where an image comes from: bytes already in memory, or a URI to resolve.
#[derive(Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Encoded image bytes (PNG, JPEG, ...), e.g. a file the caller already read.
    Bytes(Arc<[u8]>),
    /// `data:` URI, `file://` URI, filesystem path, or `http(s)://` URL.
    Uri(String),
}

impl ImageSource {
    pub fn uri(s: impl Into<String>) -> Self {
        Self::Uri(s.into())
    }

    pub fn bytes(b: impl Into<Arc<[u8]>>) -> Self {
        Self::Bytes(b.into())
    }

    /// Encode `bytes` as a percent-encoded `data:` URI with the given MIME type.
    pub fn data_uri(mime: &str, bytes: &[u8]) -> Self {
        Self::Uri(format!(
            "data:{mime},{}",
            percent_encode(bytes, NON_ALPHANUMERIC)
        ))
    }

    /// Short description for logs; never includes payloads.
    pub fn describe(&self) -> String {
        match self {
            Self::Bytes(b) => format!("bytes[{}]", b.len()),
            Self::Uri(u) => match classify_uri(u) {
                Ok(ResolvedUri::Data { mime, payload }) => {
                    format!("data:{mime} ({} bytes)", payload.len())
                }
                Ok(ResolvedUri::File(p)) => format!("file {}", p.display()),
                Ok(ResolvedUri::Remote(url)) => format!("remote {url}"),
                Err(_) => "malformed uri".to_owned(),
            },
        }
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageSource({})", self.describe())
    }
}

impl From<&str> for ImageSource {
    fn from(s: &str) -> Self {
        Self::Uri(s.to_owned())
    }
}

impl From<String> for ImageSource {
    fn from(s: String) -> Self {
        Self::Uri(s)
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b.into())
    }
}

impl serde::Serialize for ImageSource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Uri(u) => serializer.serialize_str(u),
            Self::Bytes(b) => serializer.collect_str(&format_args!(
                "data:application/octet-stream,{}",
                percent_encode(b, NON_ALPHANUMERIC)
            )),
        }
    }
}

impl<'de> serde::Deserialize<'de> for ImageSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.trim().is_empty() {
            return Err(serde::de::Error::custom("image source must not be empty"));
        }
        Ok(Self::Uri(s))
    }
}

/// A URI after scheme dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ResolvedUri {
    Data { mime: String, payload: Vec<u8> },
    File(PathBuf),
    Remote(String),
}

pub(crate) fn classify_uri(uri: &str) -> ChromaResult<ResolvedUri> {
    let uri = uri.trim();
    if uri.is_empty() {
        return Err(ChromaError::decode("empty image uri"));
    }

    let parsed = match Url::parse(uri) {
        Ok(parsed) => parsed,
        // Relative references and plain filesystem paths.
        Err(_) => return Ok(ResolvedUri::File(PathBuf::from(uri))),
    };
    match parsed.scheme() {
        "data" => {
            let data = DataUrl::process(uri)
                .map_err(|e| ChromaError::decode(format!("malformed data uri: {e:?}")))?;
            let mime = data.mime_type();
            let mime = format!("{}/{}", mime.type_, mime.subtype);
            let (payload, _) = data
                .decode_to_vec()
                .map_err(|e| ChromaError::decode(format!("invalid base64 in data uri: {e:?}")))?;
            Ok(ResolvedUri::Data { mime, payload })
        }
        "file" => parsed
            .to_file_path()
            .map(ResolvedUri::File)
            .map_err(|()| ChromaError::decode(format!("file uri '{uri}' is not a local path"))),
        "http" | "https" => Ok(ResolvedUri::Remote(parsed.into())),
        // Windows drive letters parse as one-letter schemes.
        scheme if scheme.len() == 1 => Ok(ResolvedUri::File(PathBuf::from(uri))),
        scheme => Err(ChromaError::decode(format!(
            "unsupported uri scheme '{scheme}'"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
