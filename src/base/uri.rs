//! Document identity and file type detection.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use url::Url;

/// Stable identity of an open document.
///
/// Backed by a parsed [`Url`], so equivalent spellings (scheme case,
/// `localhost` authority, dot segments) compare equal. Strings that are not
/// absolute URIs are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentUri(Repr);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Repr {
    Url(Arc<Url>),
    Opaque(Arc<str>),
}

impl DocumentUri {
    pub fn new(uri: &str) -> Self {
        match Url::parse(uri) {
            Ok(url) => Self::from_url(url),
            Err(_) => Self(Repr::Opaque(Arc::from(uri))),
        }
    }

    pub fn from_url(url: Url) -> Self {
        Self(Repr::Url(Arc::new(url)))
    }

    /// Returns `None` if the path cannot be converted to a URL.
    pub fn from_file_path(path: impl AsRef<Path>) -> Option<Self> {
        Url::from_file_path(path).ok().map(Self::from_url)
    }

    pub fn as_str(&self) -> &str {
        match &self.0 {
            Repr::Url(url) => url.as_str(),
            Repr::Opaque(raw) => raw,
        }
    }

    pub fn as_url(&self) -> Option<&Url> {
        match &self.0 {
            Repr::Url(url) => Some(url),
            Repr::Opaque(_) => None,
        }
    }

    /// Local file path of a `file:` URI
    pub fn to_file_path(&self) -> Option<PathBuf> {
        self.as_url()?.to_file_path().ok()
    }

    /// Path component, percent-encoded, without query and fragment.
    /// Opaque strings are returned whole.
    pub fn path(&self) -> &str {
        match &self.0 {
            Repr::Url(url) => url.path(),
            Repr::Opaque(raw) => raw,
        }
    }
}

impl fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for DocumentUri {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DocumentUri {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<Url> for DocumentUri {
    fn from(value: Url) -> Self {
        Self::from_url(value)
    }
}

/// Kind of source file, derived from the path extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileType {
    /// 1C:Enterprise module (`.bsl`)
    #[default]
    Bsl,
    /// OneScript module (`.os`)
    Os,
}

impl FileType {
    /// Detect from a URI. Unknown or missing extensions fall back to `Bsl`.
    pub fn from_uri(uri: &DocumentUri) -> Self {
        let extension = Path::new(uri.path())
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("os") => FileType::Os,
            _ => FileType::Bsl,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Bsl => "bsl",
            FileType::Os => "os",
        }
    }
}
