use std::collections::BTreeSet;
use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Set of base names (file names with the extension stripped)
pub type NameSet = BTreeSet<String>;

pub type ManifestResult<T> = Result<T, ManifestError>;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read directory {}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error(transparent)]
    Mismatch(#[from] SetMismatch),

    #[error("Invalid remote base URL {base:?}")]
    InvalidRemoteBase {
        base: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Remote base URL {base:?} cannot carry path segments")]
    RemoteBaseCannotBeABase { base: String },

    #[error("Failed to serialize manifest")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write manifest to {}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Discrepancy between the video and preview name sets.
///
/// Each variant carries the names the operator has to add by hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetMismatch {
    /// Videos without a preview image
    #[error("В папке отсутствуют превью изображения {}", Names(.0))]
    MissingPreviews(NameSet),

    /// Preview images without a video
    #[error("Нужны видео {}", Names(.0))]
    MissingVideos(NameSet),

    #[error("Нужны превью изображения {} и видео {}", Names(.previews), Names(.videos))]
    MissingBoth {
        /// Names that need a video file
        videos: NameSet,
        /// Names that need a preview image
        previews: NameSet,
    },
}

/// Renders a name set as `["a", "b"]`
struct Names<'a>(&'a NameSet);

impl fmt::Display for Names<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}", name)?;
        }
        f.write_str("]")
    }
}
