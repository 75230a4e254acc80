use std::fmt;
use std::path::{Path, PathBuf};

/// Remote location the generated URLs point at
pub const DEFAULT_REMOTE_BASE: &str = "https://raw.githubusercontent.com/Jacker910/VideoExamples/main";

const HLS_DIR: &str = "HLS";
const HLS_EXTENSION: &str = "m3u8";
const VIDEO_DIR: &str = "Video";
const VIDEO_EXTENSION: &str = "mp4";
const PREVIEW_DIR: &str = "PreviewPictures";
const PREVIEW_EXTENSION: &str = "jpg";

/// One of the two scanned folders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDir {
    /// Directory on disk
    pub dir: PathBuf,
    /// Required extension, no leading dot, compared case-sensitively
    pub extension: String,
    /// Folder name used in generated URLs
    pub url_folder: String,
}

impl SourceDir {
    pub fn new(root: &Path, folder: &str, extension: &str) -> Self {
        SourceDir {
            dir: root.join(folder),
            extension: extension.to_string(),
            url_folder: folder.to_string(),
        }
    }
}

/// Shape of the manifest entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// `{ "videoUrl": ..., "previewImageUrl": ... }` objects
    Posts { remote_base: String },
    /// Flat array of base names
    Names,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Variant {
    /// HLS playlists paired with previews, written as URL pairs
    #[default]
    Hls,
    /// MP4 videos paired with previews, written as a list of names
    Files,
    /// MP4 videos paired with previews, written as URL pairs
    Posts,
}

impl Variant {
    pub fn output_file_name(self) -> &'static str {
        match self {
            Variant::Hls => "postsHLS.json",
            Variant::Files => "filesList.json",
            Variant::Posts => "posts.json",
        }
    }

    /// Built-in configuration of this variant rooted at `root`
    pub fn config(self, root: &Path) -> ManifestConfig {
        let videos = match self {
            Variant::Hls => SourceDir::new(root, HLS_DIR, HLS_EXTENSION),
            Variant::Files | Variant::Posts => SourceDir::new(root, VIDEO_DIR, VIDEO_EXTENSION),
        };
        let layout = match self {
            Variant::Files => Layout::Names,
            Variant::Hls | Variant::Posts => Layout::Posts {
                remote_base: DEFAULT_REMOTE_BASE.to_string(),
            },
        };

        ManifestConfig {
            videos,
            previews: SourceDir::new(root, PREVIEW_DIR, PREVIEW_EXTENSION),
            layout,
            output_dir: root.to_path_buf(),
            output_file_name: self.output_file_name().to_string(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::Hls => "hls",
            Variant::Files => "files",
            Variant::Posts => "posts",
        };
        f.write_str(name)
    }
}

/// Everything a single run needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestConfig {
    pub videos: SourceDir,
    pub previews: SourceDir,
    pub layout: Layout,
    pub output_dir: PathBuf,
    pub output_file_name: String,
}

impl ManifestConfig {
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file_name)
    }

    /// Replace the remote base. No-op for the names layout.
    pub fn with_remote_base(mut self, base: impl Into<String>) -> Self {
        if let Layout::Posts { remote_base } = &mut self.layout {
            *remote_base = base.into();
        }
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}
