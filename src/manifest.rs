use std::fs::{self, Permissions};
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info};
use url::Url;

use crate::config::{Layout, ManifestConfig, SourceDir};
use crate::error::{ManifestError, ManifestResult, NameSet};

/// A video paired with its preview image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub video_url: String,
    pub preview_image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Manifest {
    Posts(Vec<Post>),
    Names(Vec<String>),
}

impl Manifest {
    pub fn len(&self) -> usize {
        match self {
            Manifest::Posts(posts) => posts.len(),
            Manifest::Names(names) => names.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pretty JSON, fields in declaration order, slashes left unescaped
    pub fn to_json(&self) -> ManifestResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}

enum Entries {
    Posts(Url),
    Names,
}

/// Turns reconciled base names into manifest records
pub struct ManifestBuilder<'a> {
    videos: &'a SourceDir,
    previews: &'a SourceDir,
    entries: Entries,
}

impl<'a> ManifestBuilder<'a> {
    /// Validates the remote base up front so building records cannot fail on it later.
    pub fn new(config: &'a ManifestConfig) -> ManifestResult<Self> {
        let entries = match &config.layout {
            Layout::Posts { remote_base } => Entries::Posts(parse_remote_base(remote_base)?),
            Layout::Names => Entries::Names,
        };

        Ok(ManifestBuilder {
            videos: &config.videos,
            previews: &config.previews,
            entries,
        })
    }

    /// Records for `names` in ascending order.
    ///
    /// `names` must already be reconciled: every name has both a video and a preview.
    pub fn build(&self, names: &NameSet) -> ManifestResult<Manifest> {
        match &self.entries {
            Entries::Names => Ok(Manifest::Names(names.iter().cloned().collect())),
            Entries::Posts(base) => {
                let posts = names
                    .iter()
                    .map(|name| -> ManifestResult<Post> {
                        Ok(Post {
                            video_url: file_url(base, self.videos, name)?,
                            preview_image_url: file_url(base, self.previews, name)?,
                        })
                    })
                    .collect::<ManifestResult<Vec<_>>>()?;
                Ok(Manifest::Posts(posts))
            }
        }
    }
}

fn parse_remote_base(base: &str) -> ManifestResult<Url> {
    let url = Url::parse(base).map_err(|source| ManifestError::InvalidRemoteBase {
        base: base.to_string(),
        source,
    })?;

    if url.cannot_be_a_base() {
        return Err(ManifestError::RemoteBaseCannotBeABase {
            base: base.to_string(),
        });
    }

    Ok(url)
}

/// `<base>/<url_folder>/<name>.<extension>`, segments percent-encoded
fn file_url(base: &Url, source: &SourceDir, name: &str) -> ManifestResult<String> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ManifestError::RemoteBaseCannotBeABase {
            base: base.to_string(),
        })?
        .pop_if_empty()
        .push(&source.url_folder)
        .push(&format!("{}.{}", name, source.extension));
    Ok(url.into())
}

/// Write `manifest` to `path`, replacing any existing file.
///
/// The JSON goes to a temporary file next to `path` first, so on failure the
/// previous contents are left as they were. An existing file keeps its
/// permissions; a new one is created world-readable.
pub fn write_manifest(manifest: &Manifest, path: &Path) -> ManifestResult<()> {
    let json = manifest.to_json()?;

    let write_err = |source: io::Error| ManifestError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(&json).map_err(write_err)?;
    if let Some(permissions) = target_permissions(path) {
        tmp.as_file().set_permissions(permissions).map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    debug!("Wrote {} bytes to {}", json.len(), tmp.path().display());

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    info!("Manifest with {} entries written to {}", manifest.len(), path.display());

    Ok(())
}

/// Permissions the written manifest should end up with
fn target_permissions(path: &Path) -> Option<Permissions> {
    match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => new_file_permissions(),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;

    // Temp files are created 0600; the manifest is meant to be published
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}
