use std::path::PathBuf;
use std::thread;

use crossbeam_channel::bounded;
use tracing::info;

use crate::config::{ManifestConfig, SourceDir};
use crate::error::{ManifestResult, NameSet};
use crate::lister::list_base_names;
use crate::manifest::{write_manifest, ManifestBuilder};
use crate::reconcile::reconcile;

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub entries: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Videos,
    Previews,
}

/// Result sent back from a scan worker
struct ScanResult {
    side: Side,
    result: ManifestResult<NameSet>,
}

pub struct Pipeline {
    config: ManifestConfig,
}

impl Pipeline {
    pub fn new(config: ManifestConfig) -> Self {
        Pipeline { config }
    }

    /// Scan, reconcile, build and write the manifest.
    ///
    /// Nothing is written unless every step before the write succeeds.
    pub fn run(&self) -> ManifestResult<RunSummary> {
        // Fail on a bad remote base before touching the filesystem
        let builder = ManifestBuilder::new(&self.config)?;

        let (videos, previews) = self.scan_both()?;
        info!(
            "Found {} videos and {} preview images",
            videos.len(),
            previews.len()
        );

        reconcile(&videos, &previews)?;

        let manifest = builder.build(&videos)?;
        let output_path = self.config.output_path();
        write_manifest(&manifest, &output_path)?;

        Ok(RunSummary {
            output_path,
            entries: manifest.len(),
        })
    }

    /// List both directories on their own threads and wait for both.
    fn scan_both(&self) -> ManifestResult<(NameSet, NameSet)> {
        let (result_sender, result_receiver) = bounded::<ScanResult>(2);

        let sources: [(Side, &SourceDir); 2] = [
            (Side::Videos, &self.config.videos),
            (Side::Previews, &self.config.previews),
        ];

        thread::scope(|scope| {
            for (side, source) in sources {
                let result_tx = result_sender.clone();
                scope.spawn(move || {
                    info!("Scanning directory: {}", source.dir.display());
                    let result = list_base_names(&source.dir, &source.extension);
                    // Capacity covers both workers, so this never blocks
                    let _ = result_tx.send(ScanResult { side, result });
                });
            }
        });

        // Drop our sender so the receiver ends after the worker results
        drop(result_sender);

        let mut videos = None;
        let mut previews = None;
        for ScanResult { side, result } in result_receiver {
            match side {
                Side::Videos => videos = Some(result),
                Side::Previews => previews = Some(result),
            }
        }

        match (videos, previews) {
            (Some(videos), Some(previews)) => Ok((videos?, previews?)),
            _ => unreachable!("scan worker finished without reporting a result"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use crate::error::{ManifestError, SetMismatch};
    use std::fs;
    use std::path::Path;

    fn setup(root: &Path, videos: &[&str], previews: &[&str]) {
        fs::create_dir_all(root.join("Video")).unwrap();
        fs::create_dir_all(root.join("PreviewPictures")).unwrap();
        for name in videos {
            fs::write(root.join("Video").join(name), b"").unwrap();
        }
        for name in previews {
            fs::write(root.join("PreviewPictures").join(name), b"").unwrap();
        }
    }

    #[test]
    fn test_posts_run_writes_sorted_pairs() {
        let dir = tempfile::tempdir().unwrap();
        setup(dir.path(), &["b.mp4", "a.mp4"], &["a.jpg", "b.jpg"]);

        let pipeline = Pipeline::new(Variant::Posts.config(dir.path()));
        let summary = pipeline.run().unwrap();
        assert_eq!(summary.entries, 2);
        assert_eq!(summary.output_path, dir.path().join("posts.json"));

        let json: serde_json::Value =
            serde_json::from_slice(&fs::read(&summary.output_path).unwrap()).unwrap();
        let base = "https://raw.githubusercontent.com/Jacker910/VideoExamples/main";
        assert_eq!(
            json,
            serde_json::json!([
                {
                    "videoUrl": format!("{}/Video/a.mp4", base),
                    "previewImageUrl": format!("{}/PreviewPictures/a.jpg", base),
                },
                {
                    "videoUrl": format!("{}/Video/b.mp4", base),
                    "previewImageUrl": format!("{}/PreviewPictures/b.jpg", base),
                },
            ])
        );
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        setup(dir.path(), &["x.mp4", "y.mp4", "z.mp4"], &["z.jpg", "x.jpg", "y.jpg"]);

        let pipeline = Pipeline::new(Variant::Files.config(dir.path()));
        let path = pipeline.run().unwrap().output_path;
        let first = fs::read(&path).unwrap();
        pipeline.run().unwrap();
        assert_eq!(fs::read(&path).unwrap(), first);
        assert_eq!(
            String::from_utf8(first).unwrap(),
            "[\n  \"x\",\n  \"y\",\n  \"z\"\n]"
        );
    }

    #[test]
    fn test_mismatch_leaves_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        setup(dir.path(), &["a.mp4"], &[]);
        let output = dir.path().join("posts.json");
        fs::write(&output, b"previous").unwrap();

        let err = Pipeline::new(Variant::Posts.config(dir.path()))
            .run()
            .unwrap_err();

        let expected: NameSet = ["a".to_string()].into_iter().collect();
        match err {
            ManifestError::Mismatch(SetMismatch::MissingPreviews(names)) => {
                assert_eq!(names, expected)
            }
            other => panic!("expected MissingPreviews, got {:?}", other),
        }
        assert_eq!(fs::read(&output).unwrap(), b"previous");
    }

    #[test]
    fn test_missing_directory_aborts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("PreviewPictures")).unwrap();

        let err = Pipeline::new(Variant::Hls.config(dir.path()))
            .run()
            .unwrap_err();
        match err {
            ManifestError::DirectoryRead { path, .. } => assert_eq!(path, dir.path().join("HLS")),
            other => panic!("expected DirectoryRead, got {:?}", other),
        }
        assert!(!dir.path().join("postsHLS.json").exists());
    }

    #[test]
    fn test_both_directories_missing_reports_videos() {
        let dir = tempfile::tempdir().unwrap();

        let err = Pipeline::new(Variant::Hls.config(dir.path()))
            .run()
            .unwrap_err();
        match err {
            ManifestError::DirectoryRead { path, .. } => assert_eq!(path, dir.path().join("HLS")),
            other => panic!("expected DirectoryRead, got {:?}", other),
        }
        assert!(!dir.path().join("postsHLS.json").exists());
    }

    #[test]
    fn test_empty_directories_write_empty_manifest() {
        let dir = tempfile::tempdir().unwrap();
        setup(dir.path(), &[], &[]);

        let summary = Pipeline::new(Variant::Posts.config(dir.path())).run().unwrap();
        assert_eq!(summary.entries, 0);
        assert_eq!(fs::read_to_string(summary.output_path).unwrap(), "[]");
    }
}
