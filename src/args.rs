use std::path::PathBuf;

use clap::Parser;

use crate::config::{ManifestConfig, Variant};

/// Check that every video has a preview image and write a JSON manifest of the pairs
#[derive(Debug, Parser)]
#[command(name = "preview_manifest", version)]
pub struct Args {
    /// Which folders to scan and which manifest to write
    #[arg(long, value_enum, default_value_t = Variant::Hls)]
    pub variant: Variant,

    /// Directory holding the video and preview folders
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Where the manifest file is written (defaults to the root directory)
    #[arg(short = 'o', long, alias = "output-directory")]
    pub output_dir: Option<PathBuf>,

    /// Remote base the generated URLs point at
    #[arg(long)]
    pub remote_base: Option<String>,

    /// Log every scanned and skipped file
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Variant preset with the command line overrides applied
    pub fn manifest_config(&self) -> ManifestConfig {
        let mut config = self.variant.config(&self.root);
        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir);
        }
        if let Some(base) = &self.remote_base {
            config = config.with_remote_base(base);
        }
        config
    }
}
