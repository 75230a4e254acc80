use clap::Parser;
use tracing_subscriber::EnvFilter;

use preview_manifest::args::Args;
use preview_manifest::pipeline::Pipeline;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();
    init_tracing(args.verbose);

    let pipeline = Pipeline::new(args.manifest_config());
    let summary = pipeline.run()?;

    println!(
        "Manifest written: {} ({} entries)",
        summary.output_path.display(),
        summary.entries
    );

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
