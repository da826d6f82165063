//! CLI entry point for stitching rendered code images into a quilt

use clap::Parser;
use codequilt::io::cli::{Cli, QuiltProcessor, init_tracing};

fn main() -> codequilt::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level());
    let mut processor = QuiltProcessor::new(cli);
    processor.process()?;
    Ok(())
}
