pub mod collect;
pub mod evaluate;
pub mod learn;
pub mod sweep;

use std::path::PathBuf;

use clap::Args;

/// Positional demonstration root shared by every subcommand.
#[derive(Args, Debug)]
pub struct DemoDirArg {
    /// Directory holding config.json and one sub-directory per demonstration
    pub demo_dir: PathBuf,
}
