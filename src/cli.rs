use clap::Parser;
use std::path::PathBuf;

/// SANCdpd recordkeeping CLI: bag ingest, lineage, access copies and
/// reference data, driven from an interactive menu.
#[derive(Parser, Debug)]
#[command(name = "sancdpd", version, about = "SANCdpd recordkeeping CLI")]
pub struct Cli {
    /// Config file to use instead of searching for SANCdpd_config.json
    #[arg(long)]
    pub config: Option<PathBuf>,
}
