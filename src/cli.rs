use clap::Parser;
use std::path::PathBuf;

/// tcppeek: layered Ethernet/IPv4/TCP decoder for captured frame hex dumps
#[derive(Parser, Debug)]
#[command(name = "tcppeek", version, about)]
pub struct Cli {
    /// Hex dump file to read frames from, one frame per line.
    /// Reads stdin when not specified.
    pub input: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Maximum number of frames to decode (0 = unlimited)
    #[arg(short = 'c', long)]
    pub count: Option<u64>,

    /// Snap length: keep at most this many captured bytes per frame
    #[arg(short, long)]
    pub snaplen: Option<usize>,

    /// Show the detailed multi-line view for every frame
    #[arg(long, default_value_t = false)]
    pub detail: bool,

    /// Only print frames that decoded through the TCP layer
    #[arg(long, default_value_t = false)]
    pub tcp_only: bool,

    /// Suppress per-frame output (summary counters only)
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Payload bytes to show in the detail view
    #[arg(long)]
    pub payload_bytes: Option<usize>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
