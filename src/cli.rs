use clap::ArgAction;
use clap::{command, Parser};

/// Classify name-sorted paired-end SAM records into the pairsam format.
#[derive(Parser)]
#[command(name = "pairsam")]
#[command(about = "classify name-sorted paired-end SAM records into pairsam records")]
#[command(author, version)]
pub struct Cli {
    /// Input SAM file, `-` or omitted for STDIN
    #[arg(required = false)]
    pub input: Option<String>,

    /// Output file ("-" for stdout)
    #[arg(long, short, default_value = "-", help_heading = Some("GLOBAL"))]
    pub outfile: String,
    /// Bool, if rewrite output file [default: false]
    #[arg(long, short, default_value = "false", help_heading = Some("GLOBAL"))]
    pub rewrite: bool,
    /// Logging level [-v: Info, -vv: Debug, -vvv: Trace].
    #[arg(short, long, action = ArgAction::Count, help_heading = "GLOBAL")]
    pub verbose: u8,

    /// Minimum MAPQ for an alignment to be considered unique
    #[arg(long, default_value = "10")]
    pub min_mapq: u8,
    /// Ceiling on the inferred Hi-C molecule size during chimera rescue
    #[arg(long, default_value = "2000")]
    pub max_molecule_size: u64,
    /// Replace read_id with `.` in the emitted record
    #[arg(long, default_value = "false")]
    pub drop_readid: bool,
    /// Replace both SAM blocks with `.` in the emitted record
    #[arg(long, default_value = "false")]
    pub drop_sam: bool,
}
