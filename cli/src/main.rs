//! `vsparse` — a small command-line harness over the `vsparse-engine`
//! sparse block store.
//!
//! Each invocation operates on one fresh, in-process `SparseArray`: the
//! engine takes no on-disk persistence, so a single `write`/`zero`/`fill`/
//! `blit` subcommand is mostly useful for showing that one operation's
//! immediate effect on the extent map. A realistic session chains several
//! operations with `vsparse run <script>`.

mod error;
mod ops;
mod output;
mod script;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use error::Result;
use ops::{apply, Op};
use output::print_extents;
use vsparse_engine::{ExtentList, SparseArray};

#[derive(Parser)]
#[command(
    name = "vsparse",
    version,
    about = "Exercise the vsparse sparse block store engine from the command line"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Emit machine-readable JSON for any extent output.
    #[arg(long, global = true)]
    json: bool,

    /// Raise log verbosity; repeat for more (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Enable the engine's own internal debug-event tracing (L1 insertion
    /// and page reclamation events).
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write bytes (given as hex) at an offset, then print the affected
    /// range's resulting extents.
    Write {
        #[arg(long)]
        offset: u64,
        /// Hex-encoded payload, e.g. `68656c6c6f` for "hello".
        #[arg(long)]
        data: String,
    },
    /// Zero a byte range, then print its resulting extents.
    Zero {
        #[arg(long)]
        offset: u64,
        #[arg(long)]
        len: u32,
    },
    /// Fill a byte range with a repeated byte, then print its resulting
    /// extents.
    Fill {
        #[arg(long)]
        offset: u64,
        #[arg(long)]
        len: u32,
        #[arg(long)]
        byte: u8,
    },
    /// Copy bytes within one array (demonstrates `blit_within`), then print
    /// the destination range's resulting extents.
    Blit {
        #[arg(long = "src-offset")]
        src_offset: u64,
        #[arg(long = "dst-offset")]
        dst_offset: u64,
        #[arg(long)]
        len: u32,
    },
    /// Query a byte range's extents on an otherwise-empty array (every
    /// range reads as one hole unless preceded by a `run` script).
    Extents {
        #[arg(long)]
        offset: u64,
        #[arg(long)]
        len: u32,
    },
    /// Run a small script of ops (see `ops::parse_line`) against one
    /// shared array, printing extents as each `extents` line is reached.
    Run { script: PathBuf },
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Write { offset, data } => {
            let bytes = hex::decode(&data)?;
            let mut sa = SparseArray::new(cli.debug);
            apply(&mut sa, &Op::Write { offset, data: bytes.clone() })?;
            print_range_extents(&sa, offset, bytes.len() as u32, cli.json)?;
        }
        Commands::Zero { offset, len } => {
            let mut sa = SparseArray::new(cli.debug);
            apply(&mut sa, &Op::Zero { offset, len })?;
            print_range_extents(&sa, offset, len, cli.json)?;
        }
        Commands::Fill { offset, len, byte } => {
            let mut sa = SparseArray::new(cli.debug);
            apply(&mut sa, &Op::Fill { offset, len, byte })?;
            print_range_extents(&sa, offset, len, cli.json)?;
        }
        Commands::Blit { src_offset, dst_offset, len } => {
            let mut sa = SparseArray::new(cli.debug);
            apply(&mut sa, &Op::Blit { src_offset, dst_offset, len })?;
            let lo = src_offset.min(dst_offset);
            let hi = src_offset.max(dst_offset) + len as u64;
            print_range_extents(&sa, lo, (hi - lo) as u32, cli.json)?;
        }
        Commands::Extents { offset, len } => {
            let sa = SparseArray::new(cli.debug);
            print_range_extents(&sa, offset, len, cli.json)?;
        }
        Commands::Run { script } => {
            script::run(&script, cli.debug, cli.json)?;
        }
    }

    Ok(())
}

fn print_range_extents(sa: &SparseArray, offset: u64, len: u32, json: bool) -> Result<()> {
    let mut list = ExtentList::new(offset, offset + len as u64)?;
    sa.extents(len, offset, &mut list)?;
    print_extents(&list, json);
    Ok(())
}
