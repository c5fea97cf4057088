//! Command-line shell around the huffer codec.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use huffer::{Error, SymbolSize};

#[derive(Parser)]
#[command(name = "huffer", about = "Huffman coding based data compression", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress FILE and print the compressed data to standard output
    #[command(visible_alias = "compress")]
    Encode {
        /// File to compress
        file: PathBuf,

        /// Bytes per symbol
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=8))]
        symbol_size: u8,
    },

    /// Decompress FILE, or standard input, to standard output
    #[command(visible_alias = "decompress")]
    Decode {
        /// File to decompress; standard input if omitted
        file: Option<PathBuf>,
    },

    /// Print the Huffman tree of FILE, or standard input, to standard
    /// output in dot (Graphviz) format
    Graph {
        /// File to analyze; standard input if omitted
        file: Option<PathBuf>,

        /// Bytes per symbol
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=8))]
        symbol_size: u8,
    },
}

enum CliError {
    /// The input file could not be opened.
    Input(PathBuf, io::Error),
    /// The codec rejected the stream or I/O failed mid-run.
    Codec(Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Input(path, e) => write!(f, "cannot open {}: {e}", path.display()),
            CliError::Codec(e) => write!(f, "{e}"),
        }
    }
}

impl From<Error> for CliError {
    fn from(e: Error) -> Self {
        CliError::Codec(e)
    }
}

// One exit code per failure class, so scripts can tell them apart.
// Clap owns exit code 2 for usage errors.
fn exit_code(err: &CliError) -> i32 {
    match err {
        CliError::Input(..) => 1,
        CliError::Codec(e) => match e {
            Error::BadMagic => 3,
            Error::TruncatedHeader => 4,
            Error::MalformedTree => 5,
            Error::InvalidSymbolSize(_) => 6,
            Error::TruncatedBody => 7,
            Error::CorruptBody => 8,
            Error::UnexpectedEof | Error::Io(_) => 9,
        },
    }
}

fn init_tracing() {
    // Nothing is logged unless the user opts in via `RUST_LOG`.
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "off".into());
    let ansi = std::env::var_os("NO_COLOR").is_none();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_writer(io::stderr)
        .init();
}

fn open(path: &Path) -> Result<File, CliError> {
    File::open(path).map_err(|e| CliError::Input(path.to_path_buf(), e))
}

fn run(cli: Cli) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Encode { file, symbol_size } => {
            let size = SymbolSize::new(symbol_size)?;
            huffer::encode(BufReader::new(open(&file)?), &mut out, size)?;
        }
        Commands::Decode { file } => match file {
            Some(path) => huffer::decode(BufReader::new(open(&path)?), &mut out)?,
            None => huffer::decode(io::stdin().lock(), &mut out)?,
        },
        Commands::Graph { file, symbol_size } => {
            let size = SymbolSize::new(symbol_size)?;
            match file {
                Some(path) => huffer::graph(BufReader::new(open(&path)?), &mut out, size)?,
                None => huffer::graph(io::stdin().lock(), &mut out, size)?,
            }
        }
    }

    out.flush().map_err(Error::Io)?;
    Ok(())
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        process::exit(exit_code(&err));
    }
}
