//! OxiPress CLI - lossless compression with detailed statistics
//!
//! Compresses, decompresses and analyses files with Huffman coding,
//! run-length encoding and LZ77.

mod commands;
mod utils;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    CompressOptions, cmd_analyze, cmd_compress, cmd_decompress, cmd_detect, cmd_verify,
};
use log::LevelFilter;
use oxipress_engine::Algorithm;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxipress")]
#[command(
    author,
    version,
    about = "OxiPress - Huffman, RLE and LZ77 compression with statistics"
)]
#[command(long_about = "
OxiPress compresses single files with one of three classical codecs and
reports detailed statistics about the result.

Examples:
  oxipress compress notes.txt -a huffman
  oxipress compress image.bmp -a rle --threshold 4
  oxipress compress source.rs -a lz77 --window 8192 --json
  oxipress decompress notes.txt.huff
  oxipress analyze data.bin
  oxipress verify data.bin
  oxipress detect notes.txt.huff
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Compression algorithm
        #[arg(short, long, value_enum)]
        algorithm: AlgorithmArg,

        /// Output file (default: input name plus .huff/.rle/.lz77)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// RLE: minimum run length stored as a run
        #[arg(long)]
        threshold: Option<u8>,

        /// LZ77: sliding window size (1-32768)
        #[arg(long)]
        window: Option<u16>,

        /// LZ77: lookahead buffer size (1-255)
        #[arg(long)]
        lookahead: Option<u8>,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(short, long)]
        json: bool,

        /// Embed the hex-encoded container in the JSON report
        #[arg(long)]
        embed: bool,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decompress {
        /// File to decompress
        input: PathBuf,

        /// Algorithm (auto-detected from the container if omitted)
        #[arg(short, long, value_enum)]
        algorithm: Option<AlgorithmArg>,

        /// Output file (default: input name without its extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Analyse a file and recommend an algorithm
    #[command(alias = "a")]
    Analyze {
        /// File to analyse
        input: PathBuf,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the full profile as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Round-trip a file through one or all algorithms
    #[command(alias = "t")]
    Verify {
        /// File to verify
        input: PathBuf,

        /// Algorithm to check (all if omitted)
        #[arg(short, long, value_enum)]
        algorithm: Option<AlgorithmArg>,
    },

    /// Identify the algorithm of a compressed file
    Detect {
        /// File to inspect
        file: PathBuf,
    },
}

/// Algorithm selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    /// Huffman coding
    Huffman,
    /// Run-length encoding
    Rle,
    /// LZ77 sliding window
    Lz77,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Huffman => Algorithm::HuffmanCoding,
            AlgorithmArg::Rle => Algorithm::RunLengthEncoding,
            AlgorithmArg::Lz77 => Algorithm::Lz77,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // Only fails if a logger is already installed.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compress {
            input,
            algorithm,
            output,
            threshold,
            window,
            lookahead,
            config,
            json,
            embed,
        } => cmd_compress(
            &input,
            &CompressOptions {
                algorithm: algorithm.into(),
                output,
                threshold,
                window,
                lookahead,
                config,
                json,
                embed,
            },
        ),
        Commands::Decompress {
            input,
            algorithm,
            output,
            json,
        } => cmd_decompress(&input, algorithm.map(Into::into), output.as_deref(), json),
        Commands::Analyze {
            input,
            config,
            json,
        } => cmd_analyze(&input, config.as_deref(), json),
        Commands::Verify { input, algorithm } => cmd_verify(&input, algorithm.map(Into::into)),
        Commands::Detect { file } => cmd_detect(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
