//! vstream - inspect vertex stream chunks
//!
//! # Commands
//!
//! - `vstream info <file>` - Per-attribute counts and sizes
//! - `vstream dump <file> --attribute compressed_normals` - Print elements
//! - `vstream json <file> -o mesh.json` - Export the decoded stream as JSON
//!
//! Log verbosity follows `RUST_LOG` (default `info`); `-v` enables debug output.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use vstream_cli::{
    DecodeArgs, DumpTarget, load_stream, parse_dump_target, render_dump, render_info, to_json,
};

#[derive(Parser)]
#[command(name = "vstream")]
#[command(about = "Inspect and dump vertex stream chunks")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show index and attribute counts
    Info {
        /// Raw vertex stream payload
        input: PathBuf,

        #[command(flatten)]
        decode: DecodeArgs,
    },

    /// Print the elements of one attribute
    Dump {
        /// Raw vertex stream payload
        input: PathBuf,

        /// Attribute to print (e.g. positions, compressed_tangents, indices)
        #[arg(short, long, default_value = "indices", value_parser = parse_dump_target)]
        attribute: DumpTarget,

        /// Maximum number of elements to print
        #[arg(short = 'n', long, default_value_t = 32)]
        limit: usize,

        #[command(flatten)]
        decode: DecodeArgs,
    },

    /// Write the decoded stream as JSON
    Json {
        /// Raw vertex stream payload
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        decode: DecodeArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info { input, decode } => {
            let stream = load_stream(&input, &decode)?;
            print!("{}", render_info(&stream));
        }

        Commands::Dump {
            input,
            attribute,
            limit,
            decode,
        } => {
            let stream = load_stream(&input, &decode)?;
            print!("{}", render_dump(&stream, attribute, limit));
        }

        Commands::Json {
            input,
            output,
            pretty,
            decode,
        } => {
            let stream = load_stream(&input, &decode)?;
            let json = to_json(&stream, pretty)?;
            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("Wrote {}", path.display());
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}
