//! pto-scan command line interface

use clap::{ArgAction, Args, Parser, Subcommand};
use pto_scan::{Document, Error, ProjectDirectory, RenderOptions, Result, ScanOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Scan, inspect and rewrite panorama project scripts
///
/// # Examples
///
/// ```bash
/// # Reconstruct a script without comments or blank lines
/// pto-scan render project.pto --content-only
///
/// # Dump every line and field with its data type
/// pto-scan walk project.pto
///
/// # List scripts in a directory and show the images of one
/// pto-scan list ./panoramas
/// pto-scan images ./panoramas project.pto --pretty
/// ```
#[derive(Parser)]
#[command(name = "pto-scan")]
#[command(author, version, about = "Scan, inspect and rewrite panorama project scripts", long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ScanArgs {
    /// Script to scan
    file: PathBuf,

    /// Only accept the standard line headers (p, v, i, m, o, z, c, k)
    #[arg(long)]
    strict: bool,

    /// Keep #-hugin, #hugin_ and #-imgfile lines as plain comments
    #[arg(long)]
    no_extensions: bool,
}

impl ScanArgs {
    fn open(&self) -> Result<Document> {
        let options = if self.strict {
            ScanOptions::strict()
        } else {
            ScanOptions::new()
        }
        .with_extensions(!self.no_extensions);
        Document::open_with_options(&self.file, options)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct a script from its scanned lines
    Render {
        #[command(flatten)]
        scan: ScanArgs,

        /// Drop comments, blank lines and other unstructured lines
        #[arg(long)]
        content_only: bool,
    },

    /// Describe every line and field of a script
    Walk {
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Print a script's lines exactly as read
    Echo {
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// List the scripts in a directory as a JSON array
    List {
        /// Directory to list
        dir: PathBuf,

        /// File extension to match (case-sensitive)
        #[arg(long, default_value = "pto")]
        extension: String,
    },

    /// Print the image records of one script as JSON
    Images {
        /// Directory holding the script
        dir: PathBuf,

        /// Script file name, without any directory part
        name: String,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

impl Commands {
    fn execute(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        match self {
            Commands::Render { scan, content_only } => {
                let doc = scan.open()?;
                let options = if *content_only {
                    RenderOptions::content_only()
                } else {
                    RenderOptions::new()
                };
                pto_scan::to_writer_with_options(&mut out, &doc, options)
            }
            Commands::Walk { scan } => scan.open()?.walk(&mut out),
            Commands::Echo { scan } => scan.open()?.echo(&mut out),
            Commands::List { dir, extension } => {
                let names = ProjectDirectory::new(dir)
                    .with_extension(extension)
                    .list()?;
                let json = serde_json::to_string(&names).map_err(Error::custom)?;
                writeln!(out, "{}", json)?;
                Ok(())
            }
            Commands::Images { dir, name, pretty } => {
                let records = ProjectDirectory::new(dir).load_images(name)?;
                let json = if *pretty {
                    serde_json::to_string_pretty(&records)
                } else {
                    serde_json::to_string(&records)
                }
                .map_err(Error::custom)?;
                writeln!(out, "{}", json)?;
                Ok(())
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = format!("pto_scan={}", level);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
