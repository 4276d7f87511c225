use clap::{Parser, Subcommand};
use fob::cli::{describe_plan, scramble_file, show_info, InfoOptions, ScrambleOptions};
use fob::{BlockWidth, Capabilities};
use std::path::PathBuf;
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("FOB_VERSION");
const PROFILE: &str = env!("FOB_PROFILE");
const GIT_HASH: &str = env!("FOB_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} ({})", PROFILE, VERSION, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "fob")]
#[command(about = "Reversibly scramble a file by inverting its bits", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Invert every bit of a file (run again to restore it)
    #[command(alias = "s")]
    Scramble {
        /// File to scramble
        input: PathBuf,

        /// Write to this path instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Widest block in bytes (1, 2, 4, 8, 16 or 32)
        #[arg(long, value_parser = parse_width)]
        max_width: Option<BlockWidth>,

        /// Report extensions, block plan and a hex preview
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show detected CPU capabilities and, optionally, a file's block plan
    #[command(alias = "i")]
    Info {
        /// File to plan
        file: Option<PathBuf>,

        /// Widest block in bytes (1, 2, 4, 8, 16 or 32)
        #[arg(long, value_parser = parse_width)]
        max_width: Option<BlockWidth>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_width(s: &str) -> Result<BlockWidth, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("fob {}", get_version());
        return ExitCode::SUCCESS;
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            println!();
            return ExitCode::SUCCESS;
        }
    };

    // Probe once, before any file is touched
    let caps = Capabilities::detect();

    let result = match command {
        Commands::Scramble {
            input,
            output,
            max_width,
            verbose,
        } => {
            let options = ScrambleOptions {
                output,
                max_width,
                verbose,
            };

            scramble_file(&input, &options, &caps).map(|report| {
                if verbose {
                    println!("Scrambled {} bytes in {}", report.bytes, describe_plan(&report.plan));
                }
                println!("Written to {}", report.output.display());
            })
        }

        Commands::Info {
            file,
            max_width,
            json,
        } => {
            let options = InfoOptions { max_width, json };
            show_info(file.as_deref(), &options, &caps).map(|info| print!("{}", info))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
