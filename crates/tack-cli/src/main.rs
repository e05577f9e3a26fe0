use clap::{Parser, Subcommand, ValueEnum};

mod check;
mod debug;
mod utils;


use check::handle_check;
use debug::{handle_ast, handle_types};

/// Get the version string including git revision
fn version() -> &'static str {
    concat!(env!("CARGO_PKG_VERSION"), " (git:", env!("GIT_HASH"), ")")
}

#[derive(Parser)]
#[command(
    author,
    version = version(),
    about = "Static checker for the Tack teaching language",
    long_about = None,
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// How `check` reports its results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Source snippets on stderr
    Human,
    /// One JSON object per file on stdout
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse, resolve and typecheck Tack sources
    Check {
        /// Files or directories to check (`-` reads stdin)
        #[arg(required = true)]
        paths: Vec<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
        /// Print the time spent in each stage
        #[arg(long)]
        timings: bool,
    },
    /// Print the parsed AST (debug)
    #[command(hide = true)]
    Ast {
        /// The file to parse
        file: String,
    },
    /// Print the type of every node (debug)
    #[command(hide = true)]
    Types {
        /// The file to typecheck
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Check {
            paths,
            format,
            timings,
        } => {
            handle_check(paths, *format, *timings);
        }
        Commands::Ast { file } => {
            handle_ast(file);
        }
        Commands::Types { file } => {
            handle_types(file);
        }
    }
}
