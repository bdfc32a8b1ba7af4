use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueHint};
use tracing::debug;

use clozer::commands::generate::GenerateOptions;
use clozer::commands::{count, generate, studio};
use clozer::export::DEFAULT_EXPORT_FILE;
use clozer::logging;
use clozer::strategy::{DEFAULT_CUSTOM_COUNT, Strategy};
use clozer::utils::read_input;

#[derive(Parser, Debug)]
#[command(
    name = "clozer",
    version,
    about = "Turn any text into a cloze test.",
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true,
    disable_help_subcommand = true
)]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG overrides this.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Blank out words and print the cloze test
    Generate {
        /// Text file to read. Reads stdin when omitted or "-".
        #[arg(value_name = "INPUT", value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
        /// keyword, random or custom. Anything else leaves the text unchanged.
        #[arg(short, long, env = "CLOZER_STRATEGY", default_value = "keyword")]
        strategy: String,
        /// Number of blanks for the custom strategy, clamped to the word count
        #[arg(
            short = 'n',
            long,
            env = "CLOZER_COUNT",
            allow_hyphen_values = true,
            default_value_t = DEFAULT_CUSTOM_COUNT.to_string()
        )]
        count: String,
        /// Seed for the random and custom strategies
        #[arg(long, env = "CLOZER_SEED")]
        seed: Option<u64>,
        /// Also write the cloze test to a file
        #[arg(
            short,
            long,
            value_name = "PATH",
            num_args = 0..=1,
            default_missing_value = DEFAULT_EXPORT_FILE,
            value_hint = ValueHint::FilePath
        )]
        output: Option<PathBuf>,
        /// Overwrite the output file without asking
        #[arg(long, default_value_t = false)]
        force: bool,
        /// Print a JSON report instead of plain text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the word count the generator would use
    Count {
        #[arg(value_name = "INPUT", value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
    },
    /// Interactive generator in the terminal
    Studio {
        /// Text file to start with
        #[arg(value_name = "INPUT", value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
        /// Where Ctrl+S exports to
        #[arg(short, long, value_name = "PATH", default_value = DEFAULT_EXPORT_FILE)]
        output: PathBuf,
        /// Seed for the random and custom strategies
        #[arg(long, env = "CLOZER_SEED")]
        seed: Option<u64>,
    },
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("{:?}", err);
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            input,
            strategy,
            count,
            seed,
            output,
            force,
            json,
        } => {
            logging::init(cli.verbose);
            let strategy = Strategy::from_tag(&strategy);
            debug!(%strategy, ?seed, "starting generate");
            generate::run(GenerateOptions {
                input,
                strategy,
                count,
                seed,
                output,
                force,
                json,
            })?;
        }
        Command::Count { input } => {
            logging::init(cli.verbose);
            count::run(input)?;
        }
        Command::Studio {
            input,
            output,
            seed,
        } => {
            logging::init_silent();
            let text = match input {
                Some(path) => read_input(Some(&path))?,
                None => String::new(),
            };
            studio::run(text, output, seed)?;
        }
    }

    Ok(())
}
