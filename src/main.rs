use clap::{Parser, Subcommand};
use tracing::{debug, error};

use stringkit::{
    constants::LOG_DIRECTIVE, date_string_from_unix_timestamp, drop_prefix, drop_suffix,
    has_prefix, has_suffix, is_numeric, is_percent_encoded, percent_decode,
    separated_into_lines, trimmed_string,
};

const EXIT_OK: i32 = 0;
/// Exit code for invalid command-line arguments
const EXIT_USAGE: i32 = 1;
/// Exit code for a missing result (`date` or `percent-decode`)
const EXIT_NO_VALUE: i32 = 2;

/// String helpers and Unix timestamp conversion
#[derive(Parser, Debug)]
#[command(name = "stringkit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Remove a prefix if present
    DropPrefix { input: String, prefix: String },

    /// Remove a suffix if present
    DropSuffix { input: String, suffix: String },

    /// Check whether the input starts with a prefix
    HasPrefix {
        input: String,
        prefix: String,

        /// Compare lowercased input and prefix
        #[arg(long)]
        ignore_case: bool,
    },

    /// Check whether the input ends with a suffix
    HasSuffix {
        input: String,
        suffix: String,

        /// Compare lowercased input and suffix
        #[arg(long)]
        ignore_case: bool,
    },

    /// Print each line of the input
    Lines { input: String },

    /// Check whether the input is made only of digits
    IsNumeric { input: String },

    /// Check whether the input looks percent-encoded
    IsPercentEncoded { input: String },

    /// Decode percent escapes
    PercentDecode { input: String },

    /// Strip whitespace from both ends
    Trim { input: String },

    /// Render a Unix timestamp as ISO 8601
    Date {
        #[arg(allow_negative_numbers = true)]
        input: String,
    },
}

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    initialize_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = parse_error_exit_code(&e);
            if code == EXIT_USAGE {
                error!("Invalid arguments: {:?}", e.kind());
            }
            let _ = e.print();
            std::process::exit(code);
        }
    };

    debug!("Running {:?}", cli.command);
    let output = cli.command.run();
    let code = output_exit_code(&output);

    for line in output.into_iter().flatten() {
        println!("{}", line);
    }
    std::process::exit(code);
}

/// Initialize the logging system
fn initialize_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LOG_DIRECTIVE.parse().expect("valid log directive")),
        )
        .init();
}

/// Help and version requests succeed, anything else is a usage error
fn parse_error_exit_code(error: &clap::Error) -> i32 {
    if error.use_stderr() { EXIT_USAGE } else { EXIT_OK }
}

fn output_exit_code(output: &Option<Vec<String>>) -> i32 {
    match output {
        Some(_) => EXIT_OK,
        None => EXIT_NO_VALUE,
    }
}

impl Command {
    /// Output lines, or `None` when the operation has no value to print
    fn run(&self) -> Option<Vec<String>> {
        let single = |s: &str| Some(vec![s.to_string()]);
        let flag = |b: bool| Some(vec![b.to_string()]);

        match self {
            Command::DropPrefix { input, prefix } => single(drop_prefix(input, prefix)),
            Command::DropSuffix { input, suffix } => single(drop_suffix(input, suffix)),
            Command::HasPrefix { input, prefix, ignore_case } => {
                flag(has_prefix(input, prefix, !ignore_case))
            }
            Command::HasSuffix { input, suffix, ignore_case } => {
                flag(has_suffix(input, suffix, !ignore_case))
            }
            Command::Lines { input } => Some(separated_into_lines(input)),
            Command::IsNumeric { input } => flag(is_numeric(input)),
            Command::IsPercentEncoded { input } => flag(is_percent_encoded(input)),
            Command::PercentDecode { input } => match percent_decode(input) {
                Ok(decoded) => Some(vec![decoded]),
                Err(e) => {
                    error!("Failed to decode [{}]: {}", input, e);
                    None
                }
            },
            Command::Trim { input } => single(trimmed_string(input)),
            Command::Date { input } => date_string_from_unix_timestamp(input).map(|d| vec![d]),
        }
    }
}
