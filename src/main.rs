use clap::{Args, Parser as ClapParser, Subcommand};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};
use tq_lang::{
    CodecConfig, Format,
    cli::{self, CheckOptions, CheckResult, CliError, LogConfig},
};

#[derive(ClapParser)]
#[command(name = "tq")]
#[command(about = "tq - A jq-like query language for selecting data from TOML documents")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); TQ_LOG is used otherwise
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Document text (reads --file or stdin if not provided)
    #[arg(short, long)]
    input: Option<String>,

    /// Read the document from a file
    #[arg(short, long, conflicts_with = "input")]
    file: Option<PathBuf>,

    /// Input document format
    #[arg(long, default_value = "toml", value_parser = parse_format)]
    from: Format,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a tq query against a document
    Run {
        /// The tq query to execute
        query: String,

        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(long, default_value = "toml", value_parser = parse_format)]
        to: Format,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Write TOML tables inline instead of as documents
        #[arg(long)]
        inline: bool,
    },

    /// Only validate query syntax, don't execute
    Check {
        /// The tq query to validate
        query: String,
    },

    /// Validate that a document decodes
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },
}

fn parse_format(s: &str) -> Result<Format, String> {
    s.parse().map_err(|e: tq_lang::CodecError| e.to_string())
}

fn main() {
    let cli = Cli::parse();
    cli::init_logging(&LogConfig::from_verbosity(cli.verbose));

    let result = match cli.command {
        Commands::Run {
            query,
            input,
            to,
            pretty,
            inline,
        } => run_query(query, input, to, pretty, inline),
        Commands::Check { query } => run_check(query),
        Commands::Validate { input } => run_validate(input),
    };

    if let Err(e) = result {
        eprintln!("{}", e.render());
        std::process::exit(1);
    }
}

fn read_input(args: &InputArgs) -> Result<Option<String>, CliError> {
    if let Some(s) = &args.input {
        return Ok(Some(s.clone()));
    }
    if let Some(path) = &args.file {
        return Ok(Some(fs::read_to_string(path)?));
    }
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(Some(buffer))
}

fn run_query(
    query: String,
    input: InputArgs,
    to: Format,
    pretty: bool,
    inline: bool,
) -> Result<(), CliError> {
    let options = CheckOptions {
        query,
        input: read_input(&input)?,
        codec: CodecConfig {
            input: input.from,
            output: to,
            pretty,
            tables_inline: inline,
        },
        syntax_only: false,
    };

    let output = cli::execute_run(&options)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

fn run_check(query: String) -> Result<(), CliError> {
    let options = CheckOptions {
        query,
        syntax_only: true,
        ..Default::default()
    };

    if let CheckResult::SyntaxValid = cli::execute_check(&options)? {
        println!("Query is valid");
    }
    Ok(())
}

fn run_validate(input: InputArgs) -> Result<(), CliError> {
    let text = read_input(&input)?;
    let codec = CodecConfig {
        input: input.from,
        ..Default::default()
    };
    cli::execute_validate(text.as_deref(), codec)?;
    println!("Document is valid {}", input.from);
    Ok(())
}
