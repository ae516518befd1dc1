use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rulekit", version, about = "Parse, combine and evaluate rule expressions")]
struct Cli {
    /// Reject unclosed parentheses and trailing tokens instead of tolerating them.
    #[arg(long, global = true)]
    strict: bool,

    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the tokens of a rule as a JSON array.
    Tokenize {
        /// Rule text.
        rule: String,
    },
    /// Validate and parse a single condition; print its AST.
    Create {
        /// Rule text, e.g. "age > 30".
        rule: String,
    },
    /// AND-combine several rules; print the combined AST (or null).
    Combine(CombineArgs),
    /// Evaluate an AST against an attribute map; print {"result": ...}.
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug)]
struct CombineArgs {
    /// Rule texts. Blank entries are skipped.
    rules: Vec<String>,

    /// Read additional rules from a file, one per line. Blank lines and
    /// lines starting with '#' are ignored.
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// AST JSON file ('-' for stdin).
    #[arg(long)]
    ast: PathBuf,

    /// Attribute JSON file ('-' for stdin).
    #[arg(long)]
    data: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = if cli.strict {
        rulekit::ParseOptions::strict()
    } else {
        rulekit::ParseOptions::default()
    };

    match cli.cmd {
        Command::Tokenize { rule } => cmd_tokenize(&rule),
        Command::Create { rule } => cmd_create(&rule, options),
        Command::Combine(args) => cmd_combine(args, &options),
        Command::Evaluate(args) => cmd_evaluate(&args),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("encode output JSON")?;
    println!("{out}");
    Ok(())
}

fn cmd_tokenize(rule: &str) -> anyhow::Result<()> {
    let tokens: Vec<&str> = rulekit::tokenize(rule).iter().map(|t| t.text).collect();
    print_json(&tokens)
}

fn cmd_create(rule: &str, options: rulekit::ParseOptions) -> anyhow::Result<()> {
    let mut book = rulekit::RuleBook::new().with_options(options);
    let (id, node) = book
        .create_rule(rule)
        .with_context(|| format!("create rule '{rule}'"))?;
    info!(%id, "rule created");
    print_json(&node)
}

fn cmd_combine(args: CombineArgs, options: &rulekit::ParseOptions) -> anyhow::Result<()> {
    let mut rules = args.rules;
    if let Some(path) = &args.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read rules file '{}'", path.display()))?;
        rules.extend(
            text.lines()
                .filter(|line| !line.trim_start().starts_with('#'))
                .map(str::to_owned),
        );
    }
    debug!(count = rules.len(), "combining rules");

    let combined = rulekit::combine_with(&rules, options).context("combine rules")?;
    print_json(&combined)
}

fn cmd_evaluate(args: &EvaluateArgs) -> anyhow::Result<()> {
    if args.ast == Path::new("-") && args.data == Path::new("-") {
        anyhow::bail!("--ast and --data cannot both read stdin");
    }
    let ast: serde_json::Value = read_json(&args.ast).context("read rule AST")?;
    let attributes: rulekit::Attributes = read_json(&args.data).context("read attributes")?;

    let result = rulekit::evaluate_json(&ast, &attributes);
    print_json(&serde_json::json!({ "result": result }))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let mut buf = String::new();
    if path == Path::new("-") {
        io::stdin()
            .read_to_string(&mut buf)
            .context("read stdin")?;
    } else {
        File::open(path)
            .and_then(|f| BufReader::new(f).read_to_string(&mut buf))
            .with_context(|| format!("read '{}'", path.display()))?;
    }
    rulekit::from_json_str(&buf).with_context(|| format!("parse JSON '{}'", path.display()))
}
