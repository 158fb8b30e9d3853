use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use writecoach::analysis::{self, TextType};
use writecoach::cli::output::{self, OutputFormat};
use writecoach::{cli, dict, Config, GrammarChecker};

#[derive(Parser, Debug)]
#[command(name = "writecoach")]
#[command(
    version,
    about = "Grammar, spelling and style checker for student writing",
    long_about = None
)]
struct Cli {
    /// Files or directories to check
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Apply the first suggestion of every problem in place
    #[arg(short, long)]
    fix: bool,

    /// Interactive mode for selecting corrections
    #[arg(short, long, requires = "fix")]
    interactive: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if problems are found
    #[arg(long)]
    no_fail: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Add words to personal dictionary
    #[arg(long)]
    add_to_dict: Vec<String>,

    /// Pattern to ignore (regex)
    #[arg(long)]
    ignore_pattern: Vec<String>,

    /// Personal dictionary file
    #[arg(long, env = "WRITECOACH_PERSONAL_DICT")]
    personal_dict: Option<PathBuf>,

    /// Report every match of every rule
    #[arg(long)]
    exhaustive: bool,

    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Vocabulary and sentence feedback for one piece of writing
    Feedback {
        /// File to analyze
        file: PathBuf,

        /// Kind of writing (narrative, persuasive, expository, recount)
        #[arg(short, long, default_value = "narrative")]
        text_type: TextType,
    },
    /// Personal dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DictCommands {
    /// Add words to the personal dictionary
    Add {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// List words in the personal dictionary
    List,
    /// Print the personal dictionary path
    Path,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "writecoach=info",
        2 => "writecoach=debug",
        _ => "writecoach=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "writecoach", &mut io::stdout());
        return Ok(());
    }

    if cli.no_color {
        colored::control::set_override(false);
    }
    let colored = !cli.no_color;

    let config = Config::load(
        cli.personal_dict.clone(),
        cli.ignore_pattern.clone(),
        cli.exhaustive,
    )?;

    if let Some(command) = cli.command {
        return handle_command(command, &config, colored, cli.format);
    }

    if !cli.add_to_dict.is_empty() {
        let path = personal_dict_path(&config)?;
        let added = dict::manager::add_words(&path, &cli.add_to_dict)?;
        println!("Added {} word(s) to {}", added, path.display());
        if cli.files.is_empty() {
            return Ok(());
        }
    }

    if cli.files.is_empty() {
        anyhow::bail!("No files specified. Use --help for usage information.");
    }

    let checker = GrammarChecker::from_config(&config)?;
    let files = cli::collect_files(&cli.files);
    tracing::info!(files = files.len(), "checking");

    let mut total_errors = 0;
    let mut total_fixed = 0;

    if cli.fix && cli.interactive {
        let mut words_to_add = Vec::new();
        for file_path in &files {
            let (result, words) = cli::fix_file_interactive(&checker, file_path, colored)?;
            total_fixed += result.fixed_count;
            words_to_add.extend(words);
        }
        if !words_to_add.is_empty() {
            dict::manager::add_words(&personal_dict_path(&config)?, &words_to_add)?;
        }
    } else if cli.fix {
        let results: Vec<_> = files
            .par_iter()
            .map(|file_path| (file_path, cli::fix_file(&checker, file_path)))
            .collect();

        for (file_path, result) in results {
            match result {
                Ok(result) => {
                    total_fixed += result.fixed_count;
                    total_errors += result.error_count;
                }
                Err(e) => eprintln!("Error: {} ({:#})", file_path.display(), e),
            }
        }
    } else {
        let results: Vec<_> = files
            .par_iter()
            .map(|file_path| (file_path, cli::check_file(&checker, file_path)))
            .collect();

        for (file_path, result) in results {
            match result {
                Ok((text, result)) => {
                    output::print_diagnostics(file_path, &text, &result, colored, cli.format)?;
                    total_errors += result.error_count;
                }
                Err(e) => eprintln!("Error: {:#}", e),
            }
        }
    }

    if cli.format == OutputFormat::Text {
        if cli.fix {
            output::print_fix_summary(total_fixed, files.len(), colored);
        } else {
            output::print_check_summary(total_errors, files.len(), colored);
        }
    }

    // Exit with appropriate code
    if total_errors > 0 && !cli.no_fail && !cli.fix {
        std::process::exit(1);
    }

    Ok(())
}

fn personal_dict_path(config: &Config) -> Result<PathBuf> {
    config
        .personal_dictionary
        .clone()
        .context("No personal dictionary location; pass --personal-dict")
}

fn handle_command(
    command: Commands,
    config: &Config,
    colored: bool,
    format: OutputFormat,
) -> Result<()> {
    match command {
        Commands::Feedback { file, text_type } => {
            let checker = GrammarChecker::from_config(config)?;
            let text = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read file: {}", file.display()))?;
            let report = analysis::analyze(&checker, &text, text_type);
            output::print_feedback(&report, colored, format)?;
        }
        Commands::Dict { action } => {
            let path = personal_dict_path(config)?;
            match action {
                DictCommands::Add { words } => {
                    let added = dict::manager::add_words(&path, &words)?;
                    println!("Added {} word(s) to {}", added, path.display());
                }
                DictCommands::List => {
                    dict::manager::list_words(&path)?;
                }
                DictCommands::Path => {
                    println!("{}", path.display());
                }
            }
        }
    }
    Ok(())
}
