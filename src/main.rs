//! Insane Talk - Main Binary
//!
//! Text front-end for playing and checking phrase puzzle modules

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use insane_talk::{
    command::HELP_MESSAGE,
    core::{ButtonIndex, Led, BUTTON_COUNT},
    game::{
        ModuleConfig, ModuleHost, ModuleId, ModuleRegistry, OutputFormat, PressOutcome,
        RuleVariant, VerbosityLevel,
    },
    loader::PhraseBook,
    TalkError,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Rule variant selection
#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariantArg {
    /// Ordered subsequence of the rule key's digits
    Subsequence,
    /// Candidate elimination over identifiers sharing a phrase
    Elimination,
}

impl From<VariantArg> for RuleVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Subsequence => RuleVariant::Subsequence,
            VariantArg::Elimination => RuleVariant::Elimination,
        }
    }
}

/// Verbosity level for module output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

#[derive(Parser)]
#[command(name = "insane-talk")]
#[command(about = "Insane Talk - phrase and button puzzle modules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct ModuleArgs {
    /// Phrase asset (.json)
    #[arg(value_name = "ASSET")]
    asset: PathBuf,

    /// Rule variant (defaults to the one implied by the asset shape)
    #[arg(long, value_enum)]
    variant: Option<VariantArg>,

    /// Stages required to solve the module
    #[arg(long, default_value_t = 1)]
    stages: u32,

    /// Set random seed for deterministic rounds
    #[arg(long)]
    seed: Option<u64>,

    /// Verbosity level for module log output (0=silent, 1=minimal, 2=normal, 3=verbose)
    #[arg(long, default_value = "normal", short = 'v')]
    verbosity: VerbosityArg,

    /// Emit log lines as JSON objects
    #[arg(long)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a module interactively via stdin
    Play {
        #[command(flatten)]
        module: ModuleArgs,

        /// Lockout after a strike, in milliseconds
        #[arg(long, default_value_t = 1000)]
        strike_delay_ms: u64,
    },

    /// Solve a module automatically and print the presses made
    Solve {
        #[command(flatten)]
        module: ModuleArgs,
    },

    /// Load a phrase asset and summarize it
    Check {
        /// Phrase asset (.json)
        #[arg(value_name = "ASSET")]
        asset: PathBuf,
    },
}

/// Host that reports module events on stdout
struct ConsoleHost {
    show_leds: bool,
}

impl ModuleHost for ConsoleHost {
    fn display_text(&mut self, text: &str) {
        if !text.is_empty() {
            println!("Display: \"{text}\"");
        }
    }

    fn button_labels(&mut self, labels: [u8; BUTTON_COUNT]) {
        let labels: Vec<String> = labels.iter().map(u8::to_string).collect();
        println!("Buttons (top to bottom): {}", labels.join(" "));
    }

    fn button_led(&mut self, index: ButtonIndex, led: Led) {
        if self.show_leds && led != Led::Off {
            println!("  button {} -> {:?}", index + 1, led);
        }
    }

    fn pass(&mut self) {
        println!("Module solved!");
    }

    fn strike(&mut self) {
        println!("STRIKE!");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            module,
            strike_delay_ms,
        } => run_play(module, Duration::from_millis(strike_delay_ms)).await?,
        Commands::Solve { module } => run_solve(module).await?,
        Commands::Check { asset } => run_check(&asset).await?,
    }

    Ok(())
}

async fn load_book(path: &Path) -> Result<Arc<PhraseBook>> {
    let book = PhraseBook::load_async(path)
        .await
        .with_context(|| format!("failed to load phrase asset {}", path.display()))?;
    Ok(Arc::new(book))
}

fn build_config(args: &ModuleArgs, book: &PhraseBook) -> ModuleConfig {
    let variant = args.variant.map(RuleVariant::from).unwrap_or(book.variant());
    let mut config = ModuleConfig::new(variant)
        .with_max_stages(args.stages)
        .with_verbosity(args.verbosity.0);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config
}

fn register(
    registry: &mut ModuleRegistry,
    args: &ModuleArgs,
    book: Arc<PhraseBook>,
    config: ModuleConfig,
) -> Result<ModuleId> {
    let id = registry.register(book, config);
    if args.json_logs {
        registry
            .get_mut(id)?
            .logger_mut()
            .set_output_format(OutputFormat::Json);
    }
    Ok(id)
}

async fn run_play(args: ModuleArgs, strike_delay: Duration) -> Result<()> {
    let book = load_book(&args.asset).await?;
    let config = build_config(&args, &book).with_strike_delay(strike_delay);
    let mut registry = ModuleRegistry::new();
    let id = register(&mut registry, &args, book, config)?;
    let mut host = ConsoleHost {
        show_leds: args.verbosity.0 >= VerbosityLevel::Verbose,
    };

    println!("{HELP_MESSAGE}");
    println!("Type 'solve' to solve automatically or 'quit' to exit.");
    registry.activate_all(&mut host);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{HELP_MESSAGE}");
                continue;
            }
            "solve" => {
                match registry.get_mut(id)?.force_solve(&mut host) {
                    Some(presses) => println!("Solved with {presses} presses."),
                    None => println!("This round cannot be solved."),
                }
                break;
            }
            _ => {}
        }

        let outcomes = match registry.run_command(id, line, &mut host) {
            Ok(outcomes) => outcomes,
            Err(TalkError::Command(e)) => {
                println!("{e}");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if outcomes.last() == Some(&PressOutcome::Strike) {
            tokio::time::sleep(strike_delay).await;
            registry.tick(strike_delay, &mut host);
        }

        if registry.all_solved() {
            break;
        }
    }

    Ok(())
}

async fn run_solve(args: ModuleArgs) -> Result<()> {
    let book = load_book(&args.asset).await?;
    let config = build_config(&args, &book);
    let mut registry = ModuleRegistry::new();
    let id = register(&mut registry, &args, book, config)?;
    let mut host = ConsoleHost { show_leds: true };

    registry.activate_all(&mut host);
    let presses = registry
        .get_mut(id)?
        .force_solve(&mut host)
        .context("module reached an unsolvable round")?;
    println!("Solved with {presses} presses.");
    Ok(())
}

async fn run_check(asset: &Path) -> Result<()> {
    let book = load_book(asset).await?;
    println!("Asset: {}", asset.display());
    println!("Entries: {}", book.len());
    println!("Distinct phrases: {}", book.distinct_texts());
    println!("Implied variant: {:?}", book.variant());
    Ok(())
}
