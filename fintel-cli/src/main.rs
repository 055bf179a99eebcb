use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use fintel_agent::{AgentConfig, AnalysisContext, InsightCards, local_reply, remote};
use fintel_core::Totals;
use fintel_core::metrics::{expense_ratio, net_balance, savings_rate};

mod chat;
mod state;

#[derive(Parser, Debug)]
#[command(name = "fintel", version, about = "Rule-based personal-finance assistant")]
struct Cli {
    /// Raise the default log level to debug
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive chat over your transaction data
    Chat {
        #[command(flatten)]
        data: DataArgs,

        /// Config file (default: ~/.fintel/config.json)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Ask one question and print the reply
    Ask {
        /// The question to answer
        question: String,

        #[command(flatten)]
        data: DataArgs,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print category, method, and day breakdowns plus metrics
    Analyze {
        #[command(flatten)]
        data: DataArgs,

        /// Max categories to print
        #[arg(long, default_value_t = 10)]
        limit: usize,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Where the transactions and totals come from.
///
/// A JSON snapshot carries both; a ledger CSV carries transactions only,
/// so the totals come from the flags (they are trusted inputs either way
/// and are never recomputed from the list).
#[derive(Args, Debug, Clone)]
struct DataArgs {
    /// JSON snapshot with transactions and totals
    #[arg(long)]
    data: Option<PathBuf>,

    /// Ledger CSV (date,description,amount); totals come from flags
    #[arg(long, conflicts_with = "data")]
    csv: Option<PathBuf>,

    #[arg(long, default_value_t = 0.0)]
    total_income: f64,
    #[arg(long, default_value_t = 0.0)]
    total_expense: f64,
    #[arg(long, default_value_t = 0.0)]
    cash_income: f64,
    #[arg(long, default_value_t = 0.0)]
    cash_expense: f64,
    #[arg(long, default_value_t = 0.0)]
    online_income: f64,
    #[arg(long, default_value_t = 0.0)]
    online_expense: f64,
}

impl DataArgs {
    fn flag_totals(&self) -> Totals {
        Totals {
            total_income: self.total_income,
            total_expense: self.total_expense,
            cash_income: self.cash_income,
            cash_expense: self.cash_expense,
            online_income: self.online_income,
            online_expense: self.online_expense,
        }
    }

    fn load_context(&self, config: &AgentConfig) -> Result<AnalysisContext> {
        let table = config.keyword_table();
        if let Some(path) = &self.data {
            let snapshot = fintel_ingest::load_snapshot(path)?;
            return Ok(AnalysisContext::build(
                &table,
                &snapshot.transactions,
                snapshot.totals,
            ));
        }
        if let Some(path) = &self.csv {
            let txns = fintel_ingest::parse_ledger_csv(path)?;
            return Ok(AnalysisContext::build(&table, &txns, self.flag_totals()));
        }
        bail!("no data source: pass --data <snapshot.json> or --csv <ledger.csv>");
    }

    /// Like load_context, but an absent source yields an empty session
    /// (the chat screen still works, just with nothing to analyze).
    fn load_context_or_empty(&self, config: &AgentConfig) -> Result<AnalysisContext> {
        if self.data.is_none() && self.csv.is_none() {
            return Ok(AnalysisContext::build(
                &config.keyword_table(),
                &[],
                self.flag_totals(),
            ));
        }
        self.load_context(config)
    }
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config (api_key redacted)
    Show,
    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    });

    match cli.command {
        Command::Chat { data, config } => {
            let config = load_config(config)?;
            let ctx = data.load_context_or_empty(&config)?;
            chat::run_chat(&config, &ctx, &state::history_path()?)?;
        }

        Command::Ask {
            question,
            data,
            config,
        } => {
            let config = load_config(config)?;
            let ctx = data.load_context(&config)?;
            let reply = answer(&config, &question, &ctx).await;
            println!("{reply}");
        }

        Command::Analyze {
            data,
            limit,
            config,
        } => {
            let config = load_config(config)?;
            let ctx = data.load_context(&config)?;
            print_analysis(&ctx, limit);
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                let path = state::config_path()?;
                if path.exists() {
                    println!("Config already exists: {}", path.display());
                } else {
                    AgentConfig::default().save(&path)?;
                    println!("Wrote {}", path.display());
                }
            }
            ConfigCommand::Show => {
                let mut cfg = AgentConfig::load_or_default(state::config_path()?);
                if cfg.openai.api_key.is_some() {
                    cfg.openai.api_key = Some("<redacted>".to_string());
                }
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            }
            ConfigCommand::Path => {
                println!("{}", state::config_path()?.display());
            }
        },
    }

    Ok(())
}

fn load_config(explicit: Option<PathBuf>) -> Result<AgentConfig> {
    let path = match explicit {
        Some(p) => p,
        None => state::config_path()?,
    };
    Ok(AgentConfig::load_or_default(path))
}

/// Answer a question: remote when configured, with an explicit fallback
/// to the local template on any remote failure.
async fn answer(config: &AgentConfig, question: &str, ctx: &AnalysisContext) -> String {
    if config.remote_enabled() {
        match remote::complete(config, question, ctx).await {
            Ok(reply) => return reply,
            Err(e) => warn!("remote completion failed, using local analysis: {e:#}"),
        }
    }
    local_reply(question, ctx)
}

fn fmt_opt_pct(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.1}%"),
        None => "n/a".to_string(),
    }
}

fn print_analysis(ctx: &AnalysisContext, limit: usize) {
    println!(
        "Analyzed {} transactions across {} categories\n",
        ctx.transaction_count,
        ctx.analysis.len()
    );

    println!("## Categories\n");
    for bucket in ctx.analysis.sorted_by_total().into_iter().take(limit) {
        println!(
            "- {} | count={} | total=${:.2}",
            bucket.category, bucket.count, bucket.total
        );
    }

    println!("\n## Payment methods\n");
    println!("- cash   ${:.2}", ctx.patterns.by_method.cash);
    println!("- online ${:.2}", ctx.patterns.by_method.online);

    println!("\n## By day\n");
    for (day, total) in &ctx.patterns.by_day {
        println!("- {day} ${total:.2}");
    }

    println!("\n## Metrics\n");
    println!("- net balance:   ${:.2}", net_balance(&ctx.totals));
    println!("- savings rate:  {}", fmt_opt_pct(savings_rate(&ctx.totals)));
    println!("- expense ratio: {}", fmt_opt_pct(expense_ratio(&ctx.totals)));

    let cards = InsightCards::build(ctx);
    println!("\n## Insights\n");
    println!("- trend:          {}", cards.spending_trend);
    println!("- top category:   {}", cards.top_category);
    println!("- budget health:  {}", cards.budget_health);
    println!("- recommendation: {}", cards.recommendation);
}

fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("fintel={level},fintel_agent={level},fintel_cli={level}")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
