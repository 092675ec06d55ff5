use clap::{CommandFactory, Parser, Subcommand};
use tasktimer_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "tasktimer", version, about = "Tasks with per-task Pomodoro sessions")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Subtask checklists
    Subtask {
        #[command(subcommand)]
        action: commands::subtask::SubtaskAction,
    },
    /// Pomodoro sessions
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Category management
    Category {
        #[command(subcommand)]
        action: commands::category::CategoryAction,
    },
    /// Focus statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Week calendar
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Search tasks
    Search(commands::search::SearchArgs),
    /// Overdue, today, and completed today
    Agenda(commands::agenda::AgendaArgs),
    /// Pomodoro presets
    Preset {
        #[command(subcommand)]
        action: commands::preset::PresetAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Demo data
    Sample {
        #[command(subcommand)]
        action: commands::sample::SampleAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            let level = Config::load_or_default().logging.level;
            EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ctx = Context { json: cli.json };

    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action, &ctx),
        Commands::Subtask { action } => commands::subtask::run(action, &ctx),
        Commands::Session { action } => commands::session::run(action, &ctx),
        Commands::Category { action } => commands::category::run(action, &ctx),
        Commands::Stats { action } => commands::stats::run(action, &ctx),
        Commands::Calendar { action } => commands::calendar::run(action, &ctx),
        Commands::Search(args) => commands::search::run(args, &ctx),
        Commands::Agenda(args) => commands::agenda::run(args, &ctx),
        Commands::Preset { action } => commands::preset::run(action, &ctx),
        Commands::Config { action } => commands::config::run(action, &ctx),
        Commands::Sample { action } => commands::sample::run(action, &ctx),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "tasktimer", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
