use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "studyroom", version, about = "Studyroom student organizer CLI")]
struct Cli {
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
    /// Notes attached to subjects
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Subject (class) registry
    Subject {
        #[command(subcommand)]
        action: commands::subject::SubjectAction,
    },
    /// Goal tracking
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Grades and GPA
    Grade {
        #[command(subcommand)]
        action: commands::grade::GradeAction,
    },
    /// Overview: pending tasks, subjects, active goals, GPA
    Dashboard,
    /// Deliver due task reminders
    Remind {
        /// Keep running and sweep on the configured interval
        #[arg(long)]
        watch: bool,
    },
    /// Pomodoro timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Export and import all data
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("STUDYROOM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Note { action } => commands::note::run(action),
        Commands::Subject { action } => commands::subject::run(action),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Grade { action } => commands::grade::run(action),
        Commands::Dashboard => commands::dashboard::run(),
        Commands::Remind { watch } => commands::remind::run(watch),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Data { action } => commands::data::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        commands::report_error(e.as_ref());
        std::process::exit(1);
    }
}
