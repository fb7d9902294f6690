// hanoi-tty: animated Tower of Hanoi solver for the terminal

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use hanoi_tty::config::{Config, PlaybackArgs};
use hanoi_tty::model::Peg;
use hanoi_tty::replay::step_caption;
use hanoi_tty::session::Session;
use hanoi_tty::ui::App;

/// Solve the Tower of Hanoi and watch the solution play out.
#[derive(Parser, Debug)]
#[command(name = "hanoi-tty", author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Write logs to this file (the TUI discards them otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    playback: PlaybackArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Animate the solution in the terminal UI (default).
    Play,

    /// Print the move sequence and a summary.
    Solve,

    /// Replay the animation without a UI, printing each caption as it changes.
    Run,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Play);

    init_tracing(&cli, command == Commands::Play)?;

    let config = Config::from_args(&cli.playback);

    match command {
        Commands::Play => run_tui(config).await,
        Commands::Solve => run_solve(config),
        Commands::Run => run_headless(config).await,
    }
}

fn init_tracing(cli: &Cli, interactive: bool) -> io::Result<()> {
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN // Default to less noise
    };

    let filter = if cli.quiet || cli.verbose {
        EnvFilter::new(level.as_str())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        // Anything written to stderr would tear through the alternate screen
        None if interactive => builder.with_writer(io::sink).init(),
        None => builder.with_writer(io::stderr).init(),
    }

    Ok(())
}

async fn run_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(Session::new(config));
    let res = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_solve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new(config);
    let report = session.solve()?;

    for (i, mv) in session.ledger().iter().enumerate() {
        println!("{}", step_caption(i + 1, *mv));
    }
    println!("Total Moves: {}", report.moves);
    println!("Visualization Time: ~{}ms", report.estimated.as_millis());

    Ok(())
}

async fn run_headless(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new(config);
    let mut frames = tokio::time::interval(session.config().frame_interval());

    session.visualize()?;

    // Captions are sampled once per frame
    let mut last_caption = String::new();
    loop {
        frames.tick().await;
        session.tick();

        if session.caption() != last_caption {
            last_caption = session.caption().to_string();
            println!("{}", last_caption);
        }
        if session.is_settled() {
            break;
        }
    }

    for peg in Peg::ALL {
        println!("peg {}: {:?}", peg, session.visual().disks(peg));
    }

    Ok(())
}
