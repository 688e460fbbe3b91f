use clap::{Parser, Subcommand};
use gyre::heading::HeadingSample;
use gyre::protocol::{Command, SOCKET_PATH, Screen};
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "gyre", version, about = "Feed headings and commands to a running dials face", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control socket of the running app
    #[arg(short, long, default_value = SOCKET_PATH)]
    socket: String,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Report a single compass heading in degrees.
    Heading {
        #[arg(allow_negative_numbers = true)]
        degrees: f64,
    },
    /// Report that the heading sensor is unavailable.
    Lost,
    /// Switch to the given screen (clock or compass).
    Screen { name: Screen },
    /// Toggle the compass bottom sheet.
    Sheet,
    /// Stream a steady sweep of headings.
    Sweep {
        /// First heading
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        start: f64,
        /// Degrees added per sample; negative turns counter-clockwise
        #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
        step: f64,
        /// Delay between samples
        #[arg(long, default_value_t = 100)]
        interval_ms: u64,
        /// Number of samples to send
        #[arg(long, default_value_t = 144)]
        count: u32,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Heading { degrees } => {
            send_commands(&cli.socket, [Command::Heading(HeadingSample::new(degrees))], None)
        }
        Commands::Lost => send_commands(&cli.socket, [Command::Lost], None),
        Commands::Screen { name } => send_commands(&cli.socket, [Command::Screen(name)], None),
        Commands::Sheet => send_commands(&cli.socket, [Command::ToggleSheet], None),
        Commands::Sweep {
            start,
            step,
            interval_ms,
            count,
        } => {
            // wrapped on purpose; the app unwraps
            let samples = (0..count).map(move |i| {
                let degrees = (start + step * i as f64).rem_euclid(360.0);
                Command::Heading(HeadingSample::new(degrees))
            });
            send_commands(&cli.socket, samples, Some(Duration::from_millis(interval_ms)))
        }
    }
}

fn send_commands(
    socket: &str,
    commands: impl IntoIterator<Item = Command>,
    interval: Option<Duration>,
) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(socket).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to dials at {}: {}. Is dials running?",
            socket,
            e
        )
    })?;

    for (i, command) in commands.into_iter().enumerate() {
        if let (Some(interval), true) = (interval, i > 0) {
            thread::sleep(interval);
        }
        log::debug!("-> {command}");
        writeln!(stream, "{command}")?;
    }
    Ok(())
}
