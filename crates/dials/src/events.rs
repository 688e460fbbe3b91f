use gyre::heading::HeadingSample;
use gyre::protocol::{Command, Screen};

#[derive(Debug, Clone)]
pub enum AppEvent {
    Heading(HeadingSample),
    HeadingLost,
    ShowScreen(Screen),
    ToggleSheet,
    ConfigReload,
}

impl From<Command> for AppEvent {
    fn from(command: Command) -> Self {
        match command {
            Command::Heading(sample) => AppEvent::Heading(sample),
            Command::Lost => AppEvent::HeadingLost,
            Command::Screen(screen) => AppEvent::ShowScreen(screen),
            Command::ToggleSheet => AppEvent::ToggleSheet,
        }
    }
}
