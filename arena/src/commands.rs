pub mod explain;
pub mod play;

use explain::Explain;
use play::Play;

use clap::Subcommand;
use color_eyre::eyre::Result;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Play some games and summarize how the runner did
    Play(Play),
    /// Show the search tree behind a single decision
    Explain(Explain),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Play(p) => p.run()?,
            Command::Explain(e) => e.run()?,
        }

        Ok(())
    }
}
