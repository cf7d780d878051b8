mod add;
mod config;
mod delete;
mod move_item;
mod neighbor;
mod playlist;
mod watch;

pub use add::AddCommand;
pub use config::ConfigCommand;
pub use delete::DeleteCommand;
pub use move_item::MoveCommand;
pub use neighbor::NeighborCommand;
pub use playlist::PlaylistCommand;
pub use watch::WatchCommand;

use crate::cli::Commands;
use crate::config::ClientConfig;
use crate::core::models::Direction;
use crate::modules::remote::client::RemoteClient;
use crate::modules::remote::ureq_transport::UreqTransport;
use anyhow::Result;
use std::sync::Arc;

/// Every CLI command implements this trait.
///
/// Commands own their arguments and are consumed on execution.
pub trait CliCommand {
    fn execute(self: Box<Self>) -> Result<()>;
}

/// Converts a parsed [`Commands`] variant into a boxed [`CliCommand`] ready to execute.
pub fn from_cli(cmd: Commands, config: ClientConfig) -> Box<dyn CliCommand> {
    match cmd {
        Commands::Playlist => Box::new(PlaylistCommand { config }),
        Commands::Watch => Box::new(WatchCommand { config }),
        Commands::Add { path, play } => Box::new(AddCommand { config, path, play }),
        Commands::Delete { id } => Box::new(DeleteCommand { config, id }),
        Commands::Move { id, before } => Box::new(MoveCommand { config, id, before }),
        Commands::Next { id } => Box::new(NeighborCommand {
            config,
            direction: Direction::Next,
            id,
        }),
        Commands::Prev { id } => Box::new(NeighborCommand {
            config,
            direction: Direction::Prev,
            id,
        }),
        Commands::Config => Box::new(ConfigCommand { config }),
    }
}

fn transport(config: &ClientConfig) -> Arc<UreqTransport> {
    Arc::new(UreqTransport::new(&config.server_url, config.request_timeout()))
}

fn remote_client(config: &ClientConfig) -> RemoteClient {
    RemoteClient::new(transport(config))
}
