use crate::cli::Commands;
use anyhow::Result;

pub mod render;
pub mod version;

/// Dispatch command to appropriate handler
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Render(args) => render::execute(args).await,
        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}
