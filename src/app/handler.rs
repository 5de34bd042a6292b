use crate::app::{action::Action, command::Command};
use crate::domain::directory::DirectoryFacade;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs a command on the tokio runtime. Results come back as actions; work
/// whose token was cancelled reports nothing.
pub fn handle_command(command: Command, directory: Arc<dyn DirectoryFacade>, tx: mpsc::Sender<Action>) {
    match command {
        Command::Debounce(ticket) => {
            tokio::spawn(async move {
                if let Some(generation) = ticket.elapsed().await {
                    let _ = tx.send(Action::PaletteQuerySettled(generation)).await;
                }
            });
        }
        Command::SearchDirectory(request) => {
            tokio::spawn(async move {
                let cycle = request.cycle;
                match tokio::spawn(request.run(directory)).await {
                    Ok(Some(results)) => {
                        let _ = tx
                            .send(Action::PaletteRemoteLoaded(cycle, Box::new(results)))
                            .await;
                    }
                    Ok(None) => tracing::debug!(cycle = cycle.0, "search cycle cancelled"),
                    Err(err) => {
                        let _ = tx
                            .send(Action::ErrorOccurred(format!("Search failed: {err}")))
                            .await;
                    }
                }
            });
        }
    }
}
