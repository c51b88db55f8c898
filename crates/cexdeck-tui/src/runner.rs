//! Main TUI runner - entry point and event loop

use std::sync::Arc;

use cexdeck_api::{Gateway, GatewayClient};
use cexdeck_app::config::Settings;
use cexdeck_app::process::process_message;
use cexdeck_app::{AppState, Message};
use cexdeck_core::prelude::*;
use cexdeck_core::types::Section;
use tokio::sync::mpsc;

use crate::{event, render, terminal};

/// Run the admin console against the gateway named in `settings`.
pub async fn run(settings: Settings) -> Result<()> {
    let gateway = GatewayClient::new(&settings.api.base_url)
        .map_err(|e| Error::config_invalid(format!("gateway client: {}", e)))?;
    info!("cexdeck starting (gateway {})", gateway.base_url());

    terminal::install_panic_hook();
    let mut term = terminal::init().context("Failed to set up terminal")?;

    let mut state = AppState::new(settings);
    let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
    let gateway = Arc::new(gateway);

    // Land on the hub so the templates fetch starts right away
    process_message(&mut state, Message::SelectSection(Section::Home), &msg_tx, &gateway);

    let result = run_loop(&mut term, &mut state, msg_rx, msg_tx, gateway);

    terminal::restore();
    info!("cexdeck exiting");
    result
}

/// Main event loop
fn run_loop<G>(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    msg_tx: mpsc::Sender<Message>,
    gateway: Arc<G>,
) -> Result<()>
where
    G: Gateway + Sync + 'static,
{
    while !state.should_quit() {
        // Completions from gateway tasks
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, &msg_tx, &gateway);
        }

        terminal
            .draw(|frame| render::view(frame, state))
            .context("Failed to draw frame")?;

        if let Some(message) = event::poll().context("Failed to poll terminal events")? {
            process_message(state, message, &msg_tx, &gateway);
        }
    }

    Ok(())
}
