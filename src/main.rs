// src/main.rs

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

mod app;
mod config;
mod core;
mod error;
mod input;
mod logging;
mod ui;

use crate::app::App;
use crate::config::Settings;
use crate::core::models::{FormData, PredictionResult};
use crate::core::predictor::PredictionClient;
use crate::core::storage::{FileStore, FormStore, MemoryStore};
use crate::error::PredictError;

type Outcome = Result<PredictionResult, PredictError>;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::initialize_logging()?;

    let settings = Settings::load()?;
    let client = PredictionClient::new(&settings)?;
    let store = open_store();

    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut app = App::new(store);
    let (tx, mut rx) = mpsc::channel::<Outcome>(1);
    info!(url = %client.url(), "Client started.");

    let result = run(&mut terminal, &mut app, &client, &tx, &mut rx).await;

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn open_store() -> Box<dyn FormStore> {
    match FileStore::open(logging::get_data_dir()) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "Data directory unavailable, form will not survive restarts.");
            Box::new(MemoryStore::default())
        }
    }
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    client: &PredictionClient,
    tx: &mpsc::Sender<Outcome>,
    rx: &mut mpsc::Receiver<Outcome>,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            handle_events(app, client, tx)?;
        }

        if let Ok(outcome) = rx.try_recv() {
            app.on_prediction(outcome);
        }

        app.on_tick();
    }
    Ok(())
}

/// Reads one terminal event and applies it, starting a request when the key
/// submitted the form.
fn handle_events(app: &mut App, client: &PredictionClient, tx: &mpsc::Sender<Outcome>) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if let Some(data) = input::handle_key(app, key) {
            submit(data, client, tx);
        }
    }
    Ok(())
}

/// Sends the form snapshot to the prediction service in the background.
fn submit(data: FormData, client: &PredictionClient, tx: &mpsc::Sender<Outcome>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = client.predict(&data).await;
        let _ = tx.send(outcome).await;
    });
}
