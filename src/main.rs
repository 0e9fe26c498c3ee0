//src/main.rs

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

// Declaração dos nossos módulos
mod api;
mod cache;
mod common;
mod config;
mod forms;
mod models;
mod services;
mod ui;

use crate::config::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // O terminal pertence à TUI, então o log vai para arquivo.
    let arquivo_de_log = std::fs::File::create("cardapio-admin.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(arquivo_de_log))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()?;

    tracing::info!("🚀 Iniciando a interface");
    let mut terminal = ratatui::init();

    // O leitor de teclado só entra depois do terminal estar em raw mode.
    let (tx, rx) = mpsc::unbounded_channel();
    ui::event::spawn_input_thread(tx.clone());
    ui::event::spawn_tick(tx.clone());

    let resultado = ui::app::run(&mut terminal, app_state, tx, rx).await;
    ratatui::restore();
    resultado
}
