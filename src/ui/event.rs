// src/ui/event.rs

use std::time::Duration;

use crossterm::event::{Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc::UnboundedSender;

use crate::cache::QueryKey;
use crate::common::error::AppError;
use crate::models::cardapio::{Cardapio, CardapioAtual};
use crate::models::categoria::Categoria;
use crate::models::produto::Produto;

/// Respostas das tarefas de rede. Tudo chega ao loop da UI por aqui —
/// nenhuma tarefa mexe no estado da aplicação diretamente.
#[derive(Debug)]
pub enum AppMsg {
    ProdutosCarregados(Result<Vec<Produto>, AppError>),
    CategoriasCarregadas(Result<Vec<Categoria>, AppError>),
    CardapiosCarregados(Result<Vec<Cardapio>, AppError>),
    CardapioAtualCarregado(Result<CardapioAtual, AppError>),
    MutacaoConcluida {
        invalidar: Vec<QueryKey>,
        sucesso: String,
        falha: String,
        resultado: Result<(), AppError>,
    },
}

#[derive(Debug)]
pub enum AppEvent {
    Tecla(KeyEvent),
    Msg(AppMsg),
    Tick,
}

/// Leitor de teclado num thread dedicado: `crossterm::event::read` é
/// bloqueante, então ele não pode morar no runtime.
pub fn spawn_input_thread(tx: UnboundedSender<AppEvent>) {
    std::thread::spawn(move || {
        loop {
            match crossterm::event::read() {
                Ok(Event::Key(tecla)) if tecla.kind == KeyEventKind::Press => {
                    if tx.send(AppEvent::Tecla(tecla)).is_err() {
                        break;
                    }
                }
                Ok(Event::Resize(..)) => {
                    let _ = tx.send(AppEvent::Tick);
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("Erro ao ler eventos do terminal: {e}");
                    break;
                }
            }
        }
    });
}

/// Tick periódico para expirar toasts e redesenhar spinners.
pub fn spawn_tick(tx: UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut intervalo = tokio::time::interval(Duration::from_millis(250));
        loop {
            intervalo.tick().await;
            if tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });
}
