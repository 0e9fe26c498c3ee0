// src/common/error.rs

use serde::Deserialize;
use thiserror::Error;

// Corpo de erro que o backend costuma devolver. Alguns endpoints usam
// `error`, outros `message` — aceitamos os dois em vez de sondar o JSON
// na mão em cada chamada.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Resposta não-2xx da API. `message` carrega o texto do backend
    // quando o corpo trouxe um.
    #[error("Erro da API ({status}): {}", .message.as_deref().unwrap_or("sem detalhes"))]
    ApiError {
        status: u16,
        message: Option<String>,
    },

    #[error("Erro de rede: {0}")]
    TransportError(#[from] reqwest::Error),

    // Edição/exclusão sem um id resolvido (entidade ainda não
    // persistida). Carrega o rótulo já com artigo: "do produto".
    #[error("ID {0} não encontrado")]
    MissingId(&'static str),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Texto exibível ao usuário (toast). Preferimos a mensagem que o
    /// backend mandou; sem ela, caímos num texto genérico.
    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(_) => "Um ou mais campos são inválidos.".to_string(),
            AppError::ApiError {
                message: Some(m), ..
            } => m.clone(),
            AppError::ApiError {
                status,
                message: None,
            } => format!("O servidor respondeu com erro ({status})."),
            AppError::TransportError(_) => "Falha de comunicação com o servidor.".to_string(),
            AppError::MissingId(recurso) => format!("ID {recurso} não encontrado."),
            AppError::InternalError(_) => "Ocorreu um erro inesperado.".to_string(),
        }
    }
}
