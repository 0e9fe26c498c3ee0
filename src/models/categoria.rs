// src/models/categoria.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Categoria {
    // O id só existe depois que o backend persistiu a categoria.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criado_em: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atualizado_em: Option<DateTime<Utc>>,
}

// Payload de criação/atualização. O backend só conhece o nome.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NovaCategoria {
    pub nome: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desserializa_resposta_do_backend() {
        let json = r#"{"id":3,"nome":"Bebidas","criadoEm":"2025-01-10T12:00:00Z"}"#;
        let categoria: Categoria = serde_json::from_str(json).unwrap();
        assert_eq!(categoria.id, Some(3));
        assert_eq!(categoria.nome, "Bebidas");
        assert!(categoria.criado_em.is_some());
        assert!(categoria.atualizado_em.is_none());
    }

    #[test]
    fn payload_de_criacao_so_tem_nome() {
        let payload = NovaCategoria {
            nome: "Bebidas".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({ "nome": "Bebidas" }));
    }
}
