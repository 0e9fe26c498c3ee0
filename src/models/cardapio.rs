// src/models/cardapio.rs

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::categoria::Categoria;

// --- Turno ---
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON: "DIURNO" / "NOTURNO"
pub enum Turno {
    Diurno,
    Noturno,
}

impl Turno {
    pub fn rotulo(&self) -> &'static str {
        match self {
            Turno::Diurno => "Diurno",
            Turno::Noturno => "Noturno",
        }
    }
}

impl fmt::Display for Turno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turno::Diurno => write!(f, "DIURNO"),
            Turno::Noturno => write!(f, "NOTURNO"),
        }
    }
}

// --- Cardápio (composição por turno) ---

// Resumo desnormalizado do produto que o backend devolve junto do
// cardápio, só para exibição.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoResumo {
    pub nome: String,
    #[serde(default)]
    pub descricao: Option<String>,
    pub preco: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardapioProduto {
    // Referência ao produto associado.
    pub id: i64,
    #[serde(default)]
    pub produto: Option<ProdutoResumo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cardapio {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub turno: Turno,
    #[serde(default)]
    pub produtos: Vec<CardapioProduto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criado_em: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atualizado_em: Option<DateTime<Utc>>,
}

impl Cardapio {
    /// Ids dos produtos associados (para pré-seleção no diálogo de edição).
    pub fn produto_ids(&self) -> Vec<i64> {
        self.produtos.iter().map(|p| p.id).collect()
    }
}

// Payload de criação/atualização: o turno e o conjunto completo de
// referências de produto. Na atualização o turno segue o valor original —
// a edição não permite trocá-lo.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NovoCardapio {
    pub turno: Turno,
    pub produto_ids: Vec<i64>,
}

// --- Cardápio atual (projeção somente leitura) ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProdutoAtual {
    pub nome: String,
    #[serde(default)]
    pub descricao: Option<String>,
    pub preco: Decimal,
    #[serde(default)]
    pub categoria: Option<Categoria>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemCardapioAtual {
    pub produto: ProdutoAtual,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardapioAtual {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub turno: Turno,
    #[serde(default)]
    pub produtos: Vec<ItemCardapioAtual>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criado_em: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atualizado_em: Option<DateTime<Utc>>,
}

impl CardapioAtual {
    /// Agrupa os produtos pelo nome da categoria, na ordem em que cada
    /// categoria aparece. Produtos sem categoria caem em "Sem categoria".
    pub fn por_categoria(&self) -> Vec<(String, Vec<&ProdutoAtual>)> {
        let mut grupos: Vec<(String, Vec<&ProdutoAtual>)> = Vec::new();
        for item in &self.produtos {
            let nome = item
                .produto
                .categoria
                .as_ref()
                .map(|c| c.nome.clone())
                .unwrap_or_else(|| "Sem categoria".to_string());
            match grupos.iter_mut().find(|(n, _)| *n == nome) {
                Some((_, produtos)) => produtos.push(&item.produto),
                None => grupos.push((nome, vec![&item.produto])),
            }
        }
        grupos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn produto_atual(nome: &str, categoria: Option<&str>) -> ItemCardapioAtual {
        ItemCardapioAtual {
            produto: ProdutoAtual {
                nome: nome.to_string(),
                descricao: None,
                preco: Decimal::new(1000, 2),
                categoria: categoria.map(|c| Categoria {
                    id: Some(1),
                    nome: c.to_string(),
                    criado_em: None,
                    atualizado_em: None,
                }),
            },
        }
    }

    #[test]
    fn turno_no_fio_e_screaming_snake() {
        assert_eq!(serde_json::to_string(&Turno::Diurno).unwrap(), "\"DIURNO\"");
        let turno: Turno = serde_json::from_str("\"NOTURNO\"").unwrap();
        assert_eq!(turno, Turno::Noturno);
    }

    #[test]
    fn desserializa_cardapio_com_resumos() {
        let json = r#"{
            "id": 1,
            "turno": "DIURNO",
            "produtos": [
                { "id": 7, "produto": { "nome": "Suco", "descricao": "300ml", "preco": 9.9 } },
                { "id": 9 }
            ]
        }"#;
        let cardapio: Cardapio = serde_json::from_str(json).unwrap();
        assert_eq!(cardapio.turno, Turno::Diurno);
        assert_eq!(cardapio.produto_ids(), vec![7, 9]);
        assert!(cardapio.produtos[1].produto.is_none());
    }

    #[test]
    fn payload_de_cardapio_usa_produto_ids() {
        let payload = NovoCardapio {
            turno: Turno::Noturno,
            produto_ids: vec![1, 2],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "turno": "NOTURNO", "produtoIds": [1, 2] })
        );
    }

    #[test]
    fn agrupa_por_categoria_preservando_ordem() {
        let atual = CardapioAtual {
            id: Some(1),
            turno: Turno::Diurno,
            produtos: vec![
                produto_atual("Suco", Some("Bebidas")),
                produto_atual("Pão", None),
                produto_atual("Café", Some("Bebidas")),
                produto_atual("Bolo", Some("Doces")),
            ],
            criado_em: None,
            atualizado_em: None,
        };

        let grupos = atual.por_categoria();
        let nomes: Vec<&str> = grupos.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(nomes, vec!["Bebidas", "Sem categoria", "Doces"]);
        assert_eq!(grupos[0].1.len(), 2);
        assert_eq!(grupos[0].1[1].nome, "Café");
    }
}
