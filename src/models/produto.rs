// src/models/produto.rs

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// --- Imagem ---
// No fio a imagem é uma string só, com dois significados sobrepostos:
// uma URL ou um data URI (`data:<mime>;base64,<payload>`). Aqui os dois
// casos viram variantes explícitas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imagem {
    Url(String),
    DadosInline { media_type: String, dados: Vec<u8> },
}

impl Imagem {
    /// Interpreta a forma textual do fio. Strings `data:` malformadas são
    /// erro; qualquer outra string é tratada como URL (o backend não
    /// valida esse campo nas respostas).
    pub fn parse(texto: &str) -> Result<Self, String> {
        let Some(resto) = texto.strip_prefix("data:") else {
            return Ok(Imagem::Url(texto.to_string()));
        };

        let (cabecalho, payload) = resto
            .split_once(',')
            .ok_or_else(|| "data URI sem separador ','".to_string())?;
        let media_type = cabecalho
            .strip_suffix(";base64")
            .ok_or_else(|| "data URI sem marcador ';base64'".to_string())?;
        let media_type = if media_type.is_empty() {
            "application/octet-stream".to_string()
        } else {
            media_type.to_string()
        };
        let dados = BASE64
            .decode(payload)
            .map_err(|e| format!("payload base64 inválido: {e}"))?;

        Ok(Imagem::DadosInline { media_type, dados })
    }

    /// Forma textual enviada/recebida pela API.
    pub fn to_wire(&self) -> String {
        match self {
            Imagem::Url(url) => url.clone(),
            Imagem::DadosInline { media_type, dados } => {
                format!("data:{media_type};base64,{}", BASE64.encode(dados))
            }
        }
    }

    /// Rótulo curto para a coluna da tabela.
    pub fn rotulo(&self) -> &'static str {
        match self {
            Imagem::Url(_) => "URL",
            Imagem::DadosInline { .. } => "inline",
        }
    }
}

impl Serialize for Imagem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for Imagem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let texto = String::deserialize(deserializer)?;
        Imagem::parse(&texto).map_err(D::Error::custom)
    }
}

// O front antigo mandava `""` quando o produto não tinha imagem.
fn imagem_opcional<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Imagem>, D::Error> {
    let texto: Option<String> = Option::deserialize(deserializer)?;
    match texto.as_deref() {
        None | Some("") => Ok(None),
        Some(t) => Imagem::parse(t).map(Some).map_err(D::Error::custom),
    }
}

// --- Produto ---
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Produto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nome: String,
    pub preco: Decimal,
    pub descricao: String,
    #[serde(
        default,
        deserialize_with = "imagem_opcional",
        skip_serializing_if = "Option::is_none"
    )]
    pub imagem: Option<Imagem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoria_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criado_em: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atualizado_em: Option<DateTime<Utc>>,
}

// Payload de criação.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NovoProduto {
    pub nome: String,
    pub preco: Decimal,
    pub descricao: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagem: Option<Imagem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria_id: Option<i64>,
}

// Payload de atualização parcial: só os campos presentes são enviados.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AtualizaProduto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preco: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagem: Option<Imagem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria_id: Option<i64>,
}

impl From<NovoProduto> for AtualizaProduto {
    fn from(novo: NovoProduto) -> Self {
        AtualizaProduto {
            nome: Some(novo.nome),
            preco: Some(novo.preco),
            descricao: Some(novo.descricao),
            imagem: novo.imagem,
            categoria_id: novo.categoria_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imagem_url_vai_e_volta() {
        let imagem = Imagem::parse("https://cdn.exemplo.com/suco.png").unwrap();
        assert_eq!(
            imagem,
            Imagem::Url("https://cdn.exemplo.com/suco.png".to_string())
        );
        assert_eq!(imagem.to_wire(), "https://cdn.exemplo.com/suco.png");
        assert_eq!(imagem.rotulo(), "URL");
    }

    #[test]
    fn imagem_inline_vai_e_volta() {
        let fio = format!("data:image/png;base64,{}", BASE64.encode(b"abc"));
        let imagem = Imagem::parse(&fio).unwrap();
        match &imagem {
            Imagem::DadosInline { media_type, dados } => {
                assert_eq!(media_type, "image/png");
                assert_eq!(dados, b"abc");
            }
            outro => panic!("esperava DadosInline, veio {outro:?}"),
        }
        assert_eq!(imagem.to_wire(), fio);
        assert_eq!(imagem.rotulo(), "inline");
    }

    #[test]
    fn data_uri_malformado_e_erro() {
        assert!(Imagem::parse("data:image/png;base64").is_err());
        assert!(Imagem::parse("data:image/png;base64,@@@").is_err());
        assert!(Imagem::parse("data:;base64,").is_ok()); // mime vazio vira octet-stream
    }

    #[test]
    fn desserializa_produto_do_backend() {
        let json = r#"{
            "id": 7,
            "nome": "Suco de Laranja",
            "preco": 9.5,
            "descricao": "300ml, sem açúcar",
            "imagem": "https://cdn.exemplo.com/suco.png",
            "categoriaId": 2,
            "criadoEm": "2025-01-10T12:00:00Z",
            "atualizadoEm": "2025-01-11T08:30:00Z"
        }"#;
        let produto: Produto = serde_json::from_str(json).unwrap();
        assert_eq!(produto.id, Some(7));
        assert_eq!(produto.preco, Decimal::new(95, 1));
        assert_eq!(produto.categoria_id, Some(2));
        assert!(matches!(produto.imagem, Some(Imagem::Url(_))));
    }

    #[test]
    fn imagem_vazia_vira_none() {
        let json = r#"{"nome":"Pão","preco":1.5,"descricao":"francês","imagem":""}"#;
        let produto: Produto = serde_json::from_str(json).unwrap();
        assert_eq!(produto.imagem, None);
    }

    #[test]
    fn payload_parcial_omite_campos_ausentes() {
        let payload = AtualizaProduto {
            preco: Some(Decimal::new(1250, 2)),
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({ "preco": 12.5 }));
    }

    #[test]
    fn payload_de_criacao_usa_camel_case() {
        let payload = NovoProduto {
            nome: "Suco".to_string(),
            preco: Decimal::new(990, 2),
            descricao: "natural".to_string(),
            imagem: None,
            categoria_id: Some(2),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "nome": "Suco",
                "preco": 9.9,
                "descricao": "natural",
                "categoriaId": 2
            })
        );
    }
}
