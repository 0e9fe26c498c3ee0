// src/services/cardapio_service.rs

use crate::{
    api::ApiClient,
    common::error::AppError,
    models::cardapio::{Cardapio, CardapioAtual, NovoCardapio},
};

#[derive(Clone)]
pub struct CardapioService {
    api: ApiClient,
}

impl CardapioService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Cardapio>, AppError> {
        self.api
            .get("cardapio")
            .await
            .inspect_err(|e| tracing::error!("Erro ao buscar itens do cardápio: {e}"))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Cardapio, AppError> {
        self.api
            .get(&format!("cardapio/{id}"))
            .await
            .inspect_err(|e| tracing::error!("Erro ao buscar item do cardápio {id}: {e}"))
    }

    pub async fn create(&self, payload: &NovoCardapio) -> Result<Cardapio, AppError> {
        self.api
            .post("cardapio", payload)
            .await
            .inspect_err(|e| tracing::error!("Erro ao criar item do cardápio: {e}"))
    }

    pub async fn update(&self, id: i64, payload: &NovoCardapio) -> Result<Cardapio, AppError> {
        self.api
            .put(&format!("cardapio/{id}"), payload)
            .await
            .inspect_err(|e| tracing::error!("Erro ao atualizar item do cardápio {id}: {e}"))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.api
            .delete(&format!("cardapio/{id}"))
            .await
            .inspect_err(|e| tracing::error!("Erro ao deletar item do cardápio {id}: {e}"))
    }

    // O endpoint do cardápio vigente mora em outro recurso do backend.
    pub async fn get_current(&self) -> Result<CardapioAtual, AppError> {
        self.api
            .get("cardapio-atual/cardapio-atual")
            .await
            .inspect_err(|e| tracing::error!("Erro ao buscar o cardápio atual: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cardapio::Turno;
    use std::time::Duration;
    use url::Url;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn servico(server: &MockServer) -> CardapioService {
        let base = Url::parse(&format!("{}/", server.uri())).unwrap();
        CardapioService::new(ApiClient::new(base, Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn cria_cardapio_com_turno_e_produtos() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cardapio"))
            .and(body_json(serde_json::json!({
                "turno": "DIURNO",
                "produtoIds": [1, 2, 3]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 4,
                "turno": "DIURNO",
                "produtos": [ { "id": 1 }, { "id": 2 }, { "id": 3 } ]
            })))
            .mount(&server)
            .await;

        let criado = servico(&server)
            .await
            .create(&NovoCardapio {
                turno: Turno::Diurno,
                produto_ids: vec![1, 2, 3],
            })
            .await
            .unwrap();
        assert_eq!(criado.id, Some(4));
        assert_eq!(criado.produto_ids(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn busca_o_cardapio_atual_no_endpoint_dedicado() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cardapio-atual/cardapio-atual"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 4,
                "turno": "NOTURNO",
                "atualizadoEm": "2025-01-11T22:00:00Z",
                "produtos": [
                    { "produto": { "nome": "Suco", "preco": 9.5, "categoria": { "id": 1, "nome": "Bebidas" } } }
                ]
            })))
            .mount(&server)
            .await;

        let atual = servico(&server).await.get_current().await.unwrap();
        assert_eq!(atual.turno, Turno::Noturno);
        let grupos = atual.por_categoria();
        assert_eq!(grupos[0].0, "Bebidas");
    }

    #[tokio::test]
    async fn erro_de_rede_vira_transport_error() {
        // porta sem ninguém escutando
        let base = Url::parse("http://127.0.0.1:9/").unwrap();
        let servico = CardapioService::new(ApiClient::new(base, Duration::from_millis(300)).unwrap());
        let erro = servico.get_all().await.unwrap_err();
        assert!(matches!(erro, AppError::TransportError(_)));
    }
}
