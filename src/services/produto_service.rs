// src/services/produto_service.rs

use crate::{
    api::ApiClient,
    common::error::AppError,
    models::produto::{AtualizaProduto, NovoProduto, Produto},
};

#[derive(Clone)]
pub struct ProdutoService {
    api: ApiClient,
}

impl ProdutoService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Produto>, AppError> {
        self.api
            .get("produtos")
            .await
            .inspect_err(|e| tracing::error!("Erro ao buscar produtos: {e}"))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Produto, AppError> {
        self.api
            .get(&format!("produtos/{id}"))
            .await
            .inspect_err(|e| tracing::error!("Erro ao buscar produto {id}: {e}"))
    }

    pub async fn create(&self, payload: &NovoProduto) -> Result<Produto, AppError> {
        self.api
            .post("produtos", payload)
            .await
            .inspect_err(|e| tracing::error!("Erro ao criar produto: {e}"))
    }

    // Atualização parcial: campos ausentes ficam como estão no backend.
    pub async fn update(&self, id: i64, payload: &AtualizaProduto) -> Result<Produto, AppError> {
        self.api
            .put(&format!("produtos/{id}"), payload)
            .await
            .inspect_err(|e| tracing::error!("Erro ao atualizar produto {id}: {e}"))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.api
            .delete(&format!("produtos/{id}"))
            .await
            .inspect_err(|e| tracing::error!("Erro ao deletar produto {id}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::time::Duration;
    use url::Url;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn servico(server: &MockServer) -> ProdutoService {
        let base = Url::parse(&format!("{}/", server.uri())).unwrap();
        ProdutoService::new(ApiClient::new(base, Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn lista_produtos_com_campos_do_fio() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/produtos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "id": 7,
                "nome": "Suco",
                "preco": 9.5,
                "descricao": "natural",
                "categoriaId": 2,
                "criadoEm": "2025-01-10T12:00:00Z"
            }])))
            .mount(&server)
            .await;

        let produtos = servico(&server).await.get_all().await.unwrap();
        assert_eq!(produtos.len(), 1);
        assert_eq!(produtos[0].preco, Decimal::new(95, 1));
        assert_eq!(produtos[0].categoria_id, Some(2));
    }

    #[tokio::test]
    async fn cria_produto_valido() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/produtos"))
            .and(body_json(serde_json::json!({
                "nome": "Suco",
                "preco": 9.5,
                "descricao": "natural",
                "categoriaId": 2
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 7,
                "nome": "Suco",
                "preco": 9.5,
                "descricao": "natural",
                "categoriaId": 2
            })))
            .mount(&server)
            .await;

        let criado = servico(&server)
            .await
            .create(&NovoProduto {
                nome: "Suco".to_string(),
                preco: Decimal::new(95, 1),
                descricao: "natural".to_string(),
                imagem: None,
                categoria_id: Some(2),
            })
            .await
            .unwrap();
        assert_eq!(criado.id, Some(7));
    }

    #[tokio::test]
    async fn atualizacao_parcial_envia_so_os_campos_presentes() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/produtos/7"))
            .and(body_json(serde_json::json!({ "preco": 12.5 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 7,
                "nome": "Suco",
                "preco": 12.5,
                "descricao": "natural"
            })))
            .mount(&server)
            .await;

        let atualizado = servico(&server)
            .await
            .update(
                7,
                &AtualizaProduto {
                    preco: Some(Decimal::new(1250, 2)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(atualizado.preco, Decimal::new(1250, 2));
    }

    #[tokio::test]
    async fn excluir_produto_com_sucesso() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/produtos/7"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        servico(&server).await.delete(7).await.unwrap();
    }
}
