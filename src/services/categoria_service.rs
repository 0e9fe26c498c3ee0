// src/services/categoria_service.rs

use crate::{
    api::ApiClient,
    common::error::AppError,
    models::categoria::{Categoria, NovaCategoria},
};

// Repasse fino para os endpoints de /categorias: nenhuma regra de
// negócio aqui, só log e propagação do erro.
#[derive(Clone)]
pub struct CategoriaService {
    api: ApiClient,
}

impl CategoriaService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Categoria>, AppError> {
        self.api
            .get("categorias")
            .await
            .inspect_err(|e| tracing::error!("Erro ao buscar categorias: {e}"))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Categoria, AppError> {
        self.api
            .get(&format!("categorias/{id}"))
            .await
            .inspect_err(|e| tracing::error!("Erro ao buscar categoria {id}: {e}"))
    }

    pub async fn create(&self, payload: &NovaCategoria) -> Result<Categoria, AppError> {
        self.api
            .post("categorias", payload)
            .await
            .inspect_err(|e| tracing::error!("Erro ao criar categoria: {e}"))
    }

    pub async fn update(&self, id: i64, payload: &NovaCategoria) -> Result<Categoria, AppError> {
        self.api
            .put(&format!("categorias/{id}"), payload)
            .await
            .inspect_err(|e| tracing::error!("Erro ao atualizar categoria {id}: {e}"))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.api
            .delete(&format!("categorias/{id}"))
            .await
            .inspect_err(|e| tracing::error!("Erro ao deletar categoria {id}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use url::Url;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn servico(server: &MockServer) -> CategoriaService {
        let base = Url::parse(&format!("{}/", server.uri())).unwrap();
        CategoriaService::new(ApiClient::new(base, Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn lista_categorias() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categorias"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": 1, "nome": "Bebidas" },
                { "id": 2, "nome": "Doces" }
            ])))
            .mount(&server)
            .await;

        let categorias = servico(&server).await.get_all().await.unwrap();
        assert_eq!(categorias.len(), 2);
        assert_eq!(categorias[0].nome, "Bebidas");
    }

    #[tokio::test]
    async fn cria_categoria_e_recebe_id_do_servidor() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/categorias"))
            .and(body_json(serde_json::json!({ "nome": "Bebidas" })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({ "id": 10, "nome": "Bebidas" })),
            )
            .mount(&server)
            .await;

        let criada = servico(&server)
            .await
            .create(&NovaCategoria {
                nome: "Bebidas".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(criada.id, Some(10));
    }

    #[tokio::test]
    async fn atualiza_categoria_pelo_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/categorias/10"))
            .and(body_json(serde_json::json!({ "nome": "Sucos" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "id": 10, "nome": "Sucos" })),
            )
            .mount(&server)
            .await;

        let atualizada = servico(&server)
            .await
            .update(
                10,
                &NovaCategoria {
                    nome: "Sucos".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(atualizada.nome, "Sucos");
    }

    #[tokio::test]
    async fn excluir_id_inexistente_propaga_o_erro_do_backend() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/categorias/99"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "message": "Categoria não encontrada." })),
            )
            .mount(&server)
            .await;

        let erro = servico(&server).await.delete(99).await.unwrap_err();
        assert_eq!(erro.user_message(), "Categoria não encontrada.");
    }
}
