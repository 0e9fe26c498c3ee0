// src/api/client.rs

use std::time::Duration;

use anyhow::Context;
use reqwest::Response;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::common::error::{ApiErrorBody, AppError};

/// Cliente HTTP fino sobre a API REST do cardápio. Um único
/// `reqwest::Client` é reutilizado pela vida toda do processo.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// `base_url` precisa terminar em `/` para os joins relativos
    /// funcionarem (quem garante isso é o AppState).
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, caminho: &str) -> Result<Url, AppError> {
        let url = self
            .base_url
            .join(caminho)
            .with_context(|| format!("caminho inválido: {caminho}"))?;
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, caminho: &str) -> Result<T, AppError> {
        let resposta = self.http.get(self.endpoint(caminho)?).send().await?;
        decodificar(resposta).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        caminho: &str,
        corpo: &B,
    ) -> Result<T, AppError> {
        let resposta = self
            .http
            .post(self.endpoint(caminho)?)
            .json(corpo)
            .send()
            .await?;
        decodificar(resposta).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        caminho: &str,
        corpo: &B,
    ) -> Result<T, AppError> {
        let resposta = self
            .http
            .put(self.endpoint(caminho)?)
            .json(corpo)
            .send()
            .await?;
        decodificar(resposta).await
    }

    // DELETE pode voltar sem corpo; só o status importa.
    pub async fn delete(&self, caminho: &str) -> Result<(), AppError> {
        let resposta = self.http.delete(self.endpoint(caminho)?).send().await?;
        let status = resposta.status();
        if status.is_success() {
            return Ok(());
        }
        Err(erro_da_resposta(status.as_u16(), resposta).await)
    }
}

async fn decodificar<T: DeserializeOwned>(resposta: Response) -> Result<T, AppError> {
    let status = resposta.status();
    if status.is_success() {
        return Ok(resposta.json::<T>().await?);
    }
    Err(erro_da_resposta(status.as_u16(), resposta).await)
}

// Tenta extrair a mensagem que o backend colocou no corpo; corpo
// ilegível não esconde o status.
async fn erro_da_resposta(status: u16, resposta: Response) -> AppError {
    let message = resposta
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(ApiErrorBody::into_message);
    AppError::ApiError { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Eco {
        ok: bool,
    }

    async fn cliente(server: &MockServer) -> ApiClient {
        let base = Url::parse(&format!("{}/", server.uri())).unwrap();
        ApiClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn get_decodifica_corpo_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&server)
            .await;

        let api = cliente(&server).await;
        let eco: Eco = api.get("ping").await.unwrap();
        assert_eq!(eco, Eco { ok: true });
    }

    #[tokio::test]
    async fn post_envia_o_corpo_e_propaga_erro_com_mensagem() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/coisas"))
            .and(body_json(serde_json::json!({"nome": "x"})))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(serde_json::json!({"error": "Nome duplicado."})),
            )
            .mount(&server)
            .await;

        let api = cliente(&server).await;
        let erro = api
            .post::<_, Eco>("coisas", &serde_json::json!({"nome": "x"}))
            .await
            .unwrap_err();
        match erro {
            AppError::ApiError { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message.as_deref(), Some("Nome duplicado."));
            }
            outro => panic!("esperava ApiError, veio {outro:?}"),
        }
    }

    #[tokio::test]
    async fn erro_sem_corpo_json_mantem_o_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/coisas/9"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let api = cliente(&server).await;
        let erro = api.delete("coisas/9").await.unwrap_err();
        match erro {
            AppError::ApiError { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, None);
            }
            outro => panic!("esperava ApiError, veio {outro:?}"),
        }
    }

    #[tokio::test]
    async fn delete_com_sucesso_ignora_o_corpo() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/coisas/1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let api = cliente(&server).await;
        api.delete("coisas/1").await.unwrap();
    }
}
