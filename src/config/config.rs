// src/config/config.rs

use std::{env, time::Duration};

use url::Url;

use crate::api::ApiClient;
use crate::services::{CardapioService, CategoriaService, ProdutoService};

const BASE_URL_PADRAO: &str = "http://localhost:3001/";
const TIMEOUT_PADRAO_SEGUNDOS: u64 = 10;

// O estado compartilhado que será acessível em toda a aplicação:
// os serviços, todos em cima do mesmo cliente HTTP.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub categoria_service: CategoriaService,
    pub produto_service: ProdutoService,
    pub cardapio_service: CardapioService,
}

impl AppState {
    /// Carrega as configurações do ambiente e monta o gráfico de
    /// dependências.
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let base_url = env::var("API_BASE_URL").unwrap_or_else(|_| BASE_URL_PADRAO.to_string());
        let timeout = env::var("API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(TIMEOUT_PADRAO_SEGUNDOS);

        let base_url = normalizar_base(&base_url)?;
        let api = ApiClient::new(base_url, Duration::from_secs(timeout))?;

        tracing::info!("✅ Cliente da API configurado para {}", api.base_url());

        Ok(Self {
            categoria_service: CategoriaService::new(api.clone()),
            produto_service: ProdutoService::new(api.clone()),
            cardapio_service: CardapioService::new(api.clone()),
            api,
        })
    }
}

// Os caminhos dos recursos são relativos; sem a barra final o join
// descartaria o último segmento da base.
fn normalizar_base(texto: &str) -> anyhow::Result<Url> {
    let mut url = Url::parse(texto)?;
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }
    Ok(url)
}
