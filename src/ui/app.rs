// src/ui/app.rs
//
// O loop da aplicação: uma única tarefa dona de todo o estado. As
// leituras e mutações de rede rodam em tarefas separadas e voltam como
// `AppMsg` pelo canal — ninguém mais toca no cache.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::cache::{QueryCache, QueryKey};
use crate::common::error::AppError;
use crate::config::AppState;
use crate::models::cardapio::Cardapio;
use crate::models::categoria::Categoria;
use crate::models::produto::{AtualizaProduto, Produto};
use crate::ui::dialogo::{Dialogo, DialogoCardapio, DialogoCategoria, DialogoProduto};
use crate::ui::event::{AppEvent, AppMsg};
use crate::ui::render;
use crate::ui::tabela::Tabela;
use crate::ui::toast::Toasts;

const LINHAS_POR_PAGINA: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rota {
    Produtos,
    Categorias,
    Cardapios,
    CardapioAtual,
}

impl Rota {
    pub const TODAS: [Rota; 4] = [
        Rota::Produtos,
        Rota::Categorias,
        Rota::Cardapios,
        Rota::CardapioAtual,
    ];

    pub fn titulo(&self) -> &'static str {
        match self {
            Rota::Produtos => "Produtos",
            Rota::Categorias => "Categorias",
            Rota::Cardapios => "Cardápios",
            Rota::CardapioAtual => "Cardápio Atual",
        }
    }

    pub fn indice(&self) -> usize {
        Self::TODAS.iter().position(|r| r == self).unwrap_or(0)
    }

    fn vizinha(&self, delta: isize) -> Rota {
        let total = Self::TODAS.len() as isize;
        let nova = (self.indice() as isize + delta).rem_euclid(total);
        Self::TODAS[nova as usize]
    }
}

#[derive(Debug, Clone, Copy)]
pub enum AcaoExclusao {
    Produto(i64),
    Categoria(i64),
    Cardapio(i64),
}

#[derive(Debug)]
pub struct Confirmacao {
    pub texto: String,
    pub acao: AcaoExclusao,
}

pub struct App {
    pub state: AppState,
    pub cache: QueryCache,
    pub rota: Rota,
    pub tabela_produtos: Tabela,
    pub tabela_categorias: Tabela,
    pub tabela_cardapios: Tabela,
    pub dialogo: Option<Dialogo>,
    pub confirmacao: Option<Confirmacao>,
    pub toasts: Toasts,
    // Uma mutação por vez: enquanto true, submissões são ignoradas.
    pub mutacao_em_voo: bool,
    pub sair: bool,
    tx: UnboundedSender<AppEvent>,
}

pub async fn run(
    terminal: &mut DefaultTerminal,
    state: AppState,
    tx: UnboundedSender<AppEvent>,
    mut rx: UnboundedReceiver<AppEvent>,
) -> anyhow::Result<()> {
    let mut app = App::new(state, tx);
    while !app.sair {
        app.ensure_loaded();
        terminal.draw(|frame| render::desenhar(frame, &app))?;

        let Some(evento) = rx.recv().await else { break };
        app.handle_event(evento);
        // Drena o que acumulou antes de redesenhar.
        while let Ok(evento) = rx.try_recv() {
            app.handle_event(evento);
        }
    }
    Ok(())
}

impl App {
    pub fn new(state: AppState, tx: UnboundedSender<AppEvent>) -> Self {
        Self {
            state,
            cache: QueryCache::new(),
            rota: Rota::Produtos,
            tabela_produtos: Tabela::new(LINHAS_POR_PAGINA),
            tabela_categorias: Tabela::new(LINHAS_POR_PAGINA),
            tabela_cardapios: Tabela::new(LINHAS_POR_PAGINA),
            dialogo: None,
            confirmacao: None,
            toasts: Toasts::new(),
            mutacao_em_voo: false,
            sair: false,
            tx,
        }
    }

    // --- Leituras ---

    /// Dispara os fetches que a tela (e o diálogo aberto) precisam e
    /// ainda não estão nem frescos nem em voo.
    pub fn ensure_loaded(&mut self) {
        match self.rota {
            Rota::Produtos => {
                self.garantir(QueryKey::Produtos);
                // nomes de categoria na tabela e no seletor do diálogo
                self.garantir(QueryKey::Categorias);
            }
            Rota::Categorias => self.garantir(QueryKey::Categorias),
            Rota::Cardapios => self.garantir(QueryKey::Cardapios),
            Rota::CardapioAtual => self.garantir(QueryKey::CardapioAtual),
        }
        match &self.dialogo {
            Some(Dialogo::Produto(_)) => self.garantir(QueryKey::Categorias),
            Some(Dialogo::Cardapio(_)) => self.garantir(QueryKey::Produtos),
            _ => {}
        }
    }

    fn garantir(&mut self, chave: QueryKey) {
        let disparar = match chave {
            QueryKey::Produtos => self.cache.produtos.begin_fetch(),
            QueryKey::Categorias => self.cache.categorias.begin_fetch(),
            QueryKey::Cardapios => self.cache.cardapios.begin_fetch(),
            QueryKey::CardapioAtual => self.cache.cardapio_atual.begin_fetch(),
        };
        if !disparar {
            return;
        }

        let tx = self.tx.clone();
        match chave {
            QueryKey::Produtos => {
                let servico = self.state.produto_service.clone();
                tokio::spawn(async move {
                    let resultado = servico.get_all().await;
                    let _ = tx.send(AppEvent::Msg(AppMsg::ProdutosCarregados(resultado)));
                });
            }
            QueryKey::Categorias => {
                let servico = self.state.categoria_service.clone();
                tokio::spawn(async move {
                    let resultado = servico.get_all().await;
                    let _ = tx.send(AppEvent::Msg(AppMsg::CategoriasCarregadas(resultado)));
                });
            }
            QueryKey::Cardapios => {
                let servico = self.state.cardapio_service.clone();
                tokio::spawn(async move {
                    let resultado = servico.get_all().await;
                    let _ = tx.send(AppEvent::Msg(AppMsg::CardapiosCarregados(resultado)));
                });
            }
            QueryKey::CardapioAtual => {
                let servico = self.state.cardapio_service.clone();
                tokio::spawn(async move {
                    let resultado = servico.get_current().await;
                    let _ = tx.send(AppEvent::Msg(AppMsg::CardapioAtualCarregado(resultado)));
                });
            }
        }
    }

    pub fn produtos(&self) -> &[Produto] {
        self.cache.produtos.value().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn categorias(&self) -> &[Categoria] {
        self.cache
            .categorias
            .value()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn cardapios(&self) -> &[Cardapio] {
        self.cache
            .cardapios
            .value()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // --- Eventos ---

    pub fn handle_event(&mut self, evento: AppEvent) {
        match evento {
            AppEvent::Tecla(tecla) => self.handle_key(tecla),
            AppEvent::Msg(msg) => self.handle_msg(msg),
            AppEvent::Tick => self.toasts.expirar(),
        }
    }

    fn handle_msg(&mut self, msg: AppMsg) {
        match msg {
            AppMsg::ProdutosCarregados(resultado) => match resultado {
                Ok(valor) => self.cache.produtos.store(valor),
                Err(erro) => self.cache.produtos.fail(erro.user_message()),
            },
            AppMsg::CategoriasCarregadas(resultado) => match resultado {
                Ok(valor) => self.cache.categorias.store(valor),
                Err(erro) => self.cache.categorias.fail(erro.user_message()),
            },
            AppMsg::CardapiosCarregados(resultado) => match resultado {
                Ok(valor) => self.cache.cardapios.store(valor),
                Err(erro) => self.cache.cardapios.fail(erro.user_message()),
            },
            AppMsg::CardapioAtualCarregado(resultado) => match resultado {
                Ok(valor) => self.cache.cardapio_atual.store(valor),
                Err(erro) => self.cache.cardapio_atual.fail(erro.user_message()),
            },
            AppMsg::MutacaoConcluida {
                invalidar,
                sucesso,
                falha,
                resultado,
            } => {
                self.mutacao_em_voo = false;
                self.confirmacao = None;
                match resultado {
                    Ok(()) => {
                        self.toasts.sucesso(sucesso);
                        for chave in invalidar {
                            self.cache.invalidate(chave);
                        }
                        self.dialogo = None;
                    }
                    Err(erro) => {
                        // a mensagem do backend ganha do texto genérico
                        let texto = match &erro {
                            AppError::ApiError {
                                message: Some(m), ..
                            } => m.clone(),
                            _ => falha,
                        };
                        self.toasts.erro(texto);
                    }
                }
            }
        }
    }

    fn handle_key(&mut self, tecla: KeyEvent) {
        if self.dialogo.is_some() {
            self.tecla_no_dialogo(tecla);
            return;
        }
        if self.confirmacao.is_some() {
            self.tecla_na_confirmacao(tecla);
            return;
        }
        if self
            .tabela_da_rota()
            .is_some_and(|t| t.editando_filtro)
        {
            self.tecla_no_filtro(tecla);
            return;
        }
        self.tecla_global(tecla);
    }

    fn tecla_global(&mut self, tecla: KeyEvent) {
        match tecla.code {
            KeyCode::Char('q') | KeyCode::Esc => self.sair = true,
            KeyCode::Tab => self.rota = self.rota.vizinha(1),
            KeyCode::BackTab => self.rota = self.rota.vizinha(-1),
            KeyCode::Char('1') => self.rota = Rota::Produtos,
            KeyCode::Char('2') => self.rota = Rota::Categorias,
            KeyCode::Char('3') => self.rota = Rota::Cardapios,
            KeyCode::Char('4') => self.rota = Rota::CardapioAtual,
            KeyCode::Char('/') => {
                if let Some(tabela) = self.tabela_da_rota_mut() {
                    tabela.editando_filtro = true;
                }
            }
            KeyCode::Char('o') => {
                if let Some(tabela) = self.tabela_da_rota_mut() {
                    tabela.alternar_ordenacao();
                }
            }
            KeyCode::Char('r') => self.atualizar_rota(),
            KeyCode::Char('n') => self.abrir_dialogo_novo(),
            KeyCode::Char('e') => self.editar_selecionado(),
            KeyCode::Char('d') => self.excluir_selecionado(),
            KeyCode::Up => self.mover_selecao(-1),
            KeyCode::Down => self.mover_selecao(1),
            KeyCode::PageUp => self.mover_pagina(-1),
            KeyCode::PageDown => self.mover_pagina(1),
            _ => {}
        }
    }

    fn tecla_no_filtro(&mut self, tecla: KeyEvent) {
        let Some(tabela) = self.tabela_da_rota_mut() else {
            return;
        };
        match tecla.code {
            KeyCode::Esc | KeyCode::Enter => tabela.editando_filtro = false,
            KeyCode::Char(c) => tabela.digitar_filtro(c),
            KeyCode::Backspace => tabela.apagar_filtro(),
            _ => {}
        }
    }

    fn tecla_na_confirmacao(&mut self, tecla: KeyEvent) {
        match tecla.code {
            KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => self.confirmar_exclusao(),
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => self.confirmacao = None,
            _ => {}
        }
    }

    fn tecla_no_dialogo(&mut self, tecla: KeyEvent) {
        match tecla.code {
            KeyCode::Esc => {
                if !self.mutacao_em_voo {
                    self.dialogo = None;
                }
            }
            KeyCode::Enter => self.submeter_dialogo(),
            _ => {
                let Some(dialogo) = self.dialogo.as_mut() else {
                    return;
                };
                match dialogo {
                    Dialogo::Categoria(d) => d.handle_key(&tecla),
                    Dialogo::Produto(d) => {
                        let categorias = self
                            .cache
                            .categorias
                            .value()
                            .map(Vec::as_slice)
                            .unwrap_or(&[]);
                        d.handle_key(&tecla, categorias);
                    }
                    Dialogo::Cardapio(d) => {
                        let produtos = self
                            .cache
                            .produtos
                            .value()
                            .map(Vec::as_slice)
                            .unwrap_or(&[]);
                        d.handle_key(&tecla, produtos);
                    }
                }
            }
        }
    }

    // --- Navegação e seleção ---

    fn tabela_da_rota(&self) -> Option<&Tabela> {
        match self.rota {
            Rota::Produtos => Some(&self.tabela_produtos),
            Rota::Categorias => Some(&self.tabela_categorias),
            Rota::Cardapios => Some(&self.tabela_cardapios),
            Rota::CardapioAtual => None,
        }
    }

    fn tabela_da_rota_mut(&mut self) -> Option<&mut Tabela> {
        match self.rota {
            Rota::Produtos => Some(&mut self.tabela_produtos),
            Rota::Categorias => Some(&mut self.tabela_categorias),
            Rota::Cardapios => Some(&mut self.tabela_cardapios),
            Rota::CardapioAtual => None,
        }
    }

    fn total_linhas(&self) -> usize {
        match self.rota {
            Rota::Produtos => self
                .tabela_produtos
                .preparar(self.produtos(), |p| p.nome.clone())
                .len(),
            Rota::Categorias => self
                .tabela_categorias
                .preparar(self.categorias(), |c| c.nome.clone())
                .len(),
            Rota::Cardapios => self
                .tabela_cardapios
                .preparar(self.cardapios(), |c| c.turno.to_string())
                .len(),
            Rota::CardapioAtual => 0,
        }
    }

    fn mover_selecao(&mut self, delta: isize) {
        let total = self.total_linhas();
        if let Some(tabela) = self.tabela_da_rota_mut() {
            tabela.mover(delta, total);
        }
    }

    fn mover_pagina(&mut self, direcao: isize) {
        let total = self.total_linhas();
        if let Some(tabela) = self.tabela_da_rota_mut() {
            if direcao < 0 {
                tabela.pagina_anterior(total);
            } else {
                tabela.pagina_seguinte(total);
            }
        }
    }

    fn produto_selecionado(&self) -> Option<Produto> {
        let linhas = self
            .tabela_produtos
            .preparar(self.produtos(), |p| p.nome.clone());
        linhas
            .get(self.tabela_produtos.selecionada)
            .map(|p| (*p).clone())
    }

    fn categoria_selecionada(&self) -> Option<Categoria> {
        let linhas = self
            .tabela_categorias
            .preparar(self.categorias(), |c| c.nome.clone());
        linhas
            .get(self.tabela_categorias.selecionada)
            .map(|c| (*c).clone())
    }

    fn cardapio_selecionado(&self) -> Option<Cardapio> {
        let linhas = self
            .tabela_cardapios
            .preparar(self.cardapios(), |c| c.turno.to_string());
        linhas
            .get(self.tabela_cardapios.selecionada)
            .map(|c| (*c).clone())
    }

    fn atualizar_rota(&mut self) {
        match self.rota {
            Rota::Produtos => self.cache.invalidate(QueryKey::Produtos),
            Rota::Categorias => self.cache.invalidate(QueryKey::Categorias),
            Rota::Cardapios => self.cache.invalidate(QueryKey::Cardapios),
            Rota::CardapioAtual => self.cache.invalidate(QueryKey::CardapioAtual),
        }
    }

    // --- Diálogos ---

    fn abrir_dialogo_novo(&mut self) {
        match self.rota {
            Rota::Produtos => {
                self.garantir(QueryKey::Categorias);
                self.dialogo = Some(Dialogo::Produto(DialogoProduto::novo()));
            }
            Rota::Categorias => self.dialogo = Some(Dialogo::Categoria(DialogoCategoria::novo())),
            Rota::Cardapios => {
                self.garantir(QueryKey::Produtos);
                self.dialogo = Some(Dialogo::Cardapio(DialogoCardapio::novo()));
            }
            Rota::CardapioAtual => {}
        }
    }

    fn editar_selecionado(&mut self) {
        match self.rota {
            Rota::Produtos => {
                let Some(produto) = self.produto_selecionado() else {
                    return;
                };
                match produto.id {
                    Some(id) => {
                        self.garantir(QueryKey::Categorias);
                        self.dialogo = Some(Dialogo::Produto(DialogoProduto::editar(id, &produto)));
                    }
                    None => self
                        .toasts
                        .erro(AppError::MissingId("do produto").user_message()),
                }
            }
            Rota::Categorias => {
                let Some(categoria) = self.categoria_selecionada() else {
                    return;
                };
                match categoria.id {
                    Some(id) => {
                        self.dialogo =
                            Some(Dialogo::Categoria(DialogoCategoria::editar(id, &categoria)));
                    }
                    None => self
                        .toasts
                        .erro(AppError::MissingId("da categoria").user_message()),
                }
            }
            Rota::Cardapios => {
                let Some(cardapio) = self.cardapio_selecionado() else {
                    return;
                };
                match cardapio.id {
                    Some(id) => {
                        self.garantir(QueryKey::Produtos);
                        self.dialogo =
                            Some(Dialogo::Cardapio(DialogoCardapio::editar(id, &cardapio)));
                    }
                    None => self
                        .toasts
                        .erro(AppError::MissingId("do cardápio").user_message()),
                }
            }
            Rota::CardapioAtual => {}
        }
    }

    fn excluir_selecionado(&mut self) {
        match self.rota {
            Rota::Produtos => {
                let Some(produto) = self.produto_selecionado() else {
                    return;
                };
                match produto.id {
                    Some(id) => {
                        self.confirmacao = Some(Confirmacao {
                            texto: format!(
                                "Tem certeza que deseja deletar o produto \"{}\"?",
                                produto.nome
                            ),
                            acao: AcaoExclusao::Produto(id),
                        });
                    }
                    None => self
                        .toasts
                        .erro(AppError::MissingId("do produto").user_message()),
                }
            }
            Rota::Categorias => {
                let Some(categoria) = self.categoria_selecionada() else {
                    return;
                };
                match categoria.id {
                    Some(id) => {
                        self.confirmacao = Some(Confirmacao {
                            texto: format!(
                                "Tem certeza que deseja deletar a categoria \"{}\"?",
                                categoria.nome
                            ),
                            acao: AcaoExclusao::Categoria(id),
                        });
                    }
                    None => self
                        .toasts
                        .erro(AppError::MissingId("da categoria").user_message()),
                }
            }
            Rota::Cardapios => {
                let Some(cardapio) = self.cardapio_selecionado() else {
                    return;
                };
                match cardapio.id {
                    Some(id) => {
                        self.confirmacao = Some(Confirmacao {
                            texto: format!(
                                "Tem certeza que deseja deletar o cardápio {} ({})?",
                                id,
                                cardapio.turno.rotulo()
                            ),
                            acao: AcaoExclusao::Cardapio(id),
                        });
                    }
                    None => self
                        .toasts
                        .erro(AppError::MissingId("do cardápio").user_message()),
                }
            }
            Rota::CardapioAtual => {}
        }
    }

    // --- Mutações ---

    fn confirmar_exclusao(&mut self) {
        if self.mutacao_em_voo {
            return;
        }
        let Some(confirmacao) = self.confirmacao.as_ref() else {
            return;
        };
        let tx = self.tx.clone();
        self.mutacao_em_voo = true;
        match confirmacao.acao {
            AcaoExclusao::Produto(id) => {
                let servico = self.state.produto_service.clone();
                tokio::spawn(async move {
                    let resultado = servico.delete(id).await;
                    enviar_mutacao(
                        &tx,
                        vec![QueryKey::Produtos],
                        "Produto deletado com sucesso!",
                        "Erro ao deletar o produto.",
                        resultado,
                    );
                });
            }
            AcaoExclusao::Categoria(id) => {
                let servico = self.state.categoria_service.clone();
                tokio::spawn(async move {
                    let resultado = servico.delete(id).await;
                    enviar_mutacao(
                        &tx,
                        vec![QueryKey::Categorias],
                        "Categoria deletada com sucesso!",
                        "Erro ao deletar a categoria.",
                        resultado,
                    );
                });
            }
            AcaoExclusao::Cardapio(id) => {
                let servico = self.state.cardapio_service.clone();
                tokio::spawn(async move {
                    let resultado = servico.delete(id).await;
                    enviar_mutacao(
                        &tx,
                        vec![QueryKey::Cardapios, QueryKey::CardapioAtual],
                        "Cardápio deletado com sucesso!",
                        "Erro ao deletar o cardápio.",
                        resultado,
                    );
                });
            }
        }
    }

    fn submeter_dialogo(&mut self) {
        // Controle de envio desabilitado enquanto há mutação em voo.
        if self.mutacao_em_voo {
            return;
        }
        let Some(dialogo) = self.dialogo.as_mut() else {
            return;
        };
        let tx = self.tx.clone();

        match dialogo {
            Dialogo::Categoria(d) => {
                let Some(payload) = d.submeter() else { return };
                let servico = self.state.categoria_service.clone();
                self.mutacao_em_voo = true;
                match d.edicao {
                    Some(id) => {
                        tokio::spawn(async move {
                            let resultado = servico.update(id, &payload).await.map(|_| ());
                            enviar_mutacao(
                                &tx,
                                vec![QueryKey::Categorias],
                                "Categoria atualizada com sucesso!",
                                "Erro ao atualizar a categoria",
                                resultado,
                            );
                        });
                    }
                    None => {
                        tokio::spawn(async move {
                            let resultado = servico.create(&payload).await.map(|_| ());
                            enviar_mutacao(
                                &tx,
                                vec![QueryKey::Categorias],
                                "Categoria cadastrada com sucesso!",
                                "Erro ao cadastrar a categoria",
                                resultado,
                            );
                        });
                    }
                }
            }
            Dialogo::Produto(d) => {
                let Some(payload) = d.submeter() else { return };
                let servico = self.state.produto_service.clone();
                self.mutacao_em_voo = true;
                match d.edicao {
                    Some(id) => {
                        let payload = AtualizaProduto::from(payload);
                        tokio::spawn(async move {
                            let resultado = servico.update(id, &payload).await.map(|_| ());
                            enviar_mutacao(
                                &tx,
                                vec![QueryKey::Produtos],
                                "Produto atualizado com sucesso!",
                                "Erro ao atualizar o produto",
                                resultado,
                            );
                        });
                    }
                    None => {
                        tokio::spawn(async move {
                            let resultado = servico.create(&payload).await.map(|_| ());
                            enviar_mutacao(
                                &tx,
                                vec![QueryKey::Produtos],
                                "Produto cadastrado com sucesso!",
                                "Erro ao cadastrar o produto",
                                resultado,
                            );
                        });
                    }
                }
            }
            Dialogo::Cardapio(d) => {
                let Some(payload) = d.submeter() else { return };
                let servico = self.state.cardapio_service.clone();
                self.mutacao_em_voo = true;
                match d.edicao {
                    Some(id) => {
                        tokio::spawn(async move {
                            let resultado = servico.update(id, &payload).await.map(|_| ());
                            enviar_mutacao(
                                &tx,
                                vec![QueryKey::Cardapios, QueryKey::CardapioAtual],
                                "Cardápio atualizado com sucesso!",
                                "Erro ao atualizar o cardápio",
                                resultado,
                            );
                        });
                    }
                    None => {
                        tokio::spawn(async move {
                            let resultado = servico.create(&payload).await.map(|_| ());
                            enviar_mutacao(
                                &tx,
                                vec![QueryKey::Cardapios, QueryKey::CardapioAtual],
                                "Cardápio cadastrado com sucesso!",
                                "Erro ao cadastrar o cardápio",
                                resultado,
                            );
                        });
                    }
                }
            }
        }
    }
}

fn enviar_mutacao(
    tx: &UnboundedSender<AppEvent>,
    invalidar: Vec<QueryKey>,
    sucesso: &str,
    falha: &str,
    resultado: Result<(), AppError>,
) {
    let _ = tx.send(AppEvent::Msg(AppMsg::MutacaoConcluida {
        invalidar,
        sucesso: sucesso.to_string(),
        falha: falha.to_string(),
        resultado,
    }));
}
