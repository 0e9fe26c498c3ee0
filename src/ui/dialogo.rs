// src/ui/dialogo.rs
//
// Máquinas de estado dos diálogos de cadastro/edição. Nada aqui fala
// com a rede: `submeter` valida e devolve o payload pronto (ou `None`,
// com os erros por campo preenchidos) e o App decide o que disparar.

use std::collections::{BTreeMap, BTreeSet};

use crossterm::event::{KeyCode, KeyEvent};
use rust_decimal::Decimal;

use crate::forms::{CardapioForm, CategoriaForm, ProdutoForm, primeiro_erro_por_campo};
use crate::models::cardapio::{Cardapio, NovoCardapio, Turno};
use crate::models::categoria::{Categoria, NovaCategoria};
use crate::models::produto::{NovoProduto, Produto};

#[derive(Debug)]
pub enum Dialogo {
    Categoria(DialogoCategoria),
    Produto(DialogoProduto),
    Cardapio(DialogoCardapio),
}

// --- Categoria ---

#[derive(Debug, Default)]
pub struct DialogoCategoria {
    pub nome: String,
    pub erros: BTreeMap<String, String>,
    pub edicao: Option<i64>,
}

impl DialogoCategoria {
    pub fn novo() -> Self {
        Self::default()
    }

    pub fn editar(id: i64, categoria: &Categoria) -> Self {
        Self {
            nome: categoria.nome.clone(),
            erros: BTreeMap::new(),
            edicao: Some(id),
        }
    }

    pub fn handle_key(&mut self, tecla: &KeyEvent) {
        match tecla.code {
            KeyCode::Char(c) => self.nome.push(c),
            KeyCode::Backspace => {
                self.nome.pop();
            }
            _ => {}
        }
    }

    pub fn submeter(&mut self) -> Option<NovaCategoria> {
        let form = CategoriaForm {
            nome: self.nome.clone(),
        };
        match form.validado() {
            Ok(payload) => {
                self.erros.clear();
                Some(payload)
            }
            Err(erros) => {
                self.erros = primeiro_erro_por_campo(&erros);
                None
            }
        }
    }
}

// --- Produto ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CampoProduto {
    #[default]
    Nome,
    Preco,
    Descricao,
    Imagem,
    Categoria,
}

impl CampoProduto {
    const ORDEM: [CampoProduto; 5] = [
        CampoProduto::Nome,
        CampoProduto::Preco,
        CampoProduto::Descricao,
        CampoProduto::Imagem,
        CampoProduto::Categoria,
    ];

    fn posicao(self) -> usize {
        Self::ORDEM.iter().position(|c| *c == self).unwrap_or(0)
    }
}

#[derive(Debug, Default)]
pub struct DialogoProduto {
    pub nome: String,
    pub preco: String,
    pub descricao: String,
    pub imagem: String,
    pub categoria_id: Option<i64>,
    pub foco: CampoProduto,
    pub erros: BTreeMap<String, String>,
    pub edicao: Option<i64>,
}

impl DialogoProduto {
    pub fn novo() -> Self {
        Self::default()
    }

    pub fn editar(id: i64, produto: &Produto) -> Self {
        Self {
            nome: produto.nome.clone(),
            preco: produto.preco.to_string(),
            descricao: produto.descricao.clone(),
            imagem: produto
                .imagem
                .as_ref()
                .map(|i| i.to_wire())
                .unwrap_or_default(),
            categoria_id: produto.categoria_id,
            foco: CampoProduto::Nome,
            erros: BTreeMap::new(),
            edicao: Some(id),
        }
    }

    fn mover_foco(&mut self, delta: isize) {
        let total = CampoProduto::ORDEM.len() as isize;
        let nova = (self.foco.posicao() as isize + delta).rem_euclid(total);
        self.foco = CampoProduto::ORDEM[nova as usize];
    }

    fn campo_texto_mut(&mut self) -> Option<&mut String> {
        match self.foco {
            CampoProduto::Nome => Some(&mut self.nome),
            CampoProduto::Preco => Some(&mut self.preco),
            CampoProduto::Descricao => Some(&mut self.descricao),
            CampoProduto::Imagem => Some(&mut self.imagem),
            CampoProduto::Categoria => None,
        }
    }

    // O seletor de categoria percorre "sem categoria" + as categorias
    // que o cache conhece.
    fn ciclar_categoria(&mut self, delta: isize, categorias: &[Categoria]) {
        let ids: Vec<i64> = categorias.iter().filter_map(|c| c.id).collect();
        let atual = match self.categoria_id {
            None => 0isize,
            Some(id) => ids
                .iter()
                .position(|&x| x == id)
                .map(|p| p as isize + 1)
                .unwrap_or(0),
        };
        let total = ids.len() as isize + 1;
        let nova = (atual + delta).rem_euclid(total);
        self.categoria_id = if nova == 0 {
            None
        } else {
            Some(ids[(nova - 1) as usize])
        };
    }

    pub fn handle_key(&mut self, tecla: &KeyEvent, categorias: &[Categoria]) {
        match tecla.code {
            KeyCode::Tab | KeyCode::Down => self.mover_foco(1),
            KeyCode::BackTab | KeyCode::Up => self.mover_foco(-1),
            KeyCode::Left if self.foco == CampoProduto::Categoria => {
                self.ciclar_categoria(-1, categorias)
            }
            KeyCode::Right if self.foco == CampoProduto::Categoria => {
                self.ciclar_categoria(1, categorias)
            }
            KeyCode::Char(c) => {
                if let Some(campo) = self.campo_texto_mut() {
                    campo.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(campo) = self.campo_texto_mut() {
                    campo.pop();
                }
            }
            _ => {}
        }
    }

    pub fn submeter(&mut self) -> Option<NovoProduto> {
        // Aceita vírgula decimal ("9,90") além do ponto.
        let (preco, erro_preco) = match self.preco.trim().replace(',', ".").parse::<Decimal>() {
            Ok(valor) => (valor, None),
            Err(_) => (Decimal::ZERO, Some("O preço deve ser um número.".to_string())),
        };

        let form = ProdutoForm {
            nome: self.nome.clone(),
            preco,
            descricao: self.descricao.clone(),
            imagem: self.imagem.trim().to_string(),
            categoria_id: self.categoria_id,
        };

        let mut erros = match form.validado() {
            Ok(payload) => {
                if erro_preco.is_none() {
                    self.erros.clear();
                    return Some(payload);
                }
                BTreeMap::new()
            }
            Err(e) => primeiro_erro_por_campo(&e),
        };
        if let Some(mensagem) = erro_preco {
            erros.insert("preco".to_string(), mensagem);
        }
        self.erros = erros;
        None
    }
}

// --- Cardápio ---

#[derive(Debug, Default)]
pub struct DialogoCardapio {
    pub turno: Option<Turno>,
    pub selecionados: BTreeSet<i64>,
    pub cursor: usize,
    pub erros: BTreeMap<String, String>,
    pub edicao: Option<i64>,
}

impl DialogoCardapio {
    pub fn novo() -> Self {
        Self::default()
    }

    /// Pré-seleciona os produtos já associados. O turno vem junto, mas
    /// fica travado: a composição pode mudar, o turno não.
    pub fn editar(id: i64, cardapio: &Cardapio) -> Self {
        Self {
            turno: Some(cardapio.turno),
            selecionados: cardapio.produto_ids().into_iter().collect(),
            cursor: 0,
            erros: BTreeMap::new(),
            edicao: Some(id),
        }
    }

    pub fn turno_travado(&self) -> bool {
        self.edicao.is_some()
    }

    fn alternar_turno(&mut self) {
        if self.turno_travado() {
            return;
        }
        self.turno = Some(match self.turno {
            None | Some(Turno::Noturno) => Turno::Diurno,
            Some(Turno::Diurno) => Turno::Noturno,
        });
    }

    pub fn handle_key(&mut self, tecla: &KeyEvent, produtos: &[Produto]) {
        match tecla.code {
            KeyCode::Left | KeyCode::Right => self.alternar_turno(),
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => {
                if !produtos.is_empty() {
                    self.cursor = (self.cursor + 1).min(produtos.len() - 1);
                }
            }
            KeyCode::Char(' ') => {
                if let Some(id) = produtos.get(self.cursor).and_then(|p| p.id) {
                    if !self.selecionados.remove(&id) {
                        self.selecionados.insert(id);
                    }
                }
            }
            _ => {}
        }
    }

    pub fn submeter(&mut self) -> Option<NovoCardapio> {
        let form = CardapioForm {
            turno: self.turno,
            produto_ids: self.selecionados.iter().copied().collect(),
        };
        match form.validado() {
            Ok(payload) => {
                self.erros.clear();
                Some(payload)
            }
            Err(erros) => {
                self.erros = primeiro_erro_por_campo(&erros);
                None
            }
        }
    }
}
