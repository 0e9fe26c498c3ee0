// src/ui/tabela.rs

use std::ops::Range;

/// Ordenação pelo campo de exibição da tela. `Original` preserva a
/// ordem em que o backend devolveu as linhas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ordenacao {
    #[default]
    Original,
    Crescente,
    Decrescente,
}

/// Estado de uma listagem: filtro, ordenação, seleção e paginação.
/// Puro — não conhece ratatui nem o tipo das linhas.
#[derive(Debug)]
pub struct Tabela {
    pub filtro: String,
    pub editando_filtro: bool,
    pub ordenacao: Ordenacao,
    pub selecionada: usize,
    pub por_pagina: usize,
}

impl Tabela {
    pub fn new(por_pagina: usize) -> Self {
        Self {
            filtro: String::new(),
            editando_filtro: false,
            ordenacao: Ordenacao::Original,
            selecionada: 0,
            por_pagina,
        }
    }

    /// Filtra (substring, sem diferenciar maiúsculas) e ordena as
    /// linhas pelo campo de exibição. Filtro vazio devolve tudo.
    pub fn preparar<'a, T>(&self, itens: &'a [T], campo: impl Fn(&T) -> String) -> Vec<&'a T> {
        let filtro = self.filtro.to_lowercase();
        let mut linhas: Vec<&T> = itens
            .iter()
            .filter(|item| filtro.is_empty() || campo(item).to_lowercase().contains(&filtro))
            .collect();
        match self.ordenacao {
            Ordenacao::Original => {}
            Ordenacao::Crescente => linhas.sort_by_key(|item| campo(item).to_lowercase()),
            Ordenacao::Decrescente => {
                linhas.sort_by_key(|item| campo(item).to_lowercase());
                linhas.reverse();
            }
        }
        linhas
    }

    pub fn alternar_ordenacao(&mut self) {
        self.ordenacao = match self.ordenacao {
            Ordenacao::Original => Ordenacao::Crescente,
            Ordenacao::Crescente => Ordenacao::Decrescente,
            Ordenacao::Decrescente => Ordenacao::Original,
        };
    }

    pub fn digitar_filtro(&mut self, c: char) {
        self.filtro.push(c);
        self.selecionada = 0;
    }

    pub fn apagar_filtro(&mut self) {
        self.filtro.pop();
        self.selecionada = 0;
    }

    /// Move a seleção, preso ao intervalo válido.
    pub fn mover(&mut self, delta: isize, total: usize) {
        if total == 0 {
            self.selecionada = 0;
            return;
        }
        let atual = self.selecionada.min(total - 1) as isize;
        self.selecionada = (atual + delta).clamp(0, total as isize - 1) as usize;
    }

    pub fn pagina_seguinte(&mut self, total: usize) {
        self.mover(self.por_pagina as isize, total);
    }

    pub fn pagina_anterior(&mut self, total: usize) {
        self.mover(-(self.por_pagina as isize), total);
    }

    pub fn pagina_atual(&self) -> usize {
        if self.por_pagina == 0 {
            return 0;
        }
        self.selecionada / self.por_pagina
    }

    pub fn total_paginas(&self, total: usize) -> usize {
        if self.por_pagina == 0 || total == 0 {
            return 1;
        }
        total.div_ceil(self.por_pagina)
    }

    /// Fatia de índices visível na página da seleção atual.
    pub fn intervalo_visivel(&self, total: usize) -> Range<usize> {
        if self.por_pagina == 0 {
            return 0..total;
        }
        let inicio = self.pagina_atual() * self.por_pagina;
        let fim = (inicio + self.por_pagina).min(total);
        inicio.min(fim)..fim
    }
}
