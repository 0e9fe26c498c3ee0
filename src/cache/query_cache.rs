// src/cache/query_cache.rs
//
// Cache de consultas chaveado por recurso, no espírito do request-cache
// do front antigo: a tela lê daqui, e toda mutação invalida a chave
// correspondente para forçar um novo fetch na próxima leitura. Política
// last-write-wins: o valor antigo é descartado quando a resposta nova
// chega, sem merge.

use crate::models::cardapio::{Cardapio, CardapioAtual};
use crate::models::categoria::Categoria;
use crate::models::produto::Produto;

/// Chaves de consulta — espelham as query keys do front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Produtos,
    Categorias,
    Cardapios,
    CardapioAtual,
}

#[derive(Debug, Clone, PartialEq)]
enum Estado<T> {
    NaoCarregado,
    Pronto(T),
    Falhou(String),
}

/// Um slot do cache: último resultado + sinal de obsolescência + marca
/// de fetch em andamento.
///
/// Invariantes:
/// - no máximo um fetch em voo por chave (`begin_fetch` só devolve
///   `true` uma vez até o `store`/`fail` correspondente);
/// - depois de uma falha não há refetch automático — só invalidação
///   explícita dispara nova tentativa.
#[derive(Debug)]
pub struct QuerySlot<T> {
    estado: Estado<T>,
    obsoleto: bool,
    em_voo: bool,
}

impl<T> Default for QuerySlot<T> {
    fn default() -> Self {
        Self {
            estado: Estado::NaoCarregado,
            // Nasce obsoleto: a primeira leitura dispara o fetch.
            obsoleto: true,
            em_voo: false,
        }
    }
}

impl<T> QuerySlot<T> {
    pub fn value(&self) -> Option<&T> {
        match &self.estado {
            Estado::Pronto(valor) => Some(valor),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.estado {
            Estado::Falhou(mensagem) => Some(mensagem),
            _ => None,
        }
    }

    /// Primeiro carregamento em andamento — as telas mostram o spinner.
    /// Um refetch em segundo plano (valor pronto + obsoleto) não conta.
    pub fn is_loading(&self) -> bool {
        self.em_voo && !matches!(self.estado, Estado::Pronto(_))
    }

    pub fn is_stale(&self) -> bool {
        self.obsoleto
    }

    fn precisa_fetch(&self) -> bool {
        if self.em_voo {
            return false;
        }
        match self.estado {
            Estado::NaoCarregado => true,
            Estado::Pronto(_) | Estado::Falhou(_) => self.obsoleto,
        }
    }

    /// Reivindica o fetch desta chave. `true` = o chamador deve disparar
    /// a leitura de rede; `false` = nada a fazer (fresco ou já em voo).
    pub fn begin_fetch(&mut self) -> bool {
        if !self.precisa_fetch() {
            return false;
        }
        self.em_voo = true;
        true
    }

    pub fn store(&mut self, valor: T) {
        self.estado = Estado::Pronto(valor);
        self.obsoleto = false;
        self.em_voo = false;
    }

    pub fn fail(&mut self, mensagem: String) {
        self.estado = Estado::Falhou(mensagem);
        self.obsoleto = false;
        self.em_voo = false;
    }

    pub fn invalidate(&mut self) {
        self.obsoleto = true;
    }
}

/// O cache inteiro, um slot tipado por recurso. É injetado na camada de
/// apresentação (vive dentro do `App`), nunca estado global.
#[derive(Debug, Default)]
pub struct QueryCache {
    pub produtos: QuerySlot<Vec<Produto>>,
    pub categorias: QuerySlot<Vec<Categoria>>,
    pub cardapios: QuerySlot<Vec<Cardapio>>,
    pub cardapio_atual: QuerySlot<CardapioAtual>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&mut self, chave: QueryKey) {
        match chave {
            QueryKey::Produtos => self.produtos.invalidate(),
            QueryKey::Categorias => self.categorias.invalidate(),
            QueryKey::Cardapios => self.cardapios.invalidate(),
            QueryKey::CardapioAtual => self.cardapio_atual.invalidate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primeira_leitura_dispara_exatamente_um_fetch() {
        let mut slot: QuerySlot<Vec<i64>> = QuerySlot::default();
        assert!(slot.begin_fetch());
        // segunda leitura enquanto o fetch está em voo: nada a fazer
        assert!(!slot.begin_fetch());
        assert!(slot.is_loading());

        slot.store(vec![1, 2]);
        assert_eq!(slot.value(), Some(&vec![1, 2]));
        assert!(!slot.is_loading());
        // valor fresco: leitura não refaz o fetch
        assert!(!slot.begin_fetch());
    }

    #[test]
    fn invalidar_marca_obsoleto_e_a_proxima_leitura_refaz() {
        let mut slot: QuerySlot<i32> = QuerySlot::default();
        assert!(slot.begin_fetch());
        slot.store(10);

        slot.invalidate();
        assert!(slot.is_stale());
        // o valor antigo continua renderizável durante o refetch
        assert_eq!(slot.value(), Some(&10));
        assert!(slot.begin_fetch());
        assert!(!slot.begin_fetch());

        // last-write-wins: o resultado novo descarta o antigo
        slot.store(20);
        assert_eq!(slot.value(), Some(&20));
        assert!(!slot.is_stale());
    }

    #[test]
    fn falha_guarda_a_mensagem_e_nao_tenta_de_novo_sozinha() {
        let mut slot: QuerySlot<i32> = QuerySlot::default();
        assert!(slot.begin_fetch());
        slot.fail("sem rede".to_string());

        assert_eq!(slot.error(), Some("sem rede"));
        assert_eq!(slot.value(), None);
        // sem retry automático
        assert!(!slot.begin_fetch());

        // invalidação explícita reabre a tentativa
        slot.invalidate();
        assert!(slot.begin_fetch());
    }

    #[test]
    fn invalidate_por_chave_atinge_o_slot_certo() {
        let mut cache = QueryCache::new();
        assert!(cache.produtos.begin_fetch());
        cache.produtos.store(Vec::new());
        assert!(cache.categorias.begin_fetch());
        cache.categorias.store(Vec::new());

        cache.invalidate(QueryKey::Produtos);
        assert!(cache.produtos.is_stale());
        assert!(!cache.categorias.is_stale());
    }
}
