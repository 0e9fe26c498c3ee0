// src/ui/toast.rs

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Sucesso,
    Erro,
}

#[derive(Debug)]
pub struct Toast {
    pub texto: String,
    pub kind: ToastKind,
    criado_em: Instant,
}

/// Notificações transitórias empilhadas no rodapé.
#[derive(Debug)]
pub struct Toasts {
    itens: Vec<Toast>,
    ttl: Duration,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            itens: Vec::new(),
            ttl: Duration::from_secs(4),
        }
    }

    pub fn sucesso(&mut self, texto: impl Into<String>) {
        self.empilhar(texto.into(), ToastKind::Sucesso);
    }

    pub fn erro(&mut self, texto: impl Into<String>) {
        self.empilhar(texto.into(), ToastKind::Erro);
    }

    fn empilhar(&mut self, texto: String, kind: ToastKind) {
        self.itens.push(Toast {
            texto,
            kind,
            criado_em: Instant::now(),
        });
    }

    /// Chamado a cada tick do loop.
    pub fn expirar(&mut self) {
        self.expirar_em(Instant::now());
    }

    fn expirar_em(&mut self, agora: Instant) {
        let ttl = self.ttl;
        self.itens
            .retain(|t| agora.duration_since(t.criado_em) < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.itens.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.itens.is_empty()
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}
