// src/forms/categoria_form.rs

use validator::{Validate, ValidationErrors};

use crate::models::categoria::NovaCategoria;

#[derive(Debug, Clone, Default, Validate)]
pub struct CategoriaForm {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,
}

impl CategoriaForm {
    /// Valida e converte no payload da API. Nenhuma chamada de rede
    /// acontece enquanto isso retornar `Err`.
    pub fn validado(&self) -> Result<NovaCategoria, ValidationErrors> {
        self.validate()?;
        Ok(NovaCategoria {
            nome: self.nome.clone(),
        })
    }
}
