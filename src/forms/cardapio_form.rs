// src/forms/cardapio_form.rs

use validator::{Validate, ValidationErrors};

use crate::models::cardapio::{NovoCardapio, Turno};

#[derive(Debug, Clone, Default, Validate)]
pub struct CardapioForm {
    #[validate(required(message = "O turno é obrigatório."))]
    pub turno: Option<Turno>,

    #[validate(length(min = 1, message = "Selecione pelo menos um produto."))]
    pub produto_ids: Vec<i64>,
}

impl CardapioForm {
    pub fn validado(&self) -> Result<NovoCardapio, ValidationErrors> {
        self.validate()?;
        Ok(NovoCardapio {
            // `required` garante o Some acima.
            turno: self.turno.unwrap_or(Turno::Diurno),
            produto_ids: self.produto_ids.clone(),
        })
    }
}
