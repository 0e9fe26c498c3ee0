// src/forms/produto_form.rs

use rust_decimal::Decimal;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::produto::{Imagem, NovoProduto};

fn validate_preco(valor: &Decimal) -> Result<(), ValidationError> {
    if valor.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O preço deve ser maior ou igual a zero.".into());
        return Err(err);
    }
    Ok(())
}

// Campo opcional: vazio passa. Preenchido, precisa ser uma URL absoluta
// ou um data URI bem formado.
fn validate_imagem(texto: &str) -> Result<(), ValidationError> {
    if texto.is_empty() {
        return Ok(());
    }
    let valido = if texto.starts_with("data:") {
        Imagem::parse(texto).is_ok()
    } else {
        url::Url::parse(texto).is_ok()
    };
    if valido {
        return Ok(());
    }
    let mut err = ValidationError::new("imagem");
    err.message = Some("A imagem deve ser uma URL válida ou dados inline.".into());
    Err(err)
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ProdutoForm {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,

    #[validate(custom(function = "validate_preco"))]
    pub preco: Decimal,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub descricao: String,

    // Texto cru do campo; vazio significa "sem imagem".
    #[validate(custom(function = "validate_imagem"))]
    pub imagem: String,

    pub categoria_id: Option<i64>,
}

impl ProdutoForm {
    pub fn validado(&self) -> Result<NovoProduto, ValidationErrors> {
        self.validate()?;

        let imagem = if self.imagem.is_empty() {
            None
        } else {
            match Imagem::parse(&self.imagem) {
                Ok(imagem) => Some(imagem),
                // validate() já barrou data URIs quebrados; se chegar
                // aqui, devolve o mesmo erro de campo.
                Err(_) => {
                    let mut erros = ValidationErrors::new();
                    let mut err = ValidationError::new("imagem");
                    err.message = Some("A imagem deve ser uma URL válida ou dados inline.".into());
                    erros.add("imagem".into(), err);
                    return Err(erros);
                }
            }
        };

        Ok(NovoProduto {
            nome: self.nome.clone(),
            preco: self.preco,
            descricao: self.descricao.clone(),
            imagem,
            categoria_id: self.categoria_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::primeiro_erro_por_campo;

    fn form_valido() -> ProdutoForm {
        ProdutoForm {
            nome: "Suco".to_string(),
            preco: Decimal::new(990, 2),
            descricao: "natural".to_string(),
            imagem: String::new(),
            categoria_id: Some(2),
        }
    }

    #[test]
    fn entrada_valida_gera_o_payload() {
        let payload = form_valido().validado().unwrap();
        assert_eq!(payload.nome, "Suco");
        assert_eq!(payload.imagem, None);
        assert_eq!(payload.categoria_id, Some(2));
    }

    #[test]
    fn preco_negativo_bloqueia_a_submissao() {
        let form = ProdutoForm {
            preco: Decimal::new(-1, 0),
            ..form_valido()
        };
        let erros = form.validado().unwrap_err();
        let mapa = primeiro_erro_por_campo(&erros);
        assert_eq!(mapa["preco"], "O preço deve ser maior ou igual a zero.");
    }

    #[test]
    fn preco_zero_e_aceito() {
        let form = ProdutoForm {
            preco: Decimal::ZERO,
            ..form_valido()
        };
        assert!(form.validado().is_ok());
    }

    #[test]
    fn nome_e_descricao_vazios_acumulam_erros() {
        let form = ProdutoForm {
            nome: String::new(),
            descricao: String::new(),
            ..form_valido()
        };
        let erros = form.validado().unwrap_err();
        let mapa = primeiro_erro_por_campo(&erros);
        assert_eq!(mapa["nome"], "O nome é obrigatório.");
        assert_eq!(mapa["descricao"], "A descrição é obrigatória.");
    }

    #[test]
    fn imagem_com_url_valida_passa() {
        let form = ProdutoForm {
            imagem: "https://cdn.exemplo.com/suco.png".to_string(),
            ..form_valido()
        };
        let payload = form.validado().unwrap();
        assert!(matches!(payload.imagem, Some(Imagem::Url(_))));
    }

    #[test]
    fn imagem_inline_bem_formada_passa() {
        let form = ProdutoForm {
            imagem: "data:image/png;base64,YWJj".to_string(),
            ..form_valido()
        };
        let payload = form.validado().unwrap();
        assert!(matches!(payload.imagem, Some(Imagem::DadosInline { .. })));
    }

    #[test]
    fn imagem_invalida_bloqueia() {
        for caso in ["nao-e-url", "data:image/png;base64,@@@"] {
            let form = ProdutoForm {
                imagem: caso.to_string(),
                ..form_valido()
            };
            let erros = form.validado().unwrap_err();
            let mapa = primeiro_erro_por_campo(&erros);
            assert_eq!(
                mapa["imagem"],
                "A imagem deve ser uma URL válida ou dados inline.",
                "caso: {caso}"
            );
        }
    }

    #[test]
    fn categoria_e_opcional() {
        let form = ProdutoForm {
            categoria_id: None,
            ..form_valido()
        };
        let payload = form.validado().unwrap();
        assert_eq!(payload.categoria_id, None);
    }
}
