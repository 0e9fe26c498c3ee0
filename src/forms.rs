use std::collections::BTreeMap;

use validator::ValidationErrors;

pub mod cardapio_form;
pub use cardapio_form::CardapioForm;
pub mod categoria_form;
pub use categoria_form::CategoriaForm;
pub mod produto_form;
pub use produto_form::ProdutoForm;

/// Achata o resultado do validator no formato que os diálogos exibem:
/// a primeira restrição violada de cada campo.
pub fn primeiro_erro_por_campo(errors: &ValidationErrors) -> BTreeMap<String, String> {
    let mut mapa = BTreeMap::new();
    for (campo, erros_do_campo) in errors.field_errors() {
        let mensagem = erros_do_campo
            .iter()
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Campo inválido.".to_string());
        mapa.insert(campo.to_string(), mensagem);
    }
    mapa
}
