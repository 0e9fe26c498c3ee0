pub mod cardapio_service;
pub use cardapio_service::CardapioService;
pub mod categoria_service;
pub use categoria_service::CategoriaService;
pub mod produto_service;
pub use produto_service::ProdutoService;
