// src/ui/render.rs

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap,
};

use crate::common::format;
use crate::models::cardapio::Turno;
use crate::ui::app::{App, Rota};
use crate::ui::dialogo::{CampoProduto, Dialogo, DialogoCardapio, DialogoCategoria, DialogoProduto};
use crate::ui::tabela::Tabela;
use crate::ui::toast::ToastKind;

pub fn desenhar(frame: &mut Frame, app: &App) {
    let [area_tabs, area_corpo, area_rodape] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(frame.area());

    desenhar_tabs(frame, area_tabs, app);

    match app.rota {
        Rota::Produtos => desenhar_produtos(frame, area_corpo, app),
        Rota::Categorias => desenhar_categorias(frame, area_corpo, app),
        Rota::Cardapios => desenhar_cardapios(frame, area_corpo, app),
        Rota::CardapioAtual => desenhar_cardapio_atual(frame, area_corpo, app),
    }

    desenhar_rodape(frame, area_rodape, app);

    if let Some(dialogo) = &app.dialogo {
        desenhar_dialogo(frame, app, dialogo);
    }
    if let Some(confirmacao) = &app.confirmacao {
        let area = area_central(frame.area(), 60, 7);
        frame.render_widget(Clear, area);
        let caixa = Paragraph::new(vec![
            Line::from(confirmacao.texto.clone()),
            Line::from(""),
            Line::from(Span::styled(
                "[Enter] Sim    [Esc] Não",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Confirmação"));
        frame.render_widget(caixa, area);
    }
}

fn desenhar_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titulos: Vec<Line> = Rota::TODAS.iter().map(|r| Line::from(r.titulo())).collect();
    let tabs = Tabs::new(titulos)
        .select(app.rota.indice())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title("cardapio-admin"));
    frame.render_widget(tabs, area);
}

fn desenhar_rodape(frame: &mut Frame, area: Rect, app: &App) {
    let ajuda = if app.mutacao_em_voo {
        Line::from(Span::styled("Enviando...", Style::default().fg(Color::Yellow)))
    } else {
        Line::from(
            "Tab troca de tela · / filtra · o ordena · n novo · e edita · d exclui · r atualiza · q sai",
        )
    };

    let mut linhas = vec![ajuda];
    if let Some(toast) = app.toasts.iter().last() {
        let cor = match toast.kind {
            ToastKind::Sucesso => Color::Green,
            ToastKind::Erro => Color::Red,
        };
        linhas.push(Line::from(Span::styled(
            toast.texto.clone(),
            Style::default().fg(cor).add_modifier(Modifier::BOLD),
        )));
    }
    frame.render_widget(Paragraph::new(linhas), area);
}

// --- Listagens ---

struct Moldura<'a> {
    titulo: &'a str,
    placeholder_filtro: &'a str,
    cabecalho: Vec<&'a str>,
    larguras: Vec<Constraint>,
}

fn desenhar_lista(
    frame: &mut Frame,
    area: Rect,
    tabela: &Tabela,
    moldura: Moldura,
    total: usize,
    linhas: Vec<Row>,
) {
    let [area_filtro, area_tabela, area_info] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let filtro = if tabela.editando_filtro {
        Line::from(vec![
            Span::raw("Filtro: "),
            Span::styled(
                format!("{}█", tabela.filtro),
                Style::default().fg(Color::Yellow),
            ),
        ])
    } else if tabela.filtro.is_empty() {
        Line::from(Span::styled(
            format!("{} (tecle / para filtrar)", moldura.placeholder_filtro),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(format!("Filtro: {}", tabela.filtro))
    };
    frame.render_widget(Paragraph::new(filtro), area_filtro);

    let intervalo = tabela.intervalo_visivel(total);
    let cabecalho = Row::new(moldura.cabecalho.clone())
        .style(Style::default().add_modifier(Modifier::BOLD));
    let widget = Table::new(linhas, moldura.larguras.clone())
        .header(cabecalho)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(moldura.titulo));

    let mut estado = TableState::default();
    if total > 0 {
        estado.select(Some(tabela.selecionada.saturating_sub(intervalo.start)));
    }
    frame.render_stateful_widget(widget, area_tabela, &mut estado);

    let info = format!(
        "Página {}/{} · {} item(ns)",
        tabela.pagina_atual() + 1,
        tabela.total_paginas(total),
        total
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            info,
            Style::default().fg(Color::DarkGray),
        ))),
        area_info,
    );
}

fn desenhar_produtos(frame: &mut Frame, area: Rect, app: &App) {
    let slot = &app.cache.produtos;
    if slot.is_loading() {
        return desenhar_carregando(frame, area, "Carregando produtos...");
    }
    if let Some(detalhe) = slot.error() {
        return desenhar_erro(frame, area, "Erro ao carregar os produtos.", detalhe);
    }

    let tabela = &app.tabela_produtos;
    let preparadas = tabela.preparar(app.produtos(), |p| p.nome.clone());
    let total = preparadas.len();
    let intervalo = tabela.intervalo_visivel(total);

    let linhas: Vec<Row> = preparadas[intervalo]
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(texto_id(p.id)),
                Cell::from(p.nome.clone()),
                Cell::from(format::moeda(p.preco)),
                Cell::from(p.imagem.as_ref().map(|i| i.rotulo()).unwrap_or("—")),
                Cell::from(p.descricao.clone()),
                Cell::from(nome_da_categoria(app, p.categoria_id)),
                Cell::from(format::data_opcional(p.criado_em.as_ref())),
                Cell::from(format::data_opcional(p.atualizado_em.as_ref())),
            ])
        })
        .collect();

    desenhar_lista(
        frame,
        area,
        tabela,
        Moldura {
            titulo: "Lista de Produtos",
            placeholder_filtro: "Filtrar por nome...",
            cabecalho: vec![
                "ID", "Nome", "Preço", "Imagem", "Descrição", "Categoria", "Criado", "Atualizado",
            ],
            larguras: vec![
                Constraint::Length(6),
                Constraint::Min(14),
                Constraint::Length(12),
                Constraint::Length(8),
                Constraint::Min(16),
                Constraint::Length(14),
                Constraint::Length(11),
                Constraint::Length(11),
            ],
        },
        total,
        linhas,
    );
}

fn desenhar_categorias(frame: &mut Frame, area: Rect, app: &App) {
    let slot = &app.cache.categorias;
    if slot.is_loading() {
        return desenhar_carregando(frame, area, "Carregando categorias...");
    }
    if let Some(detalhe) = slot.error() {
        return desenhar_erro(frame, area, "Erro ao carregar as categorias.", detalhe);
    }

    let tabela = &app.tabela_categorias;
    let preparadas = tabela.preparar(app.categorias(), |c| c.nome.clone());
    let total = preparadas.len();
    let intervalo = tabela.intervalo_visivel(total);

    let linhas: Vec<Row> = preparadas[intervalo]
        .iter()
        .map(|c| {
            Row::new(vec![
                Cell::from(texto_id(c.id)),
                Cell::from(c.nome.clone()),
                Cell::from(format::data_opcional(c.criado_em.as_ref())),
                Cell::from(format::data_opcional(c.atualizado_em.as_ref())),
            ])
        })
        .collect();

    desenhar_lista(
        frame,
        area,
        tabela,
        Moldura {
            titulo: "Lista de Categorias",
            placeholder_filtro: "Filtrar por nome...",
            cabecalho: vec!["ID", "Nome", "Criado", "Atualizado"],
            larguras: vec![
                Constraint::Length(6),
                Constraint::Min(20),
                Constraint::Length(11),
                Constraint::Length(11),
            ],
        },
        total,
        linhas,
    );
}

fn desenhar_cardapios(frame: &mut Frame, area: Rect, app: &App) {
    let slot = &app.cache.cardapios;
    if slot.is_loading() {
        return desenhar_carregando(frame, area, "Carregando cardápios...");
    }
    if let Some(detalhe) = slot.error() {
        return desenhar_erro(frame, area, "Erro ao carregar os cardápios.", detalhe);
    }

    let tabela = &app.tabela_cardapios;
    let preparadas = tabela.preparar(app.cardapios(), |c| c.turno.to_string());
    let total = preparadas.len();
    let intervalo = tabela.intervalo_visivel(total);

    let linhas: Vec<Row> = preparadas[intervalo]
        .iter()
        .map(|c| {
            let resumo = if c.produtos.is_empty() {
                "Nenhum produto".to_string()
            } else {
                let nomes: Vec<&str> = c
                    .produtos
                    .iter()
                    .filter_map(|p| p.produto.as_ref().map(|r| r.nome.as_str()))
                    .collect();
                format!("{} produto(s): {}", c.produtos.len(), nomes.join(", "))
            };
            Row::new(vec![
                Cell::from(texto_id(c.id)),
                Cell::from(c.turno.rotulo()),
                Cell::from(resumo),
                Cell::from(format::data_opcional(c.criado_em.as_ref())),
                Cell::from(format::data_opcional(c.atualizado_em.as_ref())),
            ])
        })
        .collect();

    desenhar_lista(
        frame,
        area,
        tabela,
        Moldura {
            titulo: "Lista de Cardápios",
            placeholder_filtro: "Filtrar por turno...",
            cabecalho: vec!["ID", "Turno", "Produtos", "Criado", "Atualizado"],
            larguras: vec![
                Constraint::Length(6),
                Constraint::Length(9),
                Constraint::Min(30),
                Constraint::Length(11),
                Constraint::Length(11),
            ],
        },
        total,
        linhas,
    );
}

fn desenhar_cardapio_atual(frame: &mut Frame, area: Rect, app: &App) {
    let slot = &app.cache.cardapio_atual;
    if slot.is_loading() {
        return desenhar_carregando(frame, area, "Carregando cardápio...");
    }
    if slot.error().is_some() {
        return desenhar_erro(
            frame,
            area,
            "Não foi possível carregar o cardápio.",
            slot.error().unwrap_or_default(),
        );
    }
    let Some(atual) = slot.value() else {
        return desenhar_carregando(frame, area, "Carregando cardápio...");
    };

    let titulo_turno = match atual.turno {
        Turno::Diurno => "Menu Diurno ☀",
        Turno::Noturno => "Menu Noturno ☾",
    };

    let mut linhas: Vec<Line> = vec![
        Line::from(Span::styled(
            titulo_turno,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "Atualizado em: {}",
                format::data_opcional(atual.atualizado_em.as_ref())
            ),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    if atual.produtos.is_empty() {
        linhas.push(Line::from("Nenhum produto disponível no momento."));
    }

    for (categoria, produtos) in atual.por_categoria() {
        linhas.push(Line::from(Span::styled(
            categoria,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for produto in produtos {
            let descricao = produto
                .descricao
                .as_deref()
                .map(|d| format!(" — {d}"))
                .unwrap_or_default();
            linhas.push(Line::from(format!(
                "  {}{}  ·  {}",
                produto.nome,
                descricao,
                format::moeda(produto.preco)
            )));
        }
        linhas.push(Line::from(""));
    }

    let painel = Paragraph::new(linhas)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Cardápio"));
    frame.render_widget(painel, area);
}

// --- Diálogos ---

fn desenhar_dialogo(frame: &mut Frame, app: &App, dialogo: &Dialogo) {
    match dialogo {
        Dialogo::Categoria(d) => desenhar_dialogo_categoria(frame, app, d),
        Dialogo::Produto(d) => desenhar_dialogo_produto(frame, app, d),
        Dialogo::Cardapio(d) => desenhar_dialogo_cardapio(frame, app, d),
    }
}

fn rodape_dialogo(app: &App) -> Line<'static> {
    if app.mutacao_em_voo {
        Line::from(Span::styled(
            "Enviando...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(Span::styled(
            "[Enter] Salvar    [Esc] Cancelar",
            Style::default().add_modifier(Modifier::BOLD),
        ))
    }
}

fn linha_campo(rotulo: &str, valor: &str, focado: bool) -> Line<'static> {
    let marcador = if focado { "▶ " } else { "  " };
    let cursor = if focado { "█" } else { "" };
    let estilo = if focado {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(marcador.to_string()),
        Span::styled(format!("{rotulo}: "), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("{valor}{cursor}"), estilo),
    ])
}

fn linha_erro(erros: &std::collections::BTreeMap<String, String>, campo: &str) -> Option<Line<'static>> {
    erros.get(campo).map(|mensagem| {
        Line::from(Span::styled(
            format!("    {mensagem}"),
            Style::default().fg(Color::Red),
        ))
    })
}

fn desenhar_dialogo_categoria(frame: &mut Frame, app: &App, d: &DialogoCategoria) {
    let area = area_central(frame.area(), 50, 8);
    frame.render_widget(Clear, area);

    let mut linhas = vec![linha_campo("Nome", &d.nome, true)];
    if let Some(erro) = linha_erro(&d.erros, "nome") {
        linhas.push(erro);
    }
    linhas.push(Line::from(""));
    linhas.push(rodape_dialogo(app));

    let titulo = if d.edicao.is_some() {
        "Editar categoria"
    } else {
        "Cadastrar categoria"
    };
    frame.render_widget(
        Paragraph::new(linhas).block(Block::default().borders(Borders::ALL).title(titulo)),
        area,
    );
}

fn desenhar_dialogo_produto(frame: &mut Frame, app: &App, d: &DialogoProduto) {
    let area = area_central(frame.area(), 64, 16);
    frame.render_widget(Clear, area);

    let categoria_texto = match d.categoria_id {
        None => "◀ Sem categoria ▶".to_string(),
        Some(id) => format!("◀ {} ▶", nome_da_categoria(app, Some(id))),
    };

    let mut linhas = Vec::new();
    linhas.push(linha_campo("Nome", &d.nome, d.foco == CampoProduto::Nome));
    if let Some(erro) = linha_erro(&d.erros, "nome") {
        linhas.push(erro);
    }
    linhas.push(linha_campo("Preço", &d.preco, d.foco == CampoProduto::Preco));
    if let Some(erro) = linha_erro(&d.erros, "preco") {
        linhas.push(erro);
    }
    linhas.push(linha_campo(
        "Descrição",
        &d.descricao,
        d.foco == CampoProduto::Descricao,
    ));
    if let Some(erro) = linha_erro(&d.erros, "descricao") {
        linhas.push(erro);
    }
    linhas.push(linha_campo(
        "Imagem (URL ou data:)",
        &d.imagem,
        d.foco == CampoProduto::Imagem,
    ));
    if let Some(erro) = linha_erro(&d.erros, "imagem") {
        linhas.push(erro);
    }
    linhas.push(linha_campo(
        "Categoria",
        &categoria_texto,
        d.foco == CampoProduto::Categoria,
    ));
    linhas.push(Line::from(""));
    linhas.push(rodape_dialogo(app));

    let titulo = if d.edicao.is_some() {
        "Editar produto"
    } else {
        "Cadastrar produto"
    };
    frame.render_widget(
        Paragraph::new(linhas)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(titulo)),
        area,
    );
}

fn desenhar_dialogo_cardapio(frame: &mut Frame, app: &App, d: &DialogoCardapio) {
    let area = area_central(frame.area(), 60, 18);
    frame.render_widget(Clear, area);

    let turno_texto = match (d.turno, d.turno_travado()) {
        (Some(turno), true) => format!("{} (fixo)", turno.rotulo()),
        (Some(turno), false) => format!("◀ {} ▶", turno.rotulo()),
        (None, _) => "◀ Selecione um turno ▶".to_string(),
    };

    let mut linhas = vec![linha_campo("Turno", &turno_texto, false)];
    if let Some(erro) = linha_erro(&d.erros, "turno") {
        linhas.push(erro);
    }
    linhas.push(Line::from(""));
    linhas.push(Line::from(Span::styled(
        "  Produtos (espaço marca/desmarca):",
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let produtos = app.produtos();
    if produtos.is_empty() {
        linhas.push(Line::from(Span::styled(
            "  Carregando produtos...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, produto) in produtos.iter().enumerate() {
        let marcado = produto
            .id
            .map(|id| d.selecionados.contains(&id))
            .unwrap_or(false);
        let caixa = if marcado { "[x]" } else { "[ ]" };
        let cursor = if i == d.cursor { "▶" } else { " " };
        let estilo = if i == d.cursor {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        linhas.push(Line::from(Span::styled(
            format!("  {cursor} {caixa} {}", produto.nome),
            estilo,
        )));
    }
    if let Some(erro) = linha_erro(&d.erros, "produto_ids") {
        linhas.push(erro);
    }
    linhas.push(Line::from(""));
    linhas.push(rodape_dialogo(app));

    let titulo = if d.edicao.is_some() {
        "Editar cardápio"
    } else {
        "Cadastrar cardápio"
    };
    frame.render_widget(
        Paragraph::new(linhas).block(Block::default().borders(Borders::ALL).title(titulo)),
        area,
    );
}

// --- Auxiliares ---

fn desenhar_carregando(frame: &mut Frame, area: Rect, texto: &str) {
    let painel = Paragraph::new(Line::from(Span::styled(
        texto.to_string(),
        Style::default().fg(Color::Yellow),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(painel, area);
}

fn desenhar_erro(frame: &mut Frame, area: Rect, titulo: &str, detalhe: &str) {
    let painel = Paragraph::new(vec![
        Line::from(Span::styled(
            titulo.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(detalhe.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Tecle r para tentar de novo.",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(painel, area);
}

fn texto_id(id: Option<i64>) -> String {
    id.map(|v| v.to_string()).unwrap_or_else(|| "—".to_string())
}

fn nome_da_categoria(app: &App, id: Option<i64>) -> String {
    let Some(id) = id else {
        return "—".to_string();
    };
    app.categorias()
        .iter()
        .find(|c| c.id == Some(id))
        .map(|c| c.nome.clone())
        // cache de categorias ainda não chegou; mostra o id cru
        .unwrap_or_else(|| id.to_string())
}

fn area_central(area: Rect, largura: u16, altura: u16) -> Rect {
    let largura = largura.min(area.width);
    let altura = altura.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(largura)) / 2,
        y: area.y + (area.height.saturating_sub(altura)) / 2,
        width: largura,
        height: altura,
    }
}
