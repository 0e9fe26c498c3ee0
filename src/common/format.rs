// src/common/format.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Formata um valor monetário no padrão brasileiro: `R$ 1.234,56`.
pub fn moeda(valor: Decimal) -> String {
    let arredondado = valor.round_dp(2);
    let texto = format!("{:.2}", arredondado.abs());
    let (inteiro, centavos) = texto.split_once('.').unwrap_or((texto.as_str(), "00"));

    // Separador de milhar a cada três dígitos, da direita para a esquerda.
    let mut agrupado = String::new();
    for (i, c) in inteiro.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(c);
    }
    let inteiro: String = agrupado.chars().rev().collect();

    let sinal = if valor.is_sign_negative() && !valor.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sinal}R$ {inteiro},{centavos}")
}

/// Data no formato pt-BR (dd/mm/aaaa), como o front exibia com
/// `toLocaleDateString("pt-BR")`.
pub fn data(instante: &DateTime<Utc>) -> String {
    instante.format("%d/%m/%Y").to_string()
}

/// Mesma formatação, mas para campos opcionais de timestamp.
pub fn data_opcional(instante: Option<&DateTime<Utc>>) -> String {
    instante.map(data).unwrap_or_else(|| "—".to_string())
}
