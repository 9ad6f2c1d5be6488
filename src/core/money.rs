//! pt-BR display formatting for money, dates and percentages

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format a value as Brazilian reais: `R$ 1.234,56`
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!(
        "{}R$ {},{}",
        if negative { "-" } else { "" },
        group_thousands(int_part),
        frac_part
    )
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// `dd/mm/yyyy`, or `-` when unknown
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// `15%`, `12,5%`
pub fn format_percent(value: Decimal) -> String {
    format!("{}%", value.normalize().to_string().replace('.', ","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(Decimal::from(90)), "R$ 90,00");
        assert_eq!(format_brl(Decimal::new(123456, 2)), "R$ 1.234,56");
        assert_eq!(format_brl(Decimal::new(100000000, 2)), "R$ 1.000.000,00");
        assert_eq!(format_brl(Decimal::new(5, 3)), "R$ 0,01");
        assert_eq!(format_brl(Decimal::new(-25, 1)), "-R$ 2,50");
        assert_eq!(format_brl(Decimal::ZERO), "R$ 0,00");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2022, 3, 4)), "04/03/2022");
        assert_eq!(format_date(None), "-");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Decimal::from(15)), "15%");
        assert_eq!(format_percent(Decimal::new(1250, 2)), "12,5%");
    }
}
