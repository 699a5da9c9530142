//! Money calculation utilities using rust_decimal for precision
//!
//! All arithmetic is done with `Decimal` internally, then converted back
//! to `f64` for storage and the wire, rounded to 2 decimal places.

use crate::models::LineItem;
use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum accepted user-entered amount
const MAX_AMOUNT: f64 = 100_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Line total for one item (price × quantity)
pub fn line_total(item: &LineItem) -> Decimal {
    to_decimal(item.price) * Decimal::from(item.quantity)
}

/// Sum of line totals in currency unit
pub fn subtotal(items: &[LineItem]) -> f64 {
    let total: Decimal = items.iter().map(line_total).sum();
    to_f64(total)
}

/// Tax owed on a subtotal (`subtotal × rate`)
pub fn tax_amount(subtotal: f64, tax_rate: f64) -> f64 {
    to_f64(to_decimal(subtotal) * to_decimal(tax_rate))
}

/// Subtotal plus tax (`subtotal + subtotal × rate`)
pub fn final_total(subtotal: f64, tax_rate: f64) -> f64 {
    let sub = to_decimal(subtotal);
    to_f64(sub + sub * to_decimal(tax_rate))
}

/// Tendered minus total; negative when underpaid
pub fn change(paid: f64, total: f64) -> f64 {
    to_f64(to_decimal(paid) - to_decimal(total))
}

/// User-entered tax percentage to a fraction (5 → 0.05)
///
/// Rates are not rounded to monetary precision; 2.5% stays 0.025.
pub fn percent_to_rate(percent: f64) -> f64 {
    (to_decimal(percent) / Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or_default()
}

/// Parse a user-entered amount
///
/// Rejects non-numeric input, non-finite values, negatives, and amounts
/// above [`MAX_AMOUNT`].
pub fn parse_amount(input: &str) -> Option<f64> {
    let value: f64 = input.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 || value > MAX_AMOUNT {
        return None;
    }
    Some(value)
}

/// Format an amount for display with thousands separators ("10,500 MMK")
///
/// Whole amounts print without decimals, fractional amounts with two.
pub fn format_amount(value: f64) -> String {
    let dec = to_decimal(value)
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    let negative = dec.is_sign_negative() && !dec.is_zero();
    let abs = dec.abs();
    let units = abs.trunc().to_i64().unwrap_or_default();
    let cents = ((abs - abs.trunc()) * Decimal::ONE_HUNDRED)
        .round()
        .to_u32()
        .unwrap_or_default();

    let digits = units.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 + 8);
    if negative {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if cents > 0 {
        out.push('.');
        out.push_str(&format!("{:02}", cents));
    }
    out.push_str(" MMK");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        let sum_dec = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum_dec), 0.3);
    }

    #[test]
    fn test_subtotal_sums_line_totals() {
        let items = vec![
            LineItem::new("Fries", 3000.0, 2),
            LineItem::new("Burger", 4000.0, 1),
        ];
        assert_eq!(subtotal(&items), 10000.0);
    }

    #[test]
    fn test_final_total_five_percent() {
        // subtotal 10000 at 5% tax yields exactly 10500
        assert_eq!(final_total(10000.0, 0.05), 10500.0);
        assert_eq!(tax_amount(10000.0, 0.05), 500.0);
    }

    #[test]
    fn test_final_total_zero_rate() {
        assert_eq!(final_total(1234.56, 0.0), 1234.56);
    }

    #[test]
    fn test_percent_to_rate() {
        assert_eq!(percent_to_rate(5.0), 0.05);
        assert_eq!(percent_to_rate(100.0), 1.0);
        assert_eq!(percent_to_rate(0.0), 0.0);
        // Fractional percentages keep full precision
        assert_eq!(percent_to_rate(2.5), 0.025);
    }

    #[test]
    fn test_change_can_be_negative() {
        assert_eq!(change(10000.0, 10500.0), -500.0);
        assert_eq!(change(11000.0, 10500.0), 500.0);
        assert_eq!(change(10500.0, 10500.0), 0.0);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12.5"), Some(12.5));
        assert_eq!(parse_amount(" 10000 "), Some(10000.0));
        assert_eq!(parse_amount("-3"), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("200000000"), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(10500.0), "10,500 MMK");
        assert_eq!(format_amount(1234567.5), "1,234,567.50 MMK");
        assert_eq!(format_amount(0.0), "0 MMK");
        assert_eq!(format_amount(999.0), "999 MMK");
        assert_eq!(format_amount(-500.0), "-500 MMK");
    }

    #[test]
    fn test_accumulation_precision() {
        // One thousand 0.01 lines sum to exactly 10
        let items: Vec<LineItem> = (0..1000)
            .map(|i| LineItem::new(format!("item-{}", i), 0.01, 1))
            .collect();
        assert_eq!(subtotal(&items), 10.0);
    }
}
