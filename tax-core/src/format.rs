//! Indian-system number formatting (lakhs and crores).
//!
//! Digits are grouped three from the right, then in pairs:
//! `1,23,45,678`. Amounts are shown to at most two decimal places with
//! trailing zeros dropped.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::round_half_up;
use crate::models::TaxSlab;

const CRORE: Decimal = dec!(10000000);
const LAKH: Decimal = dec!(100000);
const THOUSAND: Decimal = dec!(1000);

/// Groups a string of ASCII digits the Indian way.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::format::format_indian_number;
///
/// assert_eq!(format_indian_number(dec!(1234567)), "12,34,567");
/// assert_eq!(format_indian_number(dec!(209375.50)), "2,09,375.5");
/// ```
pub fn format_indian_number(amount: Decimal) -> String {
    let rounded = round_half_up(amount).normalize();
    if rounded.is_zero() {
        return "0".to_string();
    }

    let text = rounded.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("{sign}{}.{fraction}", group_indian(integer)),
        None => format!("{sign}{}", group_indian(integer)),
    }
}

/// `Rs. 12,34,567`
pub fn format_indian_currency(amount: Decimal) -> String {
    format!("Rs. {}", format_indian_number(amount))
}

/// Label for a slab: `Rs. 4,00,000 - Rs. 8,00,000`, or `Rs. 24,00,000+` for
/// the unbounded top slab.
pub fn slab_label(slab: &TaxSlab) -> String {
    match slab.upper_bound {
        Some(upper) => format!(
            "{} - {}",
            format_indian_currency(slab.lower_bound),
            format_indian_currency(upper)
        ),
        None => format!("{}+", format_indian_currency(slab.lower_bound)),
    }
}

/// Spells an amount in crores, lakhs and thousands.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::format::amount_in_words;
///
/// assert_eq!(amount_in_words(dec!(12345678)), "1 crore 23 lakhs 45 thousand 678");
/// ```
pub fn amount_in_words(amount: Decimal) -> String {
    if amount.is_zero() {
        return "Zero".to_string();
    }
    if amount.is_sign_negative() {
        return format!("Negative {}", amount_in_words(-amount));
    }

    let mut remaining = round_half_up(amount);
    let mut parts = Vec::new();

    let crores = (remaining / CRORE).trunc();
    if crores >= Decimal::ONE {
        let plural = if crores > Decimal::ONE { "s" } else { "" };
        parts.push(format!("{crores} crore{plural}"));
        remaining -= crores * CRORE;
    }

    let lakhs = (remaining / LAKH).trunc();
    if lakhs >= Decimal::ONE {
        let plural = if lakhs > Decimal::ONE { "s" } else { "" };
        parts.push(format!("{lakhs} lakh{plural}"));
        remaining -= lakhs * LAKH;
    }

    let thousands = (remaining / THOUSAND).trunc();
    if thousands >= Decimal::ONE {
        parts.push(format!("{thousands} thousand"));
        remaining -= thousands * THOUSAND;
    }

    if remaining > Decimal::ZERO {
        parts.push(remaining.normalize().to_string());
    }

    parts.join(" ")
}

/// Currency with its spelling: `Rs. 2,09,375 (2 lakhs 9 thousand 375)`.
pub fn indian_amount_display(amount: Decimal) -> String {
    format!(
        "{} ({})",
        format_indian_currency(amount),
        amount_in_words(amount)
    )
}
