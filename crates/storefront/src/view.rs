//! Pure presentation derivations.
//!
//! Everything here is recomputed from the current mirror on every snapshot
//! and never mutates it.

use greenbasket_core::{CartItem, types::money};

/// Running total over cart lines: `Σ price × quantity`.
///
/// Plain floating-point accumulation; rounding happens only at display time.
#[must_use]
pub fn cart_total(items: &[CartItem]) -> f64 {
    items.iter().map(CartItem::line_total).sum()
}

/// Format a cart total for display, e.g. `$35.00`.
#[must_use]
pub fn format_total(symbol: &str, items: &[CartItem]) -> String {
    money::format_price(symbol, cart_total(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenbasket_core::{CartItemId, ProductId};

    fn line(price: f64, quantity: u32) -> CartItem {
        CartItem {
            id: CartItemId::new("x"),
            product_id: ProductId::new("x"),
            name: String::new(),
            price,
            quantity,
            image_url: String::new(),
            added_at: None,
        }
    }

    #[test]
    fn test_cart_total() {
        let items = vec![line(10.0, 2), line(5.0, 3)];
        assert!((cart_total(&items) - 35.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert!(cart_total(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_format_total() {
        let items = vec![line(10.0, 2), line(5.0, 3)];
        assert_eq!(format_total("$", &items), "$35.00");
    }
}
