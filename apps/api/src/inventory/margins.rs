//! Derived money fields for resale vehicles. Absence of either operand
//! propagates to `None` — a missing cost basis must not masquerade as a
//! 100%-profit flip.

/// `asking_price - cost_basis`, or `None` when either is absent.
pub fn profit(asking_price: Option<f64>, cost_basis: Option<f64>) -> Option<f64> {
    Some(asking_price? - cost_basis?)
}

/// `(asking_price - cost_basis) / cost_basis * 100`, or `None` when either is
/// absent or the cost basis is exactly zero. No rounding here — display
/// precision is the caller's concern.
pub fn margin_percent(asking_price: Option<f64>, cost_basis: Option<f64>) -> Option<f64> {
    let (ask, cost) = (asking_price?, cost_basis?);
    if cost == 0.0 {
        return None;
    }
    Some((ask - cost) / cost * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profit_subtracts() {
        assert_eq!(profit(Some(150_000.0), Some(100_000.0)), Some(50_000.0));
        assert_eq!(profit(Some(90_000.0), Some(100_000.0)), Some(-10_000.0));
    }

    #[test]
    fn test_profit_propagates_missing_operands() {
        assert_eq!(profit(None, Some(100_000.0)), None);
        assert_eq!(profit(Some(150_000.0), None), None);
        assert_eq!(profit(None, None), None);
    }

    #[test]
    fn test_margin_percent_computes() {
        assert_eq!(margin_percent(Some(120_000.0), Some(100_000.0)), Some(20.0));
    }

    #[test]
    fn test_margin_percent_guards_zero_cost() {
        assert_eq!(margin_percent(Some(120_000.0), Some(0.0)), None);
        assert_eq!(margin_percent(Some(0.0), Some(0.0)), None);
    }

    #[test]
    fn test_margin_percent_propagates_missing_operands() {
        assert_eq!(margin_percent(None, Some(100_000.0)), None);
        assert_eq!(margin_percent(Some(120_000.0), None), None);
    }

    #[test]
    fn test_margin_percent_is_unrounded() {
        // 1/3 of cost — keeps full float precision
        let margin = margin_percent(Some(4.0), Some(3.0)).unwrap();
        assert!((margin - 33.333333333333336).abs() < 1e-9);
    }
}
