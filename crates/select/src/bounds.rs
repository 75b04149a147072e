//! Order bounds and manual-order validation.

use helios_arimax::Order;

use crate::error::SelectError;

/// Admissible region for the (p, d, q) search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderBounds {
    /// Largest admissible AR order.
    pub max_p: usize,
    /// Largest admissible MA order.
    pub max_q: usize,
    /// Largest admissible differencing order.
    pub max_d: usize,
}

impl Default for OrderBounds {
    fn default() -> Self {
        Self {
            max_p: 5,
            max_q: 5,
            max_d: 2,
        }
    }
}

/// Validates a caller-supplied order against the bounds and returns it
/// unchanged.
///
/// Non-negativity is carried by the types; this checks the upper bounds
/// only.
///
/// # Errors
///
/// Returns [`SelectError::InvalidOrder`] naming the violated bound.
pub fn validate_manual(order: Order, bounds: &OrderBounds) -> Result<Order, SelectError> {
    if order.p > bounds.max_p {
        return Err(SelectError::InvalidOrder {
            order,
            reason: format!("p exceeds max_p={}", bounds.max_p),
        });
    }
    if order.d > bounds.max_d {
        return Err(SelectError::InvalidOrder {
            order,
            reason: format!("d exceeds max_d={}", bounds.max_d),
        });
    }
    if order.q > bounds.max_q {
        return Err(SelectError::InvalidOrder {
            order,
            reason: format!("q exceeds max_q={}", bounds.max_q),
        });
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds() {
        let b = OrderBounds::default();
        assert_eq!((b.max_p, b.max_d, b.max_q), (5, 2, 5));
    }

    #[test]
    fn valid_order_passes_through() {
        let order = Order::new(3, 2, 5);
        let out = validate_manual(order, &OrderBounds::default()).unwrap();
        assert_eq!(out, order);
    }

    #[test]
    fn p_out_of_bounds() {
        let err = validate_manual(Order::new(6, 0, 0), &OrderBounds::default()).unwrap_err();
        assert!(err.to_string().contains("p exceeds max_p=5"));
    }

    #[test]
    fn d_out_of_bounds() {
        let err = validate_manual(Order::new(0, 3, 0), &OrderBounds::default()).unwrap_err();
        assert!(err.to_string().contains("d exceeds max_d=2"));
    }

    #[test]
    fn q_out_of_bounds() {
        let err = validate_manual(Order::new(0, 0, 6), &OrderBounds::default()).unwrap_err();
        assert!(err.to_string().contains("q exceeds max_q=5"));
    }
}
