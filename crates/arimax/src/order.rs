//! ARIMAX model order.

use serde::{Deserialize, Serialize};

/// The (p, d, q) order of an ARIMAX model: AR lags, differencing passes,
/// and MA lags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Order {
    /// Autoregressive order.
    pub p: usize,
    /// Differencing order.
    pub d: usize,
    /// Moving-average order.
    pub q: usize,
}

impl Order {
    /// Creates a new order triple.
    ///
    /// # Example
    ///
    /// ```
    /// use helios_arimax::Order;
    ///
    /// let order = Order::new(1, 1, 2);
    /// assert_eq!(order.to_string(), "(1,1,2)");
    /// ```
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.p, self.d, self.q)
    }
}

impl std::str::FromStr for Order {
    type Err = String;

    /// Parses "p,d,q" (optionally parenthesised), e.g. "1,1,2" or "(1,1,2)".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("expected 'p,d,q', got '{s}'"));
        }
        let parse = |part: &str| {
            part.parse::<usize>()
                .map_err(|_| format!("'{part}' is not a non-negative integer"))
        };
        Ok(Self {
            p: parse(parts[0])?,
            d: parse(parts[1])?,
            q: parse(parts[2])?,
        })
    }
}
