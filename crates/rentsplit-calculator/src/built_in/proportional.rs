//! Proportional allocation
//!
//! Distributes `total_amount` proportionally based on an `individual_value`
//! relative to an `aggregate_value`.
//!
//! result = total_amount * (individual_value / aggregate_value)
//!
//! Returns 0 when `aggregate_value` is 0.

/// Share of `total_amount` owed by a part worth `individual_value` out of
/// `aggregate_value`.
pub fn proportional_share(total_amount: f64, individual_value: f64, aggregate_value: f64) -> f64 {
    if aggregate_value == 0.0 {
        return 0.0;
    }
    total_amount * (individual_value / aggregate_value)
}

/// Splits `total_amount` evenly between `parts`. Returns 0 for zero parts.
pub fn equal_share(total_amount: f64, parts: usize) -> f64 {
    if parts == 0 {
        return 0.0;
    }
    total_amount / parts as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_allocator_works() {
        assert_eq!(proportional_share(1000.0, 10.0, 100.0), 100.0);
        assert!((proportional_share(450.0, 30.0, 45.0) - 300.0).abs() < 1e-9);
    }

    #[test]
    fn zero_aggregate_allocates_nothing() {
        assert_eq!(proportional_share(1000.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn equal_share_divides_evenly() {
        assert_eq!(equal_share(90.0, 3), 30.0);
        assert_eq!(equal_share(90.0, 0), 0.0);
    }
}
