//! Level-payment installments and lump-sum growth

/// Level (Price table) installment that amortizes `principal` over `periods` months
///
/// # Arguments
/// * `principal` - Amount financed
/// * `periodic_rate` - Interest per period as a decimal (0.0189 for 1.89%)
/// * `periods` - Number of payments
///
/// A non-positive rate or term falls back to straight-line division, which is
/// what an interest-free schedule looks like.
pub fn installment(principal: f64, periodic_rate: f64, periods: u32) -> f64 {
    if periodic_rate <= 0.0 || periods == 0 {
        return principal / periods.max(1) as f64;
    }

    // 1 - (1+r)^-n, evaluated without cancellation for tiny rates
    let discounted = -(-(periods as f64) * periodic_rate.ln_1p()).exp_m1();
    principal * periodic_rate / discounted
}

/// Future value of a lump sum compounded once per period
pub fn future_value(present_value: f64, rate: f64, periods: u32) -> f64 {
    present_value * (1.0 + rate).powi(periods as i32)
}

/// Convert a percentage input (1.89) to a decimal rate (0.0189)
pub fn pct_to_rate(pct: f64) -> f64 {
    pct / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_installment_matches_annuity_formula() {
        // 16632 financed at 1.89% a month over 60 months
        let p = 16632.0;
        let r = 0.0189_f64;
        let expected = p * (r * (1.0 + r).powi(60)) / ((1.0 + r).powi(60) - 1.0);

        let pmt = installment(p, r, 60);
        assert_abs_diff_eq!(pmt, expected, epsilon = 0.005);
        assert_abs_diff_eq!(pmt, 465.81, epsilon = 0.01);
    }

    #[test]
    fn test_longer_terms_lower_installment() {
        let p = 85000.0;
        let r = 0.0189;
        let p60 = installment(p, r, 60);
        let p90 = installment(p, r, 90);
        let p120 = installment(p, r, 120);

        assert_abs_diff_eq!(p60, 2380.59, epsilon = 0.01);
        assert_abs_diff_eq!(p90, 1972.18, epsilon = 0.01);
        assert_abs_diff_eq!(p120, 1796.44, epsilon = 0.01);
        assert!(p60 > p90 && p90 > p120);
    }

    #[test]
    fn test_interest_makes_payment_exceed_straight_line() {
        for &p in &[1.0, 1000.0, 85000.0] {
            for &r in &[1e-9, 0.0001, 0.0189, 0.179] {
                for &n in &[1_u32, 24, 60, 120] {
                    assert!(installment(p, r, n) > p / n as f64, "p={p} r={r} n={n}");
                }
            }
        }
    }

    #[test]
    fn test_tiny_rates_stay_close_to_straight_line() {
        let p = 85000.0;
        let straight = p / 60.0;

        let pmt = installment(p, 1e-17, 60);
        assert!(pmt.is_finite());
        assert_relative_eq!(pmt, straight, max_relative = 1e-12);

        // P/n x (1 + (n+1)r/2) to first order
        let pmt = installment(p, 1e-13, 60);
        assert_abs_diff_eq!(pmt, straight * (1.0 + 61.0 * 1e-13 / 2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_huge_rate_pays_interest_only() {
        let pmt = installment(1000.0, 1e6, 120);
        assert!(pmt.is_finite());
        assert_relative_eq!(pmt, 1000.0 * 1e6, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_eq!(installment(16632.0, 0.0, 24), 16632.0 / 24.0);
        assert_eq!(installment(1200.0, 0.0, 60), 20.0);
        // Negative rates are treated as interest-free
        assert_eq!(installment(1200.0, -0.01, 12), 100.0);
    }

    #[test]
    fn test_zero_term_does_not_divide_by_zero() {
        assert_eq!(installment(5000.0, 0.02, 0), 5000.0);
        assert_eq!(installment(5000.0, 0.0, 0), 5000.0);
    }

    #[test]
    fn test_future_value() {
        assert_abs_diff_eq!(future_value(85000.0, 0.10, 10), 220468.11, epsilon = 0.01);
        assert_abs_diff_eq!(future_value(85000.0, 0.06, 25), 364809.01, epsilon = 0.01);

        // Zero rate leaves the amount unchanged for any horizon
        for years in [0, 1, 10, 25, 100] {
            assert_eq!(future_value(85000.0, 0.0, years), 85000.0);
        }
    }
}
