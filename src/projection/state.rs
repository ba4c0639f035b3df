//! Year-by-year savings accumulation state

/// Running totals while stepping through the projection horizon
#[derive(Debug, Clone)]
pub struct SavingsState {
    /// Last completed projection year (0 before the first step)
    pub year: u32,

    /// Savings credited in the current year
    pub contribution: f64,

    /// Savings accumulated up to and including the current year
    pub cumulative: f64,

    /// First year the cumulative savings covered the investment (0 = not yet)
    pub payback_year: u32,

    /// Annual growth applied to the contribution after each year
    growth_rate: f64,

    /// Amount that must be recovered for payback
    investment: f64,
}

impl SavingsState {
    /// Start before year 1 with the base annual savings as first contribution
    pub fn new(annual_base_savings: f64, growth_rate: f64, investment: f64) -> Self {
        Self {
            year: 0,
            contribution: annual_base_savings,
            cumulative: 0.0,
            payback_year: 0,
            growth_rate,
            investment,
        }
    }

    /// Credit one more year of savings
    ///
    /// Year 1 credits the base amount; year k credits base x (1+g)^(k-1).
    pub fn advance_year(&mut self) {
        if self.year > 0 {
            self.contribution *= 1.0 + self.growth_rate;
        }
        self.year += 1;
        self.cumulative += self.contribution;

        // First crossing wins; later years never overwrite it
        if self.payback_year == 0 && self.cumulative >= self.investment {
            self.payback_year = self.year;
        }
    }
}
