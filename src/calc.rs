use chrono::NaiveDate;
use thiserror::Error;

/// Monthly interest, in one of the two mutually exclusive modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterestSpec {
    /// Fixed currency amount charged per 30-day month.
    Flat(f64),
    /// Percent of principal charged per 30-day month (5.0 means 5%).
    Percent(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    pub principal: f64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub interest: InterestSpec,
}

/// Everything derived from one calculation. `total_amount` is already
/// rounded to a whole currency unit; the rest keep full precision.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub days: i64,
    pub monthly_interest: f64,
    pub daily_interest: f64,
    pub total_interest: f64,
    pub total_amount: f64,
    pub period: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("Vui lòng điền đầy đủ thông tin!")]
    MissingInput,
    #[error("Số tiền vay và tiền lãi phải là số hợp lệ!")]
    InvalidNumber,
    #[error("Ngày trả phải lớn hơn ngày mượn!")]
    DateOrder,
    #[error("Ngày mượn không được lớn hơn ngày hiện tại!")]
    StartInFuture,
}

/// Computes the quote for a loan. Pure: same terms always give the same
/// quote, nothing is mutated.
pub fn calculate(terms: &LoanTerms) -> Result<Quote, CalcError> {
    if !terms.principal.is_finite() || terms.principal < 0.0 {
        return Err(CalcError::InvalidNumber);
    }
    let rate_value = match terms.interest {
        InterestSpec::Flat(v) | InterestSpec::Percent(v) => v,
    };
    if !rate_value.is_finite() || rate_value < 0.0 {
        return Err(CalcError::InvalidNumber);
    }
    let days = (terms.end - terms.start).num_days();
    if days <= 0 {
        return Err(CalcError::DateOrder);
    }

    let monthly_interest = match terms.interest {
        InterestSpec::Flat(amount) => amount,
        InterestSpec::Percent(rate) => terms.principal * (rate / 100.0),
    };
    // Fixed 30-day month, no calendar awareness. Intentional; do not
    // "correct" to actual month lengths.
    let daily_interest = monthly_interest / 30.0;
    let total_interest = daily_interest * days as f64;
    let total_amount = (terms.principal + total_interest).round();

    Ok(Quote {
        days,
        monthly_interest,
        daily_interest,
        total_interest,
        total_amount,
        period: loan_period(days),
    })
}

/// Decomposes a day count into fixed 365/30 buckets and renders the
/// non-zero components. When both years and months come out zero the day
/// component is always shown, so the string is never empty.
pub fn loan_period(days: i64) -> String {
    let years = days / 365;
    let months = (days % 365) / 30;
    let remaining_days = (days % 365) % 30;

    let mut text = String::new();
    if years > 0 {
        text.push_str(&format!("{} năm ", years));
    }
    if months > 0 {
        text.push_str(&format!("{} tháng ", months));
    }
    if remaining_days > 0 || (years == 0 && months == 0) {
        text.push_str(&format!("{} ngày", remaining_days));
    }
    text.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn terms(principal: f64, interest: InterestSpec, days: i64) -> LoanTerms {
        let start = date(2024, 1, 1);
        LoanTerms {
            principal,
            start,
            end: start + chrono::Duration::days(days),
            interest,
        }
    }

    #[test]
    fn flat_fee_thirty_days() {
        let q = calculate(&terms(1_000_000.0, InterestSpec::Flat(40_000.0), 30)).unwrap();
        assert_eq!(q.days, 30);
        assert!((q.daily_interest - 40_000.0 / 30.0).abs() < 1e-9);
        assert!((q.total_interest - 40_000.0).abs() < 1e-6);
        assert_eq!(q.total_amount, 1_040_000.0);
        assert_eq!(q.period, "1 tháng");
    }

    #[test]
    fn percent_mode_thirty_days() {
        let q = calculate(&terms(5_000_000.0, InterestSpec::Percent(5.0), 30)).unwrap();
        assert!((q.monthly_interest - 250_000.0).abs() < 1e-9);
        assert!((q.total_interest - 250_000.0).abs() < 1e-6);
        assert_eq!(q.total_amount, 5_250_000.0);
        assert_eq!(q.period, "1 tháng");
    }

    #[test]
    fn four_hundred_days() {
        let q = calculate(&terms(1_000_000.0, InterestSpec::Flat(30_000.0), 400)).unwrap();
        assert_eq!(q.days, 400);
        assert_eq!(q.daily_interest, 1_000.0);
        assert_eq!(q.total_interest, 400_000.0);
        assert_eq!(q.total_amount, 1_400_000.0);
        assert_eq!(q.period, "1 năm 1 tháng 5 ngày");
    }

    #[test]
    fn same_day_rejected() {
        let t = terms(1_000_000.0, InterestSpec::Flat(40_000.0), 0);
        assert_eq!(calculate(&t), Err(CalcError::DateOrder));
    }

    #[test]
    fn end_before_start_rejected() {
        let t = terms(1_000_000.0, InterestSpec::Flat(40_000.0), -5);
        assert_eq!(calculate(&t), Err(CalcError::DateOrder));
    }

    #[test]
    fn nan_principal_rejected() {
        let t = terms(f64::NAN, InterestSpec::Flat(40_000.0), 30);
        assert_eq!(calculate(&t), Err(CalcError::InvalidNumber));
    }

    #[test]
    fn negative_rate_rejected() {
        let t = terms(1_000_000.0, InterestSpec::Percent(-1.0), 30);
        assert_eq!(calculate(&t), Err(CalcError::InvalidNumber));
    }

    #[test]
    fn total_never_below_principal() {
        for days in [1, 7, 29, 30, 31, 180, 365, 400, 1000] {
            for rate in [0.0, 0.5, 5.0, 20.0] {
                let q = calculate(&terms(2_500_000.0, InterestSpec::Percent(rate), days)).unwrap();
                assert!(q.total_amount >= 2_500_000.0, "days={days} rate={rate}");
            }
        }
    }

    #[test]
    fn deterministic() {
        let t = terms(3_000_000.0, InterestSpec::Flat(50_000.0), 45);
        assert_eq!(calculate(&t).unwrap(), calculate(&t).unwrap());
    }

    #[test]
    fn short_period_keeps_day_component() {
        assert_eq!(loan_period(1), "1 ngày");
        assert_eq!(loan_period(29), "29 ngày");
    }

    #[test]
    fn exact_month_suppresses_zero_days() {
        assert_eq!(loan_period(30), "1 tháng");
        assert_eq!(loan_period(60), "2 tháng");
    }

    #[test]
    fn exact_year_suppresses_zero_months_and_days() {
        assert_eq!(loan_period(365), "1 năm");
        assert_eq!(loan_period(365 + 30), "1 năm 1 tháng");
        assert_eq!(loan_period(365 + 5), "1 năm 5 ngày");
    }
}
