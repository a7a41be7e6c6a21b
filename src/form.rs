use chrono::NaiveDate;

use crate::calc::{CalcError, InterestSpec, LoanTerms};

/// Mutable field state held by the UI. The calculator itself never sees
/// these strings; `parse` turns them into typed terms or a blocking error.
#[derive(Debug, Clone, Default)]
pub struct LoanForm {
    pub principal: String,
    pub start_date: String,
    pub end_date: String,
    pub interest: String,
    pub use_percent: bool,
}

impl LoanForm {
    pub fn parse(&self, today: NaiveDate) -> Result<LoanTerms, CalcError> {
        if self.principal.is_empty()
            || self.interest.is_empty()
            || self.start_date.is_empty()
            || self.end_date.is_empty()
        {
            return Err(CalcError::MissingInput);
        }

        let principal: f64 = self
            .principal
            .parse()
            .map_err(|_| CalcError::InvalidNumber)?;
        let interest_value: f64 = self
            .interest
            .parse()
            .map_err(|_| CalcError::InvalidNumber)?;
        if !principal.is_finite() || !interest_value.is_finite() {
            return Err(CalcError::InvalidNumber);
        }

        let start = parse_date(&self.start_date).ok_or(CalcError::MissingInput)?;
        let end = parse_date(&self.end_date).ok_or(CalcError::MissingInput)?;
        if start > today {
            return Err(CalcError::StartInFuture);
        }
        if end <= start {
            return Err(CalcError::DateOrder);
        }

        let interest = if self.use_percent {
            InterestSpec::Percent(interest_value)
        } else {
            InterestSpec::Flat(interest_value)
        };
        Ok(LoanTerms {
            principal,
            start,
            end,
            interest,
        })
    }

    pub fn reset(&mut self) {
        let use_percent = self.use_percent;
        *self = LoanForm {
            use_percent,
            ..LoanForm::default()
        };
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Keeps only digit characters, matching the free-text amount inputs that
/// strip everything else as the user types.
pub fn digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> LoanForm {
        LoanForm {
            principal: "1000000".into(),
            start_date: "2024-01-01".into(),
            end_date: "2024-01-31".into(),
            interest: "40000".into(),
            use_percent: false,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn parses_flat_mode() {
        let terms = filled().parse(today()).unwrap();
        assert_eq!(terms.principal, 1_000_000.0);
        assert_eq!(terms.interest, InterestSpec::Flat(40_000.0));
        assert_eq!((terms.end - terms.start).num_days(), 30);
    }

    #[test]
    fn parses_percent_mode() {
        let mut form = filled();
        form.use_percent = true;
        form.interest = "5".into();
        let terms = form.parse(today()).unwrap();
        assert_eq!(terms.interest, InterestSpec::Percent(5.0));
    }

    #[test]
    fn empty_field_is_missing_input() {
        for clear in [0, 1, 2, 3] {
            let mut form = filled();
            match clear {
                0 => form.principal.clear(),
                1 => form.start_date.clear(),
                2 => form.end_date.clear(),
                _ => form.interest.clear(),
            }
            assert_eq!(form.parse(today()), Err(CalcError::MissingInput));
        }
    }

    #[test]
    fn garbage_amount_is_invalid_number() {
        let mut form = filled();
        form.principal = "1,000,000".into();
        assert_eq!(form.parse(today()), Err(CalcError::InvalidNumber));
    }

    #[test]
    fn future_start_rejected() {
        let mut form = filled();
        form.start_date = "2024-07-01".into();
        form.end_date = "2024-08-01".into();
        assert_eq!(form.parse(today()), Err(CalcError::StartInFuture));
    }

    #[test]
    fn end_equal_to_start_rejected() {
        let mut form = filled();
        form.end_date = form.start_date.clone();
        assert_eq!(form.parse(today()), Err(CalcError::DateOrder));
    }

    #[test]
    fn reset_clears_fields_but_keeps_mode() {
        let mut form = filled();
        form.use_percent = true;
        form.reset();
        assert!(form.principal.is_empty());
        assert!(form.start_date.is_empty());
        assert!(form.end_date.is_empty());
        assert!(form.interest.is_empty());
        assert!(form.use_percent);
    }

    #[test]
    fn digits_strips_everything_else() {
        assert_eq!(digits("1.000.000đ"), "1000000");
        assert_eq!(digits("abc"), "");
    }
}
