//! vi-VN display formatting: dot thousands grouping, đồng suffix.
//! Presentation only, the numeric results are never touched.

/// Groups a whole amount with dots: 1040000 -> "1.040.000".
pub fn group(n: u64) -> String {
    group_digits(&n.to_string())
}

/// Currency rendering for a whole-unit amount: "1.040.000 ₫".
pub fn vnd(n: u64) -> String {
    format!("{} ₫", group(n))
}

/// Live echo for a digit-only field being typed: grouped, or empty.
/// Works on the string itself, so a populated field never blanks no
/// matter how many digits are typed.
pub fn echo(field: &str) -> String {
    if field.is_empty() {
        return String::new();
    }
    let significant = field.trim_start_matches('0');
    if significant.is_empty() {
        "0".to_string()
    } else {
        group_digits(significant)
    }
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_threes() {
        assert_eq!(group(0), "0");
        assert_eq!(group(999), "999");
        assert_eq!(group(1_000), "1.000");
        assert_eq!(group(40_000), "40.000");
        assert_eq!(group(1_040_000), "1.040.000");
        assert_eq!(group(5_250_000), "5.250.000");
    }

    #[test]
    fn currency_suffix() {
        assert_eq!(vnd(1_400_000), "1.400.000 ₫");
    }

    #[test]
    fn echo_of_empty_field_is_empty() {
        assert_eq!(echo(""), "");
        assert_eq!(echo("500000"), "500.000");
    }

    #[test]
    fn echo_drops_leading_zeros() {
        assert_eq!(echo("007"), "7");
        assert_eq!(echo("000"), "0");
    }

    #[test]
    fn echo_survives_amounts_past_u64() {
        assert_eq!(
            echo("123456789012345678901"),
            "123.456.789.012.345.678.901"
        );
    }
}
