//! Fixed display formatting shared by tooltips, axes and cards.

pub const CURRENCY_PREFIX: &str = "R$";

/// `R$ 57.51`
pub fn currency(value: f64) -> String {
    format!("{} {:.2}", CURRENCY_PREFIX, value)
}

/// `$ 9.83`, used for forecast-range amounts in the risk chart.
pub fn amount(value: f64) -> String {
    format!("$ {:.2}", value)
}

/// `11.7%`
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// `+11.7%`, `-3.2%`, `0.0%`
pub fn signed_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{:.1}%", value)
    } else {
        percent(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_uses_two_decimals() {
        assert_eq!(currency(57.51), "R$ 57.51");
        assert_eq!(currency(3.4), "R$ 3.40");
        assert_eq!(amount(9.829999), "$ 9.83");
    }

    #[test]
    fn percentages_use_one_decimal() {
        assert_eq!(percent(11.6849), "11.7%");
        assert_eq!(signed_percent(11.6849), "+11.7%");
        assert_eq!(signed_percent(-3.21), "-3.2%");
        assert_eq!(signed_percent(0.0), "0.0%");
    }
}
