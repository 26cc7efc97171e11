//! The currency formatter.

use crate::locale::{LocaleRules, SYMBOL_SPACE, SymbolPlacement};
use crate::{FormatError, minor_units};

/// Formats amounts as currency strings for one fixed locale.
///
/// Stateless apart from the locale chosen at construction; cheap to copy
/// and safe to share between threads.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyFormatter {
    rules: &'static LocaleRules,
}

impl CurrencyFormatter {
    /// Creates a formatter for `locale` (e.g. `"pt-BR"`).
    pub fn new(locale: &str) -> Result<Self, FormatError> {
        Ok(Self {
            rules: LocaleRules::find(locale)?,
        })
    }

    /// The canonical tag of the resolved locale.
    pub fn locale(&self) -> &'static str {
        self.rules.tag
    }

    /// Formats `value` as an amount of `currency_code`.
    ///
    /// Fails only when the code is empty.
    pub fn format(&self, value: f64, currency_code: &str) -> Result<String, FormatError> {
        let code = currency_code.trim().to_ascii_uppercase();
        if code.is_empty() {
            return Err(FormatError::EmptyCurrencyCode);
        }

        let symbol = self.rules.symbol_for(&code);
        let digits = self.format_digits(value, minor_units(&code));
        let negative = value.is_sign_negative() && value != 0.0 && !value.is_nan();

        let mut out = String::with_capacity(digits.len() + symbol.len() + 3);
        if negative {
            out.push('-');
        }
        match self.rules.placement {
            SymbolPlacement::Prefix { spaced } => {
                out.push_str(symbol);
                // currency spacing: letters never touch digits
                if spaced || symbol.chars().last().is_some_and(char::is_alphabetic) {
                    out.push(SYMBOL_SPACE);
                }
                out.push_str(&digits);
            }
            SymbolPlacement::Suffix => {
                out.push_str(&digits);
                out.push(SYMBOL_SPACE);
                out.push_str(symbol);
            }
        }
        Ok(out)
    }

    /// Absolute value with locale separators and `decimals` fraction digits.
    fn format_digits(&self, value: f64, decimals: u8) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return "∞".to_string();
        }

        let plain = format!("{:.*}", decimals as usize, value.abs());
        let (int_part, frac_part) = match plain.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (plain.as_str(), None),
        };

        let mut out = self.group(int_part);
        if let Some(frac_part) = frac_part {
            out.push(self.rules.decimal_separator);
            out.push_str(frac_part);
        }
        out
    }

    fn group(&self, int_part: &str) -> String {
        if int_part.len() < 3 + self.rules.min_grouping_digits {
            return int_part.to_string();
        }

        let len = int_part.len();
        let mut out = String::with_capacity(len + len / 3 * 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(self.rules.group_separator);
            }
            out.push(ch);
        }
        out
    }
}
