//! Locale-Aware Currency Formatting
//!
//! Turns `(value, currency code)` into a display string such as `$1,234.50`,
//! `US$ 0,00` or `1.234,56 €`, following CLDR conventions for a fixed set of
//! locales. Currency symbols and decimal precision come from a table that is
//! declared once with the `define_currencies!` macro.
//!
//! # Adding a New Currency
//! Add a line to the `define_currencies!` invocation below:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     ISK => ("ISK", 0),
//! }
//! ```
//!
//! # Example
//! ```
//! use fx_format::CurrencyFormatter;
//!
//! let formatter = CurrencyFormatter::new("pt-BR").unwrap();
//! assert_eq!(formatter.format(0.0, "USD").unwrap(), "US$\u{a0}0,00");
//! ```

mod formatter;
mod locale;

pub use formatter::CurrencyFormatter;
pub use locale::{LocaleRules, SUPPORTED_LOCALES, SymbolPlacement};

/// Errors raised while building a formatter or formatting a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Locale missing")]
    MissingLocale,

    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Currency code is empty")]
    EmptyCurrencyCode,
}

/// Decimal places used when a currency is not in the table.
pub const DEFAULT_MINOR_UNITS: u8 = 2;

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the currency table and its lookups
// ─────────────────────────────────────────────────────────────────────────────

/// Declares the currency table.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     CODE => ("SYMBOL", minor_units),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $code:ident => ($symbol:literal, $minor:expr)
        ),* $(,)?
    ) => {
        /// Default (root locale) symbol for a currency code.
        pub fn currency_symbol(code: &str) -> Option<&'static str> {
            match code {
                $(stringify!($code) => Some($symbol),)*
                _ => None,
            }
        }

        /// ISO 4217 minor units (decimal places) for a currency code.
        pub fn minor_units(code: &str) -> u8 {
            match code {
                $(stringify!($code) => $minor,)*
                _ => DEFAULT_MINOR_UNITS,
            }
        }

        /// Every code in the table.
        pub fn known_codes() -> &'static [&'static str] {
            &[$(stringify!($code)),*]
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    USD => ("$", 2),
    EUR => ("€", 2),
    GBP => ("£", 2),
    JPY => ("¥", 0),
    BRL => ("R$", 2),
    INR => ("₹", 2),
    CNY => ("CN¥", 2),
    CAD => ("CA$", 2),
    AUD => ("A$", 2),
    NZD => ("NZ$", 2),
    MXN => ("MX$", 2),
    HKD => ("HK$", 2),
    KRW => ("₩", 0),
    ILS => ("₪", 2),
    VND => ("₫", 0),
    TWD => ("NT$", 2),
    PHP => ("₱", 2),
    XAF => ("FCFA", 0),
    XOF => ("F\u{202f}CFA", 0),
    CLP => ("CLP", 0),
    ISK => ("ISK", 0),
    HUF => ("HUF", 2),
    BHD => ("BHD", 3),
    KWD => ("KWD", 3),
    JOD => ("JOD", 3),
    OMR => ("OMR", 3),
    TND => ("TND", 3),
}
