//! CLDR-derived number and currency conventions per locale.

use crate::FormatError;

/// Where the currency symbol goes relative to the digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPlacement {
    /// `$1.00`, or `R$ 1,00` when `spaced`.
    Prefix { spaced: bool },
    /// `1,00 €`, always separated by a no-break space.
    Suffix,
}

/// Formatting conventions of one locale.
#[derive(Debug, PartialEq, Eq)]
pub struct LocaleRules {
    pub tag: &'static str,
    pub decimal_separator: char,
    pub group_separator: char,
    /// Integer digits needed beyond the first group before grouping kicks in.
    pub min_grouping_digits: usize,
    pub placement: SymbolPlacement,
    /// Symbols that differ from the root table in this locale.
    pub symbol_overrides: &'static [(&'static str, &'static str)],
}

impl LocaleRules {
    /// Looks up rules by tag.
    ///
    /// Accepts `pt-BR`, `pt_br` or a bare language (`pt`), which maps to the
    /// first supported locale of that language.
    pub fn find(tag: &str) -> Result<&'static LocaleRules, FormatError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(FormatError::MissingLocale);
        }
        let normalized = tag.replace('_', "-");

        if let Some(rules) = SUPPORTED_LOCALES
            .iter()
            .find(|rules| rules.tag.eq_ignore_ascii_case(&normalized))
        {
            return Ok(rules);
        }

        if !normalized.contains('-') {
            if let Some(rules) = SUPPORTED_LOCALES
                .iter()
                .find(|rules| rules.language().eq_ignore_ascii_case(&normalized))
            {
                return Ok(rules);
            }
        }

        Err(FormatError::UnsupportedLocale(tag.to_string()))
    }

    pub fn language(&self) -> &'static str {
        self.tag.split('-').next().unwrap_or(self.tag)
    }

    /// Symbol for `code` in this locale; the code itself when unknown.
    pub fn symbol_for<'a>(&self, code: &'a str) -> &'a str {
        self.symbol_overrides
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, symbol)| *symbol)
            .or_else(|| crate::currency_symbol(code))
            .unwrap_or(code)
    }
}

const NBSP: char = '\u{a0}';
const NARROW_NBSP: char = '\u{202f}';

pub static SUPPORTED_LOCALES: &[LocaleRules] = &[
    LocaleRules {
        tag: "en-US",
        decimal_separator: '.',
        group_separator: ',',
        min_grouping_digits: 1,
        placement: SymbolPlacement::Prefix { spaced: false },
        symbol_overrides: &[],
    },
    LocaleRules {
        tag: "en-GB",
        decimal_separator: '.',
        group_separator: ',',
        min_grouping_digits: 1,
        placement: SymbolPlacement::Prefix { spaced: false },
        symbol_overrides: &[("USD", "US$")],
    },
    LocaleRules {
        tag: "pt-BR",
        decimal_separator: ',',
        group_separator: '.',
        min_grouping_digits: 1,
        placement: SymbolPlacement::Prefix { spaced: true },
        symbol_overrides: &[("USD", "US$"), ("JPY", "JP¥")],
    },
    LocaleRules {
        tag: "de-DE",
        decimal_separator: ',',
        group_separator: '.',
        min_grouping_digits: 1,
        placement: SymbolPlacement::Suffix,
        symbol_overrides: &[],
    },
    LocaleRules {
        tag: "fr-FR",
        decimal_separator: ',',
        group_separator: NARROW_NBSP,
        min_grouping_digits: 1,
        placement: SymbolPlacement::Suffix,
        symbol_overrides: &[
            ("USD", "$US"),
            ("GBP", "£GB"),
            ("CAD", "$CA"),
            ("AUD", "$AU"),
            ("JPY", "JPY"),
        ],
    },
    LocaleRules {
        tag: "es-ES",
        decimal_separator: ',',
        group_separator: '.',
        min_grouping_digits: 2,
        placement: SymbolPlacement::Suffix,
        symbol_overrides: &[("USD", "US$"), ("JPY", "JPY"), ("GBP", "GBP")],
    },
    LocaleRules {
        tag: "ja-JP",
        decimal_separator: '.',
        group_separator: ',',
        min_grouping_digits: 1,
        placement: SymbolPlacement::Prefix { spaced: false },
        symbol_overrides: &[("JPY", "￥"), ("CNY", "元")],
    },
];

/// Separator placed between a symbol and the digits.
pub(crate) const SYMBOL_SPACE: char = NBSP;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_exact_and_normalized() {
        assert_eq!(LocaleRules::find("pt-BR").unwrap().tag, "pt-BR");
        assert_eq!(LocaleRules::find("pt_br").unwrap().tag, "pt-BR");
        assert_eq!(LocaleRules::find(" DE-de ").unwrap().tag, "de-DE");
    }

    #[test]
    fn test_find_by_language() {
        assert_eq!(LocaleRules::find("en").unwrap().tag, "en-US");
        assert_eq!(LocaleRules::find("ja").unwrap().tag, "ja-JP");
    }

    #[test]
    fn test_missing_and_unsupported() {
        assert_eq!(LocaleRules::find(""), Err(FormatError::MissingLocale));
        assert_eq!(
            LocaleRules::find("xx-YY"),
            Err(FormatError::UnsupportedLocale("xx-YY".into()))
        );
        // region variant of a known language is not silently remapped
        assert!(LocaleRules::find("pt-PT").is_err());
    }

    #[test]
    fn test_symbol_overrides() {
        let pt = LocaleRules::find("pt-BR").unwrap();
        assert_eq!(pt.symbol_for("USD"), "US$");
        assert_eq!(pt.symbol_for("BRL"), "R$");
        assert_eq!(pt.symbol_for("XYZ"), "XYZ");

        let us = LocaleRules::find("en-US").unwrap();
        assert_eq!(us.symbol_for("USD"), "$");
    }
}
