//! Currency Reference Data
//!
//! The selectable currencies and fee rendering. The selected currency is a
//! label only: the charged amount is always [`BASE_FEE`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Processing fee, in USD
pub const BASE_FEE: Decimal = dec!(7);

/// A selectable currency
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CurrencyOption {
    /// ISO 4217 code
    pub code: &'static str,
    pub name: &'static str,
}

/// Currencies offered in the selector, most used first
pub const CURRENCIES: &[CurrencyOption] = &[
    CurrencyOption { code: "USD", name: "US Dollar" },
    CurrencyOption { code: "EUR", name: "Euro" },
    CurrencyOption { code: "GBP", name: "British Pound" },
    // Africa
    CurrencyOption { code: "KES", name: "Kenyan Shilling" },
    CurrencyOption { code: "NGN", name: "Nigerian Naira" },
    CurrencyOption { code: "ZAR", name: "South African Rand" },
    CurrencyOption { code: "UGX", name: "Ugandan Shilling" },
    CurrencyOption { code: "TZS", name: "Tanzanian Shilling" },
    CurrencyOption { code: "GHS", name: "Ghanaian Cedi" },
    CurrencyOption { code: "EGP", name: "Egyptian Pound" },
    // Americas
    CurrencyOption { code: "CAD", name: "Canadian Dollar" },
    // Europe
    CurrencyOption { code: "CHF", name: "Swiss Franc" },
    // Asia
    CurrencyOption { code: "JPY", name: "Japanese Yen" },
    CurrencyOption { code: "CNY", name: "Chinese Yuan" },
    CurrencyOption { code: "INR", name: "Indian Rupee" },
    CurrencyOption { code: "SGD", name: "Singapore Dollar" },
    // Middle East
    CurrencyOption { code: "AED", name: "UAE Dirham" },
    CurrencyOption { code: "SAR", name: "Saudi Riyal" },
    // Oceania
    CurrencyOption { code: "AUD", name: "Australian Dollar" },
    CurrencyOption { code: "NZD", name: "New Zealand Dollar" },
];

impl CurrencyOption {
    /// Selector label, e.g. `KES - Kenyan Shilling`
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// Look up a currency by code (case-insensitive)
pub fn find_currency(code: &str) -> Option<&'static CurrencyOption> {
    CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code.trim()))
}

/// Currently selected currency code
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the code is one of [`CURRENCIES`]
    pub fn is_supported(&self) -> bool {
        find_currency(&self.0).is_some()
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self("USD".into())
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let code = Self::new(s);
        if code.is_supported() {
            Ok(code)
        } else {
            Err(format!("unsupported currency: {s}"))
        }
    }
}

/// Fee as displayed next to the selector: `$7 USD` or `7 KES`
pub fn format_fee(amount: Decimal, currency: &CurrencyCode) -> String {
    if currency.as_str() == "USD" {
        format!("${amount} {currency}")
    } else {
        format!("{amount} {currency}")
    }
}

/// Placeholder conversion: no rate is applied and the amount stays in USD
pub fn convert_amount(amount: Decimal, _target: &CurrencyCode) -> String {
    format!("{amount} USD")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_list() {
        assert_eq!(CURRENCIES.len(), 20);
        assert_eq!(CURRENCIES[0].code, "USD");
        assert_eq!(find_currency("kes").map(|c| c.name), Some("Kenyan Shilling"));
        assert!(find_currency("XXX").is_none());
        assert_eq!(CURRENCIES[3].label(), "KES - Kenyan Shilling");
    }

    #[test]
    fn test_currency_code() {
        assert_eq!(CurrencyCode::default().as_str(), "USD");
        assert_eq!(CurrencyCode::new(" eur ").as_str(), "EUR");
        assert!("ngn".parse::<CurrencyCode>().is_ok());
        assert!("BTC".parse::<CurrencyCode>().is_err());
    }

    #[test]
    fn test_deserialize_normalizes() {
        let code: CurrencyCode = serde_json::from_str(r#"" kes ""#).unwrap();
        assert_eq!(code.as_str(), "KES");
        assert_eq!(serde_json::to_string(&code).unwrap(), r#""KES""#);
    }

    #[test]
    fn test_fee_is_relabelled_not_converted() {
        assert_eq!(format_fee(BASE_FEE, &CurrencyCode::default()), "$7 USD");
        assert_eq!(format_fee(BASE_FEE, &CurrencyCode::new("KES")), "7 KES");
        assert_eq!(convert_amount(BASE_FEE, &CurrencyCode::new("JPY")), "7 USD");
    }
}
