/// Represents a cell value read from a spreadsheet
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl CellValue {
    /// Null, or text that is empty after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Get the value as a string
    #[must_use]
    pub fn as_str(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::String(s) => s.clone(),
        }
    }

    /// Trimmed text of the value.
    #[must_use]
    pub fn as_trimmed(&self) -> String {
        match self {
            CellValue::String(s) => s.trim().to_string(),
            other => other.as_str(),
        }
    }

    /// The value as a run of ASCII digits, if it is one.
    ///
    /// Integral numbers qualify (`2101001.0` gives `"2101001"`); negative or
    /// fractional numbers and text containing anything but digits do not.
    #[must_use]
    pub fn as_digits(&self) -> Option<String> {
        let text = match self {
            CellValue::Int(i) if *i >= 0 => i.to_string(),
            CellValue::Float(f) if f.is_finite() && *f >= 0.0 && f.fract() == 0.0 => {
                f.to_string()
            }
            CellValue::String(s) => s.trim().to_string(),
            _ => return None,
        };
        (!text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())).then_some(text)
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank() {
        assert!(CellValue::Null.is_blank());
        assert!(CellValue::from("   ").is_blank());
        assert!(!CellValue::from("x").is_blank());
        assert!(!CellValue::Int(0).is_blank());
    }

    #[test]
    fn test_as_str_of_integral_float() {
        assert_eq!(CellValue::Float(2021.0).as_str(), "2021");
        assert_eq!(CellValue::Float(1.5).as_str(), "1.5");
        assert_eq!(CellValue::from(" Ana ").as_trimmed(), "Ana");
    }

    #[test]
    fn test_as_digits() {
        assert_eq!(CellValue::from("2101001").as_digits().as_deref(), Some("2101001"));
        assert_eq!(CellValue::from(" 123 ").as_digits().as_deref(), Some("123"));
        assert_eq!(CellValue::Int(42).as_digits().as_deref(), Some("42"));
        assert_eq!(CellValue::Float(2_101_001.0).as_digits().as_deref(), Some("2101001"));

        assert_eq!(CellValue::from("12a").as_digits(), None);
        assert_eq!(CellValue::from("1e3").as_digits(), None);
        assert_eq!(CellValue::from("").as_digits(), None);
        assert_eq!(CellValue::Int(-5).as_digits(), None);
        assert_eq!(CellValue::Float(1.5).as_digits(), None);
        assert_eq!(CellValue::Bool(true).as_digits(), None);
    }
}
