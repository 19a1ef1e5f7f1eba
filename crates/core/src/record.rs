use crate::date::parse_date;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A payment amount as it arrives from storage: either a number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nominal {
    Number(f64),
    Text(String),
}

impl Nominal {
    /// Numeric value of the amount, if it has one.
    ///
    /// Text is trimmed before parsing; blank or non-numeric text yields `None`,
    /// as do non-finite numbers.
    #[must_use]
    pub fn amount(&self) -> Option<f64> {
        let value = match self {
            Nominal::Number(n) => *n,
            Nominal::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
        };
        value.is_finite().then_some(value)
    }
}

impl Default for Nominal {
    fn default() -> Self {
        Nominal::Text(String::new())
    }
}

impl From<f64> for Nominal {
    fn from(value: f64) -> Self {
        Nominal::Number(value)
    }
}

impl From<i64> for Nominal {
    fn from(value: i64) -> Self {
        Nominal::Number(value as f64)
    }
}

impl From<&str> for Nominal {
    fn from(value: &str) -> Self {
        Nominal::Text(value.to_string())
    }
}

impl From<String> for Nominal {
    fn from(value: String) -> Self {
        Nominal::Text(value)
    }
}

impl fmt::Display for Nominal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nominal::Number(n) => write!(f, "{n}"),
            Nominal::Text(s) => f.write_str(s),
        }
    }
}

/// One payment receipt ("kwitansi") as handed to the exporters.
///
/// Records are produced by the query layer already filtered and sorted; the
/// pipeline only reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRecord {
    #[serde(default, alias = "tanggal_bayar", deserialize_with = "lenient_date")]
    pub payment_date: Option<NaiveDate>,
    #[serde(alias = "nim", deserialize_with = "stored_text")]
    pub student_id: String,
    #[serde(alias = "nama", deserialize_with = "stored_text")]
    pub student_name: String,
    #[serde(alias = "angkatan", deserialize_with = "stored_text")]
    pub cohort: String,
    #[serde(alias = "jenis_bayar", deserialize_with = "stored_text")]
    pub payment_type: String,
    #[serde(alias = "cara_bayar", deserialize_with = "stored_text")]
    pub payment_method: String,
    #[serde(default, alias = "nominal", deserialize_with = "nullable_nominal")]
    pub nominal_amount: Nominal,
    #[serde(default, alias = "keterangan_bayar", deserialize_with = "stored_text")]
    pub note: String,
    #[serde(default, alias = "terbilang", deserialize_with = "stored_text")]
    pub amount_in_words: String,
}

/// A scalar column value as storage hands it over.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredScalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl StoredScalar {
    fn into_text(self) -> String {
        match self {
            StoredScalar::Text(s) => s,
            StoredScalar::Int(i) => i.to_string(),
            StoredScalar::Float(f) => f.to_string(),
            StoredScalar::Bool(b) => b.to_string(),
        }
    }
}

/// Text columns may arrive as numbers (`nim`, `angkatan`) or null; null reads as blank.
fn stored_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<StoredScalar>::deserialize(deserializer)?;
    Ok(value.map(StoredScalar::into_text).unwrap_or_default())
}

/// Unparseable or non-text dates become `None` and render empty.
fn lenient_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let value = Option::<StoredScalar>::deserialize(deserializer)?;
    Ok(match value {
        Some(StoredScalar::Text(s)) => parse_date(&s),
        _ => None,
    })
}

/// A null amount has no numeric value.
fn nullable_nominal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Nominal, D::Error> {
    Ok(Option::<Nominal>::deserialize(deserializer)?.unwrap_or_default())
}
