//! Data models for table rows and their columns

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;

/// Status of a row
///
/// Two values are recognized; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Active,
    Inactive,
    Other(String),
}

impl Default for Status {
    fn default() -> Self {
        Status::Other(String::new())
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Active" => Status::Active,
            "Inactive" => Status::Inactive,
            _ => Status::Other(value),
        }
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_text(deserializer).map(Status::from)
    }
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
            Status::Other(s) => s,
        }
    }
}

/// Reads any scalar as text; null becomes an empty string
struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or a scalar value")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(TextVisitor)
}

/// Monetary amount of a row
///
/// Numbers and numeric strings become `Number`. Anything else is kept as
/// `Text` so it can still be displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Text(String::new())
    }
}

impl Amount {
    /// Numeric amounts sort before text, text sorts lexicographically
    pub fn cmp_value(&self, other: &Amount) -> Ordering {
        match (self, other) {
            (Amount::Number(a), Amount::Number(b)) => a.total_cmp(b),
            (Amount::Number(_), Amount::Text(_)) => Ordering::Less,
            (Amount::Text(_), Amount::Number(_)) => Ordering::Greater,
            (Amount::Text(a), Amount::Text(b)) => a.cmp(b),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Amount::Number(n) => write!(f, "{}", n),
            Amount::Text(s) => write!(f, "{}", s),
        }
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        Ok(Amount::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        Ok(Amount::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        if v.is_finite() {
            Ok(Amount::Number(v))
        } else {
            Ok(Amount::Text(v.to_string()))
        }
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Amount, E> {
        Ok(Amount::Text(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        match v.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Amount::Number(n)),
            _ => Ok(Amount::Text(v.to_string())),
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Amount, E> {
        Ok(Amount::default())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

/// A single record of the dataset
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub amount: Amount,
}

/// Table columns in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Name,
    Date,
    Status,
    Amount,
}

impl Column {
    pub fn all() -> [Column; 5] {
        [
            Column::Id,
            Column::Name,
            Column::Date,
            Column::Status,
            Column::Amount,
        ]
    }

    /// Column for a 1-based header position (keys `1`..`5`)
    pub fn from_position(position: usize) -> Option<Column> {
        Self::all().get(position.checked_sub(1)?).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Name => "name",
            Column::Date => "date",
            Column::Status => "status",
            Column::Amount => "amount",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::Name => "NAME",
            Column::Date => "DATE",
            Column::Status => "STATUS",
            Column::Amount => "AMOUNT",
        }
    }

    /// Natural (ascending) ordering of two rows on this column
    pub fn compare(&self, a: &Row, b: &Row) -> Ordering {
        match self {
            Column::Id => a.id.cmp(&b.id),
            Column::Name => a.name.cmp(&b.name),
            Column::Date => a.date.cmp(&b.date),
            Column::Status => a.status.as_str().cmp(b.status.as_str()),
            Column::Amount => a.amount.cmp_value(&b.amount),
        }
    }

    /// Cell text for a row, with `currency` prefixed to amounts
    pub fn cell_text(&self, row: &Row, currency: &str) -> String {
        match self {
            Column::Id => row.id.to_string(),
            Column::Name => row.name.clone(),
            Column::Date => row.date.clone(),
            Column::Status => row.status.as_str().to_string(),
            Column::Amount => format!("{}{}", currency, row.amount),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
