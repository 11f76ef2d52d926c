//! Decoded report rows.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// One decoded report row.
///
/// The shape is fixed per fetch call by the requested decode mode: positional
/// rows are plain ordered field sequences, keyed rows pair each value with its
/// column header (in header order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Ordered sequence of string fields.
    Positional(Vec<String>),
    /// Header-keyed values, preserving header order.
    Keyed(Vec<(String, String)>),
}

impl Record {
    /// Returns the number of fields in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Positional(fields) => fields.len(),
            Self::Keyed(pairs) => pairs.len(),
        }
    }

    /// Returns true if the row has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the field at the given position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        match self {
            Self::Positional(fields) => fields.get(index).map(String::as_str),
            Self::Keyed(pairs) => pairs.get(index).map(|(_, v)| v.as_str()),
        }
    }

    /// Looks up a field by column header. Always `None` for positional rows.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        match self {
            Self::Positional(_) => None,
            Self::Keyed(pairs) => pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
        }
    }

    /// Iterates over the field values in row order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let iter: Box<dyn Iterator<Item = &str>> = match self {
            Self::Positional(fields) => Box::new(fields.iter().map(String::as_str)),
            Self::Keyed(pairs) => Box::new(pairs.iter().map(|(_, v)| v.as_str())),
        };
        iter
    }

    /// Returns the column headers for keyed rows.
    #[must_use]
    pub fn headers(&self) -> Option<Vec<&str>> {
        match self {
            Self::Positional(_) => None,
            Self::Keyed(pairs) => Some(pairs.iter().map(|(k, _)| k.as_str()).collect()),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Positional(fields) => {
                let mut seq = serializer.serialize_seq(Some(fields.len()))?;
                for field in fields {
                    seq.serialize_element(field)?;
                }
                seq.end()
            }
            Self::Keyed(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (key, value) in pairs {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}
