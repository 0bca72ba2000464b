//! Records: insertion-ordered field-name to value mappings

/// One extracted record. Column order is the schema's field order; a field
/// whose rule matched nothing is present with an absent value, never a
/// missing key. The absent sentinel is applied only at output time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    entries: Vec<(String, Option<String>)>,
}

impl Record {
    /// Creates a record with every column present and absent.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Record {
            entries: columns.into_iter().map(|c| (c.into(), None)).collect(),
        }
    }

    /// Sets a column's value. Unknown columns are appended, preserving
    /// first-seen order.
    pub fn set(&mut self, name: &str, value: String) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = Some(value),
            None => self.entries.push((name.to_string(), Some(value))),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Whether the column exists, regardless of its value being absent.
    pub fn has_column(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
