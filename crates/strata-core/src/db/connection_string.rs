use crate::db::ConnectionError;
use std::{fmt, str::FromStr};

// Keys whose values never appear in logs.
const SECRET_KEYS: [&str; 2] = ["Password", "Pwd"];
const MASK: &str = "***";

///
/// ConnectionString
///
/// Ordered `key=value;` pairs. Keys compare case-insensitively and keep the
/// spelling and position of their first occurrence; a repeated key replaces
/// the earlier value.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConnectionString {
    pairs: Vec<(String, String)>,
}

impl ConnectionString {
    pub fn parse(input: &str) -> Result<Self, ConnectionError> {
        let mut parsed = Self::default();

        for segment in input.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            let (key, value) =
                segment
                    .split_once('=')
                    .ok_or_else(|| ConnectionError::MalformedSegment {
                        segment: segment.to_string(),
                    })?;

            let key = key.trim();
            if key.is_empty() {
                return Err(ConnectionError::EmptyKey {
                    segment: segment.to_string(),
                });
            }

            parsed.set(key, value.trim());
        }

        Ok(parsed)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.pairs[i].1.as_str())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Insert or replace `key`; an existing key keeps its position.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();

        match self.position(key) {
            Some(i) => self.pairs[i].1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.position(key).map(|i| self.pairs.remove(i).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Display adapter with secret values masked, for logging.
    #[must_use]
    pub const fn redacted(&self) -> RedactedConnectionString<'_> {
        RedactedConnectionString(self)
    }

    fn write_pairs(&self, f: &mut fmt::Formatter<'_>, mask_secrets: bool) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }

            let secret = mask_secrets && SECRET_KEYS.iter().any(|s| s.eq_ignore_ascii_case(key));
            let value = if secret { MASK } else { value.as_str() };
            write!(f, "{key}={value}")?;
        }

        Ok(())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.pairs
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(key))
    }
}

impl FromStr for ConnectionString {
    type Err = ConnectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_pairs(f, false)
    }
}

///
/// RedactedConnectionString
///
/// Renders like its connection string, with password values replaced.
///

#[derive(Clone, Copy, Debug)]
pub struct RedactedConnectionString<'a>(&'a ConnectionString);

impl fmt::Display for RedactedConnectionString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_pairs(f, true)
    }
}
