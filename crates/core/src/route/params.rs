use std::collections::BTreeMap;
use std::fmt;

use crate::render::RenderError;

/// Parameters of a single request: path captures plus query values.
///
/// Ordered, so the same combination always renders to the same string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Adds every pair not already present. Path captures win over query values.
    pub fn merge_missing<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in pairs {
            self.0.entry(k.into()).or_insert_with(|| v.into());
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns a non-empty value for `name`, or a parameter error.
    pub fn require(&self, name: &str) -> Result<&str, RenderError> {
        match self.get(name).map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(RenderError::Parameter(format!("missing `{name}`"))),
        }
    }

    /// Parses the value of `name` as `T`.
    pub fn parse<T: std::str::FromStr>(&self, name: &str) -> Result<T, RenderError> {
        let raw = self.require(name)?;
        raw.parse()
            .map_err(|_| RenderError::Parameter(format!("invalid `{name}`: {raw}")))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for RouteParams {
    /// `name=value` pairs joined by `&`, in key order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{k}={v}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_ordered() {
        let params = RouteParams::from_pairs([("q", "dune"), ("id", "1")]);
        assert_eq!(params.to_string(), "id=1&q=dune");
        assert_eq!(RouteParams::new().to_string(), "");
    }

    #[test]
    fn test_merge_missing_keeps_existing() {
        let mut params = RouteParams::from_pairs([("id", "1")]);
        params.merge_missing([("id", "2"), ("q", "x")]);

        assert_eq!(params.get("id"), Some("1"));
        assert_eq!(params.get("q"), Some("x"));
    }

    #[test]
    fn test_require() {
        let params = RouteParams::from_pairs([("id", "1"), ("q", "  ")]);

        assert_eq!(params.require("id"), Ok("1"));
        assert!(matches!(params.require("q"), Err(RenderError::Parameter(_))));
        assert!(matches!(params.require("nope"), Err(RenderError::Parameter(_))));
    }

    #[test]
    fn test_parse() {
        let params = RouteParams::from_pairs([("id", "12"), ("bad", "abc")]);

        assert_eq!(params.parse::<u64>("id"), Ok(12));
        assert_eq!(
            params.parse::<u64>("bad"),
            Err(RenderError::Parameter("invalid `bad`: abc".to_string()))
        );
    }
}
