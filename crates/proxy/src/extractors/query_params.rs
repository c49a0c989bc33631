//! Ordered query parameters extractor.
//!
//! Query strings are kept in first-seen key order. A key that appears more
//! than once collects its values into a [`ParamValue::Many`].

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A query parameter value: a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A single value.
    One(String),
    /// Repeated values, in request order.
    Many(Vec<String>),
}

impl ParamValue {
    /// Iterates over every value.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            ParamValue::One(v) => std::slice::from_ref(v),
            ParamValue::Many(vs) => vs,
        };
        values.iter().map(String::as_str)
    }

    /// True if any value contains `needle`, ignoring case.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.values().any(|v| v.to_lowercase().contains(&needle))
    }

    /// True if any value contains `needle`, case-sensitively.
    pub fn contains(&self, needle: &str) -> bool {
        self.values().any(|v| v.contains(needle))
    }

    fn push(&mut self, value: String) {
        match self {
            ParamValue::One(first) => {
                *self = ParamValue::Many(vec![std::mem::take(first), value]);
            }
            ParamValue::Many(vs) => vs.push(value),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::One(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::One(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::Many(values)
    }
}

/// Insertion-ordered query parameters.
///
/// Also an axum extractor: it never rejects, an absent query string yields
/// an empty map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
    params: IndexMap<String, ParamValue>,
}

impl QueryParams {
    /// Creates empty params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds params from `(name, value)` pairs, merging repeated names.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.append(key, value);
        }
        params
    }

    /// Parses a raw `a=1&b=2` query string.
    pub fn parse(query: &str) -> Self {
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    /// Appends a value, merging it into an existing entry with the same name.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.params.get_mut(&key) {
            Some(existing) => existing.push(value),
            None => {
                self.params.insert(key, ParamValue::One(value));
            }
        }
    }

    /// Sets a parameter, moving it to the end.
    pub fn insert_last(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        self.params.shift_remove(&key);
        self.params.insert(key, value.into());
    }

    /// Returns a parameter by exact name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Iterates over every value whose name matches ignoring ASCII case.
    pub fn get_ignore_case<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ParamValue> {
        self.params
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Returns a copy without any parameter named one of `names`, ignoring case.
    pub fn without_ignore_case(&self, names: &[&str]) -> Self {
        let params = self
            .params
            .iter()
            .filter(|(k, _)| !names.iter().any(|n| k.eq_ignore_ascii_case(n)))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Self { params }
    }

    /// Iterates over parameters in order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.params.iter()
    }

    /// Parameter names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// Number of distinct parameter names.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Encodes the params as a query string, repeating many-valued names.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.params {
            for v in value.values() {
                serializer.append_pair(key, v);
            }
        }
        serializer.finish()
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .uri
            .query()
            .map(QueryParams::parse)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_order() {
        let params = QueryParams::parse("b=2&a=1&c=3");
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_repeated_keys_merge() {
        let params = QueryParams::parse("_format=json&name=x&_format=xml");

        assert_eq!(params.len(), 2);
        assert_eq!(
            params.get("_format"),
            Some(&ParamValue::Many(vec!["json".to_string(), "xml".to_string()]))
        );
    }

    #[test]
    fn test_contains_ignore_case() {
        let value = ParamValue::from(vec!["text/html".to_string(), "Application/XML+FHIR".to_string()]);
        assert!(value.contains_ignore_case("xml+fhir"));
        assert!(!value.contains("xml+fhir"));
        assert!(!value.contains_ignore_case("json"));
    }

    #[test]
    fn test_without_ignore_case() {
        let params = QueryParams::parse("FORMAT=xml&name=x&_Format=json");
        let stripped = params.without_ignore_case(&["format", "_format"]);

        assert_eq!(stripped.keys().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_insert_last_moves_key() {
        let mut params = QueryParams::parse("_format=xml&name=x");
        params.insert_last("_format", "json");

        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["name", "_format"]);
    }

    #[test]
    fn test_query_string_round_trip_encoding() {
        let params = QueryParams::from_pairs([("name", "van der berg"), ("tag", "a"), ("tag", "b")]);
        assert_eq!(params.to_query_string(), "name=van+der+berg&tag=a&tag=b");
    }

    #[test]
    fn test_serializes_as_map() {
        let params = QueryParams::parse("a=1&b=2&b=3");
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"a": "1", "b": ["2", "3"]})
        );
    }
}
