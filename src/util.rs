use std::fmt;

/// A scalar query-string value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Str(s) => f.write_str(s),
            QueryValue::Bool(b) => write!(f, "{}", b),
            QueryValue::Int(i) => write!(f, "{}", i),
            QueryValue::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        QueryValue::Str(v)
    }
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        QueryValue::Str(v.to_string())
    }
}

impl From<bool> for QueryValue {
    fn from(v: bool) -> Self {
        QueryValue::Bool(v)
    }
}

impl From<u32> for QueryValue {
    fn from(v: u32) -> Self {
        QueryValue::Int(i64::from(v))
    }
}

impl From<i64> for QueryValue {
    fn from(v: i64) -> Self {
        QueryValue::Int(v)
    }
}

impl From<f64> for QueryValue {
    fn from(v: f64) -> Self {
        QueryValue::Float(v)
    }
}

/// Ordered query parameters for a single request.
///
/// Unset values are dropped on insertion, so nothing here is ever sent as
/// `null` or an empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<V: Into<QueryValue>>(&mut self, key: &'static str, value: V) {
        self.pairs.push((key, value.into()));
    }

    pub fn push_opt<V: Into<QueryValue>>(&mut self, key: &'static str, value: Option<V>) {
        if let Some(v) = value {
            self.push(key, v);
        }
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &QueryValue)> {
        self.pairs.iter().map(|(k, v)| (*k, v))
    }

    /// String pairs in insertion order, ready for URL encoding.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        self.pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }
}

pub(crate) fn urljoin(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// `YYYY-MM-DD`-shaped: exactly two `-` separators. Nothing else is checked.
pub(crate) fn has_date_shape(s: &str) -> bool {
    s.matches('-').count() == 2
}

/// `"lat,lon"` with both halves parseable as decimals.
pub(crate) fn is_coordinate_pair(s: &str) -> bool {
    match s.split_once(',') {
        Some((lat, lon)) => {
            lat.trim().parse::<f64>().is_ok_and(f64::is_finite)
                && lon.trim().parse::<f64>().is_ok_and(f64::is_finite)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn push_opt_drops_unset_values() {
        let mut q = QueryParams::new();
        q.push_opt("city", Some("Delhi"));
        q.push_opt::<&str>("country", None);
        q.push_opt("has_geo", Some(true));
        q.push_opt::<u32>("limit", None);

        assert_eq!(
            q.to_pairs(),
            vec![("city", "Delhi".to_string()), ("has_geo", "true".to_string())]
        );
        assert_eq!(q.len(), 2);
        assert!(q.get("country").is_none());
    }

    #[test]
    fn values_render_as_plain_scalars() {
        assert_eq!(QueryValue::from(false).to_string(), "false");
        assert_eq!(QueryValue::from(100u32).to_string(), "100");
        assert_eq!(QueryValue::from(-3i64).to_string(), "-3");
        assert_eq!(QueryValue::from(12.5).to_string(), "12.5");
    }

    #[test]
    fn urljoin_handles_slashes() {
        assert_eq!(
            urljoin("https://api.openaq.org/", "/v1/latest"),
            "https://api.openaq.org/v1/latest"
        );
        assert_eq!(
            urljoin("https://api.openaq.org", "v1/latest"),
            "https://api.openaq.org/v1/latest"
        );
        assert_eq!(urljoin("https://api.openaq.org/", ""), "https://api.openaq.org");
        assert_eq!(urljoin("http://x", "https://y/z"), "https://y/z");
    }

    #[test]
    fn date_shape_counts_hyphens_only() {
        assert!(has_date_shape("2020-01-15"));
        assert!(has_date_shape("2015-12-20T09:00:00"));
        assert!(has_date_shape("a-b-c"));
        assert!(!has_date_shape("2020/01/15"));
        assert!(!has_date_shape("2020-01"));
        assert!(!has_date_shape("2020-01-15-01"));
    }

    #[test]
    fn coordinate_pairs() {
        assert!(is_coordinate_pair("40.23,34.17"));
        assert!(is_coordinate_pair("-33.9, 151.2"));
        assert!(!is_coordinate_pair("40.23"));
        assert!(!is_coordinate_pair("north,east"));
        assert!(!is_coordinate_pair("1,2,3"));
    }
}
