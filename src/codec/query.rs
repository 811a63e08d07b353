//! Query strings and URL fragments
//!
//! Minimal `application/x-www-form-urlencoded` handling: enough to read the
//! handful of parameters the resolver and short-link paths care about.

use crate::core::constants::MAX_ZOOM;
use crate::prelude::HashMap;

/// Decoded `key=value` pairs; when a key repeats the last value wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    /// Parses `a=1&b=2`, with or without a leading `?` or `#`
    pub fn parse(query: &str) -> Self {
        let query = query.trim_start_matches(['?', '#']);
        let mut values = HashMap::default();

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            values.insert(percent_decode(key), percent_decode(value));
        }

        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// A finite floating point value
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        parse_finite(self.get(key)?)
    }

    /// An integer zoom in `0..=MAX_ZOOM`
    pub fn get_zoom(&self, key: &str) -> Option<u8> {
        parse_zoom(self.get(key)?)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An href split into its path, query and fragment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    pub path: String,
    pub query: Option<String>,
    /// Fragment including the leading `#`
    pub fragment: Option<String>,
}

impl UrlParts {
    pub fn parse(url: &str) -> Self {
        let (rest, fragment) = match url.find('#') {
            Some(index) => (&url[..index], Some(url[index..].to_string())),
            None => (url, None),
        };

        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };

        Self {
            path: path.to_string(),
            query,
            fragment,
        }
    }

    pub fn query_params(&self) -> QueryParams {
        self.query
            .as_deref()
            .map(QueryParams::parse)
            .unwrap_or_default()
    }
}

pub(crate) fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parses a whole-number zoom; fractions, negative values and values above
/// [`MAX_ZOOM`] are rejected.
pub(crate) fn parse_zoom(text: &str) -> Option<u8> {
    let zoom = text.trim().parse::<i64>().ok()?;
    if (0..=MAX_ZOOM as i64).contains(&zoom) {
        Some(zoom as u8)
    } else {
        None
    }
}

/// Decodes `%XX` escapes and `+`. Malformed escapes are kept literally.
pub fn percent_decode(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => decoded.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(high), Some(low)) => {
                        decoded.push(high << 4 | low);
                        i += 3;
                        continue;
                    }
                    _ => decoded.push(b'%'),
                }
            }
            byte => decoded.push(byte),
        }
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query() {
        let params = QueryParams::parse("?mlat=51.5&mlon=-0.1&zoom=14&m");

        assert_eq!(params.get_f64("mlat"), Some(51.5));
        assert_eq!(params.get_f64("mlon"), Some(-0.1));
        assert_eq!(params.get_zoom("zoom"), Some(14));
        assert!(params.contains("m"));
        assert_eq!(params.get("m"), Some(""));
        assert!(params.get("lat").is_none());
    }

    #[test]
    fn test_last_value_wins() {
        let params = QueryParams::parse("a=1&a=2");
        assert_eq!(params.get("a"), Some("2"));
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(percent_decode("1%2C2%2c3"), "1,2,3");
        assert_eq!(percent_decode("a+b"), "a b");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");

        let params = QueryParams::parse("bbox=-1%2C50%2C1%2C52");
        assert_eq!(params.get("bbox"), Some("-1,50,1,52"));
    }

    #[test]
    fn test_number_validation() {
        let params = QueryParams::parse("a=NaN&b=inf&z=3.5&y=-1&x=21&w=7");
        assert!(params.get_f64("a").is_none());
        assert!(params.get_f64("b").is_none());
        assert!(params.get_zoom("z").is_none());
        assert!(params.get_zoom("y").is_none());
        assert!(params.get_zoom("x").is_none());
        assert_eq!(params.get_zoom("w"), Some(7));
    }

    #[test]
    fn test_url_parts() {
        let parts = UrlParts::parse("https://www.openstreetmap.org/?mlat=1&mlon=2#map=5/1/2");
        assert_eq!(parts.path, "https://www.openstreetmap.org/");
        assert_eq!(parts.query.as_deref(), Some("mlat=1&mlon=2"));
        assert_eq!(parts.fragment.as_deref(), Some("#map=5/1/2"));
        assert_eq!(parts.query_params().get("mlon"), Some("2"));

        let bare = UrlParts::parse("/go/0EEQjE--");
        assert_eq!(bare.path, "/go/0EEQjE--");
        assert!(bare.query.is_none());
        assert!(bare.fragment.is_none());
        assert!(bare.query_params().is_empty());
    }
}
