//! URL fragment grammar.
//!
//! ```text
//! fragment := pageId
//!           | pageId "/" param
//! param    := opaque-id
//!           | "?" key "=" value ("&" key "=" value)*
//! ```
//!
//! Parsing is total: every string yields a route.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters escaped inside a fragment parameter.
///
/// Covers the grammar's own separators plus anything a browser would not
/// keep verbatim in a fragment.
const PARAM_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'/')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'`');

/// A parsed location fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRoute {
    /// Page identifier, matching a configured `page_id`.
    pub name: String,
    pub param: RouteParam,
}

impl PageRoute {
    #[must_use]
    pub fn new(name: impl Into<String>, param: impl Into<RouteParam>) -> Self {
        Self {
            name: name.into(),
            param: param.into(),
        }
    }

    /// Renders the route back into fragment form (without `#`).
    #[must_use]
    pub fn to_fragment(&self) -> String {
        build_fragment(&self.name, &self.param)
    }
}

/// Route parameter: a single opaque segment or ordered key/value pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteParam {
    Value(String),
    Pairs(Vec<QueryPair>),
}

/// One `key=value` pair of a structured parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPair {
    pub name: String,
    pub value: String,
}

impl QueryPair {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Default for RouteParam {
    fn default() -> Self {
        Self::Value(String::new())
    }
}

impl From<&str> for RouteParam {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for RouteParam {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<Vec<QueryPair>> for RouteParam {
    fn from(pairs: Vec<QueryPair>) -> Self {
        Self::Pairs(pairs)
    }
}

impl RouteParam {
    /// Parses the text after `name/`.
    fn parse(raw: &str) -> Self {
        let Some(query) = raw.strip_prefix('?') else {
            return Self::Value(decode(raw));
        };

        let pairs = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((name, value)) => QueryPair::new(decode(name), decode(value)),
                None => QueryPair::new(decode(pair), String::new()),
            })
            .collect();

        Self::Pairs(pairs)
    }

    /// The flat value, if this is a single-segment parameter.
    #[must_use]
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value),
            Self::Pairs(_) => None,
        }
    }

    /// Looks up a pair by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        match self {
            Self::Value(_) => None,
            Self::Pairs(pairs) => pairs
                .iter()
                .find(|p| p.name == name)
                .map(|p| p.value.as_str()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Value(value) => value.is_empty(),
            Self::Pairs(pairs) => pairs.is_empty(),
        }
    }
}

impl fmt::Display for RouteParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{}", utf8_percent_encode(value, PARAM_ENCODE_SET)),
            Self::Pairs(pairs) => {
                for (index, pair) in pairs.iter().enumerate() {
                    let separator = if index == 0 { '?' } else { '&' };
                    write!(
                        f,
                        "{separator}{}={}",
                        utf8_percent_encode(&pair.name, PARAM_ENCODE_SET),
                        utf8_percent_encode(&pair.value, PARAM_ENCODE_SET)
                    )?;
                }
                Ok(())
            }
        }
    }
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Parses a location fragment into a route.
///
/// A leading `#` is ignored. The empty fragment resolves to `default_page`.
///
/// # Example
///
/// ```
/// use vanillabeach::router::{parse_route, RouteParam};
///
/// let route = parse_route("#journal/42", "journal");
/// assert_eq!(route.name, "journal");
/// assert_eq!(route.param, RouteParam::from("42"));
///
/// assert_eq!(parse_route("", "journal").name, "journal");
/// assert!(parse_route("photos", "journal").param.is_empty());
/// ```
#[must_use]
pub fn parse_route(fragment: &str, default_page: &str) -> PageRoute {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);

    if fragment.is_empty() {
        return PageRoute::new(default_page, RouteParam::default());
    }

    match fragment.split_once('/') {
        Some((name, rest)) => PageRoute {
            name: name.to_string(),
            param: RouteParam::parse(rest),
        },
        None => PageRoute::new(fragment, RouteParam::default()),
    }
}

/// Builds a fragment (without `#`) from a page and a parameter.
///
/// # Example
///
/// ```
/// use vanillabeach::router::{build_fragment, QueryPair, RouteParam};
///
/// assert_eq!(build_fragment("journal", &RouteParam::from("42")), "journal/42");
///
/// let pairs = RouteParam::Pairs(vec![QueryPair::new("a", "1"), QueryPair::new("b", "2")]);
/// assert_eq!(build_fragment("photos", &pairs), "photos/?a=1&b=2");
/// ```
#[must_use]
pub fn build_fragment(page: &str, param: &RouteParam) -> String {
    if param.is_empty() {
        return page.to_string();
    }
    format!("{page}/{param}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fragment_defaults() {
        let route = parse_route("", "journal");
        assert_eq!(route, PageRoute::new("journal", ""));

        let route = parse_route("#", "journal");
        assert_eq!(route.name, "journal");
    }

    #[test]
    fn bare_name_has_empty_param() {
        assert_eq!(parse_route("page", "x").param, RouteParam::from(""));
    }

    #[test]
    fn splits_on_first_slash_only() {
        let route = parse_route("page/123/extra", "x");
        assert_eq!(route.name, "page");
        assert_eq!(route.param.as_value(), Some("123/extra"));
    }

    #[test]
    fn trailing_slash_is_empty_param() {
        let route = parse_route("page/", "x");
        assert_eq!(route.name, "page");
        assert!(route.param.is_empty());
    }

    #[test]
    fn leading_slash_yields_empty_name() {
        let route = parse_route("/42", "x");
        assert_eq!(route.name, "");
        assert_eq!(route.param.as_value(), Some("42"));
    }

    #[test]
    fn parses_query_pairs_in_order() {
        let route = parse_route("photos/?category=beach&sort=date&flag", "x");
        assert_eq!(
            route.param,
            RouteParam::Pairs(vec![
                QueryPair::new("category", "beach"),
                QueryPair::new("sort", "date"),
                QueryPair::new("flag", ""),
            ])
        );
        assert_eq!(route.param.get("sort"), Some("date"));
        assert_eq!(route.param.get("missing"), None);
    }

    #[test]
    fn decodes_percent_escapes() {
        let route = parse_route("photos/summer%20trips", "x");
        assert_eq!(route.param.as_value(), Some("summer trips"));
    }

    #[test]
    fn encodes_reserved_characters() {
        let param = RouteParam::from("a/b c");
        assert_eq!(build_fragment("photos", &param), "photos/a%2Fb%20c");

        let pairs = RouteParam::Pairs(vec![QueryPair::new("q", "x&y=z")]);
        assert_eq!(build_fragment("photos", &pairs), "photos/?q=x%26y%3Dz");
    }

    #[test]
    fn built_fragments_parse_back() {
        let routes = [
            PageRoute::new("journal", "42"),
            PageRoute::new("photos", "Sand & Sea/2020"),
            PageRoute::new(
                "photos",
                vec![QueryPair::new("a", "1"), QueryPair::new("b", "x y")],
            ),
            PageRoute::new("junk", ""),
        ];

        for route in routes {
            assert_eq!(parse_route(&route.to_fragment(), "journal"), route);
        }
    }

    #[test]
    fn empty_pairs_build_bare_page() {
        assert_eq!(build_fragment("photos", &RouteParam::Pairs(vec![])), "photos");
    }
}
