//! The URL query of an announce request.
//!
//! ```text
//! URI = scheme ":" ["//" authority] path ["?" query] ["#" fragment]
//! ```
//!
//! Values are kept as they come, still percent-encoded, because some of them
//! (`info_hash`, `peer_id`) are raw bytes and not text.
use std::panic::Location;
use std::str::FromStr;

use multimap::MultiMap;
use thiserror::Error;

type ParamName = String;
type ParamValue = String;

/// The params of a URL query component. A param can appear more than once.
#[derive(Debug, Default)]
pub struct Query {
    params: MultiMap<ParamName, ParamValue>,
}

impl Query {
    /// It returns the first value of the param `name`, if any.
    ///
    /// ```rust
    /// use swarm_canary::servers::http::v1::query::Query;
    ///
    /// let query = "port=17548&port=17549".parse::<Query>().unwrap();
    ///
    /// assert_eq!(query.get_param("port").unwrap(), "17548");
    /// assert_eq!(query.get_param("event"), None);
    /// ```
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<String> {
        self.params.get(name).cloned()
    }

    /// It returns every value of the param `name`, in order.
    #[must_use]
    pub fn get_param_vec(&self, name: &str) -> Option<Vec<String>> {
        self.params.get_vec(name).cloned()
    }
}

/// This error can be returned when parsing a [`Query`] from a string.
#[derive(Error, Debug)]
pub enum ParseQueryError {
    /// Invalid URL query param. For example: `"name=value=value"`, with an
    /// unescaped `=`, or `"name"`, without a value.
    #[error("invalid param {raw_param} in {location}")]
    InvalidParam {
        location: &'static Location<'static>,
        raw_param: String,
    },
}

impl FromStr for Query {
    type Err = ParseQueryError;

    fn from_str(raw_query: &str) -> Result<Self, Self::Err> {
        let mut params: MultiMap<ParamName, ParamValue> = MultiMap::new();

        for raw_param in raw_query.trim().trim_start_matches('?').split('&') {
            let mut parts = raw_param.split('=');

            match (parts.next(), parts.next(), parts.next()) {
                (Some(name), Some(value), None) if !name.is_empty() => {
                    params.insert(name.to_owned(), value.to_owned());
                }
                _ => {
                    return Err(ParseQueryError::InvalidParam {
                        location: Location::caller(),
                        raw_param: raw_param.to_owned(),
                    })
                }
            }
        }

        Ok(Self { params })
    }
}

impl From<Vec<(&str, &str)>> for Query {
    fn from(raw_params: Vec<(&str, &str)>) -> Self {
        let mut params: MultiMap<ParamName, ParamValue> = MultiMap::new();

        for (name, value) in raw_params {
            params.insert(name.to_owned(), value.to_owned());
        }

        Self { params }
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let query = self
            .params
            .iter_all()
            .flat_map(|(name, values)| values.iter().map(move |value| format!("{name}={value}")))
            .collect::<Vec<String>>()
            .join("&");

        write!(f, "{query}")
    }
}

#[cfg(test)]
mod tests {

    mod url_query {
        use crate::servers::http::v1::query::{ParseQueryError, Query};

        #[test]
        fn should_keep_the_values_percent_encoded() {
            let raw_query =
                "info_hash=%3B%24U%04%CF%5F%11%BB%DB%E1%20%1C%EAjk%F4Z%EE%1B%C0&peer_id=-qB00000000000000001&port=17548";

            let query = raw_query.parse::<Query>().unwrap();

            assert_eq!(
                query.get_param("info_hash").unwrap(),
                "%3B%24U%04%CF%5F%11%BB%DB%E1%20%1C%EAjk%F4Z%EE%1B%C0"
            );
            assert_eq!(query.get_param("peer_id").unwrap(), "-qB00000000000000001");
            assert_eq!(query.get_param("port").unwrap(), "17548");
        }

        #[test]
        fn should_accept_an_empty_value() {
            let query = "event=".parse::<Query>().unwrap();

            assert_eq!(query.get_param("event"), Some(String::new()));
        }

        #[test]
        fn should_fail_parsing_a_param_with_an_unescaped_equals_sign() {
            let query = "name=value=value".parse::<Query>();

            assert!(matches!(query, Err(ParseQueryError::InvalidParam { raw_param, .. }) if raw_param == "name=value=value"));
        }

        #[test]
        fn should_fail_parsing_a_param_without_a_value() {
            assert!("compact".parse::<Query>().is_err());
        }

        #[test]
        fn should_fail_parsing_an_empty_query() {
            assert!("".parse::<Query>().is_err());
        }

        #[test]
        fn should_ignore_the_preceding_question_mark_and_whitespaces() {
            let query = " ?name=value ".parse::<Query>().unwrap();

            assert_eq!(query.get_param("name"), Some("value".to_string()));
        }

        #[test]
        fn should_keep_every_value_of_a_repeated_param() {
            let query = "param1=value1&param1=value2".parse::<Query>().unwrap();

            assert_eq!(
                query.get_param_vec("param1"),
                Some(vec!["value1".to_string(), "value2".to_string()])
            );
        }

        #[test]
        fn should_be_displayed_as_a_url_query() {
            let query = Query::from(vec![("port", "17548"), ("port", "17549")]);

            assert_eq!(query.to_string(), "port=17548&port=17549");
        }
    }
}
