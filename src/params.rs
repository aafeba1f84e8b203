use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::{QuipError, Result};

/// Value of a single request parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    /// Plain string value.
    Text(String),
    /// List value, sent as a comma-joined string.
    List(Vec<String>),
}

impl ParamValue {
    /// Returns `true` for an empty string or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(value) => value.is_empty(),
            Self::List(values) => values.is_empty(),
        }
    }

    fn to_wire(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::List(values) => values.join(","),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<&[String]> for ParamValue {
    fn from(values: &[String]) -> Self {
        Self::List(values.to_vec())
    }
}

impl From<&Vec<String>> for ParamValue {
    fn from(values: &Vec<String>) -> Self {
        Self::List(values.clone())
    }
}

impl<const N: usize> From<[&str; N]> for ParamValue {
    fn from(values: [&str; N]) -> Self {
        Self::List(values.iter().map(|value| (*value).to_owned()).collect())
    }
}

/// Named request parameters, encoded as a query string or form body.
///
/// Keys are kept sorted so the encoded output is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<String, ParamValue>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter that must be present and non-empty.
    ///
    /// `endpoint` names the API resource in the validation message.
    pub fn required(
        mut self,
        key: &str,
        value: impl Into<ParamValue>,
        endpoint: &str,
    ) -> Result<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(missing(key, endpoint));
        }
        self.values.insert(key.to_owned(), value);
        Ok(self)
    }

    /// Adds a parameter only when it is non-empty.
    pub fn optional(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.values.insert(key.to_owned(), value);
        }
        self
    }

    /// Adds a parameter only when it is `Some` and non-empty.
    pub fn optional_opt<V: Into<ParamValue>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.optional(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// Encodes all parameters as `application/x-www-form-urlencoded`.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.values {
            serializer.append_pair(key, &value.to_wire());
        }
        serializer.finish()
    }
}

/// Checks a value that is used outside the parameter set, such as a path
/// segment.
pub(crate) fn ensure_present(
    key: &str,
    value: impl Into<ParamValue>,
    endpoint: &str,
) -> Result<()> {
    if value.into().is_empty() {
        return Err(missing(key, endpoint));
    }
    Ok(())
}

fn missing(key: &str, endpoint: &str) -> QuipError {
    QuipError::Validation(format!("{key} is required for {endpoint}"))
}

#[cfg(test)]
mod tests {
    use super::{ensure_present, ParamValue, Params};
    use crate::QuipError;

    #[test]
    fn list_values_are_comma_joined() {
        let params = Params::new().optional("member_ids", ["a", "b", "c"]);
        assert_eq!(params.encode(), "member_ids=a%2Cb%2Cc");
    }

    #[test]
    fn encoding_is_sorted_and_escaped() {
        let params = Params::new()
            .optional("title", "Q3 plan & notes")
            .optional("content", "<p>hi</p>");
        assert_eq!(
            params.encode(),
            "content=%3Cp%3Ehi%3C%2Fp%3E&title=Q3+plan+%26+notes"
        );
    }

    #[test]
    fn optional_skips_empty_values() {
        let params = Params::new()
            .optional("title", "")
            .optional("member_ids", Vec::<String>::new())
            .optional_opt::<&str>("format", None);
        assert!(params.is_empty());
        assert_eq!(params.encode(), "");
    }

    #[test]
    fn required_rejects_empty_string() {
        let err = Params::new()
            .required("content", "", "threads/new-document")
            .expect_err("must fail");
        match err {
            QuipError::Validation(message) => {
                assert_eq!(message, "content is required for threads/new-document")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn required_rejects_empty_list() {
        let err = Params::new()
            .required("member_ids", Vec::<String>::new(), "folders/add-members")
            .expect_err("must fail");
        assert!(matches!(err, QuipError::Validation(_)));
    }

    #[test]
    fn required_keeps_value() {
        let params = Params::new()
            .required("thread_id", "abc", "messages/new")
            .expect("must accept");
        assert_eq!(params.get("thread_id"), Some(&ParamValue::Text("abc".into())));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn ensure_present_checks_path_values() {
        assert!(ensure_present("id", "x", "users/{id}").is_ok());
        assert!(ensure_present("id", "", "users/{id}").is_err());
    }
}
