//! Props records passed into and out of the composer.
//!
//! A [`Props`] is an insertion-ordered map from prop name to JSON value. Style
//! props and native element attributes share one record; resolution reads the
//! style keys it recognizes and hands everything else back untouched, in the
//! order it arrived.

use serde_json::Value;

use crate::error::StyleError;

/// Insertion-ordered props record.
pub type Props = serde_json::Map<String, Value>;

/// Reads a style prop as a token name.
///
/// Absent keys yield `Ok(None)`. A present key must hold a string; any other
/// JSON value cannot name a token and is reported as unknown.
pub(crate) fn token_of<'p, I, S>(
    props: &'p Props,
    key: &str,
    valid: I,
) -> Result<Option<&'p str>, StyleError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    match props.get(key) {
        None => Ok(None),
        Some(Value::String(token)) => Ok(Some(token.as_str())),
        Some(other) => Err(StyleError::unknown_token(key, other.to_string(), valid)),
    }
}

/// Returns a copy of `props` without any key for which `consumed` is true.
pub(crate) fn retain_unconsumed(props: &Props, consumed: impl Fn(&str) -> bool) -> Props {
    props
        .iter()
        .filter(|(key, _)| !consumed(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
