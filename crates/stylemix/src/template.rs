//! MiniJinja integration.
//!
//! [`register`] adds a `style` function to an environment. It composes its
//! keyword arguments against a kit kind and returns an object with two
//! fields:
//!
//! - `class`: the joined class list, led by any caller `class`/`className`
//! - `attrs`: the leftover props rendered as HTML attributes
//!
//! ```rust
//! use minijinja::{context, Environment};
//! use stylemix::{template, Kit};
//!
//! let mut env = Environment::new();
//! template::register(&mut env, Kit::dracula().clone());
//!
//! let html = env
//!     .render_str(
//!         r#"{% set s = style("input", color="cyan", p="md", name="email", class="wide") %}<input class="{{ s.class }}"{{ s.attrs }}>"#,
//!         context! {},
//!     )
//!     .unwrap();
//! assert_eq!(
//!     html,
//!     r#"<input class="wide drac-input drac-input-normal drac-input-cyan drac-input-md drac-input-border-md drac-p-md" name="email">"#
//! );
//! ```

use std::fmt::Write;
use std::sync::Arc;

use minijinja::value::{Kwargs, Value};
use minijinja::{Environment, Error, ErrorKind, HtmlEscape};

use crate::kit::Kit;
use crate::props::{retain_unconsumed, Props};

/// Props whose value joins the class list instead of becoming an attribute.
const CLASS_PROPS: [&str; 2] = ["class", "className"];

/// Registers the `style` function on a MiniJinja environment.
///
/// Unknown kinds, unknown tokens, non-string `class` props and invalid
/// attribute names are template errors of kind
/// [`ErrorKind::InvalidOperation`].
pub fn register(env: &mut Environment<'_>, kit: Kit) {
    let kit = Arc::new(kit);
    env.add_function("style", move |kind: String, kwargs: Kwargs| -> Result<Value, Error> {
        let component = kit.get(&kind).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("unknown component kind '{}'", kind),
            )
        })?;

        let mut props = Props::new();
        for key in kwargs.args() {
            let value: Value = kwargs.get(key)?;
            let value = serde_json::to_value(&value).map_err(|err| {
                Error::new(
                    ErrorKind::InvalidOperation,
                    format!("prop '{}' cannot be converted: {}", key, err),
                )
            })?;
            props.insert(key.to_string(), value);
        }

        let composed = component
            .compose(&props)
            .map_err(|err| Error::new(ErrorKind::InvalidOperation, err.to_string()))?;

        let mut classes = caller_classes(&composed.props)?;
        classes.extend(composed.classes);
        let attrs = retain_unconsumed(&composed.props, |key| CLASS_PROPS.contains(&key));

        Ok(Value::from_iter([
            (
                "class",
                Value::from_safe_string(HtmlEscape(&classes.join(" ")).to_string()),
            ),
            ("attrs", Value::from_safe_string(render_attrs(&attrs)?)),
        ]))
    });
}

/// Collects the class tokens of the `class` and `className` props, in that
/// order.
fn caller_classes(props: &Props) -> Result<Vec<String>, Error> {
    let mut classes = Vec::new();
    for key in CLASS_PROPS {
        match props.get(key) {
            None | Some(serde_json::Value::Null) | Some(serde_json::Value::Bool(false)) => {}
            Some(serde_json::Value::String(text)) => {
                classes.extend(text.split_ascii_whitespace().map(str::to_string));
            }
            Some(other) => {
                return Err(Error::new(
                    ErrorKind::InvalidOperation,
                    format!("prop '{}' must be a string, got {}", key, other),
                ))
            }
        }
    }
    Ok(classes)
}

/// Whether `name` can be written as an HTML attribute name.
fn is_attr_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

/// Renders props as HTML attributes, each preceded by a space.
///
/// `true` renders as a bare attribute, `false` and `null` are omitted,
/// arrays and objects are written as escaped JSON.
///
/// # Errors
///
/// Fails with [`ErrorKind::InvalidOperation`] when a key is not a valid
/// attribute name; nothing is rendered in that case.
pub fn render_attrs(props: &Props) -> Result<String, Error> {
    let mut out = String::new();
    for (key, value) in props {
        if !is_attr_name(key) {
            return Err(Error::new(
                ErrorKind::InvalidOperation,
                format!("'{}' is not a valid attribute name", key.escape_debug()),
            ));
        }
        let _ = match value {
            serde_json::Value::Null | serde_json::Value::Bool(false) => continue,
            serde_json::Value::Bool(true) => write!(out, " {}", key),
            serde_json::Value::String(text) => write!(out, " {}=\"{}\"", key, HtmlEscape(text)),
            other => write!(out, " {}=\"{}\"", key, HtmlEscape(&other.to_string())),
        };
    }
    Ok(out)
}
