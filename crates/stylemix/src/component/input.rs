//! The built-in Input kind.
//!
//! Emission order: base, variant, color, size, border size, padding, margin.
//! Defaults: `variant=normal`, `color=white`, `size=md`, `borderSize=md`.

use once_cell::sync::Lazy;
use serde_json::Value;

use super::{Axis, ComponentKind, Composition, Emit};
use crate::error::StyleError;
use crate::props::Props;
use crate::registry::{token_enum, Registry, Token};
use crate::spacing::{MarginMixin, Mixin, PaddingMixin};

/// Structural class every input carries.
pub const INPUT_BASE: &str = "drac-input";

token_enum! {
    /// Input accent colors: the base color map plus `white`.
    #[derive(Default)]
    pub enum InputColor("color") {
        Green => "green": "drac-input-green",
        Pink => "pink": "drac-input-pink",
        Purple => "purple": "drac-input-purple",
        Cyan => "cyan": "drac-input-cyan",
        Yellow => "yellow": "drac-input-yellow",
        Orange => "orange": "drac-input-orange",
        Red => "red": "drac-input-red",
        #[default]
        White => "white": "drac-input-white",
    }
}

token_enum! {
    #[derive(Default)]
    pub enum InputSize("size") {
        Lg => "lg": "drac-input-lg",
        #[default]
        Md => "md": "drac-input-md",
        Sm => "sm": "drac-input-sm",
    }
}

token_enum! {
    #[derive(Default)]
    pub enum BorderSize("borderSize") {
        Lg => "lg": "drac-input-border-lg",
        #[default]
        Md => "md": "drac-input-border-md",
        Sm => "sm": "drac-input-border-sm",
    }
}

token_enum! {
    /// `normal` has a light background; `outline` keeps the accent color
    /// and drops the background.
    #[derive(Default)]
    pub enum InputVariant("variant") {
        #[default]
        Normal => "normal": "drac-input-normal",
        Outline => "outline": "drac-input-outline",
    }
}

fn axis_of<T: Token + Default>() -> Axis {
    Axis::new(Registry::of::<T>(T::PROPERTY), T::default().name())
}

static INPUT: Lazy<ComponentKind> = Lazy::new(|| ComponentKind {
    name: "input".to_string(),
    base: vec![INPUT_BASE.to_string()],
    axes: vec![
        axis_of::<InputVariant>(),
        axis_of::<InputColor>(),
        axis_of::<InputSize>(),
        axis_of::<BorderSize>(),
    ],
    order: vec![
        Emit::Base,
        Emit::Axis(0),
        Emit::Axis(1),
        Emit::Axis(2),
        Emit::Axis(3),
        Emit::Padding,
        Emit::Margin,
    ],
});

/// The Input component kind.
pub fn input() -> &'static ComponentKind {
    &INPUT
}

/// Typed props for an Input.
///
/// Style props are closed enums. Everything else goes in `attrs`, which is
/// an ordinary props record: a style prop name found there still styles the
/// input when the matching typed field is unset, and an invalid value there
/// fails like it would on the string path.
///
/// # Example
///
/// ```rust
/// use stylemix::{InputColor, InputProps, InputVariant, PaddingMixin, Space, StyleError};
///
/// let composed = InputProps::new()
///     .variant(InputVariant::Outline)
///     .color(InputColor::Cyan)
///     .padding(PaddingMixin::new().p(Space::Md).pl(Space::Xs))
///     .attr("placeholder", "Email")
///     .compose()?;
///
/// assert_eq!(
///     composed.classes,
///     vec![
///         "drac-input",
///         "drac-input-outline",
///         "drac-input-cyan",
///         "drac-input-md",
///         "drac-input-border-md",
///         "drac-p-md",
///         "drac-pl-xs",
///     ]
/// );
/// assert_eq!(composed.props["placeholder"], "Email");
/// # Ok::<(), StyleError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputProps {
    pub color: Option<InputColor>,
    pub size: Option<InputSize>,
    pub border_size: Option<BorderSize>,
    pub variant: Option<InputVariant>,
    pub padding: PaddingMixin,
    pub margin: MarginMixin,
    pub attrs: Props,
}

impl InputProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: InputColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn size(mut self, size: InputSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn border_size(mut self, border_size: BorderSize) -> Self {
        self.border_size = Some(border_size);
        self
    }

    pub fn variant(mut self, variant: InputVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn padding(mut self, padding: PaddingMixin) -> Self {
        self.padding = padding;
        self
    }

    pub fn margin(mut self, margin: MarginMixin) -> Self {
        self.margin = margin;
        self
    }

    /// Adds an attribute to `attrs`.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Resolves the classes and the leftover attributes.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownToken`] when `attrs` carries a style prop
    /// with a value outside its registry.
    pub fn compose(&self) -> Result<Composition, StyleError> {
        input().compose(&self.to_props())
    }

    /// Flattens into a single props record: set style props first, then
    /// `attrs`. A key already set by a typed field keeps the typed value.
    pub fn to_props(&self) -> Props {
        let mut props = Props::new();
        let styles = [
            (InputVariant::PROPERTY, self.variant.map(Token::name)),
            (InputColor::PROPERTY, self.color.map(Token::name)),
            (InputSize::PROPERTY, self.size.map(Token::name)),
            (BorderSize::PROPERTY, self.border_size.map(Token::name)),
        ];
        for (key, token) in styles {
            if let Some(token) = token {
                props.insert(key.to_string(), Value::String(token.to_string()));
            }
        }
        self.padding.extend_props(&mut props);
        self.margin.extend_props(&mut props);
        for (key, value) in &self.attrs {
            props
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spacing::{MarginSpace, Space};
    use serde_json::json;

    fn props(value: Value) -> Props {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_input_kind_is_valid() {
        assert!(input().validate().is_ok());
        assert_eq!(input().name(), "input");
    }

    #[test]
    fn test_input_order() {
        use crate::component::Slot;
        assert_eq!(
            input().order(),
            vec![
                Slot::Base,
                Slot::axis("variant"),
                Slot::axis("color"),
                Slot::axis("size"),
                Slot::axis("borderSize"),
                Slot::Padding,
                Slot::Margin,
            ]
        );
    }

    #[test]
    fn test_input_defaults() {
        let composed = input().compose(&Props::new()).unwrap();
        assert_eq!(
            composed.classes,
            vec![
                "drac-input",
                "drac-input-normal",
                "drac-input-white",
                "drac-input-md",
                "drac-input-border-md",
            ]
        );
    }

    #[test]
    fn test_input_consumes_all_style_keys() {
        let consumed = input().consumed_keys();
        for key in [
            "color",
            "size",
            "borderSize",
            "variant",
            "p",
            "py",
            "px",
            "pt",
            "pb",
            "pl",
            "pr",
            "m",
            "my",
            "mx",
            "mt",
            "mb",
            "ml",
            "mr",
        ] {
            assert!(consumed.contains(&key), "{}", key);
        }
        assert_eq!(consumed.len(), 18);
    }

    #[test]
    fn test_outline_cyan_with_padding() {
        let composed = input()
            .compose(&props(json!({
                "variant": "outline", "color": "cyan", "p": "md", "pl": "xs"
            })))
            .unwrap();
        assert_eq!(
            composed.classes,
            vec![
                "drac-input",
                "drac-input-outline",
                "drac-input-cyan",
                "drac-input-md",
                "drac-input-border-md",
                "drac-p-md",
                "drac-pl-xs",
            ]
        );
        assert!(composed.props.is_empty());
    }

    #[test]
    fn test_padding_before_margin() {
        let composed = input()
            .compose(&props(json!({"m": "auto", "pb": "sm"})))
            .unwrap();
        let tail = &composed.classes[composed.classes.len() - 2..];
        assert_eq!(tail, &["drac-pb-sm", "drac-m-auto"]);
    }

    #[test]
    fn test_neon_color_rejected() {
        let err = input().compose(&props(json!({"color": "neon"}))).unwrap_err();
        let StyleError::UnknownToken {
            property, valid, ..
        } = err;
        assert_eq!(property, "color");
        assert_eq!(
            valid,
            vec!["green", "pink", "purple", "cyan", "yellow", "orange", "red", "white"]
        );
    }

    #[test]
    fn test_numeric_size_rejected() {
        let err = input().compose(&props(json!({"size": 20}))).unwrap_err();
        assert!(err.to_string().contains("'20'"));
    }

    #[test]
    fn test_invalid_style_attr_is_rejected() {
        let err = InputProps::new()
            .attr("color", "neon")
            .attr("name", "email")
            .compose()
            .unwrap_err();
        let StyleError::UnknownToken {
            property, supplied, ..
        } = err;
        assert_eq!(property, "color");
        assert_eq!(supplied, "neon");

        let err = InputProps::new()
            .color(InputColor::Red)
            .attr("mt", "huge")
            .compose()
            .unwrap_err();
        assert!(err.to_string().contains("'huge'"));
    }

    #[test]
    fn test_style_attrs_apply_when_typed_field_unset() {
        let composed = InputProps::new()
            .color(InputColor::Pink)
            .attr("color", "red")
            .attr("mt", "lg")
            .attr("name", "email")
            .compose()
            .unwrap();
        assert!(composed.classes.contains(&"drac-input-pink".to_string()));
        assert!(!composed.classes.contains(&"drac-input-red".to_string()));
        assert_eq!(composed.classes.last().map(String::as_str), Some("drac-mt-lg"));
        assert_eq!(Value::Object(composed.props), json!({"name": "email"}));
    }

    #[test]
    fn test_to_props_flattens() {
        let typed = InputProps::new()
            .size(InputSize::Sm)
            .margin(MarginMixin::new().mx(MarginSpace::Auto))
            .padding(PaddingMixin::new().py(Space::Xxs))
            .attr("disabled", true);
        assert_eq!(
            Value::Object(typed.to_props()),
            json!({"size": "sm", "py": "xxs", "mx": "auto", "disabled": true})
        );
    }

    #[test]
    fn test_border_size_parses_from_str() {
        assert_eq!("lg".parse::<BorderSize>().unwrap(), BorderSize::Lg);
        let err = "xl".parse::<BorderSize>().unwrap_err();
        assert!(err.to_string().contains("borderSize"));
    }
}
