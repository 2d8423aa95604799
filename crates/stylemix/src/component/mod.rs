//! Component class composition.
//!
//! A [`ComponentKind`] is the per-kind configuration record: its structural
//! base classes, one [`Axis`] per style prop (registry plus default token),
//! and the order in which everything is emitted. Composing a props record
//! against a kind yields a [`Composition`]: the ordered class list and the
//! props that remain once every style prop has been taken out.
//!
//! ```rust
//! use serde_json::json;
//! use stylemix::{compose_classes, input};
//!
//! let props = json!({"variant": "outline", "color": "cyan", "id": "email"});
//! let composed = compose_classes(input(), props.as_object().unwrap()).unwrap();
//!
//! assert_eq!(
//!     composed.class_name(),
//!     "drac-input drac-input-outline drac-input-cyan drac-input-md drac-input-border-md"
//! );
//! assert_eq!(composed.props, *json!({"id": "email"}).as_object().unwrap());
//! ```

pub mod input;

use log::{debug, trace};

use crate::error::{KitError, StyleError};
use crate::props::{retain_unconsumed, token_of, Props};
use crate::registry::Registry;
use crate::spacing::{is_spacing_key, SpacingKind};

/// Slot names that cannot double as axis props.
const RESERVED_SLOTS: [&str; 3] = ["base", "padding", "margin"];

/// One style prop of a component kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    registry: Registry,
    default: String,
}

impl Axis {
    /// Creates an axis; the prop name is the registry's property.
    pub fn new(registry: Registry, default: impl Into<String>) -> Self {
        Self {
            registry,
            default: default.into(),
        }
    }

    /// The prop this axis consumes.
    pub fn prop(&self) -> &str {
        self.registry.property()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The token used when the prop is absent.
    pub fn default_token(&self) -> &str {
        &self.default
    }

    /// Resolves the axis against a props record, falling back to the default
    /// token only when the prop is absent.
    pub fn resolve(&self, props: &Props) -> Result<&str, StyleError> {
        let token = token_of(props, self.prop(), self.registry.tokens())?;
        self.registry.lookup(token.unwrap_or(&self.default))
    }
}

/// A position in a kind's emission order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(from = "String")]
pub enum Slot {
    /// The kind's structural classes.
    Base,
    /// The axis consuming the named prop.
    Axis(String),
    /// Padding mixin classes.
    Padding,
    /// Margin mixin classes.
    Margin,
}

impl Slot {
    pub fn axis(prop: impl Into<String>) -> Self {
        Slot::Axis(prop.into())
    }

    pub fn name(&self) -> &str {
        match self {
            Slot::Base => "base",
            Slot::Axis(prop) => prop,
            Slot::Padding => "padding",
            Slot::Margin => "margin",
        }
    }
}

impl From<&str> for Slot {
    fn from(name: &str) -> Self {
        match name {
            "base" => Slot::Base,
            "padding" => Slot::Padding,
            "margin" => Slot::Margin,
            prop => Slot::Axis(prop.to_string()),
        }
    }
}

impl From<String> for Slot {
    fn from(name: String) -> Self {
        Slot::from(name.as_str())
    }
}

/// Validated emission step; axes are referenced by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emit {
    Base,
    Axis(usize),
    Padding,
    Margin,
}

/// Registries, defaults and emission order for one kind of component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentKind {
    name: String,
    base: Vec<String>,
    axes: Vec<Axis>,
    order: Vec<Emit>,
}

impl ComponentKind {
    /// Starts a kind definition.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stylemix::{ComponentKind, Registry, Slot};
    ///
    /// let badge = ComponentKind::builder("badge")
    ///     .base("drac-badge")
    ///     .axis(
    ///         Registry::new("color")
    ///             .add("purple", "drac-badge-purple")
    ///             .add("pink", "drac-badge-pink"),
    ///         "purple",
    ///     )
    ///     .order([Slot::Base, Slot::axis("color"), Slot::Padding, Slot::Margin])
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(badge.name(), "badge");
    /// ```
    pub fn builder(name: impl Into<String>) -> KindBuilder {
        KindBuilder {
            name: name.into(),
            base: Vec::new(),
            axes: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Structural classes emitted at the [`Slot::Base`] position.
    pub fn base(&self) -> &[String] {
        &self.base
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Returns the axis consuming `prop`, if any.
    pub fn axis(&self, prop: &str) -> Option<&Axis> {
        self.axes.iter().find(|axis| axis.prop() == prop)
    }

    /// The emission order.
    pub fn order(&self) -> Vec<Slot> {
        self.order
            .iter()
            .map(|emit| slot_of(&self.axes, *emit))
            .collect()
    }

    /// Whether composing against this kind removes `key` from the props.
    pub fn consumes(&self, key: &str) -> bool {
        self.axis(key).is_some()
            || self.order.iter().any(|emit| match emit {
                Emit::Padding => SpacingKind::Padding.owns(key),
                Emit::Margin => SpacingKind::Margin.owns(key),
                _ => false,
            })
    }

    /// Every prop name this kind consumes, axes first.
    pub fn consumed_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.axes.iter().map(Axis::prop).collect();
        for emit in &self.order {
            match emit {
                Emit::Padding => keys.extend(SpacingKind::Padding.keys()),
                Emit::Margin => keys.extend(SpacingKind::Margin.keys()),
                _ => {}
            }
        }
        keys
    }

    /// Resolves `props` into an ordered class list and the leftover props.
    ///
    /// Classes are emitted slot by slot in [`order`](Self::order). Nothing is
    /// deduplicated: when two slots produce the same class both copies are
    /// kept and the cascade decides.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownToken`] when any consumed prop holds a
    /// value outside its registry. No partial result is produced.
    pub fn compose(&self, props: &Props) -> Result<Composition, StyleError> {
        let mut classes = Vec::new();
        for emit in &self.order {
            match emit {
                Emit::Base => classes.extend(self.base.iter().cloned()),
                Emit::Axis(i) => classes.push(self.axes[*i].resolve(props)?.to_string()),
                Emit::Padding => classes.extend(SpacingKind::Padding.resolve(props)?),
                Emit::Margin => classes.extend(SpacingKind::Margin.resolve(props)?),
            }
        }

        let props = retain_unconsumed(props, |key| self.consumes(key));
        trace!(
            "composed '{}': {} classes, {} passthrough props",
            self.name,
            classes.len(),
            props.len()
        );
        Ok(Composition { classes, props })
    }

    /// Re-checks the kind's configuration: axes, classes and emission order.
    ///
    /// Kinds from [`builder`](Self::builder) are checked on build; this is for
    /// kinds assembled inside the crate.
    pub fn validate(&self) -> Result<(), KitError> {
        check_axes(&self.name, &self.base, &self.axes)?;
        check_order(&self.name, &self.base, &self.axes, &self.order)
    }

}

/// Composes a props record against a component kind.
///
/// See [`ComponentKind::compose`].
pub fn compose_classes(kind: &ComponentKind, props: &Props) -> Result<Composition, StyleError> {
    kind.compose(props)
}

/// Builder for [`ComponentKind`].
#[derive(Debug, Clone)]
pub struct KindBuilder {
    name: String,
    base: Vec<String>,
    axes: Vec<Axis>,
    order: Vec<Slot>,
}

impl KindBuilder {
    /// Adds a structural class.
    pub fn base(mut self, class: impl Into<String>) -> Self {
        self.base.push(class.into());
        self
    }

    /// Adds a style axis. The prop name is the registry's property.
    pub fn axis(mut self, registry: Registry, default: impl Into<String>) -> Self {
        self.axes.push(Axis::new(registry, default));
        self
    }

    /// Appends one slot to the emission order.
    pub fn slot(mut self, slot: impl Into<Slot>) -> Self {
        self.order.push(slot.into());
        self
    }

    /// Appends slots to the emission order.
    pub fn order<I, S>(mut self, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Slot>,
    {
        self.order.extend(slots.into_iter().map(Into::into));
        self
    }

    /// Validates and builds the kind.
    ///
    /// # Errors
    ///
    /// - [`KitError::ReservedProp`] if an axis prop is a spacing prop or a slot name
    /// - [`KitError::DuplicateAxis`] if two axes consume the same prop
    /// - [`KitError::UnknownDefault`] if a default is not a registry token
    /// - [`KitError::InvalidClass`] if a base class or fragment is not a single class name
    /// - [`KitError::UnknownSlot`] if the order names an undeclared axis
    /// - [`KitError::DuplicateSlot`] if a slot appears twice
    /// - [`KitError::MissingSlot`] if an axis, or the base when classes are declared, is never emitted
    pub fn build(self) -> Result<ComponentKind, KitError> {
        check_axes(&self.name, &self.base, &self.axes)?;

        let mut order = Vec::with_capacity(self.order.len());
        for slot in &self.order {
            order.push(match slot {
                Slot::Base => Emit::Base,
                Slot::Padding => Emit::Padding,
                Slot::Margin => Emit::Margin,
                Slot::Axis(prop) => self
                    .axes
                    .iter()
                    .position(|axis| axis.prop() == prop)
                    .map(Emit::Axis)
                    .ok_or_else(|| KitError::UnknownSlot {
                        kind: self.name.clone(),
                        slot: prop.clone(),
                    })?,
            });
        }
        check_order(&self.name, &self.base, &self.axes, &order)?;

        debug!(
            "built component kind '{}' with {} axes and {} slots",
            self.name,
            self.axes.len(),
            order.len()
        );
        Ok(ComponentKind {
            name: self.name,
            base: self.base,
            axes: self.axes,
            order,
        })
    }
}

fn check_axes(kind: &str, base: &[String], axes: &[Axis]) -> Result<(), KitError> {
    for class in base {
        check_class(kind, class)?;
    }
    for (i, axis) in axes.iter().enumerate() {
        let prop = axis.prop();
        if is_spacing_key(prop) || RESERVED_SLOTS.contains(&prop) {
            return Err(KitError::ReservedProp {
                kind: kind.to_string(),
                prop: prop.to_string(),
            });
        }
        if axes[..i].iter().any(|earlier| earlier.prop() == prop) {
            return Err(KitError::DuplicateAxis {
                kind: kind.to_string(),
                prop: prop.to_string(),
            });
        }
        if !axis.registry.contains(&axis.default) {
            return Err(KitError::UnknownDefault {
                kind: kind.to_string(),
                prop: prop.to_string(),
                default: axis.default.clone(),
            });
        }
        for fragment in axis.registry.fragments() {
            check_class(kind, fragment)?;
        }
    }
    Ok(())
}

fn check_class(kind: &str, class: &str) -> Result<(), KitError> {
    if is_class_name(class) {
        Ok(())
    } else {
        Err(KitError::InvalidClass {
            kind: kind.to_string(),
            class: class.to_string(),
        })
    }
}

fn slot_of(axes: &[Axis], emit: Emit) -> Slot {
    match emit {
        Emit::Base => Slot::Base,
        Emit::Axis(i) => axes
            .get(i)
            .map_or_else(|| Slot::axis(format!("#{}", i)), |axis| Slot::axis(axis.prop())),
        Emit::Padding => Slot::Padding,
        Emit::Margin => Slot::Margin,
    }
}

fn check_order(kind: &str, base: &[String], axes: &[Axis], order: &[Emit]) -> Result<(), KitError> {
    for (i, emit) in order.iter().enumerate() {
        if let Emit::Axis(axis) = emit {
            if *axis >= axes.len() {
                return Err(KitError::UnknownSlot {
                    kind: kind.to_string(),
                    slot: slot_of(axes, *emit).name().to_string(),
                });
            }
        }
        if order[..i].contains(emit) {
            return Err(KitError::DuplicateSlot {
                kind: kind.to_string(),
                slot: slot_of(axes, *emit).name().to_string(),
            });
        }
    }

    for (i, axis) in axes.iter().enumerate() {
        if !order.contains(&Emit::Axis(i)) {
            return Err(KitError::MissingSlot {
                kind: kind.to_string(),
                prop: axis.prop().to_string(),
            });
        }
    }
    if !base.is_empty() && !order.contains(&Emit::Base) {
        return Err(KitError::MissingSlot {
            kind: kind.to_string(),
            prop: "base".to_string(),
        });
    }
    Ok(())
}

/// Whether `class` is a single HTML class token: non-empty, no ASCII
/// whitespace, no control characters.
///
/// Utility classes such as `sm:px-2` or `w-1/2` qualify; they only need
/// escaping once written as CSS selectors.
pub(crate) fn is_class_name(class: &str) -> bool {
    !class.is_empty()
        && !class
            .chars()
            .any(|c| c.is_ascii_whitespace() || c.is_control())
}

/// The result of composing props against a component kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// Classes in emission order, duplicates kept.
    pub classes: Vec<String>,
    /// The input props minus every consumed style prop, in input order.
    pub props: Props,
}

impl Composition {
    /// The class list joined with single spaces, ready for a class attribute.
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    pub fn into_parts(self) -> (Vec<String>, Props) {
        (self.classes, self.props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn props(value: Value) -> Props {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn badge() -> KindBuilder {
        ComponentKind::builder("badge").base("drac-badge").axis(
            Registry::new("color")
                .add("purple", "drac-badge-purple")
                .add("pink", "drac-badge-pink"),
            "purple",
        )
    }

    #[test]
    fn test_builder_builds_valid_kind() {
        let kind = badge()
            .order([Slot::Base, Slot::axis("color"), Slot::Padding])
            .build()
            .unwrap();
        assert_eq!(kind.name(), "badge");
        assert_eq!(kind.base(), &["drac-badge".to_string()]);
        assert_eq!(
            kind.order(),
            vec![Slot::Base, Slot::axis("color"), Slot::Padding]
        );
        assert_eq!(kind.axis("color").unwrap().default_token(), "purple");
    }

    #[test]
    fn test_compose_uses_default_when_absent() {
        let kind = badge().order(["base", "color"]).build().unwrap();
        let composed = kind.compose(&Props::new()).unwrap();
        assert_eq!(composed.classes, vec!["drac-badge", "drac-badge-purple"]);
        assert!(composed.props.is_empty());
    }

    #[test]
    fn test_compose_follows_declared_order() {
        let kind = badge()
            .order([Slot::Margin, Slot::axis("color"), Slot::Base])
            .build()
            .unwrap();
        let composed = kind
            .compose(&props(json!({"color": "pink", "m": "auto"})))
            .unwrap();
        assert_eq!(
            composed.classes,
            vec!["drac-m-auto", "drac-badge-pink", "drac-badge"]
        );
    }

    #[test]
    fn test_spacing_keys_pass_through_without_spacing_slots() {
        let kind = badge().order(["base", "color"]).build().unwrap();
        let composed = kind.compose(&props(json!({"p": "md", "color": "pink"}))).unwrap();
        assert_eq!(composed.classes, vec!["drac-badge", "drac-badge-pink"]);
        assert_eq!(Value::Object(composed.props), json!({"p": "md"}));
        assert!(!kind.consumes("p"));
    }

    #[test]
    fn test_duplicate_classes_are_kept() {
        let kind = ComponentKind::builder("chip")
            .base("drac-chip")
            .axis(Registry::new("tone").add("plain", "drac-chip"), "plain")
            .order(["base", "tone"])
            .build()
            .unwrap();
        let composed = kind.compose(&Props::new()).unwrap();
        assert_eq!(composed.classes, vec!["drac-chip", "drac-chip"]);
    }

    #[test]
    fn test_compose_unknown_token() {
        let kind = badge().order(["base", "color"]).build().unwrap();
        let err = kind.compose(&props(json!({"color": "neon"}))).unwrap_err();
        let StyleError::UnknownToken {
            property,
            supplied,
            valid,
        } = err;
        assert_eq!(property, "color");
        assert_eq!(supplied, "neon");
        assert_eq!(valid, vec!["purple", "pink"]);
    }

    #[test]
    fn test_consumed_keys() {
        let kind = badge()
            .order([Slot::Base, Slot::axis("color"), Slot::Margin])
            .build()
            .unwrap();
        assert_eq!(
            kind.consumed_keys(),
            vec!["color", "m", "my", "mx", "mt", "mb", "ml", "mr"]
        );
    }

    #[test]
    fn test_build_rejects_unknown_slot() {
        let err = badge().order(["base", "color", "shadow"]).build().unwrap_err();
        assert!(matches!(err, KitError::UnknownSlot { slot, .. } if slot == "shadow"));
    }

    #[test]
    fn test_build_rejects_duplicate_slot() {
        let err = badge()
            .order(["base", "color", "padding", "padding"])
            .build()
            .unwrap_err();
        assert!(matches!(err, KitError::DuplicateSlot { slot, .. } if slot == "padding"));
    }

    #[test]
    fn test_build_rejects_missing_axis_slot() {
        let err = badge().order(["base"]).build().unwrap_err();
        assert!(matches!(err, KitError::MissingSlot { prop, .. } if prop == "color"));
    }

    #[test]
    fn test_build_rejects_missing_base_slot() {
        let err = badge().order(["color"]).build().unwrap_err();
        assert!(matches!(err, KitError::MissingSlot { prop, .. } if prop == "base"));
    }

    #[test]
    fn test_build_rejects_unknown_default() {
        let err = ComponentKind::builder("badge")
            .axis(Registry::new("color").add("pink", "drac-badge-pink"), "teal")
            .order(["color"])
            .build()
            .unwrap_err();
        assert!(matches!(err, KitError::UnknownDefault { default, .. } if default == "teal"));
    }

    #[test]
    fn test_build_rejects_reserved_props() {
        for prop in ["pt", "m", "padding", "base"] {
            let err = ComponentKind::builder("badge")
                .axis(Registry::new(prop).add("a", "drac-a"), "a")
                .order([Slot::axis(prop)])
                .build()
                .unwrap_err();
            assert!(matches!(err, KitError::ReservedProp { .. }), "{}", prop);
        }
    }

    #[test]
    fn test_build_rejects_duplicate_axis() {
        let err = badge()
            .axis(Registry::new("color").add("red", "drac-badge-red"), "red")
            .order(["base", "color"])
            .build()
            .unwrap_err();
        assert!(matches!(err, KitError::DuplicateAxis { prop, .. } if prop == "color"));
    }

    #[test]
    fn test_build_rejects_invalid_class() {
        let err = ComponentKind::builder("badge")
            .base("drac-badge drac-round")
            .order(["base"])
            .build()
            .unwrap_err();
        assert!(matches!(err, KitError::InvalidClass { .. }));
    }

    #[test]
    fn test_is_class_name() {
        assert!(is_class_name("drac-input"));
        assert!(is_class_name("drac-p-md"));
        assert!(is_class_name("-webkit-thing"));
        assert!(!is_class_name(""));
        assert!(!is_class_name(" drac-input"));
        assert!(!is_class_name("two words"));
        assert!(!is_class_name("tab\tstop"));
        assert!(!is_class_name("line\u{7}bell"));
    }

    #[test]
    fn test_utility_class_shapes_are_class_names() {
        for class in ["sm:px-2", "w-1/2", "hover:bg-red-500", "p-0.5", "1col", "[&>*]:mt-2"] {
            assert!(is_class_name(class), "{}", class);
        }
    }

    #[test]
    fn test_build_accepts_utility_classes() {
        let kind = ComponentKind::builder("btn")
            .base("sm:px-2")
            .axis(
                Registry::new("width")
                    .add("half", "w-1/2")
                    .add("hover", "hover:bg-red-500"),
                "half",
            )
            .order(["base", "width"])
            .build()
            .unwrap();
        let composed = kind.compose(&props(json!({"width": "hover"}))).unwrap();
        assert_eq!(composed.class_name(), "sm:px-2 hover:bg-red-500");
    }

    #[test]
    fn test_validate_checks_emission_order() {
        let valid = badge().order(["base", "color"]).build().unwrap();
        assert!(valid.validate().is_ok());

        let missing_axis = ComponentKind {
            order: vec![Emit::Base],
            ..valid.clone()
        };
        let err = missing_axis.validate().unwrap_err();
        assert!(matches!(err, KitError::MissingSlot { prop, .. } if prop == "color"));

        let repeated = ComponentKind {
            order: vec![Emit::Base, Emit::Axis(0), Emit::Base],
            ..valid.clone()
        };
        let err = repeated.validate().unwrap_err();
        assert!(matches!(err, KitError::DuplicateSlot { slot, .. } if slot == "base"));

        let dangling = ComponentKind {
            order: vec![Emit::Base, Emit::Axis(0), Emit::Axis(3)],
            ..valid
        };
        let err = dangling.validate().unwrap_err();
        assert!(matches!(err, KitError::UnknownSlot { .. }));
    }

    #[test]
    fn test_composition_class_name() {
        let composition = Composition {
            classes: vec!["a".into(), "b".into(), "a".into()],
            props: Props::new(),
        };
        assert_eq!(composition.class_name(), "a b a");
        let (classes, props) = composition.into_parts();
        assert_eq!(classes.len(), 3);
        assert!(props.is_empty());
    }

    #[test]
    fn test_slot_from_str() {
        assert_eq!(Slot::from("base"), Slot::Base);
        assert_eq!(Slot::from("margin"), Slot::Margin);
        assert_eq!(Slot::from("size"), Slot::axis("size"));
        assert_eq!(Slot::axis("size").name(), "size");
    }
}
