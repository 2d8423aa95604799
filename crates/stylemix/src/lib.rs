//! # Stylemix - style props to utility classes
//!
//! Stylemix turns a component's semantic style props (color, size, variant,
//! border, padding, margin) into an ordered list of utility class names, and
//! hands back the remaining props for the native element.
//!
//! Resolution is a pure function of the props and a set of static
//! registries:
//!
//! 1. **Registries** ([`Registry`], [`Token`]) map closed token sets to class
//!    fragments.
//! 2. **Mixins** ([`PaddingMixin`], [`MarginMixin`], [`SpacingKind`]) resolve
//!    the seven spacing props of each kind, general before specific.
//! 3. **Components** ([`ComponentKind`], [`compose_classes`]) combine a kind's
//!    own axes with both mixins in the kind's emission order and strip every
//!    consumed prop.
//!
//! ## Quick start
//!
//! ```rust
//! use serde_json::json;
//! use stylemix::{compose_classes, input, StyleError};
//!
//! let props = json!({
//!     "variant": "outline",
//!     "color": "cyan",
//!     "p": "md",
//!     "pl": "xs",
//!     "data-testid": "email",
//! });
//! let composed = compose_classes(input(), props.as_object().unwrap())?;
//!
//! assert_eq!(
//!     composed.classes,
//!     vec![
//!         "drac-input",
//!         "drac-input-outline",
//!         "drac-input-cyan",
//!         "drac-input-md",
//!         "drac-input-border-md",
//!         "drac-p-md",
//!         "drac-pl-xs",
//!     ]
//! );
//! assert_eq!(composed.props.len(), 1);
//! assert_eq!(composed.props["data-testid"], "email");
//! # Ok::<(), StyleError>(())
//! ```
//!
//! Values outside a registry are errors, never silently replaced:
//!
//! ```rust
//! use serde_json::json;
//! use stylemix::{input, StyleError};
//!
//! let props = json!({"color": "neon"});
//! let err = input().compose(props.as_object().unwrap()).unwrap_err();
//! assert!(matches!(err, StyleError::UnknownToken { .. }));
//! ```
//!
//! ## Typed props
//!
//! With the token enums, invalid style values do not compile. See
//! [`InputProps`].
//!
//! ## Ordering
//!
//! Utility classes are cascade-sensitive, so output order is fixed: for
//! Input it is base, variant, color, size, border size, padding, margin.
//! Within a mixin it is all sides, vertical axis, horizontal axis, top,
//! bottom, left, right. Duplicate classes are not removed.

pub mod component;
mod error;
pub mod kit;
mod props;
pub mod registry;
pub mod spacing;
pub mod template;

pub use component::input::{
    input, BorderSize, InputColor, InputProps, InputSize, InputVariant, INPUT_BASE,
};
pub use component::{compose_classes, Axis, ComponentKind, Composition, KindBuilder, Slot};
pub use error::{KitError, StyleError};
pub use kit::Kit;
pub use props::Props;
pub use registry::{parse_token, Registry, Token};
pub use spacing::{
    clean_spacing_props, is_spacing_key, resolve_spacing_mixin, spacing_utilities, MarginMixin,
    MarginSpace, Mixin, PaddingMixin, Side, Space, SpacingKind, SpacingTable, SpacingUtilities,
    CLASS_PREFIX,
};
