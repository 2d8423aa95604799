//! Padding and margin mixins.
//!
//! Each spacing kind has seven optional props: one for all sides, two axes and
//! four sides. They resolve to `drac-{prop}-{token}` classes emitted from least
//! to most specific:
//!
//! | Side | Padding | Margin |
//! |------|---------|--------|
//! | all | `p` | `m` |
//! | vertical axis | `py` | `my` |
//! | horizontal axis | `px` | `mx` |
//! | top | `pt` | `mt` |
//! | bottom | `pb` | `mb` |
//! | left | `pl` | `ml` |
//! | right | `pr` | `mr` |
//!
//! Overlapping props are legal. `{p: md, pt: lg}` emits `drac-p-md` before
//! `drac-pt-lg`, so the top side ends up `lg` in the cascade no matter which
//! prop the caller wrote first.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StyleError;
use crate::props::{retain_unconsumed, token_of, Props};
use crate::registry::{token_enum, Registry, Token};

/// Prefix shared by every class the kit emits.
pub const CLASS_PREFIX: &str = "drac-";

token_enum! {
    /// Padding scale.
    pub enum Space("padding") {
        None => "none": "none",
        Xxs => "xxs": "xxs",
        Xs => "xs": "xs",
        Sm => "sm": "sm",
        Md => "md": "md",
        Lg => "lg": "lg",
    }
}

token_enum! {
    /// Margin scale: the padding scale plus `auto`.
    pub enum MarginSpace("margin") {
        Auto => "auto": "auto",
        None => "none": "none",
        Xxs => "xxs": "xxs",
        Xs => "xs": "xs",
        Sm => "sm": "sm",
        Md => "md": "md",
        Lg => "lg": "lg",
    }
}

static PADDING: Lazy<Registry> = Lazy::new(|| Registry::of::<Space>("padding"));
static MARGIN: Lazy<Registry> = Lazy::new(|| Registry::of::<MarginSpace>("margin"));

const PADDING_KEYS: [&str; 7] = ["p", "py", "px", "pt", "pb", "pl", "pr"];
const MARGIN_KEYS: [&str; 7] = ["m", "my", "mx", "mt", "mb", "ml", "mr"];

/// The side a spacing prop targets, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    All,
    Vertical,
    Horizontal,
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Least to most specific.
    pub const ORDER: [Side; 7] = [
        Side::All,
        Side::Vertical,
        Side::Horizontal,
        Side::Top,
        Side::Bottom,
        Side::Left,
        Side::Right,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Which spacing property a mixin controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpacingKind {
    Padding,
    Margin,
}

impl SpacingKind {
    /// The shared registry for this kind.
    pub fn registry(self) -> &'static Registry {
        match self {
            SpacingKind::Padding => &PADDING,
            SpacingKind::Margin => &MARGIN,
        }
    }

    /// The seven prop keys, in emission order.
    pub fn keys(self) -> [&'static str; 7] {
        match self {
            SpacingKind::Padding => PADDING_KEYS,
            SpacingKind::Margin => MARGIN_KEYS,
        }
    }

    /// The prop key for one side (e.g. `pt`).
    pub fn key(self, side: Side) -> &'static str {
        self.keys()[side.index()]
    }

    /// The class prefix for one side (e.g. `drac-pt`).
    pub fn class_prefix(self, side: Side) -> String {
        format!("{}{}", CLASS_PREFIX, self.key(side))
    }

    /// Builds the class for a side from a registry fragment.
    pub fn class(self, side: Side, fragment: &str) -> String {
        format!("{}{}-{}", CLASS_PREFIX, self.key(side), fragment)
    }

    /// Whether `key` is one of this kind's seven props.
    pub fn owns(self, key: &str) -> bool {
        self.keys().contains(&key)
    }

    /// Resolves this kind's props out of a props record.
    ///
    /// Keys that are absent emit nothing; every other key in `props` is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownToken`] for a value outside the registry,
    /// reported against the prop that carried it.
    pub fn resolve(self, props: &Props) -> Result<Vec<String>, StyleError> {
        let registry = self.registry();
        let mut classes = Vec::new();
        for side in Side::ORDER {
            let key = self.key(side);
            if let Some(token) = token_of(props, key, registry.tokens())? {
                let fragment = registry.lookup_as(key, token)?;
                classes.push(self.class(side, fragment));
            }
        }
        Ok(classes)
    }
}

/// A typed padding or margin prop set.
pub trait Mixin {
    type Token: Token;

    const KIND: SpacingKind;

    /// Tokens per side, indexed like [`Side::ORDER`].
    fn slots(&self) -> [Option<Self::Token>; 7];

    /// Writes the set props into a props record, keyed by prop name.
    fn extend_props(&self, props: &mut Props) {
        for (side, token) in Side::ORDER.iter().zip(self.slots()) {
            if let Some(token) = token {
                props.insert(
                    Self::KIND.key(*side).to_string(),
                    Value::String(token.name().to_string()),
                );
            }
        }
    }
}

/// Resolves a typed mixin into its ordered class list.
///
/// ```rust
/// use stylemix::{resolve_spacing_mixin, PaddingMixin, Space};
///
/// let mixin = PaddingMixin::new().px(Space::Sm).pr(Space::Lg);
/// assert_eq!(resolve_spacing_mixin(&mixin), vec!["drac-px-sm", "drac-pr-lg"]);
/// ```
pub fn resolve_spacing_mixin<M: Mixin>(mixin: &M) -> Vec<String> {
    Side::ORDER
        .iter()
        .zip(mixin.slots())
        .filter_map(|(side, token)| token.map(|t| M::KIND.class(*side, t.fragment())))
        .collect()
}

macro_rules! mixin_struct {
    (
        $(#[$meta:meta])*
        $name:ident<$token:ty>: $kind:expr,
        [$all:ident, $y:ident, $x:ident, $t:ident, $b:ident, $l:ident, $r:ident]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct $name {
            #[serde(skip_serializing_if = "Option::is_none")]
            pub $all: Option<$token>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub $y: Option<$token>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub $x: Option<$token>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub $t: Option<$token>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub $b: Option<$token>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub $l: Option<$token>,
            #[serde(skip_serializing_if = "Option::is_none")]
            pub $r: Option<$token>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn $all(mut self, token: $token) -> Self {
                self.$all = Some(token);
                self
            }

            pub fn $y(mut self, token: $token) -> Self {
                self.$y = Some(token);
                self
            }

            pub fn $x(mut self, token: $token) -> Self {
                self.$x = Some(token);
                self
            }

            pub fn $t(mut self, token: $token) -> Self {
                self.$t = Some(token);
                self
            }

            pub fn $b(mut self, token: $token) -> Self {
                self.$b = Some(token);
                self
            }

            pub fn $l(mut self, token: $token) -> Self {
                self.$l = Some(token);
                self
            }

            pub fn $r(mut self, token: $token) -> Self {
                self.$r = Some(token);
                self
            }

            pub fn is_empty(&self) -> bool {
                self.slots().iter().all(Option::is_none)
            }
        }

        impl Mixin for $name {
            type Token = $token;

            const KIND: SpacingKind = $kind;

            fn slots(&self) -> [Option<$token>; 7] {
                [self.$all, self.$y, self.$x, self.$t, self.$b, self.$l, self.$r]
            }
        }
    };
}

mixin_struct! {
    /// Padding props.
    PaddingMixin<Space>: SpacingKind::Padding,
    [p, py, px, pt, pb, pl, pr]
}

mixin_struct! {
    /// Margin props.
    MarginMixin<MarginSpace>: SpacingKind::Margin,
    [m, my, mx, mt, mb, ml, mr]
}

/// Whether `key` is any padding or margin prop.
pub fn is_spacing_key(key: &str) -> bool {
    SpacingKind::Padding.owns(key) || SpacingKind::Margin.owns(key)
}

/// Removes the fourteen spacing props from a props record, keeping
/// everything else in order.
pub fn clean_spacing_props(props: &Props) -> Props {
    retain_unconsumed(props, is_spacing_key)
}

/// Class prefixes and prop keys for both spacing kinds, in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpacingUtilities {
    pub classes: SpacingTable,
    pub props: SpacingTable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpacingTable {
    pub padding: Vec<String>,
    pub margin: Vec<String>,
}

static SPACING_UTILITIES: Lazy<SpacingUtilities> = Lazy::new(|| {
    let table = |f: fn(SpacingKind, Side) -> String| SpacingTable {
        padding: Side::ORDER.iter().map(|s| f(SpacingKind::Padding, *s)).collect(),
        margin: Side::ORDER.iter().map(|s| f(SpacingKind::Margin, *s)).collect(),
    };
    SpacingUtilities {
        classes: table(|kind, side| kind.class_prefix(side)),
        props: table(|kind, side| kind.key(side).to_string()),
    }
});

/// Returns the spacing utility table.
///
/// Documentation generators use this to list every spacing class and the
/// prop that produces it.
pub fn spacing_utilities() -> &'static SpacingUtilities {
    &SPACING_UTILITIES
}
