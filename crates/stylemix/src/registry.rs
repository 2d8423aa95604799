//! Scale registries: closed token sets mapped to class fragments.
//!
//! Two representations exist side by side:
//!
//! - [`Token`] enums, generated by `token_enum!`, whose variants are exactly
//!   the registry's tokens. Lookups through them cannot fail.
//! - [`Registry`], a runtime map from token name to fragment, used when props
//!   arrive as strings or when a kind is loaded from configuration. Lookups
//!   fail with [`StyleError::UnknownToken`].
//!
//! Built-in registries are derived from their enum with [`Registry::of`], so
//! both paths always agree.

use crate::error::StyleError;

/// A member of a closed token enumeration.
pub trait Token: Copy + Eq + std::fmt::Debug + 'static {
    /// Prop name reported when parsing a string into this token fails.
    const PROPERTY: &'static str;

    /// Every token, in registry order.
    const ALL: &'static [Self];

    /// The token's name as written in props (e.g. `"md"`).
    fn name(self) -> &'static str;

    /// The registry value for this token.
    fn fragment(self) -> &'static str;
}

/// Parses a token name into its enum, reporting the full token set on failure.
pub fn parse_token<T: Token>(supplied: &str) -> Result<T, StyleError> {
    T::ALL
        .iter()
        .copied()
        .find(|token| token.name() == supplied)
        .ok_or_else(|| {
            StyleError::unknown_token(T::PROPERTY, supplied, T::ALL.iter().map(|t| t.name()))
        })
}

/// Declares a closed token enumeration and its registry values.
///
/// ```rust,ignore
/// token_enum! {
///     pub enum Shade("shade") {
///         Light => "light": "drac-shade-light",
///         Dark => "dark": "drac-shade-dark",
///     }
/// }
/// ```
macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident($property:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal : $fragment:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $token)] $variant ),+
        }

        impl $crate::registry::Token for $name {
            const PROPERTY: &'static str = $property;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }

            fn fragment(self) -> &'static str {
                match self {
                    $($name::$variant => $fragment),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::registry::Token::name(*self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::StyleError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::registry::parse_token(s)
            }
        }
    };
}

pub(crate) use token_enum;

/// An immutable mapping from a closed set of token names to fragments.
///
/// Entries keep their insertion order, which is the order reported in
/// [`StyleError::UnknownToken::valid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    property: String,
    entries: Vec<(String, String)>,
}

impl Registry {
    /// Creates an empty registry for the named prop.
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            entries: Vec::new(),
        }
    }

    /// Builds the registry for a token enum.
    pub fn of<T: Token>(property: impl Into<String>) -> Self {
        T::ALL
            .iter()
            .fold(Self::new(property), |registry, token| {
                registry.add(token.name(), token.fragment())
            })
    }

    /// Adds a token, returning the updated registry for chaining.
    ///
    /// Re-adding an existing token replaces its fragment in place.
    pub fn add(mut self, token: impl Into<String>, fragment: impl Into<String>) -> Self {
        let token = token.into();
        let fragment = fragment.into();
        match self.entries.iter_mut().find(|(name, _)| *name == token) {
            Some(entry) => entry.1 = fragment,
            None => self.entries.push((token, fragment)),
        }
        self
    }

    /// The prop this registry resolves.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Looks up a token's fragment.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownToken`] if `token` is not a key of this
    /// registry.
    pub fn lookup(&self, token: &str) -> Result<&str, StyleError> {
        self.lookup_as(&self.property, token)
    }

    /// Looks up a token, reporting failures against `prop` instead of the
    /// registry's own property. Spacing registries are shared by seven props.
    pub(crate) fn lookup_as(&self, prop: &str, token: &str) -> Result<&str, StyleError> {
        self.get(token)
            .ok_or_else(|| StyleError::unknown_token(prop, token, self.tokens()))
    }

    /// Returns the fragment for `token`, if present.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == token)
            .map(|(_, fragment)| fragment.as_str())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.get(token).is_some()
    }

    /// Token names in registry order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Fragments in registry order.
    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, fragment)| fragment.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
