//! Component kits: named collections of component kinds.
//!
//! The built-in [`Kit::dracula`] holds the Input kind. Further kinds are
//! described in YAML or JSON and checked once, at load time:
//!
//! ```yaml
//! components:
//!   - name: badge
//!     base: [drac-badge]
//!     axes:
//!       - prop: color
//!         default: purple
//!         values:
//!           purple: drac-badge-purple
//!           pink: drac-badge-pink
//!     order: [base, color, padding, margin]
//! ```
//!
//! `values` keeps document order, which is the order reported back in
//! unknown-token errors. `order` entries are `base`, `padding`, `margin` or
//! the prop name of a declared axis.

use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::Value;

use crate::component::input::input;
use crate::component::{ComponentKind, Slot};
use crate::error::KitError;
use crate::registry::Registry;

static DRACULA: Lazy<Kit> = Lazy::new(|| Kit {
    kinds: vec![input().clone()],
});

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KitDocument {
    #[serde(default)]
    components: Vec<KindDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KindDocument {
    name: String,
    #[serde(default)]
    base: Vec<String>,
    #[serde(default)]
    axes: Vec<AxisDocument>,
    order: Vec<Slot>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AxisDocument {
    prop: String,
    default: String,
    values: serde_json::Map<String, Value>,
}

impl KindDocument {
    fn build(self) -> Result<ComponentKind, KitError> {
        let mut builder = ComponentKind::builder(&self.name);
        for class in self.base {
            builder = builder.base(class);
        }
        for axis in self.axes {
            let mut registry = Registry::new(&axis.prop);
            for (token, class) in axis.values {
                match class {
                    Value::String(class) => registry = registry.add(token, class),
                    _ => {
                        return Err(KitError::NonStringClass {
                            kind: self.name,
                            prop: axis.prop,
                            token,
                        })
                    }
                }
            }
            builder = builder.axis(registry, axis.default);
        }
        builder.order(self.order).build()
    }
}

/// A set of component kinds, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct Kit {
    kinds: Vec<ComponentKind>,
}

impl Kit {
    /// Creates an empty kit.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in Dracula kit.
    ///
    /// Built on first use and shared, read-only, by every caller.
    pub fn dracula() -> &'static Kit {
        &DRACULA
    }

    /// Adds a kind, returning the updated kit for chaining.
    ///
    /// # Errors
    ///
    /// Returns [`KitError::DuplicateKind`] if a kind with the same name is
    /// already present.
    pub fn add(mut self, kind: ComponentKind) -> Result<Self, KitError> {
        if self.get(kind.name()).is_some() {
            return Err(KitError::DuplicateKind {
                kind: kind.name().to_string(),
            });
        }
        self.kinds.push(kind);
        Ok(self)
    }

    /// Adds every kind of `other`.
    pub fn merge(self, other: Kit) -> Result<Self, KitError> {
        other.kinds.into_iter().try_fold(self, Kit::add)
    }

    pub fn get(&self, name: &str) -> Option<&ComponentKind> {
        self.kinds.iter().find(|kind| kind.name() == name)
    }

    pub fn kinds(&self) -> &[ComponentKind] {
        &self.kinds
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.kinds.iter().map(ComponentKind::name)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Parses a kit from a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, KitError> {
        let document: KitDocument = serde_yaml::from_str(source)?;
        Self::from_document(document)
    }

    /// Parses a kit from a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, KitError> {
        let document: KitDocument = serde_json::from_str(source)?;
        Self::from_document(document)
    }

    /// Reads a kit file, choosing the parser by extension (`.yaml`, `.yml`
    /// or `.json`).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, KitError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Kit, KitError> = match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(KitError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };
        let source = std::fs::read_to_string(path).map_err(|source| KitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loading component kit from {}", path.display());
        parse(&source)
    }

    fn from_document(document: KitDocument) -> Result<Self, KitError> {
        let kit = document
            .components
            .into_iter()
            .try_fold(Kit::new(), |kit, kind| kit.add(kind.build()?))?;
        debug!("loaded component kit with {} kinds", kit.len());
        Ok(kit)
    }
}
