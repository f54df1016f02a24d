//! Facility Catalog

use std::{borrow::Borrow, fmt};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{customers::CustomerClass, rates::PriceTable};

new_key_type! {
    /// Line Item Key
    pub struct ItemKey;
}

/// Errors raised while assembling a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two line items share an identifier.
    #[error("duplicate line item id: {0}")]
    DuplicateItem(ItemId),

    /// A facility must offer at least one customer class.
    #[error("facility {0:?} offers no customer classes")]
    NoClasses(String),
}

/// Identifier of a package or room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Create a new item id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// What a line item is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    /// A bundled offering
    Package {
        /// Things the package bundles (venue, catering, ...)
        includes: SmallVec<[String; 4]>,
    },

    /// An individually priced sub-space
    Room,
}

impl ItemKind {
    /// Short label used in summaries
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Package { .. } => "package",
            ItemKind::Room => "room",
        }
    }
}

/// A selectable, priced unit.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    id: ItemId,
    name: String,
    kind: ItemKind,
    pricing: PriceTable,
}

impl LineItem {
    /// Create a package.
    pub fn package<I, S>(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        includes: I,
        pricing: PriceTable,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Package {
                includes: includes.into_iter().map(Into::into).collect(),
            },
            pricing,
        }
    }

    /// Create a room.
    pub fn room(id: impl Into<ItemId>, name: impl Into<String>, pricing: PriceTable) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Room,
            pricing,
        }
    }

    /// Item identifier
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Package or room
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// Per-class rates
    pub fn pricing(&self) -> &PriceTable {
        &self.pricing
    }
}

/// Packages and rooms offered by a facility.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: SlotMap<ItemKey, LineItem>,
    keys: FxHashMap<ItemId, ItemKey>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of items.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateItem`] if two items share an id.
    pub fn with_items(items: impl IntoIterator<Item = LineItem>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        for item in items {
            catalog.insert(item)?;
        }

        Ok(catalog)
    }

    /// Add an item.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateItem`] if an item with the same id exists.
    pub fn insert(&mut self, item: LineItem) -> Result<ItemKey, CatalogError> {
        if self.keys.contains_key(item.id()) {
            return Err(CatalogError::DuplicateItem(item.id().clone()));
        }

        let id = item.id().clone();
        let key = self.items.insert(item);

        self.keys.insert(id, key);

        Ok(key)
    }

    /// Look up an item by id.
    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.keys.get(id).and_then(|key| self.items.get(*key))
    }

    /// Whether the catalog knows the id.
    pub fn contains(&self, id: &str) -> bool {
        self.keys.contains_key(id)
    }

    /// All packages
    pub fn packages(&self) -> impl Iterator<Item = &LineItem> {
        self.items
            .values()
            .filter(|item| matches!(item.kind(), ItemKind::Package { .. }))
    }

    /// All rooms
    pub fn rooms(&self) -> impl Iterator<Item = &LineItem> {
        self.items
            .values()
            .filter(|item| matches!(item.kind(), ItemKind::Room))
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A rentable facility: its pricing, currency and catalog.
#[derive(Debug, Clone)]
pub struct Facility {
    name: String,
    currency: &'static Currency,
    classes: SmallVec<[CustomerClass; 3]>,
    pricing: PriceTable,
    catalog: Catalog,
}

impl Facility {
    /// Create a facility offering every customer class.
    pub fn new(
        name: impl Into<String>,
        currency: &'static Currency,
        pricing: PriceTable,
        catalog: Catalog,
    ) -> Self {
        Self {
            name: name.into(),
            currency,
            classes: CustomerClass::ALL.into_iter().collect(),
            pricing,
            catalog,
        }
    }

    /// Restrict the customer classes the facility offers.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoClasses`] if `classes` is empty.
    pub fn with_classes(
        mut self,
        classes: impl IntoIterator<Item = CustomerClass>,
    ) -> Result<Self, CatalogError> {
        let mut offered: SmallVec<[CustomerClass; 3]> = classes.into_iter().collect();
        offered.sort_unstable();
        offered.dedup();

        if offered.is_empty() {
            return Err(CatalogError::NoClasses(self.name));
        }

        self.classes = offered;

        Ok(self)
    }

    /// Facility name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Currency all rates are expressed in
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Customer classes the facility prices for
    pub fn classes(&self) -> &[CustomerClass] {
        &self.classes
    }

    /// Whether the facility prices for the given class
    pub fn offers(&self, class: CustomerClass) -> bool {
        self.classes.contains(&class)
    }

    /// Facility-level rates, used for whole-facility rentals
    pub fn pricing(&self) -> &PriceTable {
        &self.pricing
    }

    /// Packages and rooms
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
