//! Sort, skip and limit over a record snapshot.
//!
//! The engine assumes validated input: sort keys and directions are parsed
//! into [`SortField`] and [`SortDirection`] at the request boundary, so
//! [`query`] itself cannot fail.
//!
//! ## Ordering
//!
//! In the default [`SortMode::Text`] every field is compared by its textual
//! form under the root-locale collation, numeric fields included: `"10"`
//! sorts before `"9"`, `"access port"` before `"Uplink to core"`, and
//! `"sw_a"` before `"sw-a"`. [`SortMode::Natural`] compares `vlanId` and
//! `speedMbps` as integers instead. Both modes use a stable sort, and `desc` reverses the comparison
//! rather than the output, so records with equal keys keep insertion order
//! in either direction.

use crate::error::CoreError;
use crate::record::InterfaceRecord;
use icu_collator::{Collator, CollatorOptions};
use serde::Serialize;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// A record field that can be used as a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    /// `id`
    Id,
    /// `switchName`
    SwitchName,
    /// `interfaceName`
    InterfaceName,
    /// `vlanId`
    VlanId,
    /// `speedMbps`
    SpeedMbps,
    /// `status`
    Status,
    /// `description`
    Description,
}

/// Accepted sort keys. `interface` is the legacy name of `interfaceName`.
const SORT_KEYS: &[(&str, SortField)] = &[
    ("id", SortField::Id),
    ("switchName", SortField::SwitchName),
    ("interfaceName", SortField::InterfaceName),
    ("interface", SortField::InterfaceName),
    ("vlanId", SortField::VlanId),
    ("speedMbps", SortField::SpeedMbps),
    ("status", SortField::Status),
    ("description", SortField::Description),
];

impl SortField {
    /// All sort fields, in record field order.
    pub const ALL: [SortField; 7] = [
        SortField::Id,
        SortField::SwitchName,
        SortField::InterfaceName,
        SortField::VlanId,
        SortField::SpeedMbps,
        SortField::Status,
        SortField::Description,
    ];

    /// Returns the JSON field name.
    pub fn name(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::SwitchName => "switchName",
            SortField::InterfaceName => "interfaceName",
            SortField::VlanId => "vlanId",
            SortField::SpeedMbps => "speedMbps",
            SortField::Status => "status",
            SortField::Description => "description",
        }
    }

    /// Returns the field's textual form for the given record.
    pub fn text<'a>(self, record: &'a InterfaceRecord) -> Cow<'a, str> {
        let fields = &record.fields;
        match self {
            SortField::Id => Cow::Borrowed(record.id.as_str()),
            SortField::SwitchName => Cow::Borrowed(&fields.switch_name),
            SortField::InterfaceName => Cow::Borrowed(&fields.interface_name),
            SortField::VlanId => Cow::Owned(fields.vlan_id.to_string()),
            SortField::SpeedMbps => Cow::Owned(fields.speed_mbps.to_string()),
            SortField::Status => Cow::Borrowed(&fields.status),
            SortField::Description => Cow::Borrowed(&fields.description),
        }
    }

    /// Returns the integer value for numeric fields, `None` for text fields.
    pub fn number(self, record: &InterfaceRecord) -> Option<u32> {
        match self {
            SortField::VlanId => Some(record.fields.vlan_id),
            SortField::SpeedMbps => Some(record.fields.speed_mbps),
            _ => None,
        }
    }

    fn compare(
        self,
        mode: SortMode,
        order: &TextOrder,
        a: &InterfaceRecord,
        b: &InterfaceRecord,
    ) -> Ordering {
        if mode == SortMode::Natural {
            if let (Some(x), Some(y)) = (self.number(a), self.number(b)) {
                return x.cmp(&y);
            }
        }
        order.compare(&self.text(a), &self.text(b))
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SORT_KEYS
            .iter()
            .find(|(key, _)| *key == s)
            .map(|(_, field)| *field)
            .ok_or_else(|| CoreError::InvalidSortField(s.to_string()))
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Root-locale collation for textual keys.
struct TextOrder(Option<Collator>);

impl TextOrder {
    fn root() -> Self {
        match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Self(Some(collator)),
            Err(err) => {
                warn!(%err, "root collator unavailable, comparing text by code point");
                Self(None)
            }
        }
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.0 {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending (default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl FromStr for SortDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(CoreError::InvalidSortDirection(other.to_string())),
        }
    }
}

/// How sort keys are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Compare every field by its textual form.
    #[default]
    Text,
    /// Compare numeric fields as integers, text fields as text.
    Natural,
}

/// Request-scoped query options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Field to sort by; `None` keeps insertion order.
    pub sort_field: Option<SortField>,
    /// Sort direction, ignored without a sort field.
    pub direction: SortDirection,
    /// Number of leading records to drop.
    pub skip: Option<usize>,
    /// Maximum number of records to return. `Some(0)` returns nothing.
    pub limit: Option<usize>,
    /// Key comparison mode.
    pub mode: SortMode,
}

impl QueryOptions {
    /// Creates options that return every record in insertion order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorts by the given field and direction.
    pub fn sort_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = Some(field);
        self.direction = direction;
        self
    }

    /// Skips the first `skip` records.
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Returns at most `limit` records.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the key comparison mode.
    pub fn with_mode(mut self, mode: SortMode) -> Self {
        self.mode = mode;
        self
    }
}

/// One page of a list query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPage {
    /// Number of records before skip/limit were applied.
    pub total: usize,
    /// Skip actually applied (0 if not requested).
    pub skip: usize,
    /// Limit actually applied (0 if not requested).
    pub limit: usize,
    /// The page contents.
    pub data: Vec<InterfaceRecord>,
}

/// Sorts, skips and limits a record snapshot.
pub fn query(mut records: Vec<InterfaceRecord>, options: &QueryOptions) -> QueryPage {
    let total = records.len();

    if let Some(field) = options.sort_field {
        let mode = options.mode;
        let order = TextOrder::root();
        match options.direction {
            SortDirection::Asc => records.sort_by(|a, b| field.compare(mode, &order, a, b)),
            SortDirection::Desc => records.sort_by(|a, b| field.compare(mode, &order, b, a)),
        }
    }

    let skip = options.skip.unwrap_or(0);
    if skip > 0 {
        let start = skip.min(records.len());
        records.drain(..start);
    }

    if let Some(limit) = options.limit {
        records.truncate(limit);
    }

    QueryPage {
        total,
        skip,
        limit: options.limit.unwrap_or(0),
        data: records,
    }
}
