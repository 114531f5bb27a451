//! Interface record types.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of an interface record.
///
/// Ids are assigned by the store on creation and are:
/// - Immutable once assigned
/// - Unique within the store's lifetime (random, so best-effort)
/// - Never reused after deletion
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a new random record id (32 lowercase hex characters).
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wraps an existing id string, e.g. one taken from a request path.
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::from_string(id)
    }
}

/// Every field of an interface record except its id.
///
/// This is the shape accepted by create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceFields {
    /// Name of the owning switch.
    pub switch_name: String,
    /// Port identifier on the switch, e.g. `Gi1/0/24`.
    #[serde(alias = "interface")]
    pub interface_name: String,
    /// VLAN the port is assigned to.
    pub vlan_id: u32,
    /// Negotiated link speed.
    pub speed_mbps: u32,
    /// Link status. Usually `connected`, `down` or `error`, not enforced.
    pub status: String,
    /// Free-text description, may be empty.
    pub description: String,
}

impl InterfaceFields {
    /// Creates a field set.
    pub fn new(
        switch_name: impl Into<String>,
        interface_name: impl Into<String>,
        vlan_id: u32,
        speed_mbps: u32,
        status: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            switch_name: switch_name.into(),
            interface_name: interface_name.into(),
            vlan_id,
            speed_mbps,
            status: status.into(),
            description: description.into(),
        }
    }
}

/// A stored interface record: an id plus its fields.
///
/// Serializes as a flat JSON object:
/// `{"id", "switchName", "interfaceName", "vlanId", "speedMbps", "status", "description"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    /// Server-assigned id.
    pub id: RecordId,
    /// Record contents.
    #[serde(flatten)]
    pub fields: InterfaceFields,
}

impl InterfaceRecord {
    /// Creates a record with a freshly generated id.
    #[must_use]
    pub fn create(fields: InterfaceFields) -> Self {
        Self {
            id: RecordId::generate(),
            fields,
        }
    }

    /// Creates a record with a known id.
    #[must_use]
    pub fn with_id(id: RecordId, fields: InterfaceFields) -> Self {
        Self { id, fields }
    }
}
