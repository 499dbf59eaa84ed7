//! Update records and their references.

use serde::{Deserialize, Serialize};

use crate::model::collection::UpdateCollection;

/// One advisory/update entry.
///
/// All scalar fields are optional; a freshly constructed record is fully
/// empty and every field may stay that way. References and collections keep
/// insertion order, which is also their serialization order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecord {
    pub fromstr: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub update_type: Option<String>,
    pub version: Option<String>,
    pub id: Option<String>,
    pub title: Option<String>,
    pub issued_date: Option<String>,
    pub updated_date: Option<String>,
    pub rights: Option<String>,
    pub release: Option<String>,
    pub pushcount: Option<String>,
    pub severity: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub solution: Option<String>,

    pub references: Vec<UpdateReference>,
    pub collections: Vec<UpdateCollection>,
}

impl UpdateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reference, keeping insertion order.
    pub fn append_reference(&mut self, reference: UpdateReference) {
        self.references.push(reference);
    }

    /// Append a package collection, keeping insertion order.
    pub fn append_collection(&mut self, collection: UpdateCollection) {
        self.collections.push(collection);
    }
}

/// External link (bug tracker, CVE, vendor advisory) attached to a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateReference {
    pub href: Option<String>,
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub ref_type: Option<String>,
    pub title: Option<String>,
}

impl UpdateReference {
    pub fn new() -> Self {
        Self::default()
    }
}
