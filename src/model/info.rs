//! The updateinfo document container.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::record::UpdateRecord;
use crate::xml;

/// Ordered collection of update records; owns its records exclusively.
///
/// An empty container is valid and serializes to a self-closed `<updates/>`
/// root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateInfo {
    pub updates: Vec<UpdateRecord>,
}

impl UpdateInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the end of the sequence.
    ///
    /// O(1) amortized; no deduplication, no field validation. Records are
    /// serialized in exactly this order.
    pub fn append(&mut self, record: UpdateRecord) {
        self.updates.push(record);
    }

    /// Serialize the whole document to the updateinfo XML dialect.
    pub fn xml_dump(&self) -> Result<String> {
        xml::dump::dump_updateinfo(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let ui = UpdateInfo::new();
        assert!(ui.updates.is_empty());
    }

    #[test]
    fn test_append_grows_by_one() {
        let mut ui = UpdateInfo::new();

        let mut rec = UpdateRecord::new();
        rec.id = Some("RHSA-2021:0123".to_string());
        ui.append(rec);

        assert_eq!(ui.updates.len(), 1);
        assert_eq!(ui.updates[0].id.as_deref(), Some("RHSA-2021:0123"));
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut ui = UpdateInfo::new();

        // Deliberately unsorted ids: the container must never reorder.
        for id in ["z-last", "a-first", "m-middle"] {
            let mut rec = UpdateRecord::new();
            rec.id = Some(id.to_string());
            ui.append(rec);
        }

        let ids: Vec<_> = ui.updates.iter().map(|r| r.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("z-last"), Some("a-first"), Some("m-middle")]);
    }
}
