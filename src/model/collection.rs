//! Package collections attached to update records.

use serde::{Deserialize, Serialize};

use crate::model::checksum::ChecksumType;

/// Named group of packages associated with one update record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateCollection {
    pub shortname: Option<String>,
    pub name: Option<String>,
    pub packages: Vec<UpdateCollectionPackage>,
}

impl UpdateCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a package, keeping insertion order.
    pub fn append(&mut self, package: UpdateCollectionPackage) {
        self.packages.push(package);
    }
}

/// One package entry inside a collection.
///
/// `sum` holds the checksum value as supplied; this engine never computes
/// digests itself. `reboot_suggested` defaults to false and is only visible
/// on the wire when set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateCollectionPackage {
    pub name: Option<String>,
    pub version: Option<String>,
    pub release: Option<String>,
    pub epoch: Option<String>,
    pub arch: Option<String>,
    pub src: Option<String>,
    pub filename: Option<String>,
    pub sum: Option<String>,
    pub sum_type: Option<ChecksumType>,
    pub reboot_suggested: bool,
}

impl UpdateCollectionPackage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_package_defaults() {
        let pkg = UpdateCollectionPackage::new();
        assert_eq!(pkg.name, None);
        assert_eq!(pkg.sum_type, None);
        assert!(!pkg.reboot_suggested);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut col = UpdateCollection::new();

        for name in ["kernel", "glibc", "bash"] {
            let mut pkg = UpdateCollectionPackage::new();
            pkg.name = Some(name.to_string());
            col.append(pkg);
        }

        let names: Vec<_> = col.packages.iter().map(|p| p.name.as_deref()).collect();
        assert_eq!(names, vec![Some("kernel"), Some("glibc"), Some("bash")]);
    }
}
