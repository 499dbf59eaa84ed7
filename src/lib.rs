//! Errata Core - Native updateinfo metadata engine
//!
//! This crate provides the updateinfo (advisory/errata) metadata model and
//! its XML wire format for repository tooling, exposed to Python via PyO3.
//! The implementation prioritizes:
//!
//! 1. **Wire fidelity** - Byte-exact serialization of the updateinfo dialect
//! 2. **Logging** - Every entry point logged with document context
//! 3. **Tolerance** - Parsing surfaces warnings instead of dying on unknown
//!    markup
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `model` - Update records, references, package collections, checksums
//! - `xml` - Deterministic serializer and warning-tolerant parser
//! - `error` - Typed error surface for the XML layer
//! - `logging` - Structured logging with document context
//!
//! The binding layer below wraps the core model types one-to-one; getters
//! clone values out, append operations copy the argument into the owning
//! sequence. Python-side mutation of a previously appended object never
//! changes what the container already holds.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use uuid::Uuid;

pub mod error;
pub mod logging;
pub mod model;
pub mod xml;

use error::MetadataError;
use logging::structured::LogContext;
use model::{
    ChecksumType, UpdateCollection, UpdateCollectionPackage, UpdateInfo, UpdateRecord,
    UpdateReference,
};

/// Initialize the module-level logger
fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_millis()
        .try_init();
}

/// Fresh log context for one document-level operation.
fn doc_context() -> LogContext {
    LogContext::new(&format!("doc-{}", &Uuid::new_v4().to_string()[..8]))
}

fn to_py_err(err: MetadataError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Checksum algorithm tag, exposed to Python both as a class and as the
/// module-level constants `MD5`..`SHA512`.
#[pyclass(name = "ChecksumType")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PyChecksumType {
    Md5,
    Sha,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl From<PyChecksumType> for ChecksumType {
    fn from(value: PyChecksumType) -> Self {
        match value {
            PyChecksumType::Md5 => ChecksumType::Md5,
            PyChecksumType::Sha => ChecksumType::Sha,
            PyChecksumType::Sha1 => ChecksumType::Sha1,
            PyChecksumType::Sha224 => ChecksumType::Sha224,
            PyChecksumType::Sha256 => ChecksumType::Sha256,
            PyChecksumType::Sha384 => ChecksumType::Sha384,
            PyChecksumType::Sha512 => ChecksumType::Sha512,
        }
    }
}

impl From<ChecksumType> for PyChecksumType {
    fn from(value: ChecksumType) -> Self {
        match value {
            ChecksumType::Md5 => PyChecksumType::Md5,
            ChecksumType::Sha => PyChecksumType::Sha,
            ChecksumType::Sha1 => PyChecksumType::Sha1,
            ChecksumType::Sha224 => PyChecksumType::Sha224,
            ChecksumType::Sha256 => PyChecksumType::Sha256,
            ChecksumType::Sha384 => PyChecksumType::Sha384,
            ChecksumType::Sha512 => PyChecksumType::Sha512,
        }
    }
}

/// External link attached to an update record.
#[pyclass(name = "UpdateReference")]
#[derive(Debug, Clone, Default)]
pub struct PyUpdateReference {
    inner: UpdateReference,
}

#[pymethods]
impl PyUpdateReference {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    #[getter]
    fn get_href(&self) -> Option<String> {
        self.inner.href.clone()
    }

    #[setter]
    fn set_href(&mut self, value: Option<String>) {
        self.inner.href = value;
    }

    #[getter]
    fn get_id(&self) -> Option<String> {
        self.inner.id.clone()
    }

    #[setter]
    fn set_id(&mut self, value: Option<String>) {
        self.inner.id = value;
    }

    #[getter]
    fn get_type(&self) -> Option<String> {
        self.inner.ref_type.clone()
    }

    #[setter]
    fn set_type(&mut self, value: Option<String>) {
        self.inner.ref_type = value;
    }

    #[getter]
    fn get_title(&self) -> Option<String> {
        self.inner.title.clone()
    }

    #[setter]
    fn set_title(&mut self, value: Option<String>) {
        self.inner.title = value;
    }
}

/// One package entry inside a collection.
#[pyclass(name = "UpdateCollectionPackage")]
#[derive(Debug, Clone, Default)]
pub struct PyUpdateCollectionPackage {
    inner: UpdateCollectionPackage,
}

#[pymethods]
impl PyUpdateCollectionPackage {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    #[getter]
    fn get_name(&self) -> Option<String> {
        self.inner.name.clone()
    }

    #[setter]
    fn set_name(&mut self, value: Option<String>) {
        self.inner.name = value;
    }

    #[getter]
    fn get_version(&self) -> Option<String> {
        self.inner.version.clone()
    }

    #[setter]
    fn set_version(&mut self, value: Option<String>) {
        self.inner.version = value;
    }

    #[getter]
    fn get_release(&self) -> Option<String> {
        self.inner.release.clone()
    }

    #[setter]
    fn set_release(&mut self, value: Option<String>) {
        self.inner.release = value;
    }

    #[getter]
    fn get_epoch(&self) -> Option<String> {
        self.inner.epoch.clone()
    }

    #[setter]
    fn set_epoch(&mut self, value: Option<String>) {
        self.inner.epoch = value;
    }

    #[getter]
    fn get_arch(&self) -> Option<String> {
        self.inner.arch.clone()
    }

    #[setter]
    fn set_arch(&mut self, value: Option<String>) {
        self.inner.arch = value;
    }

    #[getter]
    fn get_src(&self) -> Option<String> {
        self.inner.src.clone()
    }

    #[setter]
    fn set_src(&mut self, value: Option<String>) {
        self.inner.src = value;
    }

    #[getter]
    fn get_filename(&self) -> Option<String> {
        self.inner.filename.clone()
    }

    #[setter]
    fn set_filename(&mut self, value: Option<String>) {
        self.inner.filename = value;
    }

    #[getter]
    fn get_sum(&self) -> Option<String> {
        self.inner.sum.clone()
    }

    #[setter]
    fn set_sum(&mut self, value: Option<String>) {
        self.inner.sum = value;
    }

    #[getter]
    fn get_sum_type(&self) -> Option<PyChecksumType> {
        self.inner.sum_type.map(PyChecksumType::from)
    }

    #[setter]
    fn set_sum_type(&mut self, value: Option<PyChecksumType>) {
        self.inner.sum_type = value.map(ChecksumType::from);
    }

    #[getter]
    fn get_reboot_suggested(&self) -> bool {
        self.inner.reboot_suggested
    }

    #[setter]
    fn set_reboot_suggested(&mut self, value: bool) {
        self.inner.reboot_suggested = value;
    }
}

/// Named group of packages associated with one update record.
#[pyclass(name = "UpdateCollection")]
#[derive(Debug, Clone, Default)]
pub struct PyUpdateCollection {
    inner: UpdateCollection,
}

#[pymethods]
impl PyUpdateCollection {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    #[getter]
    fn get_shortname(&self) -> Option<String> {
        self.inner.shortname.clone()
    }

    #[setter]
    fn set_shortname(&mut self, value: Option<String>) {
        self.inner.shortname = value;
    }

    #[getter]
    fn get_name(&self) -> Option<String> {
        self.inner.name.clone()
    }

    #[setter]
    fn set_name(&mut self, value: Option<String>) {
        self.inner.name = value;
    }

    #[getter]
    fn get_packages(&self) -> Vec<PyUpdateCollectionPackage> {
        self.inner
            .packages
            .iter()
            .map(|p| PyUpdateCollectionPackage { inner: p.clone() })
            .collect()
    }

    /// Append a package, keeping insertion order.
    fn append(&mut self, package: PyUpdateCollectionPackage) {
        self.inner.append(package.inner);
    }
}

/// One advisory/update entry.
#[pyclass(name = "UpdateRecord")]
#[derive(Debug, Clone, Default)]
pub struct PyUpdateRecord {
    inner: UpdateRecord,
}

#[pymethods]
impl PyUpdateRecord {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    #[getter]
    fn get_fromstr(&self) -> Option<String> {
        self.inner.fromstr.clone()
    }

    #[setter]
    fn set_fromstr(&mut self, value: Option<String>) {
        self.inner.fromstr = value;
    }

    #[getter]
    fn get_status(&self) -> Option<String> {
        self.inner.status.clone()
    }

    #[setter]
    fn set_status(&mut self, value: Option<String>) {
        self.inner.status = value;
    }

    #[getter]
    fn get_type(&self) -> Option<String> {
        self.inner.update_type.clone()
    }

    #[setter]
    fn set_type(&mut self, value: Option<String>) {
        self.inner.update_type = value;
    }

    #[getter]
    fn get_version(&self) -> Option<String> {
        self.inner.version.clone()
    }

    #[setter]
    fn set_version(&mut self, value: Option<String>) {
        self.inner.version = value;
    }

    #[getter]
    fn get_id(&self) -> Option<String> {
        self.inner.id.clone()
    }

    #[setter]
    fn set_id(&mut self, value: Option<String>) {
        self.inner.id = value;
    }

    #[getter]
    fn get_title(&self) -> Option<String> {
        self.inner.title.clone()
    }

    #[setter]
    fn set_title(&mut self, value: Option<String>) {
        self.inner.title = value;
    }

    #[getter]
    fn get_issued_date(&self) -> Option<String> {
        self.inner.issued_date.clone()
    }

    #[setter]
    fn set_issued_date(&mut self, value: Option<String>) {
        self.inner.issued_date = value;
    }

    #[getter]
    fn get_updated_date(&self) -> Option<String> {
        self.inner.updated_date.clone()
    }

    #[setter]
    fn set_updated_date(&mut self, value: Option<String>) {
        self.inner.updated_date = value;
    }

    #[getter]
    fn get_rights(&self) -> Option<String> {
        self.inner.rights.clone()
    }

    #[setter]
    fn set_rights(&mut self, value: Option<String>) {
        self.inner.rights = value;
    }

    #[getter]
    fn get_release(&self) -> Option<String> {
        self.inner.release.clone()
    }

    #[setter]
    fn set_release(&mut self, value: Option<String>) {
        self.inner.release = value;
    }

    #[getter]
    fn get_pushcount(&self) -> Option<String> {
        self.inner.pushcount.clone()
    }

    #[setter]
    fn set_pushcount(&mut self, value: Option<String>) {
        self.inner.pushcount = value;
    }

    #[getter]
    fn get_severity(&self) -> Option<String> {
        self.inner.severity.clone()
    }

    #[setter]
    fn set_severity(&mut self, value: Option<String>) {
        self.inner.severity = value;
    }

    #[getter]
    fn get_summary(&self) -> Option<String> {
        self.inner.summary.clone()
    }

    #[setter]
    fn set_summary(&mut self, value: Option<String>) {
        self.inner.summary = value;
    }

    #[getter]
    fn get_description(&self) -> Option<String> {
        self.inner.description.clone()
    }

    #[setter]
    fn set_description(&mut self, value: Option<String>) {
        self.inner.description = value;
    }

    #[getter]
    fn get_solution(&self) -> Option<String> {
        self.inner.solution.clone()
    }

    #[setter]
    fn set_solution(&mut self, value: Option<String>) {
        self.inner.solution = value;
    }

    #[getter]
    fn get_references(&self) -> Vec<PyUpdateReference> {
        self.inner
            .references
            .iter()
            .map(|r| PyUpdateReference { inner: r.clone() })
            .collect()
    }

    #[getter]
    fn get_collections(&self) -> Vec<PyUpdateCollection> {
        self.inner
            .collections
            .iter()
            .map(|c| PyUpdateCollection { inner: c.clone() })
            .collect()
    }

    /// Append a reference, keeping insertion order.
    fn append_reference(&mut self, reference: PyUpdateReference) {
        self.inner.append_reference(reference.inner);
    }

    /// Append a package collection, keeping insertion order.
    fn append_collection(&mut self, collection: PyUpdateCollection) {
        self.inner.append_collection(collection.inner);
    }

    /// Serialize this record alone as an `<update>` fragment.
    fn xml_dump(&self) -> PyResult<String> {
        init_logger();

        let ctx = doc_context();
        let fragment = xml::dump::dump_record(&self.inner).map_err(to_py_err)?;

        log::debug!("{} DUMP_RECORD bytes={}", ctx, fragment.len());

        Ok(fragment)
    }
}

/// Ordered collection of update records; owns its records exclusively.
#[pyclass(name = "UpdateInfo")]
#[derive(Debug, Clone, Default)]
pub struct PyUpdateInfo {
    inner: UpdateInfo,
}

#[pymethods]
impl PyUpdateInfo {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    #[getter]
    fn get_updates(&self) -> Vec<PyUpdateRecord> {
        self.inner
            .updates
            .iter()
            .map(|r| PyUpdateRecord { inner: r.clone() })
            .collect()
    }

    /// Append a record to the end of the sequence.
    fn append(&mut self, record: PyUpdateRecord) {
        self.inner.append(record.inner);
    }

    /// Serialize the whole document to the updateinfo XML dialect.
    fn xml_dump(&self) -> PyResult<String> {
        init_logger();

        let ctx = doc_context();
        let xml = self.inner.xml_dump().map_err(to_py_err)?;

        log::info!(
            "{} DUMP_COMPLETE records={} bytes={}",
            ctx,
            self.inner.updates.len(),
            xml.len()
        );

        Ok(xml)
    }
}

/// Parse an updateinfo document into an `UpdateInfo`.
///
/// Unknown markup is tolerated and logged; malformed XML raises ValueError.
#[pyfunction]
fn parse_updateinfo(xml: &str) -> PyResult<PyUpdateInfo> {
    init_logger();

    let ctx = doc_context();
    let result = xml::parse::parse_updateinfo(xml, &ctx).map_err(to_py_err)?;

    Ok(PyUpdateInfo { inner: result.info })
}

/// Python module definition
#[pymodule]
fn errata_core(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyChecksumType>()?;
    m.add_class::<PyUpdateInfo>()?;
    m.add_class::<PyUpdateRecord>()?;
    m.add_class::<PyUpdateReference>()?;
    m.add_class::<PyUpdateCollection>()?;
    m.add_class::<PyUpdateCollectionPackage>()?;
    m.add_function(wrap_pyfunction!(parse_updateinfo, m)?)?;

    m.add("MD5", PyChecksumType::Md5)?;
    m.add("SHA", PyChecksumType::Sha)?;
    m.add("SHA1", PyChecksumType::Sha1)?;
    m.add("SHA224", PyChecksumType::Sha224)?;
    m.add("SHA256", PyChecksumType::Sha256)?;
    m.add("SHA384", PyChecksumType::Sha384)?;
    m.add("SHA512", PyChecksumType::Sha512)?;

    Ok(())
}
