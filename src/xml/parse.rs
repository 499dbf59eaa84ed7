//! Parser for the updateinfo XML dialect.
//!
//! Rebuilds the in-memory model from a document. Unknown markup is skipped
//! and reported as warnings rather than failing the whole parse; hard
//! errors are reserved for documents that are structurally broken
//! (malformed XML, wrong root element, truncation).

use std::fmt;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{MetadataError, Result};
use crate::logging::structured::LogContext;
use crate::model::{
    ChecksumType, UpdateCollection, UpdateCollectionPackage, UpdateInfo, UpdateRecord,
    UpdateReference,
};

/// Non-fatal problem found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    UnknownElement { element: String },
    MissingAttribute { element: String, attribute: String },
    UnknownChecksumType { value: String },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::UnknownElement { element } => {
                write!(f, "unknown element <{}>", element)
            }
            ParseWarning::MissingAttribute { element, attribute } => {
                write!(f, "element <{}> is missing attribute \"{}\"", element, attribute)
            }
            ParseWarning::UnknownChecksumType { value } => {
                write!(f, "unknown checksum type \"{}\"", value)
            }
        }
    }
}

/// Outcome of a successful parse: the model plus everything the parser
/// tolerated along the way.
#[derive(Debug)]
pub struct ParseResult {
    pub info: UpdateInfo,
    pub warnings: Vec<ParseWarning>,
}

/// Parse an updateinfo document.
pub fn parse_updateinfo(xml: &str, ctx: &LogContext) -> Result<ParseResult> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let parser = DocParser {
        reader,
        warnings: Vec::new(),
        ctx,
    };
    parser.parse()
}

struct DocParser<'a, 'x> {
    reader: Reader<&'x [u8]>,
    warnings: Vec<ParseWarning>,
    ctx: &'a LogContext,
}

impl<'a, 'x> DocParser<'a, 'x> {
    fn parse(mut self) -> Result<ParseResult> {
        log::debug!("{} PARSE_START", self.ctx);

        let mut info = UpdateInfo::new();
        loop {
            match self.reader.read_event()? {
                Event::Empty(e) if e.name().as_ref() == b"updates" => break,
                Event::Start(e) if e.name().as_ref() == b"updates" => {
                    self.parse_updates(&mut info)?;
                    break;
                }
                Event::Start(e) | Event::Empty(e) => {
                    return Err(MetadataError::UnexpectedRoot(name_of(&e)));
                }
                Event::Eof => return Err(MetadataError::Truncated("updates".to_string())),
                _ => continue,
            }
        }

        log::info!(
            "{} PARSE_COMPLETE records={} warnings={}",
            self.ctx,
            info.updates.len(),
            self.warnings.len()
        );

        Ok(ParseResult {
            info,
            warnings: self.warnings,
        })
    }

    fn parse_updates(&mut self, info: &mut UpdateInfo) -> Result<()> {
        loop {
            match self.reader.read_event()? {
                Event::Start(e) if e.name().as_ref() == b"update" => {
                    let record = self.parse_update(&e)?;
                    if let Some(id) = &record.id {
                        log::debug!("{} RECORD_PARSED", self.ctx.with_record(id));
                    }
                    info.append(record);
                }
                Event::Empty(e) if e.name().as_ref() == b"update" => {
                    info.append(record_from_attrs(&e)?);
                }
                Event::Start(e) => self.skip_unknown(&e)?,
                Event::Empty(e) => self.warn_unknown(&e),
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(MetadataError::Truncated("updates".to_string())),
                _ => {}
            }
        }
    }

    fn parse_update(&mut self, start: &BytesStart<'_>) -> Result<UpdateRecord> {
        let mut record = record_from_attrs(start)?;

        loop {
            match self.reader.read_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"id" => record.id = Some(self.read_element_text("id")?),
                    b"title" => record.title = Some(self.read_element_text("title")?),
                    b"rights" => record.rights = Some(self.read_element_text("rights")?),
                    b"release" => record.release = Some(self.read_element_text("release")?),
                    b"pushcount" => {
                        record.pushcount = Some(self.read_element_text("pushcount")?)
                    }
                    b"severity" => record.severity = Some(self.read_element_text("severity")?),
                    b"summary" => record.summary = Some(self.read_element_text("summary")?),
                    b"description" => {
                        record.description = Some(self.read_element_text("description")?)
                    }
                    b"solution" => record.solution = Some(self.read_element_text("solution")?),
                    b"issued" => {
                        record.issued_date = self.date_attr(&e)?;
                        self.reader.read_to_end(e.name())?;
                    }
                    b"updated" => {
                        record.updated_date = self.date_attr(&e)?;
                        self.reader.read_to_end(e.name())?;
                    }
                    b"references" => self.parse_references(&mut record)?,
                    b"pkglist" => self.parse_pkglist(&mut record)?,
                    _ => self.skip_unknown(&e)?,
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"issued" => record.issued_date = self.date_attr(&e)?,
                    b"updated" => record.updated_date = self.date_attr(&e)?,
                    // Self-closed containers mean "present but empty".
                    b"references" | b"pkglist" => {}
                    _ => self.warn_unknown(&e),
                },
                Event::End(_) => return Ok(record),
                Event::Eof => return Err(MetadataError::Truncated("update".to_string())),
                _ => {}
            }
        }
    }

    fn parse_references(&mut self, record: &mut UpdateRecord) -> Result<()> {
        loop {
            match self.reader.read_event()? {
                Event::Empty(e) if e.name().as_ref() == b"reference" => {
                    record.append_reference(reference_from_attrs(&e)?);
                }
                Event::Start(e) if e.name().as_ref() == b"reference" => {
                    let reference = reference_from_attrs(&e)?;
                    self.reader.read_to_end(e.name())?;
                    record.append_reference(reference);
                }
                Event::Start(e) => self.skip_unknown(&e)?,
                Event::Empty(e) => self.warn_unknown(&e),
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(MetadataError::Truncated("references".to_string())),
                _ => {}
            }
        }
    }

    fn parse_pkglist(&mut self, record: &mut UpdateRecord) -> Result<()> {
        loop {
            match self.reader.read_event()? {
                Event::Start(e) if e.name().as_ref() == b"collection" => {
                    let collection = self.parse_collection(&e)?;
                    record.append_collection(collection);
                }
                Event::Empty(e) if e.name().as_ref() == b"collection" => {
                    record.append_collection(collection_from_attrs(&e)?);
                }
                Event::Start(e) => self.skip_unknown(&e)?,
                Event::Empty(e) => self.warn_unknown(&e),
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(MetadataError::Truncated("pkglist".to_string())),
                _ => {}
            }
        }
    }

    fn parse_collection(&mut self, start: &BytesStart<'_>) -> Result<UpdateCollection> {
        let mut collection = collection_from_attrs(start)?;

        loop {
            match self.reader.read_event()? {
                Event::Start(e) if e.name().as_ref() == b"name" => {
                    collection.name = Some(self.read_element_text("name")?);
                }
                Event::Empty(e) if e.name().as_ref() == b"name" => {
                    collection.name = Some(String::new());
                }
                Event::Start(e) if e.name().as_ref() == b"package" => {
                    let package = self.parse_package(&e)?;
                    collection.append(package);
                }
                Event::Empty(e) if e.name().as_ref() == b"package" => {
                    collection.append(package_from_attrs(&e)?);
                }
                Event::Start(e) => self.skip_unknown(&e)?,
                Event::Empty(e) => self.warn_unknown(&e),
                Event::End(_) => return Ok(collection),
                Event::Eof => return Err(MetadataError::Truncated("collection".to_string())),
                _ => {}
            }
        }
    }

    fn parse_package(&mut self, start: &BytesStart<'_>) -> Result<UpdateCollectionPackage> {
        let mut package = package_from_attrs(start)?;

        loop {
            match self.reader.read_event()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"filename" => package.filename = Some(self.read_element_text("filename")?),
                    b"sum" => {
                        if let Some(value) = get_attr(&e, b"type")? {
                            if !value.is_empty() {
                                match ChecksumType::from_name(&value) {
                                    Some(ty) => package.sum_type = Some(ty),
                                    None => {
                                        self.warn(ParseWarning::UnknownChecksumType { value })
                                    }
                                }
                            }
                        }
                        package.sum = Some(self.read_element_text("sum")?);
                    }
                    b"reboot_suggested" => {
                        package.reboot_suggested = true;
                        self.reader.read_to_end(e.name())?;
                    }
                    _ => self.skip_unknown(&e)?,
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"reboot_suggested" => package.reboot_suggested = true,
                    b"filename" => package.filename = Some(String::new()),
                    _ => self.warn_unknown(&e),
                },
                Event::End(_) => return Ok(package),
                Event::Eof => return Err(MetadataError::Truncated("package".to_string())),
                _ => {}
            }
        }
    }

    /// Collect the text body of a scalar element up to its end tag.
    fn read_element_text(&mut self, tag: &str) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.reader.read_event()? {
                Event::Text(t) => text.push_str(&t.unescape()?),
                Event::CData(c) => {
                    text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
                Event::Start(e) => self.skip_unknown(&e)?,
                Event::Empty(e) => self.warn_unknown(&e),
                Event::End(_) => return Ok(text),
                Event::Eof => return Err(MetadataError::Truncated(tag.to_string())),
                _ => {}
            }
        }
    }

    fn date_attr(&mut self, e: &BytesStart<'_>) -> Result<Option<String>> {
        let value = get_attr(e, b"date")?;
        if value.is_none() {
            self.warn(ParseWarning::MissingAttribute {
                element: name_of(e),
                attribute: "date".to_string(),
            });
        }
        Ok(value)
    }

    /// Warn about an unknown element and consume its whole subtree.
    fn skip_unknown(&mut self, e: &BytesStart<'_>) -> Result<()> {
        self.warn_unknown(e);
        self.reader.read_to_end(e.name())?;
        Ok(())
    }

    fn warn_unknown(&mut self, e: &BytesStart<'_>) {
        self.warn(ParseWarning::UnknownElement {
            element: name_of(e),
        });
    }

    fn warn(&mut self, warning: ParseWarning) {
        log::warn!("{} PARSE_WARNING {}", self.ctx, warning);
        self.warnings.push(warning);
    }
}

fn name_of(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn get_attr(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn record_from_attrs(e: &BytesStart<'_>) -> Result<UpdateRecord> {
    let mut record = UpdateRecord::new();
    record.fromstr = get_attr(e, b"from")?;
    record.status = get_attr(e, b"status")?;
    record.update_type = get_attr(e, b"type")?;
    record.version = get_attr(e, b"version")?;
    Ok(record)
}

fn reference_from_attrs(e: &BytesStart<'_>) -> Result<UpdateReference> {
    let mut reference = UpdateReference::new();
    reference.href = get_attr(e, b"href")?;
    reference.id = get_attr(e, b"id")?;
    reference.ref_type = get_attr(e, b"type")?;
    reference.title = get_attr(e, b"title")?;
    Ok(reference)
}

fn collection_from_attrs(e: &BytesStart<'_>) -> Result<UpdateCollection> {
    let mut collection = UpdateCollection::new();
    collection.shortname = get_attr(e, b"short")?;
    Ok(collection)
}

fn package_from_attrs(e: &BytesStart<'_>) -> Result<UpdateCollectionPackage> {
    let mut package = UpdateCollectionPackage::new();
    package.name = get_attr(e, b"name")?;
    package.version = get_attr(e, b"version")?;
    // The dialect's historical spelling.
    package.release = get_attr(e, b"relase")?;
    package.epoch = get_attr(e, b"epoch")?;
    package.arch = get_attr(e, b"arch")?;
    package.src = get_attr(e, b"src")?;
    Ok(package)
}
