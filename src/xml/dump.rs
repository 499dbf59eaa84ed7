//! Serializer for the updateinfo XML dialect.
//!
//! The output is a wire format consumed byte-for-byte by repository
//! tooling, so everything here is deterministic: fixed element order, fixed
//! attribute order, two-space indentation, self-closed empty containers.
//! Attributes and scalar child elements are always emitted; unset fields
//! render as empty strings.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;
use crate::model::{UpdateCollection, UpdateCollectionPackage, UpdateInfo, UpdateRecord};

/// Serialize a whole updateinfo document.
pub fn dump_updateinfo(info: &UpdateInfo) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    if info.updates.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("updates")))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new("updates")))?;
        for record in &info.updates {
            write_update(&mut writer, record)?;
        }
        writer.write_event(Event::End(BytesEnd::new("updates")))?;
    }

    finish(writer)
}

/// Serialize a single record as a standalone `<update>` fragment.
///
/// No prologue, zero base indentation, trailing newline. Useful when a
/// record is spliced into an existing document by surrounding tooling.
pub fn dump_record(record: &UpdateRecord) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write_update(&mut writer, record)?;
    finish(writer)
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    let mut buf = writer.into_inner();
    buf.push(b'\n');
    Ok(String::from_utf8(buf)?)
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn write_update(writer: &mut Writer<Vec<u8>>, record: &UpdateRecord) -> Result<()> {
    let mut update = BytesStart::new("update");
    update.push_attribute(("from", opt(&record.fromstr)));
    update.push_attribute(("status", opt(&record.status)));
    update.push_attribute(("type", opt(&record.update_type)));
    update.push_attribute(("version", opt(&record.version)));
    writer.write_event(Event::Start(update))?;

    write_text_element(writer, "id", &record.id)?;
    write_text_element(writer, "title", &record.title)?;
    write_date_element(writer, "issued", &record.issued_date)?;
    write_date_element(writer, "updated", &record.updated_date)?;
    write_text_element(writer, "rights", &record.rights)?;
    write_text_element(writer, "release", &record.release)?;
    write_text_element(writer, "pushcount", &record.pushcount)?;
    write_text_element(writer, "severity", &record.severity)?;
    write_text_element(writer, "summary", &record.summary)?;
    write_text_element(writer, "description", &record.description)?;
    write_text_element(writer, "solution", &record.solution)?;

    if record.references.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("references")))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new("references")))?;
        for reference in &record.references {
            let mut elem = BytesStart::new("reference");
            elem.push_attribute(("href", opt(&reference.href)));
            elem.push_attribute(("id", opt(&reference.id)));
            elem.push_attribute(("type", opt(&reference.ref_type)));
            elem.push_attribute(("title", opt(&reference.title)));
            writer.write_event(Event::Empty(elem))?;
        }
        writer.write_event(Event::End(BytesEnd::new("references")))?;
    }

    if record.collections.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("pkglist")))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new("pkglist")))?;
        for collection in &record.collections {
            write_collection(writer, collection)?;
        }
        writer.write_event(Event::End(BytesEnd::new("pkglist")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("update")))?;
    Ok(())
}

fn write_collection(writer: &mut Writer<Vec<u8>>, collection: &UpdateCollection) -> Result<()> {
    let mut elem = BytesStart::new("collection");
    elem.push_attribute(("short", opt(&collection.shortname)));
    writer.write_event(Event::Start(elem))?;

    write_text_element(writer, "name", &collection.name)?;
    for package in &collection.packages {
        write_package(writer, package)?;
    }

    writer.write_event(Event::End(BytesEnd::new("collection")))?;
    Ok(())
}

fn write_package(writer: &mut Writer<Vec<u8>>, package: &UpdateCollectionPackage) -> Result<()> {
    let mut elem = BytesStart::new("package");
    elem.push_attribute(("name", opt(&package.name)));
    elem.push_attribute(("version", opt(&package.version)));
    // Historical wire spelling; consumers of the dialect key on "relase".
    elem.push_attribute(("relase", opt(&package.release)));
    elem.push_attribute(("epoch", opt(&package.epoch)));
    elem.push_attribute(("arch", opt(&package.arch)));
    elem.push_attribute(("src", opt(&package.src)));
    writer.write_event(Event::Start(elem))?;

    write_text_element(writer, "filename", &package.filename)?;

    let mut sum = BytesStart::new("sum");
    sum.push_attribute((
        "type",
        package.sum_type.map(|t| t.as_name()).unwrap_or(""),
    ));
    writer.write_event(Event::Start(sum))?;
    writer.write_event(Event::Text(BytesText::new(opt(&package.sum))))?;
    writer.write_event(Event::End(BytesEnd::new("sum")))?;

    // Only visible on the wire when set; false is never emitted.
    if package.reboot_suggested {
        writer.write_event(Event::Empty(BytesStart::new("reboot_suggested")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("package")))?;
    Ok(())
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    value: &Option<String>,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(opt(value))))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn write_date_element(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    value: &Option<String>,
) -> Result<()> {
    let mut elem = BytesStart::new(tag);
    elem.push_attribute(("date", opt(value)));
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChecksumType, UpdateReference};

    fn full_record() -> UpdateRecord {
        let mut rec = UpdateRecord::new();
        rec.fromstr = Some("from".to_string());
        rec.status = Some("status".to_string());
        rec.update_type = Some("type".to_string());
        rec.version = Some("version".to_string());
        rec.id = Some("id".to_string());
        rec.title = Some("title".to_string());
        rec.issued_date = Some("issued_date".to_string());
        rec.updated_date = Some("updated_date".to_string());
        rec.rights = Some("rights".to_string());
        rec.release = Some("release".to_string());
        rec.pushcount = Some("pushcount".to_string());
        rec.severity = Some("severity".to_string());
        rec.summary = Some("summary".to_string());
        rec.description = Some("description".to_string());
        rec.solution = Some("solution".to_string());
        rec
    }

    #[test]
    fn test_dump_empty_document() {
        let ui = UpdateInfo::new();
        let xml = ui.xml_dump().unwrap();
        assert_eq!(xml, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<updates/>\n");
    }

    #[test]
    fn test_dump_single_record_no_children() {
        let mut ui = UpdateInfo::new();
        ui.append(full_record());
        let xml = ui.xml_dump().unwrap();

        assert_eq!(
            xml,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<updates>
  <update from="from" status="status" type="type" version="version">
    <id>id</id>
    <title>title</title>
    <issued date="issued_date"/>
    <updated date="updated_date"/>
    <rights>rights</rights>
    <release>release</release>
    <pushcount>pushcount</pushcount>
    <severity>severity</severity>
    <summary>summary</summary>
    <description>description</description>
    <solution>solution</solution>
    <references/>
    <pkglist/>
  </update>
</updates>
"#
        );
    }

    #[test]
    fn test_dump_record_with_reference_and_collection() {
        let mut pkg = UpdateCollectionPackage::new();
        pkg.name = Some("foo".to_string());
        pkg.version = Some("1.2".to_string());
        pkg.release = Some("3".to_string());
        pkg.epoch = Some("0".to_string());
        pkg.arch = Some("x86".to_string());
        pkg.src = Some("foo.src.rpm".to_string());
        pkg.filename = Some("foo.rpm".to_string());
        pkg.sum = Some("abcdef".to_string());
        pkg.sum_type = Some(ChecksumType::Sha1);
        pkg.reboot_suggested = true;

        let mut col = UpdateCollection::new();
        col.shortname = Some("short name".to_string());
        col.name = Some("long name".to_string());
        col.append(pkg);

        let mut reference = UpdateReference::new();
        reference.href = Some("href".to_string());
        reference.id = Some("id".to_string());
        reference.ref_type = Some("type".to_string());
        reference.title = Some("title".to_string());

        let mut rec = full_record();
        rec.append_collection(col);
        rec.append_reference(reference);

        let mut ui = UpdateInfo::new();
        ui.append(rec);
        let xml = ui.xml_dump().unwrap();

        assert_eq!(
            xml,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<updates>
  <update from="from" status="status" type="type" version="version">
    <id>id</id>
    <title>title</title>
    <issued date="issued_date"/>
    <updated date="updated_date"/>
    <rights>rights</rights>
    <release>release</release>
    <pushcount>pushcount</pushcount>
    <severity>severity</severity>
    <summary>summary</summary>
    <description>description</description>
    <solution>solution</solution>
    <references>
      <reference href="href" id="id" type="type" title="title"/>
    </references>
    <pkglist>
      <collection short="short name">
        <name>long name</name>
        <package name="foo" version="1.2" relase="3" epoch="0" arch="x86" src="foo.src.rpm">
          <filename>foo.rpm</filename>
          <sum type="sha1">abcdef</sum>
          <reboot_suggested/>
        </package>
      </collection>
    </pkglist>
  </update>
</updates>
"#
        );
    }

    #[test]
    fn test_dump_reboot_false_omitted() {
        let mut pkg = UpdateCollectionPackage::new();
        pkg.name = Some("foo".to_string());
        pkg.reboot_suggested = false;

        let mut col = UpdateCollection::new();
        col.append(pkg);

        let mut rec = UpdateRecord::new();
        rec.append_collection(col);

        let mut ui = UpdateInfo::new();
        ui.append(rec);
        let xml = ui.xml_dump().unwrap();

        assert!(!xml.contains("reboot_suggested"));
    }

    #[test]
    fn test_dump_preserves_record_order() {
        let mut ui = UpdateInfo::new();
        for id in ["zzz", "aaa", "mmm"] {
            let mut rec = UpdateRecord::new();
            rec.id = Some(id.to_string());
            ui.append(rec);
        }

        let xml = ui.xml_dump().unwrap();
        let zzz = xml.find("<id>zzz</id>").unwrap();
        let aaa = xml.find("<id>aaa</id>").unwrap();
        let mmm = xml.find("<id>mmm</id>").unwrap();
        assert!(zzz < aaa && aaa < mmm);
    }

    #[test]
    fn test_dump_escapes_text_and_attributes() {
        let mut rec = UpdateRecord::new();
        rec.fromstr = Some(r#"errata <&> "dept""#.to_string());
        rec.title = Some("Fix for <important> & friends".to_string());

        let mut ui = UpdateInfo::new();
        ui.append(rec);
        let xml = ui.xml_dump().unwrap();

        assert!(xml.contains(r#"from="errata &lt;&amp;&gt; &quot;dept&quot;""#));
        assert!(xml.contains("<title>Fix for &lt;important&gt; &amp; friends</title>"));
    }

    #[test]
    fn test_dump_unset_fields_render_empty() {
        let mut ui = UpdateInfo::new();
        ui.append(UpdateRecord::new());
        let xml = ui.xml_dump().unwrap();

        assert!(xml.contains(r#"<update from="" status="" type="" version="">"#));
        assert!(xml.contains("<id></id>"));
        assert!(xml.contains(r#"<issued date=""/>"#));
        assert!(xml.contains("<references/>"));
        assert!(xml.contains("<pkglist/>"));
    }

    #[test]
    fn test_dump_record_fragment() {
        let rec = full_record();
        let xml = dump_record(&rec).unwrap();

        assert_eq!(
            xml,
            r#"<update from="from" status="status" type="type" version="version">
  <id>id</id>
  <title>title</title>
  <issued date="issued_date"/>
  <updated date="updated_date"/>
  <rights>rights</rights>
  <release>release</release>
  <pushcount>pushcount</pushcount>
  <severity>severity</severity>
  <summary>summary</summary>
  <description>description</description>
  <solution>solution</solution>
  <references/>
  <pkglist/>
</update>
"#
        );
    }

    #[test]
    fn test_dump_sum_type_table_reaches_wire() {
        for (ty, name) in [
            (ChecksumType::Md5, "md5"),
            (ChecksumType::Sha256, "sha256"),
            (ChecksumType::Sha512, "sha512"),
        ] {
            let mut pkg = UpdateCollectionPackage::new();
            pkg.sum = Some("aabbcc".to_string());
            pkg.sum_type = Some(ty);

            let mut col = UpdateCollection::new();
            col.append(pkg);

            let mut rec = UpdateRecord::new();
            rec.append_collection(col);

            let xml = dump_record(&rec).unwrap();
            assert!(xml.contains(&format!(r#"<sum type="{}">aabbcc</sum>"#, name)));
        }
    }
}
