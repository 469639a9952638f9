//! CxF document parsing
//!
//! Single-pass streaming extraction of color records from CxF3 XML. The
//! parser walks the event stream once, tracking the enclosing `Object` name,
//! and collects `ReflectanceSpectrum` and `ColorCIELab` records whose
//! `ColorSpecification` codes the [`crate::specification`] module accepts.
//! Records under an unrecognized code are counted and skipped rather than
//! failing the document; later records under a repeated sample name replace
//! earlier ones.
//!
//! Element and root names are matched on their local part, so `cc:`-prefixed
//! and unprefixed documents parse identically. DTD declarations are rejected
//! before and during the event walk.

use crate::error::{Error, Result};
use crate::model::{Document, LabColor, ReflectanceRecord};
use crate::specification::{accepts_lab, classify};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

const XML_BUFFER_CAPACITY: usize = 4096;

/// Longest prefix scanned for a DTD declaration before parsing begins
const DOCTYPE_SCAN_CHARS: usize = 2000;

/// Component of a `ColorCIELab` record currently receiving character data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabField {
    L,
    A,
    B,
}

/// `ReflectanceSpectrum` element awaiting its text content
struct PendingSpectrum {
    name: String,
    specification: String,
    samples: Vec<String>,
}

/// `ColorCIELab` element accumulating its component children
struct PendingLab {
    name: String,
    accepted: bool,
    l: Option<f64>,
    a: Option<f64>,
    b: Option<f64>,
}

/// Parse CxF XML text into a [`Document`]
///
/// The document-global acquisition mode is pinned by the first reflectance
/// record whose specification code classifies; records arriving afterwards
/// never change it. Sample names repeat freely and the last record wins.
/// Objects without a `Name` attribute are skipped along with everything
/// beneath them.
pub fn parse_document(xml: &str) -> Result<Document> {
    let head: String = xml.chars().take(DOCTYPE_SCAN_CHARS).collect();
    if head.to_lowercase().contains("<!doctype") {
        return Err(Error::InvalidDocument(
            "DTD processing is not allowed in CxF documents".to_string(),
        ));
    }

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut document = Document::new();
    let mut buf = Vec::with_capacity(XML_BUFFER_CAPACITY);

    let mut saw_root = false;
    let mut collection_depth = 0usize;
    let mut current_name: Option<String> = None;
    let mut pending_spectrum: Option<PendingSpectrum> = None;
    let mut pending_lab: Option<PendingLab> = None;
    let mut lab_field: Option<LabField> = None;

    loop {
        let event = reader.read_event_into(&mut buf);
        let is_empty_element = matches!(&event, Ok(Event::Empty(_)));

        match event {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let raw = std::str::from_utf8(e.name().into_inner()).map_err(|err| {
                    Error::InvalidDocument(format!("invalid UTF-8 in element name: {}", err))
                })?;
                let local = get_local_name(raw);

                if !saw_root {
                    saw_root = true;
                    if local != "CxF" {
                        return Err(Error::InvalidDocument(format!(
                            "expected root element 'CxF', got '{}'",
                            local
                        )));
                    }
                    let attrs = parse_attributes(e)?;
                    // The root's own prefix selects its declaration; other
                    // xmlns:* entries (xsi and friends) are unrelated
                    document.namespace = match raw.rfind(':') {
                        Some(pos) => attrs.get(&format!("xmlns:{}", &raw[..pos])).cloned(),
                        None => None,
                    }
                    .or_else(|| attrs.get("xmlns").cloned());
                    buf.clear();
                    continue;
                }

                match local {
                    "ObjectCollection" => {
                        if !is_empty_element {
                            collection_depth += 1;
                        }
                    }
                    "Object" if collection_depth > 0 => {
                        if !is_empty_element {
                            let attrs = parse_attributes(e)?;
                            current_name = attrs.get("Name").cloned();
                        }
                    }
                    "ReflectanceSpectrum" => {
                        if let Some(name) = current_name.clone() {
                            let attrs = parse_attributes(e)?;
                            match attrs
                                .get("ColorSpecification")
                                .map(|code| (code, classify(code)))
                            {
                                Some((code, Some(mode))) => {
                                    if document.mode.is_none() {
                                        document.mode = Some(mode);
                                    }
                                    let record = PendingSpectrum {
                                        name,
                                        specification: code.clone(),
                                        samples: Vec::new(),
                                    };
                                    if is_empty_element {
                                        commit_spectrum(&mut document, record);
                                    } else {
                                        pending_spectrum = Some(record);
                                    }
                                }
                                _ => document.stats.unrecognized_specifications += 1,
                            }
                        }
                    }
                    "ColorCIELab" => {
                        if let Some(name) = current_name.clone() {
                            let attrs = parse_attributes(e)?;
                            let accepted = attrs
                                .get("ColorSpecification")
                                .is_some_and(|code| accepts_lab(code));
                            let record = PendingLab {
                                name,
                                accepted,
                                l: None,
                                a: None,
                                b: None,
                            };
                            if is_empty_element {
                                commit_lab(&mut document, record);
                            } else {
                                pending_lab = Some(record);
                            }
                        }
                    }
                    "L" if pending_lab.is_some() && !is_empty_element => {
                        lab_field = Some(LabField::L);
                    }
                    "A" if pending_lab.is_some() && !is_empty_element => {
                        lab_field = Some(LabField::A);
                    }
                    "B" if pending_lab.is_some() && !is_empty_element => {
                        lab_field = Some(LabField::B);
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref t)) => {
                let text = t
                    .xml_content()
                    .map_err(|err| Error::InvalidDocument(err.to_string()))?;
                if let Some(pending) = pending_spectrum.as_mut() {
                    pending
                        .samples
                        .extend(text.split_whitespace().map(str::to_string));
                } else if let Some(pending) = pending_lab.as_mut() {
                    if let Some(field) = lab_field {
                        // Unparsable components leave the field unset and the
                        // record is dropped as malformed when it closes
                        let value = text.trim().parse::<f64>().ok();
                        match field {
                            LabField::L => pending.l = value,
                            LabField::A => pending.a = value,
                            LabField::B => pending.b = value,
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let raw = std::str::from_utf8(e.name().into_inner()).map_err(|err| {
                    Error::InvalidDocument(format!("invalid UTF-8 in element name: {}", err))
                })?;
                match get_local_name(raw) {
                    "ObjectCollection" => {
                        collection_depth = collection_depth.saturating_sub(1);
                    }
                    "Object" => current_name = None,
                    "ReflectanceSpectrum" => {
                        if let Some(pending) = pending_spectrum.take() {
                            commit_spectrum(&mut document, pending);
                        }
                    }
                    "ColorCIELab" => {
                        if let Some(pending) = pending_lab.take() {
                            commit_lab(&mut document, pending);
                        }
                    }
                    "L" | "A" | "B" => lab_field = None,
                    _ => {}
                }
            }
            Ok(Event::DocType(_)) => {
                return Err(Error::InvalidDocument(
                    "DTD processing is not allowed in CxF documents".to_string(),
                ));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(Error::InvalidDocument(
            "missing root element 'CxF'".to_string(),
        ));
    }

    Ok(document)
}

fn commit_spectrum(document: &mut Document, pending: PendingSpectrum) {
    document.stats.reflectance_records += 1;
    document.reflectance.insert(
        pending.name.clone(),
        ReflectanceRecord {
            name: pending.name,
            specification: pending.specification,
            samples: pending.samples,
        },
    );
}

fn commit_lab(document: &mut Document, pending: PendingLab) {
    if !pending.accepted {
        document.stats.unrecognized_specifications += 1;
        return;
    }
    match (pending.l, pending.a, pending.b) {
        (Some(l), Some(a), Some(b)) => {
            document.stats.lab_records += 1;
            document.lab.insert(pending.name, LabColor::new(l, a, b));
        }
        _ => document.stats.malformed_lab_records += 1,
    }
}

/// Strip the namespace prefix from a qualified name
fn get_local_name(name: &str) -> &str {
    match name.rfind(':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Collect an element's attributes into a map, keys kept as written
fn parse_attributes(e: &BytesStart) -> Result<HashMap<String, String>> {
    let mut attributes = HashMap::with_capacity(8);
    for attr_result in e.attributes() {
        let attr = attr_result?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| Error::XmlAttr(format!("invalid UTF-8 in attribute name: {}", err)))?
            .to_string();
        let value = std::str::from_utf8(&attr.value)
            .map_err(|err| Error::XmlAttr(format!("invalid UTF-8 in attribute value: {}", err)))?
            .to_string();
        attributes.insert(key, value);
    }
    Ok(attributes)
}
