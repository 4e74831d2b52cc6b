//! Flatten the nested reading sections into an ordered block sequence.

use crate::document::{LiturgyDocument, ReadingItem, Readings, SectionValue};
use crate::page::{ReadingBlock, SectionKind};
use thiserror::Error;

/// A non-empty part of the document lacks a field the page needs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed liturgy document: missing field `{missing_field}`")]
pub struct MalformedDocument {
    /// Path of the missing field (e.g., `leituras.salmo[1].refrao`).
    pub missing_field: String,
}

impl MalformedDocument {
    pub fn new(missing_field: impl Into<String>) -> Self {
        Self { missing_field: missing_field.into() }
    }
}

/// Normalize the readings of a document into display blocks.
///
/// Sections are visited in [`SectionKind::ORDER`]; list sections keep their
/// item order; absent sections and empty items are skipped. Psalm blocks are headed by the
/// refrain, all others by the title. `reference` and `body` are copied
/// verbatim.
pub fn normalize(doc: &LiturgyDocument) -> Result<Vec<ReadingBlock>, MalformedDocument> {
    let mut blocks = Vec::new();

    for kind in SectionKind::ORDER {
        // Absent sections are treated like `{}` and `[]`: nothing to show.
        let Some(section) = section_value(&doc.readings, kind) else {
            tracing::debug!(section = kind.wire_key(), "Section absent");
            continue;
        };

        let indexed = matches!(section, SectionValue::Many(_));
        for (idx, item) in section.items().iter().enumerate() {
            if item.is_empty() {
                tracing::debug!(section = kind.wire_key(), index = idx, "Skipping empty item");
                continue;
            }
            let path = if indexed {
                format!("leituras.{}[{idx}]", kind.wire_key())
            } else {
                format!("leituras.{}", kind.wire_key())
            };
            blocks.push(to_block(kind, item, &path)?);
        }
    }

    tracing::debug!(blocks = blocks.len(), "Normalized readings");
    Ok(blocks)
}

fn section_value(readings: &Readings, kind: SectionKind) -> Option<&SectionValue> {
    match kind {
        SectionKind::FirstReading => readings.first_reading.as_ref(),
        SectionKind::Psalm => readings.psalm.as_ref(),
        SectionKind::SecondReading => readings.second_reading.as_ref(),
        SectionKind::Gospel => readings.gospel.as_ref(),
    }
}

fn to_block(kind: SectionKind, item: &ReadingItem, path: &str) -> Result<ReadingBlock, MalformedDocument> {
    let (heading, heading_key) = if kind.uses_refrain() {
        (&item.refrain, "refrao")
    } else {
        (&item.title, "titulo")
    };

    Ok(ReadingBlock {
        section: kind,
        reference: field(&item.reference, path, "referencia")?,
        heading: field(heading, path, heading_key)?,
        body: field(&item.text, path, "texto")?,
    })
}

/// A blank value counts as missing, the same rule the page header follows.
pub(crate) fn field(value: &Option<String>, path: &str, key: &str) -> Result<String, MalformedDocument> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(MalformedDocument::new(if path.is_empty() {
            key.to_string()
        } else {
            format!("{path}.{key}")
        })),
    }
}
