//! Pull-parse `maven-metadata.xml` into SnapshotMetadata.

use quick_xml::events::Event;
use quick_xml::Reader;

use super::{SnapshotMetadata, SnapshotVersion};
use crate::error::MetadataError;

#[derive(Debug, Clone, Copy)]
enum Field {
    Extension,
    Classifier,
    Value,
}

/// Collects every `snapshotVersion` element, wherever it sits in the tree.
/// Element names are matched on their local part, so namespaced documents work too.
pub fn parse_snapshot_metadata(body: &[u8]) -> Result<SnapshotMetadata, MetadataError> {
    let text = std::str::from_utf8(body)?;
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<SnapshotVersion> = None;
    let mut field: Option<Field> = None;
    let mut depth = 0usize;
    let mut root_seen = false;

    loop {
        let event = match reader.read_event() {
            Ok(ev) => ev,
            Err(source) => {
                return Err(MetadataError::Xml {
                    position: reader.buffer_position(),
                    source,
                })
            }
        };
        match event {
            Event::Start(_) | Event::Empty(_) if depth == 0 && root_seen => {
                return Err(MetadataError::Malformed("more than one root element"));
            }
            Event::Text(_) | Event::CData(_) if depth == 0 => {
                return Err(MetadataError::Malformed("text outside the root element"));
            }
            Event::Empty(_) => root_seen = true,
            Event::Start(e) => {
                depth += 1;
                root_seen = true;
                field = None;
                match e.local_name().as_ref() {
                    b"snapshotVersion" => current = Some(SnapshotVersion::default()),
                    b"extension" if current.is_some() => field = Some(Field::Extension),
                    b"classifier" if current.is_some() => field = Some(Field::Classifier),
                    b"value" if current.is_some() => field = Some(Field::Value),
                    _ => {}
                }
            }
            Event::Text(t) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let text = t.unescape().map_err(|source| MetadataError::Xml {
                        position: reader.buffer_position(),
                        source,
                    })?;
                    append(entry, f, &text);
                }
            }
            Event::CData(c) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    append(entry, f, &String::from_utf8_lossy(&c));
                }
            }
            Event::End(e) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(MetadataError::Malformed("closing tag without open element"))?;
                field = None;
                if e.local_name().as_ref() == b"snapshotVersion" {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                }
            }
            Event::Eof if depth > 0 => {
                return Err(MetadataError::Malformed("document ends inside an open element"));
            }
            Event::Eof if !root_seen => {
                return Err(MetadataError::Malformed("no root element"));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    tracing::debug!(entries = entries.len(), "parsed snapshot metadata");
    Ok(SnapshotMetadata { entries })
}

fn append(entry: &mut SnapshotVersion, field: Field, text: &str) {
    let slot = match field {
        Field::Extension => {
            entry.extension.push_str(text);
            return;
        }
        Field::Classifier => &mut entry.classifier,
        Field::Value => &mut entry.value,
    };
    slot.get_or_insert_with(String::new).push_str(text);
}
