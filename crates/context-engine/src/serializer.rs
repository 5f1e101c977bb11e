//! Canonical text form of fetched sections.

use insight_core::{DataSection, SerializedSection};

/// Serialize one section into its embeddable text.
///
/// Unavailable sections and serialization failures both become the empty
/// string: missing data is an explicit empty value, never an error and
/// never an absent field. Mappings serialize as flat key/value objects,
/// tables in the split layout (index, columns, data). Output is
/// deterministic for identical payloads.
pub fn serialize(section: &DataSection) -> SerializedSection {
    let text = match &section.payload {
        Some(payload) => match serde_json::to_string(payload) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    "Failed to serialize {} section: {}",
                    section.kind.as_str(),
                    e
                );
                String::new()
            }
        },
        None => String::new(),
    };

    SerializedSection {
        kind: section.kind,
        text,
    }
}
