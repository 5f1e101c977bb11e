//! Labeled context assembly.

use insight_core::SerializedSection;

/// Phrase appended after the last section, marking where the dataset ends.
pub const CLOSING_SENTINEL: &str = "This concludes the dataset and here the context ends.";

/// Concatenate labeled section texts, in the order given, into one context
/// string, closing with the end-of-dataset sentinel.
///
/// Callers pass sections in the canonical `SectionKind::ALL` order. The
/// output is always a single well-formed string: an all-unavailable input
/// yields just the labels and the sentinel.
pub fn assemble(sections: &[SerializedSection]) -> String {
    let mut context = String::new();
    for section in sections {
        context.push_str(section.kind.label());
        context.push(' ');
        if !section.text.is_empty() {
            context.push_str(&section.text);
            context.push(' ');
        }
    }
    context.push_str(CLOSING_SENTINEL);
    context
}
