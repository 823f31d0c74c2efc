//! Duplicate detection over stored raw texts.
//!
//! Equality is byte-for-byte on the full raw text, page-join newlines
//! and whitespace included; nothing is normalized here beyond what the
//! upstream stages already trimmed. Two re-scans of the same physical
//! document will usually differ and are not detected as duplicates; that
//! strictness stays until a similarity threshold is actually specified.

/// Outcome of the duplicate check: the document already exists, or not.
pub type DuplicateVerdict = bool;

/// True when the candidate raw text exactly matches any stored raw text.
pub fn is_duplicate<S: AsRef<str>>(raw_text: &str, existing_raw_texts: &[S]) -> DuplicateVerdict {
    existing_raw_texts
        .iter()
        .any(|existing| existing.as_ref() == raw_text)
}
