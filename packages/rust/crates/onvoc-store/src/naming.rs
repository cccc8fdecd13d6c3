//! Display term ↔ folder/file name conversion.
//!
//! Folder and file base names use snake_case with principal words
//! capitalized (e.g. "Brain_Structures"); the corresponding display term
//! replaces each underscore with a space ("Brain Structures"). The mapping
//! must stay losslessly reversible, so a display term containing a literal
//! underscore is ambiguous and gets flagged at conversion time.

/// Convert a folder or file base name into its display term.
///
/// E.g. `"Brain_Structures"` → `"Brain Structures"`.
#[must_use]
pub fn slug_to_display(slug: &str) -> String {
    slug.replace('_', " ")
}

/// Convert a display term into its folder or file base name.
///
/// E.g. `"Brain Structures"` → `"Brain_Structures"`. A term that already
/// contains a literal underscore cannot round-trip through
/// [`slug_to_display`]; it is logged as a warning and left untouched.
#[must_use]
pub fn display_to_slug(term: &str) -> String {
    if term.contains('_') {
        log::warn!("term '{term}' contains a literal underscore; folder name is ambiguous");
    }
    term.replace(' ', "_")
}
