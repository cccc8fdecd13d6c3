//! File names that define the shape of the ID-annotated tree.

/// Root-level listing of category terms.
pub const CATEGORIES_FILE: &str = "Categories.tsv";

/// Per-category listing of subcategory terms.
pub const SUBCATEGORIES_FILE: &str = "Subcategories.tsv";

/// Leaf file name for a subcategory base name.
#[must_use]
pub fn leaf_file(stem: &str) -> String {
    format!("{stem}.tsv")
}
