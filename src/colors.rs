/*
Category color palette and lookup.
Every category resolves to a stable color: an explicit mapping wins,
otherwise a hash of the category name picks one deterministically.
*/

use serde::Serialize;

use crate::models::CategoryColorMapping;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub name: &'static str,
    pub hex: &'static str,
}

// Palette sorted by color wheel
pub const COLORS: [Color; 12] = [
    Color { name: "red", hex: "#fecaca" },
    Color { name: "orange", hex: "#fed7aa" },
    Color { name: "yellow", hex: "#fef08a" },
    Color { name: "lime", hex: "#d9f99d" },
    Color { name: "green", hex: "#bbf7d0" },
    Color { name: "teal", hex: "#99f6e4" },
    Color { name: "sky", hex: "#bae6fd" },
    Color { name: "indigo", hex: "#c7d2fe" },
    Color { name: "violet", hex: "#ddd6fe" },
    Color { name: "fuchsia", hex: "#f5d0fe" },
    Color { name: "rose", hex: "#fecdd3" },
    Color { name: "slate", hex: "#e2e8f0" },
];

// Simple 32-bit string hash: h = h*31 + byte, wrapping like JS `|0`
fn hash_code(s: &str) -> i32 {
    let mut hash: i32 = 0;
    for b in s.bytes() {
        hash = hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(b as i32);
    }
    hash
}

// Resolve the color for a category.
//
// Rules:
// - Empty category -> first palette color
// - Explicit mapping with an in-range index wins
// - Otherwise fall back to hash-based assignment
pub fn color_for_category(category: &str, mappings: &[CategoryColorMapping]) -> Color {
    if category.is_empty() {
        return COLORS[0];
    }

    if let Some(m) = mappings.iter().find(|m| m.category == category) {
        if m.color_index < COLORS.len() {
            return COLORS[m.color_index];
        }
    }

    let index = hash_code(category).unsigned_abs() as usize % COLORS.len();
    COLORS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(category: &str, color_index: usize) -> CategoryColorMapping {
        CategoryColorMapping {
            category: category.to_string(),
            color_index,
        }
    }

    #[test]
    fn explicit_mapping_wins() {
        let mappings = vec![mapping("Work", 3)];
        assert_eq!(color_for_category("Work", &mappings), COLORS[3]);
    }

    #[test]
    fn out_of_range_index_falls_back_to_hash() {
        let mappings = vec![mapping("Work", 99)];
        assert_eq!(
            color_for_category("Work", &mappings),
            color_for_category("Work", &[])
        );
    }

    #[test]
    fn fallback_is_stable_per_category() {
        let first = color_for_category("Errands", &[]);
        let second = color_for_category("Errands", &[]);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_category_gets_first_color() {
        assert_eq!(color_for_category("", &[]), COLORS[0]);
    }

    #[test]
    fn unmapped_category_gets_some_palette_color() {
        let color = color_for_category("Deep Work", &[]);
        assert!(COLORS.contains(&color));
    }
}
