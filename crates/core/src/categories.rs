//! Fixed POI type-code table for sightseeing and culture places.
//!
//! Codes follow the map provider's POI classification. The collector
//! walks this table in order, one category per pass, and the record
//! mapper resolves a POI's `typecode` to its label through it.

/// Label used when a POI's type code is not in the table.
pub const FALLBACK_CATEGORY: &str = "其他";

/// Default category for destinations created by the collector.
pub const CITY_CATEGORY: &str = "城市";

/// Ordered `(type code, label)` pairs collected by the POI import.
pub const POI_CATEGORIES: &[(&str, &str)] = &[
    ("110000", "风景名胜"),
    ("110100", "公园广场"),
    ("110101", "公园"),
    ("110102", "动物园"),
    ("110103", "植物园"),
    ("110104", "水族馆"),
    ("110200", "风景名胜"),
    ("110201", "世界遗产"),
    ("110202", "国家级景点"),
    ("110204", "纪念馆"),
    ("110205", "寺庙道观"),
    ("140100", "博物馆"),
    ("140200", "展览馆"),
    ("140400", "美术馆"),
    ("140600", "科技馆"),
];

/// Resolve a POI type code to its category label.
///
/// Unknown codes map to [`FALLBACK_CATEGORY`].
pub fn category_for_code(code: &str) -> &'static str {
    POI_CATEGORIES
        .iter()
        .find(|(c, _)| *c == code.trim())
        .map(|(_, label)| *label)
        .unwrap_or(FALLBACK_CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_code_resolves_to_label() {
        assert_eq!(category_for_code("140100"), "博物馆");
        assert_eq!(category_for_code("110000"), "风景名胜");
    }

    #[test]
    fn unknown_code_falls_back() {
        assert_eq!(category_for_code("999999"), FALLBACK_CATEGORY);
        assert_eq!(category_for_code(""), FALLBACK_CATEGORY);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(category_for_code(" 110101 "), "公园");
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<_> = POI_CATEGORIES.iter().map(|(c, _)| *c).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), POI_CATEGORIES.len());
    }
}
