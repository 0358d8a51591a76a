// src/process/filter.rs

use super::{
    normalize::{ADDRESS, DISTRICT},
    table::Table,
};
use crate::config::Config;

/// Target-district markers.
///
/// `district` and `address` are searched for the native marker as an exact
/// substring; `address` is also searched for the latin marker ignoring case.
#[derive(Debug, Clone)]
pub struct DistrictMatcher {
    native: String,
    latin_lower: String,
}

impl DistrictMatcher {
    pub fn new(native: &str, latin: &str) -> Self {
        Self {
            native: native.to_string(),
            latin_lower: latin.to_lowercase(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.district_marker, &config.latin_marker)
    }

    pub fn matches(&self, district: &str, address: &str) -> bool {
        district.contains(&self.native)
            || address.contains(&self.native)
            || (!self.latin_lower.is_empty() && address.to_lowercase().contains(&self.latin_lower))
    }
}

/// Drop rows outside the target district. Returns the number of rows kept.
pub fn retain_district(table: &mut Table, matcher: &DistrictMatcher) -> usize {
    table.retain_rows(|t, i| matcher.matches(t.str_value(i, DISTRICT), t.str_value(i, ADDRESS)));
    table.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::normalize::{normalize, table_from_items};
    use serde_json::json;

    fn north() -> DistrictMatcher {
        DistrictMatcher::from_config(&Config::default())
    }

    #[test]
    fn either_column_can_match() {
        let m = north();
        assert!(m.matches("北區", ""));
        assert!(m.matches("", "台南市北區公園路"));
        assert!(m.matches("", "No. 5, NORTH Gate Rd"));
        assert!(m.matches("", "northern lot"));
    }

    #[test]
    fn latin_marker_is_not_checked_against_district() {
        let m = north();
        assert!(!m.matches("North", "台南市南區"));
        assert!(!m.matches("南區", "中西區民族路"));
    }

    #[test]
    fn keeps_only_north_rows() {
        let mut table = normalize(table_from_items(
            json!([
                {"name": "A", "zone": "北區"},
                {"name": "B", "address": "台南市南區"},
                {"name": "C", "address": "North District"},
                {"name": "D"}
            ])
            .as_array()
            .unwrap()
            .clone(),
        ));

        let kept = retain_district(&mut table, &north());
        assert_eq!(kept, 2);
        assert_eq!(table.str_value(0, "nameId"), "A");
        assert_eq!(table.str_value(1, "nameId"), "C");
    }
}
