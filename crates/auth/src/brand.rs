use serde::{Deserialize, Serialize};

/// Brand (tenant/workspace) code. The set is closed; authorization is scoped
/// per brand.
///
/// Brand codes arrive from loosely-typed upstream JSON or from a
/// comma-separated header. Parsing is strict: values outside the set are
/// dropped, never propagated as an unknown tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Brand {
    #[serde(rename = "TL")]
    Tl,
    #[serde(rename = "BE")]
    Be,
    #[serde(rename = "AM")]
    Am,
}

impl Brand {
    pub const ALL: [Brand; 3] = [Brand::Tl, Brand::Be, Brand::Am];

    /// Parses a single brand code, case-insensitive, trimming whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TL" => Some(Brand::Tl),
            "BE" => Some(Brand::Be),
            "AM" => Some(Brand::Am),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Brand::Tl => "TL",
            Brand::Be => "BE",
            Brand::Am => "AM",
        }
    }

    /// Parses a comma-separated brand list (e.g. the `x-clout-brands`
    /// header). Unknown values are dropped; duplicates are removed keeping
    /// first-seen order.
    pub fn parse_list(s: &str) -> Vec<Brand> {
        Self::collect(s.split(','))
    }

    /// Parses a list of brand strings (e.g. the upstream `brands` claim).
    pub fn parse_slice(values: &[String]) -> Vec<Brand> {
        Self::collect(values.iter().map(String::as_str))
    }

    fn collect<'a>(values: impl Iterator<Item = &'a str>) -> Vec<Brand> {
        let mut out = Vec::new();
        for value in values {
            if let Some(brand) = Brand::parse(value) {
                if !out.contains(&brand) {
                    out.push(brand);
                }
            }
        }
        out
    }
}

impl core::fmt::Display for Brand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_codes_parse_case_insensitive() {
        assert_eq!(Brand::parse("TL"), Some(Brand::Tl));
        assert_eq!(Brand::parse("tl"), Some(Brand::Tl));
        assert_eq!(Brand::parse(" be "), Some(Brand::Be));
        assert_eq!(Brand::parse("Am"), Some(Brand::Am));
        assert_eq!(Brand::parse("XX"), None);
        assert_eq!(Brand::parse(""), None);
    }

    #[test]
    fn list_drops_unknown_and_dedupes_in_order() {
        assert_eq!(
            Brand::parse_list("be,TL,zz,tl, am ,BE"),
            vec![Brand::Be, Brand::Tl, Brand::Am]
        );
        assert_eq!(Brand::parse_list(""), Vec::<Brand>::new());
        assert_eq!(Brand::parse_list("zz,,yy"), Vec::<Brand>::new());
    }

    #[test]
    fn slice_parsing_matches_list_parsing() {
        let values = vec!["tl".to_string(), "ZZ".to_string(), "TL".to_string()];
        assert_eq!(Brand::parse_slice(&values), vec![Brand::Tl]);
    }

    #[test]
    fn serde_uses_canonical_codes() {
        assert_eq!(serde_json::to_string(&Brand::Tl).unwrap(), "\"TL\"");
        assert_eq!(serde_json::from_str::<Brand>("\"AM\"").unwrap(), Brand::Am);
    }
}
