use serde::{Deserialize, Serialize};

/// Application permission level, ordered by increasing write capability.
///
/// The set is closed on purpose: levels come from the identity service (or
/// from gateway-injected headers) as strings, and anything outside the set
/// normalizes to [`PermissionLevel::View`]. Ambiguous input must never
/// produce a write-capable level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    None,
    View,
    Edit,
    Approve,
    Admin,
}

impl PermissionLevel {
    /// Parses a level string, case-insensitive.
    ///
    /// Unrecognized or empty input yields `View` (fail closed: read-only).
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => PermissionLevel::None,
            "edit" => PermissionLevel::Edit,
            "approve" => PermissionLevel::Approve,
            "admin" => PermissionLevel::Admin,
            _ => PermissionLevel::View,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionLevel::None => "none",
            PermissionLevel::View => "view",
            PermissionLevel::Edit => "edit",
            PermissionLevel::Approve => "approve",
            PermissionLevel::Admin => "admin",
        }
    }

    /// True iff this level may perform mutating operations.
    pub fn can_write(&self) -> bool {
        matches!(
            self,
            PermissionLevel::Edit | PermissionLevel::Approve | PermissionLevel::Admin
        )
    }
}

impl core::fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_parse_exactly() {
        assert_eq!(PermissionLevel::parse("none"), PermissionLevel::None);
        assert_eq!(PermissionLevel::parse("view"), PermissionLevel::View);
        assert_eq!(PermissionLevel::parse("edit"), PermissionLevel::Edit);
        assert_eq!(PermissionLevel::parse("approve"), PermissionLevel::Approve);
        assert_eq!(PermissionLevel::parse("admin"), PermissionLevel::Admin);
        assert_eq!(PermissionLevel::parse("ADMIN"), PermissionLevel::Admin);
        assert_eq!(PermissionLevel::parse(" edit "), PermissionLevel::Edit);
    }

    #[test]
    fn unknown_levels_normalize_to_view() {
        for bad in ["", "owner", "superadmin", "editor", "view ", "writer", "42"] {
            assert_eq!(PermissionLevel::parse(bad), PermissionLevel::View, "{bad:?}");
        }
    }

    #[test]
    fn can_write_truth_table() {
        assert!(!PermissionLevel::None.can_write());
        assert!(!PermissionLevel::View.can_write());
        assert!(PermissionLevel::Edit.can_write());
        assert!(PermissionLevel::Approve.can_write());
        assert!(PermissionLevel::Admin.can_write());
        // Invalid input normalizes to view first, so it can never write.
        assert!(!PermissionLevel::parse("root").can_write());
    }

    #[test]
    fn serde_round_trip_uses_lowercase() {
        let json = serde_json::to_string(&PermissionLevel::Approve).unwrap();
        assert_eq!(json, "\"approve\"");
        let back: PermissionLevel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PermissionLevel::Approve);
    }
}
