//! Unreal Engine build version descriptor.
//!
//! Every packaged build ships a `*.version` JSON file next to its binaries:
//!
//! ```json
//! {
//!   "MajorVersion": 5,
//!   "MinorVersion": 2,
//!   "PatchVersion": 1,
//!   "Changelist": 365306,
//!   "CompatibleChangelist": 365306,
//!   "IsLicenseeVersion": 1,
//!   "IsPromotedBuild": 1,
//!   "BranchName": "++FactoryGame+rel-main-1.0.0",
//!   "BuildId": "37497412"
//! }
//! ```
//!
//! Only `Changelist` is required.

use serde::{Deserialize, Serialize};

/// Parsed contents of a build version descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameVersionFile {
    #[serde(default)]
    pub major_version: i64,
    #[serde(default)]
    pub minor_version: i64,
    #[serde(default)]
    pub patch_version: i64,
    pub changelist: u64,
    #[serde(default)]
    pub compatible_changelist: u64,
    #[serde(default)]
    pub is_licensee_version: i64,
    #[serde(default)]
    pub is_promoted_build: i64,
    #[serde(default)]
    pub branch_name: String,
    #[serde(default)]
    pub build_id: String,
}

impl GameVersionFile {
    /// Parse a descriptor from its JSON text.
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_descriptor() {
        let content = r#"{
            "MajorVersion": 5,
            "MinorVersion": 2,
            "PatchVersion": 1,
            "Changelist": 365306,
            "CompatibleChangelist": 365300,
            "IsLicenseeVersion": 1,
            "IsPromotedBuild": 1,
            "BranchName": "++FactoryGame+rel-main-1.0.0",
            "BuildId": "37497412"
        }"#;

        let version = GameVersionFile::from_json(content).unwrap();
        assert_eq!(version.changelist, 365306);
        assert_eq!(version.compatible_changelist, 365300);
        assert_eq!(version.major_version, 5);
        assert_eq!(version.branch_name, "++FactoryGame+rel-main-1.0.0");
        assert_eq!(version.build_id, "37497412");
    }

    #[test]
    fn only_changelist_is_required() {
        let version = GameVersionFile::from_json(r#"{"Changelist":123456}"#).unwrap();
        assert_eq!(version.changelist, 123456);
        assert_eq!(version.major_version, 0);
        assert!(version.branch_name.is_empty());
    }

    #[test]
    fn missing_changelist_is_rejected() {
        assert!(GameVersionFile::from_json(r#"{"MajorVersion":5}"#).is_err());
    }
}
