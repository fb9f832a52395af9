// ABOUTME: Singleton organisation settings document with the app's option lists
// ABOUTME: Field names match the settings page (PSY, BEH, ADL, THER, RISK, ward and bed lists)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use serde::{Deserialize, Serialize};

/// Option lists stored at `config/org`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgConfig {
    /// Psychiatric assessment rating items
    #[serde(rename = "PSY")]
    pub psychiatric: Vec<String>,
    /// Behavioural observation rating items
    #[serde(rename = "BEH")]
    pub behavioral: Vec<String>,
    /// Activities of daily living
    #[serde(rename = "ADL")]
    pub adl: Vec<String>,
    /// Therapeutic activities
    #[serde(rename = "THER")]
    pub therapeutic: Vec<String>,
    /// Risk categories
    #[serde(rename = "RISK")]
    pub risk: Vec<String>,
    /// Diagnosis categories offered on the client form
    #[serde(rename = "diagnosisOptions")]
    pub diagnosis_options: Vec<String>,
    /// Ward names
    #[serde(rename = "wardNames")]
    pub ward_names: Vec<String>,
    /// Room/bed identifiers
    #[serde(rename = "roomBedNumbers")]
    pub room_bed_numbers: Vec<String>,
}

impl OrgConfig {
    /// Names of the fields a merge-write of this document touches
    #[must_use]
    pub const fn field_names() -> [&'static str; 8] {
        [
            "PSY",
            "BEH",
            "ADL",
            "THER",
            "RISK",
            "diagnosisOptions",
            "wardNames",
            "roomBedNumbers",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_keys_match_field_names() {
        let json = serde_json::to_value(OrgConfig::default()).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), OrgConfig::field_names().len());
        for name in OrgConfig::field_names() {
            assert!(object.contains_key(name), "missing {name}");
        }
    }
}
