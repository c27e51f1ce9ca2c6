//! Raw item and character records as returned by the game's public API and
//! stored in flat snapshot files. Field names follow the API's PascalCase.

use serde::{Deserialize, Serialize};

/// One stat line of an item tooltip, e.g. `("Physical Power", "+40")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStatRow {
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl RawStatRow {
    pub fn new(description: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItemDescription {
    #[serde(rename = "Menuitems", default)]
    pub stat_rows: Vec<RawStatRow>,
    /// Passive text; empty or missing when the item has none.
    #[serde(rename = "SecondaryDescription", default)]
    pub secondary_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(rename = "ItemId")]
    pub id: u64,
    /// `"y"` or `"n"`.
    #[serde(rename = "ActiveFlag")]
    pub active_flag: String,
    #[serde(rename = "ItemTier")]
    pub tier: u32,
    #[serde(rename = "StartingItem", default)]
    pub starting_item: bool,
    /// Comma-separated role names, or `"no restrictions"`.
    #[serde(rename = "RestrictedRoles", default)]
    pub restricted_roles: String,
    #[serde(rename = "DeviceName")]
    pub device_name: String,
    #[serde(rename = "Price", default)]
    pub price: u32,
    /// The item this one upgrades from; 0 ends the chain.
    #[serde(rename = "ChildItemId", default)]
    pub child_item_id: u64,
    #[serde(rename = "ItemDescription", default)]
    pub description: RawItemDescription,
}

impl RawItem {
    pub fn is_active(&self) -> bool {
        !self.active_flag.trim().eq_ignore_ascii_case("n")
    }

    pub fn stat_rows(&self) -> &[RawStatRow] {
        &self.description.stat_rows
    }

    /// Passive text, `None` when missing or blank.
    pub fn passive_text(&self) -> Option<&str> {
        self.description
            .secondary_description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn is_restricted_for(&self, role: &str) -> bool {
        self.restricted_roles
            .to_ascii_lowercase()
            .contains(&role.to_ascii_lowercase())
    }
}

/// Roster entry; only the columns the archetype baseline reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCharacter {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Roles")]
    pub role: String,
    #[serde(rename = "PhysicalPower", default)]
    pub physical_power: f64,
    #[serde(rename = "PhysicalPowerPerLevel", default)]
    pub physical_power_per_level: f64,
    #[serde(rename = "AttackSpeed", default)]
    pub attack_speed: f64,
    #[serde(rename = "AttackSpeedPerLevel", default)]
    pub attack_speed_per_level: f64,
    #[serde(rename = "Mana", default)]
    pub mana: f64,
    #[serde(rename = "ManaPerLevel", default)]
    pub mana_per_level: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_shaped_item() {
        let raw = r#"{
            "ItemId": 7526,
            "ActiveFlag": "y",
            "ItemTier": 3,
            "StartingItem": false,
            "RestrictedRoles": "no restrictions",
            "DeviceName": "Qin's Sais",
            "Price": 1150,
            "ChildItemId": 7525,
            "ItemDescription": {
                "Menuitems": [
                    {"Description": "Physical Power", "Value": "+40"},
                    {"Description": "Attack Speed", "Value": "+25%"}
                ],
                "SecondaryDescription": "PASSIVE - basic attacks deal bonus damage."
            }
        }"#;
        let item: RawItem = serde_json::from_str(raw).expect("item should parse");
        assert!(item.is_active());
        assert_eq!(item.tier, 3);
        assert_eq!(item.stat_rows().len(), 2);
        assert!(item.passive_text().is_some());
        assert!(!item.is_restricted_for("hunter"));
    }

    #[test]
    fn blank_passive_text_is_none() {
        let item = RawItem {
            id: 1,
            active_flag: "n".to_string(),
            tier: 3,
            starting_item: false,
            restricted_roles: "Hunter, Mage".to_string(),
            device_name: "Test".to_string(),
            price: 0,
            child_item_id: 0,
            description: RawItemDescription {
                stat_rows: Vec::new(),
                secondary_description: Some("   ".to_string()),
            },
        };
        assert!(!item.is_active());
        assert!(item.passive_text().is_none());
        assert!(item.is_restricted_for("hunter"));
    }

    #[test]
    fn parses_roster_entry_with_padded_role() {
        let raw = r#"{"Name":"Artemis","Roles":" Hunter","PhysicalPower":38,
            "PhysicalPowerPerLevel":2.2,"AttackSpeed":0.95,"AttackSpeedPerLevel":0.017,
            "Mana":235,"ManaPerLevel":40}"#;
        let god: RawCharacter = serde_json::from_str(raw).expect("roster entry should parse");
        assert_eq!(god.role.trim(), "Hunter");
        assert_eq!(god.mana_per_level, 40.0);
    }
}
