use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Fresh id for items created on the client. Seeded items use small
    /// integers, generated ones live well above that range.
    pub fn generate() -> Self {
        ItemId(rand::thread_rng().gen_range(1_000_000..u64::MAX / 2))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
            Rarity::Mythic => "mythic",
        }
    }
}

impl Default for Rarity {
    fn default() -> Self {
        Rarity::Common
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,

    /// weapon / armor / consumable / accessory / misc, left open on purpose
    #[serde(rename = "type")]
    pub item_type: String,

    pub rarity: Rarity,
    pub quantity: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<BTreeMap<String, i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
}

impl InventoryItem {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        item_type: impl Into<String>,
        rarity: Rarity,
        quantity: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            item_type: item_type.into(),
            rarity,
            quantity: quantity.max(1),
            description: None,
            stats: None,
            value: None,
        }
    }
}

pub fn seed_inventory() -> Vec<InventoryItem> {
    vec![
        InventoryItem::new(ItemId(1), "Health Potion", "consumable", Rarity::Common, 5),
        InventoryItem::new(ItemId(2), "Steel Sword", "weapon", Rarity::Uncommon, 1),
        InventoryItem::new(ItemId(3), "Magic Ring", "accessory", Rarity::Rare, 1),
    ]
}
