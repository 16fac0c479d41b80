//! Values computed from a snapshot at read time. Nothing here is stored.

use crate::model::game_state::GameState;
use crate::model::inventory::InventoryItem;
use crate::model::player::Player;
use crate::model::quest::Quest;
use crate::model::spell::Spell;

/// `current / max * 100`, clamped to `[0, 100]` for display.
/// A non-positive `max` reads as empty.
pub fn percentage(current: i32, max: i32) -> f32 {
    if max <= 0 {
        return 0.0;
    }
    (current as f32 / max as f32 * 100.0).clamp(0.0, 100.0)
}

pub fn health_percent(player: &Player) -> f32 {
    percentage(player.health, player.max_health)
}

pub fn mana_percent(player: &Player) -> f32 {
    percentage(player.mana, player.max_mana)
}

pub fn experience_percent(player: &Player) -> f32 {
    percentage(player.experience, player.experience_to_next)
}

pub fn quest_progress_percent(quest: &Quest) -> f32 {
    let current = i32::try_from(quest.progress).unwrap_or(i32::MAX);
    let max = i32::try_from(quest.max_progress).unwrap_or(i32::MAX);
    percentage(current, max)
}

pub fn can_cast(player: &Player, spell: &Spell) -> bool {
    i64::from(player.mana) >= i64::from(spell.mana_cost)
}

pub fn castable_spells(state: &GameState) -> impl Iterator<Item = &Spell> {
    state
        .spells
        .iter()
        .filter(move |spell| can_cast(&state.player, spell))
}

pub fn active_quests(state: &GameState) -> impl Iterator<Item = &Quest> {
    state.quests.iter().filter(|quest| quest.is_active())
}

/// At most `limit` active quests, in quest-log order.
pub fn active_quests_limited(state: &GameState, limit: usize) -> Vec<&Quest> {
    active_quests(state).take(limit).collect()
}

/// What the home screen shows: a few active quests, the first items and
/// the favourite spells.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeSummary<'a> {
    pub active_quests: Vec<&'a Quest>,
    pub recent_items: Vec<&'a InventoryItem>,
    pub favorite_spells: Vec<&'a Spell>,
    pub health_percent: f32,
    pub mana_percent: f32,
    pub experience_percent: f32,
}

pub fn home_summary(state: &GameState) -> HomeSummary<'_> {
    HomeSummary {
        active_quests: active_quests_limited(state, 2),
        recent_items: state.inventory.iter().take(3).collect(),
        favorite_spells: state.spells.iter().take(2).collect(),
        health_percent: health_percent(&state.player),
        mana_percent: mana_percent(&state.player),
        experience_percent: experience_percent(&state.player),
    }
}

/// Compact number for stat badges: 1.5K, 2.0M.
pub fn format_number(value: i64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}
