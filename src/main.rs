use std::env;

use anyhow::Result;

use rpg_dashboard::api::{fetch_all, ApiClient, BatchRequest, GameApi};
use rpg_dashboard::config::AppConfig;
use rpg_dashboard::engine::derived::{can_cast, format_number, home_summary};
use rpg_dashboard::model::inventory::{InventoryItem, ItemId, Rarity};
use rpg_dashboard::model::quest::{QuestId, QuestPatch};
use rpg_dashboard::model::spell::SpellId;
use rpg_dashboard::storage::{LocalStorage, ThemePreference};
use rpg_dashboard::{GameState, GameStore, TransitionPolicy};

fn main() -> Result<()> {
    rpg_dashboard::logging::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let has_flag = |flag: &str| args.iter().any(|a| a == flag);

    let config = AppConfig::load()?;
    let storage = LocalStorage::open(config.storage_dir())?;

    let mut theme = ThemePreference::load(storage.clone());
    if has_flag("--toggle-theme") {
        theme.toggle()?;
    }
    println!("Theme: {}", theme.mode().as_str());

    let policy = if has_flag("--strict") {
        TransitionPolicy::Strict
    } else {
        TransitionPolicy::Lenient
    };
    let mut store = GameStore::with_policy(GameState::default(), policy);
    store.subscribe(|state| {
        tracing::info!(
            mana = state.player.mana,
            items = state.inventory.len(),
            "snapshot published"
        );
    });

    render(store.state());

    let potion = InventoryItem::new(
        ItemId::generate(),
        "Mana Draught",
        "consumable",
        Rarity::Uncommon,
        2,
    );
    store.add_inventory_item(potion)?;
    store.update_quest(QuestId(2), QuestPatch::progress(8))?;

    for _ in 0..4 {
        match store.cast_spell(SpellId(1)) {
            Ok(outcome) => println!("Cast Fireball: {:?}", outcome),
            Err(err) => println!("Cast Fireball rejected: {err}"),
        }
    }

    render(store.state());

    if has_flag("--api-demo") {
        run_api_demo(&config, storage)?;
    }

    Ok(())
}

fn render(state: &GameState) {
    let summary = home_summary(state);
    let player = &state.player;

    println!();
    println!("{} (level {})", player.name, player.level);
    println!(
        "  HP {}/{} ({:.0}%)  MP {}/{} ({:.0}%)  XP {}/{} ({:.0}%)",
        player.health,
        player.max_health,
        summary.health_percent,
        player.mana,
        player.max_mana,
        summary.mana_percent,
        format_number(player.experience.into()),
        format_number(player.experience_to_next.into()),
        summary.experience_percent,
    );
    for (stat, value) in &player.stats {
        println!("  {stat}: {value}");
    }

    println!("Active quests:");
    for quest in &summary.active_quests {
        println!(
            "  {} [{}/{}] -> {}",
            quest.title, quest.progress, quest.max_progress, quest.reward
        );
    }

    println!("Recent items:");
    for item in &summary.recent_items {
        println!("  {} x{} ({})", item.name, item.quantity, item.rarity.label());
    }

    println!("Quick spells:");
    for spell in &summary.favorite_spells {
        let marker = if can_cast(player, spell) { "ready" } else { "no mana" };
        println!("  {} ({} MP, {marker})", spell.name, spell.mana_cost);
    }
}

fn run_api_demo(config: &AppConfig, storage: LocalStorage) -> Result<()> {
    let api = GameApi::new(ApiClient::new(&config.api, storage)?);

    match api.get_player(1) {
        Ok(player) => println!("Remote player: {} <{}>", player.name, player.email),
        Err(err) => println!("{err}"),
    }

    let batch = fetch_all(
        api.client(),
        &[
            BatchRequest::get("quests", "/posts?_limit=3"),
            BatchRequest::get("inventory", "/users/1/albums"),
        ],
    );
    for (key, value) in &batch.data {
        let count = value.as_array().map(|a| a.len()).unwrap_or(0);
        println!("{key}: {count} records");
    }
    for (key, error) in &batch.errors {
        println!("{key}: {error}");
    }

    Ok(())
}
