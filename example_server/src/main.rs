//! Example Server - A scripted session driving the stat_engine pipeline
//!
//! This session shows:
//! - Loading pipeline config, skills and the class registry from disk
//! - Players joining and sending JSON requests
//! - Loot tokens opening into rolled gear
//! - Equipment, combat damage and regeneration over ticks
//! - The server -> client sync stream
//!
//! Usage: `example_server [data_dir]` (defaults to `./data`). Set `RUST_LOG`
//! to `stat_engine=debug` to see every mediation decision.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stat_engine::config::{load_skill_configs, LootConfig, ProgressionConfig};
use stat_engine::prelude::*;
use stat_engine::sync::{self, ClientState};
use stat_engine::{ClassRegistry, PlayerClass, SkillRegistry};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Classes written to the data directory on first run
fn default_classes() -> ClassRegistry {
    [
        PlayerClass::new("mage")
            .with_skill("fireball", 1)
            .with_skill("frost_nova", 3)
            .with_skill("meditation", 2)
            .with_base_stat(Stat::Intelligence, 3)
            .with_base_stat(Stat::Psyche, 10),
        PlayerClass::new("warrior")
            .with_skill("heavy_strike", 1)
            .with_skill("second_wind", 2)
            .with_base_stat(Stat::Strength, 3)
            .with_base_stat(Stat::Health, 10),
        PlayerClass::new("rogue")
            .with_skill("dash", 1)
            .with_base_stat(Stat::Dexterity, 3),
    ]
    .into_iter()
    .collect()
}

fn load_config(data_dir: &Path) -> PipelineConfig {
    let path = data_dir.join("pipeline.toml");
    if !path.exists() {
        return PipelineConfig {
            progression: ProgressionConfig {
                starting_attribute_points: 5,
                starting_skill_points: 1,
                ..Default::default()
            },
            loot: LootConfig {
                auto_identify_on_pickup: true,
                ..Default::default()
            },
            ..Default::default()
        };
    }
    PipelineConfig::load(&path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "falling back to default config");
        PipelineConfig::default()
    })
}

fn load_skills(data_dir: &Path) -> SkillRegistry {
    let path = data_dir.join("skills.toml");
    if !path.exists() {
        return default_skills();
    }
    load_skill_configs(&path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "falling back to bundled skills");
        default_skills()
    })
}

/// Decode and handle one raw request, the way a network handler would
fn receive(engine: &mut Engine, sender: PlayerId, raw: &str) {
    match sync::decode::<ClientMessage>(raw) {
        Ok(message) => match engine.handle(sender, message) {
            Ok(accepted) => info!(player = %sender, accepted, request = raw, "client request"),
            Err(e) => warn!(player = %sender, error = %e, "request failed"),
        },
        Err(e) => warn!(player = %sender, error = %e, "dropping malformed request"),
    }
}

/// Deliver pending server messages to a client mirror
fn flush(engine: &mut Engine, id: PlayerId, client: &mut ClientState) {
    for message in engine.drain_messages(id) {
        match sync::encode(&message) {
            Ok(json) => println!("  -> {}", json),
            Err(e) => warn!(error = %e, "could not encode message"),
        }
        client.apply(message, engine.skills());
    }
}

fn print_player(engine: &Engine, id: PlayerId) {
    let Some(player) = engine.player(id) else {
        return;
    };
    let totals = player.totals();
    let vitals = &engine.config().vitals;
    println!(
        "  Level {} | Health {:.1}/{:.1} | Mana {:.1}/{:.1} | Points {}",
        player.level,
        player.vitals.health,
        player.max_health(vitals, &totals),
        player.vitals.mana,
        player.max_mana(vitals, &totals),
        player.attribute_points(),
    );
    for (stat, value) in totals.iter() {
        println!("    {:<28} {}", stat.to_string(), value);
    }
}

fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    fs::create_dir_all(&data_dir)?;

    let mut classes = default_classes();
    classes.load_or_init(&data_dir);

    let mut engine = Engine::new(Side::Server, load_config(&data_dir))
        .with_classes(classes)
        .with_skills(load_skills(&data_dir))
        .with_rng(Box::new(ChaCha8Rng::seed_from_u64(42)));

    separator("JOIN");
    let alice = PlayerId(Uuid::new_v4());
    let bob = PlayerId(Uuid::new_v4());
    let mut alice_client = ClientState::new();
    let mut bob_client = ClientState::new();
    engine.spawn_player(alice);
    engine.spawn_player(bob);
    flush(&mut engine, alice, &mut alice_client);
    flush(&mut engine, bob, &mut bob_client);

    separator("REQUESTS");
    receive(&mut engine, alice, r#"{"type":"set_class","class":"mage","slot":0}"#);
    receive(&mut engine, alice, r#"{"type":"raise_stat","stat":"primary:intelligence","amount":3}"#);
    receive(&mut engine, alice, r#"{"type":"raise_stat","stat":"primary:wisdom","amount":9}"#);
    receive(&mut engine, alice, r#"{"type":"change_skill","skill":"fireball","increase":true}"#);
    receive(&mut engine, bob, r#"{"type":"set_class","class":"warrior","slot":0}"#);
    receive(&mut engine, bob, r#"{"type":"change_skill","skill":"fireball","increase":true}"#);
    receive(&mut engine, bob, r#"{"type":"raise_stat","stat":"bogus"}"#);
    engine.tick(TickPhase::End);
    flush(&mut engine, alice, &mut alice_client);
    flush(&mut engine, bob, &mut bob_client);

    separator("LOOT");
    let drops = engine.prepare_drops(vec![
        ItemStack::token(TokenStats::new(TokenType::Weapon, 12)),
        ItemStack::token(TokenStats::new(TokenType::Armor, 12)),
    ]);
    for mut stack in drops {
        if let Some(token) = stack.as_token() {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            stack = token.open(&mut rng);
        }
        if let Some(gear) = stack.as_gear_mut() {
            gear.stats.rarity = Rarity::Rare;
            gear.stats.binding = Binding::BindOnPickup;
        }
        match engine.pickup(bob, &mut stack)? {
            PickupOutcome::Allowed => {
                let Some(gear) = stack.as_gear() else {
                    continue;
                };
                let slot = gear.slot;
                println!("  Bob equips {:?} in {}", gear.gear_type, slot);
                engine.set_equipment(bob, slot, Some(stack))?;
            }
            PickupOutcome::Denied => println!("  Bob cannot take that"),
        }
    }
    print_player(&engine, bob);

    separator("COMBAT");
    let fireball = SkillId::from("fireball");
    if engine.use_skill(alice, &fireball)? {
        let remaining = engine.on_damage(bob, Some(alice), 12.0)?;
        println!("  Alice hits Bob with a fireball, {:.1} health left", remaining);
    }
    for _ in 0..200 {
        engine.tick(TickPhase::Start);
        engine.tick(TickPhase::End);
    }
    flush(&mut engine, alice, &mut alice_client);
    flush(&mut engine, bob, &mut bob_client);
    print_player(&engine, alice);
    print_player(&engine, bob);

    separator("LEVEL UP");
    let level = engine.level_up(alice)?;
    println!("  Alice reached level {}", level);
    engine.tick(TickPhase::End);
    flush(&mut engine, alice, &mut alice_client);
    println!(
        "  Client mirror: {} attribute points, {} skill points",
        alice_client.attribute_points, alice_client.skill_points
    );

    engine.despawn_player(alice);
    engine.despawn_player(bob);
    info!(data_dir = %data_dir.display(), "session finished");
    Ok(())
}
