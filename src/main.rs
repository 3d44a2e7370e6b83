//! Hexhold - Entry Point
//!
//! Runs a scripted skirmish so the combat engine can be exercised and
//! observed from the command line. The opposing card choices are
//! scripted here; in the full game they come from the strategy layer.

use clap::Parser;

use hexhold::cards::{CardInventory, CardKind};
use hexhold::combat::{CombatEngine, RoundMarker};
use hexhold::core::config::CombatConfig;
use hexhold::core::types::{PlayerId, Side, TerritoryId};
use hexhold::territory::{Terrain, Territory, TerritoryMap, TerritoryStore};
use hexhold::units::{RosterMap, UnitType};

#[derive(Parser, Debug)]
#[command(name = "hexhold", about = "Scripted skirmish demo for the combat engine")]
struct Args {
    /// Rounds per combat session
    #[arg(long, default_value_t = 3)]
    rounds: u32,

    /// Path to a TOML combat configuration
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hexhold=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(text) => match CombatConfig::from_toml_str(&text) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("bad config file, using defaults: {e}");
                    CombatConfig::default()
                }
            },
            Err(e) => {
                tracing::warn!("could not read config file, using defaults: {e}");
                CombatConfig::default()
            }
        },
        None => CombatConfig::default(),
    };
    config.total_rounds = args.rounds.max(1);

    let player = PlayerId(1);
    let rival = PlayerId(2);
    let homeland = TerritoryId(1);
    let borderland = TerritoryId(2);

    let mut territories = TerritoryMap::new();
    territories.insert(homeland, Territory::new(Terrain::Plains).owned_by(player).capital());
    territories.insert(borderland, Territory::new(Terrain::Hills).owned_by(rival));

    let mut rosters = RosterMap::new();
    rosters.spawn(UnitType::Infantry, homeland);
    rosters.spawn(UnitType::Cavalry, homeland);
    rosters.spawn(UnitType::Archers, homeland);
    rosters.spawn(UnitType::Militia, borderland);
    rosters.spawn(UnitType::Infantry, borderland);

    let mut engine = CombatEngine::new(config);
    engine.set_inventory(player, CardInventory::standard());

    println!("\n=== HEXHOLD SKIRMISH ===");
    println!(
        "Attacking territory {} ({:.1} strength) against territory {} ({:.1} strength)\n",
        homeland.0,
        rosters.total_strength(homeland),
        borderland.0,
        rosters.total_strength(borderland),
    );

    if engine
        .start_combat(homeland, borderland, &territories, &rosters)
        .is_err()
    {
        eprintln!("could not start combat");
        return;
    }

    // Scripted plays, cycled if --rounds exceeds the script
    let player_script = [CardKind::Charge, CardKind::Volley, CardKind::Flank];
    let opponent_script = [CardKind::Volley, CardKind::ShieldWall, CardKind::Fortify];

    let mut round = 0usize;
    loop {
        let player_card = player_script[round % player_script.len()];
        let opponent_card = opponent_script[round % opponent_script.len()];

        if engine.select_card(player_card, Side::Player).is_err() {
            // Inventory exhausted: fall back to any remaining card
            let Some(fallback) = engine.available_cards(player).first().map(|c| c.kind) else {
                println!("attacker is out of cards, abandoning the assault");
                engine.abandon();
                return;
            };
            engine
                .select_card(fallback, Side::Player)
                .expect("fallback card is available");
        }
        engine
            .select_card(opponent_card, Side::Opponent)
            .expect("opponent cards are unvalidated");

        round += 1;
        match engine.next_round() {
            Ok(true) => continue,
            Ok(false) => break,
            Err(e) => {
                eprintln!("round rejected: {e}");
                return;
            }
        }
    }

    if let Some(session) = engine.session() {
        for entry in session.log.entries() {
            match entry.marker {
                RoundMarker::Start => println!("-- {}", entry.message),
                RoundMarker::Round(n) => println!(
                    "round {n}: {} (scores {:.1} vs {:.1}, casualties {:.1}%/{:.1}%)",
                    entry.message,
                    entry.player_score,
                    entry.opponent_score,
                    entry.attacker_casualties,
                    entry.defender_casualties,
                ),
                RoundMarker::Final => println!("-- {}", entry.message),
            }
        }
        println!(
            "\ncumulative casualties: attacker {:.1}%, defender {:.1}%",
            session.attacker_casualties, session.defender_casualties,
        );
    }

    match engine.end_combat_into(&mut territories) {
        Ok(result) => {
            let target = territories
                .territory(borderland)
                .expect("target territory exists");
            println!("result: {result:?}");
            println!(
                "territory {}: owner {:?}, control {:.1}",
                borderland.0, target.owner, target.control
            );
        }
        Err(e) => eprintln!("end_combat rejected: {e}"),
    }
}
