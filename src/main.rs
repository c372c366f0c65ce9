use clap::Parser;
use creature_battle::{
    get_species_data, initialize_move_data, initialize_species_data, BattleEngine, BattleEvent,
    BattleState, Combatant, CombatantSlot, CreatureInst, EnginePhase, EventBus, PlayerAction,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

/// Play out one wild-creature battle on the terminal by consuming the
/// engine's event script.
#[derive(Parser)]
#[command(name = "creature-battle")]
struct Cli {
    /// Directory holding the moves/ and species/ RON definitions
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Seed for a reproducible battle; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Level for every creature on both sides
    #[arg(long, default_value_t = 10)]
    level: u8,

    /// Dump each turn's script as JSON instead of narrated text
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let move_count = initialize_move_data(&cli.data_dir)?;
    let species_count = initialize_species_data(&cli.data_dir)?;
    log::info!("loaded {} moves, {} species", move_count, species_count);

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    println!("battle seed: {}", seed);

    let player = Combatant::new(
        "Player",
        vec![
            creature("EMBERWOLF", cli.level)?,
            creature("THORNCUB", cli.level)?,
        ],
    )?;
    let opponent = Combatant::new("Wild", vec![creature("RIVERFIN", cli.level)?])?;

    let mut engine = BattleEngine::with_seed(player, opponent, seed);

    // The player's own picks come from a separate stream so they never
    // perturb the engine's turn oracles.
    let mut chooser = StdRng::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);

    let intro = engine.start();
    render(&intro, cli.json)?;

    loop {
        match engine.phase() {
            EnginePhase::WaitingForAction => {
                let action = pick_player_action(engine.state(), &mut chooser);
                let script = engine.submit_action(action)?;
                render(&script, cli.json)?;
            }
            EnginePhase::WaitingForReplacement => {
                let party_index = engine
                    .state()
                    .combatant(CombatantSlot::Player)
                    .first_healthy_replacement()
                    .ok_or("no healthy replacement available")?;
                let script = engine.submit_action(PlayerAction::SwitchTo { party_index })?;
                render(&script, cli.json)?;
            }
            EnginePhase::Finished(outcome) => {
                println!("outcome: {:?}", outcome);
                break;
            }
            EnginePhase::ResolvingTurn => break,
        }
    }

    Ok(())
}

fn creature(species_key: &str, level: u8) -> Result<CreatureInst, Box<dyn std::error::Error>> {
    let species = get_species_data(species_key)?;
    Ok(CreatureInst::new(species_key, &species, level, None)?)
}

/// A random legal pick for the player's side; flee once every move is out
/// of PP so the demo always terminates.
fn pick_player_action(state: &BattleState, rng: &mut StdRng) -> PlayerAction {
    let active = state.active(CombatantSlot::Player);
    let usable: Vec<usize> = active
        .moves
        .iter()
        .enumerate()
        .filter(|(_, slot)| slot.pp > 0)
        .map(|(index, _)| index)
        .collect();

    match usable.as_slice() {
        [] => PlayerAction::Run,
        moves => PlayerAction::UseMove {
            move_index: moves[rng.random_range(0..moves.len())],
        },
    }
}

fn render(script: &EventBus, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(script.events())?);
        return Ok(());
    }

    for event in script.events() {
        match event {
            BattleEvent::Message { text } => println!("{}", text),
            BattleEvent::HpChanged { slot, hp_fraction } => {
                println!("  [{:?} HP bar: {:.0}%]", slot, hp_fraction * 100.0)
            }
            BattleEvent::StatusChanged { slot, status } => {
                println!("  [{:?} status: {}]", slot, status.as_deref().unwrap_or("-"))
            }
            BattleEvent::Fainted { slot } => println!("  [{:?} fainted]", slot),
            BattleEvent::RequestSwitch { forced_by } => {
                println!("  [{:?} must send out a new creature]", forced_by)
            }
            BattleEvent::BattleEnded { won } => {
                println!("  [battle over, won: {}]", won)
            }
        }
    }
    Ok(())
}
