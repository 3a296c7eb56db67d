//! Self-playing demo: runs a starter roster up the tower with a simple
//! policy and prints the battle narration plus the final run summary.

use monster_tower::battle::engine::BattleSession;
use monster_tower::prefab::{demo_catalog, starter_roster, MemoryRosterStore, MemorySummarySink};
use monster_tower::{BattleOutcome, BattlePhase, BattleRng, FloorResult, RunOrchestrator, RunState};

const MAX_FLOORS: u32 = 15;
const PLAYER_ID: &str = "demo-player";

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok());
    let rng = match seed {
        Some(seed) => BattleRng::seeded(seed),
        None => BattleRng::new_random(),
    };

    let catalog = demo_catalog();
    let mut store = MemoryRosterStore::seed(PLAYER_ID, starter_roster());
    let mut sink = MemorySummarySink::default();

    let mut run = match RunOrchestrator::start_run(&catalog, &mut store, &mut sink, PLAYER_ID, rng)
    {
        Ok(run) => run,
        Err(err) => {
            eprintln!("could not start run: {}", err);
            std::process::exit(1);
        }
    };

    while run.state() == RunState::Active && run.current_floor() <= MAX_FLOORS {
        let mut session = match run.begin_floor() {
            Ok(session) => session,
            Err(err) => {
                eprintln!("could not begin floor: {}", err);
                break;
            }
        };
        if let Some(biome) = run.current_biome() {
            println!("== Floor {} ({}) ==", session.floor(), biome.name);
        }

        if let Err(err) = play_battle(&mut session) {
            eprintln!("battle aborted: {}", err);
            break;
        }

        for line in session.narration() {
            println!("  {}", line);
        }

        match run.finish_floor(session) {
            Ok(FloorResult::Continue) => {}
            Ok(FloorResult::Finished(outcome)) => {
                println!("Run over: {:?}", outcome);
                break;
            }
            Err(err) => {
                eprintln!("could not finish floor: {}", err);
                break;
            }
        }
    }

    for warning in run.warnings() {
        eprintln!("warning: {}", warning);
    }

    if let Some(summary) = sink.summaries.last() {
        match serde_json::to_string_pretty(summary) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("could not serialize summary: {}", err),
        }
    } else {
        println!(
            "Cleared {} floors without a recorded ending.",
            MAX_FLOORS
        );
    }
}

/// Drive one battle with a blunt policy: always the first usable move, and
/// grab any capture with at least even odds.
fn play_battle(session: &mut BattleSession) -> Result<(), monster_tower::EngineError> {
    session.advance_intro()?;

    // hard cap so a stalemate cannot spin forever
    for _ in 0..200 {
        match session.phase() {
            BattlePhase::Battle => {
                let index = session
                    .active()
                    .moves
                    .iter()
                    .position(|slot| slot.pp > 0);
                match index {
                    Some(index) => session.select_move(index)?,
                    // everything is out of uses; running is the only play
                    None => {
                        session.attempt_flee()?;
                    }
                }
            }
            BattlePhase::Victory => {
                if session.capture_chance() >= 50 {
                    session.attempt_capture()?;
                    if session.outcome() != Some(BattleOutcome::Captured) {
                        session.continue_without_capture()?;
                    }
                } else {
                    session.continue_without_capture()?;
                }
            }
            _ => break,
        }
        if session.is_over() {
            break;
        }
    }
    Ok(())
}
