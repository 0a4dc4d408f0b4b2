//! Fixed-delay simulation tick
//!
//! Each tick moves every throw, wraps the ones that left the screen, then
//! scans all pairs for collisions and applies the judge's verdicts.

use super::collision::{keep_in_bounds, sign_anchor, throws_overlap};
use super::judge::{Judge, Outcome};
use super::kind::explanation;
use super::state::{ArenaState, GameEvent, GamePhase, Sign};
use crate::consts::GROWTH_FACTOR;

/// Advance the arena by one motion tick
///
/// Returns the number of resolving collisions. Any resolving collision moves
/// the arena into the collision pause. Outside `Running` this does nothing.
pub fn tick(state: &mut ArenaState, judge: &Judge) -> usize {
    if state.phase != GamePhase::Running {
        return 0;
    }

    state.time_ticks += 1;

    move_throws(state);
    keep_throws_in_bounds(state);
    let resolved = react_to_collisions(state, judge);

    if resolved > 0 {
        state.phase = GamePhase::CollisionPaused;
    }
    resolved
}

/// Collision pause is over: clear announcements and resume motion
pub fn end_collision_pause(state: &mut ArenaState) {
    if state.phase != GamePhase::CollisionPaused {
        return;
    }
    state.signs.clear();
    state.phase = GamePhase::Running;
}

/// The no-collision countdown ran out: halt for good and say so once
pub fn end_game(state: &mut ArenaState) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.phase = GamePhase::Ended;
    let center = state.screen_center();
    state.signs.push(Sign::end_of_game(center));
    state.events.push(GameEvent::GameOver {
        survivors: state.throws.len(),
    });
    log::info!(
        "Game over after {} ticks, {} throws left",
        state.time_ticks,
        state.throws.len()
    );
}

fn move_throws(state: &mut ArenaState) {
    for throw in &mut state.throws {
        throw.translate();
    }
}

fn keep_throws_in_bounds(state: &mut ArenaState) {
    let screen = state.screen;
    for throw in &mut state.throws {
        keep_in_bounds(throw, screen);
    }
}

/// Scan pairs (i, j), i < j, over the live order
///
/// Ties are skipped. A removed throw takes no further part in the scan; the
/// throws behind it shift down one slot and are still paired.
fn react_to_collisions(state: &mut ArenaState, judge: &Judge) -> usize {
    let mut resolved = 0;
    let mut i = 0;

    while i < state.throws.len() {
        let mut first_removed = false;
        let mut j = i + 1;

        while j < state.throws.len() {
            let (first, second) = (&state.throws[i], &state.throws[j]);
            if !throws_overlap(first, second) {
                j += 1;
                continue;
            }

            let (winner, loser) = match judge.resolve_throws(first, second) {
                Outcome::Tie => {
                    j += 1;
                    continue;
                }
                Outcome::FirstWins => (i, j),
                Outcome::SecondWins => (j, i),
            };

            resolve_collision(state, i, j, winner, loser);
            resolved += 1;

            if loser == i {
                first_removed = true;
                break;
            }
            // The throw after the loser now sits at j
        }

        if !first_removed {
            i += 1;
        }
    }

    resolved
}

/// Announce, remove the loser, grow the winner
fn resolve_collision(
    state: &mut ArenaState,
    first: usize,
    second: usize,
    winner: usize,
    loser: usize,
) {
    let center = sign_anchor(&state.throws[first], &state.throws[second]);
    let (winner_kind, loser_kind) = (state.throws[winner].kind, state.throws[loser].kind);
    let text = explanation(winner_kind, loser_kind);
    log::info!("Tick {}: {}", state.time_ticks, text);

    state.signs.push(Sign::collision(text.clone(), center));

    let removed = state.throws.remove(loser);
    let winner = if winner > loser { winner - 1 } else { winner };
    let survivor = &mut state.throws[winner];
    survivor.grow(GROWTH_FACTOR);

    state.events.push(GameEvent::Collision {
        winner: survivor.id,
        winner_kind,
        loser: removed.id,
        loser_kind,
        explanation: text,
    });
}
