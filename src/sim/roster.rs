//! Team activation: which player each side is controlling
//!
//! Normally exactly one player per team is active. [`direct_select`] is a
//! debug affordance that deliberately breaks this (it can leave a team with
//! no active player until that team cycles again).

use super::player::{Player, Team};

/// Roster indices of a team's players, in roster order
pub fn team_indices(players: &[Player], team: Team) -> Vec<usize> {
    players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.team == team)
        .map(|(i, _)| i)
        .collect()
}

/// Roster index of the team's first active player
pub fn active_player(players: &[Player], team: Team) -> Option<usize> {
    players.iter().position(|p| p.team == team && p.active)
}

/// True when every team has exactly one active player
pub fn activation_invariant_holds(players: &[Player]) -> bool {
    Team::ALL
        .iter()
        .all(|&team| players.iter().filter(|p| p.team == team && p.active).count() == 1)
}

/// Move control to the next player of `team`, wrapping around.
///
/// With no active player the team's first player is activated. Returns the
/// newly active roster index.
pub fn cycle(players: &mut [Player], team: Team) -> Option<usize> {
    let members = team_indices(players, team);
    if members.is_empty() {
        return None;
    }

    let current = members.iter().position(|&i| players[i].active);
    if let Some(slot) = current {
        players[members[slot]].active = false;
    }
    let next = current.map_or(0, |slot| (slot + 1) % members.len());
    let index = members[next];
    players[index].active = true;

    log::debug!("{} now controls player {}", team, index);
    Some(index)
}

/// Debug: deactivate everyone, then activate only `index`
///
/// Out-of-range indices are ignored.
pub fn direct_select(players: &mut [Player], index: usize) -> bool {
    if index >= players.len() {
        log::warn!("DirectSelect({index}) ignored: roster has {} players", players.len());
        return false;
    }
    for (i, p) in players.iter_mut().enumerate() {
        p.active = i == index;
    }
    log::debug!("Direct-selected player {index}");
    true
}

pub fn set_ai(players: &mut [Player], index: usize, ai: bool) -> bool {
    match players.get_mut(index) {
        Some(p) => {
            p.ai = ai;
            log::debug!("Player {index} AI: {ai}");
            true
        }
        None => {
            log::warn!("SetAi({index}) ignored: roster has {} players", players.len());
            false
        }
    }
}

pub fn toggle_ai(players: &mut [Player], index: usize) -> bool {
    match players.get(index).map(|p| p.ai) {
        Some(ai) => set_ai(players, index, !ai),
        None => {
            log::warn!("ToggleAi({index}) ignored: roster has {} players", players.len());
            false
        }
    }
}
