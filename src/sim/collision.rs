//! Contact classification and response
//!
//! Detection belongs to the physics engine; this only decides what a
//! contact-begin event means. A goal contact scores. Anything else ends the run.

use serde::{Deserialize, Serialize};

use super::state::{ButtonState, ColliderTag, Contact, GameEvent, SceneNode, Simulation};

/// What a contact did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactOutcome {
    Scored,
    GameOver,
    /// Lethal contact after the run already ended
    Ignored,
}

/// Dispatch a contact-begin event.
///
/// The goal branch runs regardless of run state; only the lethal branch is
/// gated, so a second crash never replays the death sequence.
///
/// # Panics
/// If neither body is the hero. Only the hero is dynamic, so such a contact
/// means the host wired its physics callbacks wrong.
pub fn handle_contact(state: &mut Simulation, contact: &Contact) -> ContactOutcome {
    assert!(
        contact.involves(state.hero.id),
        "contact {contact:?} does not involve the hero {:?}",
        state.hero.id
    );

    if contact.has_tag(ColliderTag::Goal) {
        state.score.increment(&mut state.events);
        log::debug!("Goal passed, score {}", state.score.points());
        return ContactOutcome::Scored;
    }

    if !state.run_state.end() {
        return ContactOutcome::Ignored;
    }

    state.hero.on_game_over(&state.tuning);
    state.set_restart_button(ButtonState::Active);
    for node in SceneNode::TOP_LEVEL {
        state.events.push(GameEvent::Shake(node));
    }

    let score = state.score.points();
    state.events.push(GameEvent::GameOver { score });
    log::info!(
        "Game over after {} steps, score {}",
        state.time_ticks,
        score
    );
    ContactOutcome::GameOver
}
