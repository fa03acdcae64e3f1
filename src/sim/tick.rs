//! Fixed timestep simulation tick
//!
//! One logical step per rendered frame. The run-state check at the top of
//! `update` is the only gate: the hero, scroller and spawner step functions
//! themselves are unconditional.

use super::state::{GameEvent, Simulation};

/// Input gathered for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Primary input began (tap / click / key)
    pub touch: bool,
}

/// Primary input began
pub fn touch_began(state: &mut Simulation) {
    if !state.run_state.is_active() {
        return;
    }
    state.hero.apply_flap_impulse(&state.tuning);
    state.events.push(GameEvent::Flapped);
}

/// Advance the run by one fixed step
pub fn update(state: &mut Simulation) {
    if !state.run_state.is_active() {
        return;
    }

    let dt = state.tuning.fixed_dt;
    state.time_ticks += 1;

    // Clamp pass before any world translation
    state.hero.fixed_step(dt, &state.tuning);

    state.scroller
        .fixed_step(dt, state.tuning.scroll_speed, &mut state.events);
    state.spawner.fixed_step(
        dt,
        &state.tuning,
        &mut state.rng,
        &mut state.ids,
        &mut state.events,
    );
}

/// Deliver this frame's input, then step
pub fn tick(state: &mut Simulation, input: &TickInput) {
    if input.touch {
        touch_began(state);
    }
    update(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::collision::handle_contact;
    use crate::sim::state::{Body, ColliderTag, Contact, EntityId, RunState};
    use crate::sim::test_support::new_sim;

    fn crash(state: &mut Simulation) {
        let contact = Contact {
            a: Body {
                id: state.hero.id,
                tag: None,
            },
            b: Body {
                id: EntityId(999),
                tag: Some(ColliderTag::Ground),
            },
        };
        handle_contact(state, &contact);
    }

    #[test]
    fn test_first_spawn_after_interval() {
        let mut state = new_sim(12345);
        let input = TickInput::default();

        let mut first_spawn = None;
        for step in 1..=95 {
            tick(&mut state, &input);
            let spawned = state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::ObstacleSpawned(_)));
            if spawned && first_spawn.is_none() {
                first_spawn = Some(step);
                assert_eq!(state.spawner.spawn_timer, 0.0);
            }

            // nose-dive assist engages once 0.2s have passed without input
            if step >= 14 {
                assert_eq!(state.hero.body.angular_velocity, MIN_ANGULAR_VEL);
            }
            assert!(state.hero.rotation >= state.tuning.min_rotation());
            assert!(state.hero.rotation <= state.tuning.max_rotation());
        }

        let step = first_spawn.expect("no obstacle spawned");
        assert!((90..=91).contains(&step), "first spawn at step {step}");
        assert_eq!(state.spawner.obstacles.len(), 1);
        assert_eq!(state.run_state, RunState::Active);
        assert_eq!(state.score.points(), 0);
    }

    #[test]
    fn test_touch_flaps_only_while_active() {
        let mut state = new_sim(1);
        state.drain_events();

        tick(&mut state, &TickInput { touch: true });
        assert_eq!(state.hero.body.velocity.y, MAX_RISE_SPEED);
        assert!(state.drain_events().contains(&GameEvent::Flapped));

        crash(&mut state);
        state.hero.body.velocity.y = -50.0;
        tick(&mut state, &TickInput { touch: true });
        assert_eq!(state.hero.body.velocity.y, -50.0);
        assert!(!state.drain_events().contains(&GameEvent::Flapped));
    }

    #[test]
    fn test_world_freezes_after_game_over() {
        let mut state = new_sim(1);
        for _ in 0..100 {
            tick(&mut state, &TickInput::default());
        }
        crash(&mut state);

        let scroll = state.scroller.layer;
        let obstacles = state.spawner.layer;
        let timer = state.spawner.spawn_timer;
        let ticks = state.time_ticks;
        let since_touch = state.hero.since_touch;

        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
        }

        assert_eq!(state.scroller.layer, scroll);
        assert_eq!(state.spawner.layer, obstacles);
        assert_eq!(state.spawner.spawn_timer, timer);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.hero.since_touch, since_touch);
    }

    #[test]
    fn test_layers_move_together() {
        let mut state = new_sim(9);
        for _ in 0..500 {
            tick(&mut state, &TickInput::default());
            assert_eq!(
                state.scroller.layer.position.x,
                state.spawner.layer.position.x
            );
        }
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_sim(99999);
        let mut state2 = new_sim(99999);

        for i in 0..600 {
            let input = TickInput { touch: i % 25 == 0 };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.spawner.obstacles, state2.spawner.obstacles);
        assert_eq!(state1.hero.body, state2.hero.body);
    }
}
