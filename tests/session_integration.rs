use std::collections::HashSet;

use hunger::{
    Direction, GameConfig, GameEvent, GameSession, GridPosition, Key, SessionState,
};

// Constant speed of 10 cells/s, so update(0.1) is exactly one step
fn stepping_config(width: u32, height: u32) -> GameConfig {
    GameConfig {
        grid_width: width,
        grid_height: height,
        base_speed: 10.0,
        max_speed: 10.0,
        speed_gain: 0.0,
        consumable_count: 0,
        rng_seed: Some(1234),
        ..GameConfig::default()
    }
}

const TICK: f32 = 0.1;

fn count(events: &[GameEvent], wanted: &GameEvent) -> usize {
    events.iter().filter(|e| *e == wanted).count()
}

#[test]
fn new_session_starts_at_center() {
    let config = GameConfig {
        rng_seed: Some(9),
        ..GameConfig::default()
    };
    let session = GameSession::new(config).unwrap();

    assert_eq!(session.state(), SessionState::Playing);
    assert_eq!(session.player().position(), session.grid().center());
    assert_eq!(session.consumables().len(), 5);
    assert_eq!(session.grid().occupied_count(), 0);
    assert!(session.player().head().is_none());
}

#[test]
fn invalid_config_is_rejected() {
    let config = GameConfig {
        trail_length: 0,
        ..GameConfig::default()
    };
    assert!(GameSession::new(config).is_err());
}

#[test]
fn eating_a_consumable_replaces_it() {
    let mut session = GameSession::new(stepping_config(10, 10)).unwrap();
    session.place_player(GridPosition::new(5, 5), Direction::Right);
    let food = session.place_consumable(GridPosition::new(6, 5), 1.0);

    session.update(TICK);

    assert_eq!(session.player().position(), GridPosition::new(6, 5));
    assert_eq!(count(session.last_events(), &GameEvent::ConsumableDestroyed), 1);
    assert_eq!(session.score(), 1);
    assert_eq!(session.consumables().len(), 1);
    assert!(!session.consumables().contains_key(food));
}

#[test]
fn moving_off_the_left_edge_wraps() {
    let mut session = GameSession::new(stepping_config(10, 10)).unwrap();
    session.place_player(GridPosition::new(0, 5), Direction::Left);

    session.update(TICK);

    assert_eq!(session.player().position(), GridPosition::new(9, 5));
    assert!(!session.grid().is_empty(GridPosition::new(9, 5)));
}

#[test]
fn self_collision_ends_the_round_once() {
    let mut session = GameSession::new(stepping_config(10, 10)).unwrap();
    session.place_player(GridPosition::new(5, 5), Direction::Right);

    // Right, then three right turns: (6,5) (6,6) (5,6) (5,5)
    session.update(TICK);
    for _ in 0..3 {
        session.handle_key(Key::Right);
        session.update(TICK);
        assert_eq!(session.state(), SessionState::Playing);
    }
    assert_eq!(session.player().position(), GridPosition::new(5, 5));

    // Turning right again points back at (6,5), which is still on the trail
    session.handle_key(Key::Right);
    session.update(TICK);

    assert_eq!(session.state(), SessionState::GameOver);
    assert_eq!(count(session.last_events(), &GameEvent::GameOver), 1);
    assert_eq!(session.player().position(), GridPosition::new(5, 5));

    let occupied = session.grid().occupied_count();
    for _ in 0..10 {
        session.update(TICK);
        assert!(session.last_events().is_empty());
    }
    assert_eq!(session.player().position(), GridPosition::new(5, 5));
    assert_eq!(session.grid().occupied_count(), occupied);
}

#[test]
fn restart_key_starts_a_fresh_round() {
    let mut session = GameSession::new(stepping_config(10, 10)).unwrap();
    session.place_player(GridPosition::new(5, 5), Direction::Up);
    for _ in 0..4 {
        session.update(TICK);
    }
    assert_eq!(session.grid().occupied_count(), 4);

    session.handle_key(Key::Restart);
    session.update(TICK);

    assert_eq!(session.restarts(), 1);
    assert_eq!(session.state(), SessionState::Playing);
    assert_eq!(session.grid().occupied_count(), 0);
    assert_eq!(session.player().position(), session.grid().center());
    assert_eq!(session.score(), 0);
}

// Drive the player into its own trail: (6,5) (6,6) (5,6) (5,5), then back at (6,5)
fn crash(session: &mut GameSession) {
    session.place_player(GridPosition::new(5, 5), Direction::Right);
    session.update(TICK);
    for _ in 0..4 {
        session.handle_key(Key::Right);
        session.update(TICK);
    }
    assert_eq!(session.state(), SessionState::GameOver);
}

#[test]
fn start_game_event_restarts() {
    let mut session = GameSession::new(stepping_config(10, 10)).unwrap();
    session.place_player(GridPosition::new(2, 2), Direction::Down);
    session.update(TICK);

    session.broadcast(GameEvent::StartGame);
    session.update(TICK);

    assert_eq!(session.restarts(), 1);
    assert_eq!(session.grid().occupied_count(), 0);
    assert_eq!(session.player().position(), session.grid().center());
}

#[test]
fn restart_after_game_over_resumes_play() {
    let mut session = GameSession::new(stepping_config(10, 10)).unwrap();
    crash(&mut session);

    session.handle_key(Key::Restart);
    session.update(TICK);

    assert_eq!(session.state(), SessionState::Playing);
    assert_eq!(session.restarts(), 1);
    assert_eq!(session.grid().occupied_count(), 0);

    // The fresh player moves again
    session.update(TICK);
    assert_eq!(session.last_steps(), 1);
    assert_eq!(session.grid().occupied_count(), 1);
}

#[test]
fn restart_requests_in_one_frame_collapse() {
    let config = GameConfig {
        consumable_count: 2,
        ..stepping_config(10, 10)
    };
    let mut session = GameSession::new(config).unwrap();
    crash(&mut session);

    session.broadcast(GameEvent::StartGame);
    session.broadcast(GameEvent::StartGame);
    session.handle_key(Key::Restart);
    session.update(TICK);

    assert_eq!(session.restarts(), 1);
    assert_eq!(session.state(), SessionState::Playing);
    assert_eq!(session.grid().occupied_count(), 0);
    assert_eq!(session.consumables().len(), 2);
}

#[test]
fn commands_behind_a_restart_are_dropped() {
    let config = GameConfig {
        consumable_count: 2,
        ..stepping_config(10, 10)
    };
    let mut session = GameSession::new(config).unwrap();
    session.place_player(GridPosition::new(5, 5), Direction::Right);
    session.place_consumable(GridPosition::new(6, 5), 1.0);

    // The restart is queued before the player eats, so the removal and
    // respawn land behind it in the same frame
    session.broadcast(GameEvent::StartGame);
    session.update(TICK);

    assert!(count(session.last_events(), &GameEvent::ConsumableDestroyed) >= 1);
    assert_eq!(session.restarts(), 1);
    assert_eq!(session.consumables().len(), 2);
    assert_eq!(session.score(), 0);
    assert_eq!(session.grid().occupied_count(), 0);
}

#[test]
fn quit_event_raises_the_flag() {
    let mut session = GameSession::new(stepping_config(10, 10)).unwrap();
    assert!(!session.quit_requested());

    session.broadcast(GameEvent::QuitGame);
    session.update(TICK);

    assert!(session.quit_requested());
}

#[test]
fn escape_key_requests_quit() {
    let mut session = GameSession::new(stepping_config(10, 10)).unwrap();
    session.handle_key(Key::Escape);
    session.update(TICK);
    assert!(session.quit_requested());
}

#[test]
fn stalled_frame_is_skipped() {
    let mut session = GameSession::new(stepping_config(10, 10)).unwrap();
    let start = session.player().position();

    session.update(2.0);

    assert_eq!(session.last_steps(), 0);
    assert_eq!(session.player().position(), start);
}

#[test]
fn occupancy_matches_trail_over_a_long_run() {
    let config = GameConfig {
        trail_length: 5,
        ..stepping_config(20, 20)
    };
    let mut session = GameSession::new(config).unwrap();
    session.place_player(GridPosition::new(3, 3), Direction::Right);

    for frame in 0..200 {
        // A wide square path keeps clear of the five cell trail
        if frame % 8 == 7 {
            session.handle_key(Key::Left);
        }
        session.update(TICK);
        assert_eq!(session.state(), SessionState::Playing);

        let trail: HashSet<_> = session.player().trail().cells().collect();
        let occupied: HashSet<_> = session.grid().occupied_cells().collect();
        assert_eq!(trail, occupied);
        assert!(session.player().trail().len() <= 5);
    }
    assert_eq!(session.player().trail().len(), 5);
    assert_eq!(session.player().steps(), 200);
}

#[test]
fn consumable_count_is_steady() {
    let config = GameConfig {
        consumable_count: 5,
        trail_length: 10,
        ..stepping_config(30, 30)
    };
    let mut session = GameSession::new(config).unwrap();
    session.place_player(GridPosition::new(0, 10), Direction::Right);

    let mut eaten = 0;
    for _ in 0..300 {
        session.update(TICK);
        eaten += count(session.last_events(), &GameEvent::ConsumableDestroyed);
        assert_eq!(session.consumables().len(), 5);
    }
    assert_eq!(session.score() as usize, eaten);
}

#[test]
fn reconfigure_applies_new_dimensions() {
    let mut session = GameSession::new(stepping_config(10, 10)).unwrap();
    let bigger = GameConfig {
        consumable_count: 3,
        ..stepping_config(40, 20)
    };

    session.reconfigure(bigger).unwrap();

    assert_eq!(session.grid().width(), 40);
    assert_eq!(session.grid().height(), 20);
    assert_eq!(session.consumables().len(), 3);
    assert_eq!(session.restarts(), 1);
}

#[test]
fn rejected_reconfigure_keeps_the_round() {
    let mut session = GameSession::new(stepping_config(10, 10)).unwrap();
    session.place_player(GridPosition::new(2, 2), Direction::Down);
    session.update(TICK);

    let broken = GameConfig {
        grid_width: 1,
        ..stepping_config(10, 10)
    };
    assert!(session.reconfigure(broken).is_err());

    assert_eq!(session.grid().width(), 10);
    assert_eq!(session.player().position(), GridPosition::new(2, 3));
    assert_eq!(session.restarts(), 0);
}

#[test]
fn json_config_drives_a_session() {
    let config = GameConfig::from_json_str(
        r#"{ "grid_width": 12, "grid_height": 8, "consumable_count": 2, "rng_seed": 5 }"#,
    )
    .unwrap();
    let session = GameSession::new(config).unwrap();

    assert_eq!(session.grid().width(), 12);
    assert_eq!(session.grid().height(), 8);
    assert_eq!(session.consumables().len(), 2);
}
