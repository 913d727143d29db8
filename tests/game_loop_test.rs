//! End-to-end session flow through the public API

use flappy_loop::consts::{BEST_SCORE_KEY, SIM_DT};
use flappy_loop::{
    CollisionKind, GameEvent, GameLoop, GamePhase, MemoryStore, ScoreStore, TickInput, Tuning,
};

const IDLE: TickInput = TickInput {
    activate_held: false,
    autopilot: false,
};

#[test]
fn test_full_session_round_trip() {
    let tuning = Tuning::default();
    let mut game = GameLoop::new(tuning.clone(), MemoryStore::new(), 2024).unwrap();
    assert_eq!(game.phase(), GamePhase::Ready);

    game.activate();
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.score(), 0);

    // Run until pair 0 wraps around; the bird passed its center on the way
    let mut frames = 0;
    let mut last_x = game.state().pipes[0].x;
    loop {
        game.tick(SIM_DT, &IDLE);
        frames += 1;
        let x = game.state().pipes[0].x;
        if x > last_x {
            break;
        }
        last_x = x;
        assert!(frames < 1_000, "pair 0 never recycled");
    }
    assert_eq!(game.score(), 1);
    assert_eq!(game.state().pipes.len(), 3);

    game.on_collision(CollisionKind::Obstacle);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.store().get(BEST_SCORE_KEY).unwrap(), Some(1));
    assert_eq!(game.best(), 1);

    for _ in 0..40 {
        game.tick(SIM_DT, &IDLE);
    }
    assert!(game.restart_allowed());

    game.activate();
    assert_eq!(game.phase(), GamePhase::Ready);
    assert_eq!(game.score(), 0);
    assert_eq!(game.state().player.pos, tuning.bird_start());
    assert!(!game.state().player.gravity_enabled);
}

#[test]
fn test_best_score_survives_new_controller() {
    let mut game = GameLoop::new(Tuning::default(), MemoryStore::new(), 1).unwrap();
    game.activate();
    for _ in 0..220 {
        game.tick(SIM_DT, &IDLE);
    }
    assert_eq!(game.score(), 1);
    game.on_collision(CollisionKind::Ground);

    // Same store, new session: best is visible before the first crash
    let store = game.into_store();
    let mut next = GameLoop::new(Tuning::default(), store, 2).unwrap();
    assert_eq!(next.best(), 1);

    // A worse run keeps the old best
    next.activate();
    next.on_collision(CollisionKind::Ground);
    assert_eq!(next.best(), 1);
    assert_eq!(next.store().get(BEST_SCORE_KEY).unwrap(), Some(1));
    assert_eq!(next.store().writes(), 2);
}

#[test]
fn test_autopilot_session_with_built_in_collisions() {
    let tuning = Tuning {
        detect_collisions: true,
        ..Default::default()
    };
    let mut game = GameLoop::new(tuning, MemoryStore::new(), 77).unwrap();
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let mut saw_start = false;
    for _ in 0..600 {
        game.tick(SIM_DT, &input);
        for event in game.drain_events() {
            if event == GameEvent::Start {
                saw_start = true;
            }
        }
        assert!(game.state().player.angle <= 90.0);
    }
    assert!(saw_start);
    assert_eq!(game.state().pipes.len(), 3);
}
