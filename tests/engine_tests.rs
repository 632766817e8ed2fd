use starcade::engine::entities::{
    Bullet, Enemy, ARENA_HEIGHT, ARENA_WIDTH, GRID_ORIGIN_X, GRID_ORIGIN_Y, SHIP_SIZE,
};
use starcade::engine::{EndReason, Engine, RunConfig, RunState};

use crossterm::event::KeyCode;
use rand::rngs::StdRng;
use rand::SeedableRng;

const FIRE: KeyCode = KeyCode::Char(' ');

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn started_engine() -> Engine {
    let mut engine = Engine::new(ARENA_WIDTH, ARENA_HEIGHT);
    engine.start(RunConfig::default(), &mut seeded_rng());
    engine
}

/// A lone enemy far from any boundary, with the formation parked so only
/// the mechanism under test moves anything.
fn park_formation(engine: &mut Engine) {
    let w = engine.world_mut();
    w.enemies = vec![Enemy { x: 300.0, y: 100.0, row: 0 }];
    w.vx = 0.0;
    w.vy = 0.0;
}

// ── start ─────────────────────────────────────────────────────────────────

#[test]
fn start_builds_a_fresh_run() {
    let engine = started_engine();
    let w = engine.world();
    assert_eq!(w.enemies.len(), 20);
    assert_eq!(w.score, 0);
    assert_eq!(w.lives, 3);
    assert_eq!(w.timer, 120);
    assert_eq!(w.speed_ups, 0);
    assert!(w.player_bullets.is_empty());
    assert!(w.enemy_bullets.is_empty());
    assert_eq!(engine.state(), RunState::Running);
}

#[test]
fn start_places_ship_on_bottom_edge() {
    let engine = started_engine();
    let p = &engine.world().player;
    assert_eq!(p.y, ARENA_HEIGHT - SHIP_SIZE);
    assert!(p.x >= 0.0 && p.x <= ARENA_WIDTH - SHIP_SIZE);
    assert_eq!(p.x, p.spawn_x);
    assert_eq!(p.y, p.spawn_y);
}

#[test]
fn start_formation_drifts_diagonally_at_base_speed() {
    let engine = started_engine();
    let w = engine.world();
    assert_eq!(w.vx.abs(), 50.0);
    assert_eq!(w.vx, w.vy);
    assert_eq!(w.enemy_bullet_speed, 200.0);
}

#[test]
fn start_twice_discards_previous_run_state() {
    let mut engine = started_engine();
    engine.on_key_down(FIRE);
    {
        let w = engine.world_mut();
        w.score = 999;
        w.lives = 1;
        w.enemies.truncate(3);
        w.enemy_bullets.push(Bullet { x: 50.0, y: 50.0, vx: 0.0, vy: 200.0 });
    }
    engine.start(RunConfig::default(), &mut seeded_rng());
    let w = engine.world();
    assert_eq!(w.score, 0);
    assert_eq!(w.lives, 3);
    assert_eq!(w.enemies.len(), 20);
    assert!(w.player_bullets.is_empty());
    assert!(w.enemy_bullets.is_empty());
}

#[test]
fn grid_origin_and_rows_match_layout() {
    let engine = started_engine();
    let e = &engine.world().enemies;
    assert_eq!((e[0].x, e[0].y), (GRID_ORIGIN_X, GRID_ORIGIN_Y));
    assert_eq!(e[0].row, 0);
    assert_eq!(e[19].row, 3);
}

// ── player movement & clamping ────────────────────────────────────────────

#[test]
fn held_left_moves_and_clamps_at_arena_edge() {
    let mut engine = started_engine();
    park_formation(&mut engine);
    engine.world_mut().player.x = 7.0;
    engine.on_key_down(KeyCode::Left);
    engine.tick(&mut seeded_rng());
    assert_eq!(engine.world().player.x, 2.0);
    engine.tick(&mut seeded_rng());
    assert_eq!(engine.world().player.x, 0.0); // clamped, not -3
    engine.tick(&mut seeded_rng());
    assert_eq!(engine.world().player.x, 0.0);
}

#[test]
fn held_right_clamps_at_arena_edge() {
    let mut engine = started_engine();
    park_formation(&mut engine);
    engine.world_mut().player.x = ARENA_WIDTH - SHIP_SIZE - 3.0;
    engine.on_key_down(KeyCode::Right);
    for _ in 0..5 {
        engine.tick(&mut seeded_rng());
    }
    assert_eq!(engine.world().player.x, ARENA_WIDTH - SHIP_SIZE);
}

#[test]
fn held_up_stops_at_player_zone_boundary() {
    let mut engine = started_engine();
    park_formation(&mut engine);
    engine.on_key_down(KeyCode::Up);
    for _ in 0..60 {
        engine.tick(&mut seeded_rng());
    }
    assert_eq!(engine.world().player.y, ARENA_HEIGHT * 0.6);
}

#[test]
fn held_down_stops_at_arena_bottom() {
    let mut engine = started_engine();
    park_formation(&mut engine);
    engine.on_key_down(KeyCode::Down);
    for _ in 0..5 {
        engine.tick(&mut seeded_rng());
    }
    assert_eq!(engine.world().player.y, ARENA_HEIGHT - SHIP_SIZE);
}

#[test]
fn opposing_intents_cancel() {
    let mut engine = started_engine();
    park_formation(&mut engine);
    let x0 = engine.world().player.x;
    engine.on_key_down(KeyCode::Left);
    engine.on_key_down(KeyCode::Right);
    engine.tick(&mut seeded_rng());
    assert_eq!(engine.world().player.x, x0);
}

#[test]
fn key_up_clears_intent() {
    let mut engine = started_engine();
    park_formation(&mut engine);
    engine.world_mut().player.x = 400.0;
    engine.on_key_down(KeyCode::Left);
    engine.tick(&mut seeded_rng());
    engine.on_key_up(KeyCode::Left);
    engine.tick(&mut seeded_rng());
    assert_eq!(engine.world().player.x, 395.0); // only the first tick moved
}

#[test]
fn player_stays_in_bounds_under_arbitrary_input() {
    let mut engine = started_engine();
    let keys = [KeyCode::Left, KeyCode::Up, KeyCode::Right, KeyCode::Down];
    let mut rng = seeded_rng();
    for i in 0..200 {
        engine.on_key_down(keys[i % 4]);
        if i % 3 == 0 {
            engine.on_key_up(keys[(i + 1) % 4]);
        }
        engine.tick(&mut rng);
        if !engine.is_running() {
            break;
        }
        let p = &engine.world().player;
        assert!(p.x >= 0.0 && p.x <= ARENA_WIDTH - SHIP_SIZE);
        assert!(p.y >= ARENA_HEIGHT * 0.6 && p.y <= ARENA_HEIGHT - SHIP_SIZE);
    }
}

// ── formation bounce ──────────────────────────────────────────────────────

#[test]
fn formation_flips_and_moves_right_in_the_same_tick() {
    let mut engine = started_engine();
    {
        let w = engine.world_mut();
        w.enemies = vec![Enemy { x: 0.0, y: 100.0, row: 0 }];
        w.vx = -50.0;
        w.vy = 50.0;
    }
    engine.tick(&mut seeded_rng());
    let w = engine.world();
    assert_eq!(w.vx, 50.0);
    assert_eq!(w.enemies[0].x, 1.0); // moved with the flipped velocity
}

#[test]
fn formation_flips_at_right_edge() {
    let mut engine = started_engine();
    {
        let w = engine.world_mut();
        w.enemies = vec![Enemy { x: ARENA_WIDTH - SHIP_SIZE, y: 100.0, row: 0 }];
        w.vx = 50.0;
        w.vy = 50.0;
    }
    engine.tick(&mut seeded_rng());
    assert_eq!(engine.world().vx, -50.0);
}

#[test]
fn formation_flips_at_top_zone_bottom() {
    let mut engine = started_engine();
    let zone_bottom = ARENA_HEIGHT * 0.4;
    {
        let w = engine.world_mut();
        w.enemies = vec![Enemy { x: 300.0, y: zone_bottom - SHIP_SIZE, row: 0 }];
        w.vx = 50.0;
        w.vy = 50.0;
    }
    engine.tick(&mut seeded_rng());
    let w = engine.world();
    assert_eq!(w.vy, -50.0);
    assert!(w.enemies[0].y < zone_bottom - SHIP_SIZE);
}

#[test]
fn formation_flips_at_arena_top() {
    let mut engine = started_engine();
    {
        let w = engine.world_mut();
        w.enemies = vec![Enemy { x: 300.0, y: 0.5, row: 0 }];
        w.vx = 50.0;
        w.vy = -50.0;
    }
    engine.tick(&mut seeded_rng());
    assert_eq!(engine.world().vy, 50.0);
}

#[test]
fn formation_magnitude_is_stable_across_ticks() {
    let mut engine = started_engine();
    let mut rng = seeded_rng();
    for _ in 0..300 {
        engine.tick(&mut rng);
    }
    let w = engine.world();
    assert_eq!(w.vx.abs(), 50.0);
    assert_eq!(w.vy.abs(), 50.0);
}

// ── firing ────────────────────────────────────────────────────────────────

#[test]
fn fire_spawns_centered_straight_shot() {
    let mut engine = started_engine();
    park_formation(&mut engine);
    let p = engine.world().player.clone();
    engine.on_key_down(FIRE);
    let w = engine.world();
    assert_eq!(w.player_bullets.len(), 1);
    let b = &w.player_bullets[0];
    assert_eq!(b.x, p.x + SHIP_SIZE / 2.0 - 3.0);
    assert_eq!(b.y, p.y);
    assert_eq!(b.vx, 0.0);
    assert_eq!(b.vy, -300.0);
}

#[test]
fn fire_angles_left_when_only_left_is_held() {
    let mut engine = started_engine();
    park_formation(&mut engine);
    engine.on_key_down(KeyCode::Left);
    engine.on_key_down(FIRE);
    let b = &engine.world().player_bullets[0];
    assert!((b.vx - (-300.0 * 0.4226)).abs() < 1e-3);
    assert!((b.vy - (-300.0 * 0.9063)).abs() < 1e-3);
}

#[test]
fn fire_angles_right_when_only_right_is_held() {
    let mut engine = started_engine();
    park_formation(&mut engine);
    engine.on_key_down(KeyCode::Right);
    engine.on_key_down(FIRE);
    let b = &engine.world().player_bullets[0];
    assert!((b.vx - 300.0 * 0.4226).abs() < 1e-3);
}

#[test]
fn fire_goes_straight_when_both_sides_are_held() {
    let mut engine = started_engine();
    park_formation(&mut engine);
    engine.on_key_down(KeyCode::Left);
    engine.on_key_down(KeyCode::Right);
    engine.on_key_down(FIRE);
    let b = &engine.world().player_bullets[0];
    assert_eq!(b.vx, 0.0);
    assert_eq!(b.vy, -300.0);
}

#[test]
fn holding_fire_does_not_autorepeat() {
    let mut engine = started_engine();
    park_formation(&mut engine);
    engine.on_key_down(FIRE);
    engine.on_key_down(FIRE); // key repeat without a release
    assert_eq!(engine.world().player_bullets.len(), 1);
    engine.on_key_up(FIRE);
    engine.on_key_down(FIRE);
    assert_eq!(engine.world().player_bullets.len(), 2);
}

#[test]
fn fire_key_matches_case_insensitively() {
    let mut engine = Engine::new(ARENA_WIDTH, ARENA_HEIGHT);
    let config = RunConfig { fire_key: 'f', ..RunConfig::default() };
    engine.start(config, &mut seeded_rng());
    park_formation(&mut engine);
    engine.on_key_down(KeyCode::Char('F'));
    assert_eq!(engine.world().player_bullets.len(), 1);
    engine.on_key_down(KeyCode::Char('x'));
    assert_eq!(engine.world().player_bullets.len(), 1);
}

// ── bullet motion & culling ───────────────────────────────────────────────

#[test]
fn bullets_advance_by_velocity_over_time_divisor() {
    let mut engine = started_engine();
    park_formation(&mut engine);
    engine
        .world_mut()
        .player_bullets
        .push(Bullet { x: 400.0, y: 500.0, vx: 0.0, vy: -300.0 });
    engine
        .world_mut()
        .enemy_bullets
        .push(Bullet { x: 600.0, y: 300.0, vx: 0.0, vy: 200.0 });
    engine.tick(&mut seeded_rng());
    let w = engine.world();
    assert_eq!(w.player_bullets[0].y, 494.0); // 300 / 50 up
    assert_eq!(w.enemy_bullets[0].y, 304.0); // 200 / 50 down
}

#[test]
fn player_bullet_culled_past_top_margin() {
    let mut engine = started_engine();
    park_formation(&mut engine);
    engine
        .world_mut()
        .player_bullets
        .push(Bullet { x: 400.0, y: -5.0, vx: 0.0, vy: -300.0 });
    engine.tick(&mut seeded_rng());
    assert!(engine.world().player_bullets.is_empty());
}

#[test]
fn player_bullet_culled_past_side_margin() {
    let mut engine = started_engine();
    park_formation(&mut engine);
    engine
        .world_mut()
        .player_bullets
        .push(Bullet { x: -8.0, y: 400.0, vx: -300.0, vy: -10.0 });
    engine.tick(&mut seeded_rng());
    assert!(engine.world().player_bullets.is_empty());
}

#[test]
fn enemy_bullet_culled_past_bottom_margin() {
    let mut engine = started_engine();
    park_formation(&mut engine);
    engine
        .world_mut()
        .enemy_bullets
        .push(Bullet { x: 400.0, y: ARENA_HEIGHT + 7.0, vx: 0.0, vy: 200.0 });
    engine.tick(&mut seeded_rng());
    assert!(engine.world().enemy_bullets.is_empty());
}

// ── enemy fire gating ─────────────────────────────────────────────────────

#[test]
fn enemy_fire_waits_for_newest_bullet_to_clear_three_quarters() {
    let mut engine = started_engine();
    // Park the player far right so enemy bullets never connect.
    {
        let w = engine.world_mut();
        w.player.x = ARENA_WIDTH - SHIP_SIZE;
        w.player.spawn_x = ARENA_WIDTH - SHIP_SIZE;
        w.vx = 0.0;
        w.vy = 0.0;
    }
    let gate = ARENA_HEIGHT * 0.75;
    let mut rng = seeded_rng();
    let mut spawns = 0;
    for _ in 0..400 {
        let before_len = engine.world().enemy_bullets.len();
        let newest_y = engine.world().enemy_bullets.last().map(|b| b.y);
        engine.tick(&mut rng);
        if engine.world().enemy_bullets.len() > before_len {
            spawns += 1;
            if let Some(y) = newest_y {
                assert!(y >= gate, "shot spawned while newest bullet was at y={}", y);
            }
        }
    }
    assert!(spawns >= 1, "expected at least one enemy shot in 400 ticks");
}

#[test]
fn enemy_shot_spawns_beneath_a_live_enemy() {
    let mut engine = started_engine();
    {
        let w = engine.world_mut();
        w.enemies = vec![Enemy { x: 300.0, y: 100.0, row: 2 }];
        w.vx = 0.0;
        w.vy = 0.0;
        w.player.x = ARENA_WIDTH - SHIP_SIZE;
    }
    let mut rng = seeded_rng();
    for _ in 0..400 {
        engine.tick(&mut rng);
        if let Some(b) = engine.world().enemy_bullets.first() {
            // Spawned under the shooter's nose and falling at base speed.
            assert_eq!(b.vx, 0.0);
            assert_eq!(b.vy, 200.0);
            assert_eq!(b.x, 300.0 + SHIP_SIZE / 2.0 - 3.0);
            return;
        }
    }
    panic!("no enemy shot in 400 ticks");
}

// ── collisions ────────────────────────────────────────────────────────────

#[test]
fn shared_edge_overlap_scores_top_row() {
    let mut engine = started_engine();
    {
        let w = engine.world_mut();
        w.enemies = vec![Enemy { x: 300.0, y: 100.0, row: 0 }];
        w.vx = 0.0;
        w.vy = 0.0;
        // Bullet's right edge exactly touches the enemy's left edge.
        w.player_bullets.push(Bullet { x: 294.0, y: 100.0, vx: 0.0, vy: 0.0 });
    }
    engine.tick(&mut seeded_rng());
    let w = engine.world();
    assert_eq!(w.score, 20);
    assert!(w.enemies.is_empty());
    assert!(w.player_bullets.is_empty());
    // Clearing the grid is a win regardless of how it happened.
    assert_eq!(engine.state(), RunState::Ended(EndReason::Win));
}

#[test]
fn bottom_row_scores_five() {
    let mut engine = started_engine();
    {
        let w = engine.world_mut();
        w.enemies = vec![
            Enemy { x: 300.0, y: 100.0, row: 3 },
            Enemy { x: 500.0, y: 100.0, row: 0 },
        ];
        w.vx = 0.0;
        w.vy = 0.0;
        w.player_bullets.push(Bullet { x: 305.0, y: 105.0, vx: 0.0, vy: 0.0 });
    }
    engine.tick(&mut seeded_rng());
    let w = engine.world();
    assert_eq!(w.score, 5);
    assert_eq!(w.enemies.len(), 1);
    assert!(engine.is_running());
}

#[test]
fn one_bullet_consumes_at_most_one_enemy() {
    let mut engine = started_engine();
    {
        let w = engine.world_mut();
        // Two enemies stacked on the same spot, one bullet through both.
        w.enemies = vec![
            Enemy { x: 300.0, y: 100.0, row: 0 },
            Enemy { x: 300.0, y: 100.0, row: 0 },
        ];
        w.vx = 0.0;
        w.vy = 0.0;
        w.player_bullets.push(Bullet { x: 305.0, y: 105.0, vx: 0.0, vy: 0.0 });
    }
    engine.tick(&mut seeded_rng());
    let w = engine.world();
    assert_eq!(w.score, 20);
    assert_eq!(w.enemies.len(), 1);
}

#[test]
fn one_enemy_absorbs_at_most_one_bullet() {
    let mut engine = started_engine();
    {
        let w = engine.world_mut();
        w.enemies = vec![
            Enemy { x: 300.0, y: 100.0, row: 1 },
            Enemy { x: 600.0, y: 100.0, row: 3 },
        ];
        w.vx = 0.0;
        w.vy = 0.0;
        w.player_bullets.push(Bullet { x: 305.0, y: 105.0, vx: 0.0, vy: 0.0 });
        w.player_bullets.push(Bullet { x: 306.0, y: 105.0, vx: 0.0, vy: 0.0 });
    }
    engine.tick(&mut seeded_rng());
    let w = engine.world();
    assert_eq!(w.score, 15);
    assert_eq!(w.enemies.len(), 1);
    assert_eq!(w.player_bullets.len(), 1); // second bullet flies on
}

#[test]
fn enemy_bullet_hit_costs_a_life_and_respawns_the_ship() {
    let mut engine = started_engine();
    park_formation(&mut engine);
    engine.on_key_down(KeyCode::Left);
    let (sx, sy) = {
        let p = &engine.world().player;
        (p.spawn_x, p.spawn_y)
    };
    // Overlap the ship where it will be after this tick's move.
    let hit_x = (sx - 5.0).max(0.0) + SHIP_SIZE / 2.0;
    engine
        .world_mut()
        .enemy_bullets
        .push(Bullet { x: hit_x, y: sy + 10.0, vx: 0.0, vy: 0.0 });
    engine.tick(&mut seeded_rng());
    let w = engine.world();
    assert_eq!(w.lives, 2);
    // The hitting bullet is gone; the tick may have spawned a fresh enemy
    // shot up in the top zone, which is fine.
    assert!(!w.enemy_bullets.iter().any(|b| b.y > 500.0));
    assert_eq!(w.player.x, sx);
    assert_eq!(w.player.y, sy);
    assert!(!w.player.left);
    assert!(engine.is_running());
}

#[test]
fn last_life_ends_the_run_as_lost() {
    let mut engine = started_engine();
    park_formation(&mut engine);
    let (sx, sy) = {
        let w = engine.world_mut();
        w.lives = 1;
        (w.player.x, w.player.y)
    };
    engine
        .world_mut()
        .enemy_bullets
        .push(Bullet { x: sx + 10.0, y: sy + 10.0, vx: 0.0, vy: 0.0 });
    engine.tick(&mut seeded_rng());
    assert_eq!(engine.world().lives, 0);
    assert_eq!(engine.state(), RunState::Ended(EndReason::Lost));
    let record = engine.take_outcome().expect("run record");
    assert_eq!(record.reason, EndReason::Lost);
    assert!(engine.take_outcome().is_none()); // handed out once
}

#[test]
fn clearing_the_grid_wins_with_lives_and_time_to_spare() {
    let mut engine = started_engine();
    {
        let w = engine.world_mut();
        w.enemies = vec![Enemy { x: 300.0, y: 100.0, row: 0 }];
        w.vx = 0.0;
        w.vy = 0.0;
        w.player_bullets.push(Bullet { x: 310.0, y: 110.0, vx: 0.0, vy: 0.0 });
    }
    engine.tick(&mut seeded_rng());
    assert_eq!(engine.state(), RunState::Ended(EndReason::Win));
    let record = engine.take_outcome().expect("run record");
    assert_eq!(record.final_score, 20);
    assert_eq!(engine.world().lives, 3);
    assert!(engine.world().timer > 0);
    assert!(record.started_at <= record.ended_at);
}

// ── countdown & difficulty ────────────────────────────────────────────────

#[test]
fn time_limit_of_one_second_ends_with_reason_time() {
    let mut engine = Engine::new(ARENA_WIDTH, ARENA_HEIGHT);
    let config = RunConfig { time_limit_secs: 1, ..RunConfig::default() };
    engine.start(config, &mut seeded_rng());
    engine.countdown_tick();
    assert_eq!(engine.state(), RunState::Ended(EndReason::Time));
    let record = engine.take_outcome().expect("run record");
    assert_eq!(record.reason, EndReason::Time);
    assert_eq!(record.final_score, 0);
}

#[test]
fn timer_expiry_wins_over_remaining_enemies_and_lives() {
    let mut engine = started_engine();
    engine.world_mut().timer = 1;
    engine.countdown_tick();
    assert_eq!(engine.state(), RunState::Ended(EndReason::Time));
    assert_eq!(engine.world().enemies.len(), 20);
    assert_eq!(engine.world().lives, 3);
}

#[test]
fn every_fifth_second_speeds_the_formation_up() {
    let mut engine = started_engine();
    engine.world_mut().timer = 116;
    let vx0 = engine.world().vx;
    engine.countdown_tick(); // 115, divisible by 5
    let w = engine.world();
    assert_eq!(w.speed_ups, 1);
    assert_eq!(w.vx.abs(), 70.0);
    assert_eq!(w.vy.abs(), 70.0);
    assert_eq!(w.vx.signum(), vx0.signum());
    assert_eq!(w.enemy_bullet_speed, 220.0);
}

#[test]
fn off_cycle_seconds_do_not_escalate() {
    let mut engine = started_engine();
    engine.countdown_tick(); // 120 -> 119
    let w = engine.world();
    assert_eq!(w.speed_ups, 0);
    assert_eq!(w.vx.abs(), 50.0);
}

#[test]
fn speed_ups_cap_after_four_events() {
    let mut engine = started_engine();
    for _ in 0..30 {
        engine.countdown_tick(); // 120 -> 90, crossing 115/110/105/100/95/90
    }
    let w = engine.world();
    assert_eq!(w.speed_ups, 4);
    assert_eq!(w.vx.abs(), 130.0); // 50 + 4 * 20, then frozen
    assert_eq!(w.enemy_bullet_speed, 280.0);
}

#[test]
fn speed_up_retrofits_bullets_already_in_flight() {
    let mut engine = started_engine();
    engine
        .world_mut()
        .enemy_bullets
        .push(Bullet { x: 400.0, y: 300.0, vx: 0.0, vy: 200.0 });
    engine.world_mut().timer = 111;
    engine.countdown_tick(); // 110, speed-up fires
    assert_eq!(engine.world().enemy_bullets[0].vy, 220.0);
}

#[test]
fn speed_up_preserves_negative_velocity_direction() {
    let mut engine = started_engine();
    {
        let w = engine.world_mut();
        w.vx = -50.0;
        w.vy = -50.0;
        w.timer = 106;
    }
    engine.countdown_tick(); // 105
    let w = engine.world();
    assert_eq!(w.vx, -70.0);
    assert_eq!(w.vy, -70.0);
}

// ── terminal gating ───────────────────────────────────────────────────────

#[test]
fn inputs_before_start_are_noops() {
    let mut engine = Engine::new(ARENA_WIDTH, ARENA_HEIGHT);
    engine.on_key_down(FIRE);
    engine.on_key_down(KeyCode::Left);
    engine.tick(&mut seeded_rng());
    engine.countdown_tick();
    assert_eq!(engine.state(), RunState::Idle);
    assert!(engine.world().player_bullets.is_empty());
    assert!(!engine.world().player.left);
}

#[test]
fn ticks_after_the_run_ends_change_nothing() {
    let mut engine = started_engine();
    engine.world_mut().timer = 1;
    engine.countdown_tick();
    assert_eq!(engine.state(), RunState::Ended(EndReason::Time));
    let enemies_before = engine.world().enemies.clone();
    engine.on_key_down(FIRE);
    engine.tick(&mut seeded_rng());
    engine.countdown_tick();
    let w = engine.world();
    assert!(w.player_bullets.is_empty());
    assert_eq!(w.enemies.len(), enemies_before.len());
    assert_eq!(w.enemies[0].x, enemies_before[0].x);
    assert_eq!(engine.state(), RunState::Ended(EndReason::Time));
}

#[test]
fn cancel_discards_the_run_without_a_record() {
    let mut engine = started_engine();
    engine.cancel();
    assert_eq!(engine.state(), RunState::Idle);
    assert!(engine.take_outcome().is_none());
}

#[test]
fn hud_reflects_score_lives_and_timer() {
    let mut engine = started_engine();
    {
        let w = engine.world_mut();
        w.score = 45;
        w.lives = 2;
        w.timer = 77;
    }
    let hud = engine.hud();
    assert_eq!(hud.score, 45);
    assert_eq!(hud.lives, 2);
    assert_eq!(hud.seconds, 77);
}
