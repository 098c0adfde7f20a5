mod common;

use common::{run_until_player_turn, scheduler};
use gridcrawl::enemy::ATTACK_TRIGGER;
use gridcrawl::player::HIT_TRIGGER;
use gridcrawl::turn_log::{Mover, TurnEvent};
use gridcrawl::{Actor, AxisInput, BodyKind, Config, PickupKind, Phase, Position};

const DT: f32 = 0.05;

fn play(game: &mut gridcrawl::TurnScheduler, dx: i32, dy: i32) {
    game.tick(DT, AxisInput::new(dx, dy)).unwrap();
    run_until_player_turn(game, DT);
}

fn count_events(game: &gridcrawl::TurnScheduler, pred: impl Fn(&TurnEvent) -> bool) -> usize {
    game.turn_log().events().iter().filter(|e| pred(&e.event)).count()
}

#[test]
fn starts_on_the_players_turn() {
    let (game, probes) = scheduler("#####\n#@.e#\n#####\n", Config::default());

    assert_eq!(game.phase(), Phase::PlayerTurn);
    assert!(game.game_state().players_turn);
    assert_eq!(game.game_state().level_text(), "Day 1");
    assert_eq!(probes.text.borrow().text, "Food: 100");
    assert_eq!(game.enemies().len(), 1);
    assert!(matches!(
        game.turn_log().events()[0].event,
        TurnEvent::LevelStarted { level: 1, food: 100 }
    ));
}

#[test]
fn idle_frames_do_not_use_the_turn() {
    let (mut game, _probes) = scheduler("#####\n#@.e#\n#####\n", Config::default());

    for _ in 0..20 {
        game.tick(DT, AxisInput::default()).unwrap();
    }

    assert_eq!(game.phase(), Phase::PlayerTurn);
    assert_eq!(game.player().food(), 100);
    assert_eq!(game.turn_log().turn(), 0);
}

#[test]
fn player_move_hands_turn_to_enemies() {
    let (mut game, _probes) = scheduler("#######\n#@...e#\n#######\n", Config::default());

    game.tick(DT, AxisInput::new(1, 0)).unwrap();
    assert!(matches!(game.phase(), Phase::EnemyDelay { .. }));
    assert!(!game.game_state().players_turn);

    // Input during the enemies' turn is ignored
    game.tick(DT, AxisInput::new(1, 0)).unwrap();
    assert_eq!(game.player().food(), 99);

    run_until_player_turn(&mut game, DT);

    assert!(game.game_state().players_turn);
    assert_eq!(game.player().position(), Position::cell(2, 1));
    assert_eq!(game.enemies()[0].position(), Position::cell(4, 1));
    assert_eq!(game.turn_log().turn(), 1);
    assert_eq!(
        count_events(&game, |e| matches!(e, TurnEvent::Moved { mover: Mover::Enemy(0), .. })),
        1
    );
}

#[test]
fn enemy_moves_on_every_other_turn() {
    let (mut game, _probes) = scheduler("#########\n#@.....e#\n#########\n", Config::default());

    let mut positions = Vec::new();
    for _ in 0..4 {
        // Bump the outer wall so only the enemy changes place
        play(&mut game, -1, 0);
        positions.push(game.enemies()[0].position().x as i32);
    }

    assert_eq!(positions, vec![6, 6, 5, 5]);
    assert_eq!(game.player().food(), 96);
}

#[test]
fn adjacent_enemy_attacks_then_rests() {
    let (mut game, probes) = scheduler("#####\n#@e.#\n#####\n", Config::default());

    play(&mut game, -1, 0);
    assert_eq!(game.player().food(), 89);
    assert_eq!(probes.text.borrow().text, "-10 Food: 89");
    assert_eq!(probes.player_cues.borrow().count(HIT_TRIGGER), 1);
    assert_eq!(probes.enemy_cues.borrow().count(ATTACK_TRIGGER), 1);

    play(&mut game, -1, 0);
    assert_eq!(game.player().food(), 88);
    assert_eq!(probes.enemy_cues.borrow().count(ATTACK_TRIGGER), 1);

    play(&mut game, -1, 0);
    assert_eq!(game.player().food(), 77);
    assert_eq!(probes.player_cues.borrow().count(HIT_TRIGGER), 2);

    // The enemy never moved
    assert_eq!(game.enemies()[0].position(), Position::cell(2, 1));
    assert_eq!(
        count_events(&game, |e| matches!(e, TurnEvent::Damaged { loss: 10, .. })),
        2
    );
}

#[test]
fn walking_over_food_eats_it() {
    let (mut game, probes) = scheduler("######\n#@f..#\n######\n", Config::default());

    play(&mut game, 1, 0);

    assert_eq!(game.player().food(), 109);
    assert_eq!(probes.text.borrow().text, "+10 Food: 109");
    assert!(game
        .world()
        .colliders()
        .all(|c| c.kind != BodyKind::Pickup(PickupKind::Food) || !c.active));
    assert_eq!(
        count_events(&game, |e| matches!(e, TurnEvent::PickedUp { kind: PickupKind::Food, food: 109 })),
        1
    );
    assert_eq!(game.snapshot().to_text(), "######\n#.@..#\n######\n");
}

#[test]
fn chopped_walls_leave_the_board() {
    let mut config = Config::default();
    config.player.wall_damage = 3;
    let (mut game, _probes) = scheduler("#####\n#@w.#\n#####\n", config);

    play(&mut game, 1, 0);

    assert_eq!(game.player().position(), Position::cell(1, 1));
    assert_eq!(game.snapshot().to_text(), "#####\n#@..#\n#####\n");
    assert_eq!(
        count_events(&game, |e| matches!(e, TurnEvent::Blocked { mover: Mover::Player, by: BodyKind::Wall, .. })),
        1
    );
}

#[test]
fn exit_reloads_the_level_with_food_carried() {
    let (mut game, probes) = scheduler("#####\n#@E.#\n#####\n", Config::default());

    game.tick(DT, AxisInput::new(1, 0)).unwrap();
    game.tick(DT, AxisInput::default()).unwrap();
    assert!(matches!(game.phase(), Phase::Restarting { .. }));
    assert!(!game.player().is_enabled());

    run_until_player_turn(&mut game, DT);

    let state = game.game_state();
    assert_eq!(state.level, 2);
    assert_eq!(state.level_text(), "Day 2");
    assert_eq!(state.player_food_points, 99);
    assert!(state.players_turn);
    drop(state);

    assert!(game.player().is_enabled());
    assert_eq!(game.player().food(), 99);
    assert_eq!(game.player().position(), Position::cell(1, 1));
    assert_eq!(probes.text.borrow().text, "Food: 99");
    assert_eq!(
        count_events(&game, |e| matches!(e, TurnEvent::LevelStarted { .. })),
        2
    );
}

#[test]
fn running_out_of_food_ends_the_game() {
    let mut config = Config::default();
    config.player.starting_food = 1;
    let (mut game, probes) = scheduler("#####\n#@.e#\n#####\n", config);

    game.tick(DT, AxisInput::new(1, 0)).unwrap();

    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.game_state().level_text(), "After 1 days, you starved.");
    assert!(!probes.audio.borrow().is_music_playing());
    assert!(matches!(
        game.turn_log().events().last().map(|e| &e.event),
        Some(TurnEvent::GameOver { level: 1, food: 0 })
    ));

    // Nothing moves once the game is over
    for _ in 0..20 {
        game.tick(DT, AxisInput::new(1, 0)).unwrap();
    }
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.player().food(), 0);
    assert_eq!(game.enemies()[0].position(), Position::cell(3, 1));
}

#[test]
fn enemy_attack_can_end_the_game() {
    let mut config = Config::default();
    config.player.starting_food = 5;
    let (mut game, probes) = scheduler("#####\n#@e.#\n#####\n", config);

    game.tick(DT, AxisInput::new(-1, 0)).unwrap();
    run_until_player_turn(&mut game, DT);

    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.player().food(), -6);
    assert_eq!(probes.text.borrow().text, "-10 Food: -6");
    assert_eq!(probes.audio.borrow().last_clip(), Some("die"));
}

#[test]
fn out_of_range_move_duration_still_completes_turns() {
    let mut config = Config::default();
    config.motion.move_duration = -0.1;
    let (mut game, _probes) = scheduler("######\n#@..e#\n######\n", config);

    play(&mut game, 1, 0);

    assert_eq!(game.phase(), Phase::PlayerTurn);
    assert!(!game.player().motion().is_sliding());
    assert_eq!(game.player().position(), Position::cell(2, 1));
    assert_eq!(game.enemies()[0].position(), Position::cell(3, 1));
}
