//! End-to-end tests driving battles and full matches through the public API.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use robobattle::game::{
    BattleAction, BattleOutcome, BattleSession, BattleStatus, Catalog, CombatRules, EquipmentId,
    Loadout, Robot, RoundStep, Side,
};
use robobattle::{
    BattleMode, GameRng, InputEvent, Match, MatchConfig, Phase, ScriptedRng, SelectionStep,
};

fn catalog() -> Catalog {
    Catalog::builtin().unwrap()
}

fn enemy_with(loadout: &Loadout) -> Robot {
    let mut enemy = Robot::enemy();
    enemy.apply_loadout(&catalog(), loadout);
    enemy
}

/// Bare player against a Gun-only enemy, every draw 0.5: no miss, no
/// evasion, no critical, zero offset.
#[test]
fn test_first_round_gun_enemy() {
    let enemy = enemy_with(&Loadout {
        weapon: Some(EquipmentId::Gun),
        ..Loadout::default()
    });
    assert_eq!(enemy.attack, 33);
    assert_eq!(enemy.speed, 2);

    let mut session = BattleSession::new(Robot::player(), enemy, 12, CombatRules::default());
    let mut rng = ScriptedRng::new([0.5]);
    let step = session.play_round(BattleAction::Attack, &mut rng);

    assert_eq!(
        step,
        RoundStep::Resolved {
            round: 1,
            first: Side::Player,
            both_acted: true,
        }
    );
    assert_eq!(session.enemy().hp, 88);
    assert_eq!(session.player().hp, 77);
    let log: Vec<&str> = session.log().entries().collect();
    assert_eq!(
        log,
        [
            "Turn 1: PlayerBot attacks EnemyBot for 12 damage.",
            "Turn 1: EnemyBot attacks PlayerBot for 23 damage.",
        ]
    );
    assert_eq!(rng.consumed(), 8);
}

/// The standard enemy loadout out-armors a bare player entirely.
#[test]
fn test_first_round_full_enemy_loadout() {
    let enemy = enemy_with(&MatchConfig::default().enemy_loadout);
    assert_eq!(enemy.attack, 33);
    assert_eq!(enemy.defense, 28);

    let mut session = BattleSession::new(Robot::player(), enemy, 12, CombatRules::default());
    session.play_round(BattleAction::Attack, &mut ScriptedRng::new([0.5]));

    assert_eq!(session.enemy().hp, 100);
    assert_eq!(session.player().hp, 77);
    assert_eq!(
        session.log().entries().next(),
        Some("Turn 1: PlayerBot attacks EnemyBot for 0 damage.")
    );
}

#[test]
fn test_repeated_title_confirm_selects_once() {
    let mut game = Match::seeded(catalog(), MatchConfig::default(), 3);
    game.apply_frame(&[InputEvent::Confirm; 8]);
    assert_eq!(game.phase(), Phase::EquipmentSelection);
    assert_eq!(game.session().player().equipment, Loadout::default());
}

#[test]
fn test_log_stays_bounded_over_long_battle() {
    let mut player = Robot::player();
    let mut enemy = Robot::enemy();
    player.defense = 1_000;
    enemy.defense = 1_000;

    let mut session = BattleSession::new(player, enemy, 12, CombatRules::default());
    let mut rng = GameRng::from_seed(11);
    assert_eq!(session.run_to_end(&mut rng, 200), None);
    assert_eq!(session.log().len(), 12);
    assert_eq!(session.status(), BattleStatus::InProgress);
    assert_eq!(session.rounds_played(), 200);
    assert!(session.log().last().unwrap().starts_with("Turn 200: "));
}

/// Sword/Shield/Boots player against the standard enemy: 2 damage dealt and
/// 13 taken per round, so the player is down after the eighth round.
#[test]
fn test_timed_match_lifecycle() {
    let mut game = Match::new(catalog(), MatchConfig::default(), ScriptedRng::new([0.5]));

    game.apply_input(InputEvent::Confirm);
    for _ in 0..3 {
        game.apply_input(InputEvent::Confirm);
    }
    assert_eq!(game.selection_step(), SelectionStep::Ready);
    assert_eq!(
        game.session().player().equipment,
        Loadout::new(EquipmentId::Sword, EquipmentId::Shield, EquipmentId::Boots)
    );
    game.apply_input(InputEvent::Confirm);
    assert_eq!(game.phase(), Phase::Battle);

    assert_eq!(game.advance(Duration::from_millis(999)), None);
    let mut steps = 0;
    while game.phase() == Phase::Battle {
        game.advance(Duration::from_secs(1));
        steps += 1;
        assert!(steps <= 9);
    }

    assert_eq!(game.phase(), Phase::BattleEnd);
    assert_eq!(game.session().outcome(), Some(BattleOutcome::Defeat));
    assert_eq!(game.session().rounds_played(), 8);
    assert_eq!(game.session().enemy().hp, 84);
    assert_eq!(game.session().player().display_hp(), 0);
    assert!(game.session().log().len() <= 12);

    game.apply_input(InputEvent::Confirm);
    assert_eq!(game.phase(), Phase::Title);
    assert_eq!(game.session().player().hp, 100);
    assert_eq!(game.wins(), 0);
}

#[test]
fn test_command_match_runs_to_completion() {
    let config = MatchConfig {
        battle_mode: BattleMode::Command,
        pre_battle_gate: false,
        ..MatchConfig::default()
    };
    let mut game = Match::seeded(catalog(), config, 77);
    game.apply_input(InputEvent::Confirm);
    // Laser, NanoSuit, Gloves
    for _ in 0..3 {
        game.apply_input(InputEvent::CursorUp);
        game.apply_input(InputEvent::Confirm);
    }
    assert_eq!(game.phase(), Phase::Battle);
    assert_eq!(
        game.session().player().equipment,
        Loadout::new(EquipmentId::Laser, EquipmentId::NanoSuit, EquipmentId::Gloves)
    );

    let mut presses = 0;
    while game.phase() == Phase::Battle {
        game.apply_input(InputEvent::Confirm);
        presses += 1;
        assert!(presses < 500);
    }
    assert!(matches!(
        game.phase(),
        Phase::PostBattleEquip | Phase::BattleEnd
    ));
    assert!(game.session().outcome().is_some());
}
