//! Whole-game tests driving the engine with scripted directors.

use looper_engine::scenarios::first_steps;
use looper_engine::{
    Axis, CardId, CardKind, CharacterId, Director, Engine, EngineError, Faction, FinalGuess,
    GameState, HistoryRecord, Placement, PlayerId, Target,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn find_card(state: &GameState, player: PlayerId, kind: CardKind) -> CardId {
    state
        .player(player)
        .unwrap()
        .hand()
        .iter()
        .find(|c| c.kind == kind)
        .map(|c| c.id)
        .expect("card available in hand")
}

fn truthful_guess(state: &GameState) -> FinalGuess {
    state
        .roster
        .iter()
        .map(|c| (c.data.name.clone(), c.role().kind.clone()))
        .collect()
}

/// Plays harmless cards every day and guesses at the end.
struct Cautious {
    guess_truthfully: bool,
}

impl Director for Cautious {
    fn mastermind_placements(&mut self, state: &GameState) -> Vec<Placement> {
        // First three cards of the hand, all on the Boy Student.
        state
            .player(PlayerId::MASTERMIND)
            .unwrap()
            .hand()
            .iter()
            .take(3)
            .map(|c| Placement {
                card: c.id,
                target: Target::Character(CharacterId::new(0)),
            })
            .collect()
    }

    fn protagonist_placement(&mut self, state: &GameState, player: PlayerId) -> Placement {
        Placement {
            card: find_card(state, player, CardKind::Goodwill(1)),
            target: Target::Character(CharacterId::new(0)),
        }
    }

    fn final_guess(&mut self, state: &GameState) -> FinalGuess {
        if self.guess_truthfully {
            truthful_guess(state)
        } else {
            FinalGuess::default()
        }
    }
}

/// Marks the Key Person with intrigue and walks the Killer to her.
struct Assassin;

impl Director for Assassin {
    fn mastermind_placements(&mut self, state: &GameState) -> Vec<Placement> {
        let mm = PlayerId::MASTERMIND;
        let girl = Target::Character(CharacterId::new(1));
        let worker = Target::Character(CharacterId::new(4));
        vec![
            Placement {
                card: find_card(state, mm, CardKind::Intrigue(2)),
                target: girl,
            },
            Placement {
                card: find_card(state, mm, CardKind::Intrigue(1)),
                target: girl,
            },
            Placement {
                card: find_card(state, mm, CardKind::Movement(Axis::Horizontal)),
                target: worker,
            },
        ]
    }

    fn protagonist_placement(&mut self, state: &GameState, player: PlayerId) -> Placement {
        Placement {
            card: find_card(state, player, CardKind::Goodwill(1)),
            target: Target::Character(CharacterId::new(0)),
        }
    }

    fn final_guess(&mut self, state: &GameState) -> FinalGuess {
        truthful_guess(state)
    }
}

/// Never meets the placement quota.
struct Lazy;

impl Director for Lazy {
    fn mastermind_placements(&mut self, _state: &GameState) -> Vec<Placement> {
        Vec::new()
    }

    fn protagonist_placement(&mut self, _state: &GameState, _player: PlayerId) -> Placement {
        unreachable!("the mastermind phase fails first")
    }

    fn final_guess(&mut self, _state: &GameState) -> FinalGuess {
        FinalGuess::default()
    }
}

#[test]
fn full_game_settled_by_correct_guess() {
    init_logs();
    let mut engine = Engine::new(
        first_steps(),
        Cautious {
            guess_truthfully: true,
        },
    )
    .unwrap();

    let outcome = engine.run().unwrap();
    assert_eq!(outcome.winner, Faction::Protagonists);
    assert_eq!(outcome.loops_played, 3);

    // Every loop ran all three days.
    let loops = engine
        .state()
        .history
        .iter()
        .filter(|r| matches!(r, HistoryRecord::LoopPrepared { .. }))
        .count();
    assert_eq!(loops, 3);
    assert!(engine.state().history.iter().any(|r| matches!(
        r,
        HistoryRecord::PhaseStarted { day: 3, .. }
    )));
}

#[test]
fn wrong_guess_hands_the_win_to_the_mastermind() {
    let mut engine = Engine::new(
        first_steps(),
        Cautious {
            guess_truthfully: false,
        },
    )
    .unwrap();

    let outcome = engine.run().unwrap();
    assert_eq!(outcome.winner, Faction::Mastermind);
}

#[test]
fn second_guess_is_rejected() {
    let mut engine = Engine::new(
        first_steps(),
        Cautious {
            guess_truthfully: true,
        },
    )
    .unwrap();
    engine.run().unwrap();

    assert_eq!(
        engine.final_guess(FinalGuess::default()),
        Err(EngineError::GuessAlreadyMade)
    );
}

#[test]
fn killing_the_key_person_ends_each_loop_early() {
    init_logs();
    let mut engine = Engine::new(first_steps(), Assassin).unwrap();
    let outcome = engine.run().unwrap();

    // All three loops were lost on day one; the guess still decides it.
    assert_eq!(outcome.loops_played, 3);
    assert_eq!(outcome.winner, Faction::Protagonists);

    let girl = CharacterId::new(1);
    let deaths = engine
        .state()
        .history
        .iter()
        .filter(|r| matches!(r, HistoryRecord::CharacterDied { character } if *character == girl))
        .count();
    assert_eq!(deaths, 3);

    // No loop ever reached day two.
    assert!(!engine.state().history.iter().any(|r| matches!(
        r,
        HistoryRecord::PhaseStarted { day: 2, .. }
    )));
}

#[test]
fn loop_reset_rewinds_characters_but_not_history() {
    let mut engine = Engine::new(first_steps(), Assassin).unwrap();
    engine.run().unwrap();

    let state = engine.state();
    // The Key Person died in the final loop and stays dead after the game;
    // her counters from earlier loops were rewound each time, so only the
    // final loop's intrigue remains.
    let girl = state.roster.get(CharacterId::new(1)).unwrap();
    assert!(!girl.is_alive());
    assert_eq!(girl.intrigue(), 3);
    assert!(!state.history.is_empty());
}

#[test]
fn missed_quota_aborts_the_game() {
    let mut engine = Engine::new(first_steps(), Lazy).unwrap();
    let err = engine.run().unwrap_err();
    assert_eq!(
        err,
        EngineError::PlacementQuota {
            player: PlayerId::MASTERMIND,
            placed: 0,
            quota: 3,
        }
    );
}

#[test]
fn snapshot_never_leaks_hidden_information() {
    let engine = Engine::new(
        first_steps(),
        Cautious {
            guess_truthfully: true,
        },
    )
    .unwrap();

    let json = serde_json::to_string(&engine.snapshot()).unwrap();
    assert!(json.contains("Girl Student"));
    for hidden in ["KeyPerson", "SerialKiller", "Killer", "Brain", "ConspiracyTheorist"] {
        assert!(!json.contains(hidden), "snapshot leaked {}", hidden);
    }
}
