//! First Steps: the introductory script.
//!
//! Six characters, a Murder Plan main plot with a Shadow of the Ripper
//! subplot, a Murder and a Suicide incident, three loops of three days.
//! The protagonists never win a loop outright; their path to victory is
//! the final guess.

use crate::board::LocationKind;
use crate::characters::{CharacterData, CharacterTag, GoodwillAbility};
use crate::core::{CharacterId, CharacterName, EngineError};
use crate::engine::{DayPhase, GameState};
use crate::roles::{
    always, AbilityTiming, MandatoryClass, Role, RoleAbility, RoleKind,
};
use crate::script::{
    Incident, Plot, PlotKind, PlotRule, RuleKind, Script, ScriptCharacter,
};

fn key_person() -> RoleKind {
    RoleKind::new("KeyPerson")
}

/// First other alive character at the actor's location, roster order.
fn first_companion(state: &GameState, actor: CharacterId) -> Option<CharacterId> {
    let location = state.roster.get(actor).ok()?.location();
    state
        .alive_characters_at(location)
        .find(|c| c.id != actor)
        .map(|c| c.id)
}

// === Brain ===

fn brain_spreads_intrigue(state: &mut GameState, actor: CharacterId) -> Result<(), EngineError> {
    let location = state.roster.get(actor)?.location();
    state.board.location_mut(location).add_intrigue(1);
    Ok(())
}

// === Conspiracy Theorist ===

fn theorist_has_company(state: &GameState, actor: CharacterId) -> Result<bool, EngineError> {
    Ok(first_companion(state, actor).is_some())
}

fn theorist_spreads_paranoia(
    state: &mut GameState,
    actor: CharacterId,
) -> Result<(), EngineError> {
    if let Some(victim) = first_companion(state, actor) {
        state.roster.get_mut(victim)?.add_paranoia(1);
    }
    Ok(())
}

// === Killer ===

fn killer_sees_marked_key_person(
    state: &GameState,
    actor: CharacterId,
) -> Result<bool, EngineError> {
    let location = state.roster.get(actor)?.location();
    Ok(state.character_with_role(&key_person()).is_some_and(|kp| {
        kp.is_alive() && kp.location() == location && kp.intrigue() >= 2
    }))
}

fn killer_strikes(state: &mut GameState, _actor: CharacterId) -> Result<(), EngineError> {
    if let Some(kp) = state.character_with_role(&key_person()) {
        let id = kp.id;
        state.kill_character(id)?;
    }
    Ok(())
}

// === Serial Killer ===

fn serial_killer_is_alone_with_one(
    state: &GameState,
    actor: CharacterId,
) -> Result<bool, EngineError> {
    let location = state.roster.get(actor)?.location();
    let others = state
        .alive_characters_at(location)
        .filter(|c| c.id != actor)
        .count();
    Ok(others == 1)
}

fn serial_killer_strikes(state: &mut GameState, actor: CharacterId) -> Result<(), EngineError> {
    if let Some(victim) = first_companion(state, actor) {
        state.kill_character(victim)?;
    }
    Ok(())
}

// === Incidents ===

fn culprit_is_desperate(state: &GameState, incident: &Incident) -> bool {
    let Some(name) = &incident.culprit else {
        return false;
    };
    state
        .roster
        .by_name(name)
        .map(|c| c.is_alive() && c.paranoia_at_limit())
        .unwrap_or(false)
}

fn murder_effect(state: &mut GameState, incident: &Incident) -> Result<(), EngineError> {
    let Some(name) = &incident.culprit else {
        return Ok(());
    };
    let culprit = state.roster.by_name(name)?.id;
    if let Some(victim) = first_companion(state, culprit) {
        state.kill_character(victim)?;
    }
    Ok(())
}

fn suicide_effect(state: &mut GameState, incident: &Incident) -> Result<(), EngineError> {
    let Some(name) = &incident.culprit else {
        return Ok(());
    };
    let culprit = state.roster.by_name(name)?.id;
    state.kill_character(culprit)
}

// === Plot rules and win condition ===

fn key_person_is_dead(state: &GameState) -> bool {
    state
        .character_with_role(&key_person())
        .is_some_and(|kp| !kp.is_alive())
}

fn never_defused(_state: &GameState) -> bool {
    false
}

fn tags(names: &[&str]) -> Vec<CharacterTag> {
    names.iter().map(|n| CharacterTag::from(*n)).collect()
}

/// Build the First Steps script.
#[must_use]
pub fn first_steps() -> Script {
    let cast = vec![
        ScriptCharacter {
            data: CharacterData::new("Boy Student", LocationKind::School, 3, 2)
                .with_tags(tags(&["Student", "Boy"])),
            role: Role::new(RoleKind::new("Person"), "Person"),
        },
        ScriptCharacter {
            data: CharacterData::new("Girl Student", LocationKind::School, 3, 3)
                .with_tags(tags(&["Student", "Girl"])),
            role: Role::new(key_person(), "Key Person"),
        },
        ScriptCharacter {
            data: CharacterData::new("Shrine Maiden", LocationKind::Shrine, 3, 2)
                .with_tags(tags(&["Student", "Girl"]))
                .with_forbidden([LocationKind::City]),
            role: Role::new(RoleKind::new("SerialKiller"), "Serial Killer").with_ability(
                RoleAbility::new(
                    "Strike the lone companion",
                    AbilityTiming::DayEnd,
                    MandatoryClass::Must,
                    serial_killer_is_alone_with_one,
                    serial_killer_strikes,
                ),
            ),
        },
        ScriptCharacter {
            data: CharacterData::new("Police Officer", LocationKind::City, 4, 3)
                .with_tags(tags(&["Adult", "Man"]))
                .with_goodwill_ability(GoodwillAbility {
                    name: "Investigate the culprit".to_string(),
                    cost: 4,
                    refusable: true,
                }),
            role: Role::new(RoleKind::new("ConspiracyTheorist"), "Conspiracy Theorist")
                .with_ability(RoleAbility::new(
                    "Spread paranoia",
                    AbilityTiming::MastermindPhase,
                    MandatoryClass::Optional,
                    theorist_has_company,
                    theorist_spreads_paranoia,
                )),
        },
        ScriptCharacter {
            data: CharacterData::new("Office Worker", LocationKind::City, 3, 3)
                .with_tags(tags(&["Adult", "Man"])),
            role: Role::new(RoleKind::new("Killer"), "Killer").with_ability(RoleAbility::new(
                "Murder the marked Key Person",
                AbilityTiming::MastermindPhase,
                MandatoryClass::Optional,
                killer_sees_marked_key_person,
                killer_strikes,
            )),
        },
        ScriptCharacter {
            data: CharacterData::new("Doctor", LocationKind::Hospital, 4, 2)
                .with_tags(tags(&["Adult", "Man"]))
                .with_goodwill_ability(GoodwillAbility {
                    name: "Restore calm".to_string(),
                    cost: 2,
                    refusable: true,
                }),
            role: Role::new(RoleKind::new("Brain"), "Brain").with_ability(RoleAbility::new(
                "Seed intrigue",
                AbilityTiming::MastermindPhase,
                MandatoryClass::Optional,
                always,
                brain_spreads_intrigue,
            )),
        },
    ];

    let main_plot = Plot::new(
        "Murder Plan",
        PlotKind::Main,
        "The mastermind engineers the death of the Key Person.",
    )
    .with_required_role(key_person())
    .with_required_role(RoleKind::new("Killer"))
    .with_required_role(RoleKind::new("Brain"))
    .with_rule(PlotRule::new(
        "the Key Person has died",
        DayPhase::DayEnd,
        RuleKind::Failure,
        key_person_is_dead,
    ));

    let ripper = Plot::new(
        "Shadow of the Ripper",
        PlotKind::Sub,
        "A serial killer stalks anyone left alone with them.",
    )
    .with_required_role(RoleKind::new("SerialKiller"))
    .with_required_role(RoleKind::new("ConspiracyTheorist"));

    let incidents = vec![
        Incident::new(
            "Murder",
            2,
            Some(CharacterName::from("Office Worker")),
            culprit_is_desperate,
            murder_effect,
        ),
        Incident::new(
            "Suicide",
            3,
            Some(CharacterName::from("Girl Student")),
            culprit_is_desperate,
            suicide_effect,
        ),
    ];

    Script {
        title: "First Steps".to_string(),
        main_plot,
        sub_plots: vec![ripper],
        characters: cast,
        incidents,
        max_loops: 3,
        days_per_loop: 3,
        win_condition: never_defused,
    }
}
