//! Ability trigger sweeps.
//!
//! At each timing window the engine sweeps the roster once, asks every
//! matching ability whether it is triggerable, and then executes the
//! triggerable ones bucketed by mandatory class: `Must` first, then
//! `MandatoryRefusal`, then `Optional`, roster order within each bucket.
//! Collection is completed before any effect runs, so an effect never
//! changes which abilities were considered triggerable this sweep.

use log::debug;
use smallvec::SmallVec;

use crate::core::{CharacterId, EngineError};
use crate::engine::{GameState, HistoryRecord};
use crate::roles::{AbilityEffect, AbilityTiming, MandatoryClass};

struct Pending {
    name: String,
    actor: CharacterId,
    effect: AbilityEffect,
}

/// Run one trigger sweep for a timing window.
///
/// Dead characters are skipped entirely. `Always` abilities match every
/// window. The sweep aborts on the first trigger or effect error.
pub fn trigger_abilities(
    state: &mut GameState,
    timing: AbilityTiming,
) -> Result<(), EngineError> {
    let mut must: SmallVec<[Pending; 4]> = SmallVec::new();
    let mut refusal: SmallVec<[Pending; 4]> = SmallVec::new();
    let mut optional: SmallVec<[Pending; 4]> = SmallVec::new();

    for character in state.roster.iter() {
        if !character.is_alive() {
            continue;
        }
        for ability in &character.role().abilities {
            if ability.timing != timing && ability.timing != AbilityTiming::Always {
                continue;
            }
            if !(ability.trigger)(state, character.id)? {
                continue;
            }
            let pending = Pending {
                name: ability.name.clone(),
                actor: character.id,
                effect: ability.effect,
            };
            match ability.class {
                MandatoryClass::Must => must.push(pending),
                MandatoryClass::MandatoryRefusal => refusal.push(pending),
                MandatoryClass::Optional => optional.push(pending),
            }
        }
    }

    for pending in must
        .into_iter()
        .chain(refusal.into_iter())
        .chain(optional.into_iter())
    {
        debug!("{} triggers '{}' at {:?}", pending.actor, pending.name, timing);
        (pending.effect)(state, pending.actor)?;
        state.record(HistoryRecord::AbilityExecuted {
            ability: pending.name,
            actor: pending.actor,
        });
    }

    Ok(())
}
