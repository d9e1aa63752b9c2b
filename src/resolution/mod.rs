//! Card resolution: the ResolveCards phase.
//!
//! One resolution pass drains the board, reveals every card, stable-sorts by
//! priority (placement order breaks ties), applies each card against a
//! pass-local suppression set, and hands the cards back to their owners.
//! Suppression is category-matched: a Forbid card inhibits only later cards
//! of its own category on the same target. An unbound or mistyped target
//! fails the whole pass.

use log::{debug, warn};
use rustc_hash::FxHashSet;

use crate::cards::{Card, CardKind, ForbidKind, Target};
use crate::core::EngineError;
use crate::engine::{GameState, HistoryRecord};

/// Resolve every card placed this day.
pub fn resolve_action_cards(state: &mut GameState) -> Result<(), EngineError> {
    let mut cards = state.take_placed_cards();

    for card in cards.iter_mut() {
        card.reveal();
    }
    // Stable: equal priorities keep placement order.
    cards.sort_by_key(|card| card.kind.priority());

    let mut suppressed: FxHashSet<(Target, ForbidKind)> = FxHashSet::default();

    for card in &cards {
        let target = card.target.ok_or(EngineError::UnboundTarget { card: card.id })?;

        if let Some(forbid) = card.kind.forbids() {
            validate_target(card, target)?;
            debug!("{} forbids {:?} on {}", card.kind, forbid, target);
            suppressed.insert((target, forbid));
            state.record(HistoryRecord::CardApplied {
                card: card.id,
                owner: card.owner,
            });
            continue;
        }

        if let Some(category) = card.kind.suppressed_by() {
            if suppressed.contains(&(target, category)) {
                warn!("{} on {} suppressed", card.kind, target);
                state.record(HistoryRecord::CardSuppressed { card: card.id });
                continue;
            }
        }

        apply_card(state, card, target)?;
        state.record(HistoryRecord::CardApplied {
            card: card.id,
            owner: card.owner,
        });
    }

    for card in cards {
        let owner = card.owner;
        state.player_mut(owner)?.return_card(card);
    }

    Ok(())
}

/// Apply one non-Forbid card to its validated target.
fn apply_card(state: &mut GameState, card: &Card, target: Target) -> Result<(), EngineError> {
    validate_target(card, target)?;

    match (card.kind, target) {
        (CardKind::Movement(axis), Target::Character(id)) => {
            state.move_character_along(id, axis)?;
        }
        (CardKind::Paranoia(delta), Target::Character(id)) => {
            state.roster.get_mut(id)?.add_paranoia(i64::from(delta));
        }
        (CardKind::Goodwill(delta), Target::Character(id)) => {
            state.roster.get_mut(id)?.add_goodwill(i64::from(delta));
        }
        (CardKind::Intrigue(delta), Target::Character(id)) => {
            state.roster.get_mut(id)?.add_intrigue(i64::from(delta));
        }
        (CardKind::Intrigue(delta), Target::Location(kind)) => {
            state.board.location_mut(kind).add_intrigue(i64::from(delta));
        }
        // validate_target has already rejected every other combination.
        _ => unreachable!("target validated before apply"),
    }
    Ok(())
}

/// Check a card's target is the right kind of entity for its category.
///
/// Intrigue cards (and ForbidIntrigue) accept characters or locations;
/// every other category targets characters only.
fn validate_target(card: &Card, target: Target) -> Result<(), EngineError> {
    let ok = match card.kind {
        CardKind::Intrigue(_) | CardKind::ForbidIntrigue => true,
        _ => matches!(target, Target::Character(_)),
    };
    if ok {
        Ok(())
    } else {
        Err(EngineError::InvalidTarget {
            card: card.id,
            kind: card.kind,
            target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Axis, LocationKind};
    use crate::cards::{mastermind_hand, protagonist_hand, CardIdAllocator};
    use crate::characters::{CharacterData, Roster};
    use crate::core::{CharacterId, PlayerId};
    use crate::players::{Player, PlayerKind};
    use crate::roles::{Role, RoleKind};

    fn two_player_state() -> GameState {
        let mut roster = Roster::new();
        roster.add(
            CharacterData::new("Boy Student", LocationKind::School, 4, 3),
            Role::new(RoleKind::new("Person"), "Person"),
        );
        roster.add(
            CharacterData::new("Doctor", LocationKind::Hospital, 4, 4),
            Role::new(RoleKind::new("Person"), "Person"),
        );

        let mut ids = CardIdAllocator::new();
        let p1 = PlayerId::new(1);
        let players = vec![
            Player::new(
                PlayerId::MASTERMIND,
                "Mastermind",
                PlayerKind::Mastermind,
                mastermind_hand(PlayerId::MASTERMIND, &mut ids),
            ),
            Player::new(
                p1,
                "Protagonist-A",
                PlayerKind::Protagonist,
                protagonist_hand(p1, &mut ids),
            ),
        ];
        GameState::new(roster, players, 3, 3)
    }

    fn card_in_hand(state: &GameState, player: PlayerId, kind: CardKind) -> crate::core::CardId {
        state
            .player(player)
            .unwrap()
            .hand()
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.id)
            .expect("card in hand")
    }

    #[test]
    fn test_forbid_movement_resolves_before_movement() {
        let mut state = two_player_state();
        let boy = CharacterId::new(0);
        let mm = PlayerId::MASTERMIND;
        let p1 = PlayerId::new(1);

        // Movement placed first, forbid second. Priority still puts the
        // forbid first, so the character stays put.
        let move_card = card_in_hand(&state, mm, CardKind::Movement(Axis::Horizontal));
        state
            .place_card(mm, move_card, Target::Character(boy))
            .unwrap();
        let forbid = card_in_hand(&state, p1, CardKind::ForbidMovement);
        state.place_card(p1, forbid, Target::Character(boy)).unwrap();

        resolve_action_cards(&mut state).unwrap();
        assert_eq!(
            state.roster.get(boy).unwrap().location(),
            LocationKind::School
        );
        assert!(state
            .history
            .iter()
            .any(|r| matches!(r, HistoryRecord::CardSuppressed { card } if *card == move_card)));
    }

    #[test]
    fn test_forbid_only_matches_its_category() {
        let mut state = two_player_state();
        let boy = CharacterId::new(0);
        let mm = PlayerId::MASTERMIND;
        let p1 = PlayerId::new(1);

        // ForbidParanoia on the boy must not stop a goodwill card on him.
        let forbid = card_in_hand(&state, mm, CardKind::ForbidParanoia);
        state.place_card(mm, forbid, Target::Character(boy)).unwrap();
        let goodwill = card_in_hand(&state, p1, CardKind::Goodwill(1));
        state
            .place_card(p1, goodwill, Target::Character(boy))
            .unwrap();

        resolve_action_cards(&mut state).unwrap();
        assert_eq!(state.roster.get(boy).unwrap().goodwill(), 1);
    }

    #[test]
    fn test_forbid_is_target_scoped() {
        let mut state = two_player_state();
        let boy = CharacterId::new(0);
        let doctor = CharacterId::new(1);
        let mm = PlayerId::MASTERMIND;
        let p1 = PlayerId::new(1);

        let forbid = card_in_hand(&state, p1, CardKind::ForbidMovement);
        state.place_card(p1, forbid, Target::Character(doctor)).unwrap();
        let move_card = card_in_hand(&state, mm, CardKind::Movement(Axis::Vertical));
        state
            .place_card(mm, move_card, Target::Character(boy))
            .unwrap();

        resolve_action_cards(&mut state).unwrap();
        // School's vertical neighbor is the Shrine; the boy moves.
        assert_eq!(
            state.roster.get(boy).unwrap().location(),
            LocationKind::Shrine
        );
    }

    #[test]
    fn test_location_intrigue() {
        let mut state = two_player_state();
        let mm = PlayerId::MASTERMIND;

        let intrigue = card_in_hand(&state, mm, CardKind::Intrigue(1));
        state
            .place_card(mm, intrigue, Target::Location(LocationKind::Shrine))
            .unwrap();

        resolve_action_cards(&mut state).unwrap();
        assert_eq!(state.board.location(LocationKind::Shrine).intrigue(), 1);
    }

    #[test]
    fn test_mistyped_target_fails_pass() {
        let mut state = two_player_state();
        let p1 = PlayerId::new(1);

        let goodwill = card_in_hand(&state, p1, CardKind::Goodwill(1));
        state
            .place_card(p1, goodwill, Target::Location(LocationKind::City))
            .unwrap();

        let err = resolve_action_cards(&mut state).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTarget { .. }));
    }

    #[test]
    fn test_cards_return_to_owners() {
        let mut state = two_player_state();
        let boy = CharacterId::new(0);
        let mm = PlayerId::MASTERMIND;

        // The +2 intrigue card is once-per-loop: it must land in the
        // once-pile, not the hand.
        let once = card_in_hand(&state, mm, CardKind::Intrigue(2));
        state.place_card(mm, once, Target::Character(boy)).unwrap();
        let plain = card_in_hand(&state, mm, CardKind::Paranoia(1));
        state.place_card(mm, plain, Target::Character(boy)).unwrap();

        resolve_action_cards(&mut state).unwrap();

        let mastermind = state.player(mm).unwrap();
        assert_eq!(mastermind.hand().len(), 9);
        assert_eq!(mastermind.once_pile().len(), 1);
        assert_eq!(state.placed_card_count(), 0);
    }

    #[test]
    fn test_paranoia_clamps_at_limit() {
        let mut state = two_player_state();
        let boy = CharacterId::new(0); // paranoia limit 3
        let mm = PlayerId::MASTERMIND;

        state.roster.get_mut(boy).unwrap().set_paranoia(3);
        let card = card_in_hand(&state, mm, CardKind::Paranoia(1));
        state.place_card(mm, card, Target::Character(boy)).unwrap();

        resolve_action_cards(&mut state).unwrap();
        assert_eq!(state.roster.get(boy).unwrap().paranoia(), 3);
    }
}
