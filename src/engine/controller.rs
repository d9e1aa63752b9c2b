//! The game controller: loops, days, phases, and the final guess.
//!
//! The controller owns the game state and a `Director`, the decision
//! source for everything the rules do not determine (card placements and
//! the final guess). Plugging in a scripted director makes whole games
//! reproducible in tests; an interactive frontend implements the same trait.

use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::cards::{mastermind_hand, protagonist_hand, CardIdAllocator, Target};
use crate::characters::Roster;
use crate::core::{CardId, CharacterName, EngineError, PlayerId};
use crate::players::{Player, PlayerKind};
use crate::resolution::resolve_action_cards;
use crate::roles::{AbilityTiming, RoleKind};
use crate::script::{Incident, RuleKind, Script};
use crate::triggers::trigger_abilities;

use super::snapshot::Snapshot;
use super::state::{DayPhase, Faction, GameState, HistoryRecord};

/// Number of protagonist players in the base game.
const PROTAGONIST_COUNT: u8 = 3;

/// One card placement decision.
#[derive(Clone, Copy, Debug)]
pub struct Placement {
    pub card: CardId,
    pub target: Target,
}

/// The protagonists' final accusation: a role kind per character name.
pub type FinalGuess = FxHashMap<CharacterName, RoleKind>;

/// Decision source for everything the rules leave open.
pub trait Director {
    /// The mastermind's placements for the day. Must match the quota.
    fn mastermind_placements(&mut self, state: &GameState) -> Vec<Placement>;

    /// One protagonist's placement for the day.
    fn protagonist_placement(&mut self, state: &GameState, player: PlayerId) -> Placement;

    /// The final guess, requested once when the last loop ends undecided.
    fn final_guess(&mut self, state: &GameState) -> FinalGuess;
}

/// How a finished game came out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub winner: Faction,
    pub loops_played: u32,
}

/// Runs one game of a script to completion.
pub struct Engine<D: Director> {
    state: GameState,
    script: Script,
    director: D,
}

impl<D: Director> Engine<D> {
    /// Validate the script and set up the table: roster from the cast,
    /// one mastermind and three protagonists with their fixed hands.
    pub fn new(script: Script, director: D) -> Result<Self, EngineError> {
        script.validate()?;

        let mut roster = Roster::new();
        for member in &script.characters {
            roster.add(member.data.clone(), member.role.clone());
        }

        let mut ids = CardIdAllocator::new();
        let mut players = vec![Player::new(
            PlayerId::MASTERMIND,
            "Mastermind",
            PlayerKind::Mastermind,
            mastermind_hand(PlayerId::MASTERMIND, &mut ids),
        )];
        for seat in 1..=PROTAGONIST_COUNT {
            let id = PlayerId::new(seat);
            players.push(Player::new(
                id,
                format!("Protagonist-{}", (b'A' + seat - 1) as char),
                PlayerKind::Protagonist,
                protagonist_hand(id, &mut ids),
            ));
        }

        let state = GameState::new(roster, players, script.max_loops, script.days_per_loop);
        Ok(Self {
            state,
            script,
            director,
        })
    }

    /// The current game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The protagonist-visible view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Play the game to completion.
    ///
    /// Loops run until the protagonists win a loop, the mastermind wins
    /// outright, or max loops is reached, in which case the game is
    /// settled by the final guess.
    pub fn run(&mut self) -> Result<Outcome, EngineError> {
        info!("starting script '{}'", self.script.title);

        while !self.state.game_over && self.state.current_loop < self.state.max_loops {
            self.state.begin_loop()?;
            trigger_abilities(&mut self.state, AbilityTiming::LoopStart)?;
            self.play_days()?;
            trigger_abilities(&mut self.state, AbilityTiming::LoopEnd)?;

            if !self.state.game_over && (self.script.win_condition)(&self.state) {
                info!("protagonists defused loop {}", self.state.current_loop);
                self.state.set_winner(Faction::Protagonists);
            }
        }

        let winner = match self.state.winner {
            Some(winner) => winner,
            None => {
                let guess = self.director.final_guess(&self.state);
                self.final_guess(guess)?
            }
        };

        info!("game over, {} win", winner);
        Ok(Outcome {
            winner,
            loops_played: self.state.current_loop,
        })
    }

    /// Settle the game by accusation. Correct iff every character's role
    /// kind is named correctly. Exactly one attempt is allowed.
    pub fn final_guess(&mut self, guess: FinalGuess) -> Result<Faction, EngineError> {
        if self.state.guess_made {
            return Err(EngineError::GuessAlreadyMade);
        }
        self.state.guess_made = true;

        for name in guess.keys() {
            self.state.roster.by_name(name)?;
        }
        let all_correct = self
            .state
            .roster
            .iter()
            .all(|c| guess.get(&c.data.name) == Some(&c.role().kind));

        let winner = if all_correct {
            Faction::Protagonists
        } else {
            Faction::Mastermind
        };
        self.state.set_winner(winner);
        Ok(winner)
    }

    fn play_days(&mut self) -> Result<(), EngineError> {
        for day in 1..=self.state.days_per_loop {
            if self.state.game_over || self.state.loop_failed {
                break;
            }
            self.state.current_day = day;
            self.play_day()?;
        }
        Ok(())
    }

    fn play_day(&mut self) -> Result<(), EngineError> {
        for phase in DayPhase::CYCLE {
            if self.state.game_over || self.state.loop_failed {
                break;
            }
            self.state.current_phase = phase;
            self.state.record(HistoryRecord::PhaseStarted {
                loop_number: self.state.current_loop,
                day: self.state.current_day,
                phase,
            });
            self.run_phase(phase)?;
            self.check_plot_rules(phase);
        }
        Ok(())
    }

    fn run_phase(&mut self, phase: DayPhase) -> Result<(), EngineError> {
        match phase {
            DayPhase::DayStart => trigger_abilities(&mut self.state, AbilityTiming::DayStart),
            DayPhase::MastermindAction => self.mastermind_action(),
            DayPhase::ProtagonistsAction => self.protagonists_action(),
            DayPhase::ResolveCards => resolve_action_cards(&mut self.state),
            DayPhase::MastermindAbilities => {
                trigger_abilities(&mut self.state, AbilityTiming::MastermindPhase)
            }
            DayPhase::LeaderGoodwill => {
                trigger_abilities(&mut self.state, AbilityTiming::GoodwillUse)
            }
            DayPhase::Incidents => self.incidents(),
            DayPhase::SwitchLeader => self.switch_leader(),
            DayPhase::DayEnd => trigger_abilities(&mut self.state, AbilityTiming::DayEnd),
        }
    }

    fn mastermind_action(&mut self) -> Result<(), EngineError> {
        let player = PlayerId::MASTERMIND;
        let quota = self.state.player(player)?.daily_quota();
        let placements = self.director.mastermind_placements(&self.state);
        if placements.len() != quota {
            return Err(EngineError::PlacementQuota {
                player,
                placed: placements.len(),
                quota,
            });
        }
        for placement in placements {
            self.state.place_card(player, placement.card, placement.target)?;
        }
        Ok(())
    }

    fn protagonists_action(&mut self) -> Result<(), EngineError> {
        let seats: Vec<PlayerId> = self.state.protagonist_ids().collect();
        for player in seats {
            let placement = self.director.protagonist_placement(&self.state, player);
            self.state.place_card(player, placement.card, placement.target)?;
        }
        Ok(())
    }

    fn incidents(&mut self) -> Result<(), EngineError> {
        let day = self.state.current_day;
        let due: Vec<Incident> = self
            .script
            .incidents
            .iter()
            .filter(|i| i.day == day)
            .cloned()
            .collect();

        let mut any_fired = false;
        for incident in due {
            if self.state.incident_occurred(&incident.name) {
                continue;
            }
            if !(incident.trigger)(&self.state, &incident) {
                debug!("incident '{}' did not trigger on day {}", incident.name, day);
                continue;
            }
            info!("incident '{}' occurs on day {}", incident.name, day);
            self.state.record_incident(&incident.name);
            (incident.effect)(&mut self.state, &incident)?;
            any_fired = true;
        }

        if any_fired {
            trigger_abilities(&mut self.state, AbilityTiming::IncidentTrigger)?;
        }
        Ok(())
    }

    fn switch_leader(&mut self) -> Result<(), EngineError> {
        let seats: Vec<PlayerId> = self.state.protagonist_ids().collect();
        if let Some(pos) = seats.iter().position(|id| *id == self.state.leader) {
            let next = seats[(pos + 1) % seats.len()];
            self.state.leader = next;
            self.state.record(HistoryRecord::LeaderChanged { leader: next });
        }
        Ok(())
    }

    /// Evaluate plot rules attached to the phase that just ran. A holding
    /// `Failure` rule loses the loop for the protagonists.
    fn check_plot_rules(&mut self, phase: DayPhase) {
        if self.state.game_over || self.state.loop_failed {
            return;
        }
        let mut failed: Option<String> = None;
        for plot in self.script.plots() {
            for rule in &plot.rules {
                if rule.timing == phase
                    && rule.kind == RuleKind::Failure
                    && (rule.check)(&self.state)
                {
                    failed = Some(rule.description.clone());
                    break;
                }
            }
            if failed.is_some() {
                break;
            }
        }
        if let Some(description) = failed {
            info!(
                "loop {} lost: {}",
                self.state.current_loop, description
            );
            self.state.loop_failed = true;
        }
    }
}
