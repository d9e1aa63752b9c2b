//! Scripts: the scenario interface.
//!
//! A script bundles everything one scenario contributes to a game: the
//! cast with their hidden roles, the plots whose rules steer each phase,
//! the incidents that can fire during the Incidents phase, and the loop
//! dimensions. The engine consumes scripts through this module only;
//! scenario content lives under `scenarios`.

use crate::characters::CharacterData;
use crate::core::{CharacterName, EngineError};
use crate::engine::{DayPhase, GameState};
use crate::roles::{Role, RoleKind};

/// A cast entry: public character data paired with its hidden role.
#[derive(Clone, Debug)]
pub struct ScriptCharacter {
    pub data: CharacterData,
    pub role: Role,
}

/// Whether a plot is the script's main plot or a subplot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlotKind {
    Main,
    Sub,
}

/// Classification of a plot rule.
///
/// `Failure` rules are loss conditions for the protagonists: when one holds,
/// the current loop is lost. `Mandatory` and `Optional` describe effects the
/// plot imposes on a phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleKind {
    Mandatory,
    Optional,
    Failure,
}

/// Predicate a plot rule evaluates against the game state.
pub type RuleCheck = fn(&GameState) -> bool;

/// A rule a plot contributes to one day phase.
#[derive(Clone, Debug)]
pub struct PlotRule {
    pub description: String,
    /// The phase after which this rule is evaluated.
    pub timing: DayPhase,
    pub kind: RuleKind,
    pub check: RuleCheck,
}

impl PlotRule {
    /// Create a plot rule.
    pub fn new(
        description: impl Into<String>,
        timing: DayPhase,
        kind: RuleKind,
        check: RuleCheck,
    ) -> Self {
        Self {
            description: description.into(),
            timing,
            kind,
            check,
        }
    }
}

/// A main plot or subplot.
#[derive(Clone, Debug)]
pub struct Plot {
    pub name: String,
    pub kind: PlotKind,
    pub description: String,
    pub rules: Vec<PlotRule>,
    /// Role kinds the cast must include for this plot to make sense.
    pub required_roles: Vec<RoleKind>,
}

impl Plot {
    /// Create a plot with no rules.
    pub fn new(name: impl Into<String>, kind: PlotKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            rules: Vec::new(),
            required_roles: Vec::new(),
        }
    }

    /// Add a rule (builder pattern).
    #[must_use]
    pub fn with_rule(mut self, rule: PlotRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Declare a role kind the cast must include (builder pattern).
    #[must_use]
    pub fn with_required_role(mut self, role: RoleKind) -> Self {
        self.required_roles.push(role);
        self
    }
}

/// Incident trigger predicate. Must be side-effect-free.
pub type IncidentTrigger = fn(&GameState, &Incident) -> bool;

/// Incident effect, applied when the trigger holds on the incident's day.
pub type IncidentEffect = fn(&mut GameState, &Incident) -> Result<(), EngineError>;

/// A scripted incident.
#[derive(Clone, Debug)]
pub struct Incident {
    pub name: String,
    /// The day of each loop on which this incident can fire.
    pub day: u32,
    /// The culprit character, if the incident has one.
    pub culprit: Option<CharacterName>,
    pub trigger: IncidentTrigger,
    pub effect: IncidentEffect,
}

impl Incident {
    /// Create an incident.
    pub fn new(
        name: impl Into<String>,
        day: u32,
        culprit: Option<CharacterName>,
        trigger: IncidentTrigger,
        effect: IncidentEffect,
    ) -> Self {
        Self {
            name: name.into(),
            day,
            culprit,
            trigger,
            effect,
        }
    }
}

/// Win predicate evaluated for the protagonists at the end of each loop.
pub type WinCondition = fn(&GameState) -> bool;

/// A complete scenario definition.
#[derive(Clone, Debug)]
pub struct Script {
    pub title: String,
    pub main_plot: Plot,
    pub sub_plots: Vec<Plot>,
    pub characters: Vec<ScriptCharacter>,
    pub incidents: Vec<Incident>,
    pub max_loops: u32,
    pub days_per_loop: u32,
    /// Holds when the protagonists have defused the script within a loop.
    pub win_condition: WinCondition,
}

impl Script {
    /// All plots, main first.
    pub fn plots(&self) -> impl Iterator<Item = &Plot> {
        std::iter::once(&self.main_plot).chain(self.sub_plots.iter())
    }

    /// Check the script for structural problems before a game starts.
    ///
    /// Rejects an empty cast, zero loop dimensions, duplicate character
    /// names, culprits naming characters outside the cast, and plots whose
    /// required roles nobody carries.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.characters.is_empty() {
            return Err(EngineError::Script(format!(
                "script '{}' has no characters",
                self.title
            )));
        }
        if self.max_loops == 0 || self.days_per_loop == 0 {
            return Err(EngineError::Script(format!(
                "script '{}' has zero loop dimensions ({} loops x {} days)",
                self.title, self.max_loops, self.days_per_loop
            )));
        }

        for (i, character) in self.characters.iter().enumerate() {
            let name = &character.data.name;
            if self.characters[..i].iter().any(|c| &c.data.name == name) {
                return Err(EngineError::Script(format!(
                    "duplicate character '{}'",
                    name
                )));
            }
        }

        for plot in self.plots() {
            for required in &plot.required_roles {
                if !self.characters.iter().any(|c| &c.role.kind == required) {
                    return Err(EngineError::Script(format!(
                        "plot '{}' requires a {} but the cast has none",
                        plot.name, required
                    )));
                }
            }
        }

        for incident in &self.incidents {
            if incident.day == 0 || incident.day > self.days_per_loop {
                return Err(EngineError::Script(format!(
                    "incident '{}' is scheduled on day {} of a {}-day loop",
                    incident.name, incident.day, self.days_per_loop
                )));
            }
            if let Some(culprit) = &incident.culprit {
                if !self.characters.iter().any(|c| &c.data.name == culprit) {
                    return Err(EngineError::Script(format!(
                        "incident '{}' names culprit '{}' who is not in the cast",
                        incident.name, culprit
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::LocationKind;

    fn never_wins(_state: &GameState) -> bool {
        false
    }

    fn cast_member(name: &str, role: &str) -> ScriptCharacter {
        ScriptCharacter {
            data: CharacterData::new(name, LocationKind::City, 3, 3),
            role: Role::new(RoleKind::new(role), role),
        }
    }

    fn minimal_script() -> Script {
        Script {
            title: "Test Script".to_string(),
            main_plot: Plot::new("Plot", PlotKind::Main, "")
                .with_required_role(RoleKind::new("KeyPerson")),
            sub_plots: Vec::new(),
            characters: vec![cast_member("Girl Student", "KeyPerson")],
            incidents: Vec::new(),
            max_loops: 3,
            days_per_loop: 3,
            win_condition: never_wins,
        }
    }

    #[test]
    fn test_valid_script_passes() {
        assert!(minimal_script().validate().is_ok());
    }

    #[test]
    fn test_missing_required_role() {
        let mut script = minimal_script();
        script.characters = vec![cast_member("Boy Student", "Person")];
        assert!(matches!(script.validate(), Err(EngineError::Script(_))));
    }

    #[test]
    fn test_zero_loops_rejected() {
        let mut script = minimal_script();
        script.max_loops = 0;
        assert!(script.validate().is_err());
    }

    #[test]
    fn test_duplicate_character_rejected() {
        let mut script = minimal_script();
        script.characters.push(cast_member("Girl Student", "Person"));
        assert!(script.validate().is_err());
    }

    #[test]
    fn test_unknown_culprit_rejected() {
        fn no_trigger(_: &GameState, _: &Incident) -> bool {
            false
        }
        fn no_op(_: &mut GameState, _: &Incident) -> Result<(), EngineError> {
            Ok(())
        }

        let mut script = minimal_script();
        script.incidents.push(Incident::new(
            "Murder",
            2,
            Some(CharacterName::from("Nobody")),
            no_trigger,
            no_op,
        ));
        assert!(script.validate().is_err());
    }
}
