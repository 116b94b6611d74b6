//! Wizard steps

use serde::{Deserialize, Serialize};

use super::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum WizardStep {
    #[default]
    Vehicle,
    Catalog,
    Scenario,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Vehicle,
        WizardStep::Catalog,
        WizardStep::Scenario,
        WizardStep::Review,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Vehicle => "Vehicle",
            WizardStep::Catalog => "Parts catalog",
            WizardStep::Scenario => "Scenario",
            WizardStep::Review => "Review & run",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn next(&self) -> Option<WizardStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(&self) -> Option<WizardStep> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    /// Whether everything this step needs is in place
    pub fn can_enter(&self, session: &Session) -> bool {
        match self {
            WizardStep::Vehicle => true,
            WizardStep::Catalog | WizardStep::Scenario => session.catalog_view().is_some(),
            WizardStep::Review => {
                session.catalog_view().is_some() && session.scenario.validate().is_ok()
            }
        }
    }

    /// Why `can_enter` is false, for the step bar tooltip
    pub fn blocked_reason(&self, session: &Session) -> Option<&'static str> {
        if self.can_enter(session) {
            return None;
        }
        Some(match self {
            WizardStep::Vehicle => return None,
            WizardStep::Catalog | WizardStep::Scenario => "Load a parts catalog first",
            WizardStep::Review if session.catalog_view().is_none() => "Load a parts catalog first",
            WizardStep::Review => "Fix the scenario form first",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation() {
        assert_eq!(WizardStep::Vehicle.next(), Some(WizardStep::Catalog));
        assert_eq!(WizardStep::Review.next(), None);
        assert_eq!(WizardStep::Vehicle.prev(), None);
        assert_eq!(WizardStep::Review.prev(), Some(WizardStep::Scenario));
    }

    #[test]
    fn test_gating_on_empty_session() {
        let session = Session::default();
        assert!(WizardStep::Vehicle.can_enter(&session));
        assert!(!WizardStep::Catalog.can_enter(&session));
        assert_eq!(
            WizardStep::Review.blocked_reason(&session),
            Some("Load a parts catalog first")
        );
    }
}
