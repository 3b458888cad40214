use crate::engine::budget::{plan_budget, BudgetAction};
use crate::engine::classifier::{classify, Classification};
use crate::models::action::{Action, ActionKind};
use crate::models::torrent::Torrent;

/// Everything a run intends to do, in the order it should be applied
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Plan {
    pub actions: Vec<Action>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn count(&self, kind: ActionKind) -> usize {
        self.actions.iter().filter(|a| a.kind == kind).count()
    }
}

/// Reannounce every candidate, then apply the budget decisions. A resume is
/// always followed by a reannounce of the same torrent.
pub fn build_plan(classes: &Classification<'_>, free_bytes: u64, autoresume: bool) -> Plan {
    let mut actions: Vec<Action> = classes
        .reannounce
        .iter()
        .map(|t| Action::new(ActionKind::Reannounce, t))
        .collect();

    for (torrent, decision) in plan_budget(&classes.active, &classes.paused, free_bytes, autoresume) {
        match decision {
            BudgetAction::Pause => actions.push(Action::new(ActionKind::Pause, torrent)),
            BudgetAction::Resume => {
                actions.push(Action::new(ActionKind::Resume, torrent));
                actions.push(Action::new(ActionKind::Reannounce, torrent));
            }
        }
    }

    Plan { actions }
}

/// Pure decision for one run: snapshot and free budget in, ordered actions out
pub fn decide(snapshot: &[Torrent], free_bytes: u64, autoresume: bool) -> Plan {
    build_plan(&classify(snapshot), free_bytes, autoresume)
}
