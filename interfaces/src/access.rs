use crate::defs::{Action, Role};
use std::collections::BTreeSet;

/// Actions offered to a role. Admin and Assessor share the full set; the
/// client role only browses.
pub fn allowed_actions(role: Role) -> BTreeSet<Action> {
    match role {
        Role::Admin | Role::Assessor => [
            Action::AnalyzeSentiment,
            Action::Download,
            Action::Export,
            Action::GenerateReport,
            Action::ChangeClientScope,
        ]
        .into_iter()
        .collect(),
        Role::Client => BTreeSet::new(),
    }
}

pub fn can(role: Role, action: Action) -> bool {
    allowed_actions(role).contains(&action)
}
