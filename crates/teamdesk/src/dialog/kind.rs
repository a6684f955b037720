//! Dialog kinds and modality.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a class of TeamDesk window.
///
/// The kind is the only key used to find a factory and to route close
/// requests, so at most one window of each kind is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogKind {
    /// The main planner window.
    MainWindow,
    /// Add a member to the team.
    AddTeamMember,
    /// Edit an existing team member.
    EditTeamMember,
    /// Application settings.
    Settings,
    /// Create a task.
    AddTask,
    /// Edit an existing task.
    EditTask,
    /// Read-only task details.
    TaskDetails,
    /// Linked calendar accounts.
    CalendarAccounts,
    /// About box.
    About,
}

impl DialogKind {
    /// Every kind, in declaration order.
    pub const ALL: [DialogKind; 9] = [
        DialogKind::MainWindow,
        DialogKind::AddTeamMember,
        DialogKind::EditTeamMember,
        DialogKind::Settings,
        DialogKind::AddTask,
        DialogKind::EditTask,
        DialogKind::TaskDetails,
        DialogKind::CalendarAccounts,
        DialogKind::About,
    ];

    /// Human-readable name, used for window titles and logs.
    pub const fn label(self) -> &'static str {
        match self {
            DialogKind::MainWindow => "Main Window",
            DialogKind::AddTeamMember => "Add Team Member",
            DialogKind::EditTeamMember => "Edit Team Member",
            DialogKind::Settings => "Settings",
            DialogKind::AddTask => "Add Task",
            DialogKind::EditTask => "Edit Task",
            DialogKind::TaskDetails => "Task Details",
            DialogKind::CalendarAccounts => "Calendar Accounts",
            DialogKind::About => "About",
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a dialog blocks the rest of the application while it is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowModality {
    /// Shown alongside other windows; `open` returns immediately.
    #[default]
    NonModal,
    /// Blocks other windows; `open` returns once the dialog closes.
    ApplicationModal,
}

impl WindowModality {
    /// Check whether this modality blocks the caller.
    pub fn is_modal(self) -> bool {
        matches!(self, WindowModality::ApplicationModal)
    }
}
