//! Core library for KRST (KSP Roster Sorting Tool).
//! Parses KSP .sfs save files, indexes the crew roster into its four lists,
//! and sorts them with persistable sort-bar selections while keeping
//! unmodified saves byte-for-byte intact.

mod gui;
mod node;
mod roster;
mod sortbar;
mod states;
pub mod statics;

pub use gui::run_gui;
pub use node::{ConfigNode, NodeEntry, NodeParseError};
pub use roster::{CrewList, CrewSummary, LineEnding, LoadedRoster, RosterIndex};
pub use sortbar::{Direction, SortBar, SortBarDef, SortBarState, SortButtonDef, SortKey, bar_def};
pub use states::{SortBarStore, default_path as default_state_path};
