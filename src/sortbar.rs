use crate::roster::{CrewList, CrewSummary};
use crate::statics;
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Crew attributes a sort bar can order a list by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Name,
    Profession,
    Level,
    Gender,
    Courage,
    Stupidity,
    Veteran,
    Badass,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Profession => "Profession",
            SortKey::Level => "Level",
            SortKey::Gender => "Gender",
            SortKey::Courage => "Courage",
            SortKey::Stupidity => "Stupidity",
            SortKey::Veteran => "Veteran",
            SortKey::Badass => "Badass",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ascending => "Ascending",
            Direction::Descending => "Descending",
        }
    }
}

/// Current selection of one sort bar. The default state (no key) leaves the
/// list in file order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SortBarState {
    #[serde(default)]
    pub key: Option<SortKey>,
    #[serde(default)]
    pub direction: Direction,
}

impl SortBarState {
    /// Order two crew entries by the selected criterion, ties broken by name.
    /// An inactive state compares everything equal, leaving file order alone.
    pub fn compare(&self, a: &CrewSummary, b: &CrewSummary) -> Ordering {
        let Some(key) = self.key else {
            return Ordering::Equal;
        };

        let by_key = match key {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Profession => a.profession.to_lowercase().cmp(&b.profession.to_lowercase()),
            SortKey::Level => a.level.cmp(&b.level),
            SortKey::Gender => a.gender.to_lowercase().cmp(&b.gender.to_lowercase()),
            SortKey::Courage => a.courage.total_cmp(&b.courage),
            SortKey::Stupidity => a.stupidity.total_cmp(&b.stupidity),
            SortKey::Veteran => a.veteran.cmp(&b.veteran),
            SortKey::Badass => a.badass.cmp(&b.badass),
        };
        let ord = by_key.then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        match self.direction {
            Direction::Ascending => ord,
            Direction::Descending => match ord {
                Ordering::Less => Ordering::Greater,
                Ordering::Equal => Ordering::Equal,
                Ordering::Greater => Ordering::Less,
            },
        }
    }
}

/// One button on a sort bar.
#[derive(Debug, Clone, Copy)]
pub struct SortButtonDef {
    pub key: SortKey,
    pub label: &'static str,
    pub hint: &'static str,
}

/// The set of buttons a sort bar offers. Which definition applies depends on
/// the list the bar is currently bound to.
#[derive(Debug)]
pub struct SortBarDef {
    pub buttons: &'static [SortButtonDef],
}

static CREW_BAR_DEF: SortBarDef = SortBarDef {
    buttons: &[
        SortButtonDef {
            key: SortKey::Name,
            label: statics::EN_SORT_NAME,
            hint: statics::EN_HINT_SORT_NAME,
        },
        SortButtonDef {
            key: SortKey::Profession,
            label: statics::EN_SORT_CLASS,
            hint: statics::EN_HINT_SORT_CLASS,
        },
        SortButtonDef {
            key: SortKey::Level,
            label: statics::EN_SORT_LEVEL,
            hint: statics::EN_HINT_SORT_LEVEL,
        },
        SortButtonDef {
            key: SortKey::Gender,
            label: statics::EN_SORT_GENDER,
            hint: statics::EN_HINT_SORT_GENDER,
        },
        SortButtonDef {
            key: SortKey::Veteran,
            label: statics::EN_SORT_VETERAN,
            hint: statics::EN_HINT_SORT_VETERAN,
        },
    ],
};

// The lost list keeps only the criteria that still mean something for dead
// crew.
static KILLED_BAR_DEF: SortBarDef = SortBarDef {
    buttons: &[
        SortButtonDef {
            key: SortKey::Name,
            label: statics::EN_SORT_NAME,
            hint: statics::EN_HINT_SORT_NAME,
        },
        SortButtonDef {
            key: SortKey::Profession,
            label: statics::EN_SORT_CLASS,
            hint: statics::EN_HINT_SORT_CLASS,
        },
        SortButtonDef {
            key: SortKey::Level,
            label: statics::EN_SORT_LEVEL,
            hint: statics::EN_HINT_SORT_LEVEL,
        },
    ],
};

static APPLICANTS_BAR_DEF: SortBarDef = SortBarDef {
    buttons: &[
        SortButtonDef {
            key: SortKey::Name,
            label: statics::EN_SORT_NAME,
            hint: statics::EN_HINT_SORT_NAME,
        },
        SortButtonDef {
            key: SortKey::Profession,
            label: statics::EN_SORT_CLASS,
            hint: statics::EN_HINT_SORT_CLASS,
        },
        SortButtonDef {
            key: SortKey::Courage,
            label: statics::EN_SORT_COURAGE,
            hint: statics::EN_HINT_SORT_COURAGE,
        },
        SortButtonDef {
            key: SortKey::Stupidity,
            label: statics::EN_SORT_STUPIDITY,
            hint: statics::EN_HINT_SORT_STUPIDITY,
        },
        SortButtonDef {
            key: SortKey::Gender,
            label: statics::EN_SORT_GENDER,
            hint: statics::EN_HINT_SORT_GENDER,
        },
    ],
};

static EMPTY_BAR_DEF: SortBarDef = SortBarDef { buttons: &[] };

/// Button definition for the bar bound to the given list.
pub fn bar_def(list: CrewList) -> &'static SortBarDef {
    match list {
        CrewList::Available | CrewList::Assigned => &CREW_BAR_DEF,
        CrewList::Killed => &KILLED_BAR_DEF,
        CrewList::Applicants => &APPLICANTS_BAR_DEF,
    }
}

/// A row of sort criterion buttons. Clicking an inactive criterion activates
/// it ascending; clicking the active one flips it to descending, then off.
pub struct SortBar {
    def: &'static SortBarDef,
    state: SortBarState,
}

impl Default for SortBar {
    fn default() -> Self {
        Self {
            def: &EMPTY_BAR_DEF,
            state: SortBarState::default(),
        }
    }
}

impl SortBar {
    pub fn new(def: &'static SortBarDef) -> Self {
        Self {
            def,
            state: SortBarState::default(),
        }
    }

    /// Rebind the bar to another button set, dropping the current selection.
    pub fn set_definition(&mut self, def: &'static SortBarDef) {
        self.def = def;
        self.state = SortBarState::default();
    }

    /// Restore a previously saved selection. A key this definition does not
    /// offer (for example after a bar definition change) falls back to the
    /// inactive state instead of sorting by an invisible criterion.
    pub fn set_state(&mut self, state: SortBarState) {
        let offered = match state.key {
            None => true,
            Some(key) => self.def.buttons.iter().any(|b| b.key == key),
        };
        self.state = if offered {
            state
        } else {
            SortBarState::default()
        };
    }

    pub fn state(&self) -> SortBarState {
        self.state
    }

    pub fn enabled(&self) -> bool {
        !self.def.buttons.is_empty()
    }

    /// Draw the bar. Returns true when a click changed the selection.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> bool {
        if !self.enabled() {
            return false;
        }
        let buttons = self.def.buttons;
        let mut changed = false;

        ui.horizontal(|ui| {
            ui.label(statics::EN_LABEL_SORT);
            for button in buttons {
                let active = self.state.key == Some(button.key);
                let label = if active {
                    let glyph = match self.state.direction {
                        Direction::Ascending => statics::EN_GLYPH_SORT_ASC,
                        Direction::Descending => statics::EN_GLYPH_SORT_DESC,
                    };
                    format!("{} {glyph}", button.label)
                } else {
                    button.label.to_string()
                };
                if ui
                    .selectable_label(active, label)
                    .on_hover_text(button.hint)
                    .clicked()
                {
                    self.state = next_state(self.state, button.key);
                    changed = true;
                }
            }
        });

        changed
    }
}

fn next_state(current: SortBarState, clicked: SortKey) -> SortBarState {
    if current.key == Some(clicked) {
        match current.direction {
            Direction::Ascending => SortBarState {
                key: Some(clicked),
                direction: Direction::Descending,
            },
            Direction::Descending => SortBarState::default(),
        }
    } else {
        SortBarState {
            key: Some(clicked),
            direction: Direction::Ascending,
        }
    }
}
