// Central place for UI strings and other non-localized constants.
// Keep these out of gui.rs to reduce duplication and make tweaks safer.

// External links
pub const GITHUB_URL: &str = "https://github.com/staehle/krst";

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "KRST: KSP Roster Sorting Tool";

pub const EN_BTN_OPEN: &str = "Open...";
pub const EN_BTN_SAVE_AS: &str = "Save As...";
pub const EN_BTN_CLOSE: &str = "Close";
pub const EN_BTN_ABOUT: &str = "About";
pub const EN_BTN_TOGGLE_THEME: &str = "Theme";
pub const EN_BTN_CLEAR: &str = "Clear";

pub const EN_BTN_HIRE: &str = "Hire";
pub const EN_BTN_SACK: &str = "Sack";

pub const EN_WINDOW_ABOUT: &str = "About";

pub const EN_ABOUT_HEADING: &str = "KRST: KSP Roster Sorting Tool";
pub const EN_ABOUT_VERSION: &str = "Version:";
pub const EN_ABOUT_BLURB: &str = "Sorts the Astronaut Complex rosters inside a KSP save file.";
pub const EN_PROJECT_REPO: &str = "GitHub Repo";

pub const EN_HOME_HEADING: &str = "KRST: KSP Roster Sorting Tool";
pub const EN_HOME_INSTRUCTIONS: &str = "Open a KSP save (.sfs) to begin.";

pub const EN_HEADING_APPLICANTS: &str = "Applicants";
pub const EN_HEADING_CREW: &str = "Crew";

// Crew panel tabs. The killed list is labeled "Lost" in the UI, matching the
// Astronaut Complex; its stable list name stays "Killed".
pub const EN_TAB_AVAILABLE: &str = "Available";
pub const EN_TAB_ASSIGNED: &str = "Assigned";
pub const EN_TAB_LOST: &str = "Lost";

pub const EN_LABEL_SORT: &str = "Sort:";

// Small glyphs shown on the active sort button.
pub const EN_GLYPH_SORT_ASC: &str = "^";
pub const EN_GLYPH_SORT_DESC: &str = "v";

pub const EN_COL_NAME: &str = "Name";
pub const EN_COL_CLASS: &str = "Class";
pub const EN_COL_LEVEL: &str = "Level";
pub const EN_COL_GENDER: &str = "Gender";
pub const EN_COL_COURAGE: &str = "Courage";
pub const EN_COL_STUPIDITY: &str = "Stupidity";
pub const EN_COL_FLAGS: &str = "Flags";

pub const EN_SORT_NAME: &str = "Name";
pub const EN_SORT_CLASS: &str = "Class";
pub const EN_SORT_LEVEL: &str = "Level";
pub const EN_SORT_GENDER: &str = "Gender";
pub const EN_SORT_VETERAN: &str = "Veteran";
pub const EN_SORT_COURAGE: &str = "Courage";
pub const EN_SORT_STUPIDITY: &str = "Stupidity";

pub const EN_HINT_SORT_NAME: &str = "Sort by name";
pub const EN_HINT_SORT_CLASS: &str = "Sort by class";
pub const EN_HINT_SORT_LEVEL: &str = "Sort by experience level";
pub const EN_HINT_SORT_GENDER: &str = "Sort by gender";
pub const EN_HINT_SORT_VETERAN: &str = "Sort veterans first/last";
pub const EN_HINT_SORT_COURAGE: &str = "Sort by courage";
pub const EN_HINT_SORT_STUPIDITY: &str = "Sort by stupidity";

pub const EN_FLAG_VETERAN: &str = "Veteran";
pub const EN_FLAG_BADASS: &str = "Badass";

pub const EN_LIST_EMPTY: &str = "No crew in this list.";
pub const EN_APPLICANTS_EMPTY: &str = "No applicants.";

pub const EN_BADGE_DIRTY: &str = "dirty";
pub const EN_PLACEHOLDER_UNSAVED: &str = "<unsaved>";
pub const EN_EMPTY: &str = "";

// Newline constants (used for save formatting; keep out of node/roster code).
pub const NL_LF: &str = "\n";
pub const NL_CRLF: &str = "\r\n";

// KSP save structure node names (SFS_ prefix)
pub const SFS_NODE_GAME: &str = "GAME";
pub const SFS_NODE_ROSTER: &str = "ROSTER";
pub const SFS_NODE_KERBAL: &str = "KERBAL";

// KERBAL entry keys, spelled the way the game writes them.
pub const KERBAL_KEY_NAME: &str = "name";
pub const KERBAL_KEY_GENDER: &str = "gender";
pub const KERBAL_KEY_TYPE: &str = "type";
pub const KERBAL_KEY_TRAIT: &str = "trait";
pub const KERBAL_KEY_BRAVE: &str = "brave";
pub const KERBAL_KEY_DUMB: &str = "dumb";
pub const KERBAL_KEY_BADASS: &str = "badS";
pub const KERBAL_KEY_VETERAN: &str = "veteran";
pub const KERBAL_KEY_STATE: &str = "state";
pub const KERBAL_KEY_EXPERIENCE: &str = "experience";

pub const KERBAL_TYPE_CREW: &str = "Crew";
pub const KERBAL_TYPE_APPLICANT: &str = "Applicant";

pub const KERBAL_STATE_AVAILABLE: &str = "Available";
pub const KERBAL_STATE_ASSIGNED: &str = "Assigned";
pub const KERBAL_STATE_DEAD: &str = "Dead";
pub const KERBAL_STATE_MISSING: &str = "Missing";

// Career experience needed for each astronaut level (the game's level-up thresholds).
pub const KERBAL_XP_THRESHOLDS: [f64; 5] = [2.0, 8.0, 16.0, 32.0, 64.0];

// Stable list names; also the keys of the persisted sort-bar states.
pub const LIST_NAME_AVAILABLE: &str = "Available";
pub const LIST_NAME_ASSIGNED: &str = "Assigned";
pub const LIST_NAME_KILLED: &str = "Killed";
pub const LIST_NAME_APPLICANTS: &str = "Applicants";

// Sort-bar state file structure (STORE_ prefix).
pub const STORE_FIELD_VERSION: &str = "version";
pub const STORE_FIELD_BARS: &str = "bars";
pub const STORE_FIELD_KEY: &str = "key";
pub const STORE_FIELD_DIRECTION: &str = "direction";

pub const STORE_ENV_OVERRIDE: &str = "KRST_STATE_FILE";
pub const STORE_DIR_NAME: &str = ".krst";
pub const STORE_FILE_NAME: &str = "sortbars.json5";
