use crate::sortbar::SortBarState;
use crate::statics;
use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Bump when the on-disk layout changes shape.
pub const STORE_VERSION: u32 = 1;

fn latest_version() -> u32 {
    STORE_VERSION
}

/// Persisted sort-bar selections, keyed by stable list name. Kept in
/// insertion order so re-saving does not shuffle the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SortBarStore {
    #[serde(default = "latest_version")]
    pub version: u32,
    #[serde(default)]
    pub bars: IndexMap<String, SortBarState>,
}

impl Default for SortBarStore {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            bars: IndexMap::new(),
        }
    }
}

impl SortBarStore {
    /// Whether a state was ever saved for this list. Distinct from `get`
    /// returning a default: an unstored list keeps whatever selection the
    /// bar already has.
    pub fn is_stored(&self, list_name: &str) -> bool {
        self.bars.contains_key(list_name)
    }

    pub fn get(&self, list_name: &str) -> Option<SortBarState> {
        self.bars.get(list_name).copied()
    }

    pub fn set(&mut self, list_name: &str, state: SortBarState) {
        self.bars.insert(list_name.to_string(), state);
    }

    pub fn from_json5(text: &str) -> anyhow::Result<Self> {
        let store: Self = json5::from_str(text).context("parsing sort-bar state file")?;
        Ok(store)
    }

    /// Load the store, falling back to an empty default on any problem.
    /// A corrupt or future-versioned state file should never keep the tool
    /// from starting.
    pub fn load_path(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Self::default();
            }
            Err(e) => {
                log::warn!("could not read sort settings from {path:?}: {e}");
                return Self::default();
            }
        };
        let store = match Self::from_json5(&text) {
            Ok(store) => store,
            Err(e) => {
                log::warn!("ignoring malformed sort settings in {path:?}: {e:#}");
                return Self::default();
            }
        };
        if store.version > STORE_VERSION {
            log::warn!(
                "ignoring sort settings in {path:?}: version {} is newer than {}",
                store.version,
                STORE_VERSION
            );
            return Self::default();
        }
        store
    }

    /// Serialize for the state file. Hand-formatted so the result stays
    /// stable and diff-friendly; `sortbar_store_roundtrips` pins it against
    /// the json5 reader. Every quoted string goes through the escaper, so a
    /// list name containing quotes or backslashes survives the trip.
    pub fn to_json5_pretty(&self) -> String {
        let mut out = String::new();
        out.push_str("{\n    ");
        write_escaped_string(&mut out, statics::STORE_FIELD_VERSION);
        out.push_str(&format!(": {},\n    ", self.version));
        write_escaped_string(&mut out, statics::STORE_FIELD_BARS);
        out.push_str(": {");
        if self.bars.is_empty() {
            out.push('}');
        } else {
            out.push('\n');
            let last = self.bars.len() - 1;
            for (i, (name, state)) in self.bars.iter().enumerate() {
                out.push_str("        ");
                write_escaped_string(&mut out, name);
                out.push_str(": {\n            ");
                write_escaped_string(&mut out, statics::STORE_FIELD_KEY);
                match state.key {
                    Some(key) => {
                        out.push_str(": ");
                        write_escaped_string(&mut out, key.as_str());
                        out.push_str(",\n            ");
                    }
                    None => out.push_str(": null,\n            "),
                }
                write_escaped_string(&mut out, statics::STORE_FIELD_DIRECTION);
                out.push_str(": ");
                write_escaped_string(&mut out, state.direction.as_str());
                out.push_str("\n        }");
                if i != last {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str("    }");
        }
        out.push_str("\n}\n");
        out
    }

    pub fn save_path(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| format!("creating {parent:?}"))?;
        }
        fs::write(path, self.to_json5_pretty()).with_context(|| format!("writing {path:?}"))
    }
}

fn write_escaped_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write as _;
                write!(out, "\\u{:04X}", c as u32).ok();
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Where the state file lives: the `KRST_STATE_FILE` override when set,
/// otherwise `.krst/sortbars.json5` under the user's home directory.
pub fn default_path() -> PathBuf {
    if let Some(custom) = std::env::var_os(statics::STORE_ENV_OVERRIDE)
        && !custom.is_empty()
    {
        return PathBuf::from(custom);
    }
    let home = std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
        .unwrap_or_default();
    home.join(statics::STORE_DIR_NAME)
        .join(statics::STORE_FILE_NAME)
}
