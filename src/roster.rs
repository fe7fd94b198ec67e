use crate::node::{ConfigNode, NodeEntry};
use crate::statics;
use anyhow::Context;
use std::{
    cmp::Ordering,
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

/// The four crew lists the Astronaut Complex displays. `name()` is the stable
/// list name used to key the persisted sort-bar states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrewList {
    #[default]
    Available,
    Assigned,
    Killed,
    Applicants,
}

impl CrewList {
    pub fn name(self) -> &'static str {
        match self {
            CrewList::Available => statics::LIST_NAME_AVAILABLE,
            CrewList::Assigned => statics::LIST_NAME_ASSIGNED,
            CrewList::Killed => statics::LIST_NAME_KILLED,
            CrewList::Applicants => statics::LIST_NAME_APPLICANTS,
        }
    }
}

/// One indexed crew entry: where its `KERBAL` node sits in the roster plus
/// the attributes the sort criteria and tables read. Missing attributes fall
/// back to neutral defaults rather than failing the load.
#[derive(Debug, Clone, PartialEq)]
pub struct CrewSummary {
    pub entry_index: usize,
    pub name: String,
    pub profession: String,
    pub gender: String,
    pub level: u8,
    pub courage: f64,
    pub stupidity: f64,
    pub veteran: bool,
    pub badass: bool,
    pub status: String,
}

/// An index of the roster block to allow list-wise access without rescanning
/// the tree. Built once upon loading or modifying the roster.
#[derive(Debug, Clone)]
pub struct RosterIndex {
    pub available: Vec<CrewSummary>,
    pub assigned: Vec<CrewSummary>,
    pub killed: Vec<CrewSummary>,
    pub applicants: Vec<CrewSummary>,
    /// Total number of KERBAL entries, including ones no list claims
    /// (tourists, unowned).
    pub total: usize,
}

impl RosterIndex {
    pub fn empty() -> Self {
        Self {
            available: Vec::new(),
            assigned: Vec::new(),
            killed: Vec::new(),
            applicants: Vec::new(),
            total: 0,
        }
    }

    pub fn list(&self, list: CrewList) -> &[CrewSummary] {
        match list {
            CrewList::Available => &self.available,
            CrewList::Assigned => &self.assigned,
            CrewList::Killed => &self.killed,
            CrewList::Applicants => &self.applicants,
        }
    }
}

/// Represents a loaded save file, preserving its original bytes to ensure
/// byte-for-byte roundtripping if unmodified.
#[derive(Debug, Clone)]
pub struct LoadedRoster {
    pub source_path: Option<PathBuf>,
    pub line_ending: LineEnding,
    pub original_bytes: Vec<u8>,
    pub root: ConfigNode,
    pub dirty: bool,
    pub index: RosterIndex,
}

impl LoadedRoster {
    pub fn load_path(path: &Path) -> anyhow::Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading {path:?}"))?;
        let line_ending = detect_line_ending(&bytes);
        let text = std::str::from_utf8(&bytes).context("save file is not valid UTF-8")?;
        let root = ConfigNode::parse(text).with_context(|| format!("parsing {path:?}"))?;

        let mut roster = Self {
            source_path: Some(path.to_path_buf()),
            line_ending,
            original_bytes: bytes,
            root,
            dirty: false,
            index: RosterIndex::empty(),
        };
        if roster.roster_node().is_none() {
            anyhow::bail!("{path:?} has no ROSTER node");
        }
        roster.rebuild_index();
        Ok(roster)
    }

    /// The save's `ROSTER` block: under the `GAME` root in a full save, or at
    /// top level in a bare roster file.
    pub fn roster_node(&self) -> Option<&ConfigNode> {
        self.root
            .child(statics::SFS_NODE_GAME)
            .and_then(|game| game.child(statics::SFS_NODE_ROSTER))
            .or_else(|| self.root.child(statics::SFS_NODE_ROSTER))
    }

    pub fn roster_node_mut(&mut self) -> Option<&mut ConfigNode> {
        let under_game = self
            .root
            .child(statics::SFS_NODE_GAME)
            .is_some_and(|game| game.child(statics::SFS_NODE_ROSTER).is_some());
        if under_game {
            return self
                .root
                .child_mut(statics::SFS_NODE_GAME)?
                .child_mut(statics::SFS_NODE_ROSTER);
        }
        self.root.child_mut(statics::SFS_NODE_ROSTER)
    }

    pub fn rebuild_index(&mut self) {
        self.index = match self.roster_node() {
            Some(roster) => build_index(roster),
            None => RosterIndex::empty(),
        };
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Recompute `dirty` by comparing the current serialized bytes to
    /// `original_bytes`. Only meaningful when the source was writer-canonical:
    /// comment-only differences would read as dirt.
    pub fn refresh_dirty(&mut self) {
        self.dirty = self.generate_bytes() != self.original_bytes;
    }

    /// Serialize the tree regardless of current `dirty` state, using the
    /// line ending detected at load time.
    pub fn generate_bytes(&self) -> Vec<u8> {
        let newline = match self.line_ending {
            LineEnding::Lf => statics::NL_LF,
            LineEnding::CrLf => statics::NL_CRLF,
        };
        self.root.to_sfs_string(newline).into_bytes()
    }

    /// Bytes to persist: the original bytes verbatim while unmodified,
    /// otherwise the re-serialized tree.
    pub fn save_bytes(&self) -> Vec<u8> {
        if !self.dirty {
            return self.original_bytes.clone();
        }
        self.generate_bytes()
    }

    pub fn save_to_path(&mut self, path: &Path) -> anyhow::Result<()> {
        let bytes = self.save_bytes();
        fs::write(path, &bytes).with_context(|| format!("writing {path:?}"))?;

        self.source_path = Some(path.to_path_buf());
        self.original_bytes = bytes;
        self.dirty = false;
        Ok(())
    }

    /// Stable-sort the entries belonging to `list`, writing them back into
    /// the same entry slots so every non-member keeps its exact position.
    /// Returns whether the order actually changed; the file is marked dirty
    /// and re-indexed only in that case.
    pub fn sort_list<F>(&mut self, list: CrewList, mut compare: F) -> bool
    where
        F: FnMut(&CrewSummary, &CrewSummary) -> Ordering,
    {
        let members = self.index.list(list).to_vec();
        if members.len() < 2 {
            return false;
        }
        let slots: Vec<usize> = members.iter().map(|m| m.entry_index).collect();

        let mut ordered = members;
        ordered.sort_by(|a, b| compare(a, b));

        if ordered.iter().map(|m| m.entry_index).eq(slots.iter().copied()) {
            return false;
        }

        let Some(roster) = self.roster_node_mut() else {
            return false;
        };
        let moved: Vec<NodeEntry> = ordered
            .iter()
            .map(|m| roster.entries[m.entry_index].clone())
            .collect();
        for (slot, entry) in slots.iter().zip(moved) {
            roster.entries[*slot] = entry;
        }

        self.mark_dirty();
        self.rebuild_index();
        true
    }

    /// Move the first applicant with this name into the available crew.
    pub fn hire(&mut self, name: &str) -> anyhow::Result<()> {
        let entry_index = self
            .index
            .applicants
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.entry_index)
            .with_context(|| format!("no applicant named {name:?}"))?;

        let kerbal = self.kerbal_entry_mut(entry_index)?;
        kerbal.set_value(statics::KERBAL_KEY_TYPE, statics::KERBAL_TYPE_CREW);
        kerbal.set_value(statics::KERBAL_KEY_STATE, statics::KERBAL_STATE_AVAILABLE);

        self.mark_dirty();
        self.rebuild_index();
        Ok(())
    }

    /// Return the first available crew member with this name to the
    /// applicant pool.
    pub fn sack(&mut self, name: &str) -> anyhow::Result<()> {
        let entry_index = self
            .index
            .available
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.entry_index)
            .with_context(|| format!("no available crew member named {name:?}"))?;

        let kerbal = self.kerbal_entry_mut(entry_index)?;
        kerbal.set_value(statics::KERBAL_KEY_TYPE, statics::KERBAL_TYPE_APPLICANT);

        self.mark_dirty();
        self.rebuild_index();
        Ok(())
    }

    fn kerbal_entry_mut(&mut self, entry_index: usize) -> anyhow::Result<&mut ConfigNode> {
        let roster = self.roster_node_mut().context("save has no ROSTER node")?;
        match roster.entries.get_mut(entry_index) {
            Some(NodeEntry::Child(node)) => Ok(node),
            _ => anyhow::bail!("roster entry {entry_index} is not a KERBAL node"),
        }
    }
}

fn detect_line_ending(text_bytes: &[u8]) -> LineEnding {
    // Detect by counting actual newline terminators.
    // Using "any CRLF anywhere" can mis-detect if the file contains occasional CRLF
    // sequences for reasons other than line endings (or has a few mixed lines).
    let mut lf_count = 0usize;
    let mut crlf_count = 0usize;

    for (i, b) in text_bytes.iter().enumerate() {
        if *b != b'\n' {
            continue;
        }
        if i > 0 && text_bytes[i - 1] == b'\r' {
            crlf_count += 1;
        } else {
            lf_count += 1;
        }
    }

    if crlf_count > lf_count {
        LineEnding::CrLf
    } else {
        LineEnding::Lf
    }
}

fn build_index(roster: &ConfigNode) -> RosterIndex {
    let mut index = RosterIndex::empty();

    for (entry_index, entry) in roster.entries.iter().enumerate() {
        let NodeEntry::Child(node) = entry else {
            continue;
        };
        if node.name != statics::SFS_NODE_KERBAL {
            continue;
        }
        index.total += 1;

        let summary = summarize_kerbal(node, entry_index);
        let kind = node.value(statics::KERBAL_KEY_TYPE).unwrap_or_default();
        let state = node.value(statics::KERBAL_KEY_STATE).unwrap_or_default();

        if kind == statics::KERBAL_TYPE_APPLICANT {
            index.applicants.push(summary);
        } else if kind == statics::KERBAL_TYPE_CREW {
            if state == statics::KERBAL_STATE_DEAD || state == statics::KERBAL_STATE_MISSING {
                index.killed.push(summary);
            } else if state == statics::KERBAL_STATE_ASSIGNED {
                index.assigned.push(summary);
            } else if state == statics::KERBAL_STATE_AVAILABLE {
                index.available.push(summary);
            }
            // Other states stay out of every list but keep their file entry.
        }
    }

    index
}

fn summarize_kerbal(node: &ConfigNode, entry_index: usize) -> CrewSummary {
    let text = |key: &str| node.value(key).unwrap_or(statics::EN_EMPTY).to_string();
    let number = |key: &str, default: f64| {
        node.value(key)
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(default)
    };
    let flag = |key: &str| node.value(key).is_some_and(parse_sfs_bool);

    CrewSummary {
        entry_index,
        name: text(statics::KERBAL_KEY_NAME),
        profession: text(statics::KERBAL_KEY_TRAIT),
        gender: text(statics::KERBAL_KEY_GENDER),
        level: level_for_experience(number(statics::KERBAL_KEY_EXPERIENCE, 0.0)),
        courage: number(statics::KERBAL_KEY_BRAVE, 0.5),
        stupidity: number(statics::KERBAL_KEY_DUMB, 0.5),
        veteran: flag(statics::KERBAL_KEY_VETERAN),
        badass: flag(statics::KERBAL_KEY_BADASS),
        status: text(statics::KERBAL_KEY_STATE),
    }
}

// The game writes booleans as `True`/`False`.
fn parse_sfs_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}

fn level_for_experience(experience: f64) -> u8 {
    statics::KERBAL_XP_THRESHOLDS
        .iter()
        .filter(|threshold| experience >= **threshold)
        .count() as u8
}
