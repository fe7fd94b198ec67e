use thiserror::Error;

/// Errors raised while parsing ConfigNode text. Lines are 1-based.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NodeParseError {
    #[error("line {line}: '{{' without a preceding node name")]
    BraceWithoutName { line: usize },
    #[error("line {line}: unmatched '}}'")]
    UnmatchedClose { line: usize },
    #[error("node '{name}' opened on line {line} is never closed")]
    UnclosedNode { line: usize, name: String },
}

/// One slot inside a node: either a `key = value` line or a nested child node.
/// Order and duplicates are both meaningful to the game, so entries stay in a
/// flat list instead of a map.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeEntry {
    Value { key: String, value: String },
    Child(ConfigNode),
}

/// Represents a node in KSP's ConfigNode text format (used by `.sfs` saves and
/// `.cfg` files alike): a name followed by a brace-delimited block of
/// `key = value` lines and nested nodes.
///
/// Values are opaque strings; the codec never interprets or reformats them,
/// which is what makes writer-canonical round-trips byte-exact.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigNode {
    pub name: String,
    pub entries: Vec<NodeEntry>,
}

impl ConfigNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Parse a whole document into an implicit root node (empty name).
    ///
    /// Accepts `{` on its own line or trailing the name line. Blank lines and
    /// `//` comments are skipped (they are cosmetic and not preserved). A
    /// name line that is never followed by `{` is dropped, matching the
    /// game's own tolerance for stray tokens.
    pub fn parse(text: &str) -> Result<ConfigNode, NodeParseError> {
        let mut root = ConfigNode::new(String::new());
        // Nodes still waiting for their closing brace, innermost last.
        let mut stack: Vec<(ConfigNode, usize)> = Vec::new();
        let mut pending_name: Option<String> = None;

        for (i, raw) in text.lines().enumerate() {
            let line = i + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }

            if trimmed == "{" {
                let Some(name) = pending_name.take() else {
                    return Err(NodeParseError::BraceWithoutName { line });
                };
                stack.push((ConfigNode::new(name), line));
                continue;
            }

            if trimmed == "}" {
                pending_name = None;
                let Some((done, _)) = stack.pop() else {
                    return Err(NodeParseError::UnmatchedClose { line });
                };
                let parent = match stack.last_mut() {
                    Some((node, _)) => node,
                    None => &mut root,
                };
                parent.entries.push(NodeEntry::Child(done));
                continue;
            }

            // Values split at the first '='; anything after it (including more
            // '=' characters) belongs to the value.
            if let Some((key, value)) = trimmed.split_once('=') {
                pending_name = None;
                let target = match stack.last_mut() {
                    Some((node, _)) => node,
                    None => &mut root,
                };
                target.entries.push(NodeEntry::Value {
                    key: key.trim().to_string(),
                    value: value.trim().to_string(),
                });
                continue;
            }

            // Name with the brace on the same line, e.g. `KERBAL {`.
            if let Some(name) = trimmed.strip_suffix('{') {
                pending_name = None;
                stack.push((ConfigNode::new(name.trim().to_string()), line));
                continue;
            }

            pending_name = Some(trimmed.to_string());
        }

        if let Some((unclosed, line)) = stack.pop() {
            return Err(NodeParseError::UnclosedNode {
                line,
                name: unclosed.name,
            });
        }
        Ok(root)
    }

    /// Serialize this document the way the game writes it: tab indentation,
    /// `key = value` with a space on both sides of `=`, node names on their
    /// own line with `{`/`}` lines below. The root emits only its entries.
    pub fn to_sfs_string(&self, newline: &str) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            entry.write_to(&mut out, 0, newline);
        }
        out
    }

    /// Write this node as a named block at the given depth.
    pub fn write_to(&self, out: &mut String, depth: usize, newline: &str) {
        let indent = "\t".repeat(depth);
        out.push_str(&indent);
        out.push_str(&self.name);
        out.push_str(newline);
        out.push_str(&indent);
        out.push('{');
        out.push_str(newline);
        for entry in &self.entries {
            entry.write_to(out, depth + 1, newline);
        }
        out.push_str(&indent);
        out.push('}');
        out.push_str(newline);
    }

    /// First value stored under `key`, if any.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.iter().find_map(|entry| match entry {
            NodeEntry::Value { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// All `key = value` entries in order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|entry| match entry {
            NodeEntry::Value { key, value } => Some((key.as_str(), value.as_str())),
            _ => None,
        })
    }

    /// Replace the first value stored under `key`, or append a new entry if
    /// the key is not present yet.
    pub fn set_value(&mut self, key: &str, value: &str) {
        for entry in &mut self.entries {
            if let NodeEntry::Value { key: k, value: v } = entry
                && k == key
            {
                *v = value.to_string();
                return;
            }
        }
        self.entries.push(NodeEntry::Value {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    /// First child node named `name`, if any.
    pub fn child(&self, name: &str) -> Option<&ConfigNode> {
        self.entries.iter().find_map(|entry| match entry {
            NodeEntry::Child(node) if node.name == name => Some(node),
            _ => None,
        })
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut ConfigNode> {
        self.entries.iter_mut().find_map(|entry| match entry {
            NodeEntry::Child(node) if node.name == name => Some(node),
            _ => None,
        })
    }

    /// All child nodes named `name`, in document order.
    pub fn children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ConfigNode> {
        self.entries.iter().filter_map(move |entry| match entry {
            NodeEntry::Child(node) if node.name == name => Some(node),
            _ => None,
        })
    }
}

impl NodeEntry {
    fn write_to(&self, out: &mut String, depth: usize, newline: &str) {
        match self {
            NodeEntry::Value { key, value } => {
                out.push_str(&"\t".repeat(depth));
                out.push_str(key);
                // An empty value still gets the trailing space after '='.
                out.push_str(" = ");
                out.push_str(value);
                out.push_str(newline);
            }
            NodeEntry::Child(node) => node.write_to(out, depth, newline),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigNode, NodeEntry, NodeParseError};
    use crate::statics;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_builds_nested_nodes_in_order() {
        let doc = ConfigNode::parse(
            "GAME\n{\n\tversion = 1.12.5\n\tROSTER\n\t{\n\t\tKERBAL\n\t\t{\n\t\t\tname = Jebediah Kerman\n\t\t}\n\t}\n}\n",
        )
        .unwrap();

        let game = doc.child("GAME").unwrap();
        assert_eq!(game.value("version"), Some("1.12.5"));
        let roster = game.child("ROSTER").unwrap();
        let kerbal = roster.child("KERBAL").unwrap();
        assert_eq!(kerbal.value("name"), Some("Jebediah Kerman"));
    }

    #[test]
    fn parse_accepts_brace_on_name_line() {
        let doc = ConfigNode::parse("NODE {\n\ta = 1\n}\n").unwrap();
        assert_eq!(doc.child("NODE").unwrap().value("a"), Some("1"));
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let doc = ConfigNode::parse("// header\n\nNODE\n{\n\t// inner\n\ta = 1\n\n}\n").unwrap();
        assert_eq!(doc.child("NODE").unwrap().value("a"), Some("1"));
    }

    #[test]
    fn parse_preserves_duplicate_keys_and_children() {
        let doc = ConfigNode::parse("N\n{\n\tk = 1\n\tk = 2\n}\nN\n{\n\tk = 3\n}\n").unwrap();
        assert_eq!(doc.children("N").count(), 2);
        let first = doc.child("N").unwrap();
        let values: Vec<_> = first.values().collect();
        assert_eq!(values, vec![("k", "1"), ("k", "2")]);
    }

    #[test]
    fn parse_empty_value_and_embedded_equals() {
        let doc = ConfigNode::parse("N\n{\n\tempty = \n\texpr = a = b\n}\n").unwrap();
        let node = doc.child("N").unwrap();
        assert_eq!(node.value("empty"), Some(""));
        assert_eq!(node.value("expr"), Some("a = b"));
    }

    #[test]
    fn parse_reports_brace_without_name() {
        let err = ConfigNode::parse("N\n{\n\ta = 1\n}\n{\n}\n").unwrap_err();
        assert_eq!(err, NodeParseError::BraceWithoutName { line: 5 });
    }

    #[test]
    fn parse_reports_unmatched_close() {
        let err = ConfigNode::parse("N\n{\n}\n}\n").unwrap_err();
        assert_eq!(err, NodeParseError::UnmatchedClose { line: 4 });
    }

    #[test]
    fn parse_reports_unclosed_node_with_start_line() {
        let err = ConfigNode::parse("OUTER\n{\n\tINNER\n\t{\n\t\ta = 1\n").unwrap_err();
        assert_eq!(
            err,
            NodeParseError::UnclosedNode {
                line: 4,
                name: "INNER".to_string(),
            }
        );
    }

    #[test]
    fn writer_emits_game_style_text() {
        let mut kerbal = ConfigNode::new("KERBAL");
        kerbal.set_value("name", "Valentina Kerman");
        kerbal.set_value("note", "");
        let mut root = ConfigNode::new(String::new());
        root.entries.push(NodeEntry::Child(kerbal));

        assert_eq!(
            root.to_sfs_string(statics::NL_LF),
            "KERBAL\n{\n\tname = Valentina Kerman\n\tnote = \n}\n"
        );
    }

    #[test]
    fn writer_respects_crlf_newline() {
        let mut node = ConfigNode::new("N");
        node.set_value("a", "1");
        let mut root = ConfigNode::new(String::new());
        root.entries.push(NodeEntry::Child(node));

        assert_eq!(
            root.to_sfs_string(statics::NL_CRLF),
            "N\r\n{\r\n\ta = 1\r\n}\r\n"
        );
    }

    #[test]
    fn canonical_text_roundtrips_byte_for_byte() {
        let input = "GAME\n{\n\tversion = 1.12.5\n\tROSTER\n\t{\n\t\tKERBAL\n\t\t{\n\t\t\tname = Bob Kerman\n\t\t\tbrave = 0.5\n\t\t}\n\t}\n}\n";
        let doc = ConfigNode::parse(input).unwrap();
        assert_eq!(doc.to_sfs_string(statics::NL_LF), input);
    }

    #[test]
    fn parse_of_written_tree_is_identity() {
        let mut kerbal = ConfigNode::new("KERBAL");
        kerbal.set_value("name", "Bill Kerman");
        kerbal.set_value("expr", "a = b");
        let mut roster = ConfigNode::new("ROSTER");
        roster.entries.push(NodeEntry::Child(kerbal));
        let mut root = ConfigNode::new(String::new());
        root.set_value("version", "1");
        root.entries.push(NodeEntry::Child(roster));

        let text = root.to_sfs_string(statics::NL_LF);
        assert_eq!(ConfigNode::parse(&text).unwrap(), root);
    }

    #[test]
    fn set_value_replaces_first_occurrence_only() {
        let mut node = ConfigNode::parse("N\n{\n\tk = 1\n\tk = 2\n}\n")
            .unwrap()
            .child("N")
            .unwrap()
            .clone();
        node.set_value("k", "9");
        let values: Vec<_> = node.values().collect();
        assert_eq!(values, vec![("k", "9"), ("k", "2")]);
    }

    #[test]
    fn stray_name_line_is_dropped() {
        // A bare token with no following brace is ignored, as the game does.
        let doc = ConfigNode::parse("stray\nN\n{\n\ta = 1\n}\n").unwrap();
        assert_eq!(doc.children("stray").count(), 0);
        assert_eq!(doc.child("N").unwrap().value("a"), Some("1"));
    }
}
