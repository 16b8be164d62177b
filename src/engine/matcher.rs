use crate::engine::types::MindMapNode;

const NOTE_EXCERPT_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    None,
    /// The node's own TEXT matched; carries the original-case value.
    Text(String),
    /// A note matched; carries the truncated original-case excerpt.
    Note(String),
}

/// Evaluate one node against an already lower-cased query.
///
/// A note match wins over a text match for the same node, and only the first
/// matching note counts, so a node contributes at most one outcome.
pub fn match_node(node: &MindMapNode, query_lower: &str, search_notes: bool) -> MatchOutcome {
    if search_notes {
        for note in &node.notes {
            if note.to_lowercase().contains(query_lower) {
                return MatchOutcome::Note(excerpt(note));
            }
        }
    }

    if node.text.to_lowercase().contains(query_lower) {
        return MatchOutcome::Text(node.text.clone());
    }

    MatchOutcome::None
}

fn excerpt(note: &str) -> String {
    if note.chars().count() > NOTE_EXCERPT_LEN {
        let cut: String = note.chars().take(NOTE_EXCERPT_LEN).collect();
        format!("{}...", cut)
    } else {
        note.to_string()
    }
}
