use crate::engine::types::{MindMapNode, ParseError};

/// Parse one `.mm` file's bytes into an owned element tree.
///
/// FreeMind writes the `&nbsp;` entity without declaring it, which breaks
/// strict XML parsers, so it is substituted with a plain space on the raw
/// text before parsing.
pub fn parse_mind_map(bytes: &[u8]) -> Result<MindMapNode, ParseError> {
    let text = std::str::from_utf8(bytes)?;
    let corrected = text.replace("&nbsp;", " ");
    let doc = roxmltree::Document::parse(&corrected)?;
    Ok(build_node(doc.root_element()))
}

fn build_node(element: roxmltree::Node) -> MindMapNode {
    // richcontent is collected per FreeMind node, from all descendants, so a
    // node also carries the notes of its nested children
    let notes = if element.tag_name().name() == "node" {
        element
            .descendants()
            .filter(|d| d.is_element() && d.tag_name().name() == "richcontent")
            .map(text_content)
            .collect()
    } else {
        Vec::new()
    };

    MindMapNode {
        text: element.attribute("TEXT").unwrap_or_default().to_string(),
        notes,
        children: element
            .children()
            .filter(|c| c.is_element())
            .map(build_node)
            .collect(),
    }
}

/// Concatenated text nodes under `element`, document order.
fn text_content(element: roxmltree::Node) -> String {
    element
        .descendants()
        .filter(|d| d.is_text())
        .filter_map(|d| d.text())
        .collect()
}
