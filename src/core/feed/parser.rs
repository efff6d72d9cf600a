use roxmltree::{Document, Node, ParsingOptions};

use super::types::{Channel, FeedDocument, FeedItem, Thumbnail};

#[derive(Debug, thiserror::Error)]
pub enum FeedParseError {
    #[error("feed payload is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("xml feed parse error: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// Parses an RSS payload into a [`FeedDocument`].
///
/// Decoding is permissive: elements are matched by local name, unknown
/// elements are skipped and missing ones leave their field empty. Only a
/// payload that is not well-formed XML is rejected.
pub fn parse_feed_document(raw: &[u8]) -> Result<FeedDocument, FeedParseError> {
    let text = std::str::from_utf8(raw)?;
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    let doc = Document::parse_with_options(text, options)?;

    let mut channel = Channel::default();
    for node in element_children(doc.root_element(), "channel") {
        merge_channel(&mut channel, node);
    }

    Ok(FeedDocument { channel })
}

fn merge_channel(channel: &mut Channel, node: Node<'_, '_>) {
    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "title" => channel.title = direct_text(child),
            "description" => channel.description = direct_text(child),
            "item" => channel.items.push(item_from_node(child)),
            _ => {}
        }
    }
}

fn item_from_node(node: Node<'_, '_>) -> FeedItem {
    let mut item = FeedItem::default();
    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "title" => item.title = direct_text(child),
            "description" => item.description = direct_text(child),
            "link" => item.link = direct_text(child),
            "category" => item.category = direct_text(child),
            "pubDate" => item.pub_date = direct_text(child),
            "thumbnail" => merge_thumbnail(&mut item.thumbnail, child),
            _ => {}
        }
    }
    item
}

// A repeated thumbnail only overwrites the attributes it carries.
fn merge_thumbnail(thumbnail: &mut Thumbnail, node: Node<'_, '_>) {
    for (name, field) in [
        ("url", &mut thumbnail.url),
        ("width", &mut thumbnail.width),
        ("height", &mut thumbnail.height),
    ] {
        if let Some(value) = local_attribute(node, name) {
            *field = value.to_string();
        }
    }
}

fn element_children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

// Character data directly under `node`; text of nested elements is skipped.
fn direct_text(node: Node<'_, '_>) -> String {
    node.children()
        .filter(Node::is_text)
        .filter_map(|child| child.text())
        .collect()
}

fn local_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attributes()
        .find(|attribute| attribute.name() == name)
        .map(|attribute| attribute.value())
}
