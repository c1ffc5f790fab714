//! Markup tokenizer: configuration text to [`TagNode`] trees.
//!
//! Built on `quick-xml`. Attribute duplicate checks are switched off so that
//! repeated attribute names survive in document order; [`TagNode::attribute`]
//! then resolves them first-match.
use std::rc::Rc;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::TokenizeError;
use crate::tree::{TagKind, TagNode};

/// Deepest element nesting the lexer accepts.
pub const MAX_TAG_DEPTH: usize = 256;

/// Tracks line numbers for monotonically increasing byte offsets.
struct LineCounter<'a> {
    bytes: &'a [u8],
    offset: usize,
    line: u32,
}

impl<'a> LineCounter<'a> {
    const fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, pos: usize) -> u32 {
        let pos = pos.min(self.bytes.len());
        if pos < self.offset {
            self.offset = 0;
            self.line = 1;
        }
        let newlines = self
            .bytes
            .get(self.offset..pos)
            .map_or(0, |s| s.iter().filter(|&&b| b == b'\n').count());
        self.line = self
            .line
            .saturating_add(u32::try_from(newlines).unwrap_or(u32::MAX));
        self.offset = pos;
        self.line
    }

    /// Line of the `<` that opened the tag ending at `end`.
    fn tag_line(&mut self, end: usize) -> u32 {
        let end = end.min(self.bytes.len());
        let start = self
            .bytes
            .get(..end)
            .and_then(|s| s.iter().rposition(|&b| b == b'<'))
            .unwrap_or(end);
        self.line_at(start)
    }
}

/// Tokenize `text`, labelling every node with `file`.
///
/// Returns the top-level elements in document order.
///
/// # Errors
///
/// Returns a [`TokenizeError`] for malformed markup: mismatched or unclosed
/// tags, bad attribute syntax, invalid escapes, or nesting deeper than
/// [`MAX_TAG_DEPTH`].
pub fn tokenize(text: &str, file: &str) -> Result<Vec<TagNode>, TokenizeError> {
    let file: Rc<str> = Rc::from(file);
    let mut reader = Reader::from_str(text);
    let mut lines = LineCounter::new(text);
    let mut stack: Vec<TagNode> = Vec::new();
    let mut roots = Vec::new();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                let line = lines.line_at(reader.buffer_position());
                return Err(error(&file, line, e.to_string()));
            }
        };
        match event {
            Event::Start(start) => {
                let line = lines.tag_line(reader.buffer_position());
                if stack.len() >= MAX_TAG_DEPTH {
                    return Err(error(
                        &file,
                        line,
                        format!("tags nested deeper than {MAX_TAG_DEPTH} levels"),
                    ));
                }
                stack.push(open_node(&start, &file, line)?);
            }
            Event::Empty(start) => {
                let line = lines.tag_line(reader.buffer_position());
                let node = open_node(&start, &file, line)?;
                attach(&mut stack, &mut roots, node);
            }
            Event::End(_) => {
                if let Some(node) = stack.pop() {
                    attach(&mut stack, &mut roots, node);
                }
            }
            Event::Text(content) => {
                if let Some(node) = stack.last_mut() {
                    let line = lines.line_at(reader.buffer_position());
                    let decoded = content
                        .unescape()
                        .map_err(|e| error(&file, line, e.to_string()))?;
                    append_text(node, &decoded);
                }
            }
            Event::CData(content) => {
                if let Some(node) = stack.last_mut() {
                    append_text(node, &String::from_utf8_lossy(&content.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        let line = lines.line_at(text.len());
        return Err(error(
            &file,
            line,
            format!("unexpected end of file: unclosed tag <{}>", open.name()),
        ));
    }

    Ok(roots)
}

fn error(file: &str, line: u32, message: String) -> TokenizeError {
    TokenizeError {
        file: file.to_string(),
        line,
        message,
    }
}

fn open_node(start: &BytesStart<'_>, file: &Rc<str>, line: u32) -> Result<TagNode, TokenizeError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut node = TagNode::new(TagKind::from_name(&name), Rc::clone(file), line);

    let mut attributes = start.attributes();
    attributes.with_checks(false);
    for attribute in attributes {
        let attribute = attribute.map_err(|e| error(file, line, e.to_string()))?;
        let value = attribute
            .unescape_value()
            .map_err(|e| error(file, line, e.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref());
        node = node.with_attribute(&key, &value);
    }

    Ok(node)
}

fn append_text(node: &mut TagNode, text: &str) {
    node.text.get_or_insert_with(String::new).push_str(text);
}

fn attach(stack: &mut [TagNode], roots: &mut Vec<TagNode>, mut node: TagNode) {
    node.text = node
        .text
        .take()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_tree_with_text_and_attributes() {
        let roots = tokenize(
            "<JWM>\n  <RootMenu onroot=\"1\">\n    <Program label=\"Term\">xterm</Program>\n  </RootMenu>\n</JWM>\n",
            "rc",
        )
        .unwrap();
        assert_eq!(roots.len(), 1);
        let jwm = &roots[0];
        assert_eq!(jwm.kind, TagKind::Jwm);
        let menu = &jwm.children[0];
        assert_eq!(menu.kind, TagKind::RootMenu);
        assert_eq!(menu.attribute("onroot"), Some("1"));
        let program = &menu.children[0];
        assert_eq!(program.text(), Some("xterm"));
        assert_eq!(program.attribute("label"), Some("Term"));
    }

    #[test]
    fn records_line_of_opening_tag() {
        let roots = tokenize("<JWM>\n\n<Key\n  key=\"a\">close</Key>\n<Separator/>\n</JWM>", "rc").unwrap();
        assert_eq!(roots[0].line, 1);
        assert_eq!(roots[0].children[0].line, 3);
        assert_eq!(roots[0].children[1].line, 5);
    }

    #[test]
    fn keeps_duplicate_attributes_in_order() {
        let roots = tokenize(r#"<Tray x="1" x="2"/>"#, "rc").unwrap();
        let tray = &roots[0];
        assert_eq!(tray.attributes.len(), 2);
        assert_eq!(tray.attribute("x"), Some("1"));
    }

    #[test]
    fn whitespace_only_text_is_none() {
        let roots = tokenize("<Menu>\n   \n</Menu>", "rc").unwrap();
        assert_eq!(roots[0].text(), None);
    }

    #[test]
    fn unescapes_entities_and_cdata() {
        let roots = tokenize(
            "<JWM><Program>a &amp;&amp; b</Program><Program><![CDATA[x < y]]></Program></JWM>",
            "rc",
        )
        .unwrap();
        assert_eq!(roots[0].children[0].text(), Some("a && b"));
        assert_eq!(roots[0].children[1].text(), Some("x < y"));
    }

    #[test]
    fn unknown_tags_become_invalid() {
        let roots = tokenize("<JWM><Bogus/></JWM>", "rc").unwrap();
        assert_eq!(
            roots[0].children[0].kind,
            TagKind::Invalid("Bogus".to_string())
        );
    }

    #[test]
    fn mismatched_tag_is_an_error() {
        let err = tokenize("<JWM>\n<Menu></Tray>\n</JWM>", "bad.xml").unwrap_err();
        assert_eq!(err.file, "bad.xml");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn unclosed_tag_is_an_error() {
        let err = tokenize("<JWM><Menu>", "bad.xml").unwrap_err();
        assert!(err.message.contains("<Menu>"), "{}", err.message);
    }

    #[test]
    fn comments_and_declarations_are_skipped() {
        let roots = tokenize(
            "<?xml version=\"1.0\"?>\n<!-- hello -->\n<JWM><!-- inner --></JWM>",
            "rc",
        )
        .unwrap();
        assert_eq!(roots.len(), 1);
        assert!(roots[0].children.is_empty());
    }

    #[test]
    fn excessive_nesting_is_rejected() {
        let depth = MAX_TAG_DEPTH + 1;
        let text = format!("{}{}", "<Menu>".repeat(depth), "</Menu>".repeat(depth));
        assert!(tokenize(&text, "deep.xml").is_err());
    }
}
