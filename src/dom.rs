use log::{debug, trace, warn};

use crate::error::Error;

/// Handle to a node in a [`Document`] arena.
///
/// Ids are only meaningful for the document that created them; using one
/// against another document fails with [`Error::MissingNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// What a node is: an element with a tag and attributes, or a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text {
        content: String,
    },
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// One end of a selection range.
///
/// For text nodes the offset counts chars into the content; for element
/// nodes it is a child index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub node: NodeId,
    pub offset: usize,
}

/// A selection range: a start/end boundary pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: Boundary,
    pub end: Boundary,
}

/// In-memory stand-in for the host document: a node arena plus the
/// current selection.
///
/// Nodes are created detached and wired up with [`Document::append_child`]
/// or the [`Document::build`] DSL; nothing is ever removed from the arena,
/// so ids stay valid for the document's lifetime.
#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<Node>,
    ranges: Vec<Range>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- construction ----

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element {
            tag: tag.to_string(),
            attrs: Vec::new(),
        })
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(NodeData::Text {
            content: content.to_string(),
        })
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), Error> {
        match &mut self.node_mut(node)?.data {
            NodeData::Element { attrs, .. } => {
                match attrs.iter_mut().find(|(n, _)| n == name) {
                    Some(entry) => entry.1 = value.to_string(),
                    None => attrs.push((name.to_string(), value.to_string())),
                }
                Ok(())
            }
            NodeData::Text { .. } => Err(Error::MissingNode),
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        self.node(parent)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Assembles a subtree through the builder DSL and returns its root.
    ///
    /// ```
    /// # use keysim::dom::Document;
    /// let mut doc = Document::new();
    /// let root = doc.build(|t| {
    ///     let hello = t.text("hello");
    ///     let em = t.el("em", &[], vec![hello]);
    ///     t.el("p", &[("class", "greeting")], vec![em])
    /// });
    /// assert_eq!(doc.text_of(root).unwrap(), "hello");
    /// ```
    pub fn build<F>(&mut self, f: F) -> NodeId
    where
        F: FnOnce(&mut Builder<'_>) -> NodeId,
    {
        let mut builder = Builder { doc: self };
        f(&mut builder)
    }

    /// Parses trimmed markup into a detached container element.
    ///
    /// Handles the fixture subset of HTML: nested elements, quoted or bare
    /// attribute values, text with the five named entities, self-closing
    /// and void tags. Anything else is [`Error::Parse`].
    pub fn from_html(&mut self, html: &str) -> Result<NodeId, Error> {
        let container = self.create_element("div");
        let mut parser = HtmlParser::new(html.trim());
        let children = parser.parse_nodes(self, None)?;
        for child in children {
            self.append_child(container, child)?;
        }
        Ok(container)
    }

    // ---- queries ----

    fn node(&self, id: NodeId) -> Result<&Node, Error> {
        self.nodes.get(id.0).ok_or(Error::MissingNode)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, Error> {
        self.nodes.get_mut(id.0).ok_or(Error::MissingNode)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn data(&self, id: NodeId) -> Result<&NodeData, Error> {
        Ok(&self.node(id)?.data)
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(
            self.nodes.get(id.0).map(|n| &n.data),
            Some(NodeData::Text { .. })
        )
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.nodes.get(id.0).map(|n| &n.data) {
            Some(NodeData::Element { tag, .. }) => Some(tag),
            _ => None,
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match self.nodes.get(id.0).map(|n| &n.data) {
            Some(NodeData::Element { attrs, .. }) => attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        match self.nodes.get(id.0).map(|n| &n.data) {
            Some(NodeData::Text { content }) => Some(content),
            _ => None,
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    fn root_of(&self, mut id: NodeId) -> NodeId {
        while let Some(parent) = self.parent(id) {
            id = parent;
        }
        id
    }

    /// Full text content of a subtree, in document order.
    pub fn text_of(&self, root: NodeId) -> Result<String, Error> {
        self.node(root)?;
        let mut out = String::new();
        for id in self.in_document_order(root) {
            if let Some(text) = self.text_content(id) {
                out.push_str(text);
            }
        }
        Ok(out)
    }

    /// Walks the subtree under `root` until the predicate holds.
    ///
    /// Stack-based, not recursive, so arbitrarily deep trees are fine.
    /// Children are pushed in order, which means the last child of each
    /// node is visited first; with a predicate matching a unique node the
    /// visit order is immaterial.
    pub fn walk_until<P>(&self, root: NodeId, predicate: P) -> Result<Option<NodeId>, Error>
    where
        P: Fn(&Document, NodeId) -> bool,
    {
        self.node(root)?;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if predicate(self, id) {
                return Ok(Some(id));
            }
            stack.extend_from_slice(self.children(id));
        }
        Ok(None)
    }

    /// Subtree nodes in document order (pre-order, first child first).
    fn in_document_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            for &child in self.children(id).iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    // ---- selection ----

    pub fn clear_selection(&mut self) {
        self.ranges.clear();
    }

    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    /// Adds a range without clearing the selection. Multi-range selections
    /// are not supported by the query side; this exists so hosts can set
    /// one up and tests can observe the resulting fault.
    pub fn add_range(&mut self, range: Range) -> Result<(), Error> {
        self.node(range.start.node)?;
        self.node(range.end.node)?;
        self.ranges.push(range);
        Ok(())
    }

    /// Clears any existing selection and applies a new range spanning the
    /// given boundaries.
    pub fn select_range(
        &mut self,
        start_node: NodeId,
        start_offset: usize,
        end_node: NodeId,
        end_offset: usize,
    ) -> Result<(), Error> {
        self.node(start_node)?;
        self.node(end_node)?;
        self.ranges.clear();
        self.ranges.push(Range {
            start: Boundary {
                node: start_node,
                offset: start_offset,
            },
            end: Boundary {
                node: end_node,
                offset: end_offset,
            },
        });
        debug!(
            "selection set: {:?}:{} .. {:?}:{}",
            start_node, start_offset, end_node, end_offset
        );
        Ok(())
    }

    /// Selects from the first occurrence of `start_text` under
    /// `start_container` to the end of the first occurrence of `end_text`
    /// under `end_container`.
    ///
    /// Fails with [`Error::TextNotFound`] when either substring has no
    /// containing text node under its container.
    pub fn select_text_range(
        &mut self,
        start_text: &str,
        start_container: NodeId,
        end_text: &str,
        end_container: NodeId,
    ) -> Result<(), Error> {
        let start_node = self
            .find_text_node(start_container, start_text)?
            .ok_or_else(|| Error::TextNotFound(start_text.to_string()))?;
        let end_node = self
            .find_text_node(end_container, end_text)?
            .ok_or_else(|| Error::TextNotFound(end_text.to_string()))?;

        let start_offset = char_index_of(self.text_content(start_node).unwrap_or(""), start_text);
        let end_offset = char_index_of(self.text_content(end_node).unwrap_or(""), end_text)
            + end_text.chars().count();
        self.select_range(start_node, start_offset, end_node, end_offset)
    }

    /// Single-substring form of [`Document::select_text_range`]: selects
    /// the first occurrence of `text` under `container`.
    pub fn select_text(&mut self, text: &str, container: NodeId) -> Result<(), Error> {
        self.select_text_range(text, container, text, container)
    }

    fn find_text_node(&self, container: NodeId, needle: &str) -> Result<Option<NodeId>, Error> {
        self.walk_until(container, |doc, id| {
            doc.text_content(id).is_some_and(|t| t.contains(needle))
        })
    }

    /// Collapses the selection to a single position.
    pub fn move_cursor_to(&mut self, node: NodeId, offset: usize) -> Result<(), Error> {
        self.select_range(node, offset, node, offset)
    }

    /// Sets the selection to the given (possibly collapsed) range.
    pub fn move_cursor_to_range(
        &mut self,
        node: NodeId,
        offset: usize,
        end_node: NodeId,
        end_offset: usize,
    ) -> Result<(), Error> {
        self.select_range(node, offset, end_node, end_offset)
    }

    /// The anchor node and offset of the current selection.
    pub fn cursor_position(&self) -> Option<Boundary> {
        self.ranges.first().map(|r| r.start)
    }

    /// The current selection's string.
    ///
    /// `Ok(None)` when nothing is selected; [`Error::MultipleRanges`] when
    /// more than one range exists. An element start boundary contributes
    /// its whole subtree; an element end boundary ends the selection
    /// before its content.
    pub fn selected_text(&self) -> Result<Option<String>, Error> {
        match self.ranges.len() {
            0 => Ok(None),
            1 => Ok(Some(self.text_between(self.ranges[0]))),
            n => Err(Error::MultipleRanges(n)),
        }
    }

    fn text_between(&self, range: Range) -> String {
        let Range { start, end } = range;
        if start.node == end.node {
            if let Some(content) = self.text_content(start.node) {
                return slice_chars(content, start.offset, end.offset);
            }
            // element range: offsets are child indices
            let children = self.children(start.node);
            let hi = end.offset.min(children.len());
            let lo = start.offset.min(hi);
            return children[lo..hi]
                .iter()
                .filter_map(|&c| self.text_of(c).ok())
                .collect();
        }
        let root = self.root_of(start.node);
        let mut out = String::new();
        let mut in_range = false;
        for id in self.in_document_order(root) {
            if id == start.node {
                in_range = true;
                if let Some(content) = self.text_content(id) {
                    out.push_str(&slice_chars(content, start.offset, content.chars().count()));
                    continue;
                }
            }
            if id == end.node {
                if let Some(content) = self.text_content(id) {
                    out.push_str(&slice_chars(content, 0, end.offset));
                }
                break;
            }
            if in_range && id != start.node {
                if let Some(content) = self.text_content(id) {
                    out.push_str(content);
                }
            }
        }
        out
    }

    /// The stand-in for the native text-insertion editing command: splices
    /// `text` at the selection anchor and leaves a collapsed cursor after
    /// the inserted run.
    ///
    /// With no selection this is a no-op, as the native command would be.
    /// An element-anchored cursor gets a fresh text node at the child
    /// index the offset names.
    pub fn insert_text_at_cursor(&mut self, text: &str) -> Result<(), Error> {
        let Some(anchor) = self.cursor_position() else {
            warn!("insert_text_at_cursor with no selection; ignoring");
            return Ok(());
        };
        if self.text_content(anchor.node).is_some() {
            let inserted = text.chars().count();
            if let NodeData::Text { content } = &mut self.node_mut(anchor.node)?.data {
                let at = byte_index(content, anchor.offset);
                content.insert_str(at, text);
            }
            self.move_cursor_to(anchor.node, anchor.offset + inserted)
        } else {
            let child = self.create_text(text);
            self.node_mut(child)?.parent = Some(anchor.node);
            let parent = self.node_mut(anchor.node)?;
            let at = anchor.offset.min(parent.children.len());
            parent.children.insert(at, child);
            self.move_cursor_to(child, text.chars().count())
        }
    }
}

/// Builder handed to the [`Document::build`] closure.
pub struct Builder<'a> {
    doc: &'a mut Document,
}

impl Builder<'_> {
    /// Creates an element, applies the attributes in order, and appends
    /// the children in order.
    pub fn el(&mut self, tag: &str, attrs: &[(&str, &str)], children: Vec<NodeId>) -> NodeId {
        let id = self.doc.create_element(tag);
        for (name, value) in attrs {
            // id is fresh, set_attribute cannot fail
            let _ = self.doc.set_attribute(id, name, value);
        }
        for child in children {
            let _ = self.doc.append_child(id, child);
        }
        id
    }

    pub fn text(&mut self, content: &str) -> NodeId {
        self.doc.create_text(content)
    }
}

// Offsets are char-based; these translate to and from byte positions.

fn byte_index(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

fn slice_chars(s: &str, start: usize, end: usize) -> String {
    if end <= start {
        return String::new();
    }
    s.chars().skip(start).take(end - start).collect()
}

fn char_index_of(haystack: &str, needle: &str) -> usize {
    match haystack.find(needle) {
        Some(byte_idx) => haystack[..byte_idx].chars().count(),
        None => 0,
    }
}

// ---- minimal markup parser for fixtures ----

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta"];

struct HtmlParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> HtmlParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn parse_nodes(
        &mut self,
        doc: &mut Document,
        enclosing: Option<&str>,
    ) -> Result<Vec<NodeId>, Error> {
        let mut nodes = Vec::new();
        loop {
            if self.rest().is_empty() {
                if let Some(tag) = enclosing {
                    return Err(Error::Parse(format!("unclosed <{tag}>")));
                }
                return Ok(nodes);
            }
            if self.rest().starts_with("</") {
                let Some(tag) = enclosing else {
                    return Err(Error::Parse("unexpected closing tag".to_string()));
                };
                self.expect_close(tag)?;
                return Ok(nodes);
            }
            if self.rest().starts_with('<') {
                nodes.push(self.parse_element(doc)?);
            } else {
                nodes.push(self.parse_text(doc));
            }
        }
    }

    fn parse_text(&mut self, doc: &mut Document) -> NodeId {
        let raw = match self.rest().find('<') {
            Some(end) => {
                let raw = &self.rest()[..end];
                self.pos += end;
                raw
            }
            None => {
                let raw = self.rest();
                self.pos = self.input.len();
                raw
            }
        };
        doc.create_text(&decode_entities(raw))
    }

    fn parse_element(&mut self, doc: &mut Document) -> Result<NodeId, Error> {
        self.pos += 1; // '<'
        let tag = self.take_name()?;
        trace!("parsing <{tag}>");
        let element = doc.create_element(&tag);

        loop {
            self.skip_whitespace();
            if self.rest().starts_with("/>") {
                self.pos += 2;
                return Ok(element);
            }
            if self.rest().starts_with('>') {
                self.pos += 1;
                break;
            }
            if self.rest().is_empty() {
                return Err(Error::Parse(format!("unterminated <{tag}>")));
            }
            let (name, value) = self.take_attribute()?;
            doc.set_attribute(element, &name, &value)?;
        }

        if VOID_TAGS.contains(&tag.as_str()) {
            return Ok(element);
        }

        let children = self.parse_nodes(doc, Some(&tag))?;
        for child in children {
            doc.append_child(element, child)?;
        }
        Ok(element)
    }

    fn expect_close(&mut self, tag: &str) -> Result<(), Error> {
        self.pos += 2; // "</"
        let name = self.take_name()?;
        self.skip_whitespace();
        if !self.rest().starts_with('>') {
            return Err(Error::Parse(format!("malformed closing tag </{name}")));
        }
        self.pos += 1;
        if name != tag {
            return Err(Error::Parse(format!("expected </{tag}>, found </{name}>")));
        }
        Ok(())
    }

    fn take_name(&mut self) -> Result<String, Error> {
        let len = self
            .rest()
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '-')
            .unwrap_or(self.rest().len());
        if len == 0 {
            return Err(Error::Parse(format!(
                "expected a name at {:?}",
                truncate_for_message(self.rest())
            )));
        }
        let name = self.rest()[..len].to_ascii_lowercase();
        self.pos += len;
        Ok(name)
    }

    fn take_attribute(&mut self) -> Result<(String, String), Error> {
        let name = self.take_name()?;
        self.skip_whitespace();
        if !self.rest().starts_with('=') {
            // boolean attribute
            return Ok((name, String::new()));
        }
        self.pos += 1;
        self.skip_whitespace();
        let value = match self.rest().chars().next() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let end = self
                    .rest()
                    .find(quote)
                    .ok_or_else(|| Error::Parse(format!("unterminated value for {name}")))?;
                let raw = &self.rest()[..end];
                self.pos += end + 1;
                raw.to_string()
            }
            _ => {
                let end = self
                    .rest()
                    .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
                    .unwrap_or(self.rest().len());
                let raw = &self.rest()[..end];
                self.pos += end;
                raw.to_string()
            }
        };
        Ok((name, decode_entities(&value)))
    }

    fn skip_whitespace(&mut self) {
        let len = self
            .rest()
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(self.rest().len());
        self.pos += len;
    }
}

fn decode_entities(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn truncate_for_message(s: &str) -> &str {
    let end = s
        .char_indices()
        .nth(16)
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    &s[..end]
}
