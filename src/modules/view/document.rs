use crate::core::models::{MediaKind, PlaylistItem};
use crate::modules::dispatch::actions::Action;

/// Handle to a node in a [`Document`]. Stale handles (removed nodes) resolve
/// to `None`, even after their slot was reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Panel,
    List,
    Row,
    Element,
    Media(MediaKind),
    Proxy,
}

/// Box in page coordinates. Pointer positions use the same space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub scroll_top: f64,
    pub client_height: f64,
    pub content_height: f64,
}

impl ScrollState {
    pub fn overflows(&self) -> bool {
        self.content_height > self.client_height
    }

    pub fn max_scroll(&self) -> f64 {
        (self.content_height - self.client_height).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Animation {
    #[default]
    Idle,
    Suspended,
    Highlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    Above,
    Below,
}

/// Where a tap on a node carrying an open directive points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenDirective {
    /// The tapped node's immediate container.
    Parent,
    /// A node looked up by element id (`#playlist`).
    Selector(String),
}

/// Named setup routine run when a panel is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initializer {
    LoadPlaylist,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub element_id: Option<String>,
    pub rect: Rect,
    pub margin_top: f64,
    pub scroll: Option<ScrollState>,
    pub action: Option<Action>,
    pub open: Option<OpenDirective>,
    pub init: Option<Initializer>,
    pub draggable: bool,
    pub drag_handle: bool,
    pub item: Option<PlaylistItem>,
    pub disabled: bool,
    pub active: bool,
    pub hidden: bool,
    pub drop: Option<DropPosition>,
    pub animation: Animation,
    pub text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            element_id: None,
            rect: Rect::default(),
            margin_top: 0.0,
            scroll: None,
            action: None,
            open: None,
            init: None,
            draggable: false,
            drag_handle: false,
            item: None,
            disabled: false,
            active: false,
            hidden: false,
            drop: None,
            animation: Animation::Idle,
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.element_id = Some(id.to_string());
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_open(mut self, directive: OpenDirective) -> Self {
        self.open = Some(directive);
        self
    }

    pub fn with_init(mut self, init: Initializer) -> Self {
        self.init = Some(init);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_scroll(mut self, client_height: f64) -> Self {
        self.scroll = Some(ScrollState {
            scroll_top: 0.0,
            client_height,
            content_height: client_height,
        });
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Ancestor-walk predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Carries an action identifier.
    Action,
    /// Carries an open directive.
    OpenDirective,
    /// A reorderable row.
    Draggable,
    /// The touch region that starts a drag.
    DragHandle,
    /// Carries playlist item data.
    ItemData,
    /// This exact node.
    Node(NodeId),
}

impl Matcher {
    pub fn matches(self, id: NodeId, node: &Node) -> bool {
        match self {
            Matcher::Action => node.action.is_some(),
            Matcher::OpenDirective => node.open.is_some(),
            Matcher::Draggable => node.draggable,
            Matcher::DragHandle => node.drag_handle,
            Matcher::ItemData => node.item.is_some(),
            Matcher::Node(target) => id == target,
        }
    }
}

/// Arena-backed visual tree the controller reads and mutates.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    // Indices of empty slots, reused before the arena grows
    free: Vec<usize>,
    root: NodeId,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

impl Document {
    /// Create a document whose root is a viewport of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        let root = Node::new(NodeKind::Root)
            .with_rect(Rect::new(0.0, 0.0, width, height))
            .with_scroll(height);

        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(root),
            }],
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Insert a detached node and return its handle.
    pub fn create(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index: self.slots.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    pub fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.create(node);
        self.append_child(parent, id);
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains_node(parent) || !self.contains_node(child) {
            return;
        }
        self.detach(child);
        if let Some(p) = self.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Move `node` to sit immediately before `reference` under the same parent.
    pub fn insert_before(&mut self, node: NodeId, reference: NodeId) {
        if node == reference {
            return;
        }
        let Some(parent) = self.parent(reference) else {
            return;
        };
        self.detach(node);
        let Some(index) = self.index_in_parent(reference) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.insert(index, node);
        }
        if let Some(n) = self.get_mut(node) {
            n.parent = Some(parent);
        }
    }

    /// Move `node` to sit immediately after `reference`, appending when it is last.
    pub fn insert_after(&mut self, node: NodeId, reference: NodeId) {
        if node == reference {
            return;
        }
        match self.next_sibling(reference) {
            Some(next) if next == node => {}
            Some(next) => self.insert_before(node, next),
            None => {
                if let Some(parent) = self.parent(reference) {
                    self.append_child(parent, node);
                }
            }
        }
    }

    /// Unlink a node from its parent, keeping it alive.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|c| *c != node);
        }
        if let Some(n) = self.get_mut(node) {
            n.parent = None;
        }
    }

    /// Unlink a node and free its whole subtree.
    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let Some(slot) = self
                .slots
                .get_mut(id.index)
                .filter(|slot| slot.generation == id.generation)
            else {
                continue;
            };
            if let Some(n) = slot.node.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
                stack.extend(n.children);
            }
        }
    }

    /// Free every child of `parent`.
    pub fn clear_children(&mut self, parent: NodeId) {
        let children = self.children(parent).to_vec();
        for child in children {
            self.remove(child);
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    fn index_in_parent(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|c| *c == node)
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let index = self.index_in_parent(node)?;
        self.children(parent).get(index + 1).copied()
    }

    /// Whether `node` is `ancestor` or lies inside its subtree.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.closest(node, Matcher::Node(ancestor)).is_some()
    }

    /// Walk from `node` up through its ancestors and return the first match.
    pub fn closest(&self, node: NodeId, matcher: Matcher) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            let n = self.get(id)?;
            if matcher.matches(id, n) {
                return Some(id);
            }
            current = n.parent;
        }
        None
    }

    pub fn by_element_id(&self, element_id: &str) -> Option<NodeId> {
        self.slots.iter().enumerate().find_map(|(index, slot)| {
            slot.node
                .as_ref()
                .filter(|n| n.element_id.as_deref() == Some(element_id))
                .map(|_| NodeId {
                    index,
                    generation: slot.generation,
                })
        })
    }

    /// Resolve a `#id` selector.
    pub fn query(&self, selector: &str) -> Option<NodeId> {
        selector
            .strip_prefix('#')
            .and_then(|id| self.by_element_id(id))
    }

    /// Attached nodes in tree order, starting at the root.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if !self.contains_node(id) {
                continue;
            }
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Deepest visible node under the point. Proxies never take hits.
    pub fn element_from_point(&self, x: f64, y: f64) -> Option<NodeId> {
        self.hit(self.root, x, y)
    }

    fn hit(&self, id: NodeId, x: f64, y: f64) -> Option<NodeId> {
        let node = self.get(id)?;
        if node.hidden || node.kind == NodeKind::Proxy {
            return None;
        }
        for child in node.children.iter().rev() {
            if let Some(found) = self.hit(*child, x, y) {
                return Some(found);
            }
        }
        if node.kind == NodeKind::Root || node.rect.contains(x, y) {
            Some(id)
        } else {
            None
        }
    }

    /// Nearest ancestor of `node` whose content exceeds its visible height,
    /// falling back to the root viewport.
    pub fn scroll_container(&self, node: NodeId) -> NodeId {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if let Some(scroll) = self.get(id).and_then(|n| n.scroll) {
                if scroll.overflows() {
                    return id;
                }
            }
            current = self.parent(id);
        }
        self.root
    }

    /// Scroll a container by `dy`, clamped to its range. Returns the applied delta.
    pub fn scroll_by(&mut self, container: NodeId, dy: f64) -> f64 {
        let Some(scroll) = self.get_mut(container).and_then(|n| n.scroll.as_mut()) else {
            return 0.0;
        };
        let before = scroll.scroll_top;
        scroll.scroll_top = (scroll.scroll_top + dy).clamp(0.0, scroll.max_scroll());
        scroll.scroll_top - before
    }

    /// Align the top of `node` with the top of its scroll container.
    pub fn scroll_into_view(&mut self, node: NodeId) {
        let Some(top) = self.get(node).map(|n| n.rect.top) else {
            return;
        };
        let container = self.scroll_container(node);
        let container_top = self.get(container).map(|n| n.rect.top).unwrap_or(0.0);
        if let Some(scroll) = self.get_mut(container).and_then(|n| n.scroll.as_mut()) {
            scroll.scroll_top = (top - container_top).clamp(0.0, scroll.max_scroll());
        }
    }

    /// Shift a node and its subtree vertically.
    pub fn translate(&mut self, node: NodeId, dy: f64) {
        for id in self.descendants(node) {
            if let Some(n) = self.get_mut(id) {
                n.rect.top += dy;
            }
        }
    }

    /// Stack the children of a list vertically from its top edge and update
    /// the content height of the list (or of the root when the list does
    /// not scroll on its own).
    pub fn relayout_list(&mut self, list: NodeId) {
        let Some(list_rect) = self.get(list).map(|n| n.rect) else {
            return;
        };

        let mut cursor = list_rect.top;
        for child in self.children(list).to_vec() {
            let Some(rect) = self.get(child).map(|n| n.rect) else {
                continue;
            };
            self.translate(child, cursor - rect.top);
            cursor += rect.height;
        }

        let content = cursor - list_rect.top;
        let root = self.root;
        match self.get_mut(list).and_then(|n| n.scroll.as_mut()) {
            Some(scroll) => {
                scroll.content_height = content.max(scroll.client_height);
                scroll.scroll_top = scroll.scroll_top.min(scroll.max_scroll());
            }
            None => {
                if let Some(scroll) = self.get_mut(root).and_then(|n| n.scroll.as_mut()) {
                    scroll.content_height = cursor.max(scroll.client_height);
                }
            }
        }
    }

    /// Remove every drop indicator in the document.
    pub fn clear_drop_markers(&mut self) {
        for node in self.slots.iter_mut().filter_map(|slot| slot.node.as_mut()) {
            node.drop = None;
        }
    }

    pub fn item(&self, node: NodeId) -> Option<&PlaylistItem> {
        self.get(node).and_then(|n| n.item.as_ref())
    }

    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if let Some(n) = self.get_mut(node) {
            n.hidden = hidden;
        }
    }

    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(n) = self.get_mut(node) {
            n.disabled = disabled;
        }
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(n) = self.get_mut(node) {
            n.text = text.into();
        }
    }

    /// Show or hide the menu panels nested directly inside `panel`.
    pub fn set_menus_visible(&mut self, panel: NodeId, visible: bool) {
        for child in self.children(panel).to_vec() {
            if let Some(n) = self.get_mut(child) {
                if n.kind == NodeKind::Panel {
                    n.hidden = !visible;
                }
            }
        }
    }

    /// Number of arena slots, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.slots
            .iter()
            .filter_map(|slot| slot.node.as_ref())
            .filter(|n| n.kind == kind && (n.parent.is_some() || n.kind == NodeKind::Root))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with_rows(names: &[&str]) -> (Document, NodeId, Vec<NodeId>) {
        let mut doc = Document::new(400.0, 300.0);
        let root = doc.root();
        let list = doc.append(
            root,
            Node::new(NodeKind::List).with_rect(Rect::new(0.0, 0.0, 400.0, 0.0)),
        );
        let rows = names
            .iter()
            .map(|n| {
                let mut row = Node::new(NodeKind::Row)
                    .with_id(n)
                    .with_rect(Rect::new(0.0, 0.0, 400.0, 60.0));
                row.draggable = true;
                doc.append(list, row)
            })
            .collect();
        doc.relayout_list(list);
        (doc, list, rows)
    }

    fn order(doc: &Document, list: NodeId) -> Vec<String> {
        doc.children(list)
            .iter()
            .filter_map(|c| doc.get(*c).and_then(|n| n.element_id.clone()))
            .collect()
    }

    #[test]
    fn insert_before_and_after_reorder_siblings() {
        let (mut doc, list, rows) = list_with_rows(&["a", "b", "c", "d"]);

        doc.insert_after(rows[0], rows[2]);
        assert_eq!(order(&doc, list), vec!["b", "c", "a", "d"]);

        doc.insert_before(rows[3], rows[1]);
        assert_eq!(order(&doc, list), vec!["d", "b", "c", "a"]);

        doc.insert_after(rows[1], rows[0]);
        assert_eq!(order(&doc, list), vec!["d", "c", "a", "b"]);
    }

    #[test]
    fn inserting_relative_to_itself_is_a_noop() {
        let (mut doc, list, rows) = list_with_rows(&["a", "b"]);
        doc.insert_before(rows[1], rows[1]);
        doc.insert_after(rows[0], rows[0]);
        assert_eq!(order(&doc, list), vec!["a", "b"]);
    }

    #[test]
    fn relayout_stacks_rows_and_grows_root_content() {
        let (doc, _, rows) = list_with_rows(&["a", "b", "c", "d", "e", "f"]);
        assert_eq!(doc.get(rows[3]).unwrap().rect.top, 180.0);
        let scroll = doc.get(doc.root()).unwrap().scroll.unwrap();
        assert_eq!(scroll.content_height, 360.0);
        assert!(scroll.overflows());
    }

    #[test]
    fn hit_testing_skips_proxies_and_hidden_nodes() {
        let (mut doc, _, rows) = list_with_rows(&["a", "b"]);
        let root = doc.root();
        let proxy = doc.append(
            root,
            Node::new(NodeKind::Proxy).with_rect(Rect::new(0.0, 0.0, 400.0, 60.0)),
        );

        assert_eq!(doc.element_from_point(10.0, 70.0), Some(rows[1]));
        assert_eq!(doc.element_from_point(10.0, 10.0), Some(rows[0]));
        assert_ne!(doc.element_from_point(10.0, 10.0), Some(proxy));

        doc.set_hidden(rows[1], true);
        assert_eq!(doc.element_from_point(10.0, 70.0), Some(root));
    }

    #[test]
    fn closest_walks_up_with_each_matcher() {
        let (mut doc, list, rows) = list_with_rows(&["a"]);
        let mut handle = Node::new(NodeKind::Element);
        handle.drag_handle = true;
        let handle = doc.append(rows[0], handle);

        assert_eq!(doc.closest(handle, Matcher::Draggable), Some(rows[0]));
        assert_eq!(doc.closest(handle, Matcher::DragHandle), Some(handle));
        assert_eq!(doc.closest(handle, Matcher::Node(list)), Some(list));
        assert_eq!(doc.closest(handle, Matcher::ItemData), None);
        assert!(doc.is_inclusive_ancestor(list, handle));
        assert!(!doc.is_inclusive_ancestor(handle, list));
    }

    #[test]
    fn removed_nodes_become_stale_handles() {
        let (mut doc, list, rows) = list_with_rows(&["a", "b"]);
        doc.remove(rows[0]);
        assert!(doc.get(rows[0]).is_none());
        assert_eq!(doc.children(list), &[rows[1]]);
    }

    #[test]
    fn removed_slots_are_reused_without_reviving_old_handles() {
        let (mut doc, list, rows) = list_with_rows(&["a", "b"]);
        let before = doc.capacity();
        doc.remove(rows[0]);

        let fresh = doc.append(list, Node::new(NodeKind::Row));
        assert_eq!(doc.capacity(), before);
        assert_ne!(fresh, rows[0]);
        assert!(doc.get(rows[0]).is_none());
        assert!(doc.get(fresh).is_some());
        assert_eq!(doc.children(list), &[rows[1], fresh]);
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let (mut doc, _, rows) = list_with_rows(&["a", "b", "c", "d", "e", "f"]);
        let root = doc.root();
        assert_eq!(doc.scroll_container(rows[0]), root);
        assert_eq!(doc.scroll_by(root, -10.0), 0.0);
        assert_eq!(doc.scroll_by(root, 100.0), 60.0);

        doc.scroll_into_view(rows[1]);
        assert_eq!(doc.get(root).unwrap().scroll.unwrap().scroll_top, 60.0);
    }
}
