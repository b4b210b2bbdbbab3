//! In-memory document model.
//!
//! The widget never talks to a browser directly. Everything it reads or
//! writes goes through [`Document`]: an arena of elements addressed by
//! [`NodeId`], carrying the same contract the theme templates rely on (ids,
//! classes, attributes, inline styles, image load state and layout boxes).
//! A host mirrors real DOM changes into it and reads the result back, or
//! serializes it with [`Document::outer_html`].

mod html;
pub mod layout;

pub use layout::{Rect, RootMargin, Viewport};

use std::collections::BTreeMap;

/// Handle to an element owned by a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Load state of an `img` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageLoad {
    #[default]
    Pending,
    Loaded {
        natural_height: u32,
    },
    Failed,
}

impl ImageLoad {
    /// Mirrors `HTMLImageElement.complete`: broken images count as complete.
    pub fn is_complete(self) -> bool {
        !matches!(self, ImageLoad::Pending)
    }

    pub fn natural_height(self) -> u32 {
        match self {
            ImageLoad::Loaded { natural_height } => natural_height,
            _ => 0,
        }
    }
}

/// A structural change to an attached part of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    ChildAdded { parent: NodeId, child: NodeId },
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    style: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    image: Option<ImageLoad>,
    rect: Option<Rect>,
}

impl Element {
    fn new(tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        let image = (tag == "img").then_some(ImageLoad::Pending);
        Self {
            tag,
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            style: Vec::new(),
            text: None,
            children: Vec::new(),
            parent: None,
            image,
            rect: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    body: NodeId,
    viewport: Viewport,
    mutations: Vec<Mutation>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document containing only `body`.
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body")],
            body: NodeId(0),
            viewport: Viewport::default(),
            mutations: Vec::new(),
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_scroll_y(&mut self, scroll_y: f32) {
        self.viewport.scroll_y = scroll_y.max(0.0);
    }

    fn node(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0)
    }

    // ---- tree ---------------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element::new(tag));
        id
    }

    /// Create an element and append it to `parent`.
    pub fn append_new(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let child = self.create_element(tag);
        self.append_child(parent, child);
        child
    }

    /// Move `child` under `parent`, detaching it from any previous parent.
    /// Appending an ancestor under its own descendant is ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.node(parent).is_none()
            || self.node(child).is_none()
            || child == self.body
            || self.is_inclusive_ancestor(child, parent)
        {
            return;
        }
        self.detach(child);
        if let Some(el) = self.node_mut(child) {
            el.parent = Some(parent);
        }
        if let Some(el) = self.node_mut(parent) {
            el.children.push(child);
        }
        if self.is_attached(parent) {
            self.mutations.push(Mutation::ChildAdded { parent, child });
        }
    }

    /// Detach `node` from the tree. The element stays addressable and can
    /// be re-appended.
    pub fn remove(&mut self, node: NodeId) {
        if node != self.body {
            self.detach(node);
        }
    }

    pub fn clear_children(&mut self, node: NodeId) {
        let children = self.children(node).to_vec();
        for child in children {
            self.detach(child);
        }
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.node(node).and_then(|el| el.parent) else {
            return;
        };
        if let Some(el) = self.node_mut(parent) {
            el.children.retain(|c| *c != node);
        }
        if let Some(el) = self.node_mut(node) {
            el.parent = None;
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|el| el.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node)
            .map(|el| el.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(node)?);
        let position = siblings.iter().position(|n| *n == node)?;
        siblings.get(position + 1).copied()
    }

    /// True when `node` is reachable from `body`.
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.is_inclusive_ancestor(self.body, node)
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Pre-order descendants of `root`, excluding `root` itself.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> =
            self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    /// Nearest inclusive ancestor of `node` satisfying `pred`.
    pub fn closest<F>(&self, node: NodeId, pred: F) -> Option<NodeId>
    where
        F: Fn(&Document, NodeId) -> bool,
    {
        let mut current = Some(node);
        while let Some(id) = current {
            if pred(self, id) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    pub fn first_descendant_by_tag(
        &self,
        root: NodeId,
        tag: &str,
    ) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|id| self.tag(*id) == Some(tag))
    }

    // ---- queries over the attached tree -------------------------------

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.body)
            .chain(self.descendants(self.body))
            .find(|node| self.attr(*node, "id") == Some(id))
    }

    /// Attached elements carrying `class`, in document order.
    pub fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.elements_with_any_class(&[class])
    }

    /// Attached elements carrying at least one of `classes`, in document order.
    pub fn elements_with_any_class(&self, classes: &[&str]) -> Vec<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .filter(|node| self.has_any_class(*node, classes))
            .collect()
    }

    pub fn first_by_class(&self, class: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|node| self.has_class(*node, class))
    }

    // ---- element data ---------------------------------------------------

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|el| el.tag.as_str())
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)
            .and_then(|el| el.attrs.get(name))
            .map(String::as_str)
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    /// Set an attribute. Pointing an `img` at a new `src` restarts its load.
    pub fn set_attr(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<String>,
    ) {
        let value = value.into();
        let Some(el) = self.node_mut(node) else {
            return;
        };
        if name == "class" {
            el.classes = value.split_whitespace().map(str::to_string).collect();
            return;
        }
        let previous = el.attrs.insert(name.to_string(), value);
        if name == "src"
            && el.image.is_some()
            && previous.as_ref() != el.attrs.get(name)
        {
            el.image = Some(ImageLoad::Pending);
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(el) = self.node_mut(node) {
            el.attrs.remove(name);
        }
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        self.node(node)
            .map(|el| el.classes.as_slice())
            .unwrap_or(&[])
    }

    /// Space separated class list, as `className` would report it.
    pub fn class_name(&self, node: NodeId) -> String {
        self.classes(node).join(" ")
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    pub fn has_any_class(&self, node: NodeId, classes: &[&str]) -> bool {
        self.classes(node)
            .iter()
            .any(|c| classes.contains(&c.as_str()))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.node_mut(node)
            && !el.classes.iter().any(|c| c == class)
        {
            el.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.node_mut(node) {
            el.classes.retain(|c| c != class);
        }
    }

    /// Toggle `class`, returning whether it is now present.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            self.has_class(node, class)
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node).and_then(|el| {
            el.style
                .iter()
                .find(|(p, _)| p == property)
                .map(|(_, v)| v.as_str())
        })
    }

    pub fn set_style(
        &mut self,
        node: NodeId,
        property: &str,
        value: impl Into<String>,
    ) {
        let value = value.into();
        let Some(el) = self.node_mut(node) else {
            return;
        };
        match el.style.iter_mut().find(|(p, _)| p == property) {
            Some(entry) => entry.1 = value,
            None => el.style.push((property.to_string(), value)),
        }
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.node(node).and_then(|el| el.text.as_deref())
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(el) = self.node_mut(node) {
            el.text = Some(text.into());
        }
    }

    // ---- images ---------------------------------------------------------

    pub fn image_state(&self, node: NodeId) -> Option<ImageLoad> {
        self.node(node).and_then(|el| el.image)
    }

    pub fn mark_image_loaded(&mut self, node: NodeId, natural_height: u32) {
        if let Some(el) = self.node_mut(node)
            && el.image.is_some()
        {
            el.image = Some(ImageLoad::Loaded { natural_height });
        }
    }

    pub fn mark_image_failed(&mut self, node: NodeId) {
        if let Some(el) = self.node_mut(node)
            && el.image.is_some()
        {
            el.image = Some(ImageLoad::Failed);
        }
    }

    // ---- layout ---------------------------------------------------------

    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.node(node).and_then(|el| el.rect)
    }

    /// Record the element's box in document coordinates.
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(el) = self.node_mut(node) {
            el.rect = Some(rect);
        }
    }

    /// Viewport test used for elements visible at page load.
    pub fn is_in_view(&self, node: NodeId) -> bool {
        self.is_attached(node)
            && self
                .rect(node)
                .is_some_and(|rect| self.viewport.contains(rect))
    }

    // ---- mutation records -----------------------------------------------

    /// Drain the mutation records gathered since the previous call.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }

    pub fn has_pending_mutations(&self) -> bool {
        !self.mutations.is_empty()
    }
}
