//! Arena-backed document tree.
//!
//! Reference implementation of [`DocumentTree`] for tests and single-process
//! hosts. Nodes live in an arena for the lifetime of the document; removal
//! detaches a node from its parent but keeps it addressable so it can be
//! re-inserted later.

use std::collections::HashMap;

use crate::tree::{DocumentTree, NodeId, TreeError};

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    attributes: HashMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: HashMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Mutable document tree over an already-parsed structure.
#[derive(Debug, Clone)]
pub struct XmlDocument {
    nodes: Vec<NodeData>,
    root: NodeId,
}

impl XmlDocument {
    /// Create a document with a single root element.
    pub fn new(root_tag: impl Into<String>) -> Self {
        Self {
            nodes: vec![NodeData::new(root_tag)],
            root: NodeId::new(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached element. It joins the tree once inserted.
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(NodeData::new(tag));
        id
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.get(node).map(|n| n.tag.as_str())
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// First attached element with the given tag, depth-first from the root.
    pub fn find(&self, tag: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = self.get(id)?;
            if node.tag == tag {
                return Some(id);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    fn get(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.index())
    }

    fn get_mut(&mut self, node: NodeId) -> Result<&mut NodeData, TreeError> {
        self.nodes
            .get_mut(node.index())
            .ok_or(TreeError::NodeNotFound(node))
    }

    fn check(&self, node: NodeId) -> Result<(), TreeError> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(TreeError::NodeNotFound(node))
        }
    }

    /// Whether `ancestor` sits on the parent chain of `node` (or is `node`).
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).and_then(|n| n.parent);
        }
        false
    }
}

impl DocumentTree for XmlDocument {
    fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|n| n.parent)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = &self.get(parent)?.children;
        let pos = siblings.iter().position(|&c| c == node)?;
        siblings.get(pos + 1).copied()
    }

    fn insert_child(
        &mut self,
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), TreeError> {
        self.check(parent)?;
        self.check(node)?;

        if self.parent(node).is_some() {
            return Err(TreeError::AlreadyAttached(node));
        }
        if self.is_ancestor(node, parent) {
            return Err(TreeError::WouldCycle(node));
        }

        let index = match reference {
            Some(reference) => self
                .get(parent)
                .and_then(|p| p.children.iter().position(|&c| c == reference))
                .ok_or(TreeError::BadReference(reference))?,
            None => self.get(parent).map(|p| p.children.len()).unwrap_or(0),
        };

        self.get_mut(parent)?.children.insert(index, node);
        self.get_mut(node)?.parent = Some(parent);
        Ok(())
    }

    fn remove_child(&mut self, node: NodeId) -> Result<(), TreeError> {
        self.check(node)?;
        let parent = self.parent(node).ok_or(TreeError::Detached(node))?;

        let children = &mut self.get_mut(parent)?.children;
        if let Some(pos) = children.iter().position(|&c| c == node) {
            children.remove(pos);
        }
        self.get_mut(node)?.parent = None;
        Ok(())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.get(node)?.attributes.get(name).cloned()
    }

    fn set_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: Option<&str>,
    ) -> Result<(), TreeError> {
        let data = self.get_mut(node)?;
        match value {
            Some(value) => {
                data.attributes.insert(name.to_string(), value.to_string());
            }
            None => {
                data.attributes.remove(name);
            }
        }
        Ok(())
    }

    fn text_content(&self, node: NodeId) -> Option<String> {
        self.get(node).map(|n| n.text.clone())
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) -> Result<(), TreeError> {
        self.get_mut(node)?.text = text.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (XmlDocument, NodeId, NodeId) {
        let mut doc = XmlDocument::new("Substation");
        let level = doc.create_element("VoltageLevel");
        let bay = doc.create_element("Bay");
        doc.insert_child(doc.root(), level, None).unwrap();
        doc.insert_child(level, bay, None).unwrap();
        (doc, level, bay)
    }

    #[test]
    fn insert_appends_and_sets_parent() {
        let (doc, level, bay) = sample();
        assert_eq!(doc.parent(bay), Some(level));
        assert_eq!(doc.children(level), &[bay]);
        assert_eq!(doc.parent(level), Some(doc.root()));
    }

    #[test]
    fn insert_before_reference() {
        let (mut doc, level, bay) = sample();
        let other = doc.create_element("Bay");
        doc.insert_child(level, other, Some(bay)).unwrap();
        assert_eq!(doc.children(level), &[other, bay]);
        assert_eq!(doc.next_sibling(other), Some(bay));
        assert_eq!(doc.next_sibling(bay), None);
    }

    #[test]
    fn insert_attached_node_is_rejected() {
        let (mut doc, _, bay) = sample();
        let root = doc.root();
        assert_eq!(
            doc.insert_child(root, bay, None),
            Err(TreeError::AlreadyAttached(bay))
        );
    }

    #[test]
    fn insert_ancestor_under_descendant_is_rejected() {
        let (mut doc, level, bay) = sample();
        let root = doc.root();
        doc.remove_child(level).unwrap();
        assert_eq!(
            doc.insert_child(bay, level, None),
            Err(TreeError::WouldCycle(level))
        );
    }

    #[test]
    fn bad_reference_is_rejected() {
        let (mut doc, level, _) = sample();
        let stranger = doc.create_element("LNode");
        let orphan = doc.create_element("LNode");
        assert_eq!(
            doc.insert_child(level, orphan, Some(stranger)),
            Err(TreeError::BadReference(stranger))
        );
    }

    #[test]
    fn remove_detaches_but_keeps_node() {
        let (mut doc, level, bay) = sample();
        doc.remove_child(bay).unwrap();
        assert_eq!(doc.parent(bay), None);
        assert!(doc.children(level).is_empty());
        assert!(doc.contains(bay));

        // A detached node can rejoin the tree.
        doc.insert_child(level, bay, None).unwrap();
        assert_eq!(doc.parent(bay), Some(level));
    }

    #[test]
    fn remove_detached_node_is_rejected() {
        let (mut doc, _, bay) = sample();
        doc.remove_child(bay).unwrap();
        assert_eq!(doc.remove_child(bay), Err(TreeError::Detached(bay)));
    }

    #[test]
    fn attributes_set_and_remove() {
        let (mut doc, _, bay) = sample();
        doc.set_attribute(bay, "name", Some("b1")).unwrap();
        assert_eq!(doc.attribute(bay, "name").as_deref(), Some("b1"));
        doc.set_attribute(bay, "name", None).unwrap();
        assert_eq!(doc.attribute(bay, "name"), None);
    }

    #[test]
    fn text_content_roundtrip() {
        let (mut doc, _, bay) = sample();
        assert_eq!(doc.text_content(bay).as_deref(), Some(""));
        doc.set_text_content(bay, "hello").unwrap();
        assert_eq!(doc.text_content(bay).as_deref(), Some("hello"));
    }

    #[test]
    fn find_walks_depth_first() {
        let (doc, level, bay) = sample();
        assert_eq!(doc.find("VoltageLevel"), Some(level));
        assert_eq!(doc.find("Bay"), Some(bay));
        assert_eq!(doc.find("LNode"), None);
    }
}
