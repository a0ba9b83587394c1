//! Registered-listener table.
//!
//! Edit mode installs capabilities per element as `(node, capability)`
//! pairs. Registering an existing pair hands back the existing listener, so
//! toggling edit mode off and on never stacks duplicate handlers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use styletrend_dom::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    /// Content editing with one history entry per focus session
    TextEdit,
    /// Double-click to swap the image source
    ImageReplace,
    /// Shift+drag repositioning
    Drag,
    /// Wheel scaling
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListenerId(pub u64);

#[derive(Debug, Clone, Default)]
pub struct ListenerTable {
    listeners: BTreeMap<(NodeId, Capability), ListenerId>,
    next_id: u64,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, node: NodeId, capability: Capability) -> ListenerId {
        let next_id = &mut self.next_id;
        *self.listeners.entry((node, capability)).or_insert_with(|| {
            *next_id += 1;
            ListenerId(*next_id)
        })
    }

    pub fn unregister(&mut self, node: NodeId, capability: Capability) -> Option<ListenerId> {
        self.listeners.remove(&(node, capability))
    }

    /// Drop every capability of `node`, returning how many were removed
    pub fn unregister_node(&mut self, node: NodeId) -> usize {
        let before = self.listeners.len();
        self.listeners.retain(|(n, _), _| *n != node);
        before - self.listeners.len()
    }

    pub fn has(&self, node: NodeId, capability: Capability) -> bool {
        self.listeners.contains_key(&(node, capability))
    }

    pub fn capabilities(&self, node: NodeId) -> Vec<Capability> {
        self.listeners
            .range((node, Capability::TextEdit)..=(node, Capability::Scale))
            .map(|((_, c), _)| *c)
            .collect()
    }

    /// Nodes with at least one capability, in id order
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.listeners.keys().map(|(n, _)| *n).collect();
        nodes.dedup();
        nodes
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        let mut table = ListenerTable::new();
        let first = table.register(NodeId(3), Capability::Drag);
        let second = table.register(NodeId(3), Capability::Drag);
        assert_eq!(first, second);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_capabilities_per_node() {
        let mut table = ListenerTable::new();
        table.register(NodeId(1), Capability::Scale);
        table.register(NodeId(1), Capability::TextEdit);
        table.register(NodeId(2), Capability::Drag);

        assert_eq!(
            table.capabilities(NodeId(1)),
            vec![Capability::TextEdit, Capability::Scale]
        );
        assert_eq!(table.nodes(), vec![NodeId(1), NodeId(2)]);

        assert_eq!(table.unregister_node(NodeId(1)), 2);
        assert!(!table.has(NodeId(1), Capability::Scale));
        assert!(table.has(NodeId(2), Capability::Drag));
    }

    #[test]
    fn test_unregister_then_register_issues_new_id() {
        let mut table = ListenerTable::new();
        let first = table.register(NodeId(1), Capability::ImageReplace);
        assert_eq!(table.unregister(NodeId(1), Capability::ImageReplace), Some(first));
        let second = table.register(NodeId(1), Capability::ImageReplace);
        assert_ne!(first, second);
    }
}
