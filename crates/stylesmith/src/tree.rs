//! Arena-backed style tree used while parsing.
//!
//! Nested blocks are reachable two ways during a parse: from their parent
//! (the selector key) and from the parser's context stack. Both refer to the
//! same arena slot by [`NodeId`]; the parent records an edge, the stack holds
//! the id.

use indexmap::IndexMap;
use slotmap::{new_key_type, SlotMap};

use crate::object::{StyleObject, StyleValue};

new_key_type! {
    /// Handle to a mapping node in a [`StyleTree`].
    pub(crate) struct NodeId;
}

#[derive(Debug)]
enum Slot {
    /// A value owned by the node: a scalar or a merged-in object.
    Value(StyleValue),
    /// Edge to a nested block node.
    Child(NodeId),
}

#[derive(Debug, Default)]
struct Node {
    entries: IndexMap<String, Slot>,
}

#[derive(Debug)]
pub(crate) struct StyleTree {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl StyleTree {
    /// Creates a tree holding a single empty root mapping.
    pub(crate) fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::default());
        StyleTree { nodes, root }
    }

    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    /// Sets `key` on `node`, overwriting any previous value or block edge.
    pub(crate) fn set_value(&mut self, node: NodeId, key: &str, value: StyleValue) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.entries.insert(key.to_string(), Slot::Value(value));
        }
    }

    /// Creates an empty child mapping under `key` and returns its id.
    pub(crate) fn open_child(&mut self, parent: NodeId, key: &str) -> NodeId {
        let child = self.nodes.insert(Node::default());
        if let Some(n) = self.nodes.get_mut(parent) {
            n.entries.insert(key.to_string(), Slot::Child(child));
        }
        child
    }

    /// Shallow-merges `object` into `node`.
    pub(crate) fn merge(&mut self, node: NodeId, object: &StyleObject) {
        for (key, value) in object {
            self.set_value(node, key, value.clone());
        }
    }

    /// Materializes everything reachable from the root.
    ///
    /// Blocks whose selector key was later overwritten are not reachable and
    /// are dropped.
    pub(crate) fn into_object(mut self) -> StyleObject {
        let root = self.root;
        take_object(&mut self.nodes, root)
    }
}

fn take_object(nodes: &mut SlotMap<NodeId, Node>, id: NodeId) -> StyleObject {
    let Some(node) = nodes.remove(id) else {
        return StyleObject::new();
    };
    node.entries
        .into_iter()
        .map(|(key, slot)| {
            let value = match slot {
                Slot::Value(v) => v,
                Slot::Child(child) => StyleValue::Object(take_object(nodes, child)),
            };
            (key, value)
        })
        .collect()
}
