use std::ptr;

use trees::Tree;

/// Preorder number of a node; the root is `0`.
pub type NodeId = usize;

/// Parent and child links of a tree, computed once into side tables so
/// that nodes never hold back references.
#[derive(Debug)]
pub struct ParentTable<'a> {
    nodes: Vec<&'a Tree>,
    parents: Vec<Option<NodeId>>,
    children: Vec<Vec<NodeId>>,
}

impl<'a> ParentTable<'a> {
    pub fn new(tree: &'a Tree) -> Self {
        let capacity = tree.size();
        let mut table = ParentTable {
            nodes: Vec::with_capacity(capacity),
            parents: Vec::with_capacity(capacity),
            children: Vec::with_capacity(capacity),
        };
        let mut stack: Vec<(&'a Tree, Option<NodeId>)> = vec![(tree, None)];
        while let Some((node, parent)) = stack.pop() {
            let id = table.nodes.len();
            table.nodes.push(node);
            table.parents.push(parent);
            table.children.push(Vec::with_capacity(node.num_children()));
            if let Some(parent) = parent {
                table.children[parent].push(id);
            }
            for child in node.children().iter().rev() {
                stack.push((child, Some(id)));
            }
        }
        table
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        0
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &'a Tree {
        self.nodes[id]
    }

    pub fn get(&self, id: NodeId) -> Option<&'a Tree> {
        self.nodes.get(id).map(|&node| node)
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id).and_then(|&parent| parent)
    }

    pub fn parent_node(&self, id: NodeId) -> Option<&'a Tree> {
        self.parent(id).map(|parent| self.nodes[parent])
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.children[id]
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors<'t>(&'t self, id: NodeId) -> Ancestors<'t, 'a> {
        Ancestors {
            table: self,
            current: self.parent(id),
        }
    }

    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Finds the id of a node borrowed from the indexed tree.
    pub fn id_of(&self, node: &Tree) -> Option<NodeId> {
        self.nodes.iter().position(|&n| ptr::eq(n, node))
    }

    /// Nodes with their ids, in preorder.
    pub fn iter<'t>(&'t self) -> Box<dyn Iterator<Item = (NodeId, &'a Tree)> + 't> {
        Box::new(self.nodes.iter().cloned().enumerate())
    }
}

pub struct Ancestors<'t, 'a: 't> {
    table: &'t ParentTable<'a>,
    current: Option<NodeId>,
}

impl<'t, 'a> Iterator for Ancestors<'t, 'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.table.parent(id);
        Some(id)
    }
}
