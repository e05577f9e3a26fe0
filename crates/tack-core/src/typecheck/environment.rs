//! Type environment: the node → type table and the state of one checking pass.

use serde::Serialize;

use crate::ast::{NodeId, Span};
use crate::resolve::NameAnalysis;

use super::errors::{TypeError, TypeErrorKind};
use super::types::{FnTable, TcType};

/// Resolved type of every typed node, indexed by [`NodeId`].
///
/// Each entry is written once; writing a different type to the same node is a checker bug.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeTable {
    types: Vec<Option<TcType>>,
}

impl TypeTable {
    pub fn new(node_count: usize) -> Self {
        Self {
            types: vec![None; node_count],
        }
    }

    pub fn get(&self, node: NodeId) -> Option<TcType> {
        self.types.get(node.index()).copied().flatten()
    }

    pub fn record(&mut self, node: NodeId, ty: TcType) {
        let Some(slot) = self.types.get_mut(node.index()) else {
            panic!("node {node:?} outside the type table ({} entries)", self.types.len());
        };
        match slot {
            Some(existing) if *existing != ty => {
                panic!("node {node:?} already typed {existing}, refusing to retype as {ty}")
            }
            _ => *slot = Some(ty),
        }
    }

    /// All typed nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, TcType)> + '_ {
        self.types
            .iter()
            .enumerate()
            .filter_map(|(i, ty)| ty.map(|ty| (NodeId(i as u32), ty)))
    }

    /// Number of nodes the table has room for.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// State threaded through one type checking pass.
pub struct TypeEnv<'n> {
    pub names: &'n NameAnalysis,
    pub table: TypeTable,
    pub errors: Vec<TypeError>,
    /// Set by the first diagnostic, never cleared
    pub failed: bool,
}

impl<'n> TypeEnv<'n> {
    pub fn new(names: &'n NameAnalysis, node_count: usize) -> Self {
        Self {
            names,
            table: TypeTable::new(node_count),
            errors: Vec::new(),
            failed: false,
        }
    }

    pub fn functions(&self) -> &'n FnTable {
        let names: &'n NameAnalysis = self.names;
        &names.functions
    }

    /// Emit a diagnostic and mark the pass as failed.
    pub fn report(&mut self, kind: TypeErrorKind, span: Span) {
        self.errors.push(TypeError::new(kind, span));
        self.failed = true;
    }

    /// Record `ty` for `node` and hand it back.
    pub fn record(&mut self, node: NodeId, ty: TcType) -> TcType {
        self.table.record(node, ty);
        ty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_get() {
        let mut table = TypeTable::new(3);
        table.record(NodeId(1), TcType::Int);
        assert_eq!(table.get(NodeId(0)), None);
        assert_eq!(table.get(NodeId(1)), Some(TcType::Int));
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(NodeId(1), TcType::Int)]);
    }

    #[test]
    fn test_recording_same_type_twice_is_fine() {
        let mut table = TypeTable::new(1);
        table.record(NodeId(0), TcType::Bool);
        table.record(NodeId(0), TcType::Bool);
        assert_eq!(table.get(NodeId(0)), Some(TcType::Bool));
    }

    #[test]
    #[should_panic(expected = "already typed")]
    fn test_retyping_a_node_panics() {
        let mut table = TypeTable::new(1);
        table.record(NodeId(0), TcType::Bool);
        table.record(NodeId(0), TcType::Int);
    }

    #[test]
    fn test_out_of_range_get_is_none() {
        let table = TypeTable::new(1);
        assert_eq!(table.get(NodeId(5)), None);
    }
}
