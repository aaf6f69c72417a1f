// Path: crates/converter/src/ops.rs
//! Operation grouping and indexing.
//!
//! A transaction's operation list is flat, but operations belong to groups:
//! all the effects of one native message, or of one block-level event. The
//! linkage is explicit — every operation after a group's first references an
//! earlier member through `related_operations` — so both directions of the
//! conversion agree on group boundaries without inferring them from
//! position.

use mesh_types::protocol::{Operation, OperationIdentifier};
use mesh_types::{GatewayError, Result};

/// Splices operation groups into one flat list with contiguous zero-based
/// indices, re-basing each group's intra-group `related_operations` to the
/// final positions.
pub fn index_operations(groups: Vec<Vec<Operation>>) -> Vec<Operation> {
    let mut out: Vec<Operation> = Vec::with_capacity(groups.iter().map(Vec::len).sum());
    for group in groups {
        let base = out.len() as u64;
        for (pos, mut op) in group.into_iter().enumerate() {
            op.operation_identifier = OperationIdentifier { index: base + pos as u64 };
            if let Some(related) = op.related_operations.as_mut() {
                for rel in related.iter_mut() {
                    rel.index += base;
                }
            }
            out.push(op);
        }
    }
    out
}

/// Rebuilds the groups from a client-supplied flat operation list.
///
/// Enforces the indexing contract (contiguous indices starting at 0), the
/// linkage contract (related indices point at earlier operations), and type
/// consistency inside each group. Related indices are rewritten back to
/// intra-group positions so translators see the same shape they emitted.
pub fn group_operations(ops: &[Operation]) -> Result<Vec<Vec<Operation>>> {
    let mut groups: Vec<Vec<Operation>> = Vec::new();
    // group id of every operation index seen so far
    let mut group_of: Vec<usize> = Vec::with_capacity(ops.len());
    // final index -> position inside its group
    let mut pos_in_group: Vec<u64> = Vec::with_capacity(ops.len());

    for (i, op) in ops.iter().enumerate() {
        if op.operation_identifier.index != i as u64 {
            return Err(GatewayError::InvalidOperation(format!(
                "operation indices must be contiguous from 0; position {i} carries index {}",
                op.operation_identifier.index
            )));
        }

        let related = op.related_operations.as_deref().unwrap_or(&[]);
        let gid = if related.is_empty() {
            groups.push(Vec::new());
            groups.len() - 1
        } else {
            for rel in related {
                if rel.index >= i as u64 {
                    return Err(GatewayError::InvalidOperation(format!(
                        "operation {i} references operation {} which does not precede it",
                        rel.index
                    )));
                }
            }
            let gid = group_of[related[0].index as usize];
            if related[1..].iter().any(|rel| group_of[rel.index as usize] != gid) {
                return Err(GatewayError::InvalidOperation(format!(
                    "operation {i} references operations from different groups"
                )));
            }
            gid
        };

        if let Some(first) = groups[gid].first() {
            if first.kind != op.kind {
                return Err(GatewayError::InvalidOperation(format!(
                    "operation {i} of type {:?} is linked to a group of type {:?}",
                    op.kind, first.kind
                )));
            }
        }

        let mut op = op.clone();
        if let Some(rel) = op.related_operations.as_mut() {
            for r in rel.iter_mut() {
                r.index = pos_in_group[r.index as usize];
            }
        }
        group_of.push(gid);
        pos_in_group.push(groups[gid].len() as u64);
        groups[gid].push(op);
    }

    Ok(groups)
}
