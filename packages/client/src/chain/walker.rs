//! Leaf-to-root walk over issuer links

use hashbrown::HashSet;

use super::arena::{ChainArena, ChainEntry, NodeId};
use crate::tls::types::CertificateNode;

/// Unique nodes met on the way from the leaf, in walk order.
#[derive(Debug, Clone)]
pub struct ChainSet<'a> {
    arena: &'a ChainArena,
    order: Vec<NodeId>,
}

impl<'a> ChainSet<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn ids(&self) -> &[NodeId] {
        &self.order
    }

    /// Certificates in walk order; every id in the set is well-formed.
    pub fn certificates(&self) -> impl Iterator<Item = &'a CertificateNode> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.arena.certificate(*id))
    }

    /// The node farthest from the leaf.
    #[must_use]
    pub fn last(&self) -> Option<&'a CertificateNode> {
        self.order.last().and_then(|id| self.arena.certificate(*id))
    }
}

/// Follow issuer links from the leaf until the chain ends, turns malformed,
/// or comes back to a node already taken.
///
/// Each step either adds a new node or stops, so the walk takes at most
/// `arena.len() + 1` steps whatever the links look like.
#[must_use]
pub fn walk_chain(arena: &ChainArena) -> ChainSet<'_> {
    let mut order = Vec::new();
    let mut seen = HashSet::new();

    let mut current = arena.leaf().filter(|id| arena.certificate(*id).is_some());
    while let Some(id) = current {
        if !seen.insert(id) {
            tracing::debug!("Issuer link cycles back to {:?}; stopping walk", id);
            break;
        }
        order.push(id);

        current = arena.issuer_of(id).filter(|next| match arena.entry(*next) {
            Some(ChainEntry::Certificate(_)) => true,
            Some(ChainEntry::Malformed { reason }) => {
                tracing::debug!("Issuer of {:?} is malformed ({}); stopping walk", id, reason);
                false
            }
            None => false,
        });
    }

    ChainSet { arena, order }
}
