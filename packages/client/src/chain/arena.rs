//! Arena of presented certificates and their issuer links

use rustls::pki_types::CertificateDer;

use crate::config::FingerprintAlgorithm;
use crate::tls::certificate::parse_certificate_from_der;
use crate::tls::types::{CertificateNode, CertificateOrigin};

/// Identity of a slot in a [`ChainArena`].
///
/// Two slots are different nodes even when their encodings are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Content of an arena slot.
#[derive(Debug, Clone)]
pub enum ChainEntry {
    Certificate(CertificateNode),
    /// Bytes the peer sent that are not a well-formed certificate
    Malformed { reason: String },
}

#[derive(Debug, Clone)]
struct Slot {
    entry: ChainEntry,
    issuer: Option<NodeId>,
}

/// Every certificate seen during one invocation, linked child → issuer.
///
/// Links may be missing, point at the slot itself, or form cycles; the
/// walker is the only consumer and copes with all three.
#[derive(Debug, Clone, Default)]
pub struct ChainArena {
    slots: Vec<Slot>,
}

impl ChainArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_certificate(&mut self, node: CertificateNode) -> NodeId {
        self.push(ChainEntry::Certificate(node))
    }

    pub fn push_malformed(&mut self, reason: impl Into<String>) -> NodeId {
        self.push(ChainEntry::Malformed {
            reason: reason.into(),
        })
    }

    fn push(&mut self, entry: ChainEntry) -> NodeId {
        self.slots.push(Slot {
            entry,
            issuer: None,
        });
        NodeId(self.slots.len() - 1)
    }

    /// Point `child`'s issuer link at `issuer`, replacing any previous link.
    ///
    /// # Panics
    ///
    /// Panics if either id does not belong to this arena.
    pub fn link(&mut self, child: NodeId, issuer: NodeId) {
        assert!(issuer.0 < self.slots.len(), "issuer {issuer:?} is not in this arena");
        self.slots[child.0].issuer = Some(issuer);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The leaf is whatever the peer presented first.
    #[must_use]
    pub fn leaf(&self) -> Option<NodeId> {
        (!self.slots.is_empty()).then_some(NodeId(0))
    }

    #[must_use]
    pub fn entry(&self, id: NodeId) -> Option<&ChainEntry> {
        self.slots.get(id.0).map(|slot| &slot.entry)
    }

    /// The certificate in `id`, or `None` for malformed or unknown slots.
    #[must_use]
    pub fn certificate(&self, id: NodeId) -> Option<&CertificateNode> {
        match self.entry(id)? {
            ChainEntry::Certificate(node) => Some(node),
            ChainEntry::Malformed { .. } => None,
        }
    }

    #[must_use]
    pub fn issuer_of(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.0).and_then(|slot| slot.issuer)
    }

    /// Build the arena for a presented chain and link it by name.
    ///
    /// `presented` is in handshake order, leaf first. `store` holds extra
    /// certificates (normally the system roots) consulted only for issuers
    /// the peer did not send; the ones actually used are appended with
    /// [`CertificateOrigin::SystemStore`].
    #[must_use]
    pub fn from_presented(
        presented: &[CertificateDer<'_>],
        store: &[CertificateDer<'_>],
        algorithm: FingerprintAlgorithm,
    ) -> Self {
        let mut arena = Self::new();

        for cert_der in presented {
            match parse_certificate_from_der(cert_der, algorithm, CertificateOrigin::Peer) {
                Ok(node) => {
                    arena.push_certificate(node);
                }
                Err(e) => {
                    tracing::debug!("Peer sent an unparseable certificate: {}", e);
                    arena.push_malformed(e.to_string());
                }
            }
        }

        let presented_len = arena.len();
        let mut store_nodes: Vec<Option<CertificateNode>> = Vec::new();
        let mut store_ids: Vec<Option<NodeId>> = Vec::new();
        if !store.is_empty() {
            store_nodes = store
                .iter()
                .map(|cert_der| {
                    parse_certificate_from_der(cert_der, algorithm, CertificateOrigin::SystemStore)
                        .ok()
                })
                .collect();
            store_ids = vec![None; store_nodes.len()];
        }

        // Newly appended store certificates need links too, so keep going
        // until every slot has been visited once.
        let mut index = 0;
        while index < arena.len() {
            let child = NodeId(index);
            index += 1;

            let Some(node) = arena.certificate(child) else {
                continue;
            };

            if node.is_self_issued() {
                arena.link(child, child);
                continue;
            }

            let wanted = node.issuer.clone();
            let by_name = (0..presented_len)
                .map(NodeId)
                .find(|id| arena.certificate(*id).is_some_and(|c| c.subject == wanted));
            if let Some(issuer) = by_name {
                arena.link(child, issuer);
                continue;
            }

            let from_store = store_nodes
                .iter()
                .position(|c| c.as_ref().is_some_and(|c| c.subject == wanted));
            if let Some(position) = from_store {
                let issuer = match store_ids[position] {
                    Some(id) => id,
                    None => {
                        let Some(store_node) = store_nodes[position].clone() else {
                            continue;
                        };
                        tracing::debug!(
                            "Completing chain with locally known issuer {}",
                            store_node.subject
                        );
                        let id = arena.push_certificate(store_node);
                        store_ids[position] = Some(id);
                        id
                    }
                };
                arena.link(child, issuer);
                continue;
            }

            // Unknown issuer: if the peer sent something unreadable right
            // after this certificate, that is where the link leads.
            let next = NodeId(child.0 + 1);
            if child.0 < presented_len
                && next.0 < presented_len
                && arena.certificate(next).is_none()
            {
                arena.link(child, next);
            }
        }

        arena
    }
}
