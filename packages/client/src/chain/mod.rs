//! Certificate chain model and walk
//!
//! Certificates live in a [`ChainArena`] and refer to their issuers by
//! [`NodeId`]. [`walk_chain`] turns that possibly cyclic graph into an
//! ordered list of unique nodes starting at the leaf.

pub mod arena;
pub mod walker;

pub use arena::{ChainArena, ChainEntry, NodeId};
pub use walker::{ChainSet, walk_chain};
