//! Restriction chain registry.
//!
//! Chains are published as immutable snapshots (`Arc<[_]>`) swapped under a
//! short write lock, so gate checks (which run on every gameplay action)
//! never block behind a registration for longer than the swap itself and
//! never observe a partially rebuilt chain.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::state::Actor;

use super::{Restriction, RestrictionKind};

/// One registered module plus the registration sequence number used to
/// break priority ties.
#[derive(Clone)]
struct Entry {
    seq: u64,
    module: Arc<dyn Restriction>,
}

type Chain = Arc<[Entry]>;

/// Holds the per-kind restriction chains and evaluates the gate.
///
/// `register`/`deregister` are rare relative to `can`; writers serialize on
/// the write lock while readers only clone the current snapshot.
pub struct RestrictionRegistry {
    chains: RwLock<Table>,
}

#[derive(Default)]
struct Table {
    by_kind: HashMap<RestrictionKind, Chain>,
    next_seq: u64,
}

impl RestrictionRegistry {
    pub fn new() -> Self {
        Self {
            chains: RwLock::new(Table::default()),
        }
    }

    /// Activates a module on every chain its capability set names.
    ///
    /// Chains are rebuilt with a stable sort by priority descending, so
    /// equal priorities keep registration order. Re-registering an active
    /// module is a no-op.
    pub fn register(&self, module: Arc<dyn Restriction>) {
        let mut table = self.chains.write().expect("restriction table poisoned");
        let seq = table.next_seq;
        table.next_seq += 1;

        for &kind in module.kinds() {
            let current = table.by_kind.entry(kind).or_insert_with(|| Arc::from([]));
            if current.iter().any(|e| Arc::ptr_eq(&e.module, &module)) {
                continue;
            }
            let mut rebuilt: Vec<Entry> = current.iter().cloned().collect();
            rebuilt.push(Entry {
                seq,
                module: Arc::clone(&module),
            });
            // Priority descending; ties keep ascending seq, i.e.
            // registration order.
            rebuilt.sort_by_key(|e| (core::cmp::Reverse(e.module.priority()), e.seq));
            *current = rebuilt.into();
        }
    }

    /// Deactivates a module on every chain it participates in.
    pub fn deregister(&self, module: &Arc<dyn Restriction>) {
        let mut table = self.chains.write().expect("restriction table poisoned");
        for chain in table.by_kind.values_mut() {
            if chain.iter().any(|e| Arc::ptr_eq(&e.module, module)) {
                let rebuilt: Vec<Entry> = chain
                    .iter()
                    .filter(|e| !Arc::ptr_eq(&e.module, module))
                    .cloned()
                    .collect();
                *chain = rebuilt.into();
            }
        }
    }

    /// Evaluates the gate for one action kind.
    ///
    /// Modules are consulted strictly in chain order; the first deny wins.
    /// An empty chain approves unconditionally. Pure with respect to
    /// registry state and safe under concurrent calls.
    pub fn can(&self, kind: RestrictionKind, actor: &Actor, target: Option<&Actor>) -> bool {
        let chain = self.chain(kind);
        for entry in chain.iter() {
            if !entry.module.allows(kind, actor, target) {
                return false;
            }
        }
        true
    }

    /// Names of the modules in one chain, in evaluation order.
    pub fn chain_names(&self, kind: RestrictionKind) -> Vec<&'static str> {
        self.chain(kind).iter().map(|e| e.module.name()).collect()
    }

    fn chain(&self, kind: RestrictionKind) -> Chain {
        let table = self.chains.read().expect("restriction table poisoned");
        table
            .by_kind
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| Arc::from([]))
    }
}

impl Default for RestrictionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
