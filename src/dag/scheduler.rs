// src/dag/scheduler.rs

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::fmt;

use tracing::{debug, trace};

use crate::dag::graph::DependencyGraph;
use crate::dag::priority::{PriorityKey, compare_priority};
use crate::types::{NodeId, NodeKind, SchedulingPolicy};

/// A node handed out by [`TaskScheduler::next`], with the key it was
/// selected under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub key: PriorityKey,
}

impl fmt::Display for ScheduledNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.key, f)
    }
}

/// Heap entry: a key plus the node generation it was computed against.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HeapEntry {
    key: PriorityKey,
    born: u64,
    generation: u64,
}

/// What the scheduler remembers about a node it has not yielded yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    /// Birth revision of the node that was seeded.
    born: u64,
    /// Generation of the newest heap entry pushed for it.
    generation: u64,
}

impl Pending {
    fn of(entry: &HeapEntry) -> Self {
        Self {
            born: entry.born,
            generation: entry.generation,
        }
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_priority(&self.key, &other.key).then_with(|| self.generation.cmp(&other.generation))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Yields graph nodes one at a time in priority order.
///
/// The scheduler never mutates the graph: resolving a yielded node (removing
/// it, or removing its outgoing edges) is up to the consumer.
///
/// Staleness under [`SchedulingPolicy::Live`]: every node carries the graph
/// revision at which its degree last changed (its generation). `pending`
/// records, per node not yet yielded, the generation of its newest heap
/// entry. When the graph revision moves, pending nodes whose generation
/// changed get a fresh entry; a popped entry whose generation does not match
/// `pending` is discarded.
///
/// Pending records also keep the birth revision of the seeded node. A node
/// removed and re-added under the same id is a different node: the old
/// record is dropped and the newcomer waits for [`TaskScheduler::reset`].
#[derive(Debug)]
pub struct TaskScheduler {
    policy: SchedulingPolicy,
    heap: BinaryHeap<Reverse<HeapEntry>>,
    pending: HashMap<NodeId, Pending>,
    /// Graph revision the heap was last brought up to date with.
    seen_revision: u64,
}

impl TaskScheduler {
    /// Seed a scheduler from every node currently in `graph`.
    pub fn new(policy: SchedulingPolicy, graph: &DependencyGraph) -> Self {
        let mut scheduler = Self {
            policy,
            heap: BinaryHeap::new(),
            pending: HashMap::new(),
            seen_revision: 0,
        };
        scheduler.reset(graph);
        scheduler
    }

    /// Discard all progress and reseed from the graph's current state.
    pub fn reset(&mut self, graph: &DependencyGraph) {
        self.heap.clear();
        self.pending.clear();

        for id in graph.nodes() {
            if let Some(entry) = entry_for(graph, id) {
                self.pending.insert(entry.key.id.clone(), Pending::of(&entry));
                self.heap.push(Reverse(entry));
            }
        }

        self.seen_revision = graph.revision();
        debug!(
            policy = %self.policy,
            nodes = self.pending.len(),
            "scheduler: seeded priority heap"
        );
    }

    /// Pop the node with the smallest priority key.
    ///
    /// `None` means the scheduler is exhausted; it is a normal terminal
    /// state, not a failure. Nodes removed from the graph since seeding are
    /// skipped.
    pub fn next(&mut self, graph: &DependencyGraph) -> Option<ScheduledNode> {
        if self.policy == SchedulingPolicy::Live && graph.revision() != self.seen_revision {
            self.refresh(graph);
        }

        while let Some(Reverse(entry)) = self.heap.pop() {
            if self.pending.get(&entry.key.id) != Some(&Pending::of(&entry)) {
                trace!(node = %entry.key.id, "scheduler: discarding stale heap entry");
                continue;
            }
            self.pending.remove(&entry.key.id);

            if graph.birth(&entry.key.id).ok() != Some(entry.born) {
                debug!(node = %entry.key.id, "scheduler: node left the graph; skipping");
                continue;
            }
            let Ok(kind) = graph.kind(&entry.key.id) else {
                continue;
            };

            debug!(
                node = %entry.key.id,
                key = %entry.key,
                remaining = self.pending.len(),
                "scheduler: selected node"
            );
            return Some(ScheduledNode {
                id: entry.key.id.clone(),
                kind,
                key: entry.key,
            });
        }

        None
    }

    /// Iterator over the remaining nodes.
    pub fn drain<'a>(&'a mut self, graph: &'a DependencyGraph) -> Drain<'a> {
        Drain {
            scheduler: self,
            graph,
        }
    }

    /// Number of seeded nodes not yet yielded.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }

    /// Re-key every pending node whose generation moved; drop nodes that are
    /// gone from the graph or were replaced under the same id.
    fn refresh(&mut self, graph: &DependencyGraph) {
        let mut gone = Vec::new();
        let mut refreshed = 0usize;

        for (id, pending) in self.pending.iter_mut() {
            match entry_for(graph, id) {
                Some(entry) if entry.born != pending.born => gone.push(id.clone()),
                None => gone.push(id.clone()),
                Some(entry) if entry.generation != pending.generation => {
                    pending.generation = entry.generation;
                    self.heap.push(Reverse(entry));
                    refreshed += 1;
                }
                Some(_) => {}
            }
        }

        for id in &gone {
            self.pending.remove(id);
        }

        self.seen_revision = graph.revision();
        debug!(
            refreshed,
            dropped = gone.len(),
            revision = self.seen_revision,
            "scheduler: refreshed priority keys"
        );
    }
}

fn entry_for(graph: &DependencyGraph, id: &str) -> Option<HeapEntry> {
    let key = PriorityKey::for_node(graph, id).ok()?;
    let born = graph.birth(id).ok()?;
    let generation = graph.generation(id).ok()?;
    Some(HeapEntry {
        key,
        born,
        generation,
    })
}

/// Borrowing iterator returned by [`TaskScheduler::drain`].
pub struct Drain<'a> {
    scheduler: &'a mut TaskScheduler,
    graph: &'a DependencyGraph,
}

impl Iterator for Drain<'_> {
    type Item = ScheduledNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.scheduler.next(self.graph)
    }
}
