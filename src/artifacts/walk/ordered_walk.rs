//! Lazy, order-preserving graph walk
//!
//! An [`OrderedWalk`] starts from an already loaded root and yields nodes one
//! pull at a time in the order given by a comparator. Children of an emitted
//! node are discovered by `scan` and fetched by `load`; loads run concurrently
//! while the next pull is suspended.
//!
//! ## Algorithm
//!
//! The walk keeps a frontier of loaded, not yet emitted nodes sorted by the
//! comparator, plus the set of loads still in flight. A pull:
//!
//! 1. waits until every in-flight load has settled and inserts the results
//!    into the frontier (the barrier),
//! 2. pops the first node of the frontier (none left: the walk is over),
//! 3. scans it and starts a load for every identity the scan returned.
//!
//! The barrier is what keeps the output ordered: a node may only be emitted
//! once nothing discovered so far can still land ahead of it.
//!
//! Nodes that compare equal come out in discovery order, i.e. the order in
//! which `scan` produced their keys. Arrivals are re-sequenced before they
//! enter the frontier, so the completion order of concurrent loads never
//! shows up in the output.
//!
//! ## Failures
//!
//! A failed load is handed to the pull that observes it. Loads that already
//! arrived are kept and the remaining ones keep running, so the caller may
//! pull again and continue with the rest of the graph.

use crate::errors::WalkResult;
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, Stream, StreamExt};
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::marker::PhantomData;
use tracing::{trace, warn};

type PendingLoad<N> = BoxFuture<'static, (u64, WalkResult<N>)>;

/// Pull-driven walk over a lazily loaded graph
///
/// # Type Parameters
///
/// * `N` - Loaded node
/// * `K` - Key handed from `scan` to `load` (an identity, or an unloaded node)
/// * `ScanFn` - `&N -> Vec<K>`, returns the children that were not seen yet
/// * `LoadFn` - `K -> future of N`, fetches a child
/// * `CompareFn` - total order over loaded nodes; `Less` is emitted first
pub struct OrderedWalk<N, K, ScanFn, LoadFn, CompareFn> {
    frontier: VecDeque<N>,
    in_flight: FuturesUnordered<PendingLoad<N>>,
    arrived: Vec<(u64, N)>,
    issued: u64,
    scan: ScanFn,
    load: LoadFn,
    compare: CompareFn,
    _key: PhantomData<fn() -> K>,
}

impl<N, K, ScanFn, LoadFn, CompareFn> OrderedWalk<N, K, ScanFn, LoadFn, CompareFn>
where
    N: Send + 'static,
    ScanFn: FnMut(&N) -> Vec<K>,
    LoadFn: FnMut(K) -> BoxFuture<'static, WalkResult<N>>,
    CompareFn: Fn(&N, &N) -> Ordering,
{
    pub fn new(root: N, scan: ScanFn, load: LoadFn, compare: CompareFn) -> Self {
        Self {
            frontier: VecDeque::from([root]),
            in_flight: FuturesUnordered::new(),
            arrived: Vec::new(),
            issued: 0,
            scan,
            load,
            compare,
            _key: PhantomData,
        }
    }

    /// Pull the next node
    ///
    /// Returns `None` once the frontier is empty and nothing is in flight.
    pub async fn next(&mut self) -> Option<WalkResult<N>> {
        while let Some((sequence, result)) = self.in_flight.next().await {
            match result {
                Ok(node) => self.arrived.push((sequence, node)),
                Err(error) => {
                    warn!(sequence, %error, "load failed during walk expansion");
                    return Some(Err(error));
                }
            }
        }
        self.settle_arrivals();

        let node = self.frontier.pop_front()?;
        self.expand(&node);

        Some(Ok(node))
    }

    /// Turn the walk into a `Stream`, for use with `StreamExt` combinators
    pub fn into_stream(self) -> impl Stream<Item = WalkResult<N>> {
        futures::stream::unfold(self, |mut walk| async move {
            walk.next().await.map(|item| (item, walk))
        })
    }

    /// Number of loaded nodes waiting to be emitted
    pub fn frontier_len(&self) -> usize {
        self.frontier.len() + self.arrived.len()
    }

    /// Number of loads that have not settled yet
    pub fn loads_in_flight(&self) -> usize {
        self.in_flight.len()
    }

    fn expand(&mut self, node: &N) {
        let children = (self.scan)(node);
        if children.is_empty() {
            return;
        }

        trace!(count = children.len(), first_sequence = self.issued, "issuing loads");
        for key in children {
            let sequence = self.issued;
            self.issued += 1;

            let load = (self.load)(key);
            self.in_flight
                .push(async move { (sequence, load.await) }.boxed());
        }
    }

    fn settle_arrivals(&mut self) {
        self.arrived.sort_by_key(|(sequence, _)| *sequence);

        for (_, node) in self.arrived.drain(..) {
            let position = self.frontier.partition_point(|queued| {
                (self.compare)(queued, &node) != Ordering::Greater
            });
            self.frontier.insert(position, node);
        }
    }
}
