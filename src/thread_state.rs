//! Per-thread working state for concurrent use of a shared
//! [`DetectionContext`](crate::context::DetectionContext).

use crate::context::DetectionContext;
use crate::mpm::{AhoCorasickMpm, MultiPatternMatcher};
use crate::pattern::Direction;

pub(crate) struct DirectionThreadState<M: MultiPatternMatcher> {
    mpm_state: M::ThreadState,
    match_queue: Vec<u32>,
}

/// Holds the multi-pattern matcher's working state and match queue for
/// one worker thread, for both directions.
///
/// Only allocated for directions that have at least one registered
/// signature; a context with no `to_client` signatures at all never
/// needs `to_client` working state. Borrows the context read-only; must
/// not outlive it, and is not safe to share across threads (each thread
/// owns a distinct instance and uses it sequentially).
pub struct PerThreadState<'ctx, M: MultiPatternMatcher = AhoCorasickMpm> {
    context: &'ctx DetectionContext<M>,
    to_server: Option<DirectionThreadState<M>>,
    to_client: Option<DirectionThreadState<M>>,
}

impl<'ctx, M: MultiPatternMatcher> PerThreadState<'ctx, M> {
    /// Initializes working state for `context`, one per direction that
    /// has at least one registered signature.
    pub fn new(context: &'ctx DetectionContext<M>) -> Self {
        let to_server = (context.signature_count(Direction::ToServer) > 0).then(|| {
            DirectionThreadState {
                mpm_state: context.mpm(Direction::ToServer).init_thread_state(),
                match_queue: Vec::new(),
            }
        });
        let to_client = (context.signature_count(Direction::ToClient) > 0).then(|| {
            DirectionThreadState {
                mpm_state: context.mpm(Direction::ToClient).init_thread_state(),
                match_queue: Vec::new(),
            }
        });
        Self {
            context,
            to_server,
            to_client,
        }
    }

    pub(crate) fn context(&self) -> &'ctx DetectionContext<M> {
        self.context
    }

    pub(crate) fn direction_state(
        &mut self,
        direction: Direction,
    ) -> Option<&mut DirectionThreadState<M>> {
        match direction {
            Direction::ToServer => self.to_server.as_mut(),
            Direction::ToClient => self.to_client.as_mut(),
        }
    }
}

impl<M: MultiPatternMatcher> DirectionThreadState<M> {
    pub(crate) fn match_queue(&mut self) -> &mut Vec<u32> {
        &mut self.match_queue
    }

    /// Borrows the matcher's thread state and the match queue
    /// simultaneously, since `search` needs both at once.
    pub(crate) fn mpm_state_and_queue(&mut self) -> (&mut M::ThreadState, &mut Vec<u32>) {
        (&mut self.mpm_state, &mut self.match_queue)
    }

    pub(crate) fn reset(&mut self) {
        self.match_queue.clear();
    }
}
