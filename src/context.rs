//! `DetectionContext` construction.
//!
//! A staged builder: `add()` any number of signatures, then `finalize()`
//! exactly once. After `finalize()` the context is immutable and may be
//! shared read-only across worker threads.

use crate::error::DetectError;
use crate::interner::PatternIdInterner;
use crate::mpm::{AhoCorasickMpm, MultiPatternMatcher};
use crate::pattern::{parse_pattern_notation, Direction, IpProto, PatternFlags};
use crate::signature::Signature;

/// Minimum initial chunk size the engine asks the reassembler to buffer
/// before calling `identify`, absent any shorter-depth pattern. See §9 of
/// the specification: `min_len` starts at this value and is only ever
/// lowered, never raised, by a pattern with `depth < INSPECT_BYTES`.
pub const INSPECT_BYTES: u16 = 32;

/// Per-direction state: the multi-pattern matcher instance plus the
/// length bounds the reassembler and engine rely on.
struct DirectionTable<M: MultiPatternMatcher> {
    mpm: M,
    min_len: u16,
    max_len: u16,
    signature_count: u32,
    /// pattern_id -> signature indices (into `DetectionContext::signatures`),
    /// most-recently-registered first, mirroring the original's
    /// intrusive-linked-list prepend order.
    chains: Vec<Vec<u32>>,
}

impl<M: MultiPatternMatcher> DirectionTable<M> {
    fn new(mpm: M) -> Self {
        Self {
            mpm,
            min_len: INSPECT_BYTES,
            max_len: INSPECT_BYTES,
            signature_count: 0,
            chains: Vec::new(),
        }
    }
}

/// The immutable-after-build container holding both direction tables,
/// the full signature list, and the pattern-id interner.
///
/// Owns every `Pattern`, `Signature`, and `DirectionTable` it contains.
/// Shared read-only by any number of worker threads once finalized; no
/// lock is needed since nothing mutates after `finalize()`.
pub struct DetectionContext<M: MultiPatternMatcher = AhoCorasickMpm> {
    to_server: DirectionTable<M>,
    to_client: DirectionTable<M>,
    signatures: Vec<Signature>,
    interner: PatternIdInterner,
}

impl<M: MultiPatternMatcher> DetectionContext<M> {
    fn direction_table(&self, direction: Direction) -> &DirectionTable<M> {
        match direction {
            Direction::ToServer => &self.to_server,
            Direction::ToClient => &self.to_client,
        }
    }

    /// Minimum bytes the reassembler must deliver in `direction` before
    /// calling `identify`. Valid only after `finalize()`.
    pub fn min_len(&self, direction: Direction) -> u16 {
        self.direction_table(direction).min_len
    }

    /// Maximum bytes the engine will ever inspect in `direction`.
    pub fn max_len(&self, direction: Direction) -> u16 {
        self.direction_table(direction).max_len
    }

    /// Number of signatures registered for `direction`.
    pub fn signature_count(&self, direction: Direction) -> u32 {
        self.direction_table(direction).signature_count
    }

    /// Full signature list, in registration order, for inspection/CLI use.
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    pub(crate) fn mpm(&self, direction: Direction) -> &M {
        &self.direction_table(direction).mpm
    }

    pub(crate) fn chain(&self, direction: Direction, pattern_id: u32) -> &[u32] {
        let table = self.direction_table(direction);
        table
            .chains
            .get(pattern_id as usize)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn signature(&self, index: u32) -> &Signature {
        &self.signatures[index as usize]
    }

    /// Highest pattern-id interned across both directions.
    pub fn max_pattern_id(&self) -> u32 {
        self.interner.max_id()
    }
}

/// Staged builder for a [`DetectionContext`].
pub struct DetectionContextBuilder<M: MultiPatternMatcher = AhoCorasickMpm> {
    to_server: DirectionTable<M>,
    to_client: DirectionTable<M>,
    signatures: Vec<Signature>,
    interner: PatternIdInterner,
}

impl<M: MultiPatternMatcher + Default> DetectionContextBuilder<M> {
    /// Creates a new builder with empty per-direction matchers.
    pub fn new() -> Self {
        Self {
            to_server: DirectionTable::new(M::default()),
            to_client: DirectionTable::new(M::default()),
            signatures: Vec::new(),
            interner: PatternIdInterner::new(),
        }
    }
}

impl<M: MultiPatternMatcher + Default> Default for DetectionContextBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MultiPatternMatcher> DetectionContextBuilder<M> {
    /// Registers one signature: parses `pattern_notation`, interns the
    /// resulting content against `(offset, depth, flags)`, registers the
    /// content with the direction's matcher, widens/narrows the
    /// direction's `max_len`/`min_len`, and appends a [`Signature`].
    ///
    /// # Errors
    ///
    /// [`DetectError::InvalidPattern`] if the notation is unparsable, empty,
    /// or `depth` is smaller than the parsed content length.
    pub fn add(
        &mut self,
        ip_proto: IpProto,
        app_proto: crate::proto::AppProto,
        pattern_notation: &str,
        offset: u16,
        depth: u16,
        direction: Direction,
    ) -> Result<(), DetectError> {
        let content = parse_pattern_notation(pattern_notation)?;
        if depth < offset + content.len() as u16 {
            return Err(DetectError::InvalidPattern(format!(
                "pattern {:?}: depth {} is less than offset {} + content length {}",
                pattern_notation,
                depth,
                offset,
                content.len()
            )));
        }

        let pattern_id = self
            .interner
            .intern(&content, offset, depth, PatternFlags::CaseSensitive);

        let table = match direction {
            Direction::ToServer => &mut self.to_server,
            Direction::ToClient => &mut self.to_client,
        };
        table
            .mpm
            .add_pattern(&content, offset, depth, pattern_id, false);
        table.max_len = table.max_len.max(depth);
        table.min_len = table.min_len.min(depth);
        table.signature_count += 1;

        self.signatures.push(Signature {
            ip_proto,
            app_proto,
            direction,
            content,
            offset,
            depth,
            pattern_id,
        });

        Ok(())
    }

    /// Transitions from mutable build to immutable query: prepares both
    /// matchers and builds the pattern-id → signature-chain map for each
    /// direction.
    ///
    /// In a production deployment this is also where the reassembler
    /// would be notified of each direction's `min_len` (the one-time
    /// notification described in §6.1); that notification is exposed to
    /// callers via [`DetectionContext::min_len`] rather than performed as
    /// a side effect here, since this crate has no reassembler of its own
    /// to call back into.
    pub fn finalize(mut self) -> Result<DetectionContext<M>, DetectError> {
        self.to_server.mpm.prepare()?;
        self.to_client.mpm.prepare()?;

        let max_id = self.interner.max_id() as usize;
        self.to_server.chains = vec![Vec::new(); max_id];
        self.to_client.chains = vec![Vec::new(); max_id];

        for (index, sig) in self.signatures.iter().enumerate() {
            let table = match sig.direction {
                Direction::ToServer => &mut self.to_server,
                Direction::ToClient => &mut self.to_client,
            };
            // Prepend, mirroring the original's intrusive-list insertion:
            // the most recently registered signature for a pattern-id is
            // checked first.
            table.chains[sig.pattern_id as usize].insert(0, index as u32);
        }

        Ok(DetectionContext {
            to_server: self.to_server,
            to_client: self.to_client,
            signatures: self.signatures,
            interner: self.interner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::AppProto;

    #[test]
    fn min_len_is_lowered_by_shallow_patterns_but_never_raised() {
        let mut builder: DetectionContextBuilder = DetectionContextBuilder::new();
        builder
            .add(IpProto::Tcp, AppProto::Smtp, "SMTP ", 4, 64, Direction::ToServer)
            .unwrap();
        builder
            .add(IpProto::Tcp, AppProto::Ftp, "USER ", 0, 5, Direction::ToServer)
            .unwrap();
        let ctx = builder.finalize().unwrap();
        // depth 64 never lowers min_len below INSPECT_BYTES; depth 5 does.
        assert_eq!(ctx.min_len(Direction::ToServer), 5);
        assert_eq!(ctx.max_len(Direction::ToServer), 64);
    }

    #[test]
    fn empty_direction_has_zero_signatures() {
        let builder: DetectionContextBuilder = DetectionContextBuilder::new();
        let ctx = builder.finalize().unwrap();
        assert_eq!(ctx.signature_count(Direction::ToClient), 0);
        assert_eq!(ctx.min_len(Direction::ToClient), INSPECT_BYTES);
    }

    #[test]
    fn finalized_context_is_immutable_by_construction() {
        // finalize() consumes the builder, so there is no `self` left to
        // call add() on afterward: the "already finalized" failure mode is
        // ruled out at the type level rather than checked at runtime.
        let mut builder: DetectionContextBuilder = DetectionContextBuilder::new();
        builder
            .add(IpProto::Tcp, AppProto::Http, "GET ", 0, 4, Direction::ToServer)
            .unwrap();
        let ctx = builder.finalize().unwrap();
        assert_eq!(ctx.signature_count(Direction::ToServer), 1);
    }

    #[test]
    fn depth_less_than_offset_plus_len_is_rejected() {
        let mut builder: DetectionContextBuilder = DetectionContextBuilder::new();
        let err = builder
            .add(IpProto::Tcp, AppProto::Http, "GET ", 0, 2, Direction::ToServer)
            .unwrap_err();
        assert!(matches!(err, DetectError::InvalidPattern(_)));
    }
}
