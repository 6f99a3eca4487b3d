//! `DetectionEngine::identify`, the runtime entry point the reassembler
//! and flow engine call into.

use crate::mpm::{AhoCorasickMpm, MultiPatternMatcher};
use crate::pattern::{Direction, IpProto};
use crate::proto::AppProto;
use crate::thread_state::PerThreadState;

/// The runtime entry point: identifies the application protocol carried
/// by `buffer`, a direction-tagged chunk of a reassembled flow.
pub struct DetectionEngine;

impl DetectionEngine {
    /// Identifies the application protocol in `buffer`.
    ///
    /// Algorithm (§4.4 of the specification):
    /// 1. If `direction` has no registered signatures, return [`AppProto::Unknown`].
    /// 2. Bound the search length to the direction's `max_len`.
    /// 3. Run the multi-pattern search; no matches means `Unknown`.
    /// 4. Walk the match queue in order; for each pattern-id, walk its
    ///    signature chain and verify ip-proto/offset/depth/content.
    /// 5. Return the first verified signature's app-proto, or `Unknown`.
    ///
    /// The match queue and any matcher-provided thread-local cleanup are
    /// reset before returning, regardless of outcome.
    pub fn identify<M: MultiPatternMatcher>(
        tctx: &mut PerThreadState<'_, M>,
        direction: Direction,
        buffer: &[u8],
        ip_proto: IpProto,
    ) -> AppProto {
        let context = tctx.context();
        if context.signature_count(direction) == 0 {
            return AppProto::Unknown;
        }

        let max_len = context.max_len(direction) as usize;
        let search_len = buffer.len().min(max_len);
        let search_buf = &buffer[..search_len];

        let Some(dir_state) = tctx.direction_state(direction) else {
            return AppProto::Unknown;
        };

        let mpm = context.mpm(direction);
        let match_count = {
            let (mpm_state, queue) = dir_state.mpm_state_and_queue();
            mpm.search(mpm_state, queue, search_buf)
        };

        let mut result = AppProto::Unknown;
        if match_count > 0 {
            let queue = dir_state.match_queue().clone();
            'candidates: for pattern_id in queue {
                for &sig_index in context.chain(direction, pattern_id) {
                    let signature = context.signature(sig_index);
                    if signature.verify(buffer, ip_proto) {
                        result = signature.app_proto;
                        break 'candidates;
                    }
                }
            }
        }

        dir_state.reset();
        result
    }
}

/// Convenience entry point over the default `aho-corasick` backend.
pub fn identify(
    tctx: &mut PerThreadState<'_, AhoCorasickMpm>,
    direction: Direction,
    buffer: &[u8],
    ip_proto: IpProto,
) -> AppProto {
    DetectionEngine::identify(tctx, direction, buffer, ip_proto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{DetectionContext, DetectionContextBuilder};

    fn sample_context() -> DetectionContext {
        let mut b: DetectionContextBuilder = DetectionContextBuilder::new();
        b.add(IpProto::Tcp, AppProto::Http, "HTTP/", 0, 5, Direction::ToClient)
            .unwrap();
        b.add(IpProto::Tcp, AppProto::Ftp, "220 ", 0, 4, Direction::ToClient)
            .unwrap();
        b.finalize().unwrap()
    }

    #[test]
    fn unknown_for_short_buffer_below_depth() {
        let ctx = sample_context();
        let mut tctx = PerThreadState::new(&ctx);
        let proto = identify(&mut tctx, Direction::ToClient, b"HT", IpProto::Tcp);
        assert_eq!(proto, AppProto::Unknown);
    }

    #[test]
    fn unknown_when_direction_has_no_signatures() {
        let ctx = sample_context();
        let mut tctx = PerThreadState::new(&ctx);
        let proto = identify(&mut tctx, Direction::ToServer, b"GET / HTTP/1.0\r\n", IpProto::Tcp);
        assert_eq!(proto, AppProto::Unknown);
    }

    #[test]
    fn identifies_http_response() {
        let ctx = sample_context();
        let mut tctx = PerThreadState::new(&ctx);
        let proto = identify(
            &mut tctx,
            Direction::ToClient,
            b"HTTP/1.1 200 OK\r\nServer: Apache/1.0\r\n\r\n",
            IpProto::Tcp,
        );
        assert_eq!(proto, AppProto::Http);
    }

    #[test]
    fn identifies_ftp_banner() {
        let ctx = sample_context();
        let mut tctx = PerThreadState::new(&ctx);
        let proto = identify(
            &mut tctx,
            Direction::ToClient,
            b"220 Welcome to the OISF FTP server\r\n",
            IpProto::Tcp,
        );
        assert_eq!(proto, AppProto::Ftp);
    }

    #[test]
    fn repeated_calls_reset_the_match_queue() {
        let ctx = sample_context();
        let mut tctx = PerThreadState::new(&ctx);
        for _ in 0..3 {
            let proto = identify(
                &mut tctx,
                Direction::ToClient,
                b"HTTP/1.1 200 OK\r\n",
                IpProto::Tcp,
            );
            assert_eq!(proto, AppProto::Http);
        }
    }
}
