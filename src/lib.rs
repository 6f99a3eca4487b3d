//! protoid - Application-layer protocol detection core
//!
//! A small, thread-shareable engine for identifying the application
//! protocol carried by a flow from its first observed bytes, independent
//! of the port it was seen on. Signatures are literal byte patterns bound
//! to a direction (`to_server`/`to_client`), a transport protocol, and a
//! `[offset, depth)` window; the fastest-matching candidate is confirmed
//! by exact re-check before being reported.
//!
//! # Quick start
//!
//! ```rust
//! use protoid::{builtin_context, identify, AppProto, Direction, IpProto, PerThreadState};
//!
//! let context = builtin_context().unwrap();
//! let mut tctx = PerThreadState::new(&context);
//!
//! let proto = identify(
//!     &mut tctx,
//!     Direction::ToServer,
//!     b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n",
//!     IpProto::Tcp,
//! );
//! assert_eq!(proto, AppProto::Http);
//! ```
//!
//! # Building a custom signature set
//!
//! ```rust
//! use protoid::{AppProto, Direction, DetectionContextBuilder, IpProto, PerThreadState, identify};
//!
//! let mut builder = DetectionContextBuilder::new();
//! builder.add(IpProto::Tcp, AppProto::Ftp, "220 ", 0, 4, Direction::ToClient).unwrap();
//! let context = builder.finalize().unwrap();
//!
//! let mut tctx = PerThreadState::new(&context);
//! let proto = identify(&mut tctx, Direction::ToClient, b"220 Welcome\r\n", IpProto::Tcp);
//! assert_eq!(proto, AppProto::Ftp);
//! ```
//!
//! # Architecture
//!
//! ```text
//! DetectionContextBuilder  -- add() signatures, one at a time
//!           │ finalize()
//!           ▼
//! DetectionContext         -- immutable, Send + Sync, shared across threads
//!           │ PerThreadState::new()
//!           ▼
//! PerThreadState           -- one per worker thread, used sequentially
//!           │ identify()
//!           ▼
//!        AppProto
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Built-in protocol signature table.
pub mod builtin;
/// Immutable, shareable detection context and its staged builder.
pub mod context;
/// Error types for building a detection context.
pub mod error;
/// Core `identify` algorithm.
pub mod engine;
/// Dense pattern-id interning.
pub mod interner;
/// Multi-pattern matcher capability and the `aho-corasick` backend.
pub mod mpm;
/// Pattern notation parsing and the `Direction`/`IpProto`/`Pattern` types.
pub mod pattern;
/// The closed set of application protocol identifiers.
pub mod proto;
/// The `Signature` record and its verification logic.
pub mod signature;
/// Per-thread working state for concurrent use of a shared context.
pub mod thread_state;

pub use crate::builtin::{builtin_context, register_builtin_signatures};
pub use crate::context::{DetectionContext, DetectionContextBuilder, INSPECT_BYTES};
pub use crate::engine::{identify, DetectionEngine};
pub use crate::error::{DetectError, Result};
pub use crate::mpm::{AhoCorasickMpm, MultiPatternMatcher};
pub use crate::pattern::{parse_pattern_notation, Direction, IpProto, Pattern, PatternFlags};
pub use crate::proto::AppProto;
pub use crate::signature::Signature;
pub use crate::thread_state::PerThreadState;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
