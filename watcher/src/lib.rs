//! Client-side live reload over the dashboard's server-sent event stream.
//!
//! This crate keeps one page of the materials dashboard fresh: it holds a
//! single subscription to the dashboard's SSE endpoint, decodes each
//! message body, and re-fetches the watched page whenever an event arrives
//! that affects what the page shows.
//!
//! # Architecture
//!
//! - **Single subscription**: at most one live subscription exists at a
//!   time; it is dropped wholesale and replaced on every reconnect.
//! - **Fixed-delay reconnect**: any transport failure schedules exactly
//!   one re-subscription after a fixed delay. Retries are unbounded with
//!   no backoff growth.
//! - **Full reload only**: the watcher never patches page state; the one
//!   side effect is a full re-fetch of the watched page.
//! - **Path allow-list**: reloads fire only for the dashboard root or
//!   paths under the materials prefix.
//!
//! # Modules
//!
//! - `transport`: subscription traits and the `eventsource-client` backed
//!   [`SseConnector`]
//! - `page`: the watched page abstraction and the HTTP-backed [`HttpPage`]
//! - `watch`: the [`StreamWatcher`] state machine and [`PathFilter`]

pub mod page;
pub mod transport;
pub mod watch;

pub use page::{HttpPage, Page};
pub use transport::{EventStream, SseConnector, StreamConnector, StreamItem};
pub use watch::{PathFilter, StreamWatcher};
