use std::time::Duration;

use events::StreamEvent;
use log::*;

use crate::page::Page;
use crate::transport::{EventStream, StreamConnector, StreamItem};

/// Delay between a transport failure and the next subscription attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(5000);

/// Paths on which stream events are allowed to trigger a reload.
///
/// Matching is plain string comparison: the dashboard root must match
/// exactly, anything under the materials prefix matches by `starts_with`.
/// The prefix rule is textual, so a path like `/materialsx` also matches;
/// the dashboard has no such routes today.
#[derive(Debug, Clone)]
pub struct PathFilter {
    root: String,
    prefix: String,
}

impl PathFilter {
    pub fn new(root: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
        }
    }

    /// Whether events should act on a page at `path`.
    pub fn matches(&self, path: &str) -> bool {
        path == self.root || path.starts_with(&self.prefix)
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new("/", "/materials")
    }
}

/// Subscription lifecycle. At most one logical subscription exists at a
/// time; the handle is dropped wholesale on failure, never reused.
enum State<S> {
    Connecting,
    Connected(S),
    ReconnectPending,
}

/// Watches the dashboard event stream and reloads the watched page when a
/// recognized event arrives for a watched path.
///
/// Runs for the lifetime of the process: any transport failure schedules
/// exactly one re-subscription after a fixed delay, forever.
pub struct StreamWatcher<C, P> {
    connector: C,
    page: P,
    endpoint: String,
    filter: PathFilter,
    reconnect_delay: Duration,
}

impl<C, P> StreamWatcher<C, P>
where
    C: StreamConnector,
    P: Page,
{
    pub fn new(connector: C, page: P, endpoint: impl Into<String>) -> Self {
        Self {
            connector,
            page,
            endpoint: endpoint.into(),
            filter: PathFilter::default(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }

    pub fn with_path_filter(mut self, filter: PathFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Drive the subscription until the process is torn down.
    ///
    /// Returns immediately when the transport is unavailable in this
    /// environment; otherwise never returns.
    pub async fn run(self) {
        if !self.connector.supported() {
            debug!("Event stream transport unavailable; live reload disabled");
            return;
        }

        let mut state: State<C::Stream> = State::Connecting;
        loop {
            state = match state {
                State::Connecting => match self.connector.connect(&self.endpoint).await {
                    Ok(stream) => {
                        info!("Subscribed to event stream at {}", self.endpoint);
                        State::Connected(stream)
                    }
                    Err(err) => {
                        warn!("Failed to subscribe to event stream: {err}");
                        State::ReconnectPending
                    }
                },
                State::Connected(mut stream) => match stream.next().await {
                    Ok(StreamItem::Message(body)) => {
                        self.handle_message(&body).await;
                        State::Connected(stream)
                    }
                    Ok(StreamItem::Comment) => State::Connected(stream),
                    Err(err) => {
                        warn!(
                            "Event stream failed: {err}; reconnecting in {:?}",
                            self.reconnect_delay
                        );
                        State::ReconnectPending
                    }
                },
                State::ReconnectPending => {
                    tokio::time::sleep(self.reconnect_delay).await;
                    State::Connecting
                }
            };
        }
    }

    async fn handle_message(&self, body: &str) {
        let Some(event) = StreamEvent::decode(body) else {
            trace!("Ignoring undecodable stream message");
            return;
        };

        if !event.triggers_reload() {
            return;
        }

        let path = self.page.path();
        if !self.filter.matches(path) {
            debug!(
                "{} event ignored for unwatched path {path}",
                event.event_type()
            );
            return;
        }

        info!("Reloading {path} after {} event", event.event_type());
        if let Err(err) = self.page.reload().await {
            warn!("Page reload failed: {err}");
        }
    }
}
