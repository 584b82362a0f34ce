use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Inline list of subscriptions active for a model.
pub type SubList<Msg> = SmallVec<[Sub<Msg>; 4]>;

/// Event source the engine keeps open while a subscription is active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// Fires once per rendered frame.
    Frame,
    /// Fires on a fixed interval.
    Every(Duration),
    /// Fires on pointer presses.
    Pointer,
}

/// Event delivered by an open [`Source`].
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A frame elapsed.
    Frame {
        /// Seconds since the previous frame.
        dt: f32,
    },
    /// An interval elapsed.
    Tick,
    /// The pointer was pressed at screen coordinates.
    Pointer {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
}

impl Event {
    /// Returns whether this event can originate from `source`.
    pub fn matches(&self, source: &Source) -> bool {
        matches!(
            (self, source),
            (Event::Frame { .. }, Source::Frame)
                | (Event::Tick, Source::Every(_))
                | (Event::Pointer { .. }, Source::Pointer)
        )
    }
}

/// Standing effect that turns every event from its source into a `Msg`.
pub struct Sub<Msg> {
    source: Source,
    to_msg: Arc<dyn Fn(Event) -> Msg + Send + Sync>,
}

impl<Msg: 'static> Sub<Msg> {
    /// Builds a subscription from a source and its event mapper.
    pub fn new(source: Source, to_msg: impl Fn(Event) -> Msg + Send + Sync + 'static) -> Self {
        Self {
            source,
            to_msg: Arc::new(to_msg),
        }
    }

    /// Per-frame subscription receiving the frame delta in seconds.
    pub fn frame(to_msg: impl Fn(f32) -> Msg + Send + Sync + 'static) -> Self {
        Self::new(Source::Frame, move |event| match event {
            Event::Frame { dt } => to_msg(dt),
            Event::Tick | Event::Pointer { .. } => to_msg(0.0),
        })
    }

    /// Interval subscription delivering a clone of `msg` on every tick.
    pub fn every(period: Duration, msg: Msg) -> Self
    where
        Msg: Clone + Send + Sync,
    {
        Self::new(Source::Every(period), move |_| msg.clone())
    }

    /// Pointer subscription receiving press coordinates.
    pub fn pointer(to_msg: impl Fn(f32, f32) -> Msg + Send + Sync + 'static) -> Self {
        Self::new(Source::Pointer, move |event| match event {
            Event::Pointer { x, y } => to_msg(x, y),
            Event::Frame { .. } | Event::Tick => to_msg(0.0, 0.0),
        })
    }

    /// Source the engine must keep open for this subscription.
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Rewraps every delivered message; the source itself is moved through untouched.
    pub fn map<B: 'static>(self, f: impl Fn(Msg) -> B + Send + Sync + 'static) -> Sub<B> {
        let to_msg = self.to_msg;
        Sub {
            source: self.source,
            to_msg: Arc::new(move |event| f(to_msg(event))),
        }
    }

    /// Converts one event from the source into a message.
    pub fn deliver(&self, event: Event) -> Msg {
        (self.to_msg)(event)
    }
}

impl<Msg> Clone for Sub<Msg> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            to_msg: Arc::clone(&self.to_msg),
        }
    }
}

impl<Msg> fmt::Debug for Sub<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sub").field("source", &self.source).finish()
    }
}

/// Maps every subscription in `subs` into another message space.
pub fn map_subs<A: 'static, B: 'static>(
    subs: SubList<A>,
    f: impl Fn(A) -> B + Clone + Send + Sync + 'static,
) -> SubList<B> {
    subs.into_iter().map(|sub| sub.map(f.clone())).collect()
}
