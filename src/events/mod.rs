use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use std::time::Instant;
use tokio::time::{interval, Duration, Interval, MissedTickBehavior};

pub enum AppEvent {
    Input(Event),
    /// Animation frame, stamped with the time the wheel should advance to.
    Frame(Instant),
}

pub struct EventHandler {
    event_stream: EventStream,
    frame_interval: Interval,
}

impl EventHandler {
    pub fn new(frame_rate_ms: u64) -> Self {
        let mut frame_interval = interval(Duration::from_millis(frame_rate_ms));
        frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self {
            event_stream: EventStream::new(),
            frame_interval,
        }
    }

    pub async fn next(&mut self) -> AppEvent {
        tokio::select! {
            at = self.frame_interval.tick() => AppEvent::Frame(at.into_std()),
            event = self.event_stream.next() => {
                match event {
                    Some(Ok(evt)) => AppEvent::Input(evt),
                    _ => AppEvent::Frame(Instant::now()), // Fallback to a frame on error or None
                }
            }
        }
    }
}
