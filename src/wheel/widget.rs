use std::time::Instant;
use tokio::sync::{mpsc, watch};

use super::animator::{target_angle, SpinAnimator};
use super::error::WheelError;
use super::geometry::{build_segments, segment_span, Segment};
use super::knob;
use super::options::WheelOptions;
use super::resolver::winner_index;
use super::state::{SpinPhase, SpinState};

/// Receives the result of each completed spin.
#[cfg_attr(test, mockall::automock)]
pub trait SpinObserver: Send {
    fn on_winner(&mut self, reward: &str, index: usize);
}

impl<F> SpinObserver for F
where
    F: FnMut(&str, usize) + Send,
{
    fn on_winner(&mut self, reward: &str, index: usize) {
        self(reward, index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelCommand {
    Spin,
    Reset,
    /// Reset and spin again, ignored while a spin is in flight.
    Retry,
}

/// Read-only view of the wheel published after every change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpinSnapshot {
    pub phase: SpinPhase,
    pub winner: Option<String>,
    pub winner_index: Option<usize>,
    pub angle: f64,
}

/// Command interface handed to the host. Stops working once the wheel it
/// was created with is dropped.
#[derive(Debug, Clone)]
pub struct WheelHandle {
    commands: mpsc::UnboundedSender<WheelCommand>,
    snapshot: watch::Receiver<SpinSnapshot>,
}

impl WheelHandle {
    pub fn send(&self, command: WheelCommand) -> Result<(), WheelError> {
        self.commands.send(command).map_err(|_| WheelError::Detached)
    }

    pub fn spin(&self) -> Result<(), WheelError> {
        self.send(WheelCommand::Spin)
    }

    pub fn reset(&self) -> Result<(), WheelError> {
        self.send(WheelCommand::Reset)
    }

    pub fn retry(&self) -> Result<(), WheelError> {
        self.send(WheelCommand::Retry)
    }

    pub fn snapshot(&self) -> SpinSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn is_attached(&self) -> bool {
        !self.commands.is_closed()
    }

    /// Waits for the next published snapshot.
    pub async fn changed(&mut self) -> Result<SpinSnapshot, WheelError> {
        self.snapshot
            .changed()
            .await
            .map_err(|_| WheelError::Detached)?;
        Ok(self.snapshot.borrow_and_update().clone())
    }
}

pub struct Wheel {
    options: WheelOptions,
    winner_index: usize,
    segments: Vec<Segment>,
    animator: SpinAnimator,
    state: SpinState,
    angle: f64,
    observer: Box<dyn SpinObserver>,
    commands: mpsc::UnboundedReceiver<WheelCommand>,
    snapshot: watch::Sender<SpinSnapshot>,
}

impl Wheel {
    pub fn new<O>(options: WheelOptions, observer: O) -> Result<(Self, WheelHandle), WheelError>
    where
        O: SpinObserver + 'static,
    {
        let winner_index = options.validate()?;
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(SpinSnapshot::default());

        let segments = build_segments(&options);
        log::info!(
            "Wheel ready: {} segments, winner {:?} at index {}",
            segments.len(),
            options.rewards[winner_index],
            winner_index
        );

        let wheel = Self {
            options,
            winner_index,
            segments,
            animator: SpinAnimator::new(),
            state: SpinState::new(),
            angle: 0.0,
            observer: Box::new(observer),
            commands: command_rx,
            snapshot: snapshot_tx,
        };

        let handle = WheelHandle {
            commands: command_tx,
            snapshot: snapshot_rx,
        };

        Ok((wheel, handle))
    }

    pub fn options(&self) -> &WheelOptions {
        &self.options
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn phase(&self) -> SpinPhase {
        self.state.phase()
    }

    pub fn winner_index(&self) -> usize {
        self.winner_index
    }

    pub fn segment_span(&self) -> f64 {
        segment_span(self.segments.len())
    }

    /// Pre-rotation that centres segment 0 under the pointer.
    pub fn angle_offset(&self) -> f64 {
        self.segment_span() / 2.0
    }

    /// Rotation angle as of the last tick.
    pub fn current_angle(&self) -> f64 {
        self.angle
    }

    /// Segment under the pointer at the current angle.
    pub fn resolved_index(&self) -> usize {
        winner_index(self.angle, self.segments.len())
    }

    pub fn knob_tilt(&self) -> f64 {
        knob::knob_tilt(self.angle, self.segment_span())
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.state.set_enabled(enabled);
    }

    pub fn spin(&mut self, now: Instant) -> Result<(), WheelError> {
        self.state.begin()?;

        let target = target_angle(
            self.winner_index,
            self.segments.len(),
            self.options.duration,
        );
        self.animator
            .start(target, self.options.duration, self.options.easing, now);

        log::info!(
            "Spin started: target {:.1} deg over {} ms",
            target,
            self.options.duration.as_millis()
        );
        self.publish();
        Ok(())
    }

    /// Rebuilds geometry and state from the current options. An in-flight
    /// timeline is abandoned.
    pub fn reset(&mut self) {
        if self.animator.is_running() {
            log::debug!("Reset abandons the spin in progress");
        }

        self.segments = build_segments(&self.options);
        self.animator = SpinAnimator::new();
        self.state = SpinState::new();
        self.angle = 0.0;

        log::info!("Wheel reset");
        self.publish();
    }

    /// Swaps in new options and resets. The wheel is left untouched when the
    /// options are invalid.
    pub fn reset_with(&mut self, options: WheelOptions) -> Result<(), WheelError> {
        let winner_index = options.validate()?;
        self.options = options;
        self.winner_index = winner_index;
        self.reset();
        Ok(())
    }

    pub fn retry(&mut self, now: Instant) -> Result<(), WheelError> {
        if !self.state.can_retry() {
            return Err(WheelError::AlreadySpinning);
        }
        self.reset();
        self.spin(now)
    }

    /// Advances the wheel to `now`: applies queued commands, observes the
    /// angle and completes the spin once the timeline has run out.
    pub fn tick(&mut self, now: Instant) {
        while let Ok(command) = self.commands.try_recv() {
            let result = match command {
                WheelCommand::Spin => self.spin(now),
                WheelCommand::Reset => {
                    self.reset();
                    Ok(())
                }
                WheelCommand::Retry => self.retry(now),
            };
            if let Err(e) = result {
                log::debug!("Ignored {:?}: {}", command, e);
            }
        }

        let previous = self.angle;
        self.angle = self.animator.angle_at(now);

        if self.state.observe_angle() {
            log::warn!("Wheel was enabled before the spin finished, disabling");
        }

        if let Some(final_angle) = self.animator.settle(now) {
            self.angle = final_angle;
            if self.state.is_spinning() {
                self.complete();
                return;
            }
        }

        if self.angle != previous {
            self.publish();
        }
    }

    fn complete(&mut self) {
        let index = self.winner_index;
        let value = self.segments[index].value.clone();

        if let Err(e) = self.state.finish(value.clone()) {
            log::error!("Could not finish spin: {}", e);
            return;
        }

        let resolved = self.resolved_index();
        if resolved != index {
            log::warn!(
                "Wheel stopped on segment {} but the scripted winner is {}",
                resolved,
                index
            );
        }

        log::info!("Spin finished: {:?} (segment {})", value, index);
        self.observer.on_winner(&value, index);
        self.publish();
    }

    fn publish(&self) {
        let snapshot = SpinSnapshot {
            phase: self.state.phase(),
            winner: self.state.winner().map(str::to_string),
            winner_index: self.state.is_finished().then_some(self.winner_index),
            angle: self.angle,
        };
        self.snapshot.send_replace(snapshot);
    }
}
