use super::error::WheelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinPhase {
    #[default]
    Idle,
    Spinning,
    Finished,
}

impl SpinPhase {
    pub fn as_str(&self) -> &str {
        match self {
            SpinPhase::Idle => "idle",
            SpinPhase::Spinning => "spinning",
            SpinPhase::Finished => "finished",
        }
    }
}

/// Per-cycle spin state. Transitions go through the methods below, which
/// refuse anything the cycle does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpinState {
    phase: SpinPhase,
    enabled: bool,
    winner: Option<String>,
}

impl SpinState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn is_spinning(&self) -> bool {
        self.phase == SpinPhase::Spinning
    }

    pub fn is_finished(&self) -> bool {
        self.phase == SpinPhase::Finished
    }

    /// Whether a reset-and-retry may run now.
    pub fn can_retry(&self) -> bool {
        self.phase != SpinPhase::Spinning
    }

    pub fn begin(&mut self) -> Result<(), WheelError> {
        match self.phase {
            SpinPhase::Idle => {
                self.phase = SpinPhase::Spinning;
                Ok(())
            }
            SpinPhase::Spinning => Err(WheelError::AlreadySpinning),
            SpinPhase::Finished => Err(WheelError::NeedsReset),
        }
    }

    pub fn finish(&mut self, winner: String) -> Result<(), WheelError> {
        if self.phase != SpinPhase::Spinning {
            return Err(WheelError::NotSpinning);
        }
        self.phase = SpinPhase::Finished;
        self.winner = Some(winner);
        Ok(())
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Called for every observed angle. Enabling before the spin has
    /// finished is undone; returns true when that happened.
    pub fn observe_angle(&mut self) -> bool {
        if self.enabled && self.phase != SpinPhase::Finished {
            self.enabled = false;
            return true;
        }
        false
    }
}
