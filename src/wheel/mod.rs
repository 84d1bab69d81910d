pub mod animator;
pub mod error;
pub mod geometry;
pub mod knob;
pub mod label;
pub mod options;
pub mod resolver;
pub mod state;
pub mod widget;

pub use animator::{target_angle, Easing, SpinAnimator};
pub use error::WheelError;
pub use geometry::{build_segments, Point, Segment, FULL_TURN};
pub use label::{layout_label, wrap_label, FontWeight, LabelLine};
pub use options::{PlayButton, Rgb, WheelOptions, Winner};
pub use resolver::winner_index;
pub use state::{SpinPhase, SpinState};
pub use widget::{SpinObserver, SpinSnapshot, Wheel, WheelCommand, WheelHandle};
