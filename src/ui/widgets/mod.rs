pub mod play_button;
pub mod spin_status;
pub mod wheel_canvas;
