pub mod result_history;

pub use result_history::{ResultEntry, ResultHistory};
