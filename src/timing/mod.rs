pub mod active;
pub mod window;

pub use active::{ActivePrayer, select_active};
pub use window::{MarkGate, can_mark, has_passed, in_early_window};
