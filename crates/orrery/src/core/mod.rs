pub mod presentation;
pub mod time;

pub use presentation::PresentationState;
pub use time::FrameClock;
