pub mod scheduler;

pub use scheduler::{PlaybackId, Scheduler, TweenId, TweenSpec};
