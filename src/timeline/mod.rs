pub mod compile;
pub mod dsl;
pub mod model;

pub use compile::{Channel, CompiledTimeline, Segment, Write};
pub use dsl::{StepDefaults, StepOpts, TimelineBuilder};
pub use model::{Entry, Position, PropTween, Step, Timeline};
