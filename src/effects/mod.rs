pub mod clip;
pub mod counter;
pub mod motion;
pub mod trail;

pub use clip::ClipPath;
pub use counter::Counter;
pub use motion::{MotionSample, VelocityFx};
pub use trail::{TrailCanvas, TrailParams};
