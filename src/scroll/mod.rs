pub mod adapter;
pub mod scrub;
pub mod velocity;

pub use adapter::{PinRegion, ScrollAdapter, ScrollEvent, ScrollPhase, ScrollUpdate};
pub use scrub::Scrub;
pub use velocity::VelocityTracker;
