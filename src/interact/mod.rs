pub mod keyboard;
pub mod rev;
pub mod tilt;

pub use keyboard::{KeyboardScroller, ScrollKey, ScrollRequest};
pub use rev::{RevGuard, RevState, rev_timeline};
pub use tilt::{Tilt, TiltParams};
