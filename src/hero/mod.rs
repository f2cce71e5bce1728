pub mod config;
pub mod page;
pub mod timelines;

pub use config::{HeroConfig, StatConfig, Variant};
pub use page::{FrameReport, HeroPage, PageSnapshot};
pub use timelines::{HeroTimelines, build_scene, build_timelines};
