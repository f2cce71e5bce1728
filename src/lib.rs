#![forbid(unsafe_code)]

pub mod animation;
pub mod effects;
pub mod foundation;
pub mod hero;
pub mod interact;
pub mod runtime;
pub mod scene;
pub mod scroll;
pub mod timeline;

pub use animation::{ease::Ease, value::Value};
pub use effects::{ClipPath, Counter, TrailCanvas, VelocityFx};
pub use foundation::core::{Length, Point, Rect, Rgba8, Vec2, Viewport};
pub use foundation::error::{HeroError, HeroResult};
pub use hero::{FrameReport, HeroConfig, HeroPage, PageSnapshot, Variant};
pub use runtime::Scheduler;
pub use scene::{ElementId, ElementKind, Prop, Scene, SceneSnapshot};
pub use scroll::{ScrollAdapter, ScrollEvent, ScrollPhase, ScrollUpdate};
pub use timeline::{CompiledTimeline, Position, StepOpts, Timeline, TimelineBuilder};
