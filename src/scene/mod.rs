pub mod registry;
pub mod style;

pub use registry::{Element, ElementId, ElementKind, ElementSnapshot, Scene, SceneSnapshot};
pub use style::{Prop, Style};
