use std::collections::BTreeMap;

use crate::{
    animation::value::Value,
    foundation::core::Viewport,
    foundation::error::{HeroError, HeroResult},
    scene::style::{Prop, Style},
};

/// Stable handle of a registered element.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u32);

/// Role of an element on the page; hosts use it to pick markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Container,
    Headline,
    Vehicle,
    Flame,
    Headlights,
    ScrollPrompt,
    Band,
    Card,
    Panel,
    StatBlock,
}

#[derive(Clone, Debug)]
pub struct Element {
    pub name: String,
    pub kind: ElementKind,
    attached: bool,
    style: Style,
}

impl Element {
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

/// Explicit registry of the page's visual elements.
///
/// Elements are registered once, addressed by name or [`ElementId`], and may
/// be detached (the equivalent of a ref that is not in the document). Writes
/// to a detached element are dropped.
#[derive(Clone, Debug)]
pub struct Scene {
    viewport: Viewport,
    elements: Vec<Element>,
    by_name: BTreeMap<String, ElementId>,
    write_count: u64,
}

impl Scene {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            elements: Vec::new(),
            by_name: BTreeMap::new(),
            write_count: 0,
        }
    }

    pub fn register(&mut self, name: impl Into<String>, kind: ElementKind) -> HeroResult<ElementId> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(HeroError::scene("element name must be non-empty"));
        }
        if self.by_name.contains_key(&name) {
            return Err(HeroError::scene(format!("duplicate element name '{name}'")));
        }
        let id = ElementId(u32::try_from(self.elements.len()).map_err(|_| {
            HeroError::scene("too many scene elements")
        })?);
        self.elements.push(Element {
            name: name.clone(),
            kind,
            attached: true,
            style: Style::default(),
        });
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Look up an attached element by name.
    pub fn lookup(&self, name: &str) -> Option<ElementId> {
        let id = *self.by_name.get(name)?;
        self.is_present(id).then_some(id)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0 as usize)
    }

    pub fn name_of(&self, id: ElementId) -> Option<&str> {
        self.element(id).map(|e| e.name.as_str())
    }

    pub fn is_present(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(|e| e.attached)
    }

    pub fn detach(&mut self, id: ElementId) {
        if let Some(e) = self.elements.get_mut(id.0 as usize) {
            e.attached = false;
        }
    }

    pub fn attach(&mut self, id: ElementId) {
        if let Some(e) = self.elements.get_mut(id.0 as usize) {
            e.attached = true;
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn style(&self, id: ElementId) -> Option<&Style> {
        self.element(id).map(|e| &e.style)
    }

    /// Current value of a property, or `None` when the element is absent.
    pub fn get(&self, id: ElementId, prop: Prop) -> Option<Value> {
        self.element(id)
            .filter(|e| e.attached)
            .map(|e| e.style.get(prop))
    }

    pub fn scalar(&self, id: ElementId, prop: Prop) -> Option<f64> {
        self.get(id, prop).and_then(|v| v.as_scalar())
    }

    /// Presence-guarded write. Lengths are resolved against the current
    /// viewport. Returns whether anything changed.
    pub fn write(&mut self, id: ElementId, prop: Prop, value: &Value) -> bool {
        let viewport = self.viewport;
        let Some(e) = self.elements.get_mut(id.0 as usize) else {
            return false;
        };
        if !e.attached {
            tracing::trace!(element = %e.name, ?prop, "skip write to detached element");
            return false;
        }
        let changed = e.style.set(prop, value.resolve(viewport));
        if changed {
            self.write_count += 1;
        }
        changed
    }

    /// Number of writes that actually changed a value.
    pub fn write_count(&self) -> u64 {
        self.write_count
    }

    /// Drop every written value, returning elements to their defaults.
    pub fn revert(&mut self) {
        for e in &mut self.elements {
            e.style.clear();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, e)| (ElementId(i as u32), e))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        let elements = self
            .elements
            .iter()
            .map(|e| ElementSnapshot {
                name: e.name.clone(),
                kind: e.kind,
                present: e.attached,
                style: e.style.clone(),
            })
            .collect();
        SceneSnapshot {
            viewport: self.viewport,
            elements,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementSnapshot {
    pub name: String,
    pub kind: ElementKind,
    pub present: bool,
    pub style: Style,
}

/// Serializable copy of every element style.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneSnapshot {
    pub viewport: Viewport,
    pub elements: Vec<ElementSnapshot>,
}

impl SceneSnapshot {
    pub fn element(&self, name: &str) -> Option<&ElementSnapshot> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Stable 64-bit digest of the snapshot contents.
    pub fn fingerprint(&self) -> HeroResult<u64> {
        let bytes = serde_json::to_vec(self)?;
        Ok(xxhash_rust::xxh3::xxh3_64(&bytes))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/registry.rs"]
mod tests;
