//! In-memory vignette model
//!
//! A vignette is a base image used as its primary illumination layer, plus
//! named groups of objects that each carry their own image. The model is
//! generic over the image handle of the authoring library that opened the
//! images.

use serde::Serialize;

/// Vignette under construction
#[derive(Debug, Clone, Serialize)]
pub struct Vignette<I> {
    illumination: I,
    objects: ObjectTree<I>,
}

impl<I> Vignette<I> {
    /// Create a vignette whose illumination layer starts as `base`
    pub fn new(base: I) -> Self {
        Vignette {
            illumination: base,
            objects: ObjectTree { groups: Vec::new() },
        }
    }

    /// Primary illumination layer
    #[cfg(test)]
    pub fn illumination(&self) -> &I {
        &self.illumination
    }

    pub fn set_illumination(&mut self, image: I) {
        self.illumination = image;
    }

    pub fn objects(&self) -> &ObjectTree<I> {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectTree<I> {
        &mut self.objects
    }
}

/// Top-level object container of a vignette
#[derive(Debug, Clone, Serialize)]
pub struct ObjectTree<I> {
    groups: Vec<Group<I>>,
}

impl<I> ObjectTree<I> {
    /// Append a new empty group and return it for population
    pub fn add_group(&mut self, name: impl Into<String>) -> &mut Group<I> {
        self.groups.push(Group {
            name: name.into(),
            objects: Vec::new(),
        });
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    pub fn groups(&self) -> &[Group<I>] {
        &self.groups
    }
}

/// Named collection of objects
#[derive(Debug, Clone, Serialize)]
pub struct Group<I> {
    name: String,
    objects: Vec<VignetteObject<I>>,
}

impl<I> Group<I> {
    #[cfg(test)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a shaped region that receives `image` but no tiling texture
    pub fn add_nontexturable_object(&mut self, name: impl Into<String>, image: I) -> &mut VignetteObject<I> {
        self.objects.push(VignetteObject {
            name: name.into(),
            kind: ObjectKind::NonTexturable,
            image,
        });
        let last = self.objects.len() - 1;
        &mut self.objects[last]
    }

    #[cfg(test)]
    pub fn objects(&self) -> &[VignetteObject<I>] {
        &self.objects
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    NonTexturable,
}

/// Region of a vignette group
#[derive(Debug, Clone, Serialize)]
pub struct VignetteObject<I> {
    name: String,
    kind: ObjectKind,
    image: I,
}

#[cfg(test)]
impl<I> VignetteObject<I> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn image(&self) -> &I {
        &self.image
    }
}
