//! Image handles and the provider that hands them out.
//!
//! The simulation never touches pixels. It only needs a stable identity and
//! the pixel size of every image, because sprite bounds come from the size of
//! the frame being shown. [`ImageProvider`] is the seam where a rendering
//! shell plugs in its own decoder; [`ImageStore`] is the in-memory provider
//! used by the headless runner and the tests, fed with the sizes declared in
//! the catalog.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::error::LoadError;

/// Opaque reference to a loaded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    id: u32,
    width: u32,
    height: u32,
}

impl ImageHandle {
    pub fn new(id: u32, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Pixel transform applied to a source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageTransform {
    /// Flipped horizontally.
    Mirror,
    /// Flipped vertically.
    Flip,
}

/// Where the pixels of a handle come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageOrigin {
    File(String),
    Derived(ImageHandle, ImageTransform),
}

/// Source of image handles.
pub trait ImageProvider {
    /// Look up or load the named image.
    fn load_image(&mut self, name: &str) -> Result<ImageHandle, LoadError>;

    /// Image produced by applying `transform` to `image`.
    fn transformed(&mut self, image: ImageHandle, transform: ImageTransform) -> ImageHandle;

    fn mirror(&mut self, image: ImageHandle) -> ImageHandle {
        self.transformed(image, ImageTransform::Mirror)
    }

    fn flip(&mut self, image: ImageHandle) -> ImageHandle {
        self.transformed(image, ImageTransform::Flip)
    }
}

/// In-memory image registry.
///
/// Images are registered by name with their size; transformed copies get
/// their own handle and are cached, so mirroring the same frame twice yields
/// the same handle.
#[derive(Resource, Debug, Default)]
pub struct ImageStore {
    by_name: FxHashMap<String, ImageHandle>,
    derived: FxHashMap<(ImageHandle, ImageTransform), ImageHandle>,
    origins: Vec<ImageOrigin>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named image of the given size and return its handle.
    pub fn register(&mut self, name: &str, width: u32, height: u32) -> ImageHandle {
        if let Some(handle) = self.by_name.get(name) {
            return *handle;
        }
        let handle = self.allocate(width, height, ImageOrigin::File(name.to_string()));
        self.by_name.insert(name.to_string(), handle);
        handle
    }

    pub fn get(&self, name: &str) -> Option<ImageHandle> {
        self.by_name.get(name).copied()
    }

    pub fn origin(&self, image: ImageHandle) -> Option<&ImageOrigin> {
        self.origins.get(image.id() as usize)
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    fn allocate(&mut self, width: u32, height: u32, origin: ImageOrigin) -> ImageHandle {
        let handle = ImageHandle::new(self.origins.len() as u32, width, height);
        self.origins.push(origin);
        handle
    }
}

impl ImageProvider for ImageStore {
    fn load_image(&mut self, name: &str) -> Result<ImageHandle, LoadError> {
        self.get(name)
            .ok_or_else(|| LoadError::UnknownImage(name.to_string()))
    }

    fn transformed(&mut self, image: ImageHandle, transform: ImageTransform) -> ImageHandle {
        if let Some(handle) = self.derived.get(&(image, transform)) {
            return *handle;
        }
        let handle = self.allocate(
            image.width(),
            image.height(),
            ImageOrigin::Derived(image, transform),
        );
        self.derived.insert((image, transform), handle);
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        let mut store = ImageStore::new();
        let a = store.register("player1", 40, 64);
        let b = store.register("player1", 40, 64);
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_image_is_an_error() {
        let mut store = ImageStore::new();
        assert!(matches!(
            store.load_image("ghost"),
            Err(LoadError::UnknownImage(name)) if name == "ghost"
        ));
    }

    #[test]
    fn test_transform_keeps_size_and_caches() {
        let mut store = ImageStore::new();
        let grub = store.register("grub1", 48, 32);
        let mirrored = store.transformed(grub, ImageTransform::Mirror);
        assert_ne!(mirrored, grub);
        assert_eq!((mirrored.width(), mirrored.height()), (48, 32));
        assert_eq!(store.transformed(grub, ImageTransform::Mirror), mirrored);
        assert_eq!(
            store.origin(mirrored),
            Some(&ImageOrigin::Derived(grub, ImageTransform::Mirror))
        );
    }
}
