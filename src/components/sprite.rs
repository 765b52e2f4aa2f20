//! Visual component for map entities.
//!
//! A [`Sprite`] owns its playing [`Animation`]. Its size is always the size
//! of the animation's current frame, so bounds used for collision follow the
//! image being shown.

use bevy_ecs::prelude::Component;

use crate::components::animation::Animation;
use crate::components::mapposition::MapPosition;

#[derive(Component, Clone, Debug, Default)]
pub struct Sprite {
    pub animation: Animation,
}

impl Sprite {
    pub fn new(animation: Animation) -> Self {
        Self { animation }
    }

    pub fn width(&self) -> u32 {
        self.animation.width()
    }

    pub fn height(&self) -> u32 {
        self.animation.height()
    }

    /// Pixel-rounded bounds of this sprite placed at `position`.
    pub fn bounds_at(&self, position: &MapPosition) -> Bounds {
        Bounds {
            x: position.x.round() as i32,
            y: position.y.round() as i32,
            width: self.width() as i32,
            height: self.height() as i32,
        }
    }
}

/// Integer axis-aligned bounding box in map pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    /// Strict overlap test; touching edges do not count.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(x: i32, y: i32, width: i32, height: i32) -> Bounds {
        Bounds {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn test_overlapping_boxes() {
        assert!(bounds(0, 0, 10, 10).overlaps(&bounds(5, 5, 10, 10)));
        assert!(bounds(5, 5, 10, 10).overlaps(&bounds(0, 0, 10, 10)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        assert!(!bounds(0, 0, 10, 10).overlaps(&bounds(10, 0, 10, 10)));
        assert!(!bounds(0, 0, 10, 10).overlaps(&bounds(0, 10, 10, 10)));
    }

    #[test]
    fn test_containment_overlaps() {
        assert!(bounds(0, 0, 100, 100).overlaps(&bounds(40, 40, 2, 2)));
    }

    #[test]
    fn test_bounds_round_position() {
        use crate::resources::images::ImageHandle;
        let sprite = Sprite::new(Animation::from_frames([(ImageHandle::new(0, 16, 24), 100)]));
        let b = sprite.bounds_at(&MapPosition::new(10.6, 3.4));
        assert_eq!(b, bounds(11, 3, 16, 24));
    }
}
