//! Time-driven animation timeline.
//!
//! An [`Animation`] is an ordered list of frames, each an image plus the
//! cumulative time (in milliseconds) at which the frame ends, and a play
//! cursor. The frame list is shared behind an [`Arc`]: cloning an animation
//! gives a new, independent cursor over the same frames, which is how every
//! spawned entity gets its own playback position without copying images.
//!
//! # Timeline rules
//!
//! - [`Animation::add_frame`] appends a frame ending at the running total.
//! - [`Animation::update`] accumulates elapsed time, wraps it modulo the total
//!   duration (resetting to the first frame), then walks forward to the frame
//!   whose end time covers it. Large deltas, even several loops long, collapse
//!   into one modulo and one forward scan.
//! - Animations with zero or one frame never advance.

use std::sync::Arc;

use crate::resources::images::ImageHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AnimFrame {
    image: ImageHandle,
    end_time: u64,
}

/// A looping sequence of images with per-frame durations.
#[derive(Debug)]
pub struct Animation {
    frames: Arc<Vec<AnimFrame>>,
    total_duration: u64,
    frame_index: usize,
    elapsed: u64,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Animation {
    /// Shares the frame list; the copy starts from the beginning.
    fn clone(&self) -> Self {
        Self {
            frames: Arc::clone(&self.frames),
            total_duration: self.total_duration,
            frame_index: 0,
            elapsed: 0,
        }
    }
}

impl Animation {
    /// Create an empty animation.
    pub fn new() -> Self {
        Self {
            frames: Arc::new(Vec::new()),
            total_duration: 0,
            frame_index: 0,
            elapsed: 0,
        }
    }

    /// Build an animation from `(image, duration_ms)` pairs.
    pub fn from_frames(frames: impl IntoIterator<Item = (ImageHandle, u64)>) -> Self {
        let mut animation = Self::new();
        for (image, duration) in frames {
            animation.add_frame(image, duration);
        }
        animation
    }

    /// Append a frame displayed for `duration_ms`.
    ///
    /// Multi-frame animations need positive durations, otherwise the timeline
    /// never advances past the zero-length frames' neighbours. If the frame
    /// list is already shared with clones, this animation gets its own copy.
    pub fn add_frame(&mut self, image: ImageHandle, duration_ms: u64) {
        debug_assert!(duration_ms > 0, "animation frames need a positive duration");
        self.total_duration += duration_ms;
        Arc::make_mut(&mut self.frames).push(AnimFrame {
            image,
            end_time: self.total_duration,
        });
    }

    /// Restart playback from the first frame.
    pub fn start(&mut self) {
        self.elapsed = 0;
        self.frame_index = 0;
    }

    /// Advance playback by `elapsed_ms`.
    pub fn update(&mut self, elapsed_ms: u64) {
        if self.frames.len() <= 1 || self.total_duration == 0 {
            return;
        }
        self.elapsed += elapsed_ms;

        if self.elapsed >= self.total_duration {
            self.elapsed %= self.total_duration;
            self.frame_index = 0;
        }

        // elapsed < total_duration == last end_time, so this stops in range
        while self.elapsed > self.frames[self.frame_index].end_time {
            self.frame_index += 1;
        }
    }

    /// Image of the frame being shown, or `None` for an empty animation.
    pub fn current_image(&self) -> Option<ImageHandle> {
        self.frames.get(self.frame_index).map(|frame| frame.image)
    }

    /// Width in pixels of the current frame (0 when empty).
    pub fn width(&self) -> u32 {
        self.current_image().map_or(0, |image| image.width())
    }

    /// Height in pixels of the current frame (0 when empty).
    pub fn height(&self) -> u32 {
        self.current_image().map_or(0, |image| image.height())
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Time played into the current loop, in milliseconds.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn total_duration(&self) -> u64 {
        self.total_duration
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// True when both animations play the same frame list.
    pub fn shares_frames_with(&self, other: &Animation) -> bool {
        Arc::ptr_eq(&self.frames, &other.frames)
    }
}
