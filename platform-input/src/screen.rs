//! Screen service contract.
//!
//! The screen service owns the mirroring window: frame geometry, coordinate
//! conversions, pause/fullscreen state, orientation and the FPS counter.
//! The input core only calls through this trait; rendering lives elsewhere.

use mirror_common::{Orientation, Point, Rect, Size};

/// The screen/window collaborator.
pub trait Screen {
    /// Size of the video frame received from the device, in device pixels.
    fn frame_size(&self) -> Size;

    /// Whether display updates are currently paused.
    fn is_paused(&self) -> bool;

    /// Whether a video stream is being displayed (false in control-only
    /// sessions).
    fn has_video(&self) -> bool;

    /// Pause or resume display updates.
    fn set_paused(&mut self, paused: bool);

    /// Toggle fullscreen.
    fn switch_fullscreen(&mut self);

    /// Resize the window to fit the device aspect ratio.
    fn resize_to_fit(&mut self);

    /// Resize the window to 1:1 device pixels.
    fn resize_to_pixel_perfect(&mut self);

    /// Compose `transform` onto the current display orientation.
    /// Orientation composition is the screen's business.
    fn apply_orientation_transform(&mut self, transform: Orientation);

    /// Whether the FPS counter is running. Single-writer from the input
    /// thread; reads elsewhere tolerate brief inconsistency.
    fn fps_counter_started(&self) -> bool;

    fn start_fps_counter(&mut self);

    fn stop_fps_counter(&mut self);

    /// Convert window coordinates to device-frame coordinates.
    fn window_to_frame_coords(&self, x: i32, y: i32) -> Point;

    /// Convert drawable (backing-store) coordinates to device-frame
    /// coordinates.
    fn drawable_to_frame_coords(&self, x: i32, y: i32) -> Point;

    /// Drawable size in backing-store pixels (differs from the window size
    /// on hidpi displays).
    fn drawable_size(&self) -> Size;

    /// Scale window coordinates into drawable coordinates.
    fn hidpi_scale_coords(&self, x: i32, y: i32) -> (i32, i32);

    /// Rectangle of the rendered frame within the drawable; clicks outside
    /// it land on the black borders.
    fn content_rect(&self) -> Rect;
}
