//! UI for the train map application.
//!
//! The map fills the central panel; a small overlay in its top-left corner
//! shows the camera state and the position under the pointer.

mod colors;
mod overlay;

pub use colors::overlay as overlay_colors;
pub use overlay::draw_overlay_info;
