/*!
# ChromoView Rendering

Places chromosome glyphs in world space and projects them through the live
camera so the core coordinate mapper can measure them on screen.

## Layers

1. **Layout**: one glyph per chromosome, left to right, top aligned
2. **Screen measurement**: world rect -> screen rect through the [`Camera`]
3. **Export**: deterministic SVG of the laid-out scene

[`Camera`]: chromoview_core::Camera
*/

pub mod layout;
pub mod svg_export;

pub use layout::*;
pub use svg_export::*;

use serde::{Deserialize, Serialize};

/// Colours and type shared by every painted layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    pub background_color: String,
    pub arm_color: String,
    pub centromere_color: String,
    pub outline_color: String,
    pub label_color: String,
    pub selection_color: String,
    pub font_family: String,
    pub font_size: u32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            arm_color: "#8fb3e3".to_string(),
            centromere_color: "#c0392b".to_string(),
            outline_color: "#3d5a80".to_string(),
            label_color: "#202020".to_string(),
            selection_color: "#f2b134".to_string(),
            font_family: "Helvetica, Arial, sans-serif".to_string(),
            font_size: 12,
        }
    }
}
