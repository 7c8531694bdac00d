mod hsv;
mod utils;

pub use hsv::hsv_to_rgb;
use smart_leds::RGB8;
pub use utils::{BLACK, blend_colors, rgb_from_u32};

pub type Rgb = RGB8;
