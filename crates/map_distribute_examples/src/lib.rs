#![forbid(unsafe_code)]

mod masks;
mod rendering;

pub use masks::{island_mask, load_png_mask};
pub use rendering::{init_tracing, print_summary, render_result_to_png, RenderConfig};
