
pub mod color;
pub mod delta_e;
pub mod matcher;
pub mod palettes;
pub mod pipeline;
