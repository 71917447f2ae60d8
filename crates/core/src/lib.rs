pub mod audio;
pub mod parsing;
pub mod pipeline;
pub mod segmentation;
pub mod shared;
