pub mod detection;
pub mod output;
pub mod pipeline;
pub mod sampling;
pub mod shared;
pub mod video;
