pub mod feature_extractor;
pub mod frame_differencer;
pub mod sample_points;
