pub mod batch_scheduler;
pub mod detection_merger;
