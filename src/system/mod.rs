pub mod memory;
pub mod platform;
pub mod sample;
pub mod sampler;
pub mod utilization;
