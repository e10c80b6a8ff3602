pub mod batch;
pub mod scoring;
