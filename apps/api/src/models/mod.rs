pub mod prediction;
pub mod upload;
