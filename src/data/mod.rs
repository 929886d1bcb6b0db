pub mod augmentation;
pub mod dataset;
pub mod preprocessing;
pub mod split_index;
pub mod splitter;
