// Text normalization: turns a raw review into term counts.

pub mod normalizer;
