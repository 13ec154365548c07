// reviewlens: Aspect-level sentiment analysis for reviews
//
// This is the library root. Each module corresponds to a stage of the
// analysis pipeline or one of its collaborators.

pub mod config;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod sentiment;
pub mod text;
pub mod topics;
