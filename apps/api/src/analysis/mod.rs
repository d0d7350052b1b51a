// Resume / job-description match engine.
// Text extraction → keyword extraction → matching → suggestions, sequenced by `engine`.
// Everything below `handlers` is synchronous and free of I/O.

pub mod engine;
pub mod handlers;
pub mod keywords;
pub mod lexicon;
pub mod matcher;
pub mod suggestions;
pub mod text_extractor;
