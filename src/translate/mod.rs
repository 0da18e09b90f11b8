// Chunked translation
//
// - Chunk: line-aligned splitting of a transcript under a character budget
// - Chunked: sequential per-chunk translation through a completion service

pub mod chunk;
pub mod chunked;

pub use chunk::split_into_chunks;
pub use chunked::{ChunkedTranslator, build_translation_prompt};
