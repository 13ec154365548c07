// Topic modeling: single-document LDA and aspect extraction.

pub mod aspects;
pub mod lda;
pub mod traits;
