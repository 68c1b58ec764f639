pub mod tokenizer;

pub use tokenizer::{Token, Tokenizer, WordTokenizer};
