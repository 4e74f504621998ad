//! HTML markup to live nodes.
//!
//! [`parse_fragment`] turns a markup string into a `DocumentFragment` of the
//! `dom` crate, the way a browser's `DOMParser` followed by taking the body's
//! children would. The tokenizer is exposed for callers that only need tokens.

mod entities;
mod fragment;
mod tokenizer;

pub use fragment::{ParseConfig, parse_fragment, parse_fragment_with};
pub use tokenizer::{Token, tokenize};
