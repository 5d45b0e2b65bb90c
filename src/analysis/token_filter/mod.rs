//! Token filters.
//!
//! Each filter wraps the incoming stream lazily. Filters leave stopped
//! tokens untouched.

use crate::analysis::token::TokenStream;
use crate::error::Result;

pub trait Filter: Send + Sync {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    fn name(&self) -> &'static str;
}

pub mod alphabetic;
pub mod length;
pub mod lowercase;
pub mod stem;
pub mod stop;

pub use alphabetic::AlphabeticFilter;
pub use length::LengthFilter;
pub use lowercase::LowercaseFilter;
pub use stem::{PorterStemmer, StemFilter, Stemmer};
pub use stop::StopFilter;
