//! Case folding.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Lowercases every token that is not stopped.
///
/// Acronyms such as `CF` and `DNA` fold to the same term as their lowercase
/// spelling in abstracts.
#[derive(Clone, Copy, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|token| {
            if token.stopped || !token.text.chars().any(char::is_uppercase) {
                token
            } else {
                let lowered = token.text.to_lowercase();
                token.rewrite(lowered)
            }
        })))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_folds_acronyms() {
        let tokens = vec![
            Token::new("CF", 0),
            Token::new("Patients", 1),
            Token::new("sputum", 2),
            Token::new("The", 3).stop(),
        ];

        let result: Vec<Token> = LowercaseFilter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        let texts: Vec<&str> = result.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["cf", "patients", "sputum", "The"]);
        assert_eq!(result[1].position, 1);
    }
}
