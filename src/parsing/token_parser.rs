/// Opening delimiter of a text substitution token.
pub const OPEN_TOKEN: &str = "${";
/// Closing delimiter of a text substitution token.
pub const CLOSE_TOKEN: &str = "}";
/// Placed right before a delimiter, makes it literal.
pub const ESCAPE: u8 = b'\\';

/// Splits template text into literal spans and delimited tokens.
///
/// Literal text is copied as is, every token (including its delimiters) is
/// replaced by whatever the handler returns for the token content:
///
/// ```
/// let parser = TokenParser::dollar();
/// let sql = parser.parse("id = ${id}", |_| Ok::<_, ()>(Some("1".to_string())));
/// assert_eq!(sql.unwrap(), "id = 1");
/// ```
///
/// An open token preceded by `\` is kept literally (without the backslash),
/// unless that `\` already belongs to the previous token.
/// Inside a token, `\` before the close token keeps the close token as part of
/// the content. An open token that is never closed is copied as literal text.
#[derive(Debug, Clone, Copy)]
pub struct TokenParser<'a> {
    open_token: &'a str,
    close_token: &'a str,
}

impl<'a> TokenParser<'a> {
    /// Returns `None` when either delimiter is empty.
    pub fn new(open_token: &'a str, close_token: &'a str) -> Option<TokenParser<'a>> {
        if open_token.is_empty() || close_token.is_empty() {
            return None;
        }
        Some(TokenParser {
            open_token,
            close_token,
        })
    }

    pub fn dollar() -> TokenParser<'static> {
        TokenParser {
            open_token: OPEN_TOKEN,
            close_token: CLOSE_TOKEN,
        }
    }

    /// Scans `text`, calling `handler` for each token content. A handler
    /// returning `None` substitutes an empty string. The first handler error
    /// stops the scan.
    pub fn parse<F, E>(&self, text: &str, mut handler: F) -> Result<String, E>
    where
        F: FnMut(&str) -> Result<Option<String>, E>,
    {
        if text.is_empty() {
            return Ok(String::new());
        }
        let Some(mut start) = text.find(self.open_token) else {
            return Ok(text.to_string());
        };

        let bytes = text.as_bytes();
        let mut result = String::with_capacity(text.len());
        let mut offset = 0;

        loop {
            if start > offset && bytes[start - 1] == ESCAPE {
                result.push_str(&text[offset..start - 1]);
                result.push_str(self.open_token);
                offset = start + self.open_token.len();
            } else {
                result.push_str(&text[offset..start]);
                offset = start + self.open_token.len();

                match self.scan_content(text, offset) {
                    Some((content, end)) => {
                        if let Some(replacement) = handler(&content)? {
                            result.push_str(&replacement);
                        }
                        offset = end + self.close_token.len();
                    }
                    None => {
                        result.push_str(&text[start..]);
                        offset = text.len();
                    }
                }
            }

            match text[offset..].find(self.open_token) {
                Some(next) => start = offset + next,
                None => break,
            }
        }

        if offset < text.len() {
            result.push_str(&text[offset..]);
        }
        Ok(result)
    }

    // Collects token content starting at `offset`, unescaping close tokens.
    // Returns the content and the position of the terminating close token.
    fn scan_content(&self, text: &str, mut offset: usize) -> Option<(String, usize)> {
        let bytes = text.as_bytes();
        let mut content = String::new();

        while let Some(found) = text[offset..].find(self.close_token) {
            let end = offset + found;
            if end > offset && bytes[end - 1] == ESCAPE {
                content.push_str(&text[offset..end - 1]);
                content.push_str(self.close_token);
                offset = end + self.close_token.len();
            } else {
                content.push_str(&text[offset..end]);
                return Some((content, end));
            }
        }
        None
    }
}
