//! Minimal markup tokenizer standing in for the external collaborator in
//! tests. It handles the well-formed fragments the test suite feeds it and
//! nothing more. Whitespace-only text is skipped, matching how the original
//! harness configured its tokenizer.

use crate::error::{DomError, Result};
use crate::token::{Token, Tokenize};

pub(crate) struct TestTokenizer;

impl Tokenize for TestTokenizer {
    fn tokenize(&self, markup: &str) -> Result<Vec<Token>> {
        let mut lexer = Lexer {
            input: markup,
            pos: 0,
        };
        lexer.parse_nodes(None)
    }
}

struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl Lexer<'_> {
    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    fn bump(&mut self, n: usize) {
        self.pos += n;
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Consumes up to and including `pat`, returning the text before it.
    fn take_until(&mut self, pat: &str) -> Result<&str> {
        match self.rest().find(pat) {
            Some(index) => {
                let start = self.pos;
                self.pos += index + pat.len();
                Ok(&self.input[start..start + index])
            }
            None => Err(DomError::Tokenizer(format!(
                "missing `{pat}` after byte {}",
                self.pos
            ))),
        }
    }

    /// Parses sibling nodes until end of input, or until the closing tag of
    /// `enclosing` (which is consumed and verified).
    fn parse_nodes(&mut self, enclosing: Option<&str>) -> Result<Vec<Token>> {
        let mut out = Vec::new();
        loop {
            if self.rest().is_empty() {
                return match enclosing {
                    Some(name) => Err(DomError::Tokenizer(format!("missing </{name}>"))),
                    None => Ok(out),
                };
            }
            if self.starts_with("</") {
                self.bump(2);
                let name = self.take_until(">")?.trim().to_string();
                return match enclosing {
                    Some(open) if open == name => Ok(out),
                    _ => Err(DomError::Tokenizer(format!("stray closing tag </{name}>"))),
                };
            }
            if self.starts_with("<!--") {
                self.bump(4);
                let data = self.take_until("-->")?.to_string();
                out.push(Token::comment(data));
                continue;
            }
            if self.starts_with("<!") || self.starts_with("<?") {
                self.bump(1);
                let data = self.take_until(">")?.to_string();
                let name = data.split_whitespace().next().unwrap_or("").to_string();
                out.push(Token::directive(name, data));
                continue;
            }
            if self.starts_with("<") {
                out.push(self.parse_element()?);
                continue;
            }
            let end = self.rest().find('<').unwrap_or(self.rest().len());
            let text = &self.input[self.pos..self.pos + end];
            self.pos += end;
            if !text.trim().is_empty() {
                out.push(Token::text(text));
            }
        }
    }

    fn parse_element(&mut self) -> Result<Token> {
        self.bump(1);
        let name = self.take_name()?;
        let mut token = match name.as_str() {
            "script" => Token::script(),
            "style" => Token::style(),
            _ => Token::tag(name.clone()),
        };
        loop {
            self.skip_whitespace();
            if self.starts_with("/>") {
                self.bump(2);
                return Ok(token);
            }
            if self.starts_with(">") {
                self.bump(1);
                token.children = self.parse_nodes(Some(&name))?;
                return Ok(token);
            }
            let attribute = self.parse_attribute()?;
            token.attributes.push(attribute);
        }
    }

    fn take_name(&mut self) -> Result<String> {
        let rest = self.rest();
        let end = rest
            .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(DomError::Tokenizer(format!(
                "expected a tag name at byte {}",
                self.pos
            )));
        }
        let name = rest[..end].to_string();
        self.pos += end;
        Ok(name)
    }

    fn parse_attribute(&mut self) -> Result<(String, String)> {
        let rest = self.rest();
        let end = rest
            .find(|c: char| c.is_whitespace() || c == '=' || c == '>' || c == '/')
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(DomError::Tokenizer(format!(
                "expected an attribute at byte {}",
                self.pos
            )));
        }
        let name = rest[..end].to_string();
        self.pos += end;
        self.skip_whitespace();
        if !self.starts_with("=") {
            return Ok((name, String::new()));
        }
        self.bump(1);
        self.skip_whitespace();
        match self.rest().chars().next() {
            Some(quote @ ('"' | '\'')) => {
                self.bump(1);
                let value = self.take_until(&quote.to_string())?.to_string();
                Ok((name, value))
            }
            _ => {
                let rest = self.rest();
                let end = rest
                    .find(|c: char| c.is_whitespace() || c == '>')
                    .unwrap_or(rest.len());
                let value = rest[..end].to_string();
                self.pos += end;
                Ok((name, value))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn test_tokenizes_nested_markup() {
        let tokens = TestTokenizer
            .tokenize("<div id=\"outer\"><span class='x'>hi</span><!--n--></div>")
            .unwrap();

        assert_eq!(tokens.len(), 1);
        let div = &tokens[0];
        assert_eq!(div.kind, TokenKind::Tag);
        assert_eq!(div.attributes, vec![("id".to_string(), "outer".to_string())]);
        assert_eq!(div.children.len(), 2);
        assert_eq!(div.children[0].attributes[0].1, "x");
        assert_eq!(div.children[0].children[0].data, "hi");
        assert_eq!(div.children[1].kind, TokenKind::Comment);
    }

    #[test]
    fn test_tokenizes_doctype_and_pi() {
        let tokens = TestTokenizer
            .tokenize("<?xml version=\"1.0\"?><!DOCTYPE html><html></html>")
            .unwrap();

        assert_eq!(tokens[0].kind, TokenKind::Directive);
        assert_eq!(tokens[0].name, "?xml");
        assert_eq!(tokens[1].name, "!DOCTYPE");
        assert_eq!(tokens[1].data, "!DOCTYPE html");
        assert_eq!(tokens[2].kind, TokenKind::Tag);
    }

    #[test]
    fn test_script_kind_and_self_closing() {
        let tokens = TestTokenizer
            .tokenize("<div><script>var a;</script><br/></div>")
            .unwrap();

        let div = &tokens[0];
        assert_eq!(div.children[0].kind, TokenKind::Script);
        assert_eq!(div.children[1].name, "br");
        assert!(div.children[1].children.is_empty());
    }

    #[test]
    fn test_whitespace_only_text_is_skipped() {
        let tokens = TestTokenizer
            .tokenize("<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>")
            .unwrap();

        let ul = &tokens[0];
        assert_eq!(ul.children.len(), 2);
        assert!(ul.children.iter().all(|t| t.kind == TokenKind::Tag));
    }

    #[test]
    fn test_unterminated_element_is_an_error() {
        let err = TestTokenizer.tokenize("<div><span></div>").unwrap_err();
        assert!(matches!(err, DomError::Tokenizer(_)));
    }
}
