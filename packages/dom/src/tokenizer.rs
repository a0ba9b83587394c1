use logos::{Lexer, Logos};
use std::fmt;

/// Markup-level tokens of an HTML document.
///
/// Open tags are lexed whole (attributes included) and split afterwards
/// with [`AttrToken`].
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token<'src> {
    /// `<!DOCTYPE html>`, carrying the body between `<!` and `>`
    #[regex(r"<![a-zA-Z][^>]*>", |lex| { let s = lex.slice(); &s[2..s.len() - 1] })]
    Doctype(&'src str),

    /// `<!-- ... -->`, carrying the comment body
    #[token("<!--", lex_comment)]
    Comment(&'src str),

    /// `<tag attr="value">` or `<tag/>`, carrying the full tag source
    #[regex(r#"<[a-zA-Z]([^>"']|"[^"]*"|'[^']*')*>"#, |lex| lex.slice())]
    OpenTag(&'src str),

    /// `</tag>`, carrying the tag name
    #[regex(r"</[a-zA-Z][a-zA-Z0-9:-]*[ \t\r\n]*>", |lex| {
        let s = lex.slice();
        s[2..s.len() - 1].trim_end()
    })]
    CloseTag(&'src str),

    #[regex(r"[^<]+", |lex| lex.slice())]
    Text(&'src str),

    /// A `<` that doesn't start any markup, e.g. `a < b`
    #[token("<")]
    LessThan,
}

fn lex_comment<'src>(lex: &mut Lexer<'src, Token<'src>>) -> &'src str {
    let rest = lex.remainder();
    match rest.find("-->") {
        Some(end) => {
            lex.bump(end + 3);
            &rest[..end]
        }
        None => {
            // Unterminated comment swallows the rest of the input
            lex.bump(rest.len());
            rest
        }
    }
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Doctype(s) => write!(f, "doctype '{}'", s),
            Token::Comment(_) => write!(f, "comment"),
            Token::OpenTag(s) => write!(f, "open tag {}", s),
            Token::CloseTag(s) => write!(f, "close tag </{}>", s),
            Token::Text(_) => write!(f, "text"),
            Token::LessThan => write!(f, "<"),
        }
    }
}

/// Tokens inside an open tag, after the tag name
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum AttrToken<'src> {
    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#, |lex| { let s = lex.slice(); &s[1..s.len() - 1] })]
    DoubleQuoted(&'src str),

    #[regex(r#"'[^']*'"#, |lex| { let s = lex.slice(); &s[1..s.len() - 1] })]
    SingleQuoted(&'src str),

    #[regex(r#"[^ \t\r\n"'=<>`]+"#, |lex| lex.slice())]
    Word(&'src str),
}

/// Tokenize a source string
pub fn tokenize(source: &str) -> Vec<(Token, std::ops::Range<usize>)> {
    let lexer = Token::lexer(source);
    lexer
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, span)))
        .collect()
}
