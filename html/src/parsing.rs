use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_till1, take_until, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{map, opt, recognize, verify},
    multi::many0,
    sequence::{delimited, preceded, separated_pair, tuple},
    IResult,
};
use tracing::trace;

use super::entities::decode;
use super::DOMAttributes;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// `<!DOCTYPE ...>`, `<?...>` and other declarations
    Declaration(&'a str),
    Comment(&'a str),
    Open {
        name: String,
        attributes: DOMAttributes,
        self_closing: bool,
    },
    Close(String),
    Text(&'a str),
    /// Contents of a `script` or `style` element, kept verbatim
    RawText(&'a str),
}

/// Elements whose contents are not markup. `script` and `style` are kept verbatim,
/// `title` and `textarea` still have character references decoded.
static RAW_TEXT: &[&str] = &["script", "style"];
static ESCAPABLE_RAW_TEXT: &[&str] = &["title", "textarea"];

/// Split a document into a flat list of tokens. Never fails: anything that does not
/// form a tag is kept as text.
pub(crate) fn tokenize(mut input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    while !input.is_empty() {
        let (rest, token) = match parse_token(input) {
            Ok(res) => res,
            Err(_) => {
                // Unreachable in practice, `parse_stray` accepts any lone '<'
                tokens.push(Token::Text(input));
                break;
            }
        };
        input = rest;
        if let Token::Open {
            name,
            self_closing: false,
            ..
        } = &token
        {
            let raw = RAW_TEXT.contains(&name.as_str());
            if raw || ESCAPABLE_RAW_TEXT.contains(&name.as_str()) {
                let (rest, text) = raw_text(input, name);
                input = rest;
                tokens.push(token);
                if !text.is_empty() {
                    tokens.push(if raw { Token::RawText(text) } else { Token::Text(text) });
                }
                continue;
            }
        }
        tokens.push(token);
    }
    trace!(count = tokens.len(), "Tokenized markup");
    tokens
}

fn parse_token(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        parse_comment,
        parse_declaration,
        parse_close_tag,
        parse_open_tag,
        parse_text,
        parse_stray,
    ))(input)
}

/// Take everything up to the matching `</name`, compared case-insensitively
fn raw_text<'a>(input: &'a str, name: &str) -> (&'a str, &'a str) {
    let needle = format!("</{}", name);
    // ASCII lowercasing keeps byte offsets stable
    match input.to_ascii_lowercase().find(&needle) {
        Some(end) => (&input[end..], &input[..end]),
        None => ("", input),
    }
}

/// Attempt to parse a string as a valid tag name
fn parse_tag_name(input: &str) -> IResult<&str, &str> {
    verify(
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-'),
        |s: &str| s.starts_with(|c: char| c.is_ascii_alphabetic()),
    )(input)
}

fn parse_comment(input: &str) -> IResult<&str, Token<'_>> {
    map(delimited(tag("<!--"), take_until("-->"), tag("-->")), Token::Comment)(input)
}

fn parse_declaration(input: &str) -> IResult<&str, Token<'_>> {
    map(
        alt((
            delimited(tag("<!"), is_not(">"), char('>')),
            delimited(tag("<?"), is_not(">"), char('>')),
        )),
        Token::Declaration,
    )(input)
}

/// Parse a tag in the form `</name>`, returning `name`
fn parse_close_tag(input: &str) -> IResult<&str, Token<'_>> {
    let (remaining, (_, name, _, _)) =
        tuple((tag("</"), parse_tag_name, multispace0, char('>')))(input)?;
    Ok((remaining, Token::Close(name.to_ascii_lowercase())))
}

/// Parse a tag in the form `<name attr=value ...>` or `<name ... />`
fn parse_open_tag(input: &str) -> IResult<&str, Token<'_>> {
    let (remaining, (_, name, attrs, _, slash, _)) = tuple((
        char('<'),
        parse_tag_name,
        many0(preceded(multispace1, single_attr_parser)),
        multispace0,
        opt(char('/')),
        char('>'),
    ))(input)?;
    let mut attributes = DOMAttributes::empty();
    for (k, v) in attrs {
        // The first occurrence of a repeated attribute wins
        attributes
            .0
            .entry(k.to_ascii_lowercase())
            .or_insert_with(|| decode(v).into_owned());
    }
    Ok((
        remaining,
        Token::Open {
            name: name.to_ascii_lowercase(),
            attributes,
            self_closing: slash.is_some(),
        },
    ))
}

fn parse_text(input: &str) -> IResult<&str, Token<'_>> {
    map(take_till1(|c| c == '<'), Token::Text)(input)
}

/// A '<' which does not start any tag is plain text
fn parse_stray(input: &str) -> IResult<&str, Token<'_>> {
    map(recognize(char('<')), Token::Text)(input)
}

// Attribute parsing below

fn parse_single_quoted(input: &str) -> IResult<&str, &str> {
    map(delimited(char('\''), opt(is_not("'")), char('\'')), |v| v.unwrap_or(""))(input)
}

fn parse_double_quoted(input: &str) -> IResult<&str, &str> {
    map(delimited(char('"'), opt(is_not("\"")), char('"')), |v| v.unwrap_or(""))(input)
}

fn parse_unquoted(input: &str) -> IResult<&str, &str> {
    is_not(" \t\r\n\"'=<>`")(input)
}

fn value_parser(input: &str) -> IResult<&str, &str> {
    alt((parse_single_quoted, parse_double_quoted, parse_unquoted))(input)
}

fn name_parser(input: &str) -> IResult<&str, &str> {
    is_not(" \t\r\n\"'>/=")(input)
}

fn single_attr_parser(input: &str) -> IResult<&str, (&str, &str)> {
    let mut key_value = separated_pair(
        name_parser,
        tuple((multispace0, char('='), multispace0)),
        value_parser,
    );
    if let Ok((r, (k, v))) = key_value(input) {
        Ok((r, (k, v)))
    } else {
        let (r, res) = name_parser(input)?;
        Ok((r, (res, "")))
    }
}

#[cfg(test)]
fn open(name: &str, attributes: DOMAttributes, self_closing: bool) -> Token<'static> {
    Token::Open {
        name: name.to_string(),
        attributes,
        self_closing,
    }
}

#[cfg(test)]
#[test]
fn test_tag_parse() {
    let data = r#"<div>"#;
    assert_eq!(
        parse_open_tag(data).unwrap(),
        ("", open("div", DOMAttributes::empty(), false))
    );

    let data = r#"<DIV class=nothing>"#;
    assert_eq!(
        parse_open_tag(data).unwrap(),
        ("", open("div", attributes!("class" => "nothing"), false))
    );

    let data = r#"<div attr1 attr2=two attr3='three' attr4="number four" ATTR5 = "">"#;
    let target = attributes!(
        "attr1" => "",
        "attr2" => "two",
        "attr3" => "three",
        "attr4" => "number four",
        "attr5" => "",
    );
    assert_eq!(parse_open_tag(data).unwrap(), ("", open("div", target, false)));

    let data = r#"<img src="me.jpg" alt="Me &amp; you" />rest"#;
    let target = attributes!("src" => "me.jpg", "alt" => "Me & you");
    assert_eq!(parse_open_tag(data).unwrap(), ("rest", open("img", target, true)));
}

#[cfg(test)]
#[test]
fn test_tag_parse_keeps_gt_in_quotes() {
    let data = r#"<a title="a > b" href=/x>"#;
    let target = attributes!("title" => "a > b", "href" => "/x");
    assert_eq!(parse_open_tag(data).unwrap(), ("", open("a", target, false)));
}

#[cfg(test)]
#[test]
fn test_close_parse() {
    assert_eq!(
        parse_close_tag("</UL >").unwrap(),
        ("", Token::Close("ul".to_string()))
    );
    assert!(parse_close_tag("</>").is_err());
    assert!(parse_close_tag("</1a>").is_err());
}

#[cfg(test)]
#[test]
fn test_tokenize() {
    let data = "<!DOCTYPE html><!-- note --><p>a < b</p>";
    assert_eq!(
        tokenize(data),
        vec![
            Token::Declaration("DOCTYPE html"),
            Token::Comment(" note "),
            open("p", DOMAttributes::empty(), false),
            Token::Text("a "),
            Token::Text("<"),
            Token::Text(" b"),
            Token::Close("p".to_string()),
        ]
    );
}

#[cfg(test)]
#[test]
fn test_tokenize_raw_text() {
    let data = "<script>if (a < b && c > d) { x('</div>') }</SCRIPT><title>A &amp; B</title>";
    assert_eq!(
        tokenize(data),
        vec![
            open("script", DOMAttributes::empty(), false),
            Token::RawText("if (a < b && c > d) { x('</div>') }"),
            Token::Close("script".to_string()),
            open("title", DOMAttributes::empty(), false),
            Token::Text("A &amp; B"),
            Token::Close("title".to_string()),
        ]
    );
}
