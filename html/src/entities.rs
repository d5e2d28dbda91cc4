use nom::{
    branch::alt,
    character::complete::{alphanumeric1, char, digit1, hex_digit1, one_of},
    combinator::{map_opt, map_res},
    sequence::{delimited, preceded},
    IResult,
};
use std::borrow::Cow;

/// Named references that show up in hand-written pages. Anything else is left as-is.
static NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
    ("copy", '\u{a9}'),
    ("reg", '\u{ae}'),
    ("trade", '\u{2122}'),
    ("middot", '\u{b7}'),
    ("bull", '\u{2022}'),
    ("hellip", '\u{2026}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201c}'),
    ("rdquo", '\u{201d}'),
];

fn parse_numeric(input: &str) -> IResult<&str, char> {
    let hex = preceded(one_of("xX"), map_res(hex_digit1, |h: &str| u32::from_str_radix(h, 16)));
    let dec = map_res(digit1, |d: &str| d.parse::<u32>());
    map_opt(preceded(char('#'), alt((hex, dec))), char::from_u32)(input)
}

fn parse_named(input: &str) -> IResult<&str, char> {
    map_opt(alphanumeric1, |name: &str| {
        NAMED.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
    })(input)
}

fn character_reference(input: &str) -> IResult<&str, char> {
    delimited(char('&'), alt((parse_numeric, parse_named)), char(';'))(input)
}

/// Replace character references in text or an attribute value
pub(crate) fn decode(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match character_reference(rest) {
            Ok((remaining, c)) => {
                out.push(c);
                rest = remaining;
            }
            Err(_) => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

#[cfg(test)]
#[test]
fn test_decode() {
    assert_eq!(decode("plain"), "plain");
    assert_eq!(decode("Tom &amp; Jerry"), "Tom & Jerry");
    assert_eq!(decode("&#65;&#x42;&#X43;"), "ABC");
    assert_eq!(decode("&lt;b&gt; &quot;q&quot;"), "<b> \"q\"");
    assert_eq!(decode("R&D &unknown; &amp"), "R&D &unknown; &amp");
    assert_eq!(decode("a&nbsp;b"), "a\u{a0}b");
}
