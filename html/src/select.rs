use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, map, value},
    multi::{many0, many1},
    sequence::{delimited, pair, preceded},
    IResult,
};
use std::str::FromStr;
use thiserror::Error;

use super::DOMElement;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("invalid selector `{0}`")]
    Invalid(String),
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum SimpleSelector {
    Type(String),
    Universal,
    Attribute(String),
    Class(String),
    ID(String),
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Combinator {
    // ( )
    Descendant,
    // (>)
    Child,
}

/// A chain of compound selectors, e.g. `header nav > a.icon`.
/// `combinators[i]` joins `compounds[i]` to `compounds[i + 1]`.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Selector {
    compounds: Vec<Vec<SimpleSelector>>,
    combinators: Vec<Combinator>,
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all_consuming(parse_selector)(s.trim())
            .map(|(_, sel)| sel)
            .map_err(|_| SelectorError::Invalid(s.to_string()))
    }
}

impl Selector {
    /// Check whether `elt`, with the given chain of ancestors (outermost first),
    /// is selected
    pub fn matches(&self, elt: &DOMElement, ancestors: &[&DOMElement]) -> bool {
        match self.compounds.last() {
            Some(subject) if compound_applies(subject, elt) => {
                self.ancestors_match(self.compounds.len() - 1, ancestors)
            }
            _ => false,
        }
    }

    /// `compounds[idx]` has matched the element directly below `ancestors`
    fn ancestors_match(&self, idx: usize, ancestors: &[&DOMElement]) -> bool {
        if idx == 0 {
            return true;
        }
        let compound = &self.compounds[idx - 1];
        match self.combinators[idx - 1] {
            Combinator::Child => match ancestors.split_last() {
                Some((parent, rest)) => {
                    compound_applies(compound, parent) && self.ancestors_match(idx - 1, rest)
                }
                None => false,
            },
            Combinator::Descendant => (0..ancestors.len()).rev().any(|i| {
                compound_applies(compound, ancestors[i])
                    && self.ancestors_match(idx - 1, &ancestors[..i])
            }),
        }
    }
}

fn compound_applies(compound: &[SimpleSelector], elt: &DOMElement) -> bool {
    compound.iter().all(|s| simple_applies(s, elt))
}

fn simple_applies(selector: &SimpleSelector, elt: &DOMElement) -> bool {
    match selector {
        SimpleSelector::Type(name) => &elt.name == name,
        SimpleSelector::Universal => true,
        SimpleSelector::Attribute(name) => elt.has_attribute(name),
        SimpleSelector::Class(name) => elt.has_class(name),
        SimpleSelector::ID(id) => elt.id() == Some(id.as_str()),
    }
}

fn parse_identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

fn parse_simple_selector(input: &str) -> IResult<&str, SimpleSelector> {
    alt((
        value(SimpleSelector::Universal, char('*')),
        map(preceded(char('#'), parse_identifier), |s: &str| {
            SimpleSelector::ID(s.to_string())
        }),
        map(preceded(char('.'), parse_identifier), |s: &str| {
            SimpleSelector::Class(s.to_string())
        }),
        map(
            delimited(char('['), delimited(multispace0, parse_identifier, multispace0), char(']')),
            |s: &str| SimpleSelector::Attribute(s.to_ascii_lowercase()),
        ),
        map(parse_identifier, |s: &str| SimpleSelector::Type(s.to_ascii_lowercase())),
    ))(input)
}

fn parse_combinator(input: &str) -> IResult<&str, Combinator> {
    alt((
        value(Combinator::Child, delimited(multispace0, char('>'), multispace0)),
        value(Combinator::Descendant, multispace1),
    ))(input)
}

fn parse_selector(input: &str) -> IResult<&str, Selector> {
    let (r, first) = many1(parse_simple_selector)(input)?;
    let (r, rest) = many0(pair(parse_combinator, many1(parse_simple_selector)))(r)?;
    let mut compounds = vec![first];
    let mut combinators = Vec::with_capacity(rest.len());
    for (combinator, compound) in rest {
        combinators.push(combinator);
        compounds.push(compound);
    }
    Ok((
        r,
        Selector {
            compounds,
            combinators,
        },
    ))
}

#[cfg(test)]
#[test]
fn test_parse_selector() {
    let sel: Selector = "header #header-particles".parse().unwrap();
    assert_eq!(
        sel,
        Selector {
            compounds: vec![
                vec![SimpleSelector::Type("header".to_string())],
                vec![SimpleSelector::ID("header-particles".to_string())],
            ],
            combinators: vec![Combinator::Descendant],
        }
    );

    let sel: Selector = " nav>a.icon[href] ".parse().unwrap();
    assert_eq!(
        sel,
        Selector {
            compounds: vec![
                vec![SimpleSelector::Type("nav".to_string())],
                vec![
                    SimpleSelector::Type("a".to_string()),
                    SimpleSelector::Class("icon".to_string()),
                    SimpleSelector::Attribute("href".to_string()),
                ],
            ],
            combinators: vec![Combinator::Child],
        }
    );

    assert_eq!("*".parse::<Selector>().unwrap().compounds, vec![vec![SimpleSelector::Universal]]);
}

#[cfg(test)]
#[test]
fn test_parse_invalid_selector() {
    assert_eq!(
        "".parse::<Selector>(),
        Err(SelectorError::Invalid("".to_string()))
    );
    assert!("a,,b".parse::<Selector>().is_err());
    assert!("#".parse::<Selector>().is_err());
    assert!("nav >".parse::<Selector>().is_err());
}
