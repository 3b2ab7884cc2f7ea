//! Reader for the small subset of XML that grammar documents use.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until, take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{eof, map, map_res, opt, value},
    error::{Error as NomError, ErrorKind},
    multi::many0,
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
    IResult,
};

use crate::node::Node;

enum Content {
    Child(Node),
    Text(String),
    Skip,
}

/// Parses a complete document into its root element.
pub fn document(input: &str) -> IResult<&str, Node> {
    let (rem, root) = preceded(misc, element)(input)?;
    let (rem, _) = terminated(misc, eof)(rem)?;
    Ok((rem, root))
}

pub fn element(input: &str) -> IResult<&str, Node> {
    let (mut rem, (name, attrs, closed)) = start_tag(input)?;
    let mut node = Node::new(name);
    node.attrs = attrs.into_iter().collect();
    if closed {
        return Ok((rem, node));
    }

    let mut text = String::new();
    loop {
        if let Ok((after, end)) = end_tag(rem) {
            if end != name {
                return Err(nom::Err::Failure(NomError::new(rem, ErrorKind::Tag)));
            }
            rem = after;
            break;
        }
        let (after, item) = content(rem)?;
        match item {
            Content::Child(child) => node.children.push(child),
            Content::Text(s) => text.push_str(&s),
            Content::Skip => {}
        }
        rem = after;
    }

    // Whitespace between child elements is layout, not content.
    node.value = if node.children.is_empty() {
        Some(text).filter(|t| !t.is_empty())
    } else {
        Some(text).filter(|t| !t.trim().is_empty())
    };
    Ok((rem, node))
}

fn content(input: &str) -> IResult<&str, Content> {
    alt((
        map(element, Content::Child),
        map(cdata, Content::Text),
        map(comment, |_| Content::Skip),
        map(processing_instruction, |_| Content::Skip),
        map(char_data, Content::Text),
    ))(input)
}

fn misc(input: &str) -> IResult<&str, ()> {
    let (rem, _) = many0(alt((
        value((), multispace1),
        comment,
        processing_instruction,
        doctype,
    )))(input)?;
    Ok((rem, ()))
}

fn start_tag(input: &str) -> IResult<&str, (&str, Vec<(String, String)>, bool)> {
    let (rem, (_, name, attrs, _, end)) = tuple((
        char('<'),
        name,
        many0(preceded(multispace1, attribute)),
        multispace0,
        alt((tag("/>"), tag(">"))),
    ))(input)?;
    Ok((rem, (name, attrs, end == "/>")))
}

fn end_tag(input: &str) -> IResult<&str, &str> {
    delimited(tag("</"), name, pair(multispace0, char('>')))(input)
}

fn name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))(input)
}

fn attribute(input: &str) -> IResult<&str, (String, String)> {
    let (rem, (key, raw)) = separated_pair(
        name,
        delimited(multispace0, char('='), multispace0),
        alt((
            delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
            delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
        )),
    )(input)?;
    let value =
        unescape(raw).map_err(|_| nom::Err::Failure(NomError::new(input, ErrorKind::MapRes)))?;
    Ok((rem, (key.to_owned(), value)))
}

fn char_data(input: &str) -> IResult<&str, String> {
    map_res(take_while1(|c: char| c != '<'), unescape)(input)
}

fn cdata(input: &str) -> IResult<&str, String> {
    map(
        delimited(tag("<![CDATA["), take_until("]]>"), tag("]]>")),
        |s: &str| s.to_owned(),
    )(input)
}

fn comment(input: &str) -> IResult<&str, ()> {
    value((), delimited(tag("<!--"), take_until("-->"), tag("-->")))(input)
}

fn processing_instruction(input: &str) -> IResult<&str, ()> {
    value((), delimited(tag("<?"), take_until("?>"), tag("?>")))(input)
}

fn doctype(input: &str) -> IResult<&str, ()> {
    value(
        (),
        tuple((
            tag("<!DOCTYPE"),
            take_while(|c: char| c != '[' && c != '>'),
            opt(delimited(char('['), take_until("]"), char(']'))),
            multispace0,
            char('>'),
        )),
    )(input)
}

/// Resolves predefined entities and numeric character references.
pub(crate) fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx + 1..];
        let end = tail
            .find(';')
            .ok_or_else(|| format!("unterminated entity in {:?}", raw))?;
        let entity = &tail[..end];
        let ch = match entity {
            "lt" => '<',
            "gt" => '>',
            "amp" => '&',
            "quot" => '"',
            "apos" => '\'',
            _ => {
                let code = if let Some(hex) = entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                {
                    u32::from_str_radix(hex, 16).ok()
                } else if let Some(dec) = entity.strip_prefix('#') {
                    dec.parse::<u32>().ok()
                } else {
                    return Err(format!("unknown entity &{};", entity));
                };
                code.and_then(char::from_u32)
                    .ok_or_else(|| format!("invalid character reference &{};", entity))?
            }
        };
        out.push(ch);
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCase {
        input: &'static str,
        // None means the reader must reject the input.
        out: Option<Node>,
    }

    fn assert_test_cases(tests: Vec<TestCase>) {
        for t in tests {
            let res = document(t.input);
            match t.out {
                Some(out) => assert_eq!(res, Ok(("", out)), "input: {}", t.input),
                None => assert!(res.is_err(), "expected error for {}: {:?}", t.input, res),
            }
        }
    }

    #[test]
    fn parse_documents() {
        let tests = vec![
            TestCase {
                input: "<grammar/>",
                out: Some(Node::new("grammar")),
            },
            TestCase {
                input: "<?xml version=\"1.0\"?>\n<!-- rules -->\n<grammar></grammar>\n",
                out: Some(Node::new("grammar")),
            },
            TestCase {
                input: "<!DOCTYPE grammar [ <!ENTITY x \"y\"> ]>\n<grammar/>",
                out: Some(Node::new("grammar")),
            },
            TestCase {
                input: "<bnfdef name='digit'>\n  <rhs/>\n</bnfdef>",
                out: Some(
                    Node::new("bnfdef")
                        .with_attr("name", "digit")
                        .with_child(Node::new("rhs")),
                ),
            },
            TestCase {
                input: "<kw>SELECT</kw>",
                out: Some(Node::new("kw").with_value("SELECT")),
            },
            TestCase {
                input: "<terminalsymbol> </terminalsymbol>",
                out: Some(Node::new("terminalsymbol").with_value(" ")),
            },
            TestCase {
                input: "<grammar><a></b></grammar>",
                out: None,
            },
            TestCase {
                input: "<grammar><a/>",
                out: None,
            },
            TestCase {
                input: "<grammar/><trailing/>",
                out: None,
            },
        ];

        assert_test_cases(tests);
    }

    #[test]
    fn parse_entities() {
        let tests = vec![
            TestCase {
                input: "<t>&lt;&amp;&gt;</t>",
                out: Some(Node::new("t").with_value("<&>")),
            },
            TestCase {
                input: "<t>&apos;</t>",
                out: Some(Node::new("t").with_value("'")),
            },
            TestCase {
                input: "<t>&#92;&#x41;</t>",
                out: Some(Node::new("t").with_value("\\A")),
            },
            TestCase {
                input: "<t><![CDATA[<&>]]></t>",
                out: Some(Node::new("t").with_value("<&>")),
            },
            TestCase {
                input: "<t a=\"&quot;x&quot;\"/>",
                out: Some(Node::new("t").with_attr("a", "\"x\"")),
            },
            TestCase {
                input: "<t>&bogus;</t>",
                out: None,
            },
        ];

        assert_test_cases(tests);
    }

    #[test]
    fn layout_whitespace_is_dropped() {
        let (_, node) = document("<rhs>\n  <kw>A</kw>\n  <kw>B</kw>\n</rhs>").unwrap();
        assert_eq!(node.value, None);
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[1].text(), Some("B"));
    }
}
