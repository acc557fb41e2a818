//! Include directives inside page fragments.
//!
//! Page fragments are plain HTML. Wherever a page needs generated markup it
//! holds a directive written as an HTML comment, so an unprocessed fragment
//! still opens in a browser:
//!
//! ```text
//! <!--#image name="printer-front" alt="Front panel" class="right" -->
//! <!--#nav caption="Back to top" -->
//! ```
//!
//! Recognised directives:
//!
//! | Directive | Attributes |
//! |-----------|------------|
//! | `image` | `name` (required), `alt`, `border`; anything else is copied onto the `<img>` tag |
//! | `nav` | `caption` |
//!
//! Values are quoted with `"` or `'`. Ordinary comments (`<!-- ... -->`)
//! are left alone. Errors carry the line of the offending directive.

use crate::images::ImageRequest;
use thiserror::Error;

const OPEN: &str = "<!--#";
const CLOSE: &str = "-->";

#[derive(Error, Debug, PartialEq)]
pub enum DirectiveError {
    #[error("line {line}: directive is never closed with -->")]
    Unterminated { line: usize },
    #[error("line {line}: unknown directive {name:?}")]
    Unknown { line: usize, name: String },
    #[error("line {line}: malformed attribute near {near:?}")]
    Malformed { line: usize, near: String },
    #[error("line {line}: {directive} directive needs a {attribute} attribute")]
    MissingAttribute {
        line: usize,
        directive: &'static str,
        attribute: &'static str,
    },
}

/// A parsed directive.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Image(ImageRequest),
    Nav { caption: Option<String> },
}

/// A piece of a fragment: literal HTML or a directive to expand.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    Text(&'a str),
    Directive(Directive),
}

/// Split a fragment into literal text and directives.
pub fn parse(source: &str) -> Result<Vec<Segment<'_>>, DirectiveError> {
    let mut segments = Vec::new();
    let mut rest = source;
    let mut consumed = 0;

    while let Some(start) = rest.find(OPEN) {
        let line = line_of(source, consumed + start);
        if start > 0 {
            segments.push(Segment::Text(&rest[..start]));
        }
        let body_start = start + OPEN.len();
        let body_len = rest[body_start..]
            .find(CLOSE)
            .ok_or(DirectiveError::Unterminated { line })?;
        let body = &rest[body_start..body_start + body_len];
        segments.push(Segment::Directive(parse_directive(body, line)?));

        let next = body_start + body_len + CLOSE.len();
        consumed += next;
        rest = &rest[next..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    Ok(segments)
}

fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}

fn parse_directive(body: &str, line: usize) -> Result<Directive, DirectiveError> {
    let body = body.trim();
    let (name, attrs) = body
        .split_once(char::is_whitespace)
        .unwrap_or((body, ""));
    let attrs = parse_attrs(attrs, line)?;

    match name {
        "image" => image_directive(attrs, line),
        "nav" => {
            let mut caption = None;
            for (key, value) in attrs {
                if key == "caption" {
                    caption = Some(value);
                } else {
                    return Err(DirectiveError::Malformed { line, near: key });
                }
            }
            Ok(Directive::Nav { caption })
        }
        other => Err(DirectiveError::Unknown {
            line,
            name: other.to_string(),
        }),
    }
}

fn image_directive(attrs: Vec<(String, String)>, line: usize) -> Result<Directive, DirectiveError> {
    let mut request = ImageRequest::default();
    let mut has_name = false;
    for (key, value) in attrs {
        match key.as_str() {
            "name" => {
                request.name = value;
                has_name = true;
            }
            "alt" => request.alt = value,
            "border" => request.border = Some(value),
            _ => request.extra.push((key, value)),
        }
    }
    if !has_name || request.name.is_empty() {
        return Err(DirectiveError::MissingAttribute {
            line,
            directive: "image",
            attribute: "name",
        });
    }
    Ok(Directive::Image(request))
}

/// Parse `key="value" key='value'` pairs, in order.
fn parse_attrs(mut input: &str, line: usize) -> Result<Vec<(String, String)>, DirectiveError> {
    let malformed = |near: &str| DirectiveError::Malformed {
        line,
        near: near.chars().take(20).collect(),
    };

    let mut attrs = Vec::new();
    loop {
        input = input.trim_start();
        if input.is_empty() {
            return Ok(attrs);
        }
        let (key, after_key) = input.split_once('=').ok_or_else(|| malformed(input))?;
        let key = key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return Err(malformed(input));
        }
        let after_key = after_key.trim_start();
        let quote = after_key
            .chars()
            .next()
            .filter(|c| matches!(c, '"' | '\''))
            .ok_or_else(|| malformed(after_key))?;
        let value_and_rest = &after_key[1..];
        let end = value_and_rest
            .find(quote)
            .ok_or_else(|| malformed(after_key))?;
        attrs.push((key.to_string(), value_and_rest[..end].to_string()));
        input = &value_and_rest[end + 1..];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directives(source: &str) -> Vec<Directive> {
        parse(source)
            .unwrap()
            .into_iter()
            .filter_map(|s| match s {
                Segment::Directive(d) => Some(d),
                Segment::Text(_) => None,
            })
            .collect()
    }

    #[test]
    fn plain_html_is_one_text_segment() {
        let segments = parse("<p>hello</p>").unwrap();
        assert_eq!(segments, vec![Segment::Text("<p>hello</p>")]);
    }

    #[test]
    fn empty_source_has_no_segments() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn text_around_directive_is_kept() {
        let segments = parse("a<!--#nav -->b").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Text("a"),
                Segment::Directive(Directive::Nav { caption: None }),
                Segment::Text("b"),
            ]
        );
    }

    #[test]
    fn image_directive_fields() {
        let found = directives(
            r#"<!--#image name="printer-front" alt="Front panel" border="1" class="right" -->"#,
        );
        assert_eq!(
            found,
            vec![Directive::Image(
                ImageRequest::new("printer-front")
                    .alt("Front panel")
                    .border("1")
                    .attr("class", "right")
            )]
        );
    }

    #[test]
    fn extra_attributes_keep_source_order() {
        let found = directives(r#"<!--#image name="a" style="x" align="left" id='i' -->"#);
        let Directive::Image(request) = &found[0] else {
            panic!("expected image directive");
        };
        let keys: Vec<&str> = request.extra.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["style", "align", "id"]);
    }

    #[test]
    fn single_quotes_allow_double_quotes_inside() {
        let found = directives(r#"<!--#image name='logo' alt='The "new" logo' -->"#);
        assert_eq!(
            found,
            vec![Directive::Image(
                ImageRequest::new("logo").alt(r#"The "new" logo"#)
            )]
        );
    }

    #[test]
    fn nav_caption() {
        let found = directives(r#"<!--#nav caption="Back to top" -->"#);
        assert_eq!(
            found,
            vec![Directive::Nav {
                caption: Some("Back to top".to_string())
            }]
        );
    }

    #[test]
    fn ordinary_comments_are_text() {
        let segments = parse("<!-- not a directive -->").unwrap();
        assert_eq!(segments, vec![Segment::Text("<!-- not a directive -->")]);
    }

    #[test]
    fn several_directives() {
        let found = directives("<!--#nav --><p/><!--#image name=\"a\" --><!--#image name=\"b\"-->");
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn unterminated_directive_reports_line() {
        let err = parse("one\ntwo\n<!--#image name=\"a\"\n").unwrap_err();
        assert_eq!(err, DirectiveError::Unterminated { line: 3 });
    }

    #[test]
    fn unknown_directive() {
        let err = parse("<!--#include file=\"x\" -->").unwrap_err();
        assert_eq!(
            err,
            DirectiveError::Unknown {
                line: 1,
                name: "include".to_string()
            }
        );
    }

    #[test]
    fn image_without_name() {
        let err = parse("\n<!--#image alt=\"x\" -->").unwrap_err();
        assert!(matches!(
            err,
            DirectiveError::MissingAttribute { line: 2, .. }
        ));
    }

    #[test]
    fn unquoted_value_is_malformed() {
        let err = parse("<!--#image name=logo -->").unwrap_err();
        assert!(matches!(err, DirectiveError::Malformed { line: 1, .. }));
    }

    #[test]
    fn unclosed_quote_is_malformed() {
        let err = parse(r#"<!--#image name="logo -->"#).unwrap_err();
        assert!(matches!(err, DirectiveError::Malformed { .. }));
    }

    #[test]
    fn unknown_nav_attribute_is_malformed() {
        let err = parse(r#"<!--#nav label="x" -->"#).unwrap_err();
        assert!(matches!(err, DirectiveError::Malformed { .. }));
    }

    #[test]
    fn line_numbers_count_from_second_directive() {
        let err = parse("<!--#nav -->\n\n<!--#bogus -->").unwrap_err();
        assert!(matches!(err, DirectiveError::Unknown { line: 3, .. }));
    }
}
