//! Route templates of the `/{a}/{b}`-form: parsing into segments and
//! matching concrete paths against them.

use std::fmt;

use crate::error::TemplateError;

/// One unit of a parsed template: literal text or a named placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Constant(String),
    Variable(String),
}

/// A parsed route template. Immutable once built; `Display` reconstructs the
/// source string exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    segments: Vec<Segment>,
}

/// True iff `input` parses as a template, i.e. its braces are well-formed
/// and it names at least one variable.
pub fn is_template(input: &str) -> bool {
    PathTemplate::parse(input).is_ok()
}

impl PathTemplate {
    /// Scan `input` left to right, accumulating literal runs into `Constant`
    /// segments and brace-delimited runs into `Variable` segments.
    pub fn parse(input: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut variable: Option<String> = None;

        for ch in input.chars() {
            match ch {
                '{' => {
                    if variable.is_some() {
                        return Err(TemplateError::Unbalanced(input.to_string()));
                    }
                    if literal.is_empty() {
                        if matches!(segments.last(), Some(Segment::Variable(_))) {
                            return Err(TemplateError::AdjacentVariables(input.to_string()));
                        }
                    } else {
                        segments.push(Segment::Constant(std::mem::take(&mut literal)));
                    }
                    variable = Some(String::new());
                }
                '}' => match variable.take() {
                    None => return Err(TemplateError::Unbalanced(input.to_string())),
                    Some(name) if name.is_empty() => {
                        return Err(TemplateError::EmptyVariable(input.to_string()));
                    }
                    Some(name) => segments.push(Segment::Variable(name)),
                },
                _ => match variable.as_mut() {
                    Some(name) => name.push(ch),
                    None => literal.push(ch),
                },
            }
        }

        if variable.is_some() {
            return Err(TemplateError::Unbalanced(input.to_string()));
        }
        if !literal.is_empty() {
            segments.push(Segment::Constant(literal));
        }
        if !segments
            .iter()
            .any(|s| matches!(s, Segment::Variable(_)))
        {
            return Err(TemplateError::NoVariables(input.to_string()));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the template's variables, in source order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Variable(name) => Some(name.as_str()),
            Segment::Constant(_) => None,
        })
    }

    /// Whether `candidate` is a concrete instantiation of this template.
    ///
    /// Constants are literal anchors, each variable consumes one or more
    /// characters (including `/`), and the whole candidate must be consumed.
    pub fn matches(&self, candidate: &str) -> bool {
        match_segments(&self.segments, candidate)
    }
}

fn match_segments(segments: &[Segment], text: &str) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        return text.is_empty();
    };
    match first {
        Segment::Constant(lit) => text
            .strip_prefix(lit.as_str())
            .is_some_and(|remaining| match_segments(rest, remaining)),
        Segment::Variable(_) => {
            let mut chars = text.char_indices();
            if chars.next().is_none() {
                return false;
            }
            // Try every split where the variable keeps at least one char.
            for (idx, _) in chars {
                if match_segments(rest, &text[idx..]) {
                    return true;
                }
            }
            match_segments(rest, "")
        }
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Constant(text) => write!(f, "{text}")?,
                Segment::Variable(name) => write!(f, "{{{name}}}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_constants_and_variables() {
        let template = PathTemplate::parse("/one/{two}three").unwrap();
        assert_eq!(
            template.segments(),
            &[
                Segment::Constant("/one/".to_string()),
                Segment::Variable("two".to_string()),
                Segment::Constant("three".to_string()),
            ]
        );
    }

    #[test]
    fn is_template_requires_a_variable() {
        assert!(is_template("{path}"));
        assert!(is_template("/{foo}/{bar}"));
        assert!(!is_template("foo/bif/bar"));
    }

    #[test]
    fn malformed_templates_are_rejected() {
        for input in ["{path", "}mime type{", "/foo}/{bar", "foo/bif/bar"] {
            assert!(!is_template(input), "{input} should not be a template");
            assert!(PathTemplate::parse(input).is_err());
        }
        assert!(matches!(
            PathTemplate::parse("/{}"),
            Err(TemplateError::EmptyVariable(_))
        ));
        assert!(matches!(
            PathTemplate::parse("/{a{b}}"),
            Err(TemplateError::Unbalanced(_))
        ));
    }

    #[test]
    fn adjacent_variables_are_rejected() {
        assert!(matches!(
            PathTemplate::parse("/{a}{b}"),
            Err(TemplateError::AdjacentVariables(_))
        ));
    }

    #[test]
    fn display_round_trips_the_source() {
        for input in ["{path}", "/{foo}/{bar}", "/one/{two}three", "/one/two{three}/four"] {
            let template = PathTemplate::parse(input).unwrap();
            assert_eq!(template.to_string(), input);
        }
    }

    #[test]
    fn variables_are_listed_in_order() {
        let template = PathTemplate::parse("/{foo}/x/{bar}").unwrap();
        let names: Vec<&str> = template.variables().collect();
        assert_eq!(names, ["foo", "bar"]);
    }

    #[test]
    fn aligned_fixture_pairs_match() {
        let cases = [
            ("{path}", "anything/really"),
            ("/{foo}/{bar}", "/its/bif/again/"),
            ("/one/{two}three", "/one/threethree"),
        ];
        for (template, candidate) in cases {
            let template = PathTemplate::parse(template).unwrap();
            assert!(template.matches(candidate), "{template} vs {candidate}");
        }
    }

    #[test]
    fn mismatched_candidates_do_not_match() {
        let template = PathTemplate::parse("/one/two{three}/four").unwrap();
        assert!(!template.matches("/some/thing/else"));
        assert!(!template.matches("anything/really"));

        let template = PathTemplate::parse("/one/{two}three").unwrap();
        assert!(!template.matches("/some/thing/else"));
        assert!(!template.matches("/one/three"));
    }

    #[test]
    fn variables_never_match_empty() {
        let template = PathTemplate::parse("/{id}").unwrap();
        assert!(!template.matches("/"));
        assert!(template.matches("/7"));
    }

    #[test]
    fn whole_candidate_must_be_consumed() {
        let template = PathTemplate::parse("/pets/{id}/x").unwrap();
        assert!(!template.matches("/pets/1/x/y"));
        assert!(template.matches("/pets/1/x"));
    }
}
