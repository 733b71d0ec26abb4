//! Grammar of a single notation statement.
//!
//! The reader splits the source into lines and handles the `@startuml` /
//! `@enduml` directives itself; everything between them is one statement per
//! line, parsed here:
//!
//! ```text
//! component "<label>" as <id> <<type>>
//! <id> --> <id>
//! ```
//!
//! Identifiers are either bare (`[A-Za-z0-9_.:-]+`, not starting with `-`)
//! or quoted strings. Labels are always quoted. Stereotypes hold either a
//! quoted string or free text up to `>>`.

use winnow::{
    Parser as _,
    combinator::{alt, cut_err, eof, not, opt, peek, preceded, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location},
    token::{none_of, one_of, take_while},
};

use umlsketch_core::identifier::is_bare_char;

use crate::{
    error::{Diagnostic, ErrorCode},
    span::{Span, Spanned},
};

/// Rich diagnostic information attached to winnow errors via `.context()`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SyntaxDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<SyntaxDiagnostic>>;

/// A parsed body line. Spans are absolute offsets into the source.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Statement {
    Node {
        id: Spanned<String>,
        label: String,
        kind: String,
    },
    Relation {
        source: Spanned<String>,
        target: Spanned<String>,
    },
}

impl Statement {
    fn offset_by(self, offset: usize) -> Self {
        let shift = |value: Spanned<String>| {
            let span = value.span().offset_by(offset);
            Spanned::new(value.into_inner(), span)
        };

        match self {
            Self::Node { id, label, kind } => Self::Node {
                id: shift(id),
                label,
                kind,
            },
            Self::Relation { source, target } => Self::Relation {
                source: shift(source),
                target: shift(target),
            },
        }
    }
}

/// Characters that separate tokens and indent lines.
pub(crate) const BLANKS: [char; 2] = [' ', '\t'];

fn spaces(input: &mut Input<'_>) -> IResult<()> {
    take_while(0.., BLANKS).void().parse_next(input)
}

fn spaces1(input: &mut Input<'_>) -> IResult<()> {
    take_while(1.., BLANKS).void().parse_next(input)
}

/// Parse an escape sequence inside a quoted string, starting at the backslash.
fn string_escape(input: &mut Input<'_>) -> IResult<char> {
    let escape_start = input.current_token_start();

    '\\'.parse_next(input)?;

    cut_err(one_of(['n', 'r', 't', '\\', '"']).map(|c| match c {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        other => other,
    }))
    .context(SyntaxDiagnostic {
        code: ErrorCode::E003,
        message: "invalid escape sequence",
        help: Some("valid escapes: `\\n`, `\\r`, `\\t`, `\\\\`, `\\\"`"),
        start: escape_start,
    })
    .parse_next(input)
}

/// Parse a double-quoted string, resolving escapes.
fn quoted(input: &mut Input<'_>) -> IResult<String> {
    let start = input.current_token_start();

    '"'.parse_next(input)?;

    cut_err(terminated(
        repeat(0.., alt((string_escape, none_of(['"', '\\'])))).fold(
            String::new,
            |mut acc: String, ch: char| {
                acc.push(ch);
                acc
            },
        ),
        '"',
    ))
    .context(SyntaxDiagnostic {
        code: ErrorCode::E001,
        message: "unterminated string literal",
        help: Some("add closing `\"`"),
        start,
    })
    .parse_next(input)
}

/// Parse a bare identifier. Stops in front of an arrow so that `a-->b`
/// reads as a relation.
fn bare_identifier<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    (
        not('-'),
        repeat::<_, _, (), _, _>(1.., preceded(not("-->"), one_of(is_bare_char))),
    )
        .take()
        .parse_next(input)
}

/// Parse a bare or quoted identifier with its span (relative to the line).
fn identifier(input: &mut Input<'_>) -> IResult<Spanned<String>> {
    let start = input.current_token_start();
    let value = alt((quoted, bare_identifier.map(str::to_owned))).parse_next(input)?;
    let end = input.current_token_start();

    Ok(Spanned::new(value, Span::new(start..end)))
}

/// Parse a `<<type>>` stereotype.
fn stereotype(input: &mut Input<'_>) -> IResult<String> {
    let start = input.current_token_start();

    "<<".parse_next(input)?;

    cut_err(terminated(
        alt((
            quoted,
            take_while(0.., |c: char| c != '>' && c != '"').map(|s: &str| s.trim().to_owned()),
        )),
        ">>",
    ))
    .context(SyntaxDiagnostic {
        code: ErrorCode::E102,
        message: "unterminated stereotype",
        help: Some("close the type tag with `>>`"),
        start,
    })
    .parse_next(input)
}

/// `component "<label>" as <id> [<<type>>]`
fn node_statement(input: &mut Input<'_>) -> IResult<Statement> {
    let start = input.current_token_start();

    // Only commit once the keyword is followed by a label, so that a
    // relation whose source node is called `component` still parses.
    ("component", spaces1, peek('"')).parse_next(input)?;

    cut_err((
        quoted,
        spaces1,
        "as",
        spaces1,
        identifier,
        opt(preceded(spaces, stereotype)),
        spaces,
        eof,
    ))
    .context(SyntaxDiagnostic {
        code: ErrorCode::E100,
        message: "malformed node declaration",
        help: Some("expected `component \"<label>\" as <id> <<type>>`"),
        start,
    })
    .map(|(label, _, _, _, id, kind, _, _)| Statement::Node {
        id,
        label,
        kind: kind.unwrap_or_default(),
    })
    .parse_next(input)
}

/// `<id> --> <id>`
fn relation_statement(input: &mut Input<'_>) -> IResult<Statement> {
    let start = input.current_token_start();

    let source = identifier.parse_next(input)?;
    (spaces, "-->").parse_next(input)?;

    let (_, target, _, _) = cut_err((spaces, identifier, spaces, eof))
        .context(SyntaxDiagnostic {
            code: ErrorCode::E100,
            message: "malformed relation",
            help: Some("expected `<source> --> <target>`"),
            start,
        })
        .parse_next(input)?;

    Ok(Statement::Relation { source, target })
}

/// Parse one body line.
///
/// # Arguments
///
/// * `line` - The line text without its line terminator
/// * `offset` - Byte offset of the line within the whole source
pub(crate) fn statement(line: &str, offset: usize) -> Result<Statement, Diagnostic> {
    let mut input = LocatingSlice::new(line);

    match preceded(spaces, alt((node_statement, relation_statement))).parse_next(&mut input) {
        Ok(statement) => Ok(statement.offset_by(offset)),
        Err(err) => {
            let error_pos = input.current_token_start();
            Err(to_diagnostic(err, line, error_pos, offset))
        }
    }
}

/// Convert a winnow error into a [`Diagnostic`].
///
/// Uses the innermost [`SyntaxDiagnostic`] context when one is present and
/// falls back to an "unrecognized statement" error covering the line.
fn to_diagnostic(
    err: ErrMode<ContextError<SyntaxDiagnostic>>,
    line: &str,
    error_pos: usize,
    offset: usize,
) -> Diagnostic {
    let context_error = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };

    if let Some(SyntaxDiagnostic {
        code,
        message,
        help,
        start,
    }) = context_error.context().next()
    {
        let end = if error_pos > *start {
            error_pos
        } else {
            (*start + 1).min(line.len())
        };
        let span = Span::new(*start..end).offset_by(offset);

        let mut diag = Diagnostic::error(*message)
            .with_code(*code)
            .with_label(span, code.description());
        if let Some(h) = help {
            diag = diag.with_help(*h);
        }
        return diag;
    }

    let lead = line.len() - line.trim_start_matches(BLANKS).len();
    let span = Span::new(lead..line.trim_end_matches(BLANKS).len()).offset_by(offset);
    Diagnostic::error("unrecognized statement")
        .with_code(ErrorCode::E100)
        .with_label(span, ErrorCode::E100.description())
        .with_help("expected `component \"<label>\" as <id> <<type>>`, `<id> --> <id>` or `@enduml`")
}


#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn labels_stay_within_line(line in "[ -~\t]{0,40}", offset in 0usize..1000) {
            if let Err(diag) = statement(&line, offset) {
                for label in diag.labels() {
                    prop_assert!(label.span().start() >= offset);
                    prop_assert!(label.span().end() <= offset + line.len());
                }
            }
        }

        #[test]
        fn bare_relations_parse(source in "[a-z0-9_.:]{1,8}", target in "[a-z0-9_.:]{1,8}") {
            let line = format!("{source} --> {target}");
            match statement(&line, 0) {
                Ok(Statement::Relation { source: s, target: t }) => {
                    prop_assert_eq!(s.inner(), &source);
                    prop_assert_eq!(t.inner(), &target);
                }
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }
    }
}
