//! Assembles a [`Diagram`] from notation source.
//!
//! The reader walks the source line by line, tracks whether it is before the
//! `@startuml` header, inside the body, or past the `@enduml` footer, and
//! hands body lines to the [`syntax`](super::syntax) grammar. It keeps going
//! after a bad line so that one read reports every problem.

use indexmap::IndexMap;
use log::{debug, warn};

use umlsketch_core::{
    diagram::{Diagram, Node},
    identifier::Id,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::{Span, Spanned},
    syntax::{self, Statement},
};

const HEADER: &str = "@startuml";
const FOOTER: &str = "@enduml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    BeforeHeader,
    Body,
    AfterFooter,
}

pub(crate) struct Reader<'src> {
    source: &'src str,
    phase: Phase,
    diagram: Diagram,
    /// Span of each node's identifier at its declaration.
    declared: IndexMap<Id, Span>,
    /// Relation endpoints in source order.
    references: Vec<Spanned<Id>>,
    diagnostics: DiagnosticCollector,
}

impl<'src> Reader<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Self {
            source,
            phase: Phase::BeforeHeader,
            diagram: Diagram::new(),
            declared: IndexMap::new(),
            references: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    pub(crate) fn read(mut self) -> Result<Diagram, ParseError> {
        let source = self.source;
        let mut offset = 0;
        for raw in source.split_inclusive('\n') {
            let line = raw.trim_end_matches(['\n', '\r']);
            self.read_line(line, offset);
            offset += raw.len();
        }

        self.finish()
    }

    fn read_line(&mut self, line: &str, offset: usize) {
        let trimmed = line.trim_matches(syntax::BLANKS);
        if trimmed.is_empty() || trimmed.starts_with('\'') {
            return;
        }

        let lead = line.len() - line.trim_start_matches(syntax::BLANKS).len();
        let span = Span::new(offset + lead..offset + lead + trimmed.len());

        match self.phase {
            Phase::BeforeHeader => {
                self.phase = Phase::Body;
                if is_directive(trimmed, HEADER) {
                    return;
                }
                self.diagnostics.emit(
                    Diagnostic::error("expected `@startuml` header")
                        .with_code(ErrorCode::E100)
                        .with_label(span, ErrorCode::E100.description())
                        .with_help("diagrams start with `@startuml`"),
                );
                // Read the line as body content anyway so its own errors surface
                self.read_body_line(line, trimmed, span, offset);
            }
            Phase::Body => self.read_body_line(line, trimmed, span, offset),
            Phase::AfterFooter => {
                self.diagnostics.emit(
                    Diagnostic::error("unexpected input after `@enduml`")
                        .with_code(ErrorCode::E100)
                        .with_label(span, ErrorCode::E100.description())
                        .with_help("move it before the footer or remove it"),
                );
            }
        }
    }

    fn read_body_line(&mut self, line: &str, trimmed: &str, span: Span, offset: usize) {
        if is_directive(trimmed, HEADER) {
            self.diagnostics.emit(
                Diagnostic::error("repeated `@startuml` header")
                    .with_code(ErrorCode::E100)
                    .with_label(span, ErrorCode::E100.description()),
            );
            return;
        }

        if is_directive(trimmed, FOOTER) {
            self.phase = Phase::AfterFooter;
            return;
        }

        match syntax::statement(line, offset) {
            Ok(Statement::Node { id, label, kind }) => self.declare(id, label, kind),
            Ok(Statement::Relation { source, target }) => self.relate(source, target),
            Err(diagnostic) => self.diagnostics.emit(diagnostic),
        }
    }

    fn declare(&mut self, name: Spanned<String>, label: String, kind: String) {
        let id = Id::new(name.inner());

        match self.diagram.add_node(Node::new(id, label, kind)) {
            Ok(()) => {
                self.declared.insert(id, name.span());
            }
            Err(err) => {
                let mut diag = Diagnostic::error(format!("node `{id}` is defined multiple times"))
                    .with_code(ErrorCode::E300)
                    .with_label(name.span(), "duplicate definition")
                    .with_help("node identifiers must be unique within a diagram");
                if let Some(first) = self.declared.get(&id) {
                    diag = diag.with_secondary_label(*first, "first defined here");
                }
                debug!(err:%; "Rejected node declaration");
                self.diagnostics.emit(diag);
            }
        }
    }

    fn relate(&mut self, source: Spanned<String>, target: Spanned<String>) {
        let source = source.map(|name| Id::new(&name));
        let target = target.map(|name| Id::new(&name));

        self.diagram.append_edge(*source, *target);
        self.references.push(source);
        self.references.push(target);
    }

    fn finish(mut self) -> Result<Diagram, ParseError> {
        let end = Span::new(self.source.len()..self.source.len());
        match self.phase {
            Phase::BeforeHeader => self.diagnostics.emit(
                Diagnostic::error("expected `@startuml` header")
                    .with_code(ErrorCode::E101)
                    .with_label(end, "input ends here")
                    .with_help("diagrams start with `@startuml`"),
            ),
            Phase::Body => self.diagnostics.emit(
                Diagnostic::error("missing `@enduml` footer")
                    .with_code(ErrorCode::E101)
                    .with_label(end, "input ends here")
                    .with_help("terminate the diagram with `@enduml`"),
            ),
            Phase::AfterFooter => {}
        }

        // Group references to undeclared nodes by id, in order of first use
        let mut undeclared: IndexMap<Id, Vec<Span>> = IndexMap::new();
        for reference in &self.references {
            if !self.declared.contains_key(reference.inner()) {
                undeclared
                    .entry(*reference.inner())
                    .or_default()
                    .push(reference.span());
            }
        }
        for (id, spans) in undeclared {
            let mut diag =
                Diagnostic::warning(format!("relation references undeclared node `{id}`"))
                    .with_help("relations to undeclared nodes are dropped on export");
            for (i, span) in spans.into_iter().enumerate() {
                diag = if i == 0 {
                    diag.with_label(span, "not declared")
                } else {
                    diag.with_secondary_label(span, "also referenced here")
                };
            }
            self.diagnostics.emit(diag);
        }

        let warnings = self.diagnostics.finish()?;
        for warning in &warnings {
            warn!(warning:%; "Diagram read with warnings");
        }

        debug!(
            nodes = self.diagram.nodes().len(),
            edges = self.diagram.edges().len();
            "Diagram read"
        );
        Ok(self.diagram)
    }
}

/// Returns `true` if `line` is `directive`, optionally followed by
/// whitespace and arbitrary text (as in `@startuml name`).
fn is_directive(line: &str, directive: &str) -> bool {
    match line.strip_prefix(directive) {
        Some(rest) => rest.is_empty() || rest.starts_with(syntax::BLANKS),
        None => false,
    }
}
