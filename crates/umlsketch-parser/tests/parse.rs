//! Integration tests for reading component notation.

use umlsketch_core::identifier::Id;
use umlsketch_parser::{
    Span,
    error::{ErrorCode, ParseError},
    parse,
};

fn errors(source: &str) -> ParseError {
    match parse(source) {
        Ok(diagram) => panic!("expected errors, got {diagram:?}"),
        Err(err) => err,
    }
}

fn codes(err: &ParseError) -> Vec<Option<ErrorCode>> {
    err.diagnostics().iter().map(|d| d.code()).collect()
}

#[test]
fn test_reads_nodes_and_relations_in_order() {
    let source = "\
@startuml
' generated
component \"Gateway\" as nginx-1 <<nginx>>
component \"Orders\" as \"orders svc\" <<springboot>>

  component \"Store\" as 3 <<mysql>>

nginx-1 --> \"orders svc\"
\"orders svc\" --> 3
@enduml
";

    let diagram = parse(source).expect("valid notation");

    let ids: Vec<String> = diagram.nodes().iter().map(|n| n.id().as_string()).collect();
    assert_eq!(ids, ["nginx-1", "orders svc", "3"]);
    assert_eq!(diagram.nodes()[1].label(), "Orders");
    assert_eq!(diagram.nodes()[2].kind(), "mysql");

    let relations: Vec<(String, String)> = diagram
        .edges()
        .iter()
        .map(|e| (e.source().as_string(), e.target().as_string()))
        .collect();
    assert_eq!(
        relations,
        [
            ("nginx-1".to_string(), "orders svc".to_string()),
            ("orders svc".to_string(), "3".to_string()),
        ]
    );
}

#[test]
fn test_crlf_line_endings() {
    let source = "@startuml\r\ncomponent \"A\" as a <<aws>>\r\ncomponent \"B\" as b\r\n\r\na --> b\r\n@enduml\r\n";

    let diagram = parse(source).expect("crlf notation");
    assert_eq!(diagram.nodes().len(), 2);
    assert_eq!(diagram.nodes()[1].kind(), "");
    assert_eq!(diagram.edges().len(), 1);
}

#[test]
fn test_escapes_in_labels() {
    let source = "@startuml\ncomponent \"Say \\\"hi\\\"\\n\\tC:\\\\\" as x <<\"my type\">>\n@enduml\n";

    let diagram = parse(source).expect("escaped label");
    assert_eq!(diagram.nodes()[0].label(), "Say \"hi\"\n\tC:\\");
    assert_eq!(diagram.nodes()[0].kind(), "my type");
}

#[test]
fn test_repeated_relations_get_distinct_ids() {
    let source = "@startuml\ncomponent \"A\" as a\na --> a\na --> a\na --> a\n@enduml\n";

    let diagram = parse(source).expect("self loops");
    let ids: Vec<Id> = diagram.edges().iter().map(|e| e.id()).collect();
    assert_eq!(
        ids,
        [
            Id::new("edge-a-a"),
            Id::new("edge-a-a-2"),
            Id::new("edge-a-a-3")
        ]
    );
}

#[test]
fn test_relation_to_undeclared_node_is_kept() {
    let source = "@startuml\ncomponent \"A\" as a\na --> ghost\n@enduml\n";

    let diagram = parse(source).expect("warnings do not fail the read");
    assert_eq!(diagram.edges().len(), 1);
    assert_eq!(diagram.dangling_edges().count(), 1);
}

#[test]
fn test_node_named_component() {
    let source = "@startuml\ncomponent \"C\" as component\ncomponent --> component\n@enduml\n";

    let diagram = parse(source).expect("keyword as id");
    assert_eq!(diagram.nodes()[0].id(), "component");
    assert_eq!(diagram.edges()[0].source(), "component");
}

#[test]
fn test_missing_header() {
    let err = errors("component \"A\" as a\n@enduml\n");

    assert_eq!(codes(&err), [Some(ErrorCode::E100)]);
    assert_eq!(err.diagnostics()[0].labels()[0].span(), Span::new(0..18));
}

#[test]
fn test_missing_footer() {
    let source = "@startuml\ncomponent \"A\" as a\n";
    let err = errors(source);

    assert_eq!(codes(&err), [Some(ErrorCode::E101)]);
    let span = err.diagnostics()[0].labels()[0].span();
    assert_eq!(span.start(), source.len());
    assert!(span.is_empty());
}

#[test]
fn test_empty_input() {
    let err = errors("");
    assert_eq!(codes(&err), [Some(ErrorCode::E101)]);
}

#[test]
fn test_trailing_content() {
    let err = errors("@startuml\n@enduml\n' fine\ncomponent \"A\" as a\n");

    assert_eq!(codes(&err), [Some(ErrorCode::E100)]);
    assert!(err.diagnostics()[0].message().contains("after `@enduml`"));
}

#[test]
fn test_duplicate_node_points_at_both_definitions() {
    let source = "@startuml\ncomponent \"A\" as dup\ncomponent \"B\" as dup\n@enduml\n";
    let err = errors(source);

    assert_eq!(codes(&err), [Some(ErrorCode::E300)]);
    let labels = err.diagnostics()[0].labels();
    assert_eq!(labels.len(), 2);

    let first = source.find("dup").expect("first definition");
    let second = source.rfind("dup").expect("second definition");
    assert!(labels[0].is_primary());
    assert_eq!(labels[0].span(), Span::new(second..second + 3));
    assert!(labels[1].is_secondary());
    assert_eq!(labels[1].span(), Span::new(first..first + 3));
}

#[test]
fn test_collects_every_bad_line() {
    let source = "\
@startuml
component \"open as a
component \"B\" as b <<oops
component \"C\" as c
c -->
b --> c
component \"D\\q\" as d
@enduml
";
    let err = errors(source);

    assert_eq!(
        codes(&err),
        [
            Some(ErrorCode::E001),
            Some(ErrorCode::E102),
            Some(ErrorCode::E100),
            Some(ErrorCode::E003),
            None,
        ]
    );
    assert_eq!(err.error_count(), 4);
    assert!(err.diagnostics()[4].severity().is_warning());

    let line_of = |offset: usize| source[..offset].matches('\n').count() + 1;
    let lines: Vec<usize> = err
        .diagnostics()
        .iter()
        .map(|d| line_of(d.labels()[0].span().start()))
        .collect();
    assert_eq!(lines, [2, 3, 5, 7, 6]);
}
