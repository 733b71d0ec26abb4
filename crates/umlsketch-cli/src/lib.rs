//! CLI logic for the umlsketch diagram tool.
//!
//! Converts between saved JSON documents and component notation, composes
//! chat prompts about a diagram, and lists the node palette.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::info;

use umlsketch::{
    DiagramBuilder, UmlSketchError, diagram::Diagram, document::Document, palette::Palette,
};

/// File format, picked from a path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Saved JSON document (`.json`).
    Document,
    /// Component notation (any other extension).
    Notation,
}

impl Format {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let is_json = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::Document
        } else {
            Self::Notation
        }
    }
}

/// Run the umlsketch CLI application
///
/// Reads the input diagram, converts it to the output format and writes it
/// to the output file. With `--ask`, the output file receives the chat
/// prompt instead. With `--palette`, the palette is printed to stdout.
///
/// # Errors
///
/// Returns `UmlSketchError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Notation parsing errors
/// - Malformed or inconsistent documents
/// - An empty `--ask` message
pub fn run(args: &Args) -> Result<(), UmlSketchError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let builder = DiagramBuilder::new(app_config);

    if args.palette {
        print!("{}", palette_listing(&builder.palette()));
        return Ok(());
    }

    let Some(input) = args.input.as_deref() else {
        return Err(UmlSketchError::Io(std::io::Error::other(
            "no input file given",
        )));
    };
    let output = match &args.output {
        Some(output) => output.clone(),
        None => format!("out.{}", builder.config().export().extension()),
    };

    info!(
        input_path = input,
        output_path = output.as_str();
        "Processing diagram"
    );

    let source = fs::read_to_string(input)?;
    let (diagram, saved) = match Format::from_path(input) {
        Format::Document => {
            let document = Document::from_json(&source)?;
            (builder.open(&document)?, Some(document))
        }
        Format::Notation => (builder.parse(&source)?, None),
    };

    let rendered = match &args.ask {
        Some(message) => builder.chat_prompt(message, &diagram)?,
        None => render(&builder, input, &output, &diagram, saved.as_ref())?,
    };

    fs::write(&output, rendered)?;

    info!(output_file = output.as_str(); "Diagram exported successfully");

    Ok(())
}

/// Render `diagram` in the output's format. A document written from a saved
/// document keeps that document's name and node layout.
fn render(
    builder: &DiagramBuilder,
    input: &str,
    output: &str,
    diagram: &Diagram,
    saved: Option<&Document>,
) -> Result<String, UmlSketchError> {
    match (Format::from_path(output), saved) {
        (Format::Document, Some(saved)) => builder.update_document(saved, diagram),
        (Format::Document, None) => {
            let name = Path::new(input)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Untitled Flowchart".to_string());
            builder.render_document(&name, diagram)
        }
        (Format::Notation, _) => Ok(builder.render(diagram)),
    }
}

/// One `tag<TAB>label` line per palette kind, in palette order.
pub fn palette_listing(palette: &Palette) -> String {
    palette
        .kinds()
        .map(|entry| format!("{}\t{}\n", entry.tag(), entry.label()))
        .collect()
}
