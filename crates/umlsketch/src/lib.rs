//! umlsketch - turn node-and-edge diagrams into UML component notation.
//!
//! Loads diagrams from saved JSON documents or from notation text, writes
//! them back in either form, and composes chat prompts that carry a diagram
//! as context.

pub mod chat;
pub mod config;
pub mod document;
pub mod export;

mod error;

pub use umlsketch_core::{diagram, identifier, palette};

pub use error::UmlSketchError;

use log::{debug, info, trace};

use umlsketch_core::{diagram::Diagram, palette::Palette};

use chat::ChatRequest;
use config::AppConfig;
use document::Document;

/// Builder for loading, reading and exporting diagrams.
///
/// # Examples
///
/// ```rust
/// use umlsketch::{DiagramBuilder, config::AppConfig};
///
/// let source = "@startuml\ncomponent \"App\" as app <<nodejs>>\n@enduml\n";
///
/// // With custom config
/// let config = AppConfig::default();
/// let builder = DiagramBuilder::new(config);
///
/// // Read notation into a diagram
/// let diagram = builder.parse(source)
///     .expect("Failed to parse");
///
/// // And write it back
/// let text = builder.render(&diagram);
/// assert!(text.contains("component \"App\" as app <<nodejs>>"));
///
/// // Or use default config
/// let builder = DiagramBuilder::default();
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including palette and export settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the node palette selected by the configuration.
    pub fn palette(&self) -> Palette {
        self.config.palette().build()
    }

    /// Load a saved JSON document into a diagram.
    ///
    /// # Errors
    ///
    /// Returns `UmlSketchError::Document` for malformed JSON and
    /// `UmlSketchError::Graph` for duplicate node or edge ids.
    pub fn load_document(&self, json: &str) -> Result<Diagram, UmlSketchError> {
        info!("Loading document");

        let document = Document::from_json(json)?;
        self.open(&document)
    }

    /// Build a diagram from an already loaded document.
    ///
    /// # Errors
    ///
    /// Returns `UmlSketchError::Graph` for duplicate node or edge ids.
    pub fn open(&self, document: &Document) -> Result<Diagram, UmlSketchError> {
        let diagram = document.to_diagram()?;

        self.log_unknown_kinds(&diagram);
        trace!(diagram:?; "Loaded diagram");

        Ok(diagram)
    }

    /// Parse component notation into a diagram.
    ///
    /// # Errors
    ///
    /// Returns `UmlSketchError::Parse` carrying every diagnostic the reader
    /// found, together with the source for error reporting.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use umlsketch::DiagramBuilder;
    ///
    /// let builder = DiagramBuilder::default();
    /// assert!(builder.parse("component \"A\" as a").is_err());
    /// ```
    pub fn parse(&self, source: &str) -> Result<Diagram, UmlSketchError> {
        info!("Parsing diagram");

        let diagram = umlsketch_parser::parse(source).map_err(|err| {
            debug!(errors = err.error_count(); "Diagram could not be read");
            UmlSketchError::new_parse_error(err, source)
        })?;

        debug!("Diagram parsed successfully");
        self.log_unknown_kinds(&diagram);
        trace!(diagram:?; "Parsed diagram");

        Ok(diagram)
    }

    /// Render a diagram as component notation.
    pub fn render(&self, diagram: &Diagram) -> String {
        info!(
            nodes = diagram.nodes().len(),
            edges = diagram.edges().len();
            "Rendering notation"
        );
        export::serialize_diagram(diagram)
    }

    /// Render a diagram as a named JSON document.
    ///
    /// # Errors
    ///
    /// Returns `UmlSketchError::Document` if JSON serialization fails.
    pub fn render_document(&self, name: &str, diagram: &Diagram) -> Result<String, UmlSketchError> {
        info!(name; "Rendering document");
        Document::from_diagram(name, diagram).to_json_pretty()
    }

    /// Write `diagram` back over a saved document.
    ///
    /// The saved name is kept, and nodes that were already on the canvas keep
    /// their canvas type and position.
    ///
    /// # Errors
    ///
    /// Returns `UmlSketchError::Document` if JSON serialization fails.
    pub fn update_document(
        &self,
        saved: &Document,
        diagram: &Diagram,
    ) -> Result<String, UmlSketchError> {
        info!(name = saved.name(); "Updating document");
        Document::from_diagram(saved.name(), diagram)
            .with_layout_from(saved)
            .to_json_pretty()
    }

    /// Compose the chat prompt for a question about `diagram`.
    ///
    /// # Errors
    ///
    /// Returns `UmlSketchError::Chat` if `message` is blank.
    pub fn chat_prompt(&self, message: &str, diagram: &Diagram) -> Result<String, UmlSketchError> {
        let request = ChatRequest::new(message).with_context(self.render(diagram));
        request.validate()?;
        Ok(request.prompt())
    }

    fn log_unknown_kinds(&self, diagram: &Diagram) {
        let palette = self.palette();
        for node in diagram.nodes() {
            if !node.kind().is_empty() && !palette.contains(node.kind()) {
                debug!(node = node.id().as_string(), kind = node.kind(); "Node kind not in palette");
            }
        }
    }
}
