//! Example: Creating a diagram from the model
//!
//! This example builds a diagram with the editing operations, without
//! loading a document or parsing notation, and prints it in both formats.

use umlsketch::{DiagramBuilder, diagram::Diagram};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let builder = DiagramBuilder::default();
    let palette = builder.palette();

    let mut diagram = Diagram::new();

    // Place nodes from the palette; ids are generated from the kind
    let web = diagram.place("nextjs", &palette);
    let api = diagram.place("nodejs", &palette);
    let db = diagram.place("postgresql", &palette);
    let cache = diagram.place("redis", &palette);

    diagram.connect(web, api)?;
    diagram.connect(api, db)?;
    diagram.connect(api, cache)?;

    // Connecting the same pair twice is ignored
    assert_eq!(diagram.connect(api, db)?, None);

    diagram.relabel(api, "Orders API")?;

    // Deleting a node takes its edges with it
    diagram.remove_node(cache);

    println!("{}", builder.render(&diagram));
    println!("{}", builder.render_document("Orders", &diagram)?);

    Ok(())
}
