//! Reads permission declarations and prints the assembled models as JSON.
//!
//! Usage: `staticperm-schema <declarations.json>`

use anyhow::{Context, Result};

use staticperm_schema::{BuildOptions, JsonSchemaSource, SchemaSource};

fn main() -> Result<()> {
    staticperm_observability::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: staticperm-schema <declarations.json>")?;
    let options = BuildOptions::from_env();

    let source = JsonSchemaSource::from_path(&path)
        .with_context(|| format!("failed to read declarations from {path}"))?;
    let declarations = source
        .declarations()
        .with_context(|| format!("failed to parse declarations in {path}"))?;

    let mut models = Vec::with_capacity(declarations.len());
    for declaration in &declarations {
        let model = declaration
            .build(options)
            .with_context(|| format!("failed to create model for type '{}'", declaration.type_id))?;
        tracing::info!(
            type_id = %model.type_id(),
            entries = model.guard_table().len(),
            diagnostics = model.diagnostics().len(),
            "model assembled"
        );
        models.push(model);
    }

    println!("{}", serde_json::to_string_pretty(&models)?);
    Ok(())
}
