//! `stubgen index` - inspect class-name resolution for a schema.

use std::collections::BTreeMap;
use std::path::Path;

/// Print the resolution index as a JSON object of dotted module paths,
/// sorted by class name.
pub fn cmd_index(schema: &Path) -> anyhow::Result<()> {
    let tree = super::load_schema(schema)?;
    let index = stubgen_emit::build_index(&tree);

    let dotted: BTreeMap<String, String> = index
        .into_iter()
        .map(|(name, path)| (name, path.join(".")))
        .collect();
    println!("{}", serde_json::to_string_pretty(&dotted)?);
    Ok(())
}
