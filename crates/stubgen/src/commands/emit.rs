//! `stubgen emit` - write the declaration-stub tree for a schema.

use std::path::Path;

use anyhow::Context;

/// Emit one `.pyi` unit per class and per module under `out`.
pub fn cmd_emit(schema: &Path, out: &Path) -> anyhow::Result<()> {
    let tree = super::load_schema(schema)?;
    let index = stubgen_emit::build_index(&tree);
    let written = stubgen_emit::emit_tree(&tree, out, &index)
        .with_context(|| format!("emitting stubs under {}", out.display()))?;
    println!("wrote {} declaration units under {}", written.len(), out.display());
    Ok(())
}
