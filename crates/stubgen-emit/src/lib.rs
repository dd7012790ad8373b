//! Declaration-stub emission for walked schema trees.
//!
//! Two stages: [`resolver::build_index`] computes where every class lives
//! in the module hierarchy, then [`emit_tree`] mirrors that hierarchy on
//! disk as one directory per module, one `<Class>.pyi` unit per class and
//! an `__init__.pyi` aggregator per module:
//!
//! ```text
//! Live/
//!   __init__.pyi
//!   Song.pyi
//!   MidiMap/
//!     __init__.pyi
//! ```
//!
//! Emission is pure per unit (see [`emit_class`] / [`emit_module`]) and
//! idempotent over the whole tree: re-emitting an unchanged schema
//! produces byte-identical files.

pub mod python;
pub mod resolver;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use stubgen_schema::{Class, Module};

pub use python::PyiWriter;
pub use resolver::{build_index, ClassIndex};

/// Errors surfaced while writing declaration units to disk.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("failed to write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Render one class unit. Returns the unit's path relative to the output
/// root together with its text; `containing_path` is the hierarchy path of
/// the module that declares the class, walk root first.
pub fn emit_class(class: &Class, containing_path: &[String], index: &ClassIndex) -> (PathBuf, String) {
    let mut path: PathBuf = containing_path.iter().collect();
    path.push(format!("{}.pyi", class.name));
    (path, PyiWriter::class_unit(class, index))
}

/// Render the aggregating unit for a module at the given hierarchy path.
pub fn emit_module(module: &Module, path: &[String]) -> (PathBuf, String) {
    let mut file: PathBuf = path.iter().collect();
    file.push("__init__.pyi");
    (file, PyiWriter::module_unit(module))
}

/// Emit the whole tree under `out_root`, creating directories as needed.
/// Returns the absolute paths of every unit written. Existing files are
/// overwritten in place.
pub fn emit_tree(root: &Module, out_root: &Path, index: &ClassIndex) -> Result<Vec<PathBuf>, EmitError> {
    let mut written = Vec::new();
    let mut segments = vec![root.name.clone()];
    emit_into(root, &mut segments, out_root, index, &mut written)?;
    Ok(written)
}

fn emit_into(
    module: &Module,
    segments: &mut Vec<String>,
    out_root: &Path,
    index: &ClassIndex,
    written: &mut Vec<PathBuf>,
) -> Result<(), EmitError> {
    let dir: PathBuf = out_root.join(segments.iter().collect::<PathBuf>());
    fs::create_dir_all(&dir).map_err(|source| EmitError::Io {
        path: dir.clone(),
        source,
    })?;

    for class in module.classes() {
        let (relative, text) = emit_class(class, segments, index);
        write_unit(out_root, &relative, &text, written)?;
    }

    let (relative, text) = emit_module(module, segments);
    write_unit(out_root, &relative, &text, written)?;

    for submodule in module.submodules() {
        segments.push(submodule.name.clone());
        emit_into(submodule, segments, out_root, index, written)?;
        segments.pop();
    }
    Ok(())
}

fn write_unit(
    out_root: &Path,
    relative: &Path,
    text: &str,
    written: &mut Vec<PathBuf>,
) -> Result<(), EmitError> {
    let path = out_root.join(relative);
    fs::write(&path, text).map_err(|source| EmitError::Io {
        path: path.clone(),
        source,
    })?;
    debug!(unit = %path.display(), bytes = text.len(), "wrote declaration unit");
    written.push(path);
    Ok(())
}
