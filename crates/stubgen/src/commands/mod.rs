//! CLI command implementations - one command per file.

pub mod emit;
pub mod index;
pub mod sig;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;

use stubgen_schema::Module;

#[derive(Subcommand)]
pub enum Command {
    /// Emit a declaration-stub tree from a schema file
    Emit {
        /// Serialized schema tree (JSON), as captured by a host walk
        schema: PathBuf,

        /// Directory to write the stub tree under
        #[arg(short, long, default_value = "stubs")]
        out: PathBuf,
    },

    /// Print the class-name resolution index for a schema file
    Index {
        /// Serialized schema tree (JSON)
        schema: PathBuf,
    },

    /// Recover a typed signature from a routine's docstring
    Sig {
        /// Routine name recorded in the recovered signature
        name: String,

        /// First-line docstring text; read from stdin when omitted
        doc: Option<String>,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Emit { schema, out } => emit::cmd_emit(&schema, &out),
        Command::Index { schema } => index::cmd_index(&schema),
        Command::Sig { name, doc } => sig::cmd_sig(&name, doc.as_deref()),
    }
}

/// Load and deserialize a schema tree from disk.
pub fn load_schema(path: &Path) -> anyhow::Result<Module> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading schema {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing schema {}", path.display()))
}
