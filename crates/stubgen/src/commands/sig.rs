//! `stubgen sig` - recover one typed signature from docstring text.

use std::io::Read;

use anyhow::Context;

use stubgen_schema::{ScrapedSignature, NO_SIGNATURE};

/// Print the recovered signature, or the sentinel when the docstring does
/// not carry a parseable one.
pub fn cmd_sig(name: &str, doc: Option<&str>) -> anyhow::Result<()> {
    let doc = match doc {
        Some(text) => text.to_string(),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading docstring from stdin")?;
            buffer
        }
    };

    match stubgen_doc_parser::scrape(name, &doc) {
        ScrapedSignature::Recovered(signature) => println!("{signature}"),
        ScrapedSignature::Unavailable => println!("{NO_SIGNATURE}"),
    }
    Ok(())
}
