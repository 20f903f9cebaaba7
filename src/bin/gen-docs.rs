use anyhow::{Context, Result};
use clap_markdown::help_markdown;
use wakatotal::{block::replace_block, cli::Cli};
use std::fs;

const DOCS_START: &str = "<!-- CLI-DOCS-START -->";
const DOCS_END: &str = "<!-- CLI-DOCS-END -->";

fn main() -> Result<()> {
    let md = help_markdown::<Cli>();

    let readme = fs::read_to_string("README.md").context("README.md missing")?;
    let section = format!("\n{}\n", md.trim_end());
    let new_readme = replace_block(&readme, DOCS_START, DOCS_END, &section)?;

    fs::write("README.md", new_readme).context("Failed to write README.md")?;
    Ok(())
}
