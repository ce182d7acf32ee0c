use crate::io::parser::{parse_program, ParseError};
use crate::io::printer::render_program;
use crate::program_transformations::assembler::apply_magic_set_transformation;
use log::{debug, info};
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("the file '{path}' was not found")]
    NotFound { path: String },
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: String },
    #[error("error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Reads a program file, skipping comment (`%`) and blank lines the way the
/// reference reader does. Distinguishes not-found and permission errors from
/// other I/O failures so the CLI can report them without a backtrace.
pub fn read_program_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => CliError::NotFound {
            path: path.display().to_string(),
        },
        io::ErrorKind::PermissionDenied => CliError::PermissionDenied {
            path: path.display().to_string(),
        },
        _ => CliError::Io {
            path: path.display().to_string(),
            source,
        },
    })
}

/// Parses the program at `path`, applies the magic set rewrite, and renders
/// the result back to surface syntax. `greedy_binding_order` mirrors the
/// CLI's `--greedy-binding-order` flag.
pub fn run(path: &Path, greedy_binding_order: bool) -> Result<String, CliError> {
    info!("reading program from {}", path.display());
    let source = read_program_file(path)?;

    let program = parse_program(&source)?;
    debug!(
        "parsed {} fact(s), {} rule(s)",
        program.facts.len(),
        program.rules.len()
    );

    let transformed = apply_magic_set_transformation(&program, greedy_binding_order);
    info!(
        "rewrite produced {} fact(s), {} rule(s)",
        transformed.facts.len(),
        transformed.rules.len()
    );

    Ok(render_program(&transformed))
}
