//! Three-stage fill pipeline
//!
//! This module orchestrates the three stages of filling a template:
//! 1. **Read**: parse the template into a document tree through a codec
//! 2. **Fill**: substitute placeholders in every paragraph of the tree
//! 3. **Write**: serialize the filled tree to the output path
//!
//! Read and write failures are fatal. Substitution problems are local and
//! come back in the [`FillReport`].

use crate::codec::{CodecError, DocumentCodec};
use crate::placeholder::PlaceholderMap;
use crate::walker::{fill_document, FillReport};
use std::path::Path;
use std::time::Instant;
use thiserror::Error;

/// Fill a template file and write the result
///
/// # Parameters
/// * `codec` - Codec used for both reading and writing
/// * `template` - Template document path
/// * `output` - Output path, overwritten if it exists
/// * `values` - Placeholder values
///
/// # Returns
/// * `Ok(FillReport)` - The document was filled and written
/// * `Err(FillError)` - The template could not be read or the output written
pub fn fill_template(
    codec: &dyn DocumentCodec,
    template: &Path,
    output: &Path,
    values: &PlaceholderMap,
) -> Result<FillReport, FillError> {
    let t0 = Instant::now();

    log::info!(
        "Reading {} template from {}",
        codec.name(),
        template.display()
    );
    let mut document = codec.read(template).map_err(FillError::ReadError)?;
    let t_read = t0.elapsed();

    log::info!(
        "Filling {} paragraphs with {} values",
        document.paragraph_count(),
        values.len()
    );
    let report = fill_document(&mut document, values);
    let t_fill = t0.elapsed();

    codec
        .write(&document, output)
        .map_err(FillError::WriteError)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: read={:.1}ms, fill={:.1}ms, write={:.1}ms, total={:.1}ms ({} replacements in {} paragraphs)",
        t_read.as_secs_f64() * 1000.0,
        (t_fill - t_read).as_secs_f64() * 1000.0,
        (t_total - t_fill).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        report.replacements,
        report.paragraphs_rewritten,
    );

    Ok(report)
}

/// Fatal pipeline errors
#[derive(Error, Debug)]
pub enum FillError {
    #[error("Failed to read template: {0}")]
    ReadError(#[source] CodecError),

    #[error("Failed to write output: {0}")]
    WriteError(#[source] CodecError),
}
