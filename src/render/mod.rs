//! Document back ends and the cell model they share

pub mod latex;
pub mod metrics;
pub mod pdf;
pub mod sheet;

pub use latex::*;
pub use pdf::*;
pub use sheet::*;

use crate::traits::DocumentRenderer;
use crate::types::OutputFormat;

/// Renderer for the given format with the given document title
pub fn renderer_for(format: OutputFormat, title: &str) -> Box<dyn DocumentRenderer> {
    match format {
        OutputFormat::Latex => Box::new(LatexRenderer::new(title)),
        OutputFormat::Pdf => Box::new(PdfRenderer::new(title)),
    }
}
