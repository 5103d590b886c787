//! Traits for pluggable output back ends

use crate::ledger::Ledger;
use crate::types::*;

/// A back end that turns a [`Ledger`] into a finished document
///
/// Implementations must take every number from the ledger and never
/// recompute totals, so that all back ends agree. Adding a new output format
/// means adding an implementation of this trait; parsing and totals stay
/// untouched.
pub trait DocumentRenderer {
    /// Format this renderer produces
    fn format(&self) -> OutputFormat;

    /// Render the complete document into memory
    fn render(&self, ledger: &Ledger) -> ConvertResult<Vec<u8>>;
}

impl<R: DocumentRenderer + ?Sized> DocumentRenderer for Box<R> {
    fn format(&self) -> OutputFormat {
        (**self).format()
    }

    fn render(&self, ledger: &Ledger) -> ConvertResult<Vec<u8>> {
        (**self).render(ledger)
    }
}
