//! Conversion entry point: bank export bytes in, ledger document out

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::import::{read_transactions, TextEncoding};
use crate::ledger::{Ledger, LedgerBuilder};
use crate::render::{renderer_for, DEFAULT_TITLE};
use crate::traits::DocumentRenderer;
use crate::types::*;

/// Options for one conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Output document format
    pub format: OutputFormat,
    /// Title printed at the top of the document
    pub title: String,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl ConversionOptions {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// What a successful conversion produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub format: OutputFormat,
    pub encoding: TextEncoding,
    /// Transactions that made it into the ledger
    pub transactions: usize,
    /// Rows dropped because their booking date could not be parsed
    pub dropped_rows: usize,
    pub pages: usize,
    pub income_total: BigDecimal,
    pub expense_total: BigDecimal,
    /// Size of the written document in bytes
    pub bytes_written: usize,
}

/// Runs the import, ledger and render stages for one input.
///
/// Holds no state between calls; one converter can serve any number of
/// conversions.
pub struct Converter {
    renderer: Box<dyn DocumentRenderer>,
}

impl Converter {
    /// Create a converter for the given options
    pub fn new(options: &ConversionOptions) -> Self {
        Self {
            renderer: renderer_for(options.format, &options.title),
        }
    }

    /// Create a converter around a custom renderer
    pub fn with_renderer(renderer: Box<dyn DocumentRenderer>) -> Self {
        Self { renderer }
    }

    /// Build the ledger for an export without rendering it
    pub fn build_ledger<R: Read>(&self, mut input: R) -> ConvertResult<(Ledger, ImportStats)> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;

        let outcome = read_transactions(&bytes)?;
        let stats = ImportStats {
            encoding: outcome.encoding,
            dropped_rows: outcome.dropped_rows,
        };
        let ledger = LedgerBuilder::new().extend(outcome.transactions).build();
        Ok((ledger, stats))
    }

    /// Convert an export read from `input` into a document written to `output`.
    ///
    /// Nothing is written unless the whole document rendered successfully.
    pub fn convert<R: Read, W: Write>(
        &self,
        input: R,
        mut output: W,
    ) -> ConvertResult<ConversionReport> {
        let format = self.renderer.format();
        let (ledger, stats) = self.build_ledger(input)?;

        let document = self.renderer.render(&ledger)?;
        output
            .write_all(&document)
            .and_then(|_| output.flush())
            .map_err(|e| ConvertError::render(format, format!("writing output failed: {}", e)))?;

        let report = ConversionReport {
            format,
            encoding: stats.encoding,
            transactions: ledger.transaction_count(),
            dropped_rows: stats.dropped_rows,
            pages: ledger.page_count(),
            income_total: ledger.income_total().clone(),
            expense_total: ledger.expense_total().clone(),
            bytes_written: document.len(),
        };

        log::info!(
            "converted {} transaction(s) into {} page(s) as {} ({} row(s) dropped)",
            report.transactions,
            report.pages,
            report.format,
            report.dropped_rows
        );
        Ok(report)
    }
}

/// Import details that do not end up in the ledger itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    pub encoding: TextEncoding,
    pub dropped_rows: usize,
}

/// Convert one export with default options for the given format
pub fn convert<R: Read, W: Write>(
    input: R,
    output: W,
    format: OutputFormat,
) -> ConvertResult<ConversionReport> {
    Converter::new(&ConversionOptions::new(format)).convert(input, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
Buchungstag;Beguenstigter/Zahlungspflichtiger;Betrag
03.01.2024;Kunde;1.000,00
kaputt;Niemand;5,00
01.01.2024;Vermieter;-750,00
";

    #[test]
    fn test_convert_reports_counts_and_totals() {
        let mut out = Vec::new();
        let report = convert(EXPORT.as_bytes(), &mut out, OutputFormat::Latex).unwrap();

        assert_eq!(report.transactions, 2);
        assert_eq!(report.dropped_rows, 1);
        assert_eq!(report.pages, 1);
        assert_eq!(report.encoding, TextEncoding::Utf8);
        assert_eq!(report.income_total, BigDecimal::from(1000));
        assert_eq!(report.expense_total, BigDecimal::from(750));
        assert_eq!(report.bytes_written, out.len());

        let tex = String::from_utf8(out).unwrap();
        let rent = tex.find("Vermieter").unwrap();
        let customer = tex.find("Kunde").unwrap();
        assert!(rent < customer);
    }

    #[test]
    fn test_encoding_error_writes_nothing() {
        let mut out = Vec::new();
        let err = convert(&b"Buchungstag;Betrag\n01.01.2024;\x00\n"[..], &mut out, OutputFormat::Pdf)
            .unwrap_err();
        assert!(matches!(err, ConvertError::Encoding(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_windows_bytes_in_latin9_export_still_convert() {
        let mut out = Vec::new();
        let report = convert(
            &b"Buchungstag;Beguenstigter/Zahlungspflichtiger;Betrag\n01.03.2024;M\xFCller \x80;-1,00\n"[..],
            &mut out,
            OutputFormat::Latex,
        )
        .unwrap();
        assert_eq!(report.encoding, TextEncoding::Latin9);
        assert_eq!(report.transactions, 1);
        assert!(String::from_utf8(out).unwrap().contains("Müller \u{80}"));
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_is_a_render_error() {
        let err = convert(EXPORT.as_bytes(), FailingSink, OutputFormat::Latex).unwrap_err();
        match err {
            ConvertError::Render { format, message } => {
                assert_eq!(format, OutputFormat::Latex);
                assert!(message.contains("disk full"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_custom_title() {
        let options = ConversionOptions::new(OutputFormat::Latex).with_title("Vereinskasse");
        let mut out = Vec::new();
        Converter::new(&options)
            .convert(EXPORT.as_bytes(), &mut out)
            .unwrap();
        assert!(String::from_utf8(out).unwrap().contains(r"\LARGE Vereinskasse"));
    }
}
