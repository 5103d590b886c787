//! Bank statement conversion example

use ledger_sheet::{
    render::summary_rows, ConversionOptions, Converter, OutputFormat, PdfRenderer,
};

const EXPORT: &str = "\
Buchungstag;Valutadatum;Beguenstigter/Zahlungspflichtiger;Verwendungszweck;Betrag;Waehrung
15.01.2024;15.01.2024;Stadtwerke Musterstadt;Abschlag Strom;-84,00;EUR
02.01.2024;02.01.2024;Mitgliedsbeitraege;Beitrag Januar;1.250,00;EUR
05.01.2024;05.01.2024;Buero & Papier GmbH;Rechnung 2024-001;-37,45;EUR
kein Datum;;Unbekannt;;12,00;EUR
31.01.2024;31.01.2024;Kontofuehrung;Entgelt;-4,90;EUR
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Ledger Sheet - Bank Statement Conversion Example\n");

    // 1. Build the ledger and look at its pages
    println!("📊 Reading the export...");
    let options = ConversionOptions::new(OutputFormat::Latex).with_title("Vereinskasse 2024");
    let converter = Converter::new(&options);
    let (ledger, stats) = converter.build_ledger(EXPORT.as_bytes())?;

    println!("  ✓ Encoding: {}", stats.encoding);
    println!("  ✓ Transactions: {}", ledger.transaction_count());
    println!("  ✓ Dropped rows: {}", stats.dropped_rows);
    for transaction in ledger.transactions() {
        println!(
            "    {} {:<28} {:>10}",
            transaction.date, transaction.counterparty, transaction.amount
        );
    }
    println!();

    // 2. Page summary as it will be printed
    println!("📄 Page summary:");
    for row in summary_rows(&ledger) {
        println!(
            "  {:<8} {:>12} {:>12}",
            row.label, row.totals.income, row.totals.expense
        );
    }
    println!();

    // 3. Render LaTeX source
    println!("📝 Rendering LaTeX...");
    let mut tex = Vec::new();
    let report = converter.convert(EXPORT.as_bytes(), &mut tex)?;
    println!(
        "  ✓ {} page(s), {} bytes of {}",
        report.pages, report.bytes_written, report.format
    );
    println!();

    // 4. Plan the PDF layout
    println!("🖨️  Planning PDF sheets...");
    let sheets = PdfRenderer::new("Vereinskasse 2024").layout(&ledger);
    for sheet in &sheets {
        println!("  ✓ Sheet {}: {} text item(s)", sheet.number, sheet.texts().count());
    }

    println!("\n✅ Conversion complete!");
    Ok(())
}
