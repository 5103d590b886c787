//! LaTeX back end
//!
//! Produces a `tabularx` ledger per page followed by a page summary. The
//! source is meant to be compiled by an external LaTeX toolchain.

use crate::ledger::Ledger;
use crate::render::sheet::*;
use crate::traits::DocumentRenderer;
use crate::types::*;

const PREAMBLE: &[&str] = &[
    r"\documentclass[a4paper,8pt]{article}",
    r"\usepackage[utf8]{inputenc}",
    r"\usepackage[T1]{fontenc}",
    r"\usepackage[left=1cm,right=2cm,top=2cm,bottom=2cm]{geometry}",
    r"\usepackage{array}",
    r"\usepackage{tabularx}",
    r"\usepackage{makecell}",
    r"\usepackage{helvet}",
    r"\usepackage{hhline}",
    r"\usepackage{arydshln}",
    r"\usepackage{fancyhdr}",
    r"\pagestyle{fancy}",
    r"\renewcommand{\familydefault}{\sfdefault}",
    r"\renewcommand\theadfont{\bfseries}",
    r"\newcolumntype{C}[1]{>{\centering\arraybackslash}p{#1}}",
    r"\newcolumntype{Y}{>{\raggedright\arraybackslash}X}",
    r"\newcommand{\thickhline}{\noalign{\hrule height 1.2pt}}",
    r"\fancyhead{}",
    r"\fancyfoot{}",
];

const TABLE_BEGIN: &str = r"\begin{tabularx}{\textwidth}{!{\vrule width 1.2pt}C{2.6cm}|C{2.6cm}|Y|C{2.6cm}|C{2.6cm}!{\vrule width 1.2pt}}";

const TABLE_SPACING: &str = "\n\\vspace{1cm}\n";

/// Renders a ledger as LaTeX source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatexRenderer {
    title: String,
}

impl Default for LatexRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl LatexRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Render the document as a string
    pub fn render_to_string(&self, ledger: &Ledger) -> String {
        let mut doc = LatexDocument::default();

        for line in PREAMBLE {
            doc.line(line);
        }
        doc.line(&format!(
            r"\fancyhead[C]{{\LARGE {}}}",
            escape_latex(&self.title)
        ));
        doc.line(r"\fancyfoot[C]{\thepage}");
        doc.line(r"\renewcommand{\headrulewidth}{0pt}");

        doc.line(r"\begin{document}");
        doc.line(r"	\vspace{1em}");
        doc.line(r"	\renewcommand{\arraystretch}{1.4}");
        doc.line(r"  \noindent");

        for page in ledger.pages() {
            if page.number > 1 {
                doc.line(TABLE_SPACING);
            }
            write_page_table(&mut doc, &sheet_rows(page), &TotalsRow::for_page(page));
        }

        if !ledger.is_empty() {
            doc.line(TABLE_SPACING);
        }
        write_summary_table(&mut doc, &summary_rows(ledger));

        doc.line(r"\end{document}");
        doc.finish()
    }
}

impl DocumentRenderer for LatexRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Latex
    }

    fn render(&self, ledger: &Ledger) -> ConvertResult<Vec<u8>> {
        let source = self.render_to_string(ledger);
        log::debug!("rendered {} bytes of LaTeX", source.len());
        Ok(source.into_bytes())
    }
}

#[derive(Default)]
struct LatexDocument {
    buf: String,
}

impl LatexDocument {
    fn line(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    fn finish(self) -> String {
        self.buf
    }
}

fn write_page_table(doc: &mut LatexDocument, rows: &[SheetRow], totals: &TotalsRow) {
    doc.line(TABLE_BEGIN);
    doc.line(r"    \thickhline");

    let last = COLUMN_HEADINGS.len() - 1;
    for (idx, heading) in COLUMN_HEADINGS.iter().enumerate() {
        let separator = if idx == last { r" \\ \hline" } else { " &" };
        doc.line(&format!("    {}{}", heading_cell(heading), separator));
    }

    let numbers: Vec<String> = (1..=COLUMN_HEADINGS.len())
        .map(|n| format!(r"\makecell{{\textbf{{{}}}}}", n))
        .collect();
    doc.line(&format!(r"    {} \\ \thickhline", numbers.join(" & ")));

    for row in rows {
        doc.line(&format!(
            r"    & {} & {} & {} & {} \\ \hline",
            row.date,
            escape_latex(&row.counterparty),
            row.income,
            row.expense
        ));
    }

    doc.line(r"    \thickhline");
    doc.line(&format!(
        r"    & & \makecell*[r]{{\textbf{{{}}}}} & \textbf{{{}}} & \textbf{{{}}} \\ \thickhline",
        CARRIED_FORWARD_LABEL, totals.income, totals.expense
    ));
    doc.line(r"\end{tabularx}");
}

fn heading_cell(heading: &ColumnHeading) -> String {
    let mut lines: Vec<String> = heading
        .lines
        .iter()
        .map(|l| format!(r"\textbf{{{}}}", escape_latex(l)))
        .collect();
    lines.extend(
        heading
            .note
            .iter()
            .map(|l| format!(r"{{\scriptsize {}}}", escape_latex(l))),
    );
    format!(r"\makecell[l]{{{}}}", lines.join(r"\\"))
}

fn write_summary_table(doc: &mut LatexDocument, rows: &[SummaryRow]) {
    doc.line(r"\begin{tabular}{|c|c|c|}");
    doc.line(r"    \hline");
    doc.line(&format!(r"    {} \\", SUMMARY_HEADINGS.join(" & ")));
    doc.line(r"    \thickhline");

    let last = rows.len().saturating_sub(1);
    for (idx, row) in rows.iter().enumerate() {
        if idx == last {
            doc.line(r"    \thickhline");
        }
        doc.line(&format!(
            r" {}   & {} & {} \\ \hline",
            row.label, row.totals.income, row.totals.expense
        ));
    }

    doc.line(r"\end{tabular}");
}

/// Escape text for use inside a LaTeX table cell.
///
/// Every character is mapped exactly once, so the backslashes introduced by
/// an escape are never escaped again.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '$' => out.push_str(r"\$"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            '\\' => out.push_str(r"\textbackslash{}"),
            '\r' | '\n' | '\t' => out.push(' '),
            other => out.push(other),
        }
    }
    out
}
