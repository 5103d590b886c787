//! Column layouts of the supported bank exports

use serde::{Deserialize, Serialize};

/// Header of the booking date column, shared by all known exports
pub const DATE_COLUMN: &str = "Buchungstag";

/// Header of the amount column, shared by all known exports
pub const AMOUNT_COLUMN: &str = "Betrag";

/// Known bank export layouts.
///
/// They only differ in how the counterparty column is named. The lookup order
/// of [`SchemaVariant::LOOKUP_ORDER`] decides which column wins when a file
/// carries more than one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaVariant {
    /// Sparkasse CSV-CAMT export
    Sparkasse,
    /// Commerzbank account export
    Commerzbank,
    /// Volksbank / Raiffeisenbank export
    Volksbank,
}

impl SchemaVariant {
    /// Variants in the order their counterparty column is looked up
    pub const LOOKUP_ORDER: [SchemaVariant; 3] = [
        SchemaVariant::Sparkasse,
        SchemaVariant::Commerzbank,
        SchemaVariant::Volksbank,
    ];

    /// Header of the counterparty column in this layout
    pub fn counterparty_column(&self) -> &'static str {
        match self {
            SchemaVariant::Sparkasse => "Beguenstigter/Zahlungspflichtiger",
            SchemaVariant::Commerzbank => "Begünstigter / Auftraggeber",
            SchemaVariant::Volksbank => "Name Zahlungsbeteiligter",
        }
    }
}

/// Column positions resolved from one header row
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnMap {
    /// Position of the `Buchungstag` column, if present
    pub date: Option<usize>,
    /// Position of the `Betrag` column, if present
    pub amount: Option<usize>,
    /// Counterparty columns present in the header, in lookup order
    pub counterparty: Vec<(SchemaVariant, usize)>,
}

impl ColumnMap {
    /// Resolve columns from header names. Names are trimmed before matching.
    pub fn resolve<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let headers: Vec<&str> = headers.into_iter().map(str::trim).collect();
        let position = |name: &str| headers.iter().position(|h| *h == name);

        let counterparty = SchemaVariant::LOOKUP_ORDER
            .iter()
            .filter_map(|variant| position(variant.counterparty_column()).map(|idx| (*variant, idx)))
            .collect();

        Self {
            date: position(DATE_COLUMN),
            amount: position(AMOUNT_COLUMN),
            counterparty,
        }
    }

    /// Variants whose counterparty column was found, in lookup order
    pub fn detected_variants(&self) -> Vec<SchemaVariant> {
        self.counterparty.iter().map(|(variant, _)| *variant).collect()
    }

    /// Date field of a row, empty when the column or the field is missing
    pub fn date_field<'r>(&self, fields: &[&'r str]) -> &'r str {
        field(fields, self.date).unwrap_or("")
    }

    /// Amount field of a row, empty when the column or the field is missing
    pub fn amount_field<'r>(&self, fields: &[&'r str]) -> &'r str {
        field(fields, self.amount).unwrap_or("")
    }

    /// First non-empty counterparty field in lookup order
    pub fn counterparty_field<'r>(&self, fields: &[&'r str]) -> &'r str {
        self.counterparty
            .iter()
            .filter_map(|(_, idx)| field(fields, Some(*idx)))
            .find(|value| !value.is_empty())
            .unwrap_or("")
    }
}

fn field<'r>(fields: &[&'r str], idx: Option<usize>) -> Option<&'r str> {
    idx.and_then(|i| fields.get(i).copied())
}
