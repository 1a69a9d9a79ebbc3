//! BOM table types: distributor columns and the parts that reference them.

/// Distributors whose catalog pages can be scraped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Distributor {
    DigiKey,
    Avnet,
}

impl Distributor {
    /// Header name identifying this distributor's order-code column
    pub fn name(&self) -> &'static str {
        match self {
            Distributor::DigiKey => "DigiKey",
            Distributor::Avnet => "Avnet",
        }
    }

    /// Match a header cell against the known distributor names (exact, case-sensitive)
    pub fn from_header(cell: &str) -> Option<Self> {
        Self::all().iter().copied().find(|d| d.name() == cell)
    }

    /// Returns all supported distributors
    pub fn all() -> &'static [Distributor] {
        &[Distributor::DigiKey, Distributor::Avnet]
    }
}

/// A distributor column detected in the input header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributorColumn {
    pub distributor: Distributor,
    /// Position of the column in the input table
    pub source_index: usize,
}

/// One BOM row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub key: String,
    /// Order code per detected distributor column, empty when not stocked
    pub order_codes: Vec<String>,
}

impl Part {
    /// Order code for the distributor column at `column`, `None` when empty
    pub fn order_code(&self, column: usize) -> Option<&str> {
        self.order_codes
            .get(column)
            .map(String::as_str)
            .filter(|code| !code.is_empty())
    }
}

/// Validated input table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BomTable {
    /// Distributor columns in header order
    pub columns: Vec<DistributorColumn>,
    /// Parts in input row order
    pub parts: Vec<Part>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_match_is_exact_and_case_sensitive() {
        assert_eq!(Distributor::from_header("DigiKey"), Some(Distributor::DigiKey));
        assert_eq!(Distributor::from_header("Avnet"), Some(Distributor::Avnet));
        assert_eq!(Distributor::from_header("digikey"), None);
        assert_eq!(Distributor::from_header(" Avnet"), None);
        assert_eq!(Distributor::from_header("DigiKey_Avail"), None);
    }

    #[test]
    fn empty_order_code_reads_as_absent() {
        let part = Part {
            key: "R1".to_string(),
            order_codes: vec!["311-10KGRCT-ND".to_string(), String::new()],
        };
        assert_eq!(part.order_code(0), Some("311-10KGRCT-ND"));
        assert_eq!(part.order_code(1), None);
        assert_eq!(part.order_code(2), None);
    }
}
