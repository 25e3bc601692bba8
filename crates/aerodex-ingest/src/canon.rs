//! Header canonicalization: mapping arbitrary, aliased column labels onto the
//! fixed canonical field set.
//!
//! Matching is case-insensitive and whitespace/underscore-insensitive but
//! otherwise exact — no fuzzy matching here. (The loose substring matcher for
//! filter tokens lives in `aerodex-model::facets` and is a different,
//! lower-stakes operation.)

use std::collections::HashMap;

/// One key of the fixed target schema every source column is mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonicalField {
    CompanyName,
    CompanyAddress,
    CompanyWebsite,
    Description,
    Latitude,
    Longitude,
    Domain,
    TypeOfStakeholder,
    Stakeholder,
    FederalStates,
    MunichAerospace,
    Comments,
    HardwareSoftware,
    SupportServices,
    ApplicationsEndUsers,
    ResearchEducation,
    GovClustersAssoc,
    ManufacturersDevelopers,
}

impl CanonicalField {
    /// All fields, in alias-resolution priority order.
    pub const ALL: [CanonicalField; 18] = [
        CanonicalField::CompanyName,
        CanonicalField::CompanyAddress,
        CanonicalField::CompanyWebsite,
        CanonicalField::Description,
        CanonicalField::Latitude,
        CanonicalField::Longitude,
        CanonicalField::Domain,
        CanonicalField::TypeOfStakeholder,
        CanonicalField::Stakeholder,
        CanonicalField::FederalStates,
        CanonicalField::MunichAerospace,
        CanonicalField::Comments,
        CanonicalField::HardwareSoftware,
        CanonicalField::SupportServices,
        CanonicalField::ApplicationsEndUsers,
        CanonicalField::ResearchEducation,
        CanonicalField::GovClustersAssoc,
        CanonicalField::ManufacturersDevelopers,
    ];

    /// The fields a header row must resolve before it qualifies as a header.
    pub const MANDATORY: [CanonicalField; 3] = [
        CanonicalField::CompanyName,
        CanonicalField::Latitude,
        CanonicalField::Longitude,
    ];

    /// Accepted label variants, already normalized (lowercase, single
    /// spaces), in declared priority order: the first variant present in a
    /// row wins.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CanonicalField::CompanyName => &["company name", "name"],
            CanonicalField::CompanyAddress => &["company address", "address"],
            CanonicalField::CompanyWebsite => &["company website", "website", "web"],
            CanonicalField::Description => &["description", "desc"],
            CanonicalField::Latitude => &["latitude", "lat"],
            CanonicalField::Longitude => &["longitude", "lng", "lon"],
            CanonicalField::Domain => &["domain"],
            CanonicalField::TypeOfStakeholder => &["type of stakeholder"],
            CanonicalField::Stakeholder => &["stakeholder"],
            CanonicalField::FederalStates => {
                &["federal states", "federal state", "state", "bundesland"]
            }
            CanonicalField::MunichAerospace => &["munich aerospace"],
            CanonicalField::Comments => &["comments", "comment", "notes", "note"],
            CanonicalField::HardwareSoftware => {
                &["hardware/software", "hardware / software", "hardwaresoftware"]
            }
            CanonicalField::SupportServices => &[
                "aerospace support & enabling services",
                "support & enabling services",
                "support services",
            ],
            CanonicalField::ApplicationsEndUsers => &[
                "aerospace applications & end-users",
                "applications & end-users",
                "applications",
            ],
            CanonicalField::ResearchEducation => &["research & education", "research", "education"],
            CanonicalField::GovClustersAssoc => &[
                "government, clusters & associations",
                "clusters & associations",
                "associations",
            ],
            CanonicalField::ManufacturersDevelopers => &[
                "manufacturers & developers",
                "manufacturers/developers",
                "manufacturers",
                "developers",
            ],
        }
    }

    /// The exact column label external row-extraction callers see for this
    /// field. Also accepted on input as a passthrough synonym.
    pub fn output_label(self) -> &'static str {
        match self {
            CanonicalField::CompanyName => "Company_Name",
            CanonicalField::CompanyAddress => "Company_Address",
            CanonicalField::CompanyWebsite => "Company_Website",
            CanonicalField::Description => "Description",
            CanonicalField::Latitude => "Latitude",
            CanonicalField::Longitude => "Longitude",
            CanonicalField::Domain => "Domain",
            CanonicalField::TypeOfStakeholder => "Type_of_Stakeholder",
            CanonicalField::Stakeholder => "Stakeholder",
            CanonicalField::FederalStates => "Federal States",
            CanonicalField::MunichAerospace => "Munich Aerospace",
            CanonicalField::Comments => "Comments",
            CanonicalField::HardwareSoftware => "Hardware/Software",
            CanonicalField::SupportServices => "Aerospace Support & Enabling Services",
            CanonicalField::ApplicationsEndUsers => "Aerospace Applications & End-Users",
            CanonicalField::ResearchEducation => "Research & Education",
            CanonicalField::GovClustersAssoc => "Government, Clusters & Associations",
            CanonicalField::ManufacturersDevelopers => "Manufacturers & Developers",
        }
    }
}

/// Normalize a raw column label for comparison: lowercase, with every run of
/// whitespace or underscores collapsed to a single space, trimmed.
pub fn normalize_label(raw: &str) -> String {
    raw.to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve an already-normalized label to a canonical field.
///
/// Alias lists are tried in [`CanonicalField::ALL`] order, so a label that
/// coincidentally appeared in two lists would feed the first field tried.
/// Exact canonical output labels are accepted as a second, lower-priority
/// pass.
pub fn resolve_label(label: &str) -> Option<CanonicalField> {
    for field in CanonicalField::ALL {
        if field.aliases().iter().any(|variant| *variant == label) {
            return Some(field);
        }
    }
    CanonicalField::ALL
        .into_iter()
        .find(|field| normalize_label(field.output_label()) == label)
}

/// A scalar cell value as decoded from the sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellScalar {
    Text(String),
    Number(f64),
}

impl CellScalar {
    /// The cell rendered as trimmed text; `None` when it trims to empty.
    pub fn text(&self) -> Option<String> {
        match self {
            CellScalar::Text(s) => {
                let t = s.trim();
                (!t.is_empty()).then(|| t.to_owned())
            }
            CellScalar::Number(n) => Some(n.to_string()),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text().is_none()
    }
}

/// An unordered mapping from original column label to cell value, as decoded
/// from one sheet row. Ephemeral; discarded after canonicalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, CellScalar)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, value: CellScalar) {
        self.cells.push((label.into(), value));
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<L: Into<String>> FromIterator<(L, CellScalar)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (L, CellScalar)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(label, value)| (label.into(), value))
                .collect(),
        }
    }
}

/// A row keyed by canonical field, not yet normalized (values are still raw
/// cell scalars, multi-value strings unsplit).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalRow {
    cells: std::collections::BTreeMap<CanonicalField, CellScalar>,
}

impl CanonicalRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: CanonicalField, value: CellScalar) {
        self.cells.insert(field, value);
    }

    pub fn get(&self, field: CanonicalField) -> Option<&CellScalar> {
        self.cells.get(&field)
    }

    /// The field's trimmed text content; `None` when unset or blank.
    pub fn text(&self, field: CanonicalField) -> Option<String> {
        self.get(field).and_then(CellScalar::text)
    }

    /// True when every value is empty after trimming. Such rows are dropped
    /// by both extraction strategies.
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(CellScalar::is_blank)
    }

    /// The row under the exact output labels external callers expect
    /// (`Company_Name`, `Federal States`, ...).
    pub fn labeled(&self) -> impl Iterator<Item = (&'static str, &CellScalar)> {
        self.cells
            .iter()
            .map(|(field, value)| (field.output_label(), value))
    }
}

/// Canonicalize one raw row.
///
/// For each canonical field, its alias variants are scanned in declared order
/// and the first matching column's value is copied. A source column feeds at
/// most one field. Columns whose normalized label equals a canonical output
/// label are copied in a second pass and never overwrite an alias match.
/// Missing columns simply leave the field unset; there is no error path.
pub fn canonicalize_row(row: &RawRow) -> CanonicalRow {
    // Normalized label -> index of the first column carrying it.
    let mut by_label: HashMap<String, usize> = HashMap::new();
    for (idx, (label, _)) in row.cells.iter().enumerate() {
        by_label.entry(normalize_label(label)).or_insert(idx);
    }

    let mut consumed = vec![false; row.cells.len()];
    let mut out = CanonicalRow::new();

    for field in CanonicalField::ALL {
        for variant in field.aliases() {
            if let Some(&idx) = by_label.get(*variant) {
                if !consumed[idx] {
                    consumed[idx] = true;
                    out.set(field, row.cells[idx].1.clone());
                    break;
                }
            }
        }
    }

    for field in CanonicalField::ALL {
        if out.get(field).is_some() {
            continue;
        }
        if let Some(&idx) = by_label.get(&normalize_label(field.output_label())) {
            if !consumed[idx] {
                consumed[idx] = true;
                out.set(field, row.cells[idx].1.clone());
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> CellScalar {
        CellScalar::Text(s.to_owned())
    }

    #[test]
    fn canonicalization_is_idempotent() {
        let row: RawRow = vec![
            ("Company Name", text("Acme Space")),
            ("LAT", CellScalar::Number(48.1)),
            ("Random Column", text("noise")),
        ]
        .into_iter()
        .collect();

        let first = canonicalize_row(&row);
        let second = canonicalize_row(&row);
        assert_eq!(first, second);
        assert_eq!(first.text(CanonicalField::CompanyName).as_deref(), Some("Acme Space"));
        assert_eq!(first.get(CanonicalField::Latitude), Some(&CellScalar::Number(48.1)));
    }

    #[test]
    fn every_alias_variant_resolves_like_the_primary_label() {
        for field in CanonicalField::ALL {
            let primary = field.aliases()[0];
            let via_primary = canonicalize_row(
                &vec![(primary, text("value"))].into_iter().collect::<RawRow>(),
            );
            for variant in field.aliases() {
                // Scramble casing and padding; matching must not care.
                let label = format!("  {} ", variant.to_uppercase());
                let row: RawRow = vec![(label, text("value"))].into_iter().collect();
                let canon = canonicalize_row(&row);
                assert_eq!(
                    canon, via_primary,
                    "variant {variant:?} of {field:?} diverged from primary"
                );
            }
        }
    }

    #[test]
    fn underscores_count_as_whitespace() {
        let row: RawRow =
            vec![("Type_of_Stakeholder", text("Industry"))].into_iter().collect();
        let canon = canonicalize_row(&row);
        assert_eq!(
            canon.text(CanonicalField::TypeOfStakeholder).as_deref(),
            Some("Industry")
        );
    }

    #[test]
    fn first_variant_in_declared_order_wins() {
        // "latitude" precedes "lat" in the alias list, regardless of column order.
        let row: RawRow = vec![
            ("lat", CellScalar::Number(1.0)),
            ("Latitude", CellScalar::Number(2.0)),
        ]
        .into_iter()
        .collect();
        let canon = canonicalize_row(&row);
        assert_eq!(canon.get(CanonicalField::Latitude), Some(&CellScalar::Number(2.0)));
    }

    #[test]
    fn duplicate_labels_use_the_first_column() {
        // Duplicate normalized labels: only the first column is consumed.
        let row: RawRow = vec![
            ("Domain", text("Space")),
            ("DOMAIN", text("Aviation")),
        ]
        .into_iter()
        .collect();
        let canon = canonicalize_row(&row);
        assert_eq!(canon.text(CanonicalField::Domain).as_deref(), Some("Space"));
    }

    #[test]
    fn missing_columns_stay_unset() {
        let row: RawRow = vec![("Company Name", text("Solo"))].into_iter().collect();
        let canon = canonicalize_row(&row);
        assert_eq!(canon.get(CanonicalField::Latitude), None);
        assert_eq!(canon.get(CanonicalField::Comments), None);
        assert!(!canon.is_blank());
    }

    #[test]
    fn output_labels_round_trip_through_resolve() {
        for field in CanonicalField::ALL {
            assert_eq!(
                resolve_label(&normalize_label(field.output_label())),
                Some(field),
                "output label of {field:?} must resolve to itself"
            );
        }
    }

    #[test]
    fn labeled_view_uses_exact_output_labels() {
        let row: RawRow = vec![
            ("name", text("Acme")),
            ("federal state", text("Bavaria")),
        ]
        .into_iter()
        .collect();
        let canon = canonicalize_row(&row);
        let labels: Vec<&str> = canon.labeled().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["Company_Name", "Federal States"]);
    }
}
