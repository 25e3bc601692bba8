//! Canonical row → [`Record`] normalization.

use std::collections::BTreeSet;

use aerodex_model::{parse_number, split_multi, split_multi_unique, to_id, Record};

use crate::canon::{CanonicalField, CanonicalRow, CellScalar};

/// The multi-value columns whose pieces are unioned into `tags`.
const TAG_COLUMNS: [CanonicalField; 9] = [
    CanonicalField::Domain,
    CanonicalField::TypeOfStakeholder,
    CanonicalField::FederalStates,
    CanonicalField::HardwareSoftware,
    CanonicalField::SupportServices,
    CanonicalField::ApplicationsEndUsers,
    CanonicalField::ResearchEducation,
    CanonicalField::GovClustersAssoc,
    CanonicalField::ManufacturersDevelopers,
];

fn coord(row: &CanonicalRow, field: CanonicalField) -> Option<f64> {
    match row.get(field)? {
        CellScalar::Number(n) => n.is_finite().then_some(*n),
        CellScalar::Text(s) => parse_number(s),
    }
}

fn split_field(row: &CanonicalRow, field: CanonicalField) -> Vec<String> {
    row.text(field).map(|s| split_multi(&s)).unwrap_or_default()
}

/// Produce exactly one record from a canonical row and its positional index
/// within the accepted row set.
///
/// This is a total function: absent or malformed inputs degrade to empty or
/// unset fields, never to a failed row. The identifier depends only on the
/// (possibly defaulted) name, so it is stable across reloads; identically
/// named rows share an id and are not deduplicated here.
pub fn normalize_row(row: &CanonicalRow, index: usize) -> Record {
    let name = row
        .text(CanonicalField::CompanyName)
        .unwrap_or_else(|| format!("Company {}", index + 1));
    let id = {
        let slug = to_id(&name);
        if slug.is_empty() {
            format!("id-{index}")
        } else {
            slug
        }
    };

    let mut tags: BTreeSet<String> = BTreeSet::new();
    for column in TAG_COLUMNS {
        tags.extend(split_field(row, column));
    }
    if let Some(affiliation) = row.text(CanonicalField::MunichAerospace) {
        tags.insert(format!("Munich Aerospace: {affiliation}"));
    }

    let stakeholders = row
        .text(CanonicalField::Stakeholder)
        .map(|s| split_multi_unique(&s))
        .unwrap_or_default();

    let mut record = Record::new(id, name);
    record.address = row.text(CanonicalField::CompanyAddress);
    record.description = row.text(CanonicalField::Description);
    record.website = row.text(CanonicalField::CompanyWebsite);
    record.stakeholder_type = row.text(CanonicalField::TypeOfStakeholder);
    record.domain = row.text(CanonicalField::Domain);
    record.federal_state = row.text(CanonicalField::FederalStates);
    record.comments = row.text(CanonicalField::Comments);
    record.lat = coord(row, CanonicalField::Latitude);
    record.lng = coord(row, CanonicalField::Longitude);
    record.tags = tags.into_iter().collect();
    record.stakeholders = stakeholders;
    record.cat_support = split_field(row, CanonicalField::SupportServices);
    record.cat_applications = split_field(row, CanonicalField::ApplicationsEndUsers);
    record.cat_manufacturers = split_field(row, CanonicalField::ManufacturersDevelopers);
    record.cat_research = split_field(row, CanonicalField::ResearchEducation);
    record.cat_government = split_field(row, CanonicalField::GovClustersAssoc);
    record.cat_hw_sw = split_field(row, CanonicalField::HardwareSoftware);
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(cells: &[(CanonicalField, CellScalar)]) -> CanonicalRow {
        let mut out = CanonicalRow::new();
        for (field, value) in cells {
            out.set(*field, value.clone());
        }
        out
    }

    fn text(s: &str) -> CellScalar {
        CellScalar::Text(s.to_owned())
    }

    #[test]
    fn id_depends_only_on_name() {
        let r = row(&[(CanonicalField::CompanyName, text("Sky-Tech GmbH!!"))]);
        let at_zero = normalize_row(&r, 0);
        let at_five = normalize_row(&r, 5);
        assert_eq!(at_zero.id, "sky-tech-gmbh");
        assert_eq!(at_zero.id, at_five.id);
    }

    #[test]
    fn blank_name_gets_positional_defaults() {
        let r = row(&[(CanonicalField::Domain, text("Space"))]);
        let record = normalize_row(&r, 2);
        assert_eq!(record.name, "Company 3");
        assert_eq!(record.id, "company-3");
    }

    #[test]
    fn unsluggable_name_falls_back_to_positional_id() {
        let r = row(&[(CanonicalField::CompanyName, text("!!!"))]);
        let record = normalize_row(&r, 4);
        assert_eq!(record.name, "!!!");
        assert_eq!(record.id, "id-4");
    }

    #[test]
    fn coordinates_accept_numbers_and_decimal_comma_strings() {
        let r = row(&[
            (CanonicalField::Latitude, CellScalar::Number(48.1)),
            (CanonicalField::Longitude, text("11,5")),
        ]);
        let record = normalize_row(&r, 0);
        assert_eq!(record.lat, Some(48.1));
        assert_eq!(record.lng, Some(11.5));
    }

    #[test]
    fn bad_coordinates_degrade_to_unset() {
        let r = row(&[
            (CanonicalField::Latitude, text("north-ish")),
            (CanonicalField::Longitude, CellScalar::Number(f64::NAN)),
        ]);
        let record = normalize_row(&r, 0);
        assert_eq!(record.lat, None);
        assert_eq!(record.lng, None);
        assert!(!record.has_position());
    }

    #[test]
    fn tags_union_is_deduplicated_and_sorted() {
        let r = row(&[
            (CanonicalField::Domain, text("Space, Aviation")),
            (CanonicalField::HardwareSoftware, text("Hardware/Software")),
            (CanonicalField::ResearchEducation, text("Space")),
        ]);
        let record = normalize_row(&r, 0);
        assert_eq!(record.tags, vec!["Aviation", "Hardware", "Software", "Space"]);
    }

    #[test]
    fn munich_aerospace_cell_adds_a_synthetic_tag() {
        let r = row(&[
            (CanonicalField::CompanyName, text("Acme")),
            (CanonicalField::MunichAerospace, text(" Member ")),
        ]);
        let record = normalize_row(&r, 0);
        assert_eq!(record.tags, vec!["Munich Aerospace: Member"]);
    }

    #[test]
    fn stakeholders_keep_source_order_without_duplicates() {
        let r = row(&[(CanonicalField::Stakeholder, text("Industry; Academia, Industry"))]);
        let record = normalize_row(&r, 0);
        assert_eq!(record.stakeholders, vec!["Industry", "Academia"]);
    }

    #[test]
    fn category_lists_are_plain_splits() {
        let r = row(&[
            (CanonicalField::SupportServices, text("Consulting / Testing")),
            (CanonicalField::GovClustersAssoc, text("Cluster A, Cluster A")),
        ]);
        let record = normalize_row(&r, 0);
        assert_eq!(record.cat_support, vec!["Consulting", "Testing"]);
        // No dedup beyond what the split yields.
        assert_eq!(record.cat_government, vec!["Cluster A", "Cluster A"]);
        assert!(record.cat_hw_sw.is_empty());
    }
}
