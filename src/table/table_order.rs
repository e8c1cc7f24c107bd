use super::lookup::Lookups;
use super::types::{ColumnDescriptor, SortOrder, SortState};
use crate::records::Record;
use crate::table::lookup::SortKey;
use feruca::Collator;

/// Stable in-place sort of an already-filtered row set.
///
/// Strings compare lowercased under the Unicode collation algorithm, so accented
/// letters sort beside their base letters. Flag columns compare as booleans with
/// `true` first when ascending. Rows with equal keys keep their relative order in both directions.
pub fn sort_records(
    records: &mut [&Record],
    columns: &[ColumnDescriptor],
    lookups: &Lookups,
    sort: Option<&SortState>,
) {
    let Some(sort) = sort else {
        return;
    };

    let column = columns.iter().find(|c| c.key == sort.key);
    let key_of = |record: &Record| -> SortKey {
        match column {
            Some(column) => lookups.cell(record, column).sort_key(),
            None => SortKey::Text(record.text(&sort.key).to_lowercase()),
        }
    };

    let mut collator = Collator::default();
    let mut keyed: Vec<(SortKey, &Record)> = records.iter().map(|r| (key_of(r), *r)).collect();
    match sort.order {
        SortOrder::Asc => keyed.sort_by(|a, b| a.0.compare(&b.0, &mut collator)),
        SortOrder::Desc => keyed.sort_by(|a, b| b.0.compare(&a.0, &mut collator)),
    }

    for (slot, (_, record)) in records.iter_mut().zip(keyed) {
        *slot = record;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::field("name", "Name"),
            ColumnDescriptor::flag("status", "Status", "Active", "Inactive"),
        ]
    }

    fn records() -> Vec<Record> {
        vec![
            Record::from_json(json!({"id": 1, "name": "beta", "status": false})).unwrap(),
            Record::from_json(json!({"id": 2, "name": "Alpha", "status": true})).unwrap(),
            Record::from_json(json!({"id": 3, "name": "gamma", "status": false})).unwrap(),
            Record::from_json(json!({"id": 4, "name": "Delta", "status": true})).unwrap(),
        ]
    }

    fn names(rows: &[&Record]) -> Vec<String> {
        rows.iter().map(|r| r.text("name")).collect()
    }

    #[test]
    fn test_case_insensitive_ascending_and_reversal() {
        let records = records();
        let mut rows: Vec<&Record> = records.iter().collect();
        sort_records(&mut rows, &columns(), &Lookups::new(), Some(&SortState::asc("name")));
        let asc = names(&rows);
        assert_eq!(asc, vec!["Alpha", "beta", "Delta", "gamma"]);

        let desc_state = SortState { key: "name".into(), order: SortOrder::Desc };
        sort_records(&mut rows, &columns(), &Lookups::new(), Some(&desc_state));
        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(names(&rows), reversed);
    }

    #[test]
    fn test_flags_sort_true_first_and_stable() {
        let records = records();
        let mut rows: Vec<&Record> = records.iter().collect();
        sort_records(&mut rows, &columns(), &Lookups::new(), Some(&SortState::asc("status")));
        let ids: Vec<_> = rows.iter().filter_map(|r| r.id()).collect();
        assert_eq!(ids, vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_accented_names_sort_with_their_base_letter() {
        let records: Vec<Record> = ["zebra", "Éclair", "apple", "eclair", "Ábaco"]
            .iter()
            .enumerate()
            .map(|(i, name)| Record::from_json(json!({"id": i, "name": name})).unwrap())
            .collect();
        let mut rows: Vec<&Record> = records.iter().collect();
        sort_records(&mut rows, &columns(), &Lookups::new(), Some(&SortState::asc("name")));
        assert_eq!(names(&rows), vec!["Ábaco", "apple", "eclair", "Éclair", "zebra"]);
    }

    #[test]
    fn test_no_sort_state_keeps_order() {
        let records = records();
        let mut rows: Vec<&Record> = records.iter().collect();
        sort_records(&mut rows, &columns(), &Lookups::new(), None);
        assert_eq!(names(&rows), vec!["beta", "Alpha", "gamma", "Delta"]);
    }
}
