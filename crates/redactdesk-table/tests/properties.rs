//! Property tests for the collection engine.
//!
//! These pin down the filter, sort, pagination and selection contracts
//! every list screen relies on.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use redactdesk_table::{
    Collection, ColumnDescriptor, ColumnSet, FilterOperator, FilterQuery, FilterToken, ListOptions,
    ListState, PaginationState, Record, SelectionType, SortState, Value,
};

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: u32,
    name: String,
    language: Option<String>,
}

impl Record for Row {
    fn key(&self) -> String {
        self.id.to_string()
    }
}

fn columns() -> ColumnSet<Row> {
    ColumnSet::new(vec![
        ColumnDescriptor::new("id", "Id", |r: &Row| Some(Value::from(r.id))).sort_order(10),
        ColumnDescriptor::new("Name", "Name", |r: &Row| Some(Value::from(r.name.clone())))
            .sort_order(20),
        ColumnDescriptor::new("Language", "Language", |r: &Row| {
            r.language.clone().map(Value::from)
        })
        .sort_order(30),
    ])
    .unwrap()
}

/// Rows with unique ids and a small alphabet so filters actually hit.
fn rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        ("[a-c]{1,3}", prop::option::of("(en|de|fr)")),
        0..40,
    )
    .prop_map(|pairs| {
        pairs
            .into_iter()
            .zip(1_u32..)
            .map(|((name, language), id)| Row { id, name, language })
            .collect()
    })
}

fn ids(page: &[&Row]) -> Vec<u32> {
    page.iter().map(|r| r.id).collect()
}

proptest! {
    #[test]
    fn empty_query_is_a_no_op(records in rows(), descending in any::<bool>()) {
        prop_assume!(!records.is_empty());
        let cols = columns();
        let engine = Collection::new(&cols);
        let sort = SortState { sorting_field: Some("Name".to_string()), descending };
        let page = PaginationState::new(100, 1).unwrap();

        let derived = engine.derive(&records, &FilterQuery::default(), &sort, &page);
        prop_assert_eq!(derived.total_matches, records.len());

        let mut expected: Vec<&Row> = records.iter().collect();
        engine.sort(&mut expected, &sort);
        prop_assert_eq!(ids(&derived.visible_page), ids(&expected));
    }

    #[test]
    fn equals_selects_exact_subset_and_not_equals_its_complement(
        records in rows(),
        value in "[a-c]{1,2}",
    ) {
        let cols = columns();
        let engine = Collection::new(&cols);

        let eq = FilterQuery::default()
            .with_token(&cols, FilterToken::new("Name", FilterOperator::Equals, value.clone()))
            .unwrap();
        let ne = FilterQuery::default()
            .with_token(&cols, FilterToken::new("Name", FilterOperator::NotEquals, value.clone()))
            .unwrap();

        let expected_eq: Vec<u32> = records.iter().filter(|r| r.name == value).map(|r| r.id).collect();
        let expected_ne: Vec<u32> = records.iter().filter(|r| r.name != value).map(|r| r.id).collect();

        prop_assert_eq!(ids(&engine.filter(&records, &eq)), expected_eq);
        prop_assert_eq!(ids(&engine.filter(&records, &ne)), expected_ne);
    }

    #[test]
    fn missing_attributes_fail_positive_and_pass_negative(records in rows()) {
        let cols = columns();
        let engine = Collection::new(&cols);
        let contains = FilterQuery::default()
            .with_token(&cols, FilterToken::new("Language", FilterOperator::Contains, ""))
            .unwrap();
        let not_contains = FilterQuery::default()
            .with_token(&cols, FilterToken::new("Language", FilterOperator::NotContains, "zz"))
            .unwrap();

        let with_language = records.iter().filter(|r| r.language.is_some()).count();
        prop_assert_eq!(engine.filter(&records, &contains).len(), with_language);
        prop_assert_eq!(engine.filter(&records, &not_contains).len(), records.len());
    }

    #[test]
    fn clear_filter_restores_initial_page(
        records in rows(),
        tokens in prop::collection::vec(("[a-c]{1,2}", 0_usize..4), 1..5),
    ) {
        let mut state = ListState::new(
            columns(),
            ListOptions::new("Rows").default_sort(SortState::ascending("Name")),
        );
        let initial = ids(&state.derive(&records).visible_page);

        for (value, op) in tokens {
            state
                .add_token(FilterToken::new("Name", FilterOperator::ALL[op], value))
                .unwrap();
        }
        state.clear_filter();

        prop_assert_eq!(ids(&state.derive(&records).visible_page), initial);
    }

    #[test]
    fn pages_partition_the_matches(records in rows(), page_size in 1_usize..15) {
        let cols = columns();
        let engine = Collection::new(&cols);
        let query = FilterQuery::default();
        let sort = SortState::ascending("id");

        let first = engine.derive(&records, &query, &sort, &PaginationState::new(page_size, 1).unwrap());
        let mut seen = Vec::new();
        for index in 1..=first.pages_count {
            let page = PaginationState::new(page_size, index).unwrap();
            let derived = engine.derive(&records, &query, &sort, &page);
            prop_assert!(derived.visible_page.len() <= page_size);
            seen.extend(ids(&derived.visible_page));
        }
        let all: Vec<u32> = records.iter().map(|r| r.id).collect();
        prop_assert_eq!(seen, all);
    }

    #[test]
    fn single_selection_never_exceeds_one(
        records in rows(),
        events in prop::collection::vec(prop::collection::vec(0_usize..40, 0..5), 1..10),
    ) {
        let mut state = ListState::new(
            columns(),
            ListOptions::new("Rows").selection_type(SelectionType::Single),
        );
        for event in events {
            let picked: Vec<&Row> = event.iter().filter_map(|&i| records.get(i)).collect();
            state.set_selection(&picked);
            prop_assert!(state.selection().len() <= 1);
            if let Some(&i) = event.first() {
                if let Some(record) = records.get(i) {
                    state.toggle_selection(record);
                    prop_assert!(state.selection().len() <= 1);
                }
            }
        }
    }
}

#[test]
fn twenty_five_matches_page_three_has_five() {
    let records: Vec<Row> = (1..=25)
        .map(|id| Row {
            id,
            name: "x".to_string(),
            language: None,
        })
        .collect();
    let cols = columns();
    let engine = Collection::new(&cols);
    let query = FilterQuery::default();
    let sort = SortState::default();

    let page3 = engine.derive(&records, &query, &sort, &PaginationState::new(10, 3).unwrap());
    assert_eq!(page3.visible_page.len(), 5);
    let page4 = engine.derive(&records, &query, &sort, &PaginationState::new(10, 4).unwrap());
    assert!(page4.visible_page.is_empty());
}

#[test]
fn sort_by_name_ascending_scenario() {
    let records = vec![
        Row {
            id: 1,
            name: "B".to_string(),
            language: None,
        },
        Row {
            id: 2,
            name: "A".to_string(),
            language: None,
        },
    ];
    let cols = columns();
    let derived = Collection::new(&cols).derive(
        &records,
        &FilterQuery::default(),
        &SortState::ascending("Name"),
        &PaginationState::default(),
    );
    assert_eq!(ids(&derived.visible_page), [2, 1]);
}
