use labgrid_model::{Cell, Grid};
use labgrid_structure::{
    canonicalize, clean_and_normalize, demultiplex, flatten_hierarchical_table,
    is_table_hierarchical, merge_complementary_columns,
};
use proptest::prelude::*;

const RESULT: [&str; 4] = ["результат", "значение", "result", "value"];

#[test]
fn clean_then_flatten_urinalysis() {
    let raw = Grid::from_text_rows(vec![
        vec!["№", "Показатель", "Результат", "", "Норма", "None"],
        vec!["1", "Лейкоциты", "", "2-3", "0-5", ""],
        vec!["Эпителий:", "", "ед.", "", "", ""],
        vec!["", "Плоский", "1-2", "", "0-3", ""],
    ]);

    let clean = clean_and_normalize(&raw, &RESULT, 85.0);
    assert_eq!(clean.width(), 4);
    assert_eq!(clean.cell(1, 2), Some("2-3"));
    assert_eq!(clean.cell(0, 3), Some("Норма"));
    assert_eq!(clean.cell(3, 3), Some("0-3"));
    assert!(is_table_hierarchical(&clean));

    let (flat, parent) = flatten_hierarchical_table(&clean, None);
    let names: Vec<_> = flat.column(1).collect();
    assert_eq!(
        names,
        vec![
            Some("Показатель"),
            Some("Лейкоциты"),
            Some("Эпителий"),
            Some("Эпителий Плоский")
        ]
    );
    assert_eq!(parent.as_deref(), Some("Эпителий"));
}

#[test]
fn split_halves_are_independent() {
    let grid = Grid::from_text_rows(vec![
        vec!["Гемоглобин общий", "140", "Эритроциты крови", "4.5"],
        vec!["Гематокрит крови", "41", "Тромбоциты крови", "250"],
    ]);
    let tables = demultiplex(grid).into_tables();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].cell(1, 0), Some("Гематокрит крови"));
    assert_eq!(tables[1].cell(0, 1), Some("4.5"));
}

fn complementary_pair() -> impl Strategy<Value = Vec<(Cell, Cell)>> {
    let cell = "[a-z0-9]{1,6}";
    let row = prop_oneof![
        cell.prop_map(|v| (Some(v), None)),
        cell.prop_map(|v| (None, Some(v))),
        Just((None::<String>, None::<String>)),
    ];
    prop::collection::vec(row, 1..12)
        .prop_filter("needs data", |rows| rows.iter().any(|(a, b)| a.is_some() || b.is_some()))
}

fn dense_grid() -> impl Strategy<Value = Vec<Vec<String>>> {
    (1usize..5, 1usize..6).prop_flat_map(|(width, height)| {
        prop::collection::vec(prop::collection::vec("[0-9]{1,4}", width), height)
    })
}

proptest! {
    #[test]
    fn merge_takes_left_else_right(rows in complementary_pair()) {
        let grid = Grid::new(rows.iter().map(|(a, b)| vec![a.clone(), b.clone()]).collect());
        let merged = merge_complementary_columns(&grid);
        prop_assert_eq!(merged.width(), 1);
        for (r, (a, b)) in rows.iter().enumerate() {
            let expected = a.as_deref().or(b.as_deref());
            prop_assert_eq!(merged.cell(r, 0), expected);
        }
    }

    #[test]
    fn merge_never_loses_cells(rows in prop::collection::vec(
        prop::collection::vec(prop::option::of("[a-z]{1,3}"), 4),
        1..8,
    )) {
        let grid = Grid::new(rows);
        let merged = merge_complementary_columns(&grid);
        prop_assert!(merged.width() <= grid.width());
        prop_assert_eq!(merged.non_empty_cells().count(), grid.non_empty_cells().count());
    }

    #[test]
    fn dense_grids_are_untouched(rows in dense_grid()) {
        let grid = Grid::from_text_rows(rows);
        prop_assert_eq!(clean_and_normalize(&grid, &RESULT, 85.0), canonicalize(&grid));
    }
}
