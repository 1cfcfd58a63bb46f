use labgrid_lexicon::Lexicon;
use labgrid_model::ResultRecord;
use labgrid_normalization::ValueNormalizer;
use proptest::prelude::*;

fn normalizer() -> ValueNormalizer {
    ValueNormalizer::new(&Lexicon::default()).unwrap()
}

fn record(value: &str, norm: Option<&str>, unit: Option<&str>) -> ResultRecord {
    ResultRecord::draft("Coagulation", 1, "Prothrombin", value)
        .with_norm(norm.map(str::to_string))
        .with_unit(unit.map(str::to_string))
}

#[test]
fn composite_rows_flow_through_all_stages() {
    let rows = normalizer().normalize(vec![record(
        "12\n1,1",
        Some("10-20 sec\n0.8-1.2 INR"),
        None,
    )]);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].test_name, "Prothrombin (Seconds)");
    assert_eq!(rows[0].value, Some(12.0));
    assert_eq!(rows[0].unit.as_deref(), Some("Seconds"));
    assert_eq!(rows[1].test_name, "Prothrombin (INR)");
    assert_eq!(rows[1].value, Some(1.1));
    assert_eq!(rows[1].unit.as_deref(), Some("INR"));
}

#[test]
fn duration_overrides_unit() {
    let rows = normalizer().normalize(vec![record("5 min 30 sec", Some("3-10 min"), Some("min"))]);
    assert_eq!(rows[0].value, Some(330.0));
    assert_eq!(rows[0].unit.as_deref(), Some("Seconds"));
}

#[test]
fn empty_inputs_are_tolerated() {
    let rows = normalizer().normalize(vec![
        record("", None, None),
        record("  ", Some(""), Some("")),
    ]);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.value.is_none()));
    assert!(normalizer().normalize(Vec::new()).is_empty());
}

#[test]
fn custom_lexicon_units() {
    let mut lexicon = Lexicon::default();
    lexicon.unit_suffixes.insert(
        0,
        labgrid_lexicon::UnitSuffix {
            unit: "mIU/mL".to_string(),
            keywords: vec!["мме/мл".to_string()],
        },
    );
    let normalizer = ValueNormalizer::new(&lexicon).unwrap();
    let rows = normalizer.infer_missing_units(vec![record("2.5", Some("0.4-4.0 мМЕ/мл"), None)]);
    assert_eq!(rows[0].unit.as_deref(), Some("mIU/mL"));
}

fn arb_record() -> impl Strategy<Value = ResultRecord> {
    let value = prop_oneof![
        Just("12".to_string()),
        Just("14,7".to_string()),
        Just("> 5.5".to_string()),
        Just("negative".to_string()),
        Just("5 min 30 sec".to_string()),
        Just(String::new()),
        "[0-9 ,.<>a-z]{0,12}",
    ];
    let norm = prop_oneof![
        Just(None),
        Just(Some("10-20 sec".to_string())),
        Just(Some("3.9-6.1 ммоль/л".to_string())),
        Just(Some("0.8-1.2 INR".to_string())),
        "[a-z0-9 %/-]{0,12}".prop_map(Some),
    ];
    let unit = prop_oneof![Just(None), Just(Some("g/L".to_string())), Just(Some(String::new()))];
    (value, norm, unit).prop_map(|(value, norm, unit)| {
        ResultRecord::draft("Category", 1, "Test", value)
            .with_norm(norm)
            .with_unit(unit)
    })
}

proptest! {
    #[test]
    fn infer_missing_units_is_idempotent(rows in prop::collection::vec(arb_record(), 0..8)) {
        let normalizer = normalizer();
        let once = normalizer.infer_missing_units(rows);
        let twice = normalizer.infer_missing_units(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalize_values_is_idempotent(rows in prop::collection::vec(arb_record(), 0..8)) {
        let normalizer = normalizer();
        let once = normalizer.normalize_result_values(rows);
        let twice = normalizer.normalize_result_values(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn text_value_is_preserved(rows in prop::collection::vec(arb_record(), 0..8)) {
        let normalizer = normalizer();
        let before: Vec<String> = rows.iter().map(|r| r.text_value.clone()).collect();
        let after = normalizer.normalize_result_values(rows);
        let after: Vec<String> = after.into_iter().map(|r| r.text_value).collect();
        prop_assert_eq!(before, after);
    }
}
