use validata::expression::evaluate_expression;
use validata::syntax::MAX_DEPTH;
use validata::{
    evaluate, parse, validate, Cell, EvalError, InMemoryDataset, NamedValidation, RunnerConfig,
    RunnerError, ValidationError, ValidationRunner, Value,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn people() -> InMemoryDataset {
    InMemoryDataset::new(
        vec!["gender", "height"],
        vec![
            vec![Value::from(1), Value::from(182)],
            vec![Value::from(2), Value::from(172)],
            vec![Value::from(1), Value::from(278)],
            vec![Value::Missing, Value::from(176)],
        ],
    )
    .unwrap()
}

fn bools(expression: &str, dataset: &InMemoryDataset) -> Vec<bool> {
    evaluate(expression, dataset)
        .unwrap()
        .into_iter()
        .map(|cell| cell.as_bool().unwrap())
        .collect()
}

#[test]
fn test_gender_and_height_scenario() {
    init_logger();
    let ds = people();

    assert_eq!(
        bools("gender not missing", &ds),
        vec![true, true, true, false]
    );
    assert_eq!(
        bools(
            "(gender==1 & height between 140:200) | (gender==2 & height between 160:220)",
            &ds
        ),
        vec![true, true, false, false]
    );
}

#[test]
fn test_and_binds_tighter_than_or() {
    let ds = people();
    let implicit = bools("gender == 2 | gender == 1 & height > 200", &ds);
    let explicit = bools("gender == 2 | (gender == 1 & height > 200)", &ds);
    assert_eq!(implicit, explicit);
    assert_eq!(implicit, vec![false, true, true, false]);
    assert_eq!(
        parse("a == 1 | b == 2 & c == 3").unwrap(),
        parse("a == 1 | (b == 2 & c == 3)").unwrap()
    );
}

#[test]
fn test_not_missing_is_negation_of_missing() {
    let ds = people();
    let present = bools("gender not missing", &ds);
    let absent = bools("gender missing", &ds);
    assert!(present.iter().zip(&absent).all(|(p, a)| p != a));
}

#[test]
fn test_between_matches_inclusive_bounds() {
    let ds = people();
    assert_eq!(
        bools("height between 172:182", &ds),
        bools("height >= 172 & height <= 182", &ds)
    );
    assert_eq!(
        bools("height between 172:182", &ds),
        vec![true, true, false, true]
    );
}

#[test]
fn test_missing_never_compares_true() {
    let ds = people();
    assert_eq!(bools("gender == 1", &ds)[3], false);
    assert_eq!(bools("gender != 1", &ds)[3], false);
    assert_eq!(bools("gender between 0:5", &ds)[3], false);
    assert_eq!(bools("gender in (1, 2)", &ds)[3], false);
    assert_eq!(bools("gender not in (1, 2)", &ds)[3], false);
}

#[test]
fn test_single_expression_errors() {
    let ds = people();
    assert!(matches!(
        evaluate("gender ==", &ds).unwrap_err(),
        ValidationError::Parse(_)
    ));
    assert!(matches!(
        evaluate("gender = 1", &ds).unwrap_err(),
        ValidationError::Lex(_)
    ));
    assert_eq!(
        evaluate("weight > 1 & gender == 1", &ds).unwrap_err(),
        ValidationError::Eval(EvalError::UnknownColumn {
            name: "weight".to_string()
        })
    );

    // Type mismatches stay local to the rows they happen on
    let mixed = InMemoryDataset::from_columns(vec![(
        "code",
        vec![Value::from(1), Value::from("x"), Value::Missing],
    )])
    .unwrap();
    let cells = evaluate("code < 5", &mixed).unwrap();
    assert_eq!(cells[0], Cell::Bool(true));
    assert!(matches!(
        cells[1].error(),
        Some(ValidationError::Eval(EvalError::TypeMismatch { .. }))
    ));
    assert_eq!(cells[2], Cell::Bool(false));
}

#[test]
fn test_batch_isolates_failures() {
    init_logger();
    let ds = people();
    let validations = vec![
        NamedValidation::new("gender_present", "gender not missing"),
        NamedValidation::new("weight_positive", "weight > 0"),
        NamedValidation::new("unterminated", "gender == \"1"),
        NamedValidation::new("tall", "height > 180"),
    ];

    let result = validate(&validations, &ds).unwrap();
    assert_eq!(result.row_count(), 4);
    assert_eq!(
        result.names(),
        vec!["gender_present", "weight_positive", "unterminated", "tall"]
    );

    assert!(result
        .column("weight_positive")
        .unwrap()
        .iter()
        .all(|c| matches!(
            c.error(),
            Some(ValidationError::Eval(EvalError::UnknownColumn { .. }))
        )));
    assert!(result
        .column("unterminated")
        .unwrap()
        .iter()
        .all(|c| matches!(c.error(), Some(ValidationError::Lex(_)))));

    let tall: Vec<_> = result
        .column("tall")
        .unwrap()
        .iter()
        .map(Cell::as_bool)
        .collect();
    assert_eq!(tall, vec![Some(true), Some(false), Some(true), Some(false)]);

    let summary = result.summary();
    assert_eq!(summary[0].passed, 3);
    assert_eq!(summary[1].errors, 4);
}

#[test]
fn test_batch_duplicate_names() {
    let validations = vec![
        NamedValidation::from(("check", "gender == 1")),
        NamedValidation::from(("check", "gender ==")),
    ];
    assert_eq!(
        validate(&validations, &people()).unwrap_err(),
        RunnerError::DuplicateName {
            name: "check".to_string()
        }
    );
}

#[test]
fn test_reevaluation_is_idempotent() {
    let ds = people();
    let expr = parse("gender in (1, 2) & height between 150:250").unwrap();
    let first = evaluate_expression(&expr, &ds).unwrap();
    let second = evaluate_expression(&expr, &ds).unwrap();
    assert_eq!(first, second);

    let runner = ValidationRunner::default();
    let validations = vec![NamedValidation::new("v", "height < 200 | gender missing")];
    assert_eq!(
        runner.run(&validations, &ds).unwrap(),
        runner.run(&validations, &ds).unwrap()
    );
}

#[test]
fn test_parallel_runner_keeps_order() {
    init_logger();
    let ds = people();
    let validations: Vec<NamedValidation> = (0..32)
        .map(|i| NamedValidation::new(format!("v{}", i), format!("height > {}", 170 + i)))
        .collect();

    let parallel = ValidationRunner::new(RunnerConfig {
        parallel: true,
        ..RunnerConfig::default()
    });
    let sequential = ValidationRunner::new(RunnerConfig {
        parallel: false,
        cache_expressions: false,
    });

    let a = parallel.run(&validations, &ds).unwrap();
    let b = sequential.run(&validations, &ds).unwrap();
    assert_eq!(a, b);
    let expected: Vec<String> = (0..32).map(|i| format!("v{}", i)).collect();
    assert_eq!(a.names(), expected);
    assert_eq!(parallel.cache().len(), 32);
}

fn survey() -> InMemoryDataset {
    InMemoryDataset::new(
        vec!["id", "dummy_red", "dummy_blue", "score_q1", "score_q2"],
        vec![
            vec![Value::from(1), Value::from(1), Value::from(0), Value::from(4), Value::from(5)],
            vec![Value::from(2), Value::from(0), Value::from(0), Value::from(1), Value::Missing],
            vec![Value::from(3), Value::from(0), Value::from(1), Value::Missing, Value::Missing],
        ],
    )
    .unwrap()
}

#[test]
fn test_column_set_aggregates() {
    init_logger();
    let ds = survey();
    assert_eq!(bools("any dummy_* == 1", &ds), vec![true, false, true]);
    assert_eq!(bools("none dummy_* == 1", &ds), vec![false, true, false]);
    assert_eq!(bools("mean score_* >= 2", &ds), vec![true, false, false]);
    assert_eq!(bools("sum score_* == 0", &ds), vec![false, false, true]);
    assert_eq!(
        bools("id == 1 & any dummy_* == 1 | max score_q1 + score_q2 < 2", &ds),
        vec![true, true, false]
    );

    let result = validate(
        &[
            NamedValidation::new("one_colour", "sum dummy_* == 1"),
            NamedValidation::new("sizes", "any size_* > 0"),
        ],
        &ds,
    )
    .unwrap();
    let one_colour: Vec<_> = result
        .column("one_colour")
        .unwrap()
        .iter()
        .map(Cell::as_bool)
        .collect();
    assert_eq!(one_colour, vec![Some(true), Some(false), Some(true)]);
    assert!(result.column("sizes").unwrap().iter().all(|c| {
        c.error()
            == Some(&ValidationError::Eval(EvalError::UnknownColumn {
                name: "size_*".to_string(),
            }))
    }));
}

#[test]
fn test_oversized_validation_does_not_sink_batch() {
    let ds = people();
    let long = vec!["gender == 1"; 20_000].join(" | ");
    let result = validate(
        &[
            NamedValidation::new("ok", "gender == 1"),
            NamedValidation::new("long", long),
        ],
        &ds,
    )
    .unwrap();

    assert_eq!(result.cell(0, "ok"), Some(&Cell::Bool(true)));
    assert!(result.column("long").unwrap().iter().all(Cell::is_error));

    let limit = vec!["gender == 1"; MAX_DEPTH + 1].join(" | ");
    assert_eq!(bools(&limit, &ds), vec![true, false, true, false]);
}
