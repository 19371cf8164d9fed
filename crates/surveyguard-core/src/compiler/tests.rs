use super::*;
use crate::{coercion::CoercedValue, results::RuleKind, RawValue, RuleBuilder};

fn compile(builder: &RuleBuilder) -> ExecutableColumn {
    compile_column(builder.name(), builder.rule(), &TypeCoercer::default()).unwrap()
}

fn evaluate(column: &ExecutableColumn, raw: Option<&str>) -> Vec<(RuleKind, CoercedValue)> {
    let raw = raw.map(RawValue::from);
    let value = column.coerce(&TypeCoercer::default(), raw.as_ref());
    let mut issues = Vec::new();
    column.evaluate(0, raw.as_ref(), &value, &mut issues);
    issues
        .into_iter()
        .map(|i| (i.rule(), i.value().clone()))
        .collect()
}

#[test]
fn test_compile_full_column() {
    let mut builder = RuleBuilder::new("id");
    builder
        .with_type(TypeSpec::Text)
        .is_required()
        .with_min_length(1)
        .is_unique()
        .with_regex("^A")
        .unwrap()
        .is_in(["A1", "A2"]);

    let column = compile(&builder);
    assert_eq!(column.get_name(), "id");
    assert!(column.has_unicity());
    assert_eq!(
        column.rule_names(),
        vec![
            "RequiredCheck",
            "TypeCheck",
            "StringLengthCheck",
            "IsInCheck",
            "RegexMatch",
            "UnicityCheck"
        ]
    );
}

#[test]
fn test_untyped_column_coerces_to_text() {
    let column = compile(&RuleBuilder::new("comment"));
    assert_eq!(column.type_spec(), &TypeSpec::Text);
    assert!(column.rule_names().is_empty());
    assert!(evaluate(&column, Some("anything")).is_empty());
}

#[test]
fn test_invalid_regex_is_a_config_error() {
    let rule = Rule {
        regex: Some("(unclosed".to_string()),
        ..Rule::default()
    };
    let err = compile_column("code", &rule, &TypeCoercer::default()).unwrap_err();
    assert!(matches!(err, RuleError::InvalidRegex { ref column, .. } if column == "code"));
}

#[test]
fn test_compile_rules_keeps_order() {
    let mut rules = RuleSet::new();
    rules.add(RuleBuilder::new("b"));
    rules.add(RuleBuilder::new("a"));
    let columns = compile_rules(&rules, &TypeCoercer::default()).unwrap();
    let names: Vec<_> = columns.iter().map(|c| c.get_name()).collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn test_allowed_members_coerced_to_column_type() {
    let mut builder = RuleBuilder::new("rating");
    builder.with_type(TypeSpec::Integer).is_in(["1", "2", "3"]);
    let column = compile(&builder);

    assert!(evaluate(&column, Some("2")).is_empty());
    assert!(evaluate(&column, Some(" 3.0 ")).is_empty());
    assert_eq!(
        evaluate(&column, Some("4")),
        vec![(RuleKind::Allowed, CoercedValue::Integer(4))]
    );
}

#[test]
fn test_impossible_rules_are_accepted() {
    let mut builder = RuleBuilder::new("name");
    builder
        .with_type(TypeSpec::Text)
        .between(Some(1.0), Some(0.0))
        .with_length_between(Some(5), Some(2));
    let column = compile(&builder);

    // min/max never fire on text
    assert_eq!(
        evaluate(&column, Some("abc")),
        vec![
            (RuleKind::LenMin, CoercedValue::Text("abc".into())),
            (RuleKind::LenMax, CoercedValue::Text("abc".into())),
        ]
    );
}

#[test]
fn test_required_stops_evaluation() {
    let mut builder = RuleBuilder::new("age");
    builder
        .with_type(TypeSpec::Integer)
        .is_required()
        .is_not_null()
        .min(0.0);
    let column = compile(&builder);

    assert_eq!(
        evaluate(&column, None),
        vec![(RuleKind::Required, CoercedValue::Null)]
    );
    assert_eq!(
        evaluate(&column, Some("N/A")),
        vec![(RuleKind::Required, CoercedValue::Text("N/A".into()))]
    );
}

#[test]
fn test_not_null_only_for_present_columns() {
    let mut builder = RuleBuilder::new("score");
    builder.with_type(TypeSpec::Float).is_not_null();
    let column = compile(&builder);

    assert!(evaluate(&column, None).is_empty());
    assert_eq!(
        evaluate(&column, Some("")),
        vec![(RuleKind::NotNull, CoercedValue::Text("".into()))]
    );
}

#[test]
fn test_optional_null_is_silent() {
    let mut builder = RuleBuilder::new("score");
    builder.with_type(TypeSpec::Float).between(Some(0.0), Some(5.0));
    let column = compile(&builder);

    for raw in [None, Some(""), Some("  "), Some("na"), Some("NULL")] {
        assert!(evaluate(&column, raw).is_empty(), "{raw:?}");
    }
}

#[test]
fn test_type_failure_skips_value_rules_only() {
    let mut builder = RuleBuilder::new("score");
    builder
        .with_type(TypeSpec::Float)
        .between(Some(0.0), Some(5.0))
        .with_max_length(1)
        .with_regex(r"^\d")
        .unwrap();
    let column = compile(&builder);

    let uncastable = CoercedValue::Uncastable("x".into());
    assert_eq!(
        evaluate(&column, Some("x")),
        vec![(RuleKind::Type, uncastable.clone()), (RuleKind::Regex, uncastable)]
    );
}

#[test]
fn test_allowed_text_members_are_trimmed() {
    let mut builder = RuleBuilder::new("code");
    builder.with_type(TypeSpec::Text).is_in(["A ", " B"]);
    let column = compile(&builder);

    assert!(evaluate(&column, Some("A")).is_empty());
    assert!(evaluate(&column, Some(" B ")).is_empty());
    assert_eq!(
        evaluate(&column, Some("C")),
        vec![(RuleKind::Allowed, CoercedValue::Text("C".into()))]
    );
}

#[test]
fn test_executable_column_debug_lists_rules() {
    let mut builder = RuleBuilder::new("age");
    builder.with_type(TypeSpec::Integer).is_required();
    let rendered = format!("{:?}", compile(&builder));
    assert!(rendered.contains("\"age\""));
    assert!(rendered.contains("RequiredCheck"));
    assert!(rendered.contains("TypeCheck"));
}
