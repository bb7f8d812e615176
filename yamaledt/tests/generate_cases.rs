//! End-to-end generation from file and inline sources.
#![allow(
    unfulfilled_lint_expectations,
    reason = "clippy::expect_used is denied globally; tests may not hit those branches"
)]
#![expect(
    clippy::expect_used,
    clippy::panic_in_result_fn,
    reason = "tests panic to surface configuration mistakes"
)]

use anyhow::{Result, anyhow, ensure};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use serde::Deserialize;
use test_helpers::jail::{figment_error, root, with_jail};
use yamaledt::binder::{DisplayName, ParameterSlot};
use yamaledt::harness::assert_cases;
use yamaledt::{
    MacroDirective, ResultIntoFigment, ScopeDeclaration, SourceDirective, SourceError, TestCase,
    TestMethod, generate,
};

#[fixture]
fn resources() -> Utf8PathBuf {
    test_helpers::logging::init();
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/resources")
}

fn method(name: &str, root: Utf8PathBuf) -> TestMethod {
    TestMethod::new(name).with_resource_root(root)
}

fn names(cases: &[TestCase]) -> Vec<&str> {
    cases.iter().map(TestCase::display_name).collect()
}

fn cases_of(method: &TestMethod) -> Result<Vec<TestCase>> {
    generate(method).map_err(|err| anyhow!(err.to_string()))
}

#[rstest]
fn display_names_come_from_a_plain_file(resources: Utf8PathBuf) -> Result<()> {
    let method = method("display_name_only", resources)
        .with_scope(
            ScopeDeclaration::new("display_name_only")
                .with_source(SourceDirective::new().with_macros(MacroDirective::disabled())),
        )
        .with_parameter(ParameterSlot::named::<String>("DisplayName"));
    let cases = cases_of(&method)?;
    ensure!(
        names(&cases) == ["first case", "second case", "third case"],
        "got {:?}",
        names(&cases)
    );
    Ok(())
}

#[rstest]
fn display_names_come_from_a_macro_file(resources: Utf8PathBuf) -> Result<()> {
    let method = method("display_name_only", resources)
        .with_scope(ScopeDeclaration::new("display_name_only").with_source(SourceDirective::new()))
        .with_parameter(ParameterSlot::of::<DisplayName>());
    let cases = cases_of(&method)?;
    ensure!(names(&cases) == ["case 1", "case 2", "case 3"], "got {:?}", names(&cases));
    let first = cases.first().ok_or_else(|| anyhow!("no cases"))?;
    let wrapped: DisplayName = first.arguments().value(0).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(wrapped.as_str() == "case 1", "wrapped display name");
    Ok(())
}

#[rstest]
#[case::whole_document("test1:\ntest2:\ntest3:\n", None)]
#[case::selected("test:\n  test1:\n  test2:\n  test3:\nother:\n  test4:\n", Some("test"))]
fn inline_data_yields_one_case_per_record(
    #[case] data: &str,
    #[case] selection: Option<&str>,
) -> Result<()> {
    let mut source = SourceDirective::new().with_resource(data);
    if let Some(expression) = selection {
        source = source.with_selection(expression);
    }
    let method = TestMethod::new("inline")
        .with_scope(ScopeDeclaration::new("inline").with_source(source))
        .with_parameter(ParameterSlot::of::<DisplayName>());
    let cases = cases_of(&method)?;
    ensure!(names(&cases) == ["test1", "test2", "test3"], "got {:?}", names(&cases));
    Ok(())
}

#[rstest]
fn macro_sources_bind_simple_parameters(resources: Utf8PathBuf) {
    let method = method("simple_parameters", resources)
        .with_scope(ScopeDeclaration::new("simple_parameters").with_source(SourceDirective::new()))
        .with_parameter(ParameterSlot::named::<String>("DisplayName"))
        .with_parameter(ParameterSlot::of::<i32>())
        .with_parameter(ParameterSlot::named::<i32>("k"));
    let report = assert_cases(&method, |case| {
        let args = case.arguments();
        let i: i32 = args.value(1).map_err(|err| anyhow!(err.to_string()))?;
        let k: i32 = args.value(2).map_err(|err| anyhow!(err.to_string()))?;
        ensure!(i + k == 5, "{i} + {k} is not five");
        Ok(())
    });
    assert_eq!(report.passed(), ["zero and five", "two and three", "five and zero"]);
}

#[rstest]
fn missing_and_null_values_bind_as_nothing(resources: Utf8PathBuf) {
    let method = method("object_parameters", resources)
        .with_scope(
            ScopeDeclaration::new("object_parameters")
                .with_macros(MacroDirective::disabled())
                .with_source(SourceDirective::new()),
        )
        .with_parameter(ParameterSlot::named::<String>("DisplayName"))
        .with_parameter(ParameterSlot::of::<i32>())
        .with_parameter(ParameterSlot::named::<Option<i32>>("k"));
    let report = assert_cases(&method, |case| {
        let args = case.arguments();
        let i: i32 = args.value(1).map_err(|err| anyhow!(err.to_string()))?;
        let k: Option<i32> = args.value(2).map_err(|err| anyhow!(err.to_string()))?;
        ensure!(i + k.unwrap_or(0) == 5, "{i} + {k:?} is not five");
        Ok(())
    });
    assert_eq!(report.len(), 3);
}

#[rstest]
#[case::word("null")]
#[case::tilde("~")]
#[case::empty("")]
fn adding_null_to_five_is_five(#[case] spelling: &str) -> Result<()> {
    let data = format!("adding null to five is five:\n  i: 5\n  k: {spelling}\n  r: 5\n");
    let method = TestMethod::new("adds")
        .with_scope(ScopeDeclaration::new("adds").with_source(
            SourceDirective::new()
                .with_resource(data)
                .with_macros(MacroDirective::disabled()),
        ))
        .with_parameter(ParameterSlot::of::<DisplayName>())
        .with_parameter(ParameterSlot::named::<i32>("i"))
        .with_parameter(ParameterSlot::named::<Option<i32>>("k"))
        .with_parameter(ParameterSlot::named::<i32>("r"));
    let cases = cases_of(&method)?;
    ensure!(names(&cases) == ["adding null to five is five"], "got {:?}", names(&cases));
    let args = cases.first().ok_or_else(|| anyhow!("no cases"))?.arguments();
    let k: Option<i32> = args.value(2).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(k.is_none(), "k should bind as nothing, got {k:?}");
    let i: i32 = args.value(1).map_err(|err| anyhow!(err.to_string()))?;
    let r: i32 = args.value(3).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(i + k.unwrap_or(0) == r, "{i} + {k:?} is not {r}");
    Ok(())
}

#[derive(Debug, Deserialize)]
struct Customer {
    serial: u32,
    name: String,
    weight: f64,
}

fn customer_matches(case: &TestCase) -> Result<()> {
    let args = case.arguments();
    let customer: Customer = args.value(1).map_err(|err| anyhow!(err.to_string()))?;
    let result: String = args.value(2).map_err(|err| anyhow!(err.to_string()))?;
    let rendered = format!("{}.{}.{}", customer.serial, customer.name, customer.weight);
    ensure!(rendered == result, "{rendered} != {result}");
    Ok(())
}

fn customer_parameters(method: TestMethod) -> TestMethod {
    method
        .with_parameter(ParameterSlot::named::<String>("DisplayName"))
        .with_parameter(ParameterSlot::of::<Customer>())
        .with_parameter(ParameterSlot::named::<String>("result"))
}

#[rstest]
fn structured_fields_deserialize_into_custom_types(resources: Utf8PathBuf) {
    let method = customer_parameters(method("custom_class", resources).with_scope(
        ScopeDeclaration::new("custom_class")
            .with_macros(MacroDirective::disabled())
            .with_source(SourceDirective::new().with_strict(true)),
    ));
    let report = assert_cases(&method, customer_matches);
    assert_eq!(report.passed(), ["first customer", "second customer"]);
}

#[rstest]
fn expanded_text_is_dumped_beside_the_source() -> Result<()> {
    let body = "{%@define customer(SERIAL,NAME,WEIGHT)=Customer: {serial: SERIAL, name: NAME, weight: WEIGHT}%}\n\
                macro customer:\n  {%customer|3|Eve|55.5%}\n  result: 3.Eve.55.5\n";
    with_jail(|jail| {
        jail.create_dir("data")?;
        jail.create_file("data/custom_class_macros.yaml", body)?;
        let method = customer_parameters(
            TestMethod::new("custom_class_macros")
                .with_resource_root(root(jail)?.join("data"))
                .with_scope(
                    ScopeDeclaration::new("custom_class_macros")
                        .with_macros(MacroDirective::new().with_dump("expanded.yaml"))
                        .with_source(
                            SourceDirective::new().with_resource("custom_class_macros.yaml"),
                        ),
                ),
        );
        let cases = generate(&method).to_figment()?;
        assert_eq!(cases.len(), 1);
        let case = cases.first().expect("one case");
        customer_matches(case).map_err(figment_error)?;
        let dumped = std::fs::read_to_string(jail.directory().join("data/expanded.yaml"))
            .map_err(figment_error)?;
        assert!(dumped.contains("Customer: {serial: 3, name: Eve, weight: 55.5}"), "{dumped}");
        assert!(!dumped.contains("{%"), "dump holds expanded text");
        Ok(())
    })
}

#[rstest]
fn disabled_macros_leave_macro_like_text_alone(resources: Utf8PathBuf) -> Result<()> {
    let method = method("macro_text", resources)
        .with_scope(
            ScopeDeclaration::new("macro_text")
                .with_source(SourceDirective::new().with_macros(MacroDirective::disabled())),
        )
        .with_parameter(ParameterSlot::named::<String>("text"));
    let cases = cases_of(&method)?;
    let case = cases.first().ok_or_else(|| anyhow!("no cases"))?;
    let text: String = case.arguments().value(0).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(text == "{%not a macro%}", "got {text}");
    Ok(())
}

fn shared_chain(selection: &str) -> Vec<ScopeDeclaration> {
    vec![
        ScopeDeclaration::new("TestInner")
            .with_source(SourceDirective::new().with_resource("Shared.yaml")),
        ScopeDeclaration::new("TestInnerInner").with_macros(MacroDirective::disabled()),
        ScopeDeclaration::new("method")
            .with_source(SourceDirective::new().with_selection(selection)),
    ]
}

fn concat_parameters(method: TestMethod) -> TestMethod {
    method
        .with_parameter(ParameterSlot::named::<String>("DisplayName"))
        .with_parameter(ParameterSlot::named::<String>("a"))
        .with_parameter(ParameterSlot::named::<String>("b"))
        .with_parameter(ParameterSlot::named::<String>("concat"))
}

fn concatenates(case: &TestCase, separator: &str) -> Result<()> {
    let args = case.arguments();
    let a: String = args.value(1).map_err(|err| anyhow!(err.to_string()))?;
    let b: String = args.value(2).map_err(|err| anyhow!(err.to_string()))?;
    let concat: String = args.value(3).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(concat == format!("{a}{separator}{b}"), "{a} and {b} do not make {concat}");
    Ok(())
}

#[rstest]
#[case::plain("test1", "", &["simple", "longer"])]
#[case::dotted("test2", ".", &["simple", "spaced"])]
fn outer_scopes_share_one_resource(
    resources: Utf8PathBuf,
    #[case] selection: &str,
    #[case] separator: &str,
    #[case] expected: &[&str],
) {
    let method = concat_parameters(
        method("inner", resources).with_scopes(shared_chain(selection)),
    );
    let report = assert_cases(&method, |case| concatenates(case, separator));
    assert_eq!(report.passed(), expected);
}

#[rstest]
fn missing_resources_are_unreadable(resources: Utf8PathBuf) {
    let method = method("nowhere", resources)
        .with_scope(ScopeDeclaration::new("nowhere").with_source(SourceDirective::new()));
    let err = generate(&method).expect_err("nowhere.yaml.jam does not exist");
    assert!(
        matches!(err.as_ref(), SourceError::ResourceUnreadable { resource, .. } if resource == "nowhere.yaml.jam"),
        "unexpected error: {err}"
    );
}

#[rstest]
fn empty_sources_generate_no_cases() -> Result<()> {
    let method = TestMethod::new("empty")
        .with_scope(ScopeDeclaration::new("empty").with_source(
            SourceDirective::new()
                .with_resource("\n")
                .with_strict(true),
        ))
        .with_parameter(ParameterSlot::named::<i32>("never"));
    ensure!(cases_of(&method)?.is_empty(), "no cases expected");
    Ok(())
}

#[rstest]
fn generation_is_repeatable(resources: Utf8PathBuf) -> Result<()> {
    let method = concat_parameters(method("inner", resources).with_scopes(shared_chain("test1")));
    let first = cases_of(&method)?;
    let second = cases_of(&method)?;
    ensure!(first == second, "repeated generation differs");
    Ok(())
}
