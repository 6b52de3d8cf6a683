//! The sample shapes program through the library API.

use safecast::host::load_compilation;
use safecast::{analyze, Analyzer, HostConfig, RuleCode};
use std::path::Path;

use super::common::SAMPLE_DIR;

fn sample_outcome() -> safecast::AnalysisOutcome {
    let compilation = load_compilation(Path::new(SAMPLE_DIR)).unwrap();
    analyze(HostConfig::default(), &compilation.units).unwrap()
}

#[test]
fn test_sample_diagnostics_in_order() {
    let outcome = sample_outcome();
    let got: Vec<(String, RuleCode)> = outcome
        .diagnostics
        .iter()
        .map(|d| (d.location.to_string(), d.code))
        .collect();

    assert_eq!(
        got,
        vec![
            ("Program.cs:13:10".to_string(), RuleCode::ImpliesNotInterface),
            ("Program.cs:13:10".to_string(), RuleCode::ImpliesNotInterface),
            ("Program.cs:37:25".to_string(), RuleCode::CastTargetNotInterface),
            ("Program.cs:39:27".to_string(), RuleCode::CastSourceNotInterface),
            ("Program.cs:41:33".to_string(), RuleCode::UnsafeCast),
            ("Shapes.cs:20:5".to_string(), RuleCode::ImplicationViolated),
        ]
    );
}

#[test]
fn test_sample_messages() {
    let outcome = sample_outcome();
    let messages: Vec<&str> = outcome.diagnostics.iter().map(|d| d.message.as_str()).collect();

    assert!(messages.contains(
        &"Safe cast error: 'To' type parameter must be an interface but is Circle"
    ));
    assert!(messages.contains(
        &"Safe cast error: 'Safely' argument must be typed as an interface, but its type is Circle"
    ));
    assert!(messages.contains(
        &"Safe cast error: trying to cast from IShape to INotImplemented but IShape does not imply INotImplemented"
    ));
    assert!(messages.contains(
        &"Implication error: IShape implies IDrawing yet Square implements IShape but not IDrawing"
    ));
}

#[test]
fn test_sample_report_counts() {
    let outcome = sample_outcome();
    // Circle and Square; SafelyTest is abstract and Program has no interfaces.
    assert_eq!(outcome.report.types_checked, 2);
    // The Circle => Circle attribute is rejected before registration.
    assert_eq!(outcome.report.implications, 2);
    // d1 and n; the To<Circle> and d2 calls carry shape errors.
    assert_eq!(outcome.report.casts_checked, 2);
    assert_eq!(outcome.error_count(), 6);
    assert_eq!(outcome.warning_count(), 0);
}

#[test]
fn test_safe_cast_has_witness() {
    let compilation = load_compilation(Path::new(SAMPLE_DIR)).unwrap();
    let analyzer = Analyzer::new(HostConfig::default(), &compilation.units).unwrap();
    analyzer.run(&compilation.units);

    let table = analyzer.table();
    let ishape = table.get("IShape").unwrap();
    let idrawing = table.get("IDrawing").unwrap();
    let witness = analyzer.system().witness(ishape, idrawing).unwrap();
    assert_eq!(witness.to_string(), "IShape => IDrawing");
}

#[test]
fn test_renamed_cast_call_is_not_recognized() {
    let compilation = load_compilation(Path::new(SAMPLE_DIR)).unwrap();
    let config = HostConfig {
        cast_method: "Surely".into(),
        ..HostConfig::default()
    };
    let outcome = analyze(config, &compilation.units).unwrap();

    assert_eq!(outcome.report.casts_checked, 0);
    assert!(outcome
        .diagnostics
        .iter()
        .all(|d| matches!(d.code, RuleCode::ImpliesNotInterface | RuleCode::ImplicationViolated)));
}
