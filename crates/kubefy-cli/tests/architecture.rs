use arch_lint::rules::{NoErrorSwallowing, NoSilentResultDrop};
use arch_lint::{Analyzer, Severity};

/// Runs AL003 (no-error-swallowing) and AL013 (no-silent-result-drop) over
/// the kubefy crates. Every failure in kubefy-core, kubefy-dockerfile and
/// kubefy-manifest must reach `main` so it maps to exit code 1, 2 or 3; a
/// swallowed error would end a failed run with status 0. Test code is
/// excluded.
#[test]
fn errors_reach_the_exit_code_mapping() {
    let crates = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("crates directory");

    let analyzer = Analyzer::builder()
        .root(crates)
        .exclude("**/target/**")
        .exclude("**/tests/**")
        .rule(NoErrorSwallowing::new())
        .rule(NoSilentResultDrop::new())
        .build()
        .expect("build analyzer");

    let result = analyzer.analyze().expect("analyze");

    if result.has_violations_at(Severity::Warning) {
        let report = result.format_test_report(Severity::Warning);
        panic!("{report}");
    }
}
