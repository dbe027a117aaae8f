// SPDX-License-Identifier: MPL-2.0

use std::io::Write;

use log::LevelFilter;

use depsolve_core::backend::DpllBackend;
use depsolve_core::{Dependency, Input, OfflineCatalog, RangeConstraint, SemanticVersion, SemverPricer, SolveError, SolveOptions};

/// Mirrors the teacher's test log setup: `RUST_LOG` makes the solver
/// driver's `log::debug!`/`log::info!` output visible under `cargo test --
/// --nocapture`.
fn init_log() {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Trace)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .is_test(true)
        .try_init();
}

fn v(s: &str) -> SemanticVersion {
    s.parse().unwrap()
}

fn vc(s: &str) -> RangeConstraint {
    RangeConstraint::parse(s).unwrap()
}

type Catalog = OfflineCatalog<String, SemanticVersion, RangeConstraint>;

fn solve(
    input: &Input<String, SemanticVersion, RangeConstraint>,
    catalog: &Catalog,
) -> Result<depsolve_core::solver::Solution<String, SemanticVersion>, SolveError<String>> {
    init_log();
    depsolve_core::solve::<_, _, _, _, _, DpllBackend>(input, catalog, &SemverPricer, &SolveOptions::default(), &mut || {})
}

#[test]
fn s1_trivial() {
    let mut catalog = Catalog::new();
    catalog.add_package_version("A".to_string(), v("1.0.0"));

    let input = Input::new().with_root("A".to_string());
    let solution = solve(&input, &catalog).expect("a solution was not found");

    assert_eq!(solution.answer.len(), 1);
    assert_eq!(solution.answer["A"], v("1.0.0"));
}

#[test]
fn s2_direct_conflict() {
    let mut catalog = Catalog::new();
    catalog.add_dependencies("A".to_string(), v("1.0.0"), vec![Dependency::strong("B".to_string(), vc("=2.0.0"))]);
    catalog.add_package_version("B".to_string(), v("1.0.0"));

    let input = Input::new().with_root("A".to_string());
    let err = solve(&input, &catalog).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("conflict: constraint B @=2.0.0 is not satisfied by B 1.0.0."));
}

#[test]
fn s3_upgrade_preference() {
    let mut catalog = Catalog::new();
    catalog.add_package_version("A".to_string(), v("1.0.0"));
    catalog.add_package_version("A".to_string(), v("1.1.0"));

    let pinned = Input::new()
        .with_root("A".to_string())
        .with_previous_solution("A".to_string(), v("1.0.0"));
    let pinned_solution = solve(&pinned, &catalog).unwrap();
    assert_eq!(pinned_solution.answer["A"], v("1.0.0"));

    let upgrading = Input::new()
        .with_root("A".to_string())
        .with_previous_solution("A".to_string(), v("1.0.0"))
        .with_upgrade("A".to_string());
    let upgraded_solution = solve(&upgrading, &catalog).unwrap();
    assert_eq!(upgraded_solution.answer["A"], v("1.1.0"));
}

#[test]
fn s4_prerelease_avoidance() {
    let mut catalog = Catalog::new();
    catalog.add_package_version("A".to_string(), v("1.0.0-beta"));
    catalog.add_package_version("A".to_string(), v("1.0.0"));

    let input = Input::new().with_root("A".to_string());
    let solution = solve(&input, &catalog).unwrap();
    assert_eq!(solution.answer["A"], v("1.0.0"));
    assert!(!solution.needed_to_use_unanticipated_prereleases);

    let mut prerelease_only = Catalog::new();
    prerelease_only.add_package_version("A".to_string(), v("1.0.0-beta"));
    let input = Input::new().with_root("A".to_string());
    let solution = solve(&input, &prerelease_only).unwrap();
    assert_eq!(solution.answer["A"], v("1.0.0-beta"));
    assert!(solution.needed_to_use_unanticipated_prereleases);
}

#[test]
fn s5_breaking_change_guard() {
    let mut catalog = Catalog::new();
    catalog.add_package_version("A".to_string(), v("1.0.0"));
    catalog.add_package_version("A".to_string(), v("2.0.0"));

    let input = Input::new()
        .with_root("A".to_string())
        .with_constraint("A".to_string(), vc(">=2.0.0"))
        .with_previous_solution("A".to_string(), v("1.0.0"));
    let err = solve(&input, &catalog).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Breaking change required to top-level dependency: A 2.0.0, was 1.0.0"));
    assert!(message.contains("--allow-incompatible-update"));
    assert!(matches!(err, SolveError::BreakingChangeToRoot { .. }));

    let allowed = input.with_allow_incompatible_update(true);
    let solution = solve(&allowed, &catalog).unwrap();
    assert_eq!(solution.answer["A"], v("2.0.0"));
}

#[test]
fn s6_weak_dependency_is_not_forced() {
    let mut catalog = Catalog::new();
    catalog.add_dependencies("A".to_string(), v("1.0.0"), vec![Dependency::weak("B".to_string(), vc("=1.0.0"))]);
    catalog.add_package_version("B".to_string(), v("1.0.0"));
    catalog.add_package_version("B".to_string(), v("2.0.0"));

    let input = Input::new().with_root("A".to_string());
    let solution = solve(&input, &catalog).unwrap();
    assert!(!solution.answer.contains_key("B"));
}

#[test]
fn s6_weak_dependency_constraint_still_applies_if_otherwise_required() {
    let mut catalog = Catalog::new();
    catalog.add_dependencies(
        "A".to_string(),
        v("1.0.0"),
        vec![
            Dependency::weak("B".to_string(), vc("=1.0.0")),
            Dependency::strong("C".to_string(), vc("*")),
        ],
    );
    catalog.add_dependencies("C".to_string(), v("1.0.0"), vec![Dependency::strong("B".to_string(), vc("*"))]);
    catalog.add_package_version("B".to_string(), v("1.0.0"));
    catalog.add_package_version("B".to_string(), v("2.0.0"));

    let input = Input::new().with_root("A".to_string());
    let solution = solve(&input, &catalog).unwrap();
    assert_eq!(solution.answer["B"], v("1.0.0"));
}

#[test]
fn unknown_root_dependency_is_reported() {
    let catalog = Catalog::new();
    let input = Input::new().with_root("ghost".to_string());
    let err = solve(&input, &catalog).unwrap_err();
    assert!(matches!(err, SolveError::UnknownRootDependencies { .. }));
}

#[test]
fn unsatisfiable_top_level_constraint_is_reported() {
    let mut catalog = Catalog::new();
    catalog.add_package_version("A".to_string(), v("1.0.0"));
    let input = Input::new()
        .with_root("A".to_string())
        .with_constraint("A".to_string(), vc(">=2.0.0"));
    let err = solve(&input, &catalog).unwrap_err();
    assert!(matches!(err, SolveError::NoVersionSatisfiesConstraints { .. }));
}

#[test]
fn unknown_package_required_by_a_strong_dependency_is_reported() {
    let mut catalog = Catalog::new();
    catalog.add_dependencies("A".to_string(), v("1.0.0"), vec![Dependency::strong("ghost".to_string(), vc("*"))]);

    let input = Input::new().with_root("A".to_string());
    let err = solve(&input, &catalog).unwrap_err();
    assert!(matches!(err, SolveError::UnknownPackagesRequired { .. }));
}

#[test]
fn all_answers_enumerates_every_optimum_tying_solution() {
    init_log();
    let mut catalog = Catalog::new();
    catalog.add_dependencies(
        "A".to_string(),
        v("1.0.0"),
        vec![Dependency::strong("B".to_string(), vc("*")), Dependency::strong("C".to_string(), vc("*"))],
    );
    catalog.add_package_version("B".to_string(), v("1.0.0"));
    catalog.add_package_version("C".to_string(), v("1.0.0"));

    let input = Input::new().with_root("A".to_string());
    let options = SolveOptions { all_answers: true };
    let solution =
        depsolve_core::solve::<_, _, _, _, _, DpllBackend>(&input, &catalog, &SemverPricer, &options, &mut || {}).unwrap();

    let all_answers = solution.all_answers.expect("all_answers requested");
    assert!(!all_answers.is_empty());
    assert!(all_answers.contains(&solution.answer));
}
