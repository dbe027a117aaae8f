// SPDX-License-Identifier: MPL-2.0

use depsolve_core::backend::DpllBackend;
use depsolve_core::{Dependency, Input, OfflineCatalog, RangeConstraint, SemverPricer, SolveOptions};

// `root` depends on `menu` and `icons`
// `menu` depends on `dropdown`
// `dropdown` depends on `icons`
// `icons` has no dependency
fn main() {
    let mut catalog: OfflineCatalog<&str, depsolve_core::SemanticVersion, RangeConstraint> = OfflineCatalog::new();
    let any = || RangeConstraint::any();
    catalog.add_dependencies(
        "root",
        "1.0.0".parse().unwrap(),
        vec![Dependency::strong("menu", any()), Dependency::strong("icons", any())],
    );
    catalog.add_dependencies("menu", "1.0.0".parse().unwrap(), vec![Dependency::strong("dropdown", any())]);
    catalog.add_dependencies("dropdown", "1.0.0".parse().unwrap(), vec![Dependency::strong("icons", any())]);
    catalog.add_package_version("icons", "1.0.0".parse().unwrap());

    let input = Input::new().with_root("root");
    let solution = depsolve_core::solve::<_, _, _, _, _, DpllBackend>(
        &input,
        &catalog,
        &SemverPricer,
        &SolveOptions::default(),
        &mut || {},
    );
    println!("Solution: {solution:?}");
}
