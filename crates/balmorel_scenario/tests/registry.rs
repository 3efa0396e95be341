//! Discovery tests against real directory trees.

use balmorel_scenario::{
    Diagnostic, Role, ScenarioConfig, ScenarioError, ScenarioFilter, ScenarioRegistry,
};
use balmorel_test_utils::ScenarioTree;
use std::path::PathBuf;

fn names(registry: &ScenarioRegistry) -> Vec<&str> {
    registry.scenario_names().collect()
}

/// base: input + output + two years, alt: output + one year, io: input + output only
fn typical_tree() -> ScenarioTree {
    let tree = ScenarioTree::new();
    tree.scenario(
        "base",
        &[
            "base-input.gdx",
            "base-output.gdx",
            "base-output-2030.gdx",
            "base-output-2040.gdx",
            "base-BM.gdx",
        ],
    );
    tree.scenario("alt", &["alt-output.gdx", "alt-output-2030.gdx"]);
    tree.scenario("io", &["io-input.gdx", "io-output.gdx", "notes.txt"]);
    tree.folder("scratch", &["scratch-output.gdx"]);
    tree
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_discovers_scenarios_and_skips_folders() {
    let tree = typical_tree();
    let registry = ScenarioRegistry::discover(tree.root()).unwrap();

    assert!(!registry.is_single_scenario());
    assert_eq!(names(&registry), vec!["alt", "base", "io"]);
    assert!(!registry.contains("scratch"));

    assert_eq!(registry.diagnostics().len(), 1);
    match &registry.diagnostics()[0] {
        Diagnostic::ConfigurationMissing { path, control_file } => {
            assert_eq!(path, &tree.scenario_dir("scratch"));
            assert_eq!(control_file, "balopt.opt");
        }
        other => panic!("unexpected diagnostic: {:?}", other),
    }
}

#[test]
fn test_non_data_files_ignored() {
    let tree = typical_tree();
    let registry = ScenarioRegistry::discover(tree.root()).unwrap();

    let io = registry.get("io").unwrap();
    assert_eq!(io.files().len(), 2);
    assert!(io.other_paths().is_empty());
}

#[test]
fn test_single_scenario_root() {
    let tree = ScenarioTree::new();
    tree.single(&["run-input.gdx", "run-output.gdx", "run-output-2035.gdx"]);
    // Subfolders of a scenario root are not scenarios
    tree.scenario("nested", &["nested-output.gdx"]);

    let registry = ScenarioRegistry::discover(tree.root()).unwrap();
    assert!(registry.is_single_scenario());
    assert_eq!(registry.len(), 1);

    let scenario = registry.scenarios().values().next().unwrap();
    assert_eq!(scenario.path(), tree.root());
    assert_eq!(scenario.years().collect::<Vec<_>>(), vec!["2035"]);
}

#[test]
fn test_control_file_case_insensitive() {
    let tree = ScenarioTree::new();
    tree.write_file("upper/BALOPT.OPT", "");
    tree.write_file("upper/output/u-output.gdx", "");

    let registry = ScenarioRegistry::discover(tree.root()).unwrap();
    assert_eq!(names(&registry), vec!["upper"]);
}

#[test]
fn test_scenario_without_output_folder() {
    let tree = ScenarioTree::new();
    tree.scenario("empty", &[]);

    let registry = ScenarioRegistry::discover(tree.root()).unwrap();
    let empty = registry.get("empty").unwrap();
    assert!(empty.files().is_empty());
    assert!(!empty.has_input_and_output());
}

#[test]
fn test_empty_registry_is_valid() {
    let tree = ScenarioTree::new();
    tree.folder("a", &[]);

    let registry = ScenarioRegistry::discover(tree.root()).unwrap();
    assert!(registry.is_empty());
    assert!(registry.common_years().is_empty());
    assert!(registry.paths_for_role(Role::Output).is_empty());
    assert!(registry
        .diagnostics()
        .iter()
        .any(|d| matches!(d, Diagnostic::EmptyRegistry { .. })));
}

#[test]
fn test_missing_root() {
    let tree = ScenarioTree::new();
    let missing = tree.root().join("nope");

    assert!(matches!(
        ScenarioRegistry::discover(&missing),
        Err(ScenarioError::PathNotFound(p)) if p == missing
    ));

    let file = tree.write_file("file.txt", "");
    assert!(matches!(
        ScenarioRegistry::discover(&file),
        Err(ScenarioError::NotADirectory(_))
    ));
}

#[test]
fn test_custom_extension() {
    let tree = ScenarioTree::new();
    tree.scenario("json", &["j-input.json", "j-output.json", "j-output.gdx"]);

    let config = ScenarioConfig::default().with_store_extension("json");
    let registry = ScenarioRegistry::discover_with_config(tree.root(), config).unwrap();

    let json = registry.get("json").unwrap();
    assert_eq!(json.files().len(), 2);
    assert!(json.has_input_and_output());
}

#[cfg(unix)]
#[test]
fn test_symlinked_scenario_folder() {
    let elsewhere = ScenarioTree::new();
    let real = elsewhere.scenario("real", &["s-input.gdx", "s-output.gdx"]);

    let tree = ScenarioTree::new();
    tree.scenario("local", &["l-output.gdx"]);
    tree.symlink(&real, "linked");

    let registry = ScenarioRegistry::discover(tree.root()).unwrap();
    assert_eq!(names(&registry), vec!["linked", "local"]);
    assert!(registry.diagnostics().is_empty());

    let linked = registry.get("linked").unwrap();
    assert_eq!(linked.path(), tree.scenario_dir("linked"));
    assert!(linked.has_input_and_output());
}

#[cfg(unix)]
#[test]
fn test_symlinked_data_and_control_files() {
    let elsewhere = ScenarioTree::new();
    let input = elsewhere.write_file("shared/s-input.gdx", "");
    let control = elsewhere.write_file("shared/balopt.opt", "");

    let tree = ScenarioTree::new();
    tree.folder("s", &["s-output.gdx"]);
    tree.symlink(&control, "s/balopt.opt");
    let link = tree.symlink(&input, "s/output/s-input.gdx");

    let registry = ScenarioRegistry::discover(tree.root()).unwrap();
    let scenario = registry.get("s").unwrap();
    assert_eq!(scenario.files().len(), 2);
    assert_eq!(scenario.role_path(Role::Input), Some(link.as_path()));
}

#[cfg(unix)]
#[test]
fn test_broken_symlink_is_reported() {
    let tree = ScenarioTree::new();
    tree.scenario("ok", &["ok-output.gdx", "ok-input.gdx"]);
    let dangling = tree.root().join("gone");
    tree.symlink(&dangling, "broken");
    tree.symlink(&dangling, "ok/output/ok-BM.gdx");

    let registry = ScenarioRegistry::discover(tree.root()).unwrap();
    assert_eq!(names(&registry), vec!["ok"]);
    assert_eq!(registry.get("ok").unwrap().files().len(), 2);
    assert!(registry
        .diagnostics()
        .iter()
        .any(|d| matches!(d, Diagnostic::Unreadable { path, .. } if path == &tree.scenario_dir("broken"))));
}

// ============================================================================
// Listings
// ============================================================================

#[test]
fn test_paths_for_role_omits_missing() {
    let tree = typical_tree();
    let registry = ScenarioRegistry::discover(tree.root()).unwrap();

    let inputs = registry.paths_for_role(Role::Input);
    assert_eq!(inputs.keys().collect::<Vec<_>>(), vec!["base", "io"]);
    assert_eq!(
        inputs["base"],
        tree.scenario_dir("base").join("output/base-input.gdx")
    );

    let bm = registry.paths_for_role(Role::Bm);
    assert_eq!(bm.keys().collect::<Vec<_>>(), vec!["base"]);
}

#[test]
fn test_yearly_paths_and_years() {
    let tree = typical_tree();
    let registry = ScenarioRegistry::discover(tree.root()).unwrap();

    let yearly = registry.yearly_paths();
    assert_eq!(yearly.keys().collect::<Vec<_>>(), vec!["alt", "base"]);
    assert_eq!(yearly["base"].len(), 2);

    // io has no yearly files, so nothing is common
    assert!(registry.common_years().is_empty());
    assert_eq!(
        registry.all_years().into_iter().collect::<Vec<_>>(),
        vec!["2030", "2040"]
    );
}

#[test]
fn test_common_years_intersection() {
    let tree = ScenarioTree::new();
    tree.scenario("a", &["a-output-2030.gdx", "a-output-2031.gdx"]);
    tree.scenario("b", &["b-output-2031.gdx", "b-output-2032.gdx"]);
    tree.scenario("c", &["c-output-2031.gdx"]);

    let registry = ScenarioRegistry::discover(tree.root()).unwrap();
    assert_eq!(
        registry.common_years().into_iter().collect::<Vec<_>>(),
        vec!["2031"]
    );
    assert_eq!(registry.all_years().len(), 3);
}

#[test]
fn test_common_years_after_filter() {
    let tree = typical_tree();
    let mut registry = ScenarioRegistry::discover(tree.root()).unwrap();

    registry.filter(ScenarioFilter::HasYearly);
    assert_eq!(
        registry.common_years().into_iter().collect::<Vec<_>>(),
        vec!["2030"]
    );
}

#[test]
fn test_paths_for_file() {
    let tree = typical_tree();
    let registry = ScenarioRegistry::discover(tree.root()).unwrap();

    let found = registry.paths_for_file("alt-output");
    assert_eq!(
        found.into_iter().collect::<Vec<_>>(),
        vec![(
            "alt".to_string(),
            PathBuf::from(tree.scenario_dir("alt").join("output/alt-output.gdx"))
        )]
    );
    assert!(registry.paths_for_file("nothing.gdx").is_empty());
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn test_filters_are_subsets() {
    let tree = typical_tree();
    let full = ScenarioRegistry::discover(tree.root()).unwrap();

    for option in ["all", "inout", "yearly", "both"] {
        let mut registry = full.clone();
        registry.filter_by_option(option).unwrap();
        for name in registry.scenario_names() {
            assert!(full.contains(name), "{} not in the unfiltered registry", name);
        }
    }

    let mut both = full.clone();
    both.filter(ScenarioFilter::HasBoth);
    assert_eq!(names(&both), vec!["base"]);

    let mut inout = full.clone();
    inout.filter(ScenarioFilter::HasInputAndOutput);
    assert_eq!(names(&inout), vec!["base", "io"]);
}

#[test]
fn test_filter_is_destructive() {
    let tree = typical_tree();
    let mut registry = ScenarioRegistry::discover(tree.root()).unwrap();

    registry.filter(ScenarioFilter::HasBoth);
    registry.filter(ScenarioFilter::All);
    assert_eq!(names(&registry), vec!["base"]);
}

#[test]
fn test_unknown_filter_option() {
    let tree = typical_tree();
    let mut registry = ScenarioRegistry::discover(tree.root()).unwrap();

    let err = registry.filter_by_option("sometimes").unwrap_err();
    assert!(matches!(err, ScenarioError::InvalidArgument(_)));
    assert!(err.to_string().contains("sometimes"));
    assert_eq!(registry.len(), 3);
}

// ============================================================================
// Summary
// ============================================================================

#[test]
fn test_summary_report() {
    let tree = typical_tree();
    let registry = ScenarioRegistry::discover(tree.root()).unwrap();

    let text = registry.summary().to_string();
    assert!(text.contains("Multiple Scenarios"));
    assert!(text.contains("Total Scenarios: 3"));
    assert!(text.contains("base"));

    let json = serde_json::to_value(registry.summary()).unwrap();
    assert_eq!(json["single_scenario"], false);
    assert_eq!(json["scenarios"].as_array().unwrap().len(), 3);
    assert_eq!(json["scenarios"][1]["name"], "base");
    assert!(json["scenarios"][1]["year_paths"]["2040"].is_string());
}
