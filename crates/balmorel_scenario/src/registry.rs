//! Scenario discovery under a root directory.
//!
//! A root is either a scenario itself (it holds the control file) or a parent
//! whose immediate subdirectories are scenarios. Data files are read from each
//! scenario's output subdirectory, non-recursively.

use crate::config::ScenarioConfig;
use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::filter::ScenarioFilter;
use crate::patterns::FileClassifier;
use crate::scan_path::validate_root;
use crate::summary::RegistrySummary;
use crate::types::{Role, ScenarioDescriptor};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// All scenarios found under a root.
#[derive(Debug, Clone)]
pub struct ScenarioRegistry {
    root: PathBuf,
    config: ScenarioConfig,
    classifier: FileClassifier,
    scenarios: BTreeMap<String, ScenarioDescriptor>,
    single_scenario: bool,
    diagnostics: Vec<Diagnostic>,
}

impl ScenarioRegistry {
    /// Discover scenarios under `root` with the default layout.
    pub fn discover(root: impl AsRef<Path>) -> Result<Self> {
        Self::discover_with_config(root, ScenarioConfig::default())
    }

    /// Discover scenarios under `root`.
    ///
    /// Fails only when `root` is missing or not a directory. Subdirectories
    /// without a control file are skipped with a diagnostic, and an empty result
    /// is a valid registry.
    pub fn discover_with_config(root: impl AsRef<Path>, config: ScenarioConfig) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        validate_root(&root)?;
        let classifier = config.classifier()?;

        let mut registry = Self {
            root,
            config,
            classifier,
            scenarios: BTreeMap::new(),
            single_scenario: false,
            diagnostics: Vec::new(),
        };
        registry.scan()?;
        Ok(registry)
    }

    fn scan(&mut self) -> Result<()> {
        if let Some(control_file) = find_control_file(&self.root, &self.config.control_file)? {
            self.single_scenario = true;
            let descriptor = self.scan_scenario(&self.root, control_file)?;
            info!(
                scenario = %descriptor.name(),
                files = descriptor.files().len(),
                "Detected single scenario"
            );
            self.scenarios.insert(descriptor.name().to_string(), descriptor);
        } else {
            for entry in WalkDir::new(&self.root)
                .min_depth(1)
                .max_depth(1)
                .follow_links(true)
                .sort_by_file_name()
            {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) if e.depth() == 0 => return Err(e.into()),
                    Err(e) => {
                        // Broken symlink or unreadable entry
                        let path = e.path().unwrap_or(&self.root).to_path_buf();
                        self.record(Diagnostic::Unreadable {
                            path,
                            message: e.to_string(),
                        });
                        continue;
                    }
                };
                if !entry.file_type().is_dir() {
                    continue;
                }
                let dir = entry.path();

                let scanned = find_control_file(dir, &self.config.control_file).and_then(
                    |control_file| match control_file {
                        Some(control_file) => self.scan_scenario(dir, control_file).map(Some),
                        None => Ok(None),
                    },
                );

                match scanned {
                    Ok(Some(descriptor)) => {
                        info!(
                            scenario = %descriptor.name(),
                            files = descriptor.files().len(),
                            "Found scenario"
                        );
                        self.scenarios.insert(descriptor.name().to_string(), descriptor);
                    }
                    Ok(None) => self.record(Diagnostic::ConfigurationMissing {
                        path: dir.to_path_buf(),
                        control_file: self.config.control_file.clone(),
                    }),
                    Err(e) => self.record(Diagnostic::Unreadable {
                        path: dir.to_path_buf(),
                        message: e.to_string(),
                    }),
                }
            }
        }

        if self.scenarios.is_empty() {
            self.record(Diagnostic::EmptyRegistry {
                root: self.root.clone(),
            });
        }
        Ok(())
    }

    fn scan_scenario(&self, dir: &Path, control_file: PathBuf) -> Result<ScenarioDescriptor> {
        let name = scenario_name(dir);
        let output_dir = dir.join(&self.config.output_dir);

        let mut files = BTreeMap::new();
        if output_dir.is_dir() {
            for entry in WalkDir::new(&output_dir)
                .min_depth(1)
                .max_depth(1)
                .follow_links(true)
            {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!(scenario = %name, error = %e, "Skipping unreadable data file");
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }
                let filename = entry.file_name().to_string_lossy().to_string();
                if self.classifier.has_extension(&filename) {
                    files.insert(filename, entry.path().to_path_buf());
                }
            }
        } else {
            debug!(scenario = %name, path = %output_dir.display(), "No output folder");
        }

        Ok(ScenarioDescriptor::new(
            name,
            dir,
            control_file,
            files,
            &self.classifier,
        ))
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.diagnostics.push(diagnostic);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn classifier(&self) -> &FileClassifier {
        &self.classifier
    }

    /// True when the root itself is the (only) scenario.
    pub fn is_single_scenario(&self) -> bool {
        self.single_scenario
    }

    pub fn scenarios(&self) -> &BTreeMap<String, ScenarioDescriptor> {
        &self.scenarios
    }

    /// Scenario names in ascending order.
    pub fn scenario_names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&ScenarioDescriptor> {
        self.scenarios.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scenarios.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Skip and empty-registry diagnostics raised during discovery.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    // ========================================================================
    // Filtering
    // ========================================================================

    /// Narrow the registry in place. Removed scenarios are never restored.
    pub fn filter(&mut self, filter: ScenarioFilter) -> &BTreeMap<String, ScenarioDescriptor> {
        let before = self.scenarios.len();
        self.scenarios.retain(|_, scenario| filter.matches(scenario));
        info!(
            filter = %filter,
            before,
            after = self.scenarios.len(),
            "Filtered scenarios"
        );
        &self.scenarios
    }

    /// Parse a filter option (`inout`, `yearly`, `both`, `all` and aliases) and apply it.
    pub fn filter_by_option(&mut self, option: &str) -> Result<&BTreeMap<String, ScenarioDescriptor>> {
        let filter: ScenarioFilter = option.parse()?;
        Ok(self.filter(filter))
    }

    // ========================================================================
    // Cross-scenario listings
    // ========================================================================

    /// Scenario -> file for a fixed role; scenarios without that file are omitted.
    pub fn paths_for_role(&self, role: Role) -> BTreeMap<String, PathBuf> {
        self.scenarios
            .iter()
            .filter_map(|(name, scenario)| {
                scenario
                    .role_path(role)
                    .map(|path| (name.clone(), path.to_path_buf()))
            })
            .collect()
    }

    /// Scenario -> (year -> file); scenarios without yearly files are omitted.
    pub fn yearly_paths(&self) -> BTreeMap<String, BTreeMap<String, PathBuf>> {
        self.scenarios
            .iter()
            .filter(|(_, scenario)| scenario.has_yearly())
            .map(|(name, scenario)| (name.clone(), scenario.year_paths().clone()))
            .collect()
    }

    /// Scenario -> file for an exact filename (extension appended when missing).
    pub fn paths_for_file(&self, filename: &str) -> BTreeMap<String, PathBuf> {
        let filename = self.classifier.with_extension(filename);
        self.scenarios
            .iter()
            .filter_map(|(name, scenario)| {
                scenario
                    .lookup_file(&filename)
                    .map(|path| (name.clone(), path.to_path_buf()))
            })
            .collect()
    }

    /// Years present in every scenario. Empty for an empty registry.
    pub fn common_years(&self) -> BTreeSet<String> {
        let mut scenarios = self.scenarios.values();
        let Some(first) = scenarios.next() else {
            return BTreeSet::new();
        };
        let mut common: BTreeSet<String> = first.years().map(str::to_string).collect();
        for scenario in scenarios {
            common.retain(|year| scenario.year_path(year).is_some());
        }
        common
    }

    /// Years present in at least one scenario.
    pub fn all_years(&self) -> BTreeSet<String> {
        self.scenarios
            .values()
            .flat_map(|scenario| scenario.years().map(str::to_string))
            .collect()
    }

    /// Printable (and serializable) overview of the registry.
    pub fn summary(&self) -> RegistrySummary<'_> {
        RegistrySummary::new(self)
    }
}

/// Locate the control file directly inside `dir`, ignoring case.
fn find_control_file(dir: &Path, control_file: &str) -> Result<Option<PathBuf>> {
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            // The folder itself cannot be read
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(_) => continue,
        };
        if entry.file_type().is_file()
            && entry
                .file_name()
                .to_str()
                .map(|name| name.eq_ignore_ascii_case(control_file))
                .unwrap_or(false)
        {
            return Ok(Some(entry.into_path()));
        }
    }
    Ok(None)
}

fn scenario_name(dir: &Path) -> String {
    if let Some(name) = dir.file_name() {
        return name.to_string_lossy().to_string();
    }
    dir.canonicalize()
        .ok()
        .and_then(|path| path.file_name().map(|name| name.to_string_lossy().to_string()))
        .unwrap_or_else(|| dir.display().to_string())
}
