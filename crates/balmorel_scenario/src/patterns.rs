//! Ordered filename classification table.
//!
//! Every data file of a scenario lands in exactly one slot. Rules are tried in
//! table order and the first match wins, so the year-tagged output rule sits
//! ahead of the plain output suffix.
//!
//! | order | rule                          | slot          |
//! |-------|-------------------------------|---------------|
//! | 1     | `<base>-output-<YYYY>.<ext>`  | year `YYYY`   |
//! | 2     | `<base>-output.<ext>`         | Output        |
//! | 3     | `<base>-input.<ext>`          | Input         |
//! | 4     | `<base>-BM.<ext>`             | BM            |
//! | 5     | `<base>-Basis.<ext>`          | Basis         |
//! | -     | anything else                 | other         |
//!
//! All comparisons ignore ASCII case.

use crate::error::{Result, ScenarioError};
use crate::types::Role;
use regex::{Regex, RegexBuilder};
use std::path::Path;

/// Slot a filename was classified into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileClass {
    /// One of the fixed roles (BM, Basis, Input, Output)
    Role(Role),
    /// Year-tagged output file, carrying the 4-digit year
    Year(String),
    /// Matched no rule; kept but never indexed
    Other,
}

#[derive(Debug, Clone)]
enum Matcher {
    YearTagged(Regex),
    Suffix(String),
}

/// One row of the classification table.
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    role: Role,
    matcher: Matcher,
}

impl ClassificationRule {
    /// Role this rule assigns.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Human-readable form of the rule.
    pub fn pattern(&self) -> &str {
        match &self.matcher {
            Matcher::YearTagged(re) => re.as_str(),
            Matcher::Suffix(suffix) => suffix,
        }
    }

    fn classify(&self, filename: &str) -> Option<FileClass> {
        match &self.matcher {
            Matcher::YearTagged(re) => re
                .captures(filename)
                .and_then(|caps| caps.get(2))
                .map(|year| FileClass::Year(year.as_str().to_string())),
            Matcher::Suffix(suffix) => {
                ends_with_ignore_case(filename, suffix).then_some(FileClass::Role(self.role))
            }
        }
    }
}

/// Compiled classification table for one data file extension.
#[derive(Debug, Clone)]
pub struct FileClassifier {
    extension: String,
    rules: Vec<ClassificationRule>,
}

impl FileClassifier {
    /// Build the table for `extension` (leading dot optional).
    pub fn new(extension: &str) -> Result<Self> {
        let extension = extension.trim().trim_start_matches('.').to_string();
        if extension.is_empty() {
            return Err(ScenarioError::Config(
                "store extension must not be empty".to_string(),
            ));
        }

        let year_pattern = format!(r"^(.+)-output-(\d{{4}})\.{}$", regex::escape(&extension));
        let year_regex = RegexBuilder::new(&year_pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ScenarioError::Pattern(format!("{}: {}", year_pattern, e)))?;

        let suffix = |marker: &str| format!("-{}.{}", marker, extension);
        let rules = vec![
            ClassificationRule {
                role: Role::OutputYear,
                matcher: Matcher::YearTagged(year_regex),
            },
            ClassificationRule {
                role: Role::Output,
                matcher: Matcher::Suffix(suffix("output")),
            },
            ClassificationRule {
                role: Role::Input,
                matcher: Matcher::Suffix(suffix("input")),
            },
            ClassificationRule {
                role: Role::Bm,
                matcher: Matcher::Suffix(suffix("BM")),
            },
            ClassificationRule {
                role: Role::Basis,
                matcher: Matcher::Suffix(suffix("Basis")),
            },
        ];

        Ok(Self { extension, rules })
    }

    /// Data file extension, without the dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Rules in precedence order.
    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Classify a bare filename. First matching rule wins.
    pub fn classify(&self, filename: &str) -> FileClass {
        self.rules
            .iter()
            .find_map(|rule| rule.classify(filename))
            .unwrap_or(FileClass::Other)
    }

    /// True if `filename` carries the data file extension.
    pub fn has_extension(&self, filename: &str) -> bool {
        has_extension(filename, &self.extension)
    }

    /// Append the data file extension unless already present.
    pub fn with_extension(&self, filename: &str) -> String {
        with_extension(filename, &self.extension)
    }
}

pub(crate) fn has_extension(filename: &str, extension: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

pub(crate) fn with_extension(filename: &str, extension: &str) -> String {
    if has_extension(filename, extension) {
        filename.to_string()
    } else {
        format!("{}.{}", filename, extension)
    }
}

fn ends_with_ignore_case(value: &str, suffix: &str) -> bool {
    value.len() >= suffix.len()
        && value
            .get(value.len() - suffix.len()..)
            .map(|tail| tail.eq_ignore_ascii_case(suffix))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn gdx() -> FileClassifier {
        FileClassifier::new("gdx").unwrap()
    }

    #[test]
    fn classify_fixed_roles() {
        let classifier = gdx();
        assert_eq!(classifier.classify("bb3-output.gdx"), FileClass::Role(Role::Output));
        assert_eq!(classifier.classify("bb3-input.gdx"), FileClass::Role(Role::Input));
        assert_eq!(classifier.classify("bb3-BM.gdx"), FileClass::Role(Role::Bm));
        assert_eq!(classifier.classify("bb3-Basis.gdx"), FileClass::Role(Role::Basis));
        assert_eq!(classifier.classify("bb3-misc.gdx"), FileClass::Other);
    }

    #[test]
    fn classify_year_tagged_output() {
        let classifier = gdx();
        assert_eq!(
            classifier.classify("foo-output-1999.gdx"),
            FileClass::Year("1999".to_string())
        );
        assert_eq!(
            classifier.classify("bb3_AHC-output-2037.GDX"),
            FileClass::Year("2037".to_string())
        );
    }

    #[test]
    fn classify_ignores_case() {
        let classifier = gdx();
        assert_eq!(classifier.classify("X-OUTPUT.GDX"), FileClass::Role(Role::Output));
        assert_eq!(classifier.classify("x-bm.gdx"), FileClass::Role(Role::Bm));
        assert_eq!(classifier.classify("x-basis.Gdx"), FileClass::Role(Role::Basis));
    }

    #[test]
    fn malformed_years_are_other() {
        let classifier = gdx();
        assert_eq!(classifier.classify("x-output-203.gdx"), FileClass::Other);
        assert_eq!(classifier.classify("x-output-20301.gdx"), FileClass::Other);
        assert_eq!(classifier.classify("-output-2030.gdx"), FileClass::Other);
        assert_eq!(classifier.classify("x-output-2030.txt"), FileClass::Other);
    }

    #[test]
    fn rule_order_is_fixed() {
        let roles: Vec<Role> = gdx().rules().iter().map(|r| r.role()).collect();
        assert_eq!(
            roles,
            vec![Role::OutputYear, Role::Output, Role::Input, Role::Bm, Role::Basis]
        );
        assert_eq!(gdx().rules()[1].pattern(), "-output.gdx");
    }

    #[test]
    fn custom_extension() {
        let classifier = FileClassifier::new(".json").unwrap();
        assert_eq!(classifier.extension(), "json");
        assert_eq!(classifier.classify("a-input.json"), FileClass::Role(Role::Input));
        assert_eq!(classifier.classify("a-input.gdx"), FileClass::Other);
        assert_eq!(
            classifier.classify("a-output-2040.json"),
            FileClass::Year("2040".to_string())
        );
    }

    #[test]
    fn extension_helpers() {
        let classifier = gdx();
        assert!(classifier.has_extension("a.gdx"));
        assert!(classifier.has_extension("a.GDX"));
        assert!(!classifier.has_extension("a.gdx.bak"));
        assert_eq!(classifier.with_extension("a-input"), "a-input.gdx");
        assert_eq!(classifier.with_extension("a-input.gdx"), "a-input.gdx");
    }

    proptest! {
        #[test]
        fn year_tagged_names_never_classify_as_output(
            base in "[A-Za-z0-9_]{1,12}",
            year in 1000u32..10000u32,
        ) {
            let filename = format!("{}-output-{}.gdx", base, year);
            prop_assert_eq!(gdx().classify(&filename), FileClass::Year(year.to_string()));
        }

        #[test]
        fn rules_never_overlap(name in "[A-Za-z0-9_.-]{0,24}") {
            let classifier = gdx();
            let matching = classifier
                .rules()
                .iter()
                .filter(|rule| rule.classify(&name).is_some())
                .count();
            prop_assert!(matching <= 1);
            if matching == 0 {
                prop_assert_eq!(classifier.classify(&name), FileClass::Other);
            }
        }
    }
}
