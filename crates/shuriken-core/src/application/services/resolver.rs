//! Migration path resolution.

use semver::Version;
use tracing::debug;

use crate::application::plugin::MigrationDefinition;

/// The ordered migrations that take a project from one version to another.
///
/// Computed on demand, never stored. Every step's target is strictly above
/// `from` and at most `to`, in ascending semver precedence.
#[derive(Debug, Clone, Default)]
pub struct MigrationPath {
    steps: Vec<MigrationDefinition>,
}

impl MigrationPath {
    /// Select and order the migrations between `from` (exclusive) and `to`
    /// (inclusive).
    ///
    /// `from == to` and `to < from` both give an empty path.
    pub fn resolve(migrations: &[MigrationDefinition], from: &Version, to: &Version) -> Self {
        let mut steps: Vec<MigrationDefinition> = migrations
            .iter()
            .filter(|m| &m.target_version > from && &m.target_version <= to)
            .cloned()
            .collect();
        // Stable: equal targets keep declaration order.
        steps.sort_by(|a, b| a.target_version.cmp(&b.target_version));

        debug!(
            from = %from,
            to = %to,
            available = migrations.len(),
            selected = steps.len(),
            "Resolved migration path"
        );
        Self { steps }
    }

    pub fn steps(&self) -> &[MigrationDefinition] {
        &self.steps
    }

    pub fn versions(&self) -> Vec<Version> {
        self.steps.iter().map(|m| m.target_version.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn migrations(targets: &[&str]) -> Vec<MigrationDefinition> {
        targets
            .iter()
            .map(|t| MigrationDefinition::from_fn(v(t), format!("to {t}"), |_, _| Ok(())))
            .collect()
    }

    #[test]
    fn sorts_and_filters_by_range() {
        let all = migrations(&["1.2.0", "1.1.0", "2.0.0"]);
        let path = MigrationPath::resolve(&all, &v("1.0.0"), &v("1.2.0"));
        assert_eq!(path.versions(), vec![v("1.1.0"), v("1.2.0")]);
    }

    #[test]
    fn lower_bound_is_exclusive_upper_is_inclusive() {
        let all = migrations(&["1.0.0", "1.1.0", "1.2.0"]);
        let path = MigrationPath::resolve(&all, &v("1.0.0"), &v("1.1.0"));
        assert_eq!(path.versions(), vec![v("1.1.0")]);
    }

    #[test]
    fn same_version_gives_empty_path() {
        let all = migrations(&["1.1.0"]);
        assert!(MigrationPath::resolve(&all, &v("1.1.0"), &v("1.1.0")).is_empty());
    }

    #[test]
    fn downgrade_gives_empty_path() {
        let all = migrations(&["1.1.0", "1.5.0", "2.0.0"]);
        assert!(MigrationPath::resolve(&all, &v("2.0.0"), &v("1.0.0")).is_empty());
    }

    #[test]
    fn prereleases_order_before_their_release() {
        let all = migrations(&["2.0.0", "2.0.0-rc.1", "2.0.0-beta.2", "1.9.0"]);
        let path = MigrationPath::resolve(&all, &v("1.0.0"), &v("2.0.0"));
        assert_eq!(
            path.versions(),
            vec![v("1.9.0"), v("2.0.0-beta.2"), v("2.0.0-rc.1"), v("2.0.0")]
        );
    }

    #[test]
    fn no_migrations_gives_empty_path() {
        assert!(MigrationPath::resolve(&[], &v("1.0.0"), &v("3.0.0")).is_empty());
    }
}
