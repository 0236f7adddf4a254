//! What kind of frontend project shuriken is running in.

use std::collections::BTreeMap;
use std::fmt;

use semver::VersionReq;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectType {
    Next,
    Vite,
    React,
    #[default]
    Other,
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Next => "next",
            Self::Vite => "vite",
            Self::React => "react",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// Facts about the project root, gathered once per invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectContext {
    pub is_typescript: bool,
    pub project_type: ProjectType,
    pub node_engine: Option<VersionReq>,
    pub has_storybook: bool,
    pub has_unit_tests: bool,
}

/// The slice of `package.json` detection cares about.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson {
    #[serde(default)]
    engines: BTreeMap<String, String>,
    #[serde(default)]
    scripts: BTreeMap<String, String>,
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
    #[serde(default)]
    dev_dependencies: BTreeMap<String, String>,
}

impl PackageJson {
    fn depends_on(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }
}

const UNIT_TEST_MARKERS: &[&str] = &[
    "jest.config.js",
    "jest.config.ts",
    "vitest.config.js",
    "vitest.config.ts",
    "mocha.opts",
    "tests",
    "__tests__",
];

impl ProjectContext {
    /// Derive the context from path existence checks and the raw `package.json` text.
    ///
    /// `exists` answers for paths relative to the project root. A missing or
    /// malformed `package.json` counts as empty.
    pub fn analyze(exists: impl Fn(&str) -> bool, package_json: Option<&str>) -> Self {
        let pkg: PackageJson = package_json
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();

        let node_engine = pkg
            .engines
            .get("node")
            .and_then(|req| VersionReq::parse(req.trim()).ok());

        let has_storybook = exists(".storybook")
            || pkg
                .scripts
                .keys()
                .any(|k| k.to_ascii_lowercase().contains("storybook"));

        let has_unit_tests = UNIT_TEST_MARKERS.iter().any(|m| exists(m))
            || pkg.scripts.keys().any(|k| {
                let k = k.to_ascii_lowercase();
                k == "test" || k.starts_with("test:") || k.contains(":test:")
            });

        Self {
            is_typescript: exists("tsconfig.json"),
            project_type: detect_type(&exists, &pkg),
            node_engine,
            has_storybook,
            has_unit_tests,
        }
    }
}

fn detect_type(exists: &impl Fn(&str) -> bool, pkg: &PackageJson) -> ProjectType {
    if exists("next.config.js") || exists("next.config.mjs") {
        return ProjectType::Next;
    }
    if exists("vite.config.ts") || exists("vite.config.js") {
        return ProjectType::Vite;
    }
    if pkg.depends_on("next") {
        return ProjectType::Next;
    }
    let dev_uses_vite = pkg.scripts.get("dev").is_some_and(|s| s.contains("vite"));
    if dev_uses_vite || pkg.depends_on("vite") {
        return ProjectType::Vite;
    }
    if pkg.depends_on("react-scripts") {
        return ProjectType::React;
    }
    ProjectType::Other
}
