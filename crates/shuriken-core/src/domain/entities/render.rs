//! `{{VAR}}` substitution for generated files.

use std::collections::BTreeMap;

use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase};

/// Variables available to a file template.
///
/// Immutable after creation; `with_*` methods return a new context.
///
/// | Variable        | Example          |
/// |-----------------|------------------|
/// | `NAME`          | "user card"      |
/// | `NAME_SNAKE`    | "user_card"      |
/// | `NAME_KEBAB`    | "user-card"      |
/// | `NAME_PASCAL`   | "UserCard"       |
/// | `NAME_CAMEL`    | "userCard"       |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context seeded with `NAME` and its case variants.
    pub fn for_name(name: impl Into<String>) -> Self {
        Self::new().with_name("NAME", name)
    }

    /// Add `key` and `key_SNAKE` / `_KEBAB` / `_PASCAL` / `_CAMEL` variants.
    pub fn with_name(mut self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        self.variables
            .insert(format!("{key}_SNAKE"), value.to_snake_case());
        self.variables
            .insert(format!("{key}_KEBAB"), value.to_kebab_case());
        self.variables
            .insert(format!("{key}_PASCAL"), value.to_pascal_case());
        self.variables
            .insert(format!("{key}_CAMEL"), value.to_lower_camel_case());
        self.variables.insert(key.to_string(), value);
        self
    }

    /// Later values replace earlier ones, built-ins included.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn with_variables<'a>(
        mut self,
        vars: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) -> Self {
        for (k, v) in vars {
            self.variables.insert(k.clone(), v.clone());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{KEY}}` placeholder with its value.
    ///
    /// Unknown placeholders are left as-is.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();
        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            if result.contains(&placeholder) {
                result = result.replace(&placeholder, value);
            }
        }
        result
    }
}
