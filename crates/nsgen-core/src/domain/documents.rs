//! Typed views over the JSON configuration files of a workspace.
//!
//! Each document wraps a `serde_json::Value` read from the tree and exposes
//! only the edits the transform needs, each with an explicit merge rule:
//! maps are unioned, path lists are appended without duplicates. Nothing is
//! ever removed. Key order of the original file is kept (`preserve_order`).

use serde_json::{Map, Value};

use crate::domain::{
    entities::{common::TreePath, tree::VirtualTree},
    error::DomainError,
    registry::{self, DependencyDef},
};

// ── helpers ──────────────────────────────────────────────────────────────────

/// Get `value[key]` as an object, creating it when absent.
fn object_entry<'a>(
    value: &'a mut Map<String, Value>,
    key: &str,
    path: &TreePath,
    pointer: &str,
) -> Result<&'a mut Map<String, Value>, DomainError> {
    value
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| DomainError::UnexpectedJsonShape {
            path: path.to_string(),
            pointer: pointer.to_string(),
            expected: "an object",
        })
}

/// Get `value[key]` as an array, creating it when absent.
fn array_entry<'a>(
    value: &'a mut Map<String, Value>,
    key: &str,
    path: &TreePath,
    pointer: &str,
) -> Result<&'a mut Vec<Value>, DomainError> {
    value
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| DomainError::UnexpectedJsonShape {
            path: path.to_string(),
            pointer: pointer.to_string(),
            expected: "an array",
        })
}

/// Append each item that is not already present, keeping order.
fn append_unique(target: &mut Vec<Value>, items: &[String]) {
    for item in items {
        if !target.iter().any(|v| v.as_str() == Some(item.as_str())) {
            target.push(Value::String(item.clone()));
        }
    }
}

fn load_object(
    tree: &VirtualTree,
    path: &TreePath,
) -> Result<Map<String, Value>, DomainError> {
    match tree.read_json(path)? {
        Value::Object(map) => Ok(map),
        _ => Err(DomainError::UnexpectedJsonShape {
            path: path.to_string(),
            pointer: "/".into(),
            expected: "an object",
        }),
    }
}

fn string_list(value: Option<&Value>) -> Vec<&str> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

// ── package.json ─────────────────────────────────────────────────────────────

/// `/package.json`.
#[derive(Debug, Clone)]
pub struct PackageJson {
    path: TreePath,
    root: Map<String, Value>,
}

impl PackageJson {
    pub fn load(tree: &VirtualTree) -> Result<Self, DomainError> {
        let path = TreePath::new(registry::PACKAGE_JSON_PATH)?;
        let root = load_object(tree, &path)?;
        Ok(Self { path, root })
    }

    pub fn add_dependencies(&mut self, deps: &[DependencyDef]) -> Result<(), DomainError> {
        self.merge_map("dependencies", deps.iter().map(|d| (d.name, d.version)))
    }

    pub fn add_dev_dependencies(&mut self, deps: &[DependencyDef]) -> Result<(), DomainError> {
        self.merge_map("devDependencies", deps.iter().map(|d| (d.name, d.version)))
    }

    pub fn add_scripts<'a>(
        &mut self,
        scripts: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<(), DomainError> {
        self.merge_map("scripts", scripts)
    }

    /// Set `nativescript.id`, keeping any other keys of that block.
    pub fn set_nativescript_id(&mut self, id: &str) -> Result<(), DomainError> {
        let block = object_entry(&mut self.root, "nativescript", &self.path, "/nativescript")?;
        block.insert("id".into(), Value::String(id.into()));
        Ok(())
    }

    pub fn dependency(&self, name: &str) -> Option<&str> {
        self.lookup("dependencies", name)
    }

    pub fn dev_dependency(&self, name: &str) -> Option<&str> {
        self.lookup("devDependencies", name)
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.lookup("scripts", name)
    }

    pub fn save(self, tree: &mut VirtualTree) -> Result<(), DomainError> {
        tree.write_json(&self.path, &Value::Object(self.root))
    }

    /// Map-union: new keys are added, existing keys take the new value.
    fn merge_map<'a>(
        &mut self,
        key: &str,
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<(), DomainError> {
        let pointer = format!("/{key}");
        let map = object_entry(&mut self.root, key, &self.path, &pointer)?;
        for (name, value) in entries {
            map.insert(name.to_string(), Value::String(value.to_string()));
        }
        Ok(())
    }

    fn lookup(&self, section: &str, name: &str) -> Option<&str> {
        self.root.get(section)?.get(name)?.as_str()
    }
}

// ── tsconfig*.json ───────────────────────────────────────────────────────────

/// Any TypeScript project config (`tsconfig.json`, `tsconfig.app.json`,
/// `tsconfig.tns.json`).
#[derive(Debug, Clone)]
pub struct TsConfig {
    path: TreePath,
    root: Map<String, Value>,
}

impl TsConfig {
    pub fn load(tree: &VirtualTree, path: &TreePath) -> Result<Self, DomainError> {
        let root = load_object(tree, path)?;
        Ok(Self {
            path: path.clone(),
            root,
        })
    }

    /// Append `targets` to `compilerOptions.paths[alias]`, skipping entries
    /// already listed. Order of `targets` is resolution precedence.
    pub fn add_path_mapping(&mut self, alias: &str, targets: &[String]) -> Result<(), DomainError> {
        let compiler_options =
            object_entry(&mut self.root, "compilerOptions", &self.path, "/compilerOptions")?;
        let paths = object_entry(
            compiler_options,
            "paths",
            &self.path,
            "/compilerOptions/paths",
        )?;
        let pointer = format!("/compilerOptions/paths/{alias}");
        let list = array_entry(paths, alias, &self.path, &pointer)?;
        append_unique(list, targets);
        Ok(())
    }

    /// Append to the explicit `files` list, skipping entries already listed.
    pub fn add_files(&mut self, files: &[String]) -> Result<(), DomainError> {
        let list = array_entry(&mut self.root, "files", &self.path, "/files")?;
        append_unique(list, files);
        Ok(())
    }

    pub fn path_mapping(&self, alias: &str) -> Vec<&str> {
        string_list(
            self.root
                .get("compilerOptions")
                .and_then(|c| c.get("paths"))
                .and_then(|p| p.get(alias)),
        )
    }

    pub fn files(&self) -> Vec<&str> {
        string_list(self.root.get("files"))
    }

    pub fn path(&self) -> &TreePath {
        &self.path
    }

    pub fn save(self, tree: &mut VirtualTree) -> Result<(), DomainError> {
        tree.write_json(&self.path, &Value::Object(self.root))
    }
}

// ── angular.json ─────────────────────────────────────────────────────────────

/// What the transform needs to know about one workspace project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    /// Project root relative to the workspace, `""` for the root project.
    pub root: String,
    /// Source root relative to the workspace, e.g. `src`.
    pub source_root: String,
    /// Component selector prefix, if configured.
    pub prefix: Option<String>,
    /// The tsconfig used by the web build.
    pub web_tsconfig: TreePath,
}

/// `/angular.json`.
#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    path: TreePath,
    root: Map<String, Value>,
}

impl WorkspaceConfig {
    pub fn load(tree: &VirtualTree) -> Result<Self, DomainError> {
        let path = TreePath::new(registry::WORKSPACE_CONFIG_PATH)?;
        let root = load_object(tree, &path)?;
        Ok(Self { path, root })
    }

    pub fn project_names(&self) -> Vec<String> {
        self.root
            .get("projects")
            .and_then(Value::as_object)
            .map(|p| p.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Resolve a project by name.
    ///
    /// `sourceRoot` falls back to `<root>/src`; the web tsconfig comes from
    /// the build target's `tsConfig` option and falls back to
    /// `tsconfig.app.json`.
    pub fn project(&self, name: &str) -> Result<ProjectInfo, DomainError> {
        let project = self
            .root
            .get("projects")
            .and_then(|p| p.get(name))
            .and_then(Value::as_object)
            .ok_or_else(|| DomainError::ProjectNotFound {
                project: name.to_string(),
                available: self.project_names(),
            })?;

        let root = project
            .get("root")
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim_matches('/')
            .to_string();

        let source_root = match project.get("sourceRoot").and_then(Value::as_str) {
            Some(s) => s.trim_matches('/').to_string(),
            None if root.is_empty() => "src".to_string(),
            None => format!("{root}/src"),
        };

        let prefix = project
            .get("prefix")
            .and_then(Value::as_str)
            .map(str::to_string);

        let web_tsconfig = project
            .get("architect")
            .and_then(|a| a.get("build"))
            .and_then(|b| b.get("options"))
            .and_then(|o| o.get("tsConfig"))
            .and_then(Value::as_str)
            .unwrap_or(registry::DEFAULT_WEB_TSCONFIG);

        Ok(ProjectInfo {
            name: name.to_string(),
            root,
            source_root,
            prefix,
            web_tsconfig: TreePath::new(web_tsconfig)?,
        })
    }

    pub fn default_collection(&self) -> Option<&str> {
        self.root.get("cli")?.get("defaultCollection")?.as_str()
    }

    pub fn set_default_collection(&mut self, collection: &str) -> Result<(), DomainError> {
        let cli = object_entry(&mut self.root, "cli", &self.path, "/cli")?;
        cli.insert("defaultCollection".into(), Value::String(collection.into()));
        Ok(())
    }

    pub fn save(self, tree: &mut VirtualTree) -> Result<(), DomainError> {
        tree.write_json(&self.path, &Value::Object(self.root))
    }
}

// ── .gitignore ───────────────────────────────────────────────────────────────

/// Append `entries` that are not already listed. Existing lines are kept
/// verbatim.
pub fn merge_gitignore(existing: Option<&str>, entries: &[String]) -> String {
    let mut out = existing.unwrap_or_default().to_string();
    let present: Vec<&str> = out.lines().map(str::trim).collect();
    let missing: Vec<&String> = entries
        .iter()
        .filter(|e| !present.contains(&e.trim()))
        .collect();

    if missing.is_empty() {
        return out;
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    for entry in missing {
        out.push_str(entry);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registry::{DEPENDENCIES, DEV_DEPENDENCIES};

    fn tree_with(path: &str, json: &str) -> VirtualTree {
        VirtualTree::new().with_file(path, json).unwrap()
    }

    #[test]
    fn package_json_merges_without_losing_existing_entries() {
        let mut tree = tree_with(
            "/package.json",
            r#"{"name":"foo","dependencies":{"@angular/core":"~8.0.0"},"scripts":{"ng":"ng"}}"#,
        );
        let mut pkg = PackageJson::load(&tree).unwrap();
        pkg.add_dependencies(DEPENDENCIES).unwrap();
        pkg.add_dev_dependencies(DEV_DEPENDENCIES).unwrap();
        pkg.add_scripts([("android", "tns run android")]).unwrap();
        pkg.set_nativescript_id("org.example").unwrap();
        pkg.save(&mut tree).unwrap();

        let pkg = PackageJson::load(&tree).unwrap();
        assert_eq!(pkg.dependency("@angular/core"), Some("~8.0.0"));
        assert_eq!(pkg.dependency("tns-core-modules"), Some("~6.0.0"));
        assert_eq!(pkg.dev_dependency("nativescript-dev-webpack"), Some("~1.0.0"));
        assert_eq!(pkg.script("ng"), Some("ng"));
        assert_eq!(pkg.script("android"), Some("tns run android"));

        let raw = tree.read_json("/package.json").unwrap();
        assert_eq!(raw["nativescript"]["id"], "org.example");
        // key order of the original document survives
        let keys: Vec<_> = raw.as_object().unwrap().keys().cloned().collect();
        assert_eq!(&keys[..3], &["name", "dependencies", "scripts"]);
    }

    #[test]
    fn package_json_rejects_non_object_sections() {
        let tree = tree_with("/package.json", r#"{"dependencies":[]}"#);
        let mut pkg = PackageJson::load(&tree).unwrap();
        assert!(matches!(
            pkg.add_dependencies(DEPENDENCIES),
            Err(DomainError::UnexpectedJsonShape { .. })
        ));
    }

    #[test]
    fn tsconfig_path_mapping_appends_unique_in_order() {
        let mut tree = tree_with(
            "/tsconfig.json",
            r#"{"compilerOptions":{"paths":{"@src/*":["src/*"]}}}"#,
        );
        let path = TreePath::new("/tsconfig.json").unwrap();
        let mut ts = TsConfig::load(&tree, &path).unwrap();
        ts.add_path_mapping("@src/*", &["src/*.web".into(), "src/*".into()])
            .unwrap();
        ts.save(&mut tree).unwrap();

        let ts = TsConfig::load(&tree, &path).unwrap();
        assert_eq!(ts.path_mapping("@src/*"), vec!["src/*", "src/*.web"]);
    }

    #[test]
    fn tsconfig_creates_missing_compiler_options() {
        let tree = tree_with("/tsconfig.tns.json", r#"{"extends":"./tsconfig.json"}"#);
        let path = TreePath::new("/tsconfig.tns.json").unwrap();
        let mut ts = TsConfig::load(&tree, &path).unwrap();
        ts.add_path_mapping("@src/*", &["src/*.ts".into()]).unwrap();
        ts.add_files(&["src/main.tns.ts".into()]).unwrap();
        assert_eq!(ts.path_mapping("@src/*"), vec!["src/*.ts"]);
        assert_eq!(ts.files(), vec!["src/main.tns.ts"]);
    }

    #[test]
    fn workspace_resolves_project_defaults() {
        let tree = tree_with(
            "/angular.json",
            r#"{"projects":{"foo":{"root":"","prefix":"app","architect":{"build":{"options":{"tsConfig":"tsconfig.app.json"}}}}}}"#,
        );
        let ws = WorkspaceConfig::load(&tree).unwrap();
        let info = ws.project("foo").unwrap();
        assert_eq!(info.source_root, "src");
        assert_eq!(info.prefix.as_deref(), Some("app"));
        assert_eq!(info.web_tsconfig.as_str(), "/tsconfig.app.json");
    }

    #[test]
    fn workspace_nested_project_source_root() {
        let tree = tree_with("/angular.json", r#"{"projects":{"bar":{"root":"projects/bar"}}}"#);
        let info = WorkspaceConfig::load(&tree).unwrap().project("bar").unwrap();
        assert_eq!(info.source_root, "projects/bar/src");
    }

    #[test]
    fn workspace_unknown_project_lists_available() {
        let tree = tree_with("/angular.json", r#"{"projects":{"foo":{}}}"#);
        let err = WorkspaceConfig::load(&tree).unwrap().project("nope").unwrap_err();
        match err {
            DomainError::ProjectNotFound { available, .. } => assert_eq!(available, vec!["foo"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn workspace_sets_default_collection() {
        let mut tree = tree_with("/angular.json", r#"{"version":1,"projects":{}}"#);
        let mut ws = WorkspaceConfig::load(&tree).unwrap();
        ws.set_default_collection("@nativescript/schematics").unwrap();
        ws.save(&mut tree).unwrap();
        let ws = WorkspaceConfig::load(&tree).unwrap();
        assert_eq!(ws.default_collection(), Some("@nativescript/schematics"));
    }

    #[test]
    fn gitignore_appends_only_missing_lines() {
        let merged = merge_gitignore(
            Some("/dist\nnode_modules/"),
            &["node_modules/".into(), "platforms/".into()],
        );
        assert_eq!(merged, "/dist\nnode_modules/\nplatforms/\n");
    }

    #[test]
    fn gitignore_created_when_missing() {
        assert_eq!(merge_gitignore(None, &["hooks/".into()]), "hooks/\n");
    }
}
