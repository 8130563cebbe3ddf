//! Augment Service - main application orchestrator.
//!
//! 1. Validate options and resolve the project from `angular.json`
//! 2. Build the rule plan
//! 3. Fold the tree through the rule executor
//!
//! [`AugmentService::augment_directory`] wraps the same flow with a load from
//! and a write back to disk.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, RuleExecutor},
    },
    domain::{
        AddNsOptions, AugmentContext, DomainValidator as validator, RulePlan, TreeDiff, TreePath,
        VirtualTree, WorkspaceConfig,
    },
    error::{NsError, NsResult},
};

pub struct AugmentService {
    executor: Box<dyn RuleExecutor>,
    filesystem: Box<dyn Filesystem>,
}

impl AugmentService {
    pub fn new(executor: Box<dyn RuleExecutor>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            executor,
            filesystem,
        }
    }

    /// The rules `apply` would run, in order.
    pub fn plan(&self, options: &AddNsOptions) -> RulePlan {
        RulePlan::for_options(options)
    }

    /// Validate the options against the tree and resolve the project.
    pub fn resolve_context(
        &self,
        tree: &VirtualTree,
        options: &AddNsOptions,
    ) -> NsResult<AugmentContext> {
        validator::validate_options(options)?;
        validator::validate_workspace(tree)?;
        let project = WorkspaceConfig::load(tree)?.project(options.project())?;
        debug!(
            project = %project.name,
            source_root = %project.source_root,
            web_tsconfig = %project.web_tsconfig,
            "Project resolved"
        );
        Ok(AugmentContext::new(options.clone(), project))
    }

    /// Add NativeScript support to an in-memory workspace.
    ///
    /// Stops at the first failing rule; no partial tree is returned.
    #[instrument(
        skip_all,
        fields(
            project = %options.project(),
            sample = options.sample(),
            skip_auto_generated = options.skip_auto_generated_component()
        )
    )]
    pub fn apply(&self, tree: VirtualTree, options: &AddNsOptions) -> NsResult<VirtualTree> {
        let ctx = self.resolve_context(&tree, options)?;
        let plan = self.plan(options);
        info!(rules = plan.len(), "Applying rule plan");

        let mut tree = tree;
        for rule in &plan {
            debug!(rule = %rule, "Executing rule");
            tree = self
                .executor
                .execute(rule, tree, &ctx)
                .map_err(|e| ApplicationError::RuleFailed {
                    rule: rule.name().to_string(),
                    source: Box::new(e),
                })?;
        }

        info!(files = tree.len(), "Rule plan applied");
        Ok(tree)
    }

    /// Load a workspace from disk, apply the transform and write back
    /// only what changed.
    ///
    /// Files that are not UTF-8 text stay out of the tree; if the transform
    /// would create one of them the run fails before anything is written.
    ///
    /// If a write fails, files written so far are restored (updated) or
    /// removed (created by this run), along with directories this run
    /// created for them. With `dry_run` nothing is written.
    #[instrument(skip_all, fields(root = %root.display(), dry_run = dry_run))]
    pub fn augment_directory(
        &self,
        root: &Path,
        options: &AddNsOptions,
        dry_run: bool,
    ) -> NsResult<TreeDiff> {
        let (before, skipped) = self.load_tree(root)?;
        info!(files = before.len(), skipped = skipped.len(), "Workspace loaded");

        let after = self.apply(before.clone(), options)?;
        let diff = before.diff(&after);
        info!(
            created = diff.created.len(),
            updated = diff.updated.len(),
            "Changes computed"
        );

        // A skipped file looks absent to the rules; writing it would drop
        // whatever it held.
        if let Some(path) = diff.created.iter().find(|p| skipped.contains(*p)) {
            return Err(ApplicationError::UnreadableTarget {
                path: disk_path(root, path),
            }
            .into());
        }

        if dry_run {
            info!("Dry run, nothing written");
            return Ok(diff);
        }

        self.write_changes(root, &before, &after, &diff)?;
        info!("Workspace updated");
        Ok(diff)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// The text files under `root`, plus the paths skipped as non-text.
    fn load_tree(&self, root: &Path) -> NsResult<(VirtualTree, BTreeSet<TreePath>)> {
        let mut tree = VirtualTree::new();
        let mut skipped = BTreeSet::new();
        for relative in self.filesystem.list_files(root)? {
            let path = root.join(&relative);
            match self.filesystem.read_file(&path) {
                Ok(content) => tree.create_or_overwrite(&relative, content)?,
                Err(NsError::Application(ApplicationError::NotText { .. })) => {
                    debug!(path = %relative, "Skipping non-text file");
                    skipped.insert(TreePath::new(&relative)?);
                }
                Err(e) => return Err(e),
            }
        }
        Ok((tree, skipped))
    }

    fn write_changes(
        &self,
        root: &Path,
        before: &VirtualTree,
        after: &VirtualTree,
        diff: &TreeDiff,
    ) -> NsResult<()> {
        let mut written = Written::default();

        for path in diff.paths() {
            let content = after.read_required(path)?;
            match self.write_one(root, path, content, &mut written) {
                Ok(()) => written.files.push(path),
                Err(e) => {
                    warn!(path = %path, error = %e, "Write failed, attempting rollback");
                    self.rollback(root, before, &written)?;
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    fn write_one(
        &self,
        root: &Path,
        path: &TreePath,
        content: &str,
        written: &mut Written<'_>,
    ) -> NsResult<()> {
        let target = disk_path(root, path);
        if let Some(parent) = target.parent() {
            let missing: Vec<PathBuf> = parent
                .ancestors()
                .take_while(|dir| *dir != root && dir.starts_with(root))
                .take_while(|dir| !self.filesystem.exists(dir))
                .map(Path::to_path_buf)
                .collect();
            self.filesystem.create_dir_all(parent)?;
            written.dirs.extend(missing);
        }
        self.filesystem.write_file(&target, content)
    }

    /// Best-effort: every path is attempted, the first failure is reported.
    fn rollback(&self, root: &Path, before: &VirtualTree, written: &Written<'_>) -> NsResult<()> {
        let mut first_failure = None;

        for path in written.files.iter().rev() {
            let target = disk_path(root, path);
            let result = match before.read(path) {
                Some(original) => self.filesystem.write_file(&target, original),
                None => self.filesystem.remove_file(&target),
            };
            if let Err(e) = result {
                warn!(error = %e, path = %target.display(), "Rollback failed");
                first_failure.get_or_insert(ApplicationError::RollbackFailed {
                    path: target,
                    reason: e.to_string(),
                });
            }
        }

        // Deepest first, so each directory is empty by the time it goes.
        let mut dirs: Vec<&PathBuf> = written.dirs.iter().collect();
        dirs.sort_by_key(|dir| std::cmp::Reverse(dir.components().count()));
        for dir in dirs {
            if let Err(e) = self.filesystem.remove_dir(dir) {
                warn!(error = %e, path = %dir.display(), "Rollback failed");
                first_failure.get_or_insert(ApplicationError::RollbackFailed {
                    path: dir.clone(),
                    reason: e.to_string(),
                });
            }
        }

        match first_failure {
            Some(e) => Err(e.into()),
            None => {
                info!(
                    files = written.files.len(),
                    dirs = written.dirs.len(),
                    "Rollback successful"
                );
                Ok(())
            }
        }
    }
}

/// What a write pass has put on disk so far.
#[derive(Default)]
struct Written<'a> {
    files: Vec<&'a TreePath>,
    dirs: BTreeSet<PathBuf>,
}

fn disk_path(root: &Path, path: &TreePath) -> PathBuf {
    root.join(path.relative())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFilesystem, MockRuleExecutor};
    use crate::domain::{DomainError, Rule};
    use mockall::predicate::{always, eq};
    use std::sync::{Arc, Mutex};

    const ANGULAR_JSON: &str = r#"{"projects":{"foo":{"root":"","sourceRoot":"src"}}}"#;

    fn workspace() -> VirtualTree {
        VirtualTree::from_files([("/angular.json", ANGULAR_JSON), ("/package.json", "{}")]).unwrap()
    }

    fn options(sample: bool, skip: bool) -> AddNsOptions {
        AddNsOptions::builder("foo")
            .sample(sample)
            .skip_auto_generated_component(skip)
            .build()
            .unwrap()
    }

    /// Executor that records rules and adds one marker file per rule.
    fn recording_executor(seen: Arc<Mutex<Vec<Rule>>>) -> MockRuleExecutor {
        let mut executor = MockRuleExecutor::new();
        executor.expect_execute().returning(move |rule, mut tree, _| {
            seen.lock().unwrap().push(rule);
            tree.create(format!("/{}", rule.name()), "")?;
            Ok(tree)
        });
        executor
    }

    #[test]
    fn apply_runs_plan_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let service = AugmentService::new(
            Box::new(recording_executor(seen.clone())),
            Box::new(MockFilesystem::new()),
        );

        let out = service.apply(workspace(), &options(true, false)).unwrap();

        let expected = RulePlan::for_options(&options(true, false));
        assert_eq!(seen.lock().unwrap().as_slice(), expected.rules());
        assert!(out.exists("/add-sample-feature"));
        assert!(out.exists("/angular.json"));
    }

    #[test]
    fn apply_passes_resolved_context() {
        let mut executor = MockRuleExecutor::new();
        executor
            .expect_execute()
            .withf(|_, _, ctx| ctx.source_root() == "src" && ctx.project().name == "foo")
            .times(5)
            .returning(|_, tree, _| Ok(tree));
        let service = AugmentService::new(Box::new(executor), Box::new(MockFilesystem::new()));

        service.apply(workspace(), &options(false, true)).unwrap();
    }

    #[test]
    fn apply_stops_at_first_failing_rule() {
        let mut executor = MockRuleExecutor::new();
        executor
            .expect_execute()
            .with(eq(Rule::AddNativeScriptFiles), always(), always())
            .times(1)
            .returning(|_, _, _| {
                Err(DomainError::FileAlreadyExists {
                    path: "/tsconfig.tns.json".into(),
                }
                .into())
            });
        let service = AugmentService::new(Box::new(executor), Box::new(MockFilesystem::new()));

        let err = service.apply(workspace(), &options(false, false)).unwrap_err();
        assert!(matches!(
            err,
            NsError::Application(ApplicationError::RuleFailed { ref rule, .. }) if rule == "add-nativescript-files"
        ));
        assert!(matches!(
            err.as_domain(),
            Some(DomainError::FileAlreadyExists { .. })
        ));
    }

    #[test]
    fn unknown_project_fails_before_any_rule() {
        let mut executor = MockRuleExecutor::new();
        executor.expect_execute().never();
        let service = AugmentService::new(Box::new(executor), Box::new(MockFilesystem::new()));

        let opts = AddNsOptions::builder("bar").build().unwrap();
        let err = service.apply(workspace(), &opts).unwrap_err();
        assert!(matches!(
            err,
            NsError::Domain(DomainError::ProjectNotFound { .. })
        ));
    }

    #[test]
    fn missing_workspace_config_is_reported() {
        let mut executor = MockRuleExecutor::new();
        executor.expect_execute().never();
        let service = AugmentService::new(Box::new(executor), Box::new(MockFilesystem::new()));

        let tree = VirtualTree::from_files([("/package.json", "{}")]).unwrap();
        assert!(matches!(
            service.apply(tree, &options(false, false)),
            Err(NsError::Domain(DomainError::FileNotFound { .. }))
        ));
    }

    fn disk_with_workspace() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_list_files()
            .returning(|_| Ok(vec!["angular.json".into(), "package.json".into(), "logo.png".into()]));
        fs.expect_read_file().returning(|path| {
            match path.file_name().and_then(|n| n.to_str()) {
                Some("angular.json") => Ok(ANGULAR_JSON.to_string()),
                Some("package.json") => Ok("{}".to_string()),
                _ => Err(ApplicationError::NotText {
                    path: path.to_path_buf(),
                }
                .into()),
            }
        });
        fs
    }

    fn touching_executor() -> MockRuleExecutor {
        let mut executor = MockRuleExecutor::new();
        executor.expect_execute().returning(|rule, mut tree, _| {
            if rule == Rule::AddDependencies {
                tree.overwrite("/package.json", "{\"dependencies\":{}}")?;
            }
            if rule == Rule::AddNativeScriptFiles {
                tree.create("/src/main.tns.ts", "")?;
            }
            Ok(tree)
        });
        executor
    }

    #[test]
    fn dry_run_writes_nothing() {
        let mut fs = disk_with_workspace();
        fs.expect_write_file().never();
        fs.expect_create_dir_all().never();
        let service = AugmentService::new(Box::new(touching_executor()), Box::new(fs));

        let diff = service
            .augment_directory(Path::new("/ws"), &options(false, true), true)
            .unwrap();
        assert_eq!(diff.created, vec![TreePath::new("/src/main.tns.ts").unwrap()]);
        assert_eq!(diff.updated, vec![TreePath::new("/package.json").unwrap()]);
    }

    #[test]
    fn writes_only_changed_files() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let mut fs = disk_with_workspace();
        fs.expect_exists().returning(|_| true);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        let log = written.clone();
        fs.expect_write_file().returning(move |path, _| {
            log.lock().unwrap().push(path.to_path_buf());
            Ok(())
        });
        let service = AugmentService::new(Box::new(touching_executor()), Box::new(fs));

        service
            .augment_directory(Path::new("/ws"), &options(false, true), false)
            .unwrap();

        let written = written.lock().unwrap();
        assert_eq!(
            written.as_slice(),
            &[PathBuf::from("/ws/src/main.tns.ts"), PathBuf::from("/ws/package.json")]
        );
    }

    #[test]
    fn failed_write_rolls_back_created_files() {
        let removed = Arc::new(Mutex::new(Vec::new()));
        let mut fs = disk_with_workspace();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|path, _| {
            if path.ends_with("package.json") {
                Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "read-only".into(),
                }
                .into())
            } else {
                Ok(())
            }
        });
        let log = removed.clone();
        fs.expect_remove_file().returning(move |path| {
            log.lock().unwrap().push(path.to_path_buf());
            Ok(())
        });
        let log = removed.clone();
        fs.expect_remove_dir().returning(move |path| {
            log.lock().unwrap().push(path.to_path_buf());
            Ok(())
        });
        let service = AugmentService::new(Box::new(touching_executor()), Box::new(fs));

        let err = service
            .augment_directory(Path::new("/ws"), &options(false, true), false)
            .unwrap_err();

        assert!(matches!(
            err,
            NsError::Application(ApplicationError::FilesystemError { .. })
        ));
        assert_eq!(
            removed.lock().unwrap().as_slice(),
            &[PathBuf::from("/ws/src/main.tns.ts"), PathBuf::from("/ws/src")]
        );
    }

    #[test]
    fn creating_over_a_skipped_binary_file_is_refused() {
        let mut fs = disk_with_workspace();
        fs.expect_write_file().never();
        fs.expect_create_dir_all().never();
        let mut executor = MockRuleExecutor::new();
        executor.expect_execute().returning(|rule, mut tree, _| {
            if rule == Rule::AddNativeScriptFiles {
                tree.create("/logo.png", "")?;
            }
            Ok(tree)
        });
        let service = AugmentService::new(Box::new(executor), Box::new(fs));

        for dry_run in [true, false] {
            let err = service
                .augment_directory(Path::new("/ws"), &options(false, true), dry_run)
                .unwrap_err();
            assert!(matches!(
                err,
                NsError::Application(ApplicationError::UnreadableTarget { ref path })
                    if path == Path::new("/ws/logo.png")
            ));
        }
    }
}
