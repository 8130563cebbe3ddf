//! The ordered rule plan for adding NativeScript support.
//!
//! The plan is a pure function of the options. Executing a rule is the job
//! of a `RuleExecutor` adapter; this module only decides which rules run and
//! in what order.

use std::fmt;

use serde::Serialize;

use crate::domain::entities::options::AddNsOptions;

/// One step of the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    AddNativeScriptFiles,
    AddAppResources,
    AddDependencies,
    MergeGitignore,
    ConfigurePathMappings,
    AddAutoGeneratedComponent,
    AddSampleFeature,
}

impl Rule {
    /// Rules that run for every option combination.
    pub const ALWAYS: [Rule; 5] = [
        Rule::AddNativeScriptFiles,
        Rule::AddAppResources,
        Rule::AddDependencies,
        Rule::MergeGitignore,
        Rule::ConfigurePathMappings,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddNativeScriptFiles => "add-nativescript-files",
            Self::AddAppResources => "add-app-resources",
            Self::AddDependencies => "add-dependencies",
            Self::MergeGitignore => "merge-gitignore",
            Self::ConfigurePathMappings => "configure-path-mappings",
            Self::AddAutoGeneratedComponent => "add-auto-generated-component",
            Self::AddSampleFeature => "add-sample-feature",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::AddNativeScriptFiles => {
                "Create the NativeScript entry point, app module and tsconfig"
            }
            Self::AddAppResources => "Create App_Resources for Android and iOS plus nsconfig.json",
            Self::AddDependencies => {
                "Add NativeScript packages and run scripts, set the default schematics collection"
            }
            Self::MergeGitignore => "Ignore build output and compiled scripts",
            Self::ConfigurePathMappings => "Map @src/* to platform-qualified files",
            Self::AddAutoGeneratedComponent => "Generate a routed placeholder component",
            Self::AddSampleFeature => "Generate the sample players feature module",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rules in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RulePlan {
    rules: Vec<Rule>,
}

impl RulePlan {
    pub fn for_options(options: &AddNsOptions) -> Self {
        Self::for_flags(options.sample(), options.skip_auto_generated_component())
    }

    /// The plan for the two feature flags alone, without a project.
    pub fn for_flags(sample: bool, skip_auto_generated_component: bool) -> Self {
        let mut rules = Rule::ALWAYS.to_vec();
        if !skip_auto_generated_component {
            rules.push(Rule::AddAutoGeneratedComponent);
        }
        if sample {
            rules.push(Rule::AddSampleFeature);
        }
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = Rule> + '_ {
        self.rules.iter().copied()
    }

    pub fn contains(&self, rule: Rule) -> bool {
        self.rules.contains(&rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RulePlan {
    type Item = Rule;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Rule>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter().copied()
    }
}
