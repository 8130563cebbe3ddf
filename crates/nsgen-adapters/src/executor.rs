//! Rule execution against built-in templates.
//!
//! [`TemplateRuleExecutor`] is the concrete [`RuleExecutor`]: rules that
//! add files render a template from the store, rules that edit files go
//! through the typed documents and [`SourceFile`].

use nsgen_core::{
    application::ports::{RuleExecutor, TemplateRenderer, TemplateStore},
    domain::{
        AugmentContext, PackageJson, Route, Rule, SourceFile, TreePath, TsConfig, VirtualTree,
        WorkspaceConfig, merge_gitignore, registry,
    },
    error::{Context, NsResult},
};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::{builtin_templates, renderer::SimpleRenderer, template_store::InMemoryStore};

/// `nsconfig.json`, read by the NativeScript CLI to find the app and its
/// native resources.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NsConfig<'a> {
    app_resources_path: &'a str,
    app_path: &'a str,
    #[serde(rename = "nsext")]
    ns_ext: String,
    #[serde(rename = "webext")]
    web_ext: String,
    shared: bool,
}

/// Executes each [`Rule`] by rendering templates and editing documents.
pub struct TemplateRuleExecutor {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
}

impl TemplateRuleExecutor {
    pub fn new(store: Box<dyn TemplateStore>, renderer: Box<dyn TemplateRenderer>) -> Self {
        Self { store, renderer }
    }

    /// Executor over the built-in templates and the simple renderer.
    pub fn builtin() -> NsResult<Self> {
        Ok(Self::new(
            Box::new(InMemoryStore::with_builtin()?),
            Box::new(SimpleRenderer::new()),
        ))
    }

    /// Render the named template and create every file it produces.
    fn create_from_template(
        &self,
        name: &str,
        tree: &mut VirtualTree,
        ctx: &AugmentContext,
    ) -> NsResult<()> {
        let template = self.store.get_by_name(name)?;
        let files = self.renderer.render(&template, &ctx.render_context())?;
        for file in files {
            debug!(path = %file.path, "Creating file");
            tree.create(&file.path, file.content)?;
        }
        Ok(())
    }

    fn add_nativescript_files(&self, tree: &mut VirtualTree, ctx: &AugmentContext) -> NsResult<()> {
        self.create_from_template(builtin_templates::NS_FILES, tree, ctx)
    }

    fn add_app_resources(&self, tree: &mut VirtualTree, ctx: &AugmentContext) -> NsResult<()> {
        self.create_from_template(builtin_templates::APP_RESOURCES, tree, ctx)?;

        let config = NsConfig {
            app_resources_path: registry::APP_RESOURCES_DIR,
            app_path: ctx.source_root(),
            ns_ext: ctx.options().ns_ext(),
            web_ext: ctx.options().web_ext(),
            shared: true,
        };
        let mut raw = serde_json::to_string_pretty(&config).context("Failed to serialize nsconfig")?;
        raw.push('\n');
        tree.create(registry::NS_CONFIG_PATH, raw)?;
        Ok(())
    }

    fn add_dependencies(&self, tree: &mut VirtualTree) -> NsResult<()> {
        let mut package = PackageJson::load(tree)?;
        package.add_dependencies(registry::DEPENDENCIES)?;
        package.add_dev_dependencies(registry::DEV_DEPENDENCIES)?;
        package.add_scripts(
            registry::PLATFORM_REGISTRY
                .iter()
                .map(|def| (def.platform.as_str(), def.run_script)),
        )?;
        package.set_nativescript_id(registry::APP_ID)?;
        package.save(tree)?;

        let mut workspace = WorkspaceConfig::load(tree)?;
        workspace.set_default_collection(registry::SCHEMATICS_COLLECTION)?;
        workspace.save(tree)?;
        Ok(())
    }

    fn merge_gitignore(&self, tree: &mut VirtualTree, ctx: &AugmentContext) -> NsResult<()> {
        let entries = registry::gitignore_entries(ctx.source_root());
        let merged = merge_gitignore(tree.read(registry::GITIGNORE_PATH), &entries);
        tree.create_or_overwrite(registry::GITIGNORE_PATH, merged)?;
        Ok(())
    }

    fn configure_path_mappings(&self, tree: &mut VirtualTree, ctx: &AugmentContext) -> NsResult<()> {
        let src = ctx.source_root();
        let ns_extension = ctx.options().ns_extension();

        let mut ns = TsConfig::load(tree, &TreePath::new(registry::NS_TSCONFIG_PATH)?)?;
        ns.add_path_mapping(
            registry::SOURCE_ALIAS,
            &registry::ns_path_mappings(src, ns_extension),
        )?;
        ns.add_files(&[registry::ns_entry_file(src, ns_extension)])?;
        ns.save(tree)?;

        let mut web = TsConfig::load(tree, &ctx.project().web_tsconfig)?;
        web.add_path_mapping(registry::SOURCE_ALIAS, &registry::web_path_mappings(src))?;
        web.add_files(&registry::web_entry_files(src))?;
        web.save(tree)?;

        let mut base = TsConfig::load(tree, &TreePath::new(registry::BASE_TSCONFIG_PATH)?)?;
        base.add_path_mapping(
            registry::SOURCE_ALIAS,
            &registry::base_path_mappings(src, ns_extension),
        )?;
        base.save(tree)?;
        Ok(())
    }

    fn add_auto_generated_component(
        &self,
        tree: &mut VirtualTree,
        ctx: &AugmentContext,
    ) -> NsResult<()> {
        self.create_from_template(builtin_templates::AUTO_GENERATED, tree, ctx)?;

        let mut routing = SourceFile::load(tree, &routing_module(ctx)?)?;
        routing.add_import(
            registry::AUTO_GENERATED_COMPONENT,
            registry::AUTO_GENERATED_IMPORT,
        );
        routing.add_route(&Route::component(
            registry::AUTO_GENERATED_ROUTE,
            registry::AUTO_GENERATED_COMPONENT,
        ))?;
        routing.save(tree)?;

        let mut module = SourceFile::load(tree, &app_module(ctx)?)?;
        module.add_import(
            registry::AUTO_GENERATED_COMPONENT,
            registry::AUTO_GENERATED_IMPORT,
        );
        module.add_ng_module_declaration(registry::AUTO_GENERATED_COMPONENT)?;
        module.save(tree)?;

        show_router_outlet(tree, ctx)
    }

    fn add_sample_feature(&self, tree: &mut VirtualTree, ctx: &AugmentContext) -> NsResult<()> {
        self.create_from_template(builtin_templates::SAMPLE, tree, ctx)?;

        let mut routing = SourceFile::load(tree, &routing_module(ctx)?)?;
        routing.add_route(&Route::redirect("", registry::SAMPLE_LANDING_ROUTE))?;
        routing.save(tree)?;

        let mut module = SourceFile::load(tree, &app_module(ctx)?)?;
        module.add_import(registry::SAMPLE_MODULE, registry::SAMPLE_MODULE_IMPORT);
        module.add_ng_module_import(registry::SAMPLE_MODULE)?;
        module.save(tree)?;
        Ok(())
    }
}

impl RuleExecutor for TemplateRuleExecutor {
    #[instrument(level = "debug", skip_all, fields(rule = %rule, project = %ctx.project().name))]
    fn execute(&self, rule: Rule, tree: VirtualTree, ctx: &AugmentContext) -> NsResult<VirtualTree> {
        let mut tree = tree;
        match rule {
            Rule::AddNativeScriptFiles => self.add_nativescript_files(&mut tree, ctx)?,
            Rule::AddAppResources => self.add_app_resources(&mut tree, ctx)?,
            Rule::AddDependencies => self.add_dependencies(&mut tree)?,
            Rule::MergeGitignore => self.merge_gitignore(&mut tree, ctx)?,
            Rule::ConfigurePathMappings => self.configure_path_mappings(&mut tree, ctx)?,
            Rule::AddAutoGeneratedComponent => self.add_auto_generated_component(&mut tree, ctx)?,
            Rule::AddSampleFeature => self.add_sample_feature(&mut tree, ctx)?,
        }
        debug!(files = tree.len(), "Rule applied");
        Ok(tree)
    }
}

fn routing_module(ctx: &AugmentContext) -> NsResult<TreePath> {
    Ok(ctx.source_path(&format!("app/app-routing.module{}.ts", ctx.options().ns_ext()))?)
}

fn app_module(ctx: &AugmentContext) -> NsResult<TreePath> {
    Ok(ctx.source_path(&format!("app/app.module{}.ts", ctx.options().ns_ext()))?)
}

/// Swap the entry template's placeholder label for the router outlet. Only
/// the auto-generated component rule does this; the sample rule leaves the
/// entry template as generated.
fn show_router_outlet(tree: &mut VirtualTree, ctx: &AugmentContext) -> NsResult<()> {
    let path = ctx.source_path(&format!("app/app.component{}.html", ctx.options().ns_ext()))?;
    let mut entry = SourceFile::load(tree, &path)?;
    if entry.replace(registry::ENTRY_PLACEHOLDER, registry::ROUTER_OUTLET) {
        entry.save(tree)?;
    } else if !entry.content().contains(registry::ROUTER_OUTLET) {
        warn!(path = %path, "Entry template has neither placeholder nor router outlet");
    }
    Ok(())
}
