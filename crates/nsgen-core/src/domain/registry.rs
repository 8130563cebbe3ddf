//! NativeScript integration registry.
//!
//! Every fixed fact the transform writes into a workspace is described
//! exactly once here: package versions, run scripts, ignore patterns, path
//! mappings and well-known file locations. Rules read these tables; they
//! never hard-code values of their own.

use crate::domain::value_objects::{Extension, Platform};

// ── Well-known workspace files ───────────────────────────────────────────────

pub const WORKSPACE_CONFIG_PATH: &str = "/angular.json";
pub const PACKAGE_JSON_PATH: &str = "/package.json";
pub const GITIGNORE_PATH: &str = "/.gitignore";
pub const BASE_TSCONFIG_PATH: &str = "/tsconfig.json";
pub const DEFAULT_WEB_TSCONFIG: &str = "tsconfig.app.json";
pub const NS_TSCONFIG_PATH: &str = "/tsconfig.tns.json";
pub const NS_CONFIG_PATH: &str = "/nsconfig.json";
pub const APP_RESOURCES_DIR: &str = "App_Resources";

/// Directories never loaded from disk into a tree.
pub static IGNORED_DIRECTORIES: &[&str] = &["node_modules", ".git", "platforms", "dist", "hooks"];

// ── Package manifest ─────────────────────────────────────────────────────────

/// A package name and semver range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyDef {
    pub name: &'static str,
    pub version: &'static str,
}

/// Runtime dependencies of a NativeScript Angular app.
pub static DEPENDENCIES: &[DependencyDef] = &[
    DependencyDef {
        name: "nativescript-angular",
        version: "~8.0.0",
    },
    DependencyDef {
        name: "nativescript-theme-core",
        version: "~1.0.4",
    },
    DependencyDef {
        name: "reflect-metadata",
        version: "~0.1.12",
    },
    DependencyDef {
        name: "tns-core-modules",
        version: "~6.0.0",
    },
];

/// Build-time dependencies.
pub static DEV_DEPENDENCIES: &[DependencyDef] = &[
    DependencyDef {
        name: "nativescript-dev-webpack",
        version: "~1.0.0",
    },
    DependencyDef {
        name: SCHEMATICS_COLLECTION,
        version: "~0.7.0",
    },
    DependencyDef {
        name: "@nativescript/tslint-rules",
        version: "~0.0.2",
    },
];

/// Package name of the schematics collection that becomes the workspace
/// default.
pub const SCHEMATICS_COLLECTION: &str = "@nativescript/schematics";

/// Application id written to `package.json` under `nativescript.id`.
pub const APP_ID: &str = "org.nativescript.ngsample";

// ── Platforms ────────────────────────────────────────────────────────────────

/// What a native platform contributes to the workspace.
#[derive(Debug, Clone, Copy)]
pub struct PlatformDef {
    pub platform: Platform,
    /// `package.json` script that builds and runs on a device.
    pub run_script: &'static str,
    /// Native project files under `App_Resources/<dir>/`.
    pub resources: &'static [&'static str],
}

pub static PLATFORM_REGISTRY: &[PlatformDef] = &[
    PlatformDef {
        platform: Platform::Android,
        run_script: "tns run android",
        resources: &["app.gradle", "src/main/AndroidManifest.xml"],
    },
    PlatformDef {
        platform: Platform::Ios,
        run_script: "tns run ios",
        resources: &["Info.plist", "build.xcconfig"],
    },
];

pub fn find_platform(platform: Platform) -> Option<&'static PlatformDef> {
    PLATFORM_REGISTRY.iter().find(|d| d.platform == platform)
}

// ── Ignore list ──────────────────────────────────────────────────────────────

/// Lines appended to `.gitignore`. The compiled-script glob depends on the
/// source root.
pub fn gitignore_entries(source_root: &str) -> Vec<String> {
    vec![
        "node_modules/".into(),
        "platforms/".into(),
        "hooks/".into(),
        format!("{source_root}/**/*.js"),
    ]
}

// ── Compiler path mappings ───────────────────────────────────────────────────

/// Import alias that resolves against platform-qualified files.
pub const SOURCE_ALIAS: &str = "@src/*";

/// Platform config: native qualifiers, then the NativeScript one, then generic.
pub fn ns_path_mappings(source_root: &str, ns_extension: &Extension) -> Vec<String> {
    vec![
        format!("{source_root}/*.ios.ts"),
        format!("{source_root}/*.android.ts"),
        format!("{source_root}/*{}.ts", ns_extension.suffix()),
        format!("{source_root}/*.ts"),
    ]
}

/// Web config: web-qualified first, then generic.
pub fn web_path_mappings(source_root: &str) -> Vec<String> {
    vec![
        format!("{source_root}/*.web"),
        format!("{source_root}/*"),
    ]
}

/// Base config: every qualifier, for editors and tooling that see both
/// environments at once.
pub fn base_path_mappings(source_root: &str, ns_extension: &Extension) -> Vec<String> {
    vec![
        format!("{source_root}/*.android.ts"),
        format!("{source_root}/*.ios.ts"),
        format!("{source_root}/*{}.ts", ns_extension.suffix()),
        format!("{source_root}/*.web.ts"),
        format!("{source_root}/*"),
    ]
}

/// Entry files the web build must list explicitly once platform files
/// share its source tree.
pub fn web_entry_files(source_root: &str) -> Vec<String> {
    vec![
        format!("{source_root}/main.ts"),
        format!("{source_root}/polyfills.ts"),
    ]
}

/// Entry file of the NativeScript build.
pub fn ns_entry_file(source_root: &str, ns_extension: &Extension) -> String {
    format!("{source_root}/main{}.ts", ns_extension.suffix())
}

// ── Generated source markers ─────────────────────────────────────────────────

/// Markup in the generated entry template that routed content replaces.
pub const ENTRY_PLACEHOLDER: &str = r#"<Label text="Entry Component works" textWrap="true"></Label>"#;

/// What replaces [`ENTRY_PLACEHOLDER`] once the app has routes.
pub const ROUTER_OUTLET: &str = "<page-router-outlet></page-router-outlet>";

pub const AUTO_GENERATED_ROUTE: &str = "auto-generated";
pub const AUTO_GENERATED_COMPONENT: &str = "AutoGeneratedComponent";
pub const AUTO_GENERATED_IMPORT: &str = "@src/app/auto-generated/auto-generated.component";

pub const SAMPLE_MODULE: &str = "BarcelonaModule";
pub const SAMPLE_MODULE_IMPORT: &str = "@src/app/barcelona/barcelona.module";
pub const SAMPLE_LANDING_ROUTE: &str = "/players";
