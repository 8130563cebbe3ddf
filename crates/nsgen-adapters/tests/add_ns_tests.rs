//! End-to-end tests of the NativeScript augmentation against an Angular 8
//! workspace, using the built-in templates.

mod common;

use std::path::Path;

use nsgen_adapters::{LocalFilesystem, MemoryFilesystem, TemplateRuleExecutor};
use nsgen_core::{
    application::{ApplicationError, AugmentService, ports::Filesystem},
    domain::{AddNsOptions, TreePath, TsConfig, VirtualTree},
    error::{ErrorCategory, NsError},
};
use serde_json::Value;

const ROUTING: &str = "/src/app/app-routing.module.tns.ts";
const APP_MODULE: &str = "/src/app/app.module.tns.ts";
const ENTRY_HTML: &str = "/src/app/app.component.tns.html";
const PLACEHOLDER: &str = r#"<Label text="Entry Component works" textWrap="true"></Label>"#;
const OUTLET: &str = "<page-router-outlet></page-router-outlet>";

const NS_FILES: &[&str] = &[
    "/tsconfig.tns.json",
    "/src/app.css",
    "/src/main.tns.ts",
    "/src/package.json",
    "/src/app/app.module.tns.ts",
    "/src/app/app.component.tns.ts",
    "/src/app/app.component.tns.html",
    "/src/app/app-routing.module.tns.ts",
];

const APP_RESOURCES: &[&str] = &[
    "/App_Resources/Android/app.gradle",
    "/App_Resources/Android/src/main/AndroidManifest.xml",
    "/App_Resources/iOS/Info.plist",
    "/App_Resources/iOS/build.xcconfig",
];

const AUTO_GENERATED: &[&str] = &[
    "/src/app/auto-generated/auto-generated.component.ts",
    "/src/app/auto-generated/auto-generated.component.html",
    "/src/app/auto-generated/auto-generated.component.tns.html",
];

const SAMPLE: &[&str] = &[
    "/src/app/barcelona/barcelona.common.ts",
    "/src/app/barcelona/barcelona.module.ts",
    "/src/app/barcelona/barcelona.module.tns.ts",
    "/src/app/barcelona/player.service.ts",
    "/src/app/barcelona/player.model.ts",
    "/src/app/barcelona/players/players.component.ts",
    "/src/app/barcelona/players/players.component.html",
    "/src/app/barcelona/players/players.component.tns.html",
    "/src/app/barcelona/player-detail/player-detail.component.ts",
    "/src/app/barcelona/player-detail/player-detail.component.html",
    "/src/app/barcelona/player-detail/player-detail.component.tns.html",
];

const AUTO_GENERATED_ROUTE: &str = "    {\n        path: 'auto-generated',\n        component: AutoGeneratedComponent,\n    },";
const SAMPLE_REDIRECT: &str = "    {\n        path: '',\n        redirectTo: '/players',\n        pathMatch: 'full',\n    },";

/// Files that optional rules edit after creation.
const EDITED_BY_OPTIONAL_RULES: &[&str] = &[ROUTING, APP_MODULE, ENTRY_HTML];

fn json(tree: &VirtualTree, path: &str) -> Value {
    tree.read_json(path).unwrap()
}

fn tsconfig(tree: &VirtualTree, path: &str) -> TsConfig {
    TsConfig::load(tree, &TreePath::new(path).unwrap()).unwrap()
}

fn all_combinations() -> Vec<(bool, bool, VirtualTree)> {
    let mut out = Vec::new();
    for sample in [false, true] {
        for skip in [false, true] {
            out.push((sample, skip, common::augment(&common::options(sample, skip))));
        }
    }
    out
}

// ============================================================================
// Always-on artifacts
// ============================================================================

#[test]
fn always_on_artifacts_identical_across_flag_combinations() {
    let trees = all_combinations();
    let (_, _, reference) = &trees[0];

    let always_on: Vec<&TreePath> = reference
        .files()
        .filter(|p| !p.as_str().contains("/auto-generated/"))
        .filter(|p| !EDITED_BY_OPTIONAL_RULES.contains(&p.as_str()))
        .collect();

    for (sample, skip, tree) in &trees {
        for path in &always_on {
            assert_eq!(
                tree.read(path),
                reference.read(path),
                "{path} differs for sample={sample} skip={skip}"
            );
        }
    }
}

#[test]
fn nativescript_files_are_created() {
    for (_, _, tree) in all_combinations() {
        for path in NS_FILES.iter().chain(APP_RESOURCES) {
            assert!(tree.exists(path), "missing {path}");
        }
        assert!(tree.exists("/nsconfig.json"));
    }
}

#[test]
fn existing_sources_are_untouched() {
    let tree = common::augment(&common::options(false, false));
    for (path, content) in common::files() {
        if matches!(
            path,
            "/angular.json" | "/package.json" | "/tsconfig.json" | "/tsconfig.app.json" | "/.gitignore"
        ) {
            continue;
        }
        assert_eq!(tree.read(path), Some(content), "{path} changed");
    }
}

#[test]
fn dependencies_scripts_and_id() {
    let tree = common::augment(&common::options(false, false));
    let package = json(&tree, "/package.json");

    assert_eq!(package["dependencies"]["nativescript-angular"], "~8.0.0");
    assert_eq!(package["dependencies"]["nativescript-theme-core"], "~1.0.4");
    assert_eq!(package["dependencies"]["reflect-metadata"], "~0.1.12");
    assert_eq!(package["dependencies"]["tns-core-modules"], "~6.0.0");
    assert_eq!(package["dependencies"]["@angular/core"], "~8.0.0");
    assert_eq!(package["devDependencies"]["nativescript-dev-webpack"], "~1.0.0");
    assert_eq!(package["devDependencies"]["@nativescript/schematics"], "~0.7.0");
    assert_eq!(package["devDependencies"]["@nativescript/tslint-rules"], "~0.0.2");
    assert_eq!(package["devDependencies"]["@angular/cli"], "~8.0.0");
    assert_eq!(package["scripts"]["android"], "tns run android");
    assert_eq!(package["scripts"]["ios"], "tns run ios");
    assert_eq!(package["scripts"]["start"], "ng serve");
    assert_eq!(package["nativescript"]["id"], "org.nativescript.ngsample");

    let angular = json(&tree, "/angular.json");
    assert_eq!(angular["cli"]["defaultCollection"], "@nativescript/schematics");
    assert_eq!(angular["defaultProject"], "foo");
}

#[test]
fn gitignore_keeps_existing_lines_and_appends_once() {
    let tree = common::augment(&common::options(false, false));
    let gitignore = tree.read("/.gitignore").unwrap();

    assert!(gitignore.starts_with(common::GITIGNORE));
    for entry in ["node_modules/", "platforms/", "hooks/", "src/**/*.js"] {
        assert_eq!(
            gitignore.lines().filter(|l| l.trim() == entry).count(),
            1,
            "{entry}"
        );
    }
}

#[test]
fn path_mappings_in_precedence_order() {
    let tree = common::augment(&common::options(false, false));

    let ns = tsconfig(&tree, "/tsconfig.tns.json");
    assert_eq!(
        ns.path_mapping("@src/*"),
        vec!["src/*.ios.ts", "src/*.android.ts", "src/*.tns.ts", "src/*.ts"]
    );
    assert_eq!(ns.files(), vec!["src/main.tns.ts"]);

    let web = tsconfig(&tree, "/tsconfig.app.json");
    assert_eq!(web.path_mapping("@src/*"), vec!["src/*.web", "src/*"]);
    assert_eq!(web.files(), vec!["src/main.ts", "src/polyfills.ts"]);

    let base = tsconfig(&tree, "/tsconfig.json");
    assert_eq!(
        base.path_mapping("@src/*"),
        vec![
            "src/*.android.ts",
            "src/*.ios.ts",
            "src/*.tns.ts",
            "src/*.web.ts",
            "src/*"
        ]
    );
    assert_eq!(json(&tree, "/tsconfig.json")["compilerOptions"]["baseUrl"], "./");
}

#[test]
fn nsconfig_points_at_source_root() {
    let tree = common::augment(&common::options(false, false));
    let config = json(&tree, "/nsconfig.json");

    assert_eq!(config["appResourcesPath"], "App_Resources");
    assert_eq!(config["appPath"], "src");
    assert_eq!(config["nsext"], ".tns");
    assert_eq!(config["webext"], "");
    assert_eq!(config["shared"], true);
}

// ============================================================================
// Auto-generated component
// ============================================================================

#[test]
fn auto_generated_component_is_routed() {
    let tree = common::augment(&common::options(false, false));

    for path in AUTO_GENERATED {
        assert!(tree.exists(path), "missing {path}");
    }
    let routing = tree.read(ROUTING).unwrap();
    assert!(routing.contains(
        "import { AutoGeneratedComponent } from '@src/app/auto-generated/auto-generated.component';"
    ));
    assert!(routing.contains(AUTO_GENERATED_ROUTE));

    let entry = tree.read(ENTRY_HTML).unwrap();
    assert!(!entry.contains(PLACEHOLDER));
    assert!(entry.contains(OUTLET));
}

#[test]
fn skipping_auto_generated_component_leaves_templates_as_generated() {
    let tree = common::augment(&common::options(false, true));

    for path in AUTO_GENERATED {
        assert!(!tree.exists(path), "unexpected {path}");
    }
    let routing = tree.read(ROUTING).unwrap();
    assert!(routing.contains("export const routes: Routes = [];"));
    assert!(!routing.contains("AutoGeneratedComponent"));
    assert!(tree.read(ENTRY_HTML).unwrap().contains(PLACEHOLDER));
}

// ============================================================================
// Sample feature
// ============================================================================

#[test]
fn sample_feature_is_generated_and_wired() {
    for skip in [false, true] {
        let tree = common::augment(&common::options(true, skip));

        for path in SAMPLE {
            assert!(tree.exists(path), "missing {path}");
        }
        assert!(tree.read(ROUTING).unwrap().contains(SAMPLE_REDIRECT));

        let module = tree.read(APP_MODULE).unwrap();
        assert!(module.contains(
            "import { BarcelonaModule } from '@src/app/barcelona/barcelona.module';"
        ));
        assert!(module.contains("        AppRoutingModule,\n        BarcelonaModule,\n    ],"));
    }
}

#[test]
fn sample_without_auto_generated_keeps_entry_placeholder() {
    let tree = common::augment(&common::options(true, true));
    let entry = tree.read(ENTRY_HTML).unwrap();

    assert!(entry.contains(PLACEHOLDER));
    assert!(!entry.contains(OUTLET));
}

#[test]
fn without_sample_there_is_no_feature() {
    for skip in [false, true] {
        let tree = common::augment(&common::options(false, skip));

        for path in SAMPLE {
            assert!(!tree.exists(path), "unexpected {path}");
        }
        assert!(!tree.read(ROUTING).unwrap().contains("redirectTo"));
        assert!(!tree.read(APP_MODULE).unwrap().contains("BarcelonaModule"));
    }
}

#[test]
fn both_optional_rules_route_in_plan_order() {
    let tree = common::augment(&common::options(true, false));
    let routing = tree.read(ROUTING).unwrap();

    let auto = routing.find("path: 'auto-generated'").unwrap();
    let redirect = routing.find("redirectTo: '/players'").unwrap();
    assert!(auto < redirect);
    assert_eq!(tree.read(ENTRY_HTML).unwrap().matches(OUTLET).count(), 1);
}

// ============================================================================
// Extensions
// ============================================================================

#[test]
fn custom_extensions_qualify_generated_names() {
    let options = AddNsOptions::builder("foo")
        .ns_extension("mobile")
        .web_extension("web")
        .sample(true)
        .build()
        .unwrap();
    let tree = common::augment(&options);

    assert!(tree.exists("/src/main.mobile.ts"));
    assert!(tree.exists("/src/app/app-routing.module.mobile.ts"));
    assert!(tree.exists("/src/app/auto-generated/auto-generated.component.web.html"));
    assert!(tree.exists("/src/app/auto-generated/auto-generated.component.mobile.html"));
    assert!(tree.exists("/src/app/barcelona/barcelona.module.web.ts"));
    assert!(!tree.exists("/src/main.tns.ts"));

    let config = json(&tree, "/nsconfig.json");
    assert_eq!(config["nsext"], ".mobile");
    assert_eq!(config["webext"], ".web");

    assert!(
        tsconfig(&tree, "/tsconfig.tns.json")
            .path_mapping("@src/*")
            .contains(&"src/*.mobile.ts")
    );
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn unknown_project_fails_without_output() {
    let options = AddNsOptions::builder("bar").build().unwrap();
    let err = common::service(MemoryFilesystem::new())
        .apply(common::workspace(), &options)
        .unwrap_err();

    assert!(matches!(err, NsError::Domain(_)));
    assert!(err.suggestions().iter().any(|s| s.contains("foo")));
}

#[test]
fn existing_nsconfig_stops_the_transform() {
    let tree = common::workspace().with_file("/nsconfig.json", "{}").unwrap();
    let err = common::service(MemoryFilesystem::new())
        .apply(tree, &common::options(false, false))
        .unwrap_err();

    assert!(err.to_string().contains("add-app-resources"));
}

// ============================================================================
// Disk workspaces
// ============================================================================

#[test]
fn augment_directory_writes_changes_to_memory_disk() {
    let disk = common::memory_disk("/ws");
    let diff = common::service(disk.clone())
        .augment_directory(Path::new("/ws"), &common::options(false, false), false)
        .unwrap();

    assert!(diff.created.iter().any(|p| p.as_str() == "/src/main.tns.ts"));
    assert!(diff.updated.iter().any(|p| p.as_str() == "/package.json"));
    assert!(disk.contents("/ws/src/main.tns.ts").is_some());
    assert!(
        disk.contents("/ws/package.json")
            .unwrap()
            .contains("nativescript-angular")
    );
    assert_eq!(
        disk.contents("/ws/src/main.ts").as_deref(),
        Some("import { enableProdMode } from '@angular/core';\n")
    );
}

#[test]
fn dry_run_leaves_disk_alone() {
    let disk = common::memory_disk("/ws");
    let before = disk.paths();
    let diff = common::service(disk.clone())
        .augment_directory(Path::new("/ws"), &common::options(true, false), true)
        .unwrap();

    assert!(!diff.is_empty());
    assert_eq!(disk.paths(), before);
}

#[test]
fn failed_write_restores_the_workspace() {
    let disk = common::memory_disk("/ws").with_read_only("/ws/tsconfig.json");
    let before: Vec<_> = disk
        .paths()
        .into_iter()
        .map(|p| {
            let content = disk.contents(&p);
            (p, content)
        })
        .collect();

    let result = common::service(disk.clone()).augment_directory(
        Path::new("/ws"),
        &common::options(false, false),
        false,
    );

    assert!(result.is_err());
    let after: Vec<_> = disk
        .paths()
        .into_iter()
        .map(|p| {
            let content = disk.contents(&p);
            (p, content)
        })
        .collect();
    assert_eq!(after, before);
    assert!(!disk.exists(Path::new("/ws/App_Resources")));
    assert!(!disk.exists(Path::new("/ws/src/app/auto-generated")));
    assert!(disk.exists(Path::new("/ws/src/app")));
}

#[test]
fn augment_directory_on_local_disk() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for (path, content) in common::files() {
        let target = root.join(&path[1..]);
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::write(target, content).unwrap();
    }
    std::fs::write(root.join("src/favicon.ico"), [0u8, 0xff, 0xfe, 0x80]).unwrap();
    std::fs::create_dir_all(root.join("node_modules/@angular/core")).unwrap();
    std::fs::write(root.join("node_modules/@angular/core/package.json"), "{}").unwrap();

    let service = AugmentService::new(
        Box::new(TemplateRuleExecutor::builtin().unwrap()),
        Box::new(LocalFilesystem::new()),
    );
    let diff = service
        .augment_directory(root, &common::options(false, false), false)
        .unwrap();

    assert!(root.join("App_Resources/iOS/Info.plist").is_file());
    assert!(root.join("src/app/auto-generated/auto-generated.component.ts").is_file());
    assert!(diff.paths().all(|p| !p.as_str().starts_with("/node_modules")));
    assert_eq!(
        std::fs::read(root.join("src/favicon.ico")).unwrap(),
        vec![0u8, 0xff, 0xfe, 0x80]
    );
}

#[test]
fn non_utf8_gitignore_is_not_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for (path, content) in common::files() {
        let target = root.join(&path[1..]);
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::write(target, content).unwrap();
    }
    let original = b"# caf\xe9 build\n/secret-keys\n".to_vec();
    std::fs::write(root.join(".gitignore"), &original).unwrap();

    let service = AugmentService::new(
        Box::new(TemplateRuleExecutor::builtin().unwrap()),
        Box::new(LocalFilesystem::new()),
    );
    let err = service
        .augment_directory(root, &common::options(false, false), false)
        .unwrap_err();

    assert!(matches!(
        err,
        NsError::Application(ApplicationError::UnreadableTarget { ref path })
            if path.ends_with(".gitignore")
    ));
    assert_eq!(err.category(), ErrorCategory::Conflict);
    assert_eq!(std::fs::read(root.join(".gitignore")).unwrap(), original);
    assert!(!root.join("App_Resources").exists());
    assert!(!root.join("nsconfig.json").exists());
}
