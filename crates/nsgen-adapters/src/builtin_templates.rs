//! Templates compiled into the binary.
//!
//! Contents live under `templates/` in this crate and are embedded with
//! `include_str!`. Output paths are declared here and may use these
//! placeholders:
//!
//! | Placeholder | Example |
//! |-------------|---------|
//! | `{{SOURCE_DIR}}` | `src` |
//! | `{{NS_EXT}}` | `.tns` |
//! | `{{WEB_EXT}}` | `""` or `.web` |

use nsgen_core::domain::{DomainError, FileSpec, Template, TemplateId, TemplateMetadata};

pub const NS_FILES: &str = "ns-files";
pub const APP_RESOURCES: &str = "app-resources";
pub const AUTO_GENERATED: &str = "auto-generated";
pub const SAMPLE: &str = "sample";

const VERSION: &str = "1.0.0";

// ── Public API ────────────────────────────────────────────────────────────────

/// Every built-in template, in rule order.
pub fn all_templates() -> Result<Vec<Template>, DomainError> {
    Ok(vec![
        ns_files()?,
        app_resources()?,
        auto_generated()?,
        sample()?,
    ])
}

// ── Templates ─────────────────────────────────────────────────────────────────

/// Entry point, app module, routing module and tsconfig for the mobile build.
pub fn ns_files() -> Result<Template, DomainError> {
    Template::builder()
        .id(TemplateId::new(NS_FILES, VERSION))
        .metadata(
            TemplateMetadata::new("NativeScript files")
                .description("Mobile entry point, app module, routing module and tsconfig")
                .version(VERSION)
                .tags(tags(&["nativescript", "core"])),
        )
        .files([
            FileSpec::detect(
                "tsconfig.tns.json",
                include_str!("../templates/ns-files/tsconfig.tns.json"),
            ),
            FileSpec::detect(
                "{{SOURCE_DIR}}/app.css",
                include_str!("../templates/ns-files/app.css"),
            ),
            FileSpec::detect(
                "{{SOURCE_DIR}}/main{{NS_EXT}}.ts",
                include_str!("../templates/ns-files/main.ts"),
            ),
            FileSpec::detect(
                "{{SOURCE_DIR}}/package.json",
                include_str!("../templates/ns-files/package.json"),
            ),
            FileSpec::detect(
                "{{SOURCE_DIR}}/app/app.module{{NS_EXT}}.ts",
                include_str!("../templates/ns-files/app.module.ts"),
            ),
            FileSpec::detect(
                "{{SOURCE_DIR}}/app/app.component{{NS_EXT}}.ts",
                include_str!("../templates/ns-files/app.component.ts"),
            ),
            FileSpec::detect(
                "{{SOURCE_DIR}}/app/app.component{{NS_EXT}}.html",
                include_str!("../templates/ns-files/app.component.html"),
            ),
            FileSpec::detect(
                "{{SOURCE_DIR}}/app/app-routing.module{{NS_EXT}}.ts",
                include_str!("../templates/ns-files/app-routing.module.ts"),
            ),
        ])
        .build()
}

/// Native project files for Android and iOS.
pub fn app_resources() -> Result<Template, DomainError> {
    Template::builder()
        .id(TemplateId::new(APP_RESOURCES, VERSION))
        .metadata(
            TemplateMetadata::new("App resources")
                .description("Android and iOS native project files under App_Resources")
                .version(VERSION)
                .tags(tags(&["nativescript", "android", "ios"])),
        )
        .files([
            FileSpec::detect(
                "App_Resources/Android/app.gradle",
                include_str!("../templates/app-resources/Android/app.gradle"),
            ),
            FileSpec::detect(
                "App_Resources/Android/src/main/AndroidManifest.xml",
                include_str!("../templates/app-resources/Android/src/main/AndroidManifest.xml"),
            ),
            FileSpec::detect(
                "App_Resources/iOS/Info.plist",
                include_str!("../templates/app-resources/iOS/Info.plist"),
            ),
            FileSpec::detect(
                "App_Resources/iOS/build.xcconfig",
                include_str!("../templates/app-resources/iOS/build.xcconfig"),
            ),
        ])
        .build()
}

/// A routed placeholder component shared by web and mobile.
pub fn auto_generated() -> Result<Template, DomainError> {
    const DIR: &str = "{{SOURCE_DIR}}/app/auto-generated";

    Template::builder()
        .id(TemplateId::new(AUTO_GENERATED, VERSION))
        .metadata(
            TemplateMetadata::new("Auto-generated component")
                .description("Shared component routed at /auto-generated")
                .version(VERSION)
                .tags(tags(&["component", "optional"])),
        )
        .files([
            FileSpec::detect(
                format!("{DIR}/auto-generated.component.ts"),
                include_str!("../templates/auto-generated/auto-generated.component.ts"),
            ),
            FileSpec::detect(
                format!("{DIR}/auto-generated.component{{{{WEB_EXT}}}}.html"),
                include_str!("../templates/auto-generated/auto-generated.component.web.html"),
            ),
            FileSpec::detect(
                format!("{DIR}/auto-generated.component{{{{NS_EXT}}}}.html"),
                include_str!("../templates/auto-generated/auto-generated.component.tns.html"),
            ),
        ])
        .build()
}

/// The players feature module.
pub fn sample() -> Result<Template, DomainError> {
    const DIR: &str = "{{SOURCE_DIR}}/app/barcelona";

    Template::builder()
        .id(TemplateId::new(SAMPLE, VERSION))
        .metadata(
            TemplateMetadata::new("Sample feature")
                .description("Players list and detail pages sharing one service")
                .version(VERSION)
                .tags(tags(&["sample", "optional"])),
        )
        .files([
            FileSpec::detect(
                format!("{DIR}/barcelona.common.ts"),
                include_str!("../templates/sample/barcelona.common.ts"),
            ),
            FileSpec::detect(
                format!("{DIR}/barcelona.module{{{{WEB_EXT}}}}.ts"),
                include_str!("../templates/sample/barcelona.module.web.ts"),
            ),
            FileSpec::detect(
                format!("{DIR}/barcelona.module{{{{NS_EXT}}}}.ts"),
                include_str!("../templates/sample/barcelona.module.tns.ts"),
            ),
            FileSpec::detect(
                format!("{DIR}/player.service.ts"),
                include_str!("../templates/sample/player.service.ts"),
            ),
            FileSpec::detect(
                format!("{DIR}/player.model.ts"),
                include_str!("../templates/sample/player.model.ts"),
            ),
            FileSpec::detect(
                format!("{DIR}/players/players.component.ts"),
                include_str!("../templates/sample/players/players.component.ts"),
            ),
            FileSpec::detect(
                format!("{DIR}/players/players.component{{{{WEB_EXT}}}}.html"),
                include_str!("../templates/sample/players/players.component.web.html"),
            ),
            FileSpec::detect(
                format!("{DIR}/players/players.component{{{{NS_EXT}}}}.html"),
                include_str!("../templates/sample/players/players.component.tns.html"),
            ),
            FileSpec::detect(
                format!("{DIR}/player-detail/player-detail.component.ts"),
                include_str!("../templates/sample/player-detail/player-detail.component.ts"),
            ),
            FileSpec::detect(
                format!("{DIR}/player-detail/player-detail.component{{{{WEB_EXT}}}}.html"),
                include_str!("../templates/sample/player-detail/player-detail.component.web.html"),
            ),
            FileSpec::detect(
                format!("{DIR}/player-detail/player-detail.component{{{{NS_EXT}}}}.html"),
                include_str!("../templates/sample/player-detail/player-detail.component.tns.html"),
            ),
        ])
        .build()
}

fn tags(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}
