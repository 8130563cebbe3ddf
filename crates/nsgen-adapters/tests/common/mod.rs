//! Shared fixtures: a freshly generated Angular 8 workspace with one
//! project, `foo`.

#![allow(dead_code)]

use std::path::Path;

use nsgen_adapters::{MemoryFilesystem, TemplateRuleExecutor};
use nsgen_core::{
    application::AugmentService,
    domain::{AddNsOptions, VirtualTree},
};

pub const ANGULAR_JSON: &str = r#"{
  "$schema": "./node_modules/@angular/cli/lib/config/schema.json",
  "version": 1,
  "newProjectRoot": "projects",
  "projects": {
    "foo": {
      "projectType": "application",
      "root": "",
      "sourceRoot": "src",
      "prefix": "app",
      "architect": {
        "build": {
          "builder": "@angular-devkit/build-angular:browser",
          "options": {
            "outputPath": "dist/foo",
            "index": "src/index.html",
            "main": "src/main.ts",
            "polyfills": "src/polyfills.ts",
            "tsConfig": "tsconfig.app.json"
          }
        }
      }
    }
  },
  "defaultProject": "foo"
}
"#;

pub const PACKAGE_JSON: &str = r#"{
  "name": "foo",
  "version": "0.0.0",
  "scripts": {
    "ng": "ng",
    "start": "ng serve",
    "build": "ng build"
  },
  "private": true,
  "dependencies": {
    "@angular/common": "~8.0.0",
    "@angular/core": "~8.0.0",
    "rxjs": "~6.4.0",
    "zone.js": "~0.9.1"
  },
  "devDependencies": {
    "@angular/cli": "~8.0.0",
    "typescript": "~3.4.3"
  }
}
"#;

pub const TSCONFIG_JSON: &str = r#"{
  "compileOnSave": false,
  "compilerOptions": {
    "baseUrl": "./",
    "outDir": "./dist/out-tsc",
    "sourceMap": true,
    "module": "esnext",
    "target": "es2015"
  }
}
"#;

pub const TSCONFIG_APP_JSON: &str = r#"{
  "extends": "./tsconfig.json",
  "compilerOptions": {
    "outDir": "./out-tsc/app",
    "types": []
  },
  "files": [
    "src/main.ts",
    "src/polyfills.ts"
  ],
  "include": [
    "src/**/*.ts"
  ]
}
"#;

pub const GITIGNORE: &str = "# compiled output\n/dist\n/tmp\n\n# dependencies\n/node_modules\n";

pub fn files() -> Vec<(&'static str, &'static str)> {
    vec![
        ("/angular.json", ANGULAR_JSON),
        ("/package.json", PACKAGE_JSON),
        ("/tsconfig.json", TSCONFIG_JSON),
        ("/tsconfig.app.json", TSCONFIG_APP_JSON),
        ("/.gitignore", GITIGNORE),
        ("/src/main.ts", "import { enableProdMode } from '@angular/core';\n"),
        ("/src/polyfills.ts", "import 'zone.js/dist/zone';\n"),
        ("/src/index.html", "<app-root></app-root>\n"),
        (
            "/src/app/app.module.ts",
            "import { NgModule } from '@angular/core';\n\n@NgModule({})\nexport class AppModule { }\n",
        ),
        ("/src/app/app.component.html", "<h1>{{ title }}</h1>\n"),
    ]
}

pub fn workspace() -> VirtualTree {
    VirtualTree::from_files(files()).unwrap()
}

/// The same workspace seeded into an in-memory disk under `root`.
pub fn memory_disk(root: &str) -> MemoryFilesystem {
    files().into_iter().fold(MemoryFilesystem::new(), |fs, (path, content)| {
        fs.with_file(Path::new(root).join(&path[1..]), content)
    })
}

pub fn options(sample: bool, skip: bool) -> AddNsOptions {
    AddNsOptions::builder("foo")
        .sample(sample)
        .skip_auto_generated_component(skip)
        .build()
        .unwrap()
}

pub fn service(filesystem: MemoryFilesystem) -> AugmentService {
    AugmentService::new(
        Box::new(TemplateRuleExecutor::builtin().unwrap()),
        Box::new(filesystem),
    )
}

pub fn augment(options: &AddNsOptions) -> VirtualTree {
    service(MemoryFilesystem::new())
        .apply(workspace(), options)
        .unwrap()
}
