//! A minimal Angular workspace on disk and a sandboxed `nsgen` command.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

const ANGULAR_JSON: &str = r#"{
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

const PACKAGE_JSON: &str = r#"{
  "name": "foo",
  "version": "0.0.0",
  "scripts": {
    "ng": "ng"
  },
  "private": true,
  "dependencies": {
    "@angular/core": "~8.0.0"
  },
  "devDependencies": {
    "typescript": "~3.4.3"
  }
}
"#;

const TSCONFIG_JSON: &str = r#"{
  "compilerOptions": {
    "baseUrl": "./",
    "module": "esnext"
  }
}
"#;

const TSCONFIG_APP_JSON: &str = r#"{
  "extends": "./tsconfig.json",
  "files": [
    "src/main.ts",
    "src/polyfills.ts"
  ]
}
"#;

pub const MAIN_TS: &str = "import { enableProdMode } from '@angular/core';\n";

/// A temp directory holding the `foo` workspace.
pub fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let files = [
        ("angular.json", ANGULAR_JSON),
        ("package.json", PACKAGE_JSON),
        ("tsconfig.json", TSCONFIG_JSON),
        ("tsconfig.app.json", TSCONFIG_APP_JSON),
        (".gitignore", "/dist\n/node_modules\n"),
        ("src/main.ts", MAIN_TS),
        ("src/polyfills.ts", "import 'zone.js/dist/zone';\n"),
        ("src/app/app.module.ts", "export class AppModule { }\n"),
    ];
    for (path, content) in files {
        write(dir.path(), path, content);
    }
    dir
}

pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// `nsgen` with user config, `.env` and colour settings isolated from the
/// host.
pub fn nsgen(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("nsgen").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR")
        .env_remove("NSGEN_CONFIG")
        .env_remove("NSGEN__DEFAULTS__SAMPLE")
        .arg("--no-color");
    cmd
}
