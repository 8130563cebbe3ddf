//! Anchored edits to generated TypeScript and template sources.
//!
//! These are not a TypeScript parser. Every edit locates a fixed anchor that
//! the built-in templates are known to contain (`Routes = [`, `imports: [`)
//! and fails with [`DomainError::MissingAnchor`] when it is gone.

use std::fmt;

use crate::domain::{
    entities::{common::TreePath, tree::VirtualTree},
    error::DomainError,
};

const INDENT: &str = "    ";
const ROUTES_ANCHOR: &str = "Routes = [";
const NG_MODULE_ANCHOR: &str = "@NgModule(";
const NG_MODULE_IMPORTS_ANCHOR: &str = "imports: [";
const NG_MODULE_DECLARATIONS_ANCHOR: &str = "declarations: [";

/// An entry of an Angular route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Component {
        path: String,
        component: String,
    },
    Redirect {
        path: String,
        redirect_to: String,
        path_match: String,
    },
}

impl Route {
    pub fn component(path: impl Into<String>, component: impl Into<String>) -> Self {
        Self::Component {
            path: path.into(),
            component: component.into(),
        }
    }

    /// A `pathMatch: 'full'` redirect.
    pub fn redirect(path: impl Into<String>, redirect_to: impl Into<String>) -> Self {
        Self::Redirect {
            path: path.into(),
            redirect_to: redirect_to.into(),
            path_match: "full".into(),
        }
    }

    fn properties(&self) -> Vec<String> {
        match self {
            Self::Component { path, component } => {
                vec![format!("path: '{path}'"), format!("component: {component}")]
            }
            Self::Redirect {
                path,
                redirect_to,
                path_match,
            } => vec![
                format!("path: '{path}'"),
                format!("redirectTo: '{redirect_to}'"),
                format!("pathMatch: '{path_match}'"),
            ],
        }
    }

    /// The route as an object literal, one property per line, with a
    /// trailing comma after the closing brace.
    fn render(&self, indent: &str) -> String {
        let mut out = format!("{indent}{{\n");
        for prop in self.properties() {
            out.push_str(&format!("{indent}{INDENT}{prop},\n"));
        }
        out.push_str(&format!("{indent}}},"));
        out
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(""))
    }
}

/// A text file loaded from the tree for editing.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: TreePath,
    content: String,
}

impl SourceFile {
    pub fn load(tree: &VirtualTree, path: &TreePath) -> Result<Self, DomainError> {
        Ok(Self {
            path: path.clone(),
            content: tree.read_required(path)?.to_string(),
        })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Add `import { symbol } from 'module';` after the last top-level
    /// import. No-op when the exact import is already present.
    pub fn add_import(&mut self, symbol: &str, module: &str) {
        let statement = format!("import {{ {symbol} }} from '{module}';");
        if self.content.contains(&statement) {
            return;
        }

        let mut offset = 0;
        let mut insert_at = None;
        for line in self.content.split_inclusive('\n') {
            offset += line.len();
            if line.starts_with("import ") {
                insert_at = Some(offset);
            }
        }

        match insert_at {
            Some(at) => {
                let mut line = statement;
                if !self.content[..at].ends_with('\n') {
                    line.insert(0, '\n');
                } else {
                    line.push('\n');
                }
                self.content.insert_str(at, &line);
            }
            None => self.content.insert_str(0, &format!("{statement}\n\n")),
        }
    }

    /// Append a route to the first `Routes = [ ... ]` table.
    pub fn add_route(&mut self, route: &Route) -> Result<(), DomainError> {
        let anchor = self.find(ROUTES_ANCHOR, 0)?;
        let open = anchor + ROUTES_ANCHOR.len() - 1;
        let base = line_indent(&self.content, anchor).to_string();
        let entry = route.render(&format!("{base}{INDENT}"));
        self.append_to_array(open, &entry, &base)
    }

    /// Add `symbol` to the `imports` array of the `@NgModule` decorator.
    pub fn add_ng_module_import(&mut self, symbol: &str) -> Result<(), DomainError> {
        self.add_to_ng_module_array(NG_MODULE_IMPORTS_ANCHOR, symbol)
    }

    /// Add `symbol` to the `declarations` array of the `@NgModule` decorator.
    pub fn add_ng_module_declaration(&mut self, symbol: &str) -> Result<(), DomainError> {
        self.add_to_ng_module_array(NG_MODULE_DECLARATIONS_ANCHOR, symbol)
    }

    fn add_to_ng_module_array(&mut self, key: &str, symbol: &str) -> Result<(), DomainError> {
        let decorator = self.find(NG_MODULE_ANCHOR, 0)?;
        let anchor = self.find(key, decorator)?;
        let open = anchor + key.len() - 1;
        let close = matching_bracket(&self.content, open).ok_or_else(|| self.missing("]"))?;
        if self.content[open..close]
            .split(|c: char| c == ',' || c.is_whitespace() || c == '[')
            .any(|item| item == symbol)
        {
            return Ok(());
        }
        let base = line_indent(&self.content, anchor).to_string();
        let entry = format!("{base}{INDENT}{symbol},");
        self.append_to_array(open, &entry, &base)
    }

    /// Replace every occurrence of `from` with `to`. Returns whether
    /// anything changed.
    pub fn replace(&mut self, from: &str, to: &str) -> bool {
        if !self.content.contains(from) {
            return false;
        }
        self.content = self.content.replace(from, to);
        true
    }

    pub fn save(self, tree: &mut VirtualTree) -> Result<(), DomainError> {
        tree.overwrite(&self.path, self.content)
    }

    fn find(&self, needle: &str, from: usize) -> Result<usize, DomainError> {
        self.content[from..]
            .find(needle)
            .map(|i| i + from)
            .ok_or_else(|| self.missing(needle))
    }

    fn missing(&self, anchor: &str) -> DomainError {
        DomainError::MissingAnchor {
            path: self.path.to_string(),
            anchor: anchor.to_string(),
        }
    }

    /// Insert a pre-indented `entry` as the last element of the array whose
    /// `[` is at byte `open`. The closing bracket is placed on its own line
    /// at `base` indentation.
    fn append_to_array(&mut self, open: usize, entry: &str, base: &str) -> Result<(), DomainError> {
        let close = matching_bracket(&self.content, open).ok_or_else(|| self.missing("]"))?;
        let inner = self.content[open + 1..close].trim_end();

        let mut replacement = String::from(inner);
        if !inner.trim().is_empty() && !inner.ends_with(',') {
            replacement.push(',');
        }
        replacement.push('\n');
        replacement.push_str(entry);
        replacement.push('\n');
        replacement.push_str(base);

        self.content.replace_range(open + 1..close, &replacement);
        Ok(())
    }
}

/// Leading whitespace of the line containing byte `at`.
fn line_indent(content: &str, at: usize) -> &str {
    let start = content[..at].rfind('\n').map_or(0, |i| i + 1);
    let line = &content[start..];
    let end = line
        .find(|c: char| !c.is_whitespace() || c == '\n')
        .unwrap_or(line.len());
    &line[..end]
}

/// Index of the `]` matching the `[` at `open`, skipping quoted strings.
fn matching_bracket(content: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in content[open..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}
