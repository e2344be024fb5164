//! Symbol table and shared parse state
//!
//! [`KconfigData`] is created once per top-level parse and threaded by
//! mutable reference through every nested parser, so declarations made in
//! an included file are visible to the file that included it and vice versa.
//!
//! The semantic actions recorded here never evaluate anything: defaults,
//! dependencies and selects are stored as they were recognized. The only
//! check performed is [`KconfigData::undefined_symbols`].

use crate::parser::errors::IncludeSite;
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::{Path, PathBuf};

/// One `default` property, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultValue {
    pub value: bool,
    /// Guarded by an `if` condition
    pub conditional: bool,
    /// The trailing `n` default appended to every declaration
    pub implicit: bool,
}

/// `CONFIG_NAME=y|n`, with the `CONFIG_` prefix stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub name: String,
    pub value: bool,
}

/// A declared config symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub defaults: Vec<DefaultValue>,
    pub selects: Vec<String>,
    /// Number of `depends on` properties
    pub dependencies: usize,
    pub file: String,
    pub line: usize,
}

/// One level of file inclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeFrame {
    /// Including file, as it is displayed in diagnostics
    pub file: String,
    /// Including file, absolute and normalized
    pub abs_path: PathBuf,
    /// Line of the `source`/`include` directive
    pub line: usize,
}

/// State shared by all parsers of a single top-level parse
#[derive(Debug, Default)]
pub struct KconfigData {
    symbols: FxHashMap<String, Symbol>,
    referenced: FxHashSet<String>,
    assignments: Vec<Assignment>,
    previously_included: Vec<PathBuf>,
    include_stack: Vec<IncludeFrame>,
}

impl KconfigData {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Semantic actions =====

    /// Record `config NAME`. Returns `false` if `name` was already declared.
    pub fn declare(&mut self, name: &str, file: &str, line: usize) -> bool {
        if self.symbols.contains_key(name) {
            return false;
        }
        tracing::trace!(symbol = name, file, line, "declared");
        self.symbols.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                defaults: Vec::new(),
                selects: Vec::new(),
                dependencies: 0,
                file: file.to_string(),
                line,
            },
        );
        true
    }

    /// Record a use of `name` as an operand.
    pub fn reference(&mut self, name: &str) {
        if !self.referenced.contains(name) {
            self.referenced.insert(name.to_string());
        }
    }

    pub fn assign(&mut self, name: &str, value: bool) {
        tracing::trace!(symbol = name, value, "assigned");
        self.assignments.push(Assignment {
            name: name.to_string(),
            value,
        });
    }

    pub fn add_default(&mut self, var: &str, default: DefaultValue) {
        if let Some(symbol) = self.symbols.get_mut(var) {
            symbol.defaults.push(default);
        }
    }

    pub fn add_dependency(&mut self, var: &str) {
        if let Some(symbol) = self.symbols.get_mut(var) {
            symbol.dependencies += 1;
        }
    }

    pub fn add_select(&mut self, var: &str, selected: &str) {
        if let Some(symbol) = self.symbols.get_mut(var) {
            symbol.selects.push(selected.to_string());
        }
    }

    // ===== Semantic analysis =====

    /// Referenced but undeclared names, sorted.
    pub fn undefined_symbols(&self) -> Vec<String> {
        let mut undefined: Vec<String> = self
            .referenced
            .iter()
            .filter(|name| !self.symbols.contains_key(name.as_str()))
            .cloned()
            .collect();
        undefined.sort();
        undefined
    }

    // ===== Include bookkeeping =====

    pub fn was_included(&self, path: &Path) -> bool {
        self.previously_included.iter().any(|p| p == path)
    }

    pub fn mark_included(&mut self, path: PathBuf) {
        self.previously_included.push(path);
    }

    pub fn push_include(&mut self, frame: IncludeFrame) {
        self.include_stack.push(frame);
    }

    pub fn pop_include(&mut self) -> Option<IncludeFrame> {
        self.include_stack.pop()
    }

    /// Open include frames, outermost first.
    pub fn include_stack(&self) -> &[IncludeFrame] {
        &self.include_stack
    }

    pub fn include_sites(&self) -> Vec<IncludeSite> {
        self.include_stack
            .iter()
            .map(|frame| IncludeSite {
                file: frame.file.clone(),
                line: frame.line,
            })
            .collect()
    }

    // ===== Queries =====

    /// Declared symbol names, sorted.
    pub fn declared(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.symbols.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn is_referenced(&self, name: &str) -> bool {
        self.referenced.contains(name)
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Every file parsed so far, in the order parsing started.
    pub fn included_files(&self) -> &[PathBuf] {
        &self.previously_included
    }
}
