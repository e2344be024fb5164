//! `source` / `include` directive handling
//!
//! Paths are resolved against the directory of the including file and
//! compared in absolute, lexically normalized form. A path that names a
//! file currently being parsed is an inclusion loop; a path that was
//! already parsed earlier is skipped silently.

use crate::parser::errors::KconfigError;
use crate::parser::parse::Parser;
use crate::symbols::IncludeFrame;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

impl Parser<'_> {
    /// Resolve and parse an included file with a fresh parser sharing this
    /// parser's [`KconfigData`](crate::symbols::KconfigData).
    pub(crate) fn parse_include(&mut self, path: &str) -> Result<(), KconfigError> {
        if path.is_empty() {
            return Err(KconfigError::Syntax {
                message: "Expected file name".to_string(),
                before: Some(self.token.clone()),
                location: self.location(),
            });
        }

        let target = match self.abs_path.parent() {
            Some(dir) => normalize(&dir.join(path)),
            None => normalize(Path::new(path)),
        };

        let in_progress = target == self.abs_path
            || self
                .data
                .include_stack()
                .iter()
                .any(|frame| frame.abs_path == target);
        if in_progress {
            return Err(KconfigError::InclusionLoop {
                path: path.to_string(),
                location: self.location(),
            });
        }

        if self.data.was_included(&target) {
            tracing::debug!(file = %target.display(), "already included, skipping");
            return Ok(());
        }

        if self.data.include_stack().len() >= self.options.max_include_depth {
            return Err(KconfigError::NestingTooDeep {
                what: "include",
                limit: self.options.max_include_depth,
                location: self.location(),
            });
        }

        let source = fs::read_to_string(&target).map_err(|source| KconfigError::Include {
            path: path.to_string(),
            source,
            location: self.location(),
        })?;

        let file_name = display_name(&self.file_name, path);
        tracing::debug!(from = %self.file_name, file = %file_name, "including");

        self.data.push_include(IncludeFrame {
            file: self.file_name.clone(),
            abs_path: self.abs_path.clone(),
            line: self.lexer.line(),
        });
        let result = Parser::new(&mut *self.data, self.options, &file_name, target, &source)
            .parse_config();
        self.data.pop_include();

        result
    }
}

/// Absolute, normalized form of `path`, used as a file's identity.
pub(crate) fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    Ok(normalize(&std::path::absolute(path)?))
}

/// Remove `.` and resolve `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Name of an included file relative to how its includer was named.
fn display_name(including: &str, path: &str) -> String {
    match Path::new(including).parent() {
        Some(dir) => dir.join(path).to_string_lossy().into_owned(),
        None => path.to_string(),
    }
}
