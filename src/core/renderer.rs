// src/core/renderer.rs

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::{
    constants::TEMPLATE_EXTENSION,
    core::{namespace::Namespace, template_engine::TemplateEngine},
};

/// Failures while producing a target file.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Could not read template '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to render template '{path}': {reason}")]
    Template { path: PathBuf, reason: String },
    #[error("Target '{0}' has no parent directory.")]
    NoParent(PathBuf),
}

/// How the target file was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    Copied,
}

/// Whether `path` carries the template marker extension.
pub fn is_template(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TEMPLATE_EXTENSION))
}

/// Creates `target` from `source`.
///
/// Template sources are rendered against `namespace` and written with `permissions`.
/// Anything else is copied byte for byte, keeping the source's own permissions.
/// The result is staged in a temporary file next to `target` and moved into place,
/// so a failure never leaves a partial target behind.
pub fn render_file(
    engine: &TemplateEngine,
    source: &Path,
    target: &Path,
    namespace: &Namespace,
    permissions: u32,
) -> Result<RenderOutcome, RenderError> {
    let target_dir = target
        .parent()
        .ok_or_else(|| RenderError::NoParent(target.to_path_buf()))?;
    let write_err = |source: io::Error| RenderError::Write {
        path: target.to_path_buf(),
        source,
    };
    let read_err = |err: io::Error| RenderError::Read {
        path: source.to_path_buf(),
        source: err,
    };

    let mut staged = NamedTempFile::new_in(target_dir).map_err(write_err)?;

    let outcome = if is_template(source) {
        let raw = fs::read_to_string(source).map_err(read_err)?;
        let rendered = engine
            .render_namespace(&raw, namespace)
            .map_err(|reason| RenderError::Template {
                path: source.to_path_buf(),
                reason,
            })?;
        staged.write_all(rendered.as_bytes()).map_err(write_err)?;
        set_mode(staged.path(), permissions).map_err(write_err)?;
        log::debug!(
            "Rendered '{}' through the template engine (mode {:o}).",
            source.display(),
            permissions
        );
        RenderOutcome::Rendered
    } else {
        let mut input = File::open(source).map_err(read_err)?;
        io::copy(&mut input, staged.as_file_mut()).map_err(write_err)?;
        let source_permissions = input.metadata().map_err(read_err)?.permissions();
        fs::set_permissions(staged.path(), source_permissions).map_err(write_err)?;
        log::debug!("Copied '{}' verbatim.", source.display());
        RenderOutcome::Copied
    };

    staged.flush().map_err(write_err)?;
    staged.persist(target).map_err(|e| write_err(e.error))?;
    Ok(outcome)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}
