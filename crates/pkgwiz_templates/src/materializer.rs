//! Template tree materialization.
//!
//! Copies a template directory to a new location and then renders it in
//! place:
//!
//! 1. the manifest template (if configured) with its own substitution set
//! 2. every other file carrying the template marker: content, then name
//! 3. every directory whose name holds a placeholder, children first
//!
//! Nothing is written before both preconditions hold (template present,
//! target absent). After that the process is best effort: a failure leaves
//! whatever was already written in place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{TreeError, TreeResult};
use crate::renderer::Substitutions;

/// Suffix marking files that must be rendered and renamed.
pub const DEFAULT_TEMPLATE_MARKER: &str = ".template";

/// Manifest template at the root of a package template.
pub const DEFAULT_MANIFEST_FILE: &str = "package.json.template";

/// Directory never copied out of a template.
const VCS_DIR: &str = ".git";

/// The manifest file and the substitution set reserved for it.
#[derive(Debug, Clone)]
pub struct ManifestTemplate {
    /// File name relative to the target root, marker included.
    pub file_name: String,
    pub substitutions: Substitutions,
}

/// What a materialization did.
#[derive(Debug, Clone, Default)]
pub struct MaterializeReport {
    pub target_root: PathBuf,
    pub copied_files: usize,
    pub rendered_files: usize,
    pub renamed_directories: usize,
    pub manifest: Option<PathBuf>,
}

/// Copies and renders template trees.
#[derive(Debug, Clone)]
pub struct TreeMaterializer {
    marker: String,
    manifest: Option<ManifestTemplate>,
}

impl Default for TreeMaterializer {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeMaterializer {
    pub fn new() -> Self {
        Self {
            marker: DEFAULT_TEMPLATE_MARKER.to_string(),
            manifest: None,
        }
    }

    /// Use a different template marker suffix.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Render `file_name` at the target root with `substitutions` instead of
    /// the general set.
    pub fn with_manifest(mut self, file_name: impl Into<String>, substitutions: Substitutions) -> Self {
        self.manifest = Some(ManifestTemplate {
            file_name: file_name.into(),
            substitutions,
        });
        self
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Materialize `template_root` into `target_root`.
    pub fn materialize(
        &self,
        template_root: &Path,
        target_root: &Path,
        substitutions: &Substitutions,
    ) -> TreeResult<MaterializeReport> {
        if !template_root.is_dir() {
            return Err(TreeError::TemplateMissing(template_root.to_path_buf()));
        }
        if target_root.exists() {
            return Err(TreeError::TargetAlreadyExists(target_root.to_path_buf()));
        }

        info!(
            "Materializing template {:?} to {:?}",
            template_root, target_root
        );

        let mut report = MaterializeReport {
            target_root: target_root.to_path_buf(),
            ..Default::default()
        };

        report.copied_files = self.copy_tree(template_root, target_root)?;

        if let Some(manifest) = &self.manifest {
            report.manifest = self.process_manifest(target_root, manifest)?;
            if report.manifest.is_some() {
                report.rendered_files += 1;
            }
        }

        report.rendered_files += self.render_files(target_root, substitutions)?;
        report.renamed_directories = self.rename_directories(target_root, substitutions)?;

        info!(
            "Materialized {} files ({} rendered, {} directories renamed)",
            report.copied_files, report.rendered_files, report.renamed_directories
        );

        Ok(report)
    }

    /// Copy everything except `.git` directories. Returns the number of files copied.
    fn copy_tree(&self, template_root: &Path, target_root: &Path) -> TreeResult<usize> {
        fs::create_dir_all(target_root).map_err(|e| TreeError::io(target_root, e))?;

        let mut copied = 0;
        let walker = WalkDir::new(template_root)
            .min_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| {
                let skip = is_vcs_dir(e);
                if skip {
                    debug!("Skipping version control directory {:?}", e.path());
                }
                !skip
            });

        for entry in walker {
            let entry = entry.map_err(|e| walk_error(e, template_root))?;
            let source = entry.path();
            let relative = match source.strip_prefix(template_root) {
                Ok(relative) => relative,
                Err(_) => continue,
            };
            let target = target_root.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir(&target).map_err(|e| TreeError::io(&target, e))?;
            } else {
                fs::copy(source, &target).map_err(|e| TreeError::io(source, e))?;
                copied += 1;
                debug!("Copied: {:?}", relative);
            }
        }

        Ok(copied)
    }

    fn process_manifest(
        &self,
        target_root: &Path,
        manifest: &ManifestTemplate,
    ) -> TreeResult<Option<PathBuf>> {
        let path = target_root.join(&manifest.file_name);
        if !path.is_file() {
            warn!("Template has no manifest file {:?}", manifest.file_name);
            return Ok(None);
        }
        if !manifest.file_name.ends_with(&self.marker) {
            debug!("Manifest {:?} carries no template marker", manifest.file_name);
            return Ok(None);
        }

        self.render_file(&path, &manifest.substitutions)
    }

    /// Render every marked file. Returns how many were rendered.
    fn render_files(&self, target_root: &Path, substitutions: &Substitutions) -> TreeResult<usize> {
        let mut files = Vec::new();
        for entry in WalkDir::new(target_root).min_depth(1) {
            let entry = entry.map_err(|e| walk_error(e, target_root))?;
            if entry.file_type().is_file() && self.is_marked(entry.path()) {
                files.push(entry.into_path());
            }
        }

        let mut rendered = 0;
        for path in files {
            if self.render_file(&path, substitutions)?.is_some() {
                rendered += 1;
            }
        }
        Ok(rendered)
    }

    /// Render one marked file's content and name. Returns its new path.
    fn render_file(&self, path: &Path, substitutions: &Substitutions) -> TreeResult<Option<PathBuf>> {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(None);
        };
        let stripped = &file_name[..file_name.len() - self.marker.len()];
        if stripped.is_empty() {
            warn!("Skipping template file with empty name: {:?}", path);
            return Ok(None);
        }

        let new_name = substitutions.render(stripped);
        if !is_plain_name(&new_name) {
            return Err(TreeError::UnsafeName {
                path: path.to_path_buf(),
                name: new_name,
            });
        }

        // Contents that are not UTF-8 are decoded lossily.
        let bytes = fs::read(path).map_err(|e| TreeError::io(path, e))?;
        let content = String::from_utf8_lossy(&bytes);
        fs::write(path, substitutions.render(&content)).map_err(|e| TreeError::io(path, e))?;

        let new_path = path.with_file_name(new_name);
        move_entry(path, &new_path)?;
        debug!("Rendered: {:?}", new_path);

        Ok(Some(new_path))
    }

    /// Rename directories holding placeholders, deepest first.
    fn rename_directories(
        &self,
        target_root: &Path,
        substitutions: &Substitutions,
    ) -> TreeResult<usize> {
        // Children are listed before their parent, so renaming a parent never
        // invalidates a path still waiting in the list.
        let mut dirs = Vec::new();
        for entry in WalkDir::new(target_root).min_depth(1).contents_first(true) {
            let entry = entry.map_err(|e| walk_error(e, target_root))?;
            if entry.file_type().is_dir() {
                dirs.push(entry.into_path());
            }
        }

        let mut renamed = 0;
        for dir in dirs {
            let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !substitutions.matches(name) {
                continue;
            }

            let new_name = substitutions.render(name);
            if new_name == name {
                continue;
            }
            if !is_plain_name(&new_name) {
                return Err(TreeError::UnsafeName {
                    path: dir.clone(),
                    name: new_name,
                });
            }
            let new_path = dir.with_file_name(new_name);
            move_entry(&dir, &new_path)?;
            debug!("Renamed directory: {:?} -> {:?}", dir, new_path);
            renamed += 1;
        }
        Ok(renamed)
    }

    fn is_marked(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(&self.marker))
            .unwrap_or(false)
    }
}

/// True if `name` is a single path component that stays in its parent directory.
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

fn is_vcs_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == VCS_DIR
}

/// Rename without clobbering an existing entry.
fn move_entry(from: &Path, to: &Path) -> TreeResult<()> {
    if from == to {
        return Ok(());
    }
    if to.exists() {
        return Err(TreeError::io(
            to,
            io::Error::new(io::ErrorKind::AlreadyExists, "destination already exists"),
        ));
    }
    fs::rename(from, to).map_err(|e| TreeError::io(from, e))
}

fn walk_error(err: walkdir::Error, fallback: &Path) -> TreeError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| fallback.to_path_buf());
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop detected"));
    TreeError::io(path, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::placeholders::PACKAGE;
    use tempfile::tempdir;

    #[test]
    fn test_missing_template() {
        let temp = tempdir().unwrap();
        let err = TreeMaterializer::new()
            .materialize(
                &temp.path().join("missing"),
                &temp.path().join("out"),
                &Substitutions::new(),
            )
            .unwrap_err();
        assert!(matches!(err, TreeError::TemplateMissing(_)));
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_unmarked_files_copied_verbatim() {
        let temp = tempdir().unwrap();
        let template = temp.path().join("template");
        fs::create_dir_all(&template).unwrap();
        fs::write(template.join("README.md"), "$PACKAGE").unwrap();

        let target = temp.path().join("out");
        let report = TreeMaterializer::new()
            .materialize(&template, &target, &Substitutions::new().with(PACKAGE, "widgets"))
            .unwrap();

        assert_eq!(report.copied_files, 1);
        assert_eq!(report.rendered_files, 0);
        assert_eq!(fs::read_to_string(target.join("README.md")).unwrap(), "$PACKAGE");
    }

    #[test]
    fn test_custom_marker() {
        let temp = tempdir().unwrap();
        let template = temp.path().join("template");
        fs::create_dir_all(&template).unwrap();
        fs::write(template.join("$PACKAGE.txt.tpl"), "name=$PACKAGE").unwrap();

        let target = temp.path().join("out");
        TreeMaterializer::new()
            .with_marker(".tpl")
            .materialize(&template, &target, &Substitutions::new().with(PACKAGE, "widgets"))
            .unwrap();

        assert_eq!(
            fs::read_to_string(target.join("widgets.txt")).unwrap(),
            "name=widgets"
        );
    }

    #[test]
    fn test_plain_names() {
        assert!(is_plain_name("AcmeWidgets.Runtime.asmdef"));
        assert!(is_plain_name("..hidden"));
        for name in ["", ".", "..", "a/b", "../escaped", "a\\b"] {
            assert!(!is_plain_name(name), "expected '{}' to be rejected", name);
        }
    }

    #[test]
    fn test_non_utf8_content_decoded_lossily() {
        let temp = tempdir().unwrap();
        let template = temp.path().join("template");
        fs::create_dir_all(&template).unwrap();
        fs::write(template.join("notes.txt.template"), b"$PACKAGE \xff\xfe end").unwrap();

        let target = temp.path().join("out");
        TreeMaterializer::new()
            .materialize(&template, &target, &Substitutions::new().with(PACKAGE, "widgets"))
            .unwrap();

        assert_eq!(
            fs::read_to_string(target.join("notes.txt")).unwrap(),
            "widgets \u{FFFD}\u{FFFD} end"
        );
    }

    #[test]
    fn test_separator_in_directory_name_rejected() {
        let temp = tempdir().unwrap();
        let template = temp.path().join("template");
        fs::create_dir_all(template.join("$PACKAGE")).unwrap();

        let target = temp.path().join("out");
        let err = TreeMaterializer::new()
            .materialize(&template, &target, &Substitutions::new().with(PACKAGE, "../up"))
            .unwrap_err();

        assert!(matches!(err, TreeError::UnsafeName { ref name, .. } if name == "../up"));
        assert!(target.join("$PACKAGE").is_dir());
        assert!(!temp.path().join("up").exists());
    }

    #[test]
    fn test_rename_collision_is_io_failure() {
        let temp = tempdir().unwrap();
        let template = temp.path().join("template");
        fs::create_dir_all(&template).unwrap();
        fs::write(template.join("widgets.txt"), "existing").unwrap();
        fs::write(template.join("$PACKAGE.txt.template"), "rendered").unwrap();

        let target = temp.path().join("out");
        let err = TreeMaterializer::new()
            .materialize(&template, &target, &Substitutions::new().with(PACKAGE, "widgets"))
            .unwrap_err();

        assert_eq!(err.path(), Some(target.join("widgets.txt").as_path()));
        assert_eq!(fs::read_to_string(target.join("widgets.txt")).unwrap(), "existing");
    }
}
