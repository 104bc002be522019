//! Package creation.
//!
//! [`PackageWizard::create`] validates the identity, checks the template and
//! target paths, materializes the template, asks the host to refresh its
//! package graph and, if requested, initializes a repository.
//!
//! Validation failures happen before anything is written. Once
//! materialization has started, a failure may leave a partially populated
//! package directory behind.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use pkgwiz_identity::PackageIdentity;
use pkgwiz_templates::{
    build_dependency_fragment, build_platform_version_fragment, placeholders, Substitutions,
    TreeMaterializer,
};

use crate::config::WizardConfig;
use crate::error::{CoreError, CoreResult};
use crate::git::{GitInitializer, RepositoryInitializer};
use crate::host::{host_for_command, PackageHost};
use crate::request::PackageRequest;

/// Creates packages inside one project.
pub struct PackageWizard {
    project_root: PathBuf,
    config: WizardConfig,
    host: Box<dyn PackageHost>,
    repository: Box<dyn RepositoryInitializer>,
}

impl PackageWizard {
    /// Wizard with the collaborators described by `config`.
    pub fn new(project_root: impl Into<PathBuf>, config: WizardConfig) -> Self {
        let host = host_for_command(&config.resolve_command);
        let repository = Box::new(GitInitializer::from_config(&config.git));
        Self {
            project_root: project_root.into(),
            config,
            host,
            repository,
        }
    }

    pub fn with_host(mut self, host: impl PackageHost + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    pub fn with_repository_initializer(
        mut self,
        repository: impl RepositoryInitializer + 'static,
    ) -> Self {
        self.repository = Box::new(repository);
        self
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn template_path(&self) -> PathBuf {
        self.config.template_path(&self.project_root)
    }

    /// Where the package for `identity` is created.
    pub fn target_path(&self, identity: &PackageIdentity) -> PathBuf {
        self.config
            .packages_path(&self.project_root)
            .join(identity.complete_name())
    }

    /// Build a validated identity from a request.
    pub fn identity(&self, request: &PackageRequest) -> CoreResult<PackageIdentity> {
        Ok(PackageIdentity::with_limit(
            &request.name,
            &request.organization,
            self.config.max_complete_name_length,
        )?)
    }

    /// Create a new package and return its directory.
    pub fn create(&self, request: &PackageRequest) -> CoreResult<PathBuf> {
        let identity = self.identity(request)?;
        request.check_path_values()?;

        let template_root = self.template_path();
        if !template_root.is_dir() {
            return Err(CoreError::TemplateNotFound(template_root));
        }
        let target_root = self.target_path(&identity);
        if target_root.exists() {
            return Err(CoreError::TargetExists(target_root));
        }

        info!("Creating package {} at {:?}", identity, target_root);

        let report = TreeMaterializer::new()
            .with_marker(self.config.template_marker.clone())
            .with_manifest(
                self.config.manifest_file.clone(),
                manifest_substitutions(&identity, request),
            )
            .materialize(&template_root, &target_root, &general_substitutions(&identity, request))?;

        self.host.resolve_packages();

        if request.init_repository {
            // Repository setup is best effort; the package exists either way.
            if let Err(e) = self.repository.initialize(&target_root) {
                warn!("Repository initialization failed for {}: {}", identity, e);
            }
        }

        info!(
            "Created package {} ({} files)",
            identity, report.copied_files
        );
        Ok(target_root)
    }
}

/// Substitutions for the manifest template, including the JSON fragments.
pub fn manifest_substitutions(identity: &PackageIdentity, request: &PackageRequest) -> Substitutions {
    Substitutions::new()
        .with(placeholders::PACKAGE, identity.name())
        .with(placeholders::ORGANIZATION, identity.organization())
        .with(placeholders::DISPLAY_NAME, request.display_name.as_str())
        .with(placeholders::DESCRIPTION, request.description.as_str())
        .with(
            placeholders::DEPENDENCIES,
            build_dependency_fragment(&request.dependencies),
        )
        .with(
            placeholders::UNITY_VERSION,
            build_platform_version_fragment(request.platform_version.as_ref()),
        )
}

/// Substitutions for every other template file and directory.
pub fn general_substitutions(identity: &PackageIdentity, request: &PackageRequest) -> Substitutions {
    Substitutions::new()
        .with(placeholders::PACKAGE, identity.name())
        .with(placeholders::ORGANIZATION, identity.organization())
        .with(placeholders::DISPLAY_NAME, request.display_name.as_str())
        .with(placeholders::ASSEMBLY, request.assembly_name())
}
