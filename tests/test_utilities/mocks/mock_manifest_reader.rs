use async_trait::async_trait;
use depscope::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Mock ManifestReader serving manifests from memory and counting reads
#[derive(Default, Clone)]
pub struct MockManifestReader {
    project: Option<Manifest>,
    packages: HashMap<String, Manifest>,
    failing: Vec<String>,
    pub reads: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockManifestReader {
    pub fn new(project: Manifest) -> Self {
        Self {
            project: Some(project),
            ..Default::default()
        }
    }

    pub fn with_package(mut self, manifest: Manifest) -> Self {
        self.packages.insert(manifest.name.clone(), manifest);
        self
    }

    pub fn with_failing_package(mut self, name: &str) -> Self {
        self.failing.push(name.to_string());
        self
    }

    pub fn read_count(&self, name: &str) -> usize {
        self.reads.lock().unwrap().get(name).copied().unwrap_or(0)
    }
}

#[async_trait]
impl ManifestReader for MockManifestReader {
    async fn read_project_manifest(&self, project_dir: &Path) -> Result<Manifest> {
        *self
            .reads
            .lock()
            .unwrap()
            .entry("<project>".to_string())
            .or_default() += 1;
        self.project.clone().ok_or_else(|| {
            AnalysisError::ManifestNotFound {
                path: project_dir.to_path_buf(),
            }
            .into()
        })
    }

    async fn read_package_manifest(&self, name: &PackageName) -> Result<Option<Manifest>> {
        *self
            .reads
            .lock()
            .unwrap()
            .entry(name.as_str().to_string())
            .or_default() += 1;
        if self.failing.iter().any(|f| f == name.as_str()) {
            anyhow::bail!("Mock manifest parse failure for {}", name.as_str());
        }
        Ok(self.packages.get(name.as_str()).cloned())
    }
}
