//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_cluster(fixtures::CLUSTER_VSPHERE);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::fixtures;
    #[allow(unused_imports)]
    pub use super::TestFixture;
}

/// Fixture files under `tests/testdata`.
#[allow(dead_code)]
pub mod fixtures {
    pub const CLUSTER_VSPHERE: &str = include_str!("../testdata/cluster-vsphere.yaml");
    pub const TERRAFORM_VSPHERE: &str = include_str!("../testdata/terraform-vsphere.json");
    pub const CLUSTER_AWS: &str = include_str!("../testdata/cluster-aws.yaml");
    pub const TERRAFORM_AWS: &str = include_str!("../testdata/terraform-aws.json");
    pub const TERRAFORM_BAD_PORT: &str = include_str!("../testdata/terraform-bad-port.json");

    /// Cluster spec with no workers and no provider.
    pub const CLUSTER_MINIMAL: &str = "name: minimal\n";

    /// Output that parses but holds no control plane.
    pub const TERRAFORM_NO_HOSTS: &str = r#"{"kubeone_hosts": {"value": {"control_plane": []}}}"#;
}

/// A temporary directory holding a cluster spec and provisioning output.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `cluster.yaml` with the given content.
    pub fn with_cluster(self, content: &str) -> Self {
        self.with_file("cluster.yaml", content)
    }

    /// Write `tf.json` with the given content.
    pub fn with_terraform(self, content: &str) -> Self {
        self.with_file("tf.json", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn cluster_path(&self) -> PathBuf {
        self.path().join("cluster.yaml")
    }

    pub fn terraform_path(&self) -> PathBuf {
        self.path().join("tf.json")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command running in this fixture's directory.
    ///
    /// Inherited `TF_RECONCILE_*` variables are cleared so the host
    /// environment cannot leak into argument defaults.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("tf-reconcile");
        cmd.current_dir(self.path())
            .env_remove("TF_RECONCILE_CONFIG")
            .env_remove("TF_RECONCILE_TERRAFORM")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_writes_files() {
        let fixture = TestFixture::new()
            .with_cluster(fixtures::CLUSTER_MINIMAL)
            .with_terraform(fixtures::TERRAFORM_NO_HOSTS);
        assert!(fixture.cluster_path().exists());
        assert!(fixture.terraform_path().exists());
    }

    #[test]
    fn test_fixtures_are_well_formed() {
        for yaml in [fixtures::CLUSTER_VSPHERE, fixtures::CLUSTER_AWS] {
            serde_yaml::from_str::<serde_yaml::Value>(yaml).expect("fixture should be valid YAML");
        }
        for json in [
            fixtures::TERRAFORM_VSPHERE,
            fixtures::TERRAFORM_AWS,
            fixtures::TERRAFORM_BAD_PORT,
            fixtures::TERRAFORM_NO_HOSTS,
        ] {
            serde_json::from_str::<serde_json::Value>(json).expect("fixture should be valid JSON");
        }
    }
}
