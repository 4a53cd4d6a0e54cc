use std::fs;
use std::path::Path;

/// A throwaway working-tree repository for scanner tests.
pub struct TestRepo {
    // Held for its Drop; the path comes from the repository's workdir.
    #[allow(dead_code)]
    dir: tempfile::TempDir,
    pub repo: git2::Repository,
}

pub fn init_repo() -> TestRepo {
    let dir = tempfile::tempdir().unwrap();
    let repo = git2::Repository::init(dir.path()).unwrap();
    TestRepo { dir, repo }
}

/// A well-formed LFS pointer blob.
pub fn pointer_blob() -> Vec<u8> {
    b"version https://git-lfs.github.com/spec/v1\n\
      oid sha256:98ea6e4f216f2fb4b69fff9b3a44842c38686ca685f3f55dc48c5d3fb1107be4\n\
      size 87654\n"
        .to_vec()
}

/// Bytes that look like a real PNG, not a pointer.
pub fn binary_blob() -> Vec<u8> {
    let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
    data.extend_from_slice(&[0u8; 64]);
    data
}

impl TestRepo {
    pub fn workdir(&self) -> &Path {
        self.repo.workdir().unwrap()
    }

    /// Write a file under the working tree, creating parent directories.
    pub fn write(&self, rel: &str, data: &[u8]) {
        let path = self.workdir().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, data).unwrap();
    }

    /// Stage everything and commit to HEAD, returning the commit id.
    pub fn commit(&self, message: &str) -> git2::Oid {
        let mut index = self.repo.index().unwrap();
        index
            .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();

        let sig = git2::Signature::now("lfs-warden tests", "tests@localhost").unwrap();
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }
}
