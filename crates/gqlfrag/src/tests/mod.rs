mod logging_tests;

use std::path::Path;
use std::path::PathBuf;

/// A scratch directory unique to one test, removed on drop.
struct ScratchDir(PathBuf);
impl ScratchDir {
    fn new(test_name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "gqlfrag-cli-{test_name}-{}",
            std::process::id(),
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(path.join("nested")).unwrap();
        Self(path)
    }

    fn write(&self, relative_path: &str, content: &str) -> PathBuf {
        let path = self.0.join(relative_path);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn path(&self) -> &Path {
        self.0.as_path()
    }
}
impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}
