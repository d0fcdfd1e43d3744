use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::context::Context;
use crate::middleware::Handler;

/// Serves files below a directory for a catch-all route.
///
/// Mounted by [`RouterGroup::static_files`](crate::RouterGroup::static_files)
/// as `GET <prefix>/*filepath`; the captured `filepath` is resolved against
/// the base directory.
#[derive(Clone)]
pub struct StaticFiles {
    base_dir: PathBuf,
}

impl StaticFiles {
    pub fn new<P: Into<PathBuf>>(base: P) -> Self {
        Self {
            base_dir: base.into(),
        }
    }

    /// Map a URL path onto the base directory, rejecting anything that would
    /// climb out of it.
    fn map_path(&self, url_path: &str) -> Option<PathBuf> {
        let mut pb = self.base_dir.clone();
        for comp in Path::new(url_path.trim_start_matches('/')).components() {
            match comp {
                Component::Normal(s) => pb.push(s),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(pb)
    }

    fn content_type(path: &Path) -> &'static str {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase()
            .as_str()
        {
            "html" => "text/html",
            "css" => "text/css",
            "js" => "application/javascript",
            "json" => "application/json",
            "txt" => "text/plain",
            "png" => "image/png",
            "svg" => "image/svg+xml",
            _ => "application/octet-stream",
        }
    }

    /// Read the file at `url_path` along with its content type.
    ///
    /// # Errors
    ///
    /// `NotFound` for traversal attempts, missing files and directories.
    pub fn load(&self, url_path: &str) -> io::Result<(Vec<u8>, &'static str)> {
        let path = self
            .map_path(url_path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "invalid path"))?;
        if !path.is_file() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        }
        let bytes = fs::read(&path)?;
        Ok((bytes, Self::content_type(&path)))
    }
}

impl Handler for StaticFiles {
    fn handle(&self, c: &mut Context) {
        match self.load(c.param("filepath")) {
            Ok((bytes, content_type)) => {
                c.set_header("Content-Type", content_type);
                c.data(200, &bytes);
            }
            Err(e) => {
                debug!(path = %c.path(), error = %e, "Static file not served");
                c.status(404);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_path_prevents_traversal() {
        let sf = StaticFiles::new("static");
        assert!(sf.map_path("../Cargo.toml").is_none());
        assert!(sf.map_path("css/../../Cargo.toml").is_none());
        assert_eq!(
            sf.map_path("css/./a.css"),
            Some(PathBuf::from("static/css/a.css"))
        );
    }

    #[test]
    fn test_load_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hello.txt"), "Hello\n").unwrap();
        let sf = StaticFiles::new(dir.path());
        let (bytes, ct) = sf.load("hello.txt").unwrap();
        assert_eq!(ct, "text/plain");
        assert_eq!(String::from_utf8(bytes).unwrap(), "Hello\n");
    }

    #[test]
    fn test_load_missing_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("css")).unwrap();
        let sf = StaticFiles::new(dir.path());
        assert!(sf.load("nope.txt").is_err());
        assert!(sf.load("css").is_err());
    }

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(StaticFiles::content_type(Path::new("a.CSS")), "text/css");
        assert_eq!(
            StaticFiles::content_type(Path::new("a.bin")),
            "application/octet-stream"
        );
    }
}
