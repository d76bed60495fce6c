//! Static file serving module
//!
//! Filesystem path resolution with traversal protection, file loading, and
//! response building.

use std::path::{Component, Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;

/// Outcome of mapping a URL path onto the document root
#[derive(Debug, PartialEq, Eq)]
pub enum PathResolution {
    /// An existing regular file inside the root
    File(PathBuf),
    /// Nothing on disk for this path
    Missing,
    /// The path tried to escape the document root
    Denied,
}

/// Map a URL path to a file under `root`.
///
/// `root` must be canonical. The path is percent-decoded first, so encoded
/// dot segments cannot smuggle a `..` past the check, then rejected
/// lexically if any component could leave the root. The surviving candidate
/// is canonicalized and must still have the root as prefix, so a symlink
/// inside the root cannot point outside it either.
pub fn resolve_file(root: &Path, url_path: &str) -> PathResolution {
    let trimmed = url_path.trim_start_matches('/');
    let decoded = match urlencoding::decode(trimmed) {
        Ok(d) => d.into_owned(),
        // Undecodable sequences cannot name a file; fall through as-is
        Err(_) => trimmed.to_string(),
    };

    let escapes_root = Path::new(&decoded).components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes_root {
        return PathResolution::Denied;
    }

    let candidate = root.join(&decoded);
    if !candidate.is_file() {
        return PathResolution::Missing;
    }

    match candidate.canonicalize() {
        Ok(real) if real.starts_with(root) => PathResolution::File(candidate),
        Ok(_) => PathResolution::Denied,
        // Vanished between the is_file check and canonicalization
        Err(_) => PathResolution::Missing,
    }
}

/// Read a file and build the response for it.
///
/// The file was stat'd during resolution, but the read can still fail;
/// errors map to the narrowest status that fits.
pub async fn serve_file(ctx: &RequestContext<'_>, path: &Path) -> Response<Full<Bytes>> {
    match fs::read(path).await {
        Ok(content) => {
            let content_type = mime::get_content_type(path.extension().and_then(|e| e.to_str()));
            http::build_file_response(Bytes::from(content), content_type, ctx.is_head)
        }
        Err(e) => match e.kind() {
            std::io::ErrorKind::NotFound => http::build_404_response(),
            std::io::ErrorKind::PermissionDenied => {
                logger::log_warning(&format!("Permission denied: {}", path.display()));
                http::build_403_response()
            }
            _ => {
                logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
                http::build_500_response()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("index.html"), "shell").expect("write");
        std::fs::create_dir(dir.path().join("assets")).expect("mkdir");
        std::fs::write(dir.path().join("assets/app.js"), "js").expect("write");
        dir
    }

    fn canonical_root(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().canonicalize().expect("canonicalize")
    }

    #[test]
    fn test_resolve_existing_file() {
        let dir = fixture();
        let root = canonical_root(&dir);

        match resolve_file(&root, "/assets/app.js") {
            PathResolution::File(p) => assert!(p.ends_with("assets/app.js")),
            other => panic!("expected File, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_missing_path() {
        let dir = fixture();
        let root = canonical_root(&dir);

        assert_eq!(resolve_file(&root, "/about"), PathResolution::Missing);
        assert_eq!(resolve_file(&root, "/assets/gone.js"), PathResolution::Missing);
    }

    #[test]
    fn test_directories_are_not_files() {
        let dir = fixture();
        let root = canonical_root(&dir);

        // "/" and directory paths take the fallback, never a listing
        assert_eq!(resolve_file(&root, "/"), PathResolution::Missing);
        assert_eq!(resolve_file(&root, "/assets"), PathResolution::Missing);
        assert_eq!(resolve_file(&root, "/assets/"), PathResolution::Missing);
    }

    #[test]
    fn test_parent_dir_denied() {
        let dir = fixture();
        let root = canonical_root(&dir);

        assert_eq!(
            resolve_file(&root, "/../secret.txt"),
            PathResolution::Denied
        );
        assert_eq!(
            resolve_file(&root, "/assets/../../secret.txt"),
            PathResolution::Denied
        );
    }

    #[test]
    fn test_encoded_traversal_denied() {
        let dir = fixture();
        let root = canonical_root(&dir);

        assert_eq!(
            resolve_file(&root, "/%2e%2e/secret.txt"),
            PathResolution::Denied
        );
        assert_eq!(
            resolve_file(&root, "/%2e%2e%2f%2e%2e/etc/passwd"),
            PathResolution::Denied
        );
    }

    #[test]
    fn test_encoded_absolute_path_denied() {
        let dir = fixture();
        let root = canonical_root(&dir);

        assert_eq!(
            resolve_file(&root, "/%2Fetc%2Fhostname"),
            PathResolution::Denied
        );
    }

    #[test]
    fn test_percent_decoded_filename_resolves() {
        let dir = fixture();
        std::fs::write(dir.path().join("my file.txt"), "spaced").expect("write");
        let root = canonical_root(&dir);

        match resolve_file(&root, "/my%20file.txt") {
            PathResolution::File(p) => assert!(p.ends_with("my file.txt")),
            other => panic!("expected File, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_denied() {
        let outer = tempfile::tempdir().expect("tempdir");
        let root_dir = outer.path().join("webroot");
        std::fs::create_dir(&root_dir).expect("mkdir");
        std::fs::write(outer.path().join("secret.txt"), "secret").expect("write");
        std::os::unix::fs::symlink(
            outer.path().join("secret.txt"),
            root_dir.join("leak.txt"),
        )
        .expect("symlink");
        let root = root_dir.canonicalize().expect("canonicalize");

        assert_eq!(resolve_file(&root, "/leak.txt"), PathResolution::Denied);
    }

    #[tokio::test]
    async fn test_serve_file_content_type() {
        let dir = fixture();
        let root = canonical_root(&dir);
        let ctx = RequestContext {
            path: "/index.html",
            is_head: false,
        };

        let resp = serve_file(&ctx, &root.join("index.html")).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").expect("content type"),
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_serve_missing_file_is_404() {
        let dir = fixture();
        let root = canonical_root(&dir);
        let ctx = RequestContext {
            path: "/gone",
            is_head: false,
        };

        let resp = serve_file(&ctx, &root.join("gone")).await;
        assert_eq!(resp.status(), 404);
    }
}
