//! Static file serving module
//!
//! Maps request paths onto the configured base directory and serves file
//! bytes with an inferred content type. No directory listings, no range
//! requests, no conditional GET.

use crate::config::StaticConfig;
use crate::http::body::BoxedBody;
use crate::http::{mime, response};
use crate::logger;
use hyper::Response;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

pub async fn serve(cfg: &StaticConfig, request_path: &str) -> Response<BoxedBody> {
    let relative = if request_path == "/" {
        cfg.index_file.as_str()
    } else {
        request_path.trim_start_matches('/')
    };

    // Lexical guard: resolve `.` and `..` without touching the filesystem
    let Some(file_path) = resolve_within(Path::new(&cfg.root), relative) else {
        logger::log_static_rejected(request_path);
        return response::build_403_response();
    };

    // Symlink guard: canonical paths must also stay under the base
    // directory. A file that does not exist yet falls through to the read,
    // which reports 404.
    if let (Ok(root), Ok(resolved)) = (
        Path::new(&cfg.root).canonicalize(),
        file_path.canonicalize(),
    ) {
        if !resolved.starts_with(&root) {
            logger::log_static_rejected(request_path);
            return response::build_403_response();
        }
    }

    match fs::read(&file_path).await {
        Ok(content) => {
            let extension = file_path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_lowercase);
            let content_type = mime::from_extension(extension.as_deref());
            response::build_file_response(content, content_type)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => response::build_404_response(),
        Err(err) => {
            logger::log_error(&format!(
                "Failed to read '{}': {err}",
                file_path.display()
            ));
            response::build_500_response()
        }
    }
}

/// Join `relative` onto `root`, resolving `.` and `..` lexically
///
/// Returns None when the resolved path would escape the root. Absolute
/// components can never stay under the root and are rejected outright.
fn resolve_within(root: &Path, relative: &str) -> Option<PathBuf> {
    let mut resolved = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !resolved.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(root.join(resolved))
}
