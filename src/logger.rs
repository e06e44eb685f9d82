// Logging module
// Tagged stdout/stderr logging for the server, proxy and static subsystems.
// No failure reported here is fatal to the process.

use crate::config::Config;
use chrono::Local;
use hyper::{Method, Uri, Version};
use std::net::SocketAddr;
use std::time::Duration;

/// Longest URL prefix echoed into the log
const URL_LOG_CHARS: usize = 100;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Proxy-and-static server started");
    println!("Listening on: http://{addr}");
    println!("Log level: {}", config.logging.level);
    println!("Static root: {}", config.static_files.root);
    println!(
        "Proxy prefix: {} (timeout {}ms, {:?} transfer)",
        config.proxy.prefix, config.proxy.timeout_ms, config.proxy.transfer
    );
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!(
        "[{}] [Request] {method} {uri} {version:?}",
        Local::now().format("%d/%b/%Y:%H:%M:%S %z")
    );
}

pub fn log_headers_count(count: usize) {
    println!("[Headers] Count: {count}");
}

pub fn log_response(status: u16) {
    println!("[Response] {status}\n");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_proxy_fetch(url: &str) {
    let preview: String = url.chars().take(URL_LOG_CHARS).collect();
    println!("[PROXY] Fetching: {preview}...");
}

pub fn log_proxy_upstream(status: u16, content_type: &str) {
    println!("[PROXY] Status: {status}, Type: {content_type}");
}

pub fn log_proxy_progress(chunks: usize, bytes: usize) {
    println!("[PROXY] Received {chunks} chunks ({bytes} bytes)");
}

pub fn log_proxy_video_complete(bytes: usize, elapsed: Duration) {
    println!(
        "[PROXY] Video complete: {bytes} bytes in {}ms",
        elapsed.as_millis()
    );
}

pub fn log_proxy_json_complete(elapsed: Duration) {
    println!("[PROXY] JSON parsed successfully in {}ms", elapsed.as_millis());
}

pub fn log_proxy_parse_failure(elapsed: Duration) {
    println!("[PROXY] JSON parse error after {}ms", elapsed.as_millis());
}

pub fn log_proxy_failed(message: &str) {
    eprintln!("[PROXY] Request failed: {message}");
}

pub fn log_static_rejected(path: &str) {
    log_warning(&format!("[STATIC] Path traversal attempt blocked: {path}"));
}
