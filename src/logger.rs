use crate::config::Config;
use chrono::Local;
use hyper::{Method, Uri, Version};
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("Running ImpactJS Server");
    println!("Game:\thttp://{}:{}", config.server.host, addr.port());
    println!("Editor:\thttp://{}:{}/editor", config.server.host, addr.port());
    if config.logging.access_log {
        println!("Access logging enabled");
    }
    println!();
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!(
        "[{}] {} {} {:?}",
        Local::now().format("%d/%b/%Y:%H:%M:%S"),
        method,
        uri,
        version
    );
}

pub fn log_response(status: u16, size: usize) {
    println!("[Response] {status} ({size} bytes)");
}

pub fn log_warning(message: &str) {
    println!("[WARN] {message}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}
