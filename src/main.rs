use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use socket2::{Domain, Protocol, Socket, Type};
use std::sync::Arc;
use tokio::net::TcpListener;

mod config;
mod handler;
mod http;
mod logger;
mod sanitize;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;

    // One request-handling context; file I/O blocks it, which is fine for a
    // single local user
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &cfg);

    let config = Arc::new(cfg);
    let local = tokio::task::LocalSet::new();
    local.run_until(serve(listener, config)).await
}

async fn serve(
    listener: TcpListener,
    config: Arc<config::Config>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, _peer_addr)) => {
                let io = TokioIo::new(stream);
                let config = Arc::clone(&config);
                // Connections run on the same thread; keep-alive sockets must
                // not hold up the accept loop
                tokio::task::spawn_local(async move {
                    let service = service_fn(move |req| {
                        handler::router::handle_request(req, Arc::clone(&config))
                    });
                    if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                        logger::log_connection_error(&e);
                    }
                });
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}

/// Create a `TcpListener` with `SO_REUSEADDR` enabled, so restarting the dev
/// server does not trip over a port stuck in `TIME_WAIT`.
fn create_reusable_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
