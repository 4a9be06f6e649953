mod config;

use std::pin::pin;
use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::signal::unix::{SignalKind, signal};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracker_collection::{RunHttp, Runs};
use tracker_store::MemoryStore;

use crate::config::Config;

type Handler = RunHttp<MemoryStore>;

async fn handle(
    req: Request<Incoming>,
    handler: Arc<Handler>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let (parts, body) = req.into_parts();
    let body_bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes().to_vec(),
        Err(e) => {
            warn!(error = %e, "failed to read request body");
            let mut resp = Response::new(Full::new(Bytes::from_static(
                br#"{"error":"failed to read request body"}"#,
            )));
            *resp.status_mut() = StatusCode::BAD_REQUEST;
            return Ok(resp);
        }
    };
    let http_req = Request::from_parts(parts, body_bytes);
    let http_resp = handler.handle(http_req);
    let (parts, body_bytes) = http_resp.into_parts();
    Ok(Response::from_parts(
        parts,
        Full::new(Bytes::from(body_bytes)),
    ))
}

async fn shutdown_signal() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "failed to register SIGTERM handler");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };
    tokio::select! {
        _ = sigterm.recv() => {}
        _ = tokio::signal::ctrl_c() => {}
    }
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env().unwrap_or_else(|e| {
        error!("{e}");
        std::process::exit(1);
    });

    let handler = Arc::new(RunHttp::new(Runs::new(MemoryStore::new())));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .unwrap_or_else(|e| {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            std::process::exit(1);
        });

    info!(addr = %config.bind_addr, "tracker-http listening");

    let http = http1::Builder::new();
    let graceful = GracefulShutdown::new();
    let mut signal = pin!(shutdown_signal());

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "accept failed");
                        continue;
                    }
                };
                let io = TokioIo::new(stream);
                let handler = Arc::clone(&handler);
                let conn = http.serve_connection(io, service_fn(move |req| {
                    let handler = Arc::clone(&handler);
                    handle(req, handler)
                }));
                let fut = graceful.watch(conn);
                tokio::spawn(async move {
                    if let Err(e) = fut.await {
                        warn!(%peer, error = %e, "connection error");
                    }
                });
            }
            _ = &mut signal => {
                info!("shutdown signal received");
                drop(listener);
                break;
            }
        }
    }

    tokio::select! {
        _ = graceful.shutdown() => {
            info!("shutdown complete");
        }
        _ = tokio::time::sleep(config.shutdown_timeout) => {
            warn!(timeout = ?config.shutdown_timeout, "shutdown timed out");
        }
    }
}
