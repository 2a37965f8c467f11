use std::{io, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use num_bigint::BigInt;
use serde::Deserialize;
use thiserror::Error;
use tokio::{net::TcpListener, signal};
use tracing::info;

use crate::{app::Application, compute};

#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    app: Arc<Application>,
}

impl Server {
    pub async fn bind(addr: &str, app: Arc<Application>) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Server { listener, app })
    }

    /// Serves until an interrupt or termination signal arrives, then drains
    /// in-flight requests and returns. Flushing the caches is the caller's
    /// job once this resolves.
    pub async fn serve(self) -> io::Result<()> {
        info!("listening on {}", self.listener.local_addr()?);

        axum::serve(self.listener, router(self.app))
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

pub fn router(app: Arc<Application>) -> Router {
    Router::new()
        .route("/factorial", get(factorial))
        .route("/fibonacci", get(fibonacci))
        .route("/factorial-big", get(factorial_big))
        .route("/fibonacci-no-memo", get(fibonacci_no_memo))
        .route("/factorial-no-memo", get(factorial_no_memo))
        .with_state(app)
}

#[derive(Debug, Deserialize)]
pub struct NumberQuery {
    n: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("Parameter 'n' is missing")]
    Missing,
    #[error("Invalid parameter 'n'")]
    NotANumber,
    #[error("Invalid parameter 'n': factorial is not defined for negative numbers")]
    Negative,
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, format!("{}\n", self)).into_response()
    }
}

/// Shared validation for the fixed-width endpoints. An empty `n` is treated
/// the same as an absent one.
fn extract_num(query: &NumberQuery) -> Result<i64, QueryError> {
    let raw = query.n.as_deref().unwrap_or("");
    if raw.is_empty() {
        return Err(QueryError::Missing);
    }

    let num: i64 = raw.parse().map_err(|_| QueryError::NotANumber)?;
    if num < 0 {
        return Err(QueryError::Negative);
    }

    Ok(num)
}

async fn factorial(
    State(app): State<Arc<Application>>,
    Query(query): Query<NumberQuery>,
) -> Result<String, QueryError> {
    let num = extract_num(&query)?;
    Ok(format!("{}\n", compute::factorial(app.fact_cache(), num)))
}

async fn factorial_no_memo(
    State(_app): State<Arc<Application>>,
    Query(query): Query<NumberQuery>,
) -> Result<String, QueryError> {
    let num = extract_num(&query)?;
    Ok(format!("{}\n", compute::factorial_no_memo(num)))
}

async fn fibonacci(
    State(app): State<Arc<Application>>,
    Query(query): Query<NumberQuery>,
) -> Result<String, QueryError> {
    let num = extract_num(&query)?;
    Ok(format!("{}\n", compute::fibonacci(app.fib_cache(), num)))
}

async fn fibonacci_no_memo(
    State(_app): State<Arc<Application>>,
    Query(query): Query<NumberQuery>,
) -> Result<String, QueryError> {
    let num = extract_num(&query)?;
    Ok(format!("{}\n", compute::fibonacci_no_memo(num)))
}

/// Negative and empty input coerce to 0, and unparseable input degrades to
/// 0 as well. The body is the bare decimal string without a newline.
async fn factorial_big(
    State(app): State<Arc<Application>>,
    Query(query): Query<NumberQuery>,
) -> String {
    let raw = query.n.as_deref().unwrap_or("");
    let raw = if raw.is_empty() || raw.starts_with('-') {
        "0"
    } else {
        raw
    };

    let n = raw.parse::<BigInt>().unwrap_or_default();
    compute::factorial_big(app.big_fact_cache(), &n).to_string()
}

/// Resolves on SIGINT or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("received Ctrl+C");
        },
        _ = terminate => {
            info!("received SIGTERM");
        },
    }
}
