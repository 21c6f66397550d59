//! Request context middleware for Actix Web.
//!
//! Every request passing through this middleware is given a trace id. A caller-supplied `x-trace-id` header is
//! reused if it is 8 to 64 ASCII alphanumeric characters; otherwise a fresh random id is generated. The id is stored
//! in the request extensions (see [`TraceId`]) so that handlers can tag their log lines with it.
//!
//! On the way out, the middleware adds two headers to the response:
//! * `x-trace-id`: the trace id,
//! * `x-process-time`: the time spent handling the request, e.g. `1.27ms`,
//!
//! and writes one access log line under the `oto::access_log` target.

use std::{
    future::{ready, Ready},
    rc::Rc,
    time::Instant,
};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue, USER_AGENT},
    web,
    Error,
    HttpMessage,
};
use futures::future::LocalBoxFuture;
use log::{info, warn};

use crate::{config::ServerOptions, helpers::caller_address};

pub const TRACE_ID_HEADER: &str = "x-trace-id";
pub const PROCESS_TIME_HEADER: &str = "x-process-time";
const ACCESS_LOG_TARGET: &str = "oto::access_log";

/// The trace id of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId(pub String);

pub fn is_valid_trace_id(s: &str) -> bool {
    (8..=64).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric())
}

/// 32 random hex characters.
pub fn new_trace_id() -> String {
    let bytes: [u8; 16] = rand::random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// The caller address for the access log, resolved with the same [`ServerOptions`] that the IP check uses. Proxy
/// headers are ignored unless the app has been configured to trust them.
pub fn client_address(req: &ServiceRequest) -> String {
    let options = req.app_data::<web::Data<ServerOptions>>().map(|o| *o.get_ref()).unwrap_or_default();
    caller_address(req.request(), &options)
}

pub struct RequestContextFactory;

impl<S, B> Transform<S, ServiceRequest> for RequestContextFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = RequestContextService<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestContextService { service: Rc::new(service) }))
    }
}

pub struct RequestContextService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestContextService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;
    type Response = ServiceResponse<B>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let start = Instant::now();
            let trace_id = req
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|s| is_valid_trace_id(s))
                .map(String::from)
                .unwrap_or_else(new_trace_id);
            req.extensions_mut().insert(TraceId(trace_id.clone()));
            let method = req.method().to_string();
            let path = req.path().to_string();
            let client = client_address(&req);
            let user_agent =
                req.headers().get(USER_AGENT).and_then(|v| v.to_str().ok()).unwrap_or("unknown").to_string();

            let result = service.call(req).await;
            let elapsed = format!("{:.2}ms", start.elapsed().as_secs_f64() * 1000.0);
            match result {
                Ok(mut res) => {
                    let headers = res.headers_mut();
                    if let Ok(v) = HeaderValue::from_str(&trace_id) {
                        headers.insert(HeaderName::from_static(TRACE_ID_HEADER), v);
                    }
                    if let Ok(v) = HeaderValue::from_str(&elapsed) {
                        headers.insert(HeaderName::from_static(PROCESS_TIME_HEADER), v);
                    }
                    info!(
                        target: ACCESS_LOG_TARGET,
                        "{method} {path} {} {elapsed} trace_id={trace_id} client={client} user_agent=\"{user_agent}\"",
                        res.status().as_u16()
                    );
                    Ok(res)
                },
                Err(e) => {
                    warn!(
                        target: ACCESS_LOG_TARGET,
                        "{method} {path} failed after {elapsed}. {e} trace_id={trace_id} client={client}"
                    );
                    Err(e)
                },
            }
        })
    }
}
