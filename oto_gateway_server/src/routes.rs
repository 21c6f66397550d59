//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Transaction authentication is pure CPU work on a handful of short
//! strings, so it runs inline. Anything that does I/O must be expressed as a future.
use actix_web::{error::QueryPayloadError, get, web, HttpRequest, HttpResponse, Responder};
use log::*;
use oto_auth_engine::{AuthFailure, CredentialProvider, TransactionAuthApi, TransactionAuthRequest};

use crate::{
    config::ServerOptions,
    data_objects::PingResponse,
    errors::ServerError,
    helpers::{caller_address, trace_id},
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

/// Turns query string parse failures (unknown or missing fields, bad encoding) into `400 InvalidQuery`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req| {
        debug!("💻️ Rejecting malformed query. {err}");
        ServerError::InvalidQuery(err.to_string()).into()
    })
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

#[get("/ping")]
pub async fn ping() -> impl Responder {
    trace!("💻️ Received ping");
    HttpResponse::Ok().json(PingResponse::pong())
}

//----------------------------------------------   Transactions  ----------------------------------------------------
route!(trx => Get "/trx" impl CredentialProvider);
/// Route handler for the transaction endpoint
///
/// OtomaX members call this endpoint to authenticate a transaction. The query string carries `trxid`, `memberid`,
/// `dest` and `product`, plus a proof of identity: `pin` and `password`, or `sign`, or all three. Any other field is
/// rejected. Leading and trailing whitespace is stripped from every value.
///
/// On success, the response is `{"status": "success", "trxid": .., "memberid": .., "sign": ..}`.
/// On failure, the response carries the status of the failure and `{"success": false, "rc": .., "message": ..}`.
pub async fn trx<B: CredentialProvider>(
    req: HttpRequest,
    query: web::Query<TransactionAuthRequest>,
    api: web::Data<TransactionAuthApi<B>>,
    options: web::Data<ServerOptions>,
) -> Result<HttpResponse, ServerError> {
    let trace_id = trace_id(&req);
    let request = query.into_inner().normalized();
    trace!("💻️ [{trace_id}] Transaction request: {request:?}");
    if !request.has_proof() {
        debug!("💻️ [{trace_id}] Transaction {} carries no pin/password or signature", request.trxid);
        return Err(AuthFailure::MissingProof.into());
    }
    let caller = caller_address(&req, options.get_ref());
    let success = api.authenticate_transaction(&request, &caller).map_err(|e| {
        match e.failure() {
            Some(f) => info!("💻️ [{trace_id}] Transaction {} from {caller} was rejected. {}", request.trxid, f.rc()),
            None => warn!("💻️ [{trace_id}] Could not authenticate transaction {}. {e}", request.trxid),
        }
        ServerError::from(e)
    })?;
    info!("💻️ [{trace_id}] Transaction {} for {} authenticated", success.trxid, success.memberid);
    Ok(HttpResponse::Ok().json(success))
}
