use actix_web::{
    http::{header::HeaderMap, StatusCode},
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use log::debug;
use oto_auth_engine::{CredentialProvider, TransactionAuthApi};

use crate::{
    config::ServerOptions,
    middleware::RequestContextFactory,
    routes::{health, ping, query_config, TrxRoute},
};

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Registers the same app data and routes as the real server, backed by `provider`.
pub fn configure_app<B>(provider: B, options: ServerOptions) -> impl FnOnce(&mut ServiceConfig)
where B: CredentialProvider + 'static {
    move |cfg| {
        cfg.app_data(web::Data::new(TransactionAuthApi::new(provider)))
            .app_data(web::Data::new(options))
            .app_data(query_config())
            .service(health)
            .service(ping)
            .service(TrxRoute::<B>::new());
    }
}

pub async fn get_request<F>(req: TestRequest, configure: F) -> TestResponse
where F: FnOnce(&mut ServiceConfig) {
    let app = App::new().wrap(RequestContextFactory).configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let headers = res.headers().clone();
    let body = String::from_utf8_lossy(&test::read_body(res).await).into_owned();
    TestResponse { status, headers, body }
}
