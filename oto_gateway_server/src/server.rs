use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, web, App, HttpServer};
use log::warn;
use oto_auth_engine::TransactionAuthApi;

use crate::{
    config::{MemberCredentials, ServerConfig, ServerOptions},
    errors::ServerError,
    middleware::RequestContextFactory,
    routes::{health, ping, query_config, TrxRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let srv = create_server_instance(config)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig) -> Result<Server, ServerError> {
    if !config.member.is_available() {
        warn!("🚨️ Starting without member credentials. Transaction requests will fail until they are configured.");
    }
    let options = ServerOptions::from_config(&config);
    let member = config.member.clone();
    let srv = HttpServer::new(move || {
        let auth_api = TransactionAuthApi::new(member.clone());
        App::new()
            .wrap(RequestContextFactory)
            .app_data(web::Data::new(auth_api))
            .app_data(web::Data::new(options))
            .app_data(query_config())
            .service(health)
            .service(ping)
            .service(TrxRoute::<MemberCredentials>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
