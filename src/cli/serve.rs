use crate::{config::Settings, error, info, server};

pub async fn serve(address: Option<String>) {
    let mut settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => error!("Cannot read configuration. Err: {}", e),
    };

    if let Some(addr) = address {
        settings.server_address = addr;
    }

    info!(
        "Recommending from genre {} ({}) when no one is signed in",
        settings.recommend.genre_id, settings.recommend.region
    );

    if let Err(e) = server::start_api_server(settings).await {
        error!("Server failed. Err: {}", e);
    }
}
