use crate::{cli::Context, error, info, server};

pub async fn serve() {
    let ctx = Context::from_env();

    info!(
        "Refresh relay listening on http://{}/refresh_token",
        ctx.config.server_address
    );
    if let Err(e) = server::start_relay_server(&ctx.config).await {
        error!("Refresh relay stopped: {}", e);
    }
}
