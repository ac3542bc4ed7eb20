use std::sync::Arc;

use anyhow::Result;
use budgetview::dashboard::Dashboard;
use budgetview::logging::{self, obj, v_num, v_str, Domain, Level};
use budgetview::state::Config;
use chrono::Utc;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    logging::log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("config_hash", v_str(&cfg.config_hash())),
            ("data_url", v_str(&cfg.data_url)),
            ("out_path", v_str(&cfg.out_path)),
            ("refresh_secs", v_num(cfg.refresh_secs as f64)),
        ]),
    );

    let dashboard = Arc::new(Dashboard::new(cfg)?);

    // First cycle runs inline so the page exists before the loop takes
    // over. A failed first fetch still writes placeholders plus banner.
    let _ = dashboard.refresh().await;
    dashboard.write_page(Utc::now())?;

    dashboard.spawn_refresh_loop().join().await;
    Ok(())
}
