use std::error::Error;
use wol_topology::config::Config;
use wol_topology::output::print_report;
use wol_topology::run;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default())
        .map_err(|e| format!("Error initializing log4rs: {e}"))?;
    dotenv::dotenv().ok();
    //
    log::info!("#Start main()");

    let config = Config::from_env()?;
    let report = run(&config).await;
    print_report(&report, config.output)?;

    if !report.is_resolved() {
        std::process::exit(1);
    }
    Ok(())
}
