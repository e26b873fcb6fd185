use std::path::PathBuf;

use clap::Parser;

use crate::control::LevelMonitor;
use crate::peripherals::PeripheralsChoice;
use crate::pump::PumpHandler;
use crate::state::parameters::{load_parameters_from_disk, save_parameters_to_disk};
use crate::state::StateHandler;

mod api;
mod constants;
mod control;
mod peripherals;
mod pump;
mod state;
mod util;

#[macro_use]
extern crate rocket;

#[derive(Parser, Debug)]
#[command(about = "Water container level monitor with automatic pump shutoff")]
struct Cli {
    /// Which peripherals to drive: "simulated" or "gpio".
    #[arg(long, default_value = "simulated", value_parser = PeripheralsChoice::parse)]
    peripherals: PeripheralsChoice,

    /// Directory holding parameters.json.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

#[rocket::main]
async fn main() {
    let cli = Cli::parse();

    let parameters = load_parameters_from_disk(&cli.data_dir);
    // write back so a fresh data dir ends up with an editable file
    save_parameters_to_disk(&parameters, &cli.data_dir);

    let peripherals = cli.peripherals.build(parameters.container_height_cm);

    let state_handler = StateHandler::new(parameters);
    let pump_handler = PumpHandler::spawn(peripherals.relay, state_handler.clone());

    let (monitor, stop) = LevelMonitor::new(
        peripherals.sensor,
        peripherals.display,
        peripherals.notifier,
        state_handler.clone(),
        pump_handler.clone(),
    );
    let monitor_task = tokio::spawn(monitor.run());

    rocket::build()
        .manage(state_handler)
        .manage(pump_handler)
        .mount("/", routes![api::index, api::toggle, api::tank_state])
        .launch()
        .await
        .unwrap();

    // launch().await blocks until it receives a shutdown request (e.g. Ctrl+C).
    // The monitor loop owns the teardown: pump forced off, display cleared.
    let _ = stop.send(true);
    if let Err(e) = monitor_task.await {
        log::error!("The monitor loop did not shut down cleanly: {e}");
    }
    println!("Shutting down water level monitor...");
}
