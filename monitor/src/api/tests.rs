#![cfg(test)]

use std::sync::{Arc, Mutex};

use definitions::{Parameters, TankState};
use rocket::http::Status;
use rocket::local::asynchronous::Client;

use crate::peripherals::test_helpers::{RecordingRelay, RelayRecord};
use crate::pump::PumpHandler;
use crate::state::StateHandler;

use super::{PUMP_OFF_LABEL, PUMP_ON_LABEL};

async fn get_test_client() -> (Client, Arc<Mutex<RelayRecord>>) {
    let state_handler = StateHandler::new(Parameters::default());
    let record = Arc::new(Mutex::new(RelayRecord::default()));
    let pump_handler = PumpHandler::spawn(
        Box::new(RecordingRelay::new(record.clone())),
        state_handler.clone(),
    );

    let rocket = rocket::build()
        .manage(state_handler)
        .manage(pump_handler)
        .mount(
            "/",
            routes![crate::api::index, crate::api::toggle, crate::api::tank_state],
        );
    let client = Client::tracked(rocket).await.expect("valid rocket instance");
    (client, record)
}

#[tokio::test]
async fn toggle_returns_the_two_status_literals() {
    let (client, record) = get_test_client().await;

    let response = client.post("/toggle").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_string().await.unwrap(), PUMP_ON_LABEL);
    assert!(record.lock().unwrap().on);

    let response = client.post("/toggle").dispatch().await;
    assert_eq!(response.into_string().await.unwrap(), PUMP_OFF_LABEL);
    assert!(!record.lock().unwrap().on);
}

#[tokio::test]
async fn state_reports_the_pump_after_a_toggle() {
    let (client, _record) = get_test_client().await;

    client.post("/toggle").dispatch().await;
    let response = client.get("/state").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let state: TankState = response.into_json().await.unwrap();
    assert!(state.pump_on);
    assert_eq!(state.parameters, Parameters::default());
}

#[tokio::test]
async fn index_serves_the_control_page() {
    let (client, _record) = get_test_client().await;

    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().await.unwrap();
    assert!(body.contains("Control de Bomba de Agua"));
}
