//! Implementations in this file are useful to allow accessing
//! the state handler and pump handler directly from Rocket routes:
//! ```rust,no_run
//! #[get("/state")]
//! fn tank_state(state_handler: &StateHandler) -> Json<TankState> {
//!     Json(state_handler.get_state())
//! }
//! ```

use rocket::{
    request::{self, FromRequest},
    Request,
};

use crate::{pump::PumpHandler, state::StateHandler};

// why doesn't Rocket provide directly &StateHandler,
// but only &State<StateHandler>, thus requiring this FromRequest impl?
#[rocket::async_trait]
impl<'r> FromRequest<'r> for &'r StateHandler {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        request
            .guard::<&rocket::State<StateHandler>>()
            .await
            .map(|state_handler| state_handler.inner())
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for &'r PumpHandler {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        request
            .guard::<&rocket::State<PumpHandler>>()
            .await
            .map(|pump_handler| pump_handler.inner())
    }
}
