mod from_request;
pub(crate) mod tests;

use definitions::TankState;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;

use crate::pump::PumpHandler;
use crate::state::StateHandler;

pub const PUMP_ON_LABEL: &str = "Estado: Encendido";
pub const PUMP_OFF_LABEL: &str = "Estado: Apagado";

/// The control page with the virtual pump switch.
#[get("/")]
pub fn index() -> RawHtml<&'static str> {
    RawHtml(INDEX_HTML)
}

/// Flips the pump regardless of the current fill level.
#[post("/toggle")]
pub async fn toggle(pump_handler: &PumpHandler) -> Result<String, Status> {
    let on = pump_handler.toggle().await.map_err(|e| {
        log::error!("Manual toggle failed: {e}");
        Status::ServiceUnavailable
    })?;
    Ok(if on { PUMP_ON_LABEL } else { PUMP_OFF_LABEL }.to_string())
}

/// JSON snapshot of the tank, polled by the control page.
#[get("/state")]
pub fn tank_state(state_handler: &StateHandler) -> Json<TankState> {
    Json(state_handler.get_state())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Control de Bomba de Agua</title>
    <style>
        body { font-family: Arial, sans-serif; text-align: center; margin-top: 50px; }
        button { padding: 10px 20px; font-size: 18px; margin: 10px; }
        #nivel, #status { font-size: 20px; margin-top: 20px; }
    </style>
</head>
<body>
    <h1>Control de Bomba de Agua</h1>
    <p id="nivel">Nivel: &ndash;</p>
    <button onclick="togglePump()">Encender/Apagar Bomba</button>
    <p id="status">Estado: Apagado</p>

    <script>
        function togglePump() {
            fetch('/toggle', { method: 'POST' })
                .then(response => response.text())
                .then(data => {
                    document.getElementById('status').innerText = data;
                })
                .catch(error => console.error('Error:', error));
        }

        async function refresh() {
            try {
                const s = await (await fetch('/state')).json();
                document.getElementById('nivel').innerText =
                    'Nivel: ' + s.fill_percentage.toFixed(1) + '%';
                document.getElementById('status').innerText =
                    s.pump_on ? 'Estado: Encendido' : 'Estado: Apagado';
            } catch (e) {
                console.log(e);
            }
        }
        refresh();
        setInterval(refresh, 3000);
    </script>
</body>
</html>
"#;
