//! Minimal host: build a card config, fill a store, render once, print the
//! SVG document to stdout.
//!
//! ```sh
//! cargo run -p sensorbars-demo > card.svg
//! ```

use sensorbars_chart::{render, write_svg};
use sensorbars_core::CardConfig;
use sensorbars_state::SensorStore;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = CardConfig::from_json(serde_json::json!({
        "title": "Household Power",
        "logarithmic": true,
        "logarithmic_mode": "symmetric",
        "grid": { "max": 5000.0, "lines": 4, "decimal": 0, "unit": "W" },
        "bars": [
            {
                "entity": "sensor.grid_power",
                "name": "Grid",
                "color": "#268bd2",
                "decimals": 0,
                "max_entity": "sensor.grid_power_peak",
                "tap_action": { "action": "more-info" }
            },
            {
                "entities": ["sensor.pv_east", "sensor.pv_west"],
                "name": "Solar",
                "color": "#859900",
                "decimals": 0,
                "tap_action": { "action": "navigate", "navigation_path": "/energy" }
            },
            {
                "entity": "sensor.ev_charger",
                "name": "Charger",
                "color": "#cb4b16",
                "decimals": 0
            }
        ]
    }))
    .expect("demo config is well-formed");
    config.validate().expect("demo config is in domain");

    let mut store = SensorStore::new();
    store.set_numeric("sensor.grid_power", -384.0);
    store.set_numeric("sensor.grid_power_peak", 4200.0);
    store.set_numeric("sensor.pv_east", 1250.0);
    store.set_numeric("sensor.pv_west", 980.0);
    store.set("sensor.ev_charger", "unavailable");

    let scene = render(&config, &store, 640.0, 360.0);
    tracing::info!(
        primitives = scene.primitives.len(),
        bars = scene.hit_regions.len(),
        "rendered demo card"
    );

    print!("{}", write_svg(&scene));
}
