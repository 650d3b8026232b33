//! Minimal view: one compact forecast line per request.

use anyhow::Result;

use crate::controller::ForecastController;
use crate::views::prompt_line;

pub async fn run(controller: &mut ForecastController) -> Result<()> {
    loop {
        let Some(name) = prompt_line("Location (blank to quit): ")? else {
            break;
        };

        if !controller.set_location_by_name(&name).await {
            println!("Unknown location: {name}");
            continue;
        }

        if !controller.fetch_forecast().await {
            println!("No forecast for {}", controller.current_location_name());
            continue;
        }

        if let Some(f) = controller.processed_forecast() {
            println!(
                "{} {}: {}-{} C, {}, wind {} ({})",
                f.location_name,
                f.forecast_date,
                f.temp_min,
                f.temp_max,
                f.weather_description,
                f.wind_dir,
                f.wind_speed_description
            );
        }
    }

    Ok(())
}
