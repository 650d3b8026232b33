//! Full view: location listing plus a labelled forecast panel.

use anyhow::Result;

use crate::controller::{ForecastController, ProcessedForecast};
use crate::views::prompt_line;

pub async fn run(controller: &mut ForecastController) -> Result<()> {
    println!("Tempo - Daily weather forecasts for Portugal");

    let mut names = controller.available_location_names();
    names.sort();

    if names.is_empty() {
        println!("No locations are available. Check your connection and restart.");
    } else {
        println!("\nAvailable locations ({} total):", names.len());
        println!("{}", names.join(", "));
    }

    loop {
        let Some(name) = prompt_line("\nLocation name (blank to quit): ")? else {
            break;
        };

        if !controller.set_location_by_name(&name).await {
            println!("Location '{name}' was not found. Check the list above.");
            continue;
        }

        if !controller.fetch_forecast().await {
            println!(
                "Could not fetch a forecast for {}. See the logs for details.",
                controller.current_location_name()
            );
            continue;
        }

        if let Some(forecast) = controller.processed_forecast() {
            render(forecast);
        }
    }

    println!("Goodbye.");
    Ok(())
}

fn render(forecast: &ProcessedForecast) {
    println!("\n--- Forecast for {} ---", forecast.location_name);
    println!("Location ID:     {}", forecast.location_id);
    println!("Forecast date:   {}", forecast.forecast_date);
    println!("Min temperature: {} C", forecast.temp_min);
    println!("Max temperature: {} C", forecast.temp_max);
    println!("Conditions:      {}", forecast.weather_description);
    println!("Wind direction:  {}", forecast.wind_dir);
    println!("Wind:            {}", forecast.wind_speed_description);
}
