use carbon_intensity::{CarbonIntensity, CarbonIntensityError, RequestMode, TimeWindow};
use std::env;

#[tokio::main]
async fn main() -> Result<(), CarbonIntensityError> {
    configure_polars_display();
    let client = CarbonIntensity::new();
    let window = TimeWindow::parse("2024-03-01T00:00Z", "2024-03-02T00:00Z")?;

    let mode = RequestMode::builder()
        .intensity(true)
        .generation(true)
        .regional_long(true)
        .build();

    let (wide, long) = client.run(&window, mode).await?.into_parts();

    if let Some(wide) = wide {
        println!("{:#?}", wide.frame);
    }
    if let Some(long) = long {
        // London
        println!("{:#?}", long.region(13).collect()?);
    }

    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    // show 20 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
