use carbon_intensity::{
    CarbonFrameFilterExt, CarbonIntensity, CarbonIntensityError, IntensityIndex, Month,
    RequestMode, Season,
};
use polars::prelude::*;
use std::env;

#[tokio::main]
async fn main() -> Result<(), CarbonIntensityError> {
    configure_polars_display();
    let client = CarbonIntensity::new();

    let output = client
        .monthly()
        .start(Month(2023, 1))
        .end(Month(2023, 12))
        .mode(RequestMode::builder().intensity(true).regional_wide(true).build())
        .call()
        .await?;

    let Some(wide) = output.wide() else {
        return Ok(());
    };

    // High-carbon winter half hours, averaged per month.
    let summary = wide
        .lazy()
        .filter_season(Season::Winter)
        .filter_index_at_least(IntensityIndex::High)
        .group_by([col("yearMonth")])
        .agg([col("forecast").mean(), col("forecast").count().alias("periods")])
        .sort_by_exprs([col("yearMonth")], SortMultipleOptions::default())
        .collect()?;

    println!("{:#?}", summary);

    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    // show 20 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
