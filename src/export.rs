// CSV export of the current view. One header row, then one row per vehicle
// in the order given.

use std::fs;
use std::io::Write;
use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};

use crate::error::{CatalogError, Result};
use crate::fields::{self, Context};
use crate::format;
use crate::models::Vehicle;

pub const CSV_HEADERS: [&str; 24] = [
    "Year",
    "Make",
    "Model",
    "Trim",
    "Body Type",
    "Width (in)",
    "Body Width (in)",
    "Length (in)",
    "Height (in)",
    "Ground Clearance (in)",
    "Seats",
    "Doors",
    "Cargo (cu ft)",
    "Legroom (in)",
    "Fuel Type",
    "Plug Type",
    "MPG",
    "EV Range (mi)",
    "MSRP",
    "Safety Rating",
    "Review Score",
    "Autonomy Level",
    "Reliability",
    "Notes",
];

fn opt(n: Option<f64>) -> String {
    n.map(format::trim_number).unwrap_or_default()
}

fn csv_row(v: &Vehicle, ctx: &Context) -> [String; 24] {
    [
        v.year.to_string(),
        v.make.clone(),
        v.model.clone(),
        v.trim.clone().unwrap_or_default(),
        v.body_type.as_str().to_string(),
        format::trim_number(fields::effective_width(v, ctx)),
        format::trim_number(v.body_width_inches),
        opt(v.length_inches),
        format::trim_number(v.height_inches),
        format::trim_number(v.ground_clearance_inches),
        v.seats.to_string(),
        v.doors.to_string(),
        opt(v.cargo_volume_cu_ft),
        opt(v.driver_legroom_inches),
        v.fuel_type.as_str().to_string(),
        v.plug_type.as_str().to_string(),
        format::format_mpg(v),
        opt(v.ev_range_miles),
        v.msrp.map(format::format_currency).unwrap_or_default(),
        v.safety_rating.label().to_string(),
        opt(v.review_score),
        v.autonomy_level.label().to_string(),
        v.reliability_rating.label().to_string(),
        v.notes.clone().unwrap_or_default(),
    ]
}

/// Streams the CSV document into `writer`.
pub fn write_csv<'a, W, I>(writer: W, records: I, ctx: &Context) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Vehicle>,
{
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);

    wtr.write_record(CSV_HEADERS)?;
    let mut rows = 0usize;
    for v in records {
        wtr.write_record(csv_row(v, ctx))?;
        rows += 1;
    }
    wtr.flush().map_err(|e| CatalogError::Csv(e.into()))?;
    tracing::debug!(rows, "CSV written");
    Ok(())
}

pub fn to_csv_string<'a, I>(records: I, ctx: &Context) -> Result<String>
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    let mut buf = Vec::new();
    write_csv(&mut buf, records, ctx)?;
    // Every cell comes from a `String`, so the buffer is valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes the export to `path`, creating parent directories as needed.
pub fn save_csv<'a, I>(path: &Path, records: I, ctx: &Context) -> Result<()>
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
    }
    let file = fs::File::create(path).map_err(|e| CatalogError::io(path, e))?;
    write_csv(file, records, ctx)?;
    tracing::info!(path = %path.display(), "saved CSV export");
    Ok(())
}
