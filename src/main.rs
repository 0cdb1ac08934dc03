use anyhow::{Context as _, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vehicle_catalog::config::Settings;
use vehicle_catalog::delta::COMPARISON_FIELDS;
use vehicle_catalog::{export, format, Catalog, DeltaPolarity};

fn main() -> Result<()> {
    // Load .env file first. Ignore errors (e.g., file not found)
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "vehicle_catalog=info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = match Settings::new() {
        Ok(s) => {
            tracing::info!("Configuration loaded successfully.");
            s
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };
    let ctx = settings.context();

    let catalog = Catalog::load(&settings.dataset_path)
        .with_context(|| format!("Failed to load dataset {}", settings.dataset_path.display()))?;
    let view = settings.load_view();

    let rows = catalog.view(&view.effective_filter(), &view.sort, &ctx);
    let baseline = catalog.baseline(view.baseline_id.as_deref());
    tracing::info!(shown = rows.len(), total = catalog.len(), "view computed");

    if let Some(base) = baseline {
        println!("Baseline: {} ({})", base.display_name(), format::format_price(base));
    }
    for v in &rows {
        let mut line = format!(
            "{:<40} {:>14} {:>16} {:>10}",
            v.display_name(),
            format::format_price(v),
            format::format_width(v, &ctx),
            format::format_mpg(v),
        );
        if let Some(base) = baseline.filter(|b| b.id != v.id) {
            let diffs: Vec<String> = catalog
                .deltas(base, v, &COMPARISON_FIELDS, &ctx)
                .into_iter()
                .filter(|d| d.polarity != DeltaPolarity::Neutral)
                .map(|d| {
                    let mark = if d.polarity == DeltaPolarity::Favorable { "+" } else { "-" };
                    format!("{} {} [{mark}]", d.field, d.label)
                })
                .collect();
            if !diffs.is_empty() {
                line.push_str("  ");
                line.push_str(&diffs.join(", "));
            }
        }
        println!("{line}");
    }

    // Same naming scheme as the search result files: a timestamp per export
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    let output_file_path = settings.export_dir.join(format!("catalog_{timestamp}.csv"));
    export::save_csv(&output_file_path, rows.iter().copied(), &ctx)
        .context("Failed to write CSV export")?;
    println!("Exported {} vehicles to {}", rows.len(), output_file_path.display());

    Ok(())
}
