use std::path::Path;

use plotly::common::{Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Plot, Scatter};
use tracing::info;

use crate::error::Result;
use crate::normalize::PriceTable;
use crate::settings::Settings;

const HEADROOM: f64 = 1.1;

/// Y-axis range: zero up to the highest price plus 10%.
pub fn price_range(prices: &[f64]) -> Option<[f64; 2]> {
    let max = prices.iter().copied().reduce(f64::max)?;
    Some([0.0, max * HEADROOM])
}

/// Line chart of price over sale date, one marker per listing.
pub fn build(table: &PriceTable, settings: &Settings) -> Plot {
    let trace = Scatter::new(table.dates().to_vec(), table.prices().to_vec())
        .mode(Mode::LinesMarkers)
        .name("price")
        .hover_text_array(table.hyperlinks().to_vec());

    let mut y_axis = Axis::new()
        .title(Title::new("Price"))
        .dtick(settings.tick_spacing)
        .tick_prefix("$")
        .tick_format(".2f");
    if let Some(range) = price_range(table.prices()) {
        y_axis = y_axis.range(range.to_vec());
    }

    let layout = Layout::new()
        .title(Title::new(&settings.chart_title))
        .x_axis(Axis::new().title(Title::new("Date Sold")))
        .y_axis(y_axis);

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

pub fn render(plot: &Plot, out: Option<&Path>, show: bool) -> Result<()> {
    if let Some(path) = out {
        std::fs::write(path, plot.to_html())?;
        info!(path = %path.display(), "wrote chart");
    }
    if show {
        plot.show();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::normalize::normalize;
    use crate::parser::extract::RawListing;

    #[test]
    fn range_has_ten_percent_headroom() {
        let [lo, hi] = price_range(&[80.0, 95.0, 110.0]).unwrap();
        assert_eq!(lo, 0.0);
        assert!((hi - 121.0).abs() < 1e-9, "got {hi}");
        assert_eq!(price_range(&[]), None);
    }

    #[test]
    fn plot_carries_labels_and_axis() {
        let rows = [("80.00", "1 Jan 2024"), ("110.00", "2 Feb 2024")]
            .into_iter()
            .map(|(price, date)| RawListing {
                name: Some("PSA 10 Sylveon 212/203".into()),
                link: Some("https://www.ebay.com.au/itm/9".into()),
                price: Some(price.into()),
                date_sold: Some(date.into()),
                has_excluded_marker: false,
            })
            .collect();
        let settings = Settings::default();
        let table = normalize(rows, &settings).unwrap();

        let json = build(&table, &settings).to_json();
        assert!(json.contains("Price trend for Sylveon 212/203"));
        assert!(json.contains("Date Sold"));
        assert!(json.contains("2024-02-02"));
        assert!(json.contains("\"tickprefix\":\"$\""));
        assert!(json.contains("\"dtick\":20.0"));
        assert!(json.contains("target=\\\"_blank\\\""));
    }

    #[test]
    fn render_writes_html_file() {
        let dir = std::env::temp_dir().join(format!("sold_trend_chart_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("chart.html");

        render(&Plot::new(), Some(path.as_path()), false).unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("<html"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn render_into_missing_directory_is_an_error() {
        let path = std::env::temp_dir()
            .join(format!("sold_trend_missing_{}", std::process::id()))
            .join("nested")
            .join("chart.html");
        let err = render(&Plot::new(), Some(path.as_path()), false).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
