use serde_json::{json, Value};

use crate::models::PriceRow;

pub const PREVIEW_ROWS: usize = 10;

const VERTICAL_SPACING: f64 = 0.1;
const LINE_ROW_SHARE: f64 = 0.4;
const GRID_COLOR: &str = "#ebf0f8";

/// Most recent rows for the preview table, oldest first.
pub fn preview(rows: &[PriceRow]) -> Vec<PriceRow> {
    rows[rows.len().saturating_sub(PREVIEW_ROWS)..].to_vec()
}

/// plotly.js figure: a closing-price line on top and, when `candlestick` is
/// set, an OHLC candlestick panel below it sharing the date axis.
pub fn build_figure(title: &str, rows: &[PriceRow], candlestick: bool) -> Value {
    let dates: Vec<String> = rows.iter().map(|r| r.date.format("%Y-%m-%d").to_string()).collect();
    let closes: Vec<f64> = rows.iter().map(|r| r.close).collect();

    let line = json!({
        "type": "scatter",
        "mode": "lines",
        "name": "종가",
        "x": dates,
        "y": closes,
        "line": { "color": "blue" },
        "xaxis": "x",
        "yaxis": "y",
    });

    if !candlestick {
        return json!({
            "data": [line],
            "layout": {
                "title": { "text": format!("{} 분석 차트", title) },
                "height": 800,
                "paper_bgcolor": "white",
                "plot_bgcolor": "white",
                "xaxis": { "gridcolor": GRID_COLOR },
                "yaxis": { "gridcolor": GRID_COLOR },
                "annotations": [subplot_title("종가 추이", 1.0)],
            },
        });
    }

    let candles = json!({
        "type": "candlestick",
        "name": "캔들",
        "x": dates,
        "open": rows.iter().map(|r| r.open).collect::<Vec<_>>(),
        "high": rows.iter().map(|r| r.high).collect::<Vec<_>>(),
        "low": rows.iter().map(|r| r.low).collect::<Vec<_>>(),
        "close": closes,
        "xaxis": "x2",
        "yaxis": "y2",
    });

    // rows share what is left after the gap, 40/60
    let usable = 1.0 - VERTICAL_SPACING;
    let lower_top = usable * (1.0 - LINE_ROW_SHARE);
    let upper_bottom = lower_top + VERTICAL_SPACING;

    json!({
        "data": [line, candles],
        "layout": {
            "title": { "text": format!("{} 분석 차트", title) },
            "height": 800,
            "paper_bgcolor": "white",
            "plot_bgcolor": "white",
            "xaxis": {
                "anchor": "y",
                "matches": "x2",
                "showticklabels": false,
                "gridcolor": GRID_COLOR,
            },
            "yaxis": { "domain": [upper_bottom, 1.0], "anchor": "x", "gridcolor": GRID_COLOR },
            "xaxis2": {
                "anchor": "y2",
                "rangeslider": { "visible": false },
                "gridcolor": GRID_COLOR,
            },
            "yaxis2": { "domain": [0.0, lower_top], "anchor": "x2", "gridcolor": GRID_COLOR },
            "annotations": [
                subplot_title("종가 추이", 1.0),
                subplot_title("캔들 차트", lower_top),
            ],
        },
    })
}

fn subplot_title(text: &str, y: f64) -> Value {
    json!({
        "text": text,
        "x": 0.5,
        "y": y,
        "xref": "paper",
        "yref": "paper",
        "xanchor": "center",
        "yanchor": "bottom",
        "showarrow": false,
    })
}
