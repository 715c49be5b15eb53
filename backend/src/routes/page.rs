use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tracing::info;

use crate::models::DateRange;
use crate::state::AppState;

const INDEX_TEMPLATE: &str = include_str!("../../static/index.html");

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index(State(state): State<AppState>) -> Html<String> {
    info!("GET / - Serving lookup page");
    let defaults = DateRange::year_to_date(chrono::Local::now().date_naive());
    Html(render_index(&state.config.operator_name, &defaults))
}

fn render_index(operator_name: &str, defaults: &DateRange) -> String {
    INDEX_TEMPLATE
        .replace("{{operator_name}}", &escape_html(operator_name))
        .replace("{{default_start}}", &defaults.start.to_string())
        .replace("{{default_end}}", &defaults.end.to_string())
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_header_shows_escaped_operator_name() {
        let defaults = DateRange::year_to_date(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap());
        let html = render_index("<홍길동>", &defaults);

        assert!(html.contains("📈 &lt;홍길동&gt;의 주가 분석 서비스"));
        assert!(html.contains("value=\"2024-01-01\""));
        assert!(html.contains("value=\"2024-05-20\""));
        assert!(!html.contains("{{"));
    }
}
