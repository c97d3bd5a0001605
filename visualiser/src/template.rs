use crate::error::ReportError;
use crate::model::{DisplayModel, Report};
use crate::template::partials::escape_html;

mod app_install;
mod dht_sync_lag;
mod first_call;
pub(crate) mod partials;

const STYLE: &str = include_str!("template/style.css");

/// A pure function from a display model to an HTML fragment
pub type ScenarioTemplate = fn(&DisplayModel) -> Result<String, ReportError>;

/// Resolve the template for a scenario
///
/// Unlike transforms there is no generic fallback; a template has to know the shape of its
/// scenario's display data, so a scenario without one cannot be rendered.
pub fn template_for(scenario_name: &str) -> Option<ScenarioTemplate> {
    match scenario_name {
        "app_install" => Some(app_install::render),
        "dht_sync_lag" => Some(dht_sync_lag::render),
        "first_call" => Some(first_call::render),
        _ => None,
    }
}

/// Wrap an assembled report into a complete, self-contained HTML page.
pub fn render_page(report: &Report) -> String {
    format!(
        "<html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>\n{style}</style>\n\
         </head>\n\
         <body>\n\
         <main>\n{html}\n</main>\n\
         </body>\n\
         </html>\n",
        title = escape_html(&report.title),
        style = STYLE,
        html = report.html,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_known_scenarios_have_templates() {
        assert!(template_for("dht_sync_lag").is_some());
        assert!(template_for("app_install").is_some());
        assert!(template_for("first_call").is_some());
        assert!(template_for("mystery_scenario").is_none());
    }

    #[test]
    fn page_starts_with_an_opening_html_tag() {
        let page = render_page(&Report {
            html: "<section></section>".to_string(),
            title: "dht_sync_lag-X".to_string(),
        });
        assert!(page.starts_with("<html>"));
        assert!(page.contains("<title>dht_sync_lag-X</title>"));
    }

    #[test]
    fn page_title_is_escaped() {
        let page = render_page(&Report {
            html: String::new(),
            title: "a<b".to_string(),
        });
        assert!(page.contains("<title>a&lt;b</title>"));
    }
}
