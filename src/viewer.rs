//! Chart window
//!
//! The rendered SVG is served from a custom URI scheme into a single Tauri
//! webview window. Closing the window ends the event loop and the process.

use std::fs;

use crate::chart::ChartSpec;
use crate::config::ViewerSettings;
use crate::error::DriverError;

/// URI scheme the chart page is served from
pub const CHART_SCHEME: &str = "chart";

const WINDOW_LABEL: &str = "chart";

/// Displays a finished chart
pub trait ChartPresenter {
    /// Show the chart; may block until the user dismisses it.
    fn present(&mut self, chart: &ChartSpec) -> Result<(), DriverError>;
}

/// Shows the chart in a Tauri window and blocks until it is closed
#[derive(Debug, Clone)]
pub struct TauriViewer {
    settings: ViewerSettings,
}

impl TauriViewer {
    pub fn new(settings: ViewerSettings) -> Self {
        Self { settings }
    }
}

impl ChartPresenter for TauriViewer {
    fn present(&mut self, chart: &ChartSpec) -> Result<(), DriverError> {
        let svg = chart.render_svg(self.settings.width, self.settings.height)?;

        if let Some(path) = &self.settings.save_svg {
            fs::write(path, &svg)
                .map_err(|e| DriverError::Viewer(format!("{}: {}", path.display(), e)))?;
            log::info!("[viewer] saved chart to {}", path.display());
        }

        let page = chart_page(&chart.title, &svg);
        log::info!("[viewer] opening chart window: {}", chart.title);
        run_window(
            chart.title.clone(),
            page,
            self.settings.width,
            self.settings.height,
        )
    }
}

/// Address of the chart page as seen by the webview
pub fn chart_url() -> String {
    // Windows and Android webviews expose custom schemes as http://<scheme>.localhost
    if cfg!(any(windows, target_os = "android")) {
        format!("http://{}.localhost/", CHART_SCHEME)
    } else {
        format!("{}://localhost/", CHART_SCHEME)
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Minimal HTML page embedding the SVG, scaled to the window
pub fn chart_page(title: &str, svg: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{}</title>\n\
         <style>\n\
         html, body {{ margin: 0; height: 100%; background: #ffffff; }}\n\
         body {{ display: flex; align-items: center; justify-content: center; }}\n\
         svg {{ max-width: 100%; max-height: 100%; }}\n\
         </style>\n\
         </head>\n\
         <body>\n{}\n</body>\n\
         </html>\n",
        escape_html(title),
        svg
    )
}

fn run_window(title: String, page: String, width: u32, height: u32) -> Result<(), DriverError> {
    let page = page.into_bytes();

    let app = tauri::Builder::default()
        .register_uri_scheme_protocol(CHART_SCHEME, move |_ctx, _request| {
            tauri::http::Response::builder()
                .header(tauri::http::header::CONTENT_TYPE, "text/html; charset=utf-8")
                .body(page.clone())
                .unwrap_or_default()
        })
        .setup(move |app| {
            let url: tauri::Url = chart_url().parse()?;
            tauri::WebviewWindowBuilder::new(app, WINDOW_LABEL, tauri::WebviewUrl::CustomProtocol(url))
                .title(&title)
                .inner_size(f64::from(width), f64::from(height))
                .build()?;
            Ok(())
        })
        .build(tauri::generate_context!())
        .map_err(|e| DriverError::Viewer(e.to_string()))?;

    // Returns (or exits the process) once the last window is closed
    app.run(|_app, _event| {});
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_page_escapes_title() {
        let page = chart_page("lib<a>.so: solve1", "<svg></svg>");
        assert!(page.contains("<title>lib&lt;a&gt;.so: solve1</title>"));
        assert!(page.contains("<svg></svg>"));
        assert!(page.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_chart_url_uses_scheme() {
        let url = chart_url();
        assert!(url.contains(CHART_SCHEME));
        assert!(url.parse::<tauri::Url>().is_ok());
    }

    #[test]
    fn test_viewer_keeps_settings() {
        let viewer = TauriViewer::new(ViewerSettings {
            width: 300,
            ..ViewerSettings::default()
        });
        assert_eq!(viewer.settings.width, 300);
        assert_eq!(viewer.settings.height, ViewerSettings::default().height);
    }
}
