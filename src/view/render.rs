//! Text renderers for the screen model

use super::model::{Row, Screen, EMPTY_MESSAGE, LOADING_FOOTER};
use crate::error::Result;

/// One list entry as two terminal lines: title and price, then the image URI
pub fn pretty_row(row: &Row) -> String {
    format!("{}  {}\n    {}", row.title, row.price, row.image)
}

/// The whole screen as terminal text
pub fn render_pretty(screen: &Screen) -> String {
    match screen {
        Screen::Error { message } => message.clone(),
        Screen::Empty => EMPTY_MESSAGE.to_string(),
        Screen::List {
            rows,
            loading_footer,
        } => {
            let mut lines: Vec<String> = rows.iter().map(pretty_row).collect();
            if *loading_footer {
                lines.push(LOADING_FOOTER.to_string());
            }
            lines.join("\n")
        }
    }
}

/// The whole screen as a single JSON document
pub fn render_json(screen: &Screen) -> Result<String> {
    Ok(serde_json::to_string(screen)?)
}
