use scraper::{Html, Selector};

use crate::config::FieldPaths;
use crate::error::{ChartError, Result};
use crate::models::ChartEntry;

/// Compiled selectors for the title, artist and album columns
#[derive(Debug, Clone)]
pub struct FieldSelectors {
    song_titles: Selector,
    artist_names: Selector,
    album_names: Selector,
}

impl FieldSelectors {
    pub fn new(paths: &FieldPaths) -> Result<Self> {
        Ok(Self {
            song_titles: compile(&paths.song_titles)?,
            artist_names: compile(&paths.artist_names)?,
            album_names: compile(&paths.album_names)?,
        })
    }
}

fn compile(expr: &str) -> Result<Selector> {
    Selector::parse(expr)
        .map_err(|e| ChartError::InvalidConfig(format!("Invalid selector {:?}: {}", expr, e)))
}

/// Trimmed text of every element matching `selector`, in document order
pub fn select_text(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect()
}

/// Parse a chart page into ranked entries, keeping at most `cutoff` of them.
///
/// Field lists are paired by position. When the lists disagree in length the
/// shortest one decides how many rows exist.
pub fn extract(page: &str, selectors: &FieldSelectors, cutoff: usize) -> Result<Vec<ChartEntry>> {
    ensure_markup(page)?;

    let document = Html::parse_document(page);
    let titles = select_text(&document, &selectors.song_titles);
    let artists = select_text(&document, &selectors.artist_names);
    let albums = select_text(&document, &selectors.album_names);

    if titles.len() != artists.len() || titles.len() != albums.len() {
        tracing::warn!(
            "Chart field counts differ (titles: {}, artists: {}, albums: {}), truncating to shortest",
            titles.len(),
            artists.len(),
            albums.len()
        );
    }

    let entries: Vec<ChartEntry> = titles
        .into_iter()
        .zip(artists)
        .zip(albums)
        .take(cutoff)
        .enumerate()
        .map(|(i, ((title, artist), album))| ChartEntry {
            rank: (i + 1).to_string(),
            title,
            artist,
            album,
        })
        .collect();

    tracing::debug!("Extracted {} chart entries", entries.len());
    Ok(entries)
}

/// Markup documents start with a tag, doctype or comment
fn ensure_markup(page: &str) -> Result<()> {
    let content = page.trim_start_matches('\u{feff}').trim();

    if content.is_empty() {
        return Err(ChartError::UnparseableResponse("empty body".to_string()));
    }

    if !content.starts_with('<') {
        let preview: String = content.chars().take(40).collect();
        return Err(ChartError::UnparseableResponse(format!(
            "body is not markup: {:?}",
            preview
        )));
    }

    Ok(())
}
