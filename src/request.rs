use reqwest::Url;

use crate::config::ProviderConfig;
use crate::error::{ChartError, Result};
use crate::models::{DateWindow, PeriodKind};

/// Above this cut line the provider expects the compact index format
const INDEX_THRESHOLD: usize = 50;

const MOVED_FLAG: &str = "Y";

/// Period-specific query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
enum QueryParams<'a> {
    Daily,
    Weekly {
        start: &'a str,
        end: &'a str,
        is_first: bool,
        is_last: bool,
    },
    Monthly {
        rank_month: &'a str,
    },
}

impl<'a> QueryParams<'a> {
    fn new(kind: PeriodKind, window: &'a DateWindow) -> Self {
        match kind {
            PeriodKind::Daily => QueryParams::Daily,
            PeriodKind::Weekly => QueryParams::Weekly {
                start: &window.start,
                end: &window.end,
                is_first: false,
                is_last: false,
            },
            PeriodKind::Monthly => QueryParams::Monthly {
                rank_month: &window.start,
            },
        }
    }
}

/// Index flag derived from the configured cut line, not the returned entry count
pub fn index_flag(cut_line: usize) -> u8 {
    if cut_line > INDEX_THRESHOLD { 0 } else { 1 }
}

/// Build the chart page URL for `kind` and `window`
pub fn compose(kind: PeriodKind, window: &DateWindow, config: &ProviderConfig) -> Result<Url> {
    let mut url = config.base_url()?;

    if kind != PeriodKind::Daily {
        rewrite_period_segment(&mut url, kind)?;
    }
    url.set_fragment(None);

    let params = QueryParams::new(kind, window);
    {
        let mut query = url.query_pairs_mut();
        query.clear();
        query.append_pair(&config.index_key, &index_flag(config.cut_line).to_string());
        query.append_pair(&config.moved_key, MOVED_FLAG);

        match params {
            QueryParams::Daily => {}
            QueryParams::Weekly {
                start,
                end,
                is_first,
                is_last,
            } => {
                query.append_pair(&config.start_date_key, start);
                query.append_pair(&config.end_date_key, end);
                query.append_pair(&config.is_first_date_key, &is_first.to_string());
                query.append_pair(&config.is_last_date_key, &is_last.to_string());
            }
            QueryParams::Monthly { rank_month } => {
                query.append_pair(&config.rank_month_key, rank_month);
            }
        }
    }

    tracing::debug!("Composed {} chart URL: {}", kind, url);
    Ok(url)
}

/// Replace the daily path segment (`/chart/day/...`) with the one for `kind`
fn rewrite_period_segment(url: &mut Url, kind: PeriodKind) -> Result<()> {
    let daily = PeriodKind::Daily.path_segment();

    let mut segments: Vec<String> = url
        .path_segments()
        .map(|segments| segments.map(str::to_string).collect())
        .unwrap_or_default();

    let position = segments
        .iter()
        .position(|segment| segment == daily)
        .ok_or_else(|| {
            ChartError::InvalidConfig(format!(
                "Base URL has no '{}' path segment to rewrite: {}",
                daily, url
            ))
        })?;
    segments[position] = kind.path_segment().to_string();

    let base = url.to_string();
    url.path_segments_mut()
        .map_err(|_| ChartError::InvalidConfig(format!("Base URL cannot carry a path: {}", base)))?
        .clear()
        .extend(segments.iter());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: &str, end: &str) -> DateWindow {
        DateWindow {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    fn config_with_cut_line(cut_line: usize) -> ProviderConfig {
        ProviderConfig {
            cut_line,
            ..ProviderConfig::default()
        }
    }

    #[test]
    fn test_index_flag_threshold() {
        assert_eq!(index_flag(1), 1);
        assert_eq!(index_flag(50), 1);
        assert_eq!(index_flag(51), 0);
        assert_eq!(index_flag(100), 0);
    }

    #[test]
    fn test_daily_url() {
        let url = compose(
            PeriodKind::Daily,
            &window("20240110", "20240110"),
            &ProviderConfig::default(),
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://www.melon.com/chart/day/index.htm?idx=1&moved=Y"
        );
    }

    #[test]
    fn test_weekly_url() {
        let url = compose(
            PeriodKind::Weekly,
            &window("20240101", "20240107"),
            &ProviderConfig::default(),
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://www.melon.com/chart/week/index.htm?idx=1&moved=Y\
             &startDay=20240101&endDay=20240107&isFirstDate=false&isLastDate=false"
        );
    }

    #[test]
    fn test_monthly_url_has_single_date_param() {
        let url = compose(
            PeriodKind::Monthly,
            &window("202402", "202402"),
            &ProviderConfig::default(),
        )
        .unwrap();

        assert_eq!(url.path(), "/chart/month/index.htm");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("idx".to_string(), "1".to_string()),
                ("moved".to_string(), "Y".to_string()),
                ("rankMonth".to_string(), "202402".to_string()),
            ]
        );
    }

    #[test]
    fn test_large_cut_line_uses_compact_index() {
        let config = config_with_cut_line(100);
        for kind in [PeriodKind::Daily, PeriodKind::Weekly, PeriodKind::Monthly] {
            let url = compose(kind, &window("202402", "202402"), &config).unwrap();
            assert!(url.query().unwrap().starts_with("idx=0&"), "{}", url);
        }
    }

    #[test]
    fn test_custom_keys_are_used() {
        let config = ProviderConfig {
            index_key: "i".to_string(),
            start_date_key: "from".to_string(),
            end_date_key: "to".to_string(),
            ..ProviderConfig::default()
        };

        let url = compose(PeriodKind::Weekly, &window("20240101", "20240107"), &config).unwrap();
        let query = url.query().unwrap();
        assert!(query.starts_with("i=1&moved=Y"));
        assert!(query.contains("from=20240101&to=20240107"));
    }

    #[test]
    fn test_existing_query_and_fragment_are_replaced() {
        let config = ProviderConfig {
            url: "http://localhost:8081/chart/day/index.htm?foo=bar#top".to_string(),
            ..ProviderConfig::default()
        };

        let url = compose(PeriodKind::Monthly, &window("202311", "202311"), &config).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8081/chart/month/index.htm?idx=1&moved=Y&rankMonth=202311"
        );
    }

    #[test]
    fn test_only_path_segment_is_rewritten() {
        let config = ProviderConfig {
            url: "http://day.example.com/day/chart/day/index.htm".to_string(),
            ..ProviderConfig::default()
        };

        let url = compose(PeriodKind::Weekly, &window("20240101", "20240107"), &config).unwrap();
        assert_eq!(url.host_str(), Some("day.example.com"));
        assert_eq!(url.path(), "/week/chart/day/index.htm");
    }

    #[test]
    fn test_missing_day_segment_is_config_error() {
        let config = ProviderConfig {
            url: "https://www.melon.com/chart/index.htm".to_string(),
            ..ProviderConfig::default()
        };

        let err = compose(PeriodKind::Weekly, &window("20240101", "20240107"), &config).unwrap_err();
        assert!(matches!(err, ChartError::InvalidConfig(_)));

        // Daily charts never rewrite the path
        assert!(compose(PeriodKind::Daily, &window("20240101", "20240101"), &config).is_ok());
    }

    #[test]
    fn test_malformed_base_url_is_config_error() {
        let config = ProviderConfig {
            url: "::not a url::".to_string(),
            ..ProviderConfig::default()
        };

        let err = compose(PeriodKind::Daily, &window("20240101", "20240101"), &config).unwrap_err();
        assert!(matches!(err, ChartError::InvalidConfig(_)));
    }
}
