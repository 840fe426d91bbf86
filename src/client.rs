use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{ChartOptions, ProviderConfig};
use crate::error::Result;
use crate::extract::{self, FieldSelectors};
use crate::models::{ChartResult, PeriodKind};
use crate::period::{self, Clock, SystemClock};
use crate::request;
use crate::transport::{HttpTransport, Transport};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Chart client bound to one reference date
///
/// Each accessor resolves its own window, so the same client can serve
/// daily, weekly and monthly charts for the date it was built with.
pub struct ChartClient {
    reference: NaiveDate,
    config: Arc<ProviderConfig>,
    selectors: FieldSelectors,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
}

impl ChartClient {
    /// Client over HTTP and the local clock, with `options` laid over the defaults
    pub fn new(reference_date: &str, options: Option<ChartOptions>) -> Result<Self> {
        let config = ProviderConfig::with_options(options.unwrap_or_default());

        Self::with_parts(
            reference_date,
            Arc::new(config),
            Arc::new(HttpTransport::new(DEFAULT_TIMEOUT)?),
            Arc::new(SystemClock),
        )
    }

    pub fn with_parts(
        reference_date: &str,
        config: Arc<ProviderConfig>,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let reference = period::parse_reference_date(reference_date)?;
        config.validate()?;
        let selectors = FieldSelectors::new(&config.xpath)?;

        Ok(Self {
            reference,
            config,
            selectors,
            transport,
            clock,
        })
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub async fn daily(&self) -> Result<ChartResult> {
        self.fetch_chart(PeriodKind::Daily).await
    }

    pub async fn weekly(&self) -> Result<ChartResult> {
        self.fetch_chart(PeriodKind::Weekly).await
    }

    pub async fn monthly(&self) -> Result<ChartResult> {
        self.fetch_chart(PeriodKind::Monthly).await
    }

    /// Resolve, compose, fetch and extract the chart for `kind`
    pub async fn fetch_chart(&self, kind: PeriodKind) -> Result<ChartResult> {
        let window = period::resolve(self.reference, kind, self.clock.as_ref())?;
        tracing::info!(
            "Resolved {} chart for {} to {}..{}",
            kind,
            self.reference,
            window.start,
            window.end
        );

        let url = request::compose(kind, &window, &self.config)?;
        let page = self.transport.fetch_text(&url).await?;
        let entries = extract::extract(&page, &self.selectors, self.config.cut_line)?;

        tracing::info!("Fetched {} {} chart entries", entries.len(), kind);
        Ok(ChartResult { entries, window })
    }
}
