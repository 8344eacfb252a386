use std::time::Duration;

use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, Locator};

use crate::chart::{ChartDriver, ScrollDirection};
use crate::config::SessionConfig;
use crate::error::{ExtractError, Phase, Result};
use crate::results::{PricePoint, UNAVAILABLE};
use crate::selectors;

/// Fantoccini-backed implementation of the chart primitives.
///
/// Every operation carries its own bounded wait; a fixed settle delay is
/// used only after clicks with no observable post-condition.
pub struct PriceGraph<'a> {
    client: &'a Client,
    element_timeout: Duration,
    control_timeout: Duration,
    settle: Duration,
}

impl<'a> PriceGraph<'a> {
    pub fn new(client: &'a Client, config: &SessionConfig) -> Self {
        Self {
            client,
            element_timeout: config.element_timeout(),
            control_timeout: config.control_timeout(),
            settle: config.settle(),
        }
    }

    /// Wait for the price-graph toggle and open the graph. The toggle never
    /// appearing is a hard failure: without it there is nothing to extract.
    pub async fn open(&self) -> Result<()> {
        let toggle = self
            .client
            .wait()
            .at_most(self.element_timeout)
            .for_element(Locator::Css(selectors::GRAPH_TOGGLE))
            .await
            .map_err(|e| match e {
                CmdError::WaitTimeout => {
                    ExtractError::page(Phase::OpenGraph, "price graph toggle never appeared")
                }
                other => ExtractError::command(Phase::OpenGraph, other),
            })?;
        toggle
            .click()
            .await
            .map_err(|e| ExtractError::command(Phase::OpenGraph, e))?;
        tokio::time::sleep(self.settle).await;
        ::log::debug!("price graph opened");
        Ok(())
    }

    async fn label_text(&self, selector: &'static str) -> Result<String> {
        match self.client.find(Locator::Css(selector)).await {
            Ok(element) => {
                let text = element
                    .text()
                    .await
                    .map_err(|e| ExtractError::command(Phase::Paginate, e))?;
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Ok(UNAVAILABLE.to_string())
                } else {
                    Ok(trimmed.to_string())
                }
            }
            Err(ref e) if e.is_no_such_element() => Ok(UNAVAILABLE.to_string()),
            Err(e) => Err(ExtractError::command(Phase::Paginate, e)),
        }
    }
}

#[async_trait]
impl ChartDriver for PriceGraph<'_> {
    type Point = Element;

    async fn visible_points(&mut self) -> Result<Vec<Element>> {
        self.client
            .find_all(Locator::Css(selectors::GRAPH_POINT))
            .await
            .map_err(|e| ExtractError::command(Phase::Paginate, e))
    }

    async fn select_point(&mut self, point: &Element) -> Result<()> {
        point
            .click()
            .await
            .map_err(|e| ExtractError::command(Phase::Paginate, e))
    }

    async fn read_label(&mut self) -> Result<PricePoint> {
        let date = self.label_text(selectors::GRAPH_LABEL_DATE).await?;
        let price = self.label_text(selectors::GRAPH_LABEL_PRICE).await?;
        Ok(PricePoint::new(date, price))
    }

    async fn scroll(&mut self, direction: ScrollDirection) -> Result<bool> {
        match self
            .client
            .wait()
            .at_most(self.control_timeout)
            .for_element(Locator::Css(direction.selector()))
            .await
        {
            Ok(control) => {
                control
                    .click()
                    .await
                    .map_err(|e| ExtractError::command(Phase::Paginate, e))?;
                tokio::time::sleep(self.settle).await;
                Ok(true)
            }
            Err(ref e) if matches!(e, CmdError::WaitTimeout) || e.is_no_such_element() => {
                ::log::debug!("no {} control available", direction);
                Ok(false)
            }
            Err(e) => Err(ExtractError::command(Phase::Paginate, e)),
        }
    }
}
