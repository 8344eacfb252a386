use crate::calendar::PaginationPlan;
use crate::chart::{ChartDriver, ScrollDirection};
use crate::error::Result;
use crate::results::PriceSeries;

/// Most points sampled from one non-final page. Matches the widget's
/// per-page density; the final page is exempt (see `collect`).
pub const PAGE_POINT_CAP: usize = 42;

/// Upper bound on rewind presses, so a widget that never reports an
/// end-stop cannot hold the session forever.
pub const MAX_REWIND_PRESSES: u32 = 32;

/// Drives the graph through `Rewinding -> Sampling(page) -> Done` and
/// merges the per-page samples into one ordered series.
pub struct Paginator {
    plan: PaginationPlan,
}

impl Paginator {
    pub fn new(plan: PaginationPlan) -> Self {
        Self { plan }
    }

    /// Collect the full series the plan calls for.
    ///
    /// Adjacent pages overlap (a logical page is two window steps of data,
    /// advanced two presses at a time), so the returned series can contain
    /// the same date more than once; nothing is de-duplicated here.
    pub async fn collect<D: ChartDriver>(&self, driver: &mut D) -> Result<PriceSeries> {
        self.rewind(driver).await?;

        let mut series = PriceSeries::new();
        ::log::info!("sampling {} graph pages", self.plan.pages);

        'pages: for page in 0..self.plan.pages {
            let is_final = self.plan.is_final(page);
            let points = driver.visible_points().await?;
            if points.is_empty() {
                // Widget still rendering; this page contributes nothing.
                ::log::debug!("page {} rendered no points", page);
            }

            let mut counted = 0usize;
            let mut sampled = 0usize;
            for point in &points {
                if counted >= PAGE_POINT_CAP {
                    break;
                }
                // The density cap is not counted on the final page, which
                // therefore emits every visible point.
                if !is_final {
                    counted += 1;
                }
                driver.select_point(point).await?;
                series.push(driver.read_label().await?);
                sampled += 1;
            }
            ::log::debug!(
                "page {} of {}: sampled {} of {} visible points",
                page + 1,
                self.plan.pages,
                sampled,
                points.len()
            );

            // Two window steps per logical page.
            for _ in 0..2 {
                if !driver.scroll(ScrollDirection::Forward).await? {
                    ::log::info!("forward control gone after page {}, stopping early", page + 1);
                    break 'pages;
                }
            }
        }

        Ok(series)
    }

    /// Press backward until the widget reports its end-stop, so sampling
    /// starts from the earliest visible window instead of wherever the
    /// graph happened to open.
    async fn rewind<D: ChartDriver>(&self, driver: &mut D) -> Result<()> {
        for _ in 0..MAX_REWIND_PRESSES {
            if !driver.scroll(ScrollDirection::Backward).await? {
                return Ok(());
            }
        }
        ::log::warn!(
            "backward control still present after {} presses, sampling from here",
            MAX_REWIND_PRESSES
        );
        Ok(())
    }
}
