//! Community browser

use tracing::{info, warn};

use crate::catalog::{self, CatalogMode, FilterCriteria};
use crate::source::DataSource;
use crate::types::{Category, Community};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunitiesView {
    communities: Vec<Community>,
    /// Which list was actually served
    mode: Option<CatalogMode>,
    criteria: FilterCriteria,
}

impl CommunitiesView {
    /// Recommended communities, falling back to every approved community
    /// when there are no recommendations or they fail to load.
    pub async fn load(source: &dyn DataSource) -> Self {
        let recommended = match source.fetch_communities(CatalogMode::Recommended).await {
            Ok(list) if !list.is_empty() => Some(list),
            Ok(_) => {
                info!("No recommended communities, showing all");
                None
            }
            Err(e) => {
                warn!("Failed to fetch recommended communities: {}", e);
                None
            }
        };

        let (communities, mode) = match recommended {
            Some(list) => (list, Some(CatalogMode::Recommended)),
            None => match source.fetch_communities(CatalogMode::All).await {
                Ok(list) => (list, Some(CatalogMode::All)),
                Err(e) => {
                    warn!("Failed to fetch communities: {}", e);
                    (Vec::new(), None)
                }
            },
        };

        Self {
            communities,
            mode,
            criteria: FilterCriteria::default(),
        }
    }

    pub fn communities(&self) -> &[Community] {
        &self.communities
    }

    /// `None` when neither list could be fetched
    pub fn mode(&self) -> Option<CatalogMode> {
        self.mode
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.criteria.search_text = text.into();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.criteria.category = category;
    }

    pub fn filtered(&self) -> Vec<Community> {
        catalog::filter(&self.communities, &self.criteria)
    }
}
