//! RightScripts
//!
//! See: https://reference.rightscale.com/api1.5/resources/ResourceRightScripts.html

use crate::client::RightScaleClient;
use crate::common::filter::Filter;
use crate::common::params::Params;
use crate::common::validation::{check_filters, require_value, resolve_view};
use crate::common::Link;
use crate::error::RightScaleError;
use crate::hrefs;
use crate::resource_trait::impl_resource;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Filters accepted by [`RightScaleClient::index_right_scripts`]
pub const RIGHT_SCRIPT_FILTERS: &[&str] = &["description", "latest_only", "lineage", "name"];
/// Views accepted by the RightScript calls
pub const RIGHT_SCRIPT_VIEWS: &[&str] = &["default", "inputs_2_0"];

/// RightScript model matching the RightScript media type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RightScript {
    pub id: Option<String>,
    pub name: String,
    pub lineage: Option<String>,
    pub revision: Option<u32>,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub links: Vec<Link>,
}

impl_resource!(RightScript => "RightScript");

impl RightScaleClient {
    /// Get a RightScript by ID; the view is always sent
    pub async fn show_right_script(&self, id: &str, view: Option<&str>) -> Result<RightScript, RightScaleError> {
        require_value("right script id", id)?;
        let view = resolve_view(RIGHT_SCRIPT_VIEWS, view)?;

        let mut query = Params::new();
        query.push("view", view);

        debug!("Fetching RightScript {}", id);
        self.fetch(&hrefs::right_script(id), &query).await
    }

    /// List RightScripts
    pub async fn index_right_scripts(
        &self,
        filters: &[Filter],
        view: Option<&str>,
    ) -> Result<Vec<RightScript>, RightScaleError> {
        check_filters(RIGHT_SCRIPT_FILTERS, filters)?;
        let view = resolve_view(RIGHT_SCRIPT_VIEWS, view)?;

        let mut query = Params::new();
        query.push_filters(filters).push("view", view);

        debug!("Querying RightScripts with filters: {:?}", filters);
        self.list(hrefs::RIGHT_SCRIPTS, &query).await
    }
}
