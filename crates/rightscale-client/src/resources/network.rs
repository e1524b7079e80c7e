//! Networks
//!
//! A Network is a logical grouping of network devices.
//! See: https://reference.rightscale.com/api1.5/resources/ResourceNetworks.html

use crate::client::RightScaleClient;
use crate::common::filter::Filter;
use crate::common::params::Params;
use crate::common::validation::{check_filters, require_value};
use crate::common::Link;
use crate::error::RightScaleError;
use crate::hrefs;
use crate::models::Tag;
use crate::resource_trait::{impl_resource, impl_taggable};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Filters accepted by [`RightScaleClient::index_networks`]
pub const NETWORK_FILTERS: &[&str] = &["cidr_block", "cloud_href", "name", "resource_uid"];

/// Network model matching the Network media type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    pub name: String,
    pub cidr_block: Option<String>,
    pub description: Option<String>,
    pub instance_tenancy: Option<String>,
    pub is_default: bool,
    pub resource_uid: Option<String>,
    /// Filled from `tags/by_resource` when tag auto-population is on
    pub tags: Vec<Tag>,
    pub links: Vec<Link>,
}

impl_resource!(Network => "Network");
impl_taggable!(Network);

impl RightScaleClient {
    /// List networks
    pub async fn index_networks(&self, filters: &[Filter]) -> Result<Vec<Network>, RightScaleError> {
        check_filters(NETWORK_FILTERS, filters)?;

        let mut query = Params::new();
        query.push_filters(filters);

        debug!("Querying networks with filters: {:?}", filters);
        let mut networks: Vec<Network> = self.list(hrefs::NETWORKS, &query).await?;
        self.auto_tag(&mut networks).await?;
        Ok(networks)
    }

    /// Get a network by ID
    pub async fn show_network(&self, id: &str) -> Result<Network, RightScaleError> {
        require_value("network id", id)?;
        debug!("Fetching network {}", id);
        let mut network: Network = self.fetch(&hrefs::network(id), &Params::new()).await?;
        self.auto_tag(std::slice::from_mut(&mut network)).await?;
        Ok(network)
    }
}
