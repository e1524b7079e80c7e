//! IP addresses
//!
//! An IpAddress provides an abstraction for IPv4 addresses bindable to
//! Instance resources running in a Cloud.
//! See: https://reference.rightscale.com/api1.5/resources/ResourceIpAddresses.html

use crate::client::RightScaleClient;
use crate::common::filter::Filter;
use crate::common::params::Params;
use crate::common::validation::{check_filters, require_value};
use crate::common::Link;
use crate::error::RightScaleError;
use crate::hrefs;
use crate::resource_trait::impl_resource;
use crate::resources::ip_address_binding::IpAddressBinding;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Filters accepted by [`RightScaleClient::index_ip_addresses`]
pub const IP_ADDRESS_FILTERS: &[&str] = &["name"];

/// IpAddress model matching the IpAddress media type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IpAddress {
    pub address: Option<String>,
    pub name: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub links: Vec<Link>,
}

impl_resource!(IpAddress => "IpAddress");

impl IpAddress {
    /// Bindings of this address to instances
    pub async fn ip_address_bindings(&self, client: &RightScaleClient) -> Result<Vec<IpAddressBinding>, RightScaleError> {
        client.follow_list(self, "ip_address_bindings").await
    }
}

impl RightScaleClient {
    /// List the IP addresses of a cloud
    pub async fn index_ip_addresses(&self, cloud_id: &str, filters: &[Filter]) -> Result<Vec<IpAddress>, RightScaleError> {
        require_value("cloud id", cloud_id)?;
        check_filters(IP_ADDRESS_FILTERS, filters)?;

        let mut query = Params::new();
        query.push_filters(filters);

        debug!("Querying IP addresses of cloud {} with filters: {:?}", cloud_id, filters);
        self.list(&hrefs::ip_addresses(cloud_id), &query).await
    }

    /// Get an IP address by ID
    pub async fn show_ip_address(&self, cloud_id: &str, id: &str) -> Result<IpAddress, RightScaleError> {
        require_value("cloud id", cloud_id)?;
        require_value("ip address id", id)?;
        debug!("Fetching IP address {} in cloud {}", id, cloud_id);
        self.fetch(&hrefs::ip_address(cloud_id, id), &Params::new()).await
    }

    /// Reserve a new IP address
    ///
    /// # Returns
    /// * `Ok(String)` - ID of the new IP address
    pub async fn create_ip_address(&self, cloud_id: &str, name: &str) -> Result<String, RightScaleError> {
        require_value("cloud id", cloud_id)?;
        require_value("name", name)?;

        let mut form = Params::new();
        form.push("ip_address[name]", name);

        debug!("Creating IP address {} in cloud {}", name, cloud_id);
        self.http().post_for_id(&hrefs::ip_addresses(cloud_id), &form).await
    }

    /// Rename an IP address
    pub async fn update_ip_address(&self, cloud_id: &str, id: &str, name: &str) -> Result<(), RightScaleError> {
        require_value("cloud id", cloud_id)?;
        require_value("ip address id", id)?;
        require_value("name", name)?;

        let mut form = Params::new();
        form.push("ip_address[name]", name);

        debug!("Updating IP address {} in cloud {}", id, cloud_id);
        self.http().put(&hrefs::ip_address(cloud_id, id), &form).await
    }

    /// Release an IP address
    pub async fn destroy_ip_address(&self, cloud_id: &str, id: &str) -> Result<(), RightScaleError> {
        require_value("cloud id", cloud_id)?;
        require_value("ip address id", id)?;
        debug!("Deleting IP address {} in cloud {}", id, cloud_id);
        self.http().delete(&hrefs::ip_address(cloud_id, id)).await
    }
}
