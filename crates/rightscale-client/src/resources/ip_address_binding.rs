//! IP address bindings
//!
//! An IpAddressBinding represents an abstraction for binding an IpAddress
//! to an instance. Bindings are reachable both directly under a cloud and
//! nested under the IpAddress they bind.
//! See: https://reference.rightscale.com/api1.5/resources/ResourceIpAddressBindings.html

use crate::client::RightScaleClient;
use crate::common::filter::Filter;
use crate::common::params::Params;
use crate::common::validation::{check_choice, check_filters, require_value};
use crate::common::Link;
use crate::error::RightScaleError;
use crate::hrefs;
use crate::models::Instance;
use crate::resource_trait::impl_resource;
use crate::resources::ip_address::IpAddress;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Filters accepted by the index calls
pub const IP_ADDRESS_BINDING_FILTERS: &[&str] = &["instance_href", "ip_address_href"];

/// Transport protocols a binding can forward
pub const BINDING_PROTOCOLS: &[&str] = &["TCP", "UDP"];

/// IpAddressBinding model matching the IpAddressBinding media type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IpAddressBinding {
    pub private_port: Option<String>,
    pub public_port: Option<String>,
    pub protocol: Option<String>,
    pub recurring: bool,
    pub links: Vec<Link>,
}

impl_resource!(IpAddressBinding => "IpAddressBinding");

impl IpAddressBinding {
    /// Instance the traffic is forwarded to
    pub async fn instance(&self, client: &RightScaleClient) -> Result<Instance, RightScaleError> {
        client.follow(self, "instance").await
    }

    /// Public IP address of the binding
    pub async fn ip_address(&self, client: &RightScaleClient) -> Result<IpAddress, RightScaleError> {
        client.follow(self, "ip_address").await
    }
}

/// Request body for [`RightScaleClient::create_ip_address_binding`]
#[derive(Debug, Clone)]
pub struct CreateIpAddressBinding {
    /// Instance in the same cloud receiving the traffic
    pub instance_id: String,
    pub public_port: Option<u16>,
    pub private_port: Option<u16>,
    /// `TCP` or `UDP`
    pub protocol: String,
}

impl CreateIpAddressBinding {
    /// Binding with both ports left to the cloud
    pub fn new(instance_id: impl Into<String>, protocol: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            public_port: None,
            private_port: None,
            protocol: protocol.into(),
        }
    }
}

impl RightScaleClient {
    /// List the IP address bindings of a cloud
    pub async fn index_ip_address_bindings(
        &self,
        cloud_id: &str,
        filters: &[Filter],
    ) -> Result<Vec<IpAddressBinding>, RightScaleError> {
        require_value("cloud id", cloud_id)?;
        self.query_bindings(&hrefs::ip_address_bindings(cloud_id), filters).await
    }

    /// List the bindings of one IP address
    pub async fn index_ip_address_bindings_for_ip_address(
        &self,
        cloud_id: &str,
        ip_address_id: &str,
        filters: &[Filter],
    ) -> Result<Vec<IpAddressBinding>, RightScaleError> {
        require_value("cloud id", cloud_id)?;
        require_value("ip address id", ip_address_id)?;
        self.query_bindings(&hrefs::ip_address_bindings_for(cloud_id, ip_address_id), filters)
            .await
    }

    async fn query_bindings(&self, path: &str, filters: &[Filter]) -> Result<Vec<IpAddressBinding>, RightScaleError> {
        check_filters(IP_ADDRESS_BINDING_FILTERS, filters)?;

        let mut query = Params::new();
        query.push_filters(filters);

        debug!("Querying IP address bindings at {} with filters: {:?}", path, filters);
        self.list(path, &query).await
    }

    /// Get an IP address binding by ID
    pub async fn show_ip_address_binding(&self, cloud_id: &str, id: &str) -> Result<IpAddressBinding, RightScaleError> {
        require_value("cloud id", cloud_id)?;
        require_value("binding id", id)?;
        debug!("Fetching IP address binding {} in cloud {}", id, cloud_id);
        self.fetch(&hrefs::ip_address_binding(cloud_id, id), &Params::new()).await
    }

    /// Get a binding through the IP address it belongs to
    pub async fn show_ip_address_binding_for_ip_address(
        &self,
        cloud_id: &str,
        ip_address_id: &str,
        id: &str,
    ) -> Result<IpAddressBinding, RightScaleError> {
        require_value("cloud id", cloud_id)?;
        require_value("ip address id", ip_address_id)?;
        require_value("binding id", id)?;
        debug!("Fetching IP address binding {} of IP address {}", id, ip_address_id);
        self.fetch(&hrefs::ip_address_binding_for(cloud_id, ip_address_id, id), &Params::new())
            .await
    }

    /// Bind an IP address to an instance
    ///
    /// # Arguments
    /// * `cloud_id` - Cloud holding both the address and the instance
    /// * `ip_address_id` - Address being bound
    /// * `request` - Binding details; `protocol` must be one of [`BINDING_PROTOCOLS`]
    ///
    /// # Returns
    /// * `Ok(String)` - ID of the new binding
    pub async fn create_ip_address_binding(
        &self,
        cloud_id: &str,
        ip_address_id: &str,
        request: &CreateIpAddressBinding,
    ) -> Result<String, RightScaleError> {
        require_value("cloud id", cloud_id)?;
        require_value("ip address id", ip_address_id)?;
        require_value("instance id", &request.instance_id)?;
        check_choice("protocol", BINDING_PROTOCOLS, &request.protocol)?;

        let mut form = Params::new();
        form.push("ip_address_binding[instance_href]", hrefs::instance(cloud_id, &request.instance_id))
            .push_opt("ip_address_binding[private_port]", request.private_port)
            .push("ip_address_binding[protocol]", request.protocol.as_str())
            .push(
                "ip_address_binding[public_ip_address_href]",
                hrefs::ip_address(cloud_id, ip_address_id),
            )
            .push_opt("ip_address_binding[public_port]", request.public_port);

        debug!(
            "Binding IP address {} to instance {} in cloud {}",
            ip_address_id, request.instance_id, cloud_id
        );
        self.http()
            .post_for_id(&hrefs::ip_address_bindings_for(cloud_id, ip_address_id), &form)
            .await
    }

    /// Delete an IP address binding
    pub async fn destroy_ip_address_binding(&self, cloud_id: &str, id: &str) -> Result<(), RightScaleError> {
        require_value("cloud id", cloud_id)?;
        require_value("binding id", id)?;
        debug!("Deleting IP address binding {} in cloud {}", id, cloud_id);
        self.http().delete(&hrefs::ip_address_binding(cloud_id, id)).await
    }

    /// Delete a binding through the IP address it belongs to
    pub async fn destroy_ip_address_binding_for_ip_address(
        &self,
        cloud_id: &str,
        ip_address_id: &str,
        id: &str,
    ) -> Result<(), RightScaleError> {
        require_value("cloud id", cloud_id)?;
        require_value("ip address id", ip_address_id)?;
        require_value("binding id", id)?;
        debug!("Deleting IP address binding {} of IP address {}", id, ip_address_id);
        self.http()
            .delete(&hrefs::ip_address_binding_for(cloud_id, ip_address_id, id))
            .await
    }
}
