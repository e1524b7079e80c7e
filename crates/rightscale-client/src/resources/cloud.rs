//! Clouds
//!
//! Represents a cloud (within the context of the account in the session).
//! See: https://reference.rightscale.com/api1.5/resources/ResourceClouds.html

use crate::client::RightScaleClient;
use crate::common::filter::Filter;
use crate::common::params::Params;
use crate::common::validation::{check_filters, require_value};
use crate::common::Link;
use crate::error::RightScaleError;
use crate::hrefs;
use crate::models::{
    DataCenter, Image, Instance, RecurringVolumeAttachment, SshKey, Volume, VolumeAttachment, VolumeSnapshot,
    VolumeType,
};
use crate::resource_trait::impl_resource;
use crate::resources::instance_type::InstanceType;
use crate::resources::ip_address::IpAddress;
use crate::resources::ip_address_binding::IpAddressBinding;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Filters accepted by [`RightScaleClient::index_clouds`]
pub const CLOUD_FILTERS: &[&str] = &["cloud_type", "description", "name"];

/// Cloud model matching the Cloud media type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Cloud {
    pub name: String,
    pub cloud_type: Option<String>,
    pub description: Option<String>,
    pub links: Vec<Link>,
}

impl_resource!(Cloud => "Cloud");

impl Cloud {
    /// Datacenters (zones) of this cloud
    pub async fn datacenters(&self, client: &RightScaleClient) -> Result<Vec<DataCenter>, RightScaleError> {
        client.follow_list(self, "datacenters").await
    }

    /// Volume snapshots in this cloud
    pub async fn volume_snapshots(&self, client: &RightScaleClient) -> Result<Vec<VolumeSnapshot>, RightScaleError> {
        client.follow_list(self, "volume_snapshots").await
    }

    /// Instances running in this cloud
    pub async fn instances(&self, client: &RightScaleClient) -> Result<Vec<Instance>, RightScaleError> {
        client.follow_list(self, "instances").await
    }

    /// Volume types offered by this cloud
    pub async fn volume_types(&self, client: &RightScaleClient) -> Result<Vec<VolumeType>, RightScaleError> {
        client.follow_list(self, "volume_types").await
    }

    /// SSH keys registered in this cloud
    pub async fn ssh_keys(&self, client: &RightScaleClient) -> Result<Vec<SshKey>, RightScaleError> {
        client.follow_list(self, "ssh_keys").await
    }

    /// Volume attachments that are re-made on each launch
    pub async fn recurring_volume_attachments(
        &self,
        client: &RightScaleClient,
    ) -> Result<Vec<RecurringVolumeAttachment>, RightScaleError> {
        client.follow_list(self, "recurring_volume_attachments").await
    }

    /// Current volume attachments
    pub async fn volume_attachments(&self, client: &RightScaleClient) -> Result<Vec<VolumeAttachment>, RightScaleError> {
        client.follow_list(self, "volume_attachments").await
    }

    /// Volumes in this cloud
    pub async fn volumes(&self, client: &RightScaleClient) -> Result<Vec<Volume>, RightScaleError> {
        client.follow_list(self, "volumes").await
    }

    /// IP address bindings in this cloud
    pub async fn ip_address_bindings(&self, client: &RightScaleClient) -> Result<Vec<IpAddressBinding>, RightScaleError> {
        client.follow_list(self, "ip_address_bindings").await
    }

    /// Machine images available in this cloud
    pub async fn images(&self, client: &RightScaleClient) -> Result<Vec<Image>, RightScaleError> {
        client.follow_list(self, "images").await
    }

    /// Instance types offered by this cloud
    pub async fn instance_types(&self, client: &RightScaleClient) -> Result<Vec<InstanceType>, RightScaleError> {
        client.follow_list(self, "instance_types").await
    }

    /// IP addresses reserved in this cloud
    pub async fn ip_addresses(&self, client: &RightScaleClient) -> Result<Vec<IpAddress>, RightScaleError> {
        client.follow_list(self, "ip_addresses").await
    }
}

impl RightScaleClient {
    /// List the clouds available to the session's account
    ///
    /// # Arguments
    /// * `filters` - Filters from [`CLOUD_FILTERS`]
    pub async fn index_clouds(&self, filters: &[Filter]) -> Result<Vec<Cloud>, RightScaleError> {
        check_filters(CLOUD_FILTERS, filters)?;

        let mut query = Params::new();
        query.push_filters(filters);

        debug!("Querying clouds with filters: {:?}", filters);
        self.list(hrefs::CLOUDS, &query).await
    }

    /// Get a cloud by ID
    pub async fn show_cloud(&self, id: &str) -> Result<Cloud, RightScaleError> {
        require_value("cloud id", id)?;
        debug!("Fetching cloud {}", id);
        self.fetch(&hrefs::cloud(id), &Params::new()).await
    }
}
