//! Instance types
//!
//! See: https://reference.rightscale.com/api1.5/resources/ResourceInstanceTypes.html

use crate::client::RightScaleClient;
use crate::common::filter::Filter;
use crate::common::params::Params;
use crate::common::validation::{check_filters, check_view, require_value, resolve_view};
use crate::common::Link;
use crate::error::RightScaleError;
use crate::hrefs;
use crate::resource_trait::impl_resource;
use crate::resources::cloud::Cloud;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Filters accepted by [`RightScaleClient::index_instance_types`]
pub const INSTANCE_TYPE_FILTERS: &[&str] = &["cpu_architecture", "description", "name", "resource_uid"];
/// Views accepted by the instance type calls
pub const INSTANCE_TYPE_VIEWS: &[&str] = &["default"];

/// InstanceType model matching the InstanceType media type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceType {
    pub name: String,
    pub resource_uid: Option<String>,
    pub cpu_architecture: Option<String>,
    pub local_disks: Option<String>,
    pub memory: Option<String>,
    pub local_disk_size: Option<String>,
    pub cpu_count: Option<String>,
    pub cpu_speed: Option<String>,
    pub description: Option<String>,
    pub links: Vec<Link>,
}

impl_resource!(InstanceType => "InstanceType");

impl InstanceType {
    /// Cloud offering this instance type
    pub async fn cloud(&self, client: &RightScaleClient) -> Result<Cloud, RightScaleError> {
        client.follow(self, "cloud").await
    }
}

impl RightScaleClient {
    /// List the instance types of a cloud
    ///
    /// The view is always sent; `None` means `default`.
    pub async fn index_instance_types(
        &self,
        cloud_id: &str,
        filters: &[Filter],
        view: Option<&str>,
    ) -> Result<Vec<InstanceType>, RightScaleError> {
        require_value("cloud id", cloud_id)?;
        check_filters(INSTANCE_TYPE_FILTERS, filters)?;
        let view = resolve_view(INSTANCE_TYPE_VIEWS, view)?;

        let mut query = Params::new();
        query.push_filters(filters).push("view", view);

        debug!("Querying instance types of cloud {} with filters: {:?}", cloud_id, filters);
        self.list(&hrefs::instance_types(cloud_id), &query).await
    }

    /// Get an instance type by ID
    pub async fn show_instance_type(
        &self,
        cloud_id: &str,
        id: &str,
        view: Option<&str>,
    ) -> Result<InstanceType, RightScaleError> {
        require_value("cloud id", cloud_id)?;
        require_value("instance type id", id)?;
        let view = check_view(INSTANCE_TYPE_VIEWS, view)?;

        let mut query = Params::new();
        query.push_opt("view", view);

        debug!("Fetching instance type {} in cloud {}", id, cloud_id);
        self.fetch(&hrefs::instance_type(cloud_id, id), &query).await
    }
}
