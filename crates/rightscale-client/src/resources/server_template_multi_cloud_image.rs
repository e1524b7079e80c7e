//! ServerTemplate to MultiCloudImage attachments
//!
//! See: https://reference.rightscale.com/api1.5/resources/ResourceServerTemplateMultiCloudImages.html

use crate::client::RightScaleClient;
use crate::common::filter::Filter;
use crate::common::params::Params;
use crate::common::validation::{check_filters, require_value, resolve_view};
use crate::common::Link;
use crate::error::RightScaleError;
use crate::hrefs;
use crate::models::MultiCloudImage;
use crate::resource_trait::impl_resource;
use crate::resources::server_template::ServerTemplate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Filters accepted by [`RightScaleClient::index_server_template_multi_cloud_images`]
pub const SERVER_TEMPLATE_MULTI_CLOUD_IMAGE_FILTERS: &[&str] =
    &["is_default", "multi_cloud_image_href", "server_template_href"];
/// Views accepted by the attachment calls
pub const SERVER_TEMPLATE_MULTI_CLOUD_IMAGE_VIEWS: &[&str] = &["default"];

/// Attachment of a MultiCloudImage to a ServerTemplate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerTemplateMultiCloudImage {
    pub created_at: Option<String>,
    pub is_default: bool,
    pub updated_at: Option<String>,
    pub links: Vec<Link>,
}

impl_resource!(ServerTemplateMultiCloudImage => "ServerTemplateMultiCloudImage");

impl ServerTemplateMultiCloudImage {
    /// Attached MultiCloudImage
    pub async fn multi_cloud_image(&self, client: &RightScaleClient) -> Result<MultiCloudImage, RightScaleError> {
        client.follow(self, "multi_cloud_image").await
    }

    /// ServerTemplate the image is attached to
    pub async fn server_template(&self, client: &RightScaleClient) -> Result<ServerTemplate, RightScaleError> {
        client.follow(self, "server_template").await
    }
}

impl RightScaleClient {
    /// List ServerTemplate/MultiCloudImage attachments
    pub async fn index_server_template_multi_cloud_images(
        &self,
        filters: &[Filter],
        view: Option<&str>,
    ) -> Result<Vec<ServerTemplateMultiCloudImage>, RightScaleError> {
        check_filters(SERVER_TEMPLATE_MULTI_CLOUD_IMAGE_FILTERS, filters)?;
        let view = resolve_view(SERVER_TEMPLATE_MULTI_CLOUD_IMAGE_VIEWS, view)?;

        let mut query = Params::new();
        query.push_filters(filters).push("view", view);

        debug!("Querying ServerTemplate MultiCloudImages with filters: {:?}", filters);
        self.list(hrefs::SERVER_TEMPLATE_MULTI_CLOUD_IMAGES, &query).await
    }

    /// Get an attachment by ID
    pub async fn show_server_template_multi_cloud_image(
        &self,
        id: &str,
    ) -> Result<ServerTemplateMultiCloudImage, RightScaleError> {
        require_value("server template multi cloud image id", id)?;
        debug!("Fetching ServerTemplate MultiCloudImage {}", id);
        self.fetch(&hrefs::server_template_multi_cloud_image(id), &Params::new())
            .await
    }

    /// Attach a MultiCloudImage to a ServerTemplate
    ///
    /// # Returns
    /// * `Ok(String)` - ID of the new attachment
    pub async fn create_server_template_multi_cloud_image(
        &self,
        multi_cloud_image_id: &str,
        server_template_id: &str,
    ) -> Result<String, RightScaleError> {
        require_value("multi cloud image id", multi_cloud_image_id)?;
        require_value("server template id", server_template_id)?;

        let mut form = Params::new();
        form.push(
            "server_template_multi_cloud_image[multi_cloud_image_href]",
            hrefs::multi_cloud_image(multi_cloud_image_id),
        )
        .push(
            "server_template_multi_cloud_image[server_template_href]",
            hrefs::server_template(server_template_id),
        );

        debug!(
            "Attaching MultiCloudImage {} to ServerTemplate {}",
            multi_cloud_image_id, server_template_id
        );
        self.http()
            .post_for_id(hrefs::SERVER_TEMPLATE_MULTI_CLOUD_IMAGES, &form)
            .await
    }

    /// Detach a MultiCloudImage from its ServerTemplate
    pub async fn destroy_server_template_multi_cloud_image(&self, id: &str) -> Result<(), RightScaleError> {
        require_value("server template multi cloud image id", id)?;
        debug!("Deleting ServerTemplate MultiCloudImage {}", id);
        self.http()
            .delete(&hrefs::server_template_multi_cloud_image(id))
            .await
    }

    /// Make this attachment the ServerTemplate's default image
    pub async fn make_default_server_template_multi_cloud_image(&self, id: &str) -> Result<(), RightScaleError> {
        require_value("server template multi cloud image id", id)?;
        debug!("Making ServerTemplate MultiCloudImage {} the default", id);
        self.http()
            .post(&hrefs::server_template_multi_cloud_image_make_default(id), &Params::new())
            .await?;
        Ok(())
    }
}
