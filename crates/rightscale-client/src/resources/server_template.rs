//! ServerTemplates
//!
//! ServerTemplates allow you to pre-configure servers by starting from a
//! base image and adding scripts that run during the boot, operational and
//! shutdown phases.
//! See: https://reference.rightscale.com/api1.5/resources/ResourceServerTemplates.html

use crate::client::RightScaleClient;
use crate::common::filter::Filter;
use crate::common::params::Params;
use crate::common::validation::{check_filters, require_value, resolve_view};
use crate::common::Link;
use crate::error::RightScaleError;
use crate::hrefs;
use crate::models::{AlertSpec, Input, MultiCloudImage, Publication, Tag};
use crate::resource_trait::{impl_resource, impl_taggable};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Filters accepted by [`RightScaleClient::index_server_templates`]
pub const SERVER_TEMPLATE_FILTERS: &[&str] = &["description", "multi_cloud_image_href", "name", "revision"];

/// Views accepted by the index and show calls
pub const SERVER_TEMPLATE_VIEWS: &[&str] = &["default", "inputs", "inputs_2_0"];

/// ServerTemplate model matching the ServerTemplate media type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerTemplate {
    pub name: String,
    /// Only present under the `inputs` and `inputs_2_0` views
    pub inputs: Vec<Input>,
    /// 0 is the HEAD revision
    pub revision: u32,
    pub description: Option<String>,
    pub tags: Vec<Tag>,
    pub links: Vec<Link>,
}

impl_resource!(ServerTemplate => "ServerTemplate");
impl_taggable!(ServerTemplate);

impl ServerTemplate {
    /// MultiCloudImages attached to this template
    pub async fn multi_cloud_images(&self, client: &RightScaleClient) -> Result<Vec<MultiCloudImage>, RightScaleError> {
        client.follow_list(self, "multi_cloud_images").await
    }

    /// Alert specs defined on this template
    pub async fn alert_specs(&self, client: &RightScaleClient) -> Result<Vec<AlertSpec>, RightScaleError> {
        client.follow_list(self, "alert_specs").await
    }

    /// Privately shared publication of this template
    pub async fn publication(&self, client: &RightScaleClient) -> Result<Publication, RightScaleError> {
        client.follow(self, "publication").await
    }

    /// Image used when a server does not pick one
    pub async fn default_multi_cloud_image(&self, client: &RightScaleClient) -> Result<MultiCloudImage, RightScaleError> {
        client.follow(self, "default_multi_cloud_image").await
    }
}

/// Marketplace descriptions sent with [`RightScaleClient::publish_server_template`]
#[derive(Debug, Clone, Default)]
pub struct PublishDescriptions {
    pub long: Option<String>,
    pub short: Option<String>,
    /// New revision notes
    pub notes: Option<String>,
}

/// Request body for [`RightScaleClient::publish_server_template`]
#[derive(Debug, Clone, Default)]
pub struct PublishServerTemplate {
    /// Account groups to share with
    pub account_group_ids: Vec<String>,
    pub allow_comments: bool,
    pub descriptions: Option<PublishDescriptions>,
    /// Email the publisher when a user comments
    pub email_comments: bool,
    pub categories: Vec<String>,
}

impl PublishServerTemplate {
    fn to_form(&self) -> Params {
        let mut form = Params::new();
        for id in &self.account_group_ids {
            form.push("account_group_hrefs[]", hrefs::account_group(id));
        }
        form.push_bool("allow_comments", self.allow_comments);
        for category in &self.categories {
            form.push("categories[]", category.as_str());
        }
        if let Some(descriptions) = &self.descriptions {
            form.push_opt("descriptions[long]", descriptions.long.as_deref())
                .push_opt("descriptions[short]", descriptions.short.as_deref())
                .push_opt("descriptions[notes]", descriptions.notes.as_deref());
        }
        form.push_bool("email_comments", self.email_comments);
        form
    }
}

fn name_form(name: Option<&str>, description: Option<&str>) -> Params {
    let mut form = Params::new();
    form.push_opt("server_template[description]", description)
        .push_opt("server_template[name]", name);
    form
}

impl RightScaleClient {
    /// List ServerTemplates
    ///
    /// # Arguments
    /// * `filters` - Filters from [`SERVER_TEMPLATE_FILTERS`]
    /// * `view` - One of [`SERVER_TEMPLATE_VIEWS`]; `None` means `default`
    pub async fn index_server_templates(
        &self,
        filters: &[Filter],
        view: Option<&str>,
    ) -> Result<Vec<ServerTemplate>, RightScaleError> {
        check_filters(SERVER_TEMPLATE_FILTERS, filters)?;
        let view = resolve_view(SERVER_TEMPLATE_VIEWS, view)?;

        let mut query = Params::new();
        query.push_filters(filters).push("view", view);

        debug!("Querying ServerTemplates with filters: {:?}", filters);
        let mut templates: Vec<ServerTemplate> = self.list(hrefs::SERVER_TEMPLATES, &query).await?;
        self.auto_tag(&mut templates).await?;
        Ok(templates)
    }

    /// List ServerTemplates with filters given as `"name==web,revision==0"`
    pub async fn index_server_templates_with_filter_list(
        &self,
        filter_list: &str,
        view: Option<&str>,
    ) -> Result<Vec<ServerTemplate>, RightScaleError> {
        let filters = Filter::parse_list(filter_list)?;
        self.index_server_templates(&filters, view).await
    }

    /// Get a ServerTemplate by ID
    pub async fn show_server_template(&self, id: &str, view: Option<&str>) -> Result<ServerTemplate, RightScaleError> {
        require_value("server template id", id)?;
        let view = resolve_view(SERVER_TEMPLATE_VIEWS, view)?;

        let mut query = Params::new();
        query.push("view", view);

        debug!("Fetching ServerTemplate {}", id);
        let mut template: ServerTemplate = self.fetch(&hrefs::server_template(id), &query).await?;
        self.auto_tag(std::slice::from_mut(&mut template)).await?;
        Ok(template)
    }

    /// Create a HEAD ServerTemplate
    ///
    /// # Returns
    /// * `Ok(String)` - ID of the new ServerTemplate
    pub async fn create_server_template(&self, name: &str, description: Option<&str>) -> Result<String, RightScaleError> {
        require_value("name", name)?;
        let form = name_form(Some(name), description);

        debug!("Creating ServerTemplate {}", name);
        self.http().post_for_id(hrefs::SERVER_TEMPLATES, &form).await
    }

    /// Rename or re-describe a HEAD ServerTemplate; unset fields are left alone
    pub async fn update_server_template(
        &self,
        id: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<(), RightScaleError> {
        require_value("server template id", id)?;
        let form = name_form(name, description);
        if form.is_empty() {
            return Err(RightScaleError::MissingParameter("name or description".to_string()));
        }

        debug!("Updating ServerTemplate {}", id);
        self.http().put(&hrefs::server_template(id), &form).await
    }

    /// Delete a ServerTemplate
    pub async fn destroy_server_template(&self, id: &str) -> Result<(), RightScaleError> {
        require_value("server template id", id)?;
        debug!("Deleting ServerTemplate {}", id);
        self.http().delete(&hrefs::server_template(id)).await
    }

    /// Clone a ServerTemplate into a new HEAD template
    ///
    /// # Returns
    /// * `Ok(String)` - ID of the clone
    pub async fn clone_server_template(
        &self,
        id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<String, RightScaleError> {
        require_value("server template id", id)?;
        require_value("name", name)?;
        let form = name_form(Some(name), description);

        info!("Cloning ServerTemplate {} as {}", id, name);
        self.http()
            .post_for_id(&hrefs::server_template_action(id, "clone"), &form)
            .await
    }

    /// Commit the HEAD revision of a ServerTemplate
    ///
    /// # Returns
    /// * `Ok(String)` - ID of the committed revision
    pub async fn commit_server_template(
        &self,
        id: &str,
        commit_head_dependencies: bool,
        commit_message: &str,
        freeze_repositories: bool,
    ) -> Result<String, RightScaleError> {
        require_value("server template id", id)?;
        require_value("commit_message", commit_message)?;

        let mut form = Params::new();
        form.push_bool("commit_head_dependencies", commit_head_dependencies)
            .push("commit_message", commit_message)
            .push_bool("freeze_repositories", freeze_repositories);

        info!("Committing ServerTemplate {}", id);
        self.http()
            .post_for_id(&hrefs::server_template_action(id, "commit"), &form)
            .await
    }

    /// Publish a ServerTemplate to the MultiCloud Marketplace
    ///
    /// # Returns
    /// * `Ok(String)` - ID of the new publication
    pub async fn publish_server_template(
        &self,
        id: &str,
        request: &PublishServerTemplate,
    ) -> Result<String, RightScaleError> {
        require_value("server template id", id)?;
        let form = request.to_form();

        info!(
            "Publishing ServerTemplate {} to {} account groups",
            id,
            request.account_group_ids.len()
        );
        self.http()
            .post_for_id(&hrefs::server_template_action(id, "publish"), &form)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_trait::Resource;

    #[test]
    fn decodes_inputs_view() {
        let template: ServerTemplate = serde_json::from_str(
            r#"{
                "name": "Base ServerTemplate for Linux",
                "revision": 14,
                "description": "Linux base",
                "inputs": [{"name": "SYS_TZ", "value": "text:UTC"}],
                "links": [
                    {"rel": "self", "href": "/api/server_templates/301"},
                    {"rel": "default_multi_cloud_image", "href": "/api/multi_cloud_images/77"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(template.revision, 14);
        assert_eq!(template.inputs[0].name, "SYS_TZ");
        assert!(template.tags.is_empty());
        assert_eq!(template.id(), Some("301"));
    }

    #[test]
    fn publish_form_order_and_keys() {
        let request = PublishServerTemplate {
            account_group_ids: vec!["11".into(), "12".into()],
            allow_comments: true,
            descriptions: Some(PublishDescriptions {
                long: Some("long text".into()),
                short: Some("short".into()),
                notes: None,
            }),
            email_comments: false,
            categories: vec!["Database".into()],
        };
        let form = request.to_form();
        assert_eq!(
            form.get_all("account_group_hrefs[]"),
            vec!["/api/account_groups/11", "/api/account_groups/12"]
        );
        assert_eq!(form.get("allow_comments"), Some("true"));
        assert_eq!(form.get("categories[]"), Some("Database"));
        assert_eq!(form.get("descriptions[short]"), Some("short"));
        assert_eq!(form.get("descriptions[notes]"), None);
        assert_eq!(form.get("email_comments"), Some("false"));
    }

    #[test]
    fn name_form_skips_unset_fields() {
        let form = name_form(None, Some("new description"));
        assert_eq!(form.get("server_template[name]"), None);
        assert_eq!(form.get("server_template[description]"), Some("new description"));
        assert!(name_form(None, None).is_empty());
    }
}
