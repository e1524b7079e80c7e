//! RightScale API client
//!
//! `RightScaleClient` owns the HTTP session (cookies set at login) and the
//! configuration. Resource operations live next to their media types in
//! [`crate::resources`], each as an `impl RightScaleClient` block.

use crate::common::params::Params;
use crate::common::HttpClient;
use crate::config::ClientConfig;
use crate::error::RightScaleError;
use crate::models::{ResourceTags, Tag};
use crate::resource_trait::{Resource, Taggable};
use crate::hrefs;
use serde::de::DeserializeOwned;
use tracing::debug;

/// RightScale API client
#[derive(Debug)]
pub struct RightScaleClient {
    http: HttpClient,
    config: ClientConfig,
}

impl RightScaleClient {
    /// Create a new client
    ///
    /// No request is made; call one of the session methods
    /// ([`RightScaleClient::login`], [`RightScaleClient::login_instance`])
    /// or use [`RightScaleClient::connect`] before touching resources.
    pub fn new(config: ClientConfig) -> Result<Self, RightScaleError> {
        let http = HttpClient::new(&config)?;
        Ok(Self { http, config })
    }

    /// Client for `api_url` with default settings
    pub fn with_url(api_url: impl Into<String>) -> Result<Self, RightScaleError> {
        Self::new(ClientConfig::new(api_url))
    }

    /// Get the base URL; follows the shard the API redirected the session to
    pub fn base_url(&self) -> String {
        self.http.base_url()
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &HttpClient {
        &self.http
    }

    /// GET a list of resources
    pub(crate) async fn list<T: DeserializeOwned>(&self, path: &str, query: &Params) -> Result<Vec<T>, RightScaleError> {
        self.http.get(path, query).await
    }

    /// GET a single resource
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, path: &str, query: &Params) -> Result<T, RightScaleError> {
        self.http.get(path, query).await
    }

    /// Follow a link that points at a single resource
    ///
    /// # Arguments
    /// * `from` - Resource carrying the link
    /// * `rel` - Link relation, e.g. `"cloud"`
    ///
    /// # Returns
    /// * `Ok(T)` - The linked resource
    /// * `Err(RightScaleError::MissingLink)` - `from` has no such link; nothing was sent
    pub async fn follow<T: Resource, R: Resource>(&self, from: &R, rel: &str) -> Result<T, RightScaleError> {
        let href = link_or_err(from, rel)?;
        debug!("Following {} '{}' link to {}", R::KIND, rel, href);
        self.fetch(href, &Params::new()).await
    }

    /// Follow a link that points at a collection
    pub async fn follow_list<T: Resource, R: Resource>(&self, from: &R, rel: &str) -> Result<Vec<T>, RightScaleError> {
        let href = link_or_err(from, rel)?;
        debug!("Following {} '{}' link to {}", R::KIND, rel, href);
        self.list(href, &Params::new()).await
    }

    /// Fetch the tags of each resource in `resource_hrefs`
    pub async fn tags_by_resource(&self, resource_hrefs: &[&str]) -> Result<Vec<ResourceTags>, RightScaleError> {
        if resource_hrefs.is_empty() {
            return Ok(Vec::new());
        }

        let mut form = Params::new();
        for href in resource_hrefs {
            form.push("resource_hrefs[]", *href);
        }

        debug!("Fetching tags for {} resources", resource_hrefs.len());
        let response = self.http.post(hrefs::TAGS_BY_RESOURCE, &form).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Attach `tags` to every resource in `resource_hrefs`
    pub async fn add_tags(&self, resource_hrefs: &[&str], tags: &[Tag]) -> Result<(), RightScaleError> {
        let form = tag_form(resource_hrefs, tags)?;
        self.http.post(hrefs::TAGS_MULTI_ADD, &form).await?;
        Ok(())
    }

    /// Remove `tags` from every resource in `resource_hrefs`
    pub async fn remove_tags(&self, resource_hrefs: &[&str], tags: &[Tag]) -> Result<(), RightScaleError> {
        let form = tag_form(resource_hrefs, tags)?;
        self.http.post(hrefs::TAGS_MULTI_DELETE, &form).await?;
        Ok(())
    }

    /// Fill in the tags of a taggable resource
    pub async fn populate_tags<T: Taggable>(&self, resource: &mut T) -> Result<(), RightScaleError> {
        let href = link_or_err(resource, "self")?.to_string();
        let tags = self
            .tags_by_resource(&[href.as_str()])
            .await?
            .into_iter()
            .flat_map(|entry| entry.tags)
            .collect();
        resource.set_tags(tags);
        Ok(())
    }

    /// Apply `auto_populate_tags` to freshly decoded resources
    pub(crate) async fn auto_tag<T: Taggable>(&self, resources: &mut [T]) -> Result<(), RightScaleError> {
        if !self.config.auto_populate_tags {
            return Ok(());
        }
        for resource in resources.iter_mut() {
            self.populate_tags(resource).await?;
        }
        Ok(())
    }
}

fn link_or_err<'a, R: Resource>(from: &'a R, rel: &str) -> Result<&'a str, RightScaleError> {
    from.link(rel).ok_or_else(|| RightScaleError::MissingLink {
        kind: R::KIND,
        rel: rel.to_string(),
    })
}

fn tag_form(resource_hrefs: &[&str], tags: &[Tag]) -> Result<Params, RightScaleError> {
    if resource_hrefs.is_empty() {
        return Err(RightScaleError::MissingParameter("resource_hrefs".to_string()));
    }
    if tags.is_empty() {
        return Err(RightScaleError::MissingParameter("tags".to_string()));
    }

    let mut form = Params::new();
    for href in resource_hrefs {
        form.push("resource_hrefs[]", *href);
    }
    for tag in tags {
        form.push("tags[]", tag.name.as_str());
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DataCenter;

    #[test]
    fn trailing_slash_is_stripped() {
        let client = RightScaleClient::with_url("http://localhost:3000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.config().api_version, "1.5");
    }

    #[tokio::test]
    async fn following_a_missing_link_sends_nothing() {
        // Nothing listens on this port; reaching the network would be an Http error.
        let client = RightScaleClient::with_url("http://127.0.0.1:9").unwrap();
        let dc = DataCenter::default();
        let err = client.follow::<crate::models::Instance, _>(&dc, "cloud").await.unwrap_err();
        assert!(matches!(err, RightScaleError::MissingLink { kind: "DataCenter", ref rel } if rel == "cloud"));
    }

    #[test]
    fn tag_form_requires_hrefs_and_tags() {
        assert!(tag_form(&[], &[Tag::new("a:b=c")]).is_err());
        assert!(tag_form(&["/api/networks/1"], &[]).is_err());

        let form = tag_form(&["/api/networks/1"], &[Tag::new("a:b=c"), Tag::new("x:y=z")]).unwrap();
        assert_eq!(form.get_all("tags[]"), vec!["a:b=c", "x:y=z"]);
        assert_eq!(form.get("resource_hrefs[]"), Some("/api/networks/1"));
    }
}
