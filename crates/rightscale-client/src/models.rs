//! RightScale media types reached through relationships
//!
//! These are the records returned when following a link from one of the
//! primary resources (a Cloud's instances, a ServerTemplate's
//! MultiCloudImages, ...). Fields follow the API 1.5 media type reference;
//! everything the API may omit under a narrower view is optional.

use crate::common::{Action, Link};
use crate::resource_trait::impl_resource;
use serde::{Deserialize, Serialize};

/// Tag attached to a resource (`namespace:predicate=value`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Tags for one resource, as returned by `tags/by_resource`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceTags {
    pub tags: Vec<Tag>,
    pub links: Vec<Link>,
}

impl ResourceTags {
    /// Href of the resource these tags belong to
    pub fn resource_href(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel == "resource")
            .map(|link| link.href.as_str())
    }
}

/// Account a user can open a session against
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub name: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub links: Vec<Link>,
}

/// Input name/value pair on a ServerTemplate or RightScript
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Input {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Instance {
    pub name: String,
    pub resource_uid: Option<String>,
    pub state: Option<String>,
    pub public_ip_addresses: Vec<String>,
    pub private_ip_addresses: Vec<String>,
    pub public_dns_names: Vec<String>,
    pub private_dns_names: Vec<String>,
    pub os_platform: Option<String>,
    pub pricing_type: Option<String>,
    pub locked: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub links: Vec<Link>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataCenter {
    pub name: String,
    pub description: Option<String>,
    pub resource_uid: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeSnapshot {
    pub name: String,
    pub description: Option<String>,
    pub resource_uid: Option<String>,
    pub size: Option<u64>,
    pub state: Option<String>,
    pub progress: Option<u32>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeType {
    pub name: String,
    pub description: Option<String>,
    pub resource_uid: Option<String>,
    pub size: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SshKey {
    pub resource_uid: Option<String>,
    pub material: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurringVolumeAttachment {
    pub name: Option<String>,
    pub device: Option<String>,
    pub size: Option<String>,
    pub runnable_type: Option<String>,
    pub storage_type: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeAttachment {
    pub device: Option<String>,
    pub device_id: Option<String>,
    pub resource_uid: Option<String>,
    pub state: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Volume {
    pub name: String,
    pub description: Option<String>,
    pub resource_uid: Option<String>,
    pub size: Option<u64>,
    pub status: Option<String>,
    pub iops: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub name: String,
    pub description: Option<String>,
    pub resource_uid: Option<String>,
    pub cpu_architecture: Option<String>,
    pub image_type: Option<String>,
    pub os_platform: Option<String>,
    pub visibility: Option<String>,
    pub virtualization_type: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiCloudImage {
    pub name: String,
    pub description: Option<String>,
    pub revision: Option<u32>,
    pub links: Vec<Link>,
}

/// Monitoring alert definition attached to a ServerTemplate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertSpec {
    pub name: String,
    pub description: Option<String>,
    pub file: Option<String>,
    pub variable: Option<String>,
    pub condition: Option<String>,
    pub threshold: Option<String>,
    pub duration: Option<u32>,
    pub escalation_name: Option<String>,
    pub vote_type: Option<String>,
    pub vote_tag: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub links: Vec<Link>,
}

/// MultiCloud Marketplace publication of a ServerTemplate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Publication {
    pub name: String,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub revision: Option<u32>,
    pub revision_notes: Option<String>,
    pub content_type: Option<String>,
    pub commit_message: Option<serde_json::Value>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityGroup {
    pub name: String,
    pub description: Option<String>,
    pub resource_uid: Option<String>,
    pub links: Vec<Link>,
}

impl_resource! {
    ResourceTags => "ResourceTags",
    Account => "Account",
    Instance => "Instance",
    DataCenter => "DataCenter",
    VolumeSnapshot => "VolumeSnapshot",
    VolumeType => "VolumeType",
    SshKey => "SshKey",
    RecurringVolumeAttachment => "RecurringVolumeAttachment",
    VolumeAttachment => "VolumeAttachment",
    Volume => "Volume",
    Image => "Image",
    MultiCloudImage => "MultiCloudImage",
    AlertSpec => "AlertSpec",
    Publication => "Publication",
    SecurityGroup => "SecurityGroup",
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_trait::Resource;

    #[test]
    fn instance_decodes_with_links() {
        let instance: Instance = serde_json::from_str(
            r#"{
                "name": "web-1",
                "resource_uid": "i-0abc",
                "state": "operational",
                "public_ip_addresses": ["54.1.2.3"],
                "links": [
                    {"rel": "self", "href": "/api/clouds/1/instances/ABC"},
                    {"rel": "cloud", "href": "/api/clouds/1"}
                ],
                "actions": [{"rel": "terminate"}]
            }"#,
        )
        .unwrap();
        assert_eq!(instance.name, "web-1");
        assert_eq!(instance.public_ip_addresses, vec!["54.1.2.3"]);
        assert_eq!(instance.id(), Some("ABC"));
        assert_eq!(instance.link("cloud"), Some("/api/clouds/1"));
        assert_eq!(instance.actions[0].rel, "terminate");
    }

    #[test]
    fn resource_tags_point_at_resource() {
        let tags: ResourceTags = serde_json::from_str(
            r#"{"tags": [{"name": "rs_login:state=restricted"}],
                "links": [{"rel": "resource", "href": "/api/server_templates/7"}]}"#,
        )
        .unwrap();
        assert_eq!(tags.resource_href(), Some("/api/server_templates/7"));
        assert_eq!(tags.tags, vec![Tag::new("rs_login:state=restricted")]);
    }
}
