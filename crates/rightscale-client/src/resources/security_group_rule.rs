//! Security group rules
//!
//! Rules are addressable both under their security group
//! (`/api/clouds/{cloud}/security_groups/{sg}/security_group_rules`) and
//! at the flat `/api/security_group_rules` collection.
//! See: https://reference.rightscale.com/api1.5/resources/ResourceSecurityGroupRules.html

use crate::client::RightScaleClient;
use crate::common::params::Params;
use crate::common::validation::{check_choice, require_value, resolve_view};
use crate::common::Link;
use crate::error::RightScaleError;
use crate::hrefs;
use crate::models::SecurityGroup;
use crate::resource_trait::impl_resource;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Views accepted by the rule calls
pub const SECURITY_GROUP_RULE_VIEWS: &[&str] = &["default"];
/// Protocols a rule may open
pub const RULE_PROTOCOLS: &[&str] = &["tcp", "udp", "icmp"];
/// Ways a rule names its traffic source
pub const RULE_SOURCE_TYPES: &[&str] = &["cidr_ips", "group"];

/// SecurityGroupRule model matching the SecurityGroupRule media type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityGroupRule {
    pub cidr_ips: Option<String>,
    pub protocol: Option<String>,
    pub start_port: Option<String>,
    pub end_port: Option<String>,
    pub links: Vec<Link>,
}

impl_resource!(SecurityGroupRule => "SecurityGroupRule");

impl SecurityGroupRule {
    /// Security group owning this rule
    pub async fn security_group(&self, client: &RightScaleClient) -> Result<SecurityGroup, RightScaleError> {
        client.follow(self, "security_group").await
    }
}

/// Rule definition for the create calls
///
/// `protocol` is one of [`RULE_PROTOCOLS`] and `source_type` one of
/// [`RULE_SOURCE_TYPES`]. Port fields apply to tcp/udp, ICMP fields to icmp.
#[derive(Debug, Clone, Default)]
pub struct NewSecurityGroupRule {
    pub protocol: String,
    pub source_type: String,
    pub cidr_ips: Option<String>,
    pub group_name: Option<String>,
    pub group_owner: Option<String>,
    pub start_port: Option<String>,
    pub end_port: Option<String>,
    pub icmp_code: Option<String>,
    pub icmp_type: Option<String>,
}

impl NewSecurityGroupRule {
    /// Rule with only the protocol and source type set
    pub fn new(protocol: impl Into<String>, source_type: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            source_type: source_type.into(),
            ..Self::default()
        }
    }

    /// tcp/udp rule open to a CIDR range
    pub fn cidr(protocol: impl Into<String>, cidr_ips: impl Into<String>, start_port: u16, end_port: u16) -> Self {
        Self {
            cidr_ips: Some(cidr_ips.into()),
            start_port: Some(start_port.to_string()),
            end_port: Some(end_port.to_string()),
            ..Self::new(protocol, "cidr_ips")
        }
    }

    fn validate(&self) -> Result<(), RightScaleError> {
        require_value("protocol", &self.protocol)?;
        require_value("source_type", &self.source_type)?;
        check_choice("protocol", RULE_PROTOCOLS, &self.protocol)?;
        check_choice("source_type", RULE_SOURCE_TYPES, &self.source_type)
    }

    fn to_form(&self, security_group_href: &str) -> Params {
        let mut form = Params::new();
        form.push_opt("security_group_rule[cidr_ips]", self.cidr_ips.as_deref())
            .push_opt("security_group_rule[group_name]", self.group_name.as_deref())
            .push_opt("security_group_rule[group_owner]", self.group_owner.as_deref())
            .push("security_group_rule[protocol]", self.protocol.as_str())
            .push_opt("security_group_rule[protocol_details][end_port]", self.end_port.as_deref())
            .push_opt("security_group_rule[protocol_details][icmp_code]", self.icmp_code.as_deref())
            .push_opt("security_group_rule[protocol_details][icmp_type]", self.icmp_type.as_deref())
            .push_opt("security_group_rule[protocol_details][start_port]", self.start_port.as_deref())
            .push("security_group_rule[security_group_href]", security_group_href)
            .push("security_group_rule[source_type]", self.source_type.as_str());
        form
    }
}

impl RightScaleClient {
    /// List the rules of a security group
    pub async fn index_security_group_rules(
        &self,
        cloud_id: &str,
        security_group_id: &str,
        view: Option<&str>,
    ) -> Result<Vec<SecurityGroupRule>, RightScaleError> {
        require_value("cloud id", cloud_id)?;
        require_value("security group id", security_group_id)?;
        let view = resolve_view(SECURITY_GROUP_RULE_VIEWS, view)?;

        let mut query = Params::new();
        query.push("view", view);

        debug!("Querying rules of security group {} in cloud {}", security_group_id, cloud_id);
        self.list(&hrefs::security_group_rules(cloud_id, security_group_id), &query)
            .await
    }

    /// Get a rule by ID under its security group
    pub async fn show_security_group_rule(
        &self,
        cloud_id: &str,
        security_group_id: &str,
        id: &str,
        view: Option<&str>,
    ) -> Result<SecurityGroupRule, RightScaleError> {
        require_value("cloud id", cloud_id)?;
        require_value("security group id", security_group_id)?;
        require_value("security group rule id", id)?;
        self.show_security_group_rule_href(&hrefs::security_group_rule(cloud_id, security_group_id, id), view)
            .await
    }

    /// Get a rule by its full href
    pub async fn show_security_group_rule_href(
        &self,
        href: &str,
        view: Option<&str>,
    ) -> Result<SecurityGroupRule, RightScaleError> {
        require_value("security group rule href", href)?;
        let view = resolve_view(SECURITY_GROUP_RULE_VIEWS, view)?;

        let mut query = Params::new();
        query.push("view", view);

        debug!("Fetching security group rule {}", href);
        self.fetch(href, &query).await
    }

    /// Create a rule under a security group
    ///
    /// # Returns
    /// * `Ok(String)` - ID of the new rule
    pub async fn create_security_group_rule(
        &self,
        cloud_id: &str,
        security_group_id: &str,
        rule: &NewSecurityGroupRule,
    ) -> Result<String, RightScaleError> {
        require_value("cloud id", cloud_id)?;
        require_value("security group id", security_group_id)?;
        rule.validate()?;

        let form = rule.to_form(&hrefs::security_group(cloud_id, security_group_id));
        debug!(
            "Creating {} rule in security group {} of cloud {}",
            rule.protocol, security_group_id, cloud_id
        );
        self.http()
            .post_for_id(&hrefs::security_group_rules(cloud_id, security_group_id), &form)
            .await
    }

    /// Create a rule at the flat collection
    pub async fn create_security_group_rule_flat(
        &self,
        security_group_href: &str,
        rule: &NewSecurityGroupRule,
    ) -> Result<String, RightScaleError> {
        require_value("security group href", security_group_href)?;
        rule.validate()?;

        let form = rule.to_form(security_group_href);
        debug!("Creating {} rule in security group {}", rule.protocol, security_group_href);
        self.http().post_for_id(hrefs::SECURITY_GROUP_RULES, &form).await
    }

    /// Delete a rule by ID at the flat collection
    pub async fn destroy_security_group_rule(&self, id: &str) -> Result<(), RightScaleError> {
        require_value("security group rule id", id)?;
        debug!("Deleting security group rule {}", id);
        self.http().delete(&hrefs::flat_security_group_rule(id)).await
    }

    /// Delete a rule under its security group
    pub async fn destroy_security_group_rule_nested(
        &self,
        cloud_id: &str,
        security_group_id: &str,
        id: &str,
    ) -> Result<(), RightScaleError> {
        require_value("cloud id", cloud_id)?;
        require_value("security group id", security_group_id)?;
        require_value("security group rule id", id)?;
        debug!("Deleting rule {} of security group {}", id, security_group_id);
        self.http()
            .delete(&hrefs::security_group_rule(cloud_id, security_group_id, id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cidr_rule_form() {
        let rule = NewSecurityGroupRule::cidr("tcp", "0.0.0.0/0", 22, 22);
        rule.validate().unwrap();

        let form = rule.to_form("/api/clouds/1/security_groups/SG1");
        assert_eq!(form.get("security_group_rule[protocol]"), Some("tcp"));
        assert_eq!(form.get("security_group_rule[source_type]"), Some("cidr_ips"));
        assert_eq!(form.get("security_group_rule[protocol_details][start_port]"), Some("22"));
        assert_eq!(
            form.get("security_group_rule[security_group_href]"),
            Some("/api/clouds/1/security_groups/SG1")
        );
        assert_eq!(form.get("security_group_rule[group_name]"), None);
        assert_eq!(form.get("security_group_rule[protocol_details][icmp_code]"), None);
    }

    #[test]
    fn protocol_and_source_type_are_checked() {
        assert!(NewSecurityGroupRule::new("gre", "cidr_ips").validate().is_err());
        assert!(NewSecurityGroupRule::new("icmp", "anywhere").validate().is_err());
        assert!(matches!(
            NewSecurityGroupRule::new("", "group").validate(),
            Err(RightScaleError::MissingParameter(_))
        ));
        assert!(NewSecurityGroupRule::new("udp", "group").validate().is_ok());
    }
}
