//! API 1.5 href templates
//!
//! Every href the client builds comes from here so the URL layout lives in
//! one place.

pub const SESSION: &str = "/api/session";
pub const SESSION_ACCOUNTS: &str = "/api/session/accounts";
pub const SESSION_INSTANCE: &str = "/api/session/instance";

pub const BACKUPS: &str = "/api/backups";
pub const BACKUP_CLEANUP: &str = "/api/backups/actions/cleanup";
pub const CLOUDS: &str = "/api/clouds";
pub const NETWORKS: &str = "/api/networks";
pub const RIGHT_SCRIPTS: &str = "/api/right_scripts";
pub const SECURITY_GROUP_RULES: &str = "/api/security_group_rules";
pub const SERVER_TEMPLATES: &str = "/api/server_templates";
pub const SERVER_TEMPLATE_MULTI_CLOUD_IMAGES: &str = "/api/server_template_multi_cloud_images";

pub const TAGS_BY_RESOURCE: &str = "/api/tags/by_resource";
pub const TAGS_MULTI_ADD: &str = "/api/tags/multi_add";
pub const TAGS_MULTI_DELETE: &str = "/api/tags/multi_delete";

/// Last path segment of an href, i.e. the resource id
pub fn id_from_href(href: &str) -> &str {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}

pub fn account(id: &str) -> String {
    format!("/api/accounts/{id}")
}

pub fn account_group(id: &str) -> String {
    format!("/api/account_groups/{id}")
}

pub fn backup(id: &str) -> String {
    format!("{BACKUPS}/{id}")
}

pub fn backup_restore(id: &str) -> String {
    format!("{BACKUPS}/{id}/restore")
}

pub fn cloud(id: &str) -> String {
    format!("{CLOUDS}/{id}")
}

pub fn instance(cloud_id: &str, id: &str) -> String {
    format!("{CLOUDS}/{cloud_id}/instances/{id}")
}

pub fn instance_types(cloud_id: &str) -> String {
    format!("{CLOUDS}/{cloud_id}/instance_types")
}

pub fn instance_type(cloud_id: &str, id: &str) -> String {
    format!("{CLOUDS}/{cloud_id}/instance_types/{id}")
}

pub fn ip_addresses(cloud_id: &str) -> String {
    format!("{CLOUDS}/{cloud_id}/ip_addresses")
}

pub fn ip_address(cloud_id: &str, id: &str) -> String {
    format!("{CLOUDS}/{cloud_id}/ip_addresses/{id}")
}

pub fn ip_address_bindings(cloud_id: &str) -> String {
    format!("{CLOUDS}/{cloud_id}/ip_address_bindings")
}

pub fn ip_address_binding(cloud_id: &str, id: &str) -> String {
    format!("{CLOUDS}/{cloud_id}/ip_address_bindings/{id}")
}

pub fn ip_address_bindings_for(cloud_id: &str, ip_address_id: &str) -> String {
    format!("{CLOUDS}/{cloud_id}/ip_addresses/{ip_address_id}/ip_address_bindings")
}

pub fn ip_address_binding_for(cloud_id: &str, ip_address_id: &str, id: &str) -> String {
    format!("{CLOUDS}/{cloud_id}/ip_addresses/{ip_address_id}/ip_address_bindings/{id}")
}

pub fn multi_cloud_image(id: &str) -> String {
    format!("/api/multi_cloud_images/{id}")
}

pub fn network(id: &str) -> String {
    format!("{NETWORKS}/{id}")
}

pub fn right_script(id: &str) -> String {
    format!("{RIGHT_SCRIPTS}/{id}")
}

pub fn security_group(cloud_id: &str, id: &str) -> String {
    format!("{CLOUDS}/{cloud_id}/security_groups/{id}")
}

pub fn security_group_rules(cloud_id: &str, security_group_id: &str) -> String {
    format!("{}/security_group_rules", security_group(cloud_id, security_group_id))
}

pub fn security_group_rule(cloud_id: &str, security_group_id: &str, id: &str) -> String {
    format!("{}/security_group_rules/{id}", security_group(cloud_id, security_group_id))
}

pub fn flat_security_group_rule(id: &str) -> String {
    format!("{SECURITY_GROUP_RULES}/{id}")
}

pub fn server_template(id: &str) -> String {
    format!("{SERVER_TEMPLATES}/{id}")
}

pub fn server_template_action(id: &str, action: &str) -> String {
    format!("{SERVER_TEMPLATES}/{id}/{action}")
}

pub fn server_template_multi_cloud_image(id: &str) -> String {
    format!("{SERVER_TEMPLATE_MULTI_CLOUD_IMAGES}/{id}")
}

pub fn server_template_multi_cloud_image_make_default(id: &str) -> String {
    format!("{SERVER_TEMPLATE_MULTI_CLOUD_IMAGES}/{id}/make_default")
}

pub fn volume_type(cloud_id: &str, id: &str) -> String {
    format!("{CLOUDS}/{cloud_id}/volume_types/{id}")
}

pub fn volume_attachment(cloud_id: &str, id: &str) -> String {
    format!("{CLOUDS}/{cloud_id}/volume_attachments/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_last_segment() {
        assert_eq!(id_from_href("/api/backups/123"), "123");
        assert_eq!(id_from_href("https://my.rightscale.com/api/clouds/1/ip_addresses/ABC/"), "ABC");
        assert_eq!(id_from_href("/api/server_templates/77?view=default"), "77");
        assert_eq!(id_from_href("42"), "42");
    }

    #[test]
    fn nested_templates() {
        assert_eq!(
            security_group_rule("1", "SG1", "R9"),
            "/api/clouds/1/security_groups/SG1/security_group_rules/R9"
        );
        assert_eq!(
            ip_address_binding_for("6", "IP", "B"),
            "/api/clouds/6/ip_addresses/IP/ip_address_bindings/B"
        );
        assert_eq!(server_template_action("5", "clone"), "/api/server_templates/5/clone");
    }
}
