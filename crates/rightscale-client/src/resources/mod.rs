//! Typed RightScale resources
//!
//! Each module holds one media type and the `RightScaleClient` operations
//! for its collection.

pub mod backup;
pub mod cloud;
pub mod instance_type;
pub mod ip_address;
pub mod ip_address_binding;
pub mod network;
pub mod right_script;
pub mod security_group_rule;
pub mod server_template;
pub mod server_template_multi_cloud_image;
pub mod session;

pub use backup::{Backup, BackupVolumeSnapshot, CleanupBackups, CreateBackup, RestoreBackup};
pub use cloud::Cloud;
pub use instance_type::InstanceType;
pub use ip_address::IpAddress;
pub use ip_address_binding::{CreateIpAddressBinding, IpAddressBinding};
pub use network::Network;
pub use right_script::RightScript;
pub use security_group_rule::{NewSecurityGroupRule, SecurityGroupRule};
pub use server_template::{PublishDescriptions, PublishServerTemplate, ServerTemplate};
pub use server_template_multi_cloud_image::ServerTemplateMultiCloudImage;
pub use session::Session;
