//! Backups
//!
//! A Backup groups the volume snapshots taken together for one lineage.
//! See: https://reference.rightscale.com/api1.5/resources/ResourceBackups.html

use crate::client::RightScaleClient;
use crate::common::filter::Filter;
use crate::common::params::Params;
use crate::common::validation::{check_filters, check_numeric, require_value};
use crate::common::{timestamp, Link};
use crate::error::RightScaleError;
use crate::hrefs;
use crate::resource_trait::impl_resource;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Filters accepted by [`RightScaleClient::index_backups`]
pub const BACKUP_FILTERS: &[&str] = &["cloud_href", "committed", "completed", "from_master", "latest_before"];

/// Snapshot entry embedded in a Backup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupVolumeSnapshot {
    pub href: Option<String>,
    /// Position of the volume in the backup (string or number depending on cloud)
    pub position: Option<serde_json::Value>,
    pub size: Option<serde_json::Value>,
}

/// Backup model matching the Backup media type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Backup {
    pub name: String,
    pub lineage: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub volume_snapshots: Vec<BackupVolumeSnapshot>,
    pub volume_snapshot_count: u32,
    pub completed: bool,
    pub committed: bool,
    pub from_master: bool,
    pub links: Vec<Link>,
}

impl_resource!(Backup => "Backup");

impl Backup {
    /// Parsed `created_at`
    pub fn created(&self) -> Option<DateTime<FixedOffset>> {
        self.created_at.as_deref().and_then(timestamp::parse)
    }
}

/// Request body for [`RightScaleClient::create_backup`]
#[derive(Debug, Clone)]
pub struct CreateBackup {
    pub name: String,
    pub lineage: String,
    /// Hrefs of the volume attachments to snapshot; at least one
    pub volume_attachment_hrefs: Vec<String>,
    pub description: Option<String>,
    /// Whether the backup is taken from the master server
    pub from_master: bool,
}

impl CreateBackup {
    /// Backup of the given volume attachment hrefs
    pub fn new(name: impl Into<String>, lineage: impl Into<String>, volume_attachment_hrefs: Vec<String>) -> Self {
        Self {
            name: name.into(),
            lineage: lineage.into(),
            volume_attachment_hrefs,
            description: None,
            from_master: true,
        }
    }

    /// Backup of volume attachments `attachment_ids` in cloud `cloud_id`
    pub fn of_attachments(
        name: impl Into<String>,
        lineage: impl Into<String>,
        cloud_id: &str,
        attachment_ids: &[&str],
    ) -> Self {
        let attachment_hrefs = attachment_ids
            .iter()
            .map(|id| hrefs::volume_attachment(cloud_id, id))
            .collect();
        Self::new(name, lineage, attachment_hrefs)
    }
}

/// Retention policy for [`RightScaleClient::cleanup_backups`]
///
/// Unset counts are left to the API defaults.
#[derive(Debug, Clone, Default)]
pub struct CleanupBackups {
    pub lineage: String,
    pub keep_last: u32,
    pub cloud_id: Option<String>,
    pub dailies: Option<u32>,
    pub weeklies: Option<u32>,
    pub monthlies: Option<u32>,
    pub yearlies: Option<u32>,
}

/// Parameters for [`RightScaleClient::restore_backup`]
#[derive(Debug, Clone, Default)]
pub struct RestoreBackup {
    /// Href of the instance the volumes are restored onto
    pub instance_href: String,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Volume size in GB
    pub size: Option<u32>,
    pub volume_type_href: Option<String>,
    pub iops: Option<u32>,
}

impl RestoreBackup {
    /// Restore onto instance `instance_id` in cloud `cloud_id`
    pub fn onto(cloud_id: &str, instance_id: &str) -> Self {
        Self {
            instance_href: hrefs::instance(cloud_id, instance_id),
            ..Self::default()
        }
    }

    /// Restore onto volumes of type `volume_type_id`
    pub fn with_volume_type(mut self, cloud_id: &str, volume_type_id: &str) -> Self {
        self.volume_type_href = Some(hrefs::volume_type(cloud_id, volume_type_id));
        self
    }
}

impl RightScaleClient {
    /// Get a backup by ID
    ///
    /// # Arguments
    /// * `id` - Backup ID (numeric)
    pub async fn show_backup(&self, id: &str) -> Result<Backup, RightScaleError> {
        check_numeric("backup id", id)?;
        debug!("Fetching backup {}", id);
        self.fetch(&hrefs::backup(id), &Params::new()).await
    }

    /// List the backups of a lineage
    ///
    /// If a `latest_before` filter is given the API returns only the latest
    /// backup before that timestamp.
    ///
    /// # Arguments
    /// * `lineage` - Lineage to list; required
    /// * `filters` - Filters from [`BACKUP_FILTERS`]
    pub async fn index_backups(&self, lineage: &str, filters: &[Filter]) -> Result<Vec<Backup>, RightScaleError> {
        require_value("lineage", lineage)?;
        check_filters(BACKUP_FILTERS, filters)?;

        let mut query = Params::new();
        query.push_filters(filters).push("lineage", lineage);

        debug!("Querying backups of lineage {} with filters: {:?}", lineage, filters);
        self.list(hrefs::BACKUPS, &query).await
    }

    /// Take a backup of the given volume attachments
    ///
    /// # Returns
    /// * `Ok(String)` - ID of the new backup
    pub async fn create_backup(&self, request: &CreateBackup) -> Result<String, RightScaleError> {
        require_value("name", &request.name)?;
        require_value("lineage", &request.lineage)?;
        if request.volume_attachment_hrefs.is_empty() {
            return Err(RightScaleError::MissingParameter("volume_attachment_hrefs".to_string()));
        }

        let mut form = Params::new();
        form.push("backup[name]", request.name.as_str())
            .push("backup[lineage]", request.lineage.as_str());
        for href in &request.volume_attachment_hrefs {
            form.push("backup[volume_attachment_hrefs][]", href.as_str());
        }
        form.push_opt("backup[description]", request.description.as_deref())
            .push_bool("backup[from_master]", request.from_master);

        debug!("Creating backup {} in lineage {}", request.name, request.lineage);
        self.http().post_for_id(hrefs::BACKUPS, &form).await
    }

    /// Mark a backup committed or uncommitted
    pub async fn update_backup(&self, id: &str, committed: bool) -> Result<(), RightScaleError> {
        require_value("backup id", id)?;
        let mut form = Params::new();
        form.push_bool("backup[committed]", committed);

        debug!("Updating backup {}: committed={}", id, committed);
        self.http().put(&hrefs::backup(id), &form).await
    }

    /// Delete old backups of a lineage according to a retention policy
    pub async fn cleanup_backups(&self, policy: &CleanupBackups) -> Result<(), RightScaleError> {
        require_value("lineage", &policy.lineage)?;

        let mut form = Params::new();
        form.push("keep_last", policy.keep_last.to_string())
            .push_opt("cloud_href", policy.cloud_id.as_deref().map(hrefs::cloud))
            .push_opt("dailies", policy.dailies)
            .push("lineage", policy.lineage.as_str())
            .push_opt("monthlies", policy.monthlies)
            .push_opt("weeklies", policy.weeklies)
            .push_opt("yearlies", policy.yearlies);

        debug!("Cleaning up backups of lineage {}", policy.lineage);
        self.http().post(hrefs::BACKUP_CLEANUP, &form).await?;
        Ok(())
    }

    /// Delete a backup
    pub async fn destroy_backup(&self, id: &str) -> Result<(), RightScaleError> {
        require_value("backup id", id)?;
        debug!("Deleting backup {}", id);
        self.http().delete(&hrefs::backup(id)).await
    }

    /// Restore a backup onto an instance
    ///
    /// # Returns
    /// * `Ok(String)` - ID of the restore task
    pub async fn restore_backup(&self, id: &str, request: &RestoreBackup) -> Result<String, RightScaleError> {
        require_value("backup id", id)?;
        require_value("instance_href", &request.instance_href)?;

        let mut form = Params::new();
        form.push_opt("backup[description]", request.description.as_deref())
            .push_opt("backup[iops]", request.iops)
            .push_opt("backup[name]", request.name.as_deref())
            .push_opt("backup[size]", request.size)
            .push_opt("backup[volume_type_href]", request.volume_type_href.as_deref())
            .push("instance_href", request.instance_href.as_str());

        debug!("Restoring backup {} onto {}", id, request.instance_href);
        self.http().post_for_id(&hrefs::backup_restore(id), &form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_trait::Resource;

    #[test]
    fn decodes_backup_media_type() {
        let backup: Backup = serde_json::from_str(
            r#"{
                "name": "db nightly",
                "lineage": "db-prod",
                "description": null,
                "created_at": "2013/03/06 19:50:00 +0000",
                "volume_snapshots": [{"position": "1", "size": 10, "href": "/api/clouds/1/volume_snapshots/S1"}],
                "volume_snapshot_count": 1,
                "completed": true,
                "committed": false,
                "from_master": true,
                "links": [{"rel": "self", "href": "/api/backups/991"}]
            }"#,
        )
        .unwrap();
        assert_eq!(backup.lineage, "db-prod");
        assert!(backup.completed);
        assert!(!backup.committed);
        assert_eq!(backup.volume_snapshots.len(), 1);
        assert_eq!(backup.id(), Some("991"));
        assert!(backup.created().is_some());
    }

    #[test]
    fn restore_target_href() {
        let request = RestoreBackup::onto("6", "ABC").with_volume_type("6", "VT2");
        assert_eq!(request.instance_href, "/api/clouds/6/instances/ABC");
        assert_eq!(request.volume_type_href.as_deref(), Some("/api/clouds/6/volume_types/VT2"));
    }

    #[test]
    fn backup_of_attachments() {
        let request = CreateBackup::of_attachments("nightly", "db-prod", "6", &["VA1", "VA2"]);
        assert_eq!(request.volume_attachment_hrefs[1], "/api/clouds/6/volume_attachments/VA2");
        assert!(request.from_master);
    }
}
