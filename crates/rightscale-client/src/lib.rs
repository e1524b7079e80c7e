//! RightScale API 1.5 Client
//!
//! A Rust client library for the RightScale cloud management API (1.5).
//! Provides typed media types, client-side validation of filters and views,
//! and explicit relationship traversal through resource links.
//!
//! # Example
//!
//! ```no_run
//! use rightscale_client::{ClientConfig, Filter, RightScaleClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = ClientConfig::from_env()?;
//! config.email = Some("ops@example.com".to_string());
//! config.password = Some("secret".to_string());
//! config.account_id = Some("1234".to_string());
//!
//! // Log in; the session cookies stay in the client
//! let client = RightScaleClient::connect(config).await?;
//!
//! // Query clouds, then walk to their instances
//! let clouds = client.index_clouds(&[Filter::eq("cloud_type", "amazon")]).await?;
//! for cloud in &clouds {
//!     let instances = cloud.instances(&client).await?;
//!     println!("{}: {} instances", cloud.name, instances.len());
//! }
//!
//! // Commit a ServerTemplate
//! let revision = client.commit_server_template("301", false, "nightly", true).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Sessions**: Email/password and instance-token login, cookie-based session
//! - **Validation**: Filters, views and required parameters are checked before any request
//! - **Relationships**: Links are followed explicitly with [`RightScaleClient::follow`]
//! - **Tags**: Optional auto-population of tags on taggable resources

pub mod client;
pub mod common;
pub mod config;
pub mod error;
pub mod hrefs;
pub mod models;
pub mod resources;
#[path = "trait.rs"]
pub mod resource_trait;

pub use client::RightScaleClient;
pub use common::filter::{Filter, FilterOperator};
pub use common::params::Params;
pub use common::{HttpClient, Link};
pub use config::ClientConfig;
pub use error::RightScaleError;
pub use models::*;
pub use resource_trait::{Resource, Taggable};
pub use resources::*;
