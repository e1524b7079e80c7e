//! Resource traits
//!
//! Every media type returned by the API carries a `links` array. The
//! [`Resource`] trait exposes it so relationships can be followed with an
//! explicit fetch (see [`crate::RightScaleClient::follow`]) instead of
//! being loaded eagerly.

use crate::common::Link;
use crate::hrefs;
use crate::models::Tag;
use serde::de::DeserializeOwned;

/// A typed RightScale media type
pub trait Resource: DeserializeOwned + Send + Sync {
    /// Resource type name used in errors and log lines
    const KIND: &'static str;

    /// Links embedded in the response this value was decoded from
    fn links(&self) -> &[Link];

    /// Href for the link with relation `rel`
    fn link(&self, rel: &str) -> Option<&str> {
        self.links()
            .iter()
            .find(|link| link.rel == rel)
            .map(|link| link.href.as_str())
    }

    /// Canonical href of this resource (`self` link)
    fn href(&self) -> Option<&str> {
        self.link("self")
    }

    /// Resource id, the last segment of the `self` href
    fn id(&self) -> Option<&str> {
        self.href().map(hrefs::id_from_href)
    }
}

/// Resources that can carry tags
pub trait Taggable: Resource {
    /// Tags currently attached to this value
    fn tags(&self) -> &[Tag];

    /// Replace the tags attached to this value
    fn set_tags(&mut self, tags: Vec<Tag>);
}

/// Implement [`Resource`] for media types with a `links: Vec<Link>` field
macro_rules! impl_resource {
    ($($ty:ty => $kind:literal),+ $(,)?) => {
        $(
            impl $crate::resource_trait::Resource for $ty {
                const KIND: &'static str = $kind;

                fn links(&self) -> &[$crate::common::Link] {
                    &self.links
                }
            }
        )+
    };
}

/// Implement [`Taggable`] for media types with a `tags: Vec<Tag>` field
macro_rules! impl_taggable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::resource_trait::Taggable for $ty {
                fn tags(&self) -> &[$crate::models::Tag] {
                    &self.tags
                }

                fn set_tags(&mut self, tags: Vec<$crate::models::Tag>) {
                    self.tags = tags;
                }
            }
        )+
    };
}

pub(crate) use impl_resource;
pub(crate) use impl_taggable;
